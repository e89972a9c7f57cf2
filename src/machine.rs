//! The debounce-and-event state machine.

use crate::config::{Config, Mode, Options};

/// A no-argument action run when an event fires.
pub type Handler<'a> = &'a dyn Fn();

/// Where the machine is in a press/release gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Idle, waiting for the raw level to match the active level.
    AwaitingPress,

    /// A press was seen; ignoring bounce until the press debounce
    /// elapses.
    DebouncingPress,

    /// Held, waiting for the raw level to leave the active level.  Long
    /// and repeat presses are detected here.
    AwaitingRelease,

    /// A release was seen; ignoring bounce until the release debounce
    /// elapses.
    DebouncingRelease,
}

#[derive(Clone, Copy)]
enum Event {
    Press,
    Release,
    LongPress,
    RepeatPress,
}

#[derive(Default)]
struct Handlers<'a> {
    press: Option<Handler<'a>>,
    release: Option<Handler<'a>>,
    long_press: Option<Handler<'a>>,
    repeat_press: Option<Handler<'a>>,
}

impl<'a> Handlers<'a> {
    fn fire(&self, event: Event) {
        let slot = match event {
            Event::Press => self.press,
            Event::Release => self.release,
            Event::LongPress => self.long_press,
            Event::RepeatPress => self.repeat_press,
        };

        if let Some(handler) = slot {
            handler();
        }
    }
}

/// Debounces one logical input and derives press, release, long-press
/// and repeat-press events from it.
///
/// The machine has no timer of its own.  Call
/// [`evaluate()`](#method.evaluate) from your main loop with the raw
/// level and the current time; handlers run synchronously from inside
/// that call, and must not call back into the same machine.
///
/// ```
/// use core::cell::Cell;
/// use tactile::{default::ACTIVE_HIGH, Machine};
///
/// let presses = Cell::new(0);
/// let count = || presses.set(presses.get() + 1);
///
/// let mut button = Machine::new(ACTIVE_HIGH);
/// button.on_press(Some(&count));
///
/// assert!(button.evaluate(true, 0));
/// assert!(button.evaluate(true, 10));
/// assert_eq!(1, presses.get());
/// ```
pub struct Machine<'a> {
    config: Config,
    handlers: Handlers<'a>,

    phase: Phase,
    engaged: bool,
    phase_entered_at: u32,
    hold_started_at: u32,
    long_press_fired: bool,
    next_repeat_at: u32,
    current_repeat_interval: u32,
}

impl<'a> Machine<'a> {
    /// Create an idle machine with the given configuration and no
    /// handlers.
    pub fn new(config: Config) -> Self {
        Machine {
            config,
            handlers: Handlers::default(),
            phase: Phase::AwaitingPress,
            engaged: false,
            phase_entered_at: 0,
            hold_started_at: 0,
            long_press_fired: false,
            next_repeat_at: 0,
            current_repeat_interval: config.repeat_initial_ms,
        }
    }

    /// Advance the machine by one step.
    ///
    /// `raw_level` is the current electrical level of the input and
    /// `now_ms` a millisecond counter that never goes backwards (it may
    /// wrap).  Returns whether the input is currently engaged.
    ///
    /// Engagement is optimistic: it turns on the moment a press is seen
    /// and off the moment a release is seen, before either edge has been
    /// debounced.
    pub fn evaluate(&mut self, raw_level: bool, now_ms: u32) -> bool {
        match self.phase {
            Phase::AwaitingPress => {
                if raw_level == self.config.active_level {
                    self.engaged = true;
                    self.hold_started_at = now_ms;
                    self.long_press_fired = false;
                    self.current_repeat_interval = self.config.repeat_initial_ms;
                    self.next_repeat_at = now_ms.wrapping_add(self.current_repeat_interval);
                    self.enter(Phase::DebouncingPress, now_ms);
                    self.fire(Event::Press);
                }
            }
            Phase::DebouncingPress => {
                if elapsed(now_ms, self.phase_entered_at) > self.config.press_debounce_ms {
                    self.enter(Phase::AwaitingRelease, now_ms);
                }
            }
            Phase::AwaitingRelease => {
                match self.config.mode {
                    Mode::ToggleAsPush => self.check_toggle_rest(now_ms),
                    Mode::Push => {
                        self.check_long_press(now_ms);
                        self.check_repeat_press(now_ms);
                    }
                }

                if raw_level != self.config.active_level {
                    self.engaged = false;
                    self.enter(Phase::DebouncingRelease, now_ms);
                    self.fire(Event::Release);
                }
            }
            Phase::DebouncingRelease => {
                if elapsed(now_ms, self.phase_entered_at) > self.config.release_debounce_ms {
                    self.enter(Phase::AwaitingPress, now_ms);
                }
            }
        }

        self.engaged
    }

    // Entering AwaitingRelease keeps the press timestamp, since the
    // toggle rest time is measured from the press.
    fn enter(&mut self, phase: Phase, now_ms: u32) {
        trace!("phase {} -> {} at {}", self.phase, phase, now_ms);

        if phase != Phase::AwaitingRelease {
            self.phase_entered_at = now_ms;
        }
        self.phase = phase;
    }

    fn check_toggle_rest(&mut self, now_ms: u32) {
        if elapsed(now_ms, self.phase_entered_at) > self.config.toggle_rest_ms {
            self.config.active_level = !self.config.active_level;
            trace!("toggle rested, active level now {}", self.config.active_level);
        }
    }

    fn check_long_press(&mut self, now_ms: u32) {
        if self.long_press_fired {
            return;
        }

        if elapsed(now_ms, self.hold_started_at) > self.config.long_press_ms {
            self.long_press_fired = true;
            self.fire(Event::LongPress);
        }
    }

    fn check_repeat_press(&mut self, now_ms: u32) {
        let held = elapsed(now_ms, self.hold_started_at);
        let due = elapsed(self.next_repeat_at, self.hold_started_at);

        if held > due {
            self.current_repeat_interval = self.config.repeat_subsequent_ms;
            self.next_repeat_at = self
                .next_repeat_at
                .wrapping_add(self.current_repeat_interval);
            self.fire(Event::RepeatPress);
        }
    }

    fn fire(&self, event: Event) {
        trace!(
            "{}",
            match event {
                Event::Press => "press",
                Event::Release => "release",
                Event::LongPress => "long press",
                Event::RepeatPress => "repeat press",
            }
        );

        self.handlers.fire(event);
    }

    /// Overwrite the configuration fields set in `options`.
    ///
    /// Durations are read live, so a change made mid-gesture applies on
    /// the next call to [`evaluate()`](#method.evaluate).
    pub fn configure(&mut self, options: Options) {
        self.config.apply(options);
    }

    /// The current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Set which raw level counts as engaged.
    pub fn set_active_level(&mut self, level: bool) {
        self.config.active_level = level;
    }

    /// The raw level that counts as engaged.
    pub fn active_level(&self) -> bool {
        self.config.active_level
    }

    /// Treat `raw_level` as the resting level, so the opposite level
    /// becomes the active one.
    ///
    /// [`Button`](crate::Button) wraps this to read the level from its
    /// pin.
    pub fn adopt_level_as_inactive(&mut self, raw_level: bool) {
        self.config.active_level = !raw_level;
    }

    /// Switch to [`Mode::ToggleAsPush`] with `raw_level` as the
    /// switch's resting position.
    pub fn enable_toggle_as_push(&mut self, raw_level: bool) {
        self.config.mode = Mode::ToggleAsPush;
        self.adopt_level_as_inactive(raw_level);
    }

    /// Is a toggle switch acting as a push button?
    pub fn is_toggle_as_push(&self) -> bool {
        self.config.is_toggle_as_push()
    }

    /// Push button or toggle switch.
    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    /// Set the press debounce time.
    pub fn set_press_debounce_ms(&mut self, ms: u32) {
        self.config.press_debounce_ms = ms;
    }

    /// The press debounce time.
    pub fn press_debounce_ms(&self) -> u32 {
        self.config.press_debounce_ms
    }

    /// Set the release debounce time.
    pub fn set_release_debounce_ms(&mut self, ms: u32) {
        self.config.release_debounce_ms = ms;
    }

    /// The release debounce time.
    pub fn release_debounce_ms(&self) -> u32 {
        self.config.release_debounce_ms
    }

    /// Set the hold time for a long-press.
    pub fn set_long_press_ms(&mut self, ms: u32) {
        self.config.long_press_ms = ms;
    }

    /// The hold time for a long-press.
    pub fn long_press_ms(&self) -> u32 {
        self.config.long_press_ms
    }

    /// Set the hold time before the first repeat-press.  Takes effect
    /// from the next press.
    pub fn set_repeat_initial_ms(&mut self, ms: u32) {
        self.config.repeat_initial_ms = ms;
    }

    /// The hold time before the first repeat-press.
    pub fn repeat_initial_ms(&self) -> u32 {
        self.config.repeat_initial_ms
    }

    /// Set the interval between subsequent repeat-presses.
    pub fn set_repeat_subsequent_ms(&mut self, ms: u32) {
        self.config.repeat_subsequent_ms = ms;
    }

    /// The interval between subsequent repeat-presses.
    pub fn repeat_subsequent_ms(&self) -> u32 {
        self.config.repeat_subsequent_ms
    }

    /// Set the toggle switch rest time.
    pub fn set_toggle_rest_ms(&mut self, ms: u32) {
        self.config.toggle_rest_ms = ms;
    }

    /// The toggle switch rest time.
    pub fn toggle_rest_ms(&self) -> u32 {
        self.config.toggle_rest_ms
    }

    /// Run `handler` whenever a press is detected.  `None` clears it.
    pub fn on_press(&mut self, handler: Option<Handler<'a>>) {
        self.handlers.press = handler;
    }

    /// Run `handler` whenever a release is detected.  `None` clears it.
    pub fn on_release(&mut self, handler: Option<Handler<'a>>) {
        self.handlers.release = handler;
    }

    /// Run `handler` once per hold longer than the long-press time.
    /// `None` clears it.
    pub fn on_long_press(&mut self, handler: Option<Handler<'a>>) {
        self.handlers.long_press = handler;
    }

    /// Run `handler` on every auto-repeat while held.  `None` clears it.
    pub fn on_repeat_press(&mut self, handler: Option<Handler<'a>>) {
        self.handlers.repeat_press = handler;
    }

    /// The current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The value last returned by [`evaluate()`](#method.evaluate).
    pub fn is_engaged(&self) -> bool {
        self.engaged
    }
}

#[inline(always)]
fn elapsed(now_ms: u32, since_ms: u32) -> u32 {
    now_ms.wrapping_sub(since_ms)
}
