//! Timing and polarity configuration.

/// How a held input is interpreted once the press has been debounced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// A momentary push button.  Holding it produces long-press and
    /// repeat-press events.
    Push,

    /// A maintained toggle switch acting as a push button.  Once the
    /// switch has rested in a position for
    /// [`toggle_rest_ms`](Config#structfield.toggle_rest_ms), that
    /// position becomes the new inactive level.  A toggle can't be held
    /// the way a button can, so long-press and repeat-press never fire.
    ToggleAsPush,
}

/// Static configuration of a [`Machine`](crate::Machine).
///
/// All durations are in milliseconds.  Nothing is validated: a zero
/// duration just means the corresponding step happens on the next call
/// with a later timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// The raw level that means "physically engaged".
    pub active_level: bool,

    /// How long a press must stay put before a release is looked for.
    pub press_debounce_ms: u32,

    /// How long a release must stay put before a new press is looked for.
    pub release_debounce_ms: u32,

    /// Continuous engagement needed for a long-press.
    pub long_press_ms: u32,

    /// Continuous engagement needed for the first repeat-press.
    pub repeat_initial_ms: u32,

    /// Interval between subsequent repeat-presses.
    pub repeat_subsequent_ms: u32,

    /// Rest time after which a toggle switch's position becomes the new
    /// inactive level.
    pub toggle_rest_ms: u32,

    /// Push button or toggle switch.
    pub mode: Mode,
}

impl Config {
    /// The defaults: active low, 75ms press debounce, 175ms release
    /// debounce, 700ms long-press, 700ms/200ms repeat, 500ms toggle rest,
    /// push button mode.
    pub const fn new() -> Self {
        Config {
            active_level: false,
            press_debounce_ms: 75,
            release_debounce_ms: 175,
            long_press_ms: 700,
            repeat_initial_ms: 700,
            repeat_subsequent_ms: 200,
            toggle_rest_ms: 500,
            mode: Mode::Push,
        }
    }

    /// The same configuration with a different active level.
    pub const fn with_active_level(mut self, level: bool) -> Self {
        self.active_level = level;
        self
    }

    /// Overwrite every field that is set in `options`.
    pub fn apply(&mut self, options: Options) {
        if let Some(level) = options.active_level {
            self.active_level = level;
        }
        if let Some(ms) = options.press_debounce_ms {
            self.press_debounce_ms = ms;
        }
        if let Some(ms) = options.release_debounce_ms {
            self.release_debounce_ms = ms;
        }
        if let Some(ms) = options.long_press_ms {
            self.long_press_ms = ms;
        }
        if let Some(ms) = options.repeat_initial_ms {
            self.repeat_initial_ms = ms;
        }
        if let Some(ms) = options.repeat_subsequent_ms {
            self.repeat_subsequent_ms = ms;
        }
        if let Some(ms) = options.toggle_rest_ms {
            self.toggle_rest_ms = ms;
        }
        if let Some(toggle) = options.toggle_as_push {
            self.mode = if toggle { Mode::ToggleAsPush } else { Mode::Push };
        }
    }

    /// Is this a toggle switch acting as a push button?
    pub fn is_toggle_as_push(&self) -> bool {
        self.mode == Mode::ToggleAsPush
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

/// A partial update to a [`Config`].
///
/// Fields left as `None` keep their current value.
///
/// ```
/// use tactile::{Config, Options};
///
/// let mut config = Config::new();
/// config.apply(Options {
///     press_debounce_ms: Some(20),
///     ..Options::default()
/// });
///
/// assert_eq!(20, config.press_debounce_ms);
/// assert_eq!(175, config.release_debounce_ms);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Options {
    /// See [`Config::active_level`].
    pub active_level: Option<bool>,
    /// See [`Config::press_debounce_ms`].
    pub press_debounce_ms: Option<u32>,
    /// See [`Config::release_debounce_ms`].
    pub release_debounce_ms: Option<u32>,
    /// See [`Config::long_press_ms`].
    pub long_press_ms: Option<u32>,
    /// See [`Config::repeat_initial_ms`].
    pub repeat_initial_ms: Option<u32>,
    /// See [`Config::repeat_subsequent_ms`].
    pub repeat_subsequent_ms: Option<u32>,
    /// See [`Config::toggle_rest_ms`].
    pub toggle_rest_ms: Option<u32>,
    /// `true` selects [`Mode::ToggleAsPush`], `false` selects
    /// [`Mode::Push`].  No calibration happens here; see
    /// [`Button::enable_toggle_as_push()`](crate::Button#method.enable_toggle_as_push).
    pub toggle_as_push: Option<bool>,
}

/// Some default configurations.
///
/// These carry the stock timings and differ only in polarity.
pub mod default {
    use super::Config;

    /// A button that pulls the line low when pressed, e.g. wired to
    /// ground with an internal pull-up.
    pub const ACTIVE_LOW: Config = Config::new().with_active_level(false);

    /// A button that pulls the line high when pressed.
    pub const ACTIVE_HIGH: Config = Config::new().with_active_level(true);
}
