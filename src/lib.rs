//! Turn a bouncing button into press, release, long-press and
//! repeat-press events.
//!
//! Mechanical contacts don't close cleanly: a single press of a button
//! or flip of a switch shows up as a burst of transitions before the
//! level settles.  This crate debounces one [`embedded-hal`][0]
//! `InputPin` with a small timed state machine and fires your handlers
//! once per physical gesture:
//!
//! - **press**, the moment the input first reaches its active level,
//! - **release**, the moment it first leaves it,
//! - **long-press**, once per hold longer than a threshold,
//! - **repeat-press**, after an initial delay and then at a steady
//!   interval for as long as the button is held.
//!
//! Edges are reported eagerly and the bounce that follows is ignored,
//! so there's no added latency on the first edge.
//!
//! A maintained toggle switch can stand in for a push button, too: in
//! [`Mode::ToggleAsPush`] each flip produces a press, and once the
//! switch has rested in its new position, a release.
//!
//! # Usage
//!
//! You need to bring just a few things:
//!
//! - An [`InputPin`][1], already configured by your HAL (e.g. with a
//!   pull-up enabled).
//! - A millisecond counter.  It may wrap, but must not go backwards.
//! - Some way to call [`check()`](Button#method.check) regularly, often
//!   enough that the debounce times mean something.  A spin-delayed call
//!   from your main loop is fine.
//!
//! There is no timer or interrupt inside.  Everything happens
//! synchronously inside `check()`, including running handlers.
//!
//! ```toml
//! [dependencies]
//! tactile = "0.1"
//! ```
//!
//! ## Create the button.
//!
//! ```
//! # struct PinType;
//! # impl embedded_hal::digital::v2::InputPin for PinType {
//! #     type Error = core::convert::Infallible;
//! #     fn is_high(&self) -> Result<bool, Self::Error> {
//! #         Ok(true)
//! #     }
//! #     fn is_low(&self) -> Result<bool, Self::Error> {
//! #         Ok(false)
//! #     }
//! # }
//! # let input_pin = PinType;
//! use tactile::Button;
//!
//! fn beep() {}
//!
//! let mut button = Button::new(input_pin);
//! button.on_press(Some(&beep));
//! ```
//!
//! ## Calibrate, if you don't know the wiring.
//!
//! [`Button::new()`](Button#method.new) assumes an active-low button.
//! If you can't be sure, read the resting level at startup instead:
//!
//! ```
//! # struct PinType;
//! # impl embedded_hal::digital::v2::InputPin for PinType {
//! #     type Error = core::convert::Infallible;
//! #     fn is_high(&self) -> Result<bool, Self::Error> {
//! #         Ok(true)
//! #     }
//! #     fn is_low(&self) -> Result<bool, Self::Error> {
//! #         Ok(false)
//! #     }
//! # }
//! # let input_pin = PinType;
//! # let mut button = tactile::Button::new(input_pin);
//! button.adopt_current_level_as_inactive().unwrap();
//! assert_eq!(false, button.active_level());
//! ```
//!
//! ## Check the button.
//!
//! ```
//! # struct PinType;
//! # impl embedded_hal::digital::v2::InputPin for PinType {
//! #     type Error = core::convert::Infallible;
//! #     fn is_high(&self) -> Result<bool, Self::Error> {
//! #         Ok(true)
//! #     }
//! #     fn is_low(&self) -> Result<bool, Self::Error> {
//! #         Ok(false)
//! #     }
//! # }
//! # let input_pin = PinType;
//! # let mut button = tactile::Button::new(input_pin);
//! # fn millis() -> u32 { 0 }
//! let engaged = button.check(millis()).unwrap();
//! ```
//!
//! If the level comes from somewhere other than a pin, use a
//! [`Machine`](Machine) directly and feed it levels with
//! [`evaluate()`](Machine#method.evaluate).
//!
//! # Logging
//!
//! With the `defmt` feature enabled, every phase change and event is
//! logged at trace level.
//!
//! [0]: https://github.com/rust-embedded/embedded-hal
//! [1]: https://docs.rs/embedded-hal/0.2.4/embedded_hal/digital/v2/trait.InputPin.html

#![no_std]
#![deny(missing_docs)]
#![doc(html_root_url = "https://docs.rs/tactile/0.1.0")]

macro_rules! trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        defmt::trace!($($arg)*);
    }};
}

mod config;
mod machine;

pub use config::{default, Config, Mode, Options};
pub use machine::{Handler, Machine, Phase};

use core::ops::{Deref, DerefMut};

use embedded_hal::digital::v2::InputPin;

/// A debounced button on an input pin.
///
/// This owns the pin and a [`Machine`](Machine), and dereferences to the
/// machine for configuration, handlers and introspection.
///
/// ```
/// # use embedded_hal_mock::pin::{Mock, State, Transaction};
/// use core::cell::Cell;
/// use tactile::Button;
///
/// # let pin = Mock::new(&[
/// #     Transaction::get(State::Low),
/// #     Transaction::get(State::Low),
/// # ]);
/// let presses = Cell::new(0);
/// let count = || presses.set(presses.get() + 1);
///
/// let mut button = Button::new(pin);
/// button.on_press(Some(&count));
///
/// assert!(button.check(0).unwrap());
/// assert!(button.check(10).unwrap());
/// assert_eq!(1, presses.get());
/// # button.free().done();
/// ```
pub struct Button<'a, Pin> {
    pin: Pin,
    machine: Machine<'a>,
}

impl<'a, Pin: InputPin> Button<'a, Pin> {
    /// A button with the default timings that is pressed when the pin is
    /// low, as with a pull-up and a switch to ground.
    pub fn new(pin: Pin) -> Self {
        Button::with_config(pin, default::ACTIVE_LOW)
    }

    /// A button with the default timings, pressed when the pin reads
    /// `active_level`.
    pub fn with_active_level(pin: Pin, active_level: bool) -> Self {
        Button::with_config(pin, Config::new().with_active_level(active_level))
    }

    /// A button with an explicit configuration.
    pub fn with_config(pin: Pin, config: Config) -> Self {
        Button {
            pin,
            machine: Machine::new(config),
        }
    }

    /// Read the pin and take its current level as the inactive one.
    ///
    /// Call this at startup, while the button isn't pressed, to pick the
    /// polarity without knowing the wiring.
    pub fn adopt_current_level_as_inactive(&mut self) -> Result<(), Pin::Error> {
        let level = self.pin.is_high()?;
        self.machine.adopt_level_as_inactive(level);
        Ok(())
    }

    /// Treat the pin as a toggle switch acting as a push button.
    ///
    /// The switch's current position becomes its resting position.
    /// Long-press and repeat-press stop firing.
    pub fn enable_toggle_as_push(&mut self) -> Result<(), Pin::Error> {
        let level = self.pin.is_high()?;
        self.machine.enable_toggle_as_push(level);
        Ok(())
    }

    /// Read the pin once and advance the state machine.
    ///
    /// Returns whether the button is engaged.  See
    /// [`Machine::evaluate()`](Machine#method.evaluate).
    pub fn check(&mut self, now_ms: u32) -> Result<bool, Pin::Error> {
        let level = self.pin.is_high()?;
        Ok(self.machine.evaluate(level, now_ms))
    }

    /// Give back the input pin.
    pub fn free(self) -> Pin {
        self.pin
    }
}

impl<'a, Pin> Deref for Button<'a, Pin> {
    type Target = Machine<'a>;

    fn deref(&self) -> &Self::Target {
        &self.machine
    }
}

impl<'a, Pin> DerefMut for Button<'a, Pin> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.machine
    }
}
