//! Module describing the [`Board`] and [`Clock`] traits and their
//! implementations for real hardware.

// This module defines traits w/ async methods.  That triggers a warning due to the
// very...limited support for this in current Rust.  However this pertains only to
// the use of futures returned by async methods in multi-threaded executors.  As
// this crate is meant for use on embedded microcontrollers without any concept of
// threads, this does not concern us at all
#![allow(async_fn_in_trait)]

use crate::digit::{Segment, SEGMENT_COUNT};
use crate::game::PlayerId;
use embedded_hal_1::digital::{InputPin, OutputPin, PinState};
use strum::VariantArray;

/// Which of a player's two digit displays a write targets
#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::VariantArray)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DigitPlace {
    /// The left display of the pair, showing the tens digit
    Tens,
    /// The right display of the pair, showing the ones digit
    Ones,
}

/// This trait represents the whole digital I/O surface of the scoreboard: 28
/// segment output lines (7 per digit, 2 digits per player), one button input
/// per player, and the external reset line.
///
/// The control loop is written purely against this trait, so it can run
/// against any HAL that can provide the pins — or against a mock in tests.
/// The built-in [`GpioBoard`] implementation covers any HAL whose GPIO types
/// implement the `embedded-hal` 1.0 digital traits.
pub trait Board {
    type Error;

    /// Drive the seven segment lines of one digit display to `mask`.
    ///
    /// Bit 0 of `mask` is segment A through bit 6 for segment G; a set bit
    /// means the segment is lit.  How a lit segment translates to an
    /// electrical level is the implementation's business (see [`Polarity`]).
    fn drive_digit(
        &mut self,
        player: PlayerId,
        place: DigitPlace,
        mask: u8,
    ) -> Result<(), Self::Error>;

    /// Sample one player's button.  `true` means pressed.
    fn read_button(&mut self, player: PlayerId) -> Result<bool, Self::Error>;

    /// Assert the external reset line.
    ///
    /// The line is a level signal into an external reset circuit, not a
    /// one-shot call; asserting it repeatedly while a hold continues is
    /// harmless.  The caller does not expect to survive this on wired
    /// hardware.
    fn fire_reset(&mut self) -> Result<(), Self::Error>;
}

/// Abstraction over platform timekeeping for the control loop.
///
/// The timer situation on embedded Rust is still quite unstable, with competing
/// implementations including `embassy-time`, `embedded-time`, `fugit`, and
/// probably others.  To avoid picking a side, this small trait needs to be
/// implemented in terms of whatever your preferred timer implementation is —
/// and a simulated clock satisfies it in host tests, so the loop's long pauses
/// cost nothing there.
pub trait Clock {
    /// Milliseconds elapsed since power-on, monotonic
    fn now_ms(&self) -> u64;

    /// Stall for `ms` milliseconds.
    ///
    /// The control loop leans on this for the post-press debounce pause and
    /// the winner blink cadence; while a pause runs, *nothing* else does —
    /// no display refresh, no button sampling.  That is intended behavior,
    /// not an accident.
    async fn pause_ms(&mut self, ms: u64);
}

/// Electrical polarity of the 28 segment drive lines, fixed once at board
/// construction and applied uniformly.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Common-anode wiring: a line is pulled low to light its segment
    CommonAnode,
    /// Common-cathode wiring: a line is driven high to light its segment
    CommonCathode,
}

impl Polarity {
    /// The level that a segment line must be driven to so the segment is lit
    /// (`lit` true) or dark (`lit` false)
    pub fn line_state(self, lit: bool) -> PinState {
        match (self, lit) {
            (Self::CommonAnode, true) => PinState::Low,
            (Self::CommonAnode, false) => PinState::High,
            (Self::CommonCathode, true) => PinState::High,
            (Self::CommonCathode, false) => PinState::Low,
        }
    }
}

/// One player's slice of the I/O surface: the segment lines for both digit
/// displays, in A-through-G order, and the button input.
///
/// The assignment is fixed for the life of the board; the two players never
/// share a line.
pub struct PlayerPins<O, I> {
    pub tens: [O; SEGMENT_COUNT],
    pub ones: [O; SEGMENT_COUNT],
    pub button: I,
}

/// [`Board`] implementation in terms of `embedded-hal` 1.0 digital pins.
///
/// Buttons are read directly: a high level is a press, so wire the switches
/// to pull the inputs up when closed (or hand this type inverted inputs).
/// The reset line is treated as active-low, the common arrangement for
/// microcontroller reset circuits; construct it idling high.
pub struct GpioBoard<O, I> {
    p1: PlayerPins<O, I>,
    p2: PlayerPins<O, I>,
    reset: O,
    polarity: Polarity,
}

impl<O, I, E> GpioBoard<O, I>
where
    O: OutputPin<Error = E>,
    I: InputPin<Error = E>,
{
    pub fn new(p1: PlayerPins<O, I>, p2: PlayerPins<O, I>, reset: O, polarity: Polarity) -> Self {
        Self {
            p1,
            p2,
            reset,
            polarity,
        }
    }

    fn digit_pins(&mut self, player: PlayerId, place: DigitPlace) -> &mut [O; SEGMENT_COUNT] {
        let pins = match player {
            PlayerId::One => &mut self.p1,
            PlayerId::Two => &mut self.p2,
        };

        match place {
            DigitPlace::Tens => &mut pins.tens,
            DigitPlace::Ones => &mut pins.ones,
        }
    }
}

impl<O, I, E> Board for GpioBoard<O, I>
where
    O: OutputPin<Error = E>,
    I: InputPin<Error = E>,
{
    type Error = E;

    fn drive_digit(
        &mut self,
        player: PlayerId,
        place: DigitPlace,
        mask: u8,
    ) -> Result<(), Self::Error> {
        let polarity = self.polarity;
        let pins = self.digit_pins(player, place);

        for (segment, pin) in Segment::VARIANTS.iter().zip(pins.iter_mut()) {
            pin.set_state(polarity.line_state(segment.lit_in(mask)))?;
        }

        Ok(())
    }

    fn read_button(&mut self, player: PlayerId) -> Result<bool, Self::Error> {
        match player {
            PlayerId::One => self.p1.button.is_high(),
            PlayerId::Two => self.p2.button.is_high(),
        }
    }

    fn fire_reset(&mut self) -> Result<(), Self::Error> {
        self.reset.set_low()
    }
}

#[cfg(feature = "embassy-time")]
mod embassy_time_clock {
    use embassy_time::{Duration, Instant, Timer};

    /// [`super::Clock`] implementation built on `embassy-time`
    pub struct EmbassyTimeClock;

    impl super::Clock for EmbassyTimeClock {
        fn now_ms(&self) -> u64 {
            Instant::now().as_millis()
        }

        async fn pause_ms(&mut self, ms: u64) {
            Timer::after(Duration::from_millis(ms)).await
        }
    }
}

#[cfg(feature = "embassy-time")]
pub use embassy_time_clock::EmbassyTimeClock;
