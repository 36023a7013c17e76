//! Two-player scoreboard on an STM32F446 Nucleo board.
//!
//! The scoreboard wants 31 GPIO lines: seven segment lines for each of the
//! four digit displays, one button input per player, and the line into the
//! external reset circuit.  The F446 has pins to spare; a Pi Pico does not,
//! which is why this demo is not on an RP2040.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::gpio::{AnyPin, Input, Level, Output, Pin, Pull, Speed};
use {defmt_rtt as _, panic_probe as _};

use scoreboard::{GpioBoard, PlayerPins, Polarity, Scoreboard};

/// Build the segment output lines for one digit display, A through G order.
///
/// Common anode: high is dark, so every segment starts dark.
fn digit_outputs(pins: [AnyPin; 7]) -> [Output<'static, AnyPin>; 7] {
    pins.map(|pin| Output::new(pin, Level::High, Speed::Low))
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_stm32::init(Default::default());

    // Player one: tens display on PA0-PA6, ones display on PA7-PA12/PA15
    // (PA13/PA14 stay on SWD), button on PC0
    let player1 = PlayerPins {
        tens: digit_outputs([
            p.PA0.degrade(),
            p.PA1.degrade(),
            p.PA2.degrade(),
            p.PA3.degrade(),
            p.PA4.degrade(),
            p.PA5.degrade(),
            p.PA6.degrade(),
        ]),
        ones: digit_outputs([
            p.PA7.degrade(),
            p.PA8.degrade(),
            p.PA9.degrade(),
            p.PA10.degrade(),
            p.PA11.degrade(),
            p.PA12.degrade(),
            p.PA15.degrade(),
        ]),
        button: Input::new(p.PC0.degrade(), Pull::Down),
    };

    // Player two: tens on PB0-PB6, ones on PB7-PB10/PB12-PB14, button on PC1
    let player2 = PlayerPins {
        tens: digit_outputs([
            p.PB0.degrade(),
            p.PB1.degrade(),
            p.PB2.degrade(),
            p.PB3.degrade(),
            p.PB4.degrade(),
            p.PB5.degrade(),
            p.PB6.degrade(),
        ]),
        ones: digit_outputs([
            p.PB7.degrade(),
            p.PB8.degrade(),
            p.PB9.degrade(),
            p.PB10.degrade(),
            p.PB12.degrade(),
            p.PB13.degrade(),
            p.PB14.degrade(),
        ]),
        button: Input::new(p.PC1.degrade(), Pull::Down),
    };

    // The reset line idles high; the external reset circuit triggers on low
    let reset = Output::new(p.PC2.degrade(), Level::High, Speed::Low);

    let mut scoreboard = Scoreboard::builder()
        .with_embassy_clock()
        .with_board(GpioBoard::new(player1, player2, reset, Polarity::CommonAnode));

    info!(
        "scoreboard up: first to {=u8}, win by {=u8}",
        scoreboard::WIN_TARGET,
        scoreboard::WIN_MARGIN
    );

    // GPIO on this HAL is infallible, so this runs until the reset line (or
    // the power switch) says otherwise
    let _ = scoreboard.run().await.unwrap();
}
