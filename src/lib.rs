//! Driver for the Data-Vu LED display kit.
//!
//! ## How the Data-Vu hardware works
//!
//! The kit carries two LT8500 48-channel, 12-bit PWM LED controllers chained
//! into one 96-channel shift register. Each channel sinks the current of one
//! "symbol" on the glass: an annunciator, a bar segment or one segment of a
//! seven-segment digit.
//!
//! ### Signal names
//! - **SDI** – Serial data into chip 1; chip 1's SDO feeds chip 2's SDI
//! - **SCKI** – Shift clock, idle low; data is sampled on the rising edge
//! - **LDI** – Latch; a high pulse moves the shifted frame into both chips'
//!   registers at once. Holding it high for a long time resets the chips.
//! - **PWMCK** – External PWM clock for the chips' grayscale counters
//! - **Anode** – The LED supply, set through a PWM-driven DAC
//!
//! ### Frame format
//! Each chip expects 48 × 12 bits of channel data followed by an 8-bit command
//! selecting the register the data goes to. As the bits ripple through chip 1
//! into chip 2, chip 2's frame is shifted first:
//!
//! 1. Channels 95 down to 48 (chip 2), 12 bits each, MSB first
//! 2. Command for chip 2
//! 3. Channels 47 down to 0 (chip 1)
//! 4. Command for chip 1
//! 5. One latch pulse
//!
//! That is [`BITS_PER_TRANSMISSION`] clocked bits per frame. Both chips always
//! receive the same command.
//!
//! ### Grayscale and correction
//! Channel values are 12-bit duty cycles (0 ..= [`MAX_DRIVE`]). The chips also
//! hold a per-channel correction register, loaded with the same frame format
//! under [`Command::UpdateCorrection`]. Correction factors are stored as 6-bit
//! values (0 ..= [`MAX_CALIBRATION`]) and moved into the top of the 12-bit word
//! before they are sent. Correction is switched with a *toggle* command, so the
//! driver remembers which way it last switched it.
//!
//! ## Crate layout
//!
//! - [`layout`] / [`products`] – symbol to channel wiring of each product
//! - [`font`] – seven-segment glyphs
//! - [`frame`] – the in-memory frame of drive values
//! - [`calibration`] – correction values and their persistence
//! - [`protocol`] – the bit-banged LT8500 chain
//! - [`datavu`] – [`DataVu`], the controller tying it all together
//!
//! Hardware is reached through `embedded-hal` 1.0 traits (`OutputPin`,
//! `SetDutyCycle`, `DelayNs`) and the [`CalibrationStorage`] trait, so the
//! driver runs on any HAL and can be tested against fakes.
//!
//! ## Available Feature Flags
//!
//! ### `defmt` Feature
//! Implements `defmt::Format` for the public types and emits `defmt` log
//! messages: `trace` for every transmission, `debug` for reset steps and
//! calibration changes, `warn` for storage problems.
#![no_std]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod calibration;
pub mod config;
pub mod datavu;
mod error;
pub mod font;
pub mod frame;
pub mod layout;
pub mod products;
pub mod protocol;

#[cfg(test)]
mod testing;

pub use calibration::{Calibration, CalibrationStorage};
pub use config::Config;
pub use datavu::{ChipState, DataVu};
pub use error::{Error, Result};
pub use frame::FrameBuffer;
pub use layout::Layout;
pub use protocol::{ChipChain, Command};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of chips in the chain.
pub const CHIP_COUNT: usize = 2;

/// Number of PWM channels of one LT8500.
pub const CHANNELS_PER_CHIP: usize = 48;

/// Number of PWM channels of the whole chain.
pub const CHANNEL_COUNT: usize = CHIP_COUNT * CHANNELS_PER_CHIP;

/// Width of one channel value on the wire.
pub const VALUE_BITS: u32 = 12;

/// Width of the command on the wire.
pub const COMMAND_BITS: u32 = 8;

/// Number of clocked bits in one transmission.
pub const BITS_PER_TRANSMISSION: usize =
    CHANNEL_COUNT * VALUE_BITS as usize + CHIP_COUNT * COMMAND_BITS as usize;

/// Largest drive value.
pub const MAX_DRIVE: u16 = (1 << VALUE_BITS) - 1;

/// Largest calibration value.
pub const MAX_CALIBRATION: u8 = 63;

/// Largest anode voltage, in volts.
pub const MAX_VOLTAGE: f32 = 5.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_dimensions() {
        assert_eq!(CHANNEL_COUNT, 96);
        assert_eq!(CHANNEL_COUNT / CHIP_COUNT, CHANNELS_PER_CHIP);
        assert_eq!(BITS_PER_TRANSMISSION, 96 * 12 + 2 * 8);
        assert_eq!(BITS_PER_TRANSMISSION, 1168);
    }

    #[test]
    fn test_value_limits() {
        assert_eq!(MAX_DRIVE, 4095);
        assert_eq!(u16::from(MAX_CALIBRATION) << calibration::CALIBRATION_SHIFT, 4032);
        assert!(u16::from(MAX_CALIBRATION) << calibration::CALIBRATION_SHIFT <= MAX_DRIVE);
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
