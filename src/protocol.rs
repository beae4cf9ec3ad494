//! Bit-banged serial interface of the two chained LT8500 chips.
//!
//! [`ChipChain`] owns the data, clock and latch lines. Every transmission
//! shifts one 12-bit value per physical channel, from channel 95 down to
//! channel 0, with the command byte inserted after the last channel of each
//! chip, then pulses the latch. Unconnected channels are sent as 0 so unused
//! outputs stay dark.
//!
//! ```text
//!  SDI   ─┤ch95├┤ch94├ … ┤ch48├┤cmd├┤ch47├ … ┤ch0├┤cmd├─ low
//!  SCKI  ─╨╨╨╨╨╨╨╨╨╨╨╨╨╨╨╨╨╨╨╨╨╨╨╨╨╨╨╨╨╨╨╨╨╨╨╨╨╨╨╨╨╨╨╨╨╨╨
//!  LDI   ─────────────────────────────────────────────┐┌─
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};

use crate::layout::Layout;
use crate::{Error, Result, CHANNELS_PER_CHIP, CHANNEL_COUNT, COMMAND_BITS, VALUE_BITS};

/// LT8500 command codes.
///
/// The command follows the channel data of each chip and selects what the
/// chip does with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Command {
    /// Load the channel data as PWM duty cycles.
    UpdatePwm = 0x00,
    /// Load the channel data as correction factors.
    UpdateCorrection = 0x20,
    /// Start the PWM outputs.
    EnablePwm = 0x30,
    /// Stop the PWM outputs.
    DisablePwm = 0x40,
    /// Flip correction on or off. Correction is on after power-up.
    ToggleCorrection = 0x70,
    /// Flip phase-shifted PWM on or off.
    TogglePhaseShift = 0x06,
}

impl Command {
    /// Every command, in code order.
    pub const ALL: [Self; 6] = [
        Self::UpdatePwm,
        Self::TogglePhaseShift,
        Self::UpdateCorrection,
        Self::EnablePwm,
        Self::DisablePwm,
        Self::ToggleCorrection,
    ];

    /// Byte sent on the wire.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl From<Command> for u8 {
    fn from(command: Command) -> Self {
        command.code()
    }
}

impl TryFrom<u8> for Command {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|command| command.code() == code)
            .ok_or(Error::OutOfRange)
    }
}

/// The data, clock and latch lines of the chain.
pub struct ChipChain<SDI, SCKI, LATCH> {
    sdi: SDI,
    scki: SCKI,
    latch: LATCH,
}

impl<SDI, SCKI, LATCH> ChipChain<SDI, SCKI, LATCH>
where
    SDI: OutputPin,
    SCKI: OutputPin,
    LATCH: OutputPin,
{
    /// Takes ownership of the lines. Call [`ChipChain::idle`] to drive them
    /// to their idle levels.
    pub const fn new(sdi: SDI, scki: SCKI, latch: LATCH) -> Self {
        Self { sdi, scki, latch }
    }

    /// Drives all three lines low.
    ///
    /// # Errors
    /// [`Error::Bus`] if a line refuses the level.
    pub fn idle(&mut self) -> Result<()> {
        self.sdi.set_low().map_err(|_| Error::Bus)?;
        self.scki.set_low().map_err(|_| Error::Bus)?;
        self.latch.set_low().map_err(|_| Error::Bus)
    }

    /// Holds the latch high for `hold_ms` milliseconds, which clears the
    /// chips' shift registers, then drops it.
    ///
    /// # Errors
    /// [`Error::Bus`] if the latch refuses a level.
    pub fn reset_pulse<D: DelayNs>(&mut self, delay: &mut D, hold_ms: u32) -> Result<()> {
        self.latch.set_high().map_err(|_| Error::Bus)?;
        delay.delay_ms(hold_ms);
        self.latch.set_low().map_err(|_| Error::Bus)
    }

    /// Sends `command` with the value `value(channel)` for every physical
    /// channel, then latches.
    ///
    /// Only the low 12 bits of each value are sent.
    ///
    /// # Errors
    /// [`Error::Bus`] if a line refuses a level. The transmission stops there
    /// and nothing is latched.
    pub fn write<F>(&mut self, command: Command, mut value: F) -> Result<()>
    where
        F: FnMut(usize) -> u16,
    {
        self.send(
            command,
            (0..CHANNEL_COUNT)
                .rev()
                .map(|channel| (channel, value(channel))),
        )
    }

    /// Sends `command` with per-symbol `values`, placed on the channels
    /// `layout` wires them to.
    ///
    /// # Errors
    /// [`Error::Bus`] if a line refuses a level.
    pub fn write_symbols<const SYMBOLS: usize, const DIGITS: usize>(
        &mut self,
        command: Command,
        layout: &Layout<SYMBOLS, DIGITS>,
        values: &[u16; SYMBOLS],
    ) -> Result<()> {
        self.send(
            command,
            layout
                .channels_descending()
                .map(|(channel, symbol)| (channel, symbol.map_or(0, |symbol| values[symbol]))),
        )
    }

    /// Gives the lines back.
    pub fn release(self) -> (SDI, SCKI, LATCH) {
        (self.sdi, self.scki, self.latch)
    }

    // `words` yields `(channel, value)` from channel 95 down to channel 0.
    fn send<I>(&mut self, command: Command, words: I) -> Result<()>
    where
        I: Iterator<Item = (usize, u16)>,
    {
        #[cfg(feature = "defmt")]
        defmt::trace!("transmit {}", command);

        for (channel, word) in words {
            self.shift(word, VALUE_BITS)?;
            // Last channel of a chip: that chip's command register follows.
            if channel % CHANNELS_PER_CHIP == 0 {
                self.shift(command.code().into(), COMMAND_BITS)?;
            }
        }
        self.sdi.set_low().map_err(|_| Error::Bus)?;
        self.pulse_latch()
    }

    fn shift(&mut self, word: u16, bits: u32) -> Result<()> {
        for bit in (0..bits).rev() {
            let level = PinState::from((word >> bit) & 1 != 0);
            self.sdi.set_state(level).map_err(|_| Error::Bus)?;
            self.scki.set_high().map_err(|_| Error::Bus)?;
            self.scki.set_low().map_err(|_| Error::Bus)?;
        }
        Ok(())
    }

    fn pulse_latch(&mut self) -> Result<()> {
        self.latch.set_high().map_err(|_| Error::Bus)?;
        self.latch.set_low().map_err(|_| Error::Bus)
    }
}
