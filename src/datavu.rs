//! The Data-Vu controller.
//!
//! [`DataVu`] owns the chip chain, the anode-voltage and pixel-clock PWM
//! channels, a blocking delay and the calibration store, and keeps the frame
//! and calibration state in RAM.
//!
//! # Example
//! ```rust,ignore
//! use datavu::products::NORMAL;
//! use datavu::{ChipChain, Config, DataVu};
//!
//! let chain = ChipChain::new(sdi, scki, latch);
//! let mut display = DataVu::new(&NORMAL, chain, anode_pwm, pclk_pwm, delay, eeprom, Config::new());
//! display.initialize()?;
//! display.set_anode_voltage(3.3)?;
//! for (digit, character) in "HELLO ".chars().enumerate() {
//!     display.render_digit(character, digit, 2048)?;
//! }
//! display.commit_frame()?;
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::calibration::{Calibration, CalibrationStorage};
use crate::config::Config;
use crate::frame::FrameBuffer;
use crate::layout::Layout;
use crate::protocol::{ChipChain, Command};
use crate::{Error, Result, MAX_VOLTAGE};

/// Anode DAC steps per volt.
const VOLTS_TO_DUTY: f32 = 51.0;

/// Anode DAC full scale, matching [`MAX_VOLTAGE`].
const ANODE_FULL_SCALE: u16 = 255;

/// Progress of the chip reset sequence.
///
/// The states are passed strictly in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChipState {
    /// Nothing sent since power-up.
    Unreset,
    /// Reset pulse done, chips at power-up defaults.
    Latched,
    /// Correction switched off.
    CorrectionDisabled,
    /// Phase-shifted PWM switched on.
    PhaseShiftEnabled,
    /// Outputs running; ready for frames.
    PwmEnabled,
}

/// Controller for one Data-Vu board.
///
/// # Type Parameters
/// - `SDI`, `SCKI`, `LATCH`: Output pins of the chip chain
/// - `ANODE`: PWM channel feeding the anode-voltage DAC
/// - `PCLK`: PWM channel generating the chips' pixel clock
/// - `DELAY`: Blocking delay, used by the reset pulse
/// - `STORE`: Non-volatile store holding the correction factors
/// - `SYMBOLS`, `DIGITS`: Dimensions of the product [`Layout`]
pub struct DataVu<
    SDI,
    SCKI,
    LATCH,
    ANODE,
    PCLK,
    DELAY,
    STORE,
    const SYMBOLS: usize,
    const DIGITS: usize,
> {
    layout: &'static Layout<SYMBOLS, DIGITS>,
    chain: ChipChain<SDI, SCKI, LATCH>,
    anode: ANODE,
    pixel_clock: PCLK,
    delay: DELAY,
    storage: STORE,
    config: Config,
    frame: FrameBuffer<SYMBOLS>,
    calibration: Calibration<SYMBOLS>,
    calibration_enabled: bool,
    output_enabled: bool,
    state: ChipState,
}

impl<SDI, SCKI, LATCH, ANODE, PCLK, DELAY, STORE, const SYMBOLS: usize, const DIGITS: usize>
    DataVu<SDI, SCKI, LATCH, ANODE, PCLK, DELAY, STORE, SYMBOLS, DIGITS>
where
    SDI: OutputPin,
    SCKI: OutputPin,
    LATCH: OutputPin,
    ANODE: SetDutyCycle,
    PCLK: SetDutyCycle,
    DELAY: DelayNs,
    STORE: CalibrationStorage,
{
    /// Takes the hardware over. Nothing is sent until
    /// [`DataVu::initialize`].
    pub fn new(
        layout: &'static Layout<SYMBOLS, DIGITS>,
        chain: ChipChain<SDI, SCKI, LATCH>,
        anode: ANODE,
        pixel_clock: PCLK,
        delay: DELAY,
        storage: STORE,
        config: Config,
    ) -> Self {
        Self {
            layout,
            chain,
            anode,
            pixel_clock,
            delay,
            storage,
            config,
            frame: FrameBuffer::new(),
            calibration: Calibration::new(),
            calibration_enabled: false,
            output_enabled: false,
            state: ChipState::Unreset,
        }
    }

    /// Brings the board up.
    ///
    /// Turns the anode supply off, starts the pixel clock at 50 % duty,
    /// blanks the frame, resets the chips and loads the stored correction
    /// factors into them. Correction stays disabled; see
    /// [`DataVu::set_calibration_enabled`].
    ///
    /// # Errors
    /// [`Error::Pwm`] or [`Error::Bus`] on hardware failure.
    /// [`Error::Persistence`] if the correction factors cannot be read; the
    /// chips are already reset and running at that point.
    pub fn initialize(&mut self) -> Result<()> {
        self.anode
            .set_duty_cycle_fully_off()
            .map_err(|_| Error::Pwm)?;
        self.pixel_clock
            .set_duty_cycle_percent(50)
            .map_err(|_| Error::Pwm)?;
        self.chain.idle()?;

        self.frame.set_all(0)?;
        self.reset_chips()?;

        let loaded = Calibration::load(&mut self.storage, self.config.calibration_address());
        #[cfg(feature = "defmt")]
        if loaded.is_err() {
            defmt::warn!("calibration could not be read, correction left at zero");
        }
        self.calibration = loaded?;
        self.send_calibration()
    }

    /// Runs the reset sequence: long latch pulse, correction off, phase shift
    /// on, outputs on.
    ///
    /// # Errors
    /// [`Error::Bus`] if a line refuses a level. [`DataVu::chip_state`] tells
    /// how far the sequence got.
    pub fn reset_chips(&mut self) -> Result<()> {
        self.state = ChipState::Unreset;

        self.chain
            .reset_pulse(&mut self.delay, self.config.reset_hold_ms())?;
        self.advance(ChipState::Latched);

        // Correction is on after power-up.
        self.transmit(Command::ToggleCorrection)?;
        self.calibration_enabled = false;
        self.advance(ChipState::CorrectionDisabled);

        self.transmit(Command::TogglePhaseShift)?;
        self.advance(ChipState::PhaseShiftEnabled);

        self.transmit(Command::EnablePwm)?;
        self.output_enabled = true;
        self.advance(ChipState::PwmEnabled);
        Ok(())
    }

    /// Sets the LED anode voltage, open loop.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] unless `0.0 <= volts <= MAX_VOLTAGE`,
    /// [`Error::Pwm`] if the channel refuses the duty cycle.
    pub fn set_anode_voltage(&mut self, volts: f32) -> Result<()> {
        if !(0.0..=MAX_VOLTAGE).contains(&volts) {
            return Err(Error::OutOfRange);
        }
        let duty = (volts * VOLTS_TO_DUTY) as u16;

        #[cfg(feature = "defmt")]
        defmt::debug!("anode duty {=u16}/{=u16}", duty, ANODE_FULL_SCALE);

        self.anode
            .set_duty_cycle_fraction(duty, ANODE_FULL_SCALE)
            .map_err(|_| Error::Pwm)
    }

    /// Sets every symbol of the frame. See [`FrameBuffer::set_all`].
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if `value` exceeds [`MAX_DRIVE`](crate::MAX_DRIVE).
    pub fn set_all(&mut self, value: u16) -> Result<()> {
        self.frame.set_all(value)
    }

    /// Sets one symbol of the frame. See [`FrameBuffer::set_symbol`].
    ///
    /// # Errors
    /// [`Error::OutOfRange`], [`Error::InvalidIndex`].
    pub fn set_symbol(&mut self, symbol: usize, value: u16) -> Result<()> {
        self.frame.set_symbol(symbol, value)
    }

    /// Draws `character` on `digit` of the frame. See
    /// [`FrameBuffer::render_digit`].
    ///
    /// # Errors
    /// [`Error::UnsupportedProduct`], [`Error::OutOfRange`],
    /// [`Error::InvalidIndex`].
    pub fn render_digit(&mut self, character: char, digit: usize, value: u16) -> Result<()> {
        self.frame
            .render_digit(self.layout, character, digit, value)
    }

    /// Sends the frame to the display.
    ///
    /// # Errors
    /// [`Error::Bus`] if a line refuses a level.
    pub fn commit_frame(&mut self) -> Result<()> {
        self.transmit(Command::UpdatePwm)
    }

    /// Replaces the correction factors and sends them to the chips,
    /// optionally saving them for the next start.
    ///
    /// Every factor is checked before anything happens. Saving and sending are
    /// independent: if saving fails the new factors still reach the chips and
    /// [`Error::Persistence`] is returned afterwards.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if a factor exceeds
    /// [`MAX_CALIBRATION`](crate::MAX_CALIBRATION), [`Error::Persistence`],
    /// [`Error::Bus`].
    pub fn set_calibration(&mut self, values: &[u8; SYMBOLS], persist: bool) -> Result<()> {
        let calibration = Calibration::from_values(*values)?;

        let saved = if persist {
            calibration.save(&mut self.storage, self.config.calibration_address())
        } else {
            Ok(())
        };
        #[cfg(feature = "defmt")]
        if saved.is_err() {
            defmt::warn!("calibration applied but not saved");
        }

        self.calibration = calibration;
        self.send_calibration()?;
        saved
    }

    /// Switches the chips' correction on or off.
    ///
    /// The chips only know a toggle, so nothing is sent when correction is
    /// already in the requested state. The state is only known once the reset
    /// sequence has run.
    ///
    /// # Errors
    /// [`Error::NotReady`] before [`DataVu::initialize`] or
    /// [`DataVu::reset_chips`] has completed, [`Error::Bus`] if a line refuses
    /// a level.
    pub fn set_calibration_enabled(&mut self, enable: bool) -> Result<()> {
        if self.state != ChipState::PwmEnabled {
            return Err(Error::NotReady);
        }
        if enable == self.calibration_enabled {
            return Ok(());
        }
        self.transmit(Command::ToggleCorrection)?;
        self.calibration_enabled = enable;

        #[cfg(feature = "defmt")]
        defmt::debug!("correction enabled: {=bool}", enable);
        Ok(())
    }

    /// Starts or stops the PWM outputs without touching the frame.
    ///
    /// # Errors
    /// [`Error::Bus`] if a line refuses a level.
    pub fn set_output_enabled(&mut self, enable: bool) -> Result<()> {
        let command = if enable {
            Command::EnablePwm
        } else {
            Command::DisablePwm
        };
        self.transmit(command)?;
        self.output_enabled = enable;
        Ok(())
    }

    /// The frame as it will be sent by the next [`DataVu::commit_frame`].
    #[must_use]
    pub const fn frame(&self) -> &FrameBuffer<SYMBOLS> {
        &self.frame
    }

    /// Drive value of `symbol` in the frame.
    #[must_use]
    pub fn symbol(&self, symbol: usize) -> Option<u16> {
        self.frame.symbol(symbol)
    }

    /// The correction factors last sent to the chips.
    #[must_use]
    pub const fn calibration(&self) -> &Calibration<SYMBOLS> {
        &self.calibration
    }

    /// Whether the chips' correction is on.
    #[must_use]
    pub const fn calibration_enabled(&self) -> bool {
        self.calibration_enabled
    }

    /// Whether the PWM outputs are running.
    #[must_use]
    pub const fn output_enabled(&self) -> bool {
        self.output_enabled
    }

    /// Progress of the reset sequence.
    #[must_use]
    pub const fn chip_state(&self) -> ChipState {
        self.state
    }

    /// The product layout.
    #[must_use]
    pub const fn layout(&self) -> &'static Layout<SYMBOLS, DIGITS> {
        self.layout
    }

    /// The settings.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Gives the hardware back.
    pub fn release(self) -> (ChipChain<SDI, SCKI, LATCH>, ANODE, PCLK, DELAY, STORE) {
        (
            self.chain,
            self.anode,
            self.pixel_clock,
            self.delay,
            self.storage,
        )
    }

    // Every command except UpdateCorrection carries the frame; the chips
    // ignore the data of the toggle and enable commands.
    fn transmit(&mut self, command: Command) -> Result<()> {
        self.chain
            .write_symbols(command, self.layout, self.frame.values())
    }

    fn send_calibration(&mut self) -> Result<()> {
        #[cfg(feature = "defmt")]
        defmt::debug!("sending calibration {}", self.calibration);

        self.chain.write_symbols(
            Command::UpdateCorrection,
            self.layout,
            &self.calibration.expanded(),
        )
    }

    fn advance(&mut self, state: ChipState) {
        #[cfg(feature = "defmt")]
        defmt::debug!("chip state {} -> {}", self.state, state);

        self.state = state;
    }
}
