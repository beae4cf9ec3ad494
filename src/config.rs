//! Runtime settings of the controller.

/// Settings used by [`DataVu`](crate::DataVu).
///
/// ```rust
/// use datavu::Config;
///
/// let config = Config::new().with_calibration_address(0x40);
/// assert_eq!(config.calibration_address(), 0x40);
/// assert_eq!(config.reset_hold_ms(), 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    calibration_address: u32,
    reset_hold_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Calibration at address 0, 100 ms reset pulse.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            calibration_address: 0,
            reset_hold_ms: 100,
        }
    }

    /// Address of the correction factors in the calibration store.
    #[must_use]
    pub const fn with_calibration_address(mut self, address: u32) -> Self {
        self.calibration_address = address;
        self
    }

    /// How long the latch is held high to reset the chips. The LT8500 needs
    /// a long pulse; keep this well above a millisecond.
    #[must_use]
    pub const fn with_reset_hold_ms(mut self, hold_ms: u32) -> Self {
        self.reset_hold_ms = hold_ms;
        self
    }

    /// Address of the correction factors.
    #[must_use]
    pub const fn calibration_address(&self) -> u32 {
        self.calibration_address
    }

    /// Reset pulse length in milliseconds.
    #[must_use]
    pub const fn reset_hold_ms(&self) -> u32 {
        self.reset_hold_ms
    }
}
