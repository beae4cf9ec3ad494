//! Per-symbol correction values and their persistence.
//!
//! The LT8500 scales each channel by a factory-measured correction factor.
//! Factors are 6-bit values (0 ..= [`MAX_CALIBRATION`]). They are stored as
//! one 16-bit little-endian word per symbol, in symbol order, at a fixed
//! address of a [`CalibrationStorage`]; the same image the board's factory
//! firmware writes. Before they are sent, each factor is shifted into the top
//! six bits of the 12-bit channel word.
//!
//! ```text
//!  offset   +0      +1      +2      +3          +2n     +2n+1
//!          │ s0 lo │ s0 hi │ s1 lo │ s1 hi │ … │ sn lo │ sn hi │
//! ```

use crate::{Error, Result, MAX_CALIBRATION};

/// Shift moving a 6-bit correction factor to the top of a 12-bit word.
pub const CALIBRATION_SHIFT: u32 = 6;

/// Bytes one stored factor takes.
pub const STORED_WORD_BYTES: usize = 2;

/// Byte-addressed non-volatile store holding the correction factors.
///
/// Implement it over EEPROM, a flash page or anything else that keeps its
/// contents across a restart.
pub trait CalibrationStorage {
    /// Error reported by the store.
    type Error;

    /// Fills `bytes` from `address` onwards.
    ///
    /// # Errors
    /// Whatever the store reports.
    fn read(&mut self, address: u32, bytes: &mut [u8]) -> core::result::Result<(), Self::Error>;

    /// Writes `bytes` from `address` onwards.
    ///
    /// # Errors
    /// Whatever the store reports.
    fn write(&mut self, address: u32, bytes: &[u8]) -> core::result::Result<(), Self::Error>;
}

impl<T: CalibrationStorage + ?Sized> CalibrationStorage for &mut T {
    type Error = T::Error;

    fn read(&mut self, address: u32, bytes: &mut [u8]) -> core::result::Result<(), Self::Error> {
        T::read(self, address, bytes)
    }

    fn write(&mut self, address: u32, bytes: &[u8]) -> core::result::Result<(), Self::Error> {
        T::write(self, address, bytes)
    }
}

/// Expands a correction factor to the word sent to the chips.
///
/// Bits shifted past 16 are dropped; the chain sends only the low 12.
#[must_use]
pub const fn expand(value: u16) -> u16 {
    value << CALIBRATION_SHIFT
}

/// Address of the stored word of `symbol`.
const fn word_address(address: u32, symbol: usize) -> u32 {
    address + (symbol * STORED_WORD_BYTES) as u32
}

/// One correction factor per symbol.
///
/// Factors are held as the stored words, so anything read back from the store
/// is kept as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calibration<const SYMBOLS: usize> {
    values: [u16; SYMBOLS],
}

impl<const SYMBOLS: usize> Default for Calibration<SYMBOLS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const SYMBOLS: usize> Calibration<SYMBOLS> {
    /// All factors zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: [0; SYMBOLS],
        }
    }

    /// Checks every factor and wraps them.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if any factor exceeds [`MAX_CALIBRATION`].
    pub fn from_values(values: [u8; SYMBOLS]) -> Result<Self> {
        if values.iter().any(|&value| value > MAX_CALIBRATION) {
            return Err(Error::OutOfRange);
        }
        Ok(Self {
            values: values.map(u16::from),
        })
    }

    /// Reads the factors stored at `address`.
    ///
    /// Stored words are taken as they are; a store that was never written may
    /// hold values above [`MAX_CALIBRATION`], see [`Calibration::is_valid`].
    ///
    /// # Errors
    /// [`Error::Persistence`] if the store cannot be read.
    pub fn load<S: CalibrationStorage>(storage: &mut S, address: u32) -> Result<Self> {
        let mut values = [0; SYMBOLS];
        for (symbol, value) in values.iter_mut().enumerate() {
            let mut word = [0; STORED_WORD_BYTES];
            storage
                .read(word_address(address, symbol), &mut word)
                .map_err(|_| Error::Persistence)?;
            *value = u16::from_le_bytes(word);
        }

        let calibration = Self { values };
        #[cfg(feature = "defmt")]
        if !calibration.is_valid() {
            defmt::warn!("stored calibration at {=u32:#x} is out of range", address);
        }
        Ok(calibration)
    }

    /// Writes the factors to `address`.
    ///
    /// # Errors
    /// [`Error::Persistence`] if the store refuses the write.
    pub fn save<S: CalibrationStorage>(&self, storage: &mut S, address: u32) -> Result<()> {
        for (symbol, value) in self.values.iter().enumerate() {
            storage
                .write(word_address(address, symbol), &value.to_le_bytes())
                .map_err(|_| Error::Persistence)?;
        }
        Ok(())
    }

    /// Factors as stored, indexed by symbol.
    #[must_use]
    pub const fn values(&self) -> &[u16; SYMBOLS] {
        &self.values
    }

    /// Factor of `symbol`.
    #[must_use]
    pub fn get(&self, symbol: usize) -> Option<u16> {
        self.values.get(symbol).copied()
    }

    /// Whether every factor is within 0 ..= [`MAX_CALIBRATION`].
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.values
            .iter()
            .all(|&value| value <= u16::from(MAX_CALIBRATION))
    }

    /// The 12-bit words sent to the chips, indexed by symbol.
    #[must_use]
    pub fn expanded(&self) -> [u16; SYMBOLS] {
        self.values.map(expand)
    }
}

#[cfg(feature = "defmt")]
impl<const SYMBOLS: usize> defmt::Format for Calibration<SYMBOLS> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Calibration<{}> {=[?]}", SYMBOLS, &self.values[..]);
    }
}
