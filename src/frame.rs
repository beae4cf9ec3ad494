//! In-memory frame of per-symbol drive values.
//!
//! The frame is only a model: nothing reaches the display until it is
//! committed with [`DataVu::commit_frame`](crate::DataVu::commit_frame).

use crate::font::{segments_for_char, Segments};
use crate::layout::Layout;
use crate::{Error, Result, MAX_DRIVE};

/// One 12-bit drive value per symbol.
///
/// # Type Parameters
/// - `SYMBOLS`: Number of symbols of the product
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FrameBuffer<const SYMBOLS: usize> {
    values: [u16; SYMBOLS],
}

impl<const SYMBOLS: usize> Default for FrameBuffer<SYMBOLS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const SYMBOLS: usize> FrameBuffer<SYMBOLS> {
    /// Creates a dark frame.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: [0; SYMBOLS],
        }
    }

    /// Sets every symbol to `value`.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if `value` exceeds [`MAX_DRIVE`].
    pub fn set_all(&mut self, value: u16) -> Result<()> {
        check_drive(value)?;
        self.values.fill(value);
        Ok(())
    }

    /// Sets one symbol to `value`.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if `value` exceeds [`MAX_DRIVE`],
    /// [`Error::InvalidIndex`] if `symbol` does not exist.
    pub fn set_symbol(&mut self, symbol: usize, value: u16) -> Result<()> {
        check_drive(value)?;
        let slot = self.values.get_mut(symbol).ok_or(Error::InvalidIndex)?;
        *slot = value;
        Ok(())
    }

    /// Drive value of `symbol`.
    #[must_use]
    pub fn symbol(&self, symbol: usize) -> Option<u16> {
        self.values.get(symbol).copied()
    }

    /// All drive values, indexed by symbol.
    #[must_use]
    pub const fn values(&self) -> &[u16; SYMBOLS] {
        &self.values
    }

    /// Iterates over `(symbol, value)` in symbol order.
    pub fn snapshot(&self) -> impl Iterator<Item = (usize, u16)> + '_ {
        self.values.iter().copied().enumerate()
    }

    /// Draws `character` on `digit`: lit segments get `value`, the others 0.
    ///
    /// The seven symbols of the digit are overwritten, whatever was drawn
    /// there before; no other symbol changes.
    ///
    /// # Errors
    /// [`Error::UnsupportedProduct`] if `layout` has no digits,
    /// [`Error::OutOfRange`] if `value` exceeds [`MAX_DRIVE`],
    /// [`Error::InvalidIndex`] if `digit` does not exist.
    pub fn render_digit<const DIGITS: usize>(
        &mut self,
        layout: &Layout<SYMBOLS, DIGITS>,
        character: char,
        digit: usize,
        value: u16,
    ) -> Result<()> {
        self.render_segments(layout, segments_for_char(character), digit, value)
    }

    /// Like [`FrameBuffer::render_digit`] with an explicit segment pattern.
    ///
    /// # Errors
    /// Same as [`FrameBuffer::render_digit`].
    pub fn render_segments<const DIGITS: usize>(
        &mut self,
        layout: &Layout<SYMBOLS, DIGITS>,
        segments: Segments,
        digit: usize,
        value: u16,
    ) -> Result<()> {
        if DIGITS == 0 {
            return Err(Error::UnsupportedProduct);
        }
        check_drive(value)?;
        let symbols = layout.segment_symbols(digit).ok_or(Error::InvalidIndex)?;

        for (segment, symbol) in symbols.into_iter().enumerate() {
            // Unconnected segment
            let Some(symbol) = symbol else {
                continue;
            };
            self.values[symbol] = if segments.is_lit(segment) { value } else { 0 };
        }
        Ok(())
    }
}

impl<const SYMBOLS: usize> core::fmt::Debug for FrameBuffer<SYMBOLS> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("symbols", &SYMBOLS)
            .field("lit", &self.values.iter().filter(|&&value| value > 0).count())
            .finish()
    }
}

#[cfg(feature = "defmt")]
impl<const SYMBOLS: usize> defmt::Format for FrameBuffer<SYMBOLS> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "FrameBuffer<{}> {=[?]}", SYMBOLS, &self.values[..]);
    }
}

fn check_drive(value: u16) -> Result<()> {
    if value > MAX_DRIVE {
        return Err(Error::OutOfRange);
    }
    Ok(())
}
