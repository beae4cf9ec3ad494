//! Symbol to channel wiring for a product variant.
//!
//! A [`Layout`] ties the logical symbol numbering of a display to the physical
//! channels of the LT8500 chain, and the seven segments of each digit to their
//! symbols. Layouts are frozen data; the ones for the Data-Vu kits live in
//! [`crate::products`]. Use [`channels!`](crate::channels) to write new ones.

use crate::font::SEGMENT_COUNT;
use crate::CHANNEL_COUNT;

/// Builds a channel table from symbol names, with `NC` marking an unconnected
/// channel.
///
/// Entries are listed from channel 0 (first output of chip 1) upwards.
///
/// ```rust
/// use datavu::channels;
///
/// const LAMP: u8 = 0;
/// let table: [Option<u8>; 4] = channels![NC, LAMP, NC, 1];
/// assert_eq!(table, [None, Some(0), None, Some(1)]);
/// ```
#[macro_export]
macro_rules! channels {
    (@entry NC) => {
        ::core::option::Option::None
    };
    (@entry $symbol:expr) => {
        ::core::option::Option::Some($symbol)
    };
    ($($symbol:tt),* $(,)?) => {
        [$($crate::channels!(@entry $symbol)),*]
    };
}

/// Static wiring of one product variant.
///
/// # Type Parameters
/// - `SYMBOLS`: Number of independently controllable symbols
/// - `DIGITS`: Number of seven-segment digits (0 when the product has none)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout<const SYMBOLS: usize, const DIGITS: usize> {
    name: &'static str,
    channels: [Option<u8>; CHANNEL_COUNT],
    digits: [[Option<u8>; SEGMENT_COUNT]; DIGITS],
}

impl<const SYMBOLS: usize, const DIGITS: usize> Layout<SYMBOLS, DIGITS> {
    /// Creates a layout.
    ///
    /// `channels[i]` is the symbol wired to physical channel `i`; `digits[d]`
    /// lists the symbols of segments A..G of digit `d`. The tables are trusted
    /// to wire every symbol to exactly one channel.
    #[must_use]
    pub const fn new(
        name: &'static str,
        channels: [Option<u8>; CHANNEL_COUNT],
        digits: [[Option<u8>; SEGMENT_COUNT]; DIGITS],
    ) -> Self {
        Self {
            name,
            channels,
            digits,
        }
    }

    /// Human readable name of the product variant.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Number of symbols.
    #[must_use]
    pub const fn symbol_count(&self) -> usize {
        SYMBOLS
    }

    /// Number of seven-segment digits.
    #[must_use]
    pub const fn digit_count(&self) -> usize {
        DIGITS
    }

    /// Returns the symbol driven by `channel`, or `None` when the channel is
    /// unconnected or out of range.
    #[must_use]
    pub fn symbol_for_channel(&self, channel: usize) -> Option<usize> {
        let symbol = usize::from((*self.channels.get(channel)?)?);
        (symbol < SYMBOLS).then_some(symbol)
    }

    /// Returns the channel driving `symbol`.
    #[must_use]
    pub fn channel_for_symbol(&self, symbol: usize) -> Option<usize> {
        if symbol >= SYMBOLS {
            return None;
        }
        self.channels
            .iter()
            .position(|entry| entry.map(usize::from) == Some(symbol))
    }

    /// Returns the symbols of segments A..G of `digit`, or `None` when the
    /// digit does not exist.
    #[must_use]
    pub fn segment_symbols(&self, digit: usize) -> Option<[Option<usize>; SEGMENT_COUNT]> {
        let segments = self.digits.get(digit)?;
        Some(core::array::from_fn(|segment| {
            segments[segment]
                .map(usize::from)
                .filter(|&symbol| symbol < SYMBOLS)
        }))
    }

    /// Iterates over `(channel, symbol)` for every channel, highest channel
    /// first, which is the order the chain is shifted in.
    pub fn channels_descending(&self) -> impl Iterator<Item = (usize, Option<usize>)> + '_ {
        (0..CHANNEL_COUNT)
            .rev()
            .map(|channel| (channel, self.symbol_for_channel(channel)))
    }
}

#[cfg(feature = "defmt")]
impl<const SYMBOLS: usize, const DIGITS: usize> defmt::Format for Layout<SYMBOLS, DIGITS> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Layout<{}, {}> {=str}",
            SYMBOLS,
            DIGITS,
            self.name
        );
    }
}
