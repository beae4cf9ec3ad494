//! Layouts of the Data-Vu display kits.
//!
//! | Layout         | Parts                  | Symbols | Digits |
//! |----------------|------------------------|---------|--------|
//! | [`NO_DISPLAY`] | bare driver board      | 84      | 0      |
//! | [`NORMAL`]     | PD01002/4/6/8          | 61      | 6      |
//! | [`INVERTED`]   | PD01003/5/7/9          | 61      | 6      |
//!
//! Channel tables run from `PWM100` (channel 0) to `PWM147` on chip 1 and
//! `PWM200` to `PWM247` (channels 48..96) on chip 2. Some pads of the glass
//! repeat symbol `S12`; only one of them is wired.

use crate::layout::Layout;

/// Symbol numbering shared by the normal and inverted glass.
///
/// - `A01`..`A04`: annunciators
/// - `N<digit><segment>`: segments of the six seven-segment digits
/// - `D01`..`D03`: decimal points
/// - `S01`..`S12`: bar segments
#[allow(missing_docs)]
pub mod symbols {
    pub const A01: u8 = 0;
    pub const A02: u8 = 1;
    pub const A03: u8 = 2;
    pub const A04: u8 = 3;
    pub const N0A: u8 = 4;
    pub const N0B: u8 = 5;
    pub const N0C: u8 = 6;
    pub const N0D: u8 = 7;
    pub const N0E: u8 = 8;
    pub const N0F: u8 = 9;
    pub const N0G: u8 = 10;
    pub const N1A: u8 = 11;
    pub const N1B: u8 = 12;
    pub const N1C: u8 = 13;
    pub const N1D: u8 = 14;
    pub const N1E: u8 = 15;
    pub const N1F: u8 = 16;
    pub const N1G: u8 = 17;
    pub const N2A: u8 = 18;
    pub const N2B: u8 = 19;
    pub const N2C: u8 = 20;
    pub const N2D: u8 = 21;
    pub const N2E: u8 = 22;
    pub const N2F: u8 = 23;
    pub const N2G: u8 = 24;
    pub const N3A: u8 = 25;
    pub const N3B: u8 = 26;
    pub const N3C: u8 = 27;
    pub const N3D: u8 = 28;
    pub const N3E: u8 = 29;
    pub const N3F: u8 = 30;
    pub const N3G: u8 = 31;
    pub const N4A: u8 = 32;
    pub const N4B: u8 = 33;
    pub const N4C: u8 = 34;
    pub const N4D: u8 = 35;
    pub const N4E: u8 = 36;
    pub const N4F: u8 = 37;
    pub const N4G: u8 = 38;
    pub const N5A: u8 = 39;
    pub const N5B: u8 = 40;
    pub const N5C: u8 = 41;
    pub const N5D: u8 = 42;
    pub const N5E: u8 = 43;
    pub const N5F: u8 = 44;
    pub const N5G: u8 = 45;
    pub const D01: u8 = 46;
    pub const D02: u8 = 47;
    pub const D03: u8 = 48;
    pub const S01: u8 = 49;
    pub const S02: u8 = 50;
    pub const S03: u8 = 51;
    pub const S04: u8 = 52;
    pub const S05: u8 = 53;
    pub const S06: u8 = 54;
    pub const S07: u8 = 55;
    pub const S08: u8 = 56;
    pub const S09: u8 = 57;
    pub const S10: u8 = 58;
    pub const S11: u8 = 59;
    pub const S12: u8 = 60;
}

use symbols::*;

/// Number of symbols on the bare driver board.
pub const NO_DISPLAY_SYMBOLS: usize = 84;

/// Number of symbols on the normal and inverted glass.
pub const DATAVU_SYMBOLS: usize = 61;

/// Number of seven-segment digits on the normal and inverted glass.
pub const DATAVU_DIGITS: usize = 6;

/// Bare driver board: symbols are numbered without a glass, no digits.
pub static NO_DISPLAY: Layout<NO_DISPLAY_SYMBOLS, 0> = Layout::new(
    "No Display",
    crate::channels![
        // chip 1
         23,  33,  24,  35,  81,  80,  52,  77,
         79,  53,  36,  83,  69,  75,  43,  30,
         59,  NC,  NC,  74,  42,  31,  73,   8,
         34,  64,  29,  70,  46,  32,  13,  NC,
         28,  NC,  NC,   3,  NC,  NC,  NC,  NC,
         45,  27,  NC,  NC,  NC,  67,  20,  49,
        // chip 2
         51,  72,  21,   5,  39,  55,  22,   1,
         18,   4,  40,  50,  12,  17,  56,  38,
         54,  15,  76,  19,  41,  37,   6,   9,
          2,  44,  61,  47,  16,  48,  57,  14,
         63,  65,   7,  71,  62,  66,  11,  78,
         58,  26,  68,   0,  10,  25,  60,  82,
    ],
    [],
);

/// Seven-segment glass, normal view.
pub static NORMAL: Layout<DATAVU_SYMBOLS, DATAVU_DIGITS> = Layout::new(
    "Normal",
    crate::channels![
        // chip 1
         NC, A02,  NC, S09, N4A, N4G,  NC,  NC,
        N1D, A01,  NC,  NC, N2E, N3C, N1B, D01,
        S12,  NC,  NC, N4C,  NC,  NC, N0B,  NC,
        N0C, N4B, N5B, N3D, N1G, S04, N1A,  NC,
        N5C,  NC,  NC,  NC,  NC,  NC,  NC,  NC,
        S10, N5F,  NC,  NC,  NC, S08, N3A, N2D,
        // chip 2
        A03, N3E, N2A, S05, N2C, S07, N1F, N2B,
        S01,  NC,  NC, N3F,  NC,  NC, N0D, N1C,
        S06,  NC, N4F, A04, S03,  NC, N5A,  NC,
        D02, N0G, N0E,  NC, N5E,  NC, D03, N0A,
        N4D, S02, N5D, N4E, N1E,  NC, N2F, N3G,
        S11, N5G,  NC, N3B, N2G, N0F,  NC,  NC,
    ],
    DIGITS,
);

/// Seven-segment glass, inverted view.
pub static INVERTED: Layout<DATAVU_SYMBOLS, DATAVU_DIGITS> = Layout::new(
    "Inverted",
    crate::channels![
        // chip 1
        N3F, N0B,  NC, N5G,  NC, N2D,  NC, S12,
         NC, S05,  NC,  NC, N4B, N3D,  NC, N3B,
        N4F,  NC,  NC, N2C, S06, N1B, A02,  NC,
        N5E, N2E, N1G, N3C, N5B,  NC, A03,  NC,
        N0D,  NC,  NC, N0F,  NC,  NC,  NC,  NC,
        N5D, N0G,  NC,  NC,  NC, N5A, S03, N4G,
        // chip 2
        N1A, N1F, N2F, A01, N4C,  NC, N3E, N2G,
        N0E,  NC, S04,  NC,  NC, S07, N5C, A04,
         NC,  NC,  NC, N1C, N3A,  NC, S08, N1D,
        N3G, N5F, S01,  NC, N0C,  NC, N4D,  NC,
        D03, S11, S10, N1E, N4E, N0A, N2A, D02,
        S02, S09, N4A, D01, N2B,  NC,  NC,  NC,
    ],
    DIGITS,
);

const DIGITS: [[Option<u8>; 7]; DATAVU_DIGITS] = [
        [Some(N0A), Some(N0B), Some(N0C), Some(N0D), Some(N0E), Some(N0F), Some(N0G)],
        [Some(N1A), Some(N1B), Some(N1C), Some(N1D), Some(N1E), Some(N1F), Some(N1G)],
        [Some(N2A), Some(N2B), Some(N2C), Some(N2D), Some(N2E), Some(N2F), Some(N2G)],
        [Some(N3A), Some(N3B), Some(N3C), Some(N3D), Some(N3E), Some(N3F), Some(N3G)],
        [Some(N4A), Some(N4B), Some(N4C), Some(N4D), Some(N4E), Some(N4F), Some(N4G)],
        [Some(N5A), Some(N5B), Some(N5C), Some(N5D), Some(N5E), Some(N5F), Some(N5G)],
];

#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec::Vec;

    use super::*;
    use crate::CHANNEL_COUNT;

    // Every symbol is wired to exactly one channel.
    fn assert_one_to_one<const SYMBOLS: usize, const DIGITS: usize>(
        layout: &Layout<SYMBOLS, DIGITS>,
    ) {
        let mut seen = [0usize; SYMBOLS];
        for channel in 0..CHANNEL_COUNT {
            if let Some(symbol) = layout.symbol_for_channel(channel) {
                seen[symbol] += 1;
                assert_eq!(layout.channel_for_symbol(symbol), Some(channel));
            }
        }
        assert!(seen.iter().all(|&count| count == 1), "{}", layout.name());
    }

    #[test]
    fn test_tables_are_one_to_one() {
        assert_one_to_one(&NO_DISPLAY);
        assert_one_to_one(&NORMAL);
        assert_one_to_one(&INVERTED);
    }

    #[test]
    fn test_names_and_dimensions() {
        assert_eq!(NO_DISPLAY.name(), "No Display");
        assert_eq!(NO_DISPLAY.symbol_count(), 84);
        assert_eq!(NO_DISPLAY.digit_count(), 0);
        assert_eq!(NORMAL.name(), "Normal");
        assert_eq!(NORMAL.symbol_count(), 61);
        assert_eq!(NORMAL.digit_count(), 6);
        assert_eq!(INVERTED.name(), "Inverted");
        assert_eq!(INVERTED.symbol_count(), 61);
        assert_eq!(INVERTED.digit_count(), 6);
    }

    #[test]
    fn test_unconnected_channel_counts() {
        let unconnected = |symbol_for: &dyn Fn(usize) -> Option<usize>| {
            (0..CHANNEL_COUNT).filter(|&c| symbol_for(c).is_none()).count()
        };
        assert_eq!(unconnected(&|c| NO_DISPLAY.symbol_for_channel(c)), 12);
        assert_eq!(unconnected(&|c| NORMAL.symbol_for_channel(c)), 35);
        assert_eq!(unconnected(&|c| INVERTED.symbol_for_channel(c)), 35);
    }

    #[test]
    fn test_known_wiring() {
        // PWM100 / PWM101 / PWM247 on the bare board
        assert_eq!(NO_DISPLAY.symbol_for_channel(0), Some(23));
        assert_eq!(NO_DISPLAY.symbol_for_channel(1), Some(33));
        assert_eq!(NO_DISPLAY.symbol_for_channel(95), Some(82));

        assert_eq!(NORMAL.symbol_for_channel(0), None);
        assert_eq!(NORMAL.symbol_for_channel(1), Some(usize::from(symbols::A02)));
        assert_eq!(NORMAL.channel_for_symbol(usize::from(symbols::S12)), Some(16));

        assert_eq!(INVERTED.symbol_for_channel(0), Some(usize::from(symbols::N3F)));
        assert_eq!(INVERTED.channel_for_symbol(usize::from(symbols::D01)), Some(91));
    }

    #[test]
    fn test_digits_cover_their_segments() {
        for layout in [&NORMAL, &INVERTED] {
            for digit in 0..DATAVU_DIGITS {
                let segments = layout.segment_symbols(digit).unwrap();
                let first = usize::from(symbols::N0A) + digit * 7;
                let expected: Vec<_> = (first..first + 7).map(Some).collect();
                assert_eq!(segments.to_vec(), expected);
            }
            assert_eq!(layout.segment_symbols(DATAVU_DIGITS), None);
        }
    }
}
