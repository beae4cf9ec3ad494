//! Seven-segment glyph font.
//!
//! Segments are lettered the usual way:
//!
//! ```text
//!  AAA
//! F   B
//! F   B
//!  GGG
//! E   C
//! E   C
//!  DDD
//! ```
//!
//! The font covers 7-bit ASCII. Letters that cannot be drawn on seven segments
//! (`K`, `M`, `V`, `W`, `X`, `Z`, ...) and every code point outside the table
//! render blank instead of failing. Code points `0x00..=0x0F` render the
//! hexadecimal digits `0`..`F`, so a nibble can be shown with
//! `char::from(nibble)`.

use bitfield::bitfield;

/// Number of segments in one digit.
pub const SEGMENT_COUNT: usize = 7;

bitfield! {
    /// 7-bit segment pattern for one digit.
    ///
    /// The bit layout follows the font table, segment A being the most
    /// significant bit:
    /// - Bit 6: A (top)
    /// - Bit 5: B (top right)
    /// - Bit 4: C (bottom right)
    /// - Bit 3: D (bottom)
    /// - Bit 2: E (bottom left)
    /// - Bit 1: F (top left)
    /// - Bit 0: G (middle)
    #[derive(Clone, Copy, Default, PartialEq, Eq)]
    pub struct Segments(u8);
    impl Debug;
    /// Segment A (top).
    pub a, set_a: 6;
    /// Segment B (top right).
    pub b, set_b: 5;
    /// Segment C (bottom right).
    pub c, set_c: 4;
    /// Segment D (bottom).
    pub d, set_d: 3;
    /// Segment E (bottom left).
    pub e, set_e: 2;
    /// Segment F (top left).
    pub f, set_f: 1;
    /// Segment G (middle).
    pub g, set_g: 0;
}

impl Segments {
    /// No segment lit.
    pub const EMPTY: Self = Self(0);

    /// Every segment lit.
    pub const ALL: Self = Self(0b111_1111);

    /// Builds a pattern from its `ABCDEFG` bits; bit 7 is ignored.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0b111_1111)
    }

    /// Raw `ABCDEFG` bits.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns whether `segment` (0 = A .. 6 = G) is lit.
    ///
    /// Indexes past G are never lit.
    #[must_use]
    pub const fn is_lit(self, segment: usize) -> bool {
        segment < SEGMENT_COUNT && self.0 & (1 << (SEGMENT_COUNT - 1 - segment)) != 0
    }

    /// Number of lit segments.
    #[must_use]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Segments {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Segments({=u8:07b})", self.0);
    }
}

/// Looks up the glyph for `character`.
///
/// Characters without a glyph come back as [`Segments::EMPTY`].
///
/// # Example
/// ```rust
/// use datavu::font::{segments_for_char, Segments};
///
/// assert_eq!(segments_for_char('8'), Segments::ALL);
/// assert_eq!(segments_for_char('~'), Segments::EMPTY);
/// assert!(segments_for_char('1').is_lit(1));
/// ```
#[must_use]
pub fn segments_for_char(character: char) -> Segments {
    FONT.get(character as usize)
        .copied()
        .unwrap_or(Segments::EMPTY)
}

/// Glyphs indexed by 7-bit code point.
static FONT: [Segments; 128] = [
    Segments::from_bits(0b1111110), // hex 0
    Segments::from_bits(0b0110000), // hex 1
    Segments::from_bits(0b1101101), // hex 2
    Segments::from_bits(0b1111001), // hex 3
    Segments::from_bits(0b0110011), // hex 4
    Segments::from_bits(0b1011011), // hex 5
    Segments::from_bits(0b1011111), // hex 6
    Segments::from_bits(0b1110000), // hex 7
    Segments::from_bits(0b1111111), // hex 8
    Segments::from_bits(0b1111011), // hex 9
    Segments::from_bits(0b1110111), // hex A
    Segments::from_bits(0b0011111), // hex B
    Segments::from_bits(0b1001110), // hex C
    Segments::from_bits(0b0111101), // hex D
    Segments::from_bits(0b1001111), // hex E
    Segments::from_bits(0b1000111), // hex F
    Segments::from_bits(0b0000000), // control
    Segments::from_bits(0b0000000), // control
    Segments::from_bits(0b0000000), // control
    Segments::from_bits(0b0000000), // control
    Segments::from_bits(0b0000000), // control
    Segments::from_bits(0b0000000), // control
    Segments::from_bits(0b0000000), // control
    Segments::from_bits(0b0000000), // control
    Segments::from_bits(0b0000000), // control
    Segments::from_bits(0b0000000), // control
    Segments::from_bits(0b0000000), // control
    Segments::from_bits(0b0000000), // control
    Segments::from_bits(0b0000000), // control
    Segments::from_bits(0b0000000), // control
    Segments::from_bits(0b0000000), // control
    Segments::from_bits(0b0000000), // control
    Segments::from_bits(0b0000000), // space
    Segments::from_bits(0b0000000), // '!'
    Segments::from_bits(0b0100010), // '"'
    Segments::from_bits(0b0000000), // '#'
    Segments::from_bits(0b0000000), // '$'
    Segments::from_bits(0b0000000), // '%'
    Segments::from_bits(0b0000000), // '&'
    Segments::from_bits(0b0100000), // "'"
    Segments::from_bits(0b1001110), // '('
    Segments::from_bits(0b1111000), // ')'
    Segments::from_bits(0b0000000), // '*'
    Segments::from_bits(0b0000000), // '+'
    Segments::from_bits(0b0000100), // ','
    Segments::from_bits(0b0000001), // '-'
    Segments::from_bits(0b0000000), // '.'
    Segments::from_bits(0b0000000), // '/'
    Segments::from_bits(0b1111110), // '0'
    Segments::from_bits(0b0110000), // '1'
    Segments::from_bits(0b1101101), // '2'
    Segments::from_bits(0b1111001), // '3'
    Segments::from_bits(0b0110011), // '4'
    Segments::from_bits(0b1011011), // '5'
    Segments::from_bits(0b1011111), // '6'
    Segments::from_bits(0b1110000), // '7'
    Segments::from_bits(0b1111111), // '8'
    Segments::from_bits(0b1111011), // '9'
    Segments::from_bits(0b0000000), // ':'
    Segments::from_bits(0b0000000), // ';'
    Segments::from_bits(0b0000000), // '<'
    Segments::from_bits(0b0000000), // '='
    Segments::from_bits(0b0000000), // '>'
    Segments::from_bits(0b0000000), // '?'
    Segments::from_bits(0b0000000), // '@'
    Segments::from_bits(0b1110111), // 'A'
    Segments::from_bits(0b0011111), // 'B'
    Segments::from_bits(0b1001110), // 'C'
    Segments::from_bits(0b0111101), // 'D'
    Segments::from_bits(0b1001111), // 'E'
    Segments::from_bits(0b1000111), // 'F'
    Segments::from_bits(0b1011110), // 'G'
    Segments::from_bits(0b0110111), // 'H'
    Segments::from_bits(0b0110000), // 'I'
    Segments::from_bits(0b0111000), // 'J'
    Segments::from_bits(0b0000000), // 'K'
    Segments::from_bits(0b0001110), // 'L'
    Segments::from_bits(0b0000000), // 'M'
    Segments::from_bits(0b0010101), // 'N'
    Segments::from_bits(0b1111110), // 'O'
    Segments::from_bits(0b1100111), // 'P'
    Segments::from_bits(0b1110011), // 'Q'
    Segments::from_bits(0b0000101), // 'R'
    Segments::from_bits(0b1011011), // 'S'
    Segments::from_bits(0b0001111), // 'T'
    Segments::from_bits(0b0111110), // 'U'
    Segments::from_bits(0b0000000), // 'V'
    Segments::from_bits(0b0000000), // 'W'
    Segments::from_bits(0b0000000), // 'X'
    Segments::from_bits(0b0111011), // 'Y'
    Segments::from_bits(0b0000000), // 'Z'
    Segments::from_bits(0b1001110), // '['
    Segments::from_bits(0b0000000), // '\\'
    Segments::from_bits(0b1111000), // ']'
    Segments::from_bits(0b0000000), // '^'
    Segments::from_bits(0b0001000), // '_'
    Segments::from_bits(0b0000010), // '`'
    Segments::from_bits(0b1110111), // 'a'
    Segments::from_bits(0b0011111), // 'b'
    Segments::from_bits(0b0001101), // 'c'
    Segments::from_bits(0b0111101), // 'd'
    Segments::from_bits(0b1101111), // 'e'
    Segments::from_bits(0b1000111), // 'f'
    Segments::from_bits(0b1011110), // 'g'
    Segments::from_bits(0b0010111), // 'h'
    Segments::from_bits(0b0010000), // 'i'
    Segments::from_bits(0b0111000), // 'j'
    Segments::from_bits(0b0000000), // 'k'
    Segments::from_bits(0b0110000), // 'l'
    Segments::from_bits(0b0000000), // 'm'
    Segments::from_bits(0b0010101), // 'n'
    Segments::from_bits(0b0011101), // 'o'
    Segments::from_bits(0b1100111), // 'p'
    Segments::from_bits(0b1110011), // 'q'
    Segments::from_bits(0b0000101), // 'r'
    Segments::from_bits(0b1011011), // 's'
    Segments::from_bits(0b0001111), // 't'
    Segments::from_bits(0b0011100), // 'u'
    Segments::from_bits(0b0000000), // 'v'
    Segments::from_bits(0b0000000), // 'w'
    Segments::from_bits(0b0000000), // 'x'
    Segments::from_bits(0b0000000), // 'y'
    Segments::from_bits(0b0000000), // 'z'
    Segments::from_bits(0b0000000), // '{'
    Segments::from_bits(0b0000000), // '|'
    Segments::from_bits(0b0000000), // '}'
    Segments::from_bits(0b0000000), // '~'
    Segments::from_bits(0b0000000), // DEL
];

#[cfg(test)]
mod tests {
    extern crate std;

    use std::format;

    use super::*;

    #[test]
    fn test_segments_construction() {
        let segments = Segments::default();
        assert_eq!(segments, Segments::EMPTY);
        assert_eq!(segments.bits(), 0);
        assert_eq!(segments.count(), 0);
    }

    #[test]
    fn test_segments_from_bits_masks_bit_seven() {
        assert_eq!(Segments::from_bits(0xFF), Segments::ALL);
        assert_eq!(Segments::from_bits(0x80), Segments::EMPTY);
    }

    #[test]
    fn test_segments_bit_layout() {
        let mut segments = Segments::EMPTY;
        segments.set_a(true);
        assert_eq!(segments.bits(), 0b100_0000);
        segments.set_g(true);
        assert_eq!(segments.bits(), 0b100_0001);
        segments.set_c(true);
        assert_eq!(segments.bits(), 0b101_0001);
        assert!(segments.a());
        assert!(!segments.b());
        assert!(segments.c());
        assert!(segments.g());
    }

    #[test]
    fn test_is_lit_follows_segment_letters() {
        // '1' lights B and C only
        let one = segments_for_char('1');
        let lit: std::vec::Vec<usize> = (0..SEGMENT_COUNT).filter(|&i| one.is_lit(i)).collect();
        assert_eq!(lit, [1, 2]);

        // '7' lights A, B and C
        let seven = segments_for_char('7');
        assert!(seven.is_lit(0));
        assert!(seven.is_lit(1));
        assert!(seven.is_lit(2));
        assert!(!seven.is_lit(6));

        assert!(!Segments::ALL.is_lit(SEGMENT_COUNT));
        assert!(!Segments::ALL.is_lit(usize::MAX));
    }

    #[test]
    fn test_digits() {
        let expected = [
            ('0', 6),
            ('1', 2),
            ('2', 5),
            ('3', 5),
            ('4', 4),
            ('5', 5),
            ('6', 6),
            ('7', 3),
            ('8', 7),
            ('9', 6),
        ];
        for (character, lit) in expected {
            assert_eq!(segments_for_char(character).count(), lit, "{character}");
        }
        assert!(!segments_for_char('0').g());
        assert!(segments_for_char('8').g());
    }

    #[test]
    fn test_hex_code_points_match_hex_digits() {
        for (nibble, character) in "0123456789".chars().enumerate() {
            assert_eq!(
                segments_for_char(char::from(nibble as u8)),
                segments_for_char(character)
            );
        }
        for (nibble, character) in [(10u8, 'A'), (11, 'b'), (12, 'C'), (13, 'd'), (14, 'E'), (15, 'F')] {
            assert_eq!(segments_for_char(char::from(nibble)), segments_for_char(character));
        }
    }

    #[test]
    fn test_blank_glyphs() {
        for character in [' ', '\x10', '\x1f', '!', '#', 'K', 'M', 'V', 'W', 'X', 'Z', 'm', 'z', '~', '\x7f'] {
            assert_eq!(segments_for_char(character), Segments::EMPTY, "{character:?}");
        }
    }

    #[test]
    fn test_characters_outside_table_are_blank() {
        for character in ['\u{80}', 'é', 'Ω', '€', char::MAX] {
            assert_eq!(segments_for_char(character), Segments::EMPTY);
        }
    }

    #[test]
    fn test_letters_share_glyphs_across_case() {
        for (upper, lower) in [('A', 'a'), ('B', 'b'), ('D', 'd'), ('F', 'f'), ('P', 'p'), ('S', 's'), ('T', 't')] {
            assert_eq!(segments_for_char(upper), segments_for_char(lower), "{upper}");
        }
        assert_ne!(segments_for_char('O'), segments_for_char('o'));
        assert_ne!(segments_for_char('U'), segments_for_char('u'));
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(segments_for_char('-'), Segments::from_bits(0b000_0001));
        assert_eq!(segments_for_char('_'), Segments::from_bits(0b000_1000));
        assert_eq!(segments_for_char('['), segments_for_char('C'));
        assert_eq!(segments_for_char('('), segments_for_char('['));
        assert_eq!(segments_for_char(')'), segments_for_char(']'));
    }

    #[test]
    fn test_debug_formatting() {
        let debug = format!("{:?}", segments_for_char('-'));
        assert!(debug.contains("Segments"));
        assert!(debug.contains("g: true"));
        assert!(debug.contains("a: false"));
    }
}
