//! Seven-segment encoding

use crate::types::Glyph;

/// Number of digit segments (A through G) per position
pub const SEGMENT_COUNT: usize = 7;

/// On/off state of segments A..G, bit 0 is segment A
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentPattern(u8);

/// Standard encodings for 0-9
const DIGIT_PATTERNS: [u8; 10] = [
    0b011_1111, // 0: A B C D E F
    0b000_0110, // 1: B C
    0b101_1011, // 2: A B D E G
    0b100_1111, // 3: A B C D G
    0b110_0110, // 4: B C F G
    0b110_1101, // 5: A C D F G
    0b111_1101, // 6: A C D E F G
    0b000_0111, // 7: A B C
    0b111_1111, // 8: all
    0b110_1111, // 9: A B C D F G
];

impl SegmentPattern {
    /// All segments off
    pub const BLANK: SegmentPattern = SegmentPattern(0);

    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// Build from raw bits; bit 7 is ignored
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0x7F)
    }

    /// State of one segment, `index` 0 is A
    pub const fn is_on(&self, index: usize) -> bool {
        index < SEGMENT_COUNT && self.0 & (1 << index) != 0
    }

    /// Segment states in A..G order
    pub fn levels(&self) -> [bool; SEGMENT_COUNT] {
        core::array::from_fn(|index| self.is_on(index))
    }

    /// Glyph this pattern displays, if it is one the encoder produces
    pub fn decode(&self) -> Option<Glyph> {
        if *self == Self::BLANK {
            return Some(Glyph::Blank);
        }
        DIGIT_PATTERNS
            .iter()
            .position(|&bits| bits == self.0)
            .map(|digit| Glyph::Digit(digit as u8))
    }
}

/// Segment pattern for a glyph; blank and any value outside 0..=9 are all-off
pub const fn encode(glyph: Glyph) -> SegmentPattern {
    match glyph {
        Glyph::Digit(value) if value <= 9 => SegmentPattern(DIGIT_PATTERNS[value as usize]),
        _ => SegmentPattern::BLANK,
    }
}
