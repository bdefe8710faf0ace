//! Segment encoder and minutes formatting tables

use focus_core::display::minutes_glyphs;
use focus_core::{encode, Glyph, SegmentPattern};
use rstest::rstest;

#[rstest]
#[case(0, 0b011_1111)]
#[case(1, 0b000_0110)]
#[case(2, 0b101_1011)]
#[case(3, 0b100_1111)]
#[case(4, 0b110_0110)]
#[case(5, 0b110_1101)]
#[case(6, 0b111_1101)]
#[case(7, 0b000_0111)]
#[case(8, 0b111_1111)]
#[case(9, 0b110_1111)]
fn test_digit_patterns(#[case] digit: u8, #[case] bits: u8) {
    let pattern = encode(Glyph::Digit(digit));
    assert_eq!(pattern.bits(), bits);
    assert_eq!(pattern.decode(), Some(Glyph::Digit(digit)));
}

#[rstest]
#[case(Glyph::Blank)]
#[case(Glyph::Digit(10))]
#[case(Glyph::Digit(42))]
#[case(Glyph::Digit(u8::MAX))]
fn test_unrenderable_glyphs_are_all_off(#[case] glyph: Glyph) {
    assert_eq!(encode(glyph), SegmentPattern::BLANK);
    assert!(encode(glyph).levels().iter().all(|on| !on));
}

#[test]
fn test_blank_differs_from_zero() {
    assert_ne!(encode(Glyph::Blank), encode(Glyph::Digit(0)));
    assert_eq!(SegmentPattern::BLANK.decode(), Some(Glyph::Blank));
}

#[test]
fn test_patterns_never_light_the_eighth_bit() {
    for digit in 0..=9 {
        assert_eq!(encode(Glyph::Digit(digit)).bits() & 0x80, 0);
    }
}

#[rstest]
#[case(0, Glyph::Blank, Glyph::Digit(1))]
#[case(1, Glyph::Blank, Glyph::Digit(1))]
#[case(59, Glyph::Blank, Glyph::Digit(1))]
#[case(60, Glyph::Blank, Glyph::Digit(2))]
#[case(539, Glyph::Blank, Glyph::Digit(9))]
#[case(540, Glyph::Digit(1), Glyph::Digit(0))]
#[case(1439, Glyph::Digit(2), Glyph::Digit(4))]
#[case(1440, Glyph::Digit(2), Glyph::Digit(5))]
#[case(1499, Glyph::Digit(2), Glyph::Digit(5))]
#[case(1500, Glyph::Digit(2), Glyph::Digit(6))]
#[case(5939, Glyph::Digit(9), Glyph::Digit(9))]
fn test_minutes_round_up(#[case] seconds: u32, #[case] tens: Glyph, #[case] ones: Glyph) {
    assert_eq!(minutes_glyphs(seconds), (tens, ones));
}

#[test]
fn test_every_second_of_the_last_minute_shows_one() {
    for seconds in 0..60 {
        assert_eq!(minutes_glyphs(seconds), (Glyph::Blank, Glyph::Digit(1)), "{seconds}s");
    }
}
