//! Display driver line writes checked against embedded-hal-mock expectations

use embedded_hal_mock::eh1::pin::{Mock as PinMock, State, Transaction};
use focus_core::segment::SEGMENT_COUNT;
use focus_core::{encode, DisplayDriver, Glyph, Position, SegmentDisplay};

/// Seven segment mocks expecting exactly one write per glyph in `glyphs`, in order
fn expect_glyphs(glyphs: &[Glyph]) -> [PinMock; SEGMENT_COUNT] {
    core::array::from_fn(|segment| {
        let expectations: Vec<Transaction> = glyphs
            .iter()
            .map(|&glyph| {
                let state = if encode(glyph).is_on(segment) {
                    State::High
                } else {
                    State::Low
                };
                Transaction::set(state)
            })
            .collect();
        PinMock::new(&expectations)
    })
}

fn finish(pins: &mut [PinMock]) {
    for pin in pins {
        pin.done();
    }
}

fn driver(
    left: &[PinMock; SEGMENT_COUNT],
    right: &[PinMock; SEGMENT_COUNT],
) -> DisplayDriver<PinMock> {
    DisplayDriver::new(
        SegmentDisplay::new(left.clone()),
        SegmentDisplay::new(right.clone()),
    )
}

#[test]
fn test_render_writes_only_on_change() {
    let mut left = expect_glyphs(&[Glyph::Digit(7)]);
    let mut right = expect_glyphs(&[]);
    let mut display = driver(&left, &right);

    assert!(display.render(Position::Left, Glyph::Digit(7)).unwrap());
    assert!(!display.render(Position::Left, Glyph::Digit(7)).unwrap());
    assert_eq!(display.shown(Position::Left), Glyph::Digit(7));

    finish(&mut left);
    finish(&mut right);
}

#[test]
fn test_render_minutes_touches_only_changed_position() {
    // 25 -> 25 -> 24
    let mut left = expect_glyphs(&[Glyph::Digit(2)]);
    let mut right = expect_glyphs(&[Glyph::Digit(5), Glyph::Digit(4)]);
    let mut display = driver(&left, &right);

    display.render_minutes(1499).unwrap();
    display.render_minutes(1440).unwrap();
    display.render_minutes(1439).unwrap();

    finish(&mut left);
    finish(&mut right);
}

#[test]
fn test_out_of_range_digit_renders_blank_without_writing_twice() {
    let mut left = expect_glyphs(&[Glyph::Digit(3), Glyph::Blank]);
    let mut right = expect_glyphs(&[]);
    let mut display = driver(&left, &right);

    display.render(Position::Left, Glyph::Digit(3)).unwrap();
    assert!(display.render(Position::Left, Glyph::Digit(12)).unwrap());
    assert_eq!(display.shown(Position::Left), Glyph::Blank);
    // Cached as blank, so a real blank is a no-op
    assert!(!display.render(Position::Left, Glyph::Blank).unwrap());

    finish(&mut left);
    finish(&mut right);
}

#[test]
fn test_blank_all_writes_unconditionally() {
    let mut left = expect_glyphs(&[Glyph::Blank, Glyph::Blank]);
    let mut right = expect_glyphs(&[Glyph::Blank, Glyph::Blank]);
    let mut indicator = PinMock::new(&[Transaction::set(State::Low), Transaction::set(State::Low)]);
    let mut display = DisplayDriver::new(
        SegmentDisplay::new(left.clone()),
        SegmentDisplay::with_indicator(right.clone(), indicator.clone()),
    );

    display.blank_all().unwrap();
    display.blank_all().unwrap();

    finish(&mut left);
    finish(&mut right);
    indicator.done();
}

#[test]
fn test_indicator_follows_set_indicator() {
    let mut left = expect_glyphs(&[]);
    let mut right = expect_glyphs(&[]);
    let mut indicator = PinMock::new(&[
        Transaction::set(State::High),
        Transaction::set(State::Low),
    ]);
    let mut display = DisplayDriver::new(
        SegmentDisplay::new(left.clone()),
        SegmentDisplay::with_indicator(right.clone(), indicator.clone()),
    );

    display.set_indicator(true).unwrap();
    display.set_indicator(false).unwrap();

    finish(&mut left);
    finish(&mut right);
    indicator.done();
}
