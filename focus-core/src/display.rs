//! Two-digit seven-segment display driver

use embedded_hal::digital::{OutputPin, PinState};

use crate::hal::HalError;
use crate::segment::{encode, SegmentPattern, SEGMENT_COUNT};
use crate::types::{Glyph, Position};

/// Output lines of one digit position: segments A..G plus an optional indicator
pub struct SegmentDisplay<P> {
    segments: [P; SEGMENT_COUNT],
    indicator: Option<P>,
}

impl<P> SegmentDisplay<P>
where
    P: OutputPin,
{
    /// Digit with no indicator wired
    pub fn new(segments: [P; SEGMENT_COUNT]) -> Self {
        Self {
            segments,
            indicator: None,
        }
    }

    /// Digit whose auxiliary indicator is wired
    pub fn with_indicator(segments: [P; SEGMENT_COUNT], indicator: P) -> Self {
        Self {
            segments,
            indicator: Some(indicator),
        }
    }

    /// Drive all seven segment lines
    fn write_pattern(&mut self, pattern: SegmentPattern) -> Result<(), HalError> {
        for (pin, on) in self.segments.iter_mut().zip(pattern.levels()) {
            pin.set_state(PinState::from(on)).map_err(|_| HalError::Gpio)?;
        }
        Ok(())
    }

    /// Drive the indicator line if there is one
    fn write_indicator(&mut self, on: bool) -> Result<(), HalError> {
        match self.indicator.as_mut() {
            Some(pin) => pin.set_state(PinState::from(on)).map_err(|_| HalError::Gpio),
            None => Ok(()),
        }
    }
}

/// Last glyph actually written to each position
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct DigitCache {
    left: Glyph,
    right: Glyph,
}

impl DigitCache {
    const fn new() -> Self {
        Self {
            left: Glyph::Blank,
            right: Glyph::Blank,
        }
    }

    fn slot(&mut self, position: Position) -> &mut Glyph {
        match position {
            Position::Left => &mut self.left,
            Position::Right => &mut self.right,
        }
    }
}

/// Renders minutes onto two digit positions, writing lines only when a digit changes
pub struct DisplayDriver<P> {
    left: SegmentDisplay<P>,
    right: SegmentDisplay<P>,
    cache: DigitCache,
}

impl<P> DisplayDriver<P>
where
    P: OutputPin,
{
    /// Both positions start out cached as blank; call [`Self::blank_all`] to match the hardware
    pub fn new(left: SegmentDisplay<P>, right: SegmentDisplay<P>) -> Self {
        Self {
            left,
            right,
            cache: DigitCache::new(),
        }
    }

    /// Unconditionally clear both digits and the indicator
    pub fn blank_all(&mut self) -> Result<(), HalError> {
        for position in Position::ALL {
            self.display(position).write_pattern(SegmentPattern::BLANK)?;
            *self.cache.slot(position) = Glyph::Blank;
        }
        self.set_indicator(false)
    }

    /// Show `glyph` at `position`. Returns whether any line was written.
    pub fn render(&mut self, position: Position, glyph: Glyph) -> Result<bool, HalError> {
        let glyph = glyph.normalized();
        if *self.cache.slot(position) == glyph {
            return Ok(false);
        }

        self.display(position).write_pattern(encode(glyph))?;
        *self.cache.slot(position) = glyph;

        #[cfg(feature = "defmt")]
        defmt::trace!("Render {:?} -> {:?}", position, glyph);

        Ok(true)
    }

    /// Show the remaining time in minutes, rounded up, with the leading zero suppressed
    pub fn render_minutes(&mut self, seconds_remaining: u32) -> Result<(), HalError> {
        let (tens, ones) = minutes_glyphs(seconds_remaining);
        self.render(Position::Left, tens)?;
        self.render(Position::Right, ones)?;
        Ok(())
    }

    /// Drive the auxiliary indicator on every position that has one wired
    pub fn set_indicator(&mut self, on: bool) -> Result<(), HalError> {
        self.left.write_indicator(on)?;
        self.right.write_indicator(on)
    }

    /// Glyph currently cached for `position`
    pub fn shown(&self, position: Position) -> Glyph {
        match position {
            Position::Left => self.cache.left,
            Position::Right => self.cache.right,
        }
    }

    fn display(&mut self, position: Position) -> &mut SegmentDisplay<P> {
        match position {
            Position::Left => &mut self.left,
            Position::Right => &mut self.right,
        }
    }
}

/// Tens and ones glyphs for the minutes display of `seconds_remaining`
pub fn minutes_glyphs(seconds_remaining: u32) -> (Glyph, Glyph) {
    let minutes = seconds_remaining / 60 + 1;
    let tens = match minutes / 10 {
        0 => Glyph::Blank,
        tens => Glyph::from_value(u8::try_from(tens).unwrap_or(u8::MAX)),
    };
    let ones = Glyph::from_value((minutes % 10) as u8);
    (tens, ones)
}

/// Indicator level while running: on for even seconds, off for odd
pub const fn heartbeat_level(seconds_remaining: u32) -> bool {
    seconds_remaining % 2 == 0
}
