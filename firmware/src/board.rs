//! Pin assignment for the focus timer board
//!
//! Left digit segments on PA0-PA6, right digit segments on PB10-PB15 and PB8,
//! the right digit's decimal point on PB9 as the running indicator. The push
//! button sits between PA8 (driven high) and PA7 (pulled down).

use focus_core::{BiasedButton, DisplayDriver, HalError, SegmentDisplay};

use crate::ch32v203_hardware::{GpioLine, Line, Port};

/// Every line the board uses
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PinMap {
    /// Segments A..G of the left digit
    pub left: [Line; 7],
    /// Segments A..G of the right digit
    pub right: [Line; 7],
    /// Decimal point of the right digit
    pub indicator: Line,
    pub button: Line,
    /// Held high so a press pulls the button line up
    pub bias: Line,
}

pub const BOARD: PinMap = PinMap {
    left: [
        Line::new(Port::A, 0),
        Line::new(Port::A, 1),
        Line::new(Port::A, 2),
        Line::new(Port::A, 3),
        Line::new(Port::A, 4),
        Line::new(Port::A, 5),
        Line::new(Port::A, 6),
    ],
    right: [
        Line::new(Port::B, 10),
        Line::new(Port::B, 11),
        Line::new(Port::B, 12),
        Line::new(Port::B, 13),
        Line::new(Port::B, 14),
        Line::new(Port::B, 15),
        Line::new(Port::B, 8),
    ],
    indicator: Line::new(Port::B, 9),
    button: Line::new(Port::A, 7),
    bias: Line::new(Port::A, 8),
};

impl PinMap {
    /// No line may be claimed twice and every pin number must exist
    pub fn validate(&self) -> Result<(), HalError> {
        let mut lines = [self.indicator; 17];
        lines[..7].copy_from_slice(&self.left);
        lines[7..14].copy_from_slice(&self.right);
        lines[15] = self.button;
        lines[16] = self.bias;

        for (i, line) in lines.iter().enumerate() {
            if line.pin > 15 || lines[i + 1..].contains(line) {
                return Err(HalError::InvalidConfig);
            }
        }
        Ok(())
    }
}

/// Configured board lines, ready to hand to the app
pub struct Board {
    pub display: DisplayDriver<GpioLine>,
    pub button: BiasedButton<GpioLine, GpioLine>,
}

impl Board {
    /// Configure every line in `pins`. Peripheral clocks must already be on.
    pub fn new(pins: &PinMap) -> Result<Self, HalError> {
        pins.validate()?;

        let left = SegmentDisplay::new(pins.left.map(GpioLine::push_pull_output));
        let right = SegmentDisplay::with_indicator(
            pins.right.map(GpioLine::push_pull_output),
            GpioLine::push_pull_output(pins.indicator),
        );
        let button = BiasedButton::new(
            GpioLine::pull_down_input(pins.button),
            GpioLine::push_pull_output(pins.bias),
        )?;

        Ok(Self {
            display: DisplayDriver::new(left, right),
            button,
        })
    }
}
