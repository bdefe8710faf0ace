//! Core data types for the focus timer

use embedded_hal::digital::PinState;

use crate::hal::Duration;

/// Length of one focus session in seconds (25 minutes)
pub const MAX_DURATION_SECONDS: u32 = 25 * 60;

/// Longest session the two-digit display can count down
const MAX_MINUTES: u32 = 99;

/// Value shown at one digit position
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "std", derive(Hash))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Glyph {
    /// Nothing rendered, all segments off. Distinct from digit 0.
    Blank,
    /// Decimal digit. Values above 9 are not renderable and behave as `Blank`.
    Digit(u8),
}

impl Glyph {
    /// Glyph for a raw value; anything outside 0..=9 becomes `Blank`
    pub const fn from_value(value: u8) -> Self {
        if value <= 9 {
            Glyph::Digit(value)
        } else {
            Glyph::Blank
        }
    }

    /// Collapse out-of-range digits onto `Blank`
    pub const fn normalized(self) -> Self {
        match self {
            Glyph::Digit(value) => Glyph::from_value(value),
            Glyph::Blank => Glyph::Blank,
        }
    }

    /// Returns the digit value, if this glyph renders one
    pub const fn digit(self) -> Option<u8> {
        match self.normalized() {
            Glyph::Digit(value) => Some(value),
            Glyph::Blank => None,
        }
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Glyph::Blank
    }
}

/// Digit position on the two-digit display
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Position {
    /// Tens digit
    Left,
    /// Ones digit, carries the wired indicator
    Right,
}

impl Position {
    /// Both positions, left to right
    pub const ALL: [Position; 2] = [Position::Left, Position::Right];
}

/// Shared countdown state: mutated from the tick interrupt and the toggle path
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerState {
    /// Seconds left in the current session, never below zero
    pub seconds_remaining: u32,
    /// True while the periodic source is supposed to run
    pub active: bool,
}

impl TimerState {
    /// Power-on state: idle with nothing on the clock
    pub const fn new() -> Self {
        Self {
            seconds_remaining: 0,
            active: false,
        }
    }

    /// Minutes shown for this state, rounded up so a running session never shows 0
    pub const fn display_minutes(&self) -> u32 {
        self.seconds_remaining / 60 + 1
    }
}

/// One physical press-and-release of the button
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressEvent;

/// Countdown configuration parameters
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TimerConfig {
    /// Session length the toggle-on transition resets to
    pub max_duration_secs: u32,
    /// Period of the tick interrupt
    pub tick_period: Duration,
}

impl TimerConfig {
    /// 25 minute session, one tick per second
    pub const POMODORO: TimerConfig = TimerConfig {
        max_duration_secs: MAX_DURATION_SECONDS,
        tick_period: Duration::from_secs(1),
    };

    /// Create a new configuration with validation
    pub fn new(minutes: u32) -> Result<Self, &'static str> {
        if minutes == 0 || minutes > MAX_MINUTES {
            return Err("Session length must be between 1 and 99 minutes");
        }
        Ok(Self {
            max_duration_secs: minutes * 60,
            ..Self::POMODORO
        })
    }

    /// Session length in whole minutes, rounded up
    pub fn minutes(&self) -> u32 {
        self.max_duration_secs.div_ceil(60)
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self::POMODORO
    }
}

/// Button wiring parameters
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ButtonConfig {
    /// Level the input rests at while the button is released
    pub idle_level: PinState,
}

impl ButtonConfig {
    /// Input pulled down, bias line drives it high while pressed
    pub const PULL_DOWN: ButtonConfig = ButtonConfig {
        idle_level: PinState::Low,
    };
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self::PULL_DOWN
    }
}
