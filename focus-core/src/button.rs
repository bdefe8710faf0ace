//! Single button edge detection

use embedded_hal::digital::{InputPin, OutputPin, PinState};

use crate::hal::HalError;
use crate::types::{ButtonConfig, PressEvent};

/// Turns polled button levels into one press event per press-and-release
///
/// The event fires on the edge back to the idle level, so holding the button emits
/// nothing and the power-on level never counts. There is no time-based debounce:
/// contact bounce faster than the poll rate can produce extra events, so the switch
/// is expected to be clean or hardware debounced.
#[derive(Copy, Clone, Debug)]
pub struct ButtonMonitor {
    idle_level: PinState,
    previous_level: PinState,
}

impl ButtonMonitor {
    /// Start with the stored level at the idle baseline
    pub const fn new(config: ButtonConfig) -> Self {
        Self {
            idle_level: config.idle_level,
            previous_level: config.idle_level,
        }
    }

    /// Feed one sampled level; returns an event on the transition back to idle
    pub fn poll(&mut self, level: PinState) -> Option<PressEvent> {
        let changed = level != self.previous_level;
        self.previous_level = level;

        if changed && level == self.idle_level {
            #[cfg(feature = "defmt")]
            defmt::debug!("Button released");
            Some(PressEvent)
        } else {
            None
        }
    }

    /// True while the last sampled level is away from idle
    pub fn is_held(&self) -> bool {
        self.previous_level != self.idle_level
    }
}

impl Default for ButtonMonitor {
    fn default() -> Self {
        Self::new(ButtonConfig::default())
    }
}

/// Button input together with the output line that supplies its bias voltage
pub struct BiasedButton<I, O> {
    input: I,
    _bias: O,
}

impl<I, O> BiasedButton<I, O>
where
    I: InputPin,
    O: OutputPin,
{
    /// Drive the bias line high once; it stays high for the life of the device
    pub fn new(input: I, mut bias: O) -> Result<Self, HalError> {
        bias.set_high().map_err(|_| HalError::Gpio)?;
        Ok(Self { input, _bias: bias })
    }

    /// Current level of the button input
    pub fn level(&mut self) -> Result<PinState, HalError> {
        self.input
            .is_high()
            .map(PinState::from)
            .map_err(|_| HalError::Gpio)
    }
}
