//! Cooperative poll loop tying the button, countdown and display together

use embedded_hal::digital::{InputPin, OutputPin};

use crate::button::{BiasedButton, ButtonMonitor};
use crate::display::{heartbeat_level, DisplayDriver};
use crate::hal::{HalError, PeriodicSource};
use crate::timer::CountdownTimer;
use crate::types::ButtonConfig;

/// Device state, mirrored from the countdown's `active` flag
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunState {
    /// No periodic source running, indicator off
    Idle,
    /// Ticking once per second, indicator blinking
    Running,
}

impl From<bool> for RunState {
    fn from(active: bool) -> Self {
        if active {
            RunState::Running
        } else {
            RunState::Idle
        }
    }
}

/// What one loop iteration did
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct Iteration {
    /// A press event toggled the countdown
    pub pressed: bool,
    /// A tick notification was consumed and the display refreshed
    pub rendered: bool,
}

/// Main loop of the device
///
/// Each iteration polls the button once and consumes at most one pending tick
/// notification. Never blocks or sleeps.
pub struct CountdownApp<'a, S, P, I, O> {
    timer: &'a CountdownTimer<S>,
    display: DisplayDriver<P>,
    button: BiasedButton<I, O>,
    monitor: ButtonMonitor,
    state: RunState,
}

impl<'a, S, P, I, O> CountdownApp<'a, S, P, I, O>
where
    S: PeriodicSource,
    P: OutputPin,
    I: InputPin,
    O: OutputPin,
{
    pub fn new(
        timer: &'a CountdownTimer<S>,
        display: DisplayDriver<P>,
        button: BiasedButton<I, O>,
        config: ButtonConfig,
    ) -> Self {
        Self {
            timer,
            display,
            button,
            monitor: ButtonMonitor::new(config),
            state: RunState::from(timer.snapshot().active),
        }
    }

    /// Bring the display to the power-on state: both digits blank, indicator off
    pub fn init(&mut self) -> Result<(), HalError> {
        self.display.blank_all()?;

        #[cfg(feature = "defmt")]
        defmt::info!("Display blanked, {} min sessions", self.timer.config().minutes());

        Ok(())
    }

    /// Run one iteration of the loop
    pub fn poll_once(&mut self) -> Result<Iteration, HalError> {
        let mut iteration = Iteration::default();

        let level = self.button.level()?;
        if self.monitor.poll(level).is_some() {
            self.on_press()?;
            iteration.pressed = true;
        }

        if self.timer.take_ready() {
            self.render()?;
            iteration.rendered = true;
        }

        Ok(iteration)
    }

    /// Poll forever. Line errors are dropped: there is nowhere to report them and
    /// the next render pass rewrites whatever changed.
    pub fn run(&mut self) -> ! {
        loop {
            if let Err(_error) = self.poll_once() {
                #[cfg(feature = "defmt")]
                defmt::warn!("Poll failed: {:?}", _error);
            }
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn display(&self) -> &DisplayDriver<P> {
        &self.display
    }

    fn on_press(&mut self) -> Result<(), HalError> {
        let active = self.timer.toggle();
        self.state = RunState::from(active);

        #[cfg(feature = "defmt")]
        defmt::debug!("Press -> {:?}", self.state);

        if !active {
            self.display.set_indicator(false)?;
        }
        Ok(())
    }

    fn render(&mut self) -> Result<(), HalError> {
        let snapshot = self.timer.snapshot();
        self.state = RunState::from(snapshot.active);

        self.display.render_minutes(snapshot.seconds_remaining)?;
        // A notification left over from before a pause must not relight the indicator
        self.display
            .set_indicator(snapshot.active && heartbeat_level(snapshot.seconds_remaining))
    }
}
