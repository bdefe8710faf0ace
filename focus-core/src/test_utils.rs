//! Test utilities for focus core functionality

pub mod simulation {
    //! Whole device on mock hardware

    use crate::app::{CountdownApp, Iteration, RunState};
    use crate::button::BiasedButton;
    use crate::display::{DisplayDriver, SegmentDisplay};
    use crate::hal::mock::{MockPeriodicSource, MockPin};
    use crate::segment::{SegmentPattern, SEGMENT_COUNT};
    use crate::timer::CountdownTimer;
    use crate::types::{ButtonConfig, Glyph, TimerConfig, TimerState};

    type SimApp = CountdownApp<'static, MockPeriodicSource, MockPin, MockPin, MockPin>;

    /// Observer handles for one digit position
    #[derive(Clone)]
    pub struct DigitProbe {
        pub segments: [MockPin; SEGMENT_COUNT],
    }

    impl DigitProbe {
        fn new() -> Self {
            Self {
                segments: core::array::from_fn(|_| MockPin::new()),
            }
        }

        /// Pattern currently on the lines
        pub fn pattern(&self) -> SegmentPattern {
            let bits = self
                .segments
                .iter()
                .enumerate()
                .fold(0u8, |bits, (index, pin)| bits | ((pin.is_set_high() as u8) << index));
            SegmentPattern::from_bits(bits)
        }

        /// Glyph the lines show, `None` for a pattern the encoder never produces
        pub fn glyph(&self) -> Option<Glyph> {
            self.pattern().decode()
        }

        /// Total line writes on this position
        pub fn writes(&self) -> u32 {
            self.segments.iter().map(MockPin::writes).sum()
        }
    }

    /// Focus timer wired to mock lines and a mock periodic source
    ///
    /// The timer is leaked so the app can borrow it for `'static`, like the firmware's
    /// `static` timer.
    pub struct SimulatedDevice {
        timer: &'static CountdownTimer<MockPeriodicSource>,
        app: SimApp,
        pub source: MockPeriodicSource,
        pub button: MockPin,
        pub bias: MockPin,
        pub indicator: MockPin,
        pub left: DigitProbe,
        pub right: DigitProbe,
        indicator_level: bool,
        indicator_changes: u32,
    }

    impl SimulatedDevice {
        pub fn new() -> Self {
            Self::with_config(TimerConfig::POMODORO)
        }

        /// Power on: lines blanked, idle
        pub fn with_config(config: TimerConfig) -> Self {
            let source = MockPeriodicSource::new();
            let timer: &'static CountdownTimer<MockPeriodicSource> =
                Box::leak(Box::new(CountdownTimer::new(source.clone(), config)));

            let left = DigitProbe::new();
            let right = DigitProbe::new();
            let indicator = MockPin::new();
            let button = MockPin::new();
            let bias = MockPin::new();

            let display = DisplayDriver::new(
                SegmentDisplay::new(left.segments.clone()),
                SegmentDisplay::with_indicator(right.segments.clone(), indicator.clone()),
            );
            let biased = BiasedButton::new(button.clone(), bias.clone())
                .expect("mock lines never fail");
            let mut app = CountdownApp::new(timer, display, biased, ButtonConfig::PULL_DOWN);
            app.init().expect("mock lines never fail");

            Self {
                timer,
                app,
                source,
                button,
                bias,
                indicator,
                left,
                right,
                indicator_level: false,
                indicator_changes: 0,
            }
        }

        /// One loop iteration
        pub fn poll(&mut self) -> Iteration {
            let iteration = self.app.poll_once().expect("mock lines never fail");
            let level = self.indicator.is_set_high();
            if level != self.indicator_level {
                self.indicator_level = level;
                self.indicator_changes += 1;
            }
            iteration
        }

        /// Hold the button down for `held_polls` iterations, then release and poll once
        pub fn press_for(&mut self, held_polls: usize) -> bool {
            self.button.set_level(true);
            let mut pressed = false;
            for _ in 0..held_polls.max(1) {
                pressed |= self.poll().pressed;
            }
            self.button.set_level(false);
            pressed | self.poll().pressed
        }

        /// Short press and release
        pub fn press(&mut self) -> bool {
            self.press_for(1)
        }

        /// Deliver a tick interrupt if the source is running. Returns whether it fired.
        pub fn fire_tick(&mut self) -> bool {
            if self.source.is_running() {
                self.timer.tick();
                true
            } else {
                false
            }
        }

        /// Fire a tick and run one loop iteration, as the hardware would a second later
        pub fn advance_second(&mut self) -> bool {
            let fired = self.fire_tick();
            self.poll();
            fired
        }

        pub fn timer(&self) -> &'static CountdownTimer<MockPeriodicSource> {
            self.timer
        }

        pub fn snapshot(&self) -> TimerState {
            self.timer.snapshot()
        }

        pub fn state(&self) -> RunState {
            self.app.state()
        }

        /// Glyphs on the lines, left then right
        pub fn digits(&self) -> (Option<Glyph>, Option<Glyph>) {
            (self.left.glyph(), self.right.glyph())
        }

        pub fn indicator(&self) -> bool {
            self.indicator.is_set_high()
        }

        /// Indicator level changes seen at the end of each poll
        pub fn indicator_changes(&self) -> u32 {
            self.indicator_changes
        }
    }

    impl Default for SimulatedDevice {
        fn default() -> Self {
            Self::new()
        }
    }
}

pub mod level_patterns {
    //! Button level sequences for edge detection tests

    use embedded_hal::digital::PinState;

    /// `cycles` press-release cycles, each held for `held` polls and released for `gap` polls
    pub fn press_cycles(cycles: usize, held: usize, gap: usize) -> Vec<PinState> {
        let mut levels = Vec::with_capacity(cycles * (held + gap));
        for _ in 0..cycles {
            levels.extend(core::iter::repeat(PinState::High).take(held.max(1)));
            levels.extend(core::iter::repeat(PinState::Low).take(gap.max(1)));
        }
        levels
    }

    /// Number of completed press-release cycles in a pulled-down level sequence
    pub fn completed_cycles(levels: &[PinState]) -> usize {
        levels
            .windows(2)
            .filter(|pair| pair[0] == PinState::High && pair[1] == PinState::Low)
            .count()
    }
}
