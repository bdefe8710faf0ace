//! Interrupt-driven countdown state machine

use core::cell::RefCell;

use critical_section::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use crate::hal::PeriodicSource;
use crate::types::{TimerConfig, TimerState};

/// State guarded by the timer's critical section
struct Shared<S> {
    state: TimerState,
    source: S,
}

/// Countdown shared between the 1 Hz tick interrupt and the poll loop
///
/// Every access to the remaining seconds, the active flag and the periodic source
/// happens inside one `critical_section::with`, which masks interrupts on the target.
/// Nothing here blocks. Meant to live in a `static` so the interrupt handler can
/// reach it:
///
/// ```ignore
/// static TIMER: CountdownTimer<Tim2Source> = CountdownTimer::new(Tim2Source::new(), TimerConfig::POMODORO);
/// ```
pub struct CountdownTimer<S> {
    shared: Mutex<RefCell<Shared<S>>>,
    ready: Signal<CriticalSectionRawMutex, ()>,
    config: TimerConfig,
}

impl<S> CountdownTimer<S>
where
    S: PeriodicSource,
{
    /// Idle timer with nothing on the clock; the source is left untouched until the first toggle
    pub const fn new(source: S, config: TimerConfig) -> Self {
        Self {
            shared: Mutex::new(RefCell::new(Shared {
                state: TimerState::new(),
                source,
            })),
            ready: Signal::new(),
            config,
        }
    }

    /// Tick handler, called from the periodic source interrupt
    ///
    /// Bounded and allocation free: one critical section, at most one source call,
    /// then the ready signal is posted whichever branch ran. No logging and no
    /// display access happen here.
    pub fn tick(&self) {
        critical_section::with(|cs| {
            let mut shared = self.shared.borrow_ref_mut(cs);
            if shared.state.seconds_remaining == 0 {
                shared.source.stop();
            } else {
                shared.state.seconds_remaining -= 1;
            }
        });
        self.ready.signal(());
    }

    /// Flip between running and idle, returning the new `active` value
    ///
    /// A fresh or fully expired countdown is reset to the configured session length
    /// first. Turning on restarts the source from zero elapsed time; turning off
    /// disables it.
    ///
    /// The indicator line belongs to the display, not to the timer: when this returns
    /// `false` the caller must switch the indicator off itself, as
    /// [`crate::CountdownApp`] does on every press.
    pub fn toggle(&self) -> bool {
        let (active, seconds_remaining) = critical_section::with(|cs| {
            let mut shared = self.shared.borrow_ref_mut(cs);
            let Shared { state, source } = &mut *shared;

            if state.seconds_remaining == 0 {
                state.seconds_remaining = self.config.max_duration_secs;
            }
            state.active = !state.active;

            if state.active {
                source.reset_elapsed();
                source.start(self.config.tick_period, true);
            } else {
                source.stop();
            }
            (state.active, state.seconds_remaining)
        });

        #[cfg(feature = "defmt")]
        defmt::debug!("Countdown {} at {}s", if active { "running" } else { "paused" }, seconds_remaining);
        #[cfg(not(feature = "defmt"))]
        let _ = seconds_remaining;

        active
    }

    /// Consistent copy of the shared state, read in one critical section
    pub fn snapshot(&self) -> TimerState {
        critical_section::with(|cs| self.shared.borrow_ref(cs).state)
    }

    /// Consume a pending tick notification, if any. Never waits.
    pub fn take_ready(&self) -> bool {
        self.ready.try_take().is_some()
    }

    /// Get current configuration
    pub fn config(&self) -> &TimerConfig {
        &self.config
    }
}
