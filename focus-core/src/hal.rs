//! Hardware Abstraction Layer for the focus timer
//!
//! Digital lines use `embedded_hal::digital` directly. The periodic tick source
//! has no embedded-hal equivalent, so it gets its own trait here.

// Re-export time types based on feature
#[cfg(feature = "embassy-time")]
pub use embassy_time::Duration;

#[cfg(not(feature = "embassy-time"))]
pub use self::mock_time::Duration;

#[cfg(not(feature = "embassy-time"))]
mod mock_time {
    /// Microsecond duration for builds without embassy-time
    #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub struct Duration(u64);

    impl Duration {
        pub const fn from_secs(secs: u64) -> Self {
            Self(secs * 1_000_000)
        }

        pub const fn from_millis(ms: u64) -> Self {
            Self(ms * 1_000)
        }

        pub const fn from_micros(us: u64) -> Self {
            Self(us)
        }

        pub const fn as_secs(&self) -> u64 {
            self.0 / 1_000_000
        }

        pub const fn as_millis(&self) -> u64 {
            self.0 / 1_000
        }

        pub const fn as_micros(&self) -> u64 {
            self.0
        }
    }
}

/// Error types for HAL operations
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalError {
    /// Reading or driving a digital line failed
    Gpio,
    /// Invalid configuration
    InvalidConfig,
}

#[cfg(feature = "std")]
impl core::fmt::Display for HalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HalError::Gpio => write!(f, "GPIO operation failed"),
            HalError::InvalidConfig => write!(f, "Invalid configuration"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HalError {}

/// Hardware countdown/repeat timer driving the tick interrupt
///
/// Implementations are called from inside the timer's critical section, including
/// from the tick interrupt itself, so every method must be short and infallible.
/// The interrupt handler that calls [`crate::CountdownTimer::tick`] is bound
/// statically by the board (interrupt vector), not registered at runtime.
pub trait PeriodicSource {
    /// Program the period and enable the source
    fn start(&mut self, period: Duration, repeating: bool);

    /// Disable the source; no further ticks until the next `start`
    fn stop(&mut self);

    /// Restart the current period from zero elapsed time
    fn reset_elapsed(&mut self);
}

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    //! Mock implementations for testing

    use super::*;
    use core::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
    use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};
    use std::sync::Arc;

    #[derive(Default, Debug)]
    struct PinProbe {
        level: AtomicBool,
        writes: AtomicU32,
        failing: AtomicBool,
    }

    /// Digital line that remembers its level and counts writes
    ///
    /// Clones share the same line, so a test can keep one handle while a driver owns another.
    #[derive(Clone, Default, Debug)]
    pub struct MockPin {
        probe: Arc<PinProbe>,
    }

    impl MockPin {
        pub fn new() -> Self {
            Self::default()
        }

        /// Line whose every read and write fails
        pub fn failing() -> Self {
            let pin = Self::new();
            pin.probe.failing.store(true, Ordering::Relaxed);
            pin
        }

        /// Drive the level seen by readers, without counting a write
        pub fn set_level(&self, high: bool) {
            self.probe.level.store(high, Ordering::Relaxed);
        }

        pub fn is_set_high(&self) -> bool {
            self.probe.level.load(Ordering::Relaxed)
        }

        /// Number of `set_high`/`set_low` calls so far
        pub fn writes(&self) -> u32 {
            self.probe.writes.load(Ordering::Relaxed)
        }

        fn check(&self) -> Result<(), ErrorKind> {
            if self.probe.failing.load(Ordering::Relaxed) {
                Err(ErrorKind::Other)
            } else {
                Ok(())
            }
        }

        fn write(&mut self, high: bool) -> Result<(), ErrorKind> {
            self.check()?;
            self.probe.level.store(high, Ordering::Relaxed);
            self.probe.writes.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }
    }

    impl ErrorType for MockPin {
        type Error = ErrorKind;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.write(false)
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.write(true)
        }
    }

    impl InputPin for MockPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            self.check()?;
            Ok(self.is_set_high())
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            self.is_high().map(|high| !high)
        }
    }

    #[derive(Default, Debug)]
    struct SourceProbe {
        running: AtomicBool,
        repeating: AtomicBool,
        period_us: AtomicU64,
        starts: AtomicU32,
        stops: AtomicU32,
        resets: AtomicU32,
    }

    /// Periodic source that records how it was driven
    #[derive(Clone, Default, Debug)]
    pub struct MockPeriodicSource {
        probe: Arc<SourceProbe>,
    }

    impl MockPeriodicSource {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn is_running(&self) -> bool {
            self.probe.running.load(Ordering::Relaxed)
        }

        pub fn is_repeating(&self) -> bool {
            self.probe.repeating.load(Ordering::Relaxed)
        }

        pub fn period(&self) -> Duration {
            Duration::from_micros(self.probe.period_us.load(Ordering::Relaxed))
        }

        pub fn starts(&self) -> u32 {
            self.probe.starts.load(Ordering::Relaxed)
        }

        pub fn stops(&self) -> u32 {
            self.probe.stops.load(Ordering::Relaxed)
        }

        pub fn resets(&self) -> u32 {
            self.probe.resets.load(Ordering::Relaxed)
        }
    }

    impl PeriodicSource for MockPeriodicSource {
        fn start(&mut self, period: Duration, repeating: bool) {
            self.probe.period_us.store(period.as_micros(), Ordering::Relaxed);
            self.probe.repeating.store(repeating, Ordering::Relaxed);
            self.probe.running.store(true, Ordering::Relaxed);
            self.probe.starts.fetch_add(1, Ordering::Relaxed);
        }

        fn stop(&mut self) {
            self.probe.running.store(false, Ordering::Relaxed);
            self.probe.stops.fetch_add(1, Ordering::Relaxed);
        }

        fn reset_elapsed(&mut self) {
            self.probe.resets.fetch_add(1, Ordering::Relaxed);
        }
    }
}
