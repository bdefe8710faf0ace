#![cfg_attr(not(feature = "std"), no_std)]

//! # Focus Core
//!
//! Countdown timer core for a one-button, two-digit seven-segment focus timer.
//! The 1 Hz interrupt side only ever touches [`CountdownTimer`]; everything that
//! drives lines runs in the cooperative poll loop ([`CountdownApp`]).

#[cfg(all(test, not(feature = "std")))]
extern crate std;

pub mod types;
pub mod segment;
pub mod display;
pub mod timer;
pub mod button;
pub mod app;
pub mod hal;

#[cfg(feature = "test-utils")]
pub mod test_utils;


pub use types::*;
pub use segment::{encode, SegmentPattern};
pub use display::{DisplayDriver, SegmentDisplay};
pub use timer::CountdownTimer;
pub use button::{BiasedButton, ButtonMonitor};
pub use app::{CountdownApp, Iteration, RunState};
pub use hal::{Duration, HalError, PeriodicSource};

/// Focus core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
