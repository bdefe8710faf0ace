//! Host-side test suite for the focus timer
//!
//! Everything runs against `focus-core` with mock lines and a mock periodic source;
//! the firmware crate only adds register access on top of the same core.

#[cfg(test)]
mod encoder_tests;
#[cfg(test)]
mod display_tests;
#[cfg(test)]
mod async_tests;

pub use focus_core::test_utils::simulation::SimulatedDevice;

/// Minutes the device shows, as `(tens, ones)` digit values
pub fn shown_minutes(device: &SimulatedDevice) -> (Option<u8>, Option<u8>) {
    let (left, right) = device.digits();
    (
        left.and_then(|glyph| glyph.digit()),
        right.and_then(|glyph| glyph.digit()),
    )
}
