//! Core runtime for panelkit overlays.
//!
//! Everything here is single-threaded: frame callbacks, observable state and
//! owned values all live on the UI thread that drains the runtime.

pub mod collections;
mod frame_clock;
mod owned;
pub mod platform;
mod runtime;
mod state;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use owned::Owned;
pub use platform::{ManualScheduler, RuntimeScheduler};
pub use runtime::{Runtime, RuntimeHandle};
pub use state::{MutableState, State, Subscription};

pub type FrameCallbackId = u64;

/// Nanoseconds between frames at 60 fps.
pub const FRAME_INTERVAL_NANOS: u64 = 16_666_667;

/// Drain frames at 60 fps until no callbacks remain or `max_frames` is hit.
///
/// Returns the timestamp of the last drained frame.
pub fn pump_frames(runtime: &RuntimeHandle, start_nanos: u64, max_frames: usize) -> u64 {
    let mut frame_time = start_nanos;
    for _ in 0..max_frames {
        if !runtime.has_frame_callbacks() {
            break;
        }
        frame_time += FRAME_INTERVAL_NANOS;
        runtime.drain_frame_callbacks(frame_time);
    }
    frame_time
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
