//! Host integration points for the panelkit runtime.
//!
//! A host (winit loop, mobile view controller, test harness) implements
//! these traits so the runtime can ask for frames without depending on a
//! particular event loop.

/// Schedules frames on behalf of the runtime.
///
/// Implementations must be safe to call from any thread.
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}

/// Scheduler for hosts that drive frames themselves (tests, headless demos).
#[derive(Debug, Default, Clone, Copy)]
pub struct ManualScheduler;

impl RuntimeScheduler for ManualScheduler {
    fn schedule_frame(&self) {}
}
