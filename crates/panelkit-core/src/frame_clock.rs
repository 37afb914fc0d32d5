//! One-shot frame callbacks for animations.

use crate::runtime::RuntimeHandle;
use crate::FrameCallbackId;

/// Hands out frame callbacks tied to a runtime.
#[derive(Clone)]
pub struct FrameClock {
    runtime: RuntimeHandle,
}

impl FrameClock {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self { runtime }
    }

    /// Run `callback` once, with the timestamp of the next drained frame.
    pub fn with_frame_nanos(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        FrameCallbackRegistration {
            id: self.runtime.register_frame_callback(callback),
            runtime: self.runtime.clone(),
        }
    }
}

/// Keeps a frame callback queued. Dropping or cancelling it unregisters the
/// callback if it has not run yet.
pub struct FrameCallbackRegistration {
    runtime: RuntimeHandle,
    id: Option<FrameCallbackId>,
}

impl FrameCallbackRegistration {
    /// `false` when the runtime was already gone at registration time.
    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    pub fn cancel(mut self) {
        self.unregister();
    }

    fn unregister(&mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_frame_callback(id);
        }
    }
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        self.unregister();
    }
}
