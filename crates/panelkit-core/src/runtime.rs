//! Frame-callback runtime.
//!
//! Callbacks queued with [`RuntimeHandle::register_frame_callback`] run once,
//! in registration order, on the next [`RuntimeHandle::drain_frame_callbacks`].
//! Callbacks queued while a frame drains wait for the following frame.

use crate::platform::{ManualScheduler, RuntimeScheduler};
use crate::{FrameCallbackId, FrameClock};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::sync::Arc;

type FrameCallback = Box<dyn FnOnce(u64) + 'static>;

#[derive(Default)]
struct FrameQueue {
    next_id: FrameCallbackId,
    queued: VecDeque<(FrameCallbackId, FrameCallback)>,
}

impl FrameQueue {
    fn push(&mut self, callback: FrameCallback) -> FrameCallbackId {
        self.next_id += 1;
        self.queued.push_back((self.next_id, callback));
        self.next_id
    }

    fn remove(&mut self, id: FrameCallbackId) {
        self.queued.retain(|(queued, _)| *queued != id);
    }

    fn take_all(&mut self) -> VecDeque<(FrameCallbackId, FrameCallback)> {
        std::mem::take(&mut self.queued)
    }
}

struct RuntimeInner {
    scheduler: Arc<dyn RuntimeScheduler>,
    frame_requested: Cell<bool>,
    queue: RefCell<FrameQueue>,
    last_frame_time_nanos: Cell<Option<u64>>,
}

impl RuntimeInner {
    fn request_frame(&self) {
        if !self.frame_requested.replace(true) {
            self.scheduler.schedule_frame();
        }
    }

    fn is_idle(&self) -> bool {
        self.queue.borrow().queued.is_empty()
    }

    fn drain(&self, frame_time_nanos: u64) {
        self.last_frame_time_nanos.set(Some(frame_time_nanos));
        self.frame_requested.set(false);
        let due = self.queue.borrow_mut().take_all();
        log::trace!("frame {}ns: {} callbacks", frame_time_nanos, due.len());
        for (_, callback) in due {
            callback(frame_time_nanos);
        }
    }
}

/// Owner of the runtime. Dropping it invalidates every [`RuntimeHandle`].
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            inner: Rc::new(RuntimeInner {
                scheduler,
                frame_requested: Cell::new(false),
                queue: RefCell::new(FrameQueue::default()),
                last_frame_time_nanos: Cell::new(None),
            }),
        }
    }

    /// Runtime whose frames are pumped explicitly, by a test or a headless
    /// host, through [`RuntimeHandle::drain_frame_callbacks`].
    pub fn manual() -> Self {
        Self::new(Arc::new(ManualScheduler))
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::manual()
    }
}

/// Weak handle to a [`Runtime`]. Every call is a no-op once the runtime is
/// gone.
#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
}

impl RuntimeHandle {
    fn with_inner<R>(&self, f: impl FnOnce(&RuntimeInner) -> R) -> Option<R> {
        self.inner.upgrade().map(|inner| f(&inner))
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// `None` when the runtime has been dropped.
    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.with_inner(|inner| {
            let id = inner.queue.borrow_mut().push(Box::new(callback));
            inner.request_frame();
            id
        })
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        self.with_inner(|inner| {
            inner.queue.borrow_mut().remove(id);
            if inner.is_idle() {
                inner.frame_requested.set(false);
            }
        });
    }

    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        if let Some(inner) = self.inner.upgrade() {
            inner.drain(frame_time_nanos);
            if !inner.is_idle() {
                inner.request_frame();
            }
        }
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.with_inner(|inner| !inner.is_idle()).unwrap_or(false)
    }

    /// A frame has been asked of the scheduler and not yet drained.
    pub fn needs_frame(&self) -> bool {
        self.with_inner(|inner| inner.frame_requested.get())
            .unwrap_or(false)
    }

    pub fn last_frame_time_nanos(&self) -> Option<u64> {
        self.with_inner(|inner| inner.last_frame_time_nanos.get())
            .flatten()
    }
}
