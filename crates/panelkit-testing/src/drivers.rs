//! Fake [`AnimationDriver`]s.
//!
//! Both fakes jump channels straight to their targets instead of ticking a
//! frame clock. [`ImmediateDriver`] reports every animation as finished
//! before returning; [`ManualDriver`] holds the callback until the test
//! settles or interrupts it.

use panelkit_animation::{AnimationResult, OnAnimationEnd};
use panelkit_core::{MutableState, State};
use panelkit_drawer::{AnimationDriver, ChannelFrame};
use panelkit_gesture::{EdgeGeometry, Pin};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Something the session asked the driver to do.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DriverRequest {
    AnimateIn,
    AnimateOut,
    SnapBack,
    FollowGesture(ChannelFrame),
}

struct Channels {
    geometry: EdgeGeometry,
    extent: Cell<f32>,
    position: MutableState<f32>,
    opacity: MutableState<f32>,
    requests: RefCell<Vec<DriverRequest>>,
}

impl Channels {
    fn new(pin: Pin, extent: f32) -> Self {
        let geometry = EdgeGeometry::from_pin(pin);
        let closed = ChannelFrame::closed(&geometry, extent);
        Self {
            geometry,
            extent: Cell::new(extent),
            position: MutableState::new(closed.position),
            opacity: MutableState::new(closed.opacity),
            requests: RefCell::new(Vec::new()),
        }
    }

    fn target(&self, request: DriverRequest) -> ChannelFrame {
        match request {
            DriverRequest::AnimateIn | DriverRequest::SnapBack => ChannelFrame::OPEN,
            DriverRequest::AnimateOut => ChannelFrame::closed(&self.geometry, self.extent.get()),
            DriverRequest::FollowGesture(frame) => frame,
        }
    }

    fn apply(&self, frame: ChannelFrame) {
        self.position.set_value(frame.position);
        self.opacity.set_value(frame.opacity);
    }

    /// Re-park a panel that has not animated yet.
    fn set_extent(&self, extent: f32) {
        self.extent.set(extent);
        if self.requests.borrow().is_empty() {
            self.apply(ChannelFrame::closed(&self.geometry, extent));
        }
    }

    fn record(&self, request: DriverRequest) {
        self.requests.borrow_mut().push(request);
    }
}

/// Settles every animation synchronously with `finished: true`.
#[derive(Clone)]
pub struct ImmediateDriver {
    channels: Rc<Channels>,
}

impl ImmediateDriver {
    pub fn new(pin: Pin, extent: f32) -> Self {
        Self {
            channels: Rc::new(Channels::new(pin, extent)),
        }
    }

    pub fn requests(&self) -> Vec<DriverRequest> {
        self.channels.requests.borrow().clone()
    }

    fn run(&self, request: DriverRequest, on_settled: OnAnimationEnd) {
        self.channels.record(request);
        self.channels.apply(self.channels.target(request));
        on_settled(AnimationResult::FINISHED);
    }
}

impl AnimationDriver for ImmediateDriver {
    fn animate_in(&mut self, on_settled: OnAnimationEnd) {
        self.run(DriverRequest::AnimateIn, on_settled);
    }

    fn animate_out(&mut self, on_settled: OnAnimationEnd) {
        self.run(DriverRequest::AnimateOut, on_settled);
    }

    fn snap_back(&mut self, on_settled: OnAnimationEnd) {
        self.run(DriverRequest::SnapBack, on_settled);
    }

    fn follow_gesture(&mut self, frame: ChannelFrame) {
        self.channels.record(DriverRequest::FollowGesture(frame));
        self.channels.apply(frame);
    }

    fn set_extent(&mut self, extent: f32) {
        self.channels.set_extent(extent);
    }

    fn extent(&self) -> f32 {
        self.channels.extent.get()
    }

    fn position(&self) -> f32 {
        self.channels.position.get()
    }

    fn opacity(&self) -> f32 {
        self.channels.opacity.get()
    }

    fn opacity_state(&self) -> State<f32> {
        self.channels.opacity.as_state()
    }

    fn position_state(&self) -> State<f32> {
        self.channels.position.as_state()
    }
}

struct PendingAnimation {
    request: DriverRequest,
    on_settled: OnAnimationEnd,
}

/// Holds the in-flight animation until [`ManualDriver::settle`] or
/// [`ManualDriver::interrupt`].
///
/// Clones share state, so a test can keep one clone and hand the other to
/// the session.
#[derive(Clone)]
pub struct ManualDriver {
    channels: Rc<Channels>,
    pending: Rc<RefCell<Option<PendingAnimation>>>,
}

impl ManualDriver {
    pub fn new(pin: Pin, extent: f32) -> Self {
        Self {
            channels: Rc::new(Channels::new(pin, extent)),
            pending: Rc::new(RefCell::new(None)),
        }
    }

    pub fn requests(&self) -> Vec<DriverRequest> {
        self.channels.requests.borrow().clone()
    }

    /// The request still waiting to settle.
    pub fn pending(&self) -> Option<DriverRequest> {
        self.pending.borrow().as_ref().map(|pending| pending.request)
    }

    pub fn is_idle(&self) -> bool {
        self.pending.borrow().is_none()
    }

    /// Jump to the pending target and report `finished: true`.
    pub fn settle(&self) -> Option<DriverRequest> {
        let pending = self.pending.borrow_mut().take()?;
        self.channels.apply(self.channels.target(pending.request));
        (pending.on_settled)(AnimationResult::FINISHED);
        Some(pending.request)
    }

    /// Settle repeatedly until nothing is pending. Returns how many settled.
    pub fn settle_all(&self) -> usize {
        let mut settled = 0;
        while self.settle().is_some() {
            settled += 1;
        }
        settled
    }

    /// Stop the pending animation where it is and report `finished: false`.
    pub fn interrupt(&self) -> Option<DriverRequest> {
        let pending = self.pending.borrow_mut().take()?;
        (pending.on_settled)(AnimationResult::INTERRUPTED);
        Some(pending.request)
    }

    fn start(&self, request: DriverRequest, on_settled: OnAnimationEnd) {
        self.channels.record(request);
        let superseded = self
            .pending
            .borrow_mut()
            .replace(PendingAnimation { request, on_settled });
        if let Some(previous) = superseded {
            log::trace!("{:?} superseded by {:?}", previous.request, request);
            (previous.on_settled)(AnimationResult::INTERRUPTED);
        }
    }
}

impl AnimationDriver for ManualDriver {
    fn animate_in(&mut self, on_settled: OnAnimationEnd) {
        self.start(DriverRequest::AnimateIn, on_settled);
    }

    fn animate_out(&mut self, on_settled: OnAnimationEnd) {
        self.start(DriverRequest::AnimateOut, on_settled);
    }

    fn snap_back(&mut self, on_settled: OnAnimationEnd) {
        self.start(DriverRequest::SnapBack, on_settled);
    }

    fn follow_gesture(&mut self, frame: ChannelFrame) {
        self.channels.record(DriverRequest::FollowGesture(frame));
        let superseded = self.pending.borrow_mut().take();
        if let Some(previous) = superseded {
            (previous.on_settled)(AnimationResult::INTERRUPTED);
        }
        self.channels.apply(frame);
    }

    fn set_extent(&mut self, extent: f32) {
        self.channels.set_extent(extent);
    }

    fn extent(&self) -> f32 {
        self.channels.extent.get()
    }

    fn position(&self) -> f32 {
        self.channels.position.get()
    }

    fn opacity(&self) -> f32 {
        self.channels.opacity.get()
    }

    fn opacity_state(&self) -> State<f32> {
        self.channels.opacity.as_state()
    }

    fn position_state(&self) -> State<f32> {
        self.channels.position.as_state()
    }
}
