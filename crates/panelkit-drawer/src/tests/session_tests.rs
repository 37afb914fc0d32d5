use super::*;

use panelkit_core::MutableState;
use panelkit_gesture::{Pin, ResponderSlot};

/// Holds each animation's callback until the test settles it.
#[derive(Clone, Default)]
struct HeldCallbacks {
    pending: Rc<RefCell<Vec<(&'static str, OnAnimationEnd)>>>,
}

impl HeldCallbacks {
    fn hold(&self, label: &'static str, on_settled: OnAnimationEnd) {
        let superseded = std::mem::take(&mut *self.pending.borrow_mut());
        self.pending.borrow_mut().push((label, on_settled));
        for (_, callback) in superseded {
            callback(AnimationResult::INTERRUPTED);
        }
    }

    fn finish(&self) -> Option<&'static str> {
        let next = self.pending.borrow_mut().pop();
        next.map(|(label, callback)| {
            callback(AnimationResult::FINISHED);
            label
        })
    }
}

struct HeldDriver {
    callbacks: HeldCallbacks,
    extent: f32,
    position: MutableState<f32>,
    opacity: MutableState<f32>,
}

impl HeldDriver {
    fn new(callbacks: HeldCallbacks) -> Self {
        Self {
            callbacks,
            extent: 0.0,
            position: MutableState::new(0.0),
            opacity: MutableState::new(0.0),
        }
    }
}

impl AnimationDriver for HeldDriver {
    fn animate_in(&mut self, on_settled: OnAnimationEnd) {
        self.callbacks.hold("in", on_settled);
    }

    fn animate_out(&mut self, on_settled: OnAnimationEnd) {
        self.callbacks.hold("out", on_settled);
    }

    fn snap_back(&mut self, on_settled: OnAnimationEnd) {
        self.callbacks.hold("snap", on_settled);
    }

    fn follow_gesture(&mut self, frame: ChannelFrame) {
        self.position.set_value(frame.position);
        self.opacity.set_value(frame.opacity);
    }

    fn set_extent(&mut self, extent: f32) {
        self.extent = extent;
    }

    fn extent(&self) -> f32 {
        self.extent
    }

    fn position(&self) -> f32 {
        self.position.get()
    }

    fn opacity(&self) -> f32 {
        self.opacity.get()
    }

    fn opacity_state(&self) -> State<f32> {
        self.opacity.as_state()
    }

    fn position_state(&self) -> State<f32> {
        self.position.as_state()
    }
}

fn counter() -> (Rc<Cell<u32>>, impl FnOnce() + 'static) {
    let count = Rc::new(Cell::new(0));
    let sink = Rc::clone(&count);
    (count, move || sink.set(sink.get() + 1))
}

#[test]
fn interrupted_enter_keeps_session_opening() {
    let callbacks = HeldCallbacks::default();
    let session = DrawerSession::new(DrawerConfig::default(), HeldDriver::new(callbacks.clone()))
        .expect("valid config");
    session.mount();
    assert_eq!(session.state(), DrawerState::Opening);

    let pending = std::mem::take(&mut *callbacks.pending.borrow_mut());
    for (_, callback) in pending {
        callback(AnimationResult::INTERRUPTED);
    }
    assert_eq!(session.state(), DrawerState::Opening);
    assert!(!session.is_mounted());
}

#[test]
fn close_during_enter_notifies_once_after_exit() {
    let callbacks = HeldCallbacks::default();
    let (closed, on_close) = counter();
    let session = DrawerSession::builder(DrawerConfig::default())
        .on_close_complete(on_close)
        .build(HeldDriver::new(callbacks.clone()))
        .expect("valid config");

    session.mount();
    session.handle_close();
    session.handle().handle_close();
    assert_eq!(session.state(), DrawerState::Closing);
    assert_eq!(closed.get(), 0);

    assert_eq!(callbacks.finish(), Some("out"));
    assert_eq!(session.state(), DrawerState::Closed);
    assert_eq!(closed.get(), 1);
    assert_eq!(callbacks.finish(), None);
}

#[test]
fn handle_does_not_keep_session_alive() {
    let session = DrawerSession::new(
        DrawerConfig::default(),
        HeldDriver::new(HeldCallbacks::default()),
    )
    .expect("valid config");
    let handle = session.handle();
    assert!(handle.is_alive());
    drop(session);

    assert!(!handle.is_alive());
    handle.handle_close();
    assert_eq!(handle.back_pressed(), BackPressOutcome::Ignored);
    assert_eq!(handle.state(), None);
}

#[test]
fn invalid_config_is_rejected() {
    let result = DrawerSession::new(
        DrawerConfig::default().with_vertical_percentage(1.5),
        HeldDriver::new(HeldCallbacks::default()),
    );
    assert!(matches!(result, Err(ConfigError::VerticalPercentage(_))));
}

#[test]
fn transitions_are_observed_in_order() {
    let callbacks = HeldCallbacks::default();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let session = DrawerSession::builder(DrawerConfig::default())
        .on_transition(move |transition| sink.borrow_mut().push((transition.from, transition.to)))
        .build(HeldDriver::new(callbacks.clone()))
        .expect("valid config");

    session.mount();
    callbacks.finish();
    session.request_close(CloseSource::Button);
    callbacks.finish();

    assert_eq!(
        seen.borrow().as_slice(),
        &[
            (DrawerState::Closed, DrawerState::Opening),
            (DrawerState::Opening, DrawerState::Open),
            (DrawerState::Open, DrawerState::Closing),
            (DrawerState::Closing, DrawerState::Closed),
        ]
    );
}

#[test]
fn blocked_responder_prevents_capture() {
    let callbacks = HeldCallbacks::default();
    let slot = ResponderSlot::new();
    let scroll_view = slot.claimant();
    assert!(scroll_view.request_capture());

    let session = DrawerSession::builder(DrawerConfig::new(Pin::Bottom))
        .responder(Rc::new(slot.claimant()))
        .build(HeldDriver::new(callbacks.clone()))
        .expect("valid config");
    session.mount();
    callbacks.finish();

    let captured = session.on_pan(PanEvent::Move(panelkit_gesture::GestureSample::vertical(
        60.0, 0.0,
    )));
    assert!(!captured);
    assert_eq!(session.state(), DrawerState::Open);
}
