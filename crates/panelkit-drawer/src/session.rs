//! One mount of a drawer.
//!
//! The session owns the state machine, the animation driver and the gesture
//! interpreter, and runs effects. Driver callbacks can arrive while an
//! effect is still executing (a fake driver settling synchronously, or a
//! superseded animation reporting `finished: false`), so every event goes
//! through a mailbox that is drained by the outermost dispatch only.

use crate::back_handler::{BackPressOutcome, Platform};
use crate::config::{ConfigError, DrawerConfig};
use crate::driver::{AnimationDriver, ChannelFrame};
use crate::machine::{
    AnimationKind, CloseSource, DrawerEffect, DrawerEvent, DrawerMachine, DrawerState, Transition,
};
use crate::overlay::{Overlay, OverlayPress};
use crate::spacing::{PanelMetrics, SpacingConfig};
use panelkit_animation::{AnimationResult, OnAnimationEnd};
use panelkit_core::State;
use panelkit_gesture::{
    AlwaysGrant, EdgeGeometry, GestureClassification, GestureInterpreter, GestureResponder,
    GestureUpdate, PanEvent, PanTracker, PointerEvent,
};
use panelkit_ui_graphics::Size;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

type CloseCallback = Box<dyn FnOnce()>;
type TransitionObserver = Box<dyn FnMut(&Transition)>;

pub struct DrawerSessionBuilder {
    config: DrawerConfig,
    spacing: SpacingConfig,
    platform: Platform,
    viewport: Option<Size>,
    responder: Rc<dyn GestureResponder>,
    on_close_complete: Option<CloseCallback>,
    observers: Vec<TransitionObserver>,
}

impl DrawerSessionBuilder {
    pub fn new(config: DrawerConfig) -> Self {
        Self {
            config,
            spacing: SpacingConfig::default(),
            platform: Platform::current(),
            viewport: None,
            responder: Rc::new(AlwaysGrant),
            on_close_complete: None,
            observers: Vec::new(),
        }
    }

    pub fn config(&self) -> &DrawerConfig {
        &self.config
    }

    pub fn viewport_size(&self) -> Option<Size> {
        self.viewport
    }

    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn spacing(mut self, spacing: SpacingConfig) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn viewport(mut self, viewport: Size) -> Self {
        self.viewport = Some(viewport);
        self
    }

    pub fn responder(mut self, responder: Rc<dyn GestureResponder>) -> Self {
        self.responder = responder;
        self
    }

    /// Called once, after the exit animation has fully settled.
    pub fn on_close_complete(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_close_complete = Some(Box::new(callback));
        self
    }

    /// Observe every state change.
    pub fn on_transition(mut self, observer: impl FnMut(&Transition) + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    pub fn build(self, driver: impl AnimationDriver + 'static) -> Result<DrawerSession, ConfigError> {
        self.config.validate()?;

        let geometry = EdgeGeometry::from_pin(self.config.pin);
        let metrics = PanelMetrics::new(
            self.viewport.unwrap_or(Size::ZERO),
            &self.config,
            &self.spacing,
        );
        let mut driver: Box<dyn AnimationDriver> = Box::new(driver);
        if self.viewport.is_some() {
            driver.set_extent(metrics.extent);
        }
        let interpreter = GestureInterpreter::new(
            geometry,
            self.config.thresholds,
            self.config.overdrag,
            self.responder,
        )
        .with_dismiss_gestures(self.config.dismiss_gestures_enabled());

        let shared = Rc::new(SessionShared {
            machine: RefCell::new(DrawerMachine::new(self.config.close_policy(self.platform))),
            geometry,
            spacing: self.spacing,
            metrics: Cell::new(metrics),
            driver: RefCell::new(driver),
            interpreter: RefCell::new(interpreter),
            pan: RefCell::new(PanTracker::new()),
            mailbox: RefCell::new(VecDeque::new()),
            draining: Cell::new(false),
            on_close_complete: RefCell::new(self.on_close_complete),
            observers: RefCell::new(self.observers),
            config: self.config,
        });
        Ok(DrawerSession { shared })
    }
}

struct SessionShared {
    config: DrawerConfig,
    geometry: EdgeGeometry,
    spacing: SpacingConfig,
    metrics: Cell<PanelMetrics>,
    machine: RefCell<DrawerMachine>,
    driver: RefCell<Box<dyn AnimationDriver>>,
    interpreter: RefCell<GestureInterpreter>,
    pan: RefCell<PanTracker>,
    mailbox: RefCell<VecDeque<DrawerEvent>>,
    draining: Cell<bool>,
    on_close_complete: RefCell<Option<CloseCallback>>,
    observers: RefCell<Vec<TransitionObserver>>,
}

impl SessionShared {
    fn state(&self) -> DrawerState {
        self.machine.borrow().state()
    }

    fn dispatch(self: &Rc<Self>, event: DrawerEvent) {
        self.mailbox.borrow_mut().push_back(event);
        if self.draining.replace(true) {
            return;
        }
        loop {
            let next = self.mailbox.borrow_mut().pop_front();
            let Some(event) = next else {
                break;
            };
            let transition = self.machine.borrow_mut().handle(event);
            if transition.is_noop() {
                continue;
            }
            if transition.changed() {
                log::debug!(
                    "{:?} drawer {:?} -> {:?} on {:?}",
                    self.geometry.pin(),
                    transition.from,
                    transition.to,
                    event
                );
            }
            for effect in &transition.effects {
                self.run_effect(*effect);
            }
            if transition.changed() {
                for observer in self.observers.borrow_mut().iter_mut() {
                    observer(&transition);
                }
            }
        }
        self.draining.set(false);
    }

    fn run_effect(self: &Rc<Self>, effect: DrawerEffect) {
        match effect {
            DrawerEffect::AnimateIn => {
                let on_settled = self.settle_callback(AnimationKind::Enter);
                self.driver.borrow_mut().animate_in(on_settled);
            }
            DrawerEffect::AnimateOut => {
                let on_settled = self.settle_callback(AnimationKind::Exit);
                self.driver.borrow_mut().animate_out(on_settled);
            }
            DrawerEffect::SnapBack => {
                let on_settled = self.settle_callback(AnimationKind::SnapBack);
                self.driver.borrow_mut().snap_back(on_settled);
            }
            DrawerEffect::FollowGesture(frame) => {
                log::trace!("follow gesture {:?}", frame);
                self.driver.borrow_mut().follow_gesture(frame);
            }
            DrawerEffect::ReleaseGesture => {
                self.interpreter.borrow_mut().on_cancel();
            }
            DrawerEffect::NotifyCloseComplete => {
                let callback = self.on_close_complete.borrow_mut().take();
                match callback {
                    Some(callback) => callback(),
                    None => log::warn!(
                        "{:?} drawer closed without an on_close_complete callback",
                        self.geometry.pin()
                    ),
                }
            }
        }
    }

    fn settle_callback(self: &Rc<Self>, kind: AnimationKind) -> OnAnimationEnd {
        let weak = Rc::downgrade(self);
        Box::new(move |result: AnimationResult| {
            if let Some(shared) = weak.upgrade() {
                shared.dispatch(DrawerEvent::AnimationSettled { kind, result });
            }
        })
    }

    fn frame_for(&self, classification: &GestureClassification) -> ChannelFrame {
        let extent = self.driver.borrow().extent();
        let interpreter = self.interpreter.borrow();
        ChannelFrame::from_gesture(
            interpreter.geometry(),
            interpreter.overdrag(),
            classification,
            extent,
        )
    }

    fn on_pan(self: &Rc<Self>, event: PanEvent) -> bool {
        match event {
            PanEvent::Start => false,
            PanEvent::Move(sample) => {
                if !matches!(self.state(), DrawerState::Open | DrawerState::Dragging) {
                    return false;
                }
                let update = self.interpreter.borrow_mut().on_move(&sample);
                match update {
                    GestureUpdate::Ignored => false,
                    GestureUpdate::Captured(classification) => {
                        self.dispatch(DrawerEvent::GestureCaptured);
                        let frame = self.frame_for(&classification);
                        self.dispatch(DrawerEvent::GestureMoved(frame));
                        true
                    }
                    GestureUpdate::Moved(classification) => {
                        let frame = self.frame_for(&classification);
                        self.dispatch(DrawerEvent::GestureMoved(frame));
                        true
                    }
                }
            }
            PanEvent::Release(sample) => {
                let release = self.interpreter.borrow_mut().on_release(&sample);
                match release {
                    Some(release) => {
                        self.dispatch(DrawerEvent::GestureReleased {
                            should_dismiss: release.should_dismiss,
                        });
                        true
                    }
                    None => false,
                }
            }
            PanEvent::Cancel => {
                let cancelled = self.interpreter.borrow_mut().on_cancel();
                if cancelled {
                    self.dispatch(DrawerEvent::GestureCancelled);
                }
                cancelled
            }
        }
    }

    fn back_pressed(self: &Rc<Self>) -> BackPressOutcome {
        if self.state() == DrawerState::Closed {
            return BackPressOutcome::Ignored;
        }
        let policy = self.machine.borrow().policy();
        if policy.allows(CloseSource::HardwareBack) {
            self.dispatch(DrawerEvent::CloseRequested(CloseSource::HardwareBack));
        } else {
            log::debug!("hardware back blocked by drawer config");
        }
        BackPressOutcome::Consumed
    }
}

/// A mounted drawer.
///
/// Dropping the session drops its driver; any animation still in flight is
/// interrupted and reports nowhere.
pub struct DrawerSession {
    shared: Rc<SessionShared>,
}

impl DrawerSession {
    pub fn builder(config: DrawerConfig) -> DrawerSessionBuilder {
        DrawerSessionBuilder::new(config)
    }

    pub fn new(
        config: DrawerConfig,
        driver: impl AnimationDriver + 'static,
    ) -> Result<Self, ConfigError> {
        DrawerSessionBuilder::new(config).build(driver)
    }

    /// Start the enter animation. A session mounts at most once.
    pub fn mount(&self) {
        if self.shared.machine.borrow().is_spent() {
            log::warn!("drawer session already closed; mount a new session instead");
            return;
        }
        self.shared.dispatch(DrawerEvent::Mount);
    }

    pub fn can_mount(&self) -> bool {
        self.shared.machine.borrow().can_mount()
    }

    pub fn handle(&self) -> DrawerHandle {
        DrawerHandle {
            shared: Rc::downgrade(&self.shared),
        }
    }

    pub fn handle_close(&self) {
        self.request_close(CloseSource::Imperative);
    }

    pub fn request_close(&self, source: CloseSource) {
        self.shared.dispatch(DrawerEvent::CloseRequested(source));
    }

    /// Feed a raw pointer event. Consumes it while a drag is captured.
    pub fn on_pointer_event(&self, event: &PointerEvent) {
        let pan = self.shared.pan.borrow_mut().handle(event);
        if let Some(pan) = pan {
            if self.shared.on_pan(pan) {
                event.consume();
            }
        }
    }

    /// Feed an already-tracked pan. Returns whether the drawer used it.
    pub fn on_pan(&self, event: PanEvent) -> bool {
        self.shared.on_pan(event)
    }

    pub fn on_back_pressed(&self) -> BackPressOutcome {
        self.shared.back_pressed()
    }

    pub fn on_overlay_press(&self) -> OverlayPress {
        let press = self.overlay().press();
        if press == OverlayPress::RequestClose {
            self.request_close(CloseSource::Overlay);
        }
        press
    }

    pub fn overlay(&self) -> Overlay {
        Overlay::new(
            self.shared.driver.borrow().opacity_state(),
            self.shared.config.scrim_color,
            self.shared.config.prevent_dismiss_gestures,
        )
    }

    pub fn set_viewport(&self, viewport: Size) {
        let metrics = PanelMetrics::new(viewport, &self.shared.config, &self.shared.spacing);
        self.shared.metrics.set(metrics);
        self.shared.driver.borrow_mut().set_extent(metrics.extent);
    }

    /// Layout for the last viewport; all zero until one is known.
    pub fn metrics(&self) -> PanelMetrics {
        self.shared.metrics.get()
    }

    pub fn state(&self) -> DrawerState {
        self.shared.state()
    }

    pub fn is_mounted(&self) -> bool {
        self.shared.machine.borrow().is_mounted()
    }

    pub fn is_dragging(&self) -> bool {
        self.state() == DrawerState::Dragging
    }

    pub fn position(&self) -> f32 {
        self.shared.driver.borrow().position()
    }

    pub fn opacity(&self) -> f32 {
        self.shared.driver.borrow().opacity()
    }

    pub fn position_state(&self) -> State<f32> {
        self.shared.driver.borrow().position_state()
    }

    /// Panel translation `(x, y)` for the current position.
    pub fn translation(&self) -> (f32, f32) {
        self.shared.geometry.translation(self.position())
    }

    pub fn geometry(&self) -> &EdgeGeometry {
        &self.shared.geometry
    }

    pub fn config(&self) -> &DrawerConfig {
        &self.shared.config
    }
}

/// Weak reference handed to content for closing the drawer.
#[derive(Clone)]
pub struct DrawerHandle {
    shared: Weak<SessionShared>,
}

impl DrawerHandle {
    /// A handle bound to nothing.
    pub fn detached() -> Self {
        Self { shared: Weak::new() }
    }

    /// Animate out and then report close completion. Repeated calls are
    /// ignored; calls after the session is gone do nothing.
    pub fn handle_close(&self) {
        self.request_close(CloseSource::Imperative);
    }

    pub fn request_close(&self, source: CloseSource) {
        if let Some(shared) = self.shared.upgrade() {
            shared.dispatch(DrawerEvent::CloseRequested(source));
        }
    }

    pub fn back_pressed(&self) -> BackPressOutcome {
        match self.shared.upgrade() {
            Some(shared) => shared.back_pressed(),
            None => BackPressOutcome::Ignored,
        }
    }

    pub fn state(&self) -> Option<DrawerState> {
        self.shared.upgrade().map(|shared| shared.state())
    }

    pub fn is_alive(&self) -> bool {
        self.shared.strong_count() > 0
    }

    /// Alive and not closed.
    pub fn is_showing(&self) -> bool {
        matches!(self.state(), Some(state) if state != DrawerState::Closed)
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
