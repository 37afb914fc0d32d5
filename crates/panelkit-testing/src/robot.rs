//! Robot-style harness for drawer sessions
//!
//! A [`DrawerRobot`] owns one session, the driver behind it and a fake
//! pointer clock. Tests mount, drag, fling, press back and tap the scrim,
//! then read state, channel values and how often `on_close_complete` ran.
//!
//! # Example
//!
//! ```
//! use panelkit_drawer::{DrawerConfig, DrawerState};
//! use panelkit_testing::DrawerRobot;
//!
//! let mut robot = DrawerRobot::immediate(DrawerConfig::default());
//! robot.mount();
//! robot.swipe(0.0, 200.0, 400);
//! assert_eq!(robot.state(), DrawerState::Closed);
//! assert_eq!(robot.close_count(), 1);
//! ```

use crate::drivers::{ImmediateDriver, ManualDriver};
use panelkit_core::{pump_frames, Runtime, FRAME_INTERVAL_NANOS};
use panelkit_drawer::{
    AnimationDriver, BackPressOutcome, ChannelDriver, DrawerConfig, DrawerHandle, DrawerSession,
    DrawerSessionBuilder, DrawerState, OverlayPress,
};
use panelkit_gesture::{EdgeGeometry, GestureResponder, PointerEvent};
use panelkit_ui_graphics::{Point, Size};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Viewport used unless a test picks its own.
pub const DEFAULT_VIEWPORT: Size = Size::new(400.0, 800.0);

/// Moves per drag.
const DRAG_STEPS: i64 = 10;

/// Pause before lifting the finger that zeroes the release velocity.
const SETTLE_PAUSE_MS: i64 = 100;

/// Frames drained before giving up on an animation.
const MAX_SETTLE_FRAMES: usize = 600;

enum RobotDriver {
    Immediate,
    Manual(ManualDriver),
    Frames { runtime: Runtime, frame_time: u64 },
}

pub struct DrawerRobot {
    session: DrawerSession,
    driver: RobotDriver,
    time_ms: i64,
    pointer: Option<Point>,
    origin: Point,
    close_count: Rc<Cell<u32>>,
    transitions: Rc<RefCell<Vec<(DrawerState, DrawerState)>>>,
}

impl DrawerRobot {
    /// Animations complete the moment they start.
    pub fn immediate(config: DrawerConfig) -> Self {
        Self::immediate_with(DrawerSessionBuilder::new(config))
    }

    pub fn immediate_with(builder: DrawerSessionBuilder) -> Self {
        let pin = builder.config().pin;
        Self::build(builder, ImmediateDriver::new(pin, 0.0), RobotDriver::Immediate)
    }

    /// Animations wait for [`DrawerRobot::settle`].
    pub fn manual(config: DrawerConfig) -> Self {
        Self::manual_with(DrawerSessionBuilder::new(config))
    }

    pub fn manual_with(builder: DrawerSessionBuilder) -> Self {
        let driver = ManualDriver::new(builder.config().pin, 0.0);
        let control = driver.clone();
        Self::build(builder, driver, RobotDriver::Manual(control))
    }

    /// Real [`ChannelDriver`] on a manual frame clock.
    pub fn animated(config: DrawerConfig) -> Self {
        Self::animated_with(DrawerSessionBuilder::new(config))
    }

    pub fn animated_with(builder: DrawerSessionBuilder) -> Self {
        let runtime = Runtime::manual();
        let config = builder.config();
        let driver = ChannelDriver::new(
            runtime.handle(),
            EdgeGeometry::from_pin(config.pin),
            0.0,
            config.animation,
        );
        Self::build(
            builder,
            driver,
            RobotDriver::Frames {
                runtime,
                frame_time: 0,
            },
        )
    }

    /// Any `on_close_complete` set on `builder` is replaced by the robot's
    /// counter.
    fn build(
        builder: DrawerSessionBuilder,
        driver: impl AnimationDriver + 'static,
        control: RobotDriver,
    ) -> Self {
        let close_count = Rc::new(Cell::new(0));
        let transitions = Rc::new(RefCell::new(Vec::new()));
        let closes = Rc::clone(&close_count);
        let seen = Rc::clone(&transitions);
        let viewport = builder.viewport_size().unwrap_or(DEFAULT_VIEWPORT);
        let session = builder
            .viewport(viewport)
            .on_close_complete(move || closes.set(closes.get() + 1))
            .on_transition(move |transition| {
                seen.borrow_mut().push((transition.from, transition.to))
            })
            .build(driver)
            .expect("robot drawer config must be valid");
        Self {
            session,
            driver: control,
            time_ms: 0,
            pointer: None,
            origin: Point::new(viewport.width / 2.0, viewport.height / 2.0),
            close_count,
            transitions,
        }
    }

    pub fn session(&self) -> &DrawerSession {
        &self.session
    }

    pub fn handle(&self) -> DrawerHandle {
        self.session.handle()
    }

    /// The fake driver, for robots built with [`DrawerRobot::manual`].
    pub fn manual_driver(&self) -> Option<&ManualDriver> {
        match &self.driver {
            RobotDriver::Manual(driver) => Some(driver),
            _ => None,
        }
    }

    pub fn state(&self) -> DrawerState {
        self.session.state()
    }

    pub fn position(&self) -> f32 {
        self.session.position()
    }

    pub fn opacity(&self) -> f32 {
        self.session.opacity()
    }

    pub fn close_count(&self) -> u32 {
        self.close_count.get()
    }

    pub fn transitions(&self) -> Vec<(DrawerState, DrawerState)> {
        self.transitions.borrow().clone()
    }

    /// Mount and run the enter animation to completion.
    pub fn mount(&mut self) {
        self.session.mount();
        self.settle();
    }

    /// Mount without settling the enter animation.
    pub fn mount_only(&mut self) {
        self.session.mount();
    }

    /// Let whatever is animating finish.
    pub fn settle(&mut self) {
        match &mut self.driver {
            RobotDriver::Immediate => {}
            RobotDriver::Manual(driver) => {
                driver.settle_all();
            }
            RobotDriver::Frames {
                runtime,
                frame_time,
            } => {
                *frame_time = pump_frames(&runtime.handle(), *frame_time, MAX_SETTLE_FRAMES);
            }
        }
    }

    /// Drain `count` frames. Only the frame-clock robot has frames.
    pub fn advance_frames(&mut self, count: usize) {
        if let RobotDriver::Frames {
            runtime,
            frame_time,
        } = &mut self.driver
        {
            let handle = runtime.handle();
            for _ in 0..count {
                *frame_time += FRAME_INTERVAL_NANOS;
                handle.drain_frame_callbacks(*frame_time);
            }
        }
        self.time_ms += (count as u64 * FRAME_INTERVAL_NANOS / 1_000_000) as i64;
    }

    /// Press at the centre of the viewport.
    pub fn press(&mut self) -> PointerEvent {
        let event = PointerEvent::down(self.origin.x, self.origin.y, self.time_ms);
        self.pointer = Some(self.origin);
        self.session.on_pointer_event(&event);
        event
    }

    /// Move the pressed pointer by `(dx, dy)` in even steps over
    /// `duration_ms`, pressing first if needed. Does not release.
    pub fn drag(&mut self, dx: f32, dy: f32, duration_ms: i64) {
        if self.pointer.is_none() {
            self.press();
        }
        let start = self.pointer.unwrap_or(self.origin);
        let step_ms = (duration_ms / DRAG_STEPS).max(1);
        for step in 1..=DRAG_STEPS {
            let t = step as f32 / DRAG_STEPS as f32;
            let position = Point::new(start.x + dx * t, start.y + dy * t);
            self.time_ms += step_ms;
            self.pointer = Some(position);
            self.session
                .on_pointer_event(&PointerEvent::moved(position.x, position.y, self.time_ms));
        }
    }

    /// Lift the pointer right after the last move, keeping its velocity.
    pub fn release(&mut self) -> PointerEvent {
        let position = self.pointer.take().unwrap_or(self.origin);
        let event = PointerEvent::up(position.x, position.y, self.time_ms);
        self.session.on_pointer_event(&event);
        event
    }

    /// Hold still, then lift: zero release velocity.
    pub fn release_after_pause(&mut self) -> PointerEvent {
        self.time_ms += SETTLE_PAUSE_MS;
        self.release()
    }

    pub fn cancel(&mut self) {
        self.pointer = None;
        self.session
            .on_pointer_event(&PointerEvent::cancel(self.time_ms));
    }

    /// Drag, pause and release, then let animations settle.
    pub fn swipe(&mut self, dx: f32, dy: f32, duration_ms: i64) {
        self.drag(dx, dy, duration_ms);
        self.release_after_pause();
        self.settle();
    }

    /// Drag quickly and release mid-motion, then let animations settle.
    pub fn fling(&mut self, dx: f32, dy: f32, duration_ms: i64) {
        self.drag(dx, dy, duration_ms);
        self.release();
        self.settle();
    }

    pub fn press_back(&mut self) -> BackPressOutcome {
        self.session.on_back_pressed()
    }

    pub fn tap_overlay(&mut self) -> OverlayPress {
        self.session.on_overlay_press()
    }

    pub fn handle_close(&mut self) {
        self.session.handle_close();
    }

    /// Swap in a responder, e.g. a slot already held by nested content.
    pub fn with_responder(
        config: DrawerConfig,
        responder: Rc<dyn GestureResponder>,
    ) -> Self {
        Self::immediate_with(DrawerSessionBuilder::new(config).responder(responder))
    }
}
