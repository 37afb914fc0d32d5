use clap::ValueEnum;
use panelkit_core::{pump_frames, Runtime, RuntimeHandle, FRAME_INTERVAL_NANOS};
use panelkit_drawer::{
    ChannelDriver, DrawerConfig, DrawerSession, DrawerState, EdgeGeometry, Pin, TraySession,
    Visibility,
};
use panelkit_gesture::{Axis, PointerEvent};
use panelkit_ui_graphics::{Point, Size};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

const VIEWPORT: Size = Size::new(390.0, 844.0);
const MAX_FRAMES: usize = 600;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// Mount, settle, close imperatively
    OpenClose,
    /// Slow 50px pan toward the edge, released
    SnapBack,
    /// Slow pan past the distance threshold
    SwipeDismiss,
    /// Short fast flick toward the edge
    Fling,
    /// Pan away from the edge, damped
    Overdrag,
    /// Hardware back press while open
    HardwareBack,
    /// Tap on the scrim while open
    ScrimTap,
    /// Titled tray with sticky footer budget
    Tray,
}

impl Scenario {
    pub const ALL: [Scenario; 8] = [
        Scenario::OpenClose,
        Scenario::SnapBack,
        Scenario::SwipeDismiss,
        Scenario::Fling,
        Scenario::Overdrag,
        Scenario::HardwareBack,
        Scenario::ScrimTap,
        Scenario::Tray,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Scenario::OpenClose => "open-close",
            Scenario::SnapBack => "snap-back",
            Scenario::SwipeDismiss => "swipe-dismiss",
            Scenario::Fling => "fling",
            Scenario::Overdrag => "overdrag",
            Scenario::HardwareBack => "hardware-back",
            Scenario::ScrimTap => "scrim-tap",
            Scenario::Tray => "tray",
        }
    }

    pub fn run(self, config: &DrawerConfig) -> anyhow::Result<Report> {
        match self {
            Scenario::Tray => run_tray(config),
            _ => self.run_drawer(config),
        }
    }

    fn run_drawer(self, config: &DrawerConfig) -> anyhow::Result<Report> {
        let mut stage = Stage::new(config)?;
        stage.session.mount();
        stage.settle();

        let geometry = *stage.session.geometry();
        let toward = geometry.dismiss_sign();
        match self {
            Scenario::OpenClose => stage.session.handle().handle_close(),
            Scenario::SnapBack => stage.pan(&geometry, toward * 50.0, 1_000, true),
            Scenario::SwipeDismiss => stage.pan(&geometry, toward * 220.0, 1_000, true),
            Scenario::Fling => stage.pan(&geometry, toward * 30.0, 25, false),
            Scenario::Overdrag => {
                stage.pan_without_release(&geometry, -toward * 400.0, 800);
                log::info!(
                    "overdrag holds position {:.2} at opacity {:.2}",
                    stage.session.position(),
                    stage.session.opacity()
                );
                stage.release(true);
            }
            Scenario::HardwareBack => {
                let outcome = stage.session.on_back_pressed();
                log::info!("back press {:?}", outcome);
            }
            Scenario::ScrimTap => {
                let press = stage.session.on_overlay_press();
                log::info!("scrim tap {:?}", press);
            }
            Scenario::Tray => {}
        }
        stage.settle();
        Ok(stage.report())
    }
}

pub struct Report {
    state: DrawerState,
    position: f32,
    opacity: f32,
    closes: u32,
    frames: usize,
    transitions: Vec<(DrawerState, DrawerState)>,
    note: Option<String>,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} position={:.1} opacity={:.2} closes={} frames={}",
            self.state, self.position, self.opacity, self.closes, self.frames
        )?;
        let path: Vec<String> = self
            .transitions
            .iter()
            .map(|(_, to)| format!("{:?}", to))
            .collect();
        if !path.is_empty() {
            write!(f, " [{}]", path.join(" > "))?;
        }
        if let Some(note) = &self.note {
            write!(f, " {}", note)?;
        }
        Ok(())
    }
}

struct Stage {
    runtime: Runtime,
    session: DrawerSession,
    frame_time: u64,
    frames: usize,
    time_ms: i64,
    pointer: Point,
    closes: Rc<Cell<u32>>,
    transitions: Rc<RefCell<Vec<(DrawerState, DrawerState)>>>,
}

impl Stage {
    fn new(config: &DrawerConfig) -> anyhow::Result<Self> {
        let runtime = Runtime::manual();
        let driver = ChannelDriver::new(
            runtime.handle(),
            EdgeGeometry::from_pin(config.pin),
            0.0,
            config.animation,
        );
        let closes = Rc::new(Cell::new(0));
        let transitions = Rc::new(RefCell::new(Vec::new()));
        let on_close = Rc::clone(&closes);
        let seen = Rc::clone(&transitions);
        let session = DrawerSession::builder(config.clone())
            .viewport(VIEWPORT)
            .on_close_complete(move || {
                log::info!("on_close_complete");
                on_close.set(on_close.get() + 1);
            })
            .on_transition(move |transition| {
                log::info!("{:?} -> {:?}", transition.from, transition.to);
                seen.borrow_mut().push((transition.from, transition.to));
            })
            .build(driver)?;
        Ok(Self {
            runtime,
            session,
            frame_time: 0,
            frames: 0,
            time_ms: 0,
            pointer: Point::new(VIEWPORT.width / 2.0, VIEWPORT.height / 2.0),
            closes,
            transitions,
        })
    }

    fn settle(&mut self) {
        let (frame_time, frames) = settle(&self.runtime.handle(), self.frame_time);
        self.frame_time = frame_time;
        self.frames += frames;
        self.time_ms += (frames as u64 * FRAME_INTERVAL_NANOS / 1_000_000) as i64;
        log::debug!(
            "settled after {} frames at position {:.1} opacity {:.2}",
            frames,
            self.session.position(),
            self.session.opacity()
        );
    }

    fn pan_without_release(&mut self, geometry: &EdgeGeometry, distance: f32, duration_ms: i64) {
        let origin = self.pointer;
        self.session
            .on_pointer_event(&PointerEvent::down(origin.x, origin.y, self.time_ms));
        let steps = 10;
        let step_ms = (duration_ms / steps).max(1);
        for step in 1..=steps {
            let travel = distance * step as f32 / steps as f32;
            let (dx, dy) = match geometry.primary_axis() {
                Axis::Horizontal => (travel, 0.0),
                Axis::Vertical => (0.0, travel),
            };
            self.time_ms += step_ms;
            self.pointer = Point::new(origin.x + dx, origin.y + dy);
            self.session.on_pointer_event(&PointerEvent::moved(
                self.pointer.x,
                self.pointer.y,
                self.time_ms,
            ));
        }
    }

    fn release(&mut self, pause: bool) {
        if pause {
            self.time_ms += 100;
        }
        self.session
            .on_pointer_event(&PointerEvent::up(self.pointer.x, self.pointer.y, self.time_ms));
    }

    fn pan(&mut self, geometry: &EdgeGeometry, distance: f32, duration_ms: i64, pause: bool) {
        self.pan_without_release(geometry, distance, duration_ms);
        self.release(pause);
    }

    fn report(&self) -> Report {
        let transitions = self.transitions.borrow().clone();
        Report {
            state: self.session.state(),
            position: self.session.position(),
            opacity: self.session.opacity(),
            closes: self.closes.get(),
            frames: self.frames,
            transitions,
            note: None,
        }
    }
}

/// Pump frames until the runtime goes idle. Returns the last frame time and
/// how many frames ran.
fn settle(runtime: &RuntimeHandle, start_nanos: u64) -> (u64, usize) {
    let end = pump_frames(runtime, start_nanos, MAX_FRAMES);
    (end, ((end - start_nanos) / FRAME_INTERVAL_NANOS) as usize)
}

fn run_tray(config: &DrawerConfig) -> anyhow::Result<Report> {
    let runtime = Runtime::manual();
    let handle = runtime.handle();
    let tray_config = config.clone().with_pin(Pin::Bottom);
    let driver = ChannelDriver::new(
        handle.clone(),
        EdgeGeometry::from_pin(tray_config.pin),
        0.0,
        tray_config.animation,
    );
    let closes = Rc::new(Cell::new(0));
    let transitions = Rc::new(RefCell::new(Vec::new()));
    let on_close = Rc::clone(&closes);
    let seen = Rc::clone(&transitions);
    let tray = TraySession::builder(tray_config)
        .title("Choose an asset")
        .viewport(VIEWPORT)
        .on_visibility_change(|visibility: Visibility| log::info!("tray {:?}", visibility))
        .on_close_complete(move || on_close.set(on_close.get() + 1))
        .on_transition(move |transition| seen.borrow_mut().push((transition.from, transition.to)))
        .build(driver)?;

    tray.mount();
    tray.on_title_layout(56.0);
    let footer = tray.sticky_footer_context();

    let (frame_time, opened) = settle(&handle, 0);
    tray.handle_close();
    let (_, closed) = settle(&handle, frame_time);

    let drawer = tray.drawer();
    let transitions = transitions.borrow().clone();
    Ok(Report {
        state: drawer.state(),
        position: drawer.position(),
        opacity: drawer.opacity(),
        closes: closes.get(),
        frames: opened + closed,
        transitions,
        note: Some(format!("max_footer_height={:.1}", footer.max_footer_height())),
    })
}

#[cfg(test)]
#[path = "tests/scenarios_tests.rs"]
mod tests;
