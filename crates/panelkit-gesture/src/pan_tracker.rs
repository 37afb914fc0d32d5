use crate::gesture_constants::MAX_FLING_VELOCITY;
use crate::input::{PointerEvent, PointerEventKind, PointerId};
use crate::interpreter::GestureSample;
use crate::velocity_tracker::VelocityTracker1D;
use panelkit_ui_graphics::Point;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanEvent {
    Start,
    Move(GestureSample),
    Release(GestureSample),
    Cancel,
}

struct ActivePan {
    pointer: PointerId,
    origin: Point,
    last: GestureSample,
}

/// Turns raw pointer events into cumulative [`GestureSample`]s.
///
/// Tracks a single pointer; events from other pointers are ignored until the
/// tracked one lifts.
pub struct PanTracker {
    active: Option<ActivePan>,
    x: VelocityTracker1D,
    y: VelocityTracker1D,
    max_velocity: f32,
}

impl Default for PanTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PanTracker {
    pub fn new() -> Self {
        Self::with_max_velocity(MAX_FLING_VELOCITY)
    }

    pub fn with_max_velocity(max_velocity: f32) -> Self {
        Self {
            active: None,
            x: VelocityTracker1D::new(),
            y: VelocityTracker1D::new(),
            max_velocity,
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.active.is_some()
    }

    pub fn handle(&mut self, event: &PointerEvent) -> Option<PanEvent> {
        match event.kind {
            PointerEventKind::Down => {
                if self.active.is_some() {
                    return None;
                }
                self.x.reset();
                self.y.reset();
                self.x.add_sample(event.time_ms, event.position.x);
                self.y.add_sample(event.time_ms, event.position.y);
                self.active = Some(ActivePan {
                    pointer: event.id,
                    origin: event.position,
                    last: GestureSample::default(),
                });
                Some(PanEvent::Start)
            }
            PointerEventKind::Move => {
                let sample = self.track(event)?;
                Some(PanEvent::Move(sample))
            }
            PointerEventKind::Up => {
                let sample = self.track(event)?;
                self.active = None;
                Some(PanEvent::Release(sample))
            }
            PointerEventKind::Cancel => {
                self.active.take()?;
                Some(PanEvent::Cancel)
            }
        }
    }

    fn track(&mut self, event: &PointerEvent) -> Option<GestureSample> {
        let active = self.active.as_mut().filter(|pan| pan.pointer == event.id)?;
        self.x.add_sample(event.time_ms, event.position.x);
        self.y.add_sample(event.time_ms, event.position.y);
        active.last = GestureSample {
            dx: event.position.x - active.origin.x,
            dy: event.position.y - active.origin.y,
            vx: self.x.velocity_capped(self.max_velocity),
            vy: self.y.velocity_capped(self.max_velocity),
        };
        Some(active.last)
    }
}

#[cfg(test)]
#[path = "tests/pan_tracker_tests.rs"]
mod tests;
