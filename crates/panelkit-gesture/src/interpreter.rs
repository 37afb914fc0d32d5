use crate::edge::{DragDirection, EdgeGeometry};
use crate::gesture_constants::{
    DISMISSAL_DRAG_THRESHOLD, DISMISSAL_VELOCITY_THRESHOLD, MAX_OVER_DRAG, MIN_PAN_DISTANCE,
    OVER_DRAG_SOFTNESS,
};
use crate::responder::GestureResponder;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Cumulative motion since the gesture started.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureSample {
    pub dx: f32,
    pub dy: f32,
    /// Pixels per second.
    pub vx: f32,
    pub vy: f32,
}

impl GestureSample {
    pub fn new(dx: f32, dy: f32, vx: f32, vy: f32) -> Self {
        Self { dx, dy, vx, vy }
    }

    /// Pure vertical motion.
    pub fn vertical(dy: f32, vy: f32) -> Self {
        Self::new(0.0, dy, 0.0, vy)
    }

    /// Pure horizontal motion.
    pub fn horizontal(dx: f32, vx: f32) -> Self {
        Self::new(dx, 0.0, vx, 0.0)
    }
}

/// Per-sample classification against a panel's geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureClassification {
    /// Signed primary-axis travel.
    pub distance: f32,
    /// Signed primary-axis velocity.
    pub velocity: f32,
    /// `None` when there is neither travel nor velocity on the primary axis.
    pub drag_direction: Option<DragDirection>,
    pub is_over_drag: bool,
}

/// Release criteria. Either one is enough when moving in the dismiss
/// direction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DismissalThresholds {
    pub drag_distance: f32,
    pub velocity: f32,
    pub min_pan_distance: f32,
}

impl Default for DismissalThresholds {
    fn default() -> Self {
        Self {
            drag_distance: DISMISSAL_DRAG_THRESHOLD,
            velocity: DISMISSAL_VELOCITY_THRESHOLD,
            min_pan_distance: MIN_PAN_DISTANCE,
        }
    }
}

/// Rubber-band curve for dragging past the open position:
/// `max * tanh(|d| / softness)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverdragCurve {
    pub max: f32,
    pub softness: f32,
}

impl Default for OverdragCurve {
    fn default() -> Self {
        Self {
            max: MAX_OVER_DRAG,
            softness: OVER_DRAG_SOFTNESS,
        }
    }
}

impl OverdragCurve {
    /// Damped magnitude for `distance`; 0 at 0, always strictly below `max`.
    pub fn damp(&self, distance: f32) -> f32 {
        if self.max <= 0.0 || self.softness <= 0.0 || distance.is_nan() {
            return 0.0;
        }
        let damped = self.max * (distance.abs() / self.softness).tanh();
        // tanh rounds to exactly 1.0 for large inputs in f32.
        let ceiling = f32::from_bits(self.max.to_bits() - 1);
        damped.min(ceiling)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureUpdate {
    /// Not captured (yet); the panel must not move.
    Ignored,
    /// This move captured the gesture.
    Captured(GestureClassification),
    /// Captured earlier; keep tracking.
    Moved(GestureClassification),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureRelease {
    pub classification: GestureClassification,
    pub should_dismiss: bool,
}

/// Per-session gesture interpreter.
pub struct GestureInterpreter {
    geometry: EdgeGeometry,
    thresholds: DismissalThresholds,
    overdrag: OverdragCurve,
    dismiss_gestures_enabled: bool,
    responder: Rc<dyn GestureResponder>,
    captured: bool,
}

impl GestureInterpreter {
    pub fn new(
        geometry: EdgeGeometry,
        thresholds: DismissalThresholds,
        overdrag: OverdragCurve,
        responder: Rc<dyn GestureResponder>,
    ) -> Self {
        Self {
            geometry,
            thresholds,
            overdrag,
            dismiss_gestures_enabled: true,
            responder,
            captured: false,
        }
    }

    pub fn with_dismiss_gestures(mut self, enabled: bool) -> Self {
        self.dismiss_gestures_enabled = enabled;
        self
    }

    pub fn geometry(&self) -> &EdgeGeometry {
        &self.geometry
    }

    pub fn overdrag(&self) -> &OverdragCurve {
        &self.overdrag
    }

    pub fn thresholds(&self) -> &DismissalThresholds {
        &self.thresholds
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    pub fn classify(&self, sample: &GestureSample) -> GestureClassification {
        let axis = self.geometry.primary_axis();
        let distance = axis.select(sample.dx, sample.dy);
        let velocity = axis.select(sample.vx, sample.vy);
        let drag_direction = DragDirection::from_signed(axis, distance)
            .or_else(|| DragDirection::from_signed(axis, velocity));
        let is_over_drag = drag_direction
            .map(|direction| !self.geometry.is_trying_to_dismiss(direction))
            .unwrap_or(false);
        GestureClassification {
            distance,
            velocity,
            drag_direction,
            is_over_drag,
        }
    }

    pub fn is_trying_to_dismiss(&self, direction: DragDirection) -> bool {
        self.geometry.is_trying_to_dismiss(direction)
    }

    pub fn should_dismiss(&self, classification: &GestureClassification) -> bool {
        let Some(direction) = classification.drag_direction else {
            return false;
        };
        self.is_trying_to_dismiss(direction)
            && (classification.velocity.abs() >= self.thresholds.velocity
                || classification.distance.abs() >= self.thresholds.drag_distance)
    }

    /// Capture gate without responder arbitration.
    pub fn should_capture(&self, sample: &GestureSample) -> bool {
        let distance = self
            .geometry
            .primary_axis()
            .select(sample.dx, sample.dy);
        self.dismiss_gestures_enabled && distance.abs() > self.thresholds.min_pan_distance
    }

    /// Primary-axis travel to apply to the panel while over-dragging.
    pub fn damped_distance(&self, classification: &GestureClassification) -> f32 {
        if classification.is_over_drag {
            classification.distance.signum() * self.overdrag.damp(classification.distance)
        } else {
            classification.distance
        }
    }

    pub fn on_move(&mut self, sample: &GestureSample) -> GestureUpdate {
        if self.captured {
            let classification = self.classify(sample);
            log::trace!("gesture move {:?}", classification);
            return GestureUpdate::Moved(classification);
        }
        if !self.should_capture(sample) || !self.responder.request_capture() {
            return GestureUpdate::Ignored;
        }
        self.captured = true;
        let classification = self.classify(sample);
        log::debug!(
            "{:?} panel captured gesture {:?}",
            self.geometry.pin(),
            classification.drag_direction
        );
        GestureUpdate::Captured(classification)
    }

    /// Ends the gesture. `None` if it was never captured.
    pub fn on_release(&mut self, sample: &GestureSample) -> Option<GestureRelease> {
        if !self.end_gesture() {
            return None;
        }
        let classification = self.classify(sample);
        let should_dismiss = self.should_dismiss(&classification);
        log::debug!(
            "gesture released at {:.1}px {:.1}px/s, dismiss: {}",
            classification.distance,
            classification.velocity,
            should_dismiss
        );
        Some(GestureRelease {
            classification,
            should_dismiss,
        })
    }

    /// Returns whether a captured gesture was cancelled.
    pub fn on_cancel(&mut self) -> bool {
        self.end_gesture()
    }

    fn end_gesture(&mut self) -> bool {
        if !self.captured {
            return false;
        }
        self.captured = false;
        self.responder.release();
        true
    }
}

#[cfg(test)]
#[path = "tests/interpreter_tests.rs"]
mod tests;
