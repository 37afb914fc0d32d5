//! Gesture interpretation for edge-anchored panels.
//!
//! Raw pointer events go through [`PanTracker`] to become cumulative
//! [`GestureSample`]s; [`GestureInterpreter`] classifies them against the
//! panel's [`EdgeGeometry`], decides capture, damps over-drag and makes the
//! dismiss decision on release.

mod edge;
pub mod gesture_constants;
mod input;
mod interpreter;
mod pan_tracker;
mod responder;
mod velocity_tracker;

pub use edge::{Axis, DragDirection, EdgeGeometry, Pin};
pub use input::{PointerEvent, PointerEventKind, PointerId};
pub use interpreter::{
    DismissalThresholds, GestureClassification, GestureInterpreter, GestureRelease,
    GestureSample, GestureUpdate, OverdragCurve,
};
pub use pan_tracker::{PanEvent, PanTracker};
pub use responder::{AlwaysGrant, GestureResponder, ResponderSlot};
pub use velocity_tracker::VelocityTracker1D;

pub mod prelude {
    pub use crate::edge::{Axis, DragDirection, EdgeGeometry, Pin};
    pub use crate::interpreter::{GestureClassification, GestureInterpreter, GestureSample};
}
