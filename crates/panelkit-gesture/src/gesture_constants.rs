//! Shared gesture constants.
//!
//! Distances are logical pixels, velocities logical pixels per second.

/// Touch slop: travel before a press turns into a drag.
///
/// 8.0 matches common platform conventions (Android's TOUCH_SLOP is ~8dp).
pub const DRAG_THRESHOLD: f32 = 8.0;

/// Maximum fling velocity reported by the velocity trackers.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Primary-axis travel a move must exceed before a panel captures it.
pub const MIN_PAN_DISTANCE: f32 = DRAG_THRESHOLD;

/// Travel in the dismiss direction that dismisses on release.
pub const DISMISSAL_DRAG_THRESHOLD: f32 = 150.0;

/// Release velocity in the dismiss direction that dismisses regardless of
/// travel.
pub const DISMISSAL_VELOCITY_THRESHOLD: f32 = 500.0;

/// Upper bound of the rubber-band offset when dragging past the open
/// position.
pub const MAX_OVER_DRAG: f32 = 20.0;

/// Travel over which the rubber band reaches ~76% of [`MAX_OVER_DRAG`].
pub const OVER_DRAG_SOFTNESS: f32 = 100.0;
