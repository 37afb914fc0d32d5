//! Position and opacity channels.
//!
//! The position channel is a signed offset along the primary axis: 0 is the
//! open rest position, `dismiss_sign * extent` is fully off-screen. Opacity
//! runs from 0 (hidden) to 1.

use crate::config::DrawerAnimationConfig;
use panelkit_animation::{parallel, Animatable, Interpolation, OnAnimationEnd};
use panelkit_core::{RuntimeHandle, State};
use panelkit_gesture::{EdgeGeometry, GestureClassification, OverdragCurve};

/// Channel values for one gesture frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChannelFrame {
    pub position: f32,
    pub opacity: f32,
}

impl ChannelFrame {
    pub const OPEN: ChannelFrame = ChannelFrame {
        position: 0.0,
        opacity: 1.0,
    };

    pub fn closed(geometry: &EdgeGeometry, extent: f32) -> Self {
        Self {
            position: geometry.resting_offset(extent),
            opacity: 0.0,
        }
    }

    /// Map a classified pan onto the channels.
    ///
    /// Travel toward the dismiss edge moves the panel 1:1 up to `extent` and
    /// fades the scrim proportionally. Travel the other way is damped by the
    /// overdrag curve and leaves opacity at 1.
    pub fn from_gesture(
        geometry: &EdgeGeometry,
        overdrag: &OverdragCurve,
        classification: &GestureClassification,
        extent: f32,
    ) -> Self {
        let sign = geometry.dismiss_sign();
        if classification.is_over_drag {
            return Self {
                position: -sign * overdrag.damp(classification.distance),
                opacity: 1.0,
            };
        }
        let extent = extent.max(0.0);
        let travel = (classification.distance * sign).max(0.0);
        let progress = Interpolation::new([0.0, extent], [0.0, 1.0]).map(travel);
        Self {
            position: sign * travel.min(extent),
            opacity: 1.0 - progress,
        }
    }
}

/// Animates the two channels of one drawer.
///
/// Each animated request reports once through its `on_settled` with the
/// joint outcome of both channels. A newer request supersedes the running
/// one, whose callback then sees `finished: false`.
pub trait AnimationDriver {
    /// Position to 0, opacity to 1.
    fn animate_in(&mut self, on_settled: OnAnimationEnd);

    /// Position to the resting offset, opacity to 0.
    fn animate_out(&mut self, on_settled: OnAnimationEnd);

    /// Back to the open rest position from wherever the channels are.
    fn snap_back(&mut self, on_settled: OnAnimationEnd);

    /// Assign both channels directly, superseding anything running.
    fn follow_gesture(&mut self, frame: ChannelFrame);

    /// Panel size on the primary axis changed.
    fn set_extent(&mut self, extent: f32);

    /// Panel size on the primary axis the channels are laid out against.
    fn extent(&self) -> f32;

    fn position(&self) -> f32;

    fn opacity(&self) -> f32;

    /// Observable opacity, for the scrim.
    fn opacity_state(&self) -> State<f32>;

    /// Observable position, for the host's transform.
    fn position_state(&self) -> State<f32>;
}

/// Frame-clock driver built on two [`Animatable`]s.
pub struct ChannelDriver {
    geometry: EdgeGeometry,
    extent: f32,
    animation: DrawerAnimationConfig,
    position: Animatable,
    opacity: Animatable,
}

impl ChannelDriver {
    /// Starts fully off-screen.
    pub fn new(
        runtime: RuntimeHandle,
        geometry: EdgeGeometry,
        extent: f32,
        animation: DrawerAnimationConfig,
    ) -> Self {
        let closed = ChannelFrame::closed(&geometry, extent);
        Self {
            geometry,
            extent,
            animation,
            position: Animatable::with_label(closed.position, runtime.clone(), "drawer.position"),
            opacity: Animatable::with_label(closed.opacity, runtime, "drawer.opacity"),
        }
    }

    pub fn is_running(&self) -> bool {
        self.position.is_running() || self.opacity.is_running()
    }
}

impl AnimationDriver for ChannelDriver {
    fn animate_in(&mut self, on_settled: OnAnimationEnd) {
        let [position, opacity] = parallel::<2>(on_settled);
        self.position
            .animate_to_then(0.0, self.animation.enter, position);
        self.opacity
            .animate_to_then(1.0, self.animation.enter, opacity);
    }

    fn animate_out(&mut self, on_settled: OnAnimationEnd) {
        let closed = ChannelFrame::closed(&self.geometry, self.extent);
        let [position, opacity] = parallel::<2>(on_settled);
        self.position
            .animate_to_then(closed.position, self.animation.exit, position);
        self.opacity
            .animate_to_then(closed.opacity, self.animation.exit, opacity);
    }

    fn snap_back(&mut self, on_settled: OnAnimationEnd) {
        let [position, opacity] = parallel::<2>(on_settled);
        self.position
            .animate_to_then(0.0, self.animation.snap_back, position);
        self.opacity
            .animate_to_then(1.0, self.animation.snap_back, opacity);
    }

    fn follow_gesture(&mut self, frame: ChannelFrame) {
        self.position.snap_to(frame.position);
        self.opacity.snap_to(frame.opacity);
    }

    fn set_extent(&mut self, extent: f32) {
        let previous = ChannelFrame::closed(&self.geometry, self.extent);
        self.extent = extent;
        // Keep a hidden panel parked just off the new edge.
        if !self.is_running() && self.position.value() == previous.position {
            self.position
                .snap_to(self.geometry.resting_offset(extent));
        }
    }

    fn extent(&self) -> f32 {
        self.extent
    }

    fn position(&self) -> f32 {
        self.position.value()
    }

    fn opacity(&self) -> f32 {
        self.opacity.value()
    }

    fn opacity_state(&self) -> State<f32> {
        self.opacity.state()
    }

    fn position_state(&self) -> State<f32> {
        self.position.state()
    }
}

#[cfg(test)]
#[path = "tests/driver_tests.rs"]
mod tests;
