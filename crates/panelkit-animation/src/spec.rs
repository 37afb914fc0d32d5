//! How a value moves toward its target, and how the move ended.

use crate::easing::Easing;
use serde::{Deserialize, Serialize};

/// Fixed-duration eased move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSpec {
    pub duration_millis: u64,
    pub easing: Easing,
    pub delay_millis: u64,
}

impl AnimationSpec {
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::Linear)
    }

    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }

    fn delay_nanos(&self) -> u64 {
        self.delay_millis * 1_000_000
    }

    fn duration_nanos(&self) -> u64 {
        (self.duration_millis * 1_000_000).max(1)
    }

    /// Eased progress `elapsed_nanos` after the move was first sampled, or
    /// `None` while still inside the delay. Returns linear progress too, so
    /// callers can tell when the tween has run out.
    pub(crate) fn progress_at(&self, elapsed_nanos: u64) -> Option<(f32, f32)> {
        let running = elapsed_nanos.checked_sub(self.delay_nanos())?;
        let linear = (running as f32 / self.duration_nanos() as f32).clamp(0.0, 1.0);
        Some((linear, self.easing.transform(linear)))
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(300, Easing::FastOutSlowIn)
    }
}

/// Damped spring, integrated in progress space where the target is 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringSpec {
    /// 1.0 is critically damped; lower bounces.
    pub damping_ratio: f32,
    pub stiffness: f32,
    /// Progress per second below which the spring counts as at rest.
    pub velocity_threshold: f32,
    /// Distance to the target, in value units, below which it may settle.
    pub position_threshold: f32,
}

impl SpringSpec {
    pub fn stiff() -> Self {
        Self {
            stiffness: 3000.0,
            ..Self::default()
        }
    }

    pub(crate) fn damping(&self) -> f32 {
        2.0 * self.damping_ratio * self.stiffness.sqrt()
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self {
            damping_ratio: 1.0,
            stiffness: 1500.0,
            velocity_threshold: 0.01,
            position_threshold: 0.001,
        }
    }
}

/// Serialised with a `type` tag: `{"type": "spring", "stiffness": 800}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum AnimationType {
    Tween(AnimationSpec),
    Spring(SpringSpec),
}

impl Default for AnimationType {
    fn default() -> Self {
        AnimationType::Tween(AnimationSpec::default())
    }
}

/// Outcome reported to an animation's completion callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationResult {
    /// `false` when the animation was superseded, snapped or dropped before
    /// reaching its target.
    pub finished: bool,
}

impl AnimationResult {
    pub const FINISHED: AnimationResult = AnimationResult { finished: true };
    pub const INTERRUPTED: AnimationResult = AnimationResult { finished: false };
}

pub type OnAnimationEnd = Box<dyn FnOnce(AnimationResult) + 'static>;
