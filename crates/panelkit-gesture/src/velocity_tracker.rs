//! Release velocity estimation for pan gestures.
//!
//! Impulse strategy: treat each pair of samples as a kick that changes the
//! kinetic energy of a unit mass, then convert the accumulated energy back to
//! a velocity. Robust against the irregular sample spacing touch screens
//! produce.

const HISTORY_SIZE: usize = 20;

/// Only samples from the last 100ms contribute.
const HORIZON_MS: i64 = 100;

/// A gap this long between samples means the pointer stopped.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Default)]
struct Sample {
    time_ms: i64,
    position: f32,
}

/// Velocity tracker for one axis of absolute positions.
#[derive(Clone)]
pub struct VelocityTracker1D {
    samples: [Option<Sample>; HISTORY_SIZE],
    newest: usize,
}

impl Default for VelocityTracker1D {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker1D {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            newest: 0,
        }
    }

    pub fn add_sample(&mut self, time_ms: i64, position: f32) {
        self.newest = (self.newest + 1) % HISTORY_SIZE;
        self.samples[self.newest] = Some(Sample { time_ms, position });
    }

    /// Velocity in units per second; 0.0 with fewer than two usable samples.
    pub fn velocity(&self) -> f32 {
        let Some(newest) = self.samples[self.newest] else {
            return 0.0;
        };

        // Walk backwards from the newest sample, collecting (age, position)
        // pairs until the horizon or a stop gap is hit.
        let mut positions = [0.0f32; HISTORY_SIZE];
        let mut times = [0.0f32; HISTORY_SIZE];
        let mut count = 0;
        let mut index = self.newest;
        let mut previous = newest;

        while let Some(sample) = self.samples[index] {
            let age = newest.time_ms - sample.time_ms;
            let gap = (previous.time_ms - sample.time_ms).abs();
            if age > HORIZON_MS || gap > ASSUME_STOPPED_MS {
                break;
            }
            previous = sample;
            positions[count] = sample.position;
            times[count] = -(age as f32);
            count += 1;
            if count == HISTORY_SIZE {
                break;
            }
            index = (index + HISTORY_SIZE - 1) % HISTORY_SIZE;
        }

        if count < 2 {
            return 0.0;
        }
        impulse_velocity(&positions[..count], &times[..count]) * 1000.0
    }

    /// Velocity clamped to `±max_velocity`.
    pub fn velocity_capped(&self, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }
        let velocity = self.velocity();
        if velocity.is_nan() {
            return 0.0;
        }
        velocity.clamp(-max_velocity, max_velocity)
    }

    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.newest = 0;
    }
}

/// `positions[0]`/`times[0]` are the newest sample; times are non-positive
/// ages in milliseconds. Returns units per millisecond.
fn impulse_velocity(positions: &[f32], times: &[f32]) -> f32 {
    let oldest = positions.len() - 1;
    let mut work = 0.0f32;
    for i in (1..=oldest).rev() {
        let dt = times[i] - times[i - 1];
        if dt == 0.0 {
            continue;
        }
        let v_curr = (positions[i] - positions[i - 1]) / dt;
        let v_prev = energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == oldest {
            work *= 0.5;
        }
    }
    energy_to_velocity(work)
}

/// E = ½mv² with m = 1.
#[inline]
fn energy_to_velocity(energy: f32) -> f32 {
    energy.signum() * (2.0 * energy.abs()).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tracker_reports_zero() {
        assert_eq!(VelocityTracker1D::new().velocity(), 0.0);
    }

    #[test]
    fn single_sample_reports_zero() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_sample(0, 100.0);
        assert_eq!(tracker.velocity(), 0.0);
    }

    #[test]
    fn constant_motion_matches_slope() {
        let mut tracker = VelocityTracker1D::new();
        // 100 px per 10ms = 10_000 px/s
        for step in 0..4 {
            tracker.add_sample(step * 10, step as f32 * 100.0);
        }
        let velocity = tracker.velocity();
        assert!(
            (velocity - 10_000.0).abs() < 1_000.0,
            "expected ~10000, got {}",
            velocity
        );
    }

    #[test]
    fn backwards_motion_is_negative() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_sample(0, 300.0);
        tracker.add_sample(10, 200.0);
        tracker.add_sample(20, 100.0);
        assert!(tracker.velocity() < 0.0);
    }

    #[test]
    fn capped_velocity_is_clamped() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_sample(0, 0.0);
        tracker.add_sample(1, 10_000.0);
        assert_eq!(tracker.velocity_capped(8_000.0), 8_000.0);

        tracker.reset();
        tracker.add_sample(0, 10_000.0);
        tracker.add_sample(1, 0.0);
        assert_eq!(tracker.velocity_capped(8_000.0), -8_000.0);
        assert_eq!(tracker.velocity_capped(0.0), 0.0);
    }

    #[test]
    fn stale_samples_are_ignored() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_sample(0, 0.0);
        tracker.add_sample(150, 100.0);
        tracker.add_sample(160, 200.0);
        tracker.add_sample(170, 300.0);
        assert!(tracker.velocity() > 0.0);
    }

    #[test]
    fn stop_gap_resets_velocity() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_sample(0, 0.0);
        tracker.add_sample(ASSUME_STOPPED_MS + 1, 100.0);
        assert_eq!(tracker.velocity(), 0.0);
    }
}
