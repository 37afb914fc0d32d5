//! Easing curves for tweens.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Material standard curve.
    FastOutSlowIn,
}

impl Easing {
    /// Map linear progress in 0..1 onto the curve.
    pub fn transform(&self, fraction: f32) -> f32 {
        let curve = match self {
            Easing::Linear => return fraction,
            Easing::EaseIn => CubicBezier::new(0.42, 0.0, 1.0, 1.0),
            Easing::EaseOut => CubicBezier::new(0.0, 0.0, 0.58, 1.0),
            Easing::EaseInOut => CubicBezier::new(0.42, 0.0, 0.58, 1.0),
            Easing::FastOutSlowIn => CubicBezier::new(0.4, 0.0, 0.2, 1.0),
        };
        curve.y_for_x(fraction)
    }
}

/// CSS-style cubic bezier through (0, 0) and (1, 1).
#[derive(Debug, Clone, Copy)]
struct CubicBezier {
    x: Polynomial,
    y: Polynomial,
}

/// `((a t + b) t + c) t` for one axis of the curve.
#[derive(Debug, Clone, Copy)]
struct Polynomial {
    a: f32,
    b: f32,
    c: f32,
}

impl Polynomial {
    fn from_control_points(p1: f32, p2: f32) -> Self {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        Self {
            a: 1.0 - c - b,
            b,
            c,
        }
    }

    fn at(&self, t: f32) -> f32 {
        ((self.a * t + self.b) * t + self.c) * t
    }

    fn slope(&self, t: f32) -> f32 {
        (3.0 * self.a * t + 2.0 * self.b) * t + self.c
    }
}

const EPSILON: f32 = 1e-6;

impl CubicBezier {
    fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x: Polynomial::from_control_points(x1, x2),
            y: Polynomial::from_control_points(y1, y2),
        }
    }

    fn y_for_x(&self, x: f32) -> f32 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        self.y.at(self.solve_t(x))
    }

    /// Newton first; bisection when the slope flattens out.
    fn solve_t(&self, x: f32) -> f32 {
        let mut t = x;
        for _ in 0..8 {
            let error = self.x.at(t) - x;
            if error.abs() < EPSILON {
                return t;
            }
            let slope = self.x.slope(t);
            if slope.abs() < EPSILON {
                break;
            }
            t = (t - error / slope).clamp(0.0, 1.0);
        }

        let (mut low, mut high) = (0.0f32, 1.0f32);
        t = x;
        for _ in 0..24 {
            let error = self.x.at(t) - x;
            if error.abs() < EPSILON {
                break;
            }
            if error > 0.0 {
                high = t;
            } else {
                low = t;
            }
            t = (low + high) * 0.5;
        }
        t
    }
}
