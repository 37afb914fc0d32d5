//! Range mapping used to turn gesture travel into channel values.

use serde::{Deserialize, Serialize};

/// Behaviour outside the input range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Extrapolate {
    Clamp,
    Extend,
}

/// Linear map from an input range onto an output range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interpolation {
    input: [f32; 2],
    output: [f32; 2],
    extrapolate: Extrapolate,
}

impl Interpolation {
    /// Clamped interpolation; values outside `input_range` map to the
    /// nearest end of `output_range`.
    pub fn new(input_range: [f32; 2], output_range: [f32; 2]) -> Self {
        Self {
            input: input_range,
            output: output_range,
            extrapolate: Extrapolate::Clamp,
        }
    }

    pub fn extended(mut self) -> Self {
        self.extrapolate = Extrapolate::Extend;
        self
    }

    pub fn map(&self, value: f32) -> f32 {
        let [in_start, in_end] = self.input;
        let [out_start, out_end] = self.output;
        let span = in_end - in_start;
        if span.abs() < f32::EPSILON {
            // Degenerate range: a step at the input point.
            return if value <= in_start { out_start } else { out_end };
        }
        let mut fraction = (value - in_start) / span;
        if self.extrapolate == Extrapolate::Clamp {
            fraction = fraction.clamp(0.0, 1.0);
        }
        out_start + (out_end - out_start) * fraction
    }
}
