//! RGBA colour, components in 0..1

use serde::{Deserialize, Serialize};

/// Serialises as `[r, g, b, a]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color(pub f32, pub f32, pub f32, pub f32);

impl Color {
    pub const TRANSPARENT: Color = Color(0.0, 0.0, 0.0, 0.0);

    pub fn a(&self) -> f32 {
        self.3
    }

    pub fn with_alpha(&self, alpha: f32) -> Self {
        Self(self.0, self.1, self.2, alpha)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}
