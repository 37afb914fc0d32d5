use panelkit_core::State;
use panelkit_ui_graphics::Color;

/// Result of a tap on the scrim.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayPress {
    RequestClose,
    /// Dismiss gestures are disabled; the tap is absorbed.
    Swallowed,
}

/// Scrim behind the panel, bound read-only to the opacity channel.
#[derive(Clone)]
pub struct Overlay {
    opacity: State<f32>,
    color: Color,
    prevent_dismiss_gestures: bool,
}

impl Overlay {
    pub fn new(opacity: State<f32>, color: Color, prevent_dismiss_gestures: bool) -> Self {
        Self {
            opacity,
            color,
            prevent_dismiss_gestures,
        }
    }

    pub fn opacity(&self) -> f32 {
        self.opacity.get()
    }

    /// Effective alpha: base colour alpha times the opacity channel.
    pub fn alpha(&self) -> f32 {
        self.color.a() * self.opacity().clamp(0.0, 1.0)
    }

    /// Colour to paint this frame.
    pub fn color(&self) -> Color {
        self.color.with_alpha(self.alpha())
    }

    pub fn is_visible(&self) -> bool {
        self.alpha() > 0.0
    }

    pub fn press(&self) -> OverlayPress {
        if self.prevent_dismiss_gestures {
            OverlayPress::Swallowed
        } else {
            OverlayPress::RequestClose
        }
    }
}
