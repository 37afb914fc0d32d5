//! Drawer props and design tokens.

use crate::back_handler::Platform;
use crate::machine::ClosePolicy;
use panelkit_animation::{AnimationSpec, AnimationType, Easing, SpringSpec};
use panelkit_gesture::{DismissalThresholds, OverdragCurve, Pin};
use panelkit_ui_graphics::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scrim colour at full opacity.
pub const DEFAULT_SCRIM_COLOR: Color = Color(0.0, 0.0, 0.0, 0.33);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("vertical_drawer_percentage_of_view must be in (0, 1], got {0}")]
    VerticalPercentage(f32),
    #[error("horizontal_drawer_percentage_of_view must be in (0, 1], got {0}")]
    HorizontalPercentage(f32),
    #[error("dismissal threshold `{name}` must be positive and finite, got {value}")]
    Threshold { name: &'static str, value: f32 },
    #[error("overdrag curve needs a positive max and softness, got max {max}, softness {softness}")]
    Overdrag { max: f32, softness: f32 },
    #[error("invalid drawer config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where the drag handle sits relative to the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleBarVariant {
    Inside,
    Outside,
}

/// Timing for the three parallel channel animations.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawerAnimationConfig {
    pub enter: AnimationType,
    pub exit: AnimationType,
    pub snap_back: AnimationType,
}

impl Default for DrawerAnimationConfig {
    fn default() -> Self {
        Self {
            enter: AnimationType::Tween(AnimationSpec::tween(300, Easing::EaseOut)),
            exit: AnimationType::Tween(AnimationSpec::tween(250, Easing::EaseIn)),
            snap_back: AnimationType::Spring(SpringSpec::default()),
        }
    }
}

/// Everything a host can configure on a drawer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawerConfig {
    pub pin: Pin,
    /// Blocks swipe-to-dismiss and scrim taps. Buttons and imperative closes
    /// still work.
    pub prevent_dismiss_gestures: bool,
    /// Ignore the Android hardware back button.
    pub prevent_hardware_back_behavior_android: bool,
    pub handle_bar_variant: Option<HandleBarVariant>,
    /// Panel height as a fraction of the viewport for top and bottom pins.
    pub vertical_drawer_percentage_of_view: f32,
    /// Panel width as a fraction of the viewport for left and right pins.
    pub horizontal_drawer_percentage_of_view: f32,
    /// Keep nested content in charge of pans without blocking other close
    /// sources.
    pub disable_capture_pan_gesture_to_dismiss: bool,
    pub thresholds: DismissalThresholds,
    pub overdrag: OverdragCurve,
    pub animation: DrawerAnimationConfig,
    pub scrim_color: Color,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            pin: Pin::Bottom,
            prevent_dismiss_gestures: false,
            prevent_hardware_back_behavior_android: false,
            handle_bar_variant: None,
            vertical_drawer_percentage_of_view: 0.75,
            horizontal_drawer_percentage_of_view: 0.75,
            disable_capture_pan_gesture_to_dismiss: false,
            thresholds: DismissalThresholds::default(),
            overdrag: OverdragCurve::default(),
            animation: DrawerAnimationConfig::default(),
            scrim_color: DEFAULT_SCRIM_COLOR,
        }
    }
}

impl DrawerConfig {
    pub fn new(pin: Pin) -> Self {
        Self {
            pin,
            ..Self::default()
        }
    }

    /// Decode and validate a JSON token file. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: DrawerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_pin(mut self, pin: Pin) -> Self {
        self.pin = pin;
        self
    }

    pub fn with_prevent_dismiss_gestures(mut self, prevent: bool) -> Self {
        self.prevent_dismiss_gestures = prevent;
        self
    }

    pub fn with_prevent_hardware_back_behavior_android(mut self, prevent: bool) -> Self {
        self.prevent_hardware_back_behavior_android = prevent;
        self
    }

    pub fn with_handle_bar(mut self, variant: Option<HandleBarVariant>) -> Self {
        self.handle_bar_variant = variant;
        self
    }

    pub fn with_vertical_percentage(mut self, percentage: f32) -> Self {
        self.vertical_drawer_percentage_of_view = percentage;
        self
    }

    pub fn with_horizontal_percentage(mut self, percentage: f32) -> Self {
        self.horizontal_drawer_percentage_of_view = percentage;
        self
    }

    pub fn with_disable_capture_pan_gesture_to_dismiss(mut self, disable: bool) -> Self {
        self.disable_capture_pan_gesture_to_dismiss = disable;
        self
    }

    pub fn with_thresholds(mut self, thresholds: DismissalThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_overdrag(mut self, overdrag: OverdragCurve) -> Self {
        self.overdrag = overdrag;
        self
    }

    pub fn with_animation(mut self, animation: DrawerAnimationConfig) -> Self {
        self.animation = animation;
        self
    }

    pub fn with_scrim_color(mut self, color: Color) -> Self {
        self.scrim_color = color;
        self
    }

    /// Whether a pan may capture and drive the panel at all.
    pub fn dismiss_gestures_enabled(&self) -> bool {
        !self.prevent_dismiss_gestures && !self.disable_capture_pan_gesture_to_dismiss
    }

    pub fn close_policy(&self, platform: Platform) -> ClosePolicy {
        ClosePolicy {
            prevent_dismiss_gestures: self.prevent_dismiss_gestures,
            block_hardware_back: self.prevent_hardware_back_behavior_android
                && platform == Platform::Android,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_fraction(self.vertical_drawer_percentage_of_view) {
            return Err(ConfigError::VerticalPercentage(
                self.vertical_drawer_percentage_of_view,
            ));
        }
        if !is_fraction(self.horizontal_drawer_percentage_of_view) {
            return Err(ConfigError::HorizontalPercentage(
                self.horizontal_drawer_percentage_of_view,
            ));
        }
        let thresholds = [
            ("drag_distance", self.thresholds.drag_distance),
            ("velocity", self.thresholds.velocity),
            ("min_pan_distance", self.thresholds.min_pan_distance),
        ];
        for (name, value) in thresholds {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Threshold { name, value });
            }
        }
        let OverdragCurve { max, softness } = self.overdrag;
        if !(max.is_finite() && max > 0.0 && softness.is_finite() && softness > 0.0) {
            return Err(ConfigError::Overdrag { max, softness });
        }
        Ok(())
    }
}

fn is_fraction(value: f32) -> bool {
    value > 0.0 && value <= 1.0
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
