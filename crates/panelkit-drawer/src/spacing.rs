//! Panel sizing from the viewport and spacing tokens.

use crate::config::{DrawerConfig, HandleBarVariant};
use panelkit_gesture::{EdgeGeometry, Pin};
use panelkit_ui_graphics::{EdgeInsets, Size};
use serde::{Deserialize, Serialize};

/// Spacing tokens and the device safe area.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpacingConfig {
    pub safe_area: EdgeInsets,
    /// Content inset from the panel edges.
    pub gutter: f32,
    pub handle_bar_height: f32,
}

impl Default for SpacingConfig {
    fn default() -> Self {
        Self {
            safe_area: EdgeInsets::default(),
            gutter: 24.0,
            handle_bar_height: 20.0,
        }
    }
}

impl SpacingConfig {
    pub fn with_safe_area(mut self, safe_area: EdgeInsets) -> Self {
        self.safe_area = safe_area;
        self
    }

    /// Content padding for a panel on `geometry`'s edge.
    ///
    /// The pinned edge picks up the safe-area inset. An inside handle bar on
    /// a bottom panel sits in the top padding.
    pub fn panel_padding(
        &self,
        geometry: &EdgeGeometry,
        handle_bar: Option<HandleBarVariant>,
    ) -> EdgeInsets {
        let mut padding = EdgeInsets::uniform(self.gutter);
        match geometry.pin() {
            Pin::Top => padding.top += self.safe_area.top,
            Pin::Bottom => padding.bottom += self.safe_area.bottom,
            Pin::Left => padding.left += self.safe_area.left,
            Pin::Right => padding.right += self.safe_area.right,
        }
        if geometry.pin() == Pin::Bottom && handle_bar == Some(HandleBarVariant::Inside) {
            padding.top += self.handle_bar_height;
        }
        padding
    }
}

/// Panel size derived from a viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelMetrics {
    pub viewport: Size,
    /// Panel size along the primary axis; also the off-screen travel.
    pub extent: f32,
    pub padding: EdgeInsets,
    /// Room left for content on the primary axis.
    pub content_extent: f32,
}

impl PanelMetrics {
    pub fn new(viewport: Size, config: &DrawerConfig, spacing: &SpacingConfig) -> Self {
        let geometry = EdgeGeometry::from_pin(config.pin);
        let padding = spacing.panel_padding(&geometry, config.handle_bar_variant);
        let (extent, padding_sum) = if geometry.is_vertical() {
            (
                viewport.height * config.vertical_drawer_percentage_of_view,
                padding.vertical_sum(),
            )
        } else {
            (
                viewport.width * config.horizontal_drawer_percentage_of_view,
                padding.horizontal_sum(),
            )
        };
        let outside_handle = match config.handle_bar_variant {
            Some(HandleBarVariant::Outside) if geometry.is_vertical() => spacing.handle_bar_height,
            _ => 0.0,
        };
        let extent = extent.max(0.0);
        Self {
            viewport,
            extent,
            padding,
            content_extent: (extent - padding_sum - outside_handle).max(0.0),
        }
    }
}
