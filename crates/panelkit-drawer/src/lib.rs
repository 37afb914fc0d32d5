//! Drawer and Tray overlays.
//!
//! A [`DrawerSession`] lives for exactly one mount of a screen-edge panel.
//! Host input (pointer events, close buttons, the hardware back button,
//! scrim taps) goes in; animated position and opacity come out, along with a
//! single `on_close_complete` notification when the panel has left the
//! screen.
//!
//! The lifecycle itself is the pure [`DrawerMachine`]: events in, a new
//! state plus a list of [`DrawerEffect`]s out. The session executes those
//! effects against an [`AnimationDriver`].

mod back_handler;
mod config;
mod driver;
mod machine;
mod overlay;
mod session;
mod spacing;
mod tray;

pub use back_handler::{BackHandler, BackPressOutcome, Platform};
pub use config::{ConfigError, DrawerAnimationConfig, DrawerConfig, HandleBarVariant};
pub use driver::{AnimationDriver, ChannelDriver, ChannelFrame};
pub use machine::{
    AnimationKind, ClosePolicy, CloseSource, DrawerEffect, DrawerEvent, DrawerMachine,
    DrawerState, Transition,
};
pub use overlay::{Overlay, OverlayPress};
pub use session::{DrawerHandle, DrawerSession, DrawerSessionBuilder};
pub use spacing::{PanelMetrics, SpacingConfig};
pub use tray::{StickyFooterContext, TraySession, TraySessionBuilder, Visibility};

pub use panelkit_animation::AnimationResult;
pub use panelkit_gesture::{DismissalThresholds, EdgeGeometry, OverdragCurve, Pin};
