//! Bottom tray: a drawer with a title and a sticky footer.

use crate::back_handler::Platform;
use crate::config::{ConfigError, DrawerConfig};
use crate::driver::AnimationDriver;
use crate::machine::Transition;
use crate::session::{DrawerHandle, DrawerSession, DrawerSessionBuilder};
use crate::spacing::SpacingConfig;
use panelkit_core::Owned;
use panelkit_gesture::{GestureResponder, Pin};
use panelkit_ui_graphics::Size;
use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

type VisibilityCallback = Box<dyn FnMut(Visibility)>;

/// Height budget published to a tray's sticky footer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StickyFooterContext {
    pub title_height: f32,
    pub vertical_percentage: f32,
    pub viewport_height: f32,
    pub max_over_drag: f32,
}

impl StickyFooterContext {
    /// Tallest footer that still fits once the title and the overdrag
    /// allowance are taken out. Never negative.
    pub fn max_footer_height(&self) -> f32 {
        let available =
            (self.viewport_height - self.title_height) * self.vertical_percentage - self.max_over_drag;
        available.max(0.0)
    }
}

pub struct TraySessionBuilder {
    drawer: DrawerSessionBuilder,
    title: Option<String>,
    on_visibility_change: Option<VisibilityCallback>,
    on_close_complete: Option<Box<dyn FnOnce()>>,
}

impl TraySessionBuilder {
    /// `config` keeps its pin; trays are usually bottom-pinned, see
    /// [`TraySession::builder`].
    pub fn new(config: DrawerConfig) -> Self {
        Self {
            drawer: DrawerSessionBuilder::new(config),
            title: None,
            on_visibility_change: None,
            on_close_complete: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn viewport(mut self, viewport: Size) -> Self {
        self.drawer = self.drawer.viewport(viewport);
        self
    }

    pub fn spacing(mut self, spacing: SpacingConfig) -> Self {
        self.drawer = self.drawer.spacing(spacing);
        self
    }

    pub fn platform(mut self, platform: Platform) -> Self {
        self.drawer = self.drawer.platform(platform);
        self
    }

    pub fn responder(mut self, responder: Rc<dyn GestureResponder>) -> Self {
        self.drawer = self.drawer.responder(responder);
        self
    }

    pub fn on_visibility_change(mut self, callback: impl FnMut(Visibility) + 'static) -> Self {
        self.on_visibility_change = Some(Box::new(callback));
        self
    }

    pub fn on_close_complete(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_close_complete = Some(Box::new(callback));
        self
    }

    pub fn on_transition(mut self, observer: impl FnMut(&Transition) + 'static) -> Self {
        self.drawer = self.drawer.on_transition(observer);
        self
    }

    pub fn build(self, driver: impl AnimationDriver + 'static) -> Result<TraySession, ConfigError> {
        let visibility: Owned<Option<VisibilityCallback>> = Owned::new(self.on_visibility_change);
        let on_hidden = visibility.clone();
        let host_close = self.on_close_complete;
        let drawer = self
            .drawer
            .on_close_complete(move || {
                notify(&on_hidden, Visibility::Hidden);
                match host_close {
                    Some(callback) => callback(),
                    None => log::warn!("tray closed without an on_close_complete callback"),
                }
            })
            .build(driver)?;
        Ok(TraySession {
            drawer,
            title: self.title,
            title_height: Cell::new(0.0),
            visibility,
        })
    }
}

fn notify(callback: &Owned<Option<VisibilityCallback>>, visibility: Visibility) {
    log::debug!("tray {:?}", visibility);
    callback.update(|callback| {
        if let Some(callback) = callback.as_mut() {
            callback(visibility);
        }
    });
}

/// A mounted tray.
pub struct TraySession {
    drawer: DrawerSession,
    title: Option<String>,
    title_height: Cell<f32>,
    visibility: Owned<Option<VisibilityCallback>>,
}

impl TraySession {
    /// Builder for a bottom-pinned tray.
    pub fn builder(config: DrawerConfig) -> TraySessionBuilder {
        TraySessionBuilder::new(config.with_pin(Pin::Bottom))
    }

    pub fn mount(&self) {
        if self.drawer.can_mount() {
            notify(&self.visibility, Visibility::Visible);
        }
        self.drawer.mount();
    }

    pub fn drawer(&self) -> &DrawerSession {
        &self.drawer
    }

    pub fn handle(&self) -> DrawerHandle {
        self.drawer.handle()
    }

    pub fn handle_close(&self) {
        self.drawer.handle_close();
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Record the measured title height. Without a title the height stays 0.
    pub fn on_title_layout(&self, height: f32) {
        if self.title.is_none() {
            return;
        }
        self.title_height.set(height.max(0.0));
    }

    pub fn title_height(&self) -> f32 {
        self.title_height.get()
    }

    pub fn set_viewport(&self, viewport: Size) {
        self.drawer.set_viewport(viewport);
    }

    pub fn sticky_footer_context(&self) -> StickyFooterContext {
        let config = self.drawer.config();
        StickyFooterContext {
            title_height: self.title_height.get(),
            vertical_percentage: config.vertical_drawer_percentage_of_view,
            viewport_height: self.drawer.metrics().viewport.height,
            max_over_drag: config.overdrag.max,
        }
    }
}

#[cfg(test)]
#[path = "tests/tray_tests.rs"]
mod tests;
