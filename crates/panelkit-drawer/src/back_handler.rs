//! Hardware back-button routing.

use crate::session::DrawerHandle;

/// Host platform, as far as close behaviour cares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Platform {
    Android,
    Ios,
    Web,
    Desktop,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "android") {
            Platform::Android
        } else if cfg!(target_os = "ios") {
            Platform::Ios
        } else if cfg!(target_arch = "wasm32") {
            Platform::Web
        } else {
            Platform::Desktop
        }
    }
}

/// What the host should do with a back press after offering it to panels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackPressOutcome {
    /// A panel closed, or deliberately kept itself open. Do not navigate.
    Consumed,
    /// No panel is showing.
    Ignored,
}

impl BackPressOutcome {
    pub fn is_consumed(self) -> bool {
        self == BackPressOutcome::Consumed
    }
}

/// Stack of mounted panels that want the back button, topmost last.
///
/// Entries are weak; a session that has gone away is skipped and pruned.
#[derive(Default)]
pub struct BackHandler {
    entries: Vec<DrawerHandle>,
}

impl BackHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handle: DrawerHandle) {
        self.entries.push(handle);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Offer the press to the topmost live panel.
    pub fn on_back_pressed(&mut self) -> BackPressOutcome {
        self.entries.retain(DrawerHandle::is_showing);
        match self.entries.last() {
            Some(top) => top.back_pressed(),
            None => BackPressOutcome::Ignored,
        }
    }
}
