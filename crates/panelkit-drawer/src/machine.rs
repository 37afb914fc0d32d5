//! Lifecycle state machine for one drawer mount.
//!
//! [`DrawerMachine`] never touches animations or callbacks. It consumes
//! [`DrawerEvent`]s and answers with a [`Transition`] listing the
//! [`DrawerEffect`]s the owner must carry out.

use crate::driver::ChannelFrame;
use panelkit_animation::AnimationResult;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DrawerState {
    /// Not on screen. Initial and terminal.
    Closed,
    /// Enter animation in flight.
    Opening,
    /// Settled at rest.
    Open,
    /// A captured pan is driving the channels.
    Dragging,
    /// Exit animation in flight.
    Closing,
}

/// Which animation a settle report belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    Enter,
    Exit,
    SnapBack,
}

/// Origin of a close request. Policy differs per source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CloseSource {
    /// A close button inside the content.
    Button,
    HandleBar,
    /// Tap on the scrim.
    Overlay,
    /// Pan released past a dismissal threshold.
    Swipe,
    HardwareBack,
    AccessibilityEscape,
    /// `DrawerHandle::handle_close` called by host code.
    Imperative,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawerEvent {
    Mount,
    AnimationSettled {
        kind: AnimationKind,
        result: AnimationResult,
    },
    GestureCaptured,
    GestureMoved(ChannelFrame),
    GestureReleased { should_dismiss: bool },
    GestureCancelled,
    CloseRequested(CloseSource),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawerEffect {
    AnimateIn,
    AnimateOut,
    SnapBack,
    FollowGesture(ChannelFrame),
    /// Drop the active gesture and free the responder slot.
    ReleaseGesture,
    NotifyCloseComplete,
}

/// Which close sources are honoured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClosePolicy {
    pub prevent_dismiss_gestures: bool,
    pub block_hardware_back: bool,
}

impl ClosePolicy {
    pub fn allows(&self, source: CloseSource) -> bool {
        match source {
            CloseSource::Overlay | CloseSource::Swipe => !self.prevent_dismiss_gestures,
            CloseSource::HardwareBack => !self.block_hardware_back,
            CloseSource::Button
            | CloseSource::HandleBar
            | CloseSource::AccessibilityEscape
            | CloseSource::Imperative => true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub from: DrawerState,
    pub to: DrawerState,
    pub effects: SmallVec<[DrawerEffect; 2]>,
}

impl Transition {
    fn stay(state: DrawerState) -> Self {
        Self {
            from: state,
            to: state,
            effects: SmallVec::new(),
        }
    }

    pub fn changed(&self) -> bool {
        self.from != self.to
    }

    pub fn is_noop(&self) -> bool {
        !self.changed() && self.effects.is_empty()
    }
}

#[derive(Debug)]
pub struct DrawerMachine {
    state: DrawerState,
    policy: ClosePolicy,
    mounted: bool,
    has_opened: bool,
}

impl DrawerMachine {
    pub fn new(policy: ClosePolicy) -> Self {
        Self {
            state: DrawerState::Closed,
            policy,
            mounted: false,
            has_opened: false,
        }
    }

    pub fn state(&self) -> DrawerState {
        self.state
    }

    pub fn policy(&self) -> ClosePolicy {
        self.policy
    }

    /// True once the enter animation has settled, until the panel is gone.
    pub fn is_mounted(&self) -> bool {
        self.has_opened && self.state != DrawerState::Closed
    }

    /// `Mount` has not been handled yet.
    pub fn can_mount(&self) -> bool {
        !self.mounted
    }

    /// The session ran to completion and cannot be mounted again.
    pub fn is_spent(&self) -> bool {
        self.mounted && self.state == DrawerState::Closed
    }

    pub fn handle(&mut self, event: DrawerEvent) -> Transition {
        use DrawerEffect as Fx;
        use DrawerState::*;

        let from = self.state;
        let (to, effects): (DrawerState, SmallVec<[DrawerEffect; 2]>) = match (from, event) {
            (Closed, DrawerEvent::Mount) if !self.mounted => {
                self.mounted = true;
                (Opening, smallvec::smallvec![Fx::AnimateIn])
            }

            (_, DrawerEvent::AnimationSettled { result, .. }) if !result.finished => {
                return Transition::stay(from);
            }
            (
                Opening,
                DrawerEvent::AnimationSettled {
                    kind: AnimationKind::Enter,
                    ..
                },
            ) => {
                self.has_opened = true;
                (Open, SmallVec::new())
            }
            (
                Closing,
                DrawerEvent::AnimationSettled {
                    kind: AnimationKind::Exit,
                    ..
                },
            ) => (Closed, smallvec::smallvec![Fx::NotifyCloseComplete]),

            (Open, DrawerEvent::GestureCaptured) => (Dragging, SmallVec::new()),
            (Dragging, DrawerEvent::GestureMoved(frame)) => {
                (Dragging, smallvec::smallvec![Fx::FollowGesture(frame)])
            }
            (Dragging, DrawerEvent::GestureReleased { should_dismiss }) => {
                if should_dismiss && self.policy.allows(CloseSource::Swipe) {
                    (Closing, smallvec::smallvec![Fx::AnimateOut])
                } else {
                    (Open, smallvec::smallvec![Fx::SnapBack])
                }
            }
            (Dragging, DrawerEvent::GestureCancelled) => (Open, smallvec::smallvec![Fx::SnapBack]),

            (Opening | Open, DrawerEvent::CloseRequested(source)) if self.policy.allows(source) => {
                (Closing, smallvec::smallvec![Fx::AnimateOut])
            }
            (Dragging, DrawerEvent::CloseRequested(source)) if self.policy.allows(source) => (
                Closing,
                smallvec::smallvec![Fx::ReleaseGesture, Fx::AnimateOut],
            ),

            (_, event) => {
                log::trace!("drawer ignores {:?} while {:?}", event, from);
                return Transition::stay(from);
            }
        };

        self.state = to;
        Transition { from, to, effects }
    }
}

#[cfg(test)]
#[path = "tests/machine_tests.rs"]
mod tests;
