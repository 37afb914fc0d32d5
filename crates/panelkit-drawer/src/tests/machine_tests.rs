use super::*;

use DrawerState::*;

fn settled(kind: AnimationKind, finished: bool) -> DrawerEvent {
    DrawerEvent::AnimationSettled {
        kind,
        result: AnimationResult { finished },
    }
}

fn open_machine(policy: ClosePolicy) -> DrawerMachine {
    let mut machine = DrawerMachine::new(policy);
    machine.handle(DrawerEvent::Mount);
    machine.handle(settled(AnimationKind::Enter, true));
    assert_eq!(machine.state(), Open);
    machine
}

fn dragging_machine(policy: ClosePolicy) -> DrawerMachine {
    let mut machine = open_machine(policy);
    machine.handle(DrawerEvent::GestureCaptured);
    assert_eq!(machine.state(), Dragging);
    machine
}

#[test]
fn mount_animates_in_and_settles_open() {
    let mut machine = DrawerMachine::new(ClosePolicy::default());
    assert!(machine.can_mount());

    let mount = machine.handle(DrawerEvent::Mount);
    assert_eq!((mount.from, mount.to), (Closed, Opening));
    assert_eq!(mount.effects.as_slice(), &[DrawerEffect::AnimateIn]);
    assert!(!machine.is_mounted());

    let settle = machine.handle(settled(AnimationKind::Enter, true));
    assert_eq!(settle.to, Open);
    assert!(settle.effects.is_empty());
    assert!(machine.is_mounted());
}

#[test]
fn interrupted_settles_never_change_state() {
    let mut machine = DrawerMachine::new(ClosePolicy::default());
    machine.handle(DrawerEvent::Mount);

    let transition = machine.handle(settled(AnimationKind::Enter, false));
    assert!(transition.is_noop());
    assert_eq!(machine.state(), Opening);
    assert!(!machine.is_mounted());

    machine.handle(DrawerEvent::CloseRequested(CloseSource::Button));
    let transition = machine.handle(settled(AnimationKind::Exit, false));
    assert!(transition.is_noop());
    assert_eq!(machine.state(), Closing);
}

#[test]
fn drag_follows_and_snaps_back_below_threshold() {
    let mut machine = dragging_machine(ClosePolicy::default());
    let frame = ChannelFrame {
        position: 40.0,
        opacity: 0.9,
    };

    let moved = machine.handle(DrawerEvent::GestureMoved(frame));
    assert_eq!(moved.effects.as_slice(), &[DrawerEffect::FollowGesture(frame)]);
    assert!(!moved.changed());

    let released = machine.handle(DrawerEvent::GestureReleased {
        should_dismiss: false,
    });
    assert_eq!(released.to, Open);
    assert_eq!(released.effects.as_slice(), &[DrawerEffect::SnapBack]);
}

#[test]
fn dismissing_release_animates_out_then_notifies_once() {
    let mut machine = dragging_machine(ClosePolicy::default());

    let released = machine.handle(DrawerEvent::GestureReleased {
        should_dismiss: true,
    });
    assert_eq!(released.to, Closing);
    assert_eq!(released.effects.as_slice(), &[DrawerEffect::AnimateOut]);

    let done = machine.handle(settled(AnimationKind::Exit, true));
    assert_eq!(done.to, Closed);
    assert_eq!(done.effects.as_slice(), &[DrawerEffect::NotifyCloseComplete]);
    assert!(machine.is_spent());
    assert!(!machine.is_mounted());

    assert!(machine.handle(settled(AnimationKind::Exit, true)).is_noop());
}

#[test]
fn cancelled_gesture_snaps_back() {
    let mut machine = dragging_machine(ClosePolicy::default());
    let cancelled = machine.handle(DrawerEvent::GestureCancelled);
    assert_eq!(cancelled.to, Open);
    assert_eq!(cancelled.effects.as_slice(), &[DrawerEffect::SnapBack]);
}

#[test]
fn close_is_idempotent_while_closing() {
    let mut machine = open_machine(ClosePolicy::default());

    let first = machine.handle(DrawerEvent::CloseRequested(CloseSource::Imperative));
    assert_eq!(first.effects.as_slice(), &[DrawerEffect::AnimateOut]);

    for source in [CloseSource::Imperative, CloseSource::Button, CloseSource::Overlay] {
        assert!(machine.handle(DrawerEvent::CloseRequested(source)).is_noop());
    }
    assert_eq!(machine.state(), Closing);
}

#[test]
fn close_during_enter_supersedes_it() {
    let mut machine = DrawerMachine::new(ClosePolicy::default());
    machine.handle(DrawerEvent::Mount);

    let close = machine.handle(DrawerEvent::CloseRequested(CloseSource::Button));
    assert_eq!((close.from, close.to), (Opening, Closing));
    assert_eq!(close.effects.as_slice(), &[DrawerEffect::AnimateOut]);

    // The superseded enter animation reports interrupted.
    machine.handle(settled(AnimationKind::Enter, false));
    assert_eq!(machine.state(), Closing);
    assert!(!machine.is_mounted());
}

#[test]
fn close_while_dragging_releases_the_gesture_first() {
    let mut machine = dragging_machine(ClosePolicy::default());
    let close = machine.handle(DrawerEvent::CloseRequested(CloseSource::HardwareBack));
    assert_eq!(close.to, Closing);
    assert_eq!(
        close.effects.as_slice(),
        &[DrawerEffect::ReleaseGesture, DrawerEffect::AnimateOut]
    );
}

#[test]
fn close_before_mount_is_ignored() {
    let mut machine = DrawerMachine::new(ClosePolicy::default());
    assert!(machine
        .handle(DrawerEvent::CloseRequested(CloseSource::Imperative))
        .is_noop());
    assert_eq!(machine.state(), Closed);
    assert!(machine.can_mount());
}

#[test]
fn spent_machine_refuses_a_second_mount() {
    let mut machine = open_machine(ClosePolicy::default());
    machine.handle(DrawerEvent::CloseRequested(CloseSource::Button));
    machine.handle(settled(AnimationKind::Exit, true));

    assert!(machine.handle(DrawerEvent::Mount).is_noop());
    assert_eq!(machine.state(), Closed);
}

#[test]
fn gestures_outside_open_are_ignored() {
    let mut machine = DrawerMachine::new(ClosePolicy::default());
    machine.handle(DrawerEvent::Mount);
    assert!(machine.handle(DrawerEvent::GestureCaptured).is_noop());
    assert!(machine
        .handle(DrawerEvent::GestureMoved(ChannelFrame::OPEN))
        .is_noop());
    assert_eq!(machine.state(), Opening);
}

#[test]
fn prevent_dismiss_gestures_blocks_overlay_and_swipe_only() {
    let policy = ClosePolicy {
        prevent_dismiss_gestures: true,
        block_hardware_back: false,
    };
    assert!(!policy.allows(CloseSource::Overlay));
    assert!(!policy.allows(CloseSource::Swipe));
    for source in [
        CloseSource::Button,
        CloseSource::HandleBar,
        CloseSource::HardwareBack,
        CloseSource::AccessibilityEscape,
        CloseSource::Imperative,
    ] {
        assert!(policy.allows(source), "{:?}", source);
    }

    let mut machine = open_machine(policy);
    assert!(machine
        .handle(DrawerEvent::CloseRequested(CloseSource::Overlay))
        .is_noop());
    let close = machine.handle(DrawerEvent::CloseRequested(CloseSource::Button));
    assert_eq!(close.to, Closing);
}

#[test]
fn blocked_hardware_back_keeps_the_drawer_open() {
    let policy = ClosePolicy {
        prevent_dismiss_gestures: false,
        block_hardware_back: true,
    };
    let mut machine = open_machine(policy);
    assert!(machine
        .handle(DrawerEvent::CloseRequested(CloseSource::HardwareBack))
        .is_noop());
    assert_eq!(machine.state(), Open);
}
