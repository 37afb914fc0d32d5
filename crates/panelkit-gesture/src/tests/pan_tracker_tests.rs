use super::*;

#[test]
fn samples_are_cumulative_from_press_origin() {
    let mut tracker = PanTracker::new();
    assert_eq!(
        tracker.handle(&PointerEvent::down(100.0, 500.0, 0)),
        Some(PanEvent::Start)
    );

    let Some(PanEvent::Move(first)) = tracker.handle(&PointerEvent::moved(102.0, 520.0, 10)) else {
        panic!("expected move");
    };
    assert_eq!((first.dx, first.dy), (2.0, 20.0));

    let Some(PanEvent::Move(second)) = tracker.handle(&PointerEvent::moved(104.0, 560.0, 20)) else {
        panic!("expected move");
    };
    assert_eq!((second.dx, second.dy), (4.0, 60.0));
    assert!(second.vy > 0.0);

    let Some(PanEvent::Release(release)) = tracker.handle(&PointerEvent::up(104.0, 600.0, 30))
    else {
        panic!("expected release");
    };
    assert_eq!(release.dy, 100.0);
    assert!(!tracker.is_tracking());
}

#[test]
fn fast_flick_reports_capped_velocity() {
    let mut tracker = PanTracker::with_max_velocity(2_000.0);
    tracker.handle(&PointerEvent::down(0.0, 0.0, 0));
    tracker.handle(&PointerEvent::moved(0.0, 100.0, 5));
    let Some(PanEvent::Release(release)) = tracker.handle(&PointerEvent::up(0.0, 200.0, 10))
    else {
        panic!("expected release");
    };
    assert_eq!(release.vy, 2_000.0);
}

#[test]
fn other_pointers_are_ignored() {
    let mut tracker = PanTracker::new();
    tracker.handle(&PointerEvent::down(0.0, 0.0, 0).with_id(1));
    assert_eq!(
        tracker.handle(&PointerEvent::down(50.0, 50.0, 1).with_id(2)),
        None
    );
    assert_eq!(
        tracker.handle(&PointerEvent::moved(60.0, 60.0, 2).with_id(2)),
        None
    );
    assert!(matches!(
        tracker.handle(&PointerEvent::moved(0.0, 10.0, 3).with_id(1)),
        Some(PanEvent::Move(_))
    ));
}

#[test]
fn cancel_without_press_is_ignored() {
    let mut tracker = PanTracker::new();
    assert_eq!(tracker.handle(&PointerEvent::cancel(0)), None);
    tracker.handle(&PointerEvent::down(0.0, 0.0, 0));
    assert_eq!(tracker.handle(&PointerEvent::cancel(5)), Some(PanEvent::Cancel));
    assert_eq!(tracker.handle(&PointerEvent::up(0.0, 0.0, 6)), None);
}
