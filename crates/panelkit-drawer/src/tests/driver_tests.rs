use super::*;

use panelkit_animation::{AnimationResult, AnimationSpec, AnimationType};
use panelkit_core::{pump_frames, Runtime, FRAME_INTERVAL_NANOS};
use panelkit_gesture::{DragDirection, Pin};
use std::cell::RefCell;
use std::rc::Rc;

fn linear_config(millis: u64) -> DrawerAnimationConfig {
    let tween = AnimationType::Tween(AnimationSpec::linear(millis));
    DrawerAnimationConfig {
        enter: tween,
        exit: tween,
        snap_back: tween,
    }
}

fn recorder() -> (Rc<RefCell<Vec<AnimationResult>>>, OnAnimationEnd) {
    let results = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&results);
    (results, Box::new(move |result| sink.borrow_mut().push(result)))
}

fn classification(distance: f32, is_over_drag: bool) -> GestureClassification {
    GestureClassification {
        distance,
        velocity: 0.0,
        drag_direction: DragDirection::from_signed(panelkit_gesture::Axis::Vertical, distance),
        is_over_drag,
    }
}

#[test]
fn gesture_frame_tracks_travel_toward_dismiss_edge() {
    let geometry = EdgeGeometry::from_pin(Pin::Bottom);
    let overdrag = OverdragCurve::default();

    let frame = ChannelFrame::from_gesture(&geometry, &overdrag, &classification(100.0, false), 400.0);
    assert_eq!(frame.position, 100.0);
    assert_eq!(frame.opacity, 0.75);

    let past = ChannelFrame::from_gesture(&geometry, &overdrag, &classification(900.0, false), 400.0);
    assert_eq!(past.position, 400.0);
    assert_eq!(past.opacity, 0.0);
}

#[test]
fn gesture_frame_damps_overdrag_and_keeps_full_opacity() {
    let geometry = EdgeGeometry::from_pin(Pin::Bottom);
    let overdrag = OverdragCurve::default();

    let frame = ChannelFrame::from_gesture(&geometry, &overdrag, &classification(-500.0, true), 400.0);
    assert!(frame.position < 0.0);
    assert!(frame.position > -overdrag.max);
    assert_eq!(frame.opacity, 1.0);
}

#[test]
fn top_pin_moves_up_when_dismissing() {
    let geometry = EdgeGeometry::from_pin(Pin::Top);
    let frame = ChannelFrame::from_gesture(
        &geometry,
        &OverdragCurve::default(),
        &classification(-200.0, false),
        400.0,
    );
    assert_eq!(frame.position, -200.0);
    assert_eq!(frame.opacity, 0.5);
    assert_eq!(ChannelFrame::closed(&geometry, 400.0).position, -400.0);
}

#[test]
fn animate_in_then_out_reaches_both_ends() {
    let runtime = Runtime::manual();
    let handle = runtime.handle();
    let mut driver = ChannelDriver::new(
        handle.clone(),
        EdgeGeometry::from_pin(Pin::Bottom),
        600.0,
        linear_config(100),
    );
    assert_eq!(driver.position(), 600.0);
    assert_eq!(driver.opacity(), 0.0);

    let (entered, on_enter) = recorder();
    driver.animate_in(on_enter);
    let time = pump_frames(&handle, 0, 32);
    assert_eq!(entered.borrow().as_slice(), &[AnimationResult::FINISHED]);
    assert_eq!(driver.position(), 0.0);
    assert_eq!(driver.opacity(), 1.0);

    let (exited, on_exit) = recorder();
    driver.animate_out(on_exit);
    pump_frames(&handle, time, 32);
    assert_eq!(exited.borrow().as_slice(), &[AnimationResult::FINISHED]);
    assert_eq!(driver.position(), 600.0);
    assert_eq!(driver.opacity(), 0.0);
}

#[test]
fn superseded_enter_reports_interrupted_once() {
    let runtime = Runtime::manual();
    let handle = runtime.handle();
    let mut driver = ChannelDriver::new(
        handle.clone(),
        EdgeGeometry::from_pin(Pin::Right),
        300.0,
        linear_config(200),
    );

    let (entered, on_enter) = recorder();
    driver.animate_in(on_enter);
    handle.drain_frame_callbacks(FRAME_INTERVAL_NANOS);
    handle.drain_frame_callbacks(FRAME_INTERVAL_NANOS * 2);

    let (exited, on_exit) = recorder();
    driver.animate_out(on_exit);
    assert_eq!(entered.borrow().as_slice(), &[AnimationResult::INTERRUPTED]);

    pump_frames(&handle, FRAME_INTERVAL_NANOS * 2, 64);
    assert_eq!(entered.borrow().len(), 1);
    assert_eq!(exited.borrow().as_slice(), &[AnimationResult::FINISHED]);
}

#[test]
fn follow_gesture_interrupts_snap_back() {
    let runtime = Runtime::manual();
    let handle = runtime.handle();
    let mut driver = ChannelDriver::new(
        handle.clone(),
        EdgeGeometry::from_pin(Pin::Bottom),
        400.0,
        linear_config(100),
    );
    driver.follow_gesture(ChannelFrame {
        position: 120.0,
        opacity: 0.7,
    });

    let (snapped, on_snap) = recorder();
    driver.snap_back(on_snap);
    driver.follow_gesture(ChannelFrame {
        position: 60.0,
        opacity: 0.85,
    });

    assert_eq!(snapped.borrow().as_slice(), &[AnimationResult::INTERRUPTED]);
    assert_eq!(driver.position(), 60.0);
    assert_eq!(driver.opacity(), 0.85);
    assert!(!driver.is_running());
}

#[test]
fn hidden_driver_follows_extent_changes() {
    let runtime = Runtime::manual();
    let mut driver = ChannelDriver::new(
        runtime.handle(),
        EdgeGeometry::from_pin(Pin::Left),
        0.0,
        DrawerAnimationConfig::default(),
    );
    driver.set_extent(280.0);
    assert_eq!(driver.position(), -280.0);
    assert_eq!(driver.extent(), 280.0);

    driver.follow_gesture(ChannelFrame::OPEN);
    driver.set_extent(320.0);
    assert_eq!(driver.position(), 0.0);
}
