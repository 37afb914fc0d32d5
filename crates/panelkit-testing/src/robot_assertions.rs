//! Assertion helpers for drawer robot tests.

use crate::robot::DrawerRobot;
use panelkit_drawer::DrawerState;

/// Assert that a value is within `tolerance` of `expected`.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert the panel is at the open rest position and fully opaque.
pub fn assert_open(robot: &DrawerRobot) {
    assert_eq!(robot.state(), DrawerState::Open, "drawer should be open");
    assert_approx_eq(robot.position(), 0.0, 0.01, "open position");
    assert_approx_eq(robot.opacity(), 1.0, 0.001, "open opacity");
}

/// Assert the drawer closed exactly once.
pub fn assert_closed_once(robot: &DrawerRobot) {
    assert_eq!(robot.state(), DrawerState::Closed, "drawer should be closed");
    assert_eq!(
        robot.close_count(),
        1,
        "on_close_complete should run exactly once"
    );
}

/// Assert the drawer never went through `from -> to`.
pub fn assert_never_transitioned(robot: &DrawerRobot, from: DrawerState, to: DrawerState) {
    let transitions = robot.transitions();
    assert!(
        !transitions.contains(&(from, to)),
        "unexpected {:?} -> {:?} in {:?}",
        from,
        to,
        transitions
    );
}
