use super::*;

#[test]
fn tray_scenario_closes_once() {
    let report = Scenario::Tray
        .run(&DrawerConfig::default())
        .expect("tray scenario");
    assert_eq!(report.state, DrawerState::Closed);
    assert_eq!(report.closes, 1);
    assert_eq!(report.transitions.last().map(|(_, to)| *to), Some(DrawerState::Closed));
    assert!(report.note.as_deref().is_some_and(|note| note.starts_with("max_footer_height=")));
}

#[test]
fn snap_back_scenario_stays_open() {
    let report = Scenario::SnapBack
        .run(&DrawerConfig::default())
        .expect("snap-back scenario");
    assert_eq!(report.state, DrawerState::Open);
    assert_eq!(report.closes, 0);
    assert!(report.position.abs() < 0.01);
}

#[test]
fn every_scenario_has_a_distinct_name() {
    let mut names: Vec<_> = Scenario::ALL.iter().map(|scenario| scenario.name()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), Scenario::ALL.len());
}
