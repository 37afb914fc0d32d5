use super::*;

#[test]
fn config_flag_accepts_equals_form() {
    let args = Args::try_parse_from(["drawer-demo", "--config=t.json", "fling", "tray"])
        .expect("valid arguments");
    assert_eq!(args.config, Some(PathBuf::from("t.json")));
    assert_eq!(args.selected(), vec![Scenario::Fling, Scenario::Tray]);
}

#[test]
fn config_flag_accepts_separate_value() {
    let args = Args::try_parse_from(["drawer-demo", "--config", "tokens.json"])
        .expect("valid arguments");
    assert_eq!(args.config, Some(PathBuf::from("tokens.json")));
    assert_eq!(args.selected(), Scenario::ALL.to_vec());
}

#[test]
fn scenario_names_are_kebab_case() {
    let args = Args::try_parse_from(["drawer-demo", "open-close", "hardware-back", "scrim-tap"])
        .expect("valid arguments");
    assert_eq!(
        args.scenarios,
        vec![Scenario::OpenClose, Scenario::HardwareBack, Scenario::ScrimTap]
    );
}

#[test]
fn unknown_scenario_is_rejected() {
    let error = Args::try_parse_from(["drawer-demo", "sideways"]).unwrap_err();
    assert_eq!(error.kind(), clap::error::ErrorKind::InvalidValue);
}

#[test]
fn missing_config_file_names_the_path() {
    let error = load_config(Some(Path::new("no/such/drawer.json"))).unwrap_err();
    assert!(format!("{:#}", error).contains("no/such/drawer.json"));
}
