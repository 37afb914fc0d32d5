use super::*;

#[test]
fn defaults_validate() {
    let config = DrawerConfig::default();
    assert_eq!(config.pin, Pin::Bottom);
    assert_eq!(config.vertical_drawer_percentage_of_view, 0.75);
    assert!(config.validate().is_ok());
    assert!(config.dismiss_gestures_enabled());
}

#[test]
fn percentage_must_be_a_fraction() {
    for value in [0.0, -0.1, 1.01, f32::NAN] {
        let config = DrawerConfig::default().with_vertical_percentage(value);
        assert!(
            matches!(config.validate(), Err(ConfigError::VerticalPercentage(_))),
            "{} accepted",
            value
        );
    }
    assert!(DrawerConfig::default()
        .with_vertical_percentage(1.0)
        .validate()
        .is_ok());
    assert!(matches!(
        DrawerConfig::new(Pin::Left)
            .with_horizontal_percentage(0.0)
            .validate(),
        Err(ConfigError::HorizontalPercentage(_))
    ));
}

#[test]
fn thresholds_must_be_positive() {
    let config = DrawerConfig::default().with_thresholds(DismissalThresholds {
        velocity: 0.0,
        ..DismissalThresholds::default()
    });
    let error = config.validate().unwrap_err();
    assert!(matches!(
        error,
        ConfigError::Threshold {
            name: "velocity",
            ..
        }
    ));
    assert!(error.to_string().contains("velocity"));
}

#[test]
fn overdrag_curve_must_be_positive() {
    let config = DrawerConfig::default().with_overdrag(OverdragCurve {
        max: 20.0,
        softness: 0.0,
    });
    assert!(matches!(
        config.validate(),
        Err(ConfigError::Overdrag { .. })
    ));
}

#[test]
fn either_flag_disables_dismiss_gestures() {
    assert!(!DrawerConfig::default()
        .with_prevent_dismiss_gestures(true)
        .dismiss_gestures_enabled());
    assert!(!DrawerConfig::default()
        .with_disable_capture_pan_gesture_to_dismiss(true)
        .dismiss_gestures_enabled());
}

#[test]
fn hardware_back_is_blocked_only_on_android() {
    let config = DrawerConfig::default().with_prevent_hardware_back_behavior_android(true);
    assert!(config.close_policy(Platform::Android).block_hardware_back);
    assert!(!config.close_policy(Platform::Ios).block_hardware_back);
    assert!(!DrawerConfig::default()
        .close_policy(Platform::Android)
        .block_hardware_back);
}

#[test]
fn json_tokens_fill_in_defaults() {
    let config = DrawerConfig::from_json_str(
        r#"{
            "pin": "right",
            "prevent_dismiss_gestures": true,
            "handle_bar_variant": "outside",
            "thresholds": { "velocity": 800.0 },
            "animation": {
                "exit": { "type": "tween", "duration_millis": 180, "easing": "ease-in" }
            }
        }"#,
    )
    .expect("valid config");

    assert_eq!(config.pin, Pin::Right);
    assert!(config.prevent_dismiss_gestures);
    assert_eq!(config.handle_bar_variant, Some(HandleBarVariant::Outside));
    assert_eq!(config.thresholds.velocity, 800.0);
    assert_eq!(
        config.thresholds.drag_distance,
        DismissalThresholds::default().drag_distance
    );
    assert_eq!(
        config.animation.exit,
        AnimationType::Tween(AnimationSpec::tween(180, Easing::EaseIn))
    );
    assert_eq!(config.animation.enter, DrawerAnimationConfig::default().enter);
}

#[test]
fn json_errors_are_reported() {
    assert!(matches!(
        DrawerConfig::from_json_str("{ not json"),
        Err(ConfigError::Json(_))
    ));
    assert!(matches!(
        DrawerConfig::from_json_str(r#"{ "vertical_drawer_percentage_of_view": 2.0 }"#),
        Err(ConfigError::VerticalPercentage(_))
    ));
}
