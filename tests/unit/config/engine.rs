use super::*;

#[test]
fn default_config_is_valid() {
    EngineConfig::default().validate().unwrap();
}

#[test]
fn json_with_only_overrides_parses() {
    let cfg = EngineConfig::from_json_str(
        r#"{
            "visualization": "vine",
            "canvas": { "width": 320, "height": 200 },
            "forced_tier": "medium",
            "seed": 7
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.visualization, Visualization::Vine);
    assert_eq!(cfg.canvas.width, 320);
    assert_eq!(cfg.forced_tier, Some(PerformanceTier::Medium));
    assert_eq!(cfg.seed, Some(7));
    assert_eq!(cfg.burst, BurstTiming::default());
}

#[test]
fn invalid_json_is_a_serde_error() {
    let err = EngineConfig::from_json_str("{ nope").unwrap_err();
    assert!(matches!(err, FlourishError::Serde(_)));
}

#[test]
fn zero_canvas_is_rejected() {
    let err = EngineConfig::from_json_str(r#"{ "canvas": { "width": 0, "height": 10 } }"#)
        .unwrap_err();
    assert!(matches!(err, FlourishError::Config(_)));
}

#[test]
fn burst_timing_validation() {
    let mut t = BurstTiming::default();
    t.validate().unwrap();
    t.duration_ms = Span::new(3_000.0, 2_000.0);
    assert!(t.validate().is_err());

    let mut t = BurstTiming::default();
    t.delay_skew = 0.0;
    assert!(t.validate().is_err());
}

#[test]
fn missing_file_reports_path() {
    let err = EngineConfig::load(Path::new("definitely/missing/flourish.json")).unwrap_err();
    assert!(err.to_string().contains("flourish.json"), "{err}");
}

#[test]
fn visualization_parse() {
    assert_eq!(Visualization::parse("Vortex").unwrap(), Visualization::Vortex);
    assert!(Visualization::parse("spiral").is_err());
}
