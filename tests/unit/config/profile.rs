use super::*;

#[test]
fn builtin_profiles_are_valid() {
    ProfileSet::default().validate().unwrap();
}

#[test]
fn only_burst_enables_presentational_flags() {
    let set = ProfileSet::default();
    for kind in [ProfileKind::Low, ProfileKind::Medium, ProfileKind::High] {
        let p = set.get(kind);
        assert!(!p.distortion);
        assert!(!p.color_pulse);
    }
    assert!(set.burst.distortion);
    assert!(set.burst.color_pulse);
    assert!(set.burst.regeneration_interval_ms < set.high.regeneration_interval_ms);
    assert!(set.burst.paths.min > set.high.paths.max);
}

#[test]
fn low_profile_paths_match_documented_range() {
    assert_eq!(ConfigProfile::LOW.paths, Span::new(3, 5));
}

#[test]
fn validation_rejects_inverted_ranges_and_bad_interval() {
    let mut p = ConfigProfile::MEDIUM;
    p.dots = Span::new(10, 2);
    assert!(p.validate().is_err());

    let mut p = ConfigProfile::MEDIUM;
    p.regeneration_interval_ms = 0.0;
    assert!(p.validate().is_err());

    let mut p = ConfigProfile::MEDIUM;
    p.branch_probability = 1.5;
    assert!(p.validate().is_err());

    let mut p = ConfigProfile::MEDIUM;
    p.dot_opacity = Span::new(0.5, 1.5);
    assert!(p.validate().is_err());
}

#[test]
fn profile_set_error_names_the_profile() {
    let mut set = ProfileSet::default();
    set.burst.speed = Span::new(3.0, 1.0);
    let err = set.validate().unwrap_err().to_string();
    assert!(err.contains("burst"), "{err}");
}

#[test]
fn tier_parse_and_profile_mapping() {
    assert_eq!(PerformanceTier::parse("HIGH").unwrap(), PerformanceTier::High);
    assert_eq!(PerformanceTier::parse("med").unwrap(), PerformanceTier::Medium);
    assert!(PerformanceTier::parse("ultra").is_err());
    assert_eq!(ProfileKind::from(PerformanceTier::Low), ProfileKind::Low);
}

#[test]
fn partial_json_override_keeps_defaults() {
    let json = serde_json::json!({ "low": ConfigProfile::HIGH });
    let set: ProfileSet = serde_json::from_value(json).unwrap();
    assert_eq!(set.low, ConfigProfile::HIGH);
    assert_eq!(set.burst, ConfigProfile::BURST);
}
