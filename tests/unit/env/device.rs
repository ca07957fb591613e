use super::*;

#[test]
fn capable_device_keeps_requested_tier() {
    let hints = DeviceHints::capable();
    assert_eq!(hints.constraint(), None);
    for tier in [
        PerformanceTier::Low,
        PerformanceTier::Medium,
        PerformanceTier::High,
    ] {
        assert_eq!(select_tier(tier, None, &hints), tier);
    }
}

#[test]
fn any_constrained_signal_forces_low() {
    let base = DeviceHints::capable();

    let low_mem = DeviceHints {
        device_memory_gb: Some(2.0),
        ..base
    };
    let slow_net = DeviceHints {
        effective_type: Some(NetworkType::G3),
        ..base
    };
    let narrow = DeviceHints {
        viewport_width: Some(390),
        ..base
    };

    for hints in [low_mem, slow_net, narrow] {
        assert_eq!(
            select_tier(PerformanceTier::High, None, &hints),
            PerformanceTier::Low
        );
    }
}

#[test]
fn unreadable_signal_falls_back_to_low() {
    let hints = DeviceHints {
        device_memory_gb: None,
        ..DeviceHints::capable()
    };
    assert_eq!(hints.constraint(), Some("device memory unavailable"));
    assert_eq!(
        select_tier(PerformanceTier::High, None, &hints),
        PerformanceTier::Low
    );
    assert_eq!(
        select_tier(PerformanceTier::High, None, &DeviceHints::default()),
        PerformanceTier::Low
    );
}

#[test]
fn forced_tier_skips_detection() {
    assert_eq!(
        select_tier(
            PerformanceTier::Low,
            Some(PerformanceTier::High),
            &DeviceHints::default()
        ),
        PerformanceTier::High
    );
}

#[test]
fn network_type_parsing() {
    assert_eq!(NetworkType::parse("slow-2g").unwrap(), NetworkType::Slow2g);
    assert_eq!(NetworkType::parse("4G").unwrap(), NetworkType::G4);
    assert!(NetworkType::parse("5g").is_err());
    assert!(NetworkType::G2.is_constrained());
    assert!(!NetworkType::G4.is_constrained());

    let json = serde_json::json!({ "effective_type": "slow-2g" });
    let hints: DeviceHints = serde_json::from_value(json).unwrap();
    assert_eq!(hints.effective_type, Some(NetworkType::Slow2g));
}
