use super::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn rotation_stays_normalized_for_any_delta() {
    let speed = Span::new(1.2, 2.4);
    let mut state = AnimationState::new(speed);
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let deltas = [
        0.016,
        0.0,
        -5.0,
        f64::NAN,
        f64::INFINITY,
        3_600.0,
        1e9,
        0.033,
        86_400.0 * 365.0,
    ];
    for _ in 0..100 {
        for dt in deltas {
            state.advance(dt, speed, &mut rng);
            assert!(
                (0.0..360.0).contains(&state.rotation_deg),
                "{}",
                state.rotation_deg
            );
        }
    }
}

#[test]
fn speed_smooths_toward_target_without_snapping() {
    // A degenerate range keeps any resample equal to the current target.
    let speed = Span::new(10.0, 10.0);
    let mut state = AnimationState {
        rotation_deg: 0.0,
        current_speed: 0.0,
        target_speed: 10.0,
    };
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    state.advance(0.016, speed, &mut rng);
    assert!((state.current_speed - 0.2).abs() < 1e-12);
    state.advance(0.016, speed, &mut rng);
    assert!((state.current_speed - 0.396).abs() < 1e-12);
    assert!(state.current_speed < state.target_speed);
}

#[test]
fn target_resamples_eventually_and_stays_in_range() {
    let speed = Span::new(0.2, 0.5);
    let mut state = AnimationState::new(speed);
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut changed = false;
    for _ in 0..5_000 {
        let before = state.target_speed;
        state.advance(0.016, speed, &mut rng);
        assert!(speed.contains(state.target_speed));
        changed |= state.target_speed != before;
    }
    assert!(changed);
}

#[test]
fn rotation_advances_proportionally_to_elapsed_time() {
    let speed = Span::new(1.0, 1.0);
    let mut state = AnimationState::new(speed);
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    state.advance(1.0, speed, &mut rng);
    assert!((state.rotation_deg - 60.0).abs() < 1e-9);
}

#[test]
fn frame_skip_strides_by_tier() {
    for (tier, every) in [
        (PerformanceTier::High, 1),
        (PerformanceTier::Medium, 2),
        (PerformanceTier::Low, 3),
    ] {
        let mut skip = FrameSkip::for_tier(tier);
        let processed = (0..12).filter(|_| skip.should_process()).count();
        assert_eq!(processed, 12 / every);
    }
}

#[test]
fn clock_measures_from_last_processed_tick() {
    let mut clock = FrameClock::new(PerformanceTier::Low);
    assert_eq!(clock.begin_tick(0.0), Some(0.0));
    assert_eq!(clock.begin_tick(16.0), None);
    assert_eq!(clock.begin_tick(32.0), None);
    assert_eq!(clock.begin_tick(48.0), Some(48.0));
}

#[test]
fn clock_baseline_reset_and_bad_timestamps() {
    let mut clock = FrameClock::new(PerformanceTier::High);
    assert_eq!(clock.begin_tick(100.0), Some(0.0));
    assert_eq!(clock.begin_tick(50.0), Some(0.0));
    clock.reset_baseline();
    assert_eq!(clock.begin_tick(10_000.0), Some(0.0));
    assert_eq!(clock.begin_tick(f64::NAN), Some(0.0));
    assert_eq!(clock.begin_tick(10_016.0), Some(16.0));
}

#[test]
fn changing_tier_changes_stride() {
    let mut clock = FrameClock::new(PerformanceTier::High);
    assert_eq!(clock.stride(), 1);
    clock.set_tier(PerformanceTier::Low);
    assert_eq!(clock.stride(), 3);
}
