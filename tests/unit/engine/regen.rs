use super::*;

#[test]
fn fires_once_per_interval_under_fast_ticks() {
    let mut r = RegenerationScheduler::new();
    let mut fired_at = Vec::new();
    let mut t = 0.0;
    for _ in 0..10_000 {
        t += 1.0;
        if r.take_due(1.0, 400.0) {
            fired_at.push(t);
        }
    }
    assert_eq!(fired_at.len(), 25);
    for pair in fired_at.windows(2) {
        assert!(pair[1] - pair[0] >= 400.0);
    }
}

#[test]
fn large_delta_fires_once_and_does_not_carry_over() {
    let mut r = RegenerationScheduler::new();
    assert!(r.take_due(10_000.0, 400.0));
    assert_eq!(r.accumulated_ms(), 0.0);
    assert!(!r.take_due(16.0, 400.0));
}

#[test]
fn out_of_band_regeneration_restarts_the_interval() {
    let mut r = RegenerationScheduler::new();
    assert!(!r.take_due(399.0, 400.0));
    r.mark_regenerated();
    assert_eq!(r.accumulated_ms(), 0.0);
    assert!(!r.take_due(0.0, 400.0));
    assert!(!r.take_due(300.0, 400.0));
    assert!(r.take_due(100.0, 400.0));
}

#[test]
fn bad_deltas_are_ignored() {
    let mut r = RegenerationScheduler::new();
    assert!(!r.take_due(f64::NAN, 400.0));
    assert!(!r.take_due(-1_000.0, 400.0));
    assert_eq!(r.accumulated_ms(), 0.0);
}
