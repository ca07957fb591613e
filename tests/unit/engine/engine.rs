use super::*;
use crate::{
    config::engine::{BurstTiming, Visualization},
    env::{Constant, DeviceHints, SignalCell},
    foundation::core::{Canvas, Span},
};

const FRAME_MS: f64 = 16.0;

fn config(tier: PerformanceTier) -> EngineConfig {
    EngineConfig {
        canvas: Canvas::new(400, 300).unwrap(),
        forced_tier: Some(tier),
        seed: Some(7),
        ..EngineConfig::default()
    }
}

fn no_bursts(mut cfg: EngineConfig) -> EngineConfig {
    cfg.burst.delay_ms = Span::new(1e9, 1e9);
    cfg
}

fn quick_bursts(mut cfg: EngineConfig) -> EngineConfig {
    cfg.burst = BurstTiming {
        delay_ms: Span::new(100.0, 100.0),
        ..BurstTiming::default()
    };
    cfg
}

fn env() -> Environment {
    Environment::fixed(Theme::Dark, DeviceHints::default())
}

/// Tick every frame until `now` reaches `until`, returning the new `now`.
fn run(engine: &mut Engine, mut now: f64, until: f64) -> f64 {
    while now < until {
        now += FRAME_MS;
        engine.tick(now);
    }
    now
}

#[test]
fn mount_generates_a_scene_and_enables_bursts() {
    let engine = Engine::new(config(PerformanceTier::High), env()).unwrap();
    assert!(engine.is_mounted());
    assert!(!engine.scene().is_empty());
    assert_eq!(engine.stats().regenerations, 1);
    assert_eq!(engine.active_profile_kind(), ProfileKind::High);
    assert!(engine.burst_state().next_start_in_ms.is_some());
    assert!(!engine.is_frozen());
}

#[test]
fn invalid_config_is_rejected() {
    let mut cfg = config(PerformanceTier::High);
    cfg.reduced_motion_interval_ms = 0.0;
    assert!(Engine::new(cfg, env()).is_err());
}

#[test]
fn constrained_device_falls_back_to_low() {
    let mut cfg = config(PerformanceTier::High);
    cfg.forced_tier = None;
    let engine = Engine::new(cfg, env()).unwrap();
    assert_eq!(engine.tier(), PerformanceTier::Low);
}

#[test]
fn rotation_stays_wrapped_for_huge_deltas() {
    let mut engine = Engine::new(no_bursts(config(PerformanceTier::High)), env()).unwrap();
    let mut now = 0.0;
    for step in [16.0, 1e7, 3.3, 5e9, 0.0, 250.0] {
        now += step;
        engine.tick(now);
        let r = engine.animation().rotation_deg;
        assert!((0.0..360.0).contains(&r), "{r}");
    }
}

#[test]
fn reduced_motion_at_mount_freezes_rotation_and_forces_low() {
    let env = env().with_reduced_motion(Constant(true));
    let mut engine = Engine::new(config(PerformanceTier::High), env).unwrap();
    let initial = engine.animation().rotation_deg;

    run(&mut engine, 0.0, 2_000.0);

    assert_eq!(engine.animation().rotation_deg, initial);
    assert_eq!(engine.active_profile_kind(), ProfileKind::Low);
    assert_eq!(engine.tier(), PerformanceTier::Low);
    assert!(!engine.burst_state().active);
    assert_eq!(engine.burst_state().next_start_in_ms, None);
    assert!(engine.is_frozen());
}

#[test]
fn live_reduced_motion_change_freezes_and_disables_bursts() {
    let rm = SignalCell::new(false);
    let env = env().with_reduced_motion(rm.clone());
    let mut engine = Engine::new(quick_bursts(config(PerformanceTier::High)), env).unwrap();
    let now = run(&mut engine, 0.0, 500.0);
    assert!(engine.burst_state().active);
    assert!(engine.animation().rotation_deg > 0.0);

    rm.set(true);
    engine.tick(now + FRAME_MS);
    let frozen_at = engine.animation().rotation_deg;
    assert!(!engine.burst_state().active);
    assert_eq!(engine.active_profile_kind(), ProfileKind::Low);

    let mut t = now + FRAME_MS;
    for _ in 0..6 {
        t += FRAME_MS;
        engine.tick(t);
        assert_eq!(engine.animation().rotation_deg, frozen_at);
    }

    rm.set(false);
    engine.tick(t + FRAME_MS);
    assert_eq!(engine.tier(), PerformanceTier::High);
    assert!(engine.burst_state().next_start_in_ms.is_some());
}

#[test]
fn burst_runs_with_burst_profile_for_its_window() {
    let mut engine = Engine::new(quick_bursts(config(PerformanceTier::High)), env()).unwrap();
    let mut now = 0.0;
    let duration = loop {
        now += FRAME_MS;
        if let TickOutcome::Advanced {
            transition: Some(BurstTransition::Started { duration_ms }),
            ..
        } = engine.tick(now)
        {
            break duration_ms;
        }
        assert!(now < 1_000.0, "burst never started");
    };
    assert!((2_000.0..=3_000.0).contains(&duration));
    assert_eq!(engine.active_profile_kind(), ProfileKind::Burst);
    assert!(engine.frame().distortion);
    assert_eq!(engine.stats().bursts, 1);

    let started = engine.active_ms();
    let ended_at = loop {
        now += FRAME_MS;
        if let TickOutcome::Advanced {
            transition: Some(BurstTransition::Ended { .. }),
            ..
        } = engine.tick(now)
        {
            break engine.active_ms();
        }
        assert!(engine.active_profile_kind() == ProfileKind::Burst);
    };
    let lasted = ended_at - started;
    assert!(lasted >= duration && lasted <= duration + FRAME_MS, "{lasted}");
    assert_eq!(engine.active_profile_kind(), ProfileKind::High);
    assert!(engine.burst_state().next_start_in_ms.is_some());
}

#[test]
fn burst_survives_a_stalled_frame_and_uneven_ticks() {
    let mut engine = Engine::new(quick_bursts(config(PerformanceTier::High)), env()).unwrap();
    let mut now = run(&mut engine, 0.0, 96.0);
    assert!(!engine.burst_state().active);

    // A single long frame jumps well past the 100 ms start deadline.
    now += 1_504.0;
    let TickOutcome::Advanced {
        transition: Some(BurstTransition::Started { duration_ms }),
        ..
    } = engine.tick(now)
    else {
        panic!("burst should start on the stalled frame");
    };
    let started = engine.active_ms();
    assert_eq!(engine.burst_state().elapsed_ms, 0.0);

    let ended_at = loop {
        now += 15.0;
        if let TickOutcome::Advanced {
            transition: Some(BurstTransition::Ended { .. }),
            ..
        } = engine.tick(now)
        {
            break engine.active_ms();
        }
        assert!(engine.burst_state().active);
    };
    let lasted = ended_at - started;
    assert!(lasted >= duration_ms && lasted >= 2_000.0, "{lasted}");
    assert!(lasted < duration_ms + 15.0, "{lasted}");
}

#[test]
fn pausing_mid_burst_preserves_state() {
    let visible = SignalCell::new(true);
    let env = env().with_visible(visible.clone());
    let mut engine = Engine::new(quick_bursts(config(PerformanceTier::High)), env).unwrap();
    let mut now = run(&mut engine, 0.0, 600.0);
    assert!(engine.burst_state().active);

    let burst_before = engine.burst_state();
    let rotation_before = engine.animation().rotation_deg;
    let scene_before = engine.scene().clone();

    visible.set(false);
    for _ in 0..200 {
        now += FRAME_MS;
        assert_eq!(engine.tick(now), TickOutcome::Paused);
    }
    assert!(engine.is_frozen());
    assert_eq!(engine.burst_state(), burst_before);
    assert_eq!(engine.animation().rotation_deg, rotation_before);
    assert_eq!(engine.scene(), &scene_before);

    visible.set(true);
    now += 60_000.0;
    let outcome = engine.tick(now);
    assert!(matches!(outcome, TickOutcome::Advanced { dt_ms, .. } if dt_ms == 0.0));
    assert_eq!(engine.burst_state(), burst_before);
    assert_eq!(engine.animation().rotation_deg, rotation_before);
}

#[test]
fn hidden_document_pauses_too() {
    let doc = SignalCell::new(true);
    let env = env().with_document_visible(doc.clone());
    let mut engine = Engine::new(config(PerformanceTier::High), env).unwrap();
    engine.tick(16.0);
    doc.set(false);
    assert_eq!(engine.tick(32.0), TickOutcome::Paused);
    assert!(engine.is_paused());
    assert_eq!(engine.stats().paused, 1);
}

#[test]
fn theme_change_regenerates_exactly_once() {
    let theme = SignalCell::new(Theme::Dark);
    let env = env().with_theme(theme.clone());
    let mut engine = Engine::new(no_bursts(config(PerformanceTier::High)), env).unwrap();
    let now = run(&mut engine, 0.0, 160.0);
    let before = engine.stats().regenerations;

    theme.set(Theme::Light);
    // A delta far past the interval must not add a second regeneration.
    let outcome = engine.tick(now + 10_000.0);
    assert!(matches!(
        outcome,
        TickOutcome::Advanced {
            regenerated: true,
            ..
        }
    ));
    assert_eq!(engine.stats().regenerations, before + 1);
    assert_eq!(engine.scene().theme, Theme::Light);
    assert_eq!(engine.frame().palette.theme, Theme::Light);

    engine.tick(now + 10_016.0);
    assert_eq!(engine.stats().regenerations, before + 1);
}

#[test]
fn theme_change_regenerates_while_paused() {
    let theme = SignalCell::new(Theme::Dark);
    let env = env()
        .with_theme(theme.clone())
        .with_visible(Constant(false));
    let mut engine = Engine::new(config(PerformanceTier::High), env).unwrap();
    theme.set(Theme::Light);
    assert_eq!(engine.tick(16.0), TickOutcome::Paused);
    assert_eq!(engine.scene().theme, Theme::Light);
    assert_eq!(engine.stats().regenerations, 2);
}

#[test]
fn regeneration_never_outpaces_interval() {
    let mut engine = Engine::new(no_bursts(config(PerformanceTier::High)), env()).unwrap();
    let interval = engine.active_profile().regeneration_interval_ms;
    let mut last_regen = 0.0;
    let mut now = 0.0;
    let mut count = 0;
    while now < 30_000.0 {
        now += FRAME_MS;
        if let TickOutcome::Advanced {
            regenerated: true, ..
        } = engine.tick(now)
        {
            let at = engine.active_ms();
            assert!(at - last_regen >= interval, "{} < {interval}", at - last_regen);
            last_regen = at;
            count += 1;
        }
    }
    assert!(count >= 8 && count <= 10, "{count}");
}

#[test]
fn low_tier_processes_every_third_tick() {
    let mut engine = Engine::new(config(PerformanceTier::Low), env()).unwrap();
    let outcomes: Vec<_> = (1..=9).map(|i| engine.tick(f64::from(i) * FRAME_MS)).collect();
    let processed = outcomes
        .iter()
        .filter(|o| matches!(o, TickOutcome::Advanced { .. }))
        .count();
    assert_eq!(processed, 3);
    assert_eq!(engine.stats().skipped, 6);
}

#[test]
fn unmount_stops_everything() {
    let mut engine = Engine::new(config(PerformanceTier::High), env()).unwrap();
    run(&mut engine, 0.0, 100.0);
    engine.unmount();
    assert!(!engine.is_mounted());
    assert!(engine.scene().is_empty());
    assert_eq!(engine.burst_state(), BurstState::idle());
    let stats = engine.stats();
    assert_eq!(engine.tick(1e6), TickOutcome::Unmounted);
    assert_eq!(engine.stats(), stats);
    engine.unmount();
}

#[test]
fn frame_borrows_current_state() {
    let scroll = SignalCell::new(0.25);
    let env = env().with_scroll_progress(scroll.clone());
    let mut cfg = config(PerformanceTier::Medium);
    cfg.visualization = Visualization::Vine;
    let engine = Engine::new(cfg, env).unwrap();
    let frame = engine.frame();
    assert_eq!(frame.tier, PerformanceTier::Medium);
    assert_eq!(frame.scroll_progress, 0.25);
    assert_eq!(frame.scene.visualization, Visualization::Vine);
    assert!(!frame.distortion);

    scroll.set(f64::NAN);
    assert_eq!(engine.scroll_progress(), 1.0);
    scroll.set(3.0);
    assert_eq!(engine.scroll_progress(), 1.0);
}

#[test]
fn seeded_engines_are_reproducible() {
    let a = Engine::new(config(PerformanceTier::High), env()).unwrap();
    let b = Engine::new(config(PerformanceTier::High), env()).unwrap();
    assert_eq!(a.scene(), b.scene());
}
