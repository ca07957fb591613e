//! The frame-driven engine: one [`Engine::tick`] per host frame.
//!
//! Each tick runs, in order: lifecycle check, signal polling (reduced motion, theme,
//! visibility), pause check, frame skip, clock integration, burst controller, animation and
//! regeneration. Nothing blocks and nothing fails at runtime; degraded inputs fall back to
//! conservative behavior.

pub mod perf;
pub mod regen;
pub mod visibility;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::{
    animation::{
        burst::{BurstController, BurstState, BurstTransition},
        clock::{AnimationState, FrameClock},
    },
    config::{
        engine::EngineConfig,
        profile::{ConfigProfile, PerformanceTier, ProfileKind},
    },
    env::{Environment, Signal, Theme, Watch, device::select_tier},
    foundation::{error::FlourishResult, math::sample_f64},
    render::{palette::ThemePalette, plan::FrameInputs},
    scene::{self, GenerateCtx, Scene},
};

pub use perf::PerformanceController;
pub use regen::RegenerationScheduler;
pub use visibility::{VisibilityChange, VisibilityController};

/// What a single [`Engine::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum TickOutcome {
    /// The engine was unmounted; nothing ran.
    Unmounted,
    /// Output is hidden; only signals were polled.
    Paused,
    /// Dropped by the tier's frame skip.
    Skipped,
    Advanced {
        dt_ms: f64,
        regenerated: bool,
        transition: Option<BurstTransition>,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EngineStats {
    pub ticks: u64,
    pub processed: u64,
    pub skipped: u64,
    pub paused: u64,
    pub regenerations: u64,
    pub bursts: u64,
}

pub struct Engine {
    config: EngineConfig,
    rng: ChaCha8Rng,
    perf: PerformanceController,
    visibility: VisibilityController,
    clock: FrameClock,
    burst: BurstController,
    regen: RegenerationScheduler,
    animation: AnimationState,
    scene: Scene,
    reduced_motion: Watch<bool>,
    visible: Watch<bool>,
    document_visible: Watch<bool>,
    theme: Watch<Theme>,
    scroll_progress: Box<dyn Signal<f64>>,
    /// Milliseconds of processed (unpaused) time since mount.
    active_ms: f64,
    mounted: bool,
    stats: EngineStats,
}

impl Engine {
    /// Validate `config`, pick a tier from `env`, and generate the first scene.
    pub fn new(config: EngineConfig, env: Environment) -> FlourishResult<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let tier = select_tier(config.performance_hint, config.forced_tier, &env.device);

        let Environment {
            reduced_motion,
            visible,
            document_visible,
            theme,
            scroll_progress,
            device: _,
        } = env;
        let reduced_motion = Watch::new(reduced_motion);
        let visible = Watch::new(visible);
        let document_visible = Watch::new(document_visible);
        let theme = Watch::new(theme);

        let perf = PerformanceController::new(
            tier,
            reduced_motion.value(),
            config.reduced_motion_interval_ms,
            config.profiles.clone(),
        );
        let visibility = VisibilityController::new(visible.value(), document_visible.value());
        let clock = FrameClock::new(perf.effective_tier());
        let burst = BurstController::new(config.burst);
        let animation = AnimationState::new(perf.profile(perf.active_kind(false)).speed);
        let scene = Scene::empty(config.visualization, theme.value(), config.canvas);

        let mut engine = Self {
            config,
            rng,
            perf,
            visibility,
            clock,
            burst,
            regen: RegenerationScheduler::new(),
            animation,
            scene,
            reduced_motion,
            visible,
            document_visible,
            theme,
            scroll_progress,
            active_ms: 0.0,
            mounted: true,
            stats: EngineStats::default(),
        };
        if !engine.perf.reduced_motion() {
            engine.burst.enable(0.0, &mut engine.rng);
        }
        engine.regenerate("mount");
        tracing::info!(
            visualization = ?engine.config.visualization,
            tier = engine.perf.effective_tier().as_str(),
            reduced_motion = engine.perf.reduced_motion(),
            "engine mounted"
        );
        Ok(engine)
    }

    /// Advance the engine to host time `now_ms`.
    pub fn tick(&mut self, now_ms: f64) -> TickOutcome {
        if !self.mounted {
            return TickOutcome::Unmounted;
        }
        self.stats.ticks += 1;

        let mut regenerated = false;
        if let Some(on) = self.reduced_motion.poll() {
            self.apply_reduced_motion(on);
        }
        if let Some(theme) = self.theme.poll() {
            tracing::debug!(?theme, "theme changed");
            self.regenerate("theme");
            regenerated = true;
        }
        self.poll_visibility();

        if self.visibility.is_paused() {
            self.stats.paused += 1;
            return TickOutcome::Paused;
        }

        let Some(dt_ms) = self.clock.begin_tick(now_ms) else {
            self.stats.skipped += 1;
            return TickOutcome::Skipped;
        };
        self.stats.processed += 1;
        self.active_ms += dt_ms;

        let transition = self.burst.advance(self.active_ms, &mut self.rng);
        if let Some(transition) = transition {
            if matches!(transition, BurstTransition::Started { .. }) {
                self.stats.bursts += 1;
            }
            let speed = self.perf.profile(self.active_profile_kind()).speed;
            self.animation.target_speed = sample_f64(&mut self.rng, speed);
        }

        if !self.perf.reduced_motion() {
            let speed = self.perf.profile(self.active_profile_kind()).speed;
            self.animation.advance(dt_ms / 1000.0, speed, &mut self.rng);
        }

        if !regenerated {
            let interval = self.perf.regeneration_interval_ms(self.active_profile_kind());
            if self.regen.take_due(dt_ms, interval) {
                self.regenerate("interval");
                regenerated = true;
            }
        }

        TickOutcome::Advanced {
            dt_ms,
            regenerated,
            transition,
        }
    }

    /// Stop all timers and drop the scene. Later ticks are no-ops.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.burst.disable();
        self.regen.cancel();
        self.clock.reset_baseline();
        self.mounted = false;
        self.scene = Scene::empty(
            self.config.visualization,
            self.theme.value(),
            self.config.canvas,
        );
        tracing::debug!(stats = ?self.stats, "engine unmounted");
    }

    /// Borrow everything the renderer needs for the current frame.
    pub fn frame(&self) -> FrameInputs<'_> {
        let profile = self.active_profile();
        FrameInputs {
            scene: &self.scene,
            palette: ThemePalette::for_theme(self.theme.value()),
            tier: self.perf.effective_tier(),
            burst: self.burst_state(),
            rotation_deg: self.animation.rotation_deg,
            scroll_progress: self.scroll_progress(),
            frozen: self.is_frozen(),
            distortion: profile.distortion,
            color_pulse: profile.color_pulse,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn animation(&self) -> &AnimationState {
        &self.animation
    }

    pub fn burst_state(&self) -> BurstState {
        self.burst.state(self.active_ms)
    }

    pub fn active_profile_kind(&self) -> ProfileKind {
        self.perf.active_kind(self.burst.is_active())
    }

    pub fn active_profile(&self) -> &ConfigProfile {
        self.perf.profile(self.active_profile_kind())
    }

    /// Tier currently in effect (Low while reduced motion is on).
    pub fn tier(&self) -> PerformanceTier {
        self.perf.effective_tier()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_paused(&self) -> bool {
        self.visibility.is_paused()
    }

    /// Whether rendered output should hold still.
    pub fn is_frozen(&self) -> bool {
        !self.mounted || self.visibility.is_paused() || self.perf.reduced_motion()
    }

    pub fn reduced_motion(&self) -> bool {
        self.perf.reduced_motion()
    }

    pub fn theme(&self) -> Theme {
        self.theme.value()
    }

    /// Scroll progress clamped to `[0, 1]`; unreadable values count as fully scrolled.
    pub fn scroll_progress(&self) -> f64 {
        let p = self.scroll_progress.current();
        if p.is_finite() { p.clamp(0.0, 1.0) } else { 1.0 }
    }

    /// Processed engine time in milliseconds; frozen while paused.
    pub fn active_ms(&self) -> f64 {
        self.active_ms
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    fn apply_reduced_motion(&mut self, on: bool) {
        self.perf.set_reduced_motion(on);
        self.clock.set_tier(self.perf.effective_tier());
        if on {
            self.burst.disable();
        } else {
            self.burst.enable(self.active_ms, &mut self.rng);
        }
    }

    fn poll_visibility(&mut self) {
        let mut change = None;
        if let Some(visible) = self.visible.poll() {
            change = self.visibility.set_element_visible(visible).or(change);
        }
        if let Some(visible) = self.document_visible.poll() {
            change = match (change, self.visibility.set_document_visible(visible)) {
                (Some(_), Some(_)) => None,
                (first, second) => second.or(first),
            };
        }
        match change {
            Some(VisibilityChange::Paused) => tracing::debug!("engine paused"),
            Some(VisibilityChange::Resumed) => {
                self.clock.reset_baseline();
                tracing::debug!("engine resumed");
            }
            None => {}
        }
    }

    fn regenerate(&mut self, reason: &'static str) {
        let kind = self.active_profile_kind();
        let ctx = GenerateCtx {
            canvas: self.config.canvas,
            rotation_deg: self.animation.rotation_deg,
            theme: self.theme.value(),
        };
        self.scene = scene::generate(
            self.config.visualization,
            self.perf.profile(kind),
            ctx,
            &mut self.rng,
        );
        self.regen.mark_regenerated();
        self.stats.regenerations += 1;
        tracing::debug!(
            reason,
            profile = ?kind,
            primitives = self.scene.primitives.len(),
            "scene regenerated"
        );
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("visualization", &self.config.visualization)
            .field("tier", &self.perf.effective_tier())
            .field("mounted", &self.mounted)
            .field("paused", &self.visibility.is_paused())
            .field("active_ms", &self.active_ms)
            .field("animation", &self.animation)
            .field("burst", &self.burst_state())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/engine.rs"]
mod tests;
