#![forbid(unsafe_code)]
//! Procedural generative animation engine for decorative vector backgrounds.
//!
//! Two visualizations are supported: a radial glitch vortex and an organic vine growth overlay.
//! A host mounts an [`Engine`] with an [`EngineConfig`] and an [`Environment`] of input
//! signals, calls [`Engine::tick`] once per frame, and draws [`Engine::frame`] through the
//! [`render`] adapter.
//!
//! ```no_run
//! use flourish::{DeviceHints, Engine, EngineConfig, Environment, SvgOptions, Theme, render_svg};
//!
//! let env = Environment::fixed(Theme::Dark, DeviceHints::default());
//! let mut engine = Engine::new(EngineConfig::default(), env)?;
//! for i in 0..60 {
//!     engine.tick(f64::from(i) * 16.0);
//! }
//! let svg = render_svg(&engine.frame(), SvgOptions::default())?;
//! # Ok::<(), flourish::FlourishError>(())
//! ```

pub mod animation;
pub mod config;
pub mod engine;
pub mod env;
pub mod foundation;
pub mod render;
pub mod scene;

pub use animation::{
    burst::{BurstController, BurstPhase, BurstState, BurstTransition},
    clock::{AnimationState, FrameClock},
};
pub use config::{
    engine::{BurstTiming, EngineConfig, Visualization},
    profile::{ConfigProfile, PerformanceTier, ProfileKind, ProfileSet},
};
pub use engine::{Engine, EngineStats, TickOutcome};
pub use env::{Constant, DeviceHints, Environment, NetworkType, Signal, SignalCell, Theme};
pub use foundation::{
    core::{Canvas, Fps, Rgba8, Span},
    error::{FlourishError, FlourishResult},
};
pub use render::{
    DrawOp, DrawPlan, DrawSurface, FrameInputs, FrameRGBA, SvgOptions, SvgSurface, ThemePalette,
    compile_frame, execute_plan, rasterize_svg, render_frame, render_svg,
};
pub use scene::{GenerateCtx, Primitive, PrimitiveKind, Scene, generate};
