use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use flourish::{
    Constant, DeviceHints, Engine, EngineConfig, EngineStats, Environment, Fps, NetworkType,
    PerformanceTier, ProfileKind, SvgOptions, Theme, TickOutcome, Visualization,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "flourish", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate, then write the final frame as an animated SVG.
    Svg(OutArgs),
    /// Simulate, then rasterize the final frame to a PNG.
    Frame(OutArgs),
    /// Simulate and write a per-tick JSON trace (stdout when `--out` is omitted).
    Trace(TraceArgs),
}

#[derive(Args, Debug)]
struct SimArgs {
    /// Engine config JSON. Flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// `vortex` or `vine`.
    #[arg(long, value_parser = Visualization::parse)]
    visual: Option<Visualization>,

    /// `light` or `dark`.
    #[arg(long, value_parser = Theme::parse, default_value = "dark")]
    theme: Theme,

    /// Force a performance tier (`low`, `medium`, `high`) instead of detecting one.
    #[arg(long, value_parser = PerformanceTier::parse)]
    tier: Option<PerformanceTier>,

    /// Reported device memory in GB for tier detection.
    #[arg(long, default_value_t = 8.0)]
    device_memory: f64,

    /// Reported network type (`slow-2g`, `2g`, `3g`, `4g`) for tier detection.
    #[arg(long, value_parser = NetworkType::parse, default_value = "4g")]
    network: NetworkType,

    #[arg(long)]
    reduced_motion: bool,

    /// Simulated wall-clock time.
    #[arg(long, default_value_t = 2.0)]
    seconds: f64,

    #[arg(long, default_value_t = 60)]
    fps: u32,

    #[arg(long)]
    seed: Option<u64>,

    /// Scroll progress in [0, 1]; gates vine reveal.
    #[arg(long, default_value_t = 1.0)]
    scroll: f64,
}

#[derive(Args, Debug)]
struct OutArgs {
    #[command(flatten)]
    sim: SimArgs,

    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct TraceArgs {
    #[command(flatten)]
    sim: SimArgs,

    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Debug, serde::Serialize)]
struct TraceTick {
    frame: u64,
    now_ms: f64,
    outcome: TickOutcome,
    rotation_deg: f64,
    burst_active: bool,
    profile: ProfileKind,
    primitives: usize,
}

#[derive(Debug, serde::Serialize)]
struct Trace {
    visualization: Visualization,
    tier: PerformanceTier,
    stats: EngineStats,
    ticks: Vec<TraceTick>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Svg(args) => cmd_svg(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Trace(args) => cmd_trace(args),
    }
}

fn load_config(args: &SimArgs) -> anyhow::Result<EngineConfig> {
    let mut cfg = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(visual) = args.visual {
        cfg.visualization = visual;
    }
    if args.tier.is_some() {
        cfg.forced_tier = args.tier;
    }
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn mount(args: &SimArgs) -> anyhow::Result<Engine> {
    let cfg = load_config(args)?;
    let device = DeviceHints {
        device_memory_gb: Some(args.device_memory),
        effective_type: Some(args.network),
        viewport_width: Some(cfg.canvas.width),
    };
    let env = Environment::fixed(args.theme, device)
        .with_reduced_motion(Constant(args.reduced_motion))
        .with_scroll_progress(Constant(args.scroll));
    Ok(Engine::new(cfg, env)?)
}

/// Tick `engine` at `fps` for `seconds`, calling `on_tick` after every tick.
fn simulate(
    engine: &mut Engine,
    args: &SimArgs,
    mut on_tick: impl FnMut(u64, f64, TickOutcome, &Engine),
) -> anyhow::Result<()> {
    let fps = Fps::new(args.fps, 1)?;
    anyhow::ensure!(
        args.seconds.is_finite() && args.seconds >= 0.0,
        "--seconds must be a non-negative number"
    );
    let frames = fps.secs_to_frames_floor(args.seconds);
    for frame in 0..=frames {
        let now_ms = frame as f64 * fps.frame_duration_ms();
        let outcome = engine.tick(now_ms);
        on_tick(frame, now_ms, outcome, engine);
    }
    tracing::info!(stats = ?engine.stats(), "simulation finished");
    Ok(())
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_svg(args: OutArgs) -> anyhow::Result<()> {
    let mut engine = mount(&args.sim)?;
    simulate(&mut engine, &args.sim, |_, _, _, _| {})?;

    let svg = flourish::render_svg(&engine.frame(), SvgOptions::default())?;
    ensure_parent(&args.out)?;
    std::fs::write(&args.out, svg)
        .with_context(|| format!("write svg '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frame(args: OutArgs) -> anyhow::Result<()> {
    let mut engine = mount(&args.sim)?;
    simulate(&mut engine, &args.sim, |_, _, _, _| {})?;

    let mut frame = flourish::render_frame(&engine.frame())?;
    frame.demultiply();
    ensure_parent(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_trace(args: TraceArgs) -> anyhow::Result<()> {
    let mut engine = mount(&args.sim)?;
    let mut ticks = Vec::new();
    simulate(&mut engine, &args.sim, |frame, now_ms, outcome, engine| {
        ticks.push(TraceTick {
            frame,
            now_ms,
            outcome,
            rotation_deg: engine.animation().rotation_deg,
            burst_active: engine.burst_state().active,
            profile: engine.active_profile_kind(),
            primitives: engine.scene().primitives.len(),
        });
    })?;

    let trace = Trace {
        visualization: engine.config().visualization,
        tier: engine.tier(),
        stats: engine.stats(),
        ticks,
    };
    let json = serde_json::to_string_pretty(&trace).context("serialize trace")?;
    match &args.out {
        Some(path) => {
            ensure_parent(path)?;
            std::fs::write(path, json)
                .with_context(|| format!("write trace '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
