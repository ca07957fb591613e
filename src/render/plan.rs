use kurbo::Shape;

use crate::{
    animation::{burst::BurstState, ease::pulse_envelope},
    config::{engine::Visualization, profile::PerformanceTier},
    foundation::{
        core::{Affine, BezPath, Canvas, Point, Rect, Vec2},
        math::polar,
    },
    render::palette::{Paint, ThemePalette},
    scene::{Primitive, PrimitiveKind, Scene, ShapeKind},
};

const SHAPE_TOLERANCE: f64 = 0.1;
/// Peak opacity of the burst color pulse.
const PULSE_MAX_OPACITY: f64 = 0.22;
const DISTORTION_OPACITY: f64 = 0.08;
const DISTORTION_SCALE_PX: f64 = 12.0;
const BASE_PATH_OPACITY: f64 = 0.35;
const BASE_PATH_WIDTH: f64 = 1.5;

/// Everything needed to compile one frame. Borrowed from the engine; nothing is copied.
#[derive(Clone, Copy, Debug)]
pub struct FrameInputs<'a> {
    pub scene: &'a Scene,
    pub palette: &'a ThemePalette,
    pub tier: PerformanceTier,
    pub burst: BurstState,
    pub rotation_deg: f64,
    pub scroll_progress: f64,
    /// Freeze all CSS-style motion in the output.
    pub frozen: bool,
    /// Burst profile flags, only honored while a burst is active.
    pub distortion: bool,
    pub color_pulse: bool,
}

/// Per-kind draw limits for a tier. `None` is unbounded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DrawCaps {
    pub paths: Option<usize>,
    pub dots: Option<usize>,
    pub glyphs: Option<usize>,
    pub falling: Option<usize>,
    pub decorations: Option<usize>,
}

impl DrawCaps {
    pub fn for_tier(tier: PerformanceTier) -> Self {
        match tier {
            PerformanceTier::Low => Self {
                paths: Some(6),
                dots: Some(30),
                glyphs: Some(6),
                falling: Some(8),
                decorations: Some(24),
            },
            PerformanceTier::Medium => Self {
                paths: Some(12),
                dots: Some(60),
                glyphs: Some(12),
                falling: Some(16),
                decorations: Some(60),
            },
            PerformanceTier::High => Self {
                paths: None,
                dots: None,
                glyphs: None,
                falling: None,
                decorations: None,
            },
        }
    }
}

/// Visual-only effects. They never change geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VisualFx {
    pub glow: bool,
    pub chromatic: bool,
}

impl VisualFx {
    pub const NONE: Self = Self {
        glow: false,
        chromatic: false,
    };
}

/// Looping motion attached to a draw op. Surfaces that cannot animate ignore it.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Motion {
    Static,
    /// Opacity breathing.
    Pulse { duration_s: f64 },
    /// Vertical drop by `distance` pixels, restarting from the origin.
    Fall { distance: f64, duration_s: f64 },
    /// Stroke drawn on from start to end.
    Draw { duration_s: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum OverlayKind {
    /// Turbulence displacement of everything drawn so far, plus a faint tint.
    Distortion,
    /// Flat tint whose opacity follows the burst envelope.
    Pulse,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum DrawOp {
    Background {
        paint: Paint,
    },
    Stroke {
        path: BezPath,
        transform: Affine,
        paint: Paint,
        width: f64,
        opacity: f64,
        motion: Motion,
        fx: VisualFx,
    },
    Fill {
        path: BezPath,
        transform: Affine,
        paint: Paint,
        opacity: f64,
        motion: Motion,
        fx: VisualFx,
    },
    Text {
        position: Point,
        text: String,
        font_size: f64,
        rotation_deg: f64,
        transform: Affine,
        paint: Paint,
        opacity: f64,
        motion: Motion,
    },
    Overlay {
        kind: OverlayKind,
        paint: Paint,
        opacity: f64,
        displacement_px: f64,
    },
}

/// Counters describing what the compiler kept and dropped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DrawStats {
    pub paths: usize,
    pub dots: usize,
    pub glyphs: usize,
    pub falling: usize,
    pub decorations: usize,
    /// Primitives skipped by a tier cap.
    pub capped: usize,
    /// Vine primitives not yet revealed by scroll progress.
    pub hidden: usize,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DrawPlan {
    pub canvas: Canvas,
    pub frozen: bool,
    pub ops: Vec<DrawOp>,
    pub stats: DrawStats,
}

struct Budget {
    limit: Option<usize>,
    used: usize,
}

impl Budget {
    fn new(limit: Option<usize>) -> Self {
        Self { limit, used: 0 }
    }

    fn take(&mut self) -> bool {
        if self.limit.is_some_and(|limit| self.used >= limit) {
            return false;
        }
        self.used += 1;
        true
    }
}

/// Compile the current scene into an ordered list of draw ops.
///
/// The scene is only read; caps and reveal gating drop ops, never primitives.
pub fn compile_frame(inputs: &FrameInputs<'_>) -> DrawPlan {
    let scene = inputs.scene;
    let canvas = scene.canvas;
    let burst_active = inputs.burst.active;
    let caps = DrawCaps::for_tier(inputs.tier);
    let fx = VisualFx {
        glow: inputs.tier != PerformanceTier::Low,
        chromatic: burst_active && inputs.tier == PerformanceTier::High,
    };

    let view = match scene.visualization {
        Visualization::Vortex => {
            Affine::rotate_about(inputs.rotation_deg.to_radians(), canvas.center())
        }
        Visualization::Vine => Affine::IDENTITY,
    };

    let mut ops = Vec::with_capacity(scene.primitives.len() + 5);
    let mut stats = DrawStats::default();
    ops.push(DrawOp::Background {
        paint: Paint::Linear(inputs.palette.background),
    });

    let base_paint = match scene.visualization {
        Visualization::Vortex => Paint::Linear(inputs.palette.gradient(burst_active)),
        Visualization::Vine => Paint::Solid(inputs.palette.stem),
    };
    for path in scene.base_paths.iter().filter(|p| !p.elements().is_empty()) {
        ops.push(DrawOp::Stroke {
            path: path.clone(),
            transform: view,
            paint: base_paint,
            width: BASE_PATH_WIDTH,
            opacity: BASE_PATH_OPACITY,
            motion: Motion::Static,
            fx: VisualFx::NONE,
        });
    }

    let mut paths = Budget::new(match scene.visualization {
        Visualization::Vortex => caps.paths,
        Visualization::Vine => None,
    });
    let mut dots = Budget::new(caps.dots);
    let mut glyphs = Budget::new(caps.glyphs);
    let mut falling = Budget::new(caps.falling);
    let mut decorations = Budget::new(caps.decorations);

    for prim in &scene.primitives {
        if prim.reveal_at() > inputs.scroll_progress {
            stats.hidden += 1;
            continue;
        }
        let (budget, counter) = match prim.kind() {
            PrimitiveKind::Path => (&mut paths, &mut stats.paths),
            PrimitiveKind::Dot => (&mut dots, &mut stats.dots),
            PrimitiveKind::TextGlyph => (&mut glyphs, &mut stats.glyphs),
            PrimitiveKind::FallingShape => (&mut falling, &mut stats.falling),
            PrimitiveKind::Flower | PrimitiveKind::Leaf | PrimitiveKind::Bud => {
                (&mut decorations, &mut stats.decorations)
            }
        };
        if !budget.take() {
            stats.capped += 1;
            continue;
        }
        *counter += 1;

        let paint = inputs.palette.resolve(prim.style(), burst_active);
        ops.push(primitive_op(prim, paint, view, fx, scene));
    }

    if burst_active {
        if inputs.distortion {
            ops.push(DrawOp::Overlay {
                kind: OverlayKind::Distortion,
                paint: Paint::Solid(inputs.palette.overlay),
                opacity: DISTORTION_OPACITY,
                displacement_px: DISTORTION_SCALE_PX,
            });
        }
        if inputs.color_pulse {
            let opacity = PULSE_MAX_OPACITY * pulse_envelope(inputs.burst.progress());
            ops.push(DrawOp::Overlay {
                kind: OverlayKind::Pulse,
                paint: Paint::Solid(inputs.palette.overlay),
                opacity,
                displacement_px: 0.0,
            });
        }
    }

    DrawPlan {
        canvas,
        frozen: inputs.frozen,
        ops,
        stats,
    }
}

fn primitive_op(prim: &Primitive, paint: Paint, view: Affine, fx: VisualFx, scene: &Scene) -> DrawOp {
    match prim {
        Primitive::Path {
            path,
            stroke_width,
            opacity,
            duration_s,
            ..
        } => {
            // Vine curves draw on; vortex arcs flicker.
            let motion = match scene.visualization {
                Visualization::Vine => Motion::Draw {
                    duration_s: *duration_s,
                },
                Visualization::Vortex => Motion::Pulse {
                    duration_s: *duration_s,
                },
            };
            DrawOp::Stroke {
                path: path.clone(),
                transform: view,
                paint,
                width: *stroke_width,
                opacity: *opacity,
                motion,
                fx,
            }
        }
        Primitive::Dot {
            center,
            radius,
            opacity,
            duration_s,
            ..
        } => DrawOp::Fill {
            path: kurbo::Circle::new(*center, *radius).to_path(SHAPE_TOLERANCE),
            transform: view,
            paint,
            opacity: *opacity,
            motion: Motion::Pulse {
                duration_s: *duration_s,
            },
            fx: VisualFx::NONE,
        },
        Primitive::TextGlyph {
            position,
            text,
            font_size,
            rotation_deg,
            opacity,
            duration_s,
            ..
        } => DrawOp::Text {
            position: *position,
            text: text.clone(),
            font_size: *font_size,
            rotation_deg: *rotation_deg,
            transform: view,
            paint,
            opacity: *opacity,
            motion: Motion::Pulse {
                duration_s: *duration_s,
            },
        },
        Primitive::FallingShape {
            shape,
            origin,
            size,
            stroke_width,
            rotation_deg,
            path,
            opacity,
            duration_s,
            ..
        } => {
            let local = Rect::new(0.0, 0.0, *size, *size);
            let outline = match (shape, path) {
                (ShapeKind::Circle | ShapeKind::Ring, _) => {
                    kurbo::Circle::new(local.center(), size / 2.0).to_path(SHAPE_TOLERANCE)
                }
                (_, Some(p)) => p.clone(),
                (_, None) => local.to_path(SHAPE_TOLERANCE),
            };
            let transform = Affine::translate(origin.to_vec2())
                * Affine::rotate_about(rotation_deg.to_radians(), local.center());
            let motion = Motion::Fall {
                distance: scene.canvas.h() - origin.y + size,
                duration_s: *duration_s,
            };
            if *shape == ShapeKind::Circle {
                DrawOp::Fill {
                    path: outline,
                    transform,
                    paint,
                    opacity: *opacity,
                    motion,
                    fx: VisualFx::NONE,
                }
            } else {
                DrawOp::Stroke {
                    path: outline,
                    transform,
                    paint,
                    width: *stroke_width,
                    opacity: *opacity,
                    motion,
                    fx: VisualFx::NONE,
                }
            }
        }
        Primitive::Flower {
            center,
            radius,
            petals,
            rotation_deg,
            opacity,
            duration_s,
            ..
        } => DrawOp::Fill {
            path: flower_path(*center, *radius, *petals, *rotation_deg),
            transform: view,
            paint,
            opacity: *opacity,
            motion: Motion::Pulse {
                duration_s: *duration_s,
            },
            fx: VisualFx::NONE,
        },
        Primitive::Leaf {
            center,
            radius,
            rotation_deg,
            opacity,
            duration_s,
            ..
        } => DrawOp::Fill {
            path: leaf_path(*center, *radius, *rotation_deg),
            transform: view,
            paint,
            opacity: *opacity,
            motion: Motion::Pulse {
                duration_s: *duration_s,
            },
            fx: VisualFx::NONE,
        },
        Primitive::Bud {
            center,
            radius,
            opacity,
            duration_s,
            ..
        } => DrawOp::Fill {
            path: kurbo::Circle::new(*center, *radius).to_path(SHAPE_TOLERANCE),
            transform: view,
            paint,
            opacity: *opacity,
            motion: Motion::Pulse {
                duration_s: *duration_s,
            },
            fx: VisualFx::NONE,
        },
    }
}

fn flower_path(center: Point, radius: f64, petals: u8, rotation_deg: f64) -> BezPath {
    if petals <= 1 {
        return kurbo::Circle::new(center, radius).to_path(SHAPE_TOLERANCE);
    }
    let mut out = BezPath::new();
    let step = 360.0 / f64::from(petals);
    for i in 0..petals {
        let deg = rotation_deg + step * f64::from(i);
        let petal_center = polar(center, radius * 0.5, deg);
        let petal = kurbo::Ellipse::new(
            petal_center,
            Vec2::new(radius * 0.5, radius * 0.25),
            deg.to_radians(),
        );
        out.extend(petal.path_elements(SHAPE_TOLERANCE));
    }
    out.extend(kurbo::Circle::new(center, radius * 0.2).path_elements(SHAPE_TOLERANCE));
    out
}

fn leaf_path(center: Point, radius: f64, rotation_deg: f64) -> BezPath {
    let tip = polar(center, radius, rotation_deg);
    let stem = polar(center, radius, rotation_deg + 180.0);
    let left = polar(center, radius * 0.6, rotation_deg + 90.0);
    let right = polar(center, radius * 0.6, rotation_deg - 90.0);
    let mut out = BezPath::new();
    out.move_to(stem);
    out.quad_to(left, tip);
    out.quad_to(right, stem);
    out.close_path();
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/plan.rs"]
mod tests;
