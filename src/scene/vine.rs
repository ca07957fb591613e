use std::f64::consts::{PI, TAU};

use kurbo::{CubicBez, ParamCurve, ParamCurveDeriv};
use rand::Rng;

use crate::{
    config::{engine::Visualization, profile::ConfigProfile},
    foundation::{
        core::{BezPath, Point, Vec2},
        math::{jitter, sample_count, sample_f64, wrap_degrees},
    },
    scene::{
        GenerateCtx,
        model::{Primitive, Scene, StyleRef},
    },
};

/// Branches are never spawned from a curve at this depth or deeper.
pub const MAX_DEPTH: u32 = 3;
/// Branch slots per curve; each is filled with the profile's branch probability.
pub const MAX_BRANCHES: u32 = 2;
/// No decorations on the first samples of a curve.
pub const DECORATION_GUARD: usize = 2;
pub const PETAL_SLOTS: u8 = 5;

/// Fewest samples a curve needs to be drawn.
const MIN_SAMPLES: u32 = 3;

/// One curve to grow: from `start` toward `target`, revealed over
/// `[reveal_from, reveal_from + reveal_span]` of scroll progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Growth {
    pub start: Point,
    pub target: Point,
    pub depth: u32,
    pub reveal_from: f64,
    pub reveal_span: f64,
}

/// Sample a cubic from `start` to `target` with sinusoidal lateral displacement.
///
/// The displacement is enveloped by `sin(pi * t)` so both endpoints stay anchored.
fn wavy_samples<R: Rng + ?Sized>(
    rng: &mut R,
    start: Point,
    target: Point,
    samples: usize,
    phase: f64,
) -> Vec<(Point, Vec2)> {
    let dir = target - start;
    let len = dir.hypot();
    if len <= f64::EPSILON || samples < 2 {
        return Vec::new();
    }
    let normal = Vec2::new(-dir.y, dir.x) / len;

    let c1 = start + dir * 0.33 + normal * jitter(rng, len * 0.25);
    let c2 = start + dir * 0.66 + normal * jitter(rng, len * 0.25);
    let cubic = CubicBez::new(start, c1, c2, target);
    let deriv = cubic.deriv();

    let waves = rng.gen_range(1.0..=3.0);
    let amp = len * rng.gen_range(0.02..=0.06);

    (0..samples)
        .map(|i| {
            let t = (i as f64) / ((samples - 1) as f64);
            let base = cubic.eval(t);
            let tangent = deriv.eval(t).to_vec2();
            let tangent = if tangent.hypot() > f64::EPSILON {
                tangent.normalize()
            } else {
                dir / len
            };
            let lateral = Vec2::new(-tangent.y, tangent.x);
            let offset = amp * (PI * t).sin() * (TAU * waves * t + phase).sin();
            (base + lateral * offset, tangent)
        })
        .collect()
}

/// Smooth a polyline through `points` with quadratic segments between midpoints.
fn smooth_path(points: &[(Point, Vec2)]) -> BezPath {
    let mut path = BezPath::new();
    let Some(&(first, _)) = points.first() else {
        return path;
    };
    path.move_to(first);
    if points.len() == 2 {
        path.line_to(points[1].0);
        return path;
    }
    for pair in points.windows(2).skip(1) {
        let (ctrl, next) = (pair[0].0, pair[1].0);
        path.quad_to(ctrl, ctrl.midpoint(next));
    }
    if let Some(&(last, _)) = points.last() {
        path.line_to(last);
    }
    path
}

fn decoration<R: Rng + ?Sized>(
    rng: &mut R,
    profile: &ConfigProfile,
    at: Point,
    tangent: Vec2,
    reveal_at: f64,
) -> Primitive {
    let size = sample_f64(rng, profile.size);
    let opacity = sample_f64(rng, profile.decoration_opacity);
    let duration_s = sample_f64(rng, profile.duration_s);
    let heading = tangent.y.atan2(tangent.x).to_degrees();

    let roll: f64 = rng.r#gen();
    if roll < 0.45 {
        let petals = if rng.gen_bool(0.5) {
            1
        } else {
            rng.gen_range(5..=6)
        };
        Primitive::Flower {
            center: at,
            radius: 2.0 + size * 2.0,
            petals,
            rotation_deg: rng.gen_range(0.0..360.0),
            opacity,
            duration_s,
            style: StyleRef::Petal(rng.gen_range(0..PETAL_SLOTS)),
            reveal_at,
        }
    } else if roll < 0.85 {
        let side = if rng.gen_bool(0.5) { 45.0 } else { -45.0 };
        Primitive::Leaf {
            center: at,
            radius: 3.0 + size * 2.0,
            rotation_deg: wrap_degrees(heading + side + jitter(rng, 15.0)),
            opacity,
            duration_s,
            style: StyleRef::Leaf,
            reveal_at,
        }
    } else {
        Primitive::Bud {
            center: at,
            radius: 1.0 + size,
            opacity,
            duration_s,
            style: StyleRef::Bud,
            reveal_at,
        }
    }
}

/// Grow one curve, its decorations and (recursively) its branches into `out`.
///
/// Returns the number of curves grown, including branches.
pub fn grow<R: Rng + ?Sized>(
    rng: &mut R,
    profile: &ConfigProfile,
    growth: Growth,
    phase: f64,
    out: &mut Vec<Primitive>,
) -> u32 {
    let samples = sample_count(rng, profile.vine_samples);
    if samples < MIN_SAMPLES {
        return 0;
    }
    let points = wavy_samples(rng, growth.start, growth.target, samples as usize, phase);
    if points.is_empty() {
        return 0;
    }
    let last = (points.len() - 1) as f64;
    let reveal = |i: usize| growth.reveal_from + growth.reveal_span * (i as f64) / last;

    let thinning = 1.0 - 0.2 * f64::from(growth.depth.min(MAX_DEPTH));
    out.push(Primitive::Path {
        path: smooth_path(&points),
        stroke_width: sample_f64(rng, profile.stroke_width) * thinning.max(0.3),
        opacity: sample_f64(rng, profile.path_opacity),
        duration_s: sample_f64(rng, profile.duration_s),
        style: StyleRef::Stem,
        reveal_at: growth.reveal_from,
    });

    for (i, &(at, tangent)) in points.iter().enumerate().skip(DECORATION_GUARD) {
        if rng.r#gen::<f64>() < profile.decoration_probability {
            out.push(decoration(rng, profile, at, tangent, reveal(i)));
        }
    }

    let mut grown = 1;
    if growth.depth >= MAX_DEPTH {
        return grown;
    }

    let remaining = (growth.target - growth.start).hypot();
    for _ in 0..MAX_BRANCHES {
        if rng.r#gen::<f64>() >= profile.branch_probability {
            continue;
        }
        let at = rng.gen_range(1..points.len() - 1);
        let (start, tangent) = points[at];
        let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        let angle = sign * rng.gen_range(25.0_f64..=60.0).to_radians();
        let (sin, cos) = angle.sin_cos();
        let heading = Vec2::new(
            tangent.x * cos - tangent.y * sin,
            tangent.x * sin + tangent.y * cos,
        );
        let reach = remaining * rng.gen_range(0.3..=0.55);
        let from = reveal(at);
        grown += grow(
            rng,
            profile,
            Growth {
                start,
                target: start + heading * reach,
                depth: growth.depth + 1,
                reveal_from: from,
                reveal_span: (growth.reveal_from + growth.reveal_span - from).max(0.0) * 0.6,
            },
            phase,
            out,
        );
    }
    grown
}

/// A decoration-free stem used for the two base paths along the canvas edges.
fn edge_stem<R: Rng + ?Sized>(rng: &mut R, start: Point, target: Point, phase: f64) -> BezPath {
    smooth_path(&wavy_samples(rng, start, target, 24, phase))
}

/// Organic vine growth.
#[tracing::instrument(level = "debug", skip(profile, rng))]
pub fn generate<R: Rng + ?Sized>(profile: &ConfigProfile, ctx: GenerateCtx, rng: &mut R) -> Scene {
    let canvas = ctx.canvas;
    let (w, h) = (canvas.w(), canvas.h());
    let phase = ctx.rotation_deg.to_radians();

    let base_paths = [
        edge_stem(
            rng,
            Point::new(0.04 * w, h),
            Point::new(0.1 * w, 0.0),
            phase,
        ),
        edge_stem(
            rng,
            Point::new(0.96 * w, h),
            Point::new(0.9 * w, 0.0),
            phase,
        ),
    ];

    let mut primitives = Vec::new();
    let roots = sample_count(rng, profile.vines);
    let mut curves = 0;
    for _ in 0..roots {
        let x = rng.gen_range(0.0..=w);
        let start = Point::new(x, h);
        let target = Point::new(
            (x + jitter(rng, w * 0.2)).clamp(0.0, w),
            h * rng.gen_range(0.05..=0.4),
        );
        curves += grow(
            rng,
            profile,
            Growth {
                start,
                target,
                depth: 0,
                reveal_from: 0.0,
                reveal_span: 1.0,
            },
            phase,
            &mut primitives,
        );
    }

    tracing::debug!(roots, curves, primitives = primitives.len(), "vine scene generated");

    Scene {
        visualization: Visualization::Vine,
        theme: ctx.theme,
        canvas,
        rotation_deg: wrap_degrees(ctx.rotation_deg),
        base_paths,
        primitives,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/vine.rs"]
mod tests;
