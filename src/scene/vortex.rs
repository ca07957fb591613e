use std::f64::consts::TAU;

use rand::Rng;

use crate::{
    config::{engine::Visualization, profile::ConfigProfile},
    foundation::{
        core::{BezPath, Point, Vec2},
        math::{jitter, polar, sample_count, sample_f64, wrap_degrees},
    },
    scene::{
        GenerateCtx,
        model::{Primitive, Scene, ShapeKind, StyleRef},
    },
};

/// Revolutions of the two base spirals.
pub const BASE_SPINS: f64 = 3.0;
/// Radius at which the base spirals start.
pub const BASE_START_RADIUS: f64 = 4.0;
const SAMPLES_PER_SPIN: f64 = 48.0;
/// Spirals overshoot the corners so rotation never exposes their ends.
const RADIUS_OVERSHOOT: f64 = 1.1;
/// Noise dots are scattered over `[-MARGIN, 1 + MARGIN]` of each axis.
pub const DOT_MARGIN: f64 = 0.1;
pub const ACCENT_SLOTS: u8 = 4;

const GLYPHS: [&str; 14] = [
    "0", "1", "#", "%", "&", "?", "/", "<", ">", "λ", "Σ", "π", "∆", "∞",
];

/// Archimedean spiral `r(t) = start + a*t`, swept over `spins` revolutions with `a` chosen so
/// the curve ends exactly at `max_radius`.
pub fn spiral_path(
    center: Point,
    start_radius: f64,
    max_radius: f64,
    spins: f64,
    phase_deg: f64,
) -> BezPath {
    let mut path = BezPath::new();
    let sweep = spins.max(0.0) * TAU;
    if sweep <= 0.0 {
        path.move_to(polar(center, max_radius, phase_deg));
        return path;
    }

    let a = (max_radius - start_radius) / sweep;
    let steps = (spins * SAMPLES_PER_SPIN).ceil().max(2.0) as usize;
    let phase = phase_deg.to_radians();
    for i in 0..=steps {
        let t = sweep * (i as f64) / (steps as f64);
        let r = start_radius + a * t;
        let p = center + Vec2::new((t + phase).cos(), (t + phase).sin()) * r;
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    path
}

/// A short spiral arc with radial glitch offsets every few samples.
fn glitch_arc<R: Rng + ?Sized>(
    rng: &mut R,
    center: Point,
    max_radius: f64,
    rotation_deg: f64,
) -> BezPath {
    let r0 = max_radius * rng.gen_range(0.05..=0.6);
    let spins: f64 = rng.gen_range(0.25..=1.0);
    let growth = max_radius * rng.gen_range(0.05..=0.3);
    let phase = rotation_deg + rng.gen_range(0.0..360.0);
    let steps = (spins * 32.0).ceil().max(2.0) as usize;
    let glitch_every = rng.gen_range(3..=7);

    let mut path = BezPath::new();
    for i in 0..=steps {
        let u = (i as f64) / (steps as f64);
        let mut r = r0 + growth * u;
        if i > 0 && i % glitch_every == 0 {
            r += jitter(rng, 6.0);
        }
        let p = polar(center, r, phase + u * spins * 360.0);
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    path
}

/// Outline for falling shapes that are not plain rect/circle/ring. Coordinates are relative to
/// the shape's origin.
fn shape_outline<R: Rng + ?Sized>(rng: &mut R, shape: ShapeKind, size: f64) -> Option<BezPath> {
    let mut path = BezPath::new();
    match shape {
        ShapeKind::Rect | ShapeKind::Circle | ShapeKind::Ring => return None,
        ShapeKind::Shard => {
            path.move_to((rng.gen_range(0.0..=size * 0.4), 0.0));
            path.line_to((size, rng.gen_range(0.0..=size * 0.5)));
            path.line_to((rng.gen_range(0.0..=size * 0.6), size));
            path.close_path();
        }
        ShapeKind::Line => {
            path.move_to((0.0, 0.0));
            path.line_to((size, size));
        }
        ShapeKind::Arc => {
            let c = Point::new(size / 2.0, size / 2.0);
            let start = rng.gen_range(0.0..360.0);
            let sweep = rng.gen_range(90.0..=240.0);
            for i in 0..=12 {
                let p = polar(c, size / 2.0, start + sweep * (i as f64) / 12.0);
                if i == 0 {
                    path.move_to(p);
                } else {
                    path.line_to(p);
                }
            }
        }
        ShapeKind::Icon => {
            // Plus sign.
            let h = size / 2.0;
            path.move_to((h, 0.0));
            path.line_to((h, size));
            path.move_to((0.0, h));
            path.line_to((size, h));
        }
    }
    Some(path)
}

/// Radial glitch vortex.
#[tracing::instrument(level = "debug", skip(profile, rng))]
pub fn generate<R: Rng + ?Sized>(profile: &ConfigProfile, ctx: GenerateCtx, rng: &mut R) -> Scene {
    let canvas = ctx.canvas;
    let (w, h) = (canvas.w(), canvas.h());
    let center = canvas.center();
    let max_radius = canvas.half_diagonal() * RADIUS_OVERSHOOT;
    let rotation = wrap_degrees(ctx.rotation_deg);

    let base_paths = [
        spiral_path(center, BASE_START_RADIUS, max_radius, BASE_SPINS, rotation),
        spiral_path(
            center,
            BASE_START_RADIUS,
            max_radius,
            BASE_SPINS,
            rotation + 180.0,
        ),
    ];

    let mut primitives = Vec::new();

    let paths = sample_count(rng, profile.paths);
    for i in 0..paths {
        primitives.push(Primitive::Path {
            path: glitch_arc(rng, center, max_radius, rotation),
            stroke_width: sample_f64(rng, profile.stroke_width),
            opacity: sample_f64(rng, profile.path_opacity),
            duration_s: sample_f64(rng, profile.duration_s),
            style: if i % 2 == 0 {
                StyleRef::Gradient
            } else {
                StyleRef::Accent(((i / 2) % u32::from(ACCENT_SLOTS)) as u8)
            },
            reveal_at: 0.0,
        });
    }

    let dots = sample_count(rng, profile.dots);
    for _ in 0..dots {
        let x = rng.gen_range(-DOT_MARGIN * w..=(1.0 + DOT_MARGIN) * w);
        let y = rng.gen_range(-DOT_MARGIN * h..=(1.0 + DOT_MARGIN) * h);
        primitives.push(Primitive::Dot {
            center: Point::new(x, y),
            radius: sample_f64(rng, profile.size),
            opacity: sample_f64(rng, profile.dot_opacity),
            duration_s: sample_f64(rng, profile.duration_s),
            style: StyleRef::Stroke,
        });
    }

    let glyphs = sample_count(rng, profile.glyphs);
    if glyphs > 0 {
        let step = 360.0 / f64::from(glyphs);
        for i in 0..glyphs {
            let angle = rotation + step * f64::from(i) + jitter(rng, step * 0.25);
            let radius = canvas.min_dim() * rng.gen_range(0.18..=0.42);
            let text = GLYPHS[rng.gen_range(0..GLYPHS.len())].to_string();
            primitives.push(Primitive::TextGlyph {
                position: polar(center, radius, angle),
                text,
                font_size: 10.0 + 4.0 * sample_f64(rng, profile.size),
                rotation_deg: wrap_degrees(angle + 90.0),
                opacity: sample_f64(rng, profile.glyph_opacity),
                duration_s: sample_f64(rng, profile.duration_s),
                style: StyleRef::Glyph,
            });
        }
    }

    let falling = sample_count(rng, profile.falling);
    for i in 0..falling {
        let shape = ShapeKind::ALL[(i as usize) % ShapeKind::ALL.len()];
        let size = 6.0 + 4.0 * sample_f64(rng, profile.size);
        let x = rng.gen_range(0.0..=w);
        let y = -(size + rng.gen_range(0.0..=h * 0.5));
        primitives.push(Primitive::FallingShape {
            shape,
            origin: Point::new(x, y),
            size,
            stroke_width: sample_f64(rng, profile.stroke_width),
            rotation_deg: rng.gen_range(0.0..360.0),
            path: shape_outline(rng, shape, size),
            opacity: sample_f64(rng, profile.shape_opacity),
            duration_s: sample_f64(rng, profile.duration_s),
            style: StyleRef::Accent((i % u32::from(ACCENT_SLOTS)) as u8),
        });
    }

    tracing::debug!(paths, dots, glyphs, falling, "vortex scene generated");

    Scene {
        visualization: Visualization::Vortex,
        theme: ctx.theme,
        canvas,
        rotation_deg: rotation,
        base_paths,
        primitives,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/vortex.rs"]
mod tests;
