use std::fmt::Write as _;

use crate::{
    foundation::{
        core::{Affine, Canvas, Rgba8},
        error::{FlourishError, FlourishResult},
    },
    render::{
        palette::{Gradient, Paint},
        plan::{DrawOp, Motion, OverlayKind, VisualFx},
        surface::DrawSurface,
    },
};

const GLOW_STD_DEV: f64 = 3.0;
const CHROMA_OFFSET_PX: f64 = 2.0;
const TURBULENCE_FREQUENCY: f64 = 0.015;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SvgOptions {
    /// Emit CSS keyframes for per-op motion. Static output is what rasterizers see.
    pub animated: bool,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self { animated: true }
    }
}

/// Builds a standalone SVG document from draw ops.
#[derive(Debug, Default)]
pub struct SvgSurface {
    opts: SvgOptions,
    canvas: Option<Canvas>,
    frozen: bool,
    gradients: Vec<Gradient>,
    body: String,
    uses_glow: bool,
    uses_chroma: bool,
    distortion_px: Option<f64>,
}

impl SvgSurface {
    pub fn new(opts: SvgOptions) -> Self {
        Self {
            opts,
            ..Self::default()
        }
    }

    fn paint_ref(&mut self, paint: Paint) -> (String, f64) {
        match paint {
            Paint::Solid(c) => (c.to_hex_rgb(), f64::from(c.alpha_f32())),
            Paint::Linear(g) => {
                let idx = match self.gradients.iter().position(|known| *known == g) {
                    Some(idx) => idx,
                    None => {
                        self.gradients.push(g);
                        self.gradients.len() - 1
                    }
                };
                (format!("url(#grad-{idx})"), 1.0)
            }
        }
    }

    fn open_group(&mut self, motion: Motion, fx: VisualFx) -> usize {
        let mut opened = 0;
        if fx.chromatic {
            self.uses_chroma = true;
            self.body.push_str(r#"<g filter="url(#chroma)">"#);
            opened += 1;
        }
        if fx.glow {
            self.uses_glow = true;
            self.body.push_str(r#"<g filter="url(#glow)">"#);
            opened += 1;
        }
        if self.opts.animated {
            let style = match motion {
                Motion::Static => None,
                Motion::Pulse { duration_s } => Some(format!(
                    "animation:flourish-pulse {duration_s:.2}s ease-in-out infinite alternate"
                )),
                Motion::Fall {
                    distance,
                    duration_s,
                } => Some(format!(
                    "--fall:{distance:.1}px;animation:flourish-fall {duration_s:.2}s linear infinite"
                )),
                Motion::Draw { duration_s } => Some(format!(
                    "animation:flourish-draw {duration_s:.2}s ease-out both"
                )),
            };
            if let Some(style) = style {
                let _ = write!(self.body, r#"<g style="{style}">"#);
                opened += 1;
            }
        }
        opened
    }

    fn close_groups(&mut self, n: usize) {
        for _ in 0..n {
            self.body.push_str("</g>");
        }
    }

    fn push_full_rect(&mut self, canvas: Canvas, fill: &str, opacity: f64) {
        let _ = write!(
            self.body,
            r#"<rect x="0" y="0" width="{}" height="{}" fill="{fill}" opacity="{opacity:.3}"/>"#,
            canvas.width, canvas.height
        );
    }

    fn defs(&self, canvas: Canvas) -> String {
        let mut defs = String::from("<defs>");
        for (idx, g) in self.gradients.iter().enumerate() {
            let _ = write!(
                defs,
                r#"<linearGradient id="grad-{idx}" gradientUnits="userSpaceOnUse" x1="0" y1="0" x2="{}" y2="{}">{}{}</linearGradient>"#,
                canvas.width,
                canvas.height,
                stop(0.0, g.from),
                stop(1.0, g.to),
            );
        }
        if self.uses_glow {
            let _ = write!(
                defs,
                r#"<filter id="glow" x="-20%" y="-20%" width="140%" height="140%"><feGaussianBlur in="SourceGraphic" stdDeviation="{GLOW_STD_DEV}" result="blur"/><feMerge><feMergeNode in="blur"/><feMergeNode in="SourceGraphic"/></feMerge></filter>"#
            );
        }
        if self.uses_chroma {
            let _ = write!(
                defs,
                concat!(
                    r#"<filter id="chroma" x="-10%" y="-10%" width="120%" height="120%">"#,
                    r#"<feOffset in="SourceGraphic" dx="{d}" dy="0" result="shift-r"/>"#,
                    r#"<feColorMatrix in="shift-r" type="matrix" values="1 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 1 0" result="red"/>"#,
                    r#"<feOffset in="SourceGraphic" dx="-{d}" dy="0" result="shift-b"/>"#,
                    r#"<feColorMatrix in="shift-b" type="matrix" values="0 0 0 0 0 0 0 0 0 0 0 0 1 0 0 0 0 0 1 0" result="blue"/>"#,
                    r#"<feBlend in="red" in2="blue" mode="screen" result="split"/>"#,
                    r#"<feBlend in="SourceGraphic" in2="split" mode="screen"/></filter>"#
                ),
                d = CHROMA_OFFSET_PX
            );
        }
        if let Some(scale) = self.distortion_px {
            let _ = write!(
                defs,
                r#"<filter id="distort" x="0" y="0" width="100%" height="100%"><feTurbulence type="fractalNoise" baseFrequency="{TURBULENCE_FREQUENCY}" numOctaves="2" result="noise"/><feDisplacementMap in="SourceGraphic" in2="noise" scale="{scale:.1}" xChannelSelector="R" yChannelSelector="G"/></filter>"#
            );
        }
        defs.push_str("</defs>");
        defs
    }

    fn style(&self) -> String {
        let mut css = String::from("<style>");
        css.push_str("@keyframes flourish-pulse{from{opacity:1}to{opacity:0.35}}");
        css.push_str("@keyframes flourish-fall{from{transform:translateY(0)}to{transform:translateY(var(--fall))}}");
        css.push_str("@keyframes flourish-draw{from{stroke-dashoffset:1}to{stroke-dashoffset:0}}");
        if self.frozen {
            css.push_str("svg *{animation-play-state:paused}");
        }
        css.push_str("</style>");
        css
    }
}

fn stop(offset: f64, color: Rgba8) -> String {
    format!(
        r#"<stop offset="{offset}" stop-color="{}" stop-opacity="{:.3}"/>"#,
        color.to_hex_rgb(),
        color.alpha_f32()
    )
}

fn draw_length_attrs(animated: bool, motion: Motion) -> &'static str {
    if animated && matches!(motion, Motion::Draw { .. }) {
        r#" pathLength="1" stroke-dasharray="1""#
    } else {
        ""
    }
}

fn transform_attr(t: Affine) -> String {
    if t == Affine::IDENTITY {
        return String::new();
    }
    let [a, b, c, d, e, f] = t.as_coeffs();
    format!(r#" transform="matrix({a:.6} {b:.6} {c:.6} {d:.6} {e:.3} {f:.3})""#)
}

fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

impl DrawSurface for SvgSurface {
    type Output = String;

    fn begin(&mut self, canvas: Canvas, frozen: bool) -> FlourishResult<()> {
        self.canvas = Some(canvas);
        self.frozen = frozen;
        self.gradients.clear();
        self.body.clear();
        self.uses_glow = false;
        self.uses_chroma = false;
        self.distortion_px = None;
        Ok(())
    }

    fn draw(&mut self, op: &DrawOp) -> FlourishResult<()> {
        let canvas = self
            .canvas
            .ok_or_else(|| FlourishError::render("svg surface: draw before begin"))?;
        match op {
            DrawOp::Background { paint } => {
                let (fill, alpha) = self.paint_ref(*paint);
                self.push_full_rect(canvas, &fill, alpha);
            }
            DrawOp::Stroke {
                path,
                transform,
                paint,
                width,
                opacity,
                motion,
                fx,
            } => {
                let (stroke, alpha) = self.paint_ref(*paint);
                let dash = draw_length_attrs(self.opts.animated, *motion);
                let groups = self.open_group(*motion, *fx);
                let _ = write!(
                    self.body,
                    r#"<path d="{}" fill="none" stroke="{stroke}" stroke-width="{width:.2}" stroke-linecap="round" opacity="{:.3}"{}{}/>"#,
                    path.to_svg(),
                    opacity * alpha,
                    dash,
                    transform_attr(*transform),
                );
                self.close_groups(groups);
            }
            DrawOp::Fill {
                path,
                transform,
                paint,
                opacity,
                motion,
                fx,
            } => {
                let (fill, alpha) = self.paint_ref(*paint);
                let groups = self.open_group(*motion, *fx);
                let _ = write!(
                    self.body,
                    r#"<path d="{}" fill="{fill}" opacity="{:.3}"{}/>"#,
                    path.to_svg(),
                    opacity * alpha,
                    transform_attr(*transform),
                );
                self.close_groups(groups);
            }
            DrawOp::Text {
                position,
                text,
                font_size,
                rotation_deg,
                transform,
                paint,
                opacity,
                motion,
            } => {
                let (fill, alpha) = self.paint_ref(*paint);
                let groups = self.open_group(*motion, VisualFx::NONE);
                let _ = write!(self.body, "<g{}>", transform_attr(*transform));
                let _ = write!(
                    self.body,
                    r#"<text x="{x:.2}" y="{y:.2}" font-family="monospace" font-size="{font_size:.1}" text-anchor="middle" fill="{fill}" opacity="{:.3}" transform="rotate({rotation_deg:.2} {x:.2} {y:.2})">{}</text></g>"#,
                    opacity * alpha,
                    escape_text(text),
                    x = position.x,
                    y = position.y,
                );
                self.close_groups(groups);
            }
            DrawOp::Overlay {
                kind,
                paint,
                opacity,
                displacement_px,
            } => {
                let (fill, alpha) = self.paint_ref(*paint);
                if *kind == OverlayKind::Distortion {
                    self.distortion_px = Some(*displacement_px);
                    self.body = format!(r#"<g filter="url(#distort)">{}</g>"#, self.body);
                }
                self.push_full_rect(canvas, &fill, opacity * alpha);
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> FlourishResult<String> {
        let canvas = self
            .canvas
            .take()
            .ok_or_else(|| FlourishError::render("svg surface: finish before begin"))?;
        let mut doc = String::with_capacity(self.body.len() + 1024);
        let _ = write!(
            doc,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = canvas.width,
            h = canvas.height
        );
        doc.push_str(&self.defs(canvas));
        if self.opts.animated {
            doc.push_str(&self.style());
        }
        doc.push_str(&self.body);
        doc.push_str("</svg>");
        self.body.clear();
        Ok(doc)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
