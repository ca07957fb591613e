//! Rendering adapter: scene + palette + tier + burst state -> [`plan::DrawPlan`] -> surface.
//!
//! [`plan::compile_frame`] decides what is drawn (caps, reveal gating, effects, overlays).
//! Surfaces decide how: [`svg::SvgSurface`] emits an SVG document and [`raster`] turns one into
//! pixels.

pub mod palette;
pub mod plan;
pub mod raster;
pub mod surface;
pub mod svg;

pub use palette::{Gradient, Paint, ThemePalette};
pub use plan::{DrawCaps, DrawOp, DrawPlan, DrawStats, FrameInputs, compile_frame};
pub use raster::{FrameRGBA, rasterize_svg};
pub use surface::{DrawSurface, execute_plan};
pub use svg::{SvgOptions, SvgSurface};

use crate::foundation::error::FlourishResult;

/// Compile `inputs` and render them to an SVG document.
pub fn render_svg(inputs: &FrameInputs<'_>, opts: SvgOptions) -> FlourishResult<String> {
    let plan = compile_frame(inputs);
    let mut surface = SvgSurface::new(opts);
    execute_plan(&mut surface, &plan)
}

/// Compile `inputs` and rasterize them to RGBA8 pixels.
pub fn render_frame(inputs: &FrameInputs<'_>) -> FlourishResult<FrameRGBA> {
    let svg = render_svg(inputs, SvgOptions { animated: false })?;
    rasterize_svg(&svg, inputs.scene.canvas)
}
