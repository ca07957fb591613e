use std::sync::Arc;

use anyhow::Context;

use crate::foundation::{
    core::Canvas,
    error::{FlourishError, FlourishResult},
};

/// A rendered frame in RGBA8.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Convert premultiplied pixels to straight alpha in place, as image encoders expect.
    pub fn demultiply(&mut self) {
        if !self.premultiplied {
            return;
        }
        for px in self.data.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 {
                px[..3].fill(0);
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        self.premultiplied = false;
    }
}

fn svg_options() -> usvg::Options<'static> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    usvg::Options {
        fontdb: Arc::new(db),
        ..Default::default()
    }
}

/// Parse an SVG document with the system font set.
pub fn parse_svg(svg: &str) -> FlourishResult<usvg::Tree> {
    let opts = svg_options();
    let tree = usvg::Tree::from_str(svg, &opts).context("parse svg tree")?;
    Ok(tree)
}

/// Rasterize an SVG document into a premultiplied frame of `canvas` size.
#[tracing::instrument(level = "debug", skip(svg), fields(bytes = svg.len()))]
pub fn rasterize_svg(svg: &str, canvas: Canvas) -> FlourishResult<FrameRGBA> {
    let tree = parse_svg(svg)?;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(canvas.width, canvas.height)
        .ok_or_else(|| FlourishError::render("failed to allocate svg pixmap"))?;

    let size = tree.size();
    let sx = (canvas.width as f32) / size.width();
    let sy = (canvas.height as f32) / size.height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(&tree, xform, &mut pixmap.as_mut());
    Ok(FrameRGBA {
        width: canvas.width,
        height: canvas.height,
        data: pixmap.data().to_vec(),
        premultiplied: true,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
