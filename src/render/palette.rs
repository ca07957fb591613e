use crate::{env::Theme, foundation::core::Rgba8, scene::StyleRef};

/// Two-stop linear gradient, top-left to bottom-right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Gradient {
    pub from: Rgba8,
    pub to: Rgba8,
}

/// Resolved fill or stroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Paint {
    Solid(Rgba8),
    Linear(Gradient),
}

/// Color tokens for one theme.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ThemePalette {
    pub theme: Theme,
    pub background: Gradient,
    pub idle: Gradient,
    pub burst: Gradient,
    pub stroke_idle: Rgba8,
    pub stroke_burst: Rgba8,
    pub accents: [Rgba8; 4],
    pub glyph: Rgba8,
    pub petals: [Rgba8; 5],
    pub leaf: Rgba8,
    pub bud: Rgba8,
    pub stem: Rgba8,
    /// Tint of the burst distortion/pulse overlays.
    pub overlay: Rgba8,
}

impl ThemePalette {
    pub const DARK: Self = Self {
        theme: Theme::Dark,
        background: Gradient {
            from: Rgba8::rgb(0x0b, 0x0d, 0x17),
            to: Rgba8::rgb(0x1a, 0x10, 0x2e),
        },
        idle: Gradient {
            from: Rgba8::rgb(0x6d, 0x5d, 0xfc),
            to: Rgba8::rgb(0x22, 0xd3, 0xee),
        },
        burst: Gradient {
            from: Rgba8::rgb(0xff, 0x2e, 0x88),
            to: Rgba8::rgb(0xff, 0xd2, 0x3f),
        },
        stroke_idle: Rgba8::rgb(0x94, 0xa3, 0xb8),
        stroke_burst: Rgba8::rgb(0xf4, 0x72, 0xb6),
        accents: [
            Rgba8::rgb(0x81, 0x8c, 0xf8),
            Rgba8::rgb(0x22, 0xd3, 0xee),
            Rgba8::rgb(0xa7, 0x8b, 0xfa),
            Rgba8::rgb(0x34, 0xd3, 0x99),
        ],
        glyph: Rgba8::rgb(0xe2, 0xe8, 0xf0),
        petals: [
            Rgba8::rgb(0xf9, 0xa8, 0xd4),
            Rgba8::rgb(0xfd, 0xe6, 0x8a),
            Rgba8::rgb(0xc4, 0xb5, 0xfd),
            Rgba8::rgb(0xfc, 0xa5, 0xa5),
            Rgba8::rgb(0x93, 0xc5, 0xfd),
        ],
        leaf: Rgba8::rgb(0x4a, 0xde, 0x80),
        bud: Rgba8::rgb(0xfb, 0xcf, 0xe8),
        stem: Rgba8::rgb(0x16, 0xa3, 0x4a),
        overlay: Rgba8::rgb(0xff, 0x2e, 0x88),
    };

    pub const LIGHT: Self = Self {
        theme: Theme::Light,
        background: Gradient {
            from: Rgba8::rgb(0xf8, 0xfa, 0xfc),
            to: Rgba8::rgb(0xe0, 0xe7, 0xff),
        },
        idle: Gradient {
            from: Rgba8::rgb(0x4f, 0x46, 0xe5),
            to: Rgba8::rgb(0x08, 0x91, 0xb2),
        },
        burst: Gradient {
            from: Rgba8::rgb(0xdb, 0x27, 0x77),
            to: Rgba8::rgb(0xd9, 0x77, 0x06),
        },
        stroke_idle: Rgba8::rgb(0x47, 0x55, 0x69),
        stroke_burst: Rgba8::rgb(0xbe, 0x18, 0x5d),
        accents: [
            Rgba8::rgb(0x43, 0x38, 0xca),
            Rgba8::rgb(0x0e, 0x74, 0x90),
            Rgba8::rgb(0x6d, 0x28, 0xd9),
            Rgba8::rgb(0x04, 0x78, 0x57),
        ],
        glyph: Rgba8::rgb(0x1e, 0x29, 0x3b),
        petals: [
            Rgba8::rgb(0xdb, 0x27, 0x77),
            Rgba8::rgb(0xd9, 0x77, 0x06),
            Rgba8::rgb(0x7c, 0x3a, 0xed),
            Rgba8::rgb(0xdc, 0x26, 0x26),
            Rgba8::rgb(0x25, 0x63, 0xeb),
        ],
        leaf: Rgba8::rgb(0x15, 0x80, 0x3d),
        bud: Rgba8::rgb(0xbe, 0x18, 0x5d),
        stem: Rgba8::rgb(0x16, 0x65, 0x34),
        overlay: Rgba8::rgb(0xdb, 0x27, 0x77),
    };

    pub fn for_theme(theme: Theme) -> &'static Self {
        match theme {
            Theme::Dark => &Self::DARK,
            Theme::Light => &Self::LIGHT,
        }
    }

    pub fn gradient(&self, burst_active: bool) -> Gradient {
        if burst_active { self.burst } else { self.idle }
    }

    pub fn stroke(&self, burst_active: bool) -> Rgba8 {
        if burst_active {
            self.stroke_burst
        } else {
            self.stroke_idle
        }
    }

    /// Map a scene style slot to a paint for the current burst state.
    pub fn resolve(&self, style: StyleRef, burst_active: bool) -> Paint {
        match style {
            StyleRef::Gradient => Paint::Linear(self.gradient(burst_active)),
            StyleRef::Stroke => Paint::Solid(self.stroke(burst_active)),
            StyleRef::Accent(i) => {
                Paint::Solid(self.accents[usize::from(i) % self.accents.len()])
            }
            StyleRef::Glyph => Paint::Solid(self.glyph),
            StyleRef::Petal(i) => Paint::Solid(self.petals[usize::from(i) % self.petals.len()]),
            StyleRef::Leaf => Paint::Solid(self.leaf),
            StyleRef::Bud => Paint::Solid(self.bud),
            StyleRef::Stem => Paint::Solid(self.stem),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/palette.rs"]
mod tests;
