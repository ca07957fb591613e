use crate::{
    config::engine::Visualization,
    env::Theme,
    foundation::core::{BezPath, Canvas, Point},
};

/// Palette slot a primitive is colored with. Resolved against a theme palette at draw time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum StyleRef {
    /// The idle/burst gradient.
    Gradient,
    /// The idle/burst stroke color.
    Stroke,
    /// `accents[i % accents.len()]`.
    Accent(u8),
    Glyph,
    /// `petals[i % petals.len()]`.
    Petal(u8),
    Leaf,
    Bud,
    Stem,
}

/// Falling shape subtype, cycled round-robin by the generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ShapeKind {
    Rect,
    Circle,
    Shard,
    Line,
    Arc,
    Icon,
    Ring,
}

impl ShapeKind {
    pub const ALL: [Self; 7] = [
        Self::Rect,
        Self::Circle,
        Self::Shard,
        Self::Line,
        Self::Arc,
        Self::Icon,
        Self::Ring,
    ];
}

/// A drawable vector element.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind")]
pub enum Primitive {
    Path {
        path: BezPath,
        stroke_width: f64,
        opacity: f64,
        duration_s: f64,
        style: StyleRef,
        reveal_at: f64,
    },
    Dot {
        center: Point,
        radius: f64,
        opacity: f64,
        duration_s: f64,
        style: StyleRef,
    },
    TextGlyph {
        position: Point,
        text: String,
        font_size: f64,
        rotation_deg: f64,
        opacity: f64,
        duration_s: f64,
        style: StyleRef,
    },
    FallingShape {
        shape: ShapeKind,
        /// Top-left of the shape's box; usually above the canvas.
        origin: Point,
        size: f64,
        stroke_width: f64,
        rotation_deg: f64,
        /// Outline for shapes that are not plain rects/circles/rings.
        path: Option<BezPath>,
        opacity: f64,
        duration_s: f64,
        style: StyleRef,
    },
    Flower {
        center: Point,
        radius: f64,
        /// 1 for a single bloom, more for a multi-petal flower.
        petals: u8,
        rotation_deg: f64,
        opacity: f64,
        duration_s: f64,
        style: StyleRef,
        reveal_at: f64,
    },
    Leaf {
        center: Point,
        radius: f64,
        rotation_deg: f64,
        opacity: f64,
        duration_s: f64,
        style: StyleRef,
        reveal_at: f64,
    },
    Bud {
        center: Point,
        radius: f64,
        opacity: f64,
        duration_s: f64,
        style: StyleRef,
        reveal_at: f64,
    },
}

/// Primitive discriminant, used for counting and draw caps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PrimitiveKind {
    Path,
    Dot,
    TextGlyph,
    FallingShape,
    Flower,
    Leaf,
    Bud,
}

impl Primitive {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Self::Path { .. } => PrimitiveKind::Path,
            Self::Dot { .. } => PrimitiveKind::Dot,
            Self::TextGlyph { .. } => PrimitiveKind::TextGlyph,
            Self::FallingShape { .. } => PrimitiveKind::FallingShape,
            Self::Flower { .. } => PrimitiveKind::Flower,
            Self::Leaf { .. } => PrimitiveKind::Leaf,
            Self::Bud { .. } => PrimitiveKind::Bud,
        }
    }

    pub fn style(&self) -> StyleRef {
        match self {
            Self::Path { style, .. }
            | Self::Dot { style, .. }
            | Self::TextGlyph { style, .. }
            | Self::FallingShape { style, .. }
            | Self::Flower { style, .. }
            | Self::Leaf { style, .. }
            | Self::Bud { style, .. } => *style,
        }
    }

    pub fn opacity(&self) -> f64 {
        match self {
            Self::Path { opacity, .. }
            | Self::Dot { opacity, .. }
            | Self::TextGlyph { opacity, .. }
            | Self::FallingShape { opacity, .. }
            | Self::Flower { opacity, .. }
            | Self::Leaf { opacity, .. }
            | Self::Bud { opacity, .. } => *opacity,
        }
    }

    pub fn duration_s(&self) -> f64 {
        match self {
            Self::Path { duration_s, .. }
            | Self::Dot { duration_s, .. }
            | Self::TextGlyph { duration_s, .. }
            | Self::FallingShape { duration_s, .. }
            | Self::Flower { duration_s, .. }
            | Self::Leaf { duration_s, .. }
            | Self::Bud { duration_s, .. } => *duration_s,
        }
    }

    /// Scroll progress at which the primitive becomes visible.
    pub fn reveal_at(&self) -> f64 {
        match self {
            Self::Path { reveal_at, .. }
            | Self::Flower { reveal_at, .. }
            | Self::Leaf { reveal_at, .. }
            | Self::Bud { reveal_at, .. } => *reveal_at,
            Self::Dot { .. } | Self::TextGlyph { .. } | Self::FallingShape { .. } => 0.0,
        }
    }
}

/// One regeneration's worth of content. Never mutated after construction.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    pub visualization: Visualization,
    /// Theme whose palette the style references were chosen for.
    pub theme: Theme,
    pub canvas: Canvas,
    /// Rotation/progress value the scene was generated at.
    pub rotation_deg: f64,
    /// Two decorative paths computed once per regeneration.
    pub base_paths: [BezPath; 2],
    pub primitives: Vec<Primitive>,
}

impl Scene {
    pub fn empty(visualization: Visualization, theme: Theme, canvas: Canvas) -> Self {
        Self {
            visualization,
            theme,
            canvas,
            rotation_deg: 0.0,
            base_paths: [BezPath::new(), BezPath::new()],
            primitives: Vec::new(),
        }
    }

    pub fn count(&self, kind: PrimitiveKind) -> usize {
        self.primitives.iter().filter(|p| p.kind() == kind).count()
    }

    pub fn iter_kind(&self, kind: PrimitiveKind) -> impl Iterator<Item = &Primitive> {
        self.primitives.iter().filter(move |p| p.kind() == kind)
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}
