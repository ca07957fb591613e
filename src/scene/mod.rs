//! Scene generation: profile + rotation/progress + RNG -> immutable [`Scene`].

pub mod model;
pub mod vine;
pub mod vortex;

use rand::Rng;

use crate::{
    config::{engine::Visualization, profile::ConfigProfile},
    env::Theme,
    foundation::core::Canvas,
};

pub use model::{Primitive, PrimitiveKind, Scene, ShapeKind, StyleRef};

/// Inputs shared by both generators besides the profile and RNG.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerateCtx {
    pub canvas: Canvas,
    /// Vortex rotation in degrees, or vine growth phase.
    pub rotation_deg: f64,
    pub theme: Theme,
}

/// Produce a new scene for `visualization`.
pub fn generate<R: Rng + ?Sized>(
    visualization: Visualization,
    profile: &ConfigProfile,
    ctx: GenerateCtx,
    rng: &mut R,
) -> Scene {
    match visualization {
        Visualization::Vortex => vortex::generate(profile, ctx, rng),
        Visualization::Vine => vine::generate(profile, ctx, rng),
    }
}
