pub mod burst;
pub mod clock;
pub mod ease;
