pub mod engine;
pub mod profile;
