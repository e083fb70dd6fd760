//! Wavesurf library - Procedural animated wave surface background

pub mod camera;
pub mod cli;
pub mod color;
pub mod error;
pub mod params;
pub mod rendering;
pub mod surface;

pub use error::WaveError;
