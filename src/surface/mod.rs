//! Procedural wave surface: grid mesh, wave displacement and per-frame orchestration.

mod mesh;
mod system;
mod wave;

// Re-export public types
pub use mesh::{grid_vertex_count, CellSplit, SurfaceMesh, Vertex};
pub use system::{FrameOutput, WaveSurface};
pub use wave::{trochoid_factor, Baseline, FrameDirty, WaveClock, WaveEngine};
