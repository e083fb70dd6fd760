//! Parameter definitions with documented defaults and validation.
//!
//! Every tunable constant of the wave background lives here:
//! - Grid and wave shape (`SurfaceParams`)
//! - Camera rig and pointer drift (`CameraParams`)
//! - Material, lights and hue cycling (`MaterialParams`, `LightingParams`)
//! - Window and recording (`RenderConfig`, `RecordingConfig`)

mod camera;
mod material;
mod render;
mod surface;

// Re-export all types
pub use camera::CameraParams;
pub use material::{HueCycleParams, LightingParams, MaterialParams};
pub use render::{RecordingConfig, RenderConfig};
pub use surface::SurfaceParams;

use crate::error::WaveError;

/// Complete configuration for one wave surface instance
#[derive(Debug, Clone)]
pub struct WavesConfig {
    pub surface: SurfaceParams,
    pub camera: CameraParams,
    pub material: MaterialParams,
    pub lighting: LightingParams,

    /// Whether pointer movement drives the camera target
    pub mouse_controls: bool,

    /// RNG seed for the initial jitter and cell splits (entropy when `None`)
    pub seed: Option<u64>,
}

impl Default for WavesConfig {
    fn default() -> Self {
        Self {
            surface: SurfaceParams::default(),
            camera: CameraParams::default(),
            material: MaterialParams::default(),
            lighting: LightingParams::default(),
            mouse_controls: true,
            seed: None,
        }
    }
}

impl WavesConfig {
    /// Reject unusable configuration before any engine state is built
    pub fn validate(&self) -> Result<(), WaveError> {
        self.surface.validate()?;
        self.camera.validate()?;
        self.material.validate()?;
        Ok(())
    }
}
