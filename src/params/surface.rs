//! Grid and wave parameters for the procedural surface.

use crate::error::WaveError;
use crate::surface::grid_vertex_count;

/// Grid construction and wave animation parameters
#[derive(Debug, Clone)]
pub struct SurfaceParams {
    /// Number of cells along X (vertices per row = width_cells + 1)
    pub width_cells: usize,

    /// Number of cells along Z (vertices per column = height_cells + 1)
    pub height_cells: usize,

    /// Spacing between neighbouring vertices in world units
    pub cell_size: f32,

    /// Upper bound of the initial random height jitter (choppiness)
    pub wave_noise: f32,

    /// Wave height in world units (peak-to-trough of the trochoid factor)
    pub wave_height: f32,

    /// Wave speed multiplier (dimensionless, scales both time and space)
    pub wave_speed: f32,
}

impl Default for SurfaceParams {
    fn default() -> Self {
        Self {
            width_cells: 100,
            height_cells: 80,
            cell_size: 18.0,
            wave_noise: 4.0,
            wave_height: 15.0,
            wave_speed: 1.0,
        }
    }
}

impl SurfaceParams {
    /// Validate grid dimensions and wave inputs
    pub fn validate(&self) -> Result<(), WaveError> {
        grid_vertex_count(self.width_cells, self.height_cells)?;
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(WaveError::dimension(format!(
                "cell size must be positive, got {}",
                self.cell_size
            )));
        }
        if !self.wave_noise.is_finite() || self.wave_noise < 0.0 {
            return Err(WaveError::wave_parameter(format!(
                "wave noise must be finite and >= 0, got {}",
                self.wave_noise
            )));
        }
        if !self.wave_height.is_finite() {
            return Err(WaveError::wave_parameter(format!(
                "wave height must be finite, got {}",
                self.wave_height
            )));
        }
        if !self.wave_speed.is_finite() || self.wave_speed < 0.0 {
            return Err(WaveError::wave_parameter(format!(
                "wave speed must be finite and >= 0, got {}",
                self.wave_speed
            )));
        }
        Ok(())
    }
}
