//! Camera rig configuration.

use crate::error::WaveError;

/// Perspective camera rig with pointer-driven drift
#[derive(Debug, Clone)]
pub struct CameraParams {
    /// Initial camera position (world units)
    pub position: [f32; 3],

    /// Fixed look-at point (world units)
    pub look_at: [f32; 3],

    /// Pointer drift divisor; larger values keep the camera closer to its origin
    pub zoom: f32,

    /// Vertical field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane
    pub near_plane: f32,

    /// Far clipping plane
    pub far_plane: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            position: [240.0, 200.0, 390.0],
            look_at: [140.0, -30.0, 190.0],
            zoom: 1.0,
            fov_degrees: 35.0,
            near_plane: 50.0,
            far_plane: 10_000.0,
        }
    }
}

impl CameraParams {
    pub fn validate(&self) -> Result<(), WaveError> {
        if !self.zoom.is_finite() || self.zoom <= 0.0 {
            return Err(WaveError::InvalidZoom(self.zoom));
        }
        Ok(())
    }
}
