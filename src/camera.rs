//! Pointer-reactive camera with eased drift toward a target and a fixed look-at point.

use glam::{Mat4, Vec3};

use crate::error::WaveError;
use crate::params::{CameraParams, RenderConfig};

/// Fraction of the remaining distance covered each frame
const EASING: f32 = 0.02;

/// Per-axis distance below which the camera stops correcting
const DEADBAND: f32 = 0.01;

/// Camera controller driven by normalized pointer coordinates
#[derive(Debug, Clone)]
pub struct CameraController {
    position: Vec3,
    origin: Option<Vec3>,
    target: Option<Vec3>,
    look_at: Vec3,
}

impl CameraController {
    pub fn new(position: Vec3, look_at: Vec3) -> Self {
        Self {
            position,
            origin: None,
            target: None,
            look_at,
        }
    }

    pub fn from_params(params: &CameraParams) -> Self {
        Self::new(
            Vec3::from_array(params.position),
            Vec3::from_array(params.look_at),
        )
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn origin(&self) -> Option<Vec3> {
        self.origin
    }

    pub fn target(&self) -> Option<Vec3> {
        self.target
    }

    pub fn look_at(&self) -> Vec3 {
        self.look_at
    }

    /// Retarget the camera from a pointer position in [0, 1] x [0, 1]
    ///
    /// The first call remembers the current position (scaled by `1 / zoom`)
    /// as the origin that all later targets are offset from.
    pub fn on_pointer_move(&mut self, x: f32, y: f32, zoom: f32) -> Result<(), WaveError> {
        if !zoom.is_finite() || zoom <= 0.0 {
            return Err(WaveError::InvalidZoom(zoom));
        }

        let origin = match self.origin {
            Some(origin) => origin,
            None => {
                let origin = self.position / zoom;
                log::debug!("Camera origin captured at {:?}", origin);
                self.origin = Some(origin);
                origin
            }
        };

        self.target = Some(Vec3::new(
            origin.x + (x - 0.5) * 100.0 / zoom,
            origin.y + (y - 0.5) * -100.0 / zoom,
            origin.z + (x - 0.5) * -50.0 / zoom,
        ));
        Ok(())
    }

    /// Set the target directly, bypassing pointer mapping
    pub fn set_target(&mut self, target: Vec3) {
        self.target = Some(target);
    }

    /// Ease one frame toward the target
    ///
    /// Each axis moves 2% of its remaining distance, and only while that
    /// distance exceeds the deadband. Without a target the camera stays put.
    pub fn advance(&mut self) {
        let Some(target) = self.target else {
            return;
        };

        let ease = |current: &mut f32, goal: f32| {
            let diff = goal - *current;
            if diff.abs() > DEADBAND {
                *current += diff * EASING;
            }
        };

        ease(&mut self.position.x, target.x);
        ease(&mut self.position.y, target.y);
        ease(&mut self.position.z, target.z);
    }

    /// View matrix looking from the current position at the fixed look-at point
    pub fn view_matrix(&self) -> Mat4 {
        // Always keep Y as up vector (camera never rolls)
        Mat4::look_at_rh(self.position, self.look_at, Vec3::Y)
    }

    /// Create view-projection matrix for rendering
    pub fn view_proj(&self, params: &CameraParams, render_config: &RenderConfig) -> Mat4 {
        let proj = Mat4::perspective_rh(
            params.fov_degrees.to_radians(),
            render_config.aspect_ratio(),
            params.near_plane,
            params.far_plane,
        );
        proj * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32, eps: f32) -> bool {
        (a - b).abs() <= eps
    }

    #[test]
    fn test_no_motion_without_target() {
        let mut camera = CameraController::from_params(&CameraParams::default());
        let start = camera.position();
        for _ in 0..10 {
            camera.advance();
        }
        assert_eq!(camera.position(), start);
    }

    #[test]
    fn test_pointer_centre_targets_origin() {
        let mut camera = CameraController::new(Vec3::new(240.0, 200.0, 390.0), Vec3::ZERO);
        camera.on_pointer_move(0.5, 0.5, 2.0).unwrap();

        let origin = camera.origin().unwrap();
        assert_eq!(origin, Vec3::new(120.0, 100.0, 195.0));
        assert_eq!(camera.target(), Some(origin));
    }

    #[test]
    fn test_pointer_mapping() {
        let mut camera = CameraController::new(Vec3::new(10.0, 20.0, 30.0), Vec3::ZERO);
        camera.on_pointer_move(1.0, 0.0, 1.0).unwrap();

        let target = camera.target().unwrap();
        assert!(approx(target.x, 10.0 + 50.0, 1e-5));
        assert!(approx(target.y, 20.0 + 50.0, 1e-5));
        assert!(approx(target.z, 30.0 - 25.0, 1e-5));
    }

    #[test]
    fn test_origin_captured_once() {
        let mut camera = CameraController::new(Vec3::new(10.0, 20.0, 30.0), Vec3::ZERO);
        camera.on_pointer_move(0.9, 0.1, 1.0).unwrap();
        for _ in 0..100 {
            camera.advance();
        }
        assert_ne!(camera.position(), Vec3::new(10.0, 20.0, 30.0));

        camera.on_pointer_move(0.5, 0.5, 1.0).unwrap();
        assert_eq!(camera.origin(), Some(Vec3::new(10.0, 20.0, 30.0)));
        assert_eq!(camera.target(), Some(Vec3::new(10.0, 20.0, 30.0)));
    }

    #[test]
    fn test_invalid_zoom_rejected() {
        let mut camera = CameraController::new(Vec3::ONE, Vec3::ZERO);
        for zoom in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                camera.on_pointer_move(0.2, 0.8, zoom),
                Err(WaveError::InvalidZoom(_))
            ));
        }
        assert_eq!(camera.origin(), None);
        assert_eq!(camera.target(), None);
    }

    #[test]
    fn test_geometric_easing() {
        let mut camera = CameraController::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        camera.set_target(Vec3::new(10.0, 0.0, 0.0));

        for n in 1..=100 {
            camera.advance();
            let expected = 10.0 * (1.0 - 0.98_f32.powi(n));
            assert!(
                approx(camera.position().x, expected, 1e-3),
                "frame {}: {} vs {}",
                n,
                camera.position().x,
                expected
            );
            assert_eq!(camera.position().y, 0.0);
            assert_eq!(camera.position().z, 0.0);
        }
    }

    #[test]
    fn test_deadband_brings_camera_to_rest() {
        let mut camera = CameraController::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        camera.set_target(Vec3::new(10.0, 0.0, 0.0));

        // 0.98^n * 10 < 0.01 after ~342 frames
        for _ in 0..1000 {
            camera.advance();
        }
        let rest = camera.position();
        assert!((10.0 - rest.x) <= DEADBAND);
        assert!((10.0 - rest.x) > DEADBAND * (1.0 - EASING) - 1e-5);

        camera.advance();
        assert_eq!(camera.position(), rest);
    }

    #[test]
    fn test_view_proj_matrix_generation() {
        let params = CameraParams::default();
        let camera = CameraController::from_params(&params);
        let view_proj = camera.view_proj(&params, &RenderConfig::default());

        assert_ne!(view_proj, Mat4::IDENTITY);
        assert_ne!(view_proj, Mat4::ZERO);

        // Look-at point projects to the centre of the screen
        let clip = view_proj * camera.look_at().extend(1.0);
        assert!(approx(clip.x / clip.w, 0.0, 1e-4));
        assert!(approx(clip.y / clip.w, 0.0, 1e-4));
    }
}
