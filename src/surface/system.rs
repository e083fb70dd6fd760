//! High-level wave surface: one instance owns mesh, wave engine, camera and color.

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::mesh::SurfaceMesh;
use super::wave::WaveEngine;
use crate::camera::CameraController;
use crate::color::{Color, HueColorCache, HueCycle};
use crate::error::WaveError;
use crate::params::{MaterialParams, WavesConfig};

/// Result of one frame, consumed by the renderer
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameOutput {
    /// New surface color when the hue stepped this frame
    pub color_changed: Option<Color>,
    pub normals_dirty: bool,
    pub positions_dirty: bool,
}

/// Procedural wave background driven one frame at a time
pub struct WaveSurface {
    mesh: SurfaceMesh,
    engine: WaveEngine,
    camera: CameraController,
    hue_cycle: Option<HueCycle>,
    hue_cache: HueColorCache,
    color: Color,
    config: WavesConfig,
}

impl WaveSurface {
    /// Validate the configuration and build all per-instance state
    pub fn new(config: &WavesConfig) -> Result<Self, WaveError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let surface = &config.surface;
        let mesh = SurfaceMesh::build(
            surface.width_cells,
            surface.height_cells,
            surface.cell_size,
            surface.wave_noise,
            &mut rng,
        )?;
        let engine = WaveEngine::new(mesh.vertices.len());
        let camera = CameraController::from_params(&config.camera);

        let mut hue_cache = HueColorCache::new();
        let hue_cycle = config.material.hue_cycle.as_ref().map(HueCycle::new);
        let color = match &hue_cycle {
            Some(cycle) => cycle.current_color(&mut hue_cache),
            None => config.material.base_color(),
        };

        Ok(Self {
            mesh,
            engine,
            camera,
            hue_cycle,
            hue_cache,
            color,
            config: config.clone(),
        })
    }

    /// Forward a normalized pointer position to the camera
    pub fn on_pointer_move(&mut self, x: f32, y: f32) -> Result<(), WaveError> {
        if !self.config.mouse_controls {
            return Ok(());
        }
        self.camera.on_pointer_move(x, y, self.config.camera.zoom)
    }

    /// Advance one frame: hue, then camera, then waves, then normals
    ///
    /// A refused wave pass leaves the previous geometry in place and returns
    /// the error; hue and camera have already advanced for the frame.
    pub fn update(&mut self, t: f32) -> Result<FrameOutput, WaveError> {
        let mut color_changed = None;
        if let Some(cycle) = self.hue_cycle.as_mut() {
            if let Some(color) = cycle.tick(&mut self.hue_cache) {
                self.color = color;
                color_changed = Some(color);
            }
        }

        self.camera.advance();

        let surface = &self.config.surface;
        let dirty = self.engine.advance(
            &mut self.mesh.vertices,
            t,
            surface.wave_speed,
            surface.wave_height,
        )?;

        if dirty.normals {
            self.mesh.recompute_normals();
        }

        Ok(FrameOutput {
            color_changed,
            normals_dirty: dirty.normals,
            positions_dirty: dirty.positions,
        })
    }

    pub fn mesh(&self) -> &SurfaceMesh {
        &self.mesh
    }

    pub fn engine(&self) -> &WaveEngine {
        &self.engine
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn hue_cycle(&self) -> Option<&HueCycle> {
        self.hue_cycle.as_ref()
    }

    /// Current surface color
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn material(&self) -> &MaterialParams {
        &self.config.material
    }

    pub fn config(&self) -> &WavesConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{HueCycleParams, SurfaceParams};

    fn small_config() -> WavesConfig {
        WavesConfig {
            surface: SurfaceParams {
                width_cells: 2,
                height_cells: 2,
                wave_speed: 1.0,
                wave_height: 15.0,
                ..Default::default()
            },
            seed: Some(17),
            ..Default::default()
        }
    }

    #[test]
    fn test_small_grid_end_to_end() {
        let mut waves = WaveSurface::new(&small_config()).unwrap();
        assert_eq!(waves.mesh().vertices.len(), 9);
        assert_eq!(waves.mesh().indices.len(), 24);

        for frame in 0..100 {
            let output = waves.update(frame as f32).unwrap();
            assert!(output.positions_dirty);
            assert!(output.normals_dirty);
        }

        for (i, v) in waves.mesh().vertices.iter().enumerate() {
            let base = waves.engine().baseline(i).unwrap();
            let y = v.position[1];
            assert!(
                y >= base && y <= base + 15.0 + 1e-4,
                "vertex {}: {} not in [{}, {}]",
                i,
                y,
                base,
                base + 15.0
            );
        }
    }

    #[test]
    fn test_invalid_config_aborts_construction() {
        let mut config = small_config();
        config.surface.width_cells = 0;
        assert!(matches!(
            WaveSurface::new(&config),
            Err(WaveError::InvalidDimension(_))
        ));

        let mut config = small_config();
        config.camera.zoom = -1.0;
        assert!(matches!(
            WaveSurface::new(&config),
            Err(WaveError::InvalidZoom(_))
        ));
    }

    #[test]
    fn test_refused_frame_keeps_previous_geometry() {
        let mut waves = WaveSurface::new(&small_config()).unwrap();
        waves.update(0.0).unwrap();
        waves.update(1.0).unwrap();
        let before: Vec<[f32; 3]> = waves.mesh().vertices.iter().map(|v| v.position).collect();

        assert!(waves.update(f32::NAN).is_err());

        let after: Vec<[f32; 3]> = waves.mesh().vertices.iter().map(|v| v.position).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_seeded_surfaces_match() {
        let a = WaveSurface::new(&small_config()).unwrap();
        let b = WaveSurface::new(&small_config()).unwrap();
        assert_eq!(a.mesh().indices, b.mesh().indices);
    }

    #[test]
    fn test_base_color_without_cycling() {
        let mut waves = WaveSurface::new(&small_config()).unwrap();
        assert_eq!(waves.color().to_hex(), 0x005588);
        let output = waves.update(0.0).unwrap();
        assert_eq!(output.color_changed, None);
    }

    #[test]
    fn test_hue_cycling_changes_color() {
        let mut config = small_config();
        config.material.hue_cycle = Some(HueCycleParams {
            hue: 0,
            saturation: 100.0,
            lightness: 50.0,
            cycle_speed: 2,
        });
        let mut waves = WaveSurface::new(&config).unwrap();
        assert_eq!(waves.color().to_hex(), 0xFF0000);

        assert_eq!(waves.update(0.0).unwrap().color_changed, None);
        let changed = waves.update(1.0).unwrap().color_changed;
        assert!(changed.is_some());
        assert_eq!(waves.hue_cycle().unwrap().hue(), 1);
        assert_eq!(Some(waves.color()), changed);
    }

    #[test]
    fn test_pointer_drives_camera() {
        let mut waves = WaveSurface::new(&small_config()).unwrap();
        let start = waves.camera().position();

        waves.on_pointer_move(1.0, 0.0).unwrap();
        for frame in 0..10 {
            waves.update(frame as f32).unwrap();
        }
        assert!(waves.camera().position().x > start.x);
    }

    #[test]
    fn test_pointer_ignored_without_mouse_controls() {
        let mut config = small_config();
        config.mouse_controls = false;
        let mut waves = WaveSurface::new(&config).unwrap();

        waves.on_pointer_move(1.0, 0.0).unwrap();
        assert_eq!(waves.camera().target(), None);
    }
}
