//! Per-frame vertex displacement producing the rolling wave motion.

use std::f64::consts::TAU;

use super::mesh::Vertex;
use crate::error::WaveError;

/// Reference height of a vertex, captured on its first update frame
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Baseline {
    Uninitialized,
    Captured(f32),
}

/// Which buffers changed during a frame and need re-uploading
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameDirty {
    pub normals: bool,
    pub positions: bool,
}

/// Crest-biased wave shape in [0, 1] at planar position `(x, z)` and time `t`
///
/// A sine wave travelling across the grid, perturbed by a cross-chop term,
/// then squared so crests come out narrower than troughs.
pub fn trochoid_factor(x: f32, z: f32, t: f32, wave_speed: f32) -> f32 {
    let cross_chop = wave_speed.sqrt() * (-x - z * 0.7).cos();
    let phase =
        wave_speed * t * 0.02 - wave_speed * x * 0.025 + wave_speed * z * 0.015 + cross_chop;
    let delta = phase.sin();
    (delta + 1.0).powi(2) / 4.0
}

/// Phase advance per frame at unit wave speed
const TIME_FREQUENCY: f64 = 0.02;

/// Frame clock feeding `t` into the wave pass
///
/// Frames accumulate in `f64`. The `f32` time handed to the waves is wrapped
/// to one wave period, so it keeps advancing no matter how long the surface runs.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct WaveClock {
    frames: f64,
}

impl WaveClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock that has already run for `frames` frames
    pub fn starting_at(frames: f64) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> f64 {
        self.frames
    }

    pub fn tick(&mut self) {
        self.frames += 1.0;
    }

    /// Time for the wave pass, wrapped to `[0, 2π / (wave_speed * 0.02))`
    ///
    /// A frozen or invalid speed gets the raw frame count; the wave pass
    /// ignores time at speed 0 and refuses invalid speeds.
    pub fn wave_time(&self, wave_speed: f32) -> f32 {
        if wave_speed.is_finite() && wave_speed > 0.0 {
            let period = TAU / (wave_speed as f64 * TIME_FREQUENCY);
            self.frames.rem_euclid(period) as f32
        } else {
            self.frames as f32
        }
    }
}

/// Drives vertex heights from baselines captured on the first frame
pub struct WaveEngine {
    baselines: Vec<Baseline>,
}

impl WaveEngine {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            baselines: vec![Baseline::Uninitialized; vertex_count],
        }
    }

    /// Displace all vertices for time `t`
    ///
    /// Vertices without a baseline capture their current height and stay put
    /// this frame. The frame is refused as a whole, leaving vertices and
    /// baselines untouched, when any input is non-finite or `wave_speed` is
    /// negative.
    ///
    /// # Arguments
    /// * `vertices` - Vertex buffer of the mesh this engine was created for
    /// * `t` - Accumulated time (frames)
    /// * `wave_speed` - Speed multiplier, 0 freezes the surface
    /// * `wave_height` - Height added at a full crest
    pub fn advance(
        &mut self,
        vertices: &mut [Vertex],
        t: f32,
        wave_speed: f32,
        wave_height: f32,
    ) -> Result<FrameDirty, WaveError> {
        if vertices.len() != self.baselines.len() {
            return Err(WaveError::dimension(format!(
                "vertex buffer holds {} vertices, engine tracks {}",
                vertices.len(),
                self.baselines.len()
            )));
        }
        if !t.is_finite() {
            return Err(WaveError::wave_parameter(format!("time must be finite, got {}", t)));
        }
        if !wave_speed.is_finite() || wave_speed < 0.0 {
            return Err(WaveError::wave_parameter(format!(
                "wave speed must be finite and >= 0, got {}",
                wave_speed
            )));
        }
        if !wave_height.is_finite() {
            return Err(WaveError::wave_parameter(format!(
                "wave height must be finite, got {}",
                wave_height
            )));
        }

        for (vertex, baseline) in vertices.iter_mut().zip(self.baselines.iter_mut()) {
            match *baseline {
                Baseline::Uninitialized => {
                    *baseline = Baseline::Captured(vertex.position[1]);
                }
                Baseline::Captured(base) => {
                    let [x, _, z] = vertex.position;
                    vertex.position[1] = base + trochoid_factor(x, z, t, wave_speed) * wave_height;
                }
            }
        }

        Ok(FrameDirty {
            normals: true,
            positions: true,
        })
    }

    /// Captured baseline of vertex `index`, if any
    pub fn baseline(&self, index: usize) -> Option<f32> {
        match self.baselines.get(index) {
            Some(Baseline::Captured(base)) => Some(*base),
            _ => None,
        }
    }

    pub fn is_primed(&self) -> bool {
        self.baselines
            .iter()
            .all(|b| matches!(b, Baseline::Captured(_)))
    }
}
