//! Command-line argument parsing.

use clap::Parser;

use crate::error::WaveError;
use crate::params::{
    CameraParams, HueCycleParams, MaterialParams, RecordingConfig, SurfaceParams, WavesConfig,
};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "Wavesurf")]
#[command(about = "Animated low-poly wave surface background", long_about = None)]
pub struct Args {
    /// Grid cells along X
    #[arg(long, value_name = "CELLS", default_value_t = 100)]
    pub width_cells: usize,

    /// Grid cells along Z
    #[arg(long, value_name = "CELLS", default_value_t = 80)]
    pub height_cells: usize,

    /// Crest height in world units
    #[arg(long, value_name = "UNITS", default_value_t = 15.0)]
    pub wave_height: f32,

    /// Wave speed multiplier (0 freezes the surface)
    #[arg(long, value_name = "SPEED", default_value_t = 1.0)]
    pub wave_speed: f32,

    /// Pointer drift divisor (must be > 0)
    #[arg(long, value_name = "ZOOM", default_value_t = 1.0)]
    pub zoom: f32,

    /// Surface color as 0xRRGGBB, #RRGGBB or RRGGBB
    #[arg(long, value_name = "HEX", default_value = "0x005588", value_parser = parse_color)]
    pub color: u32,

    /// Specular exponent
    #[arg(long, value_name = "EXP", default_value_t = 30.0)]
    pub shininess: f32,

    /// Starting hue in degrees; enables hue cycling
    #[arg(long, value_name = "DEGREES")]
    pub hue: Option<i32>,

    /// Hue cycling saturation (percent)
    #[arg(long, value_name = "PERCENT", default_value_t = 100.0)]
    pub saturation: f32,

    /// Hue cycling lightness (percent)
    #[arg(long, value_name = "PERCENT", default_value_t = 50.0)]
    pub lightness: f32,

    /// Frames per hue step (0 steps every frame)
    #[arg(long, value_name = "FRAMES", default_value_t = 0)]
    pub color_cycle_speed: u32,

    /// RNG seed for a reproducible surface
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Ignore pointer movement
    #[arg(long)]
    pub no_mouse: bool,

    /// Shade with interpolated vertex normals instead of flat faces
    #[arg(long)]
    pub smooth_shading: bool,

    /// Record frames to PNG (duration in seconds)
    #[arg(long, value_name = "SECONDS")]
    pub record: Option<f32>,
}

/// Parse a 24-bit color written as `0xRRGGBB`, `#RRGGBB` or `RRGGBB`
pub fn parse_color(value: &str) -> Result<u32, WaveError> {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .or_else(|| trimmed.strip_prefix('#'))
        .unwrap_or(trimmed);

    if digits.is_empty() || digits.len() > 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(WaveError::color(format!("'{}' is not a 24-bit hex color", value)));
    }
    u32::from_str_radix(digits, 16)
        .map_err(|e| WaveError::color(format!("'{}' is not a hex color: {}", value, e)))
}

impl Args {
    /// Build and validate the surface configuration
    pub fn to_config(&self) -> Result<WavesConfig, WaveError> {
        let hue_cycle = self.hue.map(|hue| HueCycleParams {
            hue,
            saturation: self.saturation,
            lightness: self.lightness,
            cycle_speed: self.color_cycle_speed,
        });

        let config = WavesConfig {
            surface: SurfaceParams {
                width_cells: self.width_cells,
                height_cells: self.height_cells,
                wave_height: self.wave_height,
                wave_speed: self.wave_speed,
                ..Default::default()
            },
            camera: CameraParams {
                zoom: self.zoom,
                ..Default::default()
            },
            material: MaterialParams {
                color: self.color,
                shininess: self.shininess,
                flat_shading: !self.smooth_shading,
                hue_cycle,
            },
            mouse_controls: !self.no_mouse,
            seed: self.seed,
            ..Default::default()
        };

        config.validate()?;
        Ok(config)
    }

    /// Create recording configuration if recording mode is enabled
    pub fn create_recording_config(&self) -> std::io::Result<Option<RecordingConfig>> {
        let Some(duration) = self.record else {
            return Ok(None);
        };

        let config = RecordingConfig::new(duration);
        std::fs::create_dir_all(config.frames_dir())?;
        Ok(Some(config))
    }
}
