//! Surface material, lighting and hue cycling parameters.

use crate::color::Color;
use crate::error::WaveError;

/// Phong-style material applied to the wave surface
#[derive(Debug, Clone)]
pub struct MaterialParams {
    /// Base surface color (0xRRGGBB)
    pub color: u32,

    /// Specular exponent
    pub shininess: f32,

    /// Face normals from screen-space derivatives instead of vertex normals
    pub flat_shading: bool,

    /// Optional continuous hue animation; overrides `color` when present
    pub hue_cycle: Option<HueCycleParams>,
}

impl Default for MaterialParams {
    fn default() -> Self {
        Self {
            color: 0x005588,
            shininess: 30.0,
            flat_shading: true,
            hue_cycle: None,
        }
    }
}

impl MaterialParams {
    pub fn base_color(&self) -> Color {
        Color::from_hex(self.color)
    }

    pub fn validate(&self) -> Result<(), WaveError> {
        if !self.shininess.is_finite() || self.shininess < 0.0 {
            return Err(WaveError::color(format!(
                "shininess must be finite and >= 0, got {}",
                self.shininess
            )));
        }
        if self.color > 0xFF_FFFF {
            return Err(WaveError::color(format!(
                "color {:#x} does not fit in 24 bits",
                self.color
            )));
        }
        if let Some(cycle) = &self.hue_cycle {
            cycle.validate()?;
        }
        Ok(())
    }
}

/// Hue cycling: the hue bounces between 0 and 360 one degree at a time
#[derive(Debug, Clone, PartialEq)]
pub struct HueCycleParams {
    /// Starting hue (degrees, 0..=360)
    pub hue: i32,

    /// Saturation percentage (0..=100)
    pub saturation: f32,

    /// Lightness percentage (0..=100)
    pub lightness: f32,

    /// Frames per hue step; 0 steps every frame
    pub cycle_speed: u32,
}

impl Default for HueCycleParams {
    fn default() -> Self {
        Self {
            hue: 0,
            saturation: 100.0,
            lightness: 50.0,
            cycle_speed: 0,
        }
    }
}

impl HueCycleParams {
    pub fn validate(&self) -> Result<(), WaveError> {
        if !(0..=360).contains(&self.hue) {
            return Err(WaveError::color(format!(
                "hue must be within 0..=360, got {}",
                self.hue
            )));
        }
        for (name, value) in [("saturation", self.saturation), ("lightness", self.lightness)] {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(WaveError::color(format!(
                    "{} must be within 0..=100, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Scene lights (white ambient + single white point light)
#[derive(Debug, Clone)]
pub struct LightingParams {
    pub ambient_intensity: f32,
    pub point_intensity: f32,
    pub point_position: [f32; 3],
}

impl Default for LightingParams {
    fn default() -> Self {
        Self {
            ambient_intensity: 0.9,
            point_intensity: 0.9,
            point_position: [-100.0, 250.0, -100.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_material() {
        let material = MaterialParams::default();
        assert!(material.validate().is_ok());
        assert_eq!(material.base_color().to_hex(), 0x005588);
    }

    #[test]
    fn test_hue_cycle_ranges() {
        assert!(HueCycleParams::default().validate().is_ok());

        let bad_hue = HueCycleParams {
            hue: 361,
            ..Default::default()
        };
        assert!(bad_hue.validate().is_err());

        let bad_saturation = HueCycleParams {
            saturation: 120.0,
            ..Default::default()
        };
        assert!(matches!(
            bad_saturation.validate(),
            Err(WaveError::InvalidColor(_))
        ));
    }

    #[test]
    fn test_material_propagates_cycle_errors() {
        let material = MaterialParams {
            hue_cycle: Some(HueCycleParams {
                lightness: -1.0,
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(material.validate().is_err());
    }
}
