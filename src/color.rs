//! Surface color: HSL conversion, memoized lookups and hue cycling.

use std::collections::HashMap;

use crate::params::HueCycleParams;

/// RGB color with sRGB components in [0, 1]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed 0xRRGGBB value
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
        }
    }

    /// Pack into 0xRRGGBB, rounding each channel to 8 bits
    pub fn to_hex(self) -> u32 {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// Convert sRGB components to linear light for shading
    pub fn to_linear(self) -> [f32; 3] {
        fn decode(c: f32) -> f32 {
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        [decode(self.r), decode(self.g), decode(self.b)]
    }
}

/// Convert hue (degrees), saturation and lightness (percent) to RGB
///
/// Hue wraps modulo 360; saturation and lightness are clamped to [0, 100].
pub fn hsl_to_color(h: f32, s: f32, l: f32) -> Color {
    let h = h.rem_euclid(360.0) / 360.0;
    let s = (s / 100.0).clamp(0.0, 1.0);
    let l = (l / 100.0).clamp(0.0, 1.0);

    if s == 0.0 {
        return Color::new(l, l, l);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    Color::new(
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    )
}

fn hue_to_channel(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 0.5 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

/// Memoized HSL lookups keyed by the full (hue, saturation, lightness) triple
#[derive(Debug, Default)]
pub struct HueColorCache {
    entries: HashMap<(i32, u32, u32), Color>,
    computations: usize,
}

impl HueColorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached color for (h, s, l), converting on first use
    pub fn resolve(&mut self, h: i32, s: f32, l: f32) -> Color {
        let key = (h, s.to_bits(), l.to_bits());
        if let Some(color) = self.entries.get(&key) {
            return *color;
        }

        let color = hsl_to_color(h as f32, s, l);
        self.computations += 1;
        self.entries.insert(key, color);
        color
    }

    /// Number of conversions actually performed (cache misses)
    pub fn computations(&self) -> usize {
        self.computations
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Hue that bounces between 0 and 360, stepping once every `cycle_speed` frames
#[derive(Debug, Clone)]
pub struct HueCycle {
    hue: i32,
    counting_down: bool,
    tick_counter: u32,
    cycle_speed: u32,
    saturation: f32,
    lightness: f32,
}

impl HueCycle {
    pub fn new(params: &HueCycleParams) -> Self {
        Self {
            hue: params.hue,
            counting_down: false,
            tick_counter: 0,
            cycle_speed: params.cycle_speed,
            saturation: params.saturation,
            lightness: params.lightness,
        }
    }

    pub fn hue(&self) -> i32 {
        self.hue
    }

    pub fn counting_down(&self) -> bool {
        self.counting_down
    }

    pub fn tick_counter(&self) -> u32 {
        self.tick_counter
    }

    /// Color for the current hue
    pub fn current_color(&self, cache: &mut HueColorCache) -> Color {
        cache.resolve(self.hue, self.saturation, self.lightness)
    }

    /// Advance one frame; returns the new color when the hue stepped
    pub fn tick(&mut self, cache: &mut HueColorCache) -> Option<Color> {
        if self.hue >= 360 {
            self.counting_down = true;
        } else if self.hue <= 0 {
            self.counting_down = false;
        }

        self.tick_counter += 1;
        if self.tick_counter < self.cycle_speed {
            return None;
        }

        self.tick_counter = 0;
        self.hue += if self.counting_down { -1 } else { 1 };
        Some(self.current_color(cache))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle(hue: i32, cycle_speed: u32) -> HueCycle {
        HueCycle::new(&HueCycleParams {
            hue,
            cycle_speed,
            ..Default::default()
        })
    }

    #[test]
    fn test_reference_conversions() {
        assert_eq!(hsl_to_color(0.0, 100.0, 50.0).to_hex(), 0xFF0000);
        assert_eq!(hsl_to_color(120.0, 100.0, 50.0).to_hex(), 0x00FF00);
        assert_eq!(hsl_to_color(240.0, 100.0, 50.0).to_hex(), 0x0000FF);
        assert_eq!(hsl_to_color(360.0, 100.0, 50.0).to_hex(), 0xFF0000);
    }

    #[test]
    fn test_greyscale_and_extremes() {
        assert_eq!(hsl_to_color(200.0, 0.0, 50.0).to_hex(), 0x808080);
        assert_eq!(hsl_to_color(77.0, 100.0, 0.0).to_hex(), 0x000000);
        assert_eq!(hsl_to_color(77.0, 100.0, 100.0).to_hex(), 0xFFFFFF);
    }

    #[test]
    fn test_hex_round_trip_of_default_color() {
        assert_eq!(Color::from_hex(0x005588).to_hex(), 0x005588);
    }

    #[test]
    fn test_linear_conversion_endpoints() {
        assert_eq!(Color::new(0.0, 1.0, 0.0).to_linear(), [0.0, 1.0, 0.0]);
        let [r, _, _] = Color::new(0.5, 0.0, 0.0).to_linear();
        assert!((r - 0.214).abs() < 1e-3);
    }

    #[test]
    fn test_cache_matches_direct_conversion() {
        let mut cache = HueColorCache::new();
        let resolved = cache.resolve(200, 80.0, 40.0);
        assert_eq!(resolved, hsl_to_color(200.0, 80.0, 40.0));
        assert_eq!(cache.computations(), 1);

        let again = cache.resolve(200, 80.0, 40.0);
        assert_eq!(again, resolved);
        assert_eq!(cache.computations(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_keys_on_saturation_and_lightness() {
        let mut cache = HueColorCache::new();
        let vivid = cache.resolve(30, 100.0, 50.0);
        let muted = cache.resolve(30, 20.0, 50.0);
        assert_ne!(vivid, muted);
        assert_eq!(cache.computations(), 2);
    }

    #[test]
    fn test_hue_steps_after_cycle_speed_frames() {
        let mut cache = HueColorCache::new();
        let mut hue = cycle(0, 2);

        assert_eq!(hue.tick(&mut cache), None);
        assert_eq!(hue.hue(), 0);

        let color = hue.tick(&mut cache);
        assert_eq!(hue.hue(), 1);
        assert_eq!(hue.tick_counter(), 0);
        assert_eq!(color, Some(hsl_to_color(1.0, 100.0, 50.0)));
    }

    #[test]
    fn test_hue_bounces_at_360() {
        let mut cache = HueColorCache::new();
        let mut hue = cycle(360, 0);
        assert!(!hue.counting_down());

        hue.tick(&mut cache);
        assert!(hue.counting_down());
        assert_eq!(hue.hue(), 359);
    }

    #[test]
    fn test_hue_bounces_at_zero() {
        let mut cache = HueColorCache::new();
        let mut hue = cycle(1, 0);
        hue.counting_down = true;

        hue.tick(&mut cache);
        assert_eq!(hue.hue(), 0);
        hue.tick(&mut cache);
        assert!(!hue.counting_down());
        assert_eq!(hue.hue(), 1);
    }

    #[test]
    fn test_zero_cycle_speed_steps_every_frame() {
        let mut cache = HueColorCache::new();
        let mut hue = cycle(10, 0);
        for expected in 11..=20 {
            assert!(hue.tick(&mut cache).is_some());
            assert_eq!(hue.hue(), expected);
        }
    }

    #[test]
    fn test_full_cycle_reuses_cache() {
        let mut cache = HueColorCache::new();
        let mut hue = cycle(0, 0);
        for _ in 0..720 {
            hue.tick(&mut cache);
        }
        assert_eq!(hue.hue(), 0);
        // Hues 1..=360 on the way up, 359..=0 on the way down were all seen once
        assert_eq!(cache.computations(), 361);
    }
}
