use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Fixed series colours
// ---------------------------------------------------------------------------

pub const OBSERVED: Color32 = Color32::from_rgb(0x63, 0x6e, 0xfa);
pub const TREND: Color32 = Color32::from_rgb(0xe0, 0x1e, 0x1e);
/// Grey/black for carbon.
pub const EMISSIONS: Color32 = Color32::from_rgb(0x55, 0x55, 0x55);

// ---------------------------------------------------------------------------
// Continuous colour scales
// ---------------------------------------------------------------------------

const VIRIDIS: [(u8, u8, u8); 5] = [
    (0x44, 0x01, 0x54),
    (0x3b, 0x52, 0x8b),
    (0x21, 0x91, 0x8c),
    (0x5e, 0xc9, 0x62),
    (0xfd, 0xe7, 0x25),
];

/// Red (dry) through white to blue (wet).
const RD_BU: [(u8, u8, u8); 11] = [
    (0x67, 0x00, 0x1f),
    (0xb2, 0x18, 0x2b),
    (0xd6, 0x60, 0x4d),
    (0xf4, 0xa5, 0x82),
    (0xfd, 0xdb, 0xc7),
    (0xf7, 0xf7, 0xf7),
    (0xd1, 0xe5, 0xf0),
    (0x92, 0xc5, 0xde),
    (0x43, 0x93, 0xc3),
    (0x21, 0x66, 0xac),
    (0x05, 0x30, 0x61),
];

/// Maps a numeric domain onto a gradient of evenly spaced colour stops.
/// Interpolation happens in linear RGB.
#[derive(Debug, Clone)]
pub struct ContinuousScale {
    stops: Vec<LinSrgb>,
    min: f64,
    max: f64,
}

impl ContinuousScale {
    fn from_stops(stops: &[(u8, u8, u8)], min: f64, max: f64) -> Self {
        let stops = stops
            .iter()
            .map(|&(r, g, b)| Srgb::new(r, g, b).into_format::<f32>().into_linear())
            .collect();
        ContinuousScale { stops, min, max }
    }

    pub fn viridis(min: f64, max: f64) -> Self {
        Self::from_stops(&VIRIDIS, min, max)
    }

    pub fn rd_bu(min: f64, max: f64) -> Self {
        Self::from_stops(&RD_BU, min, max)
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Position of `value` in the domain, clamped to 0..=1. A degenerate
    /// domain maps everything to the midpoint.
    pub fn normalize(&self, value: f64) -> f32 {
        let range = self.max - self.min;
        if !range.is_finite() || range.abs() < f64::EPSILON {
            return 0.5;
        }
        ((value - self.min) / range).clamp(0.0, 1.0) as f32
    }

    /// Colour at relative position `t` (clamped to 0..=1).
    pub fn sample(&self, t: f32) -> Color32 {
        let t = if t.is_nan() { 0.5 } else { t.clamp(0.0, 1.0) };
        let segments = self.stops.len() - 1;
        let pos = t * segments as f32;
        let idx = (pos.floor() as usize).min(segments - 1);
        let local = pos - idx as f32;

        let mixed = self.stops[idx].mix(self.stops[idx + 1], local);
        let rgb: Srgb<u8> = Srgb::from_linear(mixed);
        Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
    }

    pub fn color_for(&self, value: f64) -> Color32 {
        self.sample(self.normalize(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_hit_first_and_last_stop() {
        let scale = ContinuousScale::viridis(0.0, 10.0);
        assert_eq!(scale.color_for(0.0), Color32::from_rgb(0x44, 0x01, 0x54));
        assert_eq!(scale.color_for(10.0), Color32::from_rgb(0xfd, 0xe7, 0x25));
    }

    #[test]
    fn out_of_domain_values_are_clamped() {
        let scale = ContinuousScale::rd_bu(0.0, 1.0);
        assert_eq!(scale.color_for(-5.0), scale.color_for(0.0));
        assert_eq!(scale.color_for(7.0), scale.color_for(1.0));
    }

    #[test]
    fn degenerate_domain_uses_midpoint() {
        let scale = ContinuousScale::rd_bu(3.0, 3.0);
        assert_eq!(scale.normalize(3.0), 0.5);
        assert_eq!(scale.color_for(3.0), Color32::from_rgb(0xf7, 0xf7, 0xf7));
    }

    #[test]
    fn rd_bu_runs_from_red_to_blue() {
        let scale = ContinuousScale::rd_bu(0.0, 100.0);
        let dry = scale.color_for(0.0);
        let wet = scale.color_for(100.0);
        assert!(dry.r() > dry.b());
        assert!(wet.b() > wet.r());
    }
}
