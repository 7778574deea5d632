use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Fixed colours shared by the charts
// ---------------------------------------------------------------------------

pub const SKY: Color32 = Color32::from_rgb(0x38, 0xbd, 0xf8);
pub const EMERALD: Color32 = Color32::from_rgb(0x10, 0xb9, 0x81);
pub const INDIGO: Color32 = Color32::from_rgb(0x63, 0x66, 0xf1);
pub const TREND_RED: Color32 = Color32::from_rgb(0xef, 0x44, 0x44);
pub const SLATE_300: Color32 = Color32::from_rgb(0xcb, 0xd5, 0xe1);
pub const SLATE_400: Color32 = Color32::from_rgb(0x94, 0xa3, 0xb8);
pub const SLATE_600: Color32 = Color32::from_rgb(0x47, 0x55, 0x69);
pub const TITLE: Color32 = Color32::from_rgb(0xe2, 0xe8, 0xf0);

// ---------------------------------------------------------------------------
// Continuous colour scales
// ---------------------------------------------------------------------------

/// A piecewise-linear colour scale over `[0, 1]`.
#[derive(Debug, Clone, Copy)]
pub struct ColorScale {
    stops: &'static [(f32, [u8; 3])],
    reversed: bool,
}

pub const VIRIDIS: ColorScale = ColorScale {
    stops: &[
        (0.0, [0x44, 0x01, 0x54]),
        (0.111, [0x48, 0x28, 0x78]),
        (0.222, [0x3e, 0x4a, 0x89]),
        (0.333, [0x31, 0x68, 0x8e]),
        (0.444, [0x26, 0x82, 0x8e]),
        (0.556, [0x1f, 0x9e, 0x89]),
        (0.667, [0x35, 0xb7, 0x79]),
        (0.778, [0x6e, 0xce, 0x58]),
        (0.889, [0xb5, 0xde, 0x2b]),
        (1.0, [0xfd, 0xe7, 0x25]),
    ],
    reversed: false,
};

pub const RD_YL_GN: ColorScale = ColorScale {
    stops: &[
        (0.0, [0xa5, 0x00, 0x26]),
        (0.125, [0xd7, 0x30, 0x27]),
        (0.25, [0xf4, 0x6d, 0x43]),
        (0.375, [0xfd, 0xae, 0x61]),
        (0.5, [0xff, 0xff, 0xbf]),
        (0.625, [0xa6, 0xd9, 0x6a]),
        (0.75, [0x66, 0xbd, 0x63]),
        (0.875, [0x1a, 0x98, 0x50]),
        (1.0, [0x00, 0x68, 0x37]),
    ],
    reversed: false,
};

impl ColorScale {
    /// Same stops, read from the other end.
    pub const fn reversed(self) -> Self {
        ColorScale {
            reversed: !self.reversed,
            ..self
        }
    }

    /// Colour at position `t` (clamped to `[0, 1]`), mixed in linear RGB.
    pub fn at(&self, t: f32) -> Color32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let t = if self.reversed { 1.0 - t } else { t };

        let upper = self
            .stops
            .iter()
            .position(|(pos, _)| *pos >= t)
            .unwrap_or(self.stops.len() - 1);
        if upper == 0 {
            return to_color32(self.stops[0].1);
        }
        let (p0, c0) = self.stops[upper - 1];
        let (p1, c1) = self.stops[upper];
        let span = p1 - p0;
        let f = if span > 0.0 { (t - p0) / span } else { 0.0 };
        if f >= 1.0 {
            return to_color32(c1);
        }

        let mixed: LinSrgb = to_linear(c0).mix(to_linear(c1), f);
        let rgb: Srgb<u8> = Srgb::<f32>::from_linear(mixed).into_format();
        Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
    }

    /// Colour for `value` within the data range `[min, max]`.
    pub fn map(&self, value: f64, min: f64, max: f64) -> Color32 {
        let range = max - min;
        if range.abs() < f64::EPSILON {
            self.at(0.5)
        } else {
            self.at(((value - min) / range) as f32)
        }
    }
}

/// `(min, max)` of `values`, `(0, 0)` when empty.
pub fn value_range(values: impl IntoIterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values
        .into_iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if min > max {
        (0.0, 0.0)
    } else {
        (min, max)
    }
}

fn to_linear(c: [u8; 3]) -> LinSrgb {
    Srgb::new(c[0], c[1], c[2]).into_format::<f32>().into_linear()
}

fn to_color32(c: [u8; 3]) -> Color32 {
    Color32::from_rgb(c[0], c[1], c[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_match_stops() {
        assert_eq!(VIRIDIS.at(0.0), Color32::from_rgb(0x44, 0x01, 0x54));
        assert_eq!(VIRIDIS.at(1.0), Color32::from_rgb(0xfd, 0xe7, 0x25));
        assert_eq!(VIRIDIS.at(-3.0), VIRIDIS.at(0.0));
        assert_eq!(VIRIDIS.at(f32::NAN), VIRIDIS.at(0.0));
    }

    #[test]
    fn reversed_swaps_ends() {
        let rev = RD_YL_GN.reversed();
        assert_eq!(rev.at(0.0), RD_YL_GN.at(1.0));
        assert_eq!(rev.at(1.0), RD_YL_GN.at(0.0));
    }

    #[test]
    fn flat_range_maps_to_middle() {
        assert_eq!(VIRIDIS.map(3.0, 3.0, 3.0), VIRIDIS.at(0.5));
        assert_eq!(VIRIDIS.map(10.0, 0.0, 10.0), VIRIDIS.at(1.0));
    }

    #[test]
    fn value_range_of_empty_is_zero() {
        assert_eq!(value_range(Vec::new()), (0.0, 0.0));
        assert_eq!(value_range([3.0, -1.0, 2.0]), (-1.0, 3.0));
    }
}
