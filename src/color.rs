use std::collections::BTreeMap;

use bikeshare_dashboard::{DayOfWeek, Season};
use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct, muted colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.45, 0.60);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: category key → Color32
// ---------------------------------------------------------------------------

/// Maps the keys of a categorical axis to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap<K: Ord> {
    mapping: BTreeMap<K, Color32>,
    default_color: Color32,
}

impl<K: Ord + Clone> ColorMap<K> {
    /// Spread generated palette colours over `keys`.
    pub fn new(keys: &[K]) -> Self {
        let mapping = keys
            .iter()
            .cloned()
            .zip(generate_palette(keys.len()))
            .collect();
        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Use fixed colours.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (K, Color32)>) -> Self {
        ColorMap {
            mapping: pairs.into_iter().collect(),
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a key.
    pub fn color_for(&self, key: &K) -> Color32 {
        self.mapping.get(key).copied().unwrap_or(self.default_color)
    }
}

/// Colours shared by every chart of the dashboard.
#[derive(Debug, Clone)]
pub struct ChartColors {
    pub weekday: ColorMap<DayOfWeek>,
    pub season: ColorMap<Season>,
    pub working_day: ColorMap<bool>,
}

impl Default for ChartColors {
    fn default() -> Self {
        Self {
            weekday: ColorMap::new(&DayOfWeek::ALL),
            season: ColorMap::from_pairs([
                (Season::Spring, Color32::from_rgb(0x1f, 0x77, 0xb4)),
                (Season::Summer, Color32::from_rgb(0xff, 0x7f, 0x0e)),
                (Season::Fall, Color32::from_rgb(0x2c, 0xa0, 0x2c)),
                (Season::Winter, Color32::from_rgb(0xd6, 0x27, 0x28)),
            ]),
            // cool for days off, warm for working days
            working_day: ColorMap::from_pairs([
                (false, Color32::from_rgb(0x3b, 0x4c, 0xc0)),
                (true, Color32::from_rgb(0xb4, 0x04, 0x26)),
            ]),
        }
    }
}
