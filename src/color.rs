use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.45);
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
// Platform badge colours
// ---------------------------------------------------------------------------

/// Maps each platform name to a distinct badge colour.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ColorMap {
    pub fn new(platforms: &[String]) -> Self {
        let mapping = platforms
            .iter()
            .cloned()
            .zip(generate_palette(platforms.len()))
            .collect();
        ColorMap { mapping }
    }

    /// Colour for `platform`, grey when it was not part of the dataset.
    pub fn color_for(&self, platform: &str) -> Color32 {
        self.mapping.get(platform).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_colours() {
        let colours = generate_palette(4);
        assert_eq!(colours.len(), 4);
        for (i, a) in colours.iter().enumerate() {
            for b in &colours[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn unknown_platform_is_grey() {
        let map = ColorMap::new(&["blinkit".to_string(), "zepto".to_string()]);
        assert_ne!(map.color_for("zepto"), Color32::GRAY);
        assert_eq!(map.color_for("amazon"), Color32::GRAY);
    }
}
