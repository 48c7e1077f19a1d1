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
            let hsl = Hsl::new(hue, 0.75, 0.55);
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
// Color mapping: road name → Color32
// ---------------------------------------------------------------------------

/// Maps road names to distinct colours, assigned in listing order so each
/// road keeps its colour for the lifetime of a snapshot.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map for the given roads (first-seen order).
    pub fn new(road_names: &[String]) -> Self {
        let palette = generate_palette(road_names.len());
        let mapping: BTreeMap<String, Color32> =
            road_names.iter().cloned().zip(palette).collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given road.
    pub fn color_for(&self, road: &str) -> Color32 {
        self.mapping.get(road).copied().unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_palette_for_zero_roads() {
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn roads_get_distinct_colours() {
        let names = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let map = ColorMap::new(&names);
        assert_ne!(map.color_for("A"), map.color_for("B"));
        assert_ne!(map.color_for("B"), map.color_for("C"));
    }

    #[test]
    fn unknown_road_falls_back_to_gray() {
        let map = ColorMap::new(&["A".to_string()]);
        assert_eq!(map.color_for("zzz"), Color32::GRAY);
    }
}
