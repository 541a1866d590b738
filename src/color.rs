use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use soy_pdi::Disease;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| hsl_to_color32((i as f32 / n as f32) * 360.0, 0.75, 0.55))
        .collect()
}

/// One fixed series colour per disease, in [`Disease::ALL`] order.
pub fn disease_color(disease: Disease) -> Color32 {
    let palette = generate_palette(Disease::ALL.len());
    Disease::ALL
        .iter()
        .position(|d| *d == disease)
        .map_or(Color32::GRAY, |i| palette[i])
}

/// PDI at which the severity ramp reaches full red.
const SEVERE_PDI: f64 = 50.0;

/// Green (no disease) through amber to red (`SEVERE_PDI` and above).
pub fn severity_color(pdi: f64) -> Color32 {
    let t = (pdi / SEVERE_PDI).clamp(0.0, 1.0) as f32;
    hsl_to_color32(120.0 * (1.0 - t), 0.7, 0.45)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(4).len(), 4);
    }

    #[test]
    fn diseases_get_distinct_colors() {
        let colors: Vec<Color32> = Disease::ALL.iter().map(|d| disease_color(*d)).collect();
        for (i, a) in colors.iter().enumerate() {
            assert!(colors[i + 1..].iter().all(|b| a != b));
        }
    }

    #[test]
    fn severity_ramp_goes_green_to_red() {
        let low = severity_color(0.0);
        let high = severity_color(80.0);
        assert!(low.g() > low.r());
        assert!(high.r() > high.g());
        assert_eq!(severity_color(-5.0), low);
    }
}
