use palette::{Hsl, IntoColor, Srgb};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Stroke color scheme for the revealed triangles.
///
/// The effect classically strokes plain white; the gradient schemes spread a
/// hue range across the particle field instead.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    White,
    Spectrum,
    Rainbow,
    Fire,
    Ocean,
}

impl FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "white" | "mono" | "monochrome" => Ok(Self::White),
            "spectrum" => Ok(Self::Spectrum),
            "rainbow" => Ok(Self::Rainbow),
            "fire" => Ok(Self::Fire),
            "ocean" => Ok(Self::Ocean),
            _ => Err(format!("Unknown color scheme: {}", s)),
        }
    }
}

impl ColorScheme {
    /// Stroke color for a triangle at `position` (0.0 to 1.0) across the field.
    pub fn stroke_color(&self, position: f32) -> (u8, u8, u8) {
        let (h, s, l) = match self {
            ColorScheme::White => return (255, 255, 255),
            ColorScheme::Spectrum => (270.0 - position * 270.0, 0.9, 0.6),
            ColorScheme::Rainbow => (position * 360.0, 0.85, 0.6),
            ColorScheme::Fire => (position * 60.0, 0.95, 0.55),
            ColorScheme::Ocean => (180.0 + position * 60.0, 0.8, 0.55),
        };

        let hsl = Hsl::new(h, s, l);
        let rgb: Srgb = hsl.into_color();

        (
            (rgb.red * 255.0) as u8,
            (rgb.green * 255.0) as u8,
            (rgb.blue * 255.0) as u8,
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColorScheme::White => "white",
            ColorScheme::Spectrum => "spectrum",
            ColorScheme::Rainbow => "rainbow",
            ColorScheme::Fire => "fire",
            ColorScheme::Ocean => "ocean",
        }
    }

    pub fn all() -> &'static [ColorScheme] {
        &[
            ColorScheme::White,
            ColorScheme::Spectrum,
            ColorScheme::Rainbow,
            ColorScheme::Fire,
            ColorScheme::Ocean,
        ]
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        let current = all.iter().position(|c| c == self).unwrap_or(0);
        all[(current + 1) % all.len()]
    }
}
