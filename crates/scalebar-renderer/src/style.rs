use serde::{Deserialize, Serialize};

/// RGBA color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with its alpha scaled by `coverage` (0..=255).
    pub fn with_coverage(self, coverage: u8) -> Self {
        let a = (self.a as u16 * coverage as u16 + 127) / 255;
        Self { a: a as u8, ..self }
    }
}

/// Font used for the label. The family is always a sans-serif.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelFont {
    /// Pixel size of the font.
    pub size_px: f32,
    pub bold: bool,
}

impl Default for LabelFont {
    fn default() -> Self {
        Self {
            size_px: 14.0,
            bold: true,
        }
    }
}

/// Layout and colors of the rendered scale bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleBarStyle {
    pub bar_height: u32,
    /// Gap between the label and the bar.
    pub bar_top_margin: u32,
    /// Outer padding on all four sides.
    pub padding: u32,
    pub font: LabelFont,
    pub background: Color,
    pub foreground: Color,
}

impl Default for ScaleBarStyle {
    fn default() -> Self {
        Self {
            bar_height: 8,
            bar_top_margin: 5,
            padding: 2,
            font: LabelFont::default(),
            background: Color::rgba(0, 0, 0, 128),
            foreground: Color::WHITE,
        }
    }
}

impl ScaleBarStyle {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
