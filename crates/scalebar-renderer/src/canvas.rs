use image::RgbaImage;

use crate::error::RenderError;
use crate::style::{Color, LabelFont};

/// Measured size of a line of text, rounded up to whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextMetrics {
    pub width: u32,
    pub height: u32,
}

/// An axis-aligned rectangle in raster pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Immediate-mode 2D drawing surface the scale bar is rasterized into.
pub trait Canvas {
    /// Measure `text` as it would be drawn with `font`.
    fn measure_text(&mut self, text: &str, font: &LabelFont) -> TextMetrics;

    /// Replace the raster with a fresh, fully transparent one of the given size.
    fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError>;

    /// Blend a solid rectangle over the raster, clipped to its bounds.
    fn fill_rect(&mut self, rect: PixelRect, color: Color);

    /// Draw `text` with its bounding box' top-left corner at (`x`, `y`).
    fn fill_text(&mut self, text: &str, x: u32, y: u32, font: &LabelFont, color: Color);

    /// Current raster content.
    fn image(&self) -> &RgbaImage;
}
