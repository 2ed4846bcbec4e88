use fontdue::{Font, FontSettings};
use image::{Rgba, RgbaImage};

use crate::canvas::{Canvas, PixelRect, TextMetrics};
use crate::error::RenderError;
use crate::style::{Color, LabelFont};

/// Largest raster side accepted by default.
pub const DEFAULT_MAX_DIMENSION: u32 = 16384;

/// CPU canvas backed by an `RgbaImage`, drawing text with `fontdue`.
///
/// The font should be a sans-serif face. When the label asks for bold and the
/// loaded face is regular, glyphs are emboldened by drawing them twice one
/// pixel apart.
pub struct RasterCanvas {
    image: RgbaImage,
    font: Font,
    bold_face: bool,
    max_dimension: u32,
}

impl RasterCanvas {
    pub fn new(font: Font) -> Self {
        Self {
            image: RgbaImage::new(0, 0),
            font,
            bold_face: false,
            max_dimension: DEFAULT_MAX_DIMENSION,
        }
    }

    /// Load a TrueType/OpenType font from memory.
    pub fn from_font_bytes(bytes: &[u8]) -> Result<Self, RenderError> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| RenderError::Font(e.to_string()))?;
        Ok(Self::new(font))
    }

    /// Mark the loaded face as already bold.
    pub fn with_bold_face(mut self, bold_face: bool) -> Self {
        self.bold_face = bold_face;
        self
    }

    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = max_dimension;
        self
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    fn emboldens(&self, font: &LabelFont) -> bool {
        font.bold && !self.bold_face
    }

    fn ascent(&self, size_px: f32) -> f32 {
        self.font
            .horizontal_line_metrics(size_px)
            .map(|m| m.ascent)
            .unwrap_or(size_px)
    }
}

impl Canvas for RasterCanvas {
    fn measure_text(&mut self, text: &str, font: &LabelFont) -> TextMetrics {
        let advance: f32 = text
            .chars()
            .map(|ch| self.font.metrics(ch, font.size_px).advance_width)
            .sum();
        let height = self
            .font
            .horizontal_line_metrics(font.size_px)
            .map(|m| m.ascent - m.descent)
            .unwrap_or(font.size_px);
        let extra = if self.emboldens(font) { 1 } else { 0 };
        TextMetrics {
            width: advance.ceil() as u32 + extra,
            height: height.ceil() as u32,
        }
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        let exhausted = RenderError::ResourceExhaustion {
            what: "raster canvas",
            width,
            height,
        };
        if width > self.max_dimension || height > self.max_dimension {
            return Err(exhausted);
        }
        let len = width as usize * height as usize * 4;
        let mut pixels = Vec::new();
        if pixels.try_reserve_exact(len).is_err() {
            return Err(exhausted);
        }
        pixels.resize(len, 0);
        self.image = RgbaImage::from_raw(width, height, pixels).ok_or(exhausted)?;
        Ok(())
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        fill_rect_on(&mut self.image, rect, color);
    }

    fn fill_text(&mut self, text: &str, x: u32, y: u32, font: &LabelFont, color: Color) {
        let baseline = y as i32 + self.ascent(font.size_px).round() as i32;
        let passes = if self.emboldens(font) { 2 } else { 1 };
        let mut pen_x = x as f32;

        for ch in text.chars() {
            let (metrics, coverage) = self.font.rasterize(ch, font.size_px);
            let left = pen_x.round() as i32 + metrics.xmin;
            let top = baseline - (metrics.height as i32 + metrics.ymin);

            for pass in 0..passes {
                for row in 0..metrics.height {
                    for col in 0..metrics.width {
                        let alpha = coverage[row * metrics.width + col];
                        if alpha == 0 {
                            continue;
                        }
                        blend_pixel(
                            &mut self.image,
                            left + col as i32 + pass,
                            top + row as i32,
                            color.with_coverage(alpha),
                        );
                    }
                }
            }
            pen_x += metrics.advance_width;
        }
    }

    fn image(&self) -> &RgbaImage {
        &self.image
    }
}

/// Blend a rectangle onto `image`, clipped to its bounds.
pub fn fill_rect_on(image: &mut RgbaImage, rect: PixelRect, color: Color) {
    let x_end = rect.x.saturating_add(rect.width).min(image.width());
    let y_end = rect.y.saturating_add(rect.height).min(image.height());
    for y in rect.y..y_end {
        for x in rect.x..x_end {
            blend_pixel(image, x as i32, y as i32, color);
        }
    }
}

/// Source-over blend of a straight-alpha color into one pixel. Out-of-bounds
/// coordinates are ignored.
pub fn blend_pixel(image: &mut RgbaImage, x: i32, y: i32, color: Color) {
    if x < 0 || y < 0 || x as u32 >= image.width() || y as u32 >= image.height() {
        return;
    }
    let dst = image.get_pixel_mut(x as u32, y as u32);
    let Rgba([dr, dg, db, da]) = *dst;

    let sa = color.a as f32 / 255.0;
    let da = da as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        *dst = Rgba([0, 0, 0, 0]);
        return;
    }
    let mix = |s: u8, d: u8| -> u8 {
        let value = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
        value.round().clamp(0.0, 255.0) as u8
    };
    *dst = Rgba([
        mix(color.r, dr),
        mix(color.g, dg),
        mix(color.b, db),
        (out_a * 255.0).round() as u8,
    ]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_fill_replaces_pixels() {
        let mut img = RgbaImage::new(4, 4);
        fill_rect_on(&mut img, PixelRect::new(1, 1, 2, 2), Color::WHITE);
        assert_eq!(*img.get_pixel(1, 1), Rgba([255, 255, 255, 255]));
        assert_eq!(*img.get_pixel(2, 2), Rgba([255, 255, 255, 255]));
        assert_eq!(*img.get_pixel(0, 0), Rgba([0, 0, 0, 0]));
        assert_eq!(*img.get_pixel(3, 3), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_translucent_over_transparent_keeps_color() {
        let mut img = RgbaImage::new(1, 1);
        blend_pixel(&mut img, 0, 0, Color::rgba(0, 0, 0, 128));
        assert_eq!(*img.get_pixel(0, 0), Rgba([0, 0, 0, 128]));
    }

    #[test]
    fn test_white_over_translucent_black() {
        let mut img = RgbaImage::new(1, 1);
        blend_pixel(&mut img, 0, 0, Color::rgba(0, 0, 0, 128));
        blend_pixel(&mut img, 0, 0, Color::rgba(255, 255, 255, 128));
        let Rgba([r, g, b, a]) = *img.get_pixel(0, 0);
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert!(r > 128 && r < 255, "{r}");
        assert!(a > 128, "{a}");
    }

    #[test]
    fn test_fill_is_clipped() {
        let mut img = RgbaImage::new(3, 3);
        fill_rect_on(&mut img, PixelRect::new(2, 2, 10, 10), Color::WHITE);
        assert_eq!(*img.get_pixel(2, 2), Rgba([255, 255, 255, 255]));
        fill_rect_on(&mut img, PixelRect::new(u32::MAX - 1, 0, 5, 5), Color::WHITE);
        blend_pixel(&mut img, -1, 0, Color::WHITE);
        blend_pixel(&mut img, 0, 3, Color::WHITE);
        assert_eq!(*img.get_pixel(0, 0), Rgba([0, 0, 0, 0]));
    }

    const SYSTEM_FONTS: &[&str] = &[
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/Library/Fonts/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ];

    /// A regular sans-serif face from the host, if one is installed.
    fn system_canvas() -> Option<RasterCanvas> {
        SYSTEM_FONTS
            .iter()
            .filter_map(|path| std::fs::read(path).ok())
            .find_map(|bytes| RasterCanvas::from_font_bytes(&bytes).ok())
    }

    fn regular(size_px: f32) -> LabelFont {
        LabelFont {
            size_px,
            bold: false,
        }
    }

    #[test]
    fn test_emboldening_adds_one_pixel() {
        let Some(mut canvas) = system_canvas() else {
            eprintln!("no system font found, skipping");
            return;
        };
        let bold = LabelFont::default();
        let plain = canvas.measure_text("1 µm", &regular(bold.size_px));
        let emboldened = canvas.measure_text("1 µm", &bold);
        assert!(plain.width > 0 && plain.height > 0);
        assert_eq!(emboldened.width, plain.width + 1);
        assert_eq!(emboldened.height, plain.height);

        let mut canvas = canvas.with_bold_face(true);
        assert_eq!(canvas.measure_text("1 µm", &bold).width, plain.width);
    }

    #[test]
    fn test_text_stays_inside_measured_box() {
        let Some(mut canvas) = system_canvas() else {
            eprintln!("no system font found, skipping");
            return;
        };
        let font = LabelFont::default();
        let text = "250 µm";
        let metrics = canvas.measure_text(text, &font);
        let (x, y) = (10, 10);
        canvas
            .resize(metrics.width + 2 * x, metrics.height + 2 * y)
            .unwrap();
        canvas.fill_text(text, x, y, &font, Color::WHITE);

        let mut drawn = 0;
        for (px, py, pixel) in canvas.image().enumerate_pixels() {
            if pixel.0[3] == 0 {
                continue;
            }
            drawn += 1;
            // One pixel of slack for glyph side bearings and ascent rounding.
            assert!(px + 1 >= x && px <= x + metrics.width, "x {px}");
            assert!(py + 1 >= y && py <= y + metrics.height, "y {py}");
            assert_eq!(&pixel.0[..3], &[255, 255, 255]);
        }
        assert!(drawn > 0);
    }

    #[test]
    fn test_resize_rejects_oversized_raster() {
        let Some(canvas) = system_canvas() else {
            eprintln!("no system font found, skipping");
            return;
        };
        let mut canvas = canvas.with_max_dimension(64);
        assert!(matches!(
            canvas.resize(65, 10),
            Err(RenderError::ResourceExhaustion { width: 65, .. })
        ));
        canvas.resize(64, 10).unwrap();
        assert_eq!(canvas.image().dimensions(), (64, 10));
    }

    #[test]
    fn test_garbage_font_bytes_are_rejected() {
        let result = RasterCanvas::from_font_bytes(b"not a font");
        assert!(matches!(result, Err(RenderError::Font(_))));
    }
}
