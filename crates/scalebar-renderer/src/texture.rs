use scalebar_core::ScaleBarDimensions;

use crate::canvas::{Canvas, PixelRect};
use crate::error::RenderError;
use crate::graphics::GraphicsContext;
use crate::overlay::ScaleBarOverlay;
use crate::style::ScaleBarStyle;

/// Scale bar rendered into a texture, re-rendered only when its dimensions
/// change.
///
/// The texture is created on the first successful render and re-uploaded in
/// place afterwards. Call [`release`](Self::release) before dropping.
pub struct ScaleBarTexture<C: Canvas, G: GraphicsContext> {
    dimensions: ScaleBarDimensions,
    style: ScaleBarStyle,
    canvas: C,
    texture: Option<G::Texture>,
    width: u32,
    height: u32,
}

impl<C: Canvas, G: GraphicsContext> ScaleBarTexture<C, G> {
    pub fn new(dimensions: ScaleBarDimensions, canvas: C) -> Self {
        Self {
            dimensions,
            style: ScaleBarStyle::default(),
            canvas,
            texture: None,
            width: 0,
            height: 0,
        }
    }

    pub fn with_style(mut self, style: ScaleBarStyle) -> Self {
        self.style = style;
        self
    }

    pub fn style(&self) -> &ScaleBarStyle {
        &self.style
    }

    /// Change the style. The next update re-renders.
    pub fn set_style(&mut self, style: ScaleBarStyle) {
        self.style = style;
        self.dimensions.invalidate();
    }

    pub fn dimensions(&self) -> &ScaleBarDimensions {
        &self.dimensions
    }

    pub fn dimensions_mut(&mut self) -> &mut ScaleBarDimensions {
        &mut self.dimensions
    }

    pub fn set_target_length_in_pixels(&mut self, pixels: f64) {
        self.dimensions.set_target_length_in_pixels(pixels);
    }

    pub fn set_nanometers_per_pixel(&mut self, nanometers: f64) {
        self.dimensions.set_nanometers_per_pixel(nanometers);
    }

    pub fn texture(&self) -> Option<&G::Texture> {
        self.texture.as_ref()
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    /// Width of the uploaded raster.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the uploaded raster.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn overlay(&self) -> ScaleBarOverlay {
        ScaleBarOverlay::new(&self.dimensions, self.width, self.height)
    }

    /// Bring the texture up to date. Returns `Ok(true)` if it was re-rendered.
    ///
    /// On error the previous texture and size are kept and the next call
    /// renders again.
    pub fn update(&mut self, gl: &mut G) -> Result<bool, RenderError> {
        let changed = self.dimensions.update()?;
        if !changed && self.texture.is_some() {
            return Ok(false);
        }

        if let Err(err) = self.render(gl) {
            log::warn!("Scale bar render failed: {}", err);
            self.dimensions.invalidate();
            return Err(err);
        }
        Ok(true)
    }

    fn render(&mut self, gl: &mut G) -> Result<(), RenderError> {
        let style = &self.style;
        let label = self.dimensions.label();
        let bar_length = self.dimensions.length_in_pixels();
        let text = self.canvas.measure_text(&label, &style.font);

        let width = bar_length
            .max(text.width)
            .saturating_add(2 * style.padding);
        let height = style
            .bar_height
            .saturating_add(style.bar_top_margin)
            .saturating_add(text.height)
            .saturating_add(2 * style.padding);

        self.canvas.resize(width, height)?;
        self.canvas
            .fill_rect(PixelRect::new(0, 0, width, height), style.background);
        self.canvas.fill_text(
            &label,
            (width - text.width) / 2,
            style.padding,
            &style.font,
            style.foreground,
        );
        let bar_top = style.padding + text.height + style.bar_top_margin;
        self.canvas.fill_rect(
            PixelRect::new((width - bar_length) / 2, bar_top, bar_length, style.bar_height),
            style.foreground,
        );

        if let Some(texture) = &self.texture {
            gl.upload_texture(texture, self.canvas.image())?;
        } else {
            let texture = gl.create_texture()?;
            if let Err(err) = gl.upload_texture(&texture, self.canvas.image()) {
                gl.delete_texture(texture);
                return Err(err);
            }
            self.texture = Some(texture);
        }

        self.width = width;
        self.height = height;
        log::debug!("Rendered scale bar '{}' at {}x{}", label, width, height);
        Ok(())
    }

    /// Delete the texture and dispose of the renderer.
    pub fn release(mut self, gl: &mut G) {
        if let Some(texture) = self.texture.take() {
            gl.delete_texture(texture);
        }
    }
}

impl<C: Canvas, G: GraphicsContext> Drop for ScaleBarTexture<C, G> {
    fn drop(&mut self) {
        if self.texture.is_some() {
            log::warn!("Scale bar texture dropped without release; handle leaked");
        }
    }
}
