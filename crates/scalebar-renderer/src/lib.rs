//! # Scale Bar Renderer
//!
//! Draws the quantized scale bar (a translucent panel, a "5 µm" label and a
//! solid bar) into a raster and keeps it uploaded as a texture for the
//! viewport overlay. The texture is only re-rendered when the quantized
//! dimensions change.
//!
//! Drawing and texture upload go through the [`Canvas`] and
//! [`GraphicsContext`] traits so any backend can be plugged in. A CPU raster
//! ([`RasterCanvas`]) and an in-memory texture store ([`MemoryGraphics`]) are
//! provided for headless use.

pub mod canvas;
pub mod error;
pub mod graphics;
pub mod overlay;
pub mod raster;
pub mod style;
pub mod texture;

pub use canvas::{Canvas, PixelRect, TextMetrics};
pub use error::RenderError;
pub use graphics::{GraphicsContext, MemoryGraphics, TextureId};
pub use overlay::ScaleBarOverlay;
pub use raster::RasterCanvas;
pub use style::{Color, LabelFont, ScaleBarStyle};
pub use texture::ScaleBarTexture;
