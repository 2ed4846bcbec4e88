use std::collections::HashMap;

use image::RgbaImage;

use crate::error::RenderError;

/// The texture half of a graphics context.
///
/// Handles are created empty, filled by [`upload_texture`], and consumed by
/// [`delete_texture`] so each one is released at most once.
///
/// [`upload_texture`]: GraphicsContext::upload_texture
/// [`delete_texture`]: GraphicsContext::delete_texture
pub trait GraphicsContext {
    type Texture;

    fn create_texture(&mut self) -> Result<Self::Texture, RenderError>;

    /// Replace the content of `texture` with `image`. On error the previous
    /// content must be left intact.
    fn upload_texture(
        &mut self,
        texture: &Self::Texture,
        image: &RgbaImage,
    ) -> Result<(), RenderError>;

    fn delete_texture(&mut self, texture: Self::Texture);
}

/// Handle to a texture held by [`MemoryGraphics`].
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct TextureId(u32);

impl TextureId {
    pub fn raw(&self) -> u32 {
        self.0
    }
}

/// Headless texture store. Keeps uploaded rasters in memory and counts calls.
#[derive(Debug, Default)]
pub struct MemoryGraphics {
    textures: HashMap<u32, Option<RgbaImage>>,
    next_id: u32,
    /// Upper bound on bytes held across all textures.
    budget_bytes: Option<usize>,
    pub created: usize,
    pub uploads: usize,
    pub deleted: usize,
}

impl MemoryGraphics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_budget(budget_bytes: usize) -> Self {
        Self {
            budget_bytes: Some(budget_bytes),
            ..Self::default()
        }
    }

    pub fn set_budget(&mut self, budget_bytes: Option<usize>) {
        self.budget_bytes = budget_bytes;
    }

    /// Content of a live texture, `None` if never uploaded or deleted.
    pub fn texture_image(&self, texture: &TextureId) -> Option<&RgbaImage> {
        self.textures.get(&texture.0).and_then(|t| t.as_ref())
    }

    pub fn live_textures(&self) -> usize {
        self.textures.len()
    }

    fn bytes_in_use_except(&self, id: u32) -> usize {
        self.textures
            .iter()
            .filter(|(key, _)| **key != id)
            .filter_map(|(_, image)| image.as_ref())
            .map(|image| image.as_raw().len())
            .sum()
    }
}

impl GraphicsContext for MemoryGraphics {
    type Texture = TextureId;

    fn create_texture(&mut self) -> Result<TextureId, RenderError> {
        let id = self.next_id;
        self.next_id += 1;
        self.textures.insert(id, None);
        self.created += 1;
        log::trace!("Created texture {}", id);
        Ok(TextureId(id))
    }

    fn upload_texture(&mut self, texture: &TextureId, image: &RgbaImage) -> Result<(), RenderError> {
        if let Some(budget) = self.budget_bytes {
            if self.bytes_in_use_except(texture.0) + image.as_raw().len() > budget {
                return Err(RenderError::ResourceExhaustion {
                    what: "texture",
                    width: image.width(),
                    height: image.height(),
                });
            }
        }
        let slot = self.textures.get_mut(&texture.0).ok_or(RenderError::ResourceExhaustion {
            what: "texture",
            width: image.width(),
            height: image.height(),
        })?;
        *slot = Some(image.clone());
        self.uploads += 1;
        Ok(())
    }

    fn delete_texture(&mut self, texture: TextureId) {
        if self.textures.remove(&texture.0).is_some() {
            self.deleted += 1;
            log::trace!("Deleted texture {}", texture.0);
        } else {
            log::warn!("Texture {} deleted twice", texture.0);
        }
    }
}
