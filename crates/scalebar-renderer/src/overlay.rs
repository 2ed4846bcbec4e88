use serde::{Deserialize, Serialize};

use scalebar_core::ScaleBarDimensions;

/// Scale bar description for viewers that draw their own overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleBarOverlay {
    /// Size of the rendered raster, 0 until the first render.
    pub width: u32,
    pub height: u32,
    pub label: String,
    pub physical_length: f64,
    pub physical_unit: String,
    pub length_in_pixels: u32,
}

impl ScaleBarOverlay {
    pub fn new(dimensions: &ScaleBarDimensions, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            label: dimensions.label(),
            physical_length: dimensions.physical_length(),
            physical_unit: dimensions.physical_unit().to_string(),
            length_in_pixels: dimensions.length_in_pixels(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
