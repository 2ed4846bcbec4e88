use thiserror::Error;

use scalebar_core::ScaleBarError;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Dimensions(#[from] ScaleBarError),

    #[error("Out of resources allocating {what} of {width}x{height}")]
    ResourceExhaustion {
        what: &'static str,
        width: u32,
        height: u32,
    },

    #[error("Font error: {0}")]
    Font(String),
}
