//! # Scale Bar Core
//!
//! Quantization of the viewport scale bar. Given the on-screen length we would
//! like the bar to have and the physical size of one pixel, picks a round
//! metric length (5 µm rather than 4.83 µm) and the pixel length that draws it.
//!
//! Nothing here touches graphics; see `scalebar-renderer` for rasterization
//! and texture caching.

pub mod config;
pub mod dimensions;
pub mod error;
pub mod significands;
pub mod units;

pub use config::QuantizerConfig;
pub use dimensions::ScaleBarDimensions;
pub use error::ScaleBarError;
pub use significands::AllowedSignificands;
pub use units::{find_unit, select_unit, LengthUnit, LENGTH_UNITS};
