use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScaleBarError {
    #[error("Invalid input: {name} must be finite and positive, got {value}")]
    InvalidInput { name: &'static str, value: f64 },

    #[error("Scale bar of {pixels} px does not fit in a pixel length")]
    LengthOutOfRange { pixels: f64 },

    #[error("Invalid significand {0}: allowed significands must lie in [1, 10]")]
    InvalidSignificand(f64),
}
