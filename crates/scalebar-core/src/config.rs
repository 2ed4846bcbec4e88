use serde::{Deserialize, Serialize};

use crate::dimensions::ScaleBarDimensions;
use crate::significands::AllowedSignificands;

/// Presentation policy for the quantizer, loadable from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuantizerConfig {
    /// Desired on-screen bar length in pixels.
    pub target_length_in_pixels: f64,
    pub allowed_significands: AllowedSignificands,
}

impl Default for QuantizerConfig {
    fn default() -> Self {
        Self {
            target_length_in_pixels: 100.0,
            allowed_significands: AllowedSignificands::default(),
        }
    }
}

impl QuantizerConfig {
    /// Create a quantizer for the given pixel size.
    pub fn build(&self, nanometers_per_pixel: f64) -> ScaleBarDimensions {
        ScaleBarDimensions::new(self.target_length_in_pixels, nanometers_per_pixel)
            .with_significands(self.allowed_significands.clone())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = QuantizerConfig::default();
        assert_eq!(config.target_length_in_pixels, 100.0);
        assert_eq!(config.allowed_significands, AllowedSignificands::default());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = QuantizerConfig::from_json(r#"{ "allowed_significands": [2, 5] }"#).unwrap();
        assert_eq!(config.target_length_in_pixels, 100.0);
        assert_eq!(config.allowed_significands.values(), &[2.0, 5.0]);
    }

    #[test]
    fn test_invalid_significand_fails_to_load() {
        let err = QuantizerConfig::from_json(r#"{ "allowed_significands": [0.2] }"#).unwrap_err();
        assert!(err.to_string().contains("Invalid significand"));
    }

    #[test]
    fn test_json_round_trip() {
        let config = QuantizerConfig {
            target_length_in_pixels: 150.0,
            allowed_significands: AllowedSignificands::new([2.0, 5.0]).unwrap(),
        };
        let json = config.to_json().unwrap();
        assert_eq!(QuantizerConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_build_applies_policy() {
        let config = QuantizerConfig::from_json(r#"{ "target_length_in_pixels": 50 }"#).unwrap();
        let mut d = config.build(37.0);
        assert!(d.update().unwrap());
        assert_eq!(d.length_in_pixels(), 54);
    }
}
