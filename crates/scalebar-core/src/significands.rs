use serde::{Deserialize, Serialize};

use crate::error::ScaleBarError;

/// Leading digits the quantizer is allowed to pick, sorted ascending.
///
/// 1 is always implicitly allowed and is not stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct AllowedSignificands {
    values: Vec<f64>,
}

impl AllowedSignificands {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Result<Self, ScaleBarError> {
        let mut values: Vec<f64> = values.into_iter().collect();
        if let Some(&bad) = values
            .iter()
            .find(|v| !v.is_finite() || **v < 1.0 || **v > 10.0)
        {
            return Err(ScaleBarError::InvalidSignificand(bad));
        }
        values.sort_by(f64::total_cmp);
        values.dedup();
        values.retain(|&v| v != 1.0);
        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The allowed significand closest to `target`.
    ///
    /// Scans every candidate starting from the implicit 1. On equal distance
    /// the smaller candidate is kept.
    pub fn nearest(&self, target: f64) -> f64 {
        let mut best = 1.0;
        let mut best_distance = (target - best).abs();
        for &candidate in &self.values {
            let distance = (target - candidate).abs();
            if distance < best_distance {
                best = candidate;
                best_distance = distance;
            }
        }
        best
    }
}

impl Default for AllowedSignificands {
    fn default() -> Self {
        Self {
            values: vec![1.5, 2.0, 3.0, 5.0, 7.5, 10.0],
        }
    }
}

impl TryFrom<Vec<f64>> for AllowedSignificands {
    type Error = ScaleBarError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl From<AllowedSignificands> for Vec<f64> {
    fn from(significands: AllowedSignificands) -> Self {
        significands.values
    }
}
