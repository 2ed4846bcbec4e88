use crate::error::ScaleBarError;
use crate::significands::AllowedSignificands;
use crate::units::{select_unit, LengthUnit, LENGTH_UNITS};

/// Quantized scale bar dimensions for the current zoom level.
///
/// Set the two inputs every frame and call [`update`](Self::update); the
/// outputs are recomputed only when an input actually changed.
#[derive(Debug, Clone)]
pub struct ScaleBarDimensions {
    /// Desired on-screen length of the bar.
    pub target_length_in_pixels: f64,
    /// Physical size of one screen pixel along the bar.
    pub nanometers_per_pixel: f64,
    /// Inputs of the last successful update.
    previous_inputs: Option<(f64, f64)>,
    significands: AllowedSignificands,
    length_in_pixels: u32,
    physical_length: f64,
    unit: &'static LengthUnit,
}

impl ScaleBarDimensions {
    pub fn new(target_length_in_pixels: f64, nanometers_per_pixel: f64) -> Self {
        Self {
            target_length_in_pixels,
            nanometers_per_pixel,
            previous_inputs: None,
            significands: AllowedSignificands::default(),
            length_in_pixels: 0,
            physical_length: 0.0,
            unit: &LENGTH_UNITS[4],
        }
    }

    pub fn with_significands(mut self, significands: AllowedSignificands) -> Self {
        self.significands = significands;
        self.previous_inputs = None;
        self
    }

    pub fn set_target_length_in_pixels(&mut self, pixels: f64) {
        self.target_length_in_pixels = pixels;
    }

    pub fn set_nanometers_per_pixel(&mut self, nanometers: f64) {
        self.nanometers_per_pixel = nanometers;
    }

    pub fn significands(&self) -> &AllowedSignificands {
        &self.significands
    }

    /// Length of the bar to draw, in pixels.
    pub fn length_in_pixels(&self) -> u32 {
        self.length_in_pixels
    }

    /// Quantized length expressed in [`physical_unit`](Self::physical_unit).
    pub fn physical_length(&self) -> f64 {
        self.physical_length
    }

    pub fn physical_unit(&self) -> &'static str {
        self.unit.symbol
    }

    pub fn unit(&self) -> &'static LengthUnit {
        self.unit
    }

    /// Quantized length converted back to nanometers.
    pub fn physical_nanometers(&self) -> f64 {
        self.unit.to_nanometers(self.physical_length)
    }

    /// Label text, e.g. `"5 µm"`.
    pub fn label(&self) -> String {
        format!(
            "{} {}",
            format_length(self.physical_length),
            self.unit.symbol
        )
    }

    /// Forget the cached inputs so the next update recomputes.
    pub fn invalidate(&mut self) {
        self.previous_inputs = None;
    }

    /// Recompute the outputs. Returns `Ok(false)` when both inputs are
    /// bit-identical to the last successful call, leaving outputs untouched.
    pub fn update(&mut self) -> Result<bool, ScaleBarError> {
        let target = self.target_length_in_pixels;
        let per_pixel = self.nanometers_per_pixel;
        check_positive("target_length_in_pixels", target)?;
        check_positive("nanometers_per_pixel", per_pixel)?;

        if let Some((prev_target, prev_per_pixel)) = self.previous_inputs {
            if prev_target.to_bits() == target.to_bits()
                && prev_per_pixel.to_bits() == per_pixel.to_bits()
            {
                log::trace!("Scale bar unchanged at {} nm/px", per_pixel);
                return Ok(false);
            }
        }

        let target_nanometers = target * per_pixel;
        // Overflow or underflow of the product would poison log10.
        check_positive("target_nanometers", target_nanometers)?;

        let exponent = target_nanometers.log10().floor();
        let base = 10f64.powf(exponent);
        let target_significand = target_nanometers / base;
        let significand = self.significands.nearest(target_significand);

        let physical_nanometers = significand * base;
        let unit = select_unit(physical_nanometers);

        let pixels = (physical_nanometers / per_pixel).round();
        if pixels > u32::MAX as f64 {
            return Err(ScaleBarError::LengthOutOfRange { pixels });
        }

        self.previous_inputs = Some((target, per_pixel));
        self.length_in_pixels = pixels as u32;
        self.physical_length = unit.value_of(physical_nanometers);
        self.unit = unit;

        log::debug!(
            "Scale bar: target {:.3} nm -> {} ({} px)",
            target_nanometers,
            self.label(),
            self.length_in_pixels
        );
        Ok(true)
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), ScaleBarError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ScaleBarError::InvalidInput { name, value })
    }
}

/// Print at most six significant digits, trimming trailing zeros.
fn format_length(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return value.to_string();
    }
    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (5 - magnitude).max(0) as usize;
    let text = format!("{value:.decimals$}");
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}
