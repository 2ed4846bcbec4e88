/// A metric length unit, defined by its length in nanometers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthUnit {
    pub symbol: &'static str,
    pub length_in_nanometers: f64,
}

impl LengthUnit {
    pub const fn new(symbol: &'static str, length_in_nanometers: f64) -> Self {
        Self {
            symbol,
            length_in_nanometers,
        }
    }

    /// Express a length given in nanometers in this unit.
    pub fn value_of(&self, nanometers: f64) -> f64 {
        nanometers / self.length_in_nanometers
    }

    /// Convert a value expressed in this unit back to nanometers.
    pub fn to_nanometers(&self, value: f64) -> f64 {
        value * self.length_in_nanometers
    }
}

/// Supported units, largest first. Unit selection depends on this order.
pub static LENGTH_UNITS: [LengthUnit; 6] = [
    LengthUnit::new("km", 1e12),
    LengthUnit::new("m", 1e9),
    LengthUnit::new("mm", 1e6),
    LengthUnit::new("µm", 1e3),
    LengthUnit::new("nm", 1.0),
    LengthUnit::new("pm", 1e-3),
];

/// Pick the unit used to label a length.
///
/// Returns the first unit (largest first) whose length is `<=` the input, so
/// exactly 1000 nm reports as µm. Anything below the smallest unit, and NaN,
/// falls through to pm.
pub fn select_unit(length_in_nanometers: f64) -> &'static LengthUnit {
    LENGTH_UNITS
        .iter()
        .find(|unit| length_in_nanometers >= unit.length_in_nanometers)
        .unwrap_or(&LENGTH_UNITS[LENGTH_UNITS.len() - 1])
}

/// Look up a unit by symbol. `"um"` is accepted for `"µm"`.
pub fn find_unit(symbol: &str) -> Option<&'static LengthUnit> {
    let symbol = if symbol == "um" { "µm" } else { symbol };
    LENGTH_UNITS.iter().find(|unit| unit.symbol == symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_descending() {
        for pair in LENGTH_UNITS.windows(2) {
            assert!(pair[0].length_in_nanometers > pair[1].length_in_nanometers);
        }
    }

    #[test]
    fn test_exact_boundary_picks_larger_unit() {
        assert_eq!(select_unit(1000.0).symbol, "µm");
        assert_eq!(select_unit(1e6).symbol, "mm");
        assert_eq!(select_unit(1e9).symbol, "m");
        assert_eq!(select_unit(1e12).symbol, "km");
        assert_eq!(select_unit(1.0).symbol, "nm");
        assert_eq!(select_unit(1e-3).symbol, "pm");
    }

    #[test]
    fn test_just_below_boundary_picks_smaller_unit() {
        assert_eq!(select_unit(999.0).symbol, "nm");
        assert_eq!(select_unit(0.5).symbol, "pm");
    }

    #[test]
    fn test_tiny_and_zero_fall_back_to_smallest() {
        assert_eq!(select_unit(0.0).symbol, "pm");
        assert_eq!(select_unit(1e-9).symbol, "pm");
        assert_eq!(select_unit(f64::NAN).symbol, "pm");
    }

    #[test]
    fn test_huge_values_stay_in_km() {
        assert_eq!(select_unit(5e15).symbol, "km");
        assert_eq!(select_unit(f64::INFINITY).symbol, "km");
    }

    #[test]
    fn test_selection_is_largest_qualifying_unit() {
        let mut value = 1e-6;
        while value < 1e15 {
            let unit = select_unit(value);
            let expected = LENGTH_UNITS
                .iter()
                .filter(|u| u.length_in_nanometers <= value)
                .max_by(|a, b| a.length_in_nanometers.total_cmp(&b.length_in_nanometers))
                .unwrap_or(&LENGTH_UNITS[5]);
            assert_eq!(unit, expected, "value {value}");
            value *= 3.7;
        }
    }

    #[test]
    fn test_conversions() {
        let um = find_unit("µm").unwrap();
        assert_eq!(um.value_of(2000.0), 2.0);
        assert_eq!(um.to_nanometers(2.0), 2000.0);
        assert_eq!(find_unit("um"), Some(um));
        assert!(find_unit("furlong").is_none());
    }
}
