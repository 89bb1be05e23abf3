use serde::{Deserialize, Serialize};

/// Largest trim dimension the presses accept, in inches.
pub const MAX_DIMENSION_IN: f64 = 120.0;

/// A flat print dimension in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width_in: f64,
    pub height_in: f64,
}

impl Dimensions {
    pub fn new(width_in: f64, height_in: f64) -> crate::CoreResult<Self> {
        let dims = Self { width_in, height_in };
        dims.validate()?;
        Ok(dims)
    }

    pub fn area_sq_in(&self) -> f64 {
        self.width_in * self.height_in
    }

    pub fn validate(&self) -> crate::CoreResult<()> {
        for (label, v) in [("width", self.width_in), ("height", self.height_in)] {
            if !v.is_finite() || v <= 0.0 {
                return Err(crate::CoreError::ValidationError(format!(
                    "{} must be a positive number, got {}",
                    label, v
                )));
            }
            if v > MAX_DIMENSION_IN {
                return Err(crate::CoreError::ValidationError(format!(
                    "{} {}in exceeds the maximum of {}in",
                    label, v, MAX_DIMENSION_IN
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area() {
        let dims = Dimensions::new(3.5, 2.0).unwrap();
        assert!((dims.area_sq_in() - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_non_positive() {
        assert!(Dimensions::new(0.0, 2.0).is_err());
        assert!(Dimensions::new(3.5, -1.0).is_err());
        assert!(Dimensions::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_rejects_oversize() {
        assert!(Dimensions::new(121.0, 48.0).is_err());
    }
}
