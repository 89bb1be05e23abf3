use presslane_catalog::PaperStock;
use presslane_core::units::Dimensions;

/// Shipping weight for a print run, in pounds.
///
/// weight_per_sq_inch x area x quantity, rounded UP to two decimals since
/// carriers bill by the started unit. Ink and coating weight are ignored;
/// double-sided printing does not change the sheet weight.
pub fn shipping_weight_lbs(paper: &PaperStock, dims: Dimensions, quantity: u32) -> f64 {
    let raw = paper.weight_per_sq_inch * dims.area_sq_in() * quantity as f64;
    (raw * 100.0).ceil() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use presslane_catalog::PaperStock;
    use uuid::Uuid;

    fn stock(weight_per_sq_inch: f64) -> PaperStock {
        PaperStock {
            id: Uuid::new_v4(),
            name: "Test Stock".to_string(),
            price_per_sq_inch: 0.002,
            weight_per_sq_inch,
            double_sided_multiplier: 1.5,
            available_coatings: vec![],
            single_sided_only: false,
            is_active: true,
        }
    }

    #[test]
    fn test_weight_formula() {
        let dims = Dimensions::new(3.5, 2.0).unwrap();
        // 0.0009 * 7 * 1000 = 6.3 lbs exactly
        let w = shipping_weight_lbs(&stock(0.0009), dims, 1000);
        assert!((w - 6.3).abs() < 1e-9);
    }

    #[test]
    fn test_weight_rounds_up() {
        let dims = Dimensions::new(4.0, 6.0).unwrap();
        // 0.00037 * 24 * 250 = 2.22 exactly; nudge the rate to force a
        // fractional third decimal.
        let w = shipping_weight_lbs(&stock(0.000371), dims, 250);
        assert!((w - 2.23).abs() < 1e-9, "got {}", w);
    }

    #[test]
    fn test_zero_quantity_weighs_nothing() {
        let dims = Dimensions::new(4.0, 6.0).unwrap();
        assert_eq!(shipping_weight_lbs(&stock(0.0009), dims, 0), 0.0);
    }
}
