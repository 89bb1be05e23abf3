use serde::{Deserialize, Serialize};

use presslane_core::money::{round_cents, round_to_increment};
use presslane_core::units::Dimensions;

use crate::addon::{CustomPricing, PricingModel};
use crate::paper::{PaperStock, Sides};
use crate::CatalogError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Final prices land on multiples of this (in cents).
    pub rounding_increment_cents: i64,

    /// Clamp applied to turnaround multipliers.
    pub min_multiplier: f64,
    pub max_multiplier: f64,

    /// Shop markup over raw material cost (0.35 = 35%).
    pub default_markup: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            rounding_increment_cents: 1,
            min_multiplier: 1.0,
            max_multiplier: 5.0,
            default_markup: 0.35,
        }
    }
}

/// Print-job pricing engine.
///
/// All entry points are pure arithmetic over catalog data; nothing here
/// touches storage.
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Base production price in cents:
    /// paper rate x area x quantity x sides x coating, marked up.
    pub fn base_price_cents(
        &self,
        paper: &PaperStock,
        dims: Dimensions,
        quantity: u32,
        sides: Sides,
        coating_multiplier: f64,
    ) -> Result<i64, CatalogError> {
        if quantity == 0 {
            return Err(CatalogError::PricingFailed(
                "quantity must be at least 1".to_string(),
            ));
        }
        if !coating_multiplier.is_finite() || coating_multiplier < 1.0 {
            return Err(CatalogError::PricingFailed(format!(
                "coating multiplier {} out of range",
                coating_multiplier
            )));
        }

        let sides_multiplier = paper.sides_multiplier(sides)?;
        let material = paper.price_per_sq_inch * dims.area_sq_in() * quantity as f64;
        let dollars =
            material * sides_multiplier * coating_multiplier * (1.0 + self.config.default_markup);

        Ok(self.round(round_cents(dollars * 100.0)))
    }

    /// Apply a turnaround multiplier to a base price.
    ///
    /// The result is `base * m`, never `base + base * m`. The legacy
    /// calculator added the multiplied amount on top of the base and
    /// overcharged every rush order; `tests::test_turnaround_multiplies`
    /// pins the corrected behavior.
    pub fn apply_turnaround(&self, base_cents: i64, multiplier: f64) -> i64 {
        let m = multiplier
            .max(self.config.min_multiplier)
            .min(self.config.max_multiplier);
        self.round(round_cents(base_cents as f64 * m))
    }

    /// Price a single add-on against the unmultiplied base price.
    pub fn addon_price_cents(
        &self,
        model: &PricingModel,
        base_cents: i64,
        quantity: u32,
    ) -> Result<i64, CatalogError> {
        let cents = match model {
            PricingModel::Flat { price_cents } => *price_cents,
            PricingModel::Percentage { percent } => {
                round_cents(base_cents as f64 * percent / 100.0)
            }
            PricingModel::PerUnit { price_cents } => price_cents * quantity as i64,
            PricingModel::Custom(CustomPricing::PerPiece {
                setup_fee_cents,
                per_piece_cents,
            }) => setup_fee_cents + per_piece_cents * quantity as i64,
            PricingModel::Custom(CustomPricing::Tiered { tiers }) => {
                let tier = tiers
                    .iter()
                    .find(|t| quantity >= t.min_quantity && quantity <= t.max_quantity)
                    .ok_or_else(|| {
                        CatalogError::PricingFailed(format!(
                            "no price tier covers quantity {}",
                            quantity
                        ))
                    })?;
                tier.price_cents
            }
        };
        Ok(self.round(cents))
    }

    fn round(&self, cents: i64) -> i64 {
        round_to_increment(cents, self.config.rounding_increment_cents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addon::PriceTier;
    use uuid::Uuid;

    fn engine() -> PricingEngine {
        PricingEngine::new(PricingConfig {
            default_markup: 0.0, // keep arithmetic transparent in tests
            ..PricingConfig::default()
        })
    }

    fn stock() -> PaperStock {
        PaperStock {
            id: Uuid::new_v4(),
            name: "100lb Gloss Text".to_string(),
            price_per_sq_inch: 0.002,
            weight_per_sq_inch: 0.0005,
            double_sided_multiplier: 1.5,
            available_coatings: vec![],
            single_sided_only: false,
            is_active: true,
        }
    }

    #[test]
    fn test_base_price() {
        let dims = Dimensions::new(8.5, 11.0).unwrap();
        // 0.002 * 93.5 * 1000 = $187.00
        let cents = engine()
            .base_price_cents(&stock(), dims, 1000, Sides::Single, 1.0)
            .unwrap();
        assert_eq!(cents, 18700);
    }

    #[test]
    fn test_base_price_double_sided_and_coating() {
        let dims = Dimensions::new(8.5, 11.0).unwrap();
        // 187.00 * 1.5 * 1.15 = $322.575 -> 32258 cents
        let cents = engine()
            .base_price_cents(&stock(), dims, 1000, Sides::Double, 1.15)
            .unwrap();
        assert_eq!(cents, 32258);
    }

    #[test]
    fn test_base_price_applies_markup() {
        let eng = PricingEngine::new(PricingConfig {
            default_markup: 0.35,
            ..PricingConfig::default()
        });
        let dims = Dimensions::new(8.5, 11.0).unwrap();
        // 18700 * 1.35 = 25245
        let cents = eng
            .base_price_cents(&stock(), dims, 1000, Sides::Single, 1.0)
            .unwrap();
        assert_eq!(cents, 25245);
    }

    #[test]
    fn test_base_price_rejects_zero_quantity() {
        let dims = Dimensions::new(8.5, 11.0).unwrap();
        assert!(engine()
            .base_price_cents(&stock(), dims, 0, Sides::Single, 1.0)
            .is_err());
    }

    #[test]
    fn test_turnaround_multiplies() {
        let eng = engine();
        let base = 10000;
        // The multiplier replaces the base, it does not stack on top of it.
        assert_eq!(eng.apply_turnaround(base, 1.5), 15000);
        assert_ne!(eng.apply_turnaround(base, 1.5), base + 15000);
        // 1.0 is the identity.
        assert_eq!(eng.apply_turnaround(base, 1.0), base);
    }

    #[test]
    fn test_turnaround_clamps_multiplier() {
        let eng = engine();
        // Below the floor and above the ceiling both clamp.
        assert_eq!(eng.apply_turnaround(10000, 0.2), 10000);
        assert_eq!(eng.apply_turnaround(10000, 50.0), 50000);
    }

    #[test]
    fn test_addon_flat_and_per_unit() {
        let eng = engine();
        assert_eq!(
            eng.addon_price_cents(&PricingModel::Flat { price_cents: 500 }, 10000, 250)
                .unwrap(),
            500
        );
        assert_eq!(
            eng.addon_price_cents(&PricingModel::PerUnit { price_cents: 2 }, 10000, 250)
                .unwrap(),
            500
        );
    }

    #[test]
    fn test_addon_percentage_of_base() {
        let eng = engine();
        let model = PricingModel::Percentage { percent: 25.0 };
        assert_eq!(eng.addon_price_cents(&model, 10000, 250).unwrap(), 2500);
        // Scales linearly with the base.
        assert_eq!(eng.addon_price_cents(&model, 20000, 250).unwrap(), 5000);
        assert_eq!(eng.addon_price_cents(&model, 0, 250).unwrap(), 0);
    }

    #[test]
    fn test_addon_per_piece_formula() {
        let eng = engine();
        let model = PricingModel::Custom(CustomPricing::PerPiece {
            setup_fee_cents: 2000,
            per_piece_cents: 3,
        });
        // price(q) = setup + per_piece * q, including q = 0.
        for q in [0u32, 1, 100, 5000] {
            assert_eq!(
                eng.addon_price_cents(&model, 10000, q).unwrap(),
                2000 + 3 * q as i64
            );
        }
    }

    #[test]
    fn test_addon_tiered_lookup() {
        let eng = engine();
        let model = PricingModel::Custom(CustomPricing::Tiered {
            tiers: vec![
                PriceTier {
                    min_quantity: 1,
                    max_quantity: 499,
                    price_cents: 2500,
                },
                PriceTier {
                    min_quantity: 500,
                    max_quantity: 5000,
                    price_cents: 4000,
                },
            ],
        });
        assert_eq!(eng.addon_price_cents(&model, 10000, 499).unwrap(), 2500);
        assert_eq!(eng.addon_price_cents(&model, 10000, 500).unwrap(), 4000);
        // Uncovered quantity is a pricing error, not a silent zero.
        assert!(eng.addon_price_cents(&model, 10000, 10000).is_err());
    }

    #[test]
    fn test_rounding_increment() {
        let eng = PricingEngine::new(PricingConfig {
            rounding_increment_cents: 5,
            default_markup: 0.0,
            ..PricingConfig::default()
        });
        assert_eq!(
            eng.addon_price_cents(&PricingModel::Flat { price_cents: 503 }, 0, 1)
                .unwrap(),
            505
        );
    }
}
