use serde::{Deserialize, Serialize};

use presslane_catalog::turnaround::default_turnaround;
use presslane_catalog::{CatalogError, PricingEngine, ProductConfiguration, TurnaroundTime};
use presslane_core::money::round_cents;

use crate::models::{LineKind, Quote};
use crate::selections::ConfigSelections;
use crate::validation::{validate, ConstraintEngine};
use crate::weight::shipping_weight_lbs;
use crate::QuoteError;

/// Shop-level knobs that apply to every quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessRules {
    pub tax_rate: f64,
    pub quote_ttl_seconds: u64,
}

impl Default for BusinessRules {
    fn default() -> Self {
        Self {
            tax_rate: 0.0,
            quote_ttl_seconds: 900,
        }
    }
}

/// Builds a priced [`Quote`] from a product configuration and the
/// customer's selections.
///
/// Pipeline: validate, price the base run, apply the turnaround multiplier,
/// price add-ons against the unmultiplied base, tax, weight.
pub struct QuoteCalculator {
    pricing: PricingEngine,
    constraints: ConstraintEngine,
}

impl QuoteCalculator {
    pub fn new(pricing: PricingEngine, constraints: ConstraintEngine) -> Self {
        Self {
            pricing,
            constraints,
        }
    }

    pub fn calculate(
        &self,
        config: &ProductConfiguration,
        selections: &ConfigSelections,
        rules: &BusinessRules,
    ) -> Result<Quote, QuoteError> {
        if !config.product.is_active {
            return Err(QuoteError::ProductInactive);
        }

        // 1. Validate the configuration; this also resolves the trim size.
        let dims = validate(config, selections, &self.constraints)?;

        let paper = config.paper_stock(selections.paper_stock_id)?;
        let coating_multiplier = match &selections.coating_code {
            Some(code) => {
                paper
                    .coating(code)
                    .ok_or_else(|| CatalogError::NotFound(format!("coating {}", code)))?
                    .price_multiplier
            }
            None => 1.0,
        };

        // 2. Base production price.
        let base_cents = self.pricing.base_price_cents(
            paper,
            dims,
            selections.quantity,
            selections.sides,
            coating_multiplier,
        )?;

        // 3. Turnaround multiplier on the base only.
        let turnaround = self.resolve_turnaround(config, selections)?;
        let production_cents = self
            .pricing
            .apply_turnaround(base_cents, turnaround.price_multiplier);

        let mut quote = Quote::new(config.product.id, rules.quote_ttl_seconds);
        quote.add_line(
            LineKind::Production,
            format!(
                "{} x {} ({}, {})",
                selections.quantity, config.product.name, paper.name, turnaround.name
            ),
            production_cents,
        );

        // 4. Add-ons are priced against the unmultiplied base price.
        for addon_id in &selections.addon_ids {
            let addon = config.addon(*addon_id)?;
            let amount =
                self.pricing
                    .addon_price_cents(&addon.pricing, base_cents, selections.quantity)?;
            quote.add_line(LineKind::Addon, addon.name.clone(), amount);
        }

        // 5. Tax on the subtotal.
        let tax_cents = round_cents(quote.subtotal_cents as f64 * rules.tax_rate);
        quote.set_tax(tax_cents);

        // 6. Per-piece price and shipping weight.
        quote.unit_price_cents =
            round_cents(quote.subtotal_cents as f64 / selections.quantity as f64);
        quote.total_weight_lbs = shipping_weight_lbs(paper, dims, selections.quantity);
        quote.turnaround_days = turnaround.days_to_ship;

        Ok(quote)
    }

    fn resolve_turnaround<'a>(
        &self,
        config: &'a ProductConfiguration,
        selections: &ConfigSelections,
    ) -> Result<&'a TurnaroundTime, QuoteError> {
        match selections.turnaround_id {
            Some(id) => Ok(config.turnaround(id)?),
            None => default_turnaround(&config.turnarounds).ok_or_else(|| {
                QuoteError::Pricing(CatalogError::InvalidData(
                    "product has no turnaround options".to_string(),
                ))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selections::SizeSelection;
    use crate::validation::{default_rules, ConstraintEngine};
    use presslane_catalog::{
        AddOn, CoatingOption, CustomPricing, PaperStock, PriceTier, PricingConfig, PricingModel,
        PrintSize, Product, ProductClass, QuantityGroup, Sides, SizeGroup,
    };
    use uuid::Uuid;

    fn fixture() -> (ProductConfiguration, ConfigSelections) {
        let paper = PaperStock {
            id: Uuid::new_v4(),
            name: "14pt Cardstock".to_string(),
            price_per_sq_inch: 0.002,
            weight_per_sq_inch: 0.0009,
            double_sided_multiplier: 1.5,
            available_coatings: vec![CoatingOption {
                code: "NONE".to_string(),
                name: "Uncoated".to_string(),
                price_multiplier: 1.0,
            }],
            single_sided_only: false,
            is_active: true,
        };
        let corner_rounding = AddOn {
            id: Uuid::new_v4(),
            code: "ROUND_CORNERS".to_string(),
            name: "Corner rounding".to_string(),
            description: None,
            pricing: PricingModel::Flat { price_cents: 500 },
            is_active: true,
            metadata: serde_json::json!({}),
        };
        let numbering = AddOn {
            id: Uuid::new_v4(),
            code: "NUMBERING".to_string(),
            name: "Sequential numbering".to_string(),
            description: None,
            pricing: PricingModel::Custom(CustomPricing::PerPiece {
                setup_fee_cents: 2000,
                per_piece_cents: 2,
            }),
            is_active: true,
            metadata: serde_json::json!({}),
        };
        let quantity_group = QuantityGroup {
            id: Uuid::new_v4(),
            name: "Card runs".to_string(),
            quantities: vec![100, 250, 500, 1000],
            allow_custom: false,
            custom_min: 0,
            custom_max: 0,
        };
        let size_group = SizeGroup {
            id: Uuid::new_v4(),
            name: "Card sizes".to_string(),
            sizes: vec![PrintSize {
                name: "3.5x2".to_string(),
                width_in: 3.5,
                height_in: 2.0,
            }],
            allow_custom: false,
            custom_min_in: 0.0,
            custom_max_in: 0.0,
        };
        let standard = TurnaroundTime {
            id: Uuid::new_v4(),
            name: "Standard".to_string(),
            days_to_ship: 5,
            price_multiplier: 1.0,
            is_default: true,
        };
        let rush = TurnaroundTime {
            id: Uuid::new_v4(),
            name: "Rush".to_string(),
            days_to_ship: 2,
            price_multiplier: 1.5,
            is_default: false,
        };

        let product = Product {
            id: Uuid::new_v4(),
            sku: "BC-STD".to_string(),
            name: "Business Cards".to_string(),
            description: None,
            product_class: ProductClass::BusinessCard,
            paper_stock_ids: vec![paper.id],
            addon_ids: vec![corner_rounding.id, numbering.id],
            quantity_group_id: quantity_group.id,
            size_group_id: size_group.id,
            turnaround_ids: vec![standard.id, rush.id],
            is_active: true,
            metadata: serde_json::json!({}),
        };

        let selections = ConfigSelections {
            quantity: 1000,
            size: SizeSelection::Preset {
                name: "3.5x2".to_string(),
            },
            paper_stock_id: paper.id,
            coating_code: Some("NONE".to_string()),
            sides: Sides::Single,
            addon_ids: vec![],
            turnaround_id: Some(standard.id),
        };

        let config = ProductConfiguration {
            product,
            paper_stocks: vec![paper],
            addons: vec![corner_rounding, numbering],
            quantity_group,
            size_group,
            turnarounds: vec![standard, rush],
        };

        (config, selections)
    }

    fn calculator() -> QuoteCalculator {
        QuoteCalculator::new(
            PricingEngine::new(PricingConfig {
                default_markup: 0.0,
                ..PricingConfig::default()
            }),
            ConstraintEngine::new(default_rules()),
        )
    }

    #[test]
    fn test_base_quote() {
        let (config, selections) = fixture();
        let quote = calculator()
            .calculate(&config, &selections, &BusinessRules::default())
            .unwrap();

        // 0.002 * 7 sq in * 1000 = $14.00
        assert_eq!(quote.subtotal_cents, 1400);
        assert_eq!(quote.total_cents, 1400);
        // 1400 / 1000 pieces, rounded half up.
        assert_eq!(quote.unit_price_cents, 1);
        // 0.0009 * 7 * 1000 = 6.3 lbs
        assert!((quote.total_weight_lbs - 6.3).abs() < 1e-9);
        assert_eq!(quote.turnaround_days, 5);
        assert_eq!(quote.lines.len(), 1);
    }

    #[test]
    fn test_rush_multiplies_base_only_once() {
        let (config, mut selections) = fixture();
        selections.turnaround_id = Some(config.turnarounds[1].id);

        let quote = calculator()
            .calculate(&config, &selections, &BusinessRules::default())
            .unwrap();

        // Regression: 1400 * 1.5 = 2100, NOT 1400 + 2100 = 3500.
        assert_eq!(quote.subtotal_cents, 2100);
        assert_ne!(quote.subtotal_cents, 3500);
        assert_eq!(quote.turnaround_days, 2);
    }

    #[test]
    fn test_addons_priced_on_unmultiplied_base() {
        let (config, mut selections) = fixture();
        selections.turnaround_id = Some(config.turnarounds[1].id); // rush 1.5x
        selections.addon_ids = vec![config.addons[1].id]; // per-piece numbering

        let quote = calculator()
            .calculate(&config, &selections, &BusinessRules::default())
            .unwrap();

        // Production 1400 * 1.5 = 2100; numbering 2000 + 2*1000 = 4000.
        // The rush multiplier must not touch the add-on line.
        assert_eq!(quote.subtotal_cents, 2100 + 4000);
        let addon_line = quote
            .lines
            .iter()
            .find(|l| l.kind == LineKind::Addon)
            .unwrap();
        assert_eq!(addon_line.amount_cents, 4000);
    }

    #[test]
    fn test_flat_addon_and_tax() {
        let (config, mut selections) = fixture();
        selections.addon_ids = vec![config.addons[0].id]; // flat $5.00

        let rules = BusinessRules {
            tax_rate: 0.0825,
            quote_ttl_seconds: 900,
        };
        let quote = calculator().calculate(&config, &selections, &rules).unwrap();

        assert_eq!(quote.subtotal_cents, 1400 + 500);
        // 1900 * 0.0825 = 156.75 -> 157
        assert_eq!(quote.tax_cents, 157);
        assert_eq!(quote.total_cents, 2057);
    }

    #[test]
    fn test_default_turnaround_used_when_omitted() {
        let (config, mut selections) = fixture();
        selections.turnaround_id = None;

        let quote = calculator()
            .calculate(&config, &selections, &BusinessRules::default())
            .unwrap();
        assert_eq!(quote.turnaround_days, 5);
    }

    #[test]
    fn test_invalid_quantity_rejected_before_pricing() {
        let (config, mut selections) = fixture();
        selections.quantity = 333;

        let err = calculator()
            .calculate(&config, &selections, &BusinessRules::default())
            .unwrap_err();
        assert!(matches!(err, QuoteError::Validation(_)));
    }

    #[test]
    fn test_inactive_product_rejected() {
        let (mut config, selections) = fixture();
        config.product.is_active = false;

        let err = calculator()
            .calculate(&config, &selections, &BusinessRules::default())
            .unwrap_err();
        assert!(matches!(err, QuoteError::ProductInactive));
    }

    #[test]
    fn test_tiered_addon_uncovered_quantity_fails() {
        let (mut config, mut selections) = fixture();
        let tiered = AddOn {
            id: Uuid::new_v4(),
            code: "FOLDING".to_string(),
            name: "Folding".to_string(),
            description: None,
            pricing: PricingModel::Custom(CustomPricing::Tiered {
                tiers: vec![PriceTier {
                    min_quantity: 1,
                    max_quantity: 500,
                    price_cents: 1500,
                }],
            }),
            is_active: true,
            metadata: serde_json::json!({}),
        };
        config.product.addon_ids.push(tiered.id);
        selections.addon_ids = vec![tiered.id];
        config.addons.push(tiered);

        // 1000 pieces fall outside every tier.
        let err = calculator()
            .calculate(&config, &selections, &BusinessRules::default())
            .unwrap_err();
        assert!(matches!(err, QuoteError::Pricing(_)));
    }
}
