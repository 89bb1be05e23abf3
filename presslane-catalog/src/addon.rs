use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::CatalogError;

/// How an add-on contributes to the total price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "model", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PricingModel {
    /// Fixed charge regardless of quantity or size.
    Flat { price_cents: i64 },
    /// Percentage of the adjusted base price (25.0 = 25%).
    Percentage { percent: f64 },
    /// Charge per printed piece.
    PerUnit { price_cents: i64 },
    /// Formula-driven pricing.
    Custom(CustomPricing),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "formula", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomPricing {
    /// price(q) = setup_fee + per_piece * q, defined for q >= 0.
    PerPiece {
        setup_fee_cents: i64,
        per_piece_cents: i64,
    },
    /// Stepped price table; the tier covering the quantity wins.
    Tiered { tiers: Vec<PriceTier> },
}

/// Inclusive quantity range with a flat price for the whole run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceTier {
    pub min_quantity: u32,
    pub max_quantity: u32,
    pub price_cents: i64,
}

impl PricingModel {
    /// Validate the model before it is accepted into the catalog.
    pub fn validate(&self) -> Result<(), CatalogError> {
        match self {
            PricingModel::Flat { price_cents } | PricingModel::PerUnit { price_cents } => {
                if *price_cents < 0 {
                    return Err(CatalogError::InvalidData(
                        "price_cents must be non-negative".to_string(),
                    ));
                }
            }
            PricingModel::Percentage { percent } => {
                if !percent.is_finite() || *percent < 0.0 {
                    return Err(CatalogError::InvalidData(
                        "percent must be a non-negative number".to_string(),
                    ));
                }
            }
            PricingModel::Custom(CustomPricing::PerPiece {
                setup_fee_cents,
                per_piece_cents,
            }) => {
                if *setup_fee_cents < 0 || *per_piece_cents < 0 {
                    return Err(CatalogError::InvalidData(
                        "per-piece fees must be non-negative".to_string(),
                    ));
                }
            }
            PricingModel::Custom(CustomPricing::Tiered { tiers }) => {
                if tiers.is_empty() {
                    return Err(CatalogError::InvalidData(
                        "tiered pricing requires at least one tier".to_string(),
                    ));
                }
                for tier in tiers {
                    if tier.min_quantity > tier.max_quantity {
                        return Err(CatalogError::InvalidData(format!(
                            "tier {}..{} has min above max",
                            tier.min_quantity, tier.max_quantity
                        )));
                    }
                    if tier.price_cents < 0 {
                        return Err(CatalogError::InvalidData(
                            "tier price must be non-negative".to_string(),
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}

/// An optional print-job modifier (corner rounding, foil stamping, QR code...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddOn {
    pub id: Uuid,
    /// Stable short code used by constraint rules (e.g. "FOIL", "ROUND_CORNERS").
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub pricing: PricingModel,
    pub is_active: bool,
    pub metadata: serde_json::Value,
}
