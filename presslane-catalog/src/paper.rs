use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::CatalogError;

/// Which faces of the sheet get printed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sides {
    Single,
    Double,
}

/// A coating finish offered on a paper stock.
///
/// The multiplier scales the base paper cost (1.0 = no surcharge).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoatingOption {
    pub code: String,
    pub name: String,
    pub price_multiplier: f64,
}

/// A physical paper/material option.
///
/// Per-square-inch price and weight drive both pricing and the shipping
/// weight estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperStock {
    pub id: Uuid,
    pub name: String,
    /// Dollars per square inch of printed area.
    pub price_per_sq_inch: f64,
    /// Pounds per square inch of a single sheet.
    pub weight_per_sq_inch: f64,
    /// Cost multiplier when printing both sides (1.0 = free second side).
    pub double_sided_multiplier: f64,
    pub available_coatings: Vec<CoatingOption>,
    /// Some stocks (e.g. adhesive vinyl) cannot be printed on the back.
    pub single_sided_only: bool,
    pub is_active: bool,
}

impl PaperStock {
    /// Look up a coating offered by this stock.
    pub fn coating(&self, code: &str) -> Option<&CoatingOption> {
        self.available_coatings.iter().find(|c| c.code == code)
    }

    /// Cost multiplier for the requested sides, or an error when the stock
    /// cannot be printed double-sided.
    pub fn sides_multiplier(&self, sides: Sides) -> Result<f64, CatalogError> {
        match sides {
            Sides::Single => Ok(1.0),
            Sides::Double if self.single_sided_only => Err(CatalogError::NotAvailable(format!(
                "paper stock '{}' is single-sided only",
                self.name
            ))),
            Sides::Double => Ok(self.double_sided_multiplier),
        }
    }

    /// Sanity-check rates before the stock is accepted into the catalog.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if !self.price_per_sq_inch.is_finite() || self.price_per_sq_inch < 0.0 {
            return Err(CatalogError::InvalidData(format!(
                "paper stock '{}' has invalid price per square inch",
                self.name
            )));
        }
        if !self.weight_per_sq_inch.is_finite() || self.weight_per_sq_inch < 0.0 {
            return Err(CatalogError::InvalidData(format!(
                "paper stock '{}' has invalid weight per square inch",
                self.name
            )));
        }
        if !self.double_sided_multiplier.is_finite() || self.double_sided_multiplier < 1.0 {
            return Err(CatalogError::InvalidData(format!(
                "paper stock '{}' double-sided multiplier must be >= 1.0",
                self.name
            )));
        }
        for coating in &self.available_coatings {
            if !coating.price_multiplier.is_finite() || coating.price_multiplier < 1.0 {
                return Err(CatalogError::InvalidData(format!(
                    "coating '{}' multiplier must be >= 1.0",
                    coating.code
                )));
            }
        }
        Ok(())
    }
}
