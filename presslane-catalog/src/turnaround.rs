use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::CatalogError;

/// A selectable production-speed tier.
///
/// The multiplier scales the base price; `days_to_ship` is added to the
/// fulfillment estimate. Rush tiers carry multipliers above 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnaroundTime {
    pub id: Uuid,
    pub name: String,
    pub days_to_ship: u32,
    pub price_multiplier: f64,
    pub is_default: bool,
}

impl TurnaroundTime {
    pub fn validate(&self) -> Result<(), CatalogError> {
        if !self.price_multiplier.is_finite() || self.price_multiplier < 1.0 {
            return Err(CatalogError::InvalidData(format!(
                "turnaround '{}' multiplier must be >= 1.0",
                self.name
            )));
        }
        Ok(())
    }
}

/// Pick the default turnaround from a product's options, falling back to the
/// slowest (cheapest) tier when none is flagged.
pub fn default_turnaround(options: &[TurnaroundTime]) -> Option<&TurnaroundTime> {
    options.iter().find(|t| t.is_default).or_else(|| {
        options
            .iter()
            .max_by(|a, b| a.days_to_ship.cmp(&b.days_to_ship))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiers() -> Vec<TurnaroundTime> {
        vec![
            TurnaroundTime {
                id: Uuid::new_v4(),
                name: "Standard".to_string(),
                days_to_ship: 5,
                price_multiplier: 1.0,
                is_default: false,
            },
            TurnaroundTime {
                id: Uuid::new_v4(),
                name: "Rush".to_string(),
                days_to_ship: 2,
                price_multiplier: 1.25,
                is_default: true,
            },
        ]
    }

    #[test]
    fn test_default_selection() {
        let options = tiers();
        assert_eq!(default_turnaround(&options).unwrap().name, "Rush");

        let mut options = tiers();
        options[1].is_default = false;
        // No flag: slowest tier wins.
        assert_eq!(default_turnaround(&options).unwrap().name, "Standard");
    }

    #[test]
    fn test_validate_multiplier() {
        let mut t = tiers().remove(0);
        assert!(t.validate().is_ok());
        t.price_multiplier = 0.8;
        assert!(t.validate().is_err());
    }
}
