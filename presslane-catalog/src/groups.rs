use serde::{Deserialize, Serialize};
use uuid::Uuid;

use presslane_core::units::Dimensions;

use crate::CatalogError;

/// The run quantities a product can be ordered in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantityGroup {
    pub id: Uuid,
    pub name: String,
    /// Preset quantities shown in the configurator, ascending.
    pub quantities: Vec<u32>,
    /// Whether arbitrary quantities inside the custom bounds are accepted.
    pub allow_custom: bool,
    pub custom_min: u32,
    pub custom_max: u32,
}

impl QuantityGroup {
    /// Whether the group permits ordering `quantity` pieces.
    pub fn permits(&self, quantity: u32) -> bool {
        if quantity == 0 {
            return false;
        }
        if self.quantities.contains(&quantity) {
            return true;
        }
        self.allow_custom && quantity >= self.custom_min && quantity <= self.custom_max
    }
}

/// A named trim size preset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintSize {
    pub name: String,
    pub width_in: f64,
    pub height_in: f64,
}

impl PrintSize {
    pub fn dimensions(&self) -> Result<Dimensions, CatalogError> {
        Dimensions::new(self.width_in, self.height_in)
            .map_err(|e| CatalogError::InvalidData(e.to_string()))
    }
}

/// The trim sizes a product can be ordered in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizeGroup {
    pub id: Uuid,
    pub name: String,
    pub sizes: Vec<PrintSize>,
    pub allow_custom: bool,
    pub custom_min_in: f64,
    pub custom_max_in: f64,
}

impl SizeGroup {
    /// Resolve a preset size by name.
    pub fn preset(&self, name: &str) -> Option<&PrintSize> {
        self.sizes.iter().find(|s| s.name == name)
    }

    /// Validate a custom size against the group's bounds.
    pub fn resolve_custom(&self, width_in: f64, height_in: f64) -> Result<Dimensions, CatalogError> {
        if !self.allow_custom {
            return Err(CatalogError::NotAvailable(format!(
                "size group '{}' does not allow custom sizes",
                self.name
            )));
        }
        let dims = Dimensions::new(width_in, height_in)
            .map_err(|e| CatalogError::InvalidData(e.to_string()))?;
        for v in [width_in, height_in] {
            if v < self.custom_min_in || v > self.custom_max_in {
                return Err(CatalogError::NotAvailable(format!(
                    "custom dimension {}in is outside {}in..{}in",
                    v, self.custom_min_in, self.custom_max_in
                )));
            }
        }
        Ok(dims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card_quantities() -> QuantityGroup {
        QuantityGroup {
            id: Uuid::new_v4(),
            name: "Business Card Runs".to_string(),
            quantities: vec![100, 250, 500, 1000, 2500],
            allow_custom: true,
            custom_min: 50,
            custom_max: 10000,
        }
    }

    #[test]
    fn test_permits_presets_and_custom_range() {
        let group = card_quantities();
        assert!(group.permits(500));
        assert!(group.permits(750)); // custom, inside bounds
        assert!(!group.permits(25)); // below custom_min
        assert!(!group.permits(20000));
        assert!(!group.permits(0));
    }

    #[test]
    fn test_permits_without_custom() {
        let mut group = card_quantities();
        group.allow_custom = false;
        assert!(group.permits(1000));
        assert!(!group.permits(750));
    }

    #[test]
    fn test_size_resolution() {
        let group = SizeGroup {
            id: Uuid::new_v4(),
            name: "Flyer Sizes".to_string(),
            sizes: vec![PrintSize {
                name: "8.5x11".to_string(),
                width_in: 8.5,
                height_in: 11.0,
            }],
            allow_custom: true,
            custom_min_in: 2.0,
            custom_max_in: 24.0,
        };

        assert!(group.preset("8.5x11").is_some());
        assert!(group.preset("4x6").is_none());
        assert!(group.resolve_custom(6.0, 9.0).is_ok());
        assert!(group.resolve_custom(1.0, 9.0).is_err());
        assert!(group.resolve_custom(6.0, 30.0).is_err());
    }
}
