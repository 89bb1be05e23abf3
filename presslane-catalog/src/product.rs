use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AddOn, CatalogError, PaperStock, QuantityGroup, SizeGroup, TurnaroundTime};

/// Product families in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductClass {
    BusinessCard,
    Flyer,
    Banner,
    Poster,
    Sticker,
    Brochure,
}

/// A configurable print product.
///
/// The product itself only carries references into the catalog; the full
/// option set is resolved into a [`ProductConfiguration`] before quoting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub product_class: ProductClass,
    pub paper_stock_ids: Vec<Uuid>,
    pub addon_ids: Vec<Uuid>,
    pub quantity_group_id: Uuid,
    pub size_group_id: Uuid,
    pub turnaround_ids: Vec<Uuid>,
    pub is_active: bool,
    pub metadata: serde_json::Value,
}

/// A product with every referenced catalog entity resolved.
///
/// This is the unit the quote calculator operates on; assembling it is the
/// repository's job so pricing stays a pure function.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductConfiguration {
    pub product: Product,
    pub paper_stocks: Vec<PaperStock>,
    pub addons: Vec<AddOn>,
    pub quantity_group: QuantityGroup,
    pub size_group: SizeGroup,
    pub turnarounds: Vec<TurnaroundTime>,
}

impl ProductConfiguration {
    pub fn paper_stock(&self, id: Uuid) -> Result<&PaperStock, CatalogError> {
        self.paper_stocks
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| CatalogError::NotFound(format!("paper stock {} for this product", id)))
    }

    pub fn addon(&self, id: Uuid) -> Result<&AddOn, CatalogError> {
        self.addons
            .iter()
            .find(|a| a.id == id)
            .ok_or_else(|| CatalogError::NotFound(format!("add-on {} for this product", id)))
    }

    pub fn turnaround(&self, id: Uuid) -> Result<&TurnaroundTime, CatalogError> {
        self.turnarounds
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| CatalogError::NotFound(format!("turnaround {} for this product", id)))
    }
}
