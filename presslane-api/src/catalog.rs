use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use presslane_catalog::{
    CoatingOption, PrintSize, ProductClass, QuantityGroup, SizeGroup, TurnaroundTime,
};

use crate::error::AppError;
use crate::state::AppState;

/// The full valid option set for a product, shaped for a configurator UI.
#[derive(Debug, Serialize)]
pub struct ProductOptionsResponse {
    pub product_id: Uuid,
    pub sku: String,
    pub name: String,
    pub product_class: ProductClass,
    pub quantities: QuantityOptions,
    pub sizes: SizeOptions,
    pub paper_stocks: Vec<PaperOption>,
    pub addons: Vec<AddonOption>,
    pub turnarounds: Vec<TurnaroundTime>,
}

#[derive(Debug, Serialize)]
pub struct QuantityOptions {
    pub presets: Vec<u32>,
    pub allow_custom: bool,
    pub custom_min: u32,
    pub custom_max: u32,
}

#[derive(Debug, Serialize)]
pub struct SizeOptions {
    pub presets: Vec<PrintSize>,
    pub allow_custom: bool,
    pub custom_min_in: f64,
    pub custom_max_in: f64,
}

#[derive(Debug, Serialize)]
pub struct PaperOption {
    pub id: Uuid,
    pub name: String,
    pub coatings: Vec<CoatingOption>,
    pub single_sided_only: bool,
}

#[derive(Debug, Serialize)]
pub struct AddonOption {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

impl From<&QuantityGroup> for QuantityOptions {
    fn from(group: &QuantityGroup) -> Self {
        Self {
            presets: group.quantities.clone(),
            allow_custom: group.allow_custom,
            custom_min: group.custom_min,
            custom_max: group.custom_max,
        }
    }
}

impl From<&SizeGroup> for SizeOptions {
    fn from(group: &SizeGroup) -> Self {
        Self {
            presets: group.sizes.clone(),
            allow_custom: group.allow_custom,
            custom_min_in: group.custom_min_in,
            custom_max_in: group.custom_max_in,
        }
    }
}

/// GET /v1/products/{id}/options
/// Everything a storefront configurator needs to render the product.
/// Inactive papers and add-ons are filtered out.
pub async fn product_options(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> Result<Json<ProductOptionsResponse>, AppError> {
    let config = state
        .catalog
        .load_configuration(product_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("product {} not found", product_id)))?;

    if !config.product.is_active {
        return Err(AppError::NotFoundError(format!(
            "product {} not found",
            product_id
        )));
    }

    Ok(Json(ProductOptionsResponse {
        product_id: config.product.id,
        sku: config.product.sku,
        name: config.product.name,
        product_class: config.product.product_class,
        quantities: (&config.quantity_group).into(),
        sizes: (&config.size_group).into(),
        paper_stocks: config
            .paper_stocks
            .iter()
            .filter(|p| p.is_active)
            .map(|p| PaperOption {
                id: p.id,
                name: p.name.clone(),
                coatings: p.available_coatings.clone(),
                single_sided_only: p.single_sided_only,
            })
            .collect(),
        addons: config
            .addons
            .iter()
            .filter(|a| a.is_active)
            .map(|a| AddonOption {
                id: a.id,
                code: a.code.clone(),
                name: a.name.clone(),
                description: a.description.clone(),
            })
            .collect(),
        turnarounds: config.turnarounds,
    }))
}
