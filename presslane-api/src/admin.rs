use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use presslane_catalog::{
    AddOn, CatalogError, CoatingOption, PaperStock, PricingModel, PrintSize, Product,
    ProductClass, QuantityGroup, SizeGroup, TurnaroundTime,
};

use crate::error::AppError;
use crate::state::AppState;

fn bad_request(err: CatalogError) -> AppError {
    AppError::ValidationError(err.to_string())
}

// ============================================================================
// Paper Stocks
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PaperStockRequest {
    pub name: String,
    pub price_per_sq_inch: f64,
    pub weight_per_sq_inch: f64,
    #[serde(default = "one")]
    pub double_sided_multiplier: f64,
    #[serde(default)]
    pub available_coatings: Vec<CoatingOption>,
    #[serde(default)]
    pub single_sided_only: bool,
}

fn one() -> f64 {
    1.0
}

impl PaperStockRequest {
    fn into_entity(self, id: Uuid, is_active: bool) -> PaperStock {
        PaperStock {
            id,
            name: self.name,
            price_per_sq_inch: self.price_per_sq_inch,
            weight_per_sq_inch: self.weight_per_sq_inch,
            double_sided_multiplier: self.double_sided_multiplier,
            available_coatings: self.available_coatings,
            single_sided_only: self.single_sided_only,
            is_active,
        }
    }
}

/// POST /v1/admin/paper-stocks
pub async fn create_paper_stock(
    State(state): State<AppState>,
    Json(req): Json<PaperStockRequest>,
) -> Result<(StatusCode, Json<PaperStock>), AppError> {
    let stock = req.into_entity(Uuid::new_v4(), true);
    stock.validate().map_err(bad_request)?;
    state.catalog.upsert_paper_stock(&stock).await?;
    Ok((StatusCode::CREATED, Json(stock)))
}

/// GET /v1/admin/paper-stocks
pub async fn list_paper_stocks(
    State(state): State<AppState>,
) -> Result<Json<Vec<PaperStock>>, AppError> {
    Ok(Json(state.catalog.list_paper_stocks().await?))
}

/// GET /v1/admin/paper-stocks/{id}
pub async fn get_paper_stock(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PaperStock>, AppError> {
    state
        .catalog
        .get_paper_stock(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFoundError(format!("paper stock {} not found", id)))
}

/// PUT /v1/admin/paper-stocks/{id}
pub async fn update_paper_stock(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<PaperStockRequest>,
) -> Result<Json<PaperStock>, AppError> {
    let Some(existing) = state.catalog.get_paper_stock(id).await? else {
        return Err(AppError::NotFoundError(format!(
            "paper stock {} not found",
            id
        )));
    };
    // A deactivated stock stays deactivated across updates.
    let stock = req.into_entity(id, existing.is_active);
    stock.validate().map_err(bad_request)?;
    state.catalog.upsert_paper_stock(&stock).await?;
    Ok(Json(stock))
}

/// DELETE /v1/admin/paper-stocks/{id} (soft delete)
pub async fn delete_paper_stock(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.catalog.deactivate_paper_stock(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Add-ons
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AddOnRequest {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub pricing: PricingModel,
    pub metadata: Option<serde_json::Value>,
}

impl AddOnRequest {
    fn into_entity(self, id: Uuid, is_active: bool) -> AddOn {
        AddOn {
            id,
            code: self.code,
            name: self.name,
            description: self.description,
            pricing: self.pricing,
            is_active,
            metadata: self.metadata.unwrap_or(serde_json::json!({})),
        }
    }
}

/// POST /v1/admin/addons
pub async fn create_addon(
    State(state): State<AppState>,
    Json(req): Json<AddOnRequest>,
) -> Result<(StatusCode, Json<AddOn>), AppError> {
    let addon = req.into_entity(Uuid::new_v4(), true);
    addon.pricing.validate().map_err(bad_request)?;
    state.catalog.upsert_addon(&addon).await?;
    Ok((StatusCode::CREATED, Json(addon)))
}

/// GET /v1/admin/addons
pub async fn list_addons(State(state): State<AppState>) -> Result<Json<Vec<AddOn>>, AppError> {
    Ok(Json(state.catalog.list_addons().await?))
}

/// GET /v1/admin/addons/{id}
pub async fn get_addon(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AddOn>, AppError> {
    state
        .catalog
        .get_addon(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFoundError(format!("add-on {} not found", id)))
}

/// PUT /v1/admin/addons/{id}
pub async fn update_addon(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AddOnRequest>,
) -> Result<Json<AddOn>, AppError> {
    let Some(existing) = state.catalog.get_addon(id).await? else {
        return Err(AppError::NotFoundError(format!("add-on {} not found", id)));
    };
    let addon = req.into_entity(id, existing.is_active);
    addon.pricing.validate().map_err(bad_request)?;
    state.catalog.upsert_addon(&addon).await?;
    Ok(Json(addon))
}

/// DELETE /v1/admin/addons/{id} (soft delete)
pub async fn delete_addon(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.catalog.deactivate_addon(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Quantity Groups
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct QuantityGroupRequest {
    pub name: String,
    pub quantities: Vec<u32>,
    #[serde(default)]
    pub allow_custom: bool,
    #[serde(default)]
    pub custom_min: u32,
    #[serde(default)]
    pub custom_max: u32,
}

impl QuantityGroupRequest {
    fn into_entity(self, id: Uuid) -> Result<QuantityGroup, AppError> {
        if self.quantities.is_empty() && !self.allow_custom {
            return Err(AppError::ValidationError(
                "a quantity group needs presets or custom bounds".to_string(),
            ));
        }
        if self.allow_custom && self.custom_min > self.custom_max {
            return Err(AppError::ValidationError(
                "custom_min must not exceed custom_max".to_string(),
            ));
        }
        let mut quantities = self.quantities;
        quantities.sort_unstable();
        quantities.dedup();
        Ok(QuantityGroup {
            id,
            name: self.name,
            quantities,
            allow_custom: self.allow_custom,
            custom_min: self.custom_min,
            custom_max: self.custom_max,
        })
    }
}

/// POST /v1/admin/quantity-groups
pub async fn create_quantity_group(
    State(state): State<AppState>,
    Json(req): Json<QuantityGroupRequest>,
) -> Result<(StatusCode, Json<QuantityGroup>), AppError> {
    let group = req.into_entity(Uuid::new_v4())?;
    state.catalog.upsert_quantity_group(&group).await?;
    Ok((StatusCode::CREATED, Json(group)))
}

/// GET /v1/admin/quantity-groups
pub async fn list_quantity_groups(
    State(state): State<AppState>,
) -> Result<Json<Vec<QuantityGroup>>, AppError> {
    Ok(Json(state.catalog.list_quantity_groups().await?))
}

/// GET /v1/admin/quantity-groups/{id}
pub async fn get_quantity_group(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<QuantityGroup>, AppError> {
    state
        .catalog
        .get_quantity_group(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFoundError(format!("quantity group {} not found", id)))
}

/// PUT /v1/admin/quantity-groups/{id}
pub async fn update_quantity_group(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<QuantityGroupRequest>,
) -> Result<Json<QuantityGroup>, AppError> {
    if state.catalog.get_quantity_group(id).await?.is_none() {
        return Err(AppError::NotFoundError(format!(
            "quantity group {} not found",
            id
        )));
    }
    let group = req.into_entity(id)?;
    state.catalog.upsert_quantity_group(&group).await?;
    Ok(Json(group))
}

/// DELETE /v1/admin/quantity-groups/{id}
pub async fn delete_quantity_group(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.catalog.delete_quantity_group(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Size Groups
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SizeGroupRequest {
    pub name: String,
    pub sizes: Vec<PrintSize>,
    #[serde(default)]
    pub allow_custom: bool,
    #[serde(default)]
    pub custom_min_in: f64,
    #[serde(default)]
    pub custom_max_in: f64,
}

impl SizeGroupRequest {
    fn into_entity(self, id: Uuid) -> Result<SizeGroup, AppError> {
        for size in &self.sizes {
            size.dimensions().map_err(bad_request)?;
        }
        Ok(SizeGroup {
            id,
            name: self.name,
            sizes: self.sizes,
            allow_custom: self.allow_custom,
            custom_min_in: self.custom_min_in,
            custom_max_in: self.custom_max_in,
        })
    }
}

/// POST /v1/admin/size-groups
pub async fn create_size_group(
    State(state): State<AppState>,
    Json(req): Json<SizeGroupRequest>,
) -> Result<(StatusCode, Json<SizeGroup>), AppError> {
    let group = req.into_entity(Uuid::new_v4())?;
    state.catalog.upsert_size_group(&group).await?;
    Ok((StatusCode::CREATED, Json(group)))
}

/// GET /v1/admin/size-groups
pub async fn list_size_groups(
    State(state): State<AppState>,
) -> Result<Json<Vec<SizeGroup>>, AppError> {
    Ok(Json(state.catalog.list_size_groups().await?))
}

/// GET /v1/admin/size-groups/{id}
pub async fn get_size_group(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SizeGroup>, AppError> {
    state
        .catalog
        .get_size_group(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFoundError(format!("size group {} not found", id)))
}

/// PUT /v1/admin/size-groups/{id}
pub async fn update_size_group(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SizeGroupRequest>,
) -> Result<Json<SizeGroup>, AppError> {
    if state.catalog.get_size_group(id).await?.is_none() {
        return Err(AppError::NotFoundError(format!(
            "size group {} not found",
            id
        )));
    }
    let group = req.into_entity(id)?;
    state.catalog.upsert_size_group(&group).await?;
    Ok(Json(group))
}

/// DELETE /v1/admin/size-groups/{id}
pub async fn delete_size_group(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.catalog.delete_size_group(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Turnarounds
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct TurnaroundRequest {
    pub name: String,
    pub days_to_ship: u32,
    pub price_multiplier: f64,
    #[serde(default)]
    pub is_default: bool,
}

impl TurnaroundRequest {
    fn into_entity(self, id: Uuid) -> TurnaroundTime {
        TurnaroundTime {
            id,
            name: self.name,
            days_to_ship: self.days_to_ship,
            price_multiplier: self.price_multiplier,
            is_default: self.is_default,
        }
    }
}

/// POST /v1/admin/turnarounds
pub async fn create_turnaround(
    State(state): State<AppState>,
    Json(req): Json<TurnaroundRequest>,
) -> Result<(StatusCode, Json<TurnaroundTime>), AppError> {
    let turnaround = req.into_entity(Uuid::new_v4());
    turnaround.validate().map_err(bad_request)?;
    state.catalog.upsert_turnaround(&turnaround).await?;
    Ok((StatusCode::CREATED, Json(turnaround)))
}

/// GET /v1/admin/turnarounds
pub async fn list_turnarounds(
    State(state): State<AppState>,
) -> Result<Json<Vec<TurnaroundTime>>, AppError> {
    Ok(Json(state.catalog.list_turnarounds().await?))
}

/// GET /v1/admin/turnarounds/{id}
pub async fn get_turnaround(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TurnaroundTime>, AppError> {
    state
        .catalog
        .get_turnaround(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFoundError(format!("turnaround {} not found", id)))
}

/// PUT /v1/admin/turnarounds/{id}
pub async fn update_turnaround(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<TurnaroundRequest>,
) -> Result<Json<TurnaroundTime>, AppError> {
    if state.catalog.get_turnaround(id).await?.is_none() {
        return Err(AppError::NotFoundError(format!(
            "turnaround {} not found",
            id
        )));
    }
    let turnaround = req.into_entity(id);
    turnaround.validate().map_err(bad_request)?;
    state.catalog.upsert_turnaround(&turnaround).await?;
    Ok(Json(turnaround))
}

/// DELETE /v1/admin/turnarounds/{id}
pub async fn delete_turnaround(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.catalog.delete_turnaround(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Products
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub product_class: ProductClass,
    pub paper_stock_ids: Vec<Uuid>,
    #[serde(default)]
    pub addon_ids: Vec<Uuid>,
    pub quantity_group_id: Uuid,
    pub size_group_id: Uuid,
    pub turnaround_ids: Vec<Uuid>,
    pub metadata: Option<serde_json::Value>,
}

impl ProductRequest {
    fn into_entity(self, id: Uuid, is_active: bool) -> Product {
        Product {
            id,
            sku: self.sku,
            name: self.name,
            description: self.description,
            product_class: self.product_class,
            paper_stock_ids: self.paper_stock_ids,
            addon_ids: self.addon_ids,
            quantity_group_id: self.quantity_group_id,
            size_group_id: self.size_group_id,
            turnaround_ids: self.turnaround_ids,
            is_active,
            metadata: self.metadata.unwrap_or(serde_json::json!({})),
        }
    }
}

/// Every id a product references must resolve before it is accepted.
async fn check_product_refs(state: &AppState, product: &Product) -> Result<(), AppError> {
    for id in &product.paper_stock_ids {
        if state.catalog.get_paper_stock(*id).await?.is_none() {
            return Err(AppError::ValidationError(format!(
                "paper stock {} does not exist",
                id
            )));
        }
    }
    for id in &product.addon_ids {
        if state.catalog.get_addon(*id).await?.is_none() {
            return Err(AppError::ValidationError(format!(
                "add-on {} does not exist",
                id
            )));
        }
    }
    for id in &product.turnaround_ids {
        if state.catalog.get_turnaround(*id).await?.is_none() {
            return Err(AppError::ValidationError(format!(
                "turnaround {} does not exist",
                id
            )));
        }
    }
    if state
        .catalog
        .get_quantity_group(product.quantity_group_id)
        .await?
        .is_none()
    {
        return Err(AppError::ValidationError(format!(
            "quantity group {} does not exist",
            product.quantity_group_id
        )));
    }
    if state
        .catalog
        .get_size_group(product.size_group_id)
        .await?
        .is_none()
    {
        return Err(AppError::ValidationError(format!(
            "size group {} does not exist",
            product.size_group_id
        )));
    }
    Ok(())
}

/// POST /v1/admin/products
pub async fn create_product(
    State(state): State<AppState>,
    Json(req): Json<ProductRequest>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let product = req.into_entity(Uuid::new_v4(), true);
    check_product_refs(&state, &product).await?;
    state.catalog.upsert_product(&product).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /v1/admin/products
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(state.catalog.list_products().await?))
}

/// GET /v1/admin/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>, AppError> {
    state
        .catalog
        .get_product(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFoundError(format!("product {} not found", id)))
}

/// PUT /v1/admin/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ProductRequest>,
) -> Result<Json<Product>, AppError> {
    let Some(existing) = state.catalog.get_product(id).await? else {
        return Err(AppError::NotFoundError(format!("product {} not found", id)));
    };
    let product = req.into_entity(id, existing.is_active);
    check_product_refs(&state, &product).await?;
    state.catalog.upsert_product(&product).await?;
    Ok(Json(product))
}

/// DELETE /v1/admin/products/{id} (soft delete)
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.catalog.deactivate_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
