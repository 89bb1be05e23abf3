use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use presslane_quote::{ConfigSelections, LineKind, Quote, QuoteStatus};

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CalculateQuoteRequest {
    pub product_id: Uuid,
    #[serde(flatten)]
    pub selections: ConfigSelections,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub id: Uuid,
    pub reference: String,
    pub product_id: Uuid,
    pub lines: Vec<QuoteLineResponse>,
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
    pub unit_price_cents: i64,
    pub total_weight_lbs: f64,
    pub turnaround_days: u32,
    pub status: QuoteStatus,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
pub struct QuoteLineResponse {
    pub kind: LineKind,
    pub label: String,
    pub amount_cents: i64,
}

impl From<Quote> for QuoteResponse {
    fn from(quote: Quote) -> Self {
        Self {
            id: quote.id,
            reference: quote.reference,
            product_id: quote.product_id,
            lines: quote
                .lines
                .into_iter()
                .map(|l| QuoteLineResponse {
                    kind: l.kind,
                    label: l.label,
                    amount_cents: l.amount_cents,
                })
                .collect(),
            subtotal_cents: quote.subtotal_cents,
            tax_cents: quote.tax_cents,
            total_cents: quote.total_cents,
            unit_price_cents: quote.unit_price_cents,
            total_weight_lbs: quote.total_weight_lbs,
            turnaround_days: quote.turnaround_days,
            status: quote.status,
            expires_at: quote.expires_at,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/quotes/calculate
/// Price a product configuration and persist the resulting quote.
pub async fn calculate_quote(
    State(state): State<AppState>,
    Json(req): Json<CalculateQuoteRequest>,
) -> Result<Json<QuoteResponse>, AppError> {
    let config = state
        .catalog
        .load_configuration(req.product_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("product {} not found", req.product_id)))?;

    let quote = state
        .calculator
        .calculate(&config, &req.selections, &state.business_rules)?;

    state.quotes.save_quote(&quote).await?;

    tracing::info!(
        quote = %quote.reference,
        product = %config.product.sku,
        total_cents = quote.total_cents,
        "quote calculated"
    );

    Ok(Json(quote.into()))
}

/// GET /v1/quotes/{id}
pub async fn get_quote(
    State(state): State<AppState>,
    Path(quote_id): Path<Uuid>,
) -> Result<Json<QuoteResponse>, AppError> {
    let quote = state
        .quotes
        .get_quote(quote_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("quote {} not found", quote_id)))?;

    if quote.is_expired() {
        return Err(AppError::GoneError(format!(
            "quote {} has expired",
            quote.reference
        )));
    }

    Ok(Json(quote.into()))
}
