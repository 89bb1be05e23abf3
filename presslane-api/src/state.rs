use std::sync::Arc;

use presslane_catalog::CatalogRepository;
use presslane_quote::{BusinessRules, QuoteCalculator, QuoteRepository};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogRepository>,
    pub quotes: Arc<dyn QuoteRepository>,
    pub calculator: Arc<QuoteCalculator>,
    pub business_rules: BusinessRules,
}
