pub mod calculator;
pub mod models;
pub mod repository;
pub mod selections;
pub mod validation;
pub mod weight;

pub use calculator::{BusinessRules, QuoteCalculator};
pub use models::{LineKind, Quote, QuoteLine, QuoteStatus};
pub use repository::QuoteRepository;
pub use selections::{ConfigSelections, SizeSelection};
pub use validation::{ConfigRule, ConstraintEngine, RuleAction, RuleCondition, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error("Invalid configuration: {0}")]
    Validation(#[from] validation::ValidationError),

    #[error("Pricing failed: {0}")]
    Pricing(#[from] presslane_catalog::CatalogError),

    #[error("Product is not available")]
    ProductInactive,
}
