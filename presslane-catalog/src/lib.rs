pub mod addon;
pub mod groups;
pub mod paper;
pub mod pricing;
pub mod product;
pub mod repository;
pub mod turnaround;

pub use addon::{AddOn, CustomPricing, PriceTier, PricingModel};
pub use groups::{PrintSize, QuantityGroup, SizeGroup};
pub use paper::{CoatingOption, PaperStock, Sides};
pub use pricing::{PricingConfig, PricingEngine};
pub use product::{Product, ProductClass, ProductConfiguration};
pub use repository::CatalogRepository;
pub use turnaround::TurnaroundTime;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Entity not available: {0}")]
    NotAvailable(String),

    #[error("Invalid catalog data: {0}")]
    InvalidData(String),

    #[error("Pricing calculation failed: {0}")]
    PricingFailed(String),
}
