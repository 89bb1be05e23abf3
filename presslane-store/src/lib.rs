pub mod app_config;
pub mod catalog_repo;
pub mod database;
pub mod memory;
pub mod quote_repo;

pub use catalog_repo::PgCatalogRepository;
pub use database::DbClient;
pub use memory::{InMemoryCatalog, InMemoryQuotes};
pub use quote_repo::PgQuoteRepository;
