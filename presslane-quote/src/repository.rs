use async_trait::async_trait;
use uuid::Uuid;

use presslane_core::BoxError;

use crate::models::Quote;

/// Persistence for calculated quotes so they can be retrieved until expiry.
#[async_trait]
pub trait QuoteRepository: Send + Sync {
    async fn save_quote(&self, quote: &Quote) -> Result<(), BoxError>;

    async fn get_quote(&self, id: Uuid) -> Result<Option<Quote>, BoxError>;

    async fn expire_quote(&self, id: Uuid) -> Result<(), BoxError>;
}
