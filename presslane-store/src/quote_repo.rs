use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use presslane_core::BoxError;
use presslane_quote::{Quote, QuoteRepository};

pub struct PgQuoteRepository {
    pub pool: PgPool,
}

impl PgQuoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuoteRepository for PgQuoteRepository {
    async fn save_quote(&self, quote: &Quote) -> Result<(), BoxError> {
        let data = serde_json::to_value(quote)?;
        let status = serde_json::to_value(&quote.status)?;
        let status = status.as_str().unwrap_or("ACTIVE").to_string();

        sqlx::query(
            "INSERT INTO quotes (id, product_id, status, expires_at, created_at, data) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (id) DO UPDATE SET status = $3, data = $6",
        )
        .bind(quote.id)
        .bind(quote.product_id)
        .bind(status)
        .bind(quote.expires_at)
        .bind(quote.created_at)
        .bind(data)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_quote(&self, id: Uuid) -> Result<Option<Quote>, BoxError> {
        let row = sqlx::query("SELECT data FROM quotes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let data: serde_json::Value = row.get("data");
                Ok(Some(serde_json::from_value(data)?))
            }
            None => Ok(None),
        }
    }

    async fn expire_quote(&self, id: Uuid) -> Result<(), BoxError> {
        sqlx::query(
            "UPDATE quotes \
             SET status = 'EXPIRED', data = jsonb_set(data, '{status}', '\"EXPIRED\"') \
             WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
