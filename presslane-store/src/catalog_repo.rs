use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use presslane_catalog::{
    AddOn, CatalogRepository, PaperStock, Product, ProductConfiguration, QuantityGroup, SizeGroup,
    TurnaroundTime,
};
use presslane_core::BoxError;

/// Catalog entities stored as one JSONB document per row.
///
/// Table names are fixed string literals from this module, never caller
/// input, so the `format!` queries cannot be injected into.
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn upsert<T: Serialize>(
        &self,
        table: &str,
        id: Uuid,
        entity: &T,
        is_active: bool,
    ) -> Result<(), BoxError> {
        let data = serde_json::to_value(entity)?;
        let sql = format!(
            "INSERT INTO {table} (id, data, is_active, updated_at) \
             VALUES ($1, $2, $3, NOW()) \
             ON CONFLICT (id) DO UPDATE SET data = $2, is_active = $3, updated_at = NOW()"
        );
        sqlx::query(&sql)
            .bind(id)
            .bind(data)
            .bind(is_active)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        table: &str,
        id: Uuid,
    ) -> Result<Option<T>, BoxError> {
        let sql = format!("SELECT data FROM {table} WHERE id = $1");
        let row = sqlx::query(&sql)
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

    async fn fetch_all<T: DeserializeOwned>(&self, table: &str) -> Result<Vec<T>, BoxError> {
        let sql = format!("SELECT data FROM {table} ORDER BY created_at");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        let mut entities = Vec::with_capacity(rows.len());
        for row in rows {
            let data: serde_json::Value = row.get("data");
            entities.push(serde_json::from_value(data)?);
        }
        Ok(entities)
    }

    /// Soft delete: keep the row, clear `is_active` in both the column and
    /// the document so reads stay consistent.
    async fn deactivate(&self, table: &str, id: Uuid) -> Result<(), BoxError> {
        let sql = format!(
            "UPDATE {table} \
             SET is_active = FALSE, \
                 data = jsonb_set(data, '{{is_active}}', 'false'), \
                 updated_at = NOW() \
             WHERE id = $1"
        );
        sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(())
    }

    async fn delete(&self, table: &str, id: Uuid) -> Result<(), BoxError> {
        let sql = format!("DELETE FROM {table} WHERE id = $1");
        sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn upsert_paper_stock(&self, stock: &PaperStock) -> Result<(), BoxError> {
        self.upsert("paper_stocks", stock.id, stock, stock.is_active)
            .await
    }
    async fn get_paper_stock(&self, id: Uuid) -> Result<Option<PaperStock>, BoxError> {
        self.fetch("paper_stocks", id).await
    }
    async fn list_paper_stocks(&self) -> Result<Vec<PaperStock>, BoxError> {
        self.fetch_all("paper_stocks").await
    }
    async fn deactivate_paper_stock(&self, id: Uuid) -> Result<(), BoxError> {
        self.deactivate("paper_stocks", id).await
    }

    async fn upsert_addon(&self, addon: &AddOn) -> Result<(), BoxError> {
        self.upsert("addons", addon.id, addon, addon.is_active).await
    }
    async fn get_addon(&self, id: Uuid) -> Result<Option<AddOn>, BoxError> {
        self.fetch("addons", id).await
    }
    async fn list_addons(&self) -> Result<Vec<AddOn>, BoxError> {
        self.fetch_all("addons").await
    }
    async fn deactivate_addon(&self, id: Uuid) -> Result<(), BoxError> {
        self.deactivate("addons", id).await
    }

    async fn upsert_quantity_group(&self, group: &QuantityGroup) -> Result<(), BoxError> {
        self.upsert("quantity_groups", group.id, group, true).await
    }
    async fn get_quantity_group(&self, id: Uuid) -> Result<Option<QuantityGroup>, BoxError> {
        self.fetch("quantity_groups", id).await
    }
    async fn list_quantity_groups(&self) -> Result<Vec<QuantityGroup>, BoxError> {
        self.fetch_all("quantity_groups").await
    }
    async fn delete_quantity_group(&self, id: Uuid) -> Result<(), BoxError> {
        self.delete("quantity_groups", id).await
    }

    async fn upsert_size_group(&self, group: &SizeGroup) -> Result<(), BoxError> {
        self.upsert("size_groups", group.id, group, true).await
    }
    async fn get_size_group(&self, id: Uuid) -> Result<Option<SizeGroup>, BoxError> {
        self.fetch("size_groups", id).await
    }
    async fn list_size_groups(&self) -> Result<Vec<SizeGroup>, BoxError> {
        self.fetch_all("size_groups").await
    }
    async fn delete_size_group(&self, id: Uuid) -> Result<(), BoxError> {
        self.delete("size_groups", id).await
    }

    async fn upsert_turnaround(&self, turnaround: &TurnaroundTime) -> Result<(), BoxError> {
        self.upsert("turnarounds", turnaround.id, turnaround, true)
            .await
    }
    async fn get_turnaround(&self, id: Uuid) -> Result<Option<TurnaroundTime>, BoxError> {
        self.fetch("turnarounds", id).await
    }
    async fn list_turnarounds(&self) -> Result<Vec<TurnaroundTime>, BoxError> {
        self.fetch_all("turnarounds").await
    }
    async fn delete_turnaround(&self, id: Uuid) -> Result<(), BoxError> {
        self.delete("turnarounds", id).await
    }

    async fn upsert_product(&self, product: &Product) -> Result<(), BoxError> {
        self.upsert("products", product.id, product, product.is_active)
            .await
    }
    async fn get_product(&self, id: Uuid) -> Result<Option<Product>, BoxError> {
        self.fetch("products", id).await
    }
    async fn list_products(&self) -> Result<Vec<Product>, BoxError> {
        self.fetch_all("products").await
    }
    async fn deactivate_product(&self, id: Uuid) -> Result<(), BoxError> {
        self.deactivate("products", id).await
    }

    async fn load_configuration(
        &self,
        product_id: Uuid,
    ) -> Result<Option<ProductConfiguration>, BoxError> {
        let Some(product) = self.get_product(product_id).await? else {
            return Ok(None);
        };

        let mut paper_stocks = Vec::with_capacity(product.paper_stock_ids.len());
        for id in &product.paper_stock_ids {
            let stock = self
                .get_paper_stock(*id)
                .await?
                .ok_or_else(|| format!("product {} references missing paper stock {}", product.id, id))?;
            paper_stocks.push(stock);
        }

        let mut addons = Vec::with_capacity(product.addon_ids.len());
        for id in &product.addon_ids {
            let addon = self
                .get_addon(*id)
                .await?
                .ok_or_else(|| format!("product {} references missing add-on {}", product.id, id))?;
            addons.push(addon);
        }

        let mut turnarounds = Vec::with_capacity(product.turnaround_ids.len());
        for id in &product.turnaround_ids {
            let turnaround = self
                .get_turnaround(*id)
                .await?
                .ok_or_else(|| format!("product {} references missing turnaround {}", product.id, id))?;
            turnarounds.push(turnaround);
        }

        let quantity_group = self
            .get_quantity_group(product.quantity_group_id)
            .await?
            .ok_or_else(|| format!("product {} references missing quantity group", product.id))?;
        let size_group = self
            .get_size_group(product.size_group_id)
            .await?
            .ok_or_else(|| format!("product {} references missing size group", product.id))?;

        Ok(Some(ProductConfiguration {
            product,
            paper_stocks,
            addons,
            quantity_group,
            size_group,
            turnarounds,
        }))
    }
}
