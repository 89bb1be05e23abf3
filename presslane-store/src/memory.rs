use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use presslane_catalog::{
    AddOn, CatalogRepository, PaperStock, Product, ProductConfiguration, QuantityGroup, SizeGroup,
    TurnaroundTime,
};
use presslane_core::BoxError;
use presslane_quote::{Quote, QuoteRepository, QuoteStatus};

/// In-memory catalog used by API tests and local development without
/// Postgres. Not intended for concurrent writers at scale.
#[derive(Default)]
pub struct InMemoryCatalog {
    paper_stocks: RwLock<HashMap<Uuid, PaperStock>>,
    addons: RwLock<HashMap<Uuid, AddOn>>,
    quantity_groups: RwLock<HashMap<Uuid, QuantityGroup>>,
    size_groups: RwLock<HashMap<Uuid, SizeGroup>>,
    turnarounds: RwLock<HashMap<Uuid, TurnaroundTime>>,
    products: RwLock<HashMap<Uuid, Product>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> BoxError {
    "catalog lock poisoned".into()
}

#[async_trait]
impl CatalogRepository for InMemoryCatalog {
    async fn upsert_paper_stock(&self, stock: &PaperStock) -> Result<(), BoxError> {
        self.paper_stocks
            .write()
            .map_err(|_| poisoned())?
            .insert(stock.id, stock.clone());
        Ok(())
    }
    async fn get_paper_stock(&self, id: Uuid) -> Result<Option<PaperStock>, BoxError> {
        Ok(self.paper_stocks.read().map_err(|_| poisoned())?.get(&id).cloned())
    }
    async fn list_paper_stocks(&self) -> Result<Vec<PaperStock>, BoxError> {
        Ok(self.paper_stocks.read().map_err(|_| poisoned())?.values().cloned().collect())
    }
    async fn deactivate_paper_stock(&self, id: Uuid) -> Result<(), BoxError> {
        if let Some(stock) = self.paper_stocks.write().map_err(|_| poisoned())?.get_mut(&id) {
            stock.is_active = false;
        }
        Ok(())
    }

    async fn upsert_addon(&self, addon: &AddOn) -> Result<(), BoxError> {
        self.addons
            .write()
            .map_err(|_| poisoned())?
            .insert(addon.id, addon.clone());
        Ok(())
    }
    async fn get_addon(&self, id: Uuid) -> Result<Option<AddOn>, BoxError> {
        Ok(self.addons.read().map_err(|_| poisoned())?.get(&id).cloned())
    }
    async fn list_addons(&self) -> Result<Vec<AddOn>, BoxError> {
        Ok(self.addons.read().map_err(|_| poisoned())?.values().cloned().collect())
    }
    async fn deactivate_addon(&self, id: Uuid) -> Result<(), BoxError> {
        if let Some(addon) = self.addons.write().map_err(|_| poisoned())?.get_mut(&id) {
            addon.is_active = false;
        }
        Ok(())
    }

    async fn upsert_quantity_group(&self, group: &QuantityGroup) -> Result<(), BoxError> {
        self.quantity_groups
            .write()
            .map_err(|_| poisoned())?
            .insert(group.id, group.clone());
        Ok(())
    }
    async fn get_quantity_group(&self, id: Uuid) -> Result<Option<QuantityGroup>, BoxError> {
        Ok(self.quantity_groups.read().map_err(|_| poisoned())?.get(&id).cloned())
    }
    async fn list_quantity_groups(&self) -> Result<Vec<QuantityGroup>, BoxError> {
        Ok(self.quantity_groups.read().map_err(|_| poisoned())?.values().cloned().collect())
    }
    async fn delete_quantity_group(&self, id: Uuid) -> Result<(), BoxError> {
        self.quantity_groups.write().map_err(|_| poisoned())?.remove(&id);
        Ok(())
    }

    async fn upsert_size_group(&self, group: &SizeGroup) -> Result<(), BoxError> {
        self.size_groups
            .write()
            .map_err(|_| poisoned())?
            .insert(group.id, group.clone());
        Ok(())
    }
    async fn get_size_group(&self, id: Uuid) -> Result<Option<SizeGroup>, BoxError> {
        Ok(self.size_groups.read().map_err(|_| poisoned())?.get(&id).cloned())
    }
    async fn list_size_groups(&self) -> Result<Vec<SizeGroup>, BoxError> {
        Ok(self.size_groups.read().map_err(|_| poisoned())?.values().cloned().collect())
    }
    async fn delete_size_group(&self, id: Uuid) -> Result<(), BoxError> {
        self.size_groups.write().map_err(|_| poisoned())?.remove(&id);
        Ok(())
    }

    async fn upsert_turnaround(&self, turnaround: &TurnaroundTime) -> Result<(), BoxError> {
        self.turnarounds
            .write()
            .map_err(|_| poisoned())?
            .insert(turnaround.id, turnaround.clone());
        Ok(())
    }
    async fn get_turnaround(&self, id: Uuid) -> Result<Option<TurnaroundTime>, BoxError> {
        Ok(self.turnarounds.read().map_err(|_| poisoned())?.get(&id).cloned())
    }
    async fn list_turnarounds(&self) -> Result<Vec<TurnaroundTime>, BoxError> {
        Ok(self.turnarounds.read().map_err(|_| poisoned())?.values().cloned().collect())
    }
    async fn delete_turnaround(&self, id: Uuid) -> Result<(), BoxError> {
        self.turnarounds.write().map_err(|_| poisoned())?.remove(&id);
        Ok(())
    }

    async fn upsert_product(&self, product: &Product) -> Result<(), BoxError> {
        self.products
            .write()
            .map_err(|_| poisoned())?
            .insert(product.id, product.clone());
        Ok(())
    }
    async fn get_product(&self, id: Uuid) -> Result<Option<Product>, BoxError> {
        Ok(self.products.read().map_err(|_| poisoned())?.get(&id).cloned())
    }
    async fn list_products(&self) -> Result<Vec<Product>, BoxError> {
        Ok(self.products.read().map_err(|_| poisoned())?.values().cloned().collect())
    }
    async fn deactivate_product(&self, id: Uuid) -> Result<(), BoxError> {
        if let Some(product) = self.products.write().map_err(|_| poisoned())?.get_mut(&id) {
            product.is_active = false;
        }
        Ok(())
    }

    async fn load_configuration(
        &self,
        product_id: Uuid,
    ) -> Result<Option<ProductConfiguration>, BoxError> {
        let Some(product) = self.get_product(product_id).await? else {
            return Ok(None);
        };

        let mut paper_stocks = Vec::new();
        for id in &product.paper_stock_ids {
            paper_stocks.push(
                self.get_paper_stock(*id)
                    .await?
                    .ok_or_else(|| format!("missing paper stock {}", id))?,
            );
        }
        let mut addons = Vec::new();
        for id in &product.addon_ids {
            addons.push(
                self.get_addon(*id)
                    .await?
                    .ok_or_else(|| format!("missing add-on {}", id))?,
            );
        }
        let mut turnarounds = Vec::new();
        for id in &product.turnaround_ids {
            turnarounds.push(
                self.get_turnaround(*id)
                    .await?
                    .ok_or_else(|| format!("missing turnaround {}", id))?,
            );
        }
        let quantity_group = self
            .get_quantity_group(product.quantity_group_id)
            .await?
            .ok_or("missing quantity group")?;
        let size_group = self
            .get_size_group(product.size_group_id)
            .await?
            .ok_or("missing size group")?;

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

/// In-memory quote store matching [`InMemoryCatalog`].
#[derive(Default)]
pub struct InMemoryQuotes {
    quotes: RwLock<HashMap<Uuid, Quote>>,
}

impl InMemoryQuotes {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuoteRepository for InMemoryQuotes {
    async fn save_quote(&self, quote: &Quote) -> Result<(), BoxError> {
        self.quotes
            .write()
            .map_err(|_| poisoned())?
            .insert(quote.id, quote.clone());
        Ok(())
    }

    async fn get_quote(&self, id: Uuid) -> Result<Option<Quote>, BoxError> {
        Ok(self.quotes.read().map_err(|_| poisoned())?.get(&id).cloned())
    }

    async fn expire_quote(&self, id: Uuid) -> Result<(), BoxError> {
        if let Some(quote) = self.quotes.write().map_err(|_| poisoned())?.get_mut(&id) {
            quote.status = QuoteStatus::Expired;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use presslane_catalog::ProductClass;

    fn product(quantity_group_id: Uuid, size_group_id: Uuid) -> Product {
        Product {
            id: Uuid::new_v4(),
            sku: "FLY-4X6".to_string(),
            name: "4x6 Flyers".to_string(),
            description: None,
            product_class: ProductClass::Flyer,
            paper_stock_ids: vec![],
            addon_ids: vec![],
            quantity_group_id,
            size_group_id,
            turnaround_ids: vec![],
            is_active: true,
            metadata: serde_json::json!({}),
        }
    }

    #[tokio::test]
    async fn test_product_roundtrip_and_soft_delete() {
        let repo = InMemoryCatalog::new();
        let p = product(Uuid::new_v4(), Uuid::new_v4());
        repo.upsert_product(&p).await.unwrap();

        let loaded = repo.get_product(p.id).await.unwrap().unwrap();
        assert_eq!(loaded.sku, "FLY-4X6");

        repo.deactivate_product(p.id).await.unwrap();
        let loaded = repo.get_product(p.id).await.unwrap().unwrap();
        assert!(!loaded.is_active);
    }

    #[tokio::test]
    async fn test_load_configuration_flags_dangling_refs() {
        let repo = InMemoryCatalog::new();
        // Groups were never inserted.
        let p = product(Uuid::new_v4(), Uuid::new_v4());
        repo.upsert_product(&p).await.unwrap();

        assert!(repo.load_configuration(p.id).await.is_err());
        assert!(repo.load_configuration(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_quote_expiry_flag() {
        let repo = InMemoryQuotes::new();
        let quote = Quote::new(Uuid::new_v4(), 900);
        repo.save_quote(&quote).await.unwrap();

        repo.expire_quote(quote.id).await.unwrap();
        let loaded = repo.get_quote(quote.id).await.unwrap().unwrap();
        assert_eq!(loaded.status, QuoteStatus::Expired);
    }
}
