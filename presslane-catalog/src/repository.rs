use async_trait::async_trait;
use uuid::Uuid;

use presslane_core::BoxError;

use crate::{
    AddOn, PaperStock, Product, ProductConfiguration, QuantityGroup, SizeGroup, TurnaroundTime,
};

/// Data access for the catalog entities the admin screens manage.
///
/// Upserts double as create and update; soft-deletable entities keep their
/// row and drop `is_active`, groups are removed outright.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn upsert_paper_stock(&self, stock: &PaperStock) -> Result<(), BoxError>;
    async fn get_paper_stock(&self, id: Uuid) -> Result<Option<PaperStock>, BoxError>;
    async fn list_paper_stocks(&self) -> Result<Vec<PaperStock>, BoxError>;
    async fn deactivate_paper_stock(&self, id: Uuid) -> Result<(), BoxError>;

    async fn upsert_addon(&self, addon: &AddOn) -> Result<(), BoxError>;
    async fn get_addon(&self, id: Uuid) -> Result<Option<AddOn>, BoxError>;
    async fn list_addons(&self) -> Result<Vec<AddOn>, BoxError>;
    async fn deactivate_addon(&self, id: Uuid) -> Result<(), BoxError>;

    async fn upsert_quantity_group(&self, group: &QuantityGroup) -> Result<(), BoxError>;
    async fn get_quantity_group(&self, id: Uuid) -> Result<Option<QuantityGroup>, BoxError>;
    async fn list_quantity_groups(&self) -> Result<Vec<QuantityGroup>, BoxError>;
    async fn delete_quantity_group(&self, id: Uuid) -> Result<(), BoxError>;

    async fn upsert_size_group(&self, group: &SizeGroup) -> Result<(), BoxError>;
    async fn get_size_group(&self, id: Uuid) -> Result<Option<SizeGroup>, BoxError>;
    async fn list_size_groups(&self) -> Result<Vec<SizeGroup>, BoxError>;
    async fn delete_size_group(&self, id: Uuid) -> Result<(), BoxError>;

    async fn upsert_turnaround(&self, turnaround: &TurnaroundTime) -> Result<(), BoxError>;
    async fn get_turnaround(&self, id: Uuid) -> Result<Option<TurnaroundTime>, BoxError>;
    async fn list_turnarounds(&self) -> Result<Vec<TurnaroundTime>, BoxError>;
    async fn delete_turnaround(&self, id: Uuid) -> Result<(), BoxError>;

    async fn upsert_product(&self, product: &Product) -> Result<(), BoxError>;
    async fn get_product(&self, id: Uuid) -> Result<Option<Product>, BoxError>;
    async fn list_products(&self) -> Result<Vec<Product>, BoxError>;
    async fn deactivate_product(&self, id: Uuid) -> Result<(), BoxError>;

    /// Resolve every entity a product references into one configuration.
    /// Returns `None` when the product itself does not exist; a dangling
    /// reference inside the product is an error.
    async fn load_configuration(&self, product_id: Uuid)
        -> Result<Option<ProductConfiguration>, BoxError>;
}
