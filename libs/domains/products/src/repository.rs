use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, UpdateProduct, Variety};

/// Repository trait for Product persistence
///
/// Reads other than `create` leave `description` out of the returned product.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new product with fresh ids and timestamps
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// All products
    async fn list(&self) -> ProductResult<Vec<Product>>;

    /// Get a product by ID
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// Apply a partial update and return the updated product, `None` if it does not exist
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Option<Product>>;

    /// Delete a product, returning it if it existed
    async fn delete(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// Only the varieties of a product
    async fn get_varieties(&self, id: Uuid) -> ProductResult<Option<Vec<Variety>>>;

    /// Replace the variety list of a product
    async fn set_varieties(
        &self,
        id: Uuid,
        varieties: Vec<Variety>,
        edited_at: DateTime<Utc>,
    ) -> ProductResult<()>;
}
