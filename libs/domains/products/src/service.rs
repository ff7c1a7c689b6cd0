//! Product Service - Business logic layer

use axum_helpers::describe_validation_errors;
use chrono::Utc;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// Input is validated here before any repository call, so a rejected
/// request never reaches the store.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

fn validate<T: Validate>(input: &T) -> ProductResult<()> {
    input
        .validate()
        .map_err(|e| ProductError::Validation(describe_validation_errors(&e)))
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new product
    #[instrument(skip(self, input), fields(product_name = ?input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        validate(&input)?;
        self.repository.create(input).await
    }

    /// List all products. An empty store yields an empty list.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list().await
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound)
    }

    /// Update scalar fields and append varieties
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        validate(&input)?;

        self.repository
            .update(id, input)
            .await?
            .ok_or(ProductError::NotFound)
    }

    /// Delete a product
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<()> {
        self.repository
            .delete(id)
            .await?
            .map(|_| ())
            .ok_or(ProductError::NotFound)
    }

    /// Remove the first variety with `variety_id` from a product
    #[instrument(skip(self))]
    pub async fn delete_variety(&self, id: Uuid, variety_id: Uuid) -> ProductResult<()> {
        let mut varieties = self
            .repository
            .get_varieties(id)
            .await?
            .ok_or(ProductError::NotFound)?;

        let position = varieties
            .iter()
            .position(|v| v.id == variety_id)
            .ok_or(ProductError::VarietyNotFound)?;
        varieties.remove(position);

        self.repository
            .set_varieties(id, varieties, Utc::now())
            .await
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
