//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Bson, Document, doc, to_raw_document_buf},
    options::{FindOneAndUpdateOptions, FindOneOptions, FindOptions, IndexOptions, ReturnDocument},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct, Variety};
use crate::repository::ProductRepository;
use crate::storage::{stored_datetime, stored_uuid};

/// Collection used when none is given
pub const DEFAULT_COLLECTION: &str = "products";

/// Projection applied to every read except the create response
fn without_description() -> Document {
    doc! { "description": 0 }
}

fn id_filter(id: Uuid) -> Document {
    doc! { "_id": stored_uuid(id) }
}

/// Projection target for [`ProductRepository::get_varieties`]
#[derive(Debug, Serialize, Deserialize)]
struct VarietiesOnly {
    #[serde(default)]
    varieties: Vec<Variety>,
}

/// Encode varieties for an update document.
///
/// Goes through the raw serializer the driver uses for inserts, so ids come
/// out as binary UUIDs like the stored ones.
fn varieties_bson(varieties: Vec<Variety>) -> ProductResult<Bson> {
    let encoded = to_raw_document_buf(&VarietiesOnly { varieties })?.to_document()?;
    Ok(encoded
        .get("varieties")
        .cloned()
        .unwrap_or_else(|| Bson::Array(Vec::new())))
}

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    /// Create a new MongoProductRepository
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, DEFAULT_COLLECTION)
    }

    /// Create a new MongoProductRepository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Product>(collection_name);
        Self { collection }
    }

    /// Initialize indexes for name lookups and variety deletion
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "name": 1 })
                .options(IndexOptions::builder().name("idx_name".to_string()).build())
                .build(),
            IndexModel::builder()
                .keys(doc! { "varieties._id": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_variety_id".to_string())
                        .sparse(true)
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Product> {
        &self.collection
    }

    /// Build the update document for a partial update.
    ///
    /// Present scalar fields are `$set` together with `edited_at`. New
    /// varieties get fresh ids and go through `$addToSet` with `$each`, which
    /// appends them in order since no two ids collide.
    fn build_update(input: UpdateProduct, now: DateTime<Utc>) -> ProductResult<Document> {
        let mut set = doc! { "edited_at": stored_datetime(now) };

        if let Some(name) = input.name {
            set.insert("name", name);
        }
        if let Some(description) = input.description {
            set.insert("description", description);
        }

        let mut update = doc! { "$set": set };

        if let Some(varieties) = input.varieties {
            if !varieties.is_empty() {
                let varieties: Vec<Variety> = varieties.into_iter().map(Variety::from).collect();
                update.insert(
                    "$addToSet",
                    doc! { "varieties": { "$each": varieties_bson(varieties)? } },
                );
            }
        }

        Ok(update)
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, input), fields(product_name = ?input.name))]
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let product = Product::new(input);

        self.collection.insert_one(&product).await?;

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> ProductResult<Vec<Product>> {
        use futures::TryStreamExt;

        let options = FindOptions::builder()
            .projection(without_description())
            .build();

        let cursor = self.collection.find(doc! {}).with_options(options).await?;
        let products: Vec<Product> = cursor.try_collect().await?;

        Ok(products)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let options = FindOneOptions::builder()
            .projection(without_description())
            .build();

        let product = self
            .collection
            .find_one(id_filter(id))
            .with_options(options)
            .await?;
        Ok(product)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Option<Product>> {
        let update = Self::build_update(input, Utc::now())?;

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .projection(without_description())
            .build();

        let product = self
            .collection
            .find_one_and_update(id_filter(id), update)
            .with_options(options)
            .await?;

        if product.is_some() {
            tracing::info!(product_id = %id, "Product updated successfully");
        }
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let product = self.collection.find_one_and_delete(id_filter(id)).await?;

        if product.is_some() {
            tracing::info!(product_id = %id, "Product deleted successfully");
        }
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn get_varieties(&self, id: Uuid) -> ProductResult<Option<Vec<Variety>>> {
        let options = FindOneOptions::builder()
            .projection(doc! { "varieties": 1 })
            .build();

        let found = self
            .collection
            .clone_with_type::<VarietiesOnly>()
            .find_one(id_filter(id))
            .with_options(options)
            .await?;

        Ok(found.map(|v| v.varieties))
    }

    #[instrument(skip(self, varieties), fields(variety_count = varieties.len()))]
    async fn set_varieties(
        &self,
        id: Uuid,
        varieties: Vec<Variety>,
        edited_at: DateTime<Utc>,
    ) -> ProductResult<()> {
        let update = doc! {
            "$set": {
                "varieties": varieties_bson(varieties)?,
                "edited_at": stored_datetime(edited_at),
            }
        };

        let result = self.collection.update_one(id_filter(id), update).await?;
        if result.matched_count == 0 {
            return Err(ProductError::NotFound);
        }

        tracing::info!(product_id = %id, "Product varieties updated");
        Ok(())
    }
}
