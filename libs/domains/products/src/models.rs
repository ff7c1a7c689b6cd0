use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::storage::{datetime_as_bson, uuid_as_binary};

/// Trim surrounding whitespace from an optional string field
fn trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.map(|s| s.trim().to_string()))
}

/// One purchasable variant of a product (size, color, price...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Variety {
    /// Unique identifier within the product
    #[serde(rename = "_id", alias = "id", with = "uuid_as_binary")]
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    /// Image URLs
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl From<NewVariety> for Variety {
    fn from(input: NewVariety) -> Self {
        Self {
            id: Uuid::now_v7(),
            size: input.size,
            color: input.color,
            quantity: input.quantity,
            images: input.images,
            price: input.price,
        }
    }
}

/// Product entity - represents a product stored in MongoDB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id", with = "uuid_as_binary")]
    pub id: Uuid,
    /// Product name
    pub name: String,
    /// Product description. Omitted from every read except the create response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Product varieties, in insertion order
    #[serde(default)]
    pub varieties: Vec<Variety>,
    /// Set once at creation
    #[serde(with = "datetime_as_bson")]
    pub uploaded_at: DateTime<Utc>,
    /// Refreshed on every change
    #[serde(with = "datetime_as_bson")]
    pub edited_at: DateTime<Utc>,
}

impl Product {
    /// Create a new Product from validated input
    pub fn new(input: CreateProduct) -> Self {
        // Stored dates keep milliseconds only
        let now = Utc::now().trunc_subsecs(3);
        Self {
            id: Uuid::now_v7(),
            name: input.name.unwrap_or_default(),
            description: input.description,
            varieties: input.varieties.into_iter().map(Variety::from).collect(),
            uploaded_at: now,
            edited_at: now,
        }
    }

    /// Position of the variety with the given id
    pub fn variety_position(&self, variety_id: Uuid) -> Option<usize> {
        self.varieties.iter().position(|v| v.id == variety_id)
    }
}

/// Variety fields accepted from clients. The id is assigned on insertion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewVariety {
    #[serde(default)]
    pub size: Option<f64>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub price: Option<f64>,
}

/// DTO for creating a new product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateProduct {
    #[serde(default, alias = "product_name", deserialize_with = "trimmed")]
    #[validate(
        required(message = "Please provide product name"),
        length(min = 1, message = "Please provide product name")
    )]
    pub name: Option<String>,

    #[serde(default, alias = "product_description")]
    #[validate(
        required(message = "Please enter product description"),
        length(
            min = 8,
            message = "Product description must consist of at least 8 characters"
        )
    )]
    pub description: Option<String>,

    #[serde(default, alias = "product_varieties")]
    pub varieties: Vec<NewVariety>,
}

/// DTO for updating an existing product
///
/// Every field is optional. `varieties` are appended to the existing list,
/// never replacing it. Timestamps sent by clients are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateProduct {
    #[serde(default, alias = "product_name", deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "Please provide product name"))]
    pub name: Option<String>,

    #[serde(default, alias = "product_description")]
    #[validate(length(
        min = 8,
        message = "Product description must consist of at least 8 characters"
    ))]
    pub description: Option<String>,

    #[serde(default, alias = "product_varieties")]
    pub varieties: Option<Vec<NewVariety>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_product_trims_name() {
        let input: CreateProduct = serde_json::from_value(json!({
            "name": "  Shirt  ",
            "description": "Cotton shirt"
        }))
        .unwrap();

        assert_eq!(input.name.as_deref(), Some("Shirt"));
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_create_product_accepts_legacy_field_names() {
        let input: CreateProduct = serde_json::from_value(json!({
            "product_name": "Shirt",
            "product_description": "Cotton shirt",
            "product_varieties": [{ "color": "red" }]
        }))
        .unwrap();

        assert_eq!(input.name.as_deref(), Some("Shirt"));
        assert_eq!(input.varieties.len(), 1);
    }

    #[test]
    fn test_create_product_requires_name() {
        let input = CreateProduct {
            name: None,
            description: Some("Cotton shirt".to_string()),
            varieties: vec![],
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_blank_name_fails_after_trim() {
        let input: CreateProduct = serde_json::from_value(json!({
            "name": "   ",
            "description": "Cotton shirt"
        }))
        .unwrap();

        assert!(input.validate().is_err());
    }

    #[test]
    fn test_short_description_fails() {
        let input = CreateProduct {
            name: Some("Shirt".to_string()),
            description: Some("short".to_string()),
            varieties: vec![],
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("description"));
    }

    #[test]
    fn test_update_product_ignores_timestamps() {
        let input: UpdateProduct = serde_json::from_value(json!({
            "name": "Shirt",
            "uploaded_at": "2001-01-01T00:00:00Z",
            "date_uploaded": "2001-01-01T00:00:00Z",
            "edited_at": "2001-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(input.name.as_deref(), Some("Shirt"));
        assert!(input.description.is_none());
        assert!(input.varieties.is_none());
    }

    #[test]
    fn test_empty_update_is_valid() {
        assert!(UpdateProduct::default().validate().is_ok());
    }

    #[test]
    fn test_new_product_timestamps_match() {
        let product = Product::new(CreateProduct {
            name: Some("Shirt".to_string()),
            description: Some("Cotton shirt".to_string()),
            varieties: vec![NewVariety::default(), NewVariety::default()],
        });

        assert_eq!(product.uploaded_at, product.edited_at);
        assert_eq!(product.varieties.len(), 2);
        assert_ne!(product.varieties[0].id, product.varieties[1].id);
    }

    #[test]
    fn test_product_serializes_id_as_underscore_id() {
        let product = Product::new(CreateProduct {
            name: Some("Shirt".to_string()),
            description: None,
            varieties: vec![],
        });
        let value = serde_json::to_value(&product).unwrap();

        assert_eq!(value["_id"], json!(product.id));
        assert_eq!(value["uploaded_at"], json!(product.uploaded_at));
        assert!(value.get("description").is_none());
        assert_eq!(value["varieties"], json!([]));
    }

    #[test]
    fn test_variety_position() {
        let mut product = Product::new(CreateProduct {
            name: Some("Shirt".to_string()),
            description: None,
            varieties: vec![NewVariety::default()],
        });
        let id = product.varieties[0].id;

        assert_eq!(product.variety_position(id), Some(0));
        assert_eq!(product.variety_position(Uuid::now_v7()), None);

        product.varieties.clear();
        assert_eq!(product.variety_position(id), None);
    }
}
