use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

pub const PRODUCT_NOT_FOUND: &str = "Product not found";
pub const VARIETY_NOT_FOUND: &str = "Product variety was not found in the product specified";

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("{}", PRODUCT_NOT_FOUND)]
    NotFound,

    #[error("{}", VARIETY_NOT_FOUND)]
    VarietyNotFound,

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound => AppError::NotFound(PRODUCT_NOT_FOUND.to_string()),
            ProductError::VarietyNotFound => AppError::NotFound(VARIETY_NOT_FOUND.to_string()),
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for ProductError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}

impl From<mongodb::bson::raw::Error> for ProductError {
    fn from(err: mongodb::bson::raw::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}
