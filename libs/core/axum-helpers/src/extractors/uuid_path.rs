//! UUID path parameter extractors with automatic validation.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

fn parse_uuid(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::InvalidUuid(raw.to_string()))
}

/// Extractor for a single UUID path parameter.
///
/// Rejects malformed ids with a 400 error body instead of axum's plain-text
/// rejection.
///
/// # Example
/// ```ignore
/// async fn get_product(UuidPath(id): UuidPath) -> String {
///     format!("Product ID: {}", id)
/// }
///
/// let app = Router::new().route("/products/{id}", get(get_product));
/// ```
pub struct UuidPath(pub Uuid);

impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        Ok(UuidPath(parse_uuid(&id)?))
    }
}

/// Extractor for a parent/child pair of UUID path parameters, in route order.
///
/// # Example
/// ```ignore
/// async fn delete_variety(UuidPathPair(product_id, variety_id): UuidPathPair) {}
///
/// let app = Router::new().route("/{id}/variety/{variety_id}", delete(delete_variety));
/// ```
pub struct UuidPathPair(pub Uuid, pub Uuid);

impl<S> FromRequestParts<S> for UuidPathPair
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path((first, second)) = Path::<(String, String)>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        Ok(UuidPathPair(parse_uuid(&first)?, parse_uuid(&second)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use tower::ServiceExt;

    async fn single(UuidPath(id): UuidPath) -> String {
        id.to_string()
    }

    async fn pair(UuidPathPair(a, b): UuidPathPair) -> String {
        format!("{}/{}", a, b)
    }

    fn app() -> Router {
        Router::new()
            .route("/items/{id}", get(single))
            .route("/items/{id}/parts/{part_id}", get(pair))
    }

    async fn status_of(uri: &str) -> StatusCode {
        app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_valid_uuid_is_accepted() {
        let uri = format!("/items/{}", Uuid::now_v7());
        assert_eq!(status_of(&uri).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_invalid_uuid_is_bad_request() {
        assert_eq!(status_of("/items/not-a-uuid").await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_pair_rejects_invalid_child() {
        let uri = format!("/items/{}/parts/nope", Uuid::now_v7());
        assert_eq!(status_of(&uri).await, StatusCode::BAD_REQUEST);

        let uri = format!("/items/{}/parts/{}", Uuid::now_v7(), Uuid::now_v7());
        assert_eq!(status_of(&uri).await, StatusCode::OK);
    }
}
