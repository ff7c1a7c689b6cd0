//! API routes module

pub mod health;
pub mod products;

use axum::{Json, Router, routing::get};

use crate::state::AppState;

pub const WELCOME_MESSAGE: &str = "Welcome to Avios";

/// Create all API routes, relative to `/api`
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/v1/products", products::router(state))
        .merge(health::router(state.clone()))
}

async fn welcome() -> Json<&'static str> {
    Json(WELCOME_MESSAGE)
}

/// `GET /` greeting
pub fn welcome_router() -> Router {
    Router::new().route("/", get(welcome))
}

/// Initialize database indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    products::init_indexes(state).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_welcome_returns_json_string() {
        let response = welcome_router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], br#""Welcome to Avios""#);
    }
}
