//! Production masking of internal error messages.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::Response,
};
use core_config::Environment;

use super::{ErrorResponse, messages};

/// Replace the message of every 500 response with a generic one in production.
///
/// Apply with `axum::middleware::from_fn_with_state(environment, mask_internal_errors)`.
/// Development responses pass through untouched so the raw cause stays visible.
pub async fn mask_internal_errors(
    State(environment): State<Environment>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;

    if !environment.is_production() || response.status() != StatusCode::INTERNAL_SERVER_ERROR {
        return response;
    }

    let body = ErrorResponse::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        messages::INTERNAL_ERROR_MASKED,
    );
    let bytes = match serde_json::to_vec(&body) {
        Ok(bytes) => bytes,
        Err(_) => return response,
    };

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );

    Response::from_parts(parts, Body::from(bytes))
}
