//! Success envelope shared by every products endpoint.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body status of every successful response
pub const STATUS_SUCCESS: &str = "success";

/// Success envelope
///
/// ```json
/// { "status": "success", "message": "Products successfully retrieved", "count": 2, "data": [] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub status: String,
    pub message: String,
    pub count: usize,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, count: usize, data: T) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            message: message.into(),
            count,
            data: Some(data),
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Envelope over a list, `count` taken from its length
    pub fn list(message: impl Into<String>, data: Vec<T>) -> Self {
        let count = data.len();
        Self::success(message, count, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_counts_items() {
        let envelope = ApiResponse::list("ok", vec![1, 2, 3]);
        assert_eq!(envelope.count, 3);
        assert_eq!(envelope.status, "success");
    }

    #[test]
    fn test_empty_list_serializes_empty_array() {
        let envelope = ApiResponse::<Vec<u8>>::list("ok", vec![]);
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({ "status": "success", "message": "ok", "count": 0, "data": [] })
        );
    }
}
