//! Standard error messages for consistent error responses.

/// Body `status` for 4xx responses
pub const STATUS_FAIL: &str = "fail";

/// Body `status` for 5xx responses
pub const STATUS_ERROR: &str = "error";

/// Replaces the message of 500 responses in production
pub const INTERNAL_ERROR_MASKED: &str = "Something has gone very wrong";

pub const ROUTE_NOT_FOUND: &str = "The requested resource was not found";
pub const METHOD_NOT_ALLOWED: &str = "The HTTP method is not allowed for this resource";
