//! Shared response envelope types for API handlers.
//!
//! Every success response is `{ "success": true, ... }` with optional
//! `data`, `message` and `count` members. Use [`ApiResponse`] instead of
//! ad-hoc `serde_json::json!` bodies.

use serde::Serialize;

/// Standard `{ "success": true, "data": T }` envelope.
///
/// ```ignore
/// Ok(Json(ApiResponse::list(items)))
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            count: None,
            message: None,
            data: Some(data),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<U: Serialize> ApiResponse<Vec<U>> {
    /// A list payload with its length in `count`.
    pub fn list(items: Vec<U>) -> Self {
        Self {
            success: true,
            count: Some(items.len()),
            message: None,
            data: Some(items),
        }
    }
}

impl ApiResponse<()> {
    /// `{ "success": true, "message": ... }` with no payload.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            count: None,
            message: Some(message.into()),
            data: None,
        }
    }
}

impl ApiResponse<serde_json::Value> {
    /// `{ "success": true, "data": {}, "message": ... }` returned by deletions.
    pub fn deleted(message: impl Into<String>) -> Self {
        Self::ok(serde_json::json!({})).with_message(message)
    }
}

/// One page of a paginated listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResponse<T: Serialize> {
    pub success: bool,
    /// Items on this page.
    pub count: usize,
    pub total_pages: i64,
    pub current_page: i64,
    pub data: Vec<T>,
}

impl<T: Serialize> PagedResponse<T> {
    pub fn new(data: Vec<T>, total: i64, page: i64, limit: i64) -> Self {
        let total_pages = if limit > 0 { (total + limit - 1) / limit } else { 0 };
        Self {
            success: true,
            count: data.len(),
            total_pages,
            current_page: page,
            data,
        }
    }
}
