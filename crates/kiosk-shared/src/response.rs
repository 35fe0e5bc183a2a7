//! Standardized API response types - the wire contract with the backend.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Uniform wrapper around every backend response.
///
/// `success: true` does not guarantee a payload; some endpoints
/// legitimately return none. `success: false` carries the explanation in
/// `message` and, for validation rejections, per-field detail in `errors`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<HashMap<String, Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: String::new(),
            data: Some(data),
            errors: None,
            meta: None,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            errors: None,
            meta: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            errors: None,
            meta: None,
        }
    }
}

/// Pagination metadata attached to collection responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub has_previous: bool,
}

impl PageMeta {
    /// Build metadata satisfying the pagination invariants:
    /// `total_pages == ceil(total / limit)`, `has_next == page < total_pages`,
    /// `has_previous == page > 1`.
    pub fn new(total: u64, page: u32, limit: u32) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            total.div_ceil(u64::from(limit)) as u32
        };
        Self {
            total,
            page,
            limit,
            total_pages,
            has_next: page < total_pages,
            has_previous: page > 1,
        }
    }
}

/// An ordered page of items plus its validated metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, meta: PageMeta) -> Self {
        Self { items, meta }
    }
}

/// Body shape of non-2xx responses.
///
/// The backend emits either `{ statusCode?, message, error? }` or, for
/// validation failures, `{ message, details: { field: [msg] } }`. Some
/// endpoints use the envelope's `errors` key instead of `details`; both are
/// accepted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: Option<u16>,
    pub message: Option<String>,
    pub error: Option<String>,
    pub details: Option<HashMap<String, Vec<String>>>,
    pub errors: Option<HashMap<String, Vec<String>>>,
}

impl ErrorBody {
    /// The field-error map, whichever key the backend used.
    pub fn field_errors(&self) -> HashMap<String, Vec<String>> {
        self.details
            .clone()
            .or_else(|| self.errors.clone())
            .unwrap_or_default()
    }
}
