// src/api/transport.rs
//! The request/response contract between resource clients and the wire.
//!
//! Resource clients only ever build an [`ApiRequest`] and read back an
//! [`ApiResponse`]; how the bytes travel is up to the [`Transport`].

use crate::constants::NOTION_API_MAX_PAGE_SIZE;
use crate::error::AppError;
use crate::types::ValidationError;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything needed to issue one API call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    /// Path below the base URL, placeholders already substituted.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Post, path).with_body(body)
    }

    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Patch, path).with_body(body)
    }

    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query.extend(query);
        self
    }
}

/// Raw outcome of one API call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub data: Vec<u8>,
    /// Final request URL, for diagnostics.
    pub url: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, lossily decoded, for log messages.
    pub fn body_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }
}

/// Sends a request and returns the status and body, whatever the status.
///
/// Implementations report only failures to get a response at all; non-2xx
/// statuses are returned as ordinary responses.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, AppError>;
}

/// Cursor and page size for list endpoints.
///
/// An empty cursor and a zero page size mean "not set" and are left out of
/// the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationParameters {
    pub start_cursor: String,
    pub page_size: u32,
}

impl PaginationParameters {
    pub fn new(start_cursor: impl Into<String>, page_size: u32) -> Self {
        Self {
            start_cursor: start_cursor.into(),
            page_size,
        }
    }

    /// Query pairs for the request, rejecting page sizes the API won't accept.
    pub fn to_query(&self) -> Result<Vec<(String, String)>, ValidationError> {
        if self.page_size > NOTION_API_MAX_PAGE_SIZE {
            return Err(ValidationError::OutOfBounds {
                value: self.page_size,
                min: 1,
                max: NOTION_API_MAX_PAGE_SIZE,
            });
        }

        let mut query = Vec::new();
        if !self.start_cursor.is_empty() {
            query.push(("start_cursor".to_string(), self.start_cursor.clone()));
        }
        if self.page_size > 0 {
            query.push(("page_size".to_string(), self.page_size.to_string()));
        }
        Ok(query)
    }
}

/// Substitutes the single `{placeholder}` token of an endpoint template.
pub fn fill_path(template: &str, placeholder: &str, value: &str) -> String {
    template.replacen(placeholder, value, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::BLOCK_CHILDREN_PATH;

    #[test]
    fn pagination_omits_unset_values() {
        assert!(PaginationParameters::default().to_query().unwrap().is_empty());

        let query = PaginationParameters::new("fe2cc560", 50).to_query().unwrap();
        assert_eq!(
            query,
            vec![
                ("start_cursor".to_string(), "fe2cc560".to_string()),
                ("page_size".to_string(), "50".to_string()),
            ]
        );
    }

    #[test]
    fn pagination_rejects_oversized_pages() {
        let err = PaginationParameters::new("", 101).to_query().unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfBounds {
                value: 101,
                min: 1,
                max: 100
            }
        );
        assert!(PaginationParameters::new("", 100).to_query().is_ok());
    }

    #[test]
    fn fills_single_placeholder() {
        assert_eq!(
            fill_path(BLOCK_CHILDREN_PATH, "{block_id}", "abc"),
            "/v1/blocks/abc/children"
        );
    }

    #[test]
    fn success_is_2xx() {
        let response = |status| ApiResponse {
            status,
            data: Vec::new(),
            url: String::new(),
        };
        assert!(response(200).is_success());
        assert!(!response(404).is_success());
        assert!(!response(199).is_success());
    }
}
