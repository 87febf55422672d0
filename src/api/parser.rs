// src/api/parser.rs
//! Turns raw API responses into typed records or typed errors.

use super::transport::ApiResponse;
use crate::codec::{decode_slice, WireFormat};
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, NotionErrorCode};
use serde::Deserialize;

/// The error object the API sends with every non-2xx status.
#[derive(Debug, Deserialize)]
struct NotionErrorBody {
    code: String,
    #[serde(default)]
    message: String,
}

/// Decode a response body, or map an error status to [`AppError::NotionService`].
pub fn parse_api_response<T: WireFormat>(response: ApiResponse) -> Result<T, AppError> {
    if response.is_success() {
        parse_success(&response)
    } else {
        Err(parse_error(&response))
    }
}

fn parse_success<T: WireFormat>(response: &ApiResponse) -> Result<T, AppError> {
    decode_slice(&response.data).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", response.url, e);
        log::debug!("Response body: {}", preview(&response.body_text()));
        AppError::from(e)
    })
}

fn parse_error(response: &ApiResponse) -> AppError {
    if let Ok(body) = serde_json::from_slice::<NotionErrorBody>(&response.data) {
        log::debug!(
            "Notion API error from {}: {} ({})",
            response.url,
            body.code,
            response.status
        );
        return AppError::NotionService {
            code: NotionErrorCode::from_api_response(&body.code),
            message: body.message,
            status: response.status,
        };
    }

    log::warn!(
        "Unparseable error body from {}: {}",
        response.url,
        preview(&response.body_text())
    );

    // Fallback to generic error with HTTP status code
    AppError::NotionService {
        code: NotionErrorCode::from_http_status(response.status),
        message: format!("HTTP {} from {}", response.status, response.url),
        status: response.status,
    }
}

fn preview(body: &str) -> String {
    match body.char_indices().nth(ERROR_BODY_PREVIEW_LENGTH) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
