// src/api/client.rs
//! HTTP transport for the Notion API.
//!
//! A thin wrapper around reqwest that handles authentication and the
//! version header. It returns status and body untouched; parsing lives in
//! [`super::parser`].

use super::transport::{ApiRequest, ApiResponse, HttpMethod, Transport};
use crate::config::ClientConfig;
use crate::error::AppError;
use crate::types::ValidatedUrl;
use reqwest::{header, Client};

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: ValidatedUrl,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(config: &ClientConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(config)?)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(config: &ClientConfig) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = config.api_key.bearer();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_str(&config.notion_version).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid Notion version: {}", e))
            })?,
        );

        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(&config.user_agent).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid user agent: {}", e))
            })?,
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    pub fn base_url(&self) -> &ValidatedUrl {
        &self.base_url
    }
}

#[async_trait::async_trait]
impl Transport for NotionHttpClient {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, AppError> {
        let url = self.base_url.join_path(&request.path);
        log::debug!("{} {}", request.method, url);

        let builder = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Patch => self.client.patch(&url),
        };
        let builder = if request.query.is_empty() {
            builder
        } else {
            builder.query(&request.query)
        };
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let data = response.bytes().await?.to_vec();

        log::debug!("{} {} -> {} ({} bytes)", request.method, url, status, data.len());

        Ok(ApiResponse { status, data, url })
    }
}
