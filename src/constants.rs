// src/constants.rs
//! Constants that define how the client talks to the Notion API.
//!
//! Endpoint templates carry a single `{placeholder}` token that the resource
//! clients substitute with an id before sending.

// ---------------------------------------------------------------------------
// Connection defaults
// ---------------------------------------------------------------------------

/// Base URL every endpoint path is joined onto.
pub const DEFAULT_BASE_URL: &str = "https://api.notion.com";

/// API version sent in the `Notion-Version` header.
///
/// Rich-text payloads of text blocks travel under `"text"` in this version.
pub const DEFAULT_NOTION_VERSION: &str = "2021-05-13";

/// `User-Agent` sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("notion-typed/", env!("CARGO_PKG_VERSION"));

/// Environment variable holding the integration token.
pub const API_KEY_ENV: &str = "NOTION_API_KEY";

/// Optional environment override for the base URL.
pub const BASE_URL_ENV: &str = "NOTION_BASE_URL";

/// Optional environment override for the API version.
pub const NOTION_VERSION_ENV: &str = "NOTION_VERSION";

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// The most objects the Notion API returns per page of results.
pub const NOTION_API_MAX_PAGE_SIZE: u32 = 100;

// ---------------------------------------------------------------------------
// Endpoint templates
// ---------------------------------------------------------------------------

pub const BLOCK_CHILDREN_PATH: &str = "/v1/blocks/{block_id}/children";
pub const PAGES_PATH: &str = "/v1/pages";
pub const PAGE_PATH: &str = "/v1/pages/{page_id}";
pub const DATABASES_PATH: &str = "/v1/databases";
pub const DATABASE_PATH: &str = "/v1/databases/{database_id}";
pub const DATABASE_QUERY_PATH: &str = "/v1/databases/{database_id}/query";
pub const USERS_PATH: &str = "/v1/users";
pub const USER_PATH: &str = "/v1/users/{user_id}";
pub const SEARCH_PATH: &str = "/v1/search";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing response bodies in logs.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 500;
