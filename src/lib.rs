// src/lib.rs
//! notion-typed: a typed Notion API client built around a discriminated-union codec.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `DecodeError`, `EncodeError`, `ValidationError`
//! - **Configuration**: `ClientConfig`
//! - **Codec**: `decode`, `encode`, `Registry`, `Envelope`, `WireFormat`
//! - **Domain model**: `Block`, `Page`, `Database`, `PropertyValue`, `Filter`, etc.
//! - **Domain types**: `PageId`, `BlockId`, `ApiKey`, `PropertyName`, etc.
//! - **API client**: `NotionClient`, the resource clients, `Transport`

pub mod api;
pub mod codec;
pub mod config;
pub mod constants;
pub mod error;
pub mod model;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, DecodeError, EncodeError, NotionErrorCode, Result};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::ClientConfig;

// --- Codec ---
pub use crate::codec::{
    decode, decode_slice, encode, Discriminated, Envelope, Family, Registry, RegistryError,
    WireFormat,
};

// --- Domain Model ---
pub use crate::model::{
    init_registries, Block, Database, DatabaseProperty, DatabasePropertyType, Filter,
    FilterCondition, Page, PaginatedList, Parent, PropertyTypeValue, PropertyValue,
    RichTextItem, SearchableObject, User,
};

// --- Domain Types ---
pub use crate::types::{
    ApiKey, BlockId, Color, DatabaseId, PageId, PropertyName, UserId, ValidatedUrl,
};

// --- API Client ---
pub use crate::api::{
    ApiRequest, ApiResponse, HttpMethod, NotionClient, NotionHttpClient, PaginationParameters,
    Transport,
};
