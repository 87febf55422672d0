// src/api/mod.rs
//! Notion API interaction: one resource client per endpoint family.
//!
//! Resource clients build an [`ApiRequest`], hand it to a [`Transport`], and
//! decode the [`ApiResponse`] through the codec. None of them retry, cache,
//! or keep state between calls.

pub mod blocks;
pub mod client;
pub mod databases;
pub mod pages;
pub mod parser;
pub mod search;
pub mod transport;
pub mod users;

pub use blocks::{AppendChildrenParameters, BlocksClient, ListChildrenParameters};
pub use client::NotionHttpClient;
pub use databases::{DatabasesClient, QueryDatabaseParameters};
pub use pages::{CreatePageParameters, PagesClient, UpdatePageParameters};
pub use search::{SearchClient, SearchParameters};
pub use transport::{ApiRequest, ApiResponse, HttpMethod, PaginationParameters, Transport};
pub use users::UsersClient;

use crate::config::ClientConfig;
use crate::error::AppError;
use crate::model::{self, Block};
use std::sync::Arc;

/// Entry point to the Notion API.
///
/// Cheap to clone; clones share the underlying transport.
#[derive(Clone)]
pub struct NotionClient {
    transport: Arc<dyn Transport>,
}

impl NotionClient {
    /// Creates a client that talks HTTP using the given configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, AppError> {
        let transport = NotionHttpClient::new(config)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Creates a client over any transport, such as an in-memory one in tests.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        model::init_registries();
        Self { transport }
    }

    pub fn blocks(&self) -> BlocksClient<'_> {
        BlocksClient::new(self.transport.as_ref())
    }

    pub fn pages(&self) -> PagesClient<'_> {
        PagesClient::new(self.transport.as_ref())
    }

    pub fn databases(&self) -> DatabasesClient<'_> {
        DatabasesClient::new(self.transport.as_ref())
    }

    pub fn users(&self) -> UsersClient<'_> {
        UsersClient::new(self.transport.as_ref())
    }

    pub fn search(&self) -> SearchClient<'_> {
        SearchClient::new(self.transport.as_ref())
    }
}

impl std::fmt::Debug for NotionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotionClient").finish_non_exhaustive()
    }
}

/// Unsupported blocks only carry what was read off the wire, so writing one
/// back is not an operation this client performs.
fn reject_unsupported(operation: &str, blocks: &[Block]) -> Result<(), AppError> {
    match blocks.iter().find_map(Block::find_unsupported) {
        Some(unsupported) => {
            log::warn!(
                "Refusing to {}: block type '{}' is not supported for writing",
                operation,
                unsupported.block_type
            );
            Err(AppError::Unimplemented {
                operation: format!("{} with '{}' block", operation, unsupported.block_type),
            })
        }
        None => Ok(()),
    }
}
