// src/api/blocks.rs
//! Block children: listing and appending.

use super::parser::parse_api_response;
use super::transport::{fill_path, ApiRequest, PaginationParameters, Transport};
use super::reject_unsupported;
use crate::codec::WireObject;
use crate::constants::BLOCK_CHILDREN_PATH;
use crate::error::AppError;
use crate::model::{Block, PaginatedList};
use crate::types::BlockId;

#[derive(Debug, Clone)]
pub struct ListChildrenParameters {
    pub block_id: BlockId,
    pub pagination: PaginationParameters,
}

impl ListChildrenParameters {
    pub fn new(block_id: BlockId) -> Self {
        Self {
            block_id,
            pagination: PaginationParameters::default(),
        }
    }

    pub fn with_pagination(mut self, pagination: PaginationParameters) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn to_request(&self) -> Result<ApiRequest, AppError> {
        let path = fill_path(BLOCK_CHILDREN_PATH, "{block_id}", &self.block_id.to_dashed());
        Ok(ApiRequest::get(path).with_query(self.pagination.to_query()?))
    }
}

#[derive(Debug, Clone)]
pub struct AppendChildrenParameters {
    pub block_id: BlockId,
    pub children: Vec<Block>,
}

impl AppendChildrenParameters {
    pub fn new(block_id: BlockId, children: Vec<Block>) -> Self {
        Self { block_id, children }
    }

    /// Fails with [`AppError::Unimplemented`] if any child, at any depth,
    /// is an unsupported block.
    pub fn to_request(&self) -> Result<ApiRequest, AppError> {
        reject_unsupported("append block children", &self.children)?;

        let path = fill_path(BLOCK_CHILDREN_PATH, "{block_id}", &self.block_id.to_dashed());
        let body = WireObject::new().field("children", &self.children)?.build();
        Ok(ApiRequest::patch(path, body))
    }
}

/// Operations under `/v1/blocks`.
pub struct BlocksClient<'a> {
    transport: &'a dyn Transport,
}

impl<'a> BlocksClient<'a> {
    pub(crate) fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// One page of a block's direct children.
    pub async fn list_children(
        &self,
        parameters: &ListChildrenParameters,
    ) -> Result<PaginatedList<Block>, AppError> {
        let response = self.transport.send(parameters.to_request()?).await?;
        parse_api_response(response)
    }

    /// Appends children and returns the updated parent block.
    pub async fn append_children(
        &self,
        parameters: &AppendChildrenParameters,
    ) -> Result<Block, AppError> {
        let response = self.transport.send(parameters.to_request()?).await?;
        parse_api_response(response)
    }
}
