// src/api/search.rs
//! Workspace search over pages and databases.

use super::parser::parse_api_response;
use super::transport::{ApiRequest, PaginationParameters, Transport};
use crate::codec::WireObject;
use crate::constants::SEARCH_PATH;
use crate::error::AppError;
use crate::model::{PaginatedList, SearchFilter, SearchSort, SearchableObject};

#[derive(Debug, Clone, Default)]
pub struct SearchParameters {
    pub pagination: PaginationParameters,
    /// Matched against titles; empty matches everything.
    pub query: String,
    pub sort: Option<SearchSort>,
    pub filter: Option<SearchFilter>,
}

impl SearchParameters {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn with_sort(mut self, sort: SearchSort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_filter(mut self, filter: SearchFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_pagination(mut self, pagination: PaginationParameters) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn to_request(&self) -> Result<ApiRequest, AppError> {
        let query = (!self.query.is_empty()).then_some(&self.query);
        let body = WireObject::new()
            .optional("query", query)?
            .optional("sort", self.sort.as_ref())?
            .optional("filter", self.filter.as_ref())?
            .build();
        Ok(ApiRequest::post(SEARCH_PATH, body).with_query(self.pagination.to_query()?))
    }
}

pub struct SearchClient<'a> {
    transport: &'a dyn Transport,
}

impl<'a> SearchClient<'a> {
    pub(crate) fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    pub async fn search(
        &self,
        parameters: &SearchParameters,
    ) -> Result<PaginatedList<SearchableObject>, AppError> {
        let response = self.transport.send(parameters.to_request()?).await?;
        parse_api_response(response)
    }
}
