// src/api/databases.rs
//! Database retrieval, listing and queries.

use super::parser::parse_api_response;
use super::transport::{fill_path, ApiRequest, PaginationParameters, Transport};
use crate::codec::WireObject;
use crate::constants::{DATABASES_PATH, DATABASE_PATH, DATABASE_QUERY_PATH};
use crate::error::AppError;
use crate::model::{Database, Filter, Page, PaginatedList, Sort};
use crate::types::DatabaseId;

/// Filter, sorts and pagination for a database query.
///
/// Pagination travels in the query string; filter and sorts in the body.
#[derive(Debug, Clone)]
pub struct QueryDatabaseParameters {
    pub database_id: DatabaseId,
    pub pagination: PaginationParameters,
    pub filter: Option<Filter>,
    pub sorts: Vec<Sort>,
}

impl QueryDatabaseParameters {
    pub fn new(database_id: DatabaseId) -> Self {
        Self {
            database_id,
            pagination: PaginationParameters::default(),
            filter: None,
            sorts: Vec::new(),
        }
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sorts.push(sort);
        self
    }

    pub fn with_pagination(mut self, pagination: PaginationParameters) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn to_request(&self) -> Result<ApiRequest, AppError> {
        let path = fill_path(
            DATABASE_QUERY_PATH,
            "{database_id}",
            &self.database_id.to_dashed(),
        );
        let body = WireObject::new()
            .optional("filter", self.filter.as_ref())?
            .non_empty("sorts", &self.sorts)?
            .build();
        Ok(ApiRequest::post(path, body).with_query(self.pagination.to_query()?))
    }
}

/// Operations under `/v1/databases`.
pub struct DatabasesClient<'a> {
    transport: &'a dyn Transport,
}

impl<'a> DatabasesClient<'a> {
    pub(crate) fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    pub async fn retrieve(&self, database_id: &DatabaseId) -> Result<Database, AppError> {
        let path = fill_path(DATABASE_PATH, "{database_id}", &database_id.to_dashed());
        let response = self.transport.send(ApiRequest::get(path)).await?;
        parse_api_response(response)
    }

    /// Databases shared with the integration.
    pub async fn list(
        &self,
        pagination: &PaginationParameters,
    ) -> Result<PaginatedList<Database>, AppError> {
        let request = ApiRequest::get(DATABASES_PATH).with_query(pagination.to_query()?);
        let response = self.transport.send(request).await?;
        parse_api_response(response)
    }

    pub async fn query(
        &self,
        parameters: &QueryDatabaseParameters,
    ) -> Result<PaginatedList<Page>, AppError> {
        let response = self.transport.send(parameters.to_request()?).await?;
        parse_api_response(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::HttpMethod;
    use crate::model::{CheckboxCondition, FilterCondition, SortDirection};
    use crate::types::ValidationError;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn database_id() -> DatabaseId {
        DatabaseId::parse("897e5a76ae524b489fdfe71f5945d1af").unwrap()
    }

    #[test]
    fn query_request_splits_pagination_from_body() {
        let request = QueryDatabaseParameters::new(database_id())
            .with_filter(Filter::property(
                "In stock",
                FilterCondition::Checkbox(CheckboxCondition::equals(true)),
            ))
            .with_sort(Sort::by_property("Name", SortDirection::Ascending))
            .with_pagination(PaginationParameters::new("cursor-1", 10))
            .to_request()
            .unwrap();

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(
            request.path,
            "/v1/databases/897e5a76-ae52-4b48-9fdf-e71f5945d1af/query"
        );
        assert_eq!(
            request.query,
            vec![
                ("start_cursor".to_string(), "cursor-1".to_string()),
                ("page_size".to_string(), "10".to_string()),
            ]
        );
        assert_eq!(
            request.body.unwrap(),
            json!({
                "filter": {"property": "In stock", "checkbox": {"equals": true}},
                "sorts": [{"property": "Name", "direction": "ascending"}]
            })
        );
    }

    #[test]
    fn unfiltered_query_sends_empty_body() {
        let request = QueryDatabaseParameters::new(database_id()).to_request().unwrap();
        assert!(request.query.is_empty());
        assert_eq!(request.body, Some(json!({})));
    }

    #[test]
    fn oversized_page_is_rejected_before_sending() {
        let err = QueryDatabaseParameters::new(database_id())
            .with_pagination(PaginationParameters::new("", 500))
            .to_request()
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::ValidationError(ValidationError::OutOfBounds { value: 500, .. })
        ));
    }
}
