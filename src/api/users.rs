// src/api/users.rs
use super::parser::parse_api_response;
use super::transport::{fill_path, ApiRequest, PaginationParameters, Transport};
use crate::constants::{USERS_PATH, USER_PATH};
use crate::error::AppError;
use crate::model::{PaginatedList, User};
use crate::types::UserId;

/// Operations under `/v1/users`.
pub struct UsersClient<'a> {
    transport: &'a dyn Transport,
}

impl<'a> UsersClient<'a> {
    pub(crate) fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    pub async fn retrieve(&self, user_id: &UserId) -> Result<User, AppError> {
        let path = fill_path(USER_PATH, "{user_id}", &user_id.to_dashed());
        let response = self.transport.send(ApiRequest::get(path)).await?;
        parse_api_response(response)
    }

    pub async fn list(
        &self,
        pagination: &PaginationParameters,
    ) -> Result<PaginatedList<User>, AppError> {
        let request = ApiRequest::get(USERS_PATH).with_query(pagination.to_query()?);
        let response = self.transport.send(request).await?;
        parse_api_response(response)
    }
}
