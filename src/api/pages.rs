// src/api/pages.rs
//! Page retrieval, creation and property updates.

use super::parser::parse_api_response;
use super::reject_unsupported;
use super::transport::{fill_path, ApiRequest, Transport};
use crate::codec::{Family, Fields, WireObject};
use crate::constants::{PAGES_PATH, PAGE_PATH};
use crate::error::{AppError, DecodeError};
use crate::model::{Block, Page, Parent, PropertyValue};
use crate::types::{PageId, PropertyName};
use indexmap::IndexMap;
use serde_json::Value;

fn page_path(page_id: &PageId) -> String {
    fill_path(PAGE_PATH, "{page_id}", &page_id.to_dashed())
}

/// Body of a page creation.
#[derive(Debug, Clone)]
pub struct CreatePageParameters {
    pub parent: Parent,
    pub properties: IndexMap<PropertyName, PropertyValue>,
    /// Initial content; left out of the body when empty.
    pub children: Vec<Block>,
}

impl CreatePageParameters {
    pub fn new(parent: Parent) -> Self {
        Self {
            parent,
            properties: IndexMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<PropertyName>, value: PropertyValue) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.children = children;
        self
    }

    /// Reads `properties` and the optional `children` from a JSON object
    /// shaped like the request body.
    pub fn from_wire_body(parent: Parent, raw: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of(raw, Family::PropertyValue, "page")?;
        Ok(Self {
            parent,
            properties: fields.keyed("properties")?,
            children: fields.list_or_empty("children")?,
        })
    }

    pub fn to_request(&self) -> Result<ApiRequest, AppError> {
        reject_unsupported("create page", &self.children)?;

        let body = WireObject::new()
            .field("parent", &self.parent)?
            .field("properties", &self.properties)?
            .non_empty("children", &self.children)?
            .build();
        Ok(ApiRequest::post(PAGES_PATH, body))
    }
}

/// Property changes for an existing page. Properties not named are left as they are.
#[derive(Debug, Clone)]
pub struct UpdatePageParameters {
    pub page_id: PageId,
    pub properties: IndexMap<PropertyName, PropertyValue>,
}

impl UpdatePageParameters {
    pub fn new(page_id: PageId) -> Self {
        Self {
            page_id,
            properties: IndexMap::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<PropertyName>, value: PropertyValue) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    pub fn from_wire_body(page_id: PageId, raw: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of(raw, Family::PropertyValue, "page")?;
        Ok(Self {
            page_id,
            properties: fields.keyed("properties")?,
        })
    }

    pub fn to_request(&self) -> Result<ApiRequest, AppError> {
        let body = WireObject::new()
            .field("properties", &self.properties)?
            .build();
        Ok(ApiRequest::patch(page_path(&self.page_id), body))
    }
}

/// Operations under `/v1/pages`.
pub struct PagesClient<'a> {
    transport: &'a dyn Transport,
}

impl<'a> PagesClient<'a> {
    pub(crate) fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    pub async fn retrieve(&self, page_id: &PageId) -> Result<Page, AppError> {
        let response = self.transport.send(ApiRequest::get(page_path(page_id))).await?;
        parse_api_response(response)
    }

    pub async fn create(&self, parameters: &CreatePageParameters) -> Result<Page, AppError> {
        let response = self.transport.send(parameters.to_request()?).await?;
        parse_api_response(response)
    }

    pub async fn update(&self, parameters: &UpdatePageParameters) -> Result<Page, AppError> {
        let response = self.transport.send(parameters.to_request()?).await?;
        parse_api_response(response)
    }
}
