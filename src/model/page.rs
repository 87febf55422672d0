use super::parent::Parent;
use super::property::DatabaseProperty;
use super::property_value::PropertyValue;
use super::rich_text::{plain_text, RichTextItem};
use crate::codec::{
    wire_serde, Discriminated, Family, Fields, Registry, WireFormat, WireObject,
};
use crate::error::{DecodeError, EncodeError};
use crate::types::{DatabaseId, PageId, PropertyName};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde_json::{json, Value};

/// A Notion page
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub id: PageId,
    pub created_time: Option<DateTime<Utc>>,
    pub last_edited_time: Option<DateTime<Utc>>,
    pub parent: Option<Parent>,
    pub archived: bool,
    pub url: Option<String>,
    /// Property values keyed by property name, in the order the API sent them.
    pub properties: IndexMap<PropertyName, PropertyValue>,
}

impl Page {
    /// Plain text of the page's title property, if it has one.
    pub fn title(&self) -> Option<String> {
        self.properties
            .values()
            .find(|value| value.type_name() == "title")
            .and_then(PropertyValue::as_plain_text)
    }

    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    fn from_fields(fields: &Fields<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            id: fields.get("id")?,
            created_time: fields.optional("created_time")?,
            last_edited_time: fields.optional("last_edited_time")?,
            parent: fields.optional_nested("parent")?,
            archived: fields.optional("archived")?.unwrap_or(false),
            url: fields.optional("url")?,
            properties: fields.keyed("properties")?,
        })
    }
}

impl WireFormat for Page {
    fn from_wire(raw: &Value) -> Result<Self, DecodeError> {
        Page::from_fields(&Fields::of(raw, Family::SearchableObject, "page")?)
    }

    fn to_wire(&self) -> Result<Value, EncodeError> {
        Ok(WireObject::new()
            .value("object", json!("page"))
            .field("id", &self.id)?
            .optional("created_time", self.created_time.as_ref())?
            .optional("last_edited_time", self.last_edited_time.as_ref())?
            .optional("parent", self.parent.as_ref())?
            .field("archived", &self.archived)?
            .optional("url", self.url.as_ref())?
            .field("properties", &self.properties)?
            .build())
    }
}

/// A Notion database
#[derive(Debug, Clone, PartialEq)]
pub struct Database {
    pub id: DatabaseId,
    pub created_time: Option<DateTime<Utc>>,
    pub last_edited_time: Option<DateTime<Utc>>,
    pub title: Vec<RichTextItem>,
    pub parent: Option<Parent>,
    pub url: Option<String>,
    /// Property schema keyed by property name.
    pub properties: IndexMap<PropertyName, DatabaseProperty>,
}

impl Database {
    /// Get the database title
    pub fn title(&self) -> String {
        plain_text(&self.title)
    }

    fn from_fields(fields: &Fields<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            id: fields.get("id")?,
            created_time: fields.optional("created_time")?,
            last_edited_time: fields.optional("last_edited_time")?,
            title: fields.list_or_empty("title")?,
            parent: fields.optional_nested("parent")?,
            url: fields.optional("url")?,
            properties: fields.keyed("properties")?,
        })
    }
}

impl WireFormat for Database {
    fn from_wire(raw: &Value) -> Result<Self, DecodeError> {
        Database::from_fields(&Fields::of(raw, Family::SearchableObject, "database")?)
    }

    fn to_wire(&self) -> Result<Value, EncodeError> {
        Ok(WireObject::new()
            .value("object", json!("database"))
            .field("id", &self.id)?
            .optional("created_time", self.created_time.as_ref())?
            .optional("last_edited_time", self.last_edited_time.as_ref())?
            .field("title", &self.title)?
            .optional("parent", self.parent.as_ref())?
            .optional("url", self.url.as_ref())?
            .field("properties", &self.properties)?
            .build())
    }
}

wire_serde!(Page, Database);

/// A search hit: either a page or a database, told apart by `object`.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchableObject {
    Page(Page),
    Database(Database),
}

static REGISTRY: Lazy<Registry<SearchableObject>> = Lazy::new(|| {
    Registry::new(Family::SearchableObject)
        .with("page", |env| Ok(SearchableObject::Page(Page::from_fields(env.fields())?)))
        .with("database", |env| {
            Ok(SearchableObject::Database(Database::from_fields(env.fields())?))
        })
});

impl Discriminated for SearchableObject {
    const TAG_FIELD: &'static str = "object";

    fn registry() -> &'static Registry<Self> {
        &REGISTRY
    }

    fn tag(&self) -> &str {
        match self {
            SearchableObject::Page(_) => "page",
            SearchableObject::Database(_) => "database",
        }
    }

    fn encode(&self) -> Result<Value, EncodeError> {
        match self {
            SearchableObject::Page(page) => page.to_wire(),
            SearchableObject::Database(database) => database.to_wire(),
        }
    }
}

wire_serde!(SearchableObject);

/// One page of a cursor-paginated list response.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedList<T> {
    pub results: Vec<T>,
    pub has_more: bool,
    pub next_cursor: Option<String>,
}

impl<T> PaginatedList<T> {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.results.iter()
    }
}

impl<T> IntoIterator for PaginatedList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl<T: WireFormat> WireFormat for PaginatedList<T> {
    fn from_wire(raw: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of(raw, Family::List, "list")?;
        Ok(Self {
            results: fields.list("results")?,
            has_more: fields.optional("has_more")?.unwrap_or(false),
            next_cursor: fields.optional("next_cursor")?,
        })
    }

    fn to_wire(&self) -> Result<Value, EncodeError> {
        let results = self
            .results
            .iter()
            .map(WireFormat::to_wire)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(WireObject::new()
            .value("object", json!("list"))
            .value("results", Value::Array(results))
            .field("has_more", &self.has_more)?
            .field("next_cursor", &self.next_cursor)?
            .build())
    }
}
