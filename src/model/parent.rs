use crate::codec::{wire_serde, Discriminated, Family, Registry, WireObject};
use crate::error::EncodeError;
use crate::types::{DatabaseId, PageId};
use once_cell::sync::Lazy;
use serde_json::{json, Value};

/// Where a page or database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parent {
    Database(DatabaseId),
    Page(PageId),
    Workspace,
}

static REGISTRY: Lazy<Registry<Parent>> = Lazy::new(|| {
    Registry::new(Family::Parent)
        .with("database_id", |env| Ok(Parent::Database(env.value()?)))
        .with("page_id", |env| Ok(Parent::Page(env.value()?)))
        .with("workspace", |_| Ok(Parent::Workspace))
});

impl Discriminated for Parent {
    fn registry() -> &'static Registry<Self> {
        &REGISTRY
    }

    fn tag(&self) -> &str {
        match self {
            Parent::Database(_) => "database_id",
            Parent::Page(_) => "page_id",
            Parent::Workspace => "workspace",
        }
    }

    fn encode(&self) -> Result<Value, EncodeError> {
        let tag = self.tag();
        let wire = WireObject::tagged(Self::TAG_FIELD, tag);
        let wire = match self {
            Parent::Database(id) => wire.field(tag, id)?,
            Parent::Page(id) => wire.field(tag, id)?,
            Parent::Workspace => wire.value(tag, json!(true)),
        };
        Ok(wire.build())
    }
}

wire_serde!(Parent);
