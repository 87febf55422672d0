use super::{DatabaseReference, DateValue, PageReference, User};
use crate::codec::{wire_serde, Discriminated, Family, Registry, WireObject};
use crate::error::EncodeError;
use once_cell::sync::Lazy;
use serde_json::Value;

/// Inline reference inside a rich text span.
#[derive(Debug, Clone, PartialEq)]
pub enum Mention {
    User(User),
    Page(PageReference),
    Database(DatabaseReference),
    Date(DateValue),
}

static REGISTRY: Lazy<Registry<Mention>> = Lazy::new(|| {
    Registry::new(Family::Mention)
        .with("user", |env| Ok(Mention::User(env.nested()?)))
        .with("page", |env| Ok(Mention::Page(env.value()?)))
        .with("database", |env| Ok(Mention::Database(env.value()?)))
        .with("date", |env| Ok(Mention::Date(env.value()?)))
});

impl Discriminated for Mention {
    fn registry() -> &'static Registry<Self> {
        &REGISTRY
    }

    fn tag(&self) -> &str {
        match self {
            Mention::User(_) => "user",
            Mention::Page(_) => "page",
            Mention::Database(_) => "database",
            Mention::Date(_) => "date",
        }
    }

    fn encode(&self) -> Result<Value, EncodeError> {
        let tag = self.tag();
        let wire = WireObject::tagged(Self::TAG_FIELD, tag);
        let wire = match self {
            Mention::User(user) => wire.field(tag, user)?,
            Mention::Page(page) => wire.field(tag, page)?,
            Mention::Database(database) => wire.field(tag, database)?,
            Mention::Date(date) => wire.field(tag, date)?,
        };
        Ok(wire.build())
    }
}

wire_serde!(Mention);
