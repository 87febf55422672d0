use super::common::{DateValue, FileReference, PageReference, SelectOption};
use super::rich_text::{plain_text, RichTextItem};
use super::user::User;
use crate::codec::{wire_serde, Discriminated, Envelope, Family, Registry, WireObject};
use crate::error::{DecodeError, EncodeError};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde_json::Value;

/// Property value — wraps a typed value with its property ID.
///
/// The id is filled in on reads; values built for a write usually leave it
/// empty and are keyed by property name instead.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyValue {
    pub id: Option<String>,
    pub type_specific_value: PropertyTypeValue,
}

/// The specific value types for properties
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyTypeValue {
    Title { title: Vec<RichTextItem> },
    RichText { rich_text: Vec<RichTextItem> },
    Number { number: Option<f64> },
    Select { select: Option<SelectOption> },
    MultiSelect { multi_select: Vec<SelectOption> },
    Date { date: Option<DateValue> },
    Formula { formula: FormulaValue },
    Relation { relation: Vec<PageReference> },
    Rollup { rollup: RollupValue },
    People { people: Vec<User> },
    Files { files: Vec<FileReference> },
    Checkbox { checkbox: bool },
    Url { url: Option<String> },
    Email { email: Option<String> },
    PhoneNumber { phone_number: Option<String> },
    CreatedTime { created_time: DateTime<Utc> },
    CreatedBy { created_by: User },
    LastEditedTime { last_edited_time: DateTime<Utc> },
    LastEditedBy { last_edited_by: User },
}

/// Computed result of a formula property.
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaValue {
    String(Option<String>),
    Number(Option<f64>),
    Boolean(bool),
    Date(Option<DateValue>),
}

/// Aggregated result of a rollup property.
#[derive(Debug, Clone, PartialEq)]
pub enum RollupValue {
    Number(Option<f64>),
    Date(Option<DateValue>),
    /// One id-less property value per related page.
    Array(Vec<PropertyValue>),
}

impl PropertyTypeValue {
    /// Returns the Notion API type name for this property value.
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyTypeValue::Title { .. } => "title",
            PropertyTypeValue::RichText { .. } => "rich_text",
            PropertyTypeValue::Number { .. } => "number",
            PropertyTypeValue::Select { .. } => "select",
            PropertyTypeValue::MultiSelect { .. } => "multi_select",
            PropertyTypeValue::Date { .. } => "date",
            PropertyTypeValue::Formula { .. } => "formula",
            PropertyTypeValue::Relation { .. } => "relation",
            PropertyTypeValue::Rollup { .. } => "rollup",
            PropertyTypeValue::People { .. } => "people",
            PropertyTypeValue::Files { .. } => "files",
            PropertyTypeValue::Checkbox { .. } => "checkbox",
            PropertyTypeValue::Url { .. } => "url",
            PropertyTypeValue::Email { .. } => "email",
            PropertyTypeValue::PhoneNumber { .. } => "phone_number",
            PropertyTypeValue::CreatedTime { .. } => "created_time",
            PropertyTypeValue::CreatedBy { .. } => "created_by",
            PropertyTypeValue::LastEditedTime { .. } => "last_edited_time",
            PropertyTypeValue::LastEditedBy { .. } => "last_edited_by",
        }
    }
}

impl PropertyValue {
    pub fn new(type_specific_value: PropertyTypeValue) -> Self {
        Self {
            id: None,
            type_specific_value,
        }
    }

    pub fn title(title: Vec<RichTextItem>) -> Self {
        Self::new(PropertyTypeValue::Title { title })
    }

    pub fn rich_text(rich_text: Vec<RichTextItem>) -> Self {
        Self::new(PropertyTypeValue::RichText { rich_text })
    }

    pub fn number(number: f64) -> Self {
        Self::new(PropertyTypeValue::Number {
            number: Some(number),
        })
    }

    pub fn checkbox(checkbox: bool) -> Self {
        Self::new(PropertyTypeValue::Checkbox { checkbox })
    }

    /// Select value naming an existing (or new) option.
    pub fn select(name: impl Into<String>) -> Self {
        Self::new(PropertyTypeValue::Select {
            select: Some(SelectOption::named(name)),
        })
    }

    pub fn type_name(&self) -> &'static str {
        self.type_specific_value.type_name()
    }

    /// Plain text of a title or rich text value.
    pub fn as_plain_text(&self) -> Option<String> {
        match &self.type_specific_value {
            PropertyTypeValue::Title { title: items }
            | PropertyTypeValue::RichText { rich_text: items } => Some(plain_text(items)),
            _ => None,
        }
    }

    pub fn as_checkbox(&self) -> Option<bool> {
        match self.type_specific_value {
            PropertyTypeValue::Checkbox { checkbox } => Some(checkbox),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self.type_specific_value {
            PropertyTypeValue::Number { number } => number,
            _ => None,
        }
    }

    fn materialize(env: &Envelope<'_>, value: PropertyTypeValue) -> Result<Self, DecodeError> {
        Ok(Self {
            id: env.fields().optional("id")?,
            type_specific_value: value,
        })
    }
}

static REGISTRY: Lazy<Registry<PropertyValue>> = Lazy::new(|| {
    use PropertyTypeValue as V;

    Registry::new(Family::PropertyValue)
        .with("title", |env| PropertyValue::materialize(env, V::Title { title: env.list()? }))
        .with("rich_text", |env| {
            PropertyValue::materialize(env, V::RichText { rich_text: env.list()? })
        })
        .with("number", |env| {
            PropertyValue::materialize(env, V::Number { number: env.value()? })
        })
        .with("select", |env| {
            PropertyValue::materialize(env, V::Select { select: env.value()? })
        })
        .with("multi_select", |env| {
            PropertyValue::materialize(env, V::MultiSelect { multi_select: env.value()? })
        })
        .with("date", |env| PropertyValue::materialize(env, V::Date { date: env.value()? }))
        .with("formula", |env| {
            PropertyValue::materialize(env, V::Formula { formula: env.nested()? })
        })
        .with("relation", |env| {
            PropertyValue::materialize(env, V::Relation { relation: env.value()? })
        })
        .with("rollup", |env| {
            PropertyValue::materialize(env, V::Rollup { rollup: env.nested()? })
        })
        .with("people", |env| {
            PropertyValue::materialize(env, V::People { people: env.list()? })
        })
        .with("files", |env| {
            PropertyValue::materialize(env, V::Files { files: env.value()? })
        })
        .with("checkbox", |env| {
            PropertyValue::materialize(env, V::Checkbox { checkbox: env.value()? })
        })
        .with("url", |env| PropertyValue::materialize(env, V::Url { url: env.value()? }))
        .with("email", |env| {
            PropertyValue::materialize(env, V::Email { email: env.value()? })
        })
        .with("phone_number", |env| {
            PropertyValue::materialize(env, V::PhoneNumber { phone_number: env.value()? })
        })
        .with("created_time", |env| {
            PropertyValue::materialize(env, V::CreatedTime { created_time: env.value()? })
        })
        .with("created_by", |env| {
            PropertyValue::materialize(env, V::CreatedBy { created_by: env.nested()? })
        })
        .with("last_edited_time", |env| {
            PropertyValue::materialize(env, V::LastEditedTime { last_edited_time: env.value()? })
        })
        .with("last_edited_by", |env| {
            PropertyValue::materialize(env, V::LastEditedBy { last_edited_by: env.nested()? })
        })
});

impl Discriminated for PropertyValue {
    fn registry() -> &'static Registry<Self> {
        &REGISTRY
    }

    fn tag(&self) -> &str {
        self.type_name()
    }

    fn encode(&self) -> Result<Value, EncodeError> {
        let tag = self.tag();
        let wire = WireObject::tagged(Self::TAG_FIELD, tag).optional("id", self.id.as_ref())?;
        let wire = match &self.type_specific_value {
            PropertyTypeValue::Title { title } => wire.field(tag, title)?,
            PropertyTypeValue::RichText { rich_text } => wire.field(tag, rich_text)?,
            PropertyTypeValue::Number { number } => wire.field(tag, number)?,
            PropertyTypeValue::Select { select } => wire.field(tag, select)?,
            PropertyTypeValue::MultiSelect { multi_select } => wire.field(tag, multi_select)?,
            PropertyTypeValue::Date { date } => wire.field(tag, date)?,
            PropertyTypeValue::Formula { formula } => wire.field(tag, formula)?,
            PropertyTypeValue::Relation { relation } => wire.field(tag, relation)?,
            PropertyTypeValue::Rollup { rollup } => wire.field(tag, rollup)?,
            PropertyTypeValue::People { people } => wire.field(tag, people)?,
            PropertyTypeValue::Files { files } => wire.field(tag, files)?,
            PropertyTypeValue::Checkbox { checkbox } => wire.field(tag, checkbox)?,
            PropertyTypeValue::Url { url } => wire.field(tag, url)?,
            PropertyTypeValue::Email { email } => wire.field(tag, email)?,
            PropertyTypeValue::PhoneNumber { phone_number } => wire.field(tag, phone_number)?,
            PropertyTypeValue::CreatedTime { created_time } => wire.field(tag, created_time)?,
            PropertyTypeValue::CreatedBy { created_by } => wire.field(tag, created_by)?,
            PropertyTypeValue::LastEditedTime { last_edited_time } => {
                wire.field(tag, last_edited_time)?
            }
            PropertyTypeValue::LastEditedBy { last_edited_by } => wire.field(tag, last_edited_by)?,
        };
        Ok(wire.build())
    }
}

static FORMULA_REGISTRY: Lazy<Registry<FormulaValue>> = Lazy::new(|| {
    Registry::new(Family::FormulaValue)
        .with("string", |env| Ok(FormulaValue::String(env.value()?)))
        .with("number", |env| Ok(FormulaValue::Number(env.value()?)))
        .with("boolean", |env| Ok(FormulaValue::Boolean(env.value()?)))
        .with("date", |env| Ok(FormulaValue::Date(env.value()?)))
});

impl Discriminated for FormulaValue {
    fn registry() -> &'static Registry<Self> {
        &FORMULA_REGISTRY
    }

    fn tag(&self) -> &str {
        match self {
            FormulaValue::String(_) => "string",
            FormulaValue::Number(_) => "number",
            FormulaValue::Boolean(_) => "boolean",
            FormulaValue::Date(_) => "date",
        }
    }

    fn encode(&self) -> Result<Value, EncodeError> {
        let tag = self.tag();
        let wire = WireObject::tagged(Self::TAG_FIELD, tag);
        let wire = match self {
            FormulaValue::String(value) => wire.field(tag, value)?,
            FormulaValue::Number(value) => wire.field(tag, value)?,
            FormulaValue::Boolean(value) => wire.field(tag, value)?,
            FormulaValue::Date(value) => wire.field(tag, value)?,
        };
        Ok(wire.build())
    }
}

static ROLLUP_REGISTRY: Lazy<Registry<RollupValue>> = Lazy::new(|| {
    Registry::new(Family::RollupValue)
        .with("number", |env| Ok(RollupValue::Number(env.value()?)))
        .with("date", |env| Ok(RollupValue::Date(env.value()?)))
        .with("array", |env| Ok(RollupValue::Array(env.list()?)))
});

impl Discriminated for RollupValue {
    fn registry() -> &'static Registry<Self> {
        &ROLLUP_REGISTRY
    }

    fn tag(&self) -> &str {
        match self {
            RollupValue::Number(_) => "number",
            RollupValue::Date(_) => "date",
            RollupValue::Array(_) => "array",
        }
    }

    fn encode(&self) -> Result<Value, EncodeError> {
        let tag = self.tag();
        let wire = WireObject::tagged(Self::TAG_FIELD, tag);
        let wire = match self {
            RollupValue::Number(value) => wire.field(tag, value)?,
            RollupValue::Date(value) => wire.field(tag, value)?,
            RollupValue::Array(items) => wire.field(tag, items)?,
        };
        Ok(wire.build())
    }
}

wire_serde!(PropertyValue, FormulaValue, RollupValue);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode, encode};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn checkbox_encodes_without_id() {
        let raw = json!({"type": "checkbox", "checkbox": true});
        let value: PropertyValue = decode(&raw).unwrap();
        assert_eq!(value, PropertyValue::checkbox(true));
        assert_eq!(value.as_checkbox(), Some(true));
        assert_eq!(encode(&value).unwrap(), raw);
    }

    #[test]
    fn nullable_payloads_keep_their_key() {
        let raw = json!({"id": "price", "type": "number", "number": null});
        let value: PropertyValue = decode(&raw).unwrap();
        assert_eq!(value.as_number(), None);
        assert_eq!(value.id.as_deref(), Some("price"));
        assert_eq!(encode(&value).unwrap(), raw);

        let missing = decode::<PropertyValue>(&json!({"type": "number"})).unwrap_err();
        assert!(matches!(missing, DecodeError::MissingField { .. }));
    }

    #[test]
    fn decodes_formula_values() {
        let raw = json!({"id": "f", "type": "formula", "formula": {"type": "number", "number": 4.5}});
        let value: PropertyValue = decode(&raw).unwrap();
        assert_eq!(
            value.type_specific_value,
            PropertyTypeValue::Formula {
                formula: FormulaValue::Number(Some(4.5))
            }
        );
        assert_eq!(encode(&value).unwrap(), raw);

        let err = decode::<FormulaValue>(&json!({"type": "array", "array": []})).unwrap_err();
        assert!(err.is_unknown_type());
    }

    #[test]
    fn rollup_array_holds_id_less_values() {
        let raw = json!({
            "id": "r",
            "type": "rollup",
            "rollup": {
                "type": "array",
                "array": [
                    {"type": "number", "number": 1.0},
                    {"type": "title", "title": [{"type": "text", "text": {"content": "Kale"}}]}
                ]
            }
        });

        let value: PropertyValue = decode(&raw).unwrap();
        match &value.type_specific_value {
            PropertyTypeValue::Rollup {
                rollup: RollupValue::Array(items),
            } => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[0].as_number(), Some(1.0));
                assert_eq!(items[1].as_plain_text().as_deref(), Some("Kale"));
                assert!(items.iter().all(|item| item.id.is_none()));
            }
            other => panic!("expected rollup array, got {other:?}"),
        }
        assert_eq!(encode(&value).unwrap(), raw);
    }

    #[test]
    fn decodes_timestamps_and_people() {
        let raw = json!({
            "id": "c",
            "type": "created_by",
            "created_by": {
                "object": "user",
                "id": "e79a0b74-3aba-4149-9f74-0bb5791a6ee6",
                "type": "person",
                "person": {}
            }
        });
        let value: PropertyValue = decode(&raw).unwrap();
        assert_eq!(value.type_name(), "created_by");
        assert_eq!(decode::<PropertyValue>(&encode(&value).unwrap()).unwrap(), value);

        let time: PropertyValue = decode(&json!({
            "type": "last_edited_time",
            "last_edited_time": "2021-05-13T16:46:00.000Z"
        }))
        .unwrap();
        assert_eq!(decode::<PropertyValue>(&encode(&time).unwrap()).unwrap(), time);
    }

    #[test]
    fn unknown_property_value_type_is_an_error() {
        let err = decode::<PropertyValue>(&json!({"type": "status", "status": {}})).unwrap_err();
        assert!(err.is_unknown_type());
    }
}
