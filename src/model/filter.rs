use crate::codec::{
    self, wire_serde, Envelope, Family, Fields, Registry, WireFormat, WireObject,
};
use crate::error::{DecodeError, EncodeError};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Database query filter: a condition on one property, or an `or`/`and`
/// combination of further filters nested to any depth.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Property(PropertyFilter),
    Compound(CompoundFilter),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyFilter {
    pub property: String,
    pub condition: FilterCondition,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CompoundFilter {
    Or(Vec<Filter>),
    And(Vec<Filter>),
}

/// Condition applied to a single property. On the wire it is the one key
/// next to `"property"`, named after the property type it applies to.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterCondition {
    Title(TextCondition),
    Text(TextCondition),
    RichText(TextCondition),
    Url(TextCondition),
    Email(TextCondition),
    PhoneNumber(TextCondition),
    Number(NumberCondition),
    Checkbox(CheckboxCondition),
    Select(SelectCondition),
    MultiSelect(ListCondition),
    Date(DateCondition),
    CreatedTime(DateCondition),
    LastEditedTime(DateCondition),
    People(ListCondition),
    CreatedBy(ListCondition),
    LastEditedBy(ListCondition),
    Files(FilesCondition),
    Relation(ListCondition),
    Formula(FormulaCondition),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equals: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub does_not_equal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub does_not_contain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts_with: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends_with: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_empty: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_not_empty: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NumberCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equals: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub does_not_equal: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greater_than: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub less_than: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greater_than_or_equal_to: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub less_than_or_equal_to: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_empty: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_not_empty: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CheckboxCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equals: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub does_not_equal: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equals: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub does_not_equal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_empty: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_not_empty: Option<bool>,
}

/// Membership condition shared by multi-select, people and relation
/// properties.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub does_not_contain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_empty: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_not_empty: Option<bool>,
}

/// Marker payload of the relative date conditions (`{"past_week": {}}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmptyObject {}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equals: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_or_before: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_or_after: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_empty: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_not_empty: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub past_week: Option<EmptyObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub past_month: Option<EmptyObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub past_year: Option<EmptyObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_week: Option<EmptyObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_month: Option<EmptyObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_year: Option<EmptyObject>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilesCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_empty: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_not_empty: Option<bool>,
}

/// Condition on a formula's result, by result type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FormulaCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkbox: Option<CheckboxCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<NumberCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateCondition>,
}

impl TextCondition {
    pub fn equals(value: impl Into<String>) -> Self {
        Self {
            equals: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn contains(value: impl Into<String>) -> Self {
        Self {
            contains: Some(value.into()),
            ..Self::default()
        }
    }
}

impl NumberCondition {
    pub fn greater_than(value: f64) -> Self {
        Self {
            greater_than: Some(value),
            ..Self::default()
        }
    }

    pub fn less_than(value: f64) -> Self {
        Self {
            less_than: Some(value),
            ..Self::default()
        }
    }
}

impl CheckboxCondition {
    pub fn equals(value: bool) -> Self {
        Self {
            equals: Some(value),
            does_not_equal: None,
        }
    }
}

impl ListCondition {
    pub fn contains(value: impl Into<String>) -> Self {
        Self {
            contains: Some(value.into()),
            ..Self::default()
        }
    }
}

impl Filter {
    pub fn property(property: impl Into<String>, condition: FilterCondition) -> Self {
        Filter::Property(PropertyFilter {
            property: property.into(),
            condition,
        })
    }

    pub fn or(filters: Vec<Filter>) -> Self {
        Filter::Compound(CompoundFilter::Or(filters))
    }

    pub fn and(filters: Vec<Filter>) -> Self {
        Filter::Compound(CompoundFilter::And(filters))
    }

    /// Nesting depth: 1 for a property filter.
    pub fn depth(&self) -> usize {
        match self {
            Filter::Property(_) => 1,
            Filter::Compound(CompoundFilter::Or(filters) | CompoundFilter::And(filters)) => {
                1 + filters.iter().map(Filter::depth).max().unwrap_or(0)
            }
        }
    }
}

impl FilterCondition {
    pub fn tag(&self) -> &'static str {
        match self {
            FilterCondition::Title(_) => "title",
            FilterCondition::Text(_) => "text",
            FilterCondition::RichText(_) => "rich_text",
            FilterCondition::Url(_) => "url",
            FilterCondition::Email(_) => "email",
            FilterCondition::PhoneNumber(_) => "phone_number",
            FilterCondition::Number(_) => "number",
            FilterCondition::Checkbox(_) => "checkbox",
            FilterCondition::Select(_) => "select",
            FilterCondition::MultiSelect(_) => "multi_select",
            FilterCondition::Date(_) => "date",
            FilterCondition::CreatedTime(_) => "created_time",
            FilterCondition::LastEditedTime(_) => "last_edited_time",
            FilterCondition::People(_) => "people",
            FilterCondition::CreatedBy(_) => "created_by",
            FilterCondition::LastEditedBy(_) => "last_edited_by",
            FilterCondition::Files(_) => "files",
            FilterCondition::Relation(_) => "relation",
            FilterCondition::Formula(_) => "formula",
        }
    }

    fn write(&self, wire: WireObject) -> Result<WireObject, EncodeError> {
        let tag = self.tag();
        match self {
            FilterCondition::Title(condition)
            | FilterCondition::Text(condition)
            | FilterCondition::RichText(condition)
            | FilterCondition::Url(condition)
            | FilterCondition::Email(condition)
            | FilterCondition::PhoneNumber(condition) => wire.field(tag, condition),
            FilterCondition::Number(condition) => wire.field(tag, condition),
            FilterCondition::Checkbox(condition) => wire.field(tag, condition),
            FilterCondition::Select(condition) => wire.field(tag, condition),
            FilterCondition::Date(condition)
            | FilterCondition::CreatedTime(condition)
            | FilterCondition::LastEditedTime(condition) => wire.field(tag, condition),
            FilterCondition::MultiSelect(condition)
            | FilterCondition::People(condition)
            | FilterCondition::CreatedBy(condition)
            | FilterCondition::LastEditedBy(condition)
            | FilterCondition::Relation(condition) => wire.field(tag, condition),
            FilterCondition::Files(condition) => wire.field(tag, condition),
            FilterCondition::Formula(condition) => wire.field(tag, condition),
        }
    }
}

/// Condition table, keyed by the condition's wire key.
pub(crate) static CONDITIONS: Lazy<Registry<FilterCondition>> = Lazy::new(|| {
    use FilterCondition as C;

    Registry::new(Family::FilterCondition)
        .with("title", |env| Ok(C::Title(env.value()?)))
        .with("text", |env| Ok(C::Text(env.value()?)))
        .with("rich_text", |env| Ok(C::RichText(env.value()?)))
        .with("url", |env| Ok(C::Url(env.value()?)))
        .with("email", |env| Ok(C::Email(env.value()?)))
        .with("phone_number", |env| Ok(C::PhoneNumber(env.value()?)))
        .with("number", |env| Ok(C::Number(env.value()?)))
        .with("checkbox", |env| Ok(C::Checkbox(env.value()?)))
        .with("select", |env| Ok(C::Select(env.value()?)))
        .with("multi_select", |env| Ok(C::MultiSelect(env.value()?)))
        .with("date", |env| Ok(C::Date(env.value()?)))
        .with("created_time", |env| Ok(C::CreatedTime(env.value()?)))
        .with("last_edited_time", |env| Ok(C::LastEditedTime(env.value()?)))
        .with("people", |env| Ok(C::People(env.value()?)))
        .with("created_by", |env| Ok(C::CreatedBy(env.value()?)))
        .with("last_edited_by", |env| Ok(C::LastEditedBy(env.value()?)))
        .with("files", |env| Ok(C::Files(env.value()?)))
        .with("relation", |env| Ok(C::Relation(env.value()?)))
        .with("formula", |env| Ok(C::Formula(env.value()?)))
});

impl WireFormat for Filter {
    fn from_wire(raw: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of(raw, Family::Filter, "filter")?;
        match (fields.contains("or"), fields.contains("and")) {
            (true, true) => Err(DecodeError::MalformedEnvelope {
                family: Family::Filter,
                reason: "compound filter carries both 'or' and 'and'".to_string(),
            }),
            (true, false) => Ok(Filter::or(fields.list("or")?)),
            (false, true) => Ok(Filter::and(fields.list("and")?)),
            (false, false) => {
                let envelope = Envelope::peek_key(raw, Family::FilterCondition, &["property"])?;
                let property = envelope.fields().get("property")?;
                let condition = codec::materialize(&CONDITIONS, &envelope)?;
                Ok(Filter::Property(PropertyFilter {
                    property,
                    condition,
                }))
            }
        }
    }

    fn to_wire(&self) -> Result<Value, EncodeError> {
        let wire = match self {
            Filter::Property(filter) => filter
                .condition
                .write(WireObject::new().field("property", &filter.property)?)?,
            Filter::Compound(CompoundFilter::Or(filters)) => WireObject::new().field("or", filters)?,
            Filter::Compound(CompoundFilter::And(filters)) => {
                WireObject::new().field("and", filters)?
            }
        };
        Ok(wire.build())
    }
}

wire_serde!(Filter);
