use super::common::SelectOption;
use crate::codec::{wire_serde, Discriminated, Envelope, Family, Registry, WireObject};
use crate::error::{DecodeError, EncodeError};
use crate::types::DatabaseId;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// Database property definition
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseProperty {
    pub id: String,
    pub name: Option<String>,
    pub property_type: DatabasePropertyType,
}

/// Database property types
#[derive(Debug, Clone, PartialEq)]
pub enum DatabasePropertyType {
    Title,
    RichText,
    Number { format: NumberFormat },
    Select { options: Vec<SelectOption> },
    MultiSelect { options: Vec<SelectOption> },
    Date,
    People,
    File,
    Checkbox,
    Url,
    Email,
    PhoneNumber,
    Formula { expression: String },
    Relation(RelationConfig),
    Rollup(RollupConfig),
    CreatedTime,
    CreatedBy,
    LastEditedTime,
    LastEditedBy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationConfig {
    pub database_id: DatabaseId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synced_property_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synced_property_id: Option<String>,
}

/// Which relation and which property of the related pages a rollup reads.
/// The API names each side by name, by id, or both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollupConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation_property_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation_property_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rollup_property_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rollup_property_id: Option<String>,
    pub function: RollupFunction,
}

/// Number format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberFormat {
    #[default]
    Number,
    NumberWithCommas,
    Percent,
    Dollar,
    CanadianDollar,
    Euro,
    Pound,
    Yen,
    Ruble,
    Rupee,
    Won,
    Yuan,
    Real,
    Lira,
    Rupiah,
    Franc,
    HongKongDollar,
    NewZealandDollar,
    Krona,
    NorwegianKrone,
    MexicanPeso,
    Rand,
    NewTaiwanDollar,
    DanishKrone,
    Zloty,
    Baht,
    Forint,
    Koruna,
    Shekel,
    ChileanPeso,
    PhilippinePeso,
    Dirham,
    ColombianPeso,
    Riyal,
    Ringgit,
    Leu,
    ArgentinePeso,
    UruguayanPeso,
}

/// Aggregation applied by a rollup property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollupFunction {
    CountAll,
    CountValues,
    CountUniqueValues,
    CountEmpty,
    CountNotEmpty,
    PercentEmpty,
    PercentNotEmpty,
    Sum,
    Average,
    Median,
    Min,
    Max,
    Range,
}

impl DatabasePropertyType {
    pub fn type_name(&self) -> &'static str {
        match self {
            DatabasePropertyType::Title => "title",
            DatabasePropertyType::RichText => "rich_text",
            DatabasePropertyType::Number { .. } => "number",
            DatabasePropertyType::Select { .. } => "select",
            DatabasePropertyType::MultiSelect { .. } => "multi_select",
            DatabasePropertyType::Date => "date",
            DatabasePropertyType::People => "people",
            DatabasePropertyType::File => "file",
            DatabasePropertyType::Checkbox => "checkbox",
            DatabasePropertyType::Url => "url",
            DatabasePropertyType::Email => "email",
            DatabasePropertyType::PhoneNumber => "phone_number",
            DatabasePropertyType::Formula { .. } => "formula",
            DatabasePropertyType::Relation(_) => "relation",
            DatabasePropertyType::Rollup(_) => "rollup",
            DatabasePropertyType::CreatedTime => "created_time",
            DatabasePropertyType::CreatedBy => "created_by",
            DatabasePropertyType::LastEditedTime => "last_edited_time",
            DatabasePropertyType::LastEditedBy => "last_edited_by",
        }
    }
}

impl fmt::Display for DatabasePropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

impl DatabaseProperty {
    fn materialize(
        env: &Envelope<'_>,
        property_type: DatabasePropertyType,
    ) -> Result<Self, DecodeError> {
        let fields = env.fields();
        Ok(Self {
            id: fields.get("id")?,
            name: fields.optional("name")?,
            property_type,
        })
    }

    fn options(env: &Envelope<'_>) -> Result<Vec<SelectOption>, DecodeError> {
        Ok(env.payload()?.optional("options")?.unwrap_or_default())
    }

    pub fn is_title(&self) -> bool {
        matches!(self.property_type, DatabasePropertyType::Title)
    }
}

static REGISTRY: Lazy<Registry<DatabaseProperty>> = Lazy::new(|| {
    use DatabasePropertyType as Kind;

    Registry::new(Family::Property)
        .with("title", |env| DatabaseProperty::materialize(env, Kind::Title))
        .with("rich_text", |env| DatabaseProperty::materialize(env, Kind::RichText))
        .with("number", |env| {
            let format: NumberFormat = env.payload()?.optional("format")?.unwrap_or_default();
            DatabaseProperty::materialize(env, Kind::Number { format })
        })
        .with("select", |env| {
            let options = DatabaseProperty::options(env)?;
            DatabaseProperty::materialize(env, Kind::Select { options })
        })
        .with("multi_select", |env| {
            let options = DatabaseProperty::options(env)?;
            DatabaseProperty::materialize(env, Kind::MultiSelect { options })
        })
        .with("date", |env| DatabaseProperty::materialize(env, Kind::Date))
        .with("people", |env| DatabaseProperty::materialize(env, Kind::People))
        .with("file", |env| DatabaseProperty::materialize(env, Kind::File))
        .with("checkbox", |env| DatabaseProperty::materialize(env, Kind::Checkbox))
        .with("url", |env| DatabaseProperty::materialize(env, Kind::Url))
        .with("email", |env| DatabaseProperty::materialize(env, Kind::Email))
        .with("phone_number", |env| DatabaseProperty::materialize(env, Kind::PhoneNumber))
        .with("formula", |env| {
            let expression: String = env.payload()?.get("expression")?;
            DatabaseProperty::materialize(env, Kind::Formula { expression })
        })
        .with("relation", |env| {
            DatabaseProperty::materialize(env, Kind::Relation(env.value()?))
        })
        .with("rollup", |env| {
            DatabaseProperty::materialize(env, Kind::Rollup(env.value()?))
        })
        .with("created_time", |env| DatabaseProperty::materialize(env, Kind::CreatedTime))
        .with("created_by", |env| DatabaseProperty::materialize(env, Kind::CreatedBy))
        .with("last_edited_time", |env| {
            DatabaseProperty::materialize(env, Kind::LastEditedTime)
        })
        .with("last_edited_by", |env| DatabaseProperty::materialize(env, Kind::LastEditedBy))
});

impl Discriminated for DatabaseProperty {
    fn registry() -> &'static Registry<Self> {
        &REGISTRY
    }

    fn tag(&self) -> &str {
        self.property_type.type_name()
    }

    fn encode(&self) -> Result<Value, EncodeError> {
        let tag = self.tag();
        let wire = WireObject::tagged(Self::TAG_FIELD, tag)
            .field("id", &self.id)?
            .optional("name", self.name.as_ref())?;
        let wire = match &self.property_type {
            DatabasePropertyType::Number { format } => wire.value(tag, json!({ "format": format })),
            DatabasePropertyType::Select { options }
            | DatabasePropertyType::MultiSelect { options } => {
                wire.value(tag, json!({ "options": options }))
            }
            DatabasePropertyType::Formula { expression } => {
                wire.value(tag, json!({ "expression": expression }))
            }
            DatabasePropertyType::Relation(relation) => wire.field(tag, relation)?,
            DatabasePropertyType::Rollup(rollup) => wire.field(tag, rollup)?,
            _ => wire.value(tag, json!({})),
        };
        Ok(wire.build())
    }
}

wire_serde!(DatabaseProperty);
