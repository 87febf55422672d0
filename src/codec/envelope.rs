// src/codec/envelope.rs
//! Read side of the codec: the discriminant peek and typed field access.
//!
//! Decoding works over an already-parsed [`serde_json::Value`]. Phase one
//! ([`Envelope::peek`]) reads nothing but the discriminant; phase two hands
//! the same borrowed object to a materializer, which pulls its fields out
//! through [`Fields`]. Every accessor reports failures with the family,
//! discriminant and field name so a bad record can be located in a large
//! response.

use super::{Family, WireFormat};
use crate::error::DecodeError;
use crate::types::PropertyName;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// A JSON object being decoded, tagged with where it sits.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    family: Family,
    tag: &'a str,
    raw: &'a Value,
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    /// Views `raw` as an object belonging to `family`.
    ///
    /// `tag` names the record in error messages; for enveloped records it is
    /// the discriminant, for plain records a fixed label such as `"page"`.
    pub fn of(raw: &'a Value, family: Family, tag: &'a str) -> Result<Self, DecodeError> {
        let map = raw
            .as_object()
            .ok_or_else(|| DecodeError::MalformedEnvelope {
                family,
                reason: format!("expected a JSON object, found {}", json_kind(raw)),
            })?;
        Ok(Self {
            family,
            tag,
            raw,
            map,
        })
    }

    pub fn family(&self) -> Family {
        self.family
    }

    /// The whole object, for materializers that hand it on unchanged.
    pub fn raw(&self) -> &'a Value {
        self.raw
    }

    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Required field. A present `null` is handed to `P`, so `Option<_>`
    /// payloads accept it.
    pub fn get<P: DeserializeOwned>(&self, key: &str) -> Result<P, DecodeError> {
        let value = self.required(key)?;
        self.convert(key, value)
    }

    /// Optional field; absent and `null` both read as `None`.
    pub fn optional<P: DeserializeOwned>(&self, key: &str) -> Result<Option<P>, DecodeError> {
        match self.present(key) {
            Some(value) => self.convert(key, value).map(Some),
            None => Ok(None),
        }
    }

    /// Required nested object.
    pub fn object(&self, key: &str) -> Result<Fields<'a>, DecodeError> {
        let value = self.required(key)?;
        if !value.is_object() {
            return Err(self.unexpected(key, "an object"));
        }
        Fields::of(value, self.family, self.tag)
    }

    /// Required nested object; absent or `null` reads as `None`.
    pub fn optional_object(&self, key: &str) -> Result<Option<Fields<'a>>, DecodeError> {
        match self.present(key) {
            Some(value) if value.is_object() => Fields::of(value, self.family, self.tag).map(Some),
            Some(_) => Err(self.unexpected(key, "an object")),
            None => Ok(None),
        }
    }

    /// Required nested record, decoded through its own family.
    pub fn nested<T: WireFormat>(&self, key: &str) -> Result<T, DecodeError> {
        T::from_wire(self.required(key)?)
    }

    /// Nested record that may be absent or `null`.
    pub fn optional_nested<T: WireFormat>(&self, key: &str) -> Result<Option<T>, DecodeError> {
        self.present(key).map(T::from_wire).transpose()
    }

    /// Required array of records. Order is preserved and the first element
    /// that fails to decode fails the whole list.
    pub fn list<T: WireFormat>(&self, key: &str) -> Result<Vec<T>, DecodeError> {
        let value = self.required(key)?;
        self.decode_array(key, value)
    }

    /// Array of records that may be absent or `null`.
    pub fn list_or_empty<T: WireFormat>(&self, key: &str) -> Result<Vec<T>, DecodeError> {
        match self.present(key) {
            Some(value) => self.decode_array(key, value),
            None => Ok(Vec::new()),
        }
    }

    /// Object of records keyed by property name, in wire order.
    /// Absent or `null` reads as an empty map.
    pub fn keyed<T: WireFormat>(
        &self,
        key: &str,
    ) -> Result<IndexMap<PropertyName, T>, DecodeError> {
        let Some(value) = self.present(key) else {
            return Ok(IndexMap::new());
        };
        let entries = value
            .as_object()
            .ok_or_else(|| self.unexpected(key, "an object"))?;
        entries
            .iter()
            .map(|(name, entry)| Ok((PropertyName::new(name.as_str()), T::from_wire(entry)?)))
            .collect()
    }

    /// Reads the whole object as a plain serde struct, typically the shared
    /// envelope fields. Keys the struct does not name are ignored.
    pub fn shape<S: DeserializeOwned>(&self) -> Result<S, DecodeError> {
        S::deserialize(self.raw).map_err(|source| DecodeError::MalformedField {
            family: self.family,
            tag: self.tag.to_string(),
            field: "<envelope>".to_string(),
            source,
        })
    }

    fn present(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|value| !value.is_null())
    }

    fn required(&self, key: &str) -> Result<&'a Value, DecodeError> {
        self.map.get(key).ok_or_else(|| DecodeError::MissingField {
            family: self.family,
            tag: self.tag.to_string(),
            field: key.to_string(),
        })
    }

    fn convert<P: DeserializeOwned>(&self, key: &str, value: &'a Value) -> Result<P, DecodeError> {
        P::deserialize(value).map_err(|source| DecodeError::MalformedField {
            family: self.family,
            tag: self.tag.to_string(),
            field: key.to_string(),
            source,
        })
    }

    fn decode_array<T: WireFormat>(&self, key: &str, value: &Value) -> Result<Vec<T>, DecodeError> {
        value
            .as_array()
            .ok_or_else(|| self.unexpected(key, "an array"))?
            .iter()
            .map(T::from_wire)
            .collect()
    }

    fn unexpected(&self, key: &str, expected: &'static str) -> DecodeError {
        DecodeError::UnexpectedShape {
            family: self.family,
            tag: self.tag.to_string(),
            field: key.to_string(),
            expected,
        }
    }
}

/// A record whose discriminant has been read but whose payload has not.
#[derive(Debug, Clone, Copy)]
pub struct Envelope<'a> {
    tag: &'a str,
    fields: Fields<'a>,
}

impl<'a> Envelope<'a> {
    /// Phase one of decoding: read the discriminant stored under `tag_field`.
    pub fn peek(raw: &'a Value, family: Family, tag_field: &str) -> Result<Self, DecodeError> {
        let map = raw
            .as_object()
            .ok_or_else(|| DecodeError::MalformedEnvelope {
                family,
                reason: format!("expected a JSON object, found {}", json_kind(raw)),
            })?;
        let tag = match map.get(tag_field) {
            Some(Value::String(tag)) => tag.as_str(),
            Some(other) => {
                return Err(DecodeError::MalformedEnvelope {
                    family,
                    reason: format!(
                        "discriminant '{}' must be a string, found {}",
                        tag_field,
                        json_kind(other)
                    ),
                })
            }
            None => {
                return Err(DecodeError::MalformedEnvelope {
                    family,
                    reason: format!("missing discriminant '{}'", tag_field),
                })
            }
        };
        Ok(Self {
            tag,
            fields: Fields {
                family,
                tag,
                raw,
                map,
            },
        })
    }

    /// Phase one for records discriminated by which key is present.
    ///
    /// The discriminant is the single key not listed in `shared`; zero or
    /// several candidates is a malformed envelope.
    pub fn peek_key(raw: &'a Value, family: Family, shared: &[&str]) -> Result<Self, DecodeError> {
        let map = raw
            .as_object()
            .ok_or_else(|| DecodeError::MalformedEnvelope {
                family,
                reason: format!("expected a JSON object, found {}", json_kind(raw)),
            })?;
        let mut candidates = map.keys().filter(|key| !shared.contains(&key.as_str()));
        let tag = match (candidates.next(), candidates.next()) {
            (Some(tag), None) => tag.as_str(),
            (None, _) => {
                return Err(DecodeError::MalformedEnvelope {
                    family,
                    reason: "no discriminating key present".to_string(),
                })
            }
            (Some(first), Some(second)) => {
                return Err(DecodeError::MalformedEnvelope {
                    family,
                    reason: format!(
                        "expected exactly one discriminating key, found '{}' and '{}'",
                        first, second
                    ),
                })
            }
        };
        Ok(Self {
            tag,
            fields: Fields {
                family,
                tag,
                raw,
                map,
            },
        })
    }

    /// The discriminant value as it appeared on the wire.
    pub fn tag(&self) -> &'a str {
        self.tag
    }

    pub fn family(&self) -> Family {
        self.fields.family
    }

    /// All fields of the record, envelope and payload alike.
    pub fn fields(&self) -> &Fields<'a> {
        &self.fields
    }

    /// Shared envelope fields as a serde struct.
    pub fn shared<S: DeserializeOwned>(&self) -> Result<S, DecodeError> {
        self.fields.shape()
    }

    /// The payload object stored under the discriminant key.
    pub fn payload(&self) -> Result<Fields<'a>, DecodeError> {
        self.fields.object(self.tag)
    }

    /// The payload stored under the discriminant key, as a plain value.
    pub fn value<P: DeserializeOwned>(&self) -> Result<P, DecodeError> {
        self.fields.get(self.tag)
    }

    /// The payload stored under the discriminant key, as a nested record.
    pub fn nested<T: WireFormat>(&self) -> Result<T, DecodeError> {
        self.fields.nested(self.tag)
    }

    /// The payload stored under the discriminant key, as a list of records.
    pub fn list<T: WireFormat>(&self) -> Result<Vec<T>, DecodeError> {
        self.fields.list(self.tag)
    }
}

pub(super) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn peek_reads_discriminant() {
        let raw = json!({"type": "heading_2", "heading_2": {"text": []}});
        let envelope = Envelope::peek(&raw, Family::Block, "type").unwrap();
        assert_eq!(envelope.tag(), "heading_2");
        assert_eq!(envelope.family(), Family::Block);
        assert!(envelope.payload().unwrap().contains("text"));
    }

    #[test]
    fn peek_rejects_missing_or_non_string_discriminant() {
        let missing = json!({"heading_2": {}});
        let err = Envelope::peek(&missing, Family::Block, "type").unwrap_err();
        assert!(matches!(err, DecodeError::MalformedEnvelope { .. }));
        assert!(err.to_string().contains("missing discriminant 'type'"));

        let numeric = json!({"type": 7});
        let err = Envelope::peek(&numeric, Family::User, "type").unwrap_err();
        assert!(err.to_string().contains("must be a string, found a number"));

        let not_object = json!(["type"]);
        let err = Envelope::peek(&not_object, Family::Parent, "type").unwrap_err();
        assert!(err.to_string().contains("found an array"));
    }

    #[test]
    fn peek_key_finds_the_single_condition_key() {
        let raw = json!({"property": "In stock", "checkbox": {"equals": true}});
        let envelope = Envelope::peek_key(&raw, Family::FilterCondition, &["property"]).unwrap();
        assert_eq!(envelope.tag(), "checkbox");
        assert_eq!(envelope.fields().get::<String>("property").unwrap(), "In stock");

        let ambiguous = json!({"property": "x", "checkbox": {}, "number": {}});
        assert!(Envelope::peek_key(&ambiguous, Family::FilterCondition, &["property"]).is_err());

        let empty = json!({"property": "x"});
        assert!(Envelope::peek_key(&empty, Family::FilterCondition, &["property"]).is_err());
    }

    #[test]
    fn field_errors_name_their_location() {
        let raw = json!({"type": "number", "number": "forty"});
        let envelope = Envelope::peek(&raw, Family::PropertyValue, "type").unwrap();

        let err = envelope.value::<Option<f64>>().unwrap_err();
        assert!(matches!(
            &err,
            DecodeError::MalformedField { field, tag, .. } if field == "number" && tag == "number"
        ));

        let err = envelope.fields().get::<String>("id").unwrap_err();
        assert!(matches!(err, DecodeError::MissingField { .. }));
    }

    #[test]
    fn optional_treats_null_as_absent() {
        let raw = json!({"a": null, "b": "x"});
        let fields = Fields::of(&raw, Family::List, "list").unwrap();
        assert_eq!(fields.optional::<String>("a").unwrap(), None);
        assert_eq!(fields.optional::<String>("b").unwrap(), Some("x".to_string()));
        assert_eq!(fields.optional::<String>("c").unwrap(), None);
        assert!(fields.optional_object("a").unwrap().is_none());
    }

    #[test]
    fn present_null_reaches_nullable_payloads() {
        let raw = json!({"type": "number", "number": null});
        let envelope = Envelope::peek(&raw, Family::PropertyValue, "type").unwrap();
        assert_eq!(envelope.value::<Option<f64>>().unwrap(), None);
    }
}
