// src/codec/wire.rs
//! Write side of the codec: building envelope-shaped JSON objects.

use super::envelope::json_kind;
use crate::error::EncodeError;
use serde::Serialize;
use serde_json::{Map, Value};

/// Incrementally built JSON object.
///
/// Optional fields left as `None` and empty optional lists are omitted
/// entirely rather than written as `null` or `[]`.
#[derive(Debug, Default, Clone)]
pub struct WireObject {
    fields: Map<String, Value>,
}

impl WireObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts an envelope with its discriminant already written.
    pub fn tagged(tag_field: &str, tag: &str) -> Self {
        Self::new().value(tag_field, Value::String(tag.to_string()))
    }

    /// Merges a struct of shared envelope fields into the object.
    pub fn shared<S: Serialize>(mut self, shared: &S) -> Result<Self, EncodeError> {
        match serde_json::to_value(shared) {
            Ok(Value::Object(entries)) => {
                self.fields.extend(entries);
                Ok(self)
            }
            Ok(other) => Err(EncodeError::NotAnObject {
                found: json_kind(&other),
            }),
            Err(source) => Err(EncodeError::Field {
                field: "<envelope>".to_string(),
                source,
            }),
        }
    }

    pub fn field<P: Serialize + ?Sized>(mut self, key: &str, value: &P) -> Result<Self, EncodeError> {
        let encoded = serde_json::to_value(value).map_err(|source| EncodeError::Field {
            field: key.to_string(),
            source,
        })?;
        self.fields.insert(key.to_string(), encoded);
        Ok(self)
    }

    pub fn optional<P: Serialize>(self, key: &str, value: Option<&P>) -> Result<Self, EncodeError> {
        match value {
            Some(value) => self.field(key, value),
            None => Ok(self),
        }
    }

    pub fn non_empty<P: Serialize>(self, key: &str, values: &[P]) -> Result<Self, EncodeError> {
        if values.is_empty() {
            Ok(self)
        } else {
            self.field(key, values)
        }
    }

    /// Inserts an already encoded value.
    pub fn value(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[derive(Serialize)]
    struct Shared {
        id: &'static str,
    }

    #[test]
    fn builds_envelope_and_omits_absent_fields() {
        let none: Option<&String> = None;
        let wire = WireObject::tagged("type", "checkbox")
            .shared(&Shared { id: "abc" })
            .unwrap()
            .optional("name", none)
            .unwrap()
            .non_empty::<u8>("children", &[])
            .unwrap()
            .field("checkbox", &true)
            .unwrap()
            .build();

        assert_eq!(wire, json!({"type": "checkbox", "id": "abc", "checkbox": true}));
    }

    #[test]
    fn shared_fields_must_be_an_object() {
        let err = WireObject::new().shared(&42).unwrap_err();
        assert!(matches!(err, EncodeError::NotAnObject { found: "a number" }));
    }
}
