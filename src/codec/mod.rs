// src/codec/mod.rs
//! Discriminated-union codec for the Notion wire format.
//!
//! Most API records share one shape: an envelope with a discriminant field
//! (usually `"type"`) and a payload stored under the key named by the
//! discriminant. Each family of such records has a [`Registry`] mapping
//! discriminant values to materializers, and decoding runs in two phases:
//!
//! 1. [`Envelope::peek`] reads the discriminant from the parsed value;
//! 2. the registered materializer builds the concrete variant from the same
//!    parsed value, recursing through [`Fields`] for nested records.
//!
//! Encoding is the mirror image: every variant writes its discriminant and
//! payload through a [`WireObject`], and `decode(encode(v)) == v`.

mod envelope;
mod registry;
mod wire;

pub use envelope::{Envelope, Fields};
pub use registry::{Family, Materializer, Registry, RegistryError};
pub use wire::WireObject;

use crate::error::{DecodeError, EncodeError};
use serde_json::Value;

/// A type with a JSON wire representation.
pub trait WireFormat: Sized {
    fn from_wire(raw: &Value) -> Result<Self, DecodeError>;

    fn to_wire(&self) -> Result<Value, EncodeError>;
}

/// A closed family of variants told apart by a discriminant field.
pub trait Discriminated: Sized + 'static {
    /// Name of the field holding the discriminant.
    const TAG_FIELD: &'static str = "type";

    /// The family's dispatch table.
    fn registry() -> &'static Registry<Self>;

    /// The discriminant this value encodes with.
    fn tag(&self) -> &str;

    fn encode(&self) -> Result<Value, EncodeError>;
}

impl<T: Discriminated> WireFormat for T {
    fn from_wire(raw: &Value) -> Result<Self, DecodeError> {
        decode(raw)
    }

    fn to_wire(&self) -> Result<Value, EncodeError> {
        self.encode()
    }
}

/// Decodes one record of a discriminated family from parsed JSON.
pub fn decode<T: Discriminated>(raw: &Value) -> Result<T, DecodeError> {
    let registry = T::registry();
    let envelope = Envelope::peek(raw, registry.family(), T::TAG_FIELD)?;
    materialize(registry, &envelope)
}

/// Phase two: dispatch a peeked envelope to its materializer.
///
/// Unregistered discriminants go to the family's fallback when it has one
/// and are reported as [`DecodeError::UnknownType`] otherwise.
pub fn materialize<T>(registry: &Registry<T>, envelope: &Envelope<'_>) -> Result<T, DecodeError> {
    if let Some(materializer) = registry.lookup(envelope.tag()) {
        return materializer(envelope);
    }
    match registry.fallback() {
        Some(fallback) => {
            log::debug!(
                "No {} variant registered for '{}', using fallback",
                registry.family(),
                envelope.tag()
            );
            fallback(envelope)
        }
        None => Err(DecodeError::UnknownType {
            family: registry.family(),
            discriminant: envelope.tag().to_string(),
        }),
    }
}

/// Parses raw bytes once, then decodes them.
pub fn decode_slice<T: WireFormat>(bytes: &[u8]) -> Result<T, DecodeError> {
    let raw: Value = serde_json::from_slice(bytes).map_err(DecodeError::InvalidJson)?;
    T::from_wire(&raw)
}

pub fn encode<T: WireFormat>(value: &T) -> Result<Value, EncodeError> {
    value.to_wire()
}

/// Implements `Serialize`/`Deserialize` for wire types by delegating to
/// their [`WireFormat`] impl, so they nest inside ordinary serde structs.
macro_rules! wire_serde {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl serde::Serialize for $ty {
                fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    let value = $crate::codec::WireFormat::to_wire(self)
                        .map_err(serde::ser::Error::custom)?;
                    serde::Serialize::serialize(&value, serializer)
                }
            }

            impl<'de> serde::Deserialize<'de> for $ty {
                fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    let raw = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
                    <$ty as $crate::codec::WireFormat>::from_wire(&raw)
                        .map_err(serde::de::Error::custom)
                }
            }
        )+
    };
}

pub(crate) use wire_serde;
