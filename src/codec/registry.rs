// src/codec/registry.rs
//! Per-family dispatch tables from discriminant values to materializers.

use super::Envelope;
use crate::error::DecodeError;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// The polymorphic record families of the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Block,
    RichText,
    Mention,
    Property,
    PropertyValue,
    FormulaValue,
    RollupValue,
    Parent,
    Filter,
    FilterCondition,
    User,
    SearchableObject,
    List,
}

impl Family {
    pub fn as_str(&self) -> &'static str {
        match self {
            Family::Block => "block",
            Family::RichText => "rich text",
            Family::Mention => "mention",
            Family::Property => "property",
            Family::PropertyValue => "property value",
            Family::FormulaValue => "formula value",
            Family::RollupValue => "rollup value",
            Family::Parent => "parent",
            Family::Filter => "filter",
            Family::FilterCondition => "filter condition",
            Family::User => "user",
            Family::SearchableObject => "searchable object",
            Family::List => "list",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Builds a concrete variant from an envelope whose discriminant has already been read.
pub type Materializer<T> = fn(&Envelope<'_>) -> Result<T, DecodeError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("{family} variant '{discriminant}' is registered twice")]
    DuplicateVariant {
        family: Family,
        discriminant: &'static str,
    },
}

/// Mapping from discriminant value to materializer for one family.
///
/// Tables are built once, at first use, and never change afterwards.
pub struct Registry<T> {
    family: Family,
    variants: HashMap<&'static str, Materializer<T>>,
    fallback: Option<Materializer<T>>,
}

impl<T> Registry<T> {
    pub fn new(family: Family) -> Self {
        Self {
            family,
            variants: HashMap::new(),
            fallback: None,
        }
    }

    /// Registers the materializer for one discriminant value.
    pub fn register(
        &mut self,
        discriminant: &'static str,
        materializer: Materializer<T>,
    ) -> Result<(), RegistryError> {
        if self.variants.contains_key(discriminant) {
            return Err(RegistryError::DuplicateVariant {
                family: self.family,
                discriminant,
            });
        }
        self.variants.insert(discriminant, materializer);
        Ok(())
    }

    /// Builder form of [`Registry::register`] for static tables.
    ///
    /// # Panics
    ///
    /// Panics on a duplicate discriminant. A static table with two entries
    /// for one value is a bug, and it surfaces the first time the table is
    /// forced.
    pub fn with(mut self, discriminant: &'static str, materializer: Materializer<T>) -> Self {
        if let Err(err) = self.register(discriminant, materializer) {
            panic!("{}", err);
        }
        self
    }

    /// Materializer used for discriminants with no registered variant.
    pub fn with_fallback(mut self, materializer: Materializer<T>) -> Self {
        self.fallback = Some(materializer);
        self
    }

    pub fn family(&self) -> Family {
        self.family
    }

    pub fn lookup(&self, discriminant: &str) -> Option<Materializer<T>> {
        self.variants.get(discriminant).copied()
    }

    pub fn fallback(&self) -> Option<Materializer<T>> {
        self.fallback
    }

    pub fn contains(&self, discriminant: &str) -> bool {
        self.variants.contains_key(discriminant)
    }

    /// Registered discriminants, in no particular order.
    pub fn discriminants(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.variants.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

impl<T> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut discriminants: Vec<_> = self.discriminants().collect();
        discriminants.sort_unstable();
        f.debug_struct("Registry")
            .field("family", &self.family)
            .field("discriminants", &discriminants)
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}
