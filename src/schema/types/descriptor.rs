use super::field::{FieldSpec, FieldType};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// An immutable record describing the field contract of one response
/// object. Field names are unique by construction; iteration order is
/// deterministic so serialized descriptors can be diffed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDescriptor {
    pub description: String,
    pub properties: BTreeMap<String, FieldSpec>,
}

impl SchemaDescriptor {
    #[must_use]
    pub fn new<S: Into<String>>(description: S) -> Self {
        Self {
            description: description.into(),
            properties: BTreeMap::new(),
        }
    }

    /// Adds a property, replacing any previous spec under the same name.
    #[must_use]
    pub fn with_property<S: Into<String>>(mut self, name: S, spec: FieldSpec) -> Self {
        self.properties.insert(name.into(), spec);
        self
    }

    pub fn property(&self, name: &str) -> Option<&FieldSpec> {
        self.properties.get(name)
    }

    /// All property names, in deterministic order.
    pub fn property_names(&self) -> Vec<&str> {
        self.properties.keys().map(String::as_str).collect()
    }

    /// Names of the properties a conforming value must carry.
    pub fn required_property_names(&self) -> Vec<&str> {
        self.properties
            .iter()
            .filter(|(_, spec)| spec.is_required)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Distinct names of every schema this descriptor references through
    /// its property type tags, in deterministic order.
    pub fn references(&self) -> Vec<&str> {
        let mut names = BTreeSet::new();
        for spec in self.properties.values() {
            if let FieldType::Ref(name) = &spec.field_type {
                names.insert(name.as_str());
            }
        }
        names.into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
