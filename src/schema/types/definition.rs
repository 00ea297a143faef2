//! Named schema definitions: what a registry name resolves to.
//!
//! A name is bound to one of three definition kinds, each with the wire
//! form the generator emits:
//! - object descriptors: `{"description": ..., "properties": {...}}` (no
//!   `type` key),
//! - scalar aliases: `{"type": "string", "format": ..., "description": ...}`,
//! - enums: `{"type": "enum", "variants": [...], "description": ...}`.
//!
//! Deserialization recognizes the kind by shape and rejects objects that
//! mix the forms.

use super::descriptor::SchemaDescriptor;
use super::errors::SchemaError;
use super::field::{FieldFormat, FieldSpec, FieldType};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};

/// A named alias of a primitive, such as `U64` (a string carrying a 64-bit
/// unsigned integer) or `HexEncodedBytes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarDef {
    pub description: Option<String>,
    pub base: FieldType,
    pub format: Option<FieldFormat>,
}

impl ScalarDef {
    #[must_use]
    pub fn new(base: FieldType) -> Self {
        Self {
            description: None,
            base,
            format: None,
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: FieldFormat) -> Self {
        self.format = Some(format);
        self
    }

    #[must_use]
    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A named closed set of string values, such as `RoleType`.
///
/// The variants travel in the definition itself: data-only consumers
/// cannot see the generator's host-language enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDef {
    pub description: Option<String>,
    pub variants: Vec<String>,
}

impl EnumDef {
    #[must_use]
    pub fn new<I, S>(variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            description: None,
            variants: variants.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn has_variant(&self, value: &str) -> bool {
        self.variants.iter().any(|v| v == value)
    }
}

/// What a registered schema name resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaDef {
    /// An object descriptor with named properties.
    Object(SchemaDescriptor),
    /// A scalar alias of a primitive.
    Scalar(ScalarDef),
    /// A closed set of string values.
    Enum(EnumDef),
}

impl SchemaDef {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Object(_) => "object",
            Self::Scalar(_) => "scalar",
            Self::Enum(_) => "enum",
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    pub fn is_enum(&self) -> bool {
        matches!(self, Self::Enum(_))
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Object(descriptor) => Some(descriptor.description.as_str()),
            Self::Scalar(scalar) => scalar.description.as_deref(),
            Self::Enum(en) => en.description.as_deref(),
        }
    }

    /// Distinct names of the schemas this definition references. Only
    /// object properties can carry references; scalar bases are primitive
    /// by validation.
    pub fn references(&self) -> Vec<&str> {
        match self {
            Self::Object(descriptor) => descriptor.references(),
            Self::Scalar(_) | Self::Enum(_) => Vec::new(),
        }
    }

    /// Structural validation applied before a definition enters a
    /// registry.
    ///
    /// # Errors
    /// Returns `SchemaError::InvalidDefinition` if the name is empty, an
    /// object has no properties or an empty property name, a format does
    /// not apply to its base type, a scalar base is not primitive, or an
    /// enum has no or duplicate variants.
    pub fn validate(&self, name: &str) -> Result<(), SchemaError> {
        if name.is_empty() {
            return Err(SchemaError::InvalidDefinition(
                "schema name cannot be empty".to_string(),
            ));
        }

        match self {
            Self::Object(descriptor) => {
                if descriptor.properties.is_empty() {
                    return Err(SchemaError::InvalidDefinition(format!(
                        "schema '{name}' must define at least one property"
                    )));
                }
                for (field, spec) in &descriptor.properties {
                    if field.is_empty() {
                        return Err(SchemaError::InvalidDefinition(format!(
                            "schema '{name}' has a property with an empty name"
                        )));
                    }
                    if let Some(format) = spec.format {
                        if !format.compatible_with(&spec.field_type) {
                            return Err(SchemaError::InvalidDefinition(format!(
                                "schema '{name}' field '{field}': format '{format}' cannot refine type '{}'",
                                spec.field_type
                            )));
                        }
                    }
                }
            }
            Self::Scalar(scalar) => {
                if !scalar.base.is_primitive() {
                    return Err(SchemaError::InvalidDefinition(format!(
                        "schema '{name}': scalar base must be a primitive type tag, got '{}'",
                        scalar.base
                    )));
                }
                if let Some(format) = scalar.format {
                    if !format.compatible_with(&scalar.base) {
                        return Err(SchemaError::InvalidDefinition(format!(
                            "schema '{name}': format '{format}' cannot refine type '{}'",
                            scalar.base
                        )));
                    }
                }
            }
            Self::Enum(en) => {
                if en.variants.is_empty() {
                    return Err(SchemaError::InvalidDefinition(format!(
                        "schema '{name}': enum must define at least one variant"
                    )));
                }
                let mut seen = BTreeSet::new();
                for variant in &en.variants {
                    if variant.is_empty() {
                        return Err(SchemaError::InvalidDefinition(format!(
                            "schema '{name}': enum variant cannot be empty"
                        )));
                    }
                    if !seen.insert(variant.as_str()) {
                        return Err(SchemaError::InvalidDefinition(format!(
                            "schema '{name}': duplicate enum variant '{variant}'"
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

impl From<SchemaDescriptor> for SchemaDef {
    fn from(descriptor: SchemaDescriptor) -> Self {
        Self::Object(descriptor)
    }
}

impl From<ScalarDef> for SchemaDef {
    fn from(scalar: ScalarDef) -> Self {
        Self::Scalar(scalar)
    }
}

impl From<EnumDef> for SchemaDef {
    fn from(en: EnumDef) -> Self {
        Self::Enum(en)
    }
}

impl Serialize for SchemaDef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Object(descriptor) => descriptor.serialize(serializer),
            Self::Scalar(scalar) => {
                #[derive(Serialize)]
                struct ScalarWire<'a> {
                    #[serde(rename = "type")]
                    base: &'a FieldType,
                    #[serde(skip_serializing_if = "Option::is_none")]
                    format: Option<FieldFormat>,
                    #[serde(skip_serializing_if = "Option::is_none")]
                    description: Option<&'a str>,
                }

                ScalarWire {
                    base: &scalar.base,
                    format: scalar.format,
                    description: scalar.description.as_deref(),
                }
                .serialize(serializer)
            }
            Self::Enum(en) => {
                #[derive(Serialize)]
                struct EnumWire<'a> {
                    #[serde(rename = "type")]
                    kind: &'static str,
                    variants: &'a [String],
                    #[serde(skip_serializing_if = "Option::is_none")]
                    description: Option<&'a str>,
                }

                EnumWire {
                    kind: "enum",
                    variants: &en.variants,
                    description: en.description.as_deref(),
                }
                .serialize(serializer)
            }
        }
    }
}

impl<'de> Deserialize<'de> for SchemaDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            description: Option<String>,
            properties: Option<BTreeMap<String, FieldSpec>>,
            #[serde(rename = "type")]
            type_tag: Option<String>,
            format: Option<FieldFormat>,
            variants: Option<Vec<String>>,
        }

        let helper = Helper::deserialize(deserializer)?;

        if let Some(properties) = helper.properties {
            if helper.type_tag.is_some() || helper.variants.is_some() || helper.format.is_some() {
                return Err(D::Error::custom(
                    "ambiguous schema definition: object form cannot carry `type`, `format`, or `variants`",
                ));
            }
            let description = helper.description.ok_or_else(|| {
                D::Error::custom("object schema definition requires a `description`")
            })?;
            return Ok(Self::Object(SchemaDescriptor {
                description,
                properties,
            }));
        }

        match helper.type_tag.as_deref() {
            Some("enum") => {
                if helper.format.is_some() {
                    return Err(D::Error::custom("`format` does not apply to enum definitions"));
                }
                let variants = helper.variants.ok_or_else(|| {
                    D::Error::custom("enum schema definition requires `variants`")
                })?;
                Ok(Self::Enum(EnumDef {
                    description: helper.description,
                    variants,
                }))
            }
            Some(tag) => {
                if helper.variants.is_some() {
                    return Err(D::Error::custom(
                        "ambiguous schema definition: `variants` requires type `enum`",
                    ));
                }
                let base = FieldType::from_tag(tag).ok_or_else(|| {
                    D::Error::custom("schema definition type tag cannot be empty")
                })?;
                Ok(Self::Scalar(ScalarDef {
                    description: helper.description,
                    base,
                    format: helper.format,
                }))
            }
            None => Err(D::Error::custom(
                "unrecognizable schema definition: expected `properties` or `type`",
            )),
        }
    }
}
