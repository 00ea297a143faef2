//! Field-level pieces of a schema descriptor: the `type` tag, the optional
//! `format` refinement, and the per-field [`FieldSpec`] record.
//!
//! The serialized forms mirror the generator's output exactly: `type` is a
//! bare string tag (`"number"`, `"string"`, `"boolean"`, or the name of
//! another schema), `isRequired` is mandatory, and `format` is omitted when
//! absent.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The `type` tag of a field or scalar definition.
///
/// Anything that is not one of the base primitive tags is a reference to
/// another named schema, resolved through a
/// [`SchemaRegistry`](crate::schema::registry::SchemaRegistry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// A JSON number.
    Number,
    /// A JSON string.
    String,
    /// A JSON boolean.
    Boolean,
    /// A reference to another named schema (e.g. `U64`, `RoleType`).
    Ref(String),
}

impl FieldType {
    /// Builds a reference tag naming another schema.
    pub fn reference<S: Into<String>>(name: S) -> Self {
        Self::Ref(name.into())
    }

    /// True for the base primitive tags, false for references.
    pub fn is_primitive(&self) -> bool {
        !matches!(self, Self::Ref(_))
    }

    /// The wire tag: the lowercase primitive name, or the referenced
    /// schema name verbatim.
    pub fn tag(&self) -> &str {
        match self {
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Ref(name) => name,
        }
    }

    /// Parses a wire tag. Empty tags are not a type.
    pub(crate) fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "" => None,
            "number" => Some(Self::Number),
            "string" => Some(Self::String),
            "boolean" => Some(Self::Boolean),
            other => Some(Self::Ref(other.to_string())),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl Serialize for FieldType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Self::from_tag(&tag).ok_or_else(|| D::Error::custom("field type tag cannot be empty"))
    }
}

/// Refinement hint on a primitive type: integer widths, floating point
/// widths, or the hex string encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldFormat {
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Int32,
    Int64,
    Float,
    Double,
    Hex,
}

impl FieldFormat {
    /// The lowercase wire tag.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float => "float",
            Self::Double => "double",
            Self::Hex => "hex",
        }
    }

    /// Whether this format can refine the given base type.
    ///
    /// Integer widths apply to numbers (range check) and to strings
    /// (string-encoded integer). `hex` applies to strings only, floating
    /// point widths to numbers only.
    pub(crate) fn compatible_with(&self, base: &FieldType) -> bool {
        match self {
            Self::Uint8 | Self::Uint16 | Self::Uint32 | Self::Uint64 | Self::Int32
            | Self::Int64 => matches!(base, FieldType::Number | FieldType::String),
            Self::Float | Self::Double => matches!(base, FieldType::Number),
            Self::Hex => matches!(base, FieldType::String),
        }
    }
}

impl fmt::Display for FieldFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// The contract of one named field within a descriptor: its type tag,
/// whether a conforming value must carry it, and an optional format
/// refinement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(rename = "isRequired")]
    pub is_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<FieldFormat>,
}

impl FieldSpec {
    /// A field that must be present in any conforming value.
    #[must_use]
    pub fn required(field_type: FieldType) -> Self {
        Self {
            field_type,
            is_required: true,
            format: None,
        }
    }

    /// A field a conforming value may omit.
    #[must_use]
    pub fn optional(field_type: FieldType) -> Self {
        Self {
            field_type,
            is_required: false,
            format: None,
        }
    }

    /// Attaches a format refinement.
    #[must_use]
    pub fn with_format(mut self, format: FieldFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Whether the type tag references another named schema.
    pub fn is_reference(&self) -> bool {
        !self.field_type.is_primitive()
    }
}
