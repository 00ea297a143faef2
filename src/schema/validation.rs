//! Payload validation against registered schema definitions.
//!
//! `PayloadValidator` is the in-crate consumer of descriptors: it walks a
//! candidate `serde_json::Value` against a registered definition and
//! reports the first violation. References resolve through the registry
//! the validator borrows, so `U64` fields are checked against the `U64`
//! alias actually registered, not against a hard-coded notion of it.

use super::registry::{Resolution, SchemaRegistry};
use super::types::{
    EnumDef, FieldFormat, FieldSpec, FieldType, SchemaDef, SchemaDescriptor, SchemaError,
    SchemaResult, ValidationError,
};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static HEX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(0x)?[0-9a-fA-F]+$").expect("hex pattern is valid"));

/// Knobs for how strictly a payload is held to its descriptor.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationOptions {
    /// Reject payload keys the descriptor does not name. The default is
    /// to ignore them, mirroring generated-client behavior.
    pub deny_unknown_fields: bool,
}

impl ValidationOptions {
    #[must_use]
    pub fn strict() -> Self {
        Self {
            deny_unknown_fields: true,
        }
    }
}

/// Applies registered definitions to candidate payloads.
pub struct PayloadValidator<'a> {
    registry: &'a SchemaRegistry,
    options: ValidationOptions,
}

impl<'a> PayloadValidator<'a> {
    #[must_use]
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self {
            registry,
            options: ValidationOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ValidationOptions) -> Self {
        self.options = options;
        self
    }

    /// Validates `payload` against the definition registered under
    /// `schema_name`.
    ///
    /// # Errors
    /// Returns `SchemaError::NotFound` if the name (or a reference
    /// reached while walking) has no definition, and
    /// `SchemaError::Validation` for payload violations. Error paths are
    /// dotted from the root; direct scalar and enum validation uses the
    /// path `value`.
    pub fn validate(&self, schema_name: &str, payload: &Value) -> SchemaResult<()> {
        let def = self
            .registry
            .get(schema_name)
            .ok_or_else(|| SchemaError::NotFound(schema_name.to_string()))?;
        let root_path = match def {
            SchemaDef::Object(_) => "",
            SchemaDef::Scalar(_) | SchemaDef::Enum(_) => "value",
        };
        match self.check_definition(schema_name, &def, root_path, payload) {
            Ok(()) => Ok(()),
            Err(err) => {
                debug!("Payload rejected by schema '{schema_name}': {err}");
                Err(err)
            }
        }
    }

    fn check_definition(
        &self,
        schema: &str,
        def: &SchemaDef,
        path: &str,
        value: &Value,
    ) -> SchemaResult<()> {
        match def {
            SchemaDef::Object(descriptor) => self.check_object(schema, descriptor, path, value),
            SchemaDef::Scalar(scalar) => {
                self.check_primitive(schema, path, &scalar.base, scalar.format, value)
            }
            SchemaDef::Enum(en) => self.check_enum(schema, path, en, value),
        }
    }

    fn check_object(
        &self,
        schema: &str,
        descriptor: &SchemaDescriptor,
        path: &str,
        value: &Value,
    ) -> SchemaResult<()> {
        let Value::Object(map) = value else {
            return Err(ValidationError::UnexpectedType {
                schema: schema.to_string(),
                field: object_path(path),
                expected: "object".to_string(),
                actual: json_kind(value).to_string(),
            }
            .into());
        };

        for (field, spec) in &descriptor.properties {
            let field_path = join_path(path, field);
            match map.get(field) {
                None if spec.is_required => {
                    return Err(ValidationError::MissingField {
                        schema: schema.to_string(),
                        field: field_path,
                    }
                    .into());
                }
                None => {}
                // Present but null is a type violation, not absence.
                Some(field_value) => self.check_spec(schema, spec, &field_path, field_value)?,
            }
        }

        if self.options.deny_unknown_fields {
            for key in map.keys() {
                if descriptor.property(key).is_none() {
                    return Err(ValidationError::UnknownField {
                        schema: schema.to_string(),
                        field: join_path(path, key),
                    }
                    .into());
                }
            }
        }

        Ok(())
    }

    fn check_spec(
        &self,
        schema: &str,
        spec: &FieldSpec,
        path: &str,
        value: &Value,
    ) -> SchemaResult<()> {
        match self.registry.resolve(&spec.field_type)? {
            Resolution::Primitive(base) => {
                self.check_primitive(schema, path, &base, spec.format, value)
            }
            Resolution::Named { def, .. } => self.check_definition(schema, &def, path, value),
        }
    }

    fn check_primitive(
        &self,
        schema: &str,
        path: &str,
        base: &FieldType,
        format: Option<FieldFormat>,
        value: &Value,
    ) -> SchemaResult<()> {
        match base {
            FieldType::Number => {
                let Value::Number(number) = value else {
                    return Err(self.type_mismatch(schema, path, "number", value));
                };
                if let Some(format) = format {
                    if !number_satisfies(format, number) {
                        return Err(ValidationError::InvalidFormat {
                            schema: schema.to_string(),
                            field: path.to_string(),
                            format,
                            value: number.to_string(),
                        }
                        .into());
                    }
                }
            }
            FieldType::String => {
                let Value::String(text) = value else {
                    return Err(self.type_mismatch(schema, path, "string", value));
                };
                if let Some(format) = format {
                    if !string_satisfies(format, text) {
                        return Err(ValidationError::InvalidFormat {
                            schema: schema.to_string(),
                            field: path.to_string(),
                            format,
                            value: Value::String(text.clone()).to_string(),
                        }
                        .into());
                    }
                }
            }
            FieldType::Boolean => {
                if !value.is_boolean() {
                    return Err(self.type_mismatch(schema, path, "boolean", value));
                }
            }
            // Registration keeps scalar bases primitive; a reference here
            // means the registry was bypassed.
            FieldType::Ref(name) => {
                return Err(SchemaError::Internal(format!(
                    "scalar base resolved to reference '{name}'"
                )));
            }
        }
        Ok(())
    }

    fn check_enum(
        &self,
        schema: &str,
        path: &str,
        en: &EnumDef,
        value: &Value,
    ) -> SchemaResult<()> {
        let Value::String(text) = value else {
            return Err(self.type_mismatch(schema, path, "string", value));
        };
        if en.has_variant(text) {
            Ok(())
        } else {
            Err(ValidationError::UnknownVariant {
                schema: schema.to_string(),
                field: path.to_string(),
                value: text.clone(),
            }
            .into())
        }
    }

    fn type_mismatch(
        &self,
        schema: &str,
        path: &str,
        expected: &str,
        actual: &Value,
    ) -> SchemaError {
        ValidationError::UnexpectedType {
            schema: schema.to_string(),
            field: path.to_string(),
            expected: expected.to_string(),
            actual: json_kind(actual).to_string(),
        }
        .into()
    }
}

impl SchemaRegistry {
    /// Borrows a validator over this registry with default options.
    #[must_use]
    pub fn validator(&self) -> PayloadValidator<'_> {
        PayloadValidator::new(self)
    }

    /// Borrows a validator over this registry with explicit options.
    #[must_use]
    pub fn validator_with(&self, options: ValidationOptions) -> PayloadValidator<'_> {
        PayloadValidator::new(self).with_options(options)
    }
}

fn number_satisfies(format: FieldFormat, number: &serde_json::Number) -> bool {
    match format {
        FieldFormat::Uint8 => number.as_u64().map_or(false, |n| n <= u64::from(u8::MAX)),
        FieldFormat::Uint16 => number.as_u64().map_or(false, |n| n <= u64::from(u16::MAX)),
        FieldFormat::Uint32 => number.as_u64().map_or(false, |n| n <= u64::from(u32::MAX)),
        FieldFormat::Uint64 => number.as_u64().is_some(),
        FieldFormat::Int32 => number.as_i64().map_or(false, |n| i32::try_from(n).is_ok()),
        FieldFormat::Int64 => number.as_i64().is_some(),
        FieldFormat::Float | FieldFormat::Double => true,
        FieldFormat::Hex => false,
    }
}

fn string_satisfies(format: FieldFormat, text: &str) -> bool {
    match format {
        FieldFormat::Uint8 => digits_parse::<u8>(text),
        FieldFormat::Uint16 => digits_parse::<u16>(text),
        FieldFormat::Uint32 => digits_parse::<u32>(text),
        FieldFormat::Uint64 => digits_parse::<u64>(text),
        FieldFormat::Int32 => signed_digits_parse::<i32>(text),
        FieldFormat::Int64 => signed_digits_parse::<i64>(text),
        FieldFormat::Hex => HEX_RE.is_match(text),
        FieldFormat::Float | FieldFormat::Double => false,
    }
}

// Digits only: no sign, no whitespace, no leading `+` (which `parse`
// would otherwise admit). Parsing then enforces the width.
fn digits_parse<T: std::str::FromStr>(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) && text.parse::<T>().is_ok()
}

fn signed_digits_parse<T: std::str::FromStr>(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && text.parse::<T>().is_ok()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn join_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{prefix}.{field}")
    }
}

fn object_path(path: &str) -> String {
    if path.is_empty() {
        "value".to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::ScalarDef;
    use serde_json::json;

    fn ledger_registry() -> SchemaRegistry {
        let registry = SchemaRegistry::new();
        registry
            .register(
                "U64",
                SchemaDef::Scalar(
                    ScalarDef::new(FieldType::String).with_format(FieldFormat::Uint64),
                ),
            )
            .unwrap();
        registry
            .register(
                "RoleType",
                SchemaDef::Enum(EnumDef::new(["validator", "full_node"])),
            )
            .unwrap();
        registry
            .register(
                "LedgerInfo",
                SchemaDef::Object(
                    SchemaDescriptor::new("Ledger info.")
                        .with_property(
                            "chain_id",
                            FieldSpec::required(FieldType::Number).with_format(FieldFormat::Uint8),
                        )
                        .with_property("epoch", FieldSpec::required(FieldType::reference("U64")))
                        .with_property(
                            "node_role",
                            FieldSpec::required(FieldType::reference("RoleType")),
                        )
                        .with_property("note", FieldSpec::optional(FieldType::String)),
                ),
            )
            .unwrap();
        registry
    }

    fn good_payload() -> Value {
        json!({
            "chain_id": 4,
            "epoch": "1",
            "node_role": "full_node"
        })
    }

    fn violation(err: SchemaError) -> ValidationError {
        match err {
            SchemaError::Validation(inner) => inner,
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn test_accepts_conforming_payload() {
        let registry = ledger_registry();
        assert!(registry
            .validator()
            .validate("LedgerInfo", &good_payload())
            .is_ok());
    }

    #[test]
    fn test_missing_required_field() {
        let registry = ledger_registry();
        let mut payload = good_payload();
        payload.as_object_mut().unwrap().remove("epoch");
        let err = registry
            .validator()
            .validate("LedgerInfo", &payload)
            .unwrap_err();
        assert_eq!(
            violation(err),
            ValidationError::MissingField {
                schema: "LedgerInfo".to_string(),
                field: "epoch".to_string(),
            }
        );
    }

    #[test]
    fn test_null_fails_type_check() {
        let registry = ledger_registry();
        let mut payload = good_payload();
        payload["epoch"] = Value::Null;
        let err = registry
            .validator()
            .validate("LedgerInfo", &payload)
            .unwrap_err();
        assert!(matches!(
            violation(err),
            ValidationError::UnexpectedType { field, actual, .. }
                if field == "epoch" && actual == "null"
        ));
    }

    #[test]
    fn test_optional_field_may_be_absent() {
        let registry = ledger_registry();
        let payload = good_payload();
        assert!(payload.get("note").is_none());
        assert!(registry.validator().validate("LedgerInfo", &payload).is_ok());
    }

    #[test]
    fn test_u64_string_refinement() {
        let registry = ledger_registry();
        let validator = registry.validator();

        for good in ["0", "1", "18446744073709551615"] {
            assert!(validator.validate("U64", &json!(good)).is_ok(), "{good}");
        }
        for bad in ["", "-1", "+1", "abc", "1.5", " 1", "18446744073709551616"] {
            let err = validator.validate("U64", &json!(bad)).unwrap_err();
            assert!(
                matches!(
                    violation(err),
                    ValidationError::InvalidFormat { field, .. } if field == "value"
                ),
                "{bad:?} should fail the uint64 refinement"
            );
        }

        let err = validator.validate("U64", &json!(7)).unwrap_err();
        assert!(matches!(
            violation(err),
            ValidationError::UnexpectedType { expected, .. } if expected == "string"
        ));
    }

    #[test]
    fn test_uint8_range_on_numbers() {
        let registry = ledger_registry();
        let validator = registry.validator();

        for good in [0, 4, 255] {
            let mut payload = good_payload();
            payload["chain_id"] = json!(good);
            assert!(validator.validate("LedgerInfo", &payload).is_ok(), "{good}");
        }
        for bad in [json!(256), json!(-1), json!(1.5)] {
            let mut payload = good_payload();
            payload["chain_id"] = bad.clone();
            let err = validator.validate("LedgerInfo", &payload).unwrap_err();
            assert!(
                matches!(
                    violation(err),
                    ValidationError::InvalidFormat { field, format, .. }
                        if field == "chain_id" && format == FieldFormat::Uint8
                ),
                "{bad} should fail the uint8 refinement"
            );
        }
    }

    #[test]
    fn test_enum_variants() {
        let registry = ledger_registry();
        let validator = registry.validator();

        assert!(validator.validate("RoleType", &json!("validator")).is_ok());

        let mut payload = good_payload();
        payload["node_role"] = json!("observer");
        let err = validator.validate("LedgerInfo", &payload).unwrap_err();
        assert_eq!(
            violation(err),
            ValidationError::UnknownVariant {
                schema: "LedgerInfo".to_string(),
                field: "node_role".to_string(),
                value: "observer".to_string(),
            }
        );

        let err = validator.validate("RoleType", &json!(3)).unwrap_err();
        assert!(matches!(
            violation(err),
            ValidationError::UnexpectedType { field, .. } if field == "value"
        ));
    }

    #[test]
    fn test_unknown_fields_ignored_by_default() {
        let registry = ledger_registry();
        let mut payload = good_payload();
        payload["extra"] = json!("ignored");
        assert!(registry.validator().validate("LedgerInfo", &payload).is_ok());
    }

    #[test]
    fn test_deny_unknown_fields() {
        let registry = ledger_registry();
        let mut payload = good_payload();
        payload["extra"] = json!("rejected");
        let err = registry
            .validator_with(ValidationOptions::strict())
            .validate("LedgerInfo", &payload)
            .unwrap_err();
        assert_eq!(
            violation(err),
            ValidationError::UnknownField {
                schema: "LedgerInfo".to_string(),
                field: "extra".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_schema_is_not_found() {
        let registry = ledger_registry();
        let err = registry
            .validator()
            .validate("Missing", &json!({}))
            .unwrap_err();
        assert!(matches!(err, SchemaError::NotFound(name) if name == "Missing"));
    }

    #[test]
    fn test_nested_object_paths() {
        let registry = ledger_registry();
        registry
            .register(
                "Wrapper",
                SchemaDef::Object(SchemaDescriptor::new("Wraps ledger info.").with_property(
                    "info",
                    FieldSpec::required(FieldType::reference("LedgerInfo")),
                )),
            )
            .unwrap();

        let payload = json!({"info": good_payload()});
        assert!(registry.validator().validate("Wrapper", &payload).is_ok());

        let mut payload = json!({"info": good_payload()});
        payload["info"]["chain_id"] = json!("5");
        let err = registry.validator().validate("Wrapper", &payload).unwrap_err();
        assert!(matches!(
            violation(err),
            ValidationError::UnexpectedType { schema, field, .. }
                if schema == "Wrapper" && field == "info.chain_id"
        ));

        let payload = json!({"info": "not an object"});
        let err = registry.validator().validate("Wrapper", &payload).unwrap_err();
        assert!(matches!(
            violation(err),
            ValidationError::UnexpectedType { field, expected, .. }
                if field == "info" && expected == "object"
        ));
    }

    #[test]
    fn test_hex_format() {
        let registry = ledger_registry();
        registry
            .register(
                "HexEncodedBytes",
                SchemaDef::Scalar(ScalarDef::new(FieldType::String).with_format(FieldFormat::Hex)),
            )
            .unwrap();
        let validator = registry.validator();

        for good in ["0xdeadbeef", "deadbeef", "0A1b2C", "0x0"] {
            assert!(
                validator.validate("HexEncodedBytes", &json!(good)).is_ok(),
                "{good}"
            );
        }
        for bad in ["", "0x", "xyz", "0xdead beef", "0X00"] {
            assert!(
                validator.validate("HexEncodedBytes", &json!(bad)).is_err(),
                "{bad:?} should fail the hex refinement"
            );
        }
    }

    #[test]
    fn test_payload_must_match_definition_kind() {
        let registry = ledger_registry();
        let err = registry
            .validator()
            .validate("LedgerInfo", &json!("nope"))
            .unwrap_err();
        assert!(matches!(
            violation(err),
            ValidationError::UnexpectedType { field, expected, .. }
                if field == "value" && expected == "object"
        ));
    }
}
