//! Schema descriptors for the node's REST API models, mirroring the
//! output of the API's descriptor generator with one constant per model.
//!
//! Names are the canonical registry names; `register_node_api_schemas`
//! installs the whole family so references like `U64` and `RoleType`
//! resolve.

use crate::schema::types::{
    EnumDef, FieldFormat, FieldSpec, FieldType, ScalarDef, SchemaDef, SchemaDescriptor,
};
use crate::schema::{SchemaRegistry, SchemaResult};
use once_cell::sync::Lazy;

pub const INDEX_RESPONSE_NAME: &str = "IndexResponse";
pub const U64_NAME: &str = "U64";
pub const ROLE_TYPE_NAME: &str = "RoleType";
pub const ADDRESS_NAME: &str = "Address";
pub const HEX_ENCODED_BYTES_NAME: &str = "HexEncodedBytes";
pub const ACCOUNT_DATA_NAME: &str = "AccountData";

/// Descriptor for the index endpoint response.
pub static INDEX_RESPONSE: Lazy<SchemaDescriptor> = Lazy::new(|| {
    SchemaDescriptor::new(
        "The struct holding all data returned to the client by the index endpoint (i.e., GET \"/\").",
    )
    .with_property(
        "chain_id",
        FieldSpec::required(FieldType::Number).with_format(FieldFormat::Uint8),
    )
    .with_property("epoch", FieldSpec::required(FieldType::reference(U64_NAME)))
    .with_property(
        "ledger_version",
        FieldSpec::required(FieldType::reference(U64_NAME)),
    )
    .with_property(
        "oldest_ledger_version",
        FieldSpec::required(FieldType::reference(U64_NAME)),
    )
    .with_property(
        "ledger_timestamp",
        FieldSpec::required(FieldType::reference(U64_NAME)),
    )
    .with_property(
        "node_role",
        FieldSpec::required(FieldType::reference(ROLE_TYPE_NAME)),
    )
    .with_property(
        "oldest_block_height",
        FieldSpec::required(FieldType::reference(U64_NAME)),
    )
    .with_property(
        "block_height",
        FieldSpec::required(FieldType::reference(U64_NAME)),
    )
});

/// A 64-bit unsigned integer carried as a string, for JSON compatibility
/// with languages that cannot parse u64 natively.
pub static U64: Lazy<ScalarDef> = Lazy::new(|| {
    ScalarDef::new(FieldType::String)
        .with_format(FieldFormat::Uint64)
        .with_description(
            "A string containing a 64-bit unsigned integer. Values are represented as strings for compatibility with languages that do not parse u64 in JSON natively.",
        )
});

/// The role a node plays in the network.
pub static ROLE_TYPE: Lazy<EnumDef> =
    Lazy::new(|| EnumDef::new(["validator", "full_node"]).with_description("The role the node plays in the network."));

/// A hex-encoded account address.
pub static ADDRESS: Lazy<ScalarDef> = Lazy::new(|| {
    ScalarDef::new(FieldType::String)
        .with_format(FieldFormat::Hex)
        .with_description(
            "A hex-encoded account address, optionally 0x-prefixed and with leading zeros stripped.",
        )
});

/// Raw bytes carried as a hex-encoded string.
pub static HEX_ENCODED_BYTES: Lazy<ScalarDef> = Lazy::new(|| {
    ScalarDef::new(FieldType::String)
        .with_format(FieldFormat::Hex)
        .with_description("Bytes represented as a 0x-prefixed hex string, two digits per byte.")
});

/// Descriptor for the account endpoint response.
pub static ACCOUNT_DATA: Lazy<SchemaDescriptor> = Lazy::new(|| {
    SchemaDescriptor::new("A simplified version of the on-chain account resource.")
        .with_property(
            "sequence_number",
            FieldSpec::required(FieldType::reference(U64_NAME)),
        )
        .with_property(
            "authentication_key",
            FieldSpec::required(FieldType::reference(HEX_ENCODED_BYTES_NAME)),
        )
});

/// Every generated definition paired with its canonical name.
pub fn definitions() -> Vec<(&'static str, SchemaDef)> {
    vec![
        (
            INDEX_RESPONSE_NAME,
            SchemaDef::Object(INDEX_RESPONSE.clone()),
        ),
        (U64_NAME, SchemaDef::Scalar(U64.clone())),
        (ROLE_TYPE_NAME, SchemaDef::Enum(ROLE_TYPE.clone())),
        (ADDRESS_NAME, SchemaDef::Scalar(ADDRESS.clone())),
        (
            HEX_ENCODED_BYTES_NAME,
            SchemaDef::Scalar(HEX_ENCODED_BYTES.clone()),
        ),
        (ACCOUNT_DATA_NAME, SchemaDef::Object(ACCOUNT_DATA.clone())),
    ]
}

/// Registers the generated family into `registry`.
///
/// # Errors
/// Returns `SchemaError::Duplicate` if any of the canonical names is
/// already registered.
pub fn register_node_api_schemas(registry: &SchemaRegistry) -> SchemaResult<()> {
    for (name, def) in definitions() {
        registry.register(name, def)?;
    }
    Ok(())
}
