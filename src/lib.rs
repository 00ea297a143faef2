//! # Ledger API Schemas
//!
//! This library carries the schema descriptors generated for a ledger
//! node's REST API, together with a registry that resolves the names the
//! descriptors reference and a validator that applies them to candidate
//! payloads.
//!
//! ## Core Components
//!
//! * `schema::types` - Descriptor data model: field specs, type and format
//!   tags, named definitions, errors
//! * `schema::registry` - Thread-safe name to definition map with
//!   reference resolution and integrity checks
//! * `schema::validation` - Payload validation against registered
//!   definitions
//! * `node_api` - The generated descriptors themselves, one constant per
//!   API model
//!
//! ## Architecture
//!
//! Descriptors are plain data with a fixed serialized shape: an object
//! descriptor maps field names to `{type, isRequired, format?}` triples,
//! where `type` is either a primitive tag or the name of another schema.
//! Nothing about a descriptor is executable; consumers in any language
//! read the same JSON. The registry supplies the meaning of referenced
//! names, so `U64` stays a string-encoded 64-bit counter everywhere it
//! appears instead of being re-specified per field.
//!
//! ```
//! use ledger_api_schemas::{node_api, SchemaRegistry};
//! use serde_json::json;
//!
//! let registry = SchemaRegistry::with_node_api_schemas();
//! let payload = json!({
//!     "chain_id": 4,
//!     "epoch": "1",
//!     "ledger_version": "100",
//!     "oldest_ledger_version": "0",
//!     "block_height": "10",
//!     "oldest_block_height": "0",
//!     "ledger_timestamp": "123",
//!     "node_role": "full_node",
//! });
//! assert!(registry
//!     .validator()
//!     .validate(node_api::INDEX_RESPONSE_NAME, &payload)
//!     .is_ok());
//! ```

pub mod node_api;
pub mod schema;

// Re-export main types for convenience
pub use schema::registry::{Resolution, SchemaRegistry};
pub use schema::types::{
    EnumDef, FieldFormat, FieldSpec, FieldType, ScalarDef, SchemaDef, SchemaDescriptor,
    SchemaError, SchemaResult, ValidationError,
};
pub use schema::validation::{PayloadValidator, ValidationOptions};
