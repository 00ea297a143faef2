pub mod definition;
pub mod descriptor;
pub mod errors;
pub mod field;

pub use definition::{EnumDef, ScalarDef, SchemaDef};
pub use descriptor::SchemaDescriptor;
pub use errors::{SchemaError, SchemaResult, ValidationError};
pub use field::{FieldFormat, FieldSpec, FieldType};
