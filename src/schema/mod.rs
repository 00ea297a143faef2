pub mod registry;
pub mod types;
pub mod validation;

pub use registry::{Resolution, SchemaRegistry};
pub use validation::{PayloadValidator, ValidationOptions};

// Re-export all types at the schema module level
pub use types::{
    EnumDef,
    FieldFormat,
    FieldSpec,
    FieldType,
    ScalarDef,
    SchemaDef,
    SchemaDescriptor,
    SchemaError,
    SchemaResult,
    ValidationError,
};
