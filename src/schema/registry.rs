//! Thread-safe name → definition map with reference resolution.

use super::types::{FieldType, SchemaDef, SchemaError, SchemaResult};
use log::{debug, info};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// What a field type resolves to against a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The type is primitive; there is nothing to look up.
    Primitive(FieldType),
    /// The type named a registered definition.
    Named { name: String, def: SchemaDef },
}

/// Owns the registered schema definitions and answers resolution
/// questions about them.
///
/// Registration validates definitions structurally and rejects duplicate
/// names. Reads clone, so lookups never hold the lock across caller code.
pub struct SchemaRegistry {
    schemas: RwLock<HashMap<String, SchemaDef>>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            schemas: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a registry pre-populated with the generated node API
    /// schemas. Infallible: the built-ins are well-formed and mutually
    /// resolvable by construction.
    #[must_use]
    pub fn with_node_api_schemas() -> Self {
        let schemas = crate::node_api::definitions()
            .into_iter()
            .map(|(name, def)| (name.to_string(), def))
            .collect();
        Self {
            schemas: RwLock::new(schemas),
        }
    }

    /// Registers a definition under `name`.
    ///
    /// # Errors
    /// Returns `SchemaError::InvalidDefinition` if the definition fails
    /// structural validation, or `SchemaError::Duplicate` if the name is
    /// already taken.
    pub fn register<S: Into<String>>(&self, name: S, def: SchemaDef) -> SchemaResult<()> {
        let name = name.into();
        def.validate(&name)?;
        let mut schemas = self.write_guard()?;
        if schemas.contains_key(&name) {
            return Err(SchemaError::Duplicate(name));
        }
        debug!("Registering {} schema '{}'", def.kind(), name);
        schemas.insert(name, def);
        Ok(())
    }

    /// Parses a serialized definition and registers it.
    ///
    /// # Errors
    /// Returns `SchemaError::Json` if the payload is not a recognizable
    /// definition, plus everything `register` can return.
    pub fn register_str(&self, name: &str, json: &str) -> SchemaResult<()> {
        let def: SchemaDef = serde_json::from_str(json)?;
        self.register(name, def)
    }

    /// Reads a definition from a JSON file and registers it.
    ///
    /// # Errors
    /// Returns `SchemaError::Io` if the file is unreadable, plus
    /// everything `register_str` can return.
    pub fn register_file<P: AsRef<Path>>(&self, name: &str, path: P) -> SchemaResult<()> {
        let text = std::fs::read_to_string(path)?;
        self.register_str(name, &text)
    }

    /// Returns a clone of the definition registered under `name`.
    pub fn get(&self, name: &str) -> Option<SchemaDef> {
        self.read_recover().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.read_recover().contains_key(name)
    }

    /// Registered names, sorted for deterministic output.
    pub fn list_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read_recover().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn schema_count(&self) -> usize {
        self.read_recover().len()
    }

    /// Resolves a field type: primitives resolve to themselves, references
    /// to their registered definition.
    ///
    /// # Errors
    /// Returns `SchemaError::NotFound` for a reference with no
    /// registered definition.
    pub fn resolve(&self, field_type: &FieldType) -> SchemaResult<Resolution> {
        match field_type {
            FieldType::Ref(name) => {
                let def = self
                    .read_guard()?
                    .get(name)
                    .cloned()
                    .ok_or_else(|| SchemaError::NotFound(name.clone()))?;
                Ok(Resolution::Named {
                    name: name.clone(),
                    def,
                })
            }
            primitive => Ok(Resolution::Primitive(primitive.clone())),
        }
    }

    /// Checks that every reference reachable from a registered definition
    /// resolves within this registry.
    ///
    /// # Errors
    /// Returns `SchemaError::UnresolvedReference` naming the first
    /// offending schema, field, and reference (schemas checked in name
    /// order).
    pub fn verify_references(&self) -> SchemaResult<()> {
        let schemas = self.read_guard()?;
        let mut names: Vec<&String> = schemas.keys().collect();
        names.sort();
        for name in names {
            let SchemaDef::Object(descriptor) = &schemas[name] else {
                continue;
            };
            for (field, spec) in &descriptor.properties {
                if let FieldType::Ref(reference) = &spec.field_type {
                    if !schemas.contains_key(reference) {
                        return Err(SchemaError::UnresolvedReference {
                            schema: name.clone(),
                            field: field.clone(),
                            reference: reference.clone(),
                        });
                    }
                }
            }
        }
        info!("Verified references across {} schemas", schemas.len());
        Ok(())
    }

    fn read_guard(&self) -> SchemaResult<RwLockReadGuard<'_, HashMap<String, SchemaDef>>> {
        self.schemas
            .read()
            .map_err(|_| SchemaError::Internal("schema registry lock poisoned".to_string()))
    }

    fn write_guard(&self) -> SchemaResult<RwLockWriteGuard<'_, HashMap<String, SchemaDef>>> {
        self.schemas
            .write()
            .map_err(|_| SchemaError::Internal("schema registry lock poisoned".to_string()))
    }

    // A poisoned lock still holds a coherent map (inserts are single
    // operations), so infallible queries recover rather than panic.
    fn read_recover(&self) -> RwLockReadGuard<'_, HashMap<String, SchemaDef>> {
        self.schemas.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
