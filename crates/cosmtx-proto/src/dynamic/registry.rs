//! Memoized, thread-safe schema registration.

use std::sync::{LazyLock, RwLock};

use tracing::debug;

use crate::dynamic::encode::encode_message;
use crate::dynamic::schema::{synthesize, type_name_from_url, MessageSchema, SchemaSet};
use crate::dynamic::value::Mapping;
use crate::{Any, ProtoError};

static GLOBAL: LazyLock<SchemaRegistry> = LazyLock::new(SchemaRegistry::new);

/// How registration treats a type name that is already registered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SchemaCheck {
    /// The first registration wins; later mappings are not inspected.
    #[default]
    Permissive,
    /// A later mapping must synthesize to exactly the registered schemas.
    Strict,
}

/// A table of synthesized schemas keyed by type name.
///
/// Lookups for registered names take the read lock only. Registering a new
/// name synthesizes outside the lock and inserts under the write lock; if
/// another thread registered the same name in between, its schema is kept.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: RwLock<SchemaSet>,
}

impl SchemaRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        SchemaRegistry::default()
    }

    /// The process-wide registry.
    pub fn global() -> &'static SchemaRegistry {
        &GLOBAL
    }

    /// Register the schema inferred from `mapping` under `type_name`.
    ///
    /// # Arguments
    /// * `type_name` - The root message type name.
    /// * `mapping` - Example values the schema is inferred from.
    /// * `check` - What to do when `type_name` is already registered.
    ///
    /// # Returns
    /// `true` if this call added the schema, `false` if it was already present.
    pub fn register(
        &self,
        type_name: &str,
        mapping: &Mapping,
        check: SchemaCheck,
    ) -> Result<bool, ProtoError> {
        if self.contains(type_name)? {
            if check == SchemaCheck::Strict {
                self.check_consistent(type_name, mapping)?;
            }
            return Ok(false);
        }

        let synthesized = synthesize(type_name, mapping)?;
        let mut schemas = self.schemas.write().map_err(|_| ProtoError::LockPoisoned)?;
        let mut added = false;
        for schema in synthesized.iter() {
            let inserted = schemas.insert_if_absent(schema.clone());
            if schema.name == type_name {
                added = inserted;
            }
        }
        debug!(
            type_name,
            fields = mapping.len(),
            new = added,
            "registered dynamic message schema"
        );
        Ok(added)
    }

    fn check_consistent(&self, type_name: &str, mapping: &Mapping) -> Result<(), ProtoError> {
        let candidate = synthesize(type_name, mapping)?;
        let schemas = self.schemas.read().map_err(|_| ProtoError::LockPoisoned)?;
        for schema in candidate.iter() {
            match schemas.get(&schema.name) {
                Some(existing) if existing == schema => {}
                Some(_) => {
                    return Err(ProtoError::SchemaMismatch {
                        type_name: schema.name.clone(),
                        reason: "inferred fields differ from the registered schema".to_string(),
                    })
                }
                None => {
                    return Err(ProtoError::SchemaMismatch {
                        type_name: schema.name.clone(),
                        reason: "nested type is not part of the registered schema".to_string(),
                    })
                }
            }
        }
        Ok(())
    }

    /// Returns `true` if `type_name` is registered.
    pub fn contains(&self, type_name: &str) -> Result<bool, ProtoError> {
        let schemas = self.schemas.read().map_err(|_| ProtoError::LockPoisoned)?;
        Ok(schemas.contains(type_name))
    }

    /// A copy of the schema registered under `type_name`.
    pub fn schema(&self, type_name: &str) -> Result<Option<MessageSchema>, ProtoError> {
        let schemas = self.schemas.read().map_err(|_| ProtoError::LockPoisoned)?;
        Ok(schemas.get(type_name).cloned())
    }

    /// Number of registered message types, nested types included.
    pub fn len(&self) -> Result<usize, ProtoError> {
        let schemas = self.schemas.read().map_err(|_| ProtoError::LockPoisoned)?;
        Ok(schemas.len())
    }

    /// Encode `mapping` as the registered message `type_name`.
    pub fn encode(&self, type_name: &str, mapping: &Mapping) -> Result<Vec<u8>, ProtoError> {
        let schemas = self.schemas.read().map_err(|_| ProtoError::LockPoisoned)?;
        encode_message(&schemas, type_name, mapping)
    }

    /// Register (if needed) and encode `mapping`, then wrap it in an `Any`.
    ///
    /// The schema is named after the last `.` segment of `type_url`; the
    /// URL itself is attached unmodified.
    pub fn pack(&self, type_url: &str, mapping: &Mapping, check: SchemaCheck) -> Result<Any, ProtoError> {
        let type_name = type_name_from_url(type_url);
        self.register(type_name, mapping, check)?;
        let value = self.encode(type_name, mapping)?;
        Ok(Any {
            type_url: type_url.to_string(),
            value,
        })
    }
}

/// Pack `mapping` through the process-wide registry with the default check.
pub fn pack_from_mapping(type_url: &str, mapping: &Mapping) -> Result<Any, ProtoError> {
    SchemaRegistry::global().pack(type_url, mapping, SchemaCheck::Permissive)
}
