//! Registry of param descriptors keyed by factory name.
//!
//! ## Ordering contract
//!
//! Iteration follows first-insertion order. Registering a descriptor under a
//! key that is already present replaces the stored descriptor but keeps the
//! entry at the position of the first registration; it does not move to the
//! end. `IndexMap::insert` has exactly these semantics.
//!
//! The overwrite silently drops the earlier descriptor's wrapper from the
//! output. It is logged at `warn` level but not treated as an error.

use indexmap::IndexMap;
use paramwrap_define::ParamDeclaration;
use tracing::{debug, warn};

use crate::errors::GeneratorError;
use crate::introspect::ParamDescriptor;

/// Ordered mapping from key to [`ParamDescriptor`].
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    entries: IndexMap<String, ParamDescriptor>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from discovered declarations, in order.
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::InvalidSchema` at the first declaration with
    /// an invalid key; nothing after it is registered.
    pub fn from_declarations(
        declarations: impl IntoIterator<Item = ParamDeclaration>,
    ) -> Result<Self, GeneratorError> {
        let mut registry = Self::new();
        for declaration in declarations {
            registry.register(ParamDescriptor::from_declaration(declaration))?;
        }
        Ok(registry)
    }

    /// Inserts or overwrites `descriptor.key -> descriptor`.
    ///
    /// An overwrite keeps the original position in iteration order.
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::InvalidSchema` naming the wrapped type when
    /// the key is empty or is not a Kotlin identifier.
    pub fn register(&mut self, descriptor: ParamDescriptor) -> Result<(), GeneratorError> {
        if !is_identifier(&descriptor.key) {
            let type_name = descriptor.type_name();
            return Err(GeneratorError::InvalidSchema {
                key: descriptor.key,
                type_name,
            });
        }

        let key = descriptor.key.clone();
        let type_name = descriptor.type_name();
        match self.entries.insert(key.clone(), descriptor) {
            Some(previous) => warn!(
                key = %key,
                replaced = %previous.type_name(),
                by = %type_name,
                "Duplicate param key, keeping the later class at the earlier position"
            ),
            None => debug!(key = %key, param = %type_name, "Registered param"),
        }
        Ok(())
    }

    /// Descriptors in registry order. Borrowing, so it can be replayed.
    pub fn entries(&self) -> impl Iterator<Item = &ParamDescriptor> + '_ {
        self.entries.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&ParamDescriptor> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Keys name companion functions, so they must be plain identifiers. Hard
/// keywords pass; rendering back-quotes them.
fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    let starts_well = matches!(chars.next(), Some(c) if c == '_' || c.is_alphabetic());
    starts_well && key != "_" && chars.all(|c| c == '_' || c.is_alphanumeric())
}
