//! Collaborator interface to the remote group store
//!
//! The reconciler and executor talk to the server only through
//! [`GroupStore`], so any client that can do four CRUD calls plugs in.
//! [`MemoryStore`] is the in-process implementation used by tests.

use anyhow::Result;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::types::{Definition, SourceType};

/// Bootstrap attributes the creation endpoint accepts.
///
/// Creation takes only the identifier plus these; every other attribute goes
/// through the follow-up full-definition write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateSeed {
    pub description: Option<String>,
    pub source_type: SourceType,
}

impl CreateSeed {
    /// Seed for a proposed definition; a missing or unrecognized source type
    /// falls back to [`SourceType::Local`]
    pub fn from_definition(definition: &Definition) -> Self {
        let description = definition
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string);
        let source_type = definition
            .get("sourceType")
            .and_then(Value::as_str)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default();
        Self {
            description,
            source_type,
        }
    }
}

/// Remote CRUD surface required from the resource client.
///
/// `fetch` returns `Ok(None)` for a missing group; that is the only
/// recoverable condition, and it is a typed signal, never derived from
/// error message text. Every other failure propagates to the caller
/// untouched. The immutable group name is the resource handle throughout.
pub trait GroupStore {
    /// Current full definition, or `None` if the group does not exist
    fn fetch(&self, name: &str) -> Result<Option<Definition>>;

    /// Create the group from the bootstrap seed
    fn create(&mut self, name: &str, seed: &CreateSeed) -> Result<()>;

    /// Replace the group's full definition
    fn set_definition(&mut self, name: &str, definition: &Definition) -> Result<()>;

    /// Delete the group
    fn delete(&mut self, name: &str) -> Result<()>;
}

/// A write performed against a [`MemoryStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteCall {
    Create(String),
    SetDefinition(String),
    Delete(String),
}

/// In-memory group store: a plain map of definitions plus a log of every
/// write call.
///
/// Mimics the server's create behavior, including its unsafe
/// `mayWriteSafeCode` default when the seed omits it.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub groups: BTreeMap<String, Definition>,
    pub writes: Vec<WriteCall>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with one group
    pub fn with_group(name: impl Into<String>, definition: Definition) -> Self {
        let mut store = Self::new();
        store.groups.insert(name.into(), definition);
        store
    }
}

impl GroupStore for MemoryStore {
    fn fetch(&self, name: &str) -> Result<Option<Definition>> {
        Ok(self.groups.get(name).cloned())
    }

    fn create(&mut self, name: &str, seed: &CreateSeed) -> Result<()> {
        self.writes.push(WriteCall::Create(name.to_string()));
        let mut definition = Definition::new();
        definition.insert("name", Value::String(name.to_string()));
        definition.insert(
            "sourceType",
            Value::String(seed.source_type.as_str().to_string()),
        );
        if let Some(description) = &seed.description {
            definition.insert("description", Value::String(description.clone()));
        }
        // What the real server does when the seed says nothing about it
        definition.insert("mayWriteSafeCode", Value::Bool(false));
        self.groups.insert(name.to_string(), definition);
        Ok(())
    }

    fn set_definition(&mut self, name: &str, definition: &Definition) -> Result<()> {
        self.writes.push(WriteCall::SetDefinition(name.to_string()));
        self.groups.insert(name.to_string(), definition.clone());
        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        self.writes.push(WriteCall::Delete(name.to_string()));
        self.groups.remove(name);
        Ok(())
    }
}
