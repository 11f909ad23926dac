//! Name-keyed definition tables.

use crate::error::{SchemaError, TableKind};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

/// Anything stored in a [`DefTable`].
pub trait Named {
    fn name(&self) -> &str;
}

/// An insertion-ordered table of definitions keyed by their unique name.
///
/// A second definition under an existing name is rejected, never merged or
/// overwritten.
#[derive(Debug, Clone, PartialEq)]
pub struct DefTable<T> {
    kind: TableKind,
    entries: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T: Named> DefTable<T> {
    pub fn new(kind: TableKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }

    pub fn insert(&mut self, def: T) -> Result<(), SchemaError> {
        let name = def.name().to_string();
        if self.index.contains_key(&name) {
            return Err(SchemaError::DuplicateName {
                table: self.kind,
                name,
            });
        }
        self.index.insert(name, self.entries.len());
        self.entries.push(def);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Definitions in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    /// Names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(Named::name)
    }

    /// Definitions sorted by name.
    pub fn sorted(&self) -> Vec<&T> {
        let mut defs: Vec<&T> = self.entries.iter().collect();
        defs.sort_by(|a, b| a.name().cmp(b.name()));
        defs
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a, T> IntoIterator for &'a DefTable<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<T: Named + Serialize> Serialize for DefTable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for def in &self.entries {
            map.serialize_entry(def.name(), def)?;
        }
        map.end()
    }
}
