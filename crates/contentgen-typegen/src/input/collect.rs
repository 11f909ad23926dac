//! Object graph collection.
//!
//! Walks every field reachable from the document definitions and gathers the
//! named object definitions it meets, each exactly once. The walk is
//! depth-first pre-order: documents in declaration order, fields in
//! declaration order. A visited set keyed by object name stops re-entry, so
//! cyclic object graphs terminate.

use super::source::{FieldDef, FieldKind, ListItem, ListItemKind, ObjectDef, ObjectRef, SourceSchema};
use crate::error::SchemaError;
use std::collections::HashSet;

/// Collect every object definition reachable from a document, in
/// first-discovery order.
pub fn collect_object_defs(schema: &SourceSchema) -> Result<Vec<&ObjectDef>, SchemaError> {
    let mut collector = Collector {
        schema,
        visited: HashSet::new(),
        ordered: Vec::new(),
    };

    for doc in schema.documents() {
        for field in &doc.fields {
            collector.field(&doc.name, field)?;
        }
    }

    Ok(collector.ordered)
}

struct Collector<'a> {
    schema: &'a SourceSchema,
    visited: HashSet<&'a str>,
    ordered: Vec<&'a ObjectDef>,
}

impl<'a> Collector<'a> {
    fn object(&mut self, owner: &str, field: &str, reference: &ObjectRef) -> Result<(), SchemaError> {
        let def = self.resolve(owner, field, reference)?;
        if !self.visited.insert(def.name.as_str()) {
            return Ok(());
        }
        self.ordered.push(def);

        for nested in &def.fields {
            self.field(&def.name, nested)?;
        }
        Ok(())
    }

    fn field(&mut self, owner: &str, field: &'a FieldDef) -> Result<(), SchemaError> {
        match &field.kind {
            FieldKind::Object { object } => self.object(owner, &field.name, object),
            FieldKind::InlineObject { fields } => {
                for nested in fields {
                    self.field(owner, nested)?;
                }
                Ok(())
            }
            FieldKind::List { of } => self.list_item(owner, &field.name, of),
            FieldKind::PolymorphicList { of, .. } => {
                for item in of {
                    self.list_item(owner, &field.name, item)?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn list_item(&mut self, owner: &str, field: &str, item: &'a ListItem) -> Result<(), SchemaError> {
        match &item.kind {
            ListItemKind::Object { object } => self.object(owner, field, object),
            ListItemKind::InlineObject { fields } => {
                for nested in fields {
                    self.field(owner, nested)?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn resolve(&self, owner: &str, field: &str, reference: &ObjectRef) -> Result<&'a ObjectDef, SchemaError> {
        self.schema
            .resolve_object(reference)
            .ok_or_else(|| SchemaError::UnresolvedObject {
                owner: owner.to_string(),
                field: field.to_string(),
                target: reference.name().to_string(),
            })
    }
}
