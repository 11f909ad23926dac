//! Canonical schema produced by normalization.
//!
//! Every cross-reference is carried as a type name, so the structure itself
//! is acyclic even when the described type graph is not. Renderers only ever
//! see this representation.

use crate::error::TableKind;
use crate::table::{DefTable, Named};
use serde::Serialize;
use serde_json::Value;

/// The fully resolved, deduplicated schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreSchema {
    /// Document definitions in declaration order.
    pub document_def_map: DefTable<DocumentDef>,
    /// Every object reachable from a document, in first-discovery order.
    pub object_def_map: DefTable<ObjectDef>,
}

impl Default for CoreSchema {
    fn default() -> Self {
        Self {
            document_def_map: DefTable::new(TableKind::Document),
            object_def_map: DefTable::new(TableKind::Object),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDef {
    pub name: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_field: Option<String>,
    pub is_singleton: bool,
    pub field_defs: Vec<FieldDef>,
    pub computed_fields: Vec<ComputedField>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDef {
    pub name: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_field: Option<String>,
    pub field_defs: Vec<FieldDef>,
}

impl Named for DocumentDef {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for ObjectDef {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A field of a document, object, or inline object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDef {
    pub name: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(rename = "const", skip_serializing_if = "Option::is_none")]
    pub const_value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldDef {
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum FieldKind {
    String,
    Boolean,
    Number,
    Date,
    Markdown,
    Enum {
        options: Vec<String>,
    },
    Object {
        object_name: String,
    },
    InlineObject {
        field_defs: Vec<FieldDef>,
    },
    Reference {
        document_name: String,
    },
    List {
        of: ListItem,
    },
    PolymorphicList {
        type_field: String,
        of: Vec<ListItem>,
    },
    /// A kind this version does not know. Only the base attributes survive,
    /// `type` keeping the source string.
    #[serde(untagged)]
    Unknown {
        #[serde(rename = "type")]
        kind: String,
    },
}

/// Element descriptor of a `list` or `polymorphic_list` field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_field: Option<String>,
    #[serde(flatten)]
    pub kind: ListItemKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ListItemKind {
    String,
    Boolean,
    Object { object_name: String },
    Enum { options: Vec<String> },
    InlineObject { field_defs: Vec<FieldDef> },
}

/// Declared type of a computed field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComputedFieldType {
    String,
    Number,
    Boolean,
    Date,
    Json,
    List,
}

/// A field whose value an external resolver computes. Only its shape and
/// the resolver's identity are carried here.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedField {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub ty: ComputedFieldType,
    pub resolve: String,
}
