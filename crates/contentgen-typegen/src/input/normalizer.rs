//! Source schema to canonical schema.

use super::collect::collect_object_defs;
use super::source::{self, DocumentRef, ObjectRef, SourceSchema};
use crate::error::{SchemaError, TableKind};
use crate::ir::{
    ComputedField, CoreSchema, DocumentDef, FieldDef, FieldKind, ListItem, ListItemKind, ObjectDef,
};
use crate::table::DefTable;
use tracing::debug;

/// Name of the implicit markdown body field.
pub const CONTENT_FIELD: &str = "content";

/// Normalize a source schema.
///
/// Every deferred reference is resolved here and replaced by its target's
/// name. Any failure aborts the whole normalization.
pub fn normalize(schema: &SourceSchema) -> Result<CoreSchema, SchemaError> {
    let resolver = Resolver { schema };

    let mut document_def_map = DefTable::new(TableKind::Document);
    for doc in schema.documents() {
        document_def_map.insert(resolver.document(doc)?)?;
    }

    let mut object_def_map = DefTable::new(TableKind::Object);
    for obj in collect_object_defs(schema)? {
        object_def_map.insert(ObjectDef {
            name: obj.name.clone(),
            label: obj.label.clone().unwrap_or_else(|| obj.name.clone()),
            description: obj.description.clone(),
            label_field: obj.label_field.clone(),
            field_defs: resolver.fields(&obj.name, &obj.fields)?,
        })?;
    }

    let skipped = schema.objects().len() - object_def_map.len();
    if skipped > 0 {
        debug!(skipped, "object types unreachable from any document were dropped");
    }
    debug!(
        documents = document_def_map.len(),
        objects = object_def_map.len(),
        "normalized schema"
    );

    Ok(CoreSchema {
        document_def_map,
        object_def_map,
    })
}

/// The synthetic field appended to markdown documents.
fn content_field() -> FieldDef {
    FieldDef {
        name: CONTENT_FIELD.to_string(),
        label: "Markdown content".to_string(),
        description: Some("Default markdown file content".to_string()),
        default: None,
        required: None,
        const_value: None,
        hidden: None,
        kind: FieldKind::Markdown,
    }
}

struct Resolver<'a> {
    schema: &'a SourceSchema,
}

impl Resolver<'_> {
    fn document(&self, doc: &source::DocumentDef) -> Result<DocumentDef, SchemaError> {
        let mut field_defs = self.fields(&doc.name, &doc.fields)?;
        if doc.has_markdown_body() && doc.fields.get(CONTENT_FIELD).is_none() {
            field_defs.push(content_field());
        }

        let computed_fields = doc
            .computed_fields
            .iter()
            .map(|c| ComputedField {
                name: c.name.clone(),
                description: c.description.clone(),
                ty: c.ty,
                resolve: c.resolve.clone(),
            })
            .collect();

        Ok(DocumentDef {
            name: doc.name.clone(),
            label: doc.label.clone().unwrap_or_else(|| doc.name.clone()),
            description: doc.description.clone(),
            label_field: doc.label_field.clone(),
            is_singleton: doc.is_singleton.unwrap_or(false),
            field_defs,
            computed_fields,
        })
    }

    fn fields(&self, owner: &str, fields: &source::Fields) -> Result<Vec<FieldDef>, SchemaError> {
        fields.iter().map(|f| self.field(owner, f)).collect()
    }

    fn field(&self, owner: &str, field: &source::FieldDef) -> Result<FieldDef, SchemaError> {
        let kind = match &field.kind {
            source::FieldKind::String => FieldKind::String,
            source::FieldKind::Boolean => FieldKind::Boolean,
            source::FieldKind::Number => FieldKind::Number,
            source::FieldKind::Date => FieldKind::Date,
            source::FieldKind::Markdown => FieldKind::Markdown,
            source::FieldKind::Enum { options } => FieldKind::Enum {
                options: options.clone(),
            },
            source::FieldKind::Object { object } => FieldKind::Object {
                object_name: self.object_name(owner, &field.name, object)?,
            },
            source::FieldKind::InlineObject { fields } => FieldKind::InlineObject {
                field_defs: self.fields(owner, fields)?,
            },
            source::FieldKind::Reference { document } => FieldKind::Reference {
                document_name: self.document_name(owner, &field.name, document)?,
            },
            source::FieldKind::List { of } => FieldKind::List {
                of: self.list_item(owner, &field.name, of)?,
            },
            source::FieldKind::PolymorphicList { of, type_field } => FieldKind::PolymorphicList {
                type_field: type_field.clone(),
                of: of
                    .iter()
                    .map(|item| self.list_item(owner, &field.name, item))
                    .collect::<Result<_, _>>()?,
            },
            // Unknown kinds degrade to the base attributes.
            source::FieldKind::Other(kind) => FieldKind::Unknown { kind: kind.clone() },
        };

        Ok(FieldDef {
            name: field.name.clone(),
            label: field.label.clone().unwrap_or_else(|| field.name.clone()),
            description: field.description.clone(),
            default: field.default.clone(),
            required: field.required,
            const_value: field.const_value.clone(),
            hidden: field.hidden,
            kind,
        })
    }

    fn list_item(
        &self,
        owner: &str,
        field: &str,
        item: &source::ListItem,
    ) -> Result<ListItem, SchemaError> {
        let kind = match &item.kind {
            source::ListItemKind::String => ListItemKind::String,
            source::ListItemKind::Boolean => ListItemKind::Boolean,
            source::ListItemKind::Object { object } => ListItemKind::Object {
                object_name: self.object_name(owner, field, object)?,
            },
            source::ListItemKind::Enum { options } => ListItemKind::Enum {
                options: options.clone(),
            },
            source::ListItemKind::InlineObject { fields } => ListItemKind::InlineObject {
                field_defs: self.fields(owner, fields)?,
            },
        };

        Ok(ListItem {
            label_field: item.label_field.clone(),
            kind,
        })
    }

    fn object_name(&self, owner: &str, field: &str, object: &ObjectRef) -> Result<String, SchemaError> {
        self.schema
            .resolve_object(object)
            .map(|def| def.name.clone())
            .ok_or_else(|| SchemaError::UnresolvedObject {
                owner: owner.to_string(),
                field: field.to_string(),
                target: object.name().to_string(),
            })
    }

    fn document_name(
        &self,
        owner: &str,
        field: &str,
        document: &DocumentRef,
    ) -> Result<String, SchemaError> {
        self.schema
            .resolve_document(document)
            .map(|def| def.name.clone())
            .ok_or_else(|| SchemaError::UnresolvedDocument {
                owner: owner.to_string(),
                field: field.to_string(),
                target: document.name().to_string(),
            })
    }
}
