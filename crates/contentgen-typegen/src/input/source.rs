//! Source-authored content schema.
//!
//! This is the schema as a user writes it: documents and objects keyed by
//! name, fields keyed by name, and object/document references expressed as
//! deferred lookups. A reference only names its target; the target is looked
//! up in the [`SourceSchema`] when normalization runs, so definitions may be
//! registered in any order and may refer to each other mutually.
//!
//! Example (JSON):
//! ```json
//! {
//!   "documentTypes": {
//!     "Post": {
//!       "fields": {
//!         "title": { "type": "string", "required": true },
//!         "author": { "type": "object", "object": "Author" }
//!       },
//!       "computedFields": {
//!         "slug": { "type": "string", "resolve": "slugFromPath" }
//!       }
//!     }
//!   },
//!   "objectTypes": {
//!     "Author": { "fields": { "name": { "type": "string" } } }
//!   }
//! }
//! ```

use crate::error::{SchemaError, TableKind};
use crate::ir::ComputedFieldType;
use crate::output::typescript::{ID_FIELD, TYPE_NAME_FIELD, is_identifier};
use crate::table::{DefTable, Named};
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;

/// Deferred reference to an object definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct ObjectRef(String);

impl ObjectRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Deferred reference to a document definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct DocumentRef(String);

impl DocumentRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Storage format of a document's source files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Md,
    Mdx,
    Json,
    Yaml,
}

/// Arena of source definitions, keyed by name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "SchemaRepr")]
pub struct SourceSchema {
    documents: DefTable<DocumentDef>,
    objects: DefTable<ObjectDef>,
}

impl Default for SourceSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceSchema {
    pub fn new() -> Self {
        Self {
            documents: DefTable::new(TableKind::Document),
            objects: DefTable::new(TableKind::Object),
        }
    }

    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    pub fn add_document(&mut self, def: DocumentDef) -> Result<(), SchemaError> {
        check_name(TableKind::Document, &def.name)?;
        if self.objects.contains(&def.name) {
            return Err(SchemaError::NameClash { name: def.name });
        }
        check_unique_fields(&def.name, &def.fields)?;
        let mut computed = HashSet::new();
        for field in &def.computed_fields.0 {
            if def.fields.get(&field.name).is_some() || !computed.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    owner: def.name.clone(),
                    field: field.name.clone(),
                });
            }
        }
        let names = def.fields.iter().map(|f| f.name.as_str());
        let computed_names = def.computed_fields.iter().map(|f| f.name.as_str());
        check_reserved(&def.name, names.chain(computed_names), DOCUMENT_RESERVED)?;
        self.documents.insert(def)
    }

    pub fn add_object(&mut self, def: ObjectDef) -> Result<(), SchemaError> {
        check_name(TableKind::Object, &def.name)?;
        if self.documents.contains(&def.name) {
            return Err(SchemaError::NameClash { name: def.name });
        }
        check_unique_fields(&def.name, &def.fields)?;
        check_reserved(
            &def.name,
            def.fields.iter().map(|f| f.name.as_str()),
            OBJECT_RESERVED,
        )?;
        self.objects.insert(def)
    }

    pub fn documents(&self) -> &DefTable<DocumentDef> {
        &self.documents
    }

    pub fn objects(&self) -> &DefTable<ObjectDef> {
        &self.objects
    }

    pub fn resolve_object(&self, reference: &ObjectRef) -> Option<&ObjectDef> {
        self.objects.get(reference.name())
    }

    pub fn resolve_document(&self, reference: &DocumentRef) -> Option<&DocumentDef> {
        self.documents.get(reference.name())
    }
}

/// Properties every rendered document type already carries.
const DOCUMENT_RESERVED: &[&str] = &[ID_FIELD, TYPE_NAME_FIELD];
/// Properties every rendered object type already carries.
const OBJECT_RESERVED: &[&str] = &[TYPE_NAME_FIELD];

/// Definition names become type and constant names in generated code.
fn check_name(table: TableKind, name: &str) -> Result<(), SchemaError> {
    if is_identifier(name) {
        Ok(())
    } else {
        Err(SchemaError::InvalidName {
            table,
            name: name.to_string(),
        })
    }
}

fn check_reserved<'a>(
    owner: &str,
    mut names: impl Iterator<Item = &'a str>,
    reserved: &[&str],
) -> Result<(), SchemaError> {
    match names.find(|name| reserved.contains(name)) {
        Some(field) => Err(SchemaError::ReservedField {
            owner: owner.to_string(),
            field: field.to_string(),
        }),
        None => Ok(()),
    }
}

fn check_unique_fields(owner: &str, fields: &Fields) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for field in fields.iter() {
        if !seen.insert(field.name.as_str()) {
            return Err(SchemaError::DuplicateField {
                owner: owner.to_string(),
                field: field.name.clone(),
            });
        }
        match &field.kind {
            FieldKind::InlineObject { fields } => {
                check_unique_fields(&format!("{}.{}", owner, field.name), fields)?;
            }
            FieldKind::List { of } => check_unique_item_fields(owner, &field.name, of)?,
            FieldKind::PolymorphicList { of, .. } => {
                for item in of {
                    check_unique_item_fields(owner, &field.name, item)?;
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn check_unique_item_fields(owner: &str, field: &str, item: &ListItem) -> Result<(), SchemaError> {
    match &item.kind {
        ListItemKind::InlineObject { fields } => {
            check_unique_fields(&format!("{}.{}", owner, field), fields)
        }
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDef {
    #[serde(skip)]
    pub name: String,
    pub label: Option<String>,
    pub description: Option<String>,
    pub label_field: Option<String>,
    pub file_type: Option<FileType>,
    pub is_singleton: Option<bool>,
    #[serde(default)]
    pub fields: Fields,
    #[serde(default)]
    pub computed_fields: ComputedFields,
}

impl DocumentDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_file_type(mut self, file_type: FileType) -> Self {
        self.file_type = Some(file_type);
        self
    }

    pub fn singleton(mut self) -> Self {
        self.is_singleton = Some(true);
        self
    }

    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.0.push(field);
        self
    }

    pub fn computed(mut self, field: ComputedFieldDef) -> Self {
        self.computed_fields.0.push(field);
        self
    }

    /// Whether this document's body is markdown, so it carries an implicit
    /// `content` field.
    pub fn has_markdown_body(&self) -> bool {
        matches!(self.file_type, None | Some(FileType::Md))
    }
}

impl Named for DocumentDef {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDef {
    #[serde(skip)]
    pub name: String,
    pub label: Option<String>,
    pub description: Option<String>,
    pub label_field: Option<String>,
    #[serde(default)]
    pub fields: Fields,
}

impl ObjectDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.0.push(field);
        self
    }
}

impl Named for ObjectDef {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Fields in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(Vec<FieldDef>);

impl Fields {
    pub fn new(fields: Vec<FieldDef>) -> Self {
        Self(fields)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldDef> {
        self.0.iter()
    }

    pub fn get(&self, name: &str) -> Option<&FieldDef> {
        self.0.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = &'a FieldDef;
    type IntoIter = std::slice::Iter<'a, FieldDef>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub name: String,
    pub label: Option<String>,
    pub description: Option<String>,
    pub default: Option<Value>,
    pub required: Option<bool>,
    pub const_value: Option<Value>,
    pub hidden: Option<bool>,
    pub kind: FieldKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    String,
    Boolean,
    Number,
    Date,
    Markdown,
    Enum { options: Vec<String> },
    Object { object: ObjectRef },
    InlineObject { fields: Fields },
    Reference { document: DocumentRef },
    List { of: ListItem },
    PolymorphicList { of: Vec<ListItem>, type_field: String },
    /// Any `type` this version does not recognize.
    Other(String),
}

impl FieldKind {
    pub fn type_name(&self) -> &str {
        match self {
            FieldKind::String => "string",
            FieldKind::Boolean => "boolean",
            FieldKind::Number => "number",
            FieldKind::Date => "date",
            FieldKind::Markdown => "markdown",
            FieldKind::Enum { .. } => "enum",
            FieldKind::Object { .. } => "object",
            FieldKind::InlineObject { .. } => "inline_object",
            FieldKind::Reference { .. } => "reference",
            FieldKind::List { .. } => "list",
            FieldKind::PolymorphicList { .. } => "polymorphic_list",
            FieldKind::Other(kind) => kind,
        }
    }
}

impl FieldDef {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: None,
            description: None,
            default: None,
            required: None,
            const_value: None,
            hidden: None,
            kind,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::String)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Number)
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Date)
    }

    pub fn markdown(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Markdown)
    }

    pub fn enumeration(name: impl Into<String>, options: &[&str]) -> Self {
        let options = options.iter().map(|o| o.to_string()).collect();
        Self::new(name, FieldKind::Enum { options })
    }

    pub fn object(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(
            name,
            FieldKind::Object {
                object: ObjectRef::named(target),
            },
        )
    }

    pub fn reference(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(
            name,
            FieldKind::Reference {
                document: DocumentRef::named(target),
            },
        )
    }

    pub fn inline_object(name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self::new(
            name,
            FieldKind::InlineObject {
                fields: Fields(fields),
            },
        )
    }

    pub fn list(name: impl Into<String>, of: ListItem) -> Self {
        Self::new(name, FieldKind::List { of })
    }

    pub fn polymorphic_list(
        name: impl Into<String>,
        type_field: impl Into<String>,
        of: Vec<ListItem>,
    ) -> Self {
        Self::new(
            name,
            FieldKind::PolymorphicList {
                of,
                type_field: type_field.into(),
            },
        )
    }

    pub fn required(mut self) -> Self {
        self.required = Some(true);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn from_raw(name: String, raw: RawFieldDef) -> Result<Self, SchemaError> {
        let invalid = |reason: &str| SchemaError::InvalidField {
            field: name.clone(),
            reason: reason.to_string(),
        };

        let kind = match raw.kind.as_str() {
            "string" => FieldKind::String,
            "boolean" => FieldKind::Boolean,
            "number" => FieldKind::Number,
            "date" => FieldKind::Date,
            "markdown" => FieldKind::Markdown,
            "enum" => FieldKind::Enum {
                options: raw
                    .options
                    .ok_or_else(|| invalid("enum field requires `options`"))?,
            },
            "object" => FieldKind::Object {
                object: raw
                    .object
                    .ok_or_else(|| invalid("object field requires `object`"))?,
            },
            "inline_object" => FieldKind::InlineObject {
                fields: raw.fields.unwrap_or_default(),
            },
            "reference" => FieldKind::Reference {
                document: raw
                    .document
                    .ok_or_else(|| invalid("reference field requires `document`"))?,
            },
            "list" => match raw.of {
                Some(ListOf::One(of)) => FieldKind::List { of },
                Some(ListOf::Many(_)) => {
                    return Err(invalid("list field takes a single item descriptor in `of`"));
                }
                None => return Err(invalid("list field requires `of`")),
            },
            "polymorphic_list" => FieldKind::PolymorphicList {
                of: match raw.of {
                    Some(ListOf::Many(items)) => items,
                    Some(ListOf::One(item)) => vec![item],
                    None => return Err(invalid("polymorphic_list field requires `of`")),
                },
                type_field: raw
                    .type_field
                    .ok_or_else(|| invalid("polymorphic_list field requires `typeField`"))?,
            },
            other => FieldKind::Other(other.to_string()),
        };

        Ok(Self {
            name,
            label: raw.label,
            description: raw.description,
            default: raw.default,
            required: raw.required,
            const_value: raw.const_value,
            hidden: raw.hidden,
            kind,
        })
    }
}

/// Element descriptor of a `list` or `polymorphic_list` field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    pub label_field: Option<String>,
    #[serde(flatten)]
    pub kind: ListItemKind,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ListItemKind {
    String,
    Boolean,
    Object { object: ObjectRef },
    Enum { options: Vec<String> },
    InlineObject { fields: Fields },
}

impl ListItem {
    fn of(kind: ListItemKind) -> Self {
        Self {
            label_field: None,
            kind,
        }
    }

    pub fn string() -> Self {
        Self::of(ListItemKind::String)
    }

    pub fn boolean() -> Self {
        Self::of(ListItemKind::Boolean)
    }

    pub fn object(target: impl Into<String>) -> Self {
        Self::of(ListItemKind::Object {
            object: ObjectRef::named(target),
        })
    }

    pub fn enumeration(options: &[&str]) -> Self {
        Self::of(ListItemKind::Enum {
            options: options.iter().map(|o| o.to_string()).collect(),
        })
    }

    pub fn inline_object(fields: Vec<FieldDef>) -> Self {
        Self::of(ListItemKind::InlineObject {
            fields: Fields(fields),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComputedFieldDef {
    pub name: String,
    pub description: Option<String>,
    pub ty: ComputedFieldType,
    /// Identity of the external resolver. Never invoked here.
    pub resolve: String,
}

impl ComputedFieldDef {
    pub fn new(name: impl Into<String>, ty: ComputedFieldType, resolve: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            ty,
            resolve: resolve.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComputedFields(Vec<ComputedFieldDef>);

impl ComputedFields {
    pub fn iter(&self) -> std::slice::Iter<'_, ComputedFieldDef> {
        self.0.iter()
    }
}

// ============================================================================
// Deserialization
// ============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SchemaRepr {
    #[serde(default)]
    document_types: Ordered<DocumentDef>,
    #[serde(default)]
    object_types: Ordered<ObjectDef>,
}

impl TryFrom<SchemaRepr> for SourceSchema {
    type Error = SchemaError;

    fn try_from(repr: SchemaRepr) -> Result<Self, Self::Error> {
        let mut schema = SourceSchema::new();
        for (name, mut def) in repr.object_types.0 {
            def.name = name;
            schema.add_object(def)?;
        }
        for (name, mut def) in repr.document_types.0 {
            def.name = name;
            schema.add_document(def)?;
        }
        Ok(schema)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFieldDef {
    #[serde(rename = "type")]
    kind: String,
    label: Option<String>,
    description: Option<String>,
    default: Option<Value>,
    required: Option<bool>,
    #[serde(rename = "const")]
    const_value: Option<Value>,
    hidden: Option<bool>,
    options: Option<Vec<String>>,
    object: Option<ObjectRef>,
    document: Option<DocumentRef>,
    fields: Option<Fields>,
    of: Option<ListOf>,
    type_field: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListOf {
    Many(Vec<ListItem>),
    One(ListItem),
}

#[derive(Deserialize)]
struct RawComputedField {
    description: Option<String>,
    #[serde(rename = "type")]
    ty: ComputedFieldType,
    resolve: String,
}

impl<'de> Deserialize<'de> for Fields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let Ordered(entries) = Ordered::<RawFieldDef>::deserialize(deserializer)?;
        entries
            .into_iter()
            .map(|(name, raw)| FieldDef::from_raw(name, raw))
            .collect::<Result<Vec<_>, _>>()
            .map(Fields)
            .map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for ComputedFields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let Ordered(entries) = Ordered::<RawComputedField>::deserialize(deserializer)?;
        Ok(ComputedFields(
            entries
                .into_iter()
                .map(|(name, raw)| ComputedFieldDef {
                    name,
                    description: raw.description,
                    ty: raw.ty,
                    resolve: raw.resolve,
                })
                .collect(),
        ))
    }
}

/// A JSON object read as entries in the order they appear.
struct Ordered<V>(Vec<(String, V)>);

impl<V> Default for Ordered<V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Ordered<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedVisitor<V> {
            type Value = Ordered<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of named definitions")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, V>()? {
                    entries.push((key, value));
                }
                Ok(Ordered(entries))
            }
        }

        deserializer.deserialize_map(OrderedVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_preserves_declaration_order() {
        let schema = SourceSchema::from_json(
            r#"{
                "documentTypes": {
                    "Post": {
                        "fields": {
                            "zeta": { "type": "string" },
                            "alpha": { "type": "number" },
                            "mid": { "type": "boolean" }
                        }
                    },
                    "Author": { "fileType": "json", "fields": {} }
                }
            }"#,
        )
        .unwrap();

        let names: Vec<_> = schema.documents().names().collect();
        assert_eq!(names, ["Post", "Author"]);

        let post = schema.documents().get("Post").unwrap();
        let fields: Vec<_> = post.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(fields, ["zeta", "alpha", "mid"]);
        assert_eq!(
            schema.documents().get("Author").unwrap().file_type,
            Some(FileType::Json)
        );
    }

    #[test]
    fn parse_field_kinds() {
        let schema = SourceSchema::from_json(
            r#"{
                "documentTypes": {
                    "Page": {
                        "fields": {
                            "status": { "type": "enum", "options": ["draft", "live"] },
                            "hero": { "type": "object", "object": "Hero" },
                            "parent": { "type": "reference", "document": "Page" },
                            "tags": { "type": "list", "of": { "type": "string" } },
                            "blocks": {
                                "type": "polymorphic_list",
                                "typeField": "kind",
                                "of": [
                                    { "type": "object", "object": "Hero" },
                                    { "type": "inline_object", "fields": { "text": { "type": "markdown" } } }
                                ]
                            },
                            "color": { "type": "color", "label": "Colour" }
                        }
                    }
                },
                "objectTypes": {
                    "Hero": { "fields": { "heading": { "type": "string" } } }
                }
            }"#,
        )
        .unwrap();

        let page = schema.documents().get("Page").unwrap();
        let kinds: Vec<_> = page.fields.iter().map(|f| f.kind.type_name()).collect();
        assert_eq!(
            kinds,
            ["enum", "object", "reference", "list", "polymorphic_list", "color"]
        );

        let blocks = page.fields.get("blocks").unwrap();
        let FieldKind::PolymorphicList { of, type_field } = &blocks.kind else {
            panic!("expected polymorphic list, got {:?}", blocks.kind);
        };
        assert_eq!(type_field, "kind");
        assert_eq!(of.len(), 2);
        assert!(matches!(&of[1].kind, ListItemKind::InlineObject { fields } if fields.len() == 1));

        let color = page.fields.get("color").unwrap();
        assert_eq!(color.kind, FieldKind::Other("color".into()));
        assert_eq!(color.label.as_deref(), Some("Colour"));
    }

    #[test]
    fn parse_rejects_enum_without_options() {
        let err = SourceSchema::from_json(
            r#"{ "documentTypes": { "Post": { "fields": { "s": { "type": "enum" } } } } }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("enum field requires `options`"));
    }

    #[test]
    fn rejects_name_clash_between_tables() {
        let mut schema = SourceSchema::new();
        schema.add_object(ObjectDef::new("Post")).unwrap();
        let err = schema.add_document(DocumentDef::new("Post")).unwrap_err();
        assert_eq!(err, SchemaError::NameClash { name: "Post".into() });
    }

    #[test]
    fn rejects_duplicate_fields() {
        let mut schema = SourceSchema::new();
        let doc = DocumentDef::new("Post")
            .field(FieldDef::string("title"))
            .field(FieldDef::number("title"));
        let err = schema.add_document(doc).unwrap_err();
        assert_eq!(
            err,
            SchemaError::DuplicateField {
                owner: "Post".into(),
                field: "title".into()
            }
        );
    }

    #[test]
    fn rejects_computed_field_shadowing_field() {
        let mut schema = SourceSchema::new();
        let doc = DocumentDef::new("Post")
            .field(FieldDef::string("slug"))
            .computed(ComputedFieldDef::new("slug", ComputedFieldType::String, "slugify"));
        assert!(matches!(
            schema.add_document(doc),
            Err(SchemaError::DuplicateField { .. })
        ));
    }

    #[test]
    fn builders_cover_every_kind() {
        let mut schema = SourceSchema::new();
        schema
            .add_object(ObjectDef::new("Badge").with_description("A profile badge"))
            .unwrap();
        schema
            .add_document(
                DocumentDef::new("Profile")
                    .field(FieldDef::boolean("active"))
                    .field(FieldDef::markdown("bio"))
                    .field(FieldDef::enumeration("role", &["admin", "editor"]))
                    .field(FieldDef::list("flags", ListItem::boolean()))
                    .field(FieldDef::list("levels", ListItem::enumeration(&["low", "high"]))),
            )
            .unwrap();

        let profile = schema.documents().get("Profile").unwrap();
        let kinds: Vec<_> = profile.fields.iter().map(|f| f.kind.type_name()).collect();
        assert_eq!(kinds, ["boolean", "markdown", "enum", "list", "list"]);
        assert_eq!(
            profile.fields.get("role").unwrap().kind,
            FieldKind::Enum {
                options: vec!["admin".into(), "editor".into()]
            }
        );
        let FieldKind::List { of } = &profile.fields.get("levels").unwrap().kind else {
            panic!("expected list");
        };
        assert!(matches!(&of.kind, ListItemKind::Enum { options } if options.len() == 2));
        assert_eq!(
            schema.objects().get("Badge").unwrap().description.as_deref(),
            Some("A profile badge")
        );
    }

    #[test]
    fn rejects_names_that_are_not_identifiers() {
        let mut schema = SourceSchema::new();
        assert_eq!(
            schema.add_document(DocumentDef::new("my-post")).unwrap_err(),
            SchemaError::InvalidName {
                table: TableKind::Document,
                name: "my-post".into()
            }
        );
        assert!(matches!(
            schema.add_object(ObjectDef::new("2col")),
            Err(SchemaError::InvalidName { table: TableKind::Object, .. })
        ));

        let err = SourceSchema::from_json(r#"{ "documentTypes": { "my-post": { "fields": {} } } }"#)
            .unwrap_err();
        assert!(err.to_string().contains("document type name `my-post` is not a valid identifier"));
    }

    #[test]
    fn rejects_fields_shadowing_generated_properties() {
        let mut schema = SourceSchema::new();
        assert_eq!(
            schema
                .add_document(DocumentDef::new("Post").field(FieldDef::string("_id")))
                .unwrap_err(),
            SchemaError::ReservedField {
                owner: "Post".into(),
                field: "_id".into()
            }
        );
        assert!(matches!(
            schema.add_document(
                DocumentDef::new("Page")
                    .computed(ComputedFieldDef::new("_typeName", ComputedFieldType::String, "tag"))
            ),
            Err(SchemaError::ReservedField { .. })
        ));
        assert!(matches!(
            schema.add_object(ObjectDef::new("Card").field(FieldDef::string("_typeName"))),
            Err(SchemaError::ReservedField { .. })
        ));
        // Objects carry no file path, so `_id` is free for them.
        schema
            .add_object(ObjectDef::new("Row").field(FieldDef::string("_id")))
            .unwrap();
    }
}
