//! TypeScript structural type rendering.
//!
//! Named object and document types are always referenced by name, never
//! expanded, so self- and mutually-referential types render like any other.
//! Only inline objects are written out in place.

use crate::ir::{
    ComputedFieldType, CoreSchema, DocumentDef, FieldDef, FieldKind, ListItem, ListItemKind, ObjectDef,
};

/// Type used for `date` fields. Declared alongside the generated types.
pub const DATE_TYPE: &str = "IsoDateTimeString";
/// Type used for `markdown` fields. Imported from the runtime module.
pub const MARKDOWN_TYPE: &str = "Markdown";
/// Discriminator field carried by every generated type.
pub const TYPE_NAME_FIELD: &str = "_typeName";
/// Synthetic file path property of document types.
pub const ID_FIELD: &str = "_id";

/// A document or object definition to render.
#[derive(Debug, Clone, Copy)]
pub enum Definition<'a> {
    Document(&'a DocumentDef),
    Object(&'a ObjectDef),
}

impl<'a> Definition<'a> {
    pub fn name(&self) -> &'a str {
        match *self {
            Definition::Document(d) => &d.name,
            Definition::Object(o) => &o.name,
        }
    }

    fn description(&self) -> Option<&'a str> {
        match *self {
            Definition::Document(d) => d.description.as_deref(),
            Definition::Object(o) => o.description.as_deref(),
        }
    }

    fn field_defs(&self) -> &'a [FieldDef] {
        match *self {
            Definition::Document(d) => &d.field_defs,
            Definition::Object(o) => &o.field_defs,
        }
    }
}

/// One rendered type declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedType {
    pub type_name: String,
    pub type_def: String,
}

/// All rendered declarations of a schema, each group sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedTypes {
    pub documents: Vec<RenderedType>,
    pub objects: Vec<RenderedType>,
}

/// Render every document and object type of a schema.
///
/// Both groups are sorted by name so the output does not depend on
/// declaration or discovery order.
pub fn render_types(schema: &CoreSchema) -> RenderedTypes {
    let documents = schema
        .document_def_map
        .sorted()
        .into_iter()
        .map(|d| rendered(Definition::Document(d)))
        .collect();
    let objects = schema
        .object_def_map
        .sorted()
        .into_iter()
        .map(|o| rendered(Definition::Object(o)))
        .collect();

    RenderedTypes { documents, objects }
}

fn rendered(def: Definition<'_>) -> RenderedType {
    RenderedType {
        type_name: def.name().to_string(),
        type_def: render_definition(def),
    }
}

/// Render one definition as an exported TypeScript type alias.
pub fn render_definition(def: Definition<'_>) -> String {
    let mut out = String::new();

    if let Some(description) = def.description() {
        out.push_str(&doc_comment(&[description], ""));
    }
    out.push_str(&format!("export type {} = {{\n", def.name()));

    if let Definition::Document(_) = def {
        out.push_str("  /** File path relative to the content directory */\n");
        out.push_str(&format!("  {}: string\n", ID_FIELD));
    }
    out.push_str(&format!(
        "  {}: {}\n",
        TYPE_NAME_FIELD,
        string_literal(def.name())
    ));

    for field in def.field_defs() {
        render_field(&mut out, field);
    }

    if let Definition::Document(doc) = def {
        for computed in &doc.computed_fields {
            if let Some(description) = &computed.description {
                out.push_str(&doc_comment(&[description.as_str()], "  "));
            }
            out.push_str(&format!(
                "  {}: {}\n",
                property_name(&computed.name),
                computed_type(computed.ty)
            ));
        }
    }

    out.push('}');
    out
}

fn render_field(out: &mut String, field: &FieldDef) {
    let mut docs: Vec<String> = Vec::new();
    if let Some(description) = &field.description {
        docs.push(description.clone());
    }
    if let FieldKind::PolymorphicList { type_field, .. } = &field.kind {
        docs.push(format!("Items are discriminated by `{}`", type_field));
    }
    if !docs.is_empty() {
        let lines: Vec<&str> = docs.iter().map(String::as_str).collect();
        out.push_str(&doc_comment(&lines, "  "));
    }

    out.push_str(&format!(
        "  {}{}: {}\n",
        property_name(&field.name),
        if field.is_required() { "" } else { "?" },
        type_expr(&field.kind)
    ));
}

/// TypeScript type expression for a field kind.
pub fn type_expr(kind: &FieldKind) -> String {
    match kind {
        FieldKind::String => "string".to_string(),
        FieldKind::Boolean => "boolean".to_string(),
        FieldKind::Number => "number".to_string(),
        FieldKind::Date => DATE_TYPE.to_string(),
        FieldKind::Markdown => MARKDOWN_TYPE.to_string(),
        FieldKind::Enum { options } => literal_union(options),
        FieldKind::Object { object_name } => object_name.clone(),
        FieldKind::InlineObject { field_defs } => inline_object(field_defs),
        FieldKind::Reference { document_name } => document_name.clone(),
        FieldKind::List { of } => {
            let (expr, union) = element(of);
            array_of(expr, union)
        }
        FieldKind::PolymorphicList { of, type_field } => {
            let elements: Vec<String> = of
                .iter()
                .map(|item| match &item.kind {
                    ListItemKind::InlineObject { field_defs } => {
                        tagged_inline_object(field_defs, type_field)
                    }
                    _ => element(item).0,
                })
                .collect();
            match elements.len() {
                0 => "never[]".to_string(),
                1 => array_of(elements[0].clone(), element(&of[0]).1),
                _ => array_of(elements.join(" | "), true),
            }
        }
        FieldKind::Unknown { .. } => "any".to_string(),
    }
}

/// Element type of a list, and whether it is a top-level union.
fn element(item: &ListItem) -> (String, bool) {
    match &item.kind {
        ListItemKind::String => ("string".to_string(), false),
        ListItemKind::Boolean => ("boolean".to_string(), false),
        ListItemKind::Object { object_name } => (object_name.clone(), false),
        ListItemKind::Enum { options } => (literal_union(options), options.len() > 1),
        ListItemKind::InlineObject { field_defs } => (inline_object(field_defs), false),
    }
}

fn array_of(element: String, union: bool) -> String {
    if union {
        format!("({})[]", element)
    } else {
        format!("{}[]", element)
    }
}

fn inline_object(fields: &[FieldDef]) -> String {
    if fields.is_empty() {
        return "{}".to_string();
    }
    format!("{{ {} }}", members(fields).join("; "))
}

/// Inline item of a polymorphic list. Carries the discriminator unless the
/// item declares it itself.
fn tagged_inline_object(fields: &[FieldDef], type_field: &str) -> String {
    let mut members = members(fields);
    if !fields.iter().any(|f| f.name == type_field) {
        members.insert(0, format!("{}: string", property_name(type_field)));
    }
    format!("{{ {} }}", members.join("; "))
}

fn members(fields: &[FieldDef]) -> Vec<String> {
    fields
        .iter()
        .map(|f| {
            format!(
                "{}{}: {}",
                property_name(&f.name),
                if f.is_required() { "" } else { "?" },
                type_expr(&f.kind)
            )
        })
        .collect()
}

fn computed_type(ty: ComputedFieldType) -> &'static str {
    match ty {
        ComputedFieldType::String => "string",
        ComputedFieldType::Number => "number",
        ComputedFieldType::Boolean => "boolean",
        ComputedFieldType::Date => DATE_TYPE,
        ComputedFieldType::Json => "any",
        ComputedFieldType::List => "any[]",
    }
}

fn literal_union(options: &[String]) -> String {
    if options.is_empty() {
        return "never".to_string();
    }
    options
        .iter()
        .map(|o| string_literal(o))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Single-quoted TypeScript string literal.
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Whether `name` can be used unquoted as a JavaScript identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

/// Property key, quoted unless it is a plain identifier.
fn property_name(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        string_literal(name)
    }
}

fn doc_comment(lines: &[&str], indent: &str) -> String {
    let lines: Vec<&str> = lines.iter().copied().flat_map(str::lines).collect();
    if lines.len() == 1 {
        return format!("{}/** {} */\n", indent, lines[0].replace("*/", "*\\/"));
    }
    let mut out = format!("{}/**\n", indent);
    for line in lines {
        out.push_str(&format!("{} * {}\n", indent, line.replace("*/", "*\\/")));
    }
    out.push_str(&format!("{} */\n", indent));
    out
}
