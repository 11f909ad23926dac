//! Realized content cache.
//!
//! The cache is produced by a content source: an ordered list of parsed
//! documents, each tagged with the name of its document type.

use contentgen_typegen::CoreSchema;
use contentgen_typegen::output::typescript::TYPE_NAME_FIELD;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cache {
    pub documents: Vec<Document>,
}

/// One stored document. Field order is kept as loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Build a document from a JSON value, if it is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    pub fn type_name(&self) -> Option<&str> {
        self.0.get(TYPE_NAME_FIELD).and_then(Value::as_str)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Documents of one type, in cache order.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDocuments<'a> {
    pub type_name: &'a str,
    pub documents: Vec<&'a Document>,
}

/// A cache split by document type.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition<'a> {
    /// One entry per document type, in schema declaration order.
    pub by_type: Vec<TypeDocuments<'a>>,
    /// Documents whose tag names no document type.
    pub unmatched: Vec<&'a Document>,
}

impl Cache {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// Split the cache by document type. Relative order within each type is
    /// the cache order.
    pub fn partition<'a>(&'a self, schema: &'a CoreSchema) -> Partition<'a> {
        let mut by_type: Vec<TypeDocuments<'a>> = schema
            .document_def_map
            .names()
            .map(|type_name| TypeDocuments {
                type_name,
                documents: Vec::new(),
            })
            .collect();
        let slots: HashMap<&str, usize> = by_type
            .iter()
            .enumerate()
            .map(|(i, t)| (t.type_name, i))
            .collect();

        let mut unmatched = Vec::new();
        for doc in &self.documents {
            match doc.type_name().and_then(|name| slots.get(name)) {
                Some(&slot) => by_type[slot].documents.push(doc),
                None => unmatched.push(doc),
            }
        }

        Partition { by_type, unmatched }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contentgen_typegen::{SourceSchema, normalize};
    use serde_json::json;

    fn doc(value: Value) -> Document {
        Document::from_value(value).unwrap()
    }

    fn schema() -> CoreSchema {
        let source = SourceSchema::from_json(
            r#"{ "documentTypes": { "A": { "fields": {} }, "B": { "fields": {} } } }"#,
        )
        .unwrap();
        normalize(&source).unwrap()
    }

    #[test]
    fn partition_keeps_relative_order() {
        let cache = Cache::new(vec![
            doc(json!({ "_typeName": "A", "n": 1 })),
            doc(json!({ "_typeName": "B", "n": 2 })),
            doc(json!({ "_typeName": "A", "n": 3 })),
        ]);
        let schema = schema();
        let partition = cache.partition(&schema);

        assert_eq!(partition.by_type.len(), 2);
        let a = &partition.by_type[0];
        assert_eq!(a.type_name, "A");
        let ns: Vec<_> = a.documents.iter().map(|d| d.fields()["n"].clone()).collect();
        assert_eq!(ns, [json!(1), json!(3)]);
        assert_eq!(partition.by_type[1].documents.len(), 1);
        assert!(partition.unmatched.is_empty());
    }

    #[test]
    fn unknown_tags_are_unmatched() {
        let cache = Cache::new(vec![
            doc(json!({ "_typeName": "C" })),
            doc(json!({ "title": "untagged" })),
        ]);
        let schema = schema();
        let partition = cache.partition(&schema);

        assert!(partition.by_type.iter().all(|t| t.documents.is_empty()));
        assert_eq!(partition.unmatched.len(), 2);
    }

    #[test]
    fn type_tag_matches_rendered_discriminator() {
        let mut fields = Map::new();
        fields.insert(TYPE_NAME_FIELD.to_string(), json!("A"));
        let tagged = Document::new(fields);
        assert_eq!(tagged.type_name(), Some("A"));

        let mut fields = Map::new();
        fields.insert(TYPE_NAME_FIELD.to_string(), json!(7));
        assert_eq!(Document::new(fields).type_name(), None);
    }

    #[test]
    fn document_keeps_field_order() {
        let cache: Cache = serde_json::from_str(
            r#"{ "documents": [ { "_typeName": "A", "zeta": 1, "alpha": 2 } ] }"#,
        )
        .unwrap();
        let keys: Vec<_> = cache.documents[0].fields().keys().cloned().collect();
        assert_eq!(keys, ["_typeName", "zeta", "alpha"]);
    }
}
