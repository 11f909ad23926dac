//! Integration tests for contentgen-typegen.

use contentgen_typegen::{
    CoreSchema, SchemaError, SourceSchema, ir::FieldKind, normalize, render_types,
};

fn load_fixture(name: &str) -> SourceSchema {
    let path = format!("tests/fixtures/{}.json", name);
    let content =
        std::fs::read_to_string(&path).unwrap_or_else(|_| panic!("fixture {} not found", name));
    SourceSchema::from_json(&content).expect("invalid schema")
}

fn object_names(schema: &CoreSchema) -> Vec<&str> {
    schema.object_def_map.names().collect()
}

#[test]
fn objects_follow_discovery_order() {
    let core = normalize(&load_fixture("blog")).unwrap();

    // Post.author -> Author -> Image, Author.mentor (seen), then Post.blocks
    // -> Quote (Author seen) -> Gallery (Image seen). Unused is unreachable.
    assert_eq!(
        object_names(&core),
        ["Author", "Image", "Quote", "Gallery"]
    );
    assert_eq!(
        core.document_def_map.names().collect::<Vec<_>>(),
        ["Post", "Series"]
    );
}

#[test]
fn cyclic_objects_appear_once() {
    let core = normalize(&load_fixture("cycle")).unwrap();
    assert_eq!(object_names(&core), ["A", "B"]);

    let types = render_types(&core);
    let a = &types.objects[0];
    assert_eq!(a.type_name, "A");
    assert!(a.type_def.contains("  b: B\n"));
    assert!(types.objects[1].type_def.contains("  a: A\n"));
}

#[test]
fn json_document_has_no_content_field() {
    let core = normalize(&load_fixture("blog")).unwrap();

    let series = core.document_def_map.get("Series").unwrap();
    assert!(series.field_defs.iter().all(|f| f.name != "content"));

    let post = core.document_def_map.get("Post").unwrap();
    let last = post.field_defs.last().unwrap();
    assert_eq!(last.name, "content");
    assert_eq!(last.kind, FieldKind::Markdown);
}

#[test]
fn renders_post_type() {
    let core = normalize(&load_fixture("blog")).unwrap();
    let types = render_types(&core);

    let names: Vec<_> = types.documents.iter().map(|t| t.type_name.as_str()).collect();
    assert_eq!(names, ["Post", "Series"]);
    let objects: Vec<_> = types.objects.iter().map(|t| t.type_name.as_str()).collect();
    assert_eq!(objects, ["Author", "Gallery", "Image", "Quote"]);

    let post = &types.documents[0].type_def;
    assert!(post.starts_with("/** A blog post */\nexport type Post = {\n"));
    assert!(post.contains("  title: string\n"));
    assert!(post.contains("  published?: IsoDateTimeString\n"));
    assert!(post.contains("  status?: 'draft' | 'published'\n"));
    assert!(post.contains("  author: Author\n"));
    assert!(post.contains("  series?: Series\n"));
    assert!(post.contains("  tags?: string[]\n"));
    assert!(post.contains(
        "  /** Items are discriminated by `type` */\n  blocks?: (Quote | Gallery)[]\n"
    ));
    assert!(post.contains("  /** Default markdown file content */\n  content?: Markdown\n"));
    assert!(post.ends_with("  /** URL slug */\n  slug: string\n}"));

    let series = &types.documents[1].type_def;
    assert!(series.contains("  posts?: { cover?: Image }[]\n"));
}

#[test]
fn rendering_is_byte_identical() {
    let schema = load_fixture("blog");
    let first = render_types(&normalize(&schema).unwrap());
    let second = render_types(&normalize(&schema).unwrap());
    assert_eq!(first, second);
}

#[test]
fn unresolved_reference_is_fatal() {
    let schema = SourceSchema::from_json(
        r#"{ "documentTypes": { "Post": { "fields": { "a": { "type": "object", "object": "Nope" } } } } }"#,
    )
    .unwrap();

    assert_eq!(
        normalize(&schema).unwrap_err(),
        SchemaError::UnresolvedObject {
            owner: "Post".into(),
            field: "a".into(),
            target: "Nope".into(),
        }
    );
}

#[test]
fn duplicate_document_names_are_rejected() {
    // JSON object keys may repeat; the second definition must not win.
    let err = SourceSchema::from_json(
        r#"{ "documentTypes": { "Post": { "fields": {} }, "Post": { "fields": {} } } }"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("document type `Post` is defined more than once"));
}
