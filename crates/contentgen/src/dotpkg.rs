//! Artifact emission.
//!
//! A generation run turns the canonical schema and the realized content
//! cache into the generated package:
//!
//! ```text
//! <target>/
//!   package.json      manifest
//!   index.js          barrel: re-exports every data module, defines allDocuments
//!   index.d.ts        declaration module
//!   all<Type>.js      one data module per document type
//! ```
//!
//! Building the artifacts is pure. Only [`write_artifacts`] touches the
//! filesystem, issuing one independent write per artifact.

use crate::cache::{Cache, Document, TypeDocuments};
use crate::error::GenerateError;
use crate::source::{ContentSource, FetchOptions};
use contentgen_typegen::output::typescript::{DATE_TYPE, MARKDOWN_TYPE, TYPE_NAME_FIELD};
use contentgen_typegen::{CoreSchema, normalize, render_types};
use futures::future::join_all;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const GENERATED_NOTICE: &str = "// NOTE This file is auto-generated by contentgen";

pub const PACKAGE_FILE: &str = "package.json";
pub const BARREL_FILE: &str = "index.js";
pub const DECLARATION_FILE: &str = "index.d.ts";

/// Options of a generation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Ask the content source to keep watching for changes.
    pub watch_data: bool,
}

/// Identity of the generated package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    pub package_name: String,
    pub package_version: String,
    /// Module the `isType` helper and `Markdown` type are imported from.
    pub runtime_module: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            package_name: "dot-contentgen".to_string(),
            package_version: "0.0.0".to_string(),
            runtime_module: "contentgen".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct PackageManifest<'a> {
    name: &'a str,
    version: &'a str,
    module: &'a str,
    types: &'a str,
}

/// One file of the generated package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub content: String,
}

impl Artifact {
    fn new(file_name: impl Into<String>, content: String) -> Self {
        Self {
            file_name: file_name.into(),
            content,
        }
    }
}

/// Outcome of a successful generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    pub documents: usize,
    pub document_types: usize,
    pub object_types: usize,
    pub written: Vec<PathBuf>,
}

/// Run the whole pipeline: fetch, normalize, build, write.
///
/// The cache, the schema and the target directory are prepared
/// concurrently. Any source or schema error aborts the run before an
/// artifact is written.
pub async fn generate_dotpkg<S: ContentSource>(
    source: &S,
    target_dir: &Path,
    options: &GenerateOptions,
    emit: &EmitOptions,
) -> Result<GenerationSummary, GenerateError> {
    let fetch = FetchOptions {
        watch: options.watch_data,
        force: true,
    };

    let (cache, source_schema, ()) = tokio::try_join!(
        async { Ok::<_, GenerateError>(source.fetch_data(fetch).await?) },
        async { Ok::<_, GenerateError>(source.provide_schema().await?) },
        make_target_dir(target_dir),
    )?;

    let schema = normalize(&source_schema)?;
    let artifacts = build_artifacts(&schema, &cache, emit)?;
    let written = write_artifacts(target_dir, &artifacts).await?;

    info!(
        documents = cache.documents.len(),
        target = %target_dir.display(),
        "generated package"
    );

    Ok(GenerationSummary {
        documents: cache.documents.len(),
        document_types: schema.document_def_map.len(),
        object_types: schema.object_def_map.len(),
        written,
    })
}

async fn make_target_dir(path: &Path) -> Result<(), GenerateError> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|source| GenerateError::CreateDir {
            path: path.to_path_buf(),
            source,
        })
}

/// Build every artifact of the package.
pub fn build_artifacts(
    schema: &CoreSchema,
    cache: &Cache,
    options: &EmitOptions,
) -> Result<Vec<Artifact>, GenerateError> {
    let partition = cache.partition(schema);
    for doc in &partition.unmatched {
        warn!(
            type_name = doc.type_name().unwrap_or("<missing>"),
            "document has no matching document type, leaving it out"
        );
    }

    let mut artifacts = vec![
        Artifact::new(PACKAGE_FILE, package_manifest(options)?),
        Artifact::new(BARREL_FILE, barrel_module(schema, options)),
        Artifact::new(DECLARATION_FILE, declaration_module(schema, options)),
    ];
    for TypeDocuments {
        type_name,
        documents,
    } in &partition.by_type
    {
        debug!(type_name, documents = documents.len(), "partitioned documents");
        artifacts.push(Artifact::new(
            data_file_name(type_name),
            data_module(type_name, documents)?,
        ));
    }

    Ok(artifacts)
}

/// Name of the constant holding all documents of a type.
pub fn data_const_name(type_name: &str) -> String {
    format!("all{}", type_name)
}

pub fn data_file_name(type_name: &str) -> String {
    format!("{}.js", data_const_name(type_name))
}

/// Data module of one document type: a single exported array literal.
pub fn data_module(type_name: &str, documents: &[&Document]) -> Result<String, GenerateError> {
    let json =
        serde_json::to_string_pretty(documents).map_err(|source| GenerateError::Serialize {
            artifact: data_file_name(type_name),
            source,
        })?;
    Ok(format!(
        "export const {} = {}\n",
        data_const_name(type_name),
        json
    ))
}

pub fn package_manifest(options: &EmitOptions) -> Result<String, GenerateError> {
    let manifest = PackageManifest {
        name: &options.package_name,
        version: &options.package_version,
        module: "./index.js",
        types: "./index.d.ts",
    };
    let json =
        serde_json::to_string_pretty(&manifest).map_err(|source| GenerateError::Serialize {
            artifact: PACKAGE_FILE.to_string(),
            source,
        })?;
    Ok(json + "\n")
}

/// Barrel module. Data modules appear in document declaration order.
pub fn barrel_module(schema: &CoreSchema, options: &EmitOptions) -> String {
    let names: Vec<&str> = schema.document_def_map.names().collect();

    let mut blocks = vec![
        GENERATED_NOTICE.to_string(),
        format!("export {{ isType }} from '{}/client'", options.runtime_module),
    ];
    if !names.is_empty() {
        let reexports: Vec<String> = names
            .iter()
            .map(|n| format!("export * from './{}'", data_file_name(n)))
            .collect();
        let imports: Vec<String> = names
            .iter()
            .map(|n| format!("import {{ {} }} from './{}'", data_const_name(n), data_file_name(n)))
            .collect();
        blocks.push(format!("{}\n{}", reexports.join("\n"), imports.join("\n")));
    }
    let spreads: Vec<String> = names
        .iter()
        .map(|n| format!("...{}", data_const_name(n)))
        .collect();
    blocks.push(format!("export const allDocuments = [{}]", spreads.join(", ")));

    blocks.join("\n\n") + "\n"
}

/// Declaration module: every rendered type plus the ambient declarations of
/// the barrel's constants.
pub fn declaration_module(schema: &CoreSchema, options: &EmitOptions) -> String {
    let types = render_types(schema);
    let document_names: Vec<&str> = types.documents.iter().map(|t| t.type_name.as_str()).collect();
    let object_names: Vec<&str> = types.objects.iter().map(|t| t.type_name.as_str()).collect();
    let runtime = &options.runtime_module;

    let type_map = if document_names.is_empty() {
        "{}".to_string()
    } else {
        let entries: String = document_names
            .iter()
            .map(|n| format!("  {}: {}\n", n, n))
            .collect();
        format!("{{\n{}}}", entries)
    };

    let mut constants: Vec<String> = schema
        .document_def_map
        .names()
        .map(|n| format!("export declare const {}: {}[]", data_const_name(n), n))
        .collect();
    constants.push("export declare const allDocuments: DocumentTypes[]".to_string());

    let mut blocks = vec![
        GENERATED_NOTICE.to_string(),
        format!(
            "import type {{ {md} }} from '{runtime}/core'\nexport {{ isType }} from '{runtime}/client'",
            md = MARKDOWN_TYPE,
            runtime = runtime
        ),
        format!(
            "export type {} = string\nexport type {{ {} }}",
            DATE_TYPE, MARKDOWN_TYPE
        ),
        "export interface ContentgenGenTypes {\n  documentTypes: DocumentTypes\n  documentTypeMap: DocumentTypeMap\n  documentTypeNames: DocumentTypeNames\n  allTypeNames: AllTypeNames\n}".to_string(),
        "declare global {\n  interface ContentgenGen extends ContentgenGenTypes {}\n}".to_string(),
        format!("export type DocumentTypeMap = {}", type_map),
        "export type AllTypes = DocumentTypes | ObjectTypes\nexport type AllTypeNames = DocumentTypeNames | ObjectTypeNames".to_string(),
        format!(
            "export type DocumentTypes = {}\nexport type DocumentTypeNames = DocumentTypes['{}']",
            union(&document_names),
            TYPE_NAME_FIELD
        ),
        format!(
            "export type ObjectTypes = {}\nexport type ObjectTypeNames = ObjectTypes['{}']",
            union(&object_names),
            TYPE_NAME_FIELD
        ),
        constants.join("\n"),
        "// Document types".to_string(),
    ];
    blocks.extend(types.documents.into_iter().map(|t| t.type_def));
    blocks.push("// Object types".to_string());
    blocks.extend(types.objects.into_iter().map(|t| t.type_def));

    blocks.join("\n\n") + "\n"
}

fn union(names: &[&str]) -> String {
    if names.is_empty() {
        "never".to_string()
    } else {
        names.join(" | ")
    }
}

/// Write all artifacts into `target_dir` concurrently.
///
/// Each artifact goes to a temporary sibling first and is renamed into
/// place. Every failure is logged; the first one is returned once all
/// writes have settled.
pub async fn write_artifacts(
    target_dir: &Path,
    artifacts: &[Artifact],
) -> Result<Vec<PathBuf>, GenerateError> {
    let writes = artifacts
        .iter()
        .map(|a| write_artifact(target_dir.join(&a.file_name), &a.content));
    let results = join_all(writes).await;

    let mut written = Vec::with_capacity(results.len());
    let mut first_error = None;
    for result in results {
        match result {
            Ok(path) => written.push(path),
            Err(err) => {
                warn!(error = %err, "artifact write failed");
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
        }
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(written),
    }
}

async fn write_artifact(path: PathBuf, content: &str) -> Result<PathBuf, GenerateError> {
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    let result = match tokio::fs::write(&tmp, content).await {
        Ok(()) => tokio::fs::rename(&tmp, &path).await,
        Err(err) => Err(err),
    };
    if let Err(source) = result {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(GenerateError::Write { path, source });
    }

    debug!(path = %path.display(), bytes = content.len(), "wrote artifact");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contentgen_typegen::SourceSchema;
    use serde_json::json;

    fn schema(json: &str) -> CoreSchema {
        normalize(&SourceSchema::from_json(json).unwrap()).unwrap()
    }

    fn post_schema() -> CoreSchema {
        schema(r#"{ "documentTypes": { "Post": { "fields": { "title": { "type": "string" } } } } }"#)
    }

    #[test]
    fn data_module_exports_array() {
        let doc = Document::from_value(json!({ "_typeName": "Post", "title": "Hi" })).unwrap();
        let module = data_module("Post", &[&doc]).unwrap();

        assert_eq!(
            module,
            "export const allPost = [\n  {\n    \"_typeName\": \"Post\",\n    \"title\": \"Hi\"\n  }\n]\n"
        );
        assert_eq!(data_module("Post", &[]).unwrap(), "export const allPost = []\n");
    }

    #[test]
    fn barrel_follows_declaration_order() {
        let schema = schema(
            r#"{ "documentTypes": { "Post": { "fields": {} }, "Author": { "fields": {} } } }"#,
        );
        let barrel = barrel_module(&schema, &EmitOptions::default());

        assert_eq!(
            barrel,
            "// NOTE This file is auto-generated by contentgen\n\
             \n\
             export { isType } from 'contentgen/client'\n\
             \n\
             export * from './allPost.js'\n\
             export * from './allAuthor.js'\n\
             import { allPost } from './allPost.js'\n\
             import { allAuthor } from './allAuthor.js'\n\
             \n\
             export const allDocuments = [...allPost, ...allAuthor]\n"
        );
    }

    #[test]
    fn empty_barrel() {
        let barrel = barrel_module(&CoreSchema::default(), &EmitOptions::default());
        assert!(barrel.ends_with("'contentgen/client'\n\nexport const allDocuments = []\n"));
    }

    #[test]
    fn manifest_uses_options() {
        let options = EmitOptions {
            package_name: "dot-site".into(),
            package_version: "1.2.3".into(),
            ..EmitOptions::default()
        };
        let manifest: serde_json::Value =
            serde_json::from_str(&package_manifest(&options).unwrap()).unwrap();

        assert_eq!(
            manifest,
            json!({
                "name": "dot-site",
                "version": "1.2.3",
                "module": "./index.js",
                "types": "./index.d.ts"
            })
        );
    }

    #[test]
    fn declaration_module_layout() {
        let declarations = declaration_module(&post_schema(), &EmitOptions::default());

        assert_eq!(
            declarations,
            "// NOTE This file is auto-generated by contentgen\n\
             \n\
             import type { Markdown } from 'contentgen/core'\n\
             export { isType } from 'contentgen/client'\n\
             \n\
             export type IsoDateTimeString = string\n\
             export type { Markdown }\n\
             \n\
             export interface ContentgenGenTypes {\n\
             \x20 documentTypes: DocumentTypes\n\
             \x20 documentTypeMap: DocumentTypeMap\n\
             \x20 documentTypeNames: DocumentTypeNames\n\
             \x20 allTypeNames: AllTypeNames\n\
             }\n\
             \n\
             declare global {\n\
             \x20 interface ContentgenGen extends ContentgenGenTypes {}\n\
             }\n\
             \n\
             export type DocumentTypeMap = {\n\
             \x20 Post: Post\n\
             }\n\
             \n\
             export type AllTypes = DocumentTypes | ObjectTypes\n\
             export type AllTypeNames = DocumentTypeNames | ObjectTypeNames\n\
             \n\
             export type DocumentTypes = Post\n\
             export type DocumentTypeNames = DocumentTypes['_typeName']\n\
             \n\
             export type ObjectTypes = never\n\
             export type ObjectTypeNames = ObjectTypes['_typeName']\n\
             \n\
             export declare const allPost: Post[]\n\
             export declare const allDocuments: DocumentTypes[]\n\
             \n\
             // Document types\n\
             \n\
             export type Post = {\n\
             \x20 /** File path relative to the content directory */\n\
             \x20 _id: string\n\
             \x20 _typeName: 'Post'\n\
             \x20 title?: string\n\
             \x20 /** Default markdown file content */\n\
             \x20 content?: Markdown\n\
             }\n\
             \n\
             // Object types\n"
        );
    }

    #[test]
    fn empty_schema_declares_never() {
        let declarations = declaration_module(&CoreSchema::default(), &EmitOptions::default());

        assert!(declarations.contains("export type DocumentTypeMap = {}\n"));
        assert!(declarations.contains("export type DocumentTypes = never\n"));
        assert!(declarations.contains("export type ObjectTypes = never\n"));
    }

    #[test]
    fn declarations_sort_types() {
        let schema = schema(
            r#"{
                "documentTypes": {
                    "Zebra": { "fileType": "json", "fields": { "m": { "type": "object", "object": "Mane" } } },
                    "Ant": { "fileType": "json", "fields": {} }
                },
                "objectTypes": { "Mane": { "fields": {} } }
            }"#,
        );
        let declarations = declaration_module(&schema, &EmitOptions::default());

        assert!(declarations.contains("export type DocumentTypes = Ant | Zebra\n"));
        assert!(declarations.contains("export type ObjectTypes = Mane\n"));
        let ant = declarations.find("export type Ant = {").unwrap();
        let zebra = declarations.find("export type Zebra = {").unwrap();
        let mane = declarations.find("export type Mane = {").unwrap();
        assert!(ant < zebra && zebra < mane);
        // Declaration order drives the constants, like the barrel.
        assert!(declarations.contains(
            "export declare const allZebra: Zebra[]\nexport declare const allAnt: Ant[]\n"
        ));
    }

    #[test]
    fn unmatched_documents_are_left_out() {
        let cache = Cache::new(vec![
            Document::from_value(json!({ "_typeName": "Post", "title": "a" })).unwrap(),
            Document::from_value(json!({ "_typeName": "Page", "title": "b" })).unwrap(),
        ]);
        let artifacts = build_artifacts(&post_schema(), &cache, &EmitOptions::default()).unwrap();

        let names: Vec<_> = artifacts.iter().map(|a| a.file_name.as_str()).collect();
        assert_eq!(names, ["package.json", "index.js", "index.d.ts", "allPost.js"]);
        assert!(!artifacts[3].content.contains("Page"));
    }
}
