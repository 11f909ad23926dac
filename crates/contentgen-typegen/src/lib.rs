//! Content schema normalization and TypeScript type rendering.
//!
//! `contentgen-typegen` turns a source-authored content schema into a
//! canonical, deduplicated intermediate representation and renders that
//! representation as TypeScript type declarations.
//!
//! # Architecture
//!
//! ```text
//! Input                    IR                Output
//! ──────────────────     ─────────────     ───────────────────
//! SourceSchema      ─┐                  ┌─> TypeScript types
//!  (deferred refs)   ├─> CoreSchema ────┘
//! collect_object_defs┘   (ir.rs)
//! ```
//!
//! # Example
//!
//! ```
//! use contentgen_typegen::{normalize, output::typescript::render_types, SourceSchema};
//!
//! let schema = SourceSchema::from_json(r#"{
//!     "documentTypes": {
//!         "Post": { "fields": { "title": { "type": "string", "required": true } } }
//!     }
//! }"#).unwrap();
//!
//! let core = normalize(&schema).unwrap();
//! let types = render_types(&core);
//! assert!(types.documents[0].type_def.contains("title: string"));
//! ```

pub mod error;
pub mod input;
pub mod ir;
pub mod output;
pub mod table;

pub use error::{SchemaError, TableKind};
pub use input::{SourceSchema, collect_object_defs, normalize};
pub use ir::CoreSchema;
pub use output::typescript::{Definition, RenderedType, RenderedTypes, render_definition, render_types};
pub use table::{DefTable, Named};
