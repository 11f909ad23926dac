//! Content package generation.
//!
//! `contentgen` drives a full generation run: it asks a [`ContentSource`]
//! for the realized content cache and the raw schema, normalizes the schema
//! with [`contentgen_typegen`], and emits the generated package (per-type
//! data modules, a barrel module, a declaration module and a manifest).
//!
//! ```no_run
//! use contentgen::{EmitOptions, GenerateOptions, JsonSource, generate_dotpkg};
//! use std::path::Path;
//!
//! # async fn run() -> Result<(), contentgen::GenerateError> {
//! let source = JsonSource::new("contentgen.schema.json", ".contentgen/cache.json");
//! let summary = generate_dotpkg(
//!     &source,
//!     Path::new(".contentgen/generated"),
//!     &GenerateOptions::default(),
//!     &EmitOptions::default(),
//! )
//! .await?;
//! println!("{} documents", summary.documents);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod commands;
pub mod config;
pub mod dotpkg;
pub mod error;
pub mod source;

pub use cache::{Cache, Document, Partition, TypeDocuments};
pub use config::ContentgenConfig;
pub use dotpkg::{
    Artifact, EmitOptions, GenerateOptions, GenerationSummary, build_artifacts, generate_dotpkg,
    write_artifacts,
};
pub use error::{GenerateError, SourceError};
pub use source::{ContentSource, FetchOptions, JsonSource};
