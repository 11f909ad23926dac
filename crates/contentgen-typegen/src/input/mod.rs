//! Source schema model and its normalization.
//!
//! The source schema carries deferred references; [`normalize`] resolves
//! them into the canonical [`CoreSchema`](crate::ir::CoreSchema).

mod collect;
mod normalizer;
pub mod source;

pub use collect::collect_object_defs;
pub use normalizer::{CONTENT_FIELD, normalize};
pub use source::SourceSchema;
