//! Output backends.
//!
//! Each backend takes a [`CoreSchema`](crate::ir::CoreSchema) and produces code.

pub mod typescript;
