//! brine-fbs
//!
//! File-system front end for the Brine FlatBuffers compiler.
//!
//! - `FileResolver`: loads `include`d schemas from disk
//! - `load_schema` / `generate_swift`: one-call helpers for a root `.fbs` file
//! - `schema_to_json`: dumps a parsed schema for inspection

mod resolver;

use std::path::Path;

pub use brine_fbs_compiler::error::FbsError;
pub use brine_fbs_compiler::types::Schema;
pub use brine_fbs_compiler::{compile_schema_to_swift, namespace_prefixes, IncludeResolver};
pub use resolver::FileResolver;

/// Reads and strictly parses the schema at `path`, loading its includes
/// relative to the including file.
pub fn load_schema(path: &Path) -> Result<Schema, FbsError> {
    FileResolver::new().compile_root(path)
}

/// Loads the schema at `path` and generates Swift source for it.
pub fn generate_swift(path: &Path, with_import: bool) -> Result<String, FbsError> {
    let schema = load_schema(path)?;
    Ok(compile_schema_to_swift(&schema, with_import))
}

/// Pretty-printed JSON of the parsed schema, children included.
pub fn schema_to_json(schema: &Schema) -> Result<String, FbsError> {
    serde_json::to_string_pretty(schema).map_err(|e| FbsError::EncodeError(e.to_string()))
}

pub mod error {
    pub use brine_fbs_compiler::error::FbsError;
}
