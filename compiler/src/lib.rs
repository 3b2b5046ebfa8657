//! brine-fbs-compiler
//!
//! This crate implements:
//!  1) A byte-level recursive-descent parser for FlatBuffers `.fbs` schemas,
//!  2) Include linking through a caller supplied `IncludeResolver`,
//!  3) Identifier lookup merged across the include tree,
//!  4) Detection of cyclic table references (late binding),
//!  5) Swift code generation (`compile_schema_to_swift` → `String`),
//!  6) Error types (`FbsError`).

pub mod error;
pub mod types;
pub mod utils;
pub mod traits;
pub mod tokenizer;
pub mod ident;
pub mod parser;
pub mod decl;
pub mod lookup;
pub mod verifier;
pub mod compiler;
pub mod templates;
pub mod gen_swift;

pub use compiler::{compile_schema, compile_schema_with};
pub use gen_swift::{compile_schema_to_swift, namespace_prefixes};
pub use lookup::{IdentLookup, Node};
pub use parser::{parse_schema, parse_schema_with};
pub use traits::IncludeResolver;
