//! Codemap - map the structure of Python codebases
//!
//! Walks a source tree, parses each file with tree-sitter, extracts
//! structural metadata, and emits a JSON report, a Markdown summary, and
//! an optional DOT import graph.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod parser;
pub mod walker;

// Re-export main types
pub use analysis::{CodebaseReport, Mapper, Summary};
pub use config::Config;
pub use error::{Error, Result};
