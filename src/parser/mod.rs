// Parsing and structural extraction for source files

pub mod model;
mod python;

pub use model::*;
pub use python::PythonParser;
