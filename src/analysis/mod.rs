// Analysis orchestration: discover files, extract per file, assemble.

pub mod graph;
pub mod report;

pub use graph::{build_edges, ImportEdge, ImportGraph};
pub use report::{assemble, CodebaseReport, Summary};

use crate::config::Config;
use crate::error::Result;
use crate::parser::{ModuleReport, PythonParser};
use crate::walker::{SourceFile, TreeWalker};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::Path;

/// Runs the full mapping pipeline over a source tree
pub struct Mapper {
    config: Config,
    verbose: bool,
}

impl Mapper {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            verbose: false,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Walk the root, extract every candidate file, and assemble the
    /// report. Per-file failures are recorded in that file's report;
    /// only an invalid root aborts the run.
    pub fn run(&self, root: &Path) -> Result<CodebaseReport> {
        let root = root
            .canonicalize()
            .map_err(|_| crate::error::Error::InvalidRoot(root.to_path_buf()))?;

        let walker = TreeWalker::new(&self.config.scan);
        let (files, tree) = walker.walk(&root)?;

        let progress = if self.verbose {
            let pb = ProgressBar::new(files.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap()
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        // Extraction is independent per file; the assembler re-sorts by
        // relative path so output does not depend on scheduling order.
        let modules: Vec<ModuleReport> = files
            .par_iter()
            .map_init(
                || PythonParser::new().ok(),
                |parser, file| {
                    let report = extract_file(parser.as_mut(), file);
                    if let Some(pb) = &progress {
                        pb.inc(1);
                    }
                    report
                },
            )
            .collect();

        if let Some(pb) = progress {
            pb.finish_with_message("parsing complete");
        }

        Ok(assemble(&root, files.len(), modules, tree))
    }
}

/// Per-file extraction. Read and parse failures degrade to a recorded
/// error entry; nothing propagates past the file boundary.
fn extract_file(parser: Option<&mut PythonParser>, file: &SourceFile) -> ModuleReport {
    let Some(parser) = parser else {
        return ModuleReport::failed(&file.relative, "parser initialization failed");
    };

    let source = match std::fs::read_to_string(&file.path) {
        Ok(source) => source,
        Err(e) => return ModuleReport::failed(&file.relative, format!("read error: {}", e)),
    };

    match parser.extract(&source, &file.relative) {
        Ok(report) => report,
        Err(e) => ModuleReport::failed(&file.relative, e.to_string()),
    }
}
