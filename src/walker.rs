// Source-tree traversal and directory layout capture.
//
// The walker produces two things in one pass: the list of candidate source
// files for the parsing stage, and a DirectoryNode tree of the full layout
// (all non-hidden files, whatever their extension) for display.

use crate::config::ScanConfig;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory names never descended into
const SKIP_DIRS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "__pycache__",
    ".mypy_cache",
    ".pytest_cache",
    ".ruff_cache",
    ".tox",
    ".nox",
    "venv",
    ".venv",
    ".eggs",
    "node_modules",
    "site-packages",
    "htmlcov",
];

/// A discovered candidate source file
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    /// Absolute path on disk
    pub path: PathBuf,
    /// Path relative to the scan root, forward-slash separated
    pub relative: String,
}

/// Recursive directory layout, sorted at every level
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectoryNode {
    pub dirs: BTreeMap<String, DirectoryNode>,
    pub files: Vec<String>,
}

impl DirectoryNode {
    /// Get or create the node for a path given as name components
    pub fn insert_dir(&mut self, components: &[String]) -> &mut DirectoryNode {
        let mut node = self;
        for name in components {
            node = node.dirs.entry(name.clone()).or_default();
        }
        node
    }

    /// Record a file in this directory, keeping the list sorted
    pub fn insert_file(&mut self, name: &str) {
        if let Err(pos) = self.files.binary_search_by(|f| f.as_str().cmp(name)) {
            self.files.insert(pos, name.to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty() && self.files.is_empty()
    }

    /// Render the tree with box-drawing connectors, rooted at `label`.
    /// Subdirectories come before files at each level; both are sorted.
    pub fn render_ascii(&self, label: &str) -> String {
        let mut out = String::new();
        out.push_str(label);
        out.push('\n');
        self.render_children(&mut out, "");
        out
    }

    fn render_children(&self, out: &mut String, prefix: &str) {
        let total = self.dirs.len() + self.files.len();
        let mut index = 0;

        for (name, child) in &self.dirs {
            index += 1;
            let last = index == total;
            out.push_str(prefix);
            out.push_str(if last { "└── " } else { "├── " });
            out.push_str(name);
            out.push('/');
            out.push('\n');
            let child_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });
            child.render_children(out, &child_prefix);
        }

        for name in &self.files {
            index += 1;
            let last = index == total;
            out.push_str(prefix);
            out.push_str(if last { "└── " } else { "├── " });
            out.push_str(name);
            out.push('\n');
        }
    }
}

/// Walks a root directory applying the skip and match policies
pub struct TreeWalker<'a> {
    config: &'a ScanConfig,
}

impl<'a> TreeWalker<'a> {
    pub fn new(config: &'a ScanConfig) -> Self {
        Self { config }
    }

    /// Discover candidate source files under `root` and build the layout
    /// tree. Candidate order is filesystem order; callers sort downstream.
    pub fn walk(&self, root: &Path) -> Result<(Vec<SourceFile>, DirectoryNode)> {
        if !root.is_dir() {
            return Err(Error::InvalidRoot(root.to_path_buf()));
        }

        let mut candidates = Vec::new();
        let mut tree = DirectoryNode::default();

        let walker = WalkDir::new(root)
            .follow_links(self.config.follow_symlinks)
            .into_iter();

        for entry in walker
            .filter_entry(|e| e.path() == root || self.keep(e))
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path == root {
                continue;
            }
            let relative = match path.strip_prefix(root) {
                Ok(r) => r,
                Err(_) => continue,
            };
            let components: Vec<String> = relative
                .iter()
                .map(|c| c.to_string_lossy().into_owned())
                .collect();

            if entry.file_type().is_dir() {
                tree.insert_dir(&components);
            } else if let Some((name, dir_parts)) = components.split_last() {
                tree.insert_dir(dir_parts).insert_file(name);
                if self.is_candidate(name) {
                    candidates.push(SourceFile {
                        path: path.to_path_buf(),
                        relative: components.join("/"),
                    });
                }
            }
        }

        Ok((candidates, tree))
    }

    /// Applied at every depth: hidden entries and denylisted directory
    /// names are not visited at all.
    fn keep(&self, entry: &walkdir::DirEntry) -> bool {
        let name = entry.file_name().to_string_lossy();
        if name.starts_with('.') {
            return false;
        }
        if entry.file_type().is_dir() {
            !SKIP_DIRS.contains(&name.as_ref())
                && !self.config.exclude.iter().any(|ex| ex == name.as_ref())
        } else {
            true
        }
    }

    fn is_candidate(&self, name: &str) -> bool {
        Path::new(name)
            .extension()
            .map_or(false, |ext| ext == self.config.extension.as_str())
    }
}
