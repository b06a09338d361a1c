use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub project: ProjectConfig,
    pub scan: ScanConfig,
    pub output: OutputConfig,
}

/// Project metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Project name, used as the Markdown title; defaults to the root
    /// directory name when empty.
    pub name: String,
}

/// Traversal and file-match settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Source file extension to match, without a leading dot
    pub extension: String,
    /// Extra directory names to exclude from descent, on top of the
    /// built-in denylist
    pub exclude: Vec<String>,
    /// Follow symbolic links during traversal
    pub follow_symlinks: bool,
}

/// Artifact destinations; `None` means the CLI default
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub json: Option<PathBuf>,
    pub markdown: Option<PathBuf>,
    pub dot: Option<PathBuf>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extension: "py".to_string(),
            exclude: Vec::new(),
            follow_symlinks: false,
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from file or return defaults
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Merge CLI arguments into config (CLI takes precedence)
    pub fn merge_cli(
        &mut self,
        output_json: Option<PathBuf>,
        output_md: Option<PathBuf>,
        output_dot: Option<PathBuf>,
        follow_symlinks: bool,
    ) {
        if output_json.is_some() {
            self.output.json = output_json;
        }

        if output_md.is_some() {
            self.output.markdown = output_md;
        }

        if output_dot.is_some() {
            self.output.dot = output_dot;
        }

        if follow_symlinks {
            self.scan.follow_symlinks = true;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.scan.extension.is_empty() {
            return Err(Error::config_validation("extension must not be empty"));
        }

        if self.scan.extension.starts_with('.') {
            return Err(Error::config_validation(
                "extension must not include a leading dot",
            ));
        }

        if self.scan.exclude.iter().any(|name| name.is_empty()) {
            return Err(Error::config_validation("exclude names must not be empty"));
        }

        Ok(())
    }
}
