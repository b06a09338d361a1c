// Artifact rendering and writing

pub mod dot;
pub mod json;
pub mod markdown;

pub use dot::{render_dot, write_dot};
pub use json::write_json;
pub use markdown::{render_markdown, write_markdown};

use crate::error::{Error, Result};
use std::path::Path;

/// Shared artifact write: parent directories are created as needed and
/// any failure carries the destination path.
pub(crate) fn write_text(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::artifact_write(path, e.to_string()))?;
        }
    }
    std::fs::write(path, contents).map_err(|e| Error::artifact_write(path, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_text_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("out.txt");
        write_text(&path, "hello").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn test_write_text_failure_is_tagged() {
        let result = write_text(Path::new("/proc/definitely/not/writable.txt"), "x");
        assert!(matches!(result, Err(Error::ArtifactWrite { .. })));
    }
}
