// JSON artifact output.
//
// The JSON report is the authoritative, lossless artifact; a failure to
// produce it is fatal to the run.

use crate::analysis::CodebaseReport;
use crate::error::{Error, Result};
use std::path::Path;

/// Serialize the report (stable key order, UTF-8 without ASCII escaping)
/// and write it to `path`.
pub fn write_json(report: &CodebaseReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| Error::artifact_write(path, e.to_string()))?;
    super::write_text(path, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::assemble;
    use crate::parser::ModuleReport;
    use crate::walker::DirectoryNode;
    use tempfile::TempDir;

    fn sample_report() -> CodebaseReport {
        let mut module = ModuleReport::new("a.py");
        module.docstring = Some("Ünïcode docstring".to_string());
        assemble(
            Path::new("/proj"),
            1,
            vec![module],
            DirectoryNode::default(),
        )
    }

    #[test]
    fn test_write_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("map.json");
        write_json(&sample_report(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["summary"]["file_count"], 1);
        assert_eq!(value["modules"][0]["path"], "a.py");
    }

    #[test]
    fn test_json_is_not_ascii_escaped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("map.json");
        write_json(&sample_report(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Ünïcode"));
        assert!(!text.contains("\\u00dc"));
    }

    #[test]
    fn test_write_failure_is_fatal_error() {
        let result = write_json(&sample_report(), Path::new("/proc/nope/map.json"));
        assert!(matches!(result, Err(Error::ArtifactWrite { .. })));
    }
}
