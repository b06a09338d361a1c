// Aggregation of per-file reports into the final codebase report.

use crate::analysis::graph::{build_edges, ImportEdge};
use crate::parser::ModuleReport;
use crate::walker::DirectoryNode;
use chrono::Utc;
use serde::Serialize;
use std::path::Path;

/// Top-level counters, computed as a pure fold over the module list
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Summary {
    /// Discovered candidate files, independent of parse success
    pub file_count: usize,
    /// Module records in the report
    pub module_count: usize,
    pub class_count: usize,
    /// Free functions only; methods are not counted here
    pub function_count: usize,
}

/// The complete result of one analysis run.
///
/// Serialized field order is the JSON contract: `generated_at, root,
/// summary, modules, tree_ascii, import_edges`.
#[derive(Debug, Clone, Serialize)]
pub struct CodebaseReport {
    pub generated_at: String,
    pub root: String,
    pub summary: Summary,
    pub modules: Vec<ModuleReport>,
    /// Pre-rendered directory tree, for consumers that do not want to
    /// re-render it
    pub tree_ascii: String,
    pub import_edges: Vec<ImportEdge>,
    #[serde(skip)]
    pub directory_tree: DirectoryNode,
}

/// Merge per-file reports into one deterministic codebase report
pub fn assemble(
    root: &Path,
    file_count: usize,
    mut modules: Vec<ModuleReport>,
    directory_tree: DirectoryNode,
) -> CodebaseReport {
    modules.sort_by(|a, b| a.path.cmp(&b.path));

    let summary = Summary {
        file_count,
        module_count: modules.len(),
        class_count: modules.iter().map(|m| m.classes.len()).sum(),
        function_count: modules.iter().map(|m| m.functions.len()).sum(),
    };

    let label = root
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(".")
        .to_string();
    let tree_ascii = directory_tree.render_ascii(&label);
    let import_edges = build_edges(&modules);

    CodebaseReport {
        generated_at: Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        root: root.display().to_string(),
        summary,
        modules,
        tree_ascii,
        import_edges,
        directory_tree,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{CallableInfo, ClassInfo};

    fn module(path: &str) -> ModuleReport {
        ModuleReport::new(path)
    }

    #[test]
    fn test_modules_sorted_by_path() {
        let modules = vec![module("z.py"), module("a.py"), module("m/b.py")];
        let report = assemble(Path::new("/proj"), 3, modules, DirectoryNode::default());

        let paths: Vec<&str> = report.modules.iter().map(|m| m.path.as_str()).collect();
        assert_eq!(paths, vec!["a.py", "m/b.py", "z.py"]);
    }

    #[test]
    fn test_summary_counts() {
        let mut a = module("a.py");
        a.classes.push(ClassInfo::new("A"));
        a.functions.push(CallableInfo::new("f"));

        let mut b = module("b.py");
        let mut with_method = ClassInfo::new("B");
        with_method.methods.push(CallableInfo::new("m"));
        b.classes.push(with_method);

        let report = assemble(Path::new("/proj"), 5, vec![a, b], DirectoryNode::default());
        assert_eq!(report.summary.file_count, 5);
        assert_eq!(report.summary.module_count, 2);
        assert_eq!(report.summary.class_count, 2);
        // methods do not count toward the function total
        assert_eq!(report.summary.function_count, 1);
    }

    #[test]
    fn test_file_count_independent_of_parse_success() {
        let modules = vec![
            module("a.py"),
            ModuleReport::failed("b.py", "syntax error at line 1, column 1"),
        ];
        let report = assemble(Path::new("/proj"), 2, modules, DirectoryNode::default());
        assert_eq!(report.summary.file_count, 2);
        assert_eq!(report.summary.module_count, 2);
    }

    #[test]
    fn test_empty_run() {
        let report = assemble(Path::new("/proj"), 0, Vec::new(), DirectoryNode::default());
        assert_eq!(report.summary, Summary::default());
        assert!(report.modules.is_empty());
        assert!(report.import_edges.is_empty());
    }

    #[test]
    fn test_tree_ascii_rooted_at_dir_name() {
        let report = assemble(
            Path::new("/tmp/myproj"),
            0,
            Vec::new(),
            DirectoryNode::default(),
        );
        assert!(report.tree_ascii.starts_with("myproj\n"));
    }

    #[test]
    fn test_generated_at_format() {
        let report = assemble(Path::new("/proj"), 0, Vec::new(), DirectoryNode::default());
        assert!(report.generated_at.ends_with(" UTC"));
        let stamp = report.generated_at.trim_end_matches(" UTC");
        assert!(chrono::NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S").is_ok());
    }

    #[test]
    fn test_json_key_order() {
        let report = assemble(Path::new("/proj"), 0, Vec::new(), DirectoryNode::default());
        let json = serde_json::to_string(&report).unwrap();
        let generated = json.find("\"generated_at\"").unwrap();
        let root = json.find("\"root\"").unwrap();
        let summary = json.find("\"summary\"").unwrap();
        let modules = json.find("\"modules\"").unwrap();
        let tree = json.find("\"tree_ascii\"").unwrap();
        let edges = json.find("\"import_edges\"").unwrap();
        assert!(generated < root && root < summary && summary < modules);
        assert!(modules < tree && tree < edges);
    }

    #[test]
    fn test_import_edges_follow_sorted_modules() {
        let mut z = module("z.py");
        z.imports.plain_imports.push("os".to_string());
        let mut a = module("a.py");
        a.imports.plain_imports.push("sys".to_string());

        let report = assemble(Path::new("/proj"), 2, vec![z, a], DirectoryNode::default());
        assert_eq!(report.import_edges[0].from_module, "a.py");
        assert_eq!(report.import_edges[1].from_module, "z.py");
    }
}
