// Markdown artifact output.
//
// A human-readable rendering of the codebase report. The JSON artifact is
// the contract; this layout may change between versions.

use crate::analysis::CodebaseReport;
use crate::error::Result;
use crate::parser::{CallableInfo, ClassInfo, ModuleReport, VariableInfo};
use std::path::Path;

/// Render the full report as Markdown
pub fn render_markdown(report: &CodebaseReport, title: &str) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", title));
    md.push_str(&format!("Generated: {}\n\n", report.generated_at));
    md.push_str(&format!("Root: `{}`\n\n", report.root));

    md.push_str("## Summary\n\n");
    md.push_str(&format!("- **Files:** {}\n", report.summary.file_count));
    md.push_str(&format!("- **Modules:** {}\n", report.summary.module_count));
    md.push_str(&format!("- **Classes:** {}\n", report.summary.class_count));
    md.push_str(&format!("- **Functions:** {}\n", report.summary.function_count));
    md.push('\n');

    md.push_str("## Directory layout\n\n");
    md.push_str("```text\n");
    md.push_str(&report.tree_ascii);
    md.push_str("```\n\n");

    md.push_str("## Modules\n\n");
    for module in &report.modules {
        render_module(&mut md, module);
    }

    md
}

/// Render and write the Markdown artifact
pub fn write_markdown(report: &CodebaseReport, title: &str, path: &Path) -> Result<()> {
    super::write_text(path, &render_markdown(report, title))
}

fn render_module(md: &mut String, module: &ModuleReport) {
    md.push_str(&format!("### `{}`\n\n", module.path));

    if let Some(ref doc) = module.docstring {
        md.push_str(&format!("{}\n\n", doc));
    }

    if !module.imports.is_empty() {
        md.push_str("**Imports:**\n\n");
        for plain in &module.imports.plain_imports {
            md.push_str(&format!("- `import {}`\n", plain));
        }
        for from in &module.imports.from_imports {
            md.push_str(&format!(
                "- `from {} import {}`\n",
                from.module,
                from.names.join(", ")
            ));
        }
        md.push('\n');
    }

    if !module.module_variables.is_empty() {
        md.push_str("**Variables:**\n\n");
        for var in &module.module_variables {
            md.push_str(&format!("- `{}`\n", variable_line(var)));
        }
        md.push('\n');
    }

    if !module.classes.is_empty() {
        md.push_str("**Classes:**\n\n");
        for class in &module.classes {
            render_class(md, class);
        }
        md.push('\n');
    }

    if !module.functions.is_empty() {
        md.push_str("**Functions:**\n\n");
        for func in &module.functions {
            md.push_str(&format!("- {}\n", callable_line(func)));
        }
        md.push('\n');
    }

    if !module.errors.is_empty() {
        md.push_str("**Errors:**\n\n");
        for error in &module.errors {
            md.push_str(&format!("- {}\n", error));
        }
        md.push('\n');
    }
}

fn render_class(md: &mut String, class: &ClassInfo) {
    let bases = if class.bases.is_empty() {
        String::new()
    } else {
        format!("({})", class.bases.join(", "))
    };
    md.push_str(&format!("- `class {}{}`", class.name, bases));
    if let Some(summary) = doc_summary(&class.docstring) {
        md.push_str(&format!(": {}", summary));
    }
    md.push('\n');

    for method in &class.methods {
        md.push_str(&format!("  - {}\n", callable_line(method)));
    }
    for property in &class.properties {
        md.push_str(&format!("  - property `{}`\n", property));
    }
    for var in &class.class_variables {
        md.push_str(&format!("  - `{}`\n", variable_line(var)));
    }
}

fn callable_line(func: &CallableInfo) -> String {
    match doc_summary(&func.docstring) {
        Some(summary) => format!("`{}`: {}", func.signature_line(), summary),
        None => format!("`{}`", func.signature_line()),
    }
}

fn variable_line(var: &VariableInfo) -> String {
    let mut line = var.name.clone();
    if let Some(ref annotation) = var.annotation {
        line.push_str(&format!(": {}", annotation));
    }
    if let Some(ref value) = var.value {
        line.push_str(&format!(" = {}", value));
    }
    line
}

/// First line of a docstring, for one-line listings
fn doc_summary(docstring: &Option<String>) -> Option<&str> {
    docstring
        .as_ref()
        .and_then(|d| d.lines().next())
        .filter(|l| !l.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::assemble;
    use crate::parser::{ClassInfo, ParameterInfo};
    use crate::walker::DirectoryNode;

    fn sample_report() -> CodebaseReport {
        let mut module = ModuleReport::new("src/widget.py");
        module.docstring = Some("Widget helpers.".to_string());
        module.imports.plain_imports.push("os".to_string());

        let mut class = ClassInfo::new("Widget");
        class.bases.push("Base".to_string());
        let mut method = CallableInfo::new("render");
        method.signature.positional.push(ParameterInfo::new("self"));
        class.methods.push(method);
        class.properties.push("value".to_string());
        module.classes.push(class);

        let mut func = CallableInfo::new("make_widget");
        func.docstring = Some("Build a widget.\n\nLong detail.".to_string());
        module.functions.push(func);

        let mut var = VariableInfo::new("LIMIT");
        var.annotation = Some("int".to_string());
        var.value = Some("10".to_string());
        module.module_variables.push(var);

        let failed = ModuleReport::failed("src/broken.py", "syntax error at line 2, column 1");

        let mut tree = DirectoryNode::default();
        tree.insert_dir(&["src".to_string()]).insert_file("widget.py");

        assemble(
            Path::new("/proj"),
            2,
            vec![module, failed],
            tree,
        )
    }

    #[test]
    fn test_render_summary_counts() {
        let md = render_markdown(&sample_report(), "proj");
        assert!(md.starts_with("# proj\n"));
        assert!(md.contains("- **Files:** 2"));
        assert!(md.contains("- **Classes:** 1"));
        assert!(md.contains("- **Functions:** 1"));
    }

    #[test]
    fn test_render_tree_fenced() {
        let md = render_markdown(&sample_report(), "proj");
        assert!(md.contains("```text\nproj\n└── src/\n    └── widget.py\n```"));
    }

    #[test]
    fn test_render_module_sections() {
        let md = render_markdown(&sample_report(), "proj");
        assert!(md.contains("### `src/widget.py`"));
        assert!(md.contains("Widget helpers."));
        assert!(md.contains("- `import os`"));
        assert!(md.contains("- `LIMIT: int = 10`"));
        assert!(md.contains("- `class Widget(Base)`"));
        assert!(md.contains("  - `def render(self)`"));
        assert!(md.contains("  - property `value`"));
    }

    #[test]
    fn test_render_function_with_doc_summary() {
        let md = render_markdown(&sample_report(), "proj");
        assert!(md.contains("- `def make_widget()`: Build a widget."));
        assert!(!md.contains("Long detail."));
    }

    #[test]
    fn test_render_errors_section() {
        let md = render_markdown(&sample_report(), "proj");
        assert!(md.contains("### `src/broken.py`"));
        assert!(md.contains("**Errors:**"));
        assert!(md.contains("- syntax error at line 2, column 1"));
    }

    #[test]
    fn test_write_markdown() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("map.md");
        write_markdown(&sample_report(), "proj", &path).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("# proj"));
    }
}
