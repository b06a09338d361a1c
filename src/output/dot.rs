// Graphviz DOT output for the import graph.
//
// One edge statement per import edge; node labels are quoted and escaped.

use crate::analysis::ImportGraph;
use crate::error::Result;
use petgraph::visit::{EdgeRef, IntoNodeReferences};
use std::path::Path;

/// Render the import graph as a `digraph`
pub fn render_dot(graph: &ImportGraph) -> String {
    let mut dot = String::from("digraph imports {\n");
    dot.push_str("  rankdir=LR;\n");
    dot.push_str("  node [shape=box, fontname=\"Helvetica\"];\n\n");

    for (index, label) in graph.graph().node_references() {
        dot.push_str(&format!(
            "  n{} [label=\"{}\"];\n",
            index.index(),
            escape_label(label)
        ));
    }

    dot.push('\n');

    for edge in graph.graph().edge_references() {
        dot.push_str(&format!(
            "  n{} -> n{};\n",
            edge.source().index(),
            edge.target().index()
        ));
    }

    dot.push_str("}\n");
    dot
}

/// Render and write the DOT artifact
pub fn write_dot(graph: &ImportGraph, path: &Path) -> Result<()> {
    super::write_text(path, &render_dot(graph))
}

fn escape_label(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ImportEdge;

    fn edge(from: &str, to: &str) -> ImportEdge {
        ImportEdge {
            from_module: from.to_string(),
            to_reference: to.to_string(),
        }
    }

    #[test]
    fn test_render_dot_shape() {
        let graph = ImportGraph::from_edges(&[edge("a.py", "os"), edge("b.py", "os")]);
        let dot = render_dot(&graph);

        assert!(dot.starts_with("digraph imports {"));
        assert!(dot.trim_end().ends_with('}'));
        assert!(dot.contains("[label=\"a.py\"]"));
        assert!(dot.contains("[label=\"os\"]"));
        assert_eq!(dot.matches(" -> ").count(), 2);
    }

    #[test]
    fn test_render_dot_one_statement_per_edge() {
        let edges = vec![edge("a.py", "os"), edge("a.py", "os")];
        let dot = render_dot(&ImportGraph::from_edges(&edges));
        assert_eq!(dot.matches(" -> ").count(), 2);
    }

    #[test]
    fn test_escape_label() {
        assert_eq!(escape_label("plain"), "plain");
        assert_eq!(escape_label("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(escape_label("back\\slash"), "back\\\\slash");
    }

    #[test]
    fn test_empty_graph() {
        let dot = render_dot(&ImportGraph::from_edges(&[]));
        assert!(dot.contains("digraph imports"));
        assert_eq!(dot.matches(" -> ").count(), 0);
    }

    #[test]
    fn test_write_dot() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("imports.dot");
        let graph = ImportGraph::from_edges(&[edge("a.py", "os")]);
        write_dot(&graph, &path).unwrap();
        assert!(std::fs::read_to_string(&path)
            .unwrap()
            .contains("digraph imports"));
    }
}
