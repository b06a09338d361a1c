// Import graph derivation.
//
// Edges are symbolic (module path, imported name) string pairs; targets
// are never resolved to concrete files.

use crate::parser::ModuleReport;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A directed, unresolved import relationship
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImportEdge {
    pub from_module: String,
    pub to_reference: String,
}

/// Derive edges from the aggregated module reports: one edge per plain
/// import (alias suffix stripped) and one edge per from-clause.
pub fn build_edges(modules: &[ModuleReport]) -> Vec<ImportEdge> {
    let mut edges = Vec::new();

    for module in modules {
        for plain in &module.imports.plain_imports {
            let target = plain.split(" as ").next().unwrap_or(plain).trim();
            edges.push(ImportEdge {
                from_module: module.path.clone(),
                to_reference: target.to_string(),
            });
        }
        for from in &module.imports.from_imports {
            edges.push(ImportEdge {
                from_module: module.path.clone(),
                to_reference: from.module.clone(),
            });
        }
    }

    edges
}

/// Petgraph view over the edge list with deduplicated nodes, used by the
/// DOT renderer and for summary counts.
pub struct ImportGraph {
    graph: DiGraph<String, ()>,
}

impl ImportGraph {
    pub fn from_edges(edges: &[ImportEdge]) -> Self {
        let mut graph = DiGraph::new();
        let mut indices: HashMap<String, NodeIndex> = HashMap::new();

        for edge in edges {
            let from = intern(&mut graph, &mut indices, &edge.from_module);
            let to = intern(&mut graph, &mut indices, &edge.to_reference);
            graph.add_edge(from, to, ());
        }

        Self { graph }
    }

    pub fn graph(&self) -> &DiGraph<String, ()> {
        &self.graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

fn intern(
    graph: &mut DiGraph<String, ()>,
    indices: &mut HashMap<String, NodeIndex>,
    label: &str,
) -> NodeIndex {
    if let Some(&index) = indices.get(label) {
        return index;
    }
    let index = graph.add_node(label.to_string());
    indices.insert(label.to_string(), index);
    index
}
