//! Read-only projection of a [`GfaGraph`] into a generic node/edge
//! collection for downstream analysis or visualization.
//!
//! The projection owns all of its data; it holds no references back into
//! the graph it was built from.

use crate::graph::GfaGraph;
use crate::record::Orientation;
use crate::tag::Tag;
use serde::{Deserialize, Serialize};

/// One exported node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportNode {
    pub id: String,
    /// `None` when the sequence was elided in the source
    pub sequence: Option<String>,
    /// Known length, from the sequence or an `LN` tag
    pub length: Option<usize>,
    pub tags: Vec<Tag>,
}

/// One exported edge between oriented nodes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportEdge {
    pub from: String,
    pub from_orient: Orientation,
    pub to: String,
    pub to_orient: Orientation,
    pub tags: Vec<Tag>,
}

/// Generic directed-graph view of a GFA graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportGraph {
    pub nodes: Vec<ExportNode>,
    pub edges: Vec<ExportEdge>,
}

impl ExportGraph {
    /// Project a graph through its public iteration contract.
    pub fn from_graph(graph: &GfaGraph) -> Self {
        let nodes = graph
            .segments()
            .map(|s| ExportNode {
                id: s.name.clone(),
                sequence: s.sequence.clone(),
                length: s.length(),
                tags: s.tags.clone(),
            })
            .collect();
        let edges = graph
            .edges()
            .iter()
            .map(|e| ExportEdge {
                from: e.from_segment.clone(),
                from_orient: e.from_orient,
                to: e.to_segment.clone(),
                to_orient: e.to_orient,
                tags: e.tags.clone(),
            })
            .collect();
        ExportGraph { nodes, edges }
    }

    /// Serialize the projection as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
