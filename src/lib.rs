//! gfagraphs - in-memory GFA graph abstraction
//!
//! A library for parsing, editing, and serializing GFA (Graphical Fragment
//! Assembly) graphs: typed optional tags, per-line-type record schemas, a
//! referentially consistent graph model, and mutation operations that keep
//! segments, edges, and paths in agreement.
//!
//! # Example
//!
//! ```no_run
//! use gfagraphs::{ExportGraph, GfaGraph};
//!
//! // Parse a GFA file (plain or gzip-compressed)
//! let mut graph = GfaGraph::from_file("example.gfa").unwrap();
//!
//! // Edit it: every cross-reference follows
//! graph.rename("s1", "chr1_start").unwrap();
//! graph.reverse_complement_segment("chr1_start").unwrap();
//!
//! // Write it back, or project it for a graph-analysis tool
//! graph.to_file("edited.gfa").unwrap();
//! let export = ExportGraph::from_graph(&graph);
//! println!("{}", export.to_json().unwrap());
//! ```

pub mod cli;
pub mod edit;
pub mod error;
pub mod export;
pub mod graph;
pub mod record;
pub mod tag;

pub use error::{GfaError, Result};
pub use export::{ExportEdge, ExportGraph, ExportNode};
pub use graph::{
    reverse_complement, Edge, EdgeKind, GfaFormat, GfaGraph, GfaPath, ParseIssue, PathKind,
};
pub use record::{Orientation, Record, Step};
pub use tag::{Tag, TagValue};
