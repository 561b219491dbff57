//! In-memory GFA graph model
//!
//! This module aggregates parsed records into a connected structure:
//! segments keyed by identifier, edges (links, containments, jumps) between
//! oriented segment ends, and paths/walks traversing them. Assembly is
//! fail-fast: a duplicate segment id or a reference to an undeclared segment
//! aborts the build and no partial graph is observable. Lenient parsing is an
//! explicit opt-in that collects per-line failures instead.

use crate::error::{GfaError, Result};
use crate::record::{
    ContainmentRecord, HeaderRecord, JumpRecord, LinkRecord, Orientation, PathRecord, Record,
    SegmentRecord, Step, WalkRecord,
};
use crate::tag::Tag;
use flate2::read::MultiGzDecoder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// GFA sub-format, detected from the header `VN` tag or inferred from the
/// record census
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GfaFormat {
    Rgfa,
    Gfa1,
    Gfa1_1,
    Gfa1_2,
    Gfa2,
    Unknown,
}

impl GfaFormat {
    pub fn from_version(vn: &str) -> Self {
        match vn {
            "1.0" => GfaFormat::Gfa1,
            "1.1" => GfaFormat::Gfa1_1,
            "1.2" => GfaFormat::Gfa1_2,
            "2.0" => GfaFormat::Gfa2,
            _ => GfaFormat::Unknown,
        }
    }
}

impl fmt::Display for GfaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GfaFormat::Rgfa => "rGFA",
            GfaFormat::Gfa1 => "GFA1",
            GfaFormat::Gfa1_1 => "GFA1.1",
            GfaFormat::Gfa1_2 => "GFA1.2",
            GfaFormat::Gfa2 => "GFA2",
            GfaFormat::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// What an edge stands for, with its kind-specific payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Dovetail overlap (`L` line); CIGAR or `*`
    Link { overlap: String },
    /// Containment (`C` line): position in the container plus overlap
    Containment { pos: usize, overlap: String },
    /// Jump (`J` line): estimated gap distance, `*` kept verbatim
    Jump { distance: String },
}

/// An edge between two oriented segment ends
///
/// Endpoints store segment identifiers, not references; integrity against
/// the segment set is enforced at assembly and after every structural edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from_segment: String,
    pub from_orient: Orientation,
    pub to_segment: String,
    pub to_orient: Orientation,
    pub kind: EdgeKind,
    pub tags: Vec<Tag>,
}

impl Edge {
    /// Render back to the record this edge came from.
    pub fn to_record(&self) -> Record {
        match &self.kind {
            EdgeKind::Link { overlap } => Record::Link(LinkRecord {
                from_segment: self.from_segment.clone(),
                from_orient: self.from_orient,
                to_segment: self.to_segment.clone(),
                to_orient: self.to_orient,
                overlap: overlap.clone(),
                tags: self.tags.clone(),
            }),
            EdgeKind::Containment { pos, overlap } => Record::Containment(ContainmentRecord {
                container: self.from_segment.clone(),
                container_orient: self.from_orient,
                contained: self.to_segment.clone(),
                contained_orient: self.to_orient,
                pos: *pos,
                overlap: overlap.clone(),
                tags: self.tags.clone(),
            }),
            EdgeKind::Jump { distance } => Record::Jump(JumpRecord {
                from_segment: self.from_segment.clone(),
                from_orient: self.from_orient,
                to_segment: self.to_segment.clone(),
                to_orient: self.to_orient,
                distance: distance.clone(),
                tags: self.tags.clone(),
            }),
        }
    }
}

/// Whether a traversal came from a `P` or a `W` line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PathKind {
    Path {
        overlaps: Option<Vec<String>>,
    },
    Walk {
        sample: String,
        haplotype: String,
        seq_id: String,
        seq_start: String,
        seq_end: String,
    },
}

/// A path or walk: an ordered sequence of oriented steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GfaPath {
    pub name: String,
    pub steps: Vec<Step>,
    pub kind: PathKind,
    pub tags: Vec<Tag>,
}

impl GfaPath {
    pub fn to_record(&self) -> Record {
        match &self.kind {
            PathKind::Path { overlaps } => Record::Path(PathRecord {
                name: self.name.clone(),
                steps: self.steps.clone(),
                overlaps: overlaps.clone(),
                tags: self.tags.clone(),
            }),
            PathKind::Walk {
                sample,
                haplotype,
                seq_id,
                seq_start,
                seq_end,
            } => Record::Walk(WalkRecord {
                sample: sample.clone(),
                haplotype: haplotype.clone(),
                seq_id: seq_id.clone(),
                seq_start: seq_start.clone(),
                seq_end: seq_end.clone(),
                steps: self.steps.clone(),
                tags: self.tags.clone(),
            }),
        }
    }
}

/// A parse failure collected in lenient mode
#[derive(Debug)]
pub struct ParseIssue {
    /// 1-based source line number
    pub line: usize,
    pub error: GfaError,
}

/// Complete in-memory GFA graph
#[derive(Debug, Clone, Default)]
pub struct GfaGraph {
    /// Detected or inferred sub-format
    pub version: GfaFormat,
    /// Header records, in file order
    pub headers: Vec<HeaderRecord>,
    /// Comment lines, kept verbatim
    pub comments: Vec<String>,
    pub(crate) segments: HashMap<String, SegmentRecord>,
    /// Segment insertion order, so serialization stays diffable
    pub(crate) segment_order: Vec<String>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) paths: Vec<GfaPath>,
    /// Derived cache: (segment id, orientation at that end) -> incident edge
    /// indices. Rebuilt or incrementally updated on every structural edit.
    pub(crate) adjacency: HashMap<(String, Orientation), Vec<usize>>,
}

impl Default for GfaFormat {
    fn default() -> Self {
        GfaFormat::Unknown
    }
}

impl GfaGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a GFA file from a path, transparently decompressing `.gz`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GfaError::FileNotFound(path.display().to_string()));
        }
        let file = File::open(path)?;
        if path.extension().is_some_and(|e| e == "gz") {
            Self::parse(BufReader::new(MultiGzDecoder::new(file)))
        } else {
            Self::parse(BufReader::new(file))
        }
    }

    /// Parse GFA from a buffered reader, failing on the first bad line.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self> {
        let mut graph = GfaGraph::new();
        for (idx, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            let record = Record::parse(&line).map_err(|e| e.at_line(idx + 1))?;
            graph.insert_record(record)?;
        }
        graph.finish_build();
        Ok(graph)
    }

    /// Parse GFA leniently: bad lines (including dangling references) are
    /// skipped and reported per line instead of aborting the build.
    pub fn parse_lenient<R: BufRead>(reader: R) -> Result<(Self, Vec<ParseIssue>)> {
        let mut graph = GfaGraph::new();
        let mut issues = Vec::new();
        for (idx, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            let outcome = Record::parse(&line)
                .map_err(|e| e.at_line(idx + 1))
                .and_then(|record| graph.insert_record(record));
            if let Err(error) = outcome {
                issues.push(ParseIssue {
                    line: idx + 1,
                    error,
                });
            }
        }
        graph.finish_build();
        Ok((graph, issues))
    }

    /// Assemble a graph from already-parsed records, in order.
    pub fn from_records<I: IntoIterator<Item = Record>>(records: I) -> Result<Self> {
        let mut graph = GfaGraph::new();
        for record in records {
            graph.insert_record(record)?;
        }
        graph.finish_build();
        Ok(graph)
    }

    /// Insert one record. Segments must precede the edges and paths that
    /// reference them (the format's normative ordering).
    fn insert_record(&mut self, record: Record) -> Result<()> {
        match record {
            Record::Header(h) => {
                if let Some(vn) = h.tags.iter().find(|t| t.name == "VN") {
                    if let Some(v) = vn.value.as_str() {
                        self.version = GfaFormat::from_version(v);
                    }
                }
                self.headers.push(h);
            }
            Record::Comment(text) => self.comments.push(text),
            Record::Segment(s) => {
                if self.segments.contains_key(&s.name) {
                    return Err(GfaError::DuplicateSegmentId(s.name));
                }
                self.segment_order.push(s.name.clone());
                self.segments.insert(s.name.clone(), s);
            }
            Record::Link(l) => {
                self.check_endpoints(&l.from_segment, &l.to_segment)?;
                self.push_edge(Edge {
                    from_segment: l.from_segment,
                    from_orient: l.from_orient,
                    to_segment: l.to_segment,
                    to_orient: l.to_orient,
                    kind: EdgeKind::Link { overlap: l.overlap },
                    tags: l.tags,
                });
            }
            Record::Containment(c) => {
                self.check_endpoints(&c.container, &c.contained)?;
                self.push_edge(Edge {
                    from_segment: c.container,
                    from_orient: c.container_orient,
                    to_segment: c.contained,
                    to_orient: c.contained_orient,
                    kind: EdgeKind::Containment {
                        pos: c.pos,
                        overlap: c.overlap,
                    },
                    tags: c.tags,
                });
            }
            Record::Jump(j) => {
                self.check_endpoints(&j.from_segment, &j.to_segment)?;
                self.push_edge(Edge {
                    from_segment: j.from_segment,
                    from_orient: j.from_orient,
                    to_segment: j.to_segment,
                    to_orient: j.to_orient,
                    kind: EdgeKind::Jump {
                        distance: j.distance,
                    },
                    tags: j.tags,
                });
            }
            Record::Path(p) => {
                self.check_steps(&p.steps)?;
                self.paths.push(GfaPath {
                    name: p.name,
                    steps: p.steps,
                    kind: PathKind::Path {
                        overlaps: p.overlaps,
                    },
                    tags: p.tags,
                });
            }
            Record::Walk(w) => {
                self.check_steps(&w.steps)?;
                self.paths.push(GfaPath {
                    name: w.path_name(),
                    steps: w.steps,
                    kind: PathKind::Walk {
                        sample: w.sample,
                        haplotype: w.haplotype,
                        seq_id: w.seq_id,
                        seq_start: w.seq_start,
                        seq_end: w.seq_end,
                    },
                    tags: w.tags,
                });
            }
        }
        Ok(())
    }

    fn finish_build(&mut self) {
        if self.version == GfaFormat::Unknown {
            self.version = self.infer_format();
        }
        self.rebuild_adjacency();
    }

    fn check_endpoints(&self, from: &str, to: &str) -> Result<()> {
        for id in [from, to] {
            if !self.segments.contains_key(id) {
                return Err(GfaError::DanglingReference(id.to_string()));
            }
        }
        Ok(())
    }

    pub(crate) fn check_steps(&self, steps: &[Step]) -> Result<()> {
        for step in steps {
            if !self.segments.contains_key(&step.segment) {
                return Err(GfaError::DanglingReference(step.segment.clone()));
            }
        }
        Ok(())
    }

    pub(crate) fn push_edge(&mut self, edge: Edge) {
        let idx = self.edges.len();
        self.adjacency
            .entry((edge.from_segment.clone(), edge.from_orient))
            .or_default()
            .push(idx);
        self.adjacency
            .entry((edge.to_segment.clone(), edge.to_orient))
            .or_default()
            .push(idx);
        self.edges.push(edge);
    }

    /// Recompute the adjacency index from scratch. Must be called before
    /// returning from any structural edit that cannot patch it in place.
    pub(crate) fn rebuild_adjacency(&mut self) {
        self.adjacency.clear();
        for (idx, edge) in self.edges.iter().enumerate() {
            self.adjacency
                .entry((edge.from_segment.clone(), edge.from_orient))
                .or_default()
                .push(idx);
            self.adjacency
                .entry((edge.to_segment.clone(), edge.to_orient))
                .or_default()
                .push(idx);
        }
    }

    /// Re-derive the sub-format from the record census, mirroring how the
    /// version is promoted when walks or jumps are present.
    pub fn infer_format(&self) -> GfaFormat {
        let has_walks = self
            .paths
            .iter()
            .any(|p| matches!(p.kind, PathKind::Walk { .. }));
        let has_jumps = self
            .edges
            .iter()
            .any(|e| matches!(e.kind, EdgeKind::Jump { .. }));
        if has_jumps {
            GfaFormat::Gfa1_2
        } else if has_walks {
            GfaFormat::Gfa1_1
        } else if !self.headers.is_empty() || !self.paths.is_empty() {
            GfaFormat::Gfa1
        } else {
            GfaFormat::Rgfa
        }
    }

    /// Get segment by identifier
    pub fn segment(&self, name: &str) -> Option<&SegmentRecord> {
        self.segments.get(name)
    }

    /// Iterate segments in insertion order
    pub fn segments(&self) -> impl Iterator<Item = &SegmentRecord> + '_ {
        self.segment_order
            .iter()
            .filter_map(move |name| self.segments.get(name))
    }

    /// All edges, in file/insertion order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// All paths and walks, in file/insertion order
    pub fn paths(&self) -> &[GfaPath] {
        &self.paths
    }

    /// Get a path or walk by name
    pub fn path(&self, name: &str) -> Option<&GfaPath> {
        self.paths.iter().find(|p| p.name == name)
    }

    /// Edges incident to one oriented segment end, from the adjacency index
    pub fn edges_at(&self, segment: &str, orientation: Orientation) -> Vec<&Edge> {
        match self.adjacency.get(&(segment.to_string(), orientation)) {
            Some(indices) => indices.iter().map(|&i| &self.edges[i]).collect(),
            None => Vec::new(),
        }
    }

    /// Edges leaving a segment (it appears as the `from` endpoint)
    pub fn out_edges(&self, segment: &str) -> Vec<&Edge> {
        self.edges
            .iter()
            .filter(|e| e.from_segment == segment)
            .collect()
    }

    /// Edges entering a segment (it appears as the `to` endpoint)
    pub fn in_edges(&self, segment: &str) -> Vec<&Edge> {
        self.edges
            .iter()
            .filter(|e| e.to_segment == segment)
            .collect()
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    /// Total sequence length over all segments with a known length
    pub fn total_sequence_length(&self) -> u64 {
        self.segments
            .values()
            .filter_map(|s| s.length())
            .map(|n| n as u64)
            .sum()
    }

    /// Reconstruct the biological sequence spelled by a path: each step
    /// contributes its segment's sequence, reverse-complemented on reverse
    /// steps.
    pub fn path_sequence(&self, name: &str) -> Result<String> {
        let path = self
            .path(name)
            .ok_or_else(|| GfaError::NotFound(name.to_string()))?;
        let mut out = String::new();
        for step in &path.steps {
            let segment = self
                .segments
                .get(&step.segment)
                .ok_or_else(|| GfaError::DanglingReference(step.segment.clone()))?;
            let seq = segment
                .sequence
                .as_deref()
                .ok_or_else(|| GfaError::MissingSequence(step.segment.clone()))?;
            match step.orientation {
                Orientation::Forward => out.push_str(seq),
                Orientation::Reverse => out.push_str(&reverse_complement(seq)),
            }
        }
        Ok(out)
    }

    /// Emit every owned record in canonical order: headers, comments,
    /// segments (insertion order), edges, then paths.
    pub fn records(&self) -> Vec<Record> {
        let mut out = Vec::with_capacity(
            self.headers.len()
                + self.comments.len()
                + self.segments.len()
                + self.edges.len()
                + self.paths.len(),
        );
        out.extend(self.headers.iter().cloned().map(Record::Header));
        out.extend(self.comments.iter().cloned().map(Record::Comment));
        out.extend(self.segments().cloned().map(Record::Segment));
        out.extend(self.edges.iter().map(Edge::to_record));
        out.extend(self.paths.iter().map(GfaPath::to_record));
        out
    }

    /// Serialize to GFA text
    pub fn write_gfa<W: Write>(&self, writer: &mut W) -> Result<()> {
        for record in self.records() {
            writeln!(writer, "{}", record)?;
        }
        Ok(())
    }

    /// Serialize to an in-memory GFA string
    pub fn to_gfa_string(&self) -> String {
        let mut buf = Vec::new();
        // Writing to a Vec cannot fail
        self.write_gfa(&mut buf).expect("in-memory write");
        String::from_utf8(buf).expect("GFA text is UTF-8")
    }

    /// Write the graph to a file in GFA format
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        self.write_gfa(&mut file)
    }
}

impl fmt::Display for GfaGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GFA graph ({}) containing {} segments, {} edges and {} paths",
            self.version,
            self.segment_count(),
            self.edge_count(),
            self.path_count()
        )
    }
}

/// Reverse complement of a nucleotide sequence. Case is preserved;
/// characters without a complement (e.g. `N`) pass through unchanged.
pub fn reverse_complement(seq: &str) -> String {
    seq.chars()
        .rev()
        .map(|c| match c {
            'A' => 'T',
            'T' => 'A',
            'C' => 'G',
            'G' => 'C',
            'a' => 't',
            't' => 'a',
            'c' => 'g',
            'g' => 'c',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SIMPLE: &str = "H\tVN:Z:1.0\n\
                          S\ts1\tACGT\n\
                          S\ts2\tGGGG\n\
                          L\ts1\t+\ts2\t-\t4M\n\
                          P\tp1\ts1+,s2-\t*\n";

    #[test]
    fn test_parse_simple_graph() {
        let graph = GfaGraph::parse(Cursor::new(SIMPLE)).unwrap();
        assert_eq!(graph.version, GfaFormat::Gfa1);
        assert_eq!(graph.segment_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.path_count(), 1);
        assert_eq!(graph.total_sequence_length(), 8);
        assert_eq!(graph.segment("s1").unwrap().sequence.as_deref(), Some("ACGT"));
    }

    #[test]
    fn test_duplicate_segment_rejected() {
        let gfa = "S\ts1\tACGT\nS\ts1\tGGGG\n";
        assert!(matches!(
            GfaGraph::parse(Cursor::new(gfa)),
            Err(GfaError::DuplicateSegmentId(id)) if id == "s1"
        ));
    }

    #[test]
    fn test_dangling_link_rejected() {
        let gfa = "S\ts1\tACGT\nL\ts1\t+\ts2\t+\t0M\nS\ts2\tGGGG\n";
        // s2 is declared after the link that cites it: forward-reference-only
        assert!(matches!(
            GfaGraph::parse(Cursor::new(gfa)),
            Err(GfaError::DanglingReference(id)) if id == "s2"
        ));
    }

    #[test]
    fn test_dangling_path_rejected() {
        let gfa = "S\ts1\tACGT\nP\tp1\ts1+,ghost-\t*\n";
        assert!(matches!(
            GfaGraph::parse(Cursor::new(gfa)),
            Err(GfaError::DanglingReference(id)) if id == "ghost"
        ));
    }

    #[test]
    fn test_lenient_collects_and_continues() {
        let gfa = "S\ts1\tACGT\n\
                   L\ts1\t+\tghost\t+\t0M\n\
                   S\ts2\tGGGG\n\
                   L\ts1\t+\ts2\t+\t0M\n";
        let (graph, issues) = GfaGraph::parse_lenient(Cursor::new(gfa)).unwrap();
        assert_eq!(graph.segment_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].line, 2);
        assert!(matches!(issues[0].error, GfaError::DanglingReference(_)));
    }

    #[test]
    fn test_roundtrip_is_byte_identical() {
        let gfa = "H\tVN:Z:1.0\n\
                   S\ts1\tACGT\tLN:i:4\tRC:i:120\n\
                   S\ts2\t*\tLN:i:8\n\
                   L\ts1\t+\ts2\t-\t4M\tID:Z:e1\n\
                   C\ts1\t+\ts2\t+\t2\t2M\n\
                   J\ts1\t+\ts2\t+\t*\n\
                   P\tp1\ts1+,s2-\t*\tSR:i:0\n";
        let graph = GfaGraph::parse(Cursor::new(gfa)).unwrap();
        assert_eq!(graph.to_gfa_string(), gfa);
    }

    #[test]
    fn test_walk_roundtrip_and_format_inference() {
        let gfa = "S\ts1\tACGT\n\
                   S\ts2\tGG\n\
                   W\tNA12878\t1\tchr1\t0\t6\t>s1<s2\n";
        let graph = GfaGraph::parse(Cursor::new(gfa)).unwrap();
        assert_eq!(graph.version, GfaFormat::Gfa1_1);
        let walk = graph.path("NA12878#1#chr1").unwrap();
        assert_eq!(walk.steps.len(), 2);
        assert_eq!(graph.to_gfa_string(), gfa);
    }

    #[test]
    fn test_headerless_graph_is_rgfa() {
        let gfa = "S\ts1\tACGT\tSN:Z:chr1\tSO:i:0\tSR:i:0\n";
        let graph = GfaGraph::parse(Cursor::new(gfa)).unwrap();
        assert_eq!(graph.version, GfaFormat::Rgfa);
    }

    #[test]
    fn test_adjacency_index() {
        let graph = GfaGraph::parse(Cursor::new(SIMPLE)).unwrap();
        let at_start = graph.edges_at("s1", Orientation::Forward);
        assert_eq!(at_start.len(), 1);
        assert_eq!(at_start[0].to_segment, "s2");
        assert!(graph.edges_at("s1", Orientation::Reverse).is_empty());
        assert_eq!(graph.edges_at("s2", Orientation::Reverse).len(), 1);
        assert_eq!(graph.out_edges("s1").len(), 1);
        assert_eq!(graph.in_edges("s2").len(), 1);
    }

    #[test]
    fn test_path_sequence() {
        let graph = GfaGraph::parse(Cursor::new(SIMPLE)).unwrap();
        // s2 is walked in reverse: revcomp(GGGG) = CCCC
        assert_eq!(graph.path_sequence("p1").unwrap(), "ACGTCCCC");
        assert!(matches!(
            graph.path_sequence("nope"),
            Err(GfaError::NotFound(_))
        ));
    }

    #[test]
    fn test_path_sequence_needs_sequences() {
        let gfa = "S\ts1\t*\tLN:i:4\nP\tp1\ts1+\t*\n";
        let graph = GfaGraph::parse(Cursor::new(gfa)).unwrap();
        assert!(matches!(
            graph.path_sequence("p1"),
            Err(GfaError::MissingSequence(_))
        ));
    }

    #[test]
    fn test_reverse_complement() {
        assert_eq!(reverse_complement("ACGT"), "ACGT");
        assert_eq!(reverse_complement("AACN"), "NGTT");
        assert_eq!(reverse_complement("acgt"), "acgt");
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("toy.gfa");
        let graph = GfaGraph::parse(Cursor::new(SIMPLE)).unwrap();
        graph.to_file(&path).unwrap();
        let reread = GfaGraph::from_file(&path).unwrap();
        assert_eq!(reread.to_gfa_string(), graph.to_gfa_string());
    }

    #[test]
    fn test_gzip_input_parses_identically() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("toy.gfa.gz");
        let file = File::create(&path).unwrap();
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(SIMPLE.as_bytes()).unwrap();
        encoder.finish().unwrap();

        let graph = GfaGraph::from_file(&path).unwrap();
        assert_eq!(graph.to_gfa_string(), GfaGraph::parse(Cursor::new(SIMPLE)).unwrap().to_gfa_string());
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            GfaGraph::from_file("no/such/file.gfa"),
            Err(GfaError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_comment_retained_verbatim() {
        let gfa = "# generated by test\nS\ts1\tACGT\n";
        let graph = GfaGraph::parse(Cursor::new(gfa)).unwrap();
        assert_eq!(graph.comments, vec![" generated by test".to_string()]);
        assert_eq!(graph.to_gfa_string(), "# generated by test\nS\ts1\tACGT\n");
    }
}
