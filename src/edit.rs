//! Mutation operations on [`GfaGraph`]
//!
//! Every operation validates its arguments against the current graph before
//! touching any state, so a failed call leaves the graph exactly as it was.
//! The adjacency index is patched or rebuilt before control returns; no edit
//! leaves it stale.

use crate::error::{GfaError, Result};
use crate::graph::{reverse_complement, Edge, EdgeKind, GfaGraph, GfaPath, PathKind};
use crate::record::{Orientation, SegmentRecord, Step};
use crate::tag::{Tag, TagValue};
use std::collections::{BTreeMap, HashSet};

impl GfaGraph {
    /// Add a segment. `sequence = None` declares an elided (`*`) sequence.
    pub fn add_segment(
        &mut self,
        name: impl Into<String>,
        sequence: Option<String>,
        tags: Vec<Tag>,
    ) -> Result<()> {
        let name = name.into();
        if self.segments.contains_key(&name) {
            return Err(GfaError::DuplicateSegmentId(name));
        }
        self.segment_order.push(name.clone());
        self.segments.insert(
            name.clone(),
            SegmentRecord {
                name,
                sequence,
                tags,
            },
        );
        Ok(())
    }

    /// Add a link between two oriented segment ends.
    pub fn add_edge(
        &mut self,
        from: &str,
        from_orient: Orientation,
        to: &str,
        to_orient: Orientation,
        overlap: impl Into<String>,
    ) -> Result<()> {
        for id in [from, to] {
            if !self.segments.contains_key(id) {
                return Err(GfaError::DanglingReference(id.to_string()));
            }
        }
        self.push_edge(Edge {
            from_segment: from.to_string(),
            from_orient,
            to_segment: to.to_string(),
            to_orient,
            kind: EdgeKind::Link {
                overlap: overlap.into(),
            },
            tags: Vec::new(),
        });
        Ok(())
    }

    /// Add a path over existing segments.
    pub fn add_path(
        &mut self,
        name: impl Into<String>,
        steps: Vec<Step>,
        overlaps: Option<Vec<String>>,
    ) -> Result<()> {
        self.check_steps(&steps)?;
        self.paths.push(GfaPath {
            name: name.into(),
            steps,
            kind: PathKind::Path { overlaps },
            tags: Vec::new(),
        });
        Ok(())
    }

    /// Rename a segment, updating every edge endpoint and path step that
    /// references it. Validation happens before any mutation.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<()> {
        if old == new {
            return Ok(());
        }
        if !self.segments.contains_key(old) {
            return Err(GfaError::NotFound(old.to_string()));
        }
        if self.segments.contains_key(new) {
            return Err(GfaError::DuplicateSegmentId(new.to_string()));
        }

        let mut record = self.segments.remove(old).expect("checked above");
        record.name = new.to_string();
        self.segments.insert(new.to_string(), record);
        for slot in &mut self.segment_order {
            if slot == old {
                *slot = new.to_string();
            }
        }
        for edge in &mut self.edges {
            if edge.from_segment == old {
                edge.from_segment = new.to_string();
            }
            if edge.to_segment == old {
                edge.to_segment = new.to_string();
            }
        }
        for path in &mut self.paths {
            for step in &mut path.steps {
                if step.segment == old {
                    step.segment = new.to_string();
                }
            }
        }
        self.rebuild_adjacency();
        Ok(())
    }

    /// Reverse-complement a segment's sequence and flip the orientation of
    /// every edge endpoint and path step that references it, so the decoded
    /// sequence of any traversal is unchanged. Applying it twice restores
    /// the original graph.
    pub fn reverse_complement_segment(&mut self, id: &str) -> Result<()> {
        let segment = self
            .segments
            .get_mut(id)
            .ok_or_else(|| GfaError::NotFound(id.to_string()))?;
        if let Some(seq) = &segment.sequence {
            segment.sequence = Some(reverse_complement(seq));
        }
        for edge in &mut self.edges {
            if edge.from_segment == id {
                edge.from_orient = edge.from_orient.flip();
            }
            if edge.to_segment == id {
                edge.to_orient = edge.to_orient.flip();
            }
        }
        for path in &mut self.paths {
            for step in &mut path.steps {
                if step.segment == id {
                    step.orientation = step.orientation.flip();
                }
            }
        }
        self.rebuild_adjacency();
        Ok(())
    }

    /// Remove a segment and cascade: every incident edge is dropped and
    /// every path step referencing it is deleted. Paths left without steps
    /// are kept as empty paths; pruning them is the separate, explicit
    /// [`GfaGraph::remove_empty_paths`] call.
    pub fn remove_segment(&mut self, id: &str) -> Result<SegmentRecord> {
        let record = self
            .segments
            .remove(id)
            .ok_or_else(|| GfaError::NotFound(id.to_string()))?;
        self.segment_order.retain(|name| name != id);
        self.edges
            .retain(|e| e.from_segment != id && e.to_segment != id);
        for path in &mut self.paths {
            path.steps.retain(|step| step.segment != id);
        }
        self.rebuild_adjacency();
        Ok(record)
    }

    /// Drop every path that no longer has any steps.
    pub fn remove_empty_paths(&mut self) {
        self.paths.retain(|p| !p.steps.is_empty());
    }

    /// Remove the edge at the given index in [`GfaGraph::edges`].
    pub fn remove_edge(&mut self, index: usize) -> Result<Edge> {
        if index >= self.edges.len() {
            return Err(GfaError::NotFound(format!("edge index {}", index)));
        }
        let edge = self.edges.remove(index);
        self.rebuild_adjacency();
        Ok(edge)
    }

    /// Merge two segments connected by a forward/forward link from `a` to
    /// `b` into one segment `new_id` carrying the concatenated sequence.
    ///
    /// The connecting link (and its reverse reading, a `-`/`-` link from `b`
    /// to `a`) disappears; every other edge endpoint and path step that
    /// referenced `a` or `b` is rewritten to `new_id`. Adjacent `a+,b+` and
    /// `b-,a-` step pairs collapse to a single step.
    pub fn merge_segments(&mut self, a: &str, b: &str, new_id: &str) -> Result<()> {
        if a == b {
            return Err(GfaError::InvalidOperation(
                "cannot merge a segment with itself".to_string(),
            ));
        }
        for id in [a, b] {
            if !self.segments.contains_key(id) {
                return Err(GfaError::NotFound(id.to_string()));
            }
        }
        if new_id != a && new_id != b && self.segments.contains_key(new_id) {
            return Err(GfaError::DuplicateSegmentId(new_id.to_string()));
        }
        let connects = |e: &Edge| {
            matches!(e.kind, EdgeKind::Link { .. })
                && ((e.from_segment == a
                    && e.to_segment == b
                    && e.from_orient == Orientation::Forward
                    && e.to_orient == Orientation::Forward)
                    || (e.from_segment == b
                        && e.to_segment == a
                        && e.from_orient == Orientation::Reverse
                        && e.to_orient == Orientation::Reverse))
        };
        if !self.edges.iter().any(connects) {
            return Err(GfaError::DanglingReference(format!(
                "no forward link connecting {} to {}",
                a, b
            )));
        }

        let seg_a = self.segments.remove(a).expect("checked above");
        let seg_b = self.segments.remove(b).expect("checked above");
        let sequence = match (seg_a.sequence, seg_b.sequence) {
            (Some(sa), Some(sb)) => Some(sa + &sb),
            _ => None,
        };
        // New segment takes a's place in the output order
        let pos = self
            .segment_order
            .iter()
            .position(|n| n == a)
            .expect("a is ordered");
        self.segment_order.retain(|n| n != a && n != b);
        self.segment_order.insert(pos.min(self.segment_order.len()), new_id.to_string());
        self.segments.insert(
            new_id.to_string(),
            SegmentRecord {
                name: new_id.to_string(),
                sequence,
                tags: Vec::new(),
            },
        );

        self.edges.retain(|e| !connects(e));
        for edge in &mut self.edges {
            if edge.from_segment == a || edge.from_segment == b {
                edge.from_segment = new_id.to_string();
            }
            if edge.to_segment == a || edge.to_segment == b {
                edge.to_segment = new_id.to_string();
            }
        }

        for path in &mut self.paths {
            let mut rewritten: Vec<Step> = Vec::with_capacity(path.steps.len());
            let mut steps = std::mem::take(&mut path.steps).into_iter().peekable();
            while let Some(step) = steps.next() {
                if step.segment == a && step.orientation == Orientation::Forward {
                    // a+ followed by b+ collapses into new+
                    if steps
                        .peek()
                        .is_some_and(|n| n.segment == b && n.orientation == Orientation::Forward)
                    {
                        steps.next();
                    }
                    rewritten.push(Step::new(new_id, Orientation::Forward));
                } else if step.segment == b && step.orientation == Orientation::Reverse {
                    // b- followed by a- is the same junction read backwards
                    if steps
                        .peek()
                        .is_some_and(|n| n.segment == a && n.orientation == Orientation::Reverse)
                    {
                        steps.next();
                    }
                    rewritten.push(Step::new(new_id, Orientation::Reverse));
                } else if step.segment == a || step.segment == b {
                    rewritten.push(Step::new(new_id, step.orientation));
                } else {
                    rewritten.push(step);
                }
            }
            path.steps = rewritten;
        }
        self.rebuild_adjacency();
        Ok(())
    }

    /// Split a segment into consecutive pieces.
    ///
    /// `pieces` pairs each future segment name with the `(start, end)` slice
    /// of the original sequence it takes. Incoming edges move to the first
    /// piece, outgoing edges to the last, consecutive pieces get chained by
    /// `0M` links, and every path step over the original expands in place
    /// (reversed and flipped for reverse steps).
    pub fn split_segment(&mut self, id: &str, pieces: &[(String, usize, usize)]) -> Result<()> {
        let segment = self
            .segments
            .get(id)
            .ok_or_else(|| GfaError::NotFound(id.to_string()))?;
        let sequence = segment
            .sequence
            .clone()
            .ok_or_else(|| GfaError::MissingSequence(id.to_string()))?;
        if pieces.is_empty() {
            return Err(GfaError::InvalidOperation(
                "split requires at least one piece".to_string(),
            ));
        }
        for (name, start, end) in pieces {
            if start > end || *end > sequence.len() {
                return Err(GfaError::InvalidOperation(format!(
                    "range {}..{} is outside segment {} (length {})",
                    start,
                    end,
                    id,
                    sequence.len()
                )));
            }
            if name != id && self.segments.contains_key(name) {
                return Err(GfaError::DuplicateSegmentId(name.clone()));
            }
        }
        let names: Vec<&String> = pieces.iter().map(|(n, _, _)| n).collect();
        if names.iter().collect::<HashSet<_>>().len() != names.len() {
            return Err(GfaError::InvalidOperation(
                "piece names must be unique".to_string(),
            ));
        }

        let pos = self
            .segment_order
            .iter()
            .position(|n| n == id)
            .expect("segment is ordered");
        self.segments.remove(id);
        self.segment_order.remove(pos);
        for (i, (name, start, end)) in pieces.iter().enumerate() {
            self.segment_order.insert(pos + i, name.clone());
            self.segments.insert(
                name.clone(),
                SegmentRecord {
                    name: name.clone(),
                    sequence: Some(sequence[*start..*end].to_string()),
                    tags: Vec::new(),
                },
            );
        }

        let first = pieces[0].0.clone();
        let last = pieces[pieces.len() - 1].0.clone();
        for edge in &mut self.edges {
            if edge.from_segment == id {
                edge.from_segment = last.clone();
            }
            if edge.to_segment == id {
                edge.to_segment = first.clone();
            }
        }
        for window in pieces.windows(2) {
            self.edges.push(Edge {
                from_segment: window[0].0.clone(),
                from_orient: Orientation::Forward,
                to_segment: window[1].0.clone(),
                to_orient: Orientation::Forward,
                kind: EdgeKind::Link {
                    overlap: "0M".to_string(),
                },
                tags: Vec::new(),
            });
        }

        for path in &mut self.paths {
            let mut rewritten: Vec<Step> = Vec::with_capacity(path.steps.len());
            for step in path.steps.drain(..) {
                if step.segment != id {
                    rewritten.push(step);
                } else {
                    match step.orientation {
                        Orientation::Forward => rewritten.extend(
                            pieces
                                .iter()
                                .map(|(n, _, _)| Step::new(n.clone(), Orientation::Forward)),
                        ),
                        Orientation::Reverse => rewritten.extend(
                            pieces
                                .iter()
                                .rev()
                                .map(|(n, _, _)| Step::new(n.clone(), Orientation::Reverse)),
                        ),
                    }
                }
            }
            path.steps = rewritten;
        }
        self.rebuild_adjacency();
        Ok(())
    }

    /// Annotate every traversed segment with a `PO` (path offset) JSON tag
    /// mapping each path name to the `[start, end, orientation]` intervals
    /// at which the path reads it. Recomputes from scratch on every call.
    pub fn sequence_offsets(&mut self) {
        let mut offsets: BTreeMap<String, BTreeMap<String, Vec<serde_json::Value>>> =
            BTreeMap::new();
        for path in &self.paths {
            let mut cursor: usize = match &path.kind {
                PathKind::Walk { seq_start, .. } => seq_start.parse().unwrap_or(0),
                PathKind::Path { .. } => 0,
            };
            for step in &path.steps {
                let length = self
                    .segments
                    .get(&step.segment)
                    .and_then(|s| s.length())
                    .unwrap_or(0);
                offsets
                    .entry(step.segment.clone())
                    .or_default()
                    .entry(path.name.clone())
                    .or_default()
                    .push(serde_json::json!([
                        cursor,
                        cursor + length,
                        step.orientation.to_string()
                    ]));
                cursor += length;
            }
        }
        for (name, per_path) in offsets {
            let value = TagValue::Json(serde_json::json!(per_path));
            let segment = self.segments.get_mut(&name).expect("step was validated");
            match segment.tags.iter_mut().find(|t| t.name == "PO") {
                Some(tag) => tag.value = value,
                None => segment.tags.push(Tag::new("PO", value)),
            }
        }
    }

    /// Smallest unused positive integer identifier, for editor-generated
    /// segments.
    pub fn next_free_id(&self) -> String {
        let used: HashSet<u64> = self
            .segment_order
            .iter()
            .filter_map(|n| n.parse().ok())
            .collect();
        let mut candidate = 1u64;
        while used.contains(&candidate) {
            candidate += 1;
        }
        candidate.to_string()
    }
}
