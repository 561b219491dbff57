//! GFA line schemas: parsing raw lines into typed records and serializing
//! them back to the canonical tab-delimited form.
//!
//! Each line type carries a fixed positional schema; any fields beyond it
//! are optional tags decoded through [`crate::tag`]. Tags keep their parse
//! order so a parse/serialize round trip stays diffable.

use crate::error::{GfaError, Result};
use crate::tag::Tag;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Orientation of a segment in a path, walk, link or containment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Forward,
    Reverse,
}

impl Orientation {
    pub fn from_char(c: char) -> Result<Self> {
        match c {
            '+' => Ok(Orientation::Forward),
            '-' => Ok(Orientation::Reverse),
            _ => Err(GfaError::FieldCountMismatch {
                line: 0,
                message: format!("invalid orientation: {}", c),
            }),
        }
    }

    /// The opposite reading direction
    pub fn flip(self) -> Self {
        match self {
            Orientation::Forward => Orientation::Reverse,
            Orientation::Reverse => Orientation::Forward,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Forward => write!(f, "+"),
            Orientation::Reverse => write!(f, "-"),
        }
    }
}

/// One oriented step of a path or walk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub segment: String,
    pub orientation: Orientation,
}

impl Step {
    pub fn new(segment: impl Into<String>, orientation: Orientation) -> Self {
        Step {
            segment: segment.into(),
            orientation,
        }
    }
}

/// `H` line: version and file-level tags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeaderRecord {
    pub tags: Vec<Tag>,
}

/// `S` line: one node of the graph
///
/// `sequence` is `None` when the file elides it with `*`; that is distinct
/// from an empty sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRecord {
    pub name: String,
    pub sequence: Option<String>,
    pub tags: Vec<Tag>,
}

impl SegmentRecord {
    /// Sequence length, derived from the sequence or from an `LN` tag when
    /// the sequence is elided.
    pub fn length(&self) -> Option<usize> {
        if let Some(seq) = &self.sequence {
            return Some(seq.len());
        }
        self.tags
            .iter()
            .find(|t| t.name == "LN")
            .and_then(|t| t.value.as_int())
            .map(|n| n as usize)
    }
}

/// `L` line: dovetail overlap between two oriented segment ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub from_segment: String,
    pub from_orient: Orientation,
    pub to_segment: String,
    pub to_orient: Orientation,
    pub overlap: String,
    pub tags: Vec<Tag>,
}

/// `C` line: one segment's sequence contained within another's
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainmentRecord {
    pub container: String,
    pub container_orient: Orientation,
    pub contained: String,
    pub contained_orient: Orientation,
    pub pos: usize,
    pub overlap: String,
    pub tags: Vec<Tag>,
}

/// `P` line: an ordered traversal of oriented segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathRecord {
    pub name: String,
    pub steps: Vec<Step>,
    /// Overlap CIGARs between consecutive steps; `None` when given as `*`
    pub overlaps: Option<Vec<String>>,
    pub tags: Vec<Tag>,
}

/// `W` line (GFA 1.1): a haplotype walk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkRecord {
    pub sample: String,
    pub haplotype: String,
    pub seq_id: String,
    /// Start offset on the underlying sequence, `*` kept verbatim
    pub seq_start: String,
    /// End offset on the underlying sequence, `*` kept verbatim
    pub seq_end: String,
    pub steps: Vec<Step>,
    pub tags: Vec<Tag>,
}

impl WalkRecord {
    /// Composite name used to key the walk among the graph's paths
    pub fn path_name(&self) -> String {
        format!("{}#{}#{}", self.sample, self.haplotype, self.seq_id)
    }
}

/// `J` line (GFA 1.2): a jump between oriented segments with a gap estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JumpRecord {
    pub from_segment: String,
    pub from_orient: Orientation,
    pub to_segment: String,
    pub to_orient: Orientation,
    /// Estimated distance, `*` kept verbatim
    pub distance: String,
    pub tags: Vec<Tag>,
}

/// One parsed GFA line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Record {
    Header(HeaderRecord),
    Segment(SegmentRecord),
    Link(LinkRecord),
    Containment(ContainmentRecord),
    Path(PathRecord),
    Walk(WalkRecord),
    Jump(JumpRecord),
    /// Everything after the leading `#`, verbatim
    Comment(String),
}

impl Record {
    /// Parse one raw GFA line into a typed record.
    ///
    /// The first tab-delimited token selects the line type and its fixed
    /// positional schema; remaining fields are optional tags. Duplicate tag
    /// names within one line fail fast with a malformed-tag error.
    pub fn parse(line: &str) -> Result<Record> {
        let line = line.trim_end_matches(['\n', '\r']);
        if let Some(rest) = line.strip_prefix('#') {
            return Ok(Record::Comment(rest.to_string()));
        }
        if line.is_empty() {
            return Err(GfaError::FieldCountMismatch {
                line: 0,
                message: "blank line".to_string(),
            });
        }

        let fields: Vec<&str> = line.split('\t').collect();
        match fields[0] {
            "H" => Ok(Record::Header(HeaderRecord {
                tags: parse_tags(&fields[1..])?,
            })),
            "S" => {
                require(&fields, 3, "S")?;
                let sequence = match fields[2] {
                    "*" => None,
                    seq => Some(seq.to_string()),
                };
                Ok(Record::Segment(SegmentRecord {
                    name: fields[1].to_string(),
                    sequence,
                    tags: parse_tags(&fields[3..])?,
                }))
            }
            "L" => {
                require(&fields, 6, "L")?;
                Ok(Record::Link(LinkRecord {
                    from_segment: fields[1].to_string(),
                    from_orient: parse_orient(fields[2])?,
                    to_segment: fields[3].to_string(),
                    to_orient: parse_orient(fields[4])?,
                    overlap: fields[5].to_string(),
                    tags: parse_tags(&fields[6..])?,
                }))
            }
            "C" => {
                require(&fields, 7, "C")?;
                let pos = fields[5]
                    .parse::<usize>()
                    .map_err(|_| GfaError::FieldCountMismatch {
                        line: 0,
                        message: format!("C record position {:?} is not an integer", fields[5]),
                    })?;
                Ok(Record::Containment(ContainmentRecord {
                    container: fields[1].to_string(),
                    container_orient: parse_orient(fields[2])?,
                    contained: fields[3].to_string(),
                    contained_orient: parse_orient(fields[4])?,
                    pos,
                    overlap: fields[6].to_string(),
                    tags: parse_tags(&fields[7..])?,
                }))
            }
            "P" => {
                require(&fields, 4, "P")?;
                let overlaps = match fields[3] {
                    "*" => None,
                    o => Some(o.split(',').map(String::from).collect()),
                };
                Ok(Record::Path(PathRecord {
                    name: fields[1].to_string(),
                    steps: parse_path_steps(fields[2])?,
                    overlaps,
                    tags: parse_tags(&fields[4..])?,
                }))
            }
            "W" => {
                require(&fields, 7, "W")?;
                Ok(Record::Walk(WalkRecord {
                    sample: fields[1].to_string(),
                    haplotype: fields[2].to_string(),
                    seq_id: fields[3].to_string(),
                    seq_start: fields[4].to_string(),
                    seq_end: fields[5].to_string(),
                    steps: parse_walk_steps(fields[6])?,
                    tags: parse_tags(&fields[7..])?,
                }))
            }
            "J" => {
                require(&fields, 6, "J")?;
                Ok(Record::Jump(JumpRecord {
                    from_segment: fields[1].to_string(),
                    from_orient: parse_orient(fields[2])?,
                    to_segment: fields[3].to_string(),
                    to_orient: parse_orient(fields[4])?,
                    distance: fields[5].to_string(),
                    tags: parse_tags(&fields[6..])?,
                }))
            }
            other => Err(GfaError::UnknownLineType {
                line: 0,
                token: other.to_string(),
            }),
        }
    }

    /// The optional tags of this record, empty for comments.
    pub fn tags(&self) -> &[Tag] {
        match self {
            Record::Header(r) => &r.tags,
            Record::Segment(r) => &r.tags,
            Record::Link(r) => &r.tags,
            Record::Containment(r) => &r.tags,
            Record::Path(r) => &r.tags,
            Record::Walk(r) => &r.tags,
            Record::Jump(r) => &r.tags,
            Record::Comment(_) => &[],
        }
    }
}

fn require(fields: &[&str], n: usize, what: &str) -> Result<()> {
    if fields.len() < n {
        return Err(GfaError::FieldCountMismatch {
            line: 0,
            message: format!(
                "{} record requires at least {} fields, got {}",
                what,
                n,
                fields.len()
            ),
        });
    }
    Ok(())
}

fn parse_orient(field: &str) -> Result<Orientation> {
    let mut chars = field.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Orientation::from_char(c),
        _ => Err(GfaError::FieldCountMismatch {
            line: 0,
            message: format!("invalid orientation field: {:?}", field),
        }),
    }
}

/// Decode the optional-field suffix, rejecting duplicate tag names.
fn parse_tags(fields: &[&str]) -> Result<Vec<Tag>> {
    let mut tags: Vec<Tag> = Vec::with_capacity(fields.len());
    for field in fields {
        let tag = Tag::parse(field)?;
        if tags.iter().any(|t| t.name == tag.name) {
            return Err(GfaError::MalformedTag {
                line: 0,
                message: format!("duplicate tag name {:?}", tag.name),
            });
        }
        tags.push(tag);
    }
    Ok(tags)
}

/// `seg1+,seg2-` step list of a P line
fn parse_path_steps(field: &str) -> Result<Vec<Step>> {
    let mut steps = Vec::new();
    for step in field.split(',') {
        let (segment, orient) = match step.char_indices().last() {
            Some((idx, c @ ('+' | '-'))) if idx > 0 => (&step[..idx], c),
            _ => {
                return Err(GfaError::FieldCountMismatch {
                    line: 0,
                    message: format!("path step missing orientation: {:?}", step),
                })
            }
        };
        steps.push(Step::new(segment, Orientation::from_char(orient)?));
    }
    Ok(steps)
}

/// `>seg1<seg2` step list of a W line
fn parse_walk_steps(field: &str) -> Result<Vec<Step>> {
    let mut steps = Vec::new();
    let mut rest = field;
    while !rest.is_empty() {
        let orientation = match rest.as_bytes()[0] {
            b'>' => Orientation::Forward,
            b'<' => Orientation::Reverse,
            _ => {
                return Err(GfaError::FieldCountMismatch {
                    line: 0,
                    message: format!("walk must alternate [><]segment, got {:?}", field),
                })
            }
        };
        rest = &rest[1..];
        let end = rest
            .find(['>', '<'])
            .unwrap_or(rest.len());
        if end == 0 {
            return Err(GfaError::FieldCountMismatch {
                line: 0,
                message: format!("empty segment name in walk {:?}", field),
            });
        }
        steps.push(Step::new(&rest[..end], orientation));
        rest = &rest[end..];
    }
    Ok(steps)
}

fn write_tags(f: &mut fmt::Formatter<'_>, tags: &[Tag]) -> fmt::Result {
    for tag in tags {
        write!(f, "\t{}", tag)?;
    }
    Ok(())
}

impl fmt::Display for Record {
    /// Canonical line rendering: type token, positional fields in schema
    /// order, then tags in original parse order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Record::Header(r) => {
                write!(f, "H")?;
                write_tags(f, &r.tags)
            }
            Record::Segment(r) => {
                write!(f, "S\t{}\t{}", r.name, r.sequence.as_deref().unwrap_or("*"))?;
                write_tags(f, &r.tags)
            }
            Record::Link(r) => {
                write!(
                    f,
                    "L\t{}\t{}\t{}\t{}\t{}",
                    r.from_segment, r.from_orient, r.to_segment, r.to_orient, r.overlap
                )?;
                write_tags(f, &r.tags)
            }
            Record::Containment(r) => {
                write!(
                    f,
                    "C\t{}\t{}\t{}\t{}\t{}\t{}",
                    r.container, r.container_orient, r.contained, r.contained_orient, r.pos,
                    r.overlap
                )?;
                write_tags(f, &r.tags)
            }
            Record::Path(r) => {
                let steps: Vec<String> = r
                    .steps
                    .iter()
                    .map(|s| format!("{}{}", s.segment, s.orientation))
                    .collect();
                let overlaps = match &r.overlaps {
                    Some(o) => o.join(","),
                    None => "*".to_string(),
                };
                write!(f, "P\t{}\t{}\t{}", r.name, steps.join(","), overlaps)?;
                write_tags(f, &r.tags)
            }
            Record::Walk(r) => {
                write!(
                    f,
                    "W\t{}\t{}\t{}\t{}\t{}\t",
                    r.sample, r.haplotype, r.seq_id, r.seq_start, r.seq_end
                )?;
                for step in &r.steps {
                    let marker = match step.orientation {
                        Orientation::Forward => '>',
                        Orientation::Reverse => '<',
                    };
                    write!(f, "{}{}", marker, step.segment)?;
                }
                write_tags(f, &r.tags)
            }
            Record::Jump(r) => {
                write!(
                    f,
                    "J\t{}\t{}\t{}\t{}\t{}",
                    r.from_segment, r.from_orient, r.to_segment, r.to_orient, r.distance
                )?;
                write_tags(f, &r.tags)
            }
            Record::Comment(text) => write!(f, "#{}", text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::TagValue;

    #[test]
    fn test_parse_segment() {
        let rec = Record::parse("S\t1\tACGT\tLN:i:4").unwrap();
        match &rec {
            Record::Segment(s) => {
                assert_eq!(s.name, "1");
                assert_eq!(s.sequence.as_deref(), Some("ACGT"));
                assert_eq!(s.length(), Some(4));
                assert_eq!(s.tags[0].value, TagValue::Int(4));
            }
            other => panic!("expected segment, got {:?}", other),
        }
        assert_eq!(rec.to_string(), "S\t1\tACGT\tLN:i:4");
    }

    #[test]
    fn test_elided_sequence_distinct_from_empty() {
        let elided = Record::parse("S\ts1\t*\tLN:i:8").unwrap();
        match elided {
            Record::Segment(s) => {
                assert_eq!(s.sequence, None);
                assert_eq!(s.length(), Some(8));
            }
            other => panic!("expected segment, got {:?}", other),
        }
        let empty = Record::parse("S\ts1\t").unwrap();
        match empty {
            Record::Segment(s) => assert_eq!(s.sequence.as_deref(), Some("")),
            other => panic!("expected segment, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_link() {
        let rec = Record::parse("L\t1\t+\t2\t-\t4M").unwrap();
        match &rec {
            Record::Link(l) => {
                assert_eq!(l.from_segment, "1");
                assert_eq!(l.from_orient, Orientation::Forward);
                assert_eq!(l.to_segment, "2");
                assert_eq!(l.to_orient, Orientation::Reverse);
                assert_eq!(l.overlap, "4M");
            }
            other => panic!("expected link, got {:?}", other),
        }
        assert_eq!(rec.to_string(), "L\t1\t+\t2\t-\t4M");
    }

    #[test]
    fn test_parse_containment() {
        let rec = Record::parse("C\tbig\t+\tlittle\t-\t10\t20M\tRC:i:3").unwrap();
        match &rec {
            Record::Containment(c) => {
                assert_eq!(c.container, "big");
                assert_eq!(c.contained_orient, Orientation::Reverse);
                assert_eq!(c.pos, 10);
                assert_eq!(c.overlap, "20M");
            }
            other => panic!("expected containment, got {:?}", other),
        }
        assert_eq!(rec.to_string(), "C\tbig\t+\tlittle\t-\t10\t20M\tRC:i:3");
    }

    #[test]
    fn test_parse_path() {
        let rec = Record::parse("P\tp1\ts1+,s2-\t4M").unwrap();
        match &rec {
            Record::Path(p) => {
                assert_eq!(p.name, "p1");
                assert_eq!(p.steps[0], Step::new("s1", Orientation::Forward));
                assert_eq!(p.steps[1], Step::new("s2", Orientation::Reverse));
                assert_eq!(p.overlaps.as_deref(), Some(&["4M".to_string()][..]));
            }
            other => panic!("expected path, got {:?}", other),
        }
        assert_eq!(rec.to_string(), "P\tp1\ts1+,s2-\t4M");
    }

    #[test]
    fn test_parse_walk() {
        let rec = Record::parse("W\tNA12878\t1\tchr1\t0\t11\t>s1<s2>s3").unwrap();
        match &rec {
            Record::Walk(w) => {
                assert_eq!(w.path_name(), "NA12878#1#chr1");
                assert_eq!(w.steps.len(), 3);
                assert_eq!(w.steps[1], Step::new("s2", Orientation::Reverse));
            }
            other => panic!("expected walk, got {:?}", other),
        }
        assert_eq!(rec.to_string(), "W\tNA12878\t1\tchr1\t0\t11\t>s1<s2>s3");
    }

    #[test]
    fn test_parse_jump() {
        let rec = Record::parse("J\ts1\t+\ts2\t-\t*\tSC:i:1").unwrap();
        match &rec {
            Record::Jump(j) => {
                assert_eq!(j.distance, "*");
                assert_eq!(j.to_orient, Orientation::Reverse);
            }
            other => panic!("expected jump, got {:?}", other),
        }
        assert_eq!(rec.to_string(), "J\ts1\t+\ts2\t-\t*\tSC:i:1");
    }

    #[test]
    fn test_comment_kept_verbatim() {
        let rec = Record::parse("# not\ta:tag:line").unwrap();
        assert_eq!(rec, Record::Comment(" not\ta:tag:line".to_string()));
        assert_eq!(rec.to_string(), "# not\ta:tag:line");
    }

    #[test]
    fn test_unknown_line_type() {
        assert!(matches!(
            Record::parse("X\tfoo"),
            Err(GfaError::UnknownLineType { .. })
        ));
    }

    #[test]
    fn test_blank_line_and_arity() {
        assert!(matches!(
            Record::parse(""),
            Err(GfaError::FieldCountMismatch { .. })
        ));
        assert!(matches!(
            Record::parse("L\ts1\t+\ts2"),
            Err(GfaError::FieldCountMismatch { .. })
        ));
    }

    #[test]
    fn test_duplicate_tag_rejected() {
        assert!(matches!(
            Record::parse("S\ts1\tACGT\tLN:i:4\tLN:i:5"),
            Err(GfaError::MalformedTag { .. })
        ));
    }

    #[test]
    fn test_header_roundtrip() {
        let line = "H\tVN:Z:1.0";
        assert_eq!(Record::parse(line).unwrap().to_string(), line);
    }

    #[test]
    fn test_path_step_missing_orientation() {
        assert!(Record::parse("P\tp\ts1,s2+\t*").is_err());
    }
}
