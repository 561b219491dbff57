//! Error types for gfagraphs

use thiserror::Error;

/// Result type alias for gfagraphs operations
pub type Result<T> = std::result::Result<T, GfaError>;

/// Main error type for gfagraphs
#[derive(Error, Debug)]
pub enum GfaError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Bad tag syntax or tag type mismatch
    #[error("malformed tag at line {line}: {message}")]
    MalformedTag { line: usize, message: String },

    /// First token of a line is not a recognized record type
    #[error("unknown line type at line {line}: {token:?}")]
    UnknownLineType { line: usize, token: String },

    /// Wrong number of positional fields for the line type
    #[error("field count mismatch at line {line}: {message}")]
    FieldCountMismatch { line: usize, message: String },

    /// A segment identifier was declared twice
    #[error("duplicate segment id: {0}")]
    DuplicateSegmentId(String),

    /// An edge or path references a segment absent from the graph
    #[error("dangling reference to segment: {0}")]
    DanglingReference(String),

    /// Edit target does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Editor arguments that cannot be applied to the current graph
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// A sequence-level operation hit a segment with an elided sequence
    #[error("segment {0} has no sequence loaded")]
    MissingSequence(String),

    /// File not found errors
    #[error("file not found: {0}")]
    FileNotFound(String),
}

impl GfaError {
    /// Attaches a 1-based source line number to a parse error produced
    /// without position information.
    pub(crate) fn at_line(self, line: usize) -> Self {
        match self {
            GfaError::MalformedTag { line: 0, message } => GfaError::MalformedTag { line, message },
            GfaError::UnknownLineType { line: 0, token } => {
                GfaError::UnknownLineType { line, token }
            }
            GfaError::FieldCountMismatch { line: 0, message } => {
                GfaError::FieldCountMismatch { line, message }
            }
            other => other,
        }
    }
}
