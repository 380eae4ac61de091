/// Errors raised while reading a job document.
///
/// `TypeMismatch` is the only soft variant: it is collected as a warning and
/// the field keeps its default. Every other variant aborts parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid job document: {0}")]
    InvalidDocument(String),

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("field {field}: expected 3 numbers, found {found}")]
    MalformedVector { field: String, found: usize },

    #[error("field {field}: scale components must be non-negative")]
    NegativeScale { field: String },

    #[error("field {field}: {reason}")]
    InvalidRotation { field: String, reason: String },

    #[error("field {field}: expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl ParseError {
    /// Soft errors are reported as warnings and never fail a document.
    pub fn is_soft(&self) -> bool {
        matches!(self, ParseError::TypeMismatch { .. })
    }
}
