use thiserror::Error;

/// Errors raised while building or decoding document conditions.
///
/// All of these surface at query-construction time. A document whose shape
/// does not fit a key path is never an error: it simply does not match.
#[derive(Debug, Error)]
pub enum LookupError {
    /// A lookup the relational layer knows but the document column rejects
    #[error("Unsupported lookup '{lookup}' for jsonb field")]
    Unsupported { lookup: String },

    /// Operand shape does not fit the lookup
    #[error("Invalid operand for '{lookup}': expected {expected}, got {found}")]
    InvalidOperand {
        lookup: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// Filter path does not start with the column's name
    #[error("Unknown field '{found}'; this column is '{expected}'")]
    UnknownField { expected: String, found: String },

    /// Filter path contains an empty `__` segment
    #[error("Empty segment in lookup path '{path}'")]
    EmptySegment { path: String },

    /// Column names must be plain SQL identifiers
    #[error("Invalid column name '{0}'")]
    InvalidColumnName(String),

    /// Stored text could not be decoded as JSON
    #[error("Invalid stored document: {0}")]
    Decode(#[from] serde_json::Error),
}
