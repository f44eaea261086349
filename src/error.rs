use thiserror::Error;

/// Failures of history indexing and belief propagation.
///
/// Every variant is deterministic: retrying the same call with the same
/// arguments fails the same way.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MadpError {
    /// An index or count left the representable range of [`crate::Index`].
    #[error("overflow: {0}")]
    Overflow(String),

    /// A history, successor, predecessor or symbol does not exist.
    #[error("invalid index: {0}")]
    InvalidIndex(String),

    /// The query needs materialized histories but the category is lazy.
    #[error("not cached: {0}")]
    NotCached(String),

    /// Two histories that were supposed to agree do not.
    #[error("inconsistent: {0}")]
    Consistency(String),

    /// The request is meaningless in the current configuration.
    #[error("domain error: {0}")]
    Domain(String),

    /// Parameters, model rows or beliefs failed validation.
    #[error("sanity check failed: {0}")]
    Sanity(String),

    /// Configuration text could not be read.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for MadpError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

/// Result type alias for history and belief operations.
pub type Result<T> = std::result::Result<T, MadpError>;
