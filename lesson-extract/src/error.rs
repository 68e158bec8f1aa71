//! Error types for lesson extraction.

use std::fmt;

/// Errors surfaced to callers of the extraction pipeline.
///
/// Per-section and per-question shortfalls never appear here; the pipeline
/// absorbs them by cascading to the next heuristic tier or substituting a
/// default. Only document-level problems are reported.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractError {
    /// Source document was empty or contained no usable text
    EmptyDocument,
    /// A lesson's title marker could not be located
    TitleNotFound(usize),
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::EmptyDocument => write!(f, "document is empty"),
            ExtractError::TitleNotFound(ordinal) => {
                write!(f, "title marker for lesson {ordinal} not found")
            }
        }
    }
}

impl std::error::Error for ExtractError {}
