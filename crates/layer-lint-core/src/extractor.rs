//! Language-agnostic import extraction types and trait.
//!
//! `ImportExtractor` is the extension point for adding new languages.
//! Implement it to teach the analyzer how to pull import edges out of
//! source text for a given file suffix.

use crate::types::ImportEdge;

/// Why a source file yielded no import edges.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseFailure {
    /// Source bytes are not valid UTF-8.
    #[error("source is not valid UTF-8")]
    InvalidUtf8,
    /// Source does not parse; `line` is the first offending line (1-indexed).
    #[error("syntax error near line {line}")]
    Syntax {
        /// First line containing an error.
        line: usize,
    },
    /// The parser could not be set up or gave up.
    #[error("parser unavailable: {0}")]
    ParserUnavailable(String),
    /// The file could not be read.
    #[error("unreadable: {0}")]
    Unreadable(String),
}

/// Outcome of scanning one source file for imports.
///
/// Distinguishes "parsed, maybe with no imports" from "could not parse";
/// [`ScanOutcome::into_edges`] collapses both into an edge list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Source parsed; edges in source order.
    Parsed(Vec<ImportEdge>),
    /// Source could not be parsed.
    Unparsable(ParseFailure),
}

impl ScanOutcome {
    /// Edges found, or none if parsing failed.
    #[must_use]
    pub fn into_edges(self) -> Vec<ImportEdge> {
        match self {
            Self::Parsed(edges) => edges,
            Self::Unparsable(_) => Vec::new(),
        }
    }

    /// The parse failure, if any.
    #[must_use]
    pub fn failure(&self) -> Option<&ParseFailure> {
        match self {
            Self::Parsed(_) => None,
            Self::Unparsable(f) => Some(f),
        }
    }
}

/// Trait for language-specific import extraction.
///
/// Implementations must never panic on malformed input: anything that does
/// not parse becomes [`ScanOutcome::Unparsable`].
pub trait ImportExtractor: Send + Sync {
    /// Language identifier (e.g., `"python"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this extractor handles (e.g., `&[".py"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Scans raw source bytes for import statements.
    fn scan(&self, source: &[u8]) -> ScanOutcome;

    /// Import edges in `source`; empty when it does not parse.
    fn extract_imports(&self, source: &[u8]) -> Vec<ImportEdge> {
        self.scan(source).into_edges()
    }
}
