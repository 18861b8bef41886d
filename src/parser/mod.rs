//! Two-source structured-text ingestion
//!
//! A forward-only primary reader drives the pipeline; a supplementary
//! reader is pulled along in lock-step by the merge coordinator. Both
//! share the same tree-building cursor. Malformed structure in either
//! stream is fatal; content-level anomalies go to diagnostics and
//! ingestion continues.

pub mod cursor;
pub mod filter;
pub mod merge;
pub mod primary;
pub mod property;
pub mod section;
pub mod supplement;

use thiserror::Error;

/// Errors that abort an ingestion.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed export: {0}")]
    Malformed(#[from] quick_xml::Error),

    #[error("unexpected end of stream")]
    UnexpectedEof,

    #[error("structural violation: {0}")]
    Structure(String),
}

impl ParseError {
    pub(crate) fn structure(message: impl Into<String>) -> Self {
        Self::Structure(message.into())
    }
}

/// Result type for ingestion operations.
pub type ParseResult<T> = Result<T, ParseError>;
