use thiserror::Error;

use crate::index::{DocId, TermId};

/// A single malformed record in one of the tab-delimited artifacts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineError {
    #[error("missing field in {line:?}, expected {expected}")]
    MissingField { line: String, expected: &'static str },
    #[error("not an integer: {0:?}")]
    BadInteger(String),
    #[error("gap {0:?} overflows the running id or position")]
    GapOverflow(String),
}

/// Query-time failures. The Display text is what the shell shows the user.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Document not found: {0}")]
    DocumentNotFound(String),
    #[error("Unable to stem term: {0}")]
    UnableToStem(String),
    #[error("Term not found: {0}")]
    TermNotFound(String),
    #[error("Term not found in document: {doc_name}")]
    TermNotInDocument { term_id: TermId, doc_id: DocId, doc_name: String },
    #[error("Inverted list not found for term: {0}")]
    InvertedListMissing(String),
    #[error("Failed to read inverted list for term: {term}")]
    Io {
        term: String,
        #[source]
        source: std::io::Error,
    },
}
