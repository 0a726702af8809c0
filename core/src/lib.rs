//! Positional inverted index: normalization, forward indexing, inversion
//! with gap-encoded postings, and offset-based lookup.

pub mod error;
pub mod forward;
pub mod index;
pub mod invert;
pub mod persist;
pub mod postings;
pub mod reader;
pub mod stopwords;
pub mod tokenizer;

pub use error::{LineError, QueryError};
pub use forward::ForwardIndexer;
pub use index::{DocId, ForwardIndex, InvertedIndex, Position, TermId, TermInfo};
pub use invert::Inverter;
pub use persist::{IndexPaths, MetaFile};
pub use reader::{DocReport, IndexReader, TermDocReport, TermReport};
pub use stopwords::StopWords;
