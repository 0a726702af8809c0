use anyhow::Result;
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Seek, SeekFrom};
use std::path::PathBuf;

use crate::error::QueryError;
use crate::index::{DocId, ForwardIndex, Position, TermId, TermInfo};
use crate::persist::{load_doc_ids, load_doc_index, load_meta, load_term_ids, load_term_info, IndexPaths, MetaFile};
use crate::postings::{decode_line, PostingList};
use crate::stopwords::StopWords;
use crate::tokenizer::first_term;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocReport {
    pub doc_name: String,
    pub doc_id: DocId,
    pub distinct_terms: usize,
    pub total_terms: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermReport {
    pub term: String,
    pub term_id: TermId,
    pub info: TermInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermDocReport {
    pub term: String,
    pub doc_name: String,
    pub term_id: TermId,
    pub doc_id: DocId,
    pub positions: Vec<Position>,
}

impl fmt::Display for DocReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Listing for document: {}", self.doc_name)?;
        writeln!(f, "DOCID: {}", self.doc_id)?;
        writeln!(f, "Distinct terms: {}", self.distinct_terms)?;
        write!(f, "Total terms: {}", self.total_terms)
    }
}

impl fmt::Display for TermReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Listing for term: {}", self.term)?;
        writeln!(f, "TERMID: {}", self.term_id)?;
        writeln!(f, "Number of documents containing term: {}", self.info.doc_count)?;
        writeln!(f, "Term frequency in corpus: {}", self.info.total_occurrences)?;
        write!(f, "Inverted list offset: {}", self.info.offset)
    }
}

impl fmt::Display for TermDocReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let positions = self.positions.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(", ");
        writeln!(f, "Inverted list for term: {}", self.term)?;
        writeln!(f, "In document: {}", self.doc_name)?;
        writeln!(f, "TERMID: {}", self.term_id)?;
        writeln!(f, "DOCID: {}", self.doc_id)?;
        writeln!(f, "Term frequency in document: {}", self.positions.len())?;
        write!(f, "Positions: {}", positions)
    }
}

/// Query side of the index: id maps, term statistics and the forward index
/// are held in memory; postings are read from `term_index.txt` by offset.
#[derive(Debug)]
pub struct IndexReader {
    stop_words: StopWords,
    doc_ids: HashMap<String, DocId>,
    terms: HashMap<TermId, String>,
    term_lookup: HashMap<String, TermId>,
    term_info: HashMap<TermId, TermInfo>,
    forward: ForwardIndex,
    meta: Option<MetaFile>,
    term_index_path: PathBuf,
}

impl IndexReader {
    /// Load every artifact under `paths`. Any missing file is an error.
    pub fn open(paths: &IndexPaths, stop_words: StopWords) -> Result<Self> {
        let doc_ids = load_doc_ids(paths)?;
        let terms = load_term_ids(paths)?;
        let term_info = load_term_info(paths)?;
        let forward = load_doc_index(&paths.doc_index())?;
        let term_lookup = terms.iter().map(|(&id, t)| (t.clone(), id)).collect();
        let meta = match load_meta(paths) {
            Ok(meta) => Some(meta),
            Err(err) => {
                tracing::debug!(%err, "no index metadata");
                None
            }
        };

        let term_index_path = paths.term_index();
        if !term_index_path.is_file() {
            anyhow::bail!("missing term index {}", term_index_path.display());
        }

        tracing::info!(docs = doc_ids.len(), terms = terms.len(), "loaded index");
        Ok(Self { stop_words, doc_ids, terms, term_lookup, term_info, forward, meta, term_index_path })
    }

    pub fn num_docs(&self) -> usize { self.doc_ids.len() }

    pub fn num_terms(&self) -> usize { self.terms.len() }

    pub fn meta(&self) -> Option<&MetaFile> { self.meta.as_ref() }

    pub fn doc_info(&self, doc_name: &str) -> Result<DocReport, QueryError> {
        let doc_id = self.resolve_doc(doc_name)?;
        let (distinct_terms, total_terms) = self.forward.doc_stats(doc_id);
        Ok(DocReport { doc_name: doc_name.to_string(), doc_id, distinct_terms, total_terms })
    }

    pub fn term_info(&self, term: &str) -> Result<TermReport, QueryError> {
        let (term_id, info) = self.resolve_term(term)?;
        Ok(TermReport { term: term.to_string(), term_id, info })
    }

    pub fn term_doc_info(&self, term: &str, doc_name: &str) -> Result<TermDocReport, QueryError> {
        let (term_id, info) = self.resolve_term(term)?;
        let doc_id = self.resolve_doc(doc_name)?;
        let list = self.read_postings(term, term_id, info.offset)?;
        match list.positions(doc_id) {
            Some(positions) => Ok(TermDocReport {
                term: term.to_string(),
                doc_name: doc_name.to_string(),
                term_id,
                doc_id,
                positions: positions.to_vec(),
            }),
            None => Err(QueryError::TermNotInDocument { term_id, doc_id, doc_name: doc_name.to_string() }),
        }
    }

    fn resolve_doc(&self, doc_name: &str) -> Result<DocId, QueryError> {
        self.doc_ids
            .get(doc_name)
            .copied()
            .ok_or_else(|| QueryError::DocumentNotFound(doc_name.to_string()))
    }

    /// Normalize exactly as the indexer does and take the first stem.
    fn resolve_term(&self, term: &str) -> Result<(TermId, TermInfo), QueryError> {
        let stem = first_term(term, &self.stop_words).ok_or_else(|| QueryError::UnableToStem(term.to_string()))?;
        let term_id = *self.term_lookup.get(&stem).ok_or_else(|| QueryError::TermNotFound(term.to_string()))?;
        let info = *self.term_info.get(&term_id).ok_or_else(|| QueryError::TermNotFound(term.to_string()))?;
        Ok((term_id, info))
    }

    fn read_postings(&self, term: &str, term_id: TermId, offset: u64) -> Result<PostingList, QueryError> {
        let line = self
            .read_line_at(offset)
            .map_err(|source| QueryError::Io { term: term.to_string(), source })?
            .ok_or_else(|| QueryError::InvertedListMissing(term.to_string()))?;

        let list = decode_line(&line).map_err(|err| {
            tracing::warn!(term_id, offset, %err, "malformed inverted list");
            QueryError::InvertedListMissing(term.to_string())
        })?;
        if list.term_id != term_id {
            tracing::warn!(term_id, found = list.term_id, offset, "offset points at another term");
            return Err(QueryError::InvertedListMissing(term.to_string()));
        }
        Ok(list)
    }

    /// Seek to a byte offset and read up to and including the next `\n`.
    fn read_line_at(&self, offset: u64) -> io::Result<Option<String>> {
        let mut file = File::open(&self.term_index_path)?;
        file.seek(SeekFrom::Start(offset))?;
        let mut buf = Vec::new();
        let n = BufReader::new(file).read_until(b'\n', &mut buf)?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }
}
