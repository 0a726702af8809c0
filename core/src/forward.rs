use std::collections::HashMap;

use crate::index::{DocId, ForwardIndex, Position, TermId};
use crate::stopwords::StopWords;
use crate::tokenizer::normalize;

/// Builds the forward index, assigning dense ids on first sight.
#[derive(Debug)]
pub struct ForwardIndexer {
    stop_words: StopWords,
    doc_ids: HashMap<String, DocId>,
    /// Doc names indexed by `DocId - 1`.
    doc_names: Vec<String>,
    term_ids: HashMap<String, TermId>,
    /// Terms indexed by `TermId - 1`.
    terms: Vec<String>,
    /// Tokens seen so far per document, so a repeated name keeps counting.
    doc_lengths: HashMap<DocId, Position>,
    forward: ForwardIndex,
}

impl ForwardIndexer {
    pub fn new(stop_words: StopWords) -> Self {
        Self {
            stop_words,
            doc_ids: HashMap::new(),
            doc_names: Vec::new(),
            term_ids: HashMap::new(),
            terms: Vec::new(),
            doc_lengths: HashMap::new(),
            forward: ForwardIndex::new(),
        }
    }

    /// Normalize `text` and record every term occurrence under `doc_name`.
    pub fn index_document(&mut self, doc_name: &str, text: &str) -> DocId {
        let doc_id = match self.doc_ids.get(doc_name) {
            Some(&id) => {
                tracing::warn!(doc = doc_name, doc_id = id, "document name seen twice, appending");
                id
            }
            None => {
                self.doc_names.push(doc_name.to_string());
                let id = self.doc_names.len() as DocId;
                self.doc_ids.insert(doc_name.to_string(), id);
                id
            }
        };

        let tokens = normalize(text, &self.stop_words);
        let base = self.doc_lengths.get(&doc_id).copied().unwrap_or(0);
        let doc_terms = self.forward.docs.entry(doc_id).or_default();

        for (i, token) in tokens.into_iter().enumerate() {
            let term_id = match self.term_ids.get(&token) {
                Some(&id) => id,
                None => {
                    self.terms.push(token.clone());
                    let id = self.terms.len() as TermId;
                    self.term_ids.insert(token, id);
                    id
                }
            };
            let position = base + i as Position + 1;
            doc_terms.entry(term_id).or_default().push(position);
            self.doc_lengths.insert(doc_id, position);
        }

        tracing::debug!(doc = doc_name, doc_id, terms = doc_terms.len(), "indexed document");
        doc_id
    }

    pub fn num_docs(&self) -> usize { self.doc_names.len() }

    pub fn num_terms(&self) -> usize { self.terms.len() }

    /// `(DocId, name)` ascending by id.
    pub fn doc_names(&self) -> impl Iterator<Item = (DocId, &str)> + '_ {
        self.doc_names.iter().enumerate().map(|(i, n)| (i as DocId + 1, n.as_str()))
    }

    /// `(TermId, term)` ascending by id.
    pub fn terms(&self) -> impl Iterator<Item = (TermId, &str)> + '_ {
        self.terms.iter().enumerate().map(|(i, t)| (i as TermId + 1, t.as_str()))
    }

    pub fn term_id(&self, term: &str) -> Option<TermId> { self.term_ids.get(term).copied() }

    pub fn forward(&self) -> &ForwardIndex { &self.forward }
}
