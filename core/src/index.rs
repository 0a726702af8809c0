use std::collections::{BTreeMap, HashMap};

pub type TermId = u32;
pub type DocId = u32;
/// 1-based token position after stop-word filtering.
pub type Position = u32;

/// Positions of each term within one document.
pub type TermPositions = HashMap<TermId, Vec<Position>>;

/// DocId -> TermId -> positions (strictly increasing).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ForwardIndex {
    pub docs: HashMap<DocId, TermPositions>,
}

/// TermId -> DocId -> sorted positions. Ordered maps so that iteration
/// matches the order terms and documents are written to disk.
pub type InvertedIndex = BTreeMap<TermId, BTreeMap<DocId, Vec<Position>>>;

/// Per-term statistics stored in `term_info.txt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermInfo {
    /// Byte offset of the term's line in `term_index.txt`.
    pub offset: u64,
    pub total_occurrences: u32,
    pub doc_count: u32,
}

impl ForwardIndex {
    pub fn new() -> Self { Self::default() }

    /// Append positions for a (doc, term) pair; repeated pairs concatenate.
    pub fn extend(&mut self, doc_id: DocId, term_id: TermId, positions: &[Position]) {
        self.docs
            .entry(doc_id)
            .or_default()
            .entry(term_id)
            .or_default()
            .extend_from_slice(positions);
    }

    pub fn get(&self, doc_id: DocId) -> Option<&TermPositions> { self.docs.get(&doc_id) }

    /// Distinct terms and total term occurrences for a document.
    pub fn doc_stats(&self, doc_id: DocId) -> (usize, usize) {
        match self.docs.get(&doc_id) {
            Some(terms) => (terms.len(), terms.values().map(Vec::len).sum()),
            None => (0, 0),
        }
    }

    /// Regroup by term. Positions are sorted per (term, doc).
    pub fn transpose(&self) -> InvertedIndex {
        let mut inverted = InvertedIndex::new();
        for (&doc_id, terms) in &self.docs {
            for (&term_id, positions) in terms {
                if positions.is_empty() { continue; }
                inverted
                    .entry(term_id)
                    .or_default()
                    .entry(doc_id)
                    .or_default()
                    .extend_from_slice(positions);
            }
        }
        for docs in inverted.values_mut() {
            for positions in docs.values_mut() {
                positions.sort_unstable();
            }
        }
        inverted
    }
}
