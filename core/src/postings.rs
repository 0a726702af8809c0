//! Gap codec for `term_index.txt` lines.
//!
//! A line is `<termid>\t<d>:<p>\t<ddoc>:<dpos>\t...`. The first pair is
//! absolute. Each later pair carries the doc gap and the position gap; the
//! position gap is taken from 0 whenever the doc gap is non-zero, so the
//! first position in every document is stored as-is.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::error::LineError;
use crate::index::{DocId, Position, TermId};

/// Decoded postings of one term, documents ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostingList {
    pub term_id: TermId,
    pub docs: Vec<(DocId, Vec<Position>)>,
}

impl PostingList {
    pub fn positions(&self, doc_id: DocId) -> Option<&[Position]> {
        self.docs.iter().find(|(d, _)| *d == doc_id).map(|(_, p)| p.as_slice())
    }

    pub fn total_occurrences(&self) -> usize { self.docs.iter().map(|(_, p)| p.len()).sum() }
}

/// Encode one term's postings. Returns the line (with trailing `\n`) and
/// the number of positions written. Positions must already be sorted.
pub fn encode_line(term_id: TermId, docs: &BTreeMap<DocId, Vec<Position>>) -> (String, u32) {
    let mut line = format!("{term_id}\t");
    let mut last_doc: Option<DocId> = None;
    let mut total = 0u32;

    for (&doc_id, positions) in docs {
        let mut last_pos: Position = 0;
        for &pos in positions {
            match last_doc {
                None => { let _ = write!(line, "{doc_id}:{pos}\t"); }
                Some(prev) => { let _ = write!(line, "{}:{}\t", doc_id - prev, pos - last_pos); }
            }
            last_doc = Some(doc_id);
            last_pos = pos;
            total += 1;
        }
    }

    if line.ends_with('\t') { line.pop(); }
    line.push('\n');
    (line, total)
}

/// Decode one line (trailing newline optional). The leading field is the
/// term id echo and is not part of the gap sequence.
pub fn decode_line(line: &str) -> Result<PostingList, LineError> {
    let line = line.trim_end_matches(['\n', '\r']);
    let mut fields = line.split('\t');
    let head = fields.next().unwrap_or_default();
    let term_id: TermId = parse_int(head)?;

    let mut docs: Vec<(DocId, Vec<Position>)> = Vec::new();
    let mut cur_doc: Option<DocId> = None;
    let mut cur_pos: Position = 0;

    for field in fields.filter(|f| !f.is_empty()) {
        let (d, p) = field
            .split_once(':')
            .ok_or_else(|| LineError::MissingField { line: field.to_string(), expected: "<doc>:<pos>" })?;
        let d: DocId = parse_int(d)?;
        let p: Position = parse_int(p)?;

        let overflow = || LineError::GapOverflow(field.to_string());
        let doc_id = match cur_doc {
            None => d,
            Some(prev) => prev.checked_add(d).ok_or_else(overflow)?,
        };
        if cur_doc != Some(doc_id) {
            cur_pos = 0;
            docs.push((doc_id, Vec::new()));
        }
        cur_pos = cur_pos.checked_add(p).ok_or_else(overflow)?;
        cur_doc = Some(doc_id);
        if let Some((_, positions)) = docs.last_mut() {
            positions.push(cur_pos);
        }
    }

    Ok(PostingList { term_id, docs })
}

pub(crate) fn parse_int<T: std::str::FromStr>(field: &str) -> Result<T, LineError> {
    field.trim().parse().map_err(|_| LineError::BadInteger(field.to_string()))
}
