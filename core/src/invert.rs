use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::index::{ForwardIndex, InvertedIndex, TermId, TermInfo};
use crate::persist::{for_each_record, parse_doc_index_line};
use crate::postings::encode_line;

/// Regroups a forward index by term and writes `term_index.txt` / `term_info.txt`.
#[derive(Debug, Default)]
pub struct Inverter {
    inverted: InvertedIndex,
    term_info: BTreeMap<TermId, TermInfo>,
}

impl Inverter {
    pub fn new() -> Self { Self::default() }

    /// Parse `doc_index.txt`, skipping malformed lines.
    pub fn build<P: AsRef<Path>>(doc_index_path: P) -> Result<Self> {
        let mut inv = Self::new();
        for_each_record(doc_index_path.as_ref(), parse_doc_index_line, |(doc_id, term_id, positions)| {
            inv.inverted
                .entry(term_id)
                .or_default()
                .entry(doc_id)
                .or_default()
                .extend(positions);
        })?;
        tracing::debug!(terms = inv.inverted.len(), "built inverted index");
        Ok(inv)
    }

    pub fn from_forward(forward: &ForwardIndex) -> Self {
        Self { inverted: forward.transpose(), term_info: BTreeMap::new() }
    }

    pub fn inverted(&self) -> &InvertedIndex { &self.inverted }

    /// Statistics recorded by the last `write`, keyed by term.
    pub fn term_info(&self) -> &BTreeMap<TermId, TermInfo> { &self.term_info }

    /// Write one gap-encoded line per term, ascending by TermId, recording
    /// the byte offset at which each line starts.
    pub fn write<P: AsRef<Path>, Q: AsRef<Path>>(&mut self, term_index_path: P, term_info_path: Q) -> Result<()> {
        let term_index_path = term_index_path.as_ref();
        let term_info_path = term_info_path.as_ref();
        let mut index_w = BufWriter::new(
            File::create(term_index_path).with_context(|| format!("creating {}", term_index_path.display()))?,
        );

        self.term_info.clear();
        let mut offset: u64 = 0;
        for (&term_id, docs) in self.inverted.iter_mut() {
            for positions in docs.values_mut() {
                positions.sort_unstable();
            }
            let (line, total) = encode_line(term_id, docs);
            index_w.write_all(line.as_bytes())?;
            self.term_info.insert(
                term_id,
                TermInfo { offset, total_occurrences: total, doc_count: docs.len() as u32 },
            );
            offset += line.len() as u64;
        }
        index_w.flush()?;

        let mut info_w = BufWriter::new(
            File::create(term_info_path).with_context(|| format!("creating {}", term_info_path.display()))?,
        );
        for (term_id, info) in &self.term_info {
            writeln!(info_w, "{}\t{}\t{}\t{}", term_id, info.offset, info.total_occurrences, info.doc_count)?;
        }
        info_w.flush()?;

        tracing::info!(terms = self.term_info.len(), bytes = offset, "wrote term index");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn concatenates_repeated_pairs_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        let doc_index = dir.path().join("doc_index.txt");
        fs::write(&doc_index, "1\t1\t5 9\n2\t1\t2\n1\t1\t3\nnot a line\n").unwrap();

        let mut inv = Inverter::build(&doc_index).unwrap();
        assert_eq!(inv.inverted()[&1][&1], vec![5, 9, 3]);

        let ti = dir.path().join("term_index.txt");
        let tinfo = dir.path().join("term_info.txt");
        inv.write(&ti, &tinfo).unwrap();

        assert_eq!(fs::read_to_string(&ti).unwrap(), "1\t1:3\t0:2\t0:4\t1:2\n");
        assert_eq!(fs::read_to_string(&tinfo).unwrap(), "1\t0\t4\t2\n");
    }

    #[test]
    fn offsets_accumulate_line_bytes() {
        let mut fwd = ForwardIndex::new();
        fwd.extend(1, 1, &[1]);
        fwd.extend(1, 2, &[2, 3]);
        fwd.extend(3, 2, &[1]);

        let dir = tempfile::tempdir().unwrap();
        let mut inv = Inverter::from_forward(&fwd);
        inv.write(dir.path().join("ti"), dir.path().join("info")).unwrap();

        // "1\t1:1\n" is 6 bytes.
        assert_eq!(inv.term_info()[&1], TermInfo { offset: 0, total_occurrences: 1, doc_count: 1 });
        assert_eq!(inv.term_info()[&2], TermInfo { offset: 6, total_occurrences: 3, doc_count: 2 });
        assert_eq!(
            fs::read_to_string(dir.path().join("ti")).unwrap(),
            "1\t1:1\n2\t1:2\t0:1\t2:1\n"
        );
    }
}
