use crate::error::LineError;
use crate::forward::ForwardIndexer;
use crate::index::{DocId, ForwardIndex, Position, TermId, TermInfo};
use crate::postings::parse_int;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const META_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_docs: u32,
    pub num_terms: u32,
    pub created_at: String,
    pub version: u32,
}

/// Locations of every artifact under one output directory.
#[derive(Debug, Clone)]
pub struct IndexPaths {
    pub root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    pub fn doc_ids(&self) -> PathBuf { self.root.join("docids.txt") }
    pub fn term_ids(&self) -> PathBuf { self.root.join("termids.txt") }
    pub fn doc_index(&self) -> PathBuf { self.root.join("doc_index.txt") }
    pub fn term_index(&self) -> PathBuf { self.root.join("term_index.txt") }
    pub fn term_info(&self) -> PathBuf { self.root.join("term_info.txt") }
    pub fn meta(&self) -> PathBuf { self.root.join("meta.json") }
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    Ok(BufWriter::new(f))
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// Write `docids.txt`, `termids.txt` and `doc_index.txt`.
pub fn save_forward_index(paths: &IndexPaths, indexer: &ForwardIndexer) -> Result<()> {
    fs::create_dir_all(&paths.root)?;

    let mut w = create(&paths.doc_ids())?;
    for (doc_id, name) in indexer.doc_names() {
        writeln!(w, "{doc_id}\t{name}")?;
    }
    w.flush()?;

    let mut w = create(&paths.term_ids())?;
    for (term_id, term) in indexer.terms() {
        writeln!(w, "{term_id:<4}\t{term}")?;
    }
    w.flush()?;

    save_doc_index(&paths.doc_index(), indexer.forward())
}

/// One line per (doc, term) pair with positions, ordered by doc then term.
pub fn save_doc_index(path: &Path, forward: &ForwardIndex) -> Result<()> {
    let mut w = create(path)?;
    let mut doc_ids: Vec<_> = forward.docs.keys().copied().collect();
    doc_ids.sort_unstable();
    for doc_id in doc_ids {
        let terms = &forward.docs[&doc_id];
        let mut term_ids: Vec<_> = terms.keys().copied().collect();
        term_ids.sort_unstable();
        for term_id in term_ids {
            let positions = &terms[&term_id];
            if positions.is_empty() { continue; }
            let joined = positions.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(" ");
            writeln!(w, "{doc_id}\t{term_id}\t{joined}")?;
        }
    }
    w.flush()?;
    Ok(())
}

pub fn parse_doc_index_line(line: &str) -> Result<(DocId, TermId, Vec<Position>), LineError> {
    let mut parts = line.split('\t');
    let missing = || LineError::MissingField { line: line.to_string(), expected: "<docid>\\t<termid>\\t<positions>" };
    let doc_id = parse_int(parts.next().ok_or_else(missing)?)?;
    let term_id = parse_int(parts.next().ok_or_else(missing)?)?;
    let positions = parts
        .next()
        .ok_or_else(missing)?
        .split_whitespace()
        .map(parse_int::<Position>)
        .collect::<Result<Vec<Position>, _>>()?;
    if positions.is_empty() {
        return Err(missing());
    }
    Ok((doc_id, term_id, positions))
}

fn parse_term_info_line(line: &str) -> Result<(TermId, TermInfo), LineError> {
    let parts: Vec<&str> = line.split('\t').collect();
    if parts.len() < 4 {
        return Err(LineError::MissingField {
            line: line.to_string(),
            expected: "<termid>\\t<offset>\\t<total>\\t<docs>",
        });
    }
    let info = TermInfo {
        offset: parse_int(parts[1])?,
        total_occurrences: parse_int(parts[2])?,
        doc_count: parse_int(parts[3])?,
    };
    Ok((parse_int(parts[0])?, info))
}

fn parse_id_line<T: std::str::FromStr>(line: &str) -> Result<(T, String), LineError> {
    let (id, value) = line.split_once('\t').ok_or_else(|| LineError::MissingField {
        line: line.to_string(),
        expected: "<id>\\t<name>",
    })?;
    Ok((parse_int(id)?, value.trim().to_string()))
}

/// Apply `parse` to each non-blank line, logging and skipping the ones that fail.
pub(crate) fn for_each_record<T>(
    path: &Path,
    parse: impl Fn(&str) -> Result<T, LineError>,
    mut f: impl FnMut(T),
) -> Result<()> {
    let contents = read(path)?;
    for (n, line) in contents.lines().enumerate() {
        if line.trim().is_empty() { continue; }
        match parse(line) {
            Ok(record) => f(record),
            Err(err) => tracing::warn!(path = %path.display(), line = n + 1, %err, "skipping malformed line"),
        }
    }
    Ok(())
}

pub fn load_doc_ids(paths: &IndexPaths) -> Result<HashMap<String, DocId>> {
    let mut map = HashMap::new();
    for_each_record(&paths.doc_ids(), parse_id_line::<DocId>, |(id, name)| {
        map.insert(name, id);
    })?;
    Ok(map)
}

pub fn load_term_ids(paths: &IndexPaths) -> Result<HashMap<TermId, String>> {
    let mut map = HashMap::new();
    for_each_record(&paths.term_ids(), parse_id_line::<TermId>, |(id, term)| {
        map.insert(id, term);
    })?;
    Ok(map)
}

pub fn load_term_info(paths: &IndexPaths) -> Result<HashMap<TermId, TermInfo>> {
    let mut map = HashMap::new();
    for_each_record(&paths.term_info(), parse_term_info_line, |(id, info)| {
        map.insert(id, info);
    })?;
    Ok(map)
}

/// Read a `doc_index.txt` back into a forward index. Repeated pairs concatenate.
pub fn load_doc_index(path: &Path) -> Result<ForwardIndex> {
    let mut forward = ForwardIndex::new();
    for_each_record(path, parse_doc_index_line, |(doc_id, term_id, positions)| {
        forward.extend(doc_id, term_id, &positions);
    })?;
    Ok(forward)
}

pub fn save_meta(paths: &IndexPaths, meta: &MetaFile) -> Result<()> {
    fs::create_dir_all(&paths.root)?;
    let json = serde_json::to_string_pretty(meta)?;
    fs::write(paths.meta(), json).with_context(|| format!("writing {}", paths.meta().display()))?;
    Ok(())
}

pub fn load_meta(paths: &IndexPaths) -> Result<MetaFile> {
    let buf = read(&paths.meta())?;
    let meta: MetaFile = serde_json::from_str(&buf)?;
    Ok(meta)
}

pub fn meta_for(indexer: &ForwardIndexer) -> MetaFile {
    MetaFile {
        num_docs: indexer.num_docs() as u32,
        num_terms: indexer.num_terms() as u32,
        created_at: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_default(),
        version: META_VERSION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doc_index_line_parses() {
        assert_eq!(parse_doc_index_line("3\t7\t1 4 9").unwrap(), (3, 7, vec![1, 4, 9]));
        assert!(parse_doc_index_line("3\t7").is_err());
        assert!(parse_doc_index_line("3\t7\t").is_err());
        assert!(parse_doc_index_line("3\tx\t1").is_err());
        assert!(parse_doc_index_line("3\t7\t1 two").is_err());
    }

    #[test]
    fn term_id_line_tolerates_padding() {
        let (id, term): (TermId, String) = parse_id_line("12  \tfox").unwrap();
        assert_eq!((id, term.as_str()), (12, "fox"));
    }

    #[test]
    fn term_info_needs_four_fields() {
        let (id, info) = parse_term_info_line("1\t0\t4\t2").unwrap();
        assert_eq!(id, 1);
        assert_eq!(info, TermInfo { offset: 0, total_occurrences: 4, doc_count: 2 });
        assert!(parse_term_info_line("1\t0\t4").is_err());
    }

    #[test]
    fn loaders_skip_malformed_lines() {
        let dir = tempfile::tempdir().unwrap();
        let paths = IndexPaths::new(dir.path());
        fs::write(paths.doc_ids(), "1\ta.html\nbogus\nx\tb.html\n2\tc.html\n").unwrap();
        let map = load_doc_ids(&paths).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["c.html"], 2);
    }

    #[test]
    fn missing_artifact_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let paths = IndexPaths::new(dir.path());
        assert!(load_term_info(&paths).is_err());
    }
}
