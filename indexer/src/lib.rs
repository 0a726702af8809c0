use anyhow::{bail, Context, Result};
use posidx_core::persist::{meta_for, save_forward_index, save_meta};
use posidx_core::{ForwardIndexer, IndexPaths, Inverter, StopWords};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub mod extract;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
    pub num_docs: usize,
    pub num_terms: usize,
    pub skipped: usize,
}

/// Regular files under `dir`, recursively, in file-name order.
pub fn list_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(%err, "skipping unreadable entry");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect()
}

/// Create `dir` if missing, otherwise remove the regular files it holds.
pub fn prepare_output_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir).with_context(|| format!("creating output directory {}", dir.display()))?;
        tracing::info!(path = %dir.display(), "created output directory");
        return Ok(());
    }
    for entry in fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let path = entry?.path();
        if path.is_file() {
            fs::remove_file(&path).with_context(|| format!("removing {}", path.display()))?;
        }
    }
    Ok(())
}

/// Index every file under `input` and write all artifacts to `output`.
pub fn build_index(input: &Path, output: &Path, stop_words: StopWords) -> Result<BuildSummary> {
    if !input.is_dir() {
        bail!("corpus directory {} does not exist", input.display());
    }
    let paths = IndexPaths::new(output);
    let files = list_files(input);
    let total = files.len();

    let mut indexer = ForwardIndexer::new(stop_words);
    let mut skipped = 0;
    for (i, file) in files.iter().enumerate() {
        let name = match file.file_name() {
            Some(n) => n.to_string_lossy().into_owned(),
            None => continue,
        };
        match extract::read_document(file) {
            Ok(text) => { indexer.index_document(&name, &text); }
            Err(err) => {
                tracing::warn!(doc = %name, error = %err, "skipping document");
                skipped += 1;
            }
        }
        if (i + 1) % 100 == 0 {
            tracing::info!(processed = i + 1, total, "indexing");
        }
    }
    tracing::info!(num_docs = indexer.num_docs(), num_terms = indexer.num_terms(), "ingested documents");

    save_forward_index(&paths, &indexer)?;
    invert_index(&paths)?;
    save_meta(&paths, &meta_for(&indexer))?;

    tracing::info!(output = %output.display(), "index build complete");
    Ok(BuildSummary { num_docs: indexer.num_docs(), num_terms: indexer.num_terms(), skipped })
}

/// Rebuild `term_index.txt` and `term_info.txt` from `doc_index.txt`.
pub fn invert_index(paths: &IndexPaths) -> Result<()> {
    let mut inverter = Inverter::build(paths.doc_index())?;
    inverter.write(paths.term_index(), paths.term_info())
}
