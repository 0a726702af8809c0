use indexer::{build_index, invert_index, list_files, prepare_output_dir};
use posidx_core::persist::load_meta;
use posidx_core::{IndexPaths, IndexReader, StopWords};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_corpus(dir: &Path) {
    fs::create_dir_all(dir.join("nested")).unwrap();
    fs::write(
        dir.join("a.html"),
        "Content-Type: text/html\n\n<!DOCTYPE html><html><body><p>run runs</p><p>running</p></body></html>",
    )
    .unwrap();
    fs::write(dir.join("nested").join("b.html"), "<html><body>Running <i>fast</i></body></html>").unwrap();
}

fn stop_the() -> StopWords { StopWords::from_iter(["the"]) }

#[test]
fn builds_all_artifacts_from_html_corpus() {
    let corpus = tempdir().unwrap();
    let out = tempdir().unwrap();
    write_corpus(corpus.path());

    let summary = build_index(corpus.path(), out.path(), stop_the()).unwrap();
    assert_eq!((summary.num_docs, summary.num_terms, summary.skipped), (2, 2, 0));

    let paths = IndexPaths::new(out.path());
    assert_eq!(fs::read_to_string(paths.doc_ids()).unwrap(), "1\ta.html\n2\tb.html\n");
    assert_eq!(fs::read_to_string(paths.term_ids()).unwrap(), "1   \trun\n2   \tfast\n");
    assert_eq!(fs::read_to_string(paths.doc_index()).unwrap(), "1\t1\t1 2 3\n2\t1\t1\n2\t2\t2\n");

    let meta = load_meta(&paths).unwrap();
    assert_eq!((meta.num_docs, meta.num_terms), (2, 2));

    let reader = IndexReader::open(&paths, stop_the()).unwrap();
    let run = reader.term_info("run").unwrap();
    assert_eq!((run.term_id, run.info.doc_count, run.info.total_occurrences, run.info.offset), (1, 2, 4, 0));
    assert_eq!(reader.term_doc_info("run", "b.html").unwrap().positions, vec![1]);
}

#[test]
fn empty_corpus_yields_empty_files() {
    let corpus = tempdir().unwrap();
    let out = tempdir().unwrap();
    let summary = build_index(corpus.path(), out.path(), stop_the()).unwrap();
    assert_eq!(summary.num_docs, 0);

    let paths = IndexPaths::new(out.path());
    for p in [paths.doc_ids(), paths.term_ids(), paths.doc_index(), paths.term_index(), paths.term_info()] {
        assert_eq!(fs::read_to_string(&p).unwrap(), "", "{}", p.display());
    }
}

#[test]
fn missing_corpus_is_an_error() {
    let out = tempdir().unwrap();
    assert!(build_index(&out.path().join("nope"), out.path(), stop_the()).is_err());
}

#[test]
fn prepare_clears_previous_run() {
    let out = tempdir().unwrap();
    let target = out.path().join("index");
    prepare_output_dir(&target).unwrap();
    assert!(target.is_dir());

    fs::write(target.join("stale.txt"), "old").unwrap();
    prepare_output_dir(&target).unwrap();
    assert_eq!(fs::read_dir(&target).unwrap().count(), 0);
}

#[test]
fn walk_is_recursive_and_sorted() {
    let corpus = tempdir().unwrap();
    write_corpus(corpus.path());
    fs::write(corpus.path().join("0.txt"), "plain").unwrap();
    let names: Vec<String> = list_files(corpus.path())
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["0.txt", "a.html", "b.html"]);
}

#[test]
fn invert_rebuilds_from_doc_index() {
    let corpus = tempdir().unwrap();
    let out = tempdir().unwrap();
    write_corpus(corpus.path());
    build_index(corpus.path(), out.path(), stop_the()).unwrap();

    let paths = IndexPaths::new(out.path());
    let before = fs::read_to_string(paths.term_index()).unwrap();
    fs::remove_file(paths.term_index()).unwrap();
    fs::remove_file(paths.term_info()).unwrap();

    invert_index(&paths).unwrap();
    assert_eq!(fs::read_to_string(paths.term_index()).unwrap(), before);
    assert!(paths.term_info().is_file());
}
