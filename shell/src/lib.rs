use anyhow::{Context, Result};
use indexer::{build_index, prepare_output_dir};
use posidx_core::{IndexPaths, IndexReader, StopWords};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

pub const USAGE: &str = "Usage: --doc <docname> | --term <term> | --term <term> --doc <docname> | exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Doc(String),
    Term(String),
    TermDoc { term: String, doc: String },
    Exit,
}

/// Parse one REPL line. `Ok(None)` for a blank line.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    if line == "exit" {
        return Ok(Some(Command::Exit));
    }

    let mut doc: Option<String> = None;
    let mut term: Option<String> = None;
    let mut tokens = line.split_whitespace().peekable();
    while let Some(flag) = tokens.next() {
        let mut value = Vec::new();
        while let Some(tok) = tokens.next_if(|t| !t.starts_with("--")) {
            value.push(tok);
        }
        if value.is_empty() {
            return Err(format!("missing value for {flag}"));
        }
        let slot = match flag {
            "--doc" => &mut doc,
            "--term" => &mut term,
            other => return Err(format!("unknown option {other}")),
        };
        *slot = Some(value.join(" "));
    }

    Ok(Some(match (term, doc) {
        (Some(term), Some(doc)) => Command::TermDoc { term, doc },
        (Some(term), None) => Command::Term(term),
        (None, Some(doc)) => Command::Doc(doc),
        (None, None) => return Err("no query given".to_string()),
    }))
}

/// Answer one query. Results go to `out`, lookup failures to `err`.
pub fn execute<W: Write, E: Write>(reader: &IndexReader, cmd: &Command, out: &mut W, err: &mut E) -> std::io::Result<()> {
    let result = match cmd {
        Command::Doc(doc) => reader.doc_info(doc).map(|r| r.to_string()),
        Command::Term(term) => reader.term_info(term).map(|r| r.to_string()),
        Command::TermDoc { term, doc } => reader.term_doc_info(term, doc).map(|r| r.to_string()),
        Command::Exit => return Ok(()),
    };
    match result {
        Ok(text) => writeln!(out, "{text}"),
        Err(e) => {
            tracing::debug!(error = ?e, "query failed");
            writeln!(err, "{e}")
        }
    }
}

#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub output: PathBuf,
    pub stopwords: Option<PathBuf>,
}

impl ShellConfig {
    fn stop_words(&self) -> Result<StopWords> {
        match &self.stopwords {
            Some(path) => StopWords::load(path),
            None => Ok(StopWords::english()),
        }
    }
}

/// Index the corpus named on the first input line, then serve queries until
/// `exit` or end of input.
pub fn run<R: BufRead, W: Write, E: Write>(config: &ShellConfig, input: &mut R, out: &mut W, err: &mut E) -> Result<()> {
    write!(out, "Enter corpus directory: ")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(());
    }
    let corpus = PathBuf::from(line.trim());

    let reader = open_index(config, &corpus)?;
    if let Some(meta) = reader.meta() {
        tracing::info!(created_at = %meta.created_at, version = meta.version, "index ready");
    }
    writeln!(out, "Indexed {} documents, {} terms.", reader.num_docs(), reader.num_terms())?;
    writeln!(out, "{USAGE}")?;

    loop {
        write!(out, "> ")?;
        out.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }
        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(Command::Exit)) => return Ok(()),
            Ok(Some(cmd)) => execute(&reader, &cmd, out, err)?,
            Err(msg) => writeln!(err, "{msg}\n{USAGE}")?,
        }
    }
}

fn open_index(config: &ShellConfig, corpus: &Path) -> Result<IndexReader> {
    let stop_words = config.stop_words()?;
    prepare_output_dir(&config.output)?;
    build_index(corpus, &config.output, stop_words.clone())
        .with_context(|| format!("indexing {}", corpus.display()))?;
    IndexReader::open(&IndexPaths::new(&config.output), stop_words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_query_form() {
        assert_eq!(parse_command("  "), Ok(None));
        assert_eq!(parse_command("exit"), Ok(Some(Command::Exit)));
        assert_eq!(parse_command("--doc a.html"), Ok(Some(Command::Doc("a.html".into()))));
        assert_eq!(parse_command("--term run"), Ok(Some(Command::Term("run".into()))));
        assert_eq!(
            parse_command("--term run --doc b.html"),
            Ok(Some(Command::TermDoc { term: "run".into(), doc: "b.html".into() }))
        );
        assert_eq!(
            parse_command("--doc b.html --term run"),
            Ok(Some(Command::TermDoc { term: "run".into(), doc: "b.html".into() }))
        );
    }

    #[test]
    fn doc_names_may_contain_spaces() {
        assert_eq!(parse_command("--doc my page.html"), Ok(Some(Command::Doc("my page.html".into()))));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_command("--doc").is_err());
        assert!(parse_command("--bogus x").is_err());
        assert!(parse_command("hello").is_err());
    }
}
