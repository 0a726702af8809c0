use anyhow::Result;
use clap::{Parser, Subcommand};
use indexer::{build_index, invert_index, prepare_output_dir};
use posidx_core::{IndexPaths, StopWords};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build a positional inverted index over a directory of documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tokenize the corpus, write the forward index, then invert it
    Build {
        /// Corpus directory
        #[arg(long)]
        input: PathBuf,
        /// Output index directory (existing files are removed)
        #[arg(long, default_value = "./output")]
        output: PathBuf,
        /// Stop-words file, one word per line; built-in English list if omitted
        #[arg(long)]
        stopwords: Option<PathBuf>,
    },
    /// Rebuild term_index.txt and term_info.txt from an existing doc_index.txt
    Invert {
        /// Index directory
        #[arg(long, default_value = "./output")]
        index: PathBuf,
    },
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output, stopwords } => {
            let stop_words = match stopwords {
                Some(path) => StopWords::load(path)?,
                None => StopWords::english(),
            };
            prepare_output_dir(&output)?;
            let summary = build_index(&input, &output, stop_words)?;
            println!("Indexed {} documents, {} terms", summary.num_docs, summary.num_terms);
            Ok(())
        }
        Commands::Invert { index } => invert_index(&IndexPaths::new(index)),
    }
}
