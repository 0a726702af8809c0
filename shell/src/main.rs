use clap::Parser;
use shell::{run, ShellConfig};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "shell")]
#[command(about = "Index a corpus and answer document/term lookups interactively")]
struct Args {
    /// Directory the index artifacts are written to (existing files are removed)
    #[arg(long, default_value = "./output")]
    output: PathBuf,
    /// Stop-words file, one word per line; built-in English list if omitted
    #[arg(long)]
    stopwords: Option<PathBuf>,
}

fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();
    let config = ShellConfig { output: args.output, stopwords: args.stopwords };

    let mut input = io::stdin().lock();
    match run(&config, &mut input, &mut io::stdout(), &mut io::stderr()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "setup failed");
            ExitCode::from(1)
        }
    }
}
