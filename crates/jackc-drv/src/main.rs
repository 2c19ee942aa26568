use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use jackc_drv::{run, Config, OutputMode};

/// Jack language front end: tokenizes and parses `.jack` source, emitting
/// a token-stream XML artifact and/or an annotated parse-tree XML artifact
/// per input file.
#[derive(Parser, Debug)]
#[command(name = "jackc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Jack language tokenizer and parser front end")]
struct Cli {
    /// A .jack file, or a directory of .jack files (scanned non-recursively)
    path: PathBuf,

    /// Emit only the token-stream artifact (<stem>T.xml)
    #[arg(long, conflicts_with = "tree_only")]
    tokens_only: bool,

    /// Emit only the annotated parse-tree artifact (<stem>.xml)
    #[arg(long, conflicts_with = "tokens_only")]
    tree_only: bool,

    /// Write artifacts here instead of alongside each input file
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Enable debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let filter = if verbose { EnvFilter::new("debug") } else { EnvFilter::new("info") };
    tracing_subscriber::registry().with(filter).with(fmt::layer().with_target(false)).init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mode = if cli.tokens_only {
        OutputMode::TokensOnly
    } else if cli.tree_only {
        OutputMode::TreeOnly
    } else {
        OutputMode::Both
    };

    let config = Config { path: cli.path, mode, out_dir: cli.out_dir };

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("jackc: {}", err);
            ExitCode::FAILURE
        },
    }
}
