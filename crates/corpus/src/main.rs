//! Command-line interface for the corpus staging pipeline.
//!
//! `corpus` prepares a documentation tree for ingestion by an external
//! search index: it converts structured markup to markdown, splits the
//! result into heading-delimited sections, and writes one content artifact
//! plus one provenance-metadata artifact per section into a staging area.

use std::{io, path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};

mod cli;

use cli::commands;

#[derive(Parser)]
#[command(name = "corpus")]
#[command(about = "Prepare documentation trees for search-index ingestion")]
/// Top-level CLI options.
struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to corpus.toml (defaults to ./corpus.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    /// Subcommand to execute.
    command: Commands,
}

#[derive(Subcommand)]
/// Supported `corpus` subcommands.
enum Commands {
    /// Convert a structured-markup tree to markdown
    Convert {
        /// Root of the structured-markup tree
        #[arg(long)]
        input: PathBuf,

        /// Root for the converted markdown tree
        #[arg(long)]
        output: PathBuf,
    },

    /// Split a converted tree into staged sections with metadata
    Stage {
        /// Root of the converted markdown tree
        #[arg(long)]
        input: PathBuf,

        /// Staging area for content and metadata artifacts
        #[arg(long)]
        output: PathBuf,
    },

    /// Convert and stage a tree end to end
    Run {
        /// Root of the structured-markup tree
        #[arg(long)]
        input: PathBuf,

        /// Staging area for content and metadata artifacts
        #[arg(long)]
        output: PathBuf,

        /// Empty directory for the converted intermediate tree
        /// (defaults to a temporary directory removed after the run)
        #[arg(long)]
        scratch: Option<PathBuf>,
    },

    /// Stage plain-text files verbatim with metadata siblings
    Annotate {
        /// Root of the plain-text tree
        #[arg(long)]
        input: PathBuf,

        /// Staging area for files and metadata artifacts
        #[arg(long)]
        output: PathBuf,
    },

    /// Show how corpus splits one document into sections
    Inspect {
        /// Document to inspect
        file: PathBuf,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Initialize a corpus.toml in the current directory
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Convert { input, output } => {
            commands::convert::run(cli.config.as_deref(), &input, &output)
        }
        Commands::Stage { input, output } => {
            commands::stage::run(cli.config.as_deref(), &input, &output)
        }
        Commands::Run {
            input,
            output,
            scratch,
        } => commands::run::run(cli.config.as_deref(), &input, &output, scratch),
        Commands::Annotate { input, output } => {
            commands::annotate::run(cli.config.as_deref(), &input, &output)
        }
        Commands::Inspect { file, json } => commands::inspect::run(&file, json),
        Commands::Init { force } => commands::init::run(force),
    }
}

/// Initializes the tracing subscriber from the verbosity flag.
///
/// `RUST_LOG` wins when set; logs go to stderr so staged output and
/// summaries stay clean on stdout.
fn init_tracing(verbose: u8) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
