//! Folio CLI - inspect the detected structure of a markdown book

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved reading order of a book directory
    Toc {
        /// Book root (defaults to $BOOK_ROOT, then the current directory)
        root: Option<String>,
    },

    /// Display information about a book directory
    Info {
        /// Book root (defaults to $BOOK_ROOT, then the current directory)
        root: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "folio_cli=debug,folio_core=debug"
    } else {
        "folio_cli=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Toc { root } => commands::toc(root.as_deref()),
        Commands::Info { root, json } => commands::info(root.as_deref(), json),
    }
}
