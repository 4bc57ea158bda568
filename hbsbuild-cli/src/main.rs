//! hbsbuild — compile Handlebars page templates into static files.
//!
//! # Usage
//!
//! ```text
//! hbsbuild build [--config FILE] [--input-dir DIR] [--output-dir DIR] [--filter PATH]... [--dry-run]
//! hbsbuild list  [--config FILE] [--input-dir DIR] ...
//! hbsbuild init  [DIR]
//! ```

mod commands;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use commands::{build::BuildArgs, init::InitArgs, list::ListArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "hbsbuild",
    version,
    about = "Compile Handlebars templates, partials, helpers and JSON content into static files",
    long_about = None,
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load JSON, helpers and partials, then compile every page template.
    Build(BuildArgs),

    /// Show which files each stage would pick up, without rendering.
    List(ListArgs),

    /// Scaffold an hbsbuild.yaml and a starter views/ tree.
    Init(InitArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Build(args) => args.run(),
        Commands::List(args) => args.run(),
        Commands::Init(args) => args.run(),
    }
}
