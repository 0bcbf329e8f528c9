//! CNX CLI - CNXML to HTML renderer.
//!
//! Provides commands for:
//! - `render`: Render a CNXML module to an HTML fragment
//! - `info`: Show a module's title, abstract and authors

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{InfoArgs, RenderArgs};
use output::Output;

/// CNX - CNXML to HTML renderer.
#[derive(Parser)]
#[command(name = "cnx", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a CNXML module to an HTML fragment.
    Render(RenderArgs),
    /// Show module metadata.
    Info(InfoArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Render(args) => args.verbose,
        Commands::Info(args) => args.verbose,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Info(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
