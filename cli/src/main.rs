//! # navstack CLI
//!
//! Command-line front end for navstack - a stack-based, multi-tab navigation router.
//!
//! ## Usage
//!
//! - `navstack` - Run the scripted two-tab demo
//! - `navstack interactive` - Drive the demo from a command shell
//! - `navstack routes` - Show the demo's tabs and routes
//!
//! The visible screen is drawn with iocraft; `--json` switches every command
//! to line-delimited JSON.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod interactive;
mod output;

use commands::{demo_command, interactive_command, routes_command};
use config::CliConfigLoader;
use output::Output;

/// navstack - stack-based, multi-tab navigation in the terminal
#[derive(Parser)]
#[command(name = "navstack")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A stack-based, multi-tab navigation router demo")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file or directory path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Delay in milliseconds between a tab switch and its follow-up push
    /// (overrides the config file)
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Tab selected at start-up (overrides the config file)
    #[arg(long)]
    tab: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Print line-delimited JSON instead of drawing the screen
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the scripted two-tab demo
    Demo,

    /// Drive the demo from a command shell on stdin
    Interactive,

    /// Show tabs and registered routes
    Routes,
}

/// Build a configuration loader from CLI arguments
fn build_config_loader(cli: &Cli) -> CliConfigLoader {
    let mut loader = CliConfigLoader::new();

    if let Some(config_path) = &cli.config {
        loader = loader.with_config_override(config_path.clone());
    }

    if let Some(delay_ms) = cli.delay_ms {
        loader = loader.with_delay_override(delay_ms);
    }

    if let Some(tab) = &cli.tab {
        loader = loader.with_tab_override(tab.clone());
    }

    loader
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    navstack_core::init_tracing_with_debug(cli.verbose);

    let config_loader = build_config_loader(&cli);
    let output = Output::new(cli.json);

    match cli.command.unwrap_or(Commands::Demo) {
        Commands::Demo => demo_command(config_loader, output).await,
        Commands::Interactive => interactive_command(config_loader, output).await,
        Commands::Routes => routes_command(config_loader, output).await,
    }
}
