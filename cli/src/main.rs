//! # nivoxar CLI
//!
//! Terminal host for the Nivoxar navigation core.
//!
//! ## Usage
//!
//! - `nivoxar` - Start the interactive shell
//! - `nivoxar --script nav.txt` - Run shell commands from a file
//! - `nivoxar routes` - Show registered routes
//!
//! The shell renders placeholder pages into a text viewport so route
//! changes, hooks and transient cleanup can be watched from a terminal.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod app;
mod commands;
mod config;
mod interactive;
mod output;

use commands::{routes_command, shell_command, ShellOptions};
use config::{expand_path, CliConfigLoader};

/// nivoxar - navigate the Nivoxar task manager from a terminal
#[derive(Parser)]
#[command(name = "nivoxar")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Client-side router for the Nivoxar task manager, driven from a terminal")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file or directory path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Route shown when the app starts at the root path
    #[arg(long, env = "NIVOXAR_DEFAULT_ROUTE")]
    default_route: Option<String>,

    /// Skip the exit and settle delays around each transition
    #[arg(long)]
    no_animations: bool,

    /// Start with an authenticated session
    #[arg(long)]
    signed_in: bool,

    /// Record navigation events to this JSON file
    #[arg(long)]
    journal: Option<PathBuf>,

    /// Read shell commands from a file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show registered routes
    Routes,
}

/// Build a configuration loader from CLI arguments
fn build_config_loader(cli: &Cli) -> CliConfigLoader {
    let mut loader = CliConfigLoader::new();

    if let Some(config_path) = &cli.config {
        loader = loader.with_config_override(config_path.clone());
    }

    if let Some(route) = &cli.default_route {
        loader = loader.with_default_route_override(route.clone());
    }

    if cli.no_animations {
        loader = loader.without_animations();
    }

    loader
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    nivoxar_core::init_tracing(cli.verbose);

    let settings = build_config_loader(&cli).load().await?;

    match cli.command {
        Some(Commands::Routes) => routes_command(settings).await,
        None => {
            let options = ShellOptions {
                signed_in: cli.signed_in,
                journal_file: cli.journal.as_deref().map(expand_path),
                script: cli.script,
            };
            shell_command(settings, options).await
        }
    }
}
