//! layer-lint CLI tool.
//!
//! Usage:
//! ```bash
//! layer-lint check [OPTIONS] [PATH]
//! layer-lint list-layers
//! layer-lint init
//! layer-lint scaffold <NAME>
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Layered-architecture dependency checker for Python projects
#[derive(Parser)]
#[command(name = "layer-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check layer boundaries under a source directory
    Check {
        /// Source directory to analyze (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Exit with status 1 when violations are found
        #[arg(long)]
        strict: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// Show the effective layers and rule tables
    ListLayers {
        /// Directory used to look up project configuration
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },

    /// Generate a clean-architecture Python project skeleton
    Scaffold {
        /// Project name (snake_case; dashes become underscores)
        name: String,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Overwrite existing template files
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text grouped by layer.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let lookup = config_resolver::Lookup::from_env(cli.config.as_deref());

    match cli.command {
        Commands::Check {
            path,
            strict,
            format,
            exclude,
        } => commands::check::run(&path, strict, format, &exclude, &lookup),
        Commands::ListLayers { path } => commands::list_layers::run(&path, &lookup),
        Commands::Init { force } => commands::init::run(force),
        Commands::Scaffold {
            name,
            output,
            force,
        } => commands::scaffold::run(&name, &output, force),
    }
}
