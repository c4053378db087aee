//! apidiff CLI - Command-line interface for public API diffing
//!
//! Compares two declaration dumps of a library and prints a grouped changelog
//! of added, modified and removed declarations.

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::*;
use config::ApiDiffConfig;
use output::{OutputConfig, OutputFormat};

/// Semantic diffing of public API surfaces.
#[derive(Parser)]
#[command(name = "apidiff")]
#[command(author, version)]
#[command(about = "Semantic diffing of public API surfaces")]
#[command(propagate_version = true)]
#[command(after_help = "Examples:
  apidiff diff old.json new.json                  Show every API change
  apidiff diff old.json new.json --unit MyLib     Restrict to one unit
  apidiff --format markdown diff a.json b.json -o CHANGES.md
  apidiff describe api.json                       Show how a dump is read")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format (overrides config default)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Show detailed version information
    #[arg(long = "version-verbose")]
    version_verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Diff two declaration dumps
    Diff {
        /// Declaration dump of the old version
        old: PathBuf,

        /// Declaration dump of the new version
        new: PathBuf,

        /// Only diff this unit (repeatable; overrides config)
        #[arg(long = "unit", value_name = "NAME")]
        units: Vec<String>,

        /// Write the report to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Exit with status 1 when any change is found
        #[arg(long)]
        fail_on_changes: bool,

        /// Title of Markdown reports (overrides config)
        #[arg(long)]
        title: Option<String>,
    },

    /// Print the declaration trees of a dump as the differ sees them
    Describe {
        /// Declaration dump to render
        dump: PathBuf,

        /// Only render this unit (repeatable)
        #[arg(long = "unit", value_name = "NAME")]
        units: Vec<String>,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

/// Print verbose version information
fn print_verbose_version() {
    use colored::Colorize;

    let cli_version = env!("CARGO_PKG_VERSION");
    let platform = format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS);

    println!("apidiff {}", cli_version);
    println!("  {:<14} {}", "apidiff-cli:".cyan(), cli_version);
    println!("  {:<14} {}", "apidiff-core:".cyan(), apidiff_core::version());
    println!("  {:<14} {}", "platform:".cyan(), platform);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.version_verbose {
        print_verbose_version();
        return Ok(());
    }

    setup_logging(cli.verbose, cli.quiet);

    // Load configuration from .apidiffrc.toml
    let config = ApiDiffConfig::load(std::path::Path::new("."));

    // Resolve output format: CLI flag > config default > Table
    let format = cli.format.unwrap_or_else(|| {
        config
            .default_format()
            .and_then(|f| f.parse().ok())
            .unwrap_or(OutputFormat::Table)
    });

    if let Some(use_color) = config.use_color() {
        colored::control::set_override(use_color);
    }
    let output_config = OutputConfig::auto_detect_with_color_override(format, config.use_color());

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            let _ = Cli::command().print_help();
            println!();
            return Ok(());
        }
    };

    match command {
        Commands::Diff {
            old,
            new,
            units,
            output,
            fail_on_changes,
            title,
        } => {
            let options = diff::DiffOptions {
                filter: config.unit_filter(&units),
                output,
                title: title.unwrap_or_else(|| config.report_title().to_string()),
            };
            let changed = diff::run(&old, &new, &options, output_config).await?;
            if fail_on_changes && changed {
                tracing::debug!("Changes found, exiting with status 1");
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Describe { dump, units } => describe::run(&dump, &units, output_config).await,
    }
}
