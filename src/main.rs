//! CLI entry point for crtools

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use crtools::commands::content::{self, ContentCommand};
use crtools::commands::node::{self, NodeCommand};
use crtools::commands::page::{self, PageCommand};
use crtools::commands::{CommandContext, Outcome};
use crtools::{MemoryStore, OutputConfig, Result, StreamingFormatter, ToolConfig};
use tracing_subscriber::{EnvFilter, fmt};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "crtools")]
#[command(about = "List, create, update and remove content repository nodes")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Site document to operate on (overrides config file and CRTOOLS_STORE)
    #[arg(long, global = true, value_name = "FILE")]
    store: Option<PathBuf>,

    /// Configuration file (default: ./crtools.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto", global = true)]
    color: ColorMode,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Work with documents (pages)
    #[command(subcommand)]
    Page(PageCommand),

    /// Work with content elements of a page
    #[command(subcommand)]
    Content(ContentCommand),

    /// Inspect single nodes
    #[command(subcommand)]
    Node(NodeCommand),
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn run(cli: Cli, output: &mut StreamingFormatter) -> Result<Outcome> {
    let mut config = ToolConfig::load(cli.config.as_deref())?;
    if let Some(store) = cli.store {
        config.store = store;
    }
    let mut store = MemoryStore::open(&config.store)?;

    let outcome = {
        let mut ctx = CommandContext::new(&mut store, &config, output);
        match cli.command {
            Commands::Page(command) => page::run(command, &mut ctx),
            Commands::Content(command) => content::run(command, &mut ctx),
            Commands::Node(command) => node::run(command, &mut ctx),
        }
    }?;

    if outcome.modified {
        store.save(&config.store)?;
    }
    Ok(outcome)
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    tracing::debug!("parsed arguments: {:?}", cli);

    let mut output = StreamingFormatter::new(OutputConfig {
        use_color: should_use_color(cli.color),
    });

    match run(cli, &mut output) {
        Ok(outcome) if outcome.success => {}
        Ok(_) => process::exit(1),
        Err(e) => {
            tracing::debug!("command failed: {:?}", e);
            if output.error(&e.to_string()).is_err() {
                eprintln!("ERROR: {}", e);
            }
            process::exit(1);
        }
    }
}
