//! Bind Resolve Binary
//!
//! Run with: `bind-resolve [OPTIONS] <INPUT>`
//!
//! Reads a JSON array of declarations, resolves overloads and prints the
//! canonical declarations grouped by extension.

use std::fs;
use std::fmt::Write as _;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use bind_core::{load_declarations, ConflictResolver, GroupedStore, ResolverConfig, SignatureIdentity};

#[derive(Parser)]
#[command(name = "bind-resolve")]
#[command(about = "Resolves overloaded binding declarations")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Declaration batch (JSON); `-` reads stdin
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Configuration file path
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Resolve each extension on its own worker
    #[arg(short, long)]
    parallel: bool,

    /// Print per-extension counts instead of declarations
    #[arg(short, long)]
    summary: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the default configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .init();

    if let Some(Commands::Config) = &cli.command {
        print!("{}", ResolverConfig::default().to_toml_string()?);
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => ResolverConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ResolverConfig::default(),
    };
    debug!(rules = ?config.rules(), "resolver configured");

    let input = cli.input.as_deref().unwrap_or(Path::new("-"));
    let source = read_input(input)?;
    let declarations = load_declarations(&source)
        .with_context(|| format!("failed to parse declarations from {}", input.display()))?;
    info!(count = declarations.len(), "loaded declarations");

    let mut store = GroupedStore::new().with_resolver(ConflictResolver::from_config(&config));
    if cli.parallel {
        store.ingest_partitioned(declarations);
    } else {
        store.ingest_all(declarations);
    }

    if cli.summary {
        print!("{}", render_summary(&store));
    } else {
        println!("{}", serde_json::to_string_pretty(&store)?);
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("failed to read stdin")?;
        Ok(source)
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    }
}

/// One `extension: count` line per group, then the total.
fn render_summary<I: SignatureIdentity>(store: &GroupedStore<I>) -> String {
    let mut out = String::new();
    for (extension, group) in store.groups() {
        let _ = writeln!(out, "{extension}: {}", group.len());
    }
    let _ = writeln!(out, "total: {}", store.len());
    out
}
