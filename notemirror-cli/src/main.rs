//! Notemirror CLI - Command line interface for review requests stored as git notes

mod commands;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use notemirror_core::{Config, GitRepo};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{ListArgs, RequestArgs, ShowArgs};

/// Notemirror: review requests stored as git notes
#[derive(Parser, Debug)]
#[command(name = "notemirror")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path inside the git repository to operate on
    #[arg(short = 'C', long, global = true, default_value = ".")]
    repo: PathBuf,

    /// Notes ref holding review requests (overrides config and env)
    #[arg(long, global = true, env = "NOTEMIRROR_REVIEWS_REF")]
    notes_ref: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// List review requests on all commits
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show review requests attached to a revision
    Show(ShowArgs),

    /// Attach a new review request to a revision
    Request(RequestArgs),

    /// Show current configuration
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let config = Config::load_with_overrides(cli.notes_ref.clone())?;

    if cli.verbose {
        tracing::info!(
            reviews_ref = %config.notes.reviews_ref,
            requester = ?config.review.requester,
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("notemirror {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::List(args)) => {
            args.execute(&open_repo(&cli.repo)?, &config)?;
        }
        Some(Commands::Show(args)) => {
            args.execute(&open_repo(&cli.repo)?, &config)?;
        }
        Some(Commands::Request(args)) => {
            args.execute(&open_repo(&cli.repo)?, &config)?;
        }
        Some(Commands::Config) => {
            println!("Notemirror Configuration");
            println!("========================");
            println!();
            println!("Notes:");
            println!("  reviews_ref: {}", config.notes.reviews_ref);
            println!();
            println!("Review:");
            println!(
                "  requester: {}",
                config.review.requester.as_deref().unwrap_or("(none)")
            );
            println!();
            if let Some(path) = Config::default_config_path() {
                println!("Config file: {}", path.display());
                if path.exists() {
                    println!("  (exists)");
                } else {
                    println!("  (not found - using defaults)");
                }
            }
        }
        None => {
            println!("Notemirror - review requests stored as git notes");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

fn open_repo(path: &Path) -> anyhow::Result<GitRepo> {
    let repo = GitRepo::open(path)
        .with_context(|| format!("Failed to open repository at {}", path.display()))?;
    tracing::debug!(root = %repo.root().display(), "Opened repository");
    Ok(repo)
}
