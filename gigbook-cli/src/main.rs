//! gigbook CLI - run the venue/artist/show listing site
//!
//! - `serve`: migrate the schema and run the HTTP server
//! - `migrate`: create or update the schema only
//! - `seed`: load sample listings into an empty database
//! - `completions`: shell completion scripts

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod config;
mod tracing_setup;

use config::AppConfig;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "gigbook",
    author,
    version,
    about = "Listing site for venues, artists and the shows that connect them"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG still wins when set)
    #[arg(long, global = true)]
    debug: bool,

    /// Config file (default: ./gigbook.toml when present)
    #[arg(long, short = 'c', global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(commands::serve::ServeArgs),
    /// Create or update the database schema
    Migrate(commands::DbArgs),
    /// Load sample venues, artists and shows into an empty database
    Seed(commands::DbArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // .env first so a RUST_LOG set there reaches the filter; it never
    // overrides variables that are already set
    let env_file = dotenvy::dotenv().ok();
    tracing_setup::init(&TracingConfig { debug: cli.debug })?;
    if let Some(path) = env_file {
        tracing::debug!("loaded environment from {}", path.display());
    }

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Serve(args) => commands::run_serve(&load_config(config_path)?, args).await?,
        Commands::Migrate(args) => commands::run_migrate(&load_config(config_path)?, args).await?,
        Commands::Seed(args) => commands::run_seed(&load_config(config_path)?, args).await?,
        Commands::Completions(args) => run_completions(args)?,
    }
    Ok(())
}

/// `gigbook.toml`, then environment overrides.
fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    AppConfig::load(path).context("Failed to load configuration")
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
