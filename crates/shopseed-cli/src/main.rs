mod commands;
mod seed;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shopseed")]
#[command(about = "Seed the storefront catalog and admin account")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Bootstrap the admin account and top up the product catalog (default)
    Seed {
        /// Stage against a copy of the stored catalog and print the plan; write nothing
        #[arg(long)]
        dry_run: bool,
        #[arg(long)]
        skip_admin: bool,
        #[arg(long)]
        skip_catalog: bool,
    },
    /// Print the asset inventory without touching the database
    Inventory,
    /// Print stored product counts per category
    Report,
    /// Database management commands
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Apply pending migrations
    Migrate,
    /// Check database connectivity
    Ping,
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Seed {
            dry_run: false,
            skip_admin: false,
            skip_catalog: false,
        }
    }
}

fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = shopseed_core::load_app_config()?;
    init_tracing(&config.log_level)?;
    tracing::debug!(?config, "loaded configuration");

    let result = match cli.command.unwrap_or_default() {
        Commands::Seed {
            dry_run: true,
            skip_admin,
            skip_catalog,
        } => commands::run_dry_run(&config, skip_admin, skip_catalog).await,
        Commands::Seed {
            dry_run: false,
            skip_admin,
            skip_catalog,
        } => {
            let options = seed::SeedOptions {
                skip_admin,
                skip_catalog,
            };
            commands::run_seed_command(&config, options).await
        }
        Commands::Inventory => commands::run_inventory(&config),
        Commands::Report => commands::run_report(&config).await,
        Commands::Db { command } => commands::run_db(&config, command).await,
    };

    if let Err(e) = &result {
        tracing::error!(error = %format!("{e:#}"), "shopseed failed");
    }
    result
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
