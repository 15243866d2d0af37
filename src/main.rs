use anyhow::Result;
use clap::{Parser, Subcommand};
use glucoplan::config::Config;
use sqlx::migrate::MigrateDatabase;

mod cli;

use cli::catalog::CatalogCommand;
use cli::plan::PlanCommand;
use cli::track::TrackCommand;

/// glucoplan - meal plans for people living with diabetes
#[derive(Parser)]
#[command(name = "glucoplan")]
#[command(about = "Rolling meal plans with carb compensation and allergen filtering", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    /// User to act on (overrides config file)
    #[arg(long, global = true)]
    user: Option<String>,

    /// JSON file holding the profile (overrides the [profile] section)
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// Generate, show and edit the meal plan
    Plan {
        #[command(subcommand)]
        command: PlanCommand,
    },
    /// Record eaten meals and taken medication
    Track {
        #[command(subcommand)]
        command: TrackCommand,
    },
    /// Inspect the dish catalog
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    glucoplan::observability::init_observability(
        "glucoplan",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    let user_id = cli
        .user
        .clone()
        .unwrap_or_else(|| config.planner.user_id.clone());

    match cli.command {
        Commands::Migrate => glucoplan::migrate(&config.database.url).await,
        Commands::Reset => reset_command(config).await,
        Commands::Plan { command } => {
            let profile = glucoplan::load_profile(&config, cli.profile.as_deref())?;
            cli::plan::run(config, user_id, profile, command, cli.json).await
        }
        Commands::Track { command } => cli::track::run(config, user_id, command, cli.json).await,
        Commands::Catalog { command } => {
            let profile = glucoplan::load_profile(&config, cli.profile.as_deref())?;
            cli::catalog::run(config, profile, command)
        }
    }
}

#[tracing::instrument(skip(config))]
async fn reset_command(config: Config) -> Result<()> {
    tracing::info!("Resetting database...");

    if sqlx::Sqlite::database_exists(&config.database.url).await? {
        tracing::warn!("Dropping existing database: {}", config.database.url);
        sqlx::Sqlite::drop_database(&config.database.url).await?;
    } else {
        tracing::info!("Database does not exist, nothing to drop");
    }

    glucoplan::migrate(&config.database.url).await?;

    tracing::info!("Database reset completed successfully");

    Ok(())
}
