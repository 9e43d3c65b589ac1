mod analyze;
mod emails;
mod saved;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use prospector_core::{AppConfig, CompanyCatalog};
use prospector_synth::Synthesizer;
use tracing_subscriber::EnvFilter;

use crate::saved::SavedCommands;

#[derive(Debug, Parser)]
#[command(name = "prospector-cli")]
#[command(about = "Prospect research and outreach from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Analyze a company from live news and search signals
    Analyze {
        /// Company name, e.g. "Werner Enterprises"
        company: String,
        /// Persist the analysis after printing it
        #[arg(long)]
        save: bool,
        /// Print raw JSON instead of the formatted report
        #[arg(long)]
        json: bool,
    },
    /// List the catalogued prospect companies
    Companies,
    /// Browse and manage saved analyses
    Saved {
        #[command(subcommand)]
        command: SavedCommands,
    },
    /// Generate one outreach email per saved analysis
    Emails {
        /// Saved analysis ids
        #[arg(required = true, num_args = 1..)]
        ids: Vec<i64>,
    },
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    Ping,
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("prospector-cli ready; run with --help for commands");
        return Ok(());
    };

    let config = prospector_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match command {
        Commands::Analyze {
            company,
            save,
            json,
        } => {
            let catalog = load_catalog(&config)?;
            let synth = build_synthesizer(&config, Arc::clone(&catalog))?;
            let pool = if save {
                Some(connect(&config).await?)
            } else {
                None
            };
            analyze::run_analyze(&synth, &catalog, pool.as_ref(), &company, json).await?;
        }
        Commands::Companies => {
            let catalog = load_catalog(&config)?;
            analyze::run_companies(&catalog);
        }
        Commands::Saved { command } => {
            let pool = connect(&config).await?;
            saved::run_saved(&pool, command).await?;
        }
        Commands::Emails { ids } => {
            let pool = connect(&config).await?;
            let catalog = load_catalog(&config)?;
            let synth = build_synthesizer(&config, catalog)?;
            emails::run_emails(&pool, &synth, &ids).await?;
        }
        Commands::Db { command } => {
            let pool = prospector_db::connect_pool_from_config(&config).await?;
            match command {
                DbCommands::Ping => {
                    prospector_db::ping(&pool).await?;
                    println!("database ok");
                }
                DbCommands::Migrate => {
                    let applied = prospector_db::run_migrations(&pool).await?;
                    println!("applied {applied} migrations");
                }
            }
        }
    }

    Ok(())
}

/// Connect and bring the schema up to date.
async fn connect(config: &AppConfig) -> anyhow::Result<sqlx::PgPool> {
    let pool = prospector_db::connect_pool_from_config(config).await?;
    prospector_db::run_migrations(&pool).await?;
    Ok(pool)
}

fn load_catalog(config: &AppConfig) -> anyhow::Result<Arc<CompanyCatalog>> {
    let catalog = prospector_core::load_catalog(&config.companies_path)?;
    Ok(Arc::new(catalog))
}

fn build_synthesizer(
    config: &AppConfig,
    catalog: Arc<CompanyCatalog>,
) -> anyhow::Result<Synthesizer> {
    if config.claude_api_key.is_none() {
        tracing::warn!("CLAUDE_API_KEY not set; analyses will return degraded results");
    }
    Ok(Synthesizer::from_app_config(config, Some(catalog))?)
}

#[cfg(test)]
mod tests;
