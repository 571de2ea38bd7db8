//! PCForge - PC build recommendation client
//!
#![doc = "PCForge - PC build recommendation client"]
#![doc = "Main entry point for the PCForge CLI."]

use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pcforge::cli::{BuildsCommand, Cli, Commands};
use pcforge::commands;
use pcforge::config::Config;

#[tokio::main]
async fn main() {
    // Initialize tracing
    init_tracing();

    // Parse command line arguments
    let cli = Cli::parse_args();

    if let Err(e) = run(cli).await {
        eprintln!("{}", e.to_string().red());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(|| "config/config.yaml".to_string());
    let config = Config::load(&config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Recommend {
            budget,
            use_case,
            game,
            save,
            rate,
        } => {
            tracing::info!("Starting recommendation query");
            commands::recommend::run_recommend(config, budget, use_case, game, save, rate).await
        }
        Commands::Register {
            username,
            email,
            password,
        } => {
            tracing::info!("Starting account registration");
            commands::auth::register(config, username, email, password).await
        }
        Commands::Login { username, password } => {
            tracing::info!("Starting login for {}", username);
            commands::auth::login(config, username, password).await
        }
        Commands::Logout => {
            tracing::info!("Starting logout");
            commands::auth::logout(config).await
        }
        Commands::Whoami => commands::auth::whoami(config).await,
        Commands::Builds { command } => match command {
            BuildsCommand::List => {
                tracing::info!("Listing saved builds");
                commands::builds::list(config).await
            }
            BuildsCommand::Rate {
                build_id,
                rating,
                comment,
            } => {
                tracing::info!("Rating build {}", build_id);
                commands::builds::rate(config, build_id, rating, comment).await
            }
            BuildsCommand::Delete { build_id, yes } => {
                tracing::info!("Deleting build {}", build_id);
                commands::builds::delete(config, build_id, yes).await
            }
        },
        Commands::Ratings => {
            tracing::info!("Listing submitted ratings");
            commands::builds::ratings(config).await
        }
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pcforge=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
