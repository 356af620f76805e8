//! recap - Meeting transcript summaries, mailed out
//!
//! Entry point for the recap CLI and HTTP server.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use recap::cli::{Cli, Commands};
use recap::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    // Parse CLI arguments
    let cli = Cli::parse();

    match cli.command {
        Commands::Completions { shell } => {
            recap::cli::completions::print(shell);
        }
        command => {
            // Load configuration only for runtime commands.
            let settings = Settings::load()?;
            init_tracing(&settings, cli.verbose);

            let config_path = Settings::config_path()?;
            if config_path.exists() {
                tracing::debug!("Loaded config from {}", config_path.display());
            } else {
                tracing::info!("No config file found, using defaults");
            }

            run(&settings, command).await?;
        }
    }

    Ok(())
}

/// Install the stderr subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(settings: &Settings, verbose: bool) {
    let default_level = if verbose {
        "debug"
    } else {
        settings.general.log_level.as_str()
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

async fn run(settings: &Settings, command: Commands) -> Result<()> {
    match command {
        Commands::Serve { bind, mock } => {
            recap::cli::commands::serve(settings, bind, mock).await?;
        }
        Commands::Summarize {
            file,
            instruction,
            json,
            mock,
        } => {
            recap::cli::commands::summarize_transcript(settings, file, &instruction, json, mock)
                .await?;
        }
        Commands::Send {
            summary,
            to,
            points,
        } => {
            recap::cli::commands::send_summary(settings, &summary, &to, points.as_deref()).await?;
        }
        Commands::Config(config_cmd) => {
            recap::cli::commands::config_command(settings, config_cmd)?;
        }
        Commands::Completions { shell } => {
            recap::cli::completions::print(shell);
        }
    }

    Ok(())
}
