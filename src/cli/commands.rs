//! CLI command implementations

use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::cli::args::ConfigCommand;
use crate::config::Settings;
use crate::service::SummaryService;
use crate::summary::{points_from_text, render_text};

/// Run the HTTP API
pub async fn serve(settings: &Settings, bind: Option<String>, mock: bool) -> Result<()> {
    let mut settings = settings.clone();
    if let Some(bind) = bind {
        settings.server.bind = bind;
    }
    if mock {
        settings.llm.mock_mode = true;
    }

    crate::server::serve(&settings).await
}

/// Summarize a transcript and print the result
pub async fn summarize_transcript(
    settings: &Settings,
    file: Option<PathBuf>,
    instruction: &str,
    json: bool,
    mock: bool,
) -> Result<()> {
    let mut settings = settings.clone();
    if mock {
        settings.llm.mock_mode = true;
    }

    let transcript = read_input(file.as_deref())?;
    let service = SummaryService::from_settings(&settings)?;
    let summary = service.generate(&transcript, instruction).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render_text(&summary));
    }

    Ok(())
}

/// Mail a previously generated summary
pub async fn send_summary(
    settings: &Settings,
    summary_path: &Path,
    to: &[String],
    points_path: Option<&Path>,
) -> Result<()> {
    let content = std::fs::read_to_string(summary_path)
        .with_context(|| format!("Failed to read summary: {}", summary_path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse summary: {}", summary_path.display()))?;

    let mut summary = unwrap_summary(value);

    if let Some(path) = points_path {
        let edited = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read points: {}", path.display()))?;
        replace_points(&mut summary, points_from_text(&edited));
    }

    let service = SummaryService::from_settings(settings)?;
    let delivery = service.send(&summary, to).await?;

    println!("Email sent");
    println!("Preview: {}", delivery.preview_url);

    Ok(())
}

/// Handle config subcommands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let mut shown = settings.clone();
            if !shown.llm.api_key.is_empty() {
                shown.llm.api_key = "********".to_string();
            }
            if !shown.mail.api_key.is_empty() {
                shown.mail.api_key = "********".to_string();
            }
            let toml = toml::to_string_pretty(&shown)?;
            println!("{}", toml);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read transcript: {}", path.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read transcript from stdin")?;
            Ok(buf)
        }
    }
}

/// Accept both a bare summary and a `{"summary": ...}` API response.
fn unwrap_summary(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("summary") && !map.contains_key("points") => {
            map.remove("summary").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn replace_points(summary: &mut Value, points: Vec<String>) {
    if !summary.is_object() {
        *summary = Value::Object(Default::default());
    }
    summary["points"] = Value::from(points);
}
