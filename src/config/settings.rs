//! Application settings management

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// General settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerSettings,

    /// LLM settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// Mock summarizer settings
    #[serde(default)]
    pub mock: MockSettings,

    /// Outgoing mail settings
    #[serde(default)]
    pub mail: MailSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Address the HTTP server binds to
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Origins allowed to call the API from a browser (empty = any origin)
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Maximum accepted request body size in bytes
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// LLM provider (openai, gemini)
    #[serde(default = "default_llm_provider")]
    pub provider: String,

    /// API key; when empty the service runs in mock mode
    #[serde(default)]
    pub api_key: String,

    /// Model name (empty = provider default)
    #[serde(default)]
    pub model: String,

    /// API endpoint override (for proxies or compatible servers)
    #[serde(default)]
    pub endpoint: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Never call the LLM, always synthesize summaries locally
    #[serde(default)]
    pub mock_mode: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockSettings {
    /// Number of transcript fragments kept as points
    #[serde(default = "default_max_points")]
    pub max_points: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailSettings {
    /// Mail transport (outbox, relay)
    #[serde(default = "default_mail_transport")]
    pub transport: String,

    /// Directory the sandbox outbox writes messages to
    #[serde(default = "default_outbox_dir")]
    pub outbox_dir: PathBuf,

    /// Relay endpoint (relay transport only)
    #[serde(default)]
    pub endpoint: String,

    /// Relay bearer token (relay transport only)
    #[serde(default)]
    pub api_key: String,

    /// Sender address
    #[serde(default = "default_mail_from")]
    pub from: String,

    /// Subject line for summary mails
    #[serde(default = "default_mail_subject")]
    pub subject: String,
}

// Default value functions

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "recap", "recap")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}

fn default_body_limit() -> usize {
    10 * 1024 * 1024
}

fn default_llm_provider() -> String {
    "openai".to_string()
}

fn default_temperature() -> f32 {
    crate::llm::DEFAULT_TEMPERATURE
}

fn default_max_points() -> usize {
    crate::summary::mock::DEFAULT_MAX_POINTS
}

fn default_mail_transport() -> String {
    "outbox".to_string()
}

fn default_outbox_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("outbox"))
        .unwrap_or_else(|| PathBuf::from("~/.local/share/recap/outbox"))
}

fn default_mail_from() -> String {
    "Recap <recap@example.com>".to_string()
}

fn default_mail_subject() -> String {
    "Meeting Summary".to_string()
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            allowed_origins: Vec::new(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            api_key: String::new(),
            model: String::new(),
            endpoint: String::new(),
            temperature: default_temperature(),
            mock_mode: false,
        }
    }
}

impl Default for MockSettings {
    fn default() -> Self {
        Self {
            max_points: default_max_points(),
        }
    }
}

impl Default for MailSettings {
    fn default() -> Self {
        Self {
            transport: default_mail_transport(),
            outbox_dir: default_outbox_dir(),
            endpoint: String::new(),
            api_key: String::new(),
            from: default_mail_from(),
            subject: default_mail_subject(),
        }
    }
}

/// Interpret a boolean-like environment value ("true", "1", "yes").
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes"
    )
}

impl Settings {
    /// Load settings from the configuration file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let mut settings = Self::default();
            settings.apply_env_overrides();
            return Ok(settings);
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let mut settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        settings.apply_env_overrides();

        Ok(settings)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(flag) = lookup("RECAP_MOCK_MODE") {
            self.llm.mock_mode = parse_flag(&flag);
        }

        if let Some(key) = non_empty("RECAP_API_KEY") {
            self.llm.api_key = key;
        }

        if self.llm.api_key.trim().is_empty() {
            let fallback = match self.llm.provider.to_lowercase().as_str() {
                "openai" => non_empty("OPENAI_API_KEY"),
                "gemini" => non_empty("GEMINI_API_KEY"),
                _ => None,
            };
            if let Some(key) = fallback {
                self.llm.api_key = key;
            }
        }

        if let Some(model) = non_empty("RECAP_MODEL") {
            self.llm.model = model.trim().to_string();
        }

        if let Some(origins) = lookup("RECAP_ALLOWED_ORIGINS") {
            self.server.allowed_origins = parse_origins(&origins);
        }

        if let Some(bind) = non_empty("RECAP_BIND") {
            self.server.bind = bind.trim().to_string();
        }

        if let Some(endpoint) = non_empty("RECAP_MAIL_ENDPOINT") {
            self.mail.transport = "relay".to_string();
            self.mail.endpoint = endpoint.trim().to_string();
        }
    }

    /// Whether summaries are synthesized locally instead of calling the LLM
    pub fn mock_mode(&self) -> bool {
        self.llm.mock_mode || self.llm.api_key.trim().is_empty()
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let dirs = project_dirs().context("Could not determine config directory")?;

        let config_dir = dirs.config_dir();
        Ok(config_dir.join("config.toml"))
    }

    /// Write default configuration to a file
    pub fn write_default(path: &PathBuf) -> Result<()> {
        let settings = Self::default();
        let content = toml::to_string_pretty(&settings)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Split a comma-separated origin list. `*` or an empty list means any origin.
fn parse_origins(value: &str) -> Vec<String> {
    let origins: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(|o| o.trim_end_matches('/').to_string())
        .collect();

    if origins.iter().any(|o| o == "*") {
        return Vec::new();
    }
    origins
}
