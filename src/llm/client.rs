use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::llm::gemini::GeminiClient;
use crate::llm::openai::OpenAiClient;

/// Role of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A role-tagged prompt message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Text completion request payload.
pub struct CompletionRequest<'a> {
    pub messages: &'a [ChatMessage],
    pub temperature: f32,
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate text for the given messages.
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String>;
}

/// Build an LLM provider from runtime settings.
pub fn build_provider(settings: &Settings) -> Result<Box<dyn LlmProvider>> {
    match settings.llm.provider.to_lowercase().as_str() {
        "openai" => Ok(Box::new(OpenAiClient::from_settings(settings)?)),
        "gemini" => Ok(Box::new(GeminiClient::from_settings(settings)?)),
        other => anyhow::bail!(
            "Unsupported llm.provider '{}'. Supported providers: openai, gemini",
            other
        ),
    }
}

/// Resolve the configured endpoint, falling back to the provider default.
pub(crate) fn endpoint_or(configured: &str, default: &str) -> String {
    let configured = configured.trim().trim_end_matches('/');
    if configured.is_empty() {
        default.to_string()
    } else {
        configured.to_string()
    }
}

/// Resolve the configured model, falling back to the provider default.
pub(crate) fn model_or(configured: &str, default: &str) -> String {
    let configured = configured.trim();
    if configured.is_empty() {
        default.to_string()
    } else {
        configured.to_string()
    }
}
