//! LLM-backed summarizer

use serde_json::Value;
use tracing::{debug, error, warn};

use crate::llm::client::{CompletionRequest, LlmProvider};
use crate::llm::prompts::build_summary_messages;
use crate::{RecapError, Result};

/// Default sampling temperature for summaries
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

pub struct LlmSummarizer {
    provider: Box<dyn LlmProvider>,
    temperature: f32,
}

impl LlmSummarizer {
    pub fn new(provider: Box<dyn LlmProvider>, temperature: f32) -> Self {
        Self {
            provider,
            temperature,
        }
    }

    /// Ask the provider for a summary and parse its answer as JSON.
    ///
    /// The returned value is a raw candidate; callers normalize it.
    pub async fn summarize(&self, transcript: &str, instruction: &str) -> Result<Value> {
        let messages = build_summary_messages(instruction, transcript);

        let text = self
            .provider
            .complete(CompletionRequest {
                messages: &messages,
                temperature: self.temperature,
            })
            .await
            .map_err(|e| {
                error!("LLM request failed: {:#}", e);
                RecapError::ServiceUnavailable(e)
            })?;

        let cleaned = strip_code_fences(&text);
        debug!("LLM returned {} bytes", cleaned.len());

        serde_json::from_str(cleaned).map_err(|e| {
            warn!("LLM returned invalid JSON ({}): {}", e, cleaned);
            RecapError::InvalidUpstreamResponse {
                reason: e.to_string(),
                raw: cleaned.to_string(),
            }
        })
    }
}

/// Strip a surrounding ```json ... ``` (or bare ```) fence.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the language tag, if any, up to the end of the opening line.
    let body = match rest.find('\n') {
        Some(idx) if rest[..idx].trim().chars().all(|c| c.is_ascii_alphanumeric()) => {
            &rest[idx + 1..]
        }
        _ => rest.strip_prefix("json").unwrap_or(rest),
    };

    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}
