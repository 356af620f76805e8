//! Summary service: request validation, mock/LLM selection and mail dispatch
//!
//! Built once at startup and shared read-only by every request.

use anyhow::Result as AnyResult;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::config::Settings;
use crate::llm::{build_provider, LlmSummarizer};
use crate::mail::{build_mailer, Delivery, Mailer, OutgoingMail};
use crate::summary::{normalize, render_html, render_text, MockSummarizer, Summary};
use crate::{RecapError, Result};

pub const MISSING_INPUT_MESSAGE: &str = "Transcript and instruction are required";
pub const MISSING_RECIPIENTS_MESSAGE: &str = "At least one recipient is required";

pub struct SummaryService {
    mock: MockSummarizer,
    llm: Option<LlmSummarizer>,
    mailer: Box<dyn Mailer>,
    subject: String,
}

impl SummaryService {
    pub fn new(
        mock: MockSummarizer,
        llm: Option<LlmSummarizer>,
        mailer: Box<dyn Mailer>,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            mock,
            llm,
            mailer,
            subject: subject.into(),
        }
    }

    /// Build the service from settings. No provider is created in mock mode.
    pub fn from_settings(settings: &Settings) -> AnyResult<Self> {
        let llm = if settings.mock_mode() {
            info!("Mock mode enabled, summaries are generated locally");
            None
        } else {
            let provider = build_provider(settings)?;
            info!("Using LLM provider '{}'", settings.llm.provider);
            Some(LlmSummarizer::new(provider, settings.llm.temperature))
        };

        Ok(Self::new(
            MockSummarizer::new(settings.mock.max_points),
            llm,
            build_mailer(settings)?,
            settings.mail.subject.clone(),
        ))
    }

    pub fn is_mock(&self) -> bool {
        self.llm.is_none()
    }

    /// Produce a normalized summary for the transcript.
    pub async fn generate(&self, transcript: &str, instruction: &str) -> Result<Summary> {
        if transcript.trim().is_empty() || instruction.trim().is_empty() {
            return Err(RecapError::InvalidRequest(MISSING_INPUT_MESSAGE.to_string()));
        }

        match &self.llm {
            Some(llm) => Ok(normalize(&llm.summarize(transcript, instruction).await?)),
            None => {
                debug!("Generating mock summary ({} bytes)", transcript.len());
                Ok(self.mock.summarize(transcript).normalized())
            }
        }
    }

    /// Render a summary and mail it to the recipients.
    pub async fn send(&self, summary: &Value, recipients: &[String]) -> Result<Delivery> {
        let recipients: Vec<String> = recipients
            .iter()
            .map(|r| r.trim())
            .filter(|r| !r.is_empty())
            .map(str::to_string)
            .collect();

        if recipients.is_empty() {
            return Err(RecapError::InvalidRequest(
                MISSING_RECIPIENTS_MESSAGE.to_string(),
            ));
        }

        let summary = normalize(summary);
        let html = render_html(&summary);
        let text = render_text(&summary);

        self.mailer
            .send(OutgoingMail {
                recipients: &recipients,
                subject: &self.subject,
                html: &html,
                text: &text,
            })
            .await
            .map_err(|e| {
                error!("Failed to send summary mail: {:#}", e);
                RecapError::Mail(e)
            })
    }
}
