//! Mail transport that hands messages to an HTTP mail relay

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::Settings;
use crate::mail::{Delivery, Mailer, OutgoingMail};

pub struct RelayMailer {
    http: Client,
    endpoint: String,
    api_key: String,
    from: String,
}

impl RelayMailer {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let endpoint = settings.mail.endpoint.trim().to_string();
        if endpoint.is_empty() {
            anyhow::bail!(
                "Mail relay endpoint is missing. Set mail.endpoint in config or RECAP_MAIL_ENDPOINT."
            );
        }

        Ok(Self {
            http: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .context("Failed to build mail relay HTTP client")?,
            endpoint,
            api_key: settings.mail.api_key.trim().to_string(),
            from: settings.mail.from.clone(),
        })
    }
}

#[async_trait]
impl Mailer for RelayMailer {
    async fn send(&self, mail: OutgoingMail<'_>) -> Result<Delivery> {
        let body = RelayRequest {
            from: &self.from,
            to: mail.recipients,
            subject: mail.subject,
            html: mail.html,
            text: mail.text,
        };

        let mut request = self.http.post(&self.endpoint).json(&body);
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let response = request.send().await.context("Mail relay request failed")?;

        let response = response
            .error_for_status()
            .context("Mail relay returned an error status")?;

        let payload: RelayResponse = response
            .json()
            .await
            .context("Failed to parse mail relay response")?;

        let preview_url = payload
            .preview_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .context("Mail relay response did not contain a preview URL")?;

        info!("Summary mail relayed to {} recipient(s)", mail.recipients.len());

        Ok(Delivery {
            message_id: payload.id.unwrap_or_default(),
            preview_url,
        })
    }
}

#[derive(Debug, Serialize)]
struct RelayRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct RelayResponse {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "previewUrl", alias = "preview_url")]
    preview_url: Option<String>,
}
