//! Sandbox mail transport that writes messages to a local directory

use ammonia::clean_text;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

use crate::config::Settings;
use crate::mail::{Delivery, Mailer, OutgoingMail};

pub struct OutboxMailer {
    dir: PathBuf,
    from: String,
}

impl OutboxMailer {
    pub fn new(dir: impl Into<PathBuf>, from: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            from: from.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.mail.outbox_dir, &settings.mail.from)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn render(&self, mail: &OutgoingMail<'_>, message_id: &str, date: &str) -> String {
        format!(
            "<!DOCTYPE html>\n\
<html>\n<head><meta charset=\"utf-8\"><title>{subject}</title></head>\n<body>\n\
<pre>\nFrom: {from}\nTo: {to}\nSubject: {subject}\nDate: {date}\nMessage-Id: &lt;{message_id}&gt;\n</pre>\n\
<hr>\n{html}\n\
<hr>\n<pre>\n{text}</pre>\n\
</body>\n</html>\n",
            subject = clean_text(mail.subject),
            from = clean_text(&self.from),
            to = clean_text(&mail.recipients.join(", ")),
            date = date,
            message_id = message_id,
            html = mail.html,
            text = clean_text(mail.text),
        )
    }
}

#[async_trait]
impl Mailer for OutboxMailer {
    async fn send(&self, mail: OutgoingMail<'_>) -> Result<Delivery> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create outbox: {}", self.dir.display()))?;

        let now = Utc::now();
        let id = Uuid::new_v4();
        let message_id = format!("{}@recap.local", id);
        let file_name = format!("{}-{}.html", now.format("%Y%m%d-%H%M%S"), &id.to_string()[..8]);
        let path = self.dir.join(file_name);

        let content = self.render(&mail, &message_id, &now.to_rfc2822());
        tokio::fs::write(&path, content)
            .await
            .with_context(|| format!("Failed to write message: {}", path.display()))?;

        let path = tokio::fs::canonicalize(&path).await.unwrap_or(path);
        let preview_url = format!("file://{}", path.display());

        info!(
            "Summary mail for {} recipient(s) written to {}",
            mail.recipients.len(),
            path.display()
        );

        Ok(Delivery {
            message_id,
            preview_url,
        })
    }
}
