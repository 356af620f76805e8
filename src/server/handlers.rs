//! HTTP request handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::server::error::ApiError;
use crate::server::AppState;
use crate::summary::Summary;

pub const HEALTH_BODY: &str = "Meeting summary service is running";

#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default)]
    pub instruction: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub summary: Summary,
}

#[derive(Debug, Default, Deserialize)]
pub struct SendRequest {
    #[serde(default)]
    pub summary: Value,
    #[serde(default)]
    pub recipients: Recipients,
}

/// Recipients as a JSON array, or a single comma-separated string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Recipients {
    Many(Vec<String>),
    One(String),
}

impl Default for Recipients {
    fn default() -> Self {
        Recipients::Many(Vec::new())
    }
}

impl Recipients {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Recipients::Many(list) => list,
            Recipients::One(joined) => joined.split(',').map(str::to_string).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendResponse {
    pub message: String,
    pub preview_url: String,
}

/// GET /
pub async fn health() -> &'static str {
    HEALTH_BODY
}

/// POST /generate-summary
pub async fn generate_summary(
    State(service): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let Json(request) = payload?;
    let transcript = request.transcript.unwrap_or_default();
    let instruction = request.instruction.unwrap_or_default();

    let summary = service.generate(&transcript, &instruction).await?;

    info!(
        "Generated summary: {} points, {} decisions, {} action items",
        summary.points.len(),
        summary.decisions.len(),
        summary.action_items.len()
    );

    Ok(Json(GenerateResponse { summary }))
}

/// POST /send-summary
pub async fn send_summary(
    State(service): State<AppState>,
    payload: Result<Json<SendRequest>, JsonRejection>,
) -> Result<Json<SendResponse>, ApiError> {
    let Json(request) = payload?;
    let recipients = request.recipients.into_vec();

    let delivery = service.send(&request.summary, &recipients).await?;

    Ok(Json(SendResponse {
        message: "Email sent successfully".to_string(),
        preview_url: delivery.preview_url,
    }))
}
