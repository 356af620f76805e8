//! recap - A small meeting-notes service that turns transcripts into summaries
//!
//! Transcripts go in, a `{points, decisions, action_items}` summary comes out, either
//! synthesized locally (mock mode) or produced by a hosted LLM. Summaries can then be
//! mailed through a sandbox mail transport.

pub mod cli;
pub mod config;
pub mod llm;
pub mod mail;
pub mod server;
pub mod service;
pub mod summary;

use thiserror::Error;

/// Main error type for recap
#[derive(Error, Debug)]
pub enum RecapError {
    /// Client-supplied data failed a required-field check
    #[error("{0}")]
    InvalidRequest(String),

    /// The text-completion service could not be reached or rejected the call
    #[error("Summary service unavailable: {0}")]
    ServiceUnavailable(#[source] anyhow::Error),

    /// The text-completion service answered with something that is not JSON
    #[error("Summary service returned invalid JSON: {reason}")]
    InvalidUpstreamResponse { reason: String, raw: String },

    #[error("Mail delivery failed: {0}")]
    Mail(#[source] anyhow::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RecapError>;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "recap";
