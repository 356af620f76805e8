//! HTTP server for recap
//!
//! Exposes the summary service as a small JSON API.

pub mod error;
pub mod handlers;

use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::{ServerSettings, Settings};
use crate::service::SummaryService;
use crate::RecapError;

pub use error::ApiError;

/// Shared state handed to every handler
pub type AppState = Arc<SummaryService>;

/// Build the API router around a service.
pub fn router(service: AppState, settings: &ServerSettings) -> crate::Result<Router> {
    let cors = cors_layer(&settings.allowed_origins)?;

    Ok(Router::new()
        .route("/", get(handlers::health))
        .route("/generate-summary", post(handlers::generate_summary))
        .route("/send-summary", post(handlers::send_summary))
        .layer(DefaultBodyLimit::max(settings.body_limit_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(service))
}

/// CORS policy: any origin when none are configured, otherwise an allow-list.
pub fn cors_layer(origins: &[String]) -> crate::Result<CorsLayer> {
    if origins.is_empty() {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let values = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|_| RecapError::Config(format!("Invalid allowed origin: {}", origin)))
        })
        .collect::<crate::Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(values))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]))
}

/// Run the HTTP server until Ctrl-C.
pub async fn serve(settings: &Settings) -> Result<()> {
    let service = SummaryService::from_settings(settings)?;
    let app = router(Arc::new(service), &settings.server)?;

    let listener = TcpListener::bind(&settings.server.bind)
        .await
        .with_context(|| format!("Failed to bind {}", settings.server.bind))?;

    info!("Listening on http://{}", listener.local_addr()?);
    if settings.server.allowed_origins.is_empty() {
        info!("CORS: allowing any origin");
    } else {
        info!("CORS: allowing {:?}", settings.server.allowed_origins);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_origins_allow_any() {
        assert!(cors_layer(&[]).is_ok());
    }

    #[test]
    fn origin_list_is_accepted() {
        let origins = vec![
            "http://localhost:3000".to_string(),
            "https://notes.example.com".to_string(),
        ];
        assert!(cors_layer(&origins).is_ok());
    }

    #[test]
    fn invalid_origin_is_a_config_error() {
        let origins = vec!["http://bad\norigin".to_string()];
        assert!(matches!(cors_layer(&origins), Err(RecapError::Config(_))));
    }
}
