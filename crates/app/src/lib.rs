//! Orgweb application composition root
//!
//! Composes the domain routers, the session middleware and the shared
//! services into a single application.

pub mod session;

use std::sync::Arc;

use axum::{middleware::from_fn_with_state, Router};
use orgweb_common::config::{Config, DEFAULT_LOG_FILTER};
use orgweb_notices::{NoticeConfig, NoticeServiceFactory};
use orgweb_registry::{RegistryConfig, RegistryServiceFactory};
use orgweb_teams::TeamsState;
use orgweb_views::HtmlRenderer;
use tower_http::limit::RequestBodyLimitLayer;
use tracing_subscriber::EnvFilter;

use session::{attach_session, SessionSettings};

/// Build the Teams domain state from environment configuration
pub fn teams_state_from_env() -> Result<TeamsState, anyhow::Error> {
    let registry_config = RegistryConfig::from_env()?;
    tracing::info!(config = ?registry_config, "Registry configuration loaded");
    let registry = RegistryServiceFactory::create(registry_config)?;

    let notice_config = NoticeConfig::from_env()?;
    let notices = NoticeServiceFactory::create(notice_config)?;

    Ok(TeamsState {
        registry: Arc::from(registry),
        notices: Arc::from(notices),
        views: Arc::new(HtmlRenderer::default()),
    })
}

/// Create the main application router with all routes and middleware
pub fn build_app(config: &Config, teams_state: TeamsState) -> Result<Router, anyhow::Error> {
    let session = SessionSettings::from_config(config)?;

    let app = Router::new()
        .route("/health", axum::routing::get(health_check))
        .merge(orgweb_teams::routes().with_state(teams_state))
        .layer(from_fn_with_state(session, attach_session));

    Ok(app)
}

/// Create the application with services configured from the environment
pub fn create_app(config: &Config) -> Result<Router, anyhow::Error> {
    build_app(config, teams_state_from_env()?)
}

/// Request body size limit for form posts
pub fn body_limit_layer(config: &Config) -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(config.body_limit_bytes)
}

/// Subscriber filter built from the configured directives.
///
/// Directives that fail to parse fall back to [`DEFAULT_LOG_FILTER`].
pub fn log_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_new(&config.rust_log).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
