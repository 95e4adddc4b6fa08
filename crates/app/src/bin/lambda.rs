//! Orgweb - AWS Lambda Runtime

use lambda_http::{run, Error};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use orgweb_app::{body_limit_layer, create_app, log_filter};
use orgweb_common::config::Config;
use orgweb_notices::NoticeConfig;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config =
        Config::from_env().map_err(|e| Error::from(format!("Configuration error: {}", e)))?;

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&config))
        .json()
        .without_time()
        .init();

    info!("Initializing Orgweb Lambda");

    let notice_config = NoticeConfig::from_env()
        .map_err(|e| Error::from(format!("Notice configuration error: {}", e)))?;
    if notice_config.is_process_local() {
        warn!(
            provider = %notice_config.provider,
            "Notices are kept per instance; a redirect served by another instance shows no notice"
        );
    }

    let app = create_app(&config)
        .map_err(|e| Error::from(format!("App initialization error: {}", e)))?;

    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(body_limit_layer(&config));

    info!("Orgweb Lambda ready to serve requests");

    run(app).await
}
