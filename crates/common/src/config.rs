//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "orgweb=debug,tower_http=info";

/// Header the upstream session layer uses to pass the logged-in user name
pub const DEFAULT_USER_HEADER: &str = "x-logged-in-user";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Whether the org/team management pages are reachable (`org_billing` feature)
    pub org_billing_enabled: bool,

    /// Request header carrying the logged-in user's name
    pub user_header: String,

    /// Maximum accepted request body size in bytes
    pub body_limit_bytes: usize,

    /// `tracing` filter directives for the binaries' subscriber
    pub rust_log: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let user_header = env::var("USER_HEADER")
            .unwrap_or_else(|_| DEFAULT_USER_HEADER.to_string())
            .to_ascii_lowercase();
        if user_header.trim().is_empty() {
            return Err(anyhow::anyhow!("USER_HEADER must not be empty"));
        }

        let config = Self {
            org_billing_enabled: env::var("FEATURE_ORG_BILLING")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            user_header,
            body_limit_bytes: env::var("BODY_LIMIT_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(64 * 1024),
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
        };

        Ok(config)
    }
}

/// Interpret a feature flag value; `1`, `true`, `yes` and `on` enable it
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
