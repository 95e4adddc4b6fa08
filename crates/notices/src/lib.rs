//! Orgweb Notice Service
//!
//! Stores user-facing messages between a redirect and the page it lands on:
//! - a batch of notices is saved under an opaque token
//! - the token travels as `?notice=<token>` on the redirect URL
//! - the landing page takes the batch once; later lookups find nothing

pub mod memory;
pub mod mock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NoticeError {
    #[error("Notice configuration error: {0}")]
    Configuration(String),

    #[error("Notice storage error: {0}")]
    Storage(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Error,
    Success,
}

/// A single message shown to the user on the next page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }
}

/// Notice service configuration
///
/// Both providers keep notices in process memory, so a token only resolves on
/// the instance that saved it. Behind a load balancer or on Lambda, a redirect
/// that lands on another instance shows no notice.
#[derive(Debug, Clone)]
pub struct NoticeConfig {
    /// Notice provider (memory, mock)
    pub provider: String,
    /// How long a saved batch stays retrievable, in seconds
    pub ttl_secs: i64,
}

impl NoticeConfig {
    /// Create notice config from environment variables
    pub fn from_env() -> Result<Self, NoticeError> {
        dotenvy::dotenv().ok();

        let provider = std::env::var("NOTICE_PROVIDER").unwrap_or_else(|_| "memory".to_string());
        let ttl_secs = match std::env::var("NOTICE_TTL_SECS") {
            Ok(v) => v.parse().map_err(|_| {
                NoticeError::Configuration(format!("NOTICE_TTL_SECS is not a number: {}", v))
            })?,
            Err(_) => memory::DEFAULT_TTL_SECS,
        };

        if ttl_secs <= 0 {
            return Err(NoticeError::Configuration(
                "NOTICE_TTL_SECS must be positive".to_string(),
            ));
        }

        Ok(Self { provider, ttl_secs })
    }

    /// Whether saved notices are only visible to the process that saved them
    pub fn is_process_local(&self) -> bool {
        matches!(self.provider.as_str(), "memory" | "mock")
    }
}

/// Notice service trait for different storage backends
#[async_trait::async_trait]
pub trait NoticeService: Send + Sync {
    /// Save a batch of notices and return its token.
    /// An empty batch stores nothing and yields `None`.
    async fn save(&self, notices: Vec<Notice>) -> Result<Option<String>, NoticeError>;

    /// Take the batch saved under `token`, removing it.
    /// Unknown or expired tokens yield an empty batch.
    async fn take(&self, token: &str) -> Result<Vec<Notice>, NoticeError>;
}

/// Factory for creating NoticeService implementations
pub struct NoticeServiceFactory;

impl NoticeServiceFactory {
    pub fn create(config: NoticeConfig) -> Result<Box<dyn NoticeService>, NoticeError> {
        match config.provider.as_str() {
            "memory" => {
                tracing::info!(ttl_secs = config.ttl_secs, "Creating in-memory notice store");
                Ok(Box::new(memory::MemoryNoticeStore::with_ttl(
                    chrono::Duration::seconds(config.ttl_secs),
                )))
            }
            "mock" => {
                tracing::info!("Creating mock notice service");
                Ok(Box::new(mock::MockNoticeService::new()))
            }
            provider => Err(NoticeError::Configuration(format!(
                "Unknown notice provider: {}. Supported providers: memory, mock",
                provider
            ))),
        }
    }
}
