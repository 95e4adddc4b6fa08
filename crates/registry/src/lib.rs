//! Orgweb Registry Service
//!
//! Client for the registry's org and team management API:
//! - HTTP client for the registry service in production
//! - In-memory mock registry for testing and development
//! - Configurable base URL, service token and timeout

pub mod client;
pub mod mock;
pub mod types;

use thiserror::Error;

pub use types::{
    Collection, NewTeam, Org, OrgMember, PackageGrant, PackageRevoke, Permission, Team,
    TeamMember, TeamPackage, TeamUsers,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Registry configuration error: {0}")]
    Configuration(String),

    #[error("Registry request error: {0}")]
    Request(String),

    #[error("Registry response error: {0}")]
    Response(String),

    /// The registry answered with a non-success status
    #[error("Registry returned {status_code}: {message}")]
    Status { status_code: u16, message: String },
}

impl RegistryError {
    pub fn status(status_code: u16, message: impl Into<String>) -> Self {
        RegistryError::Status {
            status_code,
            message: message.into(),
        }
    }

    /// Status code reported by the registry; `None` for local or transport failures
    pub fn status_code(&self) -> Option<u16> {
        match self {
            RegistryError::Status { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

impl From<RegistryError> for orgweb_common::Error {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::Status {
                status_code,
                message,
            } => orgweb_common::Error::Upstream {
                status: status_code,
                message,
            },
            other => orgweb_common::Error::Internal(other.to_string()),
        }
    }
}

/// Registry service configuration
#[derive(Clone)]
pub struct RegistryConfig {
    /// Registry provider (http, mock)
    pub provider: String,
    /// Base URL of the registry API
    pub base_url: String,
    /// Optional service token sent as a bearer credential
    pub token: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl std::fmt::Debug for RegistryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryConfig")
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl RegistryConfig {
    /// Create registry config from environment variables
    pub fn from_env() -> Result<Self, RegistryError> {
        dotenvy::dotenv().ok();

        let provider = std::env::var("REGISTRY_PROVIDER").unwrap_or_else(|_| "http".to_string());

        let base_url = std::env::var("REGISTRY_URL").unwrap_or_default();
        if provider == "http" && base_url.is_empty() {
            return Err(RegistryError::Configuration(
                "REGISTRY_URL is required for the http provider".to_string(),
            ));
        }

        let token = std::env::var("REGISTRY_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());

        let timeout_secs = std::env::var("REGISTRY_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        Ok(Self {
            provider,
            base_url,
            token,
            timeout_secs,
        })
    }
}

/// Org and team operations offered by the registry.
///
/// Every call acts on behalf of `actor`, the logged-in user, so the registry
/// can apply its own access rules.
#[async_trait::async_trait]
pub trait RegistryService: Send + Sync {
    /// Fetch an org with its members.
    async fn get_org(&self, actor: Option<&str>, org: &str) -> Result<Org, RegistryError>;

    /// Create a team under an org.
    async fn add_team(&self, actor: Option<&str>, team: &NewTeam) -> Result<(), RegistryError>;

    /// Fetch a team with its members and packages.
    async fn get_team(
        &self,
        actor: Option<&str>,
        scope: &str,
        team: &str,
    ) -> Result<Team, RegistryError>;

    /// Add users to an existing team, in order.
    async fn add_users(&self, actor: Option<&str>, users: &TeamUsers)
        -> Result<(), RegistryError>;

    /// Grant a team read or write access to a package.
    async fn add_package(
        &self,
        actor: Option<&str>,
        grant: &PackageGrant,
    ) -> Result<(), RegistryError>;

    /// Remove a package from a team.
    async fn remove_package(
        &self,
        actor: Option<&str>,
        revoke: &PackageRevoke,
    ) -> Result<(), RegistryError>;
}

/// Factory for creating RegistryService implementations
pub struct RegistryServiceFactory;

impl RegistryServiceFactory {
    pub fn create(config: RegistryConfig) -> Result<Box<dyn RegistryService>, RegistryError> {
        match config.provider.as_str() {
            "http" => {
                tracing::info!(base_url = %config.base_url, "Creating registry HTTP client");
                Ok(Box::new(client::RegistryClient::new(config)?))
            }
            "mock" => {
                tracing::info!("Creating mock registry service");
                Ok(Box::new(mock::MockRegistryService::new()))
            }
            provider => Err(RegistryError::Configuration(format!(
                "Unknown registry provider: {}. Supported providers: http, mock",
                provider
            ))),
        }
    }
}
