//! Registry HTTP Client Implementation
//!
//! Talks to the registry's org and team endpoints under `{base_url}/-/`.
//! The acting user travels in the `x-npm-user` header.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde_json::json;

use crate::{
    NewTeam, Org, PackageGrant, PackageRevoke, RegistryConfig, RegistryError, RegistryService,
    Team, TeamUsers,
};

/// Header naming the user a registry call is made for
pub const ACTING_USER_HEADER: &str = "x-npm-user";

/// Real registry HTTP client.
pub struct RegistryClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl RegistryClient {
    /// Create a new registry client from configuration.
    pub fn new(config: RegistryConfig) -> Result<Self, RegistryError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            RegistryError::Configuration(format!(
                "Invalid REGISTRY_URL '{}': {}",
                config.base_url, e
            ))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(RegistryError::Configuration(format!(
                "REGISTRY_URL '{}' cannot be used as a base URL",
                config.base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RegistryError::Configuration(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            token: config.token,
        })
    }

    /// Build `{base_url}/-/{segments...}` with each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, RegistryError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                RegistryError::Configuration("Registry URL cannot be a base".to_string())
            })?
            .pop_if_empty()
            .push("-")
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url, actor: Option<&str>) -> RequestBuilder {
        let mut builder = self.http.request(method, url);
        if let Some(actor) = actor {
            builder = builder.header(ACTING_USER_HEADER, actor);
        }
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn send(&self, builder: RequestBuilder) -> Result<reqwest::Response, RegistryError> {
        let response = builder
            .send()
            .await
            .map_err(|e| RegistryError::Request(e.to_string()))?;

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(status_error(response).await)
        }
    }
}

async fn status_error(response: reqwest::Response) -> RegistryError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = error_message(status, &body);
    tracing::debug!(status = %status, message = %message, "Registry request failed");
    RegistryError::status(status.as_u16(), message)
}

/// Pull a human-readable message out of an error response body.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error", "message"] {
            if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
                return msg.to_string();
            }
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("Registry request failed")
        .to_string()
}

#[async_trait::async_trait]
impl RegistryService for RegistryClient {
    async fn get_org(&self, actor: Option<&str>, org: &str) -> Result<Org, RegistryError> {
        let url = self.endpoint(&["org", org])?;
        let response = self.send(self.request(Method::GET, url, actor)).await?;
        response
            .json::<Org>()
            .await
            .map_err(|e| RegistryError::Response(e.to_string()))
    }

    async fn add_team(&self, actor: Option<&str>, team: &NewTeam) -> Result<(), RegistryError> {
        let url = self.endpoint(&["org", &team.org_scope, "team"])?;
        let body = json!({
            "name": team.team_name,
            "description": team.description,
        });
        self.send(self.request(Method::PUT, url, actor).json(&body))
            .await?;

        tracing::debug!(org = %team.org_scope, team = %team.team_name, "Team created");
        Ok(())
    }

    async fn get_team(
        &self,
        actor: Option<&str>,
        scope: &str,
        team: &str,
    ) -> Result<Team, RegistryError> {
        let url = self.endpoint(&["team", scope, team])?;
        let response = self.send(self.request(Method::GET, url, actor)).await?;
        response
            .json::<Team>()
            .await
            .map_err(|e| RegistryError::Response(e.to_string()))
    }

    async fn add_users(
        &self,
        actor: Option<&str>,
        users: &TeamUsers,
    ) -> Result<(), RegistryError> {
        let url = self.endpoint(&["team", &users.scope, &users.team_name, "user"])?;

        // One call per user; stop at the first rejection
        for user in &users.users {
            self.send(
                self.request(Method::PUT, url.clone(), actor)
                    .json(&json!({ "user": user })),
            )
            .await?;
        }

        tracing::debug!(
            org = %users.scope,
            team = %users.team_name,
            count = users.users.len(),
            "Users added to team"
        );
        Ok(())
    }

    async fn add_package(
        &self,
        actor: Option<&str>,
        grant: &PackageGrant,
    ) -> Result<(), RegistryError> {
        let url = self.endpoint(&["team", &grant.scope, &grant.team, "package"])?;
        let body = json!({
            "package": grant.package,
            "permissions": grant.permissions,
        });
        self.send(self.request(Method::PUT, url, actor).json(&body))
            .await?;
        Ok(())
    }

    async fn remove_package(
        &self,
        actor: Option<&str>,
        revoke: &PackageRevoke,
    ) -> Result<(), RegistryError> {
        let url = self.endpoint(&["team", &revoke.scope, &revoke.team, "package"])?;
        let body = json!({ "package": revoke.package });
        self.send(self.request(Method::DELETE, url, actor).json(&body))
            .await?;
        Ok(())
    }
}
