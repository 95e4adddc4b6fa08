//! Session middleware
//!
//! Sits behind the upstream identity proxy. Copies the logged-in user from
//! the configured request header, and the process-wide feature flags, into
//! request extensions for the `RequestContext` extractor.

use axum::{
    extract::{Request, State},
    http::HeaderName,
    middleware::Next,
    response::Response,
};
use orgweb_common::{config::Config, Features, LoggedInUser};

/// What the session middleware attaches to each request
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub user_header: HeaderName,
    pub features: Features,
}

impl SessionSettings {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let user_header = HeaderName::from_bytes(config.user_header.as_bytes()).map_err(|e| {
            anyhow::anyhow!("Invalid USER_HEADER '{}': {}", config.user_header, e)
        })?;

        Ok(Self {
            user_header,
            features: Features {
                org_billing: config.org_billing_enabled,
            },
        })
    }
}

pub async fn attach_session(
    State(settings): State<SessionSettings>,
    mut req: Request,
    next: Next,
) -> Response {
    let user = req
        .headers()
        .get(&settings.user_header)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(LoggedInUser::new);

    if let Some(user) = user {
        req.extensions_mut().insert(user);
    }
    req.extensions_mut().insert(settings.features);

    next.run(req).await
}
