//! Request session values attached by upstream middleware
//!
//! The session layer in front of the handlers resolves who is logged in and
//! which feature flags apply, and stores both as request extensions. Handlers
//! read them through the [`RequestContext`] extractor instead of ambient state.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use serde::{Deserialize, Serialize};

/// The user the upstream session layer authenticated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedInUser {
    pub name: String,
}

impl LoggedInUser {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Per-request feature flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Features {
    /// Gates the org team-management pages
    pub org_billing: bool,
}

/// Identity and feature flags for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub user: Option<LoggedInUser>,
    pub features: Features,
}

impl RequestContext {
    /// Name of the logged-in user, if any
    pub fn user_name(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.name.as_str())
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        // Missing extensions mean anonymous with every feature off
        Ok(RequestContext {
            user: parts.extensions.get::<LoggedInUser>().cloned(),
            features: parts
                .extensions
                .get::<Features>()
                .copied()
                .unwrap_or_default(),
        })
    }
}
