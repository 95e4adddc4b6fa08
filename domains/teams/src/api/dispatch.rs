//! Response helpers shared by the team handlers
//!
//! Every failure branch ends in [`dispatch_error`]:
//! - 404 renders the not-found page
//! - other statuses below 500 redirect with a one-shot notice
//! - everything else renders the internal-error page

use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use orgweb_common::{Error, ErrorClass};
use orgweb_notices::Notice;
use orgweb_views::View;

use super::middleware::TeamsState;

/// Org listing page, the landing spot when the feature is off
pub const ORG_LISTING_PATH: &str = "/org";

pub fn org_path(org: &str) -> String {
    format!("/org/{}", org)
}

pub fn team_list_path(org: &str) -> String {
    format!("/org/{}/team", org)
}

pub fn team_path(org: &str, team: &str) -> String {
    format!("/org/{}/team/{}", org, team)
}

/// `target` with `?notice=<token>` appended when there is a token
pub fn notice_url(target: &str, token: Option<&str>) -> String {
    match token {
        Some(token) => format!("{}?notice={}", target, token),
        None => target.to_string(),
    }
}

/// 302 redirect
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// Render a view with the given status
pub fn render(state: &TeamsState, status: StatusCode, view: View) -> Response {
    match state.views.render(&view) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, view = view.name(), "Failed to render view");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

pub fn not_found(state: &TeamsState) -> Response {
    render(state, StatusCode::NOT_FOUND, View::NotFound)
}

pub fn internal_error(state: &TeamsState) -> Response {
    render(state, StatusCode::INTERNAL_SERVER_ERROR, View::InternalError)
}

/// Save `message` as an error notice and redirect to `target` with its token.
///
/// If the notice cannot be saved the user gets the internal-error page.
pub async fn user_error(state: &TeamsState, target: &str, message: impl Into<String>) -> Response {
    match state.notices.save(vec![Notice::error(message)]).await {
        Ok(token) => found(&notice_url(target, token.as_deref())),
        Err(e) => {
            tracing::error!(error = %e, target = %target, "Failed to save notice");
            internal_error(state)
        }
    }
}

/// Log `err`, then answer with the page or redirect its class calls for
pub async fn dispatch_error(state: &TeamsState, err: Error, target: &str) -> Response {
    let class = err.classify();
    match class {
        ErrorClass::Server => {
            tracing::error!(error = %err, code = err.error_code(), "Request failed")
        }
        _ => tracing::warn!(
            error = %err,
            code = err.error_code(),
            target = %target,
            "Request rejected"
        ),
    }

    match class {
        ErrorClass::NotFound => not_found(state),
        ErrorClass::User(message) => user_error(state, target, message).await,
        ErrorClass::Server => internal_error(state),
    }
}

/// Take the notices behind `?notice=<token>` for display; lookup failures are logged and ignored
pub async fn take_notices(state: &TeamsState, token: Option<&str>) -> Vec<Notice> {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return Vec::new();
    };

    match state.notices.take(token).await {
        Ok(notices) => notices,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load notices");
            Vec::new()
        }
    }
}
