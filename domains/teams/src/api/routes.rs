//! Route definitions for Teams domain API

use axum::{routing::get, Router};

use super::handlers::teams;
use super::middleware::TeamsState;

/// Create all Teams domain routes
pub fn routes() -> Router<TeamsState> {
    Router::new()
        .route(
            "/org/{org}/team",
            get(teams::team_creation_page).post(teams::add_team_to_org),
        )
        .route(
            "/org/{org}/team/{team_name}",
            get(teams::show_team).post(teams::update_team),
        )
        .route(
            "/org/{org}/team/{team_name}/members",
            get(teams::show_team_members),
        )
}
