//! Org team page handlers
//!
//! Each handler checks the `org_billing` feature and the org/team names
//! before it calls the registry, then makes its registry calls one after
//! another and stops at the first failure.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
};
use axum_extra::extract::Form;
use orgweb_common::{Error, RequestContext, Result};
use orgweb_registry::{NewTeam, PackageGrant, PackageRevoke, TeamUsers};
use orgweb_views::{AddTeamPage, View};
use serde::Deserialize;

use crate::api::dispatch::{
    dispatch_error, found, not_found, org_path, render, take_notices, team_list_path, team_path,
    ORG_LISTING_PATH,
};
use crate::api::middleware::TeamsState;
use crate::domain::auth::is_org_admin;
use crate::domain::entities::{team_page, AddTeamForm, TeamUpdate, UpdateTeamForm};
use crate::domain::validation::is_invalid_identifier;

pub const ACCESS_DENIED: &str = "You do not have access to that page";
pub const INVALID_ORG_NAME: &str = "Invalid Org Name.";
pub const INVALID_TEAM_NAME: &str = "Invalid Team Name.";

/// `?notice=<token>` left by a previous redirect
#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
}

/// Check org and team names, answering with the matching notice redirect
async fn check_names(state: &TeamsState, org: &str, team: &str) -> Option<Response> {
    if is_invalid_identifier(org) {
        let err = Error::Validation(INVALID_ORG_NAME.to_string());
        return Some(dispatch_error(state, err, ORG_LISTING_PATH).await);
    }
    if is_invalid_identifier(team) {
        let err = Error::Validation(INVALID_TEAM_NAME.to_string());
        return Some(dispatch_error(state, err, &team_list_path(org)).await);
    }
    None
}

/// Show the "add team" form
///
/// **GET /org/{org}/team**
///
/// Only org admins get the form; everyone else is sent back to the org page
/// with a notice.
pub async fn team_creation_page(
    ctx: RequestContext,
    State(state): State<TeamsState>,
    Path(org): Path<String>,
    Query(query): Query<NoticeQuery>,
) -> Response {
    if !ctx.features.org_billing {
        return found(ORG_LISTING_PATH);
    }

    if is_invalid_identifier(&org) {
        tracing::debug!(org = %org, "Rejected invalid org name");
        return not_found(&state);
    }

    let actor = ctx.user_name();
    let org_record = match state.registry.get_org(actor, &org).await {
        Ok(org_record) => org_record,
        Err(e) => return dispatch_error(&state, e.into(), &org_path(&org)).await,
    };

    if !is_org_admin(&org_record, actor) {
        let err = Error::Authorization(ACCESS_DENIED.to_string());
        return dispatch_error(&state, err, &org_path(&org)).await;
    }

    let notices = take_notices(&state, query.notice.as_deref()).await;
    render(
        &state,
        StatusCode::OK,
        View::AddTeam(AddTeamPage { org, notices }),
    )
}

/// Confirm the org, create the team, then add its members.
async fn create_team_with_members(
    state: &TeamsState,
    actor: Option<&str>,
    org: &str,
    form: &AddTeamForm,
) -> Result<()> {
    state.registry.get_org(actor, org).await?;

    state
        .registry
        .add_team(
            actor,
            &NewTeam {
                org_scope: org.to_string(),
                team_name: form.team_name.clone(),
                description: form.description(),
            },
        )
        .await?;

    let members = form.members();
    if !members.is_empty() {
        state
            .registry
            .add_users(
                actor,
                &TeamUsers {
                    scope: org.to_string(),
                    team_name: form.team_name.clone(),
                    users: members,
                },
            )
            .await?;
    }

    Ok(())
}

/// Create a team in an org
///
/// **POST /org/{org}/team**
///
/// Form fields: `team-name`, `description`, and `member` repeated per user.
/// Redirects to the new team's page on success.
pub async fn add_team_to_org(
    ctx: RequestContext,
    State(state): State<TeamsState>,
    Path(org): Path<String>,
    Form(form): Form<AddTeamForm>,
) -> Response {
    if !ctx.features.org_billing {
        return found(ORG_LISTING_PATH);
    }

    if let Some(response) = check_names(&state, &org, &form.team_name).await {
        return response;
    }

    match create_team_with_members(&state, ctx.user_name(), &org, &form).await {
        Ok(()) => {
            tracing::info!(org = %org, team = %form.team_name, "Team created");
            found(&team_path(&org, &form.team_name))
        }
        Err(e) => dispatch_error(&state, e, ORG_LISTING_PATH).await,
    }
}

/// Show a team with its members and packages
///
/// **GET /org/{org}/team/{team_name}**
pub async fn show_team(
    ctx: RequestContext,
    State(state): State<TeamsState>,
    Path((org, team_name)): Path<(String, String)>,
    Query(query): Query<NoticeQuery>,
) -> Response {
    if !ctx.features.org_billing {
        return found(ORG_LISTING_PATH);
    }

    if let Some(response) = check_names(&state, &org, &team_name).await {
        return response;
    }

    let team = match state
        .registry
        .get_team(ctx.user_name(), &org, &team_name)
        .await
    {
        Ok(team) => team,
        Err(e) => return dispatch_error(&state, e.into(), &org_path(&org)).await,
    };

    let notices = take_notices(&state, query.notice.as_deref()).await;
    render(
        &state,
        StatusCode::OK,
        View::ShowTeam(team_page(team, &org, notices)),
    )
}

/// Apply one package change to a team.
async fn apply_update(
    state: &TeamsState,
    actor: Option<&str>,
    org: &str,
    team: &str,
    update: TeamUpdate,
) -> Result<()> {
    match update {
        TeamUpdate::SetPermission {
            package,
            permission,
        } => {
            state
                .registry
                .add_package(
                    actor,
                    &PackageGrant {
                        scope: org.to_string(),
                        team: team.to_string(),
                        package,
                        permissions: permission,
                    },
                )
                .await?
        }
        TeamUpdate::RemovePackage { package } => {
            state
                .registry
                .remove_package(
                    actor,
                    &PackageRevoke {
                        scope: org.to_string(),
                        team: team.to_string(),
                        package,
                    },
                )
                .await?
        }
    }
    Ok(())
}

/// Change a team's package permissions
///
/// **POST /org/{org}/team/{team_name}**
///
/// Form fields: `updateType` (`updateWritePermissions` or `removePackage`),
/// `name` (the package), and `writePermission` (`"on"` for write access).
pub async fn update_team(
    ctx: RequestContext,
    State(state): State<TeamsState>,
    Path((org, team_name)): Path<(String, String)>,
    Form(form): Form<UpdateTeamForm>,
) -> Response {
    if !ctx.features.org_billing {
        return found(ORG_LISTING_PATH);
    }

    if let Some(response) = check_names(&state, &org, &team_name).await {
        return response;
    }

    let target = team_path(&org, &team_name);
    let update = match TeamUpdate::from_form(&form) {
        Ok(update) => update,
        Err(e) => return dispatch_error(&state, e, &target).await,
    };

    match apply_update(&state, ctx.user_name(), &org, &team_name, update).await {
        Ok(()) => found(&target),
        Err(e) => dispatch_error(&state, e, &target).await,
    }
}

/// Placeholder for the team members page
///
/// **GET /org/{org}/team/{team_name}/members**
pub async fn show_team_members() -> StatusCode {
    StatusCode::OK
}
