//! Team pages: create, show, update, members

use axum::http::StatusCode;
use orgweb_notices::Notice;
use orgweb_registry::{
    mock::{RecordedCall, RegistryOperation},
    NewTeam, PackageGrant, PackageRevoke, Permission, RegistryError, TeamUsers,
};

use crate::common::{assert_redirect, body_text, location, TestApp};

// ---------------------------------------------------------------------------
// Feature flag and health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new();
    let response = app.get("/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "OK");
}

#[tokio::test]
async fn test_feature_off_redirects_every_page_to_org_listing() {
    let app = TestApp::with_feature(false);
    app.registry.insert_org(crate::common::acme_org());

    assert_redirect(&app.get("/org/acme/team", Some("bob")).await, "/org");
    assert_redirect(
        &app.post_form("/org/acme/team", Some("bob"), "team-name=eng")
            .await,
        "/org",
    );
    assert_redirect(&app.get("/org/acme/team/eng", Some("bob")).await, "/org");
    assert_redirect(
        &app.post_form(
            "/org/acme/team/eng",
            Some("bob"),
            "updateType=removePackage&name=%40acme%2Fweb",
        )
        .await,
        "/org",
    );
    assert!(app.registry.recorded_calls().is_empty());
}

// ---------------------------------------------------------------------------
// GET /org/{org}/team
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_team_creation_page_for_admin() {
    let app = TestApp::seeded();
    let response = app.get("/org/acme/team", Some("bob")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("action=\"/org/acme/team\""));
    assert!(html.contains("name=\"team-name\""));
    assert_eq!(
        app.registry.recorded_calls(),
        vec![RecordedCall::GetOrg {
            actor: Some("bob".to_string()),
            org: "acme".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_team_creation_page_denies_non_admin() {
    let app = TestApp::seeded();
    let response = app.get("/org/acme/team", Some("carl")).await;

    assert_eq!(
        app.redirect_notices(&response, "/org/acme").await,
        vec![Notice::error("You do not have access to that page")]
    );
}

#[tokio::test]
async fn test_team_creation_page_denies_anonymous_user() {
    let app = TestApp::seeded();
    let response = app.get("/org/acme/team", None).await;

    assert_eq!(
        app.redirect_notices(&response, "/org/acme").await,
        vec![Notice::error("You do not have access to that page")]
    );
    assert_eq!(
        app.registry.recorded_calls(),
        vec![RecordedCall::GetOrg {
            actor: None,
            org: "acme".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_team_creation_page_invalid_org_is_not_found() {
    let app = TestApp::seeded();
    let response = app.get("/org/Acme/team", Some("bob")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Not Found"));
    assert!(app.registry.recorded_calls().is_empty());
}

#[tokio::test]
async fn test_team_creation_page_unknown_org_is_not_found() {
    let app = TestApp::seeded();
    let response = app.get("/org/globex/team", Some("bob")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_team_creation_page_registry_failure_is_internal_error() {
    let app = TestApp::seeded();
    app.registry.fail_on(
        RegistryOperation::GetOrg,
        RegistryError::status(503, "down for maintenance"),
    );

    let response = app.get("/org/acme/team", Some("bob")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(location(&response).is_empty());
    assert!(body_text(response).await.contains("Something went wrong"));
}

#[tokio::test]
async fn test_team_creation_page_shows_pending_notice() {
    let app = TestApp::seeded();
    let denied = app
        .post_form("/org/acme/team", Some("bob"), "team-name=eng")
        .await;
    let token = location(&denied)
        .strip_prefix("/org?notice=")
        .unwrap()
        .to_string();

    let response = app
        .get(&format!("/org/acme/team?notice={}", token), Some("bob"))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Team already exists"));
}

// ---------------------------------------------------------------------------
// POST /org/{org}/team
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_add_team_with_members() {
    let app = TestApp::seeded();
    let response = app
        .post_form(
            "/org/acme/team",
            Some("bob"),
            "team-name=web&description=Web+folks&member=alice&member=carl",
        )
        .await;

    assert_redirect(&response, "/org/acme/team/web");
    assert_eq!(
        app.registry.recorded_calls(),
        vec![
            RecordedCall::GetOrg {
                actor: Some("bob".to_string()),
                org: "acme".to_string(),
            },
            RecordedCall::AddTeam {
                actor: Some("bob".to_string()),
                team: NewTeam {
                    org_scope: "acme".to_string(),
                    team_name: "web".to_string(),
                    description: Some("Web folks".to_string()),
                },
            },
            RecordedCall::AddUsers {
                actor: Some("bob".to_string()),
                users: TeamUsers {
                    scope: "acme".to_string(),
                    team_name: "web".to_string(),
                    users: vec!["alice".to_string(), "carl".to_string()],
                },
            },
        ]
    );

    let team = app.registry.team("acme", "web").unwrap();
    assert_eq!(team.users.count, 2);
}

#[tokio::test]
async fn test_add_team_with_single_member() {
    let app = TestApp::seeded();
    let response = app
        .post_form("/org/acme/team", Some("bob"), "team-name=web&member=alice")
        .await;

    assert_redirect(&response, "/org/acme/team/web");
    let team = app.registry.team("acme", "web").unwrap();
    assert_eq!(team.users.items[0].name, "alice");
}

#[tokio::test]
async fn test_add_team_without_members_skips_add_users() {
    let app = TestApp::seeded();
    let response = app
        .post_form("/org/acme/team", Some("bob"), "team-name=web&description=")
        .await;

    assert_redirect(&response, "/org/acme/team/web");
    assert_eq!(
        app.registry.operations(),
        vec![RegistryOperation::GetOrg, RegistryOperation::AddTeam]
    );
    assert_eq!(app.registry.team("acme", "web").unwrap().description, None);
}

#[tokio::test]
async fn test_add_team_invalid_team_name_makes_no_registry_calls() {
    let app = TestApp::seeded();
    let response = app
        .post_form("/org/acme/team", Some("bob"), "team-name=Web+Team")
        .await;

    assert_eq!(
        app.redirect_notices(&response, "/org/acme/team").await,
        vec![Notice::error("Invalid Team Name.")]
    );
    assert!(app.registry.recorded_calls().is_empty());
}

#[tokio::test]
async fn test_add_team_missing_team_name_is_invalid() {
    let app = TestApp::seeded();
    let response = app
        .post_form("/org/acme/team", Some("bob"), "member=alice")
        .await;

    assert_eq!(
        app.redirect_notices(&response, "/org/acme/team").await,
        vec![Notice::error("Invalid Team Name.")]
    );
    assert!(app.registry.recorded_calls().is_empty());
}

#[tokio::test]
async fn test_add_team_invalid_org_name_makes_no_registry_calls() {
    let app = TestApp::seeded();
    let response = app
        .post_form("/org/.acme/team", Some("bob"), "team-name=web")
        .await;

    assert_eq!(
        app.redirect_notices(&response, "/org").await,
        vec![Notice::error("Invalid Org Name.")]
    );
    assert!(app.registry.recorded_calls().is_empty());
}

#[tokio::test]
async fn test_add_team_conflict_redirects_with_registry_message() {
    let app = TestApp::seeded();
    let response = app
        .post_form("/org/acme/team", Some("bob"), "team-name=eng&member=alice")
        .await;

    assert_eq!(
        app.redirect_notices(&response, "/org").await,
        vec![Notice::error("Team already exists")]
    );
    assert_eq!(
        app.registry.operations(),
        vec![RegistryOperation::GetOrg, RegistryOperation::AddTeam]
    );
}

#[tokio::test]
async fn test_add_team_unknown_org_is_not_found() {
    let app = TestApp::seeded();
    let response = app
        .post_form("/org/globex/team", Some("bob"), "team-name=web")
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.registry.operations(), vec![RegistryOperation::GetOrg]);
}

#[tokio::test]
async fn test_add_team_server_failure_is_internal_error() {
    let app = TestApp::seeded();
    app.registry.fail_on(
        RegistryOperation::AddTeam,
        RegistryError::status(500, "database on fire"),
    );

    let response = app
        .post_form("/org/acme/team", Some("bob"), "team-name=web&member=alice")
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(location(&response).is_empty());
    assert_eq!(
        app.registry.operations(),
        vec![RegistryOperation::GetOrg, RegistryOperation::AddTeam]
    );
}

#[tokio::test]
async fn test_add_team_add_users_failure_reports_user_error() {
    let app = TestApp::seeded();
    app.registry.fail_on(
        RegistryOperation::AddUsers,
        RegistryError::status(400, "User not in org"),
    );

    let response = app
        .post_form("/org/acme/team", Some("bob"), "team-name=web&member=ghost")
        .await;

    assert_eq!(
        app.redirect_notices(&response, "/org").await,
        vec![Notice::error("User not in org")]
    );
    // The team itself was created before the member failure
    assert!(app.registry.team("acme", "web").is_some());
}

#[tokio::test]
async fn test_add_team_notice_save_failure_is_internal_error() {
    let app = TestApp::seeded();
    app.notices.set_fail_saves(true);

    let response = app
        .post_form("/org/acme/team", Some("bob"), "team-name=eng")
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(location(&response).is_empty());
}

// ---------------------------------------------------------------------------
// GET /org/{org}/team/{team_name}
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_show_team() {
    let app = TestApp::seeded();
    let response = app.get("/org/acme/team/eng", Some("bob")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("<h1>acme:eng</h1>"));
    assert!(html.contains("Engineering"));
    assert!(html.contains("<li>bob</li>"));
    assert!(html.contains("@acme/web"));
    assert!(html.contains("@acme/docs"));
    // Only the write package is ticked
    assert_eq!(html.matches(" checked>").count(), 1);
    assert_eq!(
        app.registry.recorded_calls(),
        vec![RecordedCall::GetTeam {
            actor: Some("bob".to_string()),
            scope: "acme".to_string(),
            team: "eng".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_show_team_unknown_team_is_not_found() {
    let app = TestApp::seeded();
    let response = app.get("/org/acme/team/sales", Some("bob")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_show_team_forbidden_redirects_to_org() {
    let app = TestApp::seeded();
    app.registry.fail_on(
        RegistryOperation::GetTeam,
        RegistryError::status(403, "Not a member of this org"),
    );

    let response = app.get("/org/acme/team/eng", Some("mallory")).await;
    assert_eq!(
        app.redirect_notices(&response, "/org/acme").await,
        vec![Notice::error("Not a member of this org")]
    );
}

#[tokio::test]
async fn test_show_team_bad_gateway_is_internal_error() {
    let app = TestApp::seeded();
    app.registry.fail_on(
        RegistryOperation::GetTeam,
        RegistryError::status(502, "Bad Gateway"),
    );

    let response = app.get("/org/acme/team/eng", Some("bob")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(location(&response).is_empty());
    assert!(body_text(response).await.contains("Something went wrong"));
    assert!(app.notices.saved_batches().is_empty());
}

#[tokio::test]
async fn test_show_team_invalid_team_name() {
    let app = TestApp::seeded();
    let response = app.get("/org/acme/team/ENG", Some("bob")).await;

    assert_eq!(
        app.redirect_notices(&response, "/org/acme/team").await,
        vec![Notice::error("Invalid Team Name.")]
    );
    assert!(app.registry.recorded_calls().is_empty());
}

#[tokio::test]
async fn test_show_team_notice_is_shown_once() {
    let app = TestApp::seeded();
    let failed = app
        .post_form("/org/acme/team/eng", Some("bob"), "updateType=removePackage")
        .await;
    let target = location(&failed);
    assert!(target.starts_with("/org/acme/team/eng?notice="));

    let first = body_text(app.get(&target, Some("bob")).await).await;
    assert!(first.contains("Invalid Package Name."));

    let second = body_text(app.get(&target, Some("bob")).await).await;
    assert!(!second.contains("Invalid Package Name."));
}

// ---------------------------------------------------------------------------
// POST /org/{org}/team/{team_name}
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_update_write_permission_checked_grants_write() {
    let app = TestApp::seeded();
    let response = app
        .post_form(
            "/org/acme/team/eng",
            Some("bob"),
            "updateType=updateWritePermissions&name=%40acme%2Fdocs&writePermission=on",
        )
        .await;

    assert_redirect(&response, "/org/acme/team/eng");
    assert_eq!(
        app.registry.recorded_calls(),
        vec![RecordedCall::AddPackage {
            actor: Some("bob".to_string()),
            grant: PackageGrant {
                scope: "acme".to_string(),
                team: "eng".to_string(),
                package: "@acme/docs".to_string(),
                permissions: Permission::Write,
            },
        }]
    );
}

#[tokio::test]
async fn test_update_write_permission_unchecked_grants_read() {
    let app = TestApp::seeded();
    let response = app
        .post_form(
            "/org/acme/team/eng",
            Some("bob"),
            "updateType=updateWritePermissions&name=%40acme%2Fweb",
        )
        .await;

    assert_redirect(&response, "/org/acme/team/eng");
    let team = app.registry.team("acme", "eng").unwrap();
    let web = team.packages.iter().find(|p| p.name == "@acme/web").unwrap();
    assert_eq!(web.permission, Permission::Read);
}

#[tokio::test]
async fn test_remove_package() {
    let app = TestApp::seeded();
    let response = app
        .post_form(
            "/org/acme/team/eng",
            Some("bob"),
            "updateType=removePackage&name=%40acme%2Fweb",
        )
        .await;

    assert_redirect(&response, "/org/acme/team/eng");
    assert_eq!(
        app.registry.recorded_calls(),
        vec![RecordedCall::RemovePackage {
            actor: Some("bob".to_string()),
            revoke: PackageRevoke {
                scope: "acme".to_string(),
                team: "eng".to_string(),
                package: "@acme/web".to_string(),
            },
        }]
    );
    assert_eq!(app.registry.team("acme", "eng").unwrap().packages.count, 1);
}

#[tokio::test]
async fn test_remove_unknown_package_is_not_found() {
    let app = TestApp::seeded();
    let response = app
        .post_form(
            "/org/acme/team/eng",
            Some("bob"),
            "updateType=removePackage&name=left-pad",
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_remove_package_transport_failure_is_internal_error() {
    let app = TestApp::seeded();
    app.registry.fail_on(
        RegistryOperation::RemovePackage,
        RegistryError::Request("connection reset".to_string()),
    );

    let response = app
        .post_form(
            "/org/acme/team/eng",
            Some("bob"),
            "updateType=removePackage&name=%40acme%2Fweb",
        )
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(location(&response).is_empty());
    assert!(body_text(response).await.contains("Something went wrong"));
    assert_eq!(
        app.registry.operations(),
        vec![RegistryOperation::RemovePackage]
    );
}

#[tokio::test]
async fn test_update_permission_denied_redirects_to_team_page() {
    let app = TestApp::seeded();
    app.registry.fail_on(
        RegistryOperation::AddPackage,
        RegistryError::status(401, "Unauthorized"),
    );

    let response = app
        .post_form(
            "/org/acme/team/eng",
            Some("carl"),
            "updateType=updateWritePermissions&name=%40acme%2Fweb&writePermission=on",
        )
        .await;

    assert_eq!(
        app.redirect_notices(&response, "/org/acme/team/eng").await,
        vec![Notice::error("Unauthorized")]
    );
}

#[tokio::test]
async fn test_unknown_update_type_is_internal_error() {
    let app = TestApp::seeded();
    let response = app
        .post_form(
            "/org/acme/team/eng",
            Some("bob"),
            "updateType=renameTeam&name=%40acme%2Fweb",
        )
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(location(&response).is_empty());
    assert!(app.registry.recorded_calls().is_empty());
}

#[tokio::test]
async fn test_update_missing_package_name_makes_no_registry_calls() {
    let app = TestApp::seeded();
    let response = app
        .post_form(
            "/org/acme/team/eng",
            Some("bob"),
            "updateType=updateWritePermissions&writePermission=on",
        )
        .await;

    assert_eq!(
        app.redirect_notices(&response, "/org/acme/team/eng").await,
        vec![Notice::error("Invalid Package Name.")]
    );
    assert!(app.registry.recorded_calls().is_empty());
}

#[tokio::test]
async fn test_update_invalid_org_name() {
    let app = TestApp::seeded();
    let response = app
        .post_form(
            "/org/ac%20me/team/eng",
            Some("bob"),
            "updateType=removePackage&name=%40acme%2Fweb",
        )
        .await;

    assert_eq!(
        app.redirect_notices(&response, "/org").await,
        vec![Notice::error("Invalid Org Name.")]
    );
    assert!(app.registry.recorded_calls().is_empty());
}

// ---------------------------------------------------------------------------
// GET /org/{org}/team/{team_name}/members
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_show_team_members_stub() {
    let app = TestApp::seeded();
    let response = app.get("/org/acme/team/eng/members", Some("bob")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.is_empty());
    assert!(app.registry.recorded_calls().is_empty());
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = TestApp::seeded();
    let response = app.get("/org/acme/teams", Some("bob")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
