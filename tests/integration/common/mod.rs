//! Common test utilities and fixtures for integration tests
//!
//! - `TestApp`: the real router wired to mock services
//! - request builders that set the logged-in user header
//! - org and team fixtures

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, Response, StatusCode},
    Router,
};
use orgweb_common::config::{Config, DEFAULT_USER_HEADER};
use orgweb_notices::{mock::MockNoticeService, Notice, NoticeService};
use orgweb_registry::{
    mock::MockRegistryService, Collection, Org, OrgMember, Permission, Team, TeamMember,
    TeamPackage,
};
use orgweb_teams::TeamsState;
use orgweb_views::HtmlRenderer;
use tower::ServiceExt;

/// Test application backed by mock services
pub struct TestApp {
    pub registry: MockRegistryService,
    pub notices: MockNoticeService,
    pub config: Config,
}

impl TestApp {
    /// App with the `org_billing` feature on
    pub fn new() -> Self {
        Self::with_feature(true)
    }

    pub fn with_feature(org_billing_enabled: bool) -> Self {
        Self {
            registry: MockRegistryService::new(),
            notices: MockNoticeService::new(),
            config: Config {
                org_billing_enabled,
                user_header: DEFAULT_USER_HEADER.to_string(),
                body_limit_bytes: 64 * 1024,
                rust_log: "orgweb=debug".to_string(),
                port: 0,
            },
        }
    }

    /// App seeded with the `acme` org (bob admin, carl developer) and its `eng` team
    pub fn seeded() -> Self {
        let app = Self::new();
        app.registry.insert_org(acme_org());
        app.registry.insert_team("acme", eng_team());
        app
    }

    pub fn router(&self) -> Router {
        let state = TeamsState {
            registry: Arc::new(self.registry.clone()),
            notices: Arc::new(self.notices.clone()),
            views: Arc::new(HtmlRenderer::default()),
        };
        orgweb_app::build_app(&self.config, state)
            .unwrap()
            .layer(orgweb_app::body_limit_layer(&self.config))
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, user: Option<&str>) -> Response<Body> {
        self.send(request(Method::GET, uri, user, None)).await
    }

    pub async fn post_form(&self, uri: &str, user: Option<&str>, form: &str) -> Response<Body> {
        self.send(request(Method::POST, uri, user, Some(form))).await
    }

    /// Notices behind the `?notice=` token of a redirect, consuming them
    pub async fn redirect_notices(&self, response: &Response<Body>, target: &str) -> Vec<Notice> {
        let location = location(response);
        let prefix = format!("{}?notice=", target);
        let token = location
            .strip_prefix(&prefix)
            .unwrap_or_else(|| panic!("expected redirect to {}, got {}", prefix, location));
        self.notices.take(token).await.unwrap()
    }
}

/// Build a request, optionally as a logged-in user and with a form body
pub fn request(method: Method, uri: &str, user: Option<&str>, form: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header(DEFAULT_USER_HEADER, user);
    }

    match form {
        Some(form) => builder
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn assert_redirect(response: &Response<Body>, target: &str) {
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(response), target);
}

pub fn acme_org() -> Org {
    Org {
        name: "acme".to_string(),
        description: Some("Acme Corp".to_string()),
        users: Collection::from_items(vec![
            OrgMember {
                name: "bob".to_string(),
                role: Some("super-admin".to_string()),
            },
            OrgMember {
                name: "carl".to_string(),
                role: Some("developer".to_string()),
            },
        ]),
    }
}

pub fn eng_team() -> Team {
    Team {
        name: "eng".to_string(),
        description: Some("Engineering".to_string()),
        users: Collection::from_items(vec![TeamMember {
            name: "bob".to_string(),
        }]),
        packages: Collection::from_items(vec![
            TeamPackage {
                name: "@acme/web".to_string(),
                permission: Permission::Write,
            },
            TeamPackage {
                name: "@acme/docs".to_string(),
                permission: Permission::Read,
            },
        ]),
    }
}
