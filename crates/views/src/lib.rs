//! Orgweb Views
//!
//! Typed page models for every page the handlers render, and the
//! [`ViewRenderer`] seam that turns them into HTML.

pub mod mock;
pub mod templates;

use orgweb_notices::Notice;
use serde::Serialize;
use thiserror::Error;

pub use templates::HtmlRenderer;

#[derive(Error, Debug)]
pub enum ViewError {
    #[error("Template error: {0}")]
    Template(String),

    #[error("View serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Data for the "add team" form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddTeamPage {
    pub org: String,
    pub notices: Vec<Notice>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberItem {
    pub name: String,
}

/// A package row on the team page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageItem {
    pub name: String,
    pub permission: String,
    /// Only set for packages the team can publish
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_write: Option<bool>,
}

/// Data for the team detail page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamPage {
    pub team_name: String,
    pub description: Option<String>,
    pub org_name: String,
    pub members: Vec<MemberItem>,
    pub packages: Vec<PackageItem>,
    pub notices: Vec<Notice>,
}

/// A page to render, tagged by template
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    NotFound,
    InternalError,
    AddTeam(AddTeamPage),
    ShowTeam(TeamPage),
}

impl View {
    /// Template name
    pub fn name(&self) -> &'static str {
        match self {
            View::NotFound => "errors/not-found",
            View::InternalError => "errors/internal",
            View::AddTeam(_) => "org/add-team",
            View::ShowTeam(_) => "team/show",
        }
    }

    /// The page data as a JSON data bag
    pub fn context(&self) -> Result<serde_json::Value, ViewError> {
        let value = match self {
            View::NotFound | View::InternalError => serde_json::json!({}),
            View::AddTeam(page) => serde_json::to_value(page)?,
            View::ShowTeam(page) => serde_json::to_value(page)?,
        };
        Ok(value)
    }
}

/// Renders views to HTML
pub trait ViewRenderer: Send + Sync {
    fn render(&self, view: &View) -> Result<String, ViewError>;
}
