//! Form payloads and view models for the team pages

use orgweb_common::Error;
use orgweb_notices::Notice;
use orgweb_registry::{Permission, Team};
use orgweb_views::{MemberItem, PackageItem, TeamPage};
use serde::Deserialize;
use validator::Validate;

/// Message for a package name that is missing or too long
pub const INVALID_PACKAGE_NAME: &str = "Invalid Package Name.";

/// Form posted by the "add team" page.
///
/// `member` may appear zero, one or many times.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddTeamForm {
    #[serde(rename = "team-name", default)]
    pub team_name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub member: Vec<String>,
}

impl AddTeamForm {
    /// Member names, trimmed, blanks dropped, in submitted order
    pub fn members(&self) -> Vec<String> {
        normalize_members(&self.member)
    }

    /// Description, or `None` when left blank
    pub fn description(&self) -> Option<String> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string)
    }
}

/// Coerce a zero-or-many field into an ordered list of non-blank names
pub fn normalize_members<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    raw.iter()
        .map(|m| m.as_ref().trim())
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}

/// Form posted by the package rows on the team page
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTeamForm {
    #[serde(rename = "updateType", default)]
    pub update_type: String,

    /// Package name
    #[serde(default)]
    #[validate(length(min = 1, max = 214))]
    pub name: String,

    /// Checkbox value; browsers send "on" when ticked and nothing otherwise
    #[serde(rename = "writePermission", default)]
    pub write_permission: Option<String>,
}

/// The single mutation an update form asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamUpdate {
    SetPermission {
        package: String,
        permission: Permission,
    },
    RemovePackage {
        package: String,
    },
}

impl TeamUpdate {
    /// Decode the form's `updateType` discriminator.
    ///
    /// An unknown discriminator means the page and the handler disagree, so it
    /// is an internal error rather than something the user can fix.
    pub fn from_form(form: &UpdateTeamForm) -> Result<Self, Error> {
        let update = match form.update_type.as_str() {
            "updateWritePermissions" => TeamUpdate::SetPermission {
                package: form.name.clone(),
                permission: permission_from_checkbox(form.write_permission.as_deref()),
            },
            "removePackage" => TeamUpdate::RemovePackage {
                package: form.name.clone(),
            },
            other => {
                return Err(Error::Internal(format!("no update method: {:?}", other)));
            }
        };

        form.validate()
            .map_err(|_| Error::Validation(INVALID_PACKAGE_NAME.to_string()))?;

        Ok(update)
    }
}

/// `"on"` grants write; anything else, including absence, means read
pub fn permission_from_checkbox(value: Option<&str>) -> Permission {
    match value {
        Some("on") => Permission::Write,
        _ => Permission::Read,
    }
}

/// Build the team page model, flagging packages the team can write
pub fn team_page(team: Team, org_name: &str, notices: Vec<Notice>) -> TeamPage {
    let members = team
        .users
        .items
        .into_iter()
        .map(|user| MemberItem { name: user.name })
        .collect();

    let packages = team
        .packages
        .items
        .into_iter()
        .map(|pkg| PackageItem {
            can_write: (pkg.permission == Permission::Write).then_some(true),
            permission: pkg.permission.to_string(),
            name: pkg.name,
        })
        .collect();

    TeamPage {
        team_name: team.name,
        description: team.description,
        org_name: org_name.to_string(),
        members,
        packages,
        notices,
    }
}
