//! Wire types exchanged with the registry service

use serde::{Deserialize, Serialize};
use std::fmt;

/// A counted list, as the registry returns nested collections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection<T> {
    #[serde(default)]
    pub count: usize,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            count: 0,
            items: Vec::new(),
        }
    }
}

impl<T> Collection<T> {
    pub fn from_items(items: Vec<T>) -> Self {
        Self {
            count: items.len(),
            items,
        }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
        self.count = self.items.len();
    }

    pub fn retain(&mut self, f: impl FnMut(&T) -> bool) {
        self.items.retain(f);
        self.count = self.items.len();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Package permission granted to a team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Read,
    Write,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::Read => "read",
            Permission::Write => "write",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrgMember {
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Org {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub users: Collection<OrgMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamPackage {
    pub name: String,
    pub permission: Permission,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub users: Collection<TeamMember>,
    #[serde(default)]
    pub packages: Collection<TeamPackage>,
}

/// Parameters for creating a team under an org
#[derive(Debug, Clone, PartialEq)]
pub struct NewTeam {
    pub org_scope: String,
    pub team_name: String,
    pub description: Option<String>,
}

/// Parameters for adding users to a team
#[derive(Debug, Clone, PartialEq)]
pub struct TeamUsers {
    pub scope: String,
    pub team_name: String,
    pub users: Vec<String>,
}

/// Grant (or change) a team's permission on a package
#[derive(Debug, Clone, PartialEq)]
pub struct PackageGrant {
    pub scope: String,
    pub team: String,
    pub package: String,
    pub permissions: Permission,
}

/// Remove a package from a team
#[derive(Debug, Clone, PartialEq)]
pub struct PackageRevoke {
    pub scope: String,
    pub team: String,
    pub package: String,
}
