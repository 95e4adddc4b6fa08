//! Mock Registry Service Implementation
//!
//! In-memory registry for tests and local development:
//! - seeded orgs and teams, mutated by the write operations
//! - per-operation failure injection
//! - a call history for ordering assertions

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::{
    Collection, NewTeam, Org, PackageGrant, PackageRevoke, RegistryError, RegistryService, Team,
    TeamMember, TeamPackage, TeamUsers,
};

/// Registry operations, used to target failures and inspect call order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryOperation {
    GetOrg,
    AddTeam,
    GetTeam,
    AddUsers,
    AddPackage,
    RemovePackage,
}

/// A recorded registry call for test assertions
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    GetOrg {
        actor: Option<String>,
        org: String,
    },
    AddTeam {
        actor: Option<String>,
        team: NewTeam,
    },
    GetTeam {
        actor: Option<String>,
        scope: String,
        team: String,
    },
    AddUsers {
        actor: Option<String>,
        users: TeamUsers,
    },
    AddPackage {
        actor: Option<String>,
        grant: PackageGrant,
    },
    RemovePackage {
        actor: Option<String>,
        revoke: PackageRevoke,
    },
}

impl RecordedCall {
    pub fn operation(&self) -> RegistryOperation {
        match self {
            RecordedCall::GetOrg { .. } => RegistryOperation::GetOrg,
            RecordedCall::AddTeam { .. } => RegistryOperation::AddTeam,
            RecordedCall::GetTeam { .. } => RegistryOperation::GetTeam,
            RecordedCall::AddUsers { .. } => RegistryOperation::AddUsers,
            RecordedCall::AddPackage { .. } => RegistryOperation::AddPackage,
            RecordedCall::RemovePackage { .. } => RegistryOperation::RemovePackage,
        }
    }
}

#[derive(Debug, Default)]
struct MockRegistryState {
    orgs: HashMap<String, Org>,
    teams: HashMap<(String, String), Team>,
    failures: HashMap<RegistryOperation, RegistryError>,
    history: Vec<RecordedCall>,
}

/// Mock registry service with programmable failures
#[derive(Debug, Clone, Default)]
pub struct MockRegistryService {
    state: Arc<Mutex<MockRegistryState>>,
}

impl MockRegistryService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an org
    pub fn insert_org(&self, org: Org) {
        let mut state = self.state.lock().unwrap();
        state.orgs.insert(org.name.clone(), org);
    }

    /// Seed a team under `scope`
    pub fn insert_team(&self, scope: &str, team: Team) {
        let mut state = self.state.lock().unwrap();
        state
            .teams
            .insert((scope.to_string(), team.name.clone()), team);
    }

    /// Make every call of `operation` fail with `error` until cleared
    pub fn fail_on(&self, operation: RegistryOperation, error: RegistryError) {
        self.state.lock().unwrap().failures.insert(operation, error);
    }

    pub fn clear_failures(&self) {
        self.state.lock().unwrap().failures.clear();
    }

    /// Current state of a team, if it exists
    pub fn team(&self, scope: &str, name: &str) -> Option<Team> {
        self.state
            .lock()
            .unwrap()
            .teams
            .get(&(scope.to_string(), name.to_string()))
            .cloned()
    }

    /// Get recorded calls in the order they were made
    pub fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().history.clone()
    }

    /// Operations in call order
    pub fn operations(&self) -> Vec<RegistryOperation> {
        self.recorded_calls()
            .iter()
            .map(RecordedCall::operation)
            .collect()
    }

    /// Record a call, then return the injected failure for it, if any
    fn record(&self, call: RecordedCall) -> Result<(), RegistryError> {
        let mut state = self.state.lock().unwrap();
        let operation = call.operation();
        state.history.push(call);
        match state.failures.get(&operation) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

fn team_not_found() -> RegistryError {
    RegistryError::status(404, "Team not found")
}

#[async_trait::async_trait]
impl RegistryService for MockRegistryService {
    async fn get_org(&self, actor: Option<&str>, org: &str) -> Result<Org, RegistryError> {
        self.record(RecordedCall::GetOrg {
            actor: actor.map(str::to_string),
            org: org.to_string(),
        })?;

        let state = self.state.lock().unwrap();
        state
            .orgs
            .get(org)
            .cloned()
            .ok_or_else(|| RegistryError::status(404, "Org not found"))
    }

    async fn add_team(&self, actor: Option<&str>, team: &NewTeam) -> Result<(), RegistryError> {
        self.record(RecordedCall::AddTeam {
            actor: actor.map(str::to_string),
            team: team.clone(),
        })?;

        let mut state = self.state.lock().unwrap();
        if !state.orgs.contains_key(&team.org_scope) {
            return Err(RegistryError::status(404, "Org not found"));
        }
        let key = (team.org_scope.clone(), team.team_name.clone());
        if state.teams.contains_key(&key) {
            return Err(RegistryError::status(409, "Team already exists"));
        }
        state.teams.insert(
            key,
            Team {
                name: team.team_name.clone(),
                description: team.description.clone(),
                users: Collection::default(),
                packages: Collection::default(),
            },
        );
        Ok(())
    }

    async fn get_team(
        &self,
        actor: Option<&str>,
        scope: &str,
        team: &str,
    ) -> Result<Team, RegistryError> {
        self.record(RecordedCall::GetTeam {
            actor: actor.map(str::to_string),
            scope: scope.to_string(),
            team: team.to_string(),
        })?;

        let state = self.state.lock().unwrap();
        state
            .teams
            .get(&(scope.to_string(), team.to_string()))
            .cloned()
            .ok_or_else(team_not_found)
    }

    async fn add_users(
        &self,
        actor: Option<&str>,
        users: &TeamUsers,
    ) -> Result<(), RegistryError> {
        self.record(RecordedCall::AddUsers {
            actor: actor.map(str::to_string),
            users: users.clone(),
        })?;

        let mut state = self.state.lock().unwrap();
        let team = state
            .teams
            .get_mut(&(users.scope.clone(), users.team_name.clone()))
            .ok_or_else(team_not_found)?;
        for user in &users.users {
            if !team.users.iter().any(|m| &m.name == user) {
                team.users.push(TeamMember { name: user.clone() });
            }
        }
        Ok(())
    }

    async fn add_package(
        &self,
        actor: Option<&str>,
        grant: &PackageGrant,
    ) -> Result<(), RegistryError> {
        self.record(RecordedCall::AddPackage {
            actor: actor.map(str::to_string),
            grant: grant.clone(),
        })?;

        let mut state = self.state.lock().unwrap();
        let team = state
            .teams
            .get_mut(&(grant.scope.clone(), grant.team.clone()))
            .ok_or_else(team_not_found)?;
        team.packages.retain(|p| p.name != grant.package);
        team.packages.push(TeamPackage {
            name: grant.package.clone(),
            permission: grant.permissions,
        });
        Ok(())
    }

    async fn remove_package(
        &self,
        actor: Option<&str>,
        revoke: &PackageRevoke,
    ) -> Result<(), RegistryError> {
        self.record(RecordedCall::RemovePackage {
            actor: actor.map(str::to_string),
            revoke: revoke.clone(),
        })?;

        let mut state = self.state.lock().unwrap();
        let team = state
            .teams
            .get_mut(&(revoke.scope.clone(), revoke.team.clone()))
            .ok_or_else(team_not_found)?;
        if !team.packages.iter().any(|p| p.name == revoke.package) {
            return Err(RegistryError::status(404, "Package not found in team"));
        }
        team.packages.retain(|p| p.name != revoke.package);
        Ok(())
    }
}
