//! Teams domain: org team pages, team creation, package permissions

pub mod api;
pub mod domain;

// Re-export domain types at the crate root for convenience
pub use domain::auth::is_org_admin;
pub use domain::entities::*;
pub use domain::validation::{is_invalid_identifier, validate_identifier, IdentifierError};

// Re-export API types
pub use api::routes;
pub use api::TeamsState;
