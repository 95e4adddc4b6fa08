//! API layer for the Teams domain
//!
//! Contains HTTP handlers, routes, response dispatch and domain state.

pub mod dispatch;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::TeamsState;
pub use routes::routes;
