//! Shared utilities, configuration, and error handling for Orgweb
//!
//! This crate provides common functionality used across the Orgweb application:
//! - Configuration management following 12-factor principles
//! - Error types and their HTTP classification
//! - Request session values (logged-in user, feature flags) set by upstream middleware

pub mod config;
pub mod error;
pub mod session;

pub use error::{Error, ErrorClass, Result};
pub use session::{Features, LoggedInUser, RequestContext};
