//! Validation helpers and constants for API handlers

use regex::Regex;
use thiserror::Error;

/// Longest accepted org or team name
pub const MAX_IDENTIFIER_LENGTH: usize = 214;

lazy_static::lazy_static! {
    /// Characters that survive URL component encoding unchanged
    pub static ref URL_SAFE_REGEX: Regex =
        Regex::new(r"^[a-z0-9\-_.!~*'()]+$").unwrap();
}

/// Why a name was rejected
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("Name cannot be empty")]
    Empty,

    #[error("Name must be lowercase")]
    NotLowercase,

    #[error("Name may not contain non-url-safe chars")]
    NotUrlSafe,

    #[error("Name may not start with \".\"")]
    LeadingDot,

    #[error("Name may not be longer than 214 characters")]
    TooLong,
}

/// Validate an org or team name with the registry's user-name rules
pub fn validate_identifier(name: &str) -> Result<(), IdentifierError> {
    if name.is_empty() {
        return Err(IdentifierError::Empty);
    }
    if name != name.to_lowercase() {
        return Err(IdentifierError::NotLowercase);
    }
    if !URL_SAFE_REGEX.is_match(name) {
        return Err(IdentifierError::NotUrlSafe);
    }
    if name.starts_with('.') {
        return Err(IdentifierError::LeadingDot);
    }
    if name.len() > MAX_IDENTIFIER_LENGTH {
        return Err(IdentifierError::TooLong);
    }
    Ok(())
}

/// True when `name` cannot be used as an org or team name
pub fn is_invalid_identifier(name: &str) -> bool {
    validate_identifier(name).is_err()
}
