//! Teams domain layer: entities, authorization, validation

pub mod auth;
pub mod entities;
pub mod validation;
