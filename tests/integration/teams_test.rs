//! Org team page integration tests
//!
//! Drives the full router (session middleware included) against the mock
//! registry and notice store.

#![allow(dead_code)]

mod common;
mod teams;
