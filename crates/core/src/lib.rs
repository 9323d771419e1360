//! Shared domain primitives for the bizdesk workspace.
//!
//! Holds the types every other crate agrees on: identity and error types,
//! plus the required-field rules applied to incoming form data.

pub mod error;
pub mod types;
pub mod validation;
