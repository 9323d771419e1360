//! Authentication middleware.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`auth::require_auth`] -- Rejects any request without a valid token
//!   before it reaches a handler.

pub mod auth;
