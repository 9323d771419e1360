//! Bearer-token primitives.
//!
//! - [`jwt`] -- JWT access-token validation, plus token generation for
//!   tooling and tests (login itself lives outside this service).

pub mod jwt;
