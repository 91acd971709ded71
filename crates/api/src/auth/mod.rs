//! Authentication primitives.
//!
//! - [`jwt`] -- JWT access-token validation (and generation for trusted
//!   issuers and tests).
//!
//! Login and session management live in the account service; this server
//! only verifies the access tokens that service signs.

pub mod jwt;
