//! Domain logic for Interviews.tv media delivery.
//!
//! Everything here is pure: no database access and no file I/O. The `db`
//! and `api` crates build on these types.

pub mod byte_range;
pub mod error;
pub mod media_path;
pub mod processing;
pub mod quality;
pub mod roles;
pub mod types;
