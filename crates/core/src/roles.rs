//! Well-known role name constants.
//!
//! Role names are carried in the `role` claim of access tokens.

pub const ROLE_ADMIN: &str = "admin";
