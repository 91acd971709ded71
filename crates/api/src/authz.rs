//! Authorization capability shared by every handler.
//!
//! Two primitives, composed per endpoint:
//!
//! - [`is_owner`] -- exact owner-id match against `interview_recordings`.
//!   There is no role override here.
//! - [`has_role`] -- exact role-name comparison.
//!
//! Raw media (streams and the quality ladder) uses [`ensure_owner`].
//! Metadata and deletion use [`ensure_owner_or_admin`].

use interviews_core::error::CoreError;
use interviews_core::roles::ROLE_ADMIN;
use interviews_core::types::DbId;
use interviews_db::repositories::RecordingRepo;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;

/// Returns `true` iff `user` owns the recording.
///
/// A recording that does not exist is simply not owned; only a database
/// failure is an error.
pub async fn is_owner(
    pool: &PgPool,
    user: &AuthUser,
    recording_id: DbId,
) -> Result<bool, sqlx::Error> {
    let owner = RecordingRepo::find_owner_id(pool, recording_id).await?;
    Ok(owner == Some(user.user_id))
}

/// Returns `true` iff `user` carries exactly `role`.
pub fn has_role(user: &AuthUser, role: &str) -> bool {
    user.role == role
}

/// Reject with 403 unless `user` owns the recording.
pub async fn ensure_owner(pool: &PgPool, user: &AuthUser, recording_id: DbId) -> AppResult<()> {
    if is_owner(pool, user, recording_id).await? {
        return Ok(());
    }
    tracing::warn!(
        user_id = user.user_id,
        recording_id,
        "Denied access to recording media"
    );
    Err(forbidden())
}

/// Reject with 403 unless `user` owns the recording or is an admin.
pub async fn ensure_owner_or_admin(
    pool: &PgPool,
    user: &AuthUser,
    recording_id: DbId,
) -> AppResult<()> {
    if has_role(user, ROLE_ADMIN) || is_owner(pool, user, recording_id).await? {
        return Ok(());
    }
    tracing::warn!(
        user_id = user.user_id,
        recording_id,
        "Denied access to recording"
    );
    Err(forbidden())
}

fn forbidden() -> AppError {
    AppError::Core(CoreError::Forbidden(
        "You do not have access to this recording".into(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: &str) -> AuthUser {
        AuthUser {
            user_id: 7,
            role: role.to_string(),
        }
    }

    #[test]
    fn has_role_is_exact() {
        assert!(has_role(&user("admin"), ROLE_ADMIN));
        assert!(!has_role(&user("Admin"), ROLE_ADMIN));
        assert!(!has_role(&user("user"), ROLE_ADMIN));
    }
}
