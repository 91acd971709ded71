//! Interview recording entity model and DTOs.

use interviews_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `interview_recordings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Recording {
    pub id: DbId,
    /// The owning principal. Fixed at creation.
    pub user_id: DbId,
    pub title: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new recording.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRecording {
    pub user_id: DbId,
    pub title: Option<String>,
}
