//! Repository for the `interview_recordings` table.

use interviews_core::types::DbId;
use sqlx::PgPool;

use crate::models::recording::{CreateRecording, Recording};

const COLUMNS: &str = "id, user_id, title, created_at, updated_at";

pub struct RecordingRepo;

impl RecordingRepo {
    /// Insert a new recording.
    pub async fn create(pool: &PgPool, input: &CreateRecording) -> Result<Recording, sqlx::Error> {
        let query = format!(
            "INSERT INTO interview_recordings (user_id, title)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Recording>(&query)
            .bind(input.user_id)
            .bind(&input.title)
            .fetch_one(pool)
            .await
    }

    /// Find a recording by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Recording>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM interview_recordings WHERE id = $1");
        sqlx::query_as::<_, Recording>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Look up only the owning user of a recording.
    ///
    /// Returns `None` if the recording does not exist.
    pub async fn find_owner_id(pool: &PgPool, id: DbId) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT user_id FROM interview_recordings WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
