//! Repository for the `video_files` table.

use interviews_core::types::DbId;
use sqlx::PgPool;

use crate::models::video_file::{CreateVideoFile, VideoFile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, recording_id, file_path, width, height, file_size, \
    mime_type, bitrate, duration_secs, deleted_at, created_at, updated_at";

pub struct VideoFileRepo;

impl VideoFileRepo {
    /// Register a video file for a recording.
    ///
    /// Fails with a unique violation (`uq_video_files_live_recording`) if the
    /// recording already has a live video file.
    pub async fn create(pool: &PgPool, input: &CreateVideoFile) -> Result<VideoFile, sqlx::Error> {
        let query = format!(
            "INSERT INTO video_files
                (recording_id, file_path, width, height, file_size, mime_type,
                 bitrate, duration_secs)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'video/mp4'), $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VideoFile>(&query)
            .bind(input.recording_id)
            .bind(&input.file_path)
            .bind(input.width)
            .bind(input.height)
            .bind(input.file_size)
            .bind(&input.mime_type)
            .bind(input.bitrate)
            .bind(input.duration_secs)
            .fetch_one(pool)
            .await
    }

    /// Find the live video file of a recording. Excludes soft-deleted rows.
    pub async fn find_by_recording(
        pool: &PgPool,
        recording_id: DbId,
    ) -> Result<Option<VideoFile>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM video_files
             WHERE recording_id = $1 AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, VideoFile>(&query)
            .bind(recording_id)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete the live video file of a recording.
    ///
    /// Returns `true` if a row was marked deleted.
    pub async fn soft_delete_by_recording(
        pool: &PgPool,
        recording_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE video_files SET deleted_at = NOW() \
             WHERE recording_id = $1 AND deleted_at IS NULL",
        )
        .bind(recording_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete every video file row of a recording, live or
    /// soft-deleted. Returns the removed rows so their files can be cleaned up.
    pub async fn hard_delete_by_recording(
        pool: &PgPool,
        recording_id: DbId,
    ) -> Result<Vec<VideoFile>, sqlx::Error> {
        let query = format!("DELETE FROM video_files WHERE recording_id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, VideoFile>(&query)
            .bind(recording_id)
            .fetch_all(pool)
            .await
    }
}
