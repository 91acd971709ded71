//! Repository for the `video_processing_queue` table.

use interviews_core::processing::{PROCESSING_TYPE_COMPRESSION, STATUS_COMPLETED, STATUS_PENDING};
use interviews_core::types::DbId;
use sqlx::PgPool;

use crate::models::processing_queue::{CreateProcessingQueueEntry, ProcessingQueueEntry};

const COLUMNS: &str = "id, recording_id, processing_type, status, output_path, \
    processing_params, error_message, created_at, updated_at";

pub struct ProcessingQueueRepo;

impl ProcessingQueueRepo {
    /// Insert a processing queue entry.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProcessingQueueEntry,
    ) -> Result<ProcessingQueueEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO video_processing_queue
                (recording_id, processing_type, status, output_path, processing_params)
             VALUES ($1, $2, COALESCE($3, '{STATUS_PENDING}'), $4, COALESCE($5, '{{}}'::jsonb))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProcessingQueueEntry>(&query)
            .bind(input.recording_id)
            .bind(&input.processing_type)
            .bind(&input.status)
            .bind(&input.output_path)
            .bind(&input.processing_params)
            .fetch_one(pool)
            .await
    }

    /// List completed compression jobs of a recording, most recent first.
    pub async fn list_completed_compressions(
        pool: &PgPool,
        recording_id: DbId,
    ) -> Result<Vec<ProcessingQueueEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM video_processing_queue
             WHERE recording_id = $1 AND processing_type = $2 AND status = $3
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, ProcessingQueueEntry>(&query)
            .bind(recording_id)
            .bind(PROCESSING_TYPE_COMPRESSION)
            .bind(STATUS_COMPLETED)
            .fetch_all(pool)
            .await
    }
}
