//! Video processing queue entity model and DTOs.

use interviews_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `video_processing_queue` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProcessingQueueEntry {
    pub id: DbId,
    pub recording_id: DbId,
    pub processing_type: String,
    pub status: String,
    /// Path of the job's output relative to the storage root.
    pub output_path: Option<String>,
    pub processing_params: serde_json::Value,
    pub error_message: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for enqueuing (or recording the outcome of) a processing job.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProcessingQueueEntry {
    pub recording_id: DbId,
    pub processing_type: String,
    /// Defaults to `pending` when `None`.
    pub status: Option<String>,
    pub output_path: Option<String>,
    /// Defaults to `{}` when `None`.
    pub processing_params: Option<serde_json::Value>,
}
