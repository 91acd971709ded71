//! Video file entity model and DTOs.

use interviews_core::media_path::stream_url;
use interviews_core::quality::quality_for_height;
use interviews_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `video_files` table: the original upload of a recording.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VideoFile {
    pub id: DbId,
    pub recording_id: DbId,
    /// Path relative to the storage root.
    pub file_path: String,
    pub width: i32,
    pub height: i32,
    pub file_size: i64,
    pub mime_type: String,
    pub bitrate: Option<i64>,
    pub duration_secs: Option<f64>,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering an uploaded video file.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVideoFile {
    pub recording_id: DbId,
    pub file_path: String,
    pub width: i32,
    pub height: i32,
    pub file_size: i64,
    /// Defaults to `video/mp4` when `None`.
    pub mime_type: Option<String>,
    pub bitrate: Option<i64>,
    pub duration_secs: Option<f64>,
}

/// Client-facing view of a video file, computed on demand rather than
/// stored. The storage path is only exposed as an opaque stream URL.
#[derive(Debug, Clone, Serialize)]
pub struct VideoFileMetadata {
    pub id: DbId,
    pub recording_id: DbId,
    pub width: i32,
    pub height: i32,
    pub file_size: i64,
    pub mime_type: String,
    pub bitrate: Option<i64>,
    pub duration_secs: Option<f64>,
    /// Quality label derived from `height`.
    pub quality: String,
    pub stream_url: String,
    pub created_at: Timestamp,
}

impl From<&VideoFile> for VideoFileMetadata {
    fn from(file: &VideoFile) -> Self {
        Self {
            id: file.id,
            recording_id: file.recording_id,
            width: file.width,
            height: file.height,
            file_size: file.file_size,
            mime_type: file.mime_type.clone(),
            bitrate: file.bitrate,
            duration_secs: file.duration_secs,
            quality: quality_for_height(file.height).to_string(),
            stream_url: stream_url(&file.file_path),
            created_at: file.created_at,
        }
    }
}
