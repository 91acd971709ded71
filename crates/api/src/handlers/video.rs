//! Handlers for the `/videos` resource.
//!
//! Provides byte-range streaming of recording media, the quality ladder
//! used by the player for adaptive selection, metadata lookup, and deletion.
//!
//! Media files are addressed by an opaque stream token (base64 of the
//! storage-relative path); recordings by their numeric id.

use axum::body::{Body, Bytes};
use axum::extract::{Path, State};
use axum::http::header::{self, HeaderMap};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use interviews_core::byte_range::{plan_response, ByteRange, ServePlan, ACCEPT_RANGES_BYTES};
use interviews_core::error::CoreError;
use interviews_core::media_path::{
    content_type_for_extension, decode_path_token, recording_id_from_path, stream_url,
};
use interviews_core::processing::quality_from_params;
use interviews_core::quality::{
    build_ladder, CompressedRendition, OriginalRendition, QualityLadder,
};
use interviews_core::types::DbId;
use interviews_db::models::video_file::{VideoFile, VideoFileMetadata};
use interviews_db::repositories::{ProcessingQueueRepo, VideoFileRepo};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio_util::io::ReaderStream;

use crate::authz;
use crate::error::{AppError, AppResult, PlainTextError};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::storage::StoredFile;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Optional JSON body of `DELETE /videos/{recording_id}`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeleteVideoRequest {
    #[serde(default)]
    pub hard_delete: bool,
}

#[derive(Debug, Serialize)]
pub struct DeleteVideoResponse {
    pub recording_id: DbId,
    pub hard_delete: bool,
    pub deleted: bool,
}

#[derive(Debug, Serialize)]
pub struct QualityLadderResponse {
    pub recording_id: DbId,
    #[serde(flatten)]
    pub ladder: QualityLadder,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch the live video file of a recording or fail with 404.
async fn find_video_file(pool: &sqlx::PgPool, recording_id: DbId) -> AppResult<VideoFile> {
    VideoFileRepo::find_by_recording(pool, recording_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "VideoFile",
            id: recording_id,
        }))
}

fn build_response(builder: axum::http::response::Builder, body: Body) -> AppResult<Response> {
    builder
        .body(body)
        .map_err(|e| AppError::InternalError(e.to_string()))
}

/// 200 response carrying the whole file.
async fn full_response(file: &StoredFile, content_type: &str) -> AppResult<Response> {
    let handle = tokio::fs::File::open(&file.path).await?;
    let stream = ReaderStream::new(handle);

    build_response(
        Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, content_type)
            .header(header::CONTENT_LENGTH, file.size.to_string())
            .header(header::ACCEPT_RANGES, ACCEPT_RANGES_BYTES),
        Body::from_stream(stream),
    )
}

/// 206 response carrying exactly `range` of the file.
async fn partial_response(
    file: &StoredFile,
    content_type: &str,
    range: ByteRange,
) -> AppResult<Response> {
    let mut handle = tokio::fs::File::open(&file.path).await?;
    handle.seek(std::io::SeekFrom::Start(range.start)).await?;
    let stream = ReaderStream::new(handle.take(range.len()));

    build_response(
        Response::builder()
            .status(StatusCode::PARTIAL_CONTENT)
            .header(header::CONTENT_TYPE, content_type)
            .header(header::CONTENT_LENGTH, range.len().to_string())
            .header(header::CONTENT_RANGE, range.content_range(file.size))
            .header(header::ACCEPT_RANGES, ACCEPT_RANGES_BYTES),
        Body::from_stream(stream),
    )
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/videos/stream/{encoded_path}
///
/// Streams a media file with HTTP range request support. Only the owner of
/// the recording the file belongs to may stream it. Errors are plain text.
pub async fn stream_video(
    State(state): State<AppState>,
    user: Result<AuthUser, AppError>,
    Path(encoded_path): Path<String>,
    headers: HeaderMap,
) -> Result<Response, PlainTextError> {
    let user = user?;

    let relative = decode_path_token(&encoded_path)?;
    let file = state
        .storage
        .locate(&relative)
        .await?
        .ok_or(AppError::MediaNotFound)?;

    // Ownership follows the requested name; the canonical target may be a
    // differently named blob.
    let recording_id = recording_id_from_path(std::path::Path::new(&relative))
        .ok_or(AppError::MediaNotFound)?;
    authz::ensure_owner(&state.pool, &user, recording_id).await?;

    let range_header = headers
        .get(header::RANGE)
        .map(|v| v.to_str())
        .transpose()
        .map_err(|_| AppError::BadRequest("Invalid Range header".into()))?;

    let content_type = content_type_for_extension(&relative);

    let response = match plan_response(range_header, file.size)? {
        ServePlan::Full => full_response(&file, content_type).await?,
        ServePlan::Partial(range) => {
            tracing::debug!(
                recording_id,
                start = range.start,
                end = range.end,
                size = file.size,
                "Serving partial content"
            );
            partial_response(&file, content_type, range).await?
        }
    };
    Ok(response)
}

/// GET /api/videos/{recording_id}
///
/// Returns metadata for the recording's live video file. Owner or admin.
pub async fn get_metadata(
    State(state): State<AppState>,
    user: AuthUser,
    Path(recording_id): Path<DbId>,
) -> AppResult<Json<ApiResponse<VideoFileMetadata>>> {
    authz::ensure_owner_or_admin(&state.pool, &user, recording_id).await?;
    let video = find_video_file(&state.pool, recording_id).await?;
    Ok(Json(ApiResponse::ok(VideoFileMetadata::from(&video))))
}

/// GET /api/videos/{recording_id}/qualities
///
/// Returns the playable renditions of a recording, highest quality first.
/// Completed compressions whose output file is gone are left out.
pub async fn get_qualities(
    State(state): State<AppState>,
    user: AuthUser,
    Path(recording_id): Path<DbId>,
) -> AppResult<Json<ApiResponse<QualityLadderResponse>>> {
    authz::ensure_owner(&state.pool, &user, recording_id).await?;
    let video = find_video_file(&state.pool, recording_id).await?;

    let jobs = ProcessingQueueRepo::list_completed_compressions(&state.pool, recording_id).await?;

    let mut compressed = Vec::with_capacity(jobs.len());
    for job in jobs {
        let Some(quality) = quality_from_params(&job.processing_params) else {
            continue;
        };
        let Some(output_path) = job.output_path.as_deref() else {
            continue;
        };
        let Some(file) = state.storage.locate(output_path).await? else {
            tracing::debug!(
                recording_id,
                job_id = job.id,
                "Skipping compressed rendition with missing output file"
            );
            continue;
        };

        compressed.push(CompressedRendition {
            quality,
            file_size: i64::try_from(file.size).unwrap_or(i64::MAX),
            mime_type: content_type_for_extension(output_path).to_string(),
            url: stream_url(output_path),
        });
    }

    let original = OriginalRendition {
        width: video.width,
        height: video.height,
        file_size: video.file_size,
        bitrate: video.bitrate,
        mime_type: video.mime_type,
        url: stream_url(&video.file_path),
    };

    Ok(Json(ApiResponse::ok(QualityLadderResponse {
        recording_id,
        ladder: build_ladder(original, compressed),
    })))
}

/// DELETE /api/videos/{recording_id}
///
/// Soft-deletes the recording's video file, or with `{"hard_delete": true}`
/// removes every video file row and its file on disk. Owner or admin.
pub async fn delete_video(
    State(state): State<AppState>,
    user: AuthUser,
    Path(recording_id): Path<DbId>,
    body: Bytes,
) -> AppResult<Json<ApiResponse<DeleteVideoResponse>>> {
    authz::ensure_owner_or_admin(&state.pool, &user, recording_id).await?;
    let request = parse_delete_request(&body)?;

    let not_found = || {
        AppError::Core(CoreError::NotFound {
            entity: "VideoFile",
            id: recording_id,
        })
    };

    if request.hard_delete {
        let removed = VideoFileRepo::hard_delete_by_recording(&state.pool, recording_id).await?;
        if removed.is_empty() {
            return Err(not_found());
        }
        for video in &removed {
            remove_stored_file(&state, &video.file_path).await;
        }
    } else if !VideoFileRepo::soft_delete_by_recording(&state.pool, recording_id).await? {
        return Err(not_found());
    }

    tracing::info!(
        user_id = user.user_id,
        recording_id,
        hard_delete = request.hard_delete,
        "Deleted recording video"
    );

    Ok(Json(ApiResponse::ok(DeleteVideoResponse {
        recording_id,
        hard_delete: request.hard_delete,
        deleted: true,
    })))
}

/// Parse the optional delete body. An empty body means a soft delete.
fn parse_delete_request(body: &[u8]) -> AppResult<DeleteVideoRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(DeleteVideoRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}")))
}

/// Remove a file under the storage root. The row is already gone, so
/// failures are logged rather than surfaced.
async fn remove_stored_file(state: &AppState, relative: &str) {
    match state.storage.locate(relative).await {
        Ok(Some(file)) => {
            if let Err(e) = tokio::fs::remove_file(&file.path).await {
                tracing::warn!(error = %e, path = %relative, "Failed to remove video file");
            }
        }
        Ok(None) => {
            tracing::warn!(path = %relative, "Video file already missing from storage");
        }
        Err(e) => {
            tracing::warn!(error = %e, path = %relative, "Failed to locate video file");
        }
    }
}
