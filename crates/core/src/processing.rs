//! Processing queue constants and parameter parsing.
//!
//! Compression jobs are run by an external worker which records its output
//! in `video_processing_queue`. This module only interprets those rows.

use serde::Deserialize;

/// Processing type of compression (re-encode to a lower quality) jobs.
pub const PROCESSING_TYPE_COMPRESSION: &str = "compression";

/// Processing type of thumbnail extraction jobs.
pub const PROCESSING_TYPE_THUMBNAIL: &str = "thumbnail";

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_FAILED: &str = "failed";

/// The subset of `processing_params` this service reads.
///
/// Other keys written by the worker are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompressionParams {
    pub quality: Option<String>,
}

/// Extract the target quality label from a job's `processing_params`.
///
/// Returns `None` when the params are not an object, have no `quality`
/// key, or the value is not a non-empty string.
pub fn quality_from_params(params: &serde_json::Value) -> Option<String> {
    serde_json::from_value::<CompressionParams>(params.clone())
        .ok()
        .and_then(|p| p.quality)
        .filter(|q| !q.trim().is_empty())
}
