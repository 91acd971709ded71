//! Storage path tokens and path safety checks for managed media.
//!
//! Callers never send filesystem paths. A stored, storage-relative path is
//! exposed as an opaque base64 token inside a stream URL and decoded back
//! on the way in. The decoded path is validated lexically here; the `api`
//! crate additionally canonicalizes it against the storage root.

use std::path::{Component, Path, PathBuf};

use base64::engine::general_purpose::{STANDARD, URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;

use crate::error::CoreError;
use crate::types::DbId;

/// Prefix of every stream URL handed to clients.
pub const STREAM_URL_PREFIX: &str = "/api/videos/stream/";

/// File stem prefix that ties a media file to its recording.
pub const RECORDING_FILE_PREFIX: &str = "recording_";

/// Encode a storage-relative path as an opaque, URL-safe token.
pub fn encode_path_token(relative_path: &str) -> String {
    URL_SAFE_NO_PAD.encode(relative_path.as_bytes())
}

/// Decode a token produced by [`encode_path_token`].
///
/// Standard-alphabet and padded tokens are accepted too, since older
/// clients build URLs with plain base64.
pub fn decode_path_token(token: &str) -> Result<String, CoreError> {
    let invalid = || CoreError::Validation("Invalid stream token".to_string());

    let bytes = URL_SAFE_NO_PAD
        .decode(token)
        .or_else(|_| URL_SAFE.decode(token))
        .or_else(|_| STANDARD.decode(token))
        .map_err(|_| invalid())?;

    String::from_utf8(bytes).map_err(|_| invalid())
}

/// Build the stream URL for a storage-relative path.
pub fn stream_url(relative_path: &str) -> String {
    format!("{STREAM_URL_PREFIX}{}", encode_path_token(relative_path))
}

/// Lexically validate a storage-relative path.
///
/// Returns `None` for empty paths, absolute paths, and paths containing
/// `..`, so a decoded token can never name a file outside the storage root
/// before canonicalization even runs.
pub fn sanitize_relative_path(path: &str) -> Option<PathBuf> {
    if path.is_empty() || path.contains('\0') {
        return None;
    }

    let mut clean = PathBuf::new();
    for component in Path::new(path).components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    if clean.as_os_str().is_empty() {
        None
    } else {
        Some(clean)
    }
}

/// Infer the owning recording from a media file name.
///
/// Media files are named `recording_<id>[_<suffix>].<ext>`, e.g.
/// `recording_42.mp4` or `recording_42_480p.mp4`.
pub fn recording_id_from_path(path: &Path) -> Option<DbId> {
    let stem = path.file_stem()?.to_str()?;
    let rest = stem.strip_prefix(RECORDING_FILE_PREFIX)?;
    let digits: &str = match rest.find(|c: char| !c.is_ascii_digit()) {
        Some(idx) => {
            if !rest[idx..].starts_with('_') {
                return None;
            }
            &rest[..idx]
        }
        None => rest,
    };
    digits.parse::<DbId>().ok().filter(|id| *id > 0)
}

/// Guess a Content-Type from a file extension.
pub fn content_type_for_extension(path: &str) -> &'static str {
    let ext = path.rsplit('.').next().unwrap_or("").to_lowercase();
    match ext.as_str() {
        "mp4" | "m4v" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "mkv" => "video/x-matroska",
        "avi" => "video/x-msvideo",
        "ogv" => "video/ogg",
        _ => "application/octet-stream",
    }
}
