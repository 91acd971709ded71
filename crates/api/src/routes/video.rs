//! Route definitions for recording media.
//!
//! Mounted at `/videos`.
//!
//! ```text
//! GET    /stream/{*encoded_path}        stream_video
//! GET    /{recording_id}                get_metadata
//! DELETE /{recording_id}                delete_video
//! GET    /{recording_id}/qualities      get_qualities
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::video;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stream/{*encoded_path}", get(video::stream_video))
        .route(
            "/{recording_id}",
            get(video::get_metadata).delete(video::delete_video),
        )
        .route("/{recording_id}/qualities", get(video::get_qualities))
}
