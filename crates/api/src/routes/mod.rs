pub mod health;
pub mod video;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /videos/stream/{encoded_path}      byte-range media stream (owner)
/// /videos/{recording_id}             metadata (owner or admin), delete
/// /videos/{recording_id}/qualities   quality ladder (owner)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/videos", video::router())
}
