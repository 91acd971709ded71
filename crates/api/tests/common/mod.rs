#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{
    ACCEPT_RANGES, AUTHORIZATION, CONTENT_LENGTH, CONTENT_RANGE, CONTENT_TYPE, RANGE,
};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use interviews_api::auth::jwt::{generate_access_token, JwtConfig};
use interviews_api::config::ServerConfig;
use interviews_api::routes;
use interviews_api::state::AppState;
use interviews_api::storage::MediaStorage;
use interviews_core::media_path::encode_path_token;
use interviews_core::types::DbId;

const TEST_JWT_SECRET: &str = "integration-test-secret";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_JWT_SECRET.to_string(),
        access_token_expiry_mins: 15,
    }
}

/// Build a test `ServerConfig` rooted at `storage_root`.
pub fn test_config(storage_root: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        storage_root: storage_root.to_path_buf(),
        jwt: test_jwt_config(),
    }
}

/// Build the full application router with all middleware layers.
///
/// Mirrors the router construction in `main.rs` so integration tests
/// exercise the production middleware stack.
pub fn build_test_app(pool: PgPool, storage_root: &Path) -> Router {
    let config = test_config(storage_root);
    let storage = MediaStorage::new(storage_root).expect("test storage root must exist");

    let state = AppState {
        pool,
        config: Arc::new(config),
        storage: Arc::new(storage),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION, RANGE])
        .expose_headers([CONTENT_RANGE, ACCEPT_RANGES, CONTENT_LENGTH])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

/// Mint a valid access token for a test principal.
pub fn token_for(user_id: DbId, role: &str) -> String {
    generate_access_token(user_id, role, &test_jwt_config()).unwrap()
}

pub fn user_token(user_id: DbId) -> String {
    token_for(user_id, "user")
}

pub fn admin_token(user_id: DbId) -> String {
    token_for(user_id, "admin")
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a recording with a fixed id owned by `user_id`.
pub async fn insert_recording(pool: &PgPool, id: DbId, user_id: DbId) {
    sqlx::query("INSERT INTO interview_recordings (id, user_id, title) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(user_id)
        .bind("Test interview")
        .execute(pool)
        .await
        .unwrap();
}

/// Insert a live video file row for a recording.
pub async fn insert_video_file(
    pool: &PgPool,
    recording_id: DbId,
    file_path: &str,
    width: i32,
    height: i32,
    file_size: i64,
) {
    sqlx::query(
        "INSERT INTO video_files (recording_id, file_path, width, height, file_size)
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(recording_id)
    .bind(file_path)
    .bind(width)
    .bind(height)
    .bind(file_size)
    .execute(pool)
    .await
    .unwrap();
}

/// Insert a processing queue entry for a compression job.
pub async fn insert_compression(
    pool: &PgPool,
    recording_id: DbId,
    status: &str,
    quality: &str,
    output_path: &str,
) {
    sqlx::query(
        "INSERT INTO video_processing_queue
             (recording_id, processing_type, status, output_path, processing_params)
         VALUES ($1, 'compression', $2, $3, $4)",
    )
    .bind(recording_id)
    .bind(status)
    .bind(output_path)
    .bind(serde_json::json!({ "quality": quality }))
    .execute(pool)
    .await
    .unwrap();
}

/// Write `contents` to `relative` under the storage root, creating parents.
pub fn write_media(root: &Path, relative: &str, contents: &[u8]) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

/// Stream URI for a storage-relative path.
pub fn stream_uri(relative: &str) -> String {
    format!("/api/videos/stream/{}", encode_path_token(relative))
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

/// Unauthenticated GET.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

/// GET with a Bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// GET with a Bearer token and a `Range` header.
pub async fn get_range(app: Router, uri: &str, token: &str, range: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(RANGE, range)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// DELETE with a Bearer token and an optional JSON body.
pub async fn delete_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let builder = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"));
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send(app, request).await
}

// ---------------------------------------------------------------------------
// Bodies
// ---------------------------------------------------------------------------

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}
