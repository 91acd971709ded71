//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod processing_queue_repo;
pub mod recording_repo;
pub mod video_file_repo;

pub use processing_queue_repo::ProcessingQueueRepo;
pub use recording_repo::RecordingRepo;
pub use video_file_repo::VideoFileRepo;
