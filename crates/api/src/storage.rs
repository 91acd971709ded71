//! Read-only access to files under the media storage root.
//!
//! Every path that reaches the filesystem goes through
//! [`MediaStorage::locate`], which rejects anything that does not resolve
//! to a regular file inside the canonical root (including symlinks that
//! point outside it).

use std::io;
use std::path::{Path, PathBuf};

use interviews_core::media_path::sanitize_relative_path;

/// A regular file found under the storage root.
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Canonical absolute path.
    pub path: PathBuf,
    /// Size in bytes at lookup time.
    pub size: u64,
}

/// The managed media directory.
#[derive(Debug)]
pub struct MediaStorage {
    root: PathBuf,
}

impl MediaStorage {
    /// Open the storage root. Fails if the directory does not exist.
    pub fn new(root: impl AsRef<Path>) -> io::Result<Self> {
        let root = std::fs::canonicalize(root.as_ref())?;
        if !root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("storage root {} is not a directory", root.display()),
            ));
        }
        Ok(Self { root })
    }

    /// Canonical storage root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a storage-relative path to an existing file.
    ///
    /// Returns `Ok(None)` when the path is unsafe, does not name a file
    /// (missing, a file used as a directory, an over-long name, a symlink
    /// loop), lies outside the root, or is not a regular file. Other I/O
    /// failures such as permission errors are returned as errors.
    pub async fn locate(&self, relative: &str) -> io::Result<Option<StoredFile>> {
        let Some(clean) = sanitize_relative_path(relative) else {
            return Ok(None);
        };

        let path = match tokio::fs::canonicalize(self.root.join(clean)).await {
            Ok(path) => path,
            Err(e) if names_no_file(&e) => return Ok(None),
            Err(e) => return Err(e),
        };
        if !path.starts_with(&self.root) {
            return Ok(None);
        }

        let metadata = match tokio::fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) if names_no_file(&e) => return Ok(None),
            Err(e) => return Err(e),
        };
        if !metadata.is_file() {
            return Ok(None);
        }

        Ok(Some(StoredFile {
            path,
            size: metadata.len(),
        }))
    }
}

/// Whether a lookup error means the path simply does not resolve to a file.
fn names_no_file(err: &io::Error) -> bool {
    if matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory | io::ErrorKind::InvalidFilename
    ) {
        return true;
    }
    #[cfg(unix)]
    if matches!(err.raw_os_error(), Some(libc::ELOOP | libc::ENAMETOOLONG | libc::ENOTDIR)) {
        return true;
    }
    false
}
