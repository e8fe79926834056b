pub mod local;
pub mod s3;

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Failed to make object public: {0}")]
    AclFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Object storage holding raw uploads and processed renditions.
#[async_trait]
pub trait RemoteStorage: Send + Sync {
    /// Fetches `object_name` from the raw bucket into `destination`,
    /// overwriting whatever is already there.
    async fn download(&self, object_name: &str, destination: &Path) -> StorageResult<()>;

    /// Uploads `source` to the processed bucket as `object_name` and marks it
    /// publicly readable.
    async fn upload(&self, source: &Path, object_name: &str) -> StorageResult<()>;
}
