pub mod ffmpeg;

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

pub type MediaResult<T> = Result<T, MediaError>;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Failed to start {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{message}")]
    FfmpegFailed {
        message: String,
        exit_code: Option<i32>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Rescales a local video into a new local file.
///
/// The returned future resolves exactly once: `Ok` when the output has been
/// fully written, `Err` with the engine's diagnostic otherwise.
#[async_trait]
pub trait Transcoder: Send + Sync {
    async fn transcode(&self, input: &Path, output: &Path) -> MediaResult<()>;
}
