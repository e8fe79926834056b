use crate::infrastructure::media::MediaError;
use crate::infrastructure::storage::StorageError;
use crate::infrastructure::storage::local::{
    LocalStorage, delete_file, ensure_directory, remove_directory,
};
use crate::state::AppState;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

pub const PROCESSED_PREFIX: &str = "processed-";

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Failed to prepare working directory: {0}")]
    Workspace(#[source] std::io::Error),

    #[error("Failed to download {object}: {source}")]
    Download {
        object: String,
        #[source]
        source: StorageError,
    },

    #[error("Transcoding failed: {0}")]
    Transcode(#[source] MediaError),

    #[error("Failed to upload {object}: {source}")]
    Upload {
        object: String,
        #[source]
        source: StorageError,
    },
}

/// Local and remote names used while processing one object.
///
/// Each request stages its files in `<working dir>/<request id>/`, so two
/// requests for the same object never touch the same path and the file name
/// itself stays as long as the object name.
#[derive(Debug, Clone)]
pub struct VideoJob {
    pub request_id: Uuid,
    pub object_name: String,
    pub processed_object_name: String,
    pub raw_workspace: PathBuf,
    pub processed_workspace: PathBuf,
    pub raw_path: PathBuf,
    pub processed_path: PathBuf,
}

impl VideoJob {
    pub fn new(request_id: Uuid, object_name: &str, local: &LocalStorage) -> Self {
        let workspace = request_id.to_string();
        let local_name = object_name.replace('/', "_");
        let raw_workspace = local.raw_path(&workspace);
        let processed_workspace = local.processed_path(&workspace);

        Self {
            request_id,
            object_name: object_name.to_string(),
            processed_object_name: processed_name(object_name),
            raw_path: raw_workspace.join(&local_name),
            processed_path: processed_workspace.join(&local_name),
            raw_workspace,
            processed_workspace,
        }
    }
}

pub fn processed_name(raw_name: &str) -> String {
    format!("{}{}", PROCESSED_PREFIX, raw_name)
}

pub struct VideoService;

impl VideoService {
    /// Download, transcode, upload. Local files are removed afterwards whether
    /// or not a step failed.
    pub async fn process(state: AppState, job: &VideoJob) -> Result<(), ProcessError> {
        let outcome = Self::run(&state, job).await;
        Self::cleanup(job).await;
        outcome
    }

    async fn run(state: &AppState, job: &VideoJob) -> Result<(), ProcessError> {
        let (raw_dir, processed_dir) = tokio::join!(
            ensure_directory(&job.raw_workspace),
            ensure_directory(&job.processed_workspace)
        );
        raw_dir.and(processed_dir).map_err(ProcessError::Workspace)?;

        // 1. Download
        state
            .remote
            .download(&job.object_name, &job.raw_path)
            .await
            .map_err(|source| ProcessError::Download {
                object: job.object_name.clone(),
                source,
            })?;

        // 2. Transcode
        state
            .transcoder
            .transcode(&job.raw_path, &job.processed_path)
            .await
            .map_err(ProcessError::Transcode)?;

        // 3. Upload
        state
            .remote
            .upload(&job.processed_path, &job.processed_object_name)
            .await
            .map_err(|source| ProcessError::Upload {
                object: job.processed_object_name.clone(),
                source,
            })?;

        info!(
            object = %job.object_name,
            processed = %job.processed_object_name,
            "Video processed"
        );
        Ok(())
    }

    async fn cleanup(job: &VideoJob) {
        let (raw, processed) = tokio::join!(
            delete_file(&job.raw_path),
            delete_file(&job.processed_path)
        );

        for (path, result) in [(&job.raw_path, raw), (&job.processed_path, processed)] {
            if let Err(e) = result {
                warn!(path = %path.display(), error = %e, "🧹 Failed to delete local file");
            }
        }

        let (raw_dir, processed_dir) = tokio::join!(
            remove_directory(&job.raw_workspace),
            remove_directory(&job.processed_workspace)
        );

        for (path, result) in [
            (&job.raw_workspace, raw_dir),
            (&job.processed_workspace, processed_dir),
        ] {
            if let Err(e) = result {
                warn!(path = %path.display(), error = %e, "🧹 Failed to remove request directory");
            }
        }
    }
}
