use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Creates `path` and any missing parents. Existing directories are left alone.
pub async fn ensure_directory(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path).await?;
    debug!(path = %path.display(), "Directory ready");
    Ok(())
}

/// Removes `path`. A file that is already gone counts as deleted.
pub async fn delete_file(path: &Path) -> std::io::Result<()> {
    match fs::remove_file(path).await {
        Ok(()) => {
            debug!(path = %path.display(), "Deleted file");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "File already absent, skipping delete");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Removes an empty directory. A directory that is already gone counts as removed.
pub async fn remove_directory(path: &Path) -> std::io::Result<()> {
    match fs::remove_dir(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

/// The two working directories videos are staged in while a request runs.
#[derive(Clone, Debug)]
pub struct LocalStorage {
    raw_dir: PathBuf,
    processed_dir: PathBuf,
}

impl LocalStorage {
    pub fn new(raw_dir: impl Into<PathBuf>, processed_dir: impl Into<PathBuf>) -> Self {
        Self {
            raw_dir: raw_dir.into(),
            processed_dir: processed_dir.into(),
        }
    }

    pub async fn setup_directories(&self) -> std::io::Result<()> {
        ensure_directory(&self.raw_dir).await?;
        ensure_directory(&self.processed_dir).await?;

        info!(
            raw_dir = %self.raw_dir.display(),
            processed_dir = %self.processed_dir.display(),
            "✅ Working directories ready"
        );
        Ok(())
    }

    pub fn raw_dir(&self) -> &Path {
        &self.raw_dir
    }

    pub fn processed_dir(&self) -> &Path {
        &self.processed_dir
    }

    pub fn raw_path(&self, file_name: &str) -> PathBuf {
        self.raw_dir.join(file_name)
    }

    pub fn processed_path(&self, file_name: &str) -> PathBuf {
        self.processed_dir.join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delete_missing_file_is_ok_and_does_not_create_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ghost.mp4");

        delete_file(&path).await.unwrap();

        assert!(!path.exists());
    }

    #[tokio::test]
    async fn delete_removes_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        std::fs::write(&path, b"frames").unwrap();

        delete_file(&path).await.unwrap();

        assert!(!path.exists());
    }

    #[tokio::test]
    async fn delete_reports_other_io_errors() {
        let dir = tempfile::tempdir().unwrap();

        // A directory cannot be removed with remove_file.
        let err = delete_file(dir.path()).await.unwrap_err();
        assert_ne!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn remove_directory_tolerates_missing_and_keeps_non_empty() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty");
        std::fs::create_dir(&empty).unwrap();

        remove_directory(&empty).await.unwrap();
        assert!(!empty.exists());
        remove_directory(&empty).await.unwrap();

        let full = dir.path().join("full");
        std::fs::create_dir(&full).unwrap();
        std::fs::write(full.join("clip.mp4"), b"frames").unwrap();

        assert!(remove_directory(&full).await.is_err());
        assert!(full.join("clip.mp4").exists());
    }

    #[tokio::test]
    async fn setup_directories_creates_nested_paths() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(
            dir.path().join("a/raw-videos"),
            dir.path().join("b/processed-videos"),
        );

        storage.setup_directories().await.unwrap();

        assert!(storage.raw_dir().is_dir());
        assert!(storage.processed_dir().is_dir());
    }

    #[tokio::test]
    async fn setup_directories_is_idempotent_and_keeps_contents() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().join("raw"), dir.path().join("processed"));
        storage.setup_directories().await.unwrap();

        let kept = storage.raw_path("keep.mp4");
        std::fs::write(&kept, b"original").unwrap();

        storage.setup_directories().await.unwrap();

        assert_eq!(std::fs::read(&kept).unwrap(), b"original");
    }

    #[test]
    fn paths_are_joined_under_their_directory() {
        let storage = LocalStorage::new("./raw-videos", "./processed-videos");

        assert_eq!(storage.raw_path("a.mp4"), PathBuf::from("./raw-videos/a.mp4"));
        assert_eq!(
            storage.processed_path("processed-a.mp4"),
            PathBuf::from("./processed-videos/processed-a.mp4")
        );
    }
}
