use std::env;
use std::str::FromStr;

pub enum EnvKey {
    ServerPort,
    RawBucket,
    ProcessedBucket,
    ScaleHeight,
    RawDir,
    ProcessedDir,
    FfmpegPath,
    StorageEndpoint,
    StorageRegion,
    StorageAccessKey,
    StorageSecretKey,
    MaxBodyBytes,
}

impl EnvKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::ServerPort => "PORT",
            EnvKey::RawBucket => "RAW_VIDEO_BUCKET",
            EnvKey::ProcessedBucket => "PROCESSED_VIDEO_BUCKET",
            EnvKey::ScaleHeight => "SCALE_HEIGHT",
            EnvKey::RawDir => "LOCAL_RAW_VIDEO_PATH",
            EnvKey::ProcessedDir => "LOCAL_PROCESSED_VIDEO_PATH",
            EnvKey::FfmpegPath => "FFMPEG_PATH",
            EnvKey::StorageEndpoint => "STORAGE_ENDPOINT",
            EnvKey::StorageRegion => "STORAGE_REGION",
            EnvKey::StorageAccessKey => "STORAGE_ACCESS_KEY",
            EnvKey::StorageSecretKey => "STORAGE_SECRET_KEY",
            EnvKey::MaxBodyBytes => "MAX_BODY_BYTES",
        }
    }
}

pub fn get(key: EnvKey) -> Result<String, env::VarError> {
    env::var(key.as_str())
}

/// Like [`get`], but the error names the missing variable.
pub fn require(key: EnvKey) -> anyhow::Result<String> {
    let name = key.as_str();
    env::var(name).map_err(|e| anyhow::anyhow!("{}: {}", name, e))
}

pub fn get_or(key: EnvKey, default: &str) -> String {
    env::var(key.as_str()).unwrap_or_else(|_| default.to_string())
}

pub fn get_parsed<T: FromStr>(key: EnvKey, default: T) -> T {
    match get(key) {
        Ok(val) => val.parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}
