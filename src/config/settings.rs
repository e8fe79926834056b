use serde::Deserialize;
use std::path::PathBuf;
use crate::config::env::{self, EnvKey};

pub const DEFAULT_RAW_BUCKET: &str = "neetcode-yt-raw-videos";
pub const DEFAULT_PROCESSED_BUCKET: &str = "processed-files";
pub const DEFAULT_SCALE_HEIGHT: u32 = 360;

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    pub server_port: u16,
    pub raw_bucket: String,
    pub processed_bucket: String,
    pub scale_height: u32,
    pub raw_dir: PathBuf,
    pub processed_dir: PathBuf,
    pub ffmpeg_path: String,
    pub storage_endpoint: String,
    pub storage_region: String,
    pub storage_access_key: String,
    pub storage_secret_key: String,
    pub max_body_bytes: usize,
}

impl AppConfig {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            server_port: env::get_parsed(EnvKey::ServerPort, 3000),
            raw_bucket: env::get_or(EnvKey::RawBucket, DEFAULT_RAW_BUCKET),
            processed_bucket: env::get_or(EnvKey::ProcessedBucket, DEFAULT_PROCESSED_BUCKET),
            scale_height: env::get_parsed(EnvKey::ScaleHeight, DEFAULT_SCALE_HEIGHT),
            raw_dir: env::get_or(EnvKey::RawDir, "./raw-videos").into(),
            processed_dir: env::get_or(EnvKey::ProcessedDir, "./processed-videos").into(),
            ffmpeg_path: env::get_or(EnvKey::FfmpegPath, "ffmpeg"),
            storage_endpoint: env::get_or(EnvKey::StorageEndpoint, "https://storage.googleapis.com"),
            storage_region: env::get_or(EnvKey::StorageRegion, "us-east-1"),
            storage_access_key: env::require(EnvKey::StorageAccessKey)?,
            storage_secret_key: env::require(EnvKey::StorageSecretKey)?,
            max_body_bytes: env::get_parsed(EnvKey::MaxBodyBytes, 1024 * 1024),
        })
    }
}
