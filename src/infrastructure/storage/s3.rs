use super::{RemoteStorage, StorageError, StorageResult};
use async_trait::async_trait;
use aws_sdk_s3::config::{Builder, RequestChecksumCalculation, ResponseChecksumValidation};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_s3::{Client, config::BehaviorVersion, config::Credentials, config::Region};
use std::path::Path;
use std::time::Instant;
use tokio::io::AsyncWriteExt;
use tracing::{error, info};

/// Settings for [`StorageService::new`].
pub struct StorageSettings<'a> {
    pub endpoint: &'a str,
    pub region: &'a str,
    pub access_key: &'a str,
    pub secret_key: &'a str,
    pub raw_bucket: &'a str,
    pub processed_bucket: &'a str,
}

#[derive(Clone)]
pub struct StorageService {
    pub client: Client,
    pub raw_bucket: String,
    pub processed_bucket: String,
}

impl StorageService {
    pub fn new(settings: StorageSettings<'_>) -> Self {
        let credentials = Credentials::new(
            settings.access_key,
            settings.secret_key,
            None,
            None,
            "static",
        );

        let config = Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(settings.region.to_string()))
            .endpoint_url(settings.endpoint)
            .credentials_provider(credentials)
            .force_path_style(true)
            // S3-compatible stores such as GCS reject aws-chunked uploads with
            // trailing checksums.
            .request_checksum_calculation(RequestChecksumCalculation::WhenRequired)
            .response_checksum_validation(ResponseChecksumValidation::WhenRequired)
            .build();

        let client = Client::from_conf(config);

        info!(
            endpoint = settings.endpoint,
            raw_bucket = settings.raw_bucket,
            processed_bucket = settings.processed_bucket,
            "✅ Object storage client configured"
        );

        Self {
            client,
            raw_bucket: settings.raw_bucket.to_string(),
            processed_bucket: settings.processed_bucket.to_string(),
        }
    }

    async fn make_public(&self, key: &str) -> StorageResult<()> {
        self.client
            .put_object_acl()
            .bucket(&self.processed_bucket)
            .key(key)
            .acl(ObjectCannedAcl::PublicRead)
            .send()
            .await
            .map_err(|e| StorageError::AclFailed(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl RemoteStorage for StorageService {
    async fn download(&self, object_name: &str, destination: &Path) -> StorageResult<()> {
        let start = Instant::now();

        let output = self
            .client
            .get_object()
            .bucket(&self.raw_bucket)
            .key(object_name)
            .send()
            .await
            .map_err(|e| {
                let missing = e
                    .as_service_error()
                    .map(|se| se.is_no_such_key())
                    .unwrap_or(false);
                if missing {
                    StorageError::NotFound(format!("{}/{}", self.raw_bucket, object_name))
                } else {
                    error!(
                        error = %e,
                        bucket = %self.raw_bucket,
                        key = %object_name,
                        "Download request failed"
                    );
                    StorageError::DownloadFailed(e.to_string())
                }
            })?;

        let mut body = output.body;
        let mut file = tokio::fs::File::create(destination).await?;
        let mut size: u64 = 0;
        while let Some(chunk) = body
            .try_next()
            .await
            .map_err(|e| StorageError::DownloadFailed(format!("transfer interrupted: {}", e)))?
        {
            file.write_all(&chunk).await?;
            size += chunk.len() as u64;
        }
        file.flush().await?;

        info!(
            bucket = %self.raw_bucket,
            key = %object_name,
            size_bytes = size,
            duration_ms = start.elapsed().as_millis() as u64,
            "⬇️ Downloaded raw video to {}",
            destination.display()
        );

        Ok(())
    }

    async fn upload(&self, source: &Path, object_name: &str) -> StorageResult<()> {
        let start = Instant::now();

        let body = ByteStream::from_path(source).await.map_err(|e| {
            StorageError::UploadFailed(format!("cannot read {}: {}", source.display(), e))
        })?;
        let content_type = mime_guess::from_path(object_name)
            .first_or_octet_stream()
            .to_string();

        self.client
            .put_object()
            .bucket(&self.processed_bucket)
            .key(object_name)
            .body(body)
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| {
                error!(
                    error = %e,
                    bucket = %self.processed_bucket,
                    key = %object_name,
                    "Upload request failed"
                );
                StorageError::UploadFailed(e.to_string())
            })?;

        self.make_public(object_name).await?;

        info!(
            bucket = %self.processed_bucket,
            key = %object_name,
            duration_ms = start.elapsed().as_millis() as u64,
            "⬆️ Uploaded processed video (public-read)"
        );

        Ok(())
    }
}
