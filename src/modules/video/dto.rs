use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use std::path::{Component, Path};
use thiserror::Error;
use utoipa::ToSchema;

// --- PUSH ENVELOPE ---

/// Body of a pub/sub push delivery.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PubSubPushRequest {
    pub message: Option<PubSubMessage>,
    pub subscription: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PubSubMessage {
    /// Base64-encoded JSON, e.g. `{"name":"clip1.mp4"}`.
    pub data: Option<String>,
    pub message_id: Option<String>,
    pub publish_time: Option<String>,
}

/// Decoded `message.data`. Storage notifications carry more fields; only the
/// object name matters here.
#[derive(Debug, Deserialize)]
pub struct VideoNotification {
    pub name: Option<String>,
}

/// A validated request to process one raw object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessVideoCommand {
    pub object_name: String,
    pub message_id: Option<String>,
}

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Bad Request: invalid push body: {0}")]
    InvalidEnvelope(#[source] serde_json::Error),

    #[error("Bad Request: missing pub/sub message")]
    MissingMessage,

    #[error("Bad Request: message data is not valid base64: {0}")]
    InvalidEncoding(#[source] base64::DecodeError),

    #[error("Bad Request: message data is not valid JSON: {0}")]
    InvalidPayload(#[source] serde_json::Error),

    #[error("Bad Request: missing filename")]
    MissingName,

    #[error("Bad Request: invalid filename: {0}")]
    InvalidName(String),
}

impl PubSubPushRequest {
    pub fn from_slice(body: &[u8]) -> Result<Self, NotificationError> {
        serde_json::from_slice(body).map_err(NotificationError::InvalidEnvelope)
    }

    pub fn into_command(self) -> Result<ProcessVideoCommand, NotificationError> {
        let message = self.message.ok_or(NotificationError::MissingMessage)?;
        let data = message.data.ok_or(NotificationError::MissingMessage)?;

        let decoded = STANDARD
            .decode(data.trim())
            .map_err(NotificationError::InvalidEncoding)?;
        let notification: VideoNotification =
            serde_json::from_slice(&decoded).map_err(NotificationError::InvalidPayload)?;

        let object_name = notification
            .name
            .filter(|name| !name.trim().is_empty())
            .ok_or(NotificationError::MissingName)?;
        validate_object_name(&object_name)?;

        Ok(ProcessVideoCommand {
            object_name,
            message_id: message.message_id,
        })
    }
}

/// Rejects names that would resolve outside the working directories.
fn validate_object_name(name: &str) -> Result<(), NotificationError> {
    let escapes = Path::new(name).components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });

    if escapes || name.contains('\0') {
        return Err(NotificationError::InvalidName(name.to_string()));
    }

    Ok(())
}
