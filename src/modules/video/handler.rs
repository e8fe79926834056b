use super::dto::PubSubPushRequest;
use super::service::{VideoJob, VideoService};
use crate::common::response::{ApiError, ApiSuccess};
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;

pub const SUCCESS_MESSAGE: &str = "Processing finished successfully!";

/// Process a newly uploaded raw video
/// Triggered by a pub/sub push whose data names the raw object.
#[utoipa::path(
    post,
    path = "/process-video",
    request_body = PubSubPushRequest,
    responses(
        (status = 200, description = "Processing finished", body = String, content_type = "text/plain"),
        (status = 400, description = "Missing or undecodable notification", body = String, content_type = "text/plain"),
        (status = 500, description = "Download, transcode or upload failed", body = String, content_type = "text/plain")
    ),
    tag = "Video"
)]
pub async fn process_video(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    // Decoded by hand so malformed bodies get a 400 instead of axum's 422.
    let request = match PubSubPushRequest::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected notification: {}", e);
            return ApiError::bad_request(e.to_string()).into_response();
        }
    };

    info!(
        subscription = ?request.subscription,
        publish_time = ?request.message.as_ref().and_then(|m| m.publish_time.as_deref()),
        "📦 Received notification"
    );

    let command = match request.into_command() {
        Ok(command) => command,
        Err(e) => {
            warn!("Rejected notification: {}", e);
            return ApiError::bad_request(e.to_string()).into_response();
        }
    };

    let job = VideoJob::new(Uuid::new_v4(), &command.object_name, &state.local);
    let span = info_span!(
        "process_video",
        request_id = %job.request_id,
        object = %job.object_name,
        message_id = ?command.message_id,
    );

    match VideoService::process(state, &job).instrument(span).await {
        Ok(()) => ApiSuccess(SUCCESS_MESSAGE.to_string(), StatusCode::OK).into_response(),
        Err(e) => {
            error!(request_id = %job.request_id, "❌ Failed to process {}: {}", job.object_name, e);
            ApiError::internal(e.to_string()).into_response()
        }
    }
}
