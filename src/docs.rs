use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::modules::video::handler::process_video,
    ),
    components(
        schemas(
            crate::modules::video::dto::PubSubPushRequest,
            crate::modules::video::dto::PubSubMessage,
        )
    ),
    tags(
        (name = "Video", description = "Raw video transcoding"),
        (name = "Health", description = "Liveness")
    )
)]
pub struct ApiDoc;
