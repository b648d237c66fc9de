//! OpenAPI document for the Vidshelf HTTP API.

use utoipa::OpenApi;

use super::dto::ApiMessage;
use crate::video::VideoRecord;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vidshelf API",
        description = "Upload, download, list and delete video files."
    ),
    paths(
        crate::web::handlers::video::list_videos,
        crate::web::handlers::video::download_video,
        crate::web::handlers::video::upload_video,
        crate::web::handlers::video::delete_video,
    ),
    components(schemas(VideoRecord, ApiMessage)),
    tags(
        (name = "files", description = "Video file management")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Path the JSON document is served from.
    pub fn openapi_json_path() -> &'static str {
        "/api-docs/openapi.json"
    }
}
