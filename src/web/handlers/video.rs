//! Video file handlers for Web API.

use axum::{
    body::Body,
    extract::{
        multipart::MultipartRejection, rejection::PathRejection, Multipart, Path, State,
    },
    http::{header, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::video::{VideoRecord, VideoService};
use crate::web::dto::ApiMessage;
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Multipart field carrying the uploaded file.
const FILE_FIELD: &str = "file";

/// Generate a safe Content-Disposition header value for file downloads.
///
/// Control characters are dropped and quotes/backslashes replaced in the
/// plain `filename` parameter. Names that needed sanitizing, or that are not
/// ASCII, also get an RFC 5987 `filename*` parameter.
fn content_disposition_header(filename: &str) -> String {
    let sanitized: String = filename
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '"' | '\\' => '_',
            _ => c,
        })
        .collect();

    if filename.is_ascii() && sanitized == filename {
        return format!("attachment; filename=\"{}\"", filename);
    }

    let encoded = urlencoding::encode(filename);
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        sanitized, encoded
    )
}

/// GET /files - List every stored video.
#[utoipa::path(
    get,
    path = "/files",
    tag = "files",
    responses(
        (status = 200, description = "All videos in storage order", body = Vec<VideoRecord>),
        (status = 500, description = "Internal error", body = ApiMessage)
    )
)]
pub async fn list_videos(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<VideoRecord>>, ApiError> {
    let service = VideoService::new(state.db.pool(), &state.storage);
    let videos = service.list().await?;
    Ok(Json(videos))
}

/// GET /files/:id - Download a video's content.
#[utoipa::path(
    get,
    path = "/files/{id}",
    tag = "files",
    params(
        ("id" = i64, Path, description = "File ID")
    ),
    responses(
        (status = 200, description = "File content", content_type = "application/octet-stream"),
        (status = 400, description = "ID is not an integer", body = ApiMessage),
        (status = 404, description = "Unknown ID or file missing on disk", body = ApiMessage),
        (status = 415, description = "Unsupported file type", body = ApiMessage)
    )
)]
pub async fn download_video(
    State(state): State<Arc<AppState>>,
    file_id: Result<Path<i64>, PathRejection>,
) -> Result<Response<Body>, ApiError> {
    let Path(file_id) = file_id?;
    let service = VideoService::new(state.db.pool(), &state.storage);
    let (record, content) = service.download(file_id).await?;

    Response::builder()
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_header(&record.name),
        )
        .header(header::CONTENT_LENGTH, content.len())
        .body(Body::from(content))
        .map_err(|e| {
            tracing::error!("Failed to build response: {}", e);
            ApiError::internal("Failed to build response")
        })
}

/// POST /files - Upload a video from the multipart field `file`.
#[utoipa::path(
    post,
    path = "/files",
    tag = "files",
    request_body(content = String, content_type = "multipart/form-data", description = "Multipart form with a `file` part"),
    responses(
        (status = 201, description = "File uploaded", body = ApiMessage,
            headers(("Location" = String, description = "Absolute path of the stored file"))),
        (status = 400, description = "Missing file part or invalid file name", body = ApiMessage),
        (status = 409, description = "File already exists", body = ApiMessage),
        (status = 413, description = "Upload too large", body = ApiMessage),
        (status = 415, description = "Unsupported file type", body = ApiMessage),
        (status = 500, description = "File could not be written", body = ApiMessage)
    )
)]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let mut multipart = multipart?;

    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let content = field.bytes().await?;
        upload = Some((filename, content.to_vec()));
    }

    let (filename, content) = upload.ok_or_else(|| ApiError::bad_request("No file provided"))?;

    let service = VideoService::new(state.db.pool(), &state.storage);
    let stored = service
        .upload(&filename, content.len() as i64, &content[..])
        .await?;

    let location = stored.path.to_string_lossy();
    let location = HeaderValue::from_bytes(location.as_bytes()).map_err(|e| {
        tracing::error!("Invalid Location header for {}: {}", filename, e);
        ApiError::internal("Failed to build response")
    })?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ApiMessage::message("File uploaded")),
    )
        .into_response())
}

/// DELETE /files/:id - Delete a video's row and file.
#[utoipa::path(
    delete,
    path = "/files/{id}",
    tag = "files",
    params(
        ("id" = i64, Path, description = "File ID")
    ),
    responses(
        (status = 204, description = "File deleted"),
        (status = 400, description = "ID is not an integer", body = ApiMessage),
        (status = 404, description = "Unknown ID or file missing on disk", body = ApiMessage),
        (status = 500, description = "File could not be deleted", body = ApiMessage)
    )
)]
pub async fn delete_video(
    State(state): State<Arc<AppState>>,
    file_id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(file_id) = file_id?;
    let service = VideoService::new(state.db.pool(), &state.storage);
    service.delete(file_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Fallback for paths no route matches.
pub async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("No route for {}", uri.path()))
}

/// Fallback for known paths hit with an unsupported method.
pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::method_not_allowed(format!("{} is not allowed on {}", method, uri.path()))
}
