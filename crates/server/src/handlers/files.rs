//! File download handlers.

use crate::error::ApiResult;
use crate::state::AppState;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use imprint_core::media_type_for;

/// GET /v1/files/{file_name} - Download stored content.
///
/// Available for the whole retention window, regardless of the owning
/// job's lifecycle state. Expired or unknown names are a plain 404.
pub async fn download_file(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> ApiResult<Response> {
    let content = state.content.get(&file_name).await?;

    let media_type = media_type_for(&file_name);
    let disposition = format!("attachment; filename=\"{}\"", content.original_name);

    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, media_type.to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        Body::from(content.data),
    )
        .into_response())
}
