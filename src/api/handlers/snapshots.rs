//! Snapshot upload and listing handlers.

use axum::extract::multipart::Field;
use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{SnapshotDto, SnapshotQueryParams};
use crate::app_state::AppState;
use crate::error::{ApiError, ErrorResponse};
use crate::service::query;
use crate::service::{PhotoUpload, SnapshotUpload};

/// `POST /snapshots` — Record a snapshot upload.
///
/// Multipart fields: `photo` (file), `timestamp` (`YYYY-MM-DD HH:MM:SS`),
/// `robot_id` (int), `instruction` (optional). Validation runs in a fixed
/// order with a precise rejection for each failure; the photo is only
/// persisted once every check has passed.
///
/// # Errors
///
/// Returns [`ApiError`] per the validator taxonomy (400) or a
/// storage/repository failure (500).
#[utoipa::path(
    post,
    path = "/snapshots",
    tag = "Snapshots",
    summary = "Upload a snapshot",
    responses(
        (status = 201, description = "Snapshot recorded", body = SnapshotDto),
        (status = 400, description = "Missing fields, bad timestamp, unknown robot, or disallowed file type", body = ErrorResponse),
        (status = 500, description = "Storage or repository failure", body = ErrorResponse),
    )
)]
pub async fn create_snapshot(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let upload = collect_upload(multipart).await?;
    let snapshot = state.service.ingest_snapshot(upload).await?;
    Ok((StatusCode::CREATED, Json(state.projector.snapshot(&snapshot))))
}

/// `GET /snapshots` — List snapshots, optionally filtered.
///
/// All provided filters are ANDed; timestamp bounds are inclusive.
///
/// # Errors
///
/// Returns [`ApiError`] for malformed filter parameters or a repository
/// failure.
#[utoipa::path(
    get,
    path = "/snapshots",
    tag = "Snapshots",
    summary = "List snapshots",
    params(SnapshotQueryParams),
    responses(
        (status = 200, description = "Matching snapshots with photo URLs", body = Vec<SnapshotDto>),
        (status = 400, description = "Invalid filter parameter", body = ErrorResponse),
    )
)]
pub async fn list_snapshots(
    State(state): State<AppState>,
    Query(params): Query<SnapshotQueryParams>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = query::snapshot_filter(
        params.robot_id,
        params.snapshot_id,
        params.t_start,
        params.t_end,
        params.instruction,
    )?;
    let snapshots = state.service.query_snapshots(&filter).await?;
    Ok(Json(state.projector.snapshots(&snapshots)))
}

/// Drains the multipart stream into raw submission fields.
///
/// Unknown parts are skipped; duplicate parts keep the last value.
async fn collect_upload(mut multipart: Multipart) -> Result<SnapshotUpload, ApiError> {
    let mut upload = SnapshotUpload::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::MalformedBody(e.to_string()))?
    {
        let name = field.name().map(ToString::to_string);
        match name.as_deref() {
            Some("photo") => {
                let file_name = field.file_name().map(ToString::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::MalformedBody(e.to_string()))?;
                upload.photo = Some(PhotoUpload {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            Some("timestamp") => upload.timestamp = Some(text(field).await?),
            Some("instruction") => upload.instruction = Some(text(field).await?),
            Some("robot_id") => upload.robot_id = Some(text(field).await?),
            _ => {}
        }
    }
    Ok(upload)
}

async fn text(field: Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::MalformedBody(e.to_string()))
}

/// Snapshot routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/snapshots", post(create_snapshot).get(list_snapshots))
}
