//! Stored photo retrieval handler.

use axum::Router;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;

use crate::app_state::AppState;
use crate::domain::PhotoReference;
use crate::error::{ApiError, ErrorResponse};

/// `GET /snapshots/{reference}` — Stream the stored photo bytes.
///
/// A reference that does not parse as something this service could have
/// generated is treated the same as an absent one, so client input never
/// reaches the filesystem as a path.
///
/// # Errors
///
/// Returns [`ApiError::PhotoNotFound`] for malformed or absent
/// references, [`ApiError::StorageFailure`] on read failure.
#[utoipa::path(
    get,
    path = "/snapshots/{reference}",
    tag = "Snapshots",
    summary = "Retrieve a stored photo",
    params(
        ("reference" = String, Path, description = "Opaque photo reference from a snapshot's photo_url"),
    ),
    responses(
        (status = 200, description = "Photo bytes with the matching image content type"),
        (status = 404, description = "No photo under this reference", body = ErrorResponse),
    )
)]
pub async fn serve_photo(
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let reference =
        PhotoReference::parse(&reference).ok_or(ApiError::PhotoNotFound(reference))?;
    let bytes = state.service.photo(&reference).await?;
    Ok((
        [(header::CONTENT_TYPE, reference.extension().content_type())],
        bytes,
    ))
}

/// Photo retrieval routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/snapshots/{reference}", get(serve_photo))
}
