//! Robot registration and listing handlers.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Form, Json, Router};

use crate::api::dto::{RegisterRobotForm, RegisterRobotResponse, RobotDto, RobotQueryParams};
use crate::app_state::AppState;
use crate::error::{ApiError, ErrorResponse};
use crate::service::query;

/// `POST /robots` — Register a robot, or overwrite its name by id.
///
/// With no `robot_id` a fresh robot is created; with a known `robot_id`
/// the name is overwritten; an unknown `robot_id` is rejected.
///
/// # Errors
///
/// Returns [`ApiError`] for a missing/empty name, a non-numeric or
/// unknown id, or a repository failure.
#[utoipa::path(
    post,
    path = "/robots",
    tag = "Robots",
    summary = "Register or overwrite a robot",
    request_body(content = RegisterRobotForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Robot created or updated", body = RegisterRobotResponse),
        (status = 400, description = "Missing name or unknown id", body = ErrorResponse),
    )
)]
pub async fn register_robot(
    State(state): State<AppState>,
    Form(form): Form<RegisterRobotForm>,
) -> Result<impl IntoResponse, ApiError> {
    let robot_id = match form.robot_id.filter(|s| !s.trim().is_empty()) {
        Some(raw) => Some(query::parse_id("robot_id", &raw)?),
        None => None,
    };
    let robot = state
        .service
        .upsert_robot(robot_id, form.robot_name.as_deref())
        .await?;

    let response = RegisterRobotResponse {
        message: format!("robot `{}` registered", robot.robot_name),
        robot: state.projector.robot(&robot),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// `GET /robots` — List robots, optionally filtered.
///
/// # Errors
///
/// Returns [`ApiError`] for a non-numeric `robot_id` or a repository
/// failure.
#[utoipa::path(
    get,
    path = "/robots",
    tag = "Robots",
    summary = "List robots",
    params(RobotQueryParams),
    responses(
        (status = 200, description = "Matching robots", body = Vec<RobotDto>),
        (status = 400, description = "Invalid filter parameter", body = ErrorResponse),
    )
)]
pub async fn list_robots(
    State(state): State<AppState>,
    Query(params): Query<RobotQueryParams>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = query::robot_filter(params.robot_id, params.robot_name)?;
    let robots = state.service.query_robots(&filter).await?;
    Ok(Json(state.projector.robots(&robots)))
}

/// Robot routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/robots", post(register_robot).get(list_robots))
}
