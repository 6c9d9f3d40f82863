//! Robot-related DTOs for registration and listing.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Form body for `POST /robots`.
///
/// Fields arrive as strings from the form encoding; `robot_id` is parsed
/// at the boundary.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RegisterRobotForm {
    /// Optional existing id for an overwrite-by-id registration.
    #[serde(default)]
    pub robot_id: Option<String>,
    /// Robot name, required and non-empty.
    #[serde(default)]
    pub robot_name: Option<String>,
}

/// Response body for `POST /robots` (201 Created).
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterRobotResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// The created or updated robot.
    pub robot: RobotDto,
}

/// External representation of a robot.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RobotDto {
    /// Stable robot identifier.
    pub robot_id: i64,
    /// Robot name.
    pub robot_name: String,
}

/// Query parameters for `GET /robots`.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct RobotQueryParams {
    /// Exact robot id.
    #[serde(default)]
    pub robot_id: Option<String>,
    /// Name pattern with `%`/`_` wildcards.
    #[serde(default)]
    pub robot_name: Option<String>,
}
