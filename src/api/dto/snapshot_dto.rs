//! Snapshot-related DTOs for upload responses and listing.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::robot_dto::RobotDto;

/// External representation of a snapshot.
///
/// Carries a derived `photo_url`; the underlying storage reference and
/// path are deliberately absent.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SnapshotDto {
    /// Server-assigned snapshot identifier.
    pub snapshot_id: i64,
    /// The owning robot.
    pub robot: RobotDto,
    /// Capture time, `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
    /// Instruction the robot was last given, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
    /// Auto-generated description, if populated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// URL under which the stored photo can be retrieved.
    pub photo_url: String,
}

/// Query parameters for `GET /snapshots`.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SnapshotQueryParams {
    /// Exact owning robot id.
    #[serde(default)]
    pub robot_id: Option<String>,
    /// Exact snapshot id.
    #[serde(default)]
    pub snapshot_id: Option<String>,
    /// Inclusive lower timestamp bound, `YYYY-MM-DD HH:MM:SS`.
    #[serde(default)]
    pub t_start: Option<String>,
    /// Inclusive upper timestamp bound, `YYYY-MM-DD HH:MM:SS`.
    #[serde(default)]
    pub t_end: Option<String>,
    /// Instruction pattern with `%`/`_` wildcards.
    #[serde(default)]
    pub instruction: Option<String>,
}
