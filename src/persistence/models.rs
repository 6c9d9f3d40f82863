//! Database row models for robots and snapshots.

use sqlx::FromRow;

use crate::domain::{LogTimestamp, PhotoReference, Robot, Snapshot};
use crate::error::ApiError;

/// A row from the `robots` table.
#[derive(Debug, Clone, FromRow)]
pub struct RobotRow {
    /// Primary key.
    pub robot_id: i64,
    /// Robot name, non-empty by schema constraint.
    pub robot_name: String,
}

impl From<RobotRow> for Robot {
    fn from(row: RobotRow) -> Self {
        Self {
            robot_id: row.robot_id,
            robot_name: row.robot_name,
        }
    }
}

/// A snapshot row joined with its owning robot.
#[derive(Debug, Clone, FromRow)]
pub struct SnapshotRow {
    /// Primary key.
    pub snapshot_id: i64,
    /// Foreign key into `robots`.
    pub robot_id: i64,
    /// Joined owning robot's name.
    pub robot_name: String,
    /// Canonical `YYYY-MM-DD HH:MM:SS` text.
    pub timestamp: String,
    /// Last instruction, if any.
    pub instruction: Option<String>,
    /// Out-of-band description, if populated.
    pub description: Option<String>,
    /// Stored photo reference string.
    pub photo_reference: String,
}

impl SnapshotRow {
    /// Converts the row into a domain [`Snapshot`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::RepositoryFailure`] when a stored timestamp or
    /// photo reference is not in canonical form. Both are written
    /// exclusively through validated value types, so a failure here means
    /// the table was modified by something other than this subsystem.
    pub fn into_snapshot(self) -> Result<Snapshot, ApiError> {
        let timestamp = LogTimestamp::parse(&self.timestamp).ok_or_else(|| {
            ApiError::RepositoryFailure(format!(
                "snapshot {} has a non-canonical timestamp",
                self.snapshot_id
            ))
        })?;
        let photo_reference = PhotoReference::parse(&self.photo_reference).ok_or_else(|| {
            ApiError::RepositoryFailure(format!(
                "snapshot {} has a non-canonical photo reference",
                self.snapshot_id
            ))
        })?;
        Ok(Snapshot {
            snapshot_id: self.snapshot_id,
            robot: Robot {
                robot_id: self.robot_id,
                robot_name: self.robot_name,
            },
            timestamp,
            instruction: self.instruction,
            description: self.description,
            photo_reference,
        })
    }
}
