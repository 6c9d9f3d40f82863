//! Robot and Snapshot entities.
//!
//! The one-to-many Robot↔Snapshot link is a unidirectional foreign key on
//! the snapshot side; a [`Snapshot`] carries its owning [`Robot`] because
//! the repository joins the two tables when loading, never through a
//! back-reference on the robot.

use super::photo::PhotoReference;
use super::timestamp::LogTimestamp;

/// A registered robot in the fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Robot {
    /// Stable integer identifier, server-assigned unless supplied for an
    /// upsert-by-id overwrite.
    pub robot_id: i64,
    /// Human-readable name, never empty.
    pub robot_name: String,
}

/// One accepted snapshot upload.
///
/// Immutable after creation except for `description`, which an external
/// describer process may fill in out-of-band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Server-assigned, monotonically unique identifier.
    pub snapshot_id: i64,
    /// The robot that submitted this snapshot.
    pub robot: Robot,
    /// Robot-reported capture time.
    pub timestamp: LogTimestamp,
    /// Instruction the robot was last given, if any.
    pub instruction: Option<String>,
    /// Auto-generated description, populated after creation.
    pub description: Option<String>,
    /// Handle to the stored photo bytes. Never exposed externally as a
    /// raw path; the API projects it into a retrieval URL.
    pub photo_reference: PhotoReference,
}
