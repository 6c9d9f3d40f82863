//! Normalized query filters.
//!
//! Every field is optional; absence means "no constraint", never "match
//! nothing". All present filters are ANDed together by the repository.
//! Pattern fields use SQL `LIKE` semantics (`%` any-length, `_` single
//! character) and are passed through unmodified.

use super::timestamp::LogTimestamp;

/// Filter set for robot queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RobotFilter {
    /// Exact robot id.
    pub robot_id: Option<i64>,
    /// `LIKE` pattern over `robot_name`.
    pub name_pattern: Option<String>,
}

/// Filter set for snapshot queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotFilter {
    /// Exact owning robot id.
    pub robot_id: Option<i64>,
    /// Exact snapshot id.
    pub snapshot_id: Option<i64>,
    /// Inclusive lower timestamp bound.
    pub t_start: Option<LogTimestamp>,
    /// Inclusive upper timestamp bound.
    pub t_end: Option<LogTimestamp>,
    /// `LIKE` pattern over `instruction`.
    pub instruction_pattern: Option<String>,
}
