//! Query builder: raw optional request parameters → normalized filters.
//!
//! Pure functions, no I/O. An absent or empty parameter means "no
//! constraint". Numeric ids are parsed here, timestamp bounds are
//! validated with the same exact format as ingestion, and pattern
//! strings pass through unmodified.

use crate::domain::{LogTimestamp, RobotFilter, SnapshotFilter};
use crate::error::ApiError;

/// Parses a required integer id out of a raw string field.
///
/// # Errors
///
/// Returns [`ApiError::InvalidField`] when the value is not an integer.
pub fn parse_id(field: &str, raw: &str) -> Result<i64, ApiError> {
    raw.trim().parse().map_err(|_| ApiError::InvalidField {
        field: field.to_string(),
        reason: format!("`{raw}` is not an integer"),
    })
}

/// Builds a [`RobotFilter`] from raw query parameters.
///
/// # Errors
///
/// Returns [`ApiError::InvalidField`] when `robot_id` is present but not
/// numeric.
pub fn robot_filter(
    robot_id: Option<String>,
    robot_name: Option<String>,
) -> Result<RobotFilter, ApiError> {
    let robot_id = match non_empty(robot_id) {
        Some(raw) => Some(parse_id("robot_id", &raw)?),
        None => None,
    };
    Ok(RobotFilter {
        robot_id,
        name_pattern: non_empty(robot_name),
    })
}

/// Builds a [`SnapshotFilter`] from raw query parameters.
///
/// # Errors
///
/// Returns [`ApiError::InvalidField`] for non-numeric ids and
/// [`ApiError::InvalidTimestamp`] for malformed bounds.
pub fn snapshot_filter(
    robot_id: Option<String>,
    snapshot_id: Option<String>,
    t_start: Option<String>,
    t_end: Option<String>,
    instruction: Option<String>,
) -> Result<SnapshotFilter, ApiError> {
    let robot_id = match non_empty(robot_id) {
        Some(raw) => Some(parse_id("robot_id", &raw)?),
        None => None,
    };
    let snapshot_id = match non_empty(snapshot_id) {
        Some(raw) => Some(parse_id("snapshot_id", &raw)?),
        None => None,
    };
    let t_start = match non_empty(t_start) {
        Some(raw) => Some(parse_bound("t_start", &raw)?),
        None => None,
    };
    let t_end = match non_empty(t_end) {
        Some(raw) => Some(parse_bound("t_end", &raw)?),
        None => None,
    };
    Ok(SnapshotFilter {
        robot_id,
        snapshot_id,
        t_start,
        t_end,
        instruction_pattern: non_empty(instruction),
    })
}

/// Parses a timestamp bound with the exact ingestion format.
fn parse_bound(field: &str, raw: &str) -> Result<LogTimestamp, ApiError> {
    LogTimestamp::parse(raw).ok_or_else(|| ApiError::InvalidTimestamp(field.to_string()))
}

/// Normalizes a parameter: missing or blank both mean "no constraint".
fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_blank_parameters_mean_no_constraint() {
        let filter = snapshot_filter(None, Some(String::new()), Some("  ".to_string()), None, None)
            .unwrap();
        assert_eq!(filter, SnapshotFilter::default());
    }

    #[test]
    fn ids_are_parsed() {
        let filter = robot_filter(Some("7".to_string()), None).unwrap();
        assert_eq!(filter.robot_id, Some(7));
    }

    #[test]
    fn non_numeric_id_is_invalid_field() {
        let err = robot_filter(Some("seven".to_string()), None).unwrap_err();
        assert!(matches!(err, ApiError::InvalidField { field, .. } if field == "robot_id"));
    }

    #[test]
    fn bounds_use_the_ingestion_timestamp_format() {
        let filter = snapshot_filter(
            None,
            None,
            Some("2025-03-27 00:00:00".to_string()),
            Some("2025-03-27 23:59:59".to_string()),
            None,
        )
        .unwrap();
        assert!(filter.t_start.is_some());
        assert!(filter.t_end.is_some());

        let err = snapshot_filter(None, None, Some("03/27/2025".to_string()), None, None)
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidTimestamp(field) if field == "t_start"));
    }

    #[test]
    fn patterns_pass_through_unmodified() {
        let filter = robot_filter(None, Some("Ro%_r".to_string())).unwrap();
        assert_eq!(filter.name_pattern.as_deref(), Some("Ro%_r"));

        let filter = snapshot_filter(None, None, None, None, Some("turn_%".to_string())).unwrap();
        assert_eq!(filter.instruction_pattern.as_deref(), Some("turn_%"));
    }
}
