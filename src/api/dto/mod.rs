//! Data Transfer Objects and the response projector.
//!
//! [`Projector`] shapes stored entities into their external
//! representations. The stored photo reference is only ever surfaced as a
//! resolvable `photo_url`, never as a filesystem path.

pub mod robot_dto;
pub mod snapshot_dto;

pub use robot_dto::*;
pub use snapshot_dto::*;

use crate::domain::{Robot, Snapshot};

/// Projects domain entities into outward-facing payloads.
#[derive(Debug, Clone)]
pub struct Projector {
    base_url: String,
}

impl Projector {
    /// Creates a projector that composes photo URLs onto `public_base_url`.
    #[must_use]
    pub fn new(public_base_url: &str) -> Self {
        Self {
            base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Robot → `{robot_id, robot_name}`.
    #[must_use]
    pub fn robot(&self, robot: &Robot) -> RobotDto {
        RobotDto {
            robot_id: robot.robot_id,
            robot_name: robot.robot_name.clone(),
        }
    }

    /// Projects a sequence of robots.
    #[must_use]
    pub fn robots(&self, robots: &[Robot]) -> Vec<RobotDto> {
        robots.iter().map(|r| self.robot(r)).collect()
    }

    /// Snapshot → external representation with a derived `photo_url`.
    #[must_use]
    pub fn snapshot(&self, snapshot: &Snapshot) -> SnapshotDto {
        SnapshotDto {
            snapshot_id: snapshot.snapshot_id,
            robot: self.robot(&snapshot.robot),
            timestamp: snapshot.timestamp.to_string(),
            instruction: snapshot.instruction.clone(),
            description: snapshot.description.clone(),
            photo_url: format!("{}/snapshots/{}", self.base_url, snapshot.photo_reference),
        }
    }

    /// Projects a sequence of snapshots.
    #[must_use]
    pub fn snapshots(&self, snapshots: &[Snapshot]) -> Vec<SnapshotDto> {
        snapshots.iter().map(|s| self.snapshot(s)).collect()
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::{LogTimestamp, PhotoExtension, PhotoReference};

    fn sample_snapshot() -> Snapshot {
        Snapshot {
            snapshot_id: 3,
            robot: Robot {
                robot_id: 1,
                robot_name: "Rover".to_string(),
            },
            timestamp: LogTimestamp::parse("2025-03-27 13:22:00").unwrap(),
            instruction: Some("turn_left".to_string()),
            description: None,
            photo_reference: PhotoReference::generate(PhotoExtension::Jpg),
        }
    }

    #[test]
    fn photo_url_composes_base_and_reference() {
        let snapshot = sample_snapshot();
        let dto = Projector::new("http://logs.example:3000/").snapshot(&snapshot);
        assert_eq!(
            dto.photo_url,
            format!(
                "http://logs.example:3000/snapshots/{}",
                snapshot.photo_reference
            )
        );
    }

    #[test]
    fn payload_never_contains_a_raw_path() {
        let dto = Projector::new("http://localhost:3000").snapshot(&sample_snapshot());
        let json = serde_json::to_string(&dto).unwrap();
        assert!(!json.contains("photo_reference"));
        assert!(!json.contains("uploads"));
    }

    #[test]
    fn nested_robot_is_projected() {
        let dto = Projector::new("http://localhost:3000").snapshot(&sample_snapshot());
        assert_eq!(dto.robot.robot_id, 1);
        assert_eq!(dto.robot.robot_name, "Rover");
        assert_eq!(dto.timestamp, "2025-03-27 13:22:00");
    }
}
