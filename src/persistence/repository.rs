//! The snapshot repository: all reads and writes of the relational model.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::models::{RobotRow, SnapshotRow};
use crate::domain::{LogTimestamp, PhotoReference, Robot, RobotFilter, Snapshot, SnapshotFilter};
use crate::error::ApiError;

/// SQLite-backed repository owning the `robots` and `snapshots` tables.
///
/// Every mutation runs in one transaction; a record is observable to
/// queries only after the call returns successfully. Query results use a
/// documented stable order: ascending `robot_id` for robots, ascending
/// `snapshot_id` for snapshots.
#[derive(Debug, Clone)]
pub struct SnapshotRepository {
    pool: SqlitePool,
}

impl SnapshotRepository {
    /// Creates a repository over the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Looks up a robot by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::RepositoryFailure`] on database failure.
    pub async fn find_robot(&self, robot_id: i64) -> Result<Option<Robot>, ApiError> {
        let row: Option<RobotRow> =
            sqlx::query_as("SELECT robot_id, robot_name FROM robots WHERE robot_id = ?1")
                .bind(robot_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| ApiError::repository(&e))?;
        Ok(row.map(Robot::from))
    }

    /// Creates a robot, or overwrites its name when `robot_id` is given.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::RobotNotFound`] when `robot_id` is given but
    /// absent, [`ApiError::RepositoryFailure`] on database failure.
    pub async fn upsert_robot(
        &self,
        robot_id: Option<i64>,
        robot_name: &str,
    ) -> Result<Robot, ApiError> {
        let mut tx = self.pool.begin().await.map_err(|e| ApiError::repository(&e))?;

        let robot = match robot_id {
            Some(id) => {
                let result = sqlx::query("UPDATE robots SET robot_name = ?1 WHERE robot_id = ?2")
                    .bind(robot_name)
                    .bind(id)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| ApiError::repository(&e))?;
                if result.rows_affected() == 0 {
                    return Err(ApiError::RobotNotFound(id));
                }
                Robot {
                    robot_id: id,
                    robot_name: robot_name.to_string(),
                }
            }
            None => {
                let result = sqlx::query("INSERT INTO robots (robot_name) VALUES (?1)")
                    .bind(robot_name)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| ApiError::repository(&e))?;
                Robot {
                    robot_id: result.last_insert_rowid(),
                    robot_name: robot_name.to_string(),
                }
            }
        };

        tx.commit().await.map_err(|e| ApiError::repository(&e))?;
        Ok(robot)
    }

    /// Lists robots matching all provided filters, ascending by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::RepositoryFailure`] on database failure.
    pub async fn query_robots(&self, filter: &RobotFilter) -> Result<Vec<Robot>, ApiError> {
        let mut qb: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new("SELECT robot_id, robot_name FROM robots WHERE 1 = 1");
        if let Some(id) = filter.robot_id {
            qb.push(" AND robot_id = ").push_bind(id);
        }
        if let Some(pattern) = filter.name_pattern.as_deref() {
            qb.push(" AND robot_name LIKE ").push_bind(pattern);
        }
        qb.push(" ORDER BY robot_id ASC");

        let rows: Vec<RobotRow> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ApiError::repository(&e))?;
        Ok(rows.into_iter().map(Robot::from).collect())
    }

    /// Inserts a snapshot for an existing robot.
    ///
    /// Robot existence is re-checked inside the insert transaction, with
    /// the foreign-key constraint as the final authority, so a robot
    /// vanishing between the validator's check and this call cannot leave
    /// a dangling snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::RobotNotFound`] when `robot_id` does not
    /// exist, [`ApiError::RepositoryFailure`] on constraint violation or
    /// database failure.
    pub async fn insert_snapshot(
        &self,
        robot_id: i64,
        timestamp: LogTimestamp,
        instruction: Option<&str>,
        photo_reference: &PhotoReference,
    ) -> Result<Snapshot, ApiError> {
        let mut tx = self.pool.begin().await.map_err(|e| ApiError::repository(&e))?;

        let robot: Option<RobotRow> =
            sqlx::query_as("SELECT robot_id, robot_name FROM robots WHERE robot_id = ?1")
                .bind(robot_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| ApiError::repository(&e))?;
        let Some(robot) = robot else {
            return Err(ApiError::RobotNotFound(robot_id));
        };

        let result = sqlx::query(
            "INSERT INTO snapshots (robot_id, timestamp, instruction, photo_reference) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(robot_id)
        .bind(timestamp.to_string())
        .bind(instruction)
        .bind(photo_reference.as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| ApiError::repository(&e))?;
        let snapshot_id = result.last_insert_rowid();

        tx.commit().await.map_err(|e| ApiError::repository(&e))?;

        Ok(Snapshot {
            snapshot_id,
            robot: robot.into(),
            timestamp,
            instruction: instruction.map(ToString::to_string),
            description: None,
            photo_reference: photo_reference.clone(),
        })
    }

    /// Lists snapshots matching all provided filters, ascending by
    /// snapshot id, each joined with its owning robot.
    ///
    /// Timestamp bounds are inclusive on both ends.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::RepositoryFailure`] on database failure or a
    /// row that fails canonical-form conversion.
    pub async fn query_snapshots(
        &self,
        filter: &SnapshotFilter,
    ) -> Result<Vec<Snapshot>, ApiError> {
        let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new(
            "SELECT s.snapshot_id, s.robot_id, r.robot_name, s.timestamp, \
             s.instruction, s.description, s.photo_reference \
             FROM snapshots s JOIN robots r ON r.robot_id = s.robot_id WHERE 1 = 1",
        );
        if let Some(id) = filter.robot_id {
            qb.push(" AND s.robot_id = ").push_bind(id);
        }
        if let Some(id) = filter.snapshot_id {
            qb.push(" AND s.snapshot_id = ").push_bind(id);
        }
        if let Some(t_start) = filter.t_start {
            qb.push(" AND s.timestamp >= ").push_bind(t_start.to_string());
        }
        if let Some(t_end) = filter.t_end {
            qb.push(" AND s.timestamp <= ").push_bind(t_end.to_string());
        }
        if let Some(pattern) = filter.instruction_pattern.as_deref() {
            qb.push(" AND s.instruction LIKE ").push_bind(pattern);
        }
        qb.push(" ORDER BY s.snapshot_id ASC");

        let rows: Vec<SnapshotRow> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ApiError::repository(&e))?;
        rows.into_iter().map(SnapshotRow::into_snapshot).collect()
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

    use super::*;
    use crate::domain::PhotoExtension;

    async fn memory_repository() -> SnapshotRepository {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .unwrap()
            .foreign_keys(true);
        // A single connection keeps every handle on the same in-memory db.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .unwrap();
        sqlx::migrate!().run(&pool).await.unwrap();
        SnapshotRepository::new(pool)
    }

    fn ts(raw: &str) -> LogTimestamp {
        LogTimestamp::parse(raw).unwrap()
    }

    async fn insert_for(
        repo: &SnapshotRepository,
        robot_id: i64,
        timestamp: &str,
        instruction: Option<&str>,
    ) -> Snapshot {
        let reference = PhotoReference::generate(PhotoExtension::Jpg);
        repo.insert_snapshot(robot_id, ts(timestamp), instruction, &reference)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn upsert_without_id_assigns_fresh_ids() {
        let repo = memory_repository().await;
        let rover = repo.upsert_robot(None, "Rover").await.unwrap();
        let lander = repo.upsert_robot(None, "Lander").await.unwrap();
        assert_eq!(rover.robot_name, "Rover");
        assert_ne!(rover.robot_id, lander.robot_id);
    }

    #[tokio::test]
    async fn upsert_with_known_id_overwrites_name() {
        let repo = memory_repository().await;
        let rover = repo.upsert_robot(None, "Rover").await.unwrap();
        let renamed = repo
            .upsert_robot(Some(rover.robot_id), "Rover Mk2")
            .await
            .unwrap();
        assert_eq!(renamed.robot_id, rover.robot_id);
        assert_eq!(renamed.robot_name, "Rover Mk2");

        let found = repo.find_robot(rover.robot_id).await.unwrap().unwrap();
        assert_eq!(found.robot_name, "Rover Mk2");
    }

    #[tokio::test]
    async fn upsert_with_unknown_id_is_rejected() {
        let repo = memory_repository().await;
        let err = repo.upsert_robot(Some(99), "Ghost").await.unwrap_err();
        assert!(matches!(err, ApiError::RobotNotFound(99)));
        // The rejected upsert must not have created anything.
        assert!(repo.find_robot(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn query_robots_filters_conjunctively() {
        let repo = memory_repository().await;
        let rover = repo.upsert_robot(None, "Rover").await.unwrap();
        repo.upsert_robot(None, "Lander").await.unwrap();
        repo.upsert_robot(None, "Roller").await.unwrap();

        let by_pattern = repo
            .query_robots(&RobotFilter {
                robot_id: None,
                name_pattern: Some("Ro%".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(by_pattern.len(), 2);

        let by_both = repo
            .query_robots(&RobotFilter {
                robot_id: Some(rover.robot_id),
                name_pattern: Some("R_ver".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(by_both, vec![rover]);

        let unconstrained = repo.query_robots(&RobotFilter::default()).await.unwrap();
        assert_eq!(unconstrained.len(), 3);
    }

    #[tokio::test]
    async fn insert_snapshot_requires_existing_robot() {
        let repo = memory_repository().await;
        let reference = PhotoReference::generate(PhotoExtension::Png);
        let err = repo
            .insert_snapshot(42, ts("2025-03-27 13:22:00"), None, &reference)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::RobotNotFound(42)));
        assert!(
            repo.query_snapshots(&SnapshotFilter::default())
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn insert_snapshot_returns_joined_robot() {
        let repo = memory_repository().await;
        let rover = repo.upsert_robot(None, "Rover").await.unwrap();
        let snapshot = insert_for(&repo, rover.robot_id, "2025-03-27 13:22:00", Some("turn_left"))
            .await;
        assert_eq!(snapshot.robot, rover);
        assert_eq!(snapshot.instruction.as_deref(), Some("turn_left"));
        assert!(snapshot.description.is_none());
    }

    #[tokio::test]
    async fn duplicate_photo_reference_is_a_repository_failure() {
        let repo = memory_repository().await;
        let rover = repo.upsert_robot(None, "Rover").await.unwrap();
        let reference = PhotoReference::generate(PhotoExtension::Jpg);
        repo.insert_snapshot(rover.robot_id, ts("2025-03-27 13:22:00"), None, &reference)
            .await
            .unwrap();
        let err = repo
            .insert_snapshot(rover.robot_id, ts("2025-03-27 13:23:00"), None, &reference)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::RepositoryFailure(_)));
    }

    #[tokio::test]
    async fn timestamp_range_bounds_are_inclusive() {
        let repo = memory_repository().await;
        let rover = repo.upsert_robot(None, "Rover").await.unwrap();
        for raw in [
            "2025-03-27 13:21:59",
            "2025-03-27 13:22:00",
            "2025-03-27 13:25:00",
            "2025-03-27 13:30:00",
            "2025-03-27 13:30:01",
        ] {
            insert_for(&repo, rover.robot_id, raw, None).await;
        }

        let hits = repo
            .query_snapshots(&SnapshotFilter {
                t_start: Some(ts("2025-03-27 13:22:00")),
                t_end: Some(ts("2025-03-27 13:30:00")),
                ..SnapshotFilter::default()
            })
            .await
            .unwrap();
        let stamps: Vec<String> = hits.iter().map(|s| s.timestamp.to_string()).collect();
        assert_eq!(
            stamps,
            vec![
                "2025-03-27 13:22:00",
                "2025-03-27 13:25:00",
                "2025-03-27 13:30:00",
            ]
        );
    }

    #[tokio::test]
    async fn snapshot_filters_are_conjunctive() {
        let repo = memory_repository().await;
        let rover = repo.upsert_robot(None, "Rover").await.unwrap();
        let lander = repo.upsert_robot(None, "Lander").await.unwrap();
        insert_for(&repo, rover.robot_id, "2025-03-27 13:22:00", Some("turn_left")).await;
        insert_for(&repo, rover.robot_id, "2025-03-27 13:23:00", Some("halt")).await;
        insert_for(&repo, lander.robot_id, "2025-03-27 13:24:00", Some("turn_right")).await;

        let hits = repo
            .query_snapshots(&SnapshotFilter {
                robot_id: Some(rover.robot_id),
                instruction_pattern: Some("turn%".to_string()),
                ..SnapshotFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(
            hits.first().and_then(|s| s.instruction.as_deref()),
            Some("turn_left")
        );
    }

    #[tokio::test]
    async fn snapshot_id_filter_selects_one() {
        let repo = memory_repository().await;
        let rover = repo.upsert_robot(None, "Rover").await.unwrap();
        let first = insert_for(&repo, rover.robot_id, "2025-03-27 13:22:00", None).await;
        insert_for(&repo, rover.robot_id, "2025-03-27 13:23:00", None).await;

        let hits = repo
            .query_snapshots(&SnapshotFilter {
                snapshot_id: Some(first.snapshot_id),
                ..SnapshotFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(hits, vec![first]);
    }

    #[tokio::test]
    async fn results_are_ordered_by_ascending_snapshot_id() {
        let repo = memory_repository().await;
        let rover = repo.upsert_robot(None, "Rover").await.unwrap();
        // Inserted out of chronological order on purpose.
        insert_for(&repo, rover.robot_id, "2025-03-27 13:30:00", None).await;
        insert_for(&repo, rover.robot_id, "2025-03-27 13:20:00", None).await;
        insert_for(&repo, rover.robot_id, "2025-03-27 13:25:00", None).await;

        let hits = repo.query_snapshots(&SnapshotFilter::default()).await.unwrap();
        let ids: Vec<i64> = hits.iter().map(|s| s.snapshot_id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }
}
