//! Snapshot service: ingestion validation and operation orchestration.

use crate::domain::{PhotoExtension, Robot, RobotFilter, Snapshot, SnapshotFilter};
use crate::error::ApiError;
use crate::persistence::SnapshotRepository;
use crate::storage::PhotoStore;

/// Raw fields of a multipart snapshot submission, before validation.
///
/// Every field is optional here; the validator decides what is required
/// and reports precise, enumerable reasons.
#[derive(Debug, Default)]
pub struct SnapshotUpload {
    /// `robot_id` form field, unparsed.
    pub robot_id: Option<String>,
    /// `timestamp` form field, unparsed.
    pub timestamp: Option<String>,
    /// `instruction` form field, passed through opaque.
    pub instruction: Option<String>,
    /// `photo` file part.
    pub photo: Option<PhotoUpload>,
}

/// An uploaded file part: declared filename plus raw bytes.
#[derive(Debug)]
pub struct PhotoUpload {
    /// Client-supplied filename, used only to read the extension.
    pub file_name: Option<String>,
    /// Raw uploaded bytes.
    pub bytes: Vec<u8>,
}

/// Coordinates the validator, photo store, and repository.
///
/// Every mutation follows the pattern: validate at the boundary → touch
/// durable storage → record in the repository → return the entity.
#[derive(Debug, Clone)]
pub struct SnapshotService {
    repository: SnapshotRepository,
    photo_store: PhotoStore,
}

impl SnapshotService {
    /// Creates a new `SnapshotService`.
    #[must_use]
    pub fn new(repository: SnapshotRepository, photo_store: PhotoStore) -> Self {
        Self {
            repository,
            photo_store,
        }
    }

    /// Validates and records a snapshot submission.
    ///
    /// Checks run in a fixed order, each with its own rejection: field
    /// presence, timestamp format, robot existence, file type. The photo
    /// is persisted only after all four pass, so a rejected submission
    /// never leaves an orphaned photo on disk; the snapshot row is
    /// inserted only after the photo write succeeds, so no row ever
    /// references missing bytes.
    ///
    /// # Errors
    ///
    /// Returns the validator's rejection ([`ApiError::MissingFields`],
    /// [`ApiError::InvalidTimestamp`], [`ApiError::InvalidField`],
    /// [`ApiError::UnknownRobot`], [`ApiError::UnsupportedFileType`]), or
    /// [`ApiError::StorageFailure`] / [`ApiError::RepositoryFailure`]
    /// from the persistence steps.
    pub async fn ingest_snapshot(&self, upload: SnapshotUpload) -> Result<Snapshot, ApiError> {
        let mut missing = Vec::new();
        if upload.photo.as_ref().is_none_or(|p| p.bytes.is_empty()) {
            missing.push("photo");
        }
        if upload
            .timestamp
            .as_deref()
            .is_none_or(|s| s.trim().is_empty())
        {
            missing.push("timestamp");
        }
        if upload
            .robot_id
            .as_deref()
            .is_none_or(|s| s.trim().is_empty())
        {
            missing.push("robot_id");
        }
        if !missing.is_empty() {
            return Err(ApiError::missing_fields(&missing));
        }
        let (Some(photo), Some(raw_timestamp), Some(raw_robot_id)) =
            (upload.photo, upload.timestamp, upload.robot_id)
        else {
            return Err(ApiError::missing_fields(&["photo", "timestamp", "robot_id"]));
        };

        let timestamp = crate::domain::LogTimestamp::parse(&raw_timestamp)
            .ok_or_else(|| ApiError::InvalidTimestamp("timestamp".to_string()))?;

        let robot_id = super::query::parse_id("robot_id", &raw_robot_id)?;
        if self.repository.find_robot(robot_id).await?.is_none() {
            return Err(ApiError::UnknownRobot(robot_id));
        }

        let extension = extension_of(photo.file_name.as_deref())?;

        // All checks passed: persist bytes first, then the record.
        let reference = self.photo_store.store(&photo.bytes, extension).await?;
        let snapshot = self
            .repository
            .insert_snapshot(robot_id, timestamp, upload.instruction.as_deref(), &reference)
            .await?;

        tracing::info!(
            snapshot_id = snapshot.snapshot_id,
            robot_id,
            reference = %reference,
            "snapshot recorded"
        );
        Ok(snapshot)
    }

    /// Registers a robot, or overwrites its name when an id is supplied.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingFields`] for an absent or empty name,
    /// [`ApiError::RobotNotFound`] for an unknown explicit id, or a
    /// repository failure.
    pub async fn upsert_robot(
        &self,
        robot_id: Option<i64>,
        robot_name: Option<&str>,
    ) -> Result<Robot, ApiError> {
        let name = robot_name
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ApiError::missing_fields(&["robot_name"]))?;
        let robot = self.repository.upsert_robot(robot_id, name).await?;
        tracing::info!(robot_id = robot.robot_id, "robot registered");
        Ok(robot)
    }

    /// Lists robots matching the filter.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::RepositoryFailure`] on database failure.
    pub async fn query_robots(&self, filter: &RobotFilter) -> Result<Vec<Robot>, ApiError> {
        self.repository.query_robots(filter).await
    }

    /// Lists snapshots matching the filter.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::RepositoryFailure`] on database failure.
    pub async fn query_snapshots(
        &self,
        filter: &SnapshotFilter,
    ) -> Result<Vec<Snapshot>, ApiError> {
        self.repository.query_snapshots(filter).await
    }

    /// Streams back the stored bytes for a photo reference.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PhotoNotFound`] when nothing is stored under
    /// the reference, [`ApiError::StorageFailure`] on read failure.
    pub async fn photo(
        &self,
        reference: &crate::domain::PhotoReference,
    ) -> Result<Vec<u8>, ApiError> {
        self.photo_store.open(reference).await
    }
}

/// Extracts and whitelists the extension from an uploaded filename.
fn extension_of(file_name: Option<&str>) -> Result<PhotoExtension, ApiError> {
    let provided = file_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext)
        .unwrap_or_default();
    PhotoExtension::parse(provided).ok_or_else(|| ApiError::unsupported_file_type(provided))
}
