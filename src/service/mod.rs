//! Service layer: ingestion validation, orchestration, and query building.
//!
//! [`SnapshotService`] coordinates the validator, photo store, and
//! repository; [`query`] turns raw optional request parameters into
//! normalized filters.

pub mod query;
pub mod snapshot_service;

pub use snapshot_service::{PhotoUpload, SnapshotService, SnapshotUpload};
