//! Domain layer: core entities and value types.
//!
//! This module contains the Robot and Snapshot entities, the validated
//! timestamp and photo-reference value types, and the normalized filter
//! structs consumed by the repository.

pub mod entity;
pub mod filter;
pub mod photo;
pub mod timestamp;

pub use entity::{Robot, Snapshot};
pub use filter::{RobotFilter, SnapshotFilter};
pub use photo::{PhotoExtension, PhotoReference};
pub use timestamp::LogTimestamp;
