//! # adventure-log
//!
//! Snapshot ingestion and query backend for a fleet of autonomous robots.
//!
//! Each robot periodically uploads a snapshot — a photo plus a timestamp
//! and the instruction it was last given — which this service validates,
//! persists, and makes queryable through conjunctive filters. An external
//! describer process may later attach a description to a snapshot; this
//! service only stores and serves it.
//!
//! ## Architecture
//!
//! ```text
//! Robots (HTTP multipart uploads, queries)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── SnapshotService: validation + orchestration (service/)
//!     │
//!     ├── PhotoStore: collision-free byte storage (storage/)
//!     └── SnapshotRepository: SQLite relational model (persistence/)
//! ```
//!
//! An upload flows validator → photo store → repository → projector, in
//! that order, so a rejected submission never leaves an orphaned photo
//! and no snapshot row ever references missing bytes.

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod storage;
