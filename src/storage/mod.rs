//! Storage layer: durable photo byte storage.
//!
//! [`PhotoStore`] is the only writer of the upload directory. The area is
//! append-only from this subsystem's perspective: bytes written under a
//! reference are never rewritten or deleted here.

pub mod photo_store;

pub use photo_store::PhotoStore;
