//! REST endpoint handlers organized by resource.

pub mod photos;
pub mod robots;
pub mod snapshots;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(robots::routes())
        .merge(snapshots::routes())
        .merge(photos::routes())
}
