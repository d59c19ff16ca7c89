//! Route tree assembly.
//!
//! Everything under `/api/v1` requires a bearer token; the health probe
//! sits at the root so load balancers can reach it unauthenticated.

pub mod art_control;
pub mod assignments;
pub mod departments;
pub mod health;
pub mod stories;
pub mod talent;

use axum::Router;

use crate::state::AppState;

/// All authenticated API routes, mounted under `/api/v1`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(stories::router())
        .merge(art_control::router())
        .merge(talent::router())
        .merge(assignments::router())
        .merge(departments::router())
}
