//! Talent assignment routes.
//!
//! Creation posts to the parent kind; updates and deletes address the
//! assignment row directly, with ownership re-checked through its parent.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::assignments;
use crate::state::AppState;

/// Routes:
/// - `GET    /stories/{id}/assignments`
/// - `POST   /assignments/characters`
/// - `PUT    /assignments/characters/{id}`
/// - `DELETE /assignments/characters/{id}`
/// - `POST   /assignments/assets`
/// - `PUT    /assignments/assets/{id}`
/// - `DELETE /assignments/assets/{id}`
/// - `POST   /assignments/shots`
/// - `PUT    /assignments/shots/{id}`
/// - `DELETE /assignments/shots/{id}`
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/stories/{id}/assignments",
            get(assignments::list_story_assignments),
        )
        .route(
            "/assignments/characters",
            post(assignments::create_character_assignment),
        )
        .route(
            "/assignments/characters/{id}",
            put(assignments::update_character_assignment)
                .delete(assignments::delete_character_assignment),
        )
        .route(
            "/assignments/assets",
            post(assignments::create_asset_assignment),
        )
        .route(
            "/assignments/assets/{id}",
            put(assignments::update_asset_assignment).delete(assignments::delete_asset_assignment),
        )
        .route(
            "/assignments/shots",
            post(assignments::create_shot_assignment),
        )
        .route(
            "/assignments/shots/{id}",
            put(assignments::update_shot_assignment).delete(assignments::delete_shot_assignment),
        )
}
