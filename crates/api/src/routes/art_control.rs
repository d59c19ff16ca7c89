//! Art control routes for the story, sequence and shot scopes.

use axum::routing::get;
use axum::Router;

use crate::handlers::art_control;
use crate::state::AppState;

/// Routes:
/// - `GET    /stories/{id}/art-control`
/// - `PUT    /stories/{id}/art-control`
/// - `DELETE /stories/{id}/art-control`
/// - `GET    /sequences/{id}/art-control`
/// - `PUT    /sequences/{id}/art-control`
/// - `DELETE /sequences/{id}/art-control`
/// - `GET    /shots/{id}/art-control`
/// - `PUT    /shots/{id}/art-control`
/// - `DELETE /shots/{id}/art-control`
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/stories/{id}/art-control",
            get(art_control::get_story_art_control)
                .put(art_control::update_story_art_control)
                .delete(art_control::delete_story_art_control),
        )
        .route(
            "/sequences/{id}/art-control",
            get(art_control::get_sequence_art_control)
                .put(art_control::update_sequence_art_control)
                .delete(art_control::delete_sequence_art_control),
        )
        .route(
            "/shots/{id}/art-control",
            get(art_control::get_shot_art_control)
                .put(art_control::update_shot_art_control)
                .delete(art_control::delete_shot_art_control),
        )
}
