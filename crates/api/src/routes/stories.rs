//! Story routes: ingest, listing, detail, regeneration, deletion, child
//! entity updates and the cost breakdown report.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{breakdown, entities, stories};
use crate::state::AppState;

/// Routes:
/// - `POST   /stories/parse`
/// - `GET    /stories`
/// - `GET    /stories/{id}`
/// - `POST   /stories/{id}/regenerate`
/// - `DELETE /stories/{id}`
/// - `PUT    /stories/{id}/characters/{character_id}`
/// - `PUT    /stories/{id}/locations/{location_id}`
/// - `PUT    /stories/{id}/assets/{asset_id}`
/// - `PUT    /stories/{id}/shots/{shot_id}`
/// - `GET    /stories/{id}/cost-breakdown`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stories/parse", post(stories::parse_story))
        .route("/stories", get(stories::list_stories))
        .route(
            "/stories/{id}",
            get(stories::get_story).delete(stories::delete_story),
        )
        .route("/stories/{id}/regenerate", post(stories::regenerate))
        .route(
            "/stories/{id}/characters/{character_id}",
            put(entities::update_character),
        )
        .route(
            "/stories/{id}/locations/{location_id}",
            put(entities::update_location),
        )
        .route("/stories/{id}/assets/{asset_id}", put(entities::update_asset))
        .route("/stories/{id}/shots/{shot_id}", put(entities::update_shot))
        .route(
            "/stories/{id}/cost-breakdown",
            get(breakdown::get_cost_breakdown),
        )
}
