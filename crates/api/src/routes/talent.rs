//! Talent roster routes.

use axum::routing::get;
use axum::Router;

use crate::handlers::talent;
use crate::state::AppState;

/// Routes:
/// - `GET    /talent`
/// - `POST   /talent`
/// - `GET    /talent/{id}`
/// - `PUT    /talent/{id}`
/// - `DELETE /talent/{id}`
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/talent",
            get(talent::list_talent).post(talent::create_talent),
        )
        .route(
            "/talent/{id}",
            get(talent::get_talent)
                .put(talent::update_talent)
                .delete(talent::delete_talent),
        )
}
