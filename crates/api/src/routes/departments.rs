//! Department catalogue, per-story enablement and work assignment routes.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::departments;
use crate::state::AppState;

/// Routes:
/// - `GET    /departments`
/// - `GET    /stories/{id}/departments`
/// - `POST   /stories/{id}/departments/{department_id}`
/// - `DELETE /stories/{id}/departments/{department_id}`
/// - `GET    /stories/{id}/department-assignments/assets`
/// - `GET    /stories/{id}/department-assignments/shots`
/// - `POST   /department-assignments/assets`
/// - `PUT    /department-assignments/assets/{id}`
/// - `DELETE /department-assignments/assets/{id}`
/// - `POST   /department-assignments/shots`
/// - `PUT    /department-assignments/shots/{id}`
/// - `DELETE /department-assignments/shots/{id}`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/departments", get(departments::list_departments))
        .route(
            "/stories/{id}/departments",
            get(departments::list_story_departments),
        )
        .route(
            "/stories/{id}/departments/{department_id}",
            post(departments::enable_story_department)
                .delete(departments::disable_story_department),
        )
        .route(
            "/stories/{id}/department-assignments/assets",
            get(departments::list_asset_department_assignments),
        )
        .route(
            "/stories/{id}/department-assignments/shots",
            get(departments::list_shot_department_assignments),
        )
        .route(
            "/department-assignments/assets",
            post(departments::create_asset_department_assignment),
        )
        .route(
            "/department-assignments/assets/{id}",
            put(departments::update_asset_department_assignment)
                .delete(departments::delete_asset_department_assignment),
        )
        .route(
            "/department-assignments/shots",
            post(departments::create_shot_department_assignment),
        )
        .route(
            "/department-assignments/shots/{id}",
            put(departments::update_shot_department_assignment)
                .delete(departments::delete_shot_department_assignment),
        )
}
