//! Handlers for the department catalogue, per-story enablement and
//! department work assignments.
//!
//! The catalogue is seeded by migration and read-only over the API.
//! Work assignment status changes go through the review-gated workflow:
//! approved work closes out, rejected work goes back in progress, and
//! completed work never reopens.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use slate_core::error::CoreError;
use slate_core::types::DbId;
use slate_db::models::department::{CreateDepartmentAssignment, UpdateDepartmentAssignment};
use slate_db::models::status::WorkStatus;
use slate_db::repositories::{
    AssetDepartmentRepo, DepartmentRepo, ShotDepartmentRepo, ShotRepo, StoryAssetRepo,
};

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::handlers::stories::fetch_owned_story;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(entity: &'static str, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity, id })
}

/// Reject a work status change the workflow does not allow. A `None`
/// next status is a no-op.
fn check_transition(current: &str, next: Option<&str>) -> AppResult<()> {
    let Some(next) = next else { return Ok(()) };
    let from = WorkStatus::parse(current)?;
    let to = WorkStatus::parse(next)?;
    if from != to && !from.can_transition(to) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "work assignment cannot move from {} to {}",
            from.as_str(),
            to.as_str()
        ))));
    }
    Ok(())
}

async fn ensure_department_exists(state: &AppState, department_id: DbId) -> AppResult<()> {
    DepartmentRepo::find_by_id(&state.pool, department_id)
        .await?
        .ok_or_else(|| not_found("department", department_id))?;
    Ok(())
}

async fn owned_asset(state: &AppState, user: &AuthUser, asset_id: DbId) -> AppResult<()> {
    let asset = StoryAssetRepo::find_by_id(&state.pool, asset_id)
        .await?
        .ok_or_else(|| not_found("asset", asset_id))?;
    fetch_owned_story(state, user, asset.story_id).await?;
    Ok(())
}

async fn owned_shot(state: &AppState, user: &AuthUser, shot_id: DbId) -> AppResult<()> {
    let shot = ShotRepo::find_by_id(&state.pool, shot_id)
        .await?
        .ok_or_else(|| not_found("shot", shot_id))?;
    fetch_owned_story(state, user, shot.story_id).await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Catalogue and per-story enablement
// ---------------------------------------------------------------------------

/// GET /departments — the active catalogue in display order.
pub async fn list_departments(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<impl IntoResponse> {
    let departments = DepartmentRepo::list_active(&state.pool).await?;
    Ok(Json(DataResponse { data: departments }))
}

/// GET /stories/{id}/departments — departments enabled for one story.
pub async fn list_story_departments(
    State(state): State<AppState>,
    user: AuthUser,
    Path(story_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let story = fetch_owned_story(&state, &user, story_id).await?;
    let departments = DepartmentRepo::list_enabled_for_story(&state.pool, story.id).await?;
    Ok(Json(DataResponse { data: departments }))
}

/// POST /stories/{id}/departments/{department_id} — enable (idempotent).
pub async fn enable_story_department(
    State(state): State<AppState>,
    user: AuthUser,
    Path((story_id, department_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let story = fetch_owned_story(&state, &user, story_id).await?;
    ensure_department_exists(&state, department_id).await?;

    let enabled = DepartmentRepo::enable_for_story(&state.pool, story.id, department_id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: enabled })))
}

/// DELETE /stories/{id}/departments/{department_id} — disable. The row
/// stays behind with its flag off so notes survive a re-enable.
pub async fn disable_story_department(
    State(state): State<AppState>,
    user: AuthUser,
    Path((story_id, department_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let story = fetch_owned_story(&state, &user, story_id).await?;
    if !DepartmentRepo::disable_for_story(&state.pool, story.id, department_id).await? {
        return Err(not_found("story department", department_id));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Asset department assignments
// ---------------------------------------------------------------------------

pub async fn create_asset_department_assignment(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateDepartmentAssignment>,
) -> AppResult<impl IntoResponse> {
    owned_asset(&state, &user, input.target_id).await?;
    ensure_department_exists(&state, input.department_id).await?;

    let assignment = AssetDepartmentRepo::create(&state.pool, &input).await?;
    tracing::info!(
        assignment_id = assignment.id,
        asset_id = input.target_id,
        department_id = input.department_id,
        "Created asset department assignment"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: assignment })))
}

pub async fn list_asset_department_assignments(
    State(state): State<AppState>,
    user: AuthUser,
    Path(story_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let story = fetch_owned_story(&state, &user, story_id).await?;
    let assignments = AssetDepartmentRepo::list_for_story(&state.pool, story.id).await?;
    Ok(Json(DataResponse { data: assignments }))
}

pub async fn update_asset_department_assignment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDepartmentAssignment>,
) -> AppResult<impl IntoResponse> {
    let current = AssetDepartmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("department assignment", id))?;
    owned_asset(&state, &user, current.asset_id).await?;
    check_transition(&current.status, input.status.as_deref())?;

    let updated = AssetDepartmentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("department assignment", id))?;
    Ok(Json(DataResponse { data: updated }))
}

pub async fn delete_asset_department_assignment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let current = AssetDepartmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("department assignment", id))?;
    owned_asset(&state, &user, current.asset_id).await?;

    AssetDepartmentRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Shot department assignments
// ---------------------------------------------------------------------------

pub async fn create_shot_department_assignment(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateDepartmentAssignment>,
) -> AppResult<impl IntoResponse> {
    owned_shot(&state, &user, input.target_id).await?;
    ensure_department_exists(&state, input.department_id).await?;

    let assignment = ShotDepartmentRepo::create(&state.pool, &input).await?;
    tracing::info!(
        assignment_id = assignment.id,
        shot_id = input.target_id,
        department_id = input.department_id,
        "Created shot department assignment"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: assignment })))
}

pub async fn list_shot_department_assignments(
    State(state): State<AppState>,
    user: AuthUser,
    Path(story_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let story = fetch_owned_story(&state, &user, story_id).await?;
    let assignments = ShotDepartmentRepo::list_for_story(&state.pool, story.id).await?;
    Ok(Json(DataResponse { data: assignments }))
}

pub async fn update_shot_department_assignment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDepartmentAssignment>,
) -> AppResult<impl IntoResponse> {
    let current = ShotDepartmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("department assignment", id))?;
    owned_shot(&state, &user, current.shot_id).await?;
    check_transition(&current.status, input.status.as_deref())?;

    let updated = ShotDepartmentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("department assignment", id))?;
    Ok(Json(DataResponse { data: updated }))
}

pub async fn delete_shot_department_assignment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let current = ShotDepartmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("department assignment", id))?;
    owned_shot(&state, &user, current.shot_id).await?;

    ShotDepartmentRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::check_transition;

    #[test]
    fn transition_absent_status_is_noop() {
        assert!(check_transition("pending", None).is_ok());
    }

    #[test]
    fn transition_review_gates_completion() {
        assert!(check_transition("review", Some("approved")).is_ok());
        assert!(check_transition("review", Some("rejected")).is_ok());
        assert!(check_transition("approved", Some("completed")).is_ok());
        assert!(check_transition("review", Some("completed")).is_err());
    }

    #[test]
    fn transition_rejection_reopens() {
        assert!(check_transition("rejected", Some("in_progress")).is_ok());
        assert!(check_transition("completed", Some("in_progress")).is_err());
    }

    #[test]
    fn transition_unknown_status_rejected() {
        assert!(check_transition("pending", Some("waiting")).is_err());
    }
}
