//! Talent assignment handlers for characters, assets and shots.
//!
//! Every mutation resolves the assignment's parent entity back to an
//! owned story before touching the row. Status changes are validated
//! against the assignment workflow so stored statuses stay reachable.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use slate_core::error::CoreError;
use slate_core::types::DbId;
use slate_db::models::status::AssignmentStatus;
use slate_db::models::talent_assignment::{
    AssetTalentAssignment, CharacterTalentAssignment, CreateCharacterAssignment,
    CreateWorkAssignment, ShotTalentAssignment, UpdateAssignment,
};
use slate_db::repositories::{
    AssetAssignmentRepo, CharacterAssignmentRepo, CharacterRepo, ShotAssignmentRepo, ShotRepo,
    StoryAssetRepo, TalentRepo,
};

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::handlers::stories::fetch_owned_story;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(entity: &'static str, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity, id })
}

/// Reject a status change the workflow does not allow. A `None` next
/// status is a no-op.
fn check_transition(current: &str, next: Option<&str>) -> AppResult<()> {
    let Some(next) = next else { return Ok(()) };
    let from = AssignmentStatus::parse(current)?;
    let to = AssignmentStatus::parse(next)?;
    if from != to && !from.can_transition(to) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "assignment cannot move from {} to {}",
            from.as_str(),
            to.as_str()
        ))));
    }
    Ok(())
}

/// Fail with 404 unless the talent exists, so a bad talent id does not
/// surface as a foreign key violation.
async fn ensure_talent_exists(state: &AppState, talent_id: DbId) -> AppResult<()> {
    TalentRepo::find_by_id(&state.pool, talent_id)
        .await?
        .ok_or_else(|| not_found("talent", talent_id))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Parent-to-story ownership walks
// ---------------------------------------------------------------------------

async fn owned_character(state: &AppState, user: &AuthUser, character_id: DbId) -> AppResult<()> {
    let character = CharacterRepo::find_by_id(&state.pool, character_id)
        .await?
        .ok_or_else(|| not_found("character", character_id))?;
    fetch_owned_story(state, user, character.story_id).await?;
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
// GET /stories/{id}/assignments
// ---------------------------------------------------------------------------

/// All of a story's assignments, grouped by parent entity kind.
#[derive(Debug, Serialize)]
pub struct StoryAssignments {
    pub characters: Vec<CharacterTalentAssignment>,
    pub assets: Vec<AssetTalentAssignment>,
    pub shots: Vec<ShotTalentAssignment>,
}

pub async fn list_story_assignments(
    State(state): State<AppState>,
    user: AuthUser,
    Path(story_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let story = fetch_owned_story(&state, &user, story_id).await?;

    let characters = CharacterAssignmentRepo::list_for_story(&state.pool, story.id).await?;
    let assets = AssetAssignmentRepo::list_for_story(&state.pool, story.id).await?;
    let shots = ShotAssignmentRepo::list_for_story(&state.pool, story.id).await?;

    Ok(Json(DataResponse {
        data: StoryAssignments {
            characters,
            assets,
            shots,
        },
    }))
}

// ---------------------------------------------------------------------------
// Character assignments
// ---------------------------------------------------------------------------

pub async fn create_character_assignment(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateCharacterAssignment>,
) -> AppResult<impl IntoResponse> {
    owned_character(&state, &user, input.character_id).await?;
    ensure_talent_exists(&state, input.talent_id).await?;

    let assignment = CharacterAssignmentRepo::create(&state.pool, &input).await?;
    tracing::info!(
        assignment_id = assignment.id,
        character_id = input.character_id,
        talent_id = input.talent_id,
        "Created character assignment"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: assignment })))
}

pub async fn update_character_assignment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAssignment>,
) -> AppResult<impl IntoResponse> {
    let current = CharacterAssignmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("assignment", id))?;
    owned_character(&state, &user, current.character_id).await?;
    check_transition(&current.status, input.status.as_deref())?;

    let updated = CharacterAssignmentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("assignment", id))?;
    Ok(Json(DataResponse { data: updated }))
}

pub async fn delete_character_assignment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let current = CharacterAssignmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("assignment", id))?;
    owned_character(&state, &user, current.character_id).await?;

    CharacterAssignmentRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Asset assignments
// ---------------------------------------------------------------------------

pub async fn create_asset_assignment(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateWorkAssignment>,
) -> AppResult<impl IntoResponse> {
    owned_asset(&state, &user, input.target_id).await?;
    ensure_talent_exists(&state, input.talent_id).await?;

    let assignment = AssetAssignmentRepo::create(&state.pool, &input).await?;
    tracing::info!(
        assignment_id = assignment.id,
        asset_id = input.target_id,
        talent_id = input.talent_id,
        "Created asset assignment"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: assignment })))
}

pub async fn update_asset_assignment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAssignment>,
) -> AppResult<impl IntoResponse> {
    let current = AssetAssignmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("assignment", id))?;
    owned_asset(&state, &user, current.asset_id).await?;
    check_transition(&current.status, input.status.as_deref())?;

    let updated = AssetAssignmentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("assignment", id))?;
    Ok(Json(DataResponse { data: updated }))
}

pub async fn delete_asset_assignment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let current = AssetAssignmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("assignment", id))?;
    owned_asset(&state, &user, current.asset_id).await?;

    AssetAssignmentRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Shot assignments
// ---------------------------------------------------------------------------

pub async fn create_shot_assignment(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateWorkAssignment>,
) -> AppResult<impl IntoResponse> {
    owned_shot(&state, &user, input.target_id).await?;
    ensure_talent_exists(&state, input.talent_id).await?;

    let assignment = ShotAssignmentRepo::create(&state.pool, &input).await?;
    tracing::info!(
        assignment_id = assignment.id,
        shot_id = input.target_id,
        talent_id = input.talent_id,
        "Created shot assignment"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: assignment })))
}

pub async fn update_shot_assignment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAssignment>,
) -> AppResult<impl IntoResponse> {
    let current = ShotAssignmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("assignment", id))?;
    owned_shot(&state, &user, current.shot_id).await?;
    check_transition(&current.status, input.status.as_deref())?;

    let updated = ShotAssignmentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("assignment", id))?;
    Ok(Json(DataResponse { data: updated }))
}

pub async fn delete_shot_assignment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let current = ShotAssignmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("assignment", id))?;
    owned_shot(&state, &user, current.shot_id).await?;

    ShotAssignmentRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use slate_core::error::CoreError;

    use super::check_transition;
    use crate::error::AppError;

    #[test]
    fn transition_absent_status_is_noop() {
        assert!(check_transition("proposed", None).is_ok());
    }

    #[test]
    fn transition_same_status_allowed() {
        assert!(check_transition("confirmed", Some("confirmed")).is_ok());
    }

    #[test]
    fn transition_forward_allowed() {
        assert!(check_transition("proposed", Some("contacted")).is_ok());
        assert!(check_transition("negotiating", Some("confirmed")).is_ok());
        assert!(check_transition("in_progress", Some("completed")).is_ok());
    }

    #[test]
    fn transition_skip_rejected() {
        let err = check_transition("proposed", Some("confirmed")).unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::Validation(_)));
        assert!(check_transition("contacted", Some("completed")).is_err());
    }

    #[test]
    fn transition_unknown_status_rejected() {
        assert!(check_transition("proposed", Some("paused")).is_err());
    }
}
