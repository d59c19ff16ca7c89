//! Handlers for scoped art-control settings.
//!
//! Settings rows are lazily created per scope; reads walk the
//! story -> sequence -> shot chain and return the merged effective object.
//! Deleting a scope's row reverts that level to full inheritance.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use slate_core::art_control::{resolve, ScopeKind, ScopedArtControl};
use slate_core::error::CoreError;
use slate_core::types::DbId;
use slate_db::models::art_control::UpdateArtControl;
use slate_db::models::story::Story;
use slate_db::repositories::{ArtControlRepo, SequenceRepo, ShotRepo};

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::handlers::stories::fetch_owned_story;
use crate::response::DataResponse;
use crate::state::AppState;

/// A fully resolved scope target: the owning story plus the chain levels
/// below it that apply.
struct ScopeTarget {
    story: Story,
    sequence_id: Option<DbId>,
    shot_id: Option<DbId>,
    scope: ScopeKind,
    scope_id: DbId,
}

impl ScopeTarget {
    async fn story(state: &AppState, user: &AuthUser, story_id: DbId) -> AppResult<Self> {
        let story = fetch_owned_story(state, user, story_id).await?;
        Ok(Self {
            scope_id: story.id,
            story,
            sequence_id: None,
            shot_id: None,
            scope: ScopeKind::Story,
        })
    }

    async fn sequence(state: &AppState, user: &AuthUser, sequence_id: DbId) -> AppResult<Self> {
        let sequence = SequenceRepo::find_by_id(&state.pool, sequence_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "sequence",
                id: sequence_id,
            }))?;
        let story = fetch_owned_story(state, user, sequence.story_id).await?;
        Ok(Self {
            story,
            sequence_id: Some(sequence.id),
            shot_id: None,
            scope: ScopeKind::Sequence,
            scope_id: sequence.id,
        })
    }

    async fn shot(state: &AppState, user: &AuthUser, shot_id: DbId) -> AppResult<Self> {
        let shot = ShotRepo::find_by_id(&state.pool, shot_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "shot",
                id: shot_id,
            }))?;
        let story = fetch_owned_story(state, user, shot.story_id).await?;
        Ok(Self {
            story,
            sequence_id: shot.sequence_id,
            shot_id: Some(shot.id),
            scope: ScopeKind::Shot,
            scope_id: shot.id,
        })
    }

    /// Merge the scope chain, lazily creating the story row (with the
    /// production defaults) and the target scope's row.
    async fn effective(&self, state: &AppState) -> AppResult<impl serde::Serialize> {
        ArtControlRepo::get_or_create(&state.pool, ScopeKind::Story, self.story.id).await?;
        if self.scope != ScopeKind::Story {
            ArtControlRepo::get_or_create(&state.pool, self.scope, self.scope_id).await?;
        }

        let rows = ArtControlRepo::list_for_chain(
            &state.pool,
            self.story.id,
            self.sequence_id,
            self.shot_id,
        )
        .await?;
        let chain: Vec<ScopedArtControl> = rows.into_iter().map(|r| r.into_scoped()).collect();
        Ok(resolve(&chain))
    }
}

// ---------------------------------------------------------------------------
// GET — effective (merged) settings per scope
// ---------------------------------------------------------------------------

pub async fn get_story_art_control(
    State(state): State<AppState>,
    user: AuthUser,
    Path(story_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let target = ScopeTarget::story(&state, &user, story_id).await?;
    Ok(Json(DataResponse {
        data: target.effective(&state).await?,
    }))
}

pub async fn get_sequence_art_control(
    State(state): State<AppState>,
    user: AuthUser,
    Path(sequence_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let target = ScopeTarget::sequence(&state, &user, sequence_id).await?;
    Ok(Json(DataResponse {
        data: target.effective(&state).await?,
    }))
}

pub async fn get_shot_art_control(
    State(state): State<AppState>,
    user: AuthUser,
    Path(shot_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let target = ScopeTarget::shot(&state, &user, shot_id).await?;
    Ok(Json(DataResponse {
        data: target.effective(&state).await?,
    }))
}

// ---------------------------------------------------------------------------
// PUT — per-scope overrides
// ---------------------------------------------------------------------------

async fn apply_update(
    state: &AppState,
    target: &ScopeTarget,
    input: &UpdateArtControl,
) -> AppResult<impl serde::Serialize> {
    let row = ArtControlRepo::get_or_create(&state.pool, target.scope, target.scope_id).await?;
    let updated = ArtControlRepo::update(&state.pool, row.id, input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "art control settings",
            id: row.id,
        }))?;
    tracing::info!(
        settings_id = updated.id,
        scope = target.scope.label(),
        scope_id = target.scope_id,
        "Updated art control settings"
    );
    Ok(updated)
}

pub async fn update_story_art_control(
    State(state): State<AppState>,
    user: AuthUser,
    Path(story_id): Path<DbId>,
    Json(input): Json<UpdateArtControl>,
) -> AppResult<impl IntoResponse> {
    let target = ScopeTarget::story(&state, &user, story_id).await?;
    Ok(Json(DataResponse {
        data: apply_update(&state, &target, &input).await?,
    }))
}

pub async fn update_sequence_art_control(
    State(state): State<AppState>,
    user: AuthUser,
    Path(sequence_id): Path<DbId>,
    Json(input): Json<UpdateArtControl>,
) -> AppResult<impl IntoResponse> {
    let target = ScopeTarget::sequence(&state, &user, sequence_id).await?;
    Ok(Json(DataResponse {
        data: apply_update(&state, &target, &input).await?,
    }))
}

pub async fn update_shot_art_control(
    State(state): State<AppState>,
    user: AuthUser,
    Path(shot_id): Path<DbId>,
    Json(input): Json<UpdateArtControl>,
) -> AppResult<impl IntoResponse> {
    let target = ScopeTarget::shot(&state, &user, shot_id).await?;
    Ok(Json(DataResponse {
        data: apply_update(&state, &target, &input).await?,
    }))
}

// ---------------------------------------------------------------------------
// DELETE — reset one scope to full inheritance
// ---------------------------------------------------------------------------

pub async fn delete_story_art_control(
    State(state): State<AppState>,
    user: AuthUser,
    Path(story_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let target = ScopeTarget::story(&state, &user, story_id).await?;
    ArtControlRepo::delete_for_scope(&state.pool, target.scope, target.scope_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_sequence_art_control(
    State(state): State<AppState>,
    user: AuthUser,
    Path(sequence_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let target = ScopeTarget::sequence(&state, &user, sequence_id).await?;
    ArtControlRepo::delete_for_scope(&state.pool, target.scope, target.scope_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_shot_art_control(
    State(state): State<AppState>,
    user: AuthUser,
    Path(shot_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let target = ScopeTarget::shot(&state, &user, shot_id).await?;
    ArtControlRepo::delete_for_scope(&state.pool, target.scope, target.scope_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
