//! Field-update handlers for a story's child entities.
//!
//! Asset and shot updates rewrite the row's cost from its effective type,
//! complexity and duration, then re-sum the derived sequence and story
//! aggregates. The parse snapshot keeps its ids; the detail read path
//! heals any drift these edits introduce.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use slate_core::costing::{asset_cost, shot_cost, AssetType, Complexity};
use slate_core::error::CoreError;
use slate_core::types::DbId;
use slate_db::models::character::UpdateCharacter;
use slate_db::models::location::UpdateLocation;
use slate_db::models::shot::UpdateShot;
use slate_db::models::story_asset::UpdateStoryAsset;
use slate_db::repositories::{CharacterRepo, LocationRepo, ShotRepo, StoryAssetRepo};
use slate_pipeline::costing::{recompute_sequence_totals, recompute_story_totals};

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::handlers::stories::fetch_owned_story;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(entity: &'static str, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity, id })
}

// ---------------------------------------------------------------------------
// PUT /stories/{id}/characters/{character_id}
// ---------------------------------------------------------------------------

pub async fn update_character(
    State(state): State<AppState>,
    user: AuthUser,
    Path((story_id, character_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateCharacter>,
) -> AppResult<impl IntoResponse> {
    let story = fetch_owned_story(&state, &user, story_id).await?;

    let character = CharacterRepo::find_by_id(&state.pool, character_id)
        .await?
        .filter(|c| c.story_id == story.id)
        .ok_or_else(|| not_found("character", character_id))?;

    let updated = CharacterRepo::update(&state.pool, character.id, &input)
        .await?
        .ok_or_else(|| not_found("character", character_id))?;
    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// PUT /stories/{id}/locations/{location_id}
// ---------------------------------------------------------------------------

pub async fn update_location(
    State(state): State<AppState>,
    user: AuthUser,
    Path((story_id, location_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateLocation>,
) -> AppResult<impl IntoResponse> {
    let story = fetch_owned_story(&state, &user, story_id).await?;

    let location = LocationRepo::find_by_id(&state.pool, location_id)
        .await?
        .filter(|l| l.story_id == story.id)
        .ok_or_else(|| not_found("location", location_id))?;

    let updated = LocationRepo::update(&state.pool, location.id, &input)
        .await?
        .ok_or_else(|| not_found("location", location_id))?;
    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// PUT /stories/{id}/assets/{asset_id}
// ---------------------------------------------------------------------------

/// Update payload plus the refreshed story aggregates.
#[derive(Debug, Serialize)]
pub struct UpdatedWithTotals<T: Serialize> {
    #[serde(flatten)]
    pub entity: T,
    pub total_estimated_cost: f64,
    pub budget_range: String,
}

/// Update an asset. Type or complexity changes recompute the asset's cost
/// and the story totals.
pub async fn update_asset(
    State(state): State<AppState>,
    user: AuthUser,
    Path((story_id, asset_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateStoryAsset>,
) -> AppResult<impl IntoResponse> {
    let story = fetch_owned_story(&state, &user, story_id).await?;

    let asset = StoryAssetRepo::find_by_id(&state.pool, asset_id)
        .await?
        .filter(|a| a.story_id == story.id)
        .ok_or_else(|| not_found("asset", asset_id))?;

    let asset_type = input.asset_type.as_deref().unwrap_or(&asset.asset_type);
    let complexity = input.complexity.as_deref().unwrap_or(&asset.complexity);
    let cost = asset_cost(
        AssetType::from_label(asset_type),
        Complexity::from_label(complexity),
    );

    let updated = StoryAssetRepo::update(&state.pool, asset.id, &input, cost)
        .await?
        .ok_or_else(|| not_found("asset", asset_id))?;
    let (total, range) = recompute_story_totals(&state.pool, story.id).await?;

    Ok(Json(DataResponse {
        data: UpdatedWithTotals {
            entity: updated,
            total_estimated_cost: total,
            budget_range: range,
        },
    }))
}

// ---------------------------------------------------------------------------
// PUT /stories/{id}/shots/{shot_id}
// ---------------------------------------------------------------------------

/// Update a shot. Complexity or duration changes recompute the shot's
/// cost, its sequence rollup and the story totals.
pub async fn update_shot(
    State(state): State<AppState>,
    user: AuthUser,
    Path((story_id, shot_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateShot>,
) -> AppResult<impl IntoResponse> {
    let story = fetch_owned_story(&state, &user, story_id).await?;

    let shot = ShotRepo::find_by_id(&state.pool, shot_id)
        .await?
        .filter(|s| s.story_id == story.id)
        .ok_or_else(|| not_found("shot", shot_id))?;

    let complexity = input.complexity.as_deref().unwrap_or(&shot.complexity);
    let estimated_time = input
        .estimated_time
        .as_deref()
        .unwrap_or(&shot.estimated_time);
    let cost = shot_cost(Complexity::from_label(complexity), estimated_time);

    let updated = ShotRepo::update(&state.pool, shot.id, &input, cost)
        .await?
        .ok_or_else(|| not_found("shot", shot_id))?;

    if let Some(sequence_id) = updated.sequence_id {
        recompute_sequence_totals(&state.pool, sequence_id).await?;
    }
    let (total, range) = recompute_story_totals(&state.pool, story.id).await?;

    Ok(Json(DataResponse {
        data: UpdatedWithTotals {
            entity: updated,
            total_estimated_cost: total,
            budget_range: range,
        },
    }))
}
