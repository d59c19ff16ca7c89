//! Handlers for story ingest, listing, detail, regeneration and deletion.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use slate_core::error::CoreError;
use slate_core::types::DbId;
use slate_db::models::story::{CreateStory, Story};
use slate_db::repositories::StoryRepo;
use slate_pipeline::{ingest_story, regenerate_story, repair_parsed_data, IngestOutcome};

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Fetch a story owned by the caller or fail with 404.
///
/// A story owned by someone else is indistinguishable from a missing one.
pub(crate) async fn fetch_owned_story(
    state: &AppState,
    user: &AuthUser,
    id: DbId,
) -> AppResult<Story> {
    StoryRepo::find_for_owner(&state.pool, id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "story",
            id,
        }))
}

// ---------------------------------------------------------------------------
// POST /stories/parse — ingest a new story
// ---------------------------------------------------------------------------

/// Request body for story ingest.
#[derive(Debug, Deserialize)]
pub struct ParseStoryRequest {
    pub title: String,
    pub story_text: String,
}

/// A story plus the structure maps produced by the last parse.
#[derive(Debug, Serialize)]
pub struct StoryWithStructure {
    #[serde(flatten)]
    pub story: Story,
    /// Stringified sequence number -> row id.
    pub sequence_ids: HashMap<String, DbId>,
    /// Stringified shot number -> row id.
    pub shot_ids: HashMap<String, DbId>,
}

impl From<IngestOutcome> for StoryWithStructure {
    fn from(outcome: IngestOutcome) -> Self {
        Self {
            story: outcome.story,
            sequence_ids: outcome.sequence_ids,
            shot_ids: outcome.shot_ids,
        }
    }
}

/// Parse raw story text and persist the full entity tree.
pub async fn parse_story(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<ParseStoryRequest>,
) -> AppResult<impl IntoResponse> {
    if body.title.trim().is_empty() {
        return Err(AppError::BadRequest("title must not be empty".into()));
    }

    let outcome = ingest_story(
        &state.pool,
        &state.parser,
        CreateStory {
            owner_id: user.user_id,
            title: body.title,
            raw_text: body.story_text,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: StoryWithStructure::from(outcome),
        }),
    ))
}

// ---------------------------------------------------------------------------
// GET /stories — list own stories
// ---------------------------------------------------------------------------

pub async fn list_stories(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<impl IntoResponse> {
    let stories = StoryRepo::list_for_owner(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: stories }))
}

// ---------------------------------------------------------------------------
// GET /stories/{id} — detail with read-time snapshot repair
// ---------------------------------------------------------------------------

/// Story detail. Re-verifies the parse snapshot against live rows and
/// persists a healed copy when direct entity edits left stale ids behind.
pub async fn get_story(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let story = fetch_owned_story(&state, &user, id).await?;
    let (parsed_data, _healed) = repair_parsed_data(&state.pool, &story).await?;
    Ok(Json(DataResponse {
        data: Story {
            parsed_data,
            ..story
        },
    }))
}

// ---------------------------------------------------------------------------
// POST /stories/{id}/regenerate — re-parse and reconcile
// ---------------------------------------------------------------------------

/// Re-parse a story's raw text, preserving character/location/asset row
/// ids wherever the match chain finds them. Sequences and shots are
/// rebuilt with fresh ids.
pub async fn regenerate(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let story = fetch_owned_story(&state, &user, id).await?;
    if story.raw_text.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "story has no raw text to re-parse".into(),
        )));
    }

    let outcome = regenerate_story(&state.pool, &state.parser, story.id).await?;
    Ok(Json(DataResponse {
        data: StoryWithStructure::from(outcome),
    }))
}

// ---------------------------------------------------------------------------
// DELETE /stories/{id}
// ---------------------------------------------------------------------------

/// Delete a story and, by cascade, every child entity and assignment.
pub async fn delete_story(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let story = fetch_owned_story(&state, &user, id).await?;
    StoryRepo::delete(&state.pool, story.id).await?;
    tracing::info!(story_id = story.id, owner_id = user.user_id, "Deleted story");
    Ok(StatusCode::NO_CONTENT)
}
