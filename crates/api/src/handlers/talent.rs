//! CRUD handlers for the studio-wide talent roster.
//!
//! The roster is shared; it is not scoped to a story or an owner. Name
//! and email search is a case-insensitive substring match applied after
//! the typed filters.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use slate_core::error::CoreError;
use slate_core::types::DbId;
use slate_db::models::talent::{CreateTalent, UpdateTalent};
use slate_db::repositories::TalentRepo;

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "talent",
        id,
    })
}

// ---------------------------------------------------------------------------
// GET /talent
// ---------------------------------------------------------------------------

/// Query filters for the roster listing.
#[derive(Debug, Default, Deserialize)]
pub struct TalentListQuery {
    pub talent_type: Option<String>,
    pub availability: Option<String>,
    pub search: Option<String>,
}

pub async fn list_talent(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(filter): Query<TalentListQuery>,
) -> AppResult<impl IntoResponse> {
    let mut roster = TalentRepo::list(
        &state.pool,
        filter.talent_type.as_deref(),
        filter.availability.as_deref(),
    )
    .await?;

    if let Some(search) = filter.search.as_deref().map(str::trim) {
        if !search.is_empty() {
            let needle = search.to_lowercase();
            roster.retain(|t| {
                t.name.to_lowercase().contains(&needle)
                    || t.email.to_lowercase().contains(&needle)
            });
        }
    }

    Ok(Json(DataResponse { data: roster }))
}

// ---------------------------------------------------------------------------
// POST /talent
// ---------------------------------------------------------------------------

pub async fn create_talent(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<CreateTalent>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".into()));
    }
    if input.talent_type.trim().is_empty() {
        return Err(AppError::BadRequest("talent_type must not be empty".into()));
    }

    let talent = TalentRepo::create(&state.pool, &input).await?;
    tracing::info!(talent_id = talent.id, "Created talent");
    Ok((StatusCode::CREATED, Json(DataResponse { data: talent })))
}

// ---------------------------------------------------------------------------
// GET /talent/{id}
// ---------------------------------------------------------------------------

pub async fn get_talent(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let talent = TalentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: talent }))
}

// ---------------------------------------------------------------------------
// PUT /talent/{id}
// ---------------------------------------------------------------------------

pub async fn update_talent(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTalent>,
) -> AppResult<impl IntoResponse> {
    let talent = TalentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: talent }))
}

// ---------------------------------------------------------------------------
// DELETE /talent/{id}
// ---------------------------------------------------------------------------

/// Delete a talent. Its assignments cascade with it.
pub async fn delete_talent(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !TalentRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(talent_id = id, "Deleted talent");
    Ok(StatusCode::NO_CONTENT)
}
