//! Cost breakdown report handler.
//!
//! Reads the story's persisted entity costs and live talent assignments,
//! then hands the snapshots to the pure aggregator. Nothing here mutates.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use slate_core::breakdown::{
    breakdown, AssetCostRow, SequenceCostRow, ShotCostRow, TalentCostRow,
};
use slate_core::types::DbId;
use slate_db::repositories::{
    talent_cost_lines_for_story, SequenceRepo, ShotRepo, StoryAssetRepo,
};

use crate::auth::AuthUser;
use crate::error::AppResult;
use crate::handlers::stories::fetch_owned_story;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /stories/{id}/cost-breakdown
///
/// Aggregates persisted asset, shot and sequence costs with live talent
/// assignment rates into per-category subtotals and a grand total.
pub async fn get_cost_breakdown(
    State(state): State<AppState>,
    user: AuthUser,
    Path(story_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let story = fetch_owned_story(&state, &user, story_id).await?;

    let assets: Vec<AssetCostRow> = StoryAssetRepo::list_for_story(&state.pool, story.id)
        .await?
        .into_iter()
        .map(|a| AssetCostRow {
            asset_type: a.asset_type,
            estimated_cost: a.estimated_cost,
        })
        .collect();

    let shots: Vec<ShotCostRow> = ShotRepo::list_for_story(&state.pool, story.id)
        .await?
        .into_iter()
        .map(|s| ShotCostRow {
            complexity: s.complexity,
            estimated_cost: s.estimated_cost,
        })
        .collect();

    let sequences: Vec<SequenceCostRow> = SequenceRepo::list_with_shot_counts(&state.pool, story.id)
        .await?
        .into_iter()
        .map(|s| SequenceCostRow {
            sequence_id: s.id,
            sequence_number: s.sequence_number,
            title: s.title,
            estimated_cost: s.estimated_cost,
            shot_count: s.shot_count,
        })
        .collect();

    let talent: Vec<TalentCostRow> = talent_cost_lines_for_story(&state.pool, story.id)
        .await?
        .into_iter()
        .map(|line| TalentCostRow {
            talent_type: line.talent_type,
            rate_agreed: line.rate_agreed,
            estimated_hours: line.estimated_hours.map(f64::from),
        })
        .collect();

    let report = breakdown(
        story.id,
        story.total_estimated_cost,
        &assets,
        &shots,
        &sequences,
        &talent,
    );
    Ok(Json(DataResponse { data: report }))
}
