//! Cost recomputation after targeted entity edits.
//!
//! Entity update handlers rewrite one row's cost from its effective type,
//! complexity and duration, then call these helpers to keep the derived
//! sequence and story aggregates in line.

use slate_core::costing::{budget_range, sequence_cost, story_total_cost};
use slate_core::types::DbId;
use slate_db::repositories::{SequenceRepo, ShotRepo, StoryAssetRepo, StoryRepo};
use slate_db::DbPool;

use crate::error::PipelineError;

/// Re-sum a story's persisted asset and shot costs and store the new total
/// and budget range. Returns the pair for response payloads.
pub async fn recompute_story_totals(
    pool: &DbPool,
    story_id: DbId,
) -> Result<(f64, String), PipelineError> {
    let assets = StoryAssetRepo::list_for_story(pool, story_id).await?;
    let shots = ShotRepo::list_for_story(pool, story_id).await?;

    let asset_costs: Vec<f64> = assets.iter().map(|a| a.estimated_cost).collect();
    let shot_costs: Vec<f64> = shots.iter().map(|s| s.estimated_cost).collect();
    let total = story_total_cost(&asset_costs, &shot_costs);
    let range = budget_range(total);

    StoryRepo::store_cost_totals(pool, story_id, total, &range).await?;
    Ok((total, range))
}

/// Re-sum one sequence's shot costs and store its cost and shot count.
pub async fn recompute_sequence_totals(
    pool: &DbPool,
    sequence_id: DbId,
) -> Result<f64, PipelineError> {
    let shots = ShotRepo::list_for_sequence(pool, sequence_id).await?;
    let costs: Vec<f64> = shots.iter().map(|s| s.estimated_cost).collect();
    let cost = sequence_cost(&costs);
    SequenceRepo::store_totals(pool, sequence_id, cost, costs.len() as i32).await?;
    Ok(cost)
}
