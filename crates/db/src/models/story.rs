//! Story entity model and DTOs.

use serde::{Deserialize, Serialize};
use slate_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A story row from the `stories` table.
///
/// `parsed_data` mirrors the last structured parse, enriched with entity ids
/// and costs; ids present in it must reference live child rows.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Story {
    pub id: DbId,
    pub owner_id: DbId,
    pub title: String,
    pub raw_text: String,
    pub parsed_data: serde_json::Value,
    pub summary: String,
    pub total_shots: i32,
    pub estimated_total_time: String,
    pub total_estimated_cost: f64,
    pub budget_range: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new story.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStory {
    pub owner_id: DbId,
    pub title: String,
    pub raw_text: String,
}

/// Aggregate fields rewritten after every ingest or regeneration.
#[derive(Debug, Clone)]
pub struct StoryParseResults {
    pub title: String,
    pub parsed_data: serde_json::Value,
    pub summary: String,
    pub total_shots: i32,
    pub estimated_total_time: String,
    pub total_estimated_cost: f64,
    pub budget_range: String,
}
