//! Sequence entity model and DTOs.

use serde::{Deserialize, Serialize};
use slate_core::types::DbId;
use sqlx::FromRow;

/// A sequence row from the `story_sequences` table.
///
/// `sequence_number` is the stable external identifier across a single
/// parse; it is not globally unique. Sequence rows do not survive
/// regeneration.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Sequence {
    pub id: DbId,
    pub story_id: DbId,
    pub sequence_number: i32,
    pub title: String,
    pub description: String,
    pub location_id: Option<DbId>,
    pub estimated_time: String,
    pub total_shots: i32,
    pub estimated_cost: f64,
}

/// DTO for creating a new sequence.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSequence {
    pub sequence_number: i32,
    pub title: String,
    pub description: String,
    pub location_id: Option<DbId>,
    pub estimated_time: String,
    pub total_shots: i32,
}

/// A sequence with its live shot count, for breakdown reporting.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SequenceWithShotCount {
    pub id: DbId,
    pub sequence_number: i32,
    pub title: String,
    pub estimated_cost: f64,
    pub shot_count: i64,
}
