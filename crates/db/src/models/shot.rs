//! Shot entity model and DTOs.

use serde::{Deserialize, Serialize};
use slate_core::types::DbId;
use sqlx::FromRow;

/// A shot row from the `story_shots` table.
///
/// `shot_number` is the external identifier within a sequence. Shot rows do
/// not survive regeneration.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Shot {
    pub id: DbId,
    pub story_id: DbId,
    pub sequence_id: Option<DbId>,
    pub shot_number: i32,
    pub description: String,
    pub location_id: Option<DbId>,
    pub camera_angle: String,
    pub complexity: String,
    pub estimated_time: String,
    pub special_requirements: serde_json::Value,
    pub estimated_cost: f64,
}

/// DTO for creating a new shot.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateShot {
    pub sequence_id: Option<DbId>,
    pub shot_number: i32,
    pub description: String,
    pub location_id: Option<DbId>,
    pub camera_angle: String,
    pub complexity: String,
    pub estimated_time: String,
    pub special_requirements: serde_json::Value,
    pub estimated_cost: f64,
}

/// DTO for updating an existing shot. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateShot {
    pub description: Option<String>,
    pub camera_angle: Option<String>,
    pub complexity: Option<String>,
    pub estimated_time: Option<String>,
    pub special_requirements: Option<serde_json::Value>,
}
