//! Story asset entity model and DTOs.

use serde::{Deserialize, Serialize};
use slate_core::types::DbId;
use sqlx::FromRow;

/// An asset row from the `story_assets` table.
///
/// `asset_type` and `complexity` drive the cost estimate; both are stored
/// as free text and normalized through `slate_core::costing` lookups.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StoryAsset {
    pub id: DbId,
    pub story_id: DbId,
    pub name: String,
    pub asset_type: String,
    pub description: String,
    pub complexity: String,
    pub estimated_cost: f64,
}

/// DTO for creating a new asset.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStoryAsset {
    pub name: String,
    pub asset_type: String,
    pub description: String,
    pub complexity: String,
    pub estimated_cost: f64,
}

/// DTO for updating an existing asset. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStoryAsset {
    pub name: Option<String>,
    pub asset_type: Option<String>,
    pub description: Option<String>,
    pub complexity: Option<String>,
}
