//! Location entity model and DTOs.

use serde::{Deserialize, Serialize};
use slate_core::types::DbId;
use sqlx::FromRow;

/// A location row from the `story_locations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Location {
    pub id: DbId,
    pub story_id: DbId,
    pub name: String,
    pub description: String,
    pub location_type: String,
    pub scenes: i32,
}

/// DTO for creating a new location.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLocation {
    pub name: String,
    pub description: String,
    pub location_type: String,
    pub scenes: i32,
}

/// DTO for updating an existing location. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLocation {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location_type: Option<String>,
    pub scenes: Option<i32>,
}
