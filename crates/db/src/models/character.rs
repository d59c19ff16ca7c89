//! Character entity model and DTOs.

use serde::{Deserialize, Serialize};
use slate_core::types::DbId;
use sqlx::FromRow;

/// A character row from the `story_characters` table.
///
/// `name` is the display key used for identity matching across
/// regenerations.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Character {
    pub id: DbId,
    pub story_id: DbId,
    pub name: String,
    pub description: String,
    pub role: String,
    pub appearances: i32,
}

/// DTO for creating a new character.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCharacter {
    pub name: String,
    pub description: String,
    pub role: String,
    pub appearances: i32,
}

/// DTO for updating an existing character. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCharacter {
    pub name: Option<String>,
    pub description: Option<String>,
    pub role: Option<String>,
    pub appearances: Option<i32>,
}
