//! Talent assignment models joining talent to characters, assets and shots.

use serde::{Deserialize, Serialize};
use slate_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from `character_talent_assignments`.
///
/// A character may carry several assignments as long as the
/// (character, talent, role_type) triple stays unique.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CharacterTalentAssignment {
    pub id: DbId,
    pub character_id: DbId,
    pub talent_id: DbId,
    pub role_type: String,
    pub status: String,
    pub rate_agreed: Option<f64>,
    pub notes: String,
    pub assigned_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from `asset_talent_assignments`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssetTalentAssignment {
    pub id: DbId,
    pub asset_id: DbId,
    pub talent_id: DbId,
    pub role_type: String,
    pub status: String,
    pub rate_agreed: Option<f64>,
    pub estimated_hours: Option<i32>,
    pub actual_hours: Option<i32>,
    pub notes: String,
    pub assigned_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from `shot_talent_assignments`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ShotTalentAssignment {
    pub id: DbId,
    pub shot_id: DbId,
    pub talent_id: DbId,
    pub role_type: String,
    pub status: String,
    pub rate_agreed: Option<f64>,
    pub estimated_hours: Option<i32>,
    pub actual_hours: Option<i32>,
    pub notes: String,
    pub assigned_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a character assignment.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCharacterAssignment {
    pub character_id: DbId,
    pub talent_id: DbId,
    #[serde(default = "default_voice_role")]
    pub role_type: String,
    pub rate_agreed: Option<f64>,
    #[serde(default)]
    pub notes: String,
}

fn default_voice_role() -> String {
    "voice_actor".to_owned()
}

/// DTO for creating an asset or shot assignment.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorkAssignment {
    pub target_id: DbId,
    pub talent_id: DbId,
    pub role_type: String,
    pub rate_agreed: Option<f64>,
    pub estimated_hours: Option<i32>,
    #[serde(default)]
    pub notes: String,
}

/// DTO for updating any assignment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAssignment {
    pub status: Option<String>,
    pub rate_agreed: Option<f64>,
    pub estimated_hours: Option<i32>,
    pub actual_hours: Option<i32>,
    pub notes: Option<String>,
}

/// A talent cost line joined across an assignment and its talent row, used
/// by cost breakdowns.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TalentCostLine {
    pub assignment_id: DbId,
    pub talent_id: DbId,
    pub talent_name: String,
    pub talent_type: String,
    pub status: String,
    pub rate_agreed: Option<f64>,
    pub hourly_rate: Option<f64>,
    pub daily_rate: Option<f64>,
    pub estimated_hours: Option<i32>,
}
