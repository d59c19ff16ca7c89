//! Department models and DTOs.

use serde::{Deserialize, Serialize};
use slate_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A department row from the `departments` table. Departments are seeded
/// by migration and unique per `department_type`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Department {
    pub id: DbId,
    pub name: String,
    pub department_type: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub is_active: bool,
    pub display_order: i32,
}

/// A row from `story_departments` enabling a department for a story.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StoryDepartment {
    pub id: DbId,
    pub story_id: DbId,
    pub department_id: DbId,
    pub is_active: bool,
    pub notes: String,
    pub assigned_at: Timestamp,
}

/// A row from `asset_department_assignments`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssetDepartmentAssignment {
    pub id: DbId,
    pub asset_id: DbId,
    pub department_id: DbId,
    pub status: String,
    pub priority: String,
    pub due_date: Option<Timestamp>,
    pub notes: String,
    pub assigned_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from `shot_department_assignments`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ShotDepartmentAssignment {
    pub id: DbId,
    pub shot_id: DbId,
    pub department_id: DbId,
    pub status: String,
    pub priority: String,
    pub due_date: Option<Timestamp>,
    pub notes: String,
    pub assigned_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a department work assignment on an asset or shot.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDepartmentAssignment {
    pub target_id: DbId,
    pub department_id: DbId,
    #[serde(default = "default_priority")]
    pub priority: String,
    pub due_date: Option<Timestamp>,
    #[serde(default)]
    pub notes: String,
}

fn default_priority() -> String {
    "medium".to_owned()
}

/// DTO for updating a department work assignment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDepartmentAssignment {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<Timestamp>,
    pub notes: Option<String>,
}
