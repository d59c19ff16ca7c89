//! Talent pool model and DTOs.

use serde::{Deserialize, Serialize};
use slate_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A talent row from the `talent_pool` table.
///
/// Rates are optional; a talent with neither an hourly nor a daily rate
/// contributes zero to cost breakdowns.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Talent {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub talent_type: String,
    pub hourly_rate: Option<f64>,
    pub daily_rate: Option<f64>,
    pub availability_status: String,
    pub specializations: serde_json::Value,
    pub languages: serde_json::Value,
    pub portfolio_url: String,
    pub notes: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new talent.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTalent {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub talent_type: String,
    pub hourly_rate: Option<f64>,
    pub daily_rate: Option<f64>,
    #[serde(default)]
    pub specializations: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub portfolio_url: String,
    #[serde(default)]
    pub notes: String,
}

/// DTO for updating an existing talent. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTalent {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub talent_type: Option<String>,
    pub hourly_rate: Option<f64>,
    pub daily_rate: Option<f64>,
    pub availability_status: Option<String>,
    pub specializations: Option<Vec<String>>,
    pub languages: Option<Vec<String>>,
    pub portfolio_url: Option<String>,
    pub notes: Option<String>,
}
