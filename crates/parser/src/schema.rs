//! The structured story shape requested from the completion service.
//!
//! Field names match the JSON schema embedded in the prompt. Every field is
//! `#[serde(default)]` because completion output is best-effort; a missing
//! list decodes as empty rather than failing the whole parse.
//!
//! `id` and `estimated_cost` are enrichment fields: absent in raw completion
//! output, injected by the reconciliation pipeline before the structure is
//! stored as a story's `parsed_data`.

use serde::{Deserialize, Serialize};
use slate_core::types::DbId;

/// A character extracted from the script.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedCharacter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DbId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub appearances: i32,
}

/// A location extracted from the script.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DbId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "type")]
    pub location_type: String,
    #[serde(default)]
    pub scenes: i32,
}

/// A production asset extracted from the script.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedAsset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DbId>,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub asset_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub complexity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<f64>,
}

/// A narrative scene grouping of shots.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedSequence {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DbId>,
    #[serde(default)]
    pub sequence_number: i32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub characters: Vec<String>,
    #[serde(default)]
    pub estimated_time: String,
    #[serde(default)]
    pub total_shots: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<f64>,
}

/// One individual camera take, nested under a sequence by number.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedShot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DbId>,
    #[serde(default)]
    pub shot_number: i32,
    #[serde(default)]
    pub sequence_number: i32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub characters: Vec<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub camera_angle: String,
    #[serde(default)]
    pub complexity: String,
    #[serde(default)]
    pub estimated_time: String,
    #[serde(default)]
    pub special_requirements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<f64>,
}

/// The full structured parse of one story.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedStory {
    #[serde(default)]
    pub characters: Vec<ParsedCharacter>,
    #[serde(default)]
    pub locations: Vec<ParsedLocation>,
    #[serde(default)]
    pub assets: Vec<ParsedAsset>,
    #[serde(default)]
    pub sequences: Vec<ParsedSequence>,
    #[serde(default)]
    pub shots: Vec<ParsedShot>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub total_sequences: i32,
    #[serde(default)]
    pub total_shots: i32,
    #[serde(default)]
    pub estimated_total_time: String,
    /// Aggregate enrichment written by the pipeline, absent in raw output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_estimated_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_range: Option<String>,
}

impl ParsedStory {
    /// Empty-but-valid skeleton used on every parser error path.
    pub fn empty() -> Self {
        Self::default()
    }
}
