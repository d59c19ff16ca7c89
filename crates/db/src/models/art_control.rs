//! Art control settings model and DTOs.

use serde::{Deserialize, Serialize};
use slate_core::art_control::{ArtControlValues, ScopeKind, ScopedArtControl};
use slate_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// An art control row from the `art_control_settings` table.
///
/// Exactly one of the three scope foreign keys is non-null; the database
/// enforces this with a CHECK constraint and one partial unique index per
/// scope.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArtControlSettings {
    pub id: DbId,
    pub story_id: Option<DbId>,
    pub sequence_id: Option<DbId>,
    pub shot_id: Option<DbId>,
    pub art_style: String,
    pub color_mood: String,
    pub aspect_ratio: String,
    pub frame_rate: String,
    pub rendering_style: String,
    pub lighting_style: String,
    pub camera_style: String,
    pub atmosphere: Option<String>,
    pub time_of_day: Option<String>,
    pub shot_duration: Option<String>,
    pub color_palette: serde_json::Value,
    pub reference_images: serde_json::Value,
    pub preferred_shot_types: serde_json::Value,
    pub allow_upscale: bool,
    pub lock_continuity: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ArtControlSettings {
    /// The scope this row belongs to, derived from which FK is set.
    pub fn scope(&self) -> ScopeKind {
        if self.shot_id.is_some() {
            ScopeKind::Shot
        } else if self.sequence_id.is_some() {
            ScopeKind::Sequence
        } else {
            ScopeKind::Story
        }
    }

    fn json_list(value: &serde_json::Value) -> Vec<String> {
        value
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_owned))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Converts the row into the pure merge input used by the resolver.
    pub fn into_scoped(self) -> ScopedArtControl {
        let scope = self.scope();
        let scope_id = self
            .shot_id
            .or(self.sequence_id)
            .or(self.story_id)
            .unwrap_or_default();
        ScopedArtControl {
            settings_id: self.id,
            scope,
            scope_id,
            updated_at: self.updated_at,
            values: ArtControlValues {
                art_style: self.art_style,
                color_mood: self.color_mood,
                aspect_ratio: self.aspect_ratio,
                frame_rate: self.frame_rate,
                rendering_style: self.rendering_style,
                lighting_style: self.lighting_style,
                camera_style: self.camera_style,
                atmosphere: self.atmosphere,
                time_of_day: self.time_of_day,
                shot_duration: self.shot_duration,
                color_palette: Self::json_list(&self.color_palette),
                reference_images: Self::json_list(&self.reference_images),
                preferred_shot_types: Self::json_list(&self.preferred_shot_types),
                allow_upscale: self.allow_upscale,
                lock_continuity: self.lock_continuity,
            },
        }
    }
}

/// DTO for updating art control settings at one scope. All fields are
/// optional; omitted fields keep their stored value.
///
/// For the restriction fields (`atmosphere`, `time_of_day`,
/// `shot_duration`), `Some(None)` stores SQL NULL which removes the
/// restriction for narrower scopes, while `Some(Some(""))` stores the
/// inherit marker.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateArtControl {
    pub art_style: Option<String>,
    pub color_mood: Option<String>,
    pub aspect_ratio: Option<String>,
    pub frame_rate: Option<String>,
    pub rendering_style: Option<String>,
    pub lighting_style: Option<String>,
    pub camera_style: Option<String>,
    #[serde(default, deserialize_with = "present_or_null")]
    pub atmosphere: Option<Option<String>>,
    #[serde(default, deserialize_with = "present_or_null")]
    pub time_of_day: Option<Option<String>>,
    #[serde(default, deserialize_with = "present_or_null")]
    pub shot_duration: Option<Option<String>>,
    pub color_palette: Option<Vec<String>>,
    pub reference_images: Option<Vec<String>>,
    pub preferred_shot_types: Option<Vec<String>>,
    pub allow_upscale: Option<bool>,
    pub lock_continuity: Option<bool>,
}

/// Distinguishes an absent key (field untouched) from an explicit JSON
/// null (restriction cleared).
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}
