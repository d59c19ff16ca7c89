//! Art-control settings and their layered inheritance merge.
//!
//! Settings rows attach to a story, a sequence, or a shot. Resolution walks
//! the chain from broadest (story) to narrowest (shot) and folds each level's
//! overrides into one effective object. Field semantics:
//!
//! - scalar strings: narrower value wins when non-empty, empty inherits;
//! - restriction fields (atmosphere, time_of_day, shot_duration): `None` at a
//!   narrower level is a deliberate "remove restriction" and always wins,
//!   empty string inherits, any other value wins;
//! - lists: replaced wholesale when the narrower list is non-empty;
//! - booleans: narrower value always wins;
//! - metadata (ids, timestamps) is never merged, only carried from the
//!   narrowest scope.

use crate::types::{DbId, Timestamp};

/// Default art style applied when a story-level row is lazily created.
pub const DEFAULT_ART_STYLE: &str = "realistic";
/// Default color mood for new story-level rows.
pub const DEFAULT_COLOR_MOOD: &str = "neutral";
/// Default aspect ratio for new story-level rows.
pub const DEFAULT_ASPECT_RATIO: &str = "16:9";
/// Default frame rate for new story-level rows (meaningful at story scope only).
pub const DEFAULT_FRAME_RATE: &str = "24";

/// Which level of the hierarchy a settings row attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeKind {
    Story,
    Sequence,
    Shot,
}

impl ScopeKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Story => "story",
            Self::Sequence => "sequence",
            Self::Shot => "shot",
        }
    }
}

/// The mergeable fields of one art-control row.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ArtControlValues {
    // Scalar style fields: empty string means "inherit".
    pub art_style: String,
    pub color_mood: String,
    pub aspect_ratio: String,
    pub frame_rate: String,
    pub rendering_style: String,
    pub lighting_style: String,
    pub camera_style: String,

    // Restriction fields: None removes the restriction, "" inherits.
    pub atmosphere: Option<String>,
    pub time_of_day: Option<String>,
    pub shot_duration: Option<String>,

    // List fields: non-empty lists replace wholesale.
    pub color_palette: Vec<String>,
    pub reference_images: Vec<String>,
    pub preferred_shot_types: Vec<String>,

    // Boolean fields: narrower scope always wins.
    pub allow_upscale: bool,
    pub lock_continuity: bool,
}

impl ArtControlValues {
    /// Defaults written when a story-scope row is lazily created.
    pub fn story_defaults() -> Self {
        Self {
            art_style: DEFAULT_ART_STYLE.to_string(),
            color_mood: DEFAULT_COLOR_MOOD.to_string(),
            aspect_ratio: DEFAULT_ASPECT_RATIO.to_string(),
            frame_rate: DEFAULT_FRAME_RATE.to_string(),
            atmosphere: Some(String::new()),
            time_of_day: Some(String::new()),
            shot_duration: Some(String::new()),
            allow_upscale: true,
            ..Self::default()
        }
    }

    /// Defaults for lazily created sequence/shot rows: everything inherits.
    pub fn inherit_all() -> Self {
        Self {
            atmosphere: Some(String::new()),
            time_of_day: Some(String::new()),
            shot_duration: Some(String::new()),
            ..Self::default()
        }
    }
}

/// One level of the scope chain: a settings row plus its identity.
#[derive(Debug, Clone)]
pub struct ScopedArtControl {
    pub settings_id: DbId,
    pub scope: ScopeKind,
    pub scope_id: DbId,
    pub updated_at: Timestamp,
    pub values: ArtControlValues,
}

/// The merged settings for one scope, as returned to API consumers.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct EffectiveArtControl {
    /// Settings row id of the narrowest scope in the chain.
    pub settings_id: DbId,
    /// The narrowest scope being resolved.
    pub scope: ScopeKind,
    pub scope_id: DbId,
    pub updated_at: Timestamp,
    #[serde(flatten)]
    pub values: ArtControlValues,
}

/// Merge a scope chain ordered broadest-first into one effective object.
///
/// The chain must be non-empty; callers build it story-first. Deterministic:
/// resolving the same unmodified chain twice yields identical output.
pub fn resolve(chain: &[ScopedArtControl]) -> EffectiveArtControl {
    assert!(!chain.is_empty(), "scope chain must contain at least the story level");

    let mut values = chain[0].values.clone();
    for level in &chain[1..] {
        merge_level(&mut values, &level.values);
    }

    let narrowest = chain.last().expect("non-empty chain");
    EffectiveArtControl {
        settings_id: narrowest.settings_id,
        scope: narrowest.scope,
        scope_id: narrowest.scope_id,
        updated_at: narrowest.updated_at,
        values,
    }
}

/// Fold one narrower level into the accumulated values.
fn merge_level(acc: &mut ArtControlValues, narrow: &ArtControlValues) {
    merge_scalar(&mut acc.art_style, &narrow.art_style);
    merge_scalar(&mut acc.color_mood, &narrow.color_mood);
    merge_scalar(&mut acc.aspect_ratio, &narrow.aspect_ratio);
    merge_scalar(&mut acc.frame_rate, &narrow.frame_rate);
    merge_scalar(&mut acc.rendering_style, &narrow.rendering_style);
    merge_scalar(&mut acc.lighting_style, &narrow.lighting_style);
    merge_scalar(&mut acc.camera_style, &narrow.camera_style);

    merge_restriction(&mut acc.atmosphere, &narrow.atmosphere);
    merge_restriction(&mut acc.time_of_day, &narrow.time_of_day);
    merge_restriction(&mut acc.shot_duration, &narrow.shot_duration);

    merge_list(&mut acc.color_palette, &narrow.color_palette);
    merge_list(&mut acc.reference_images, &narrow.reference_images);
    merge_list(&mut acc.preferred_shot_types, &narrow.preferred_shot_types);

    acc.allow_upscale = narrow.allow_upscale;
    acc.lock_continuity = narrow.lock_continuity;
}

fn merge_scalar(acc: &mut String, narrow: &str) {
    if !narrow.is_empty() {
        *acc = narrow.to_string();
    }
}

fn merge_restriction(acc: &mut Option<String>, narrow: &Option<String>) {
    match narrow {
        // Explicit NULL: remove the restriction, stop inheritance.
        None => *acc = None,
        // Empty string: no opinion at this level.
        Some(s) if s.is_empty() => {}
        Some(s) => *acc = Some(s.clone()),
    }
}

fn merge_list(acc: &mut Vec<String>, narrow: &[String]) {
    if !narrow.is_empty() {
        *acc = narrow.to_vec();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn level(id: DbId, scope: ScopeKind, values: ArtControlValues) -> ScopedArtControl {
        ScopedArtControl {
            settings_id: id,
            scope,
            scope_id: id * 10,
            updated_at: Utc::now(),
            values,
        }
    }

    fn three_level_chain() -> Vec<ScopedArtControl> {
        let story = ArtControlValues {
            color_palette: vec!["#112233".into(), "#445566".into()],
            atmosphere: Some("stormy".into()),
            lock_continuity: true,
            ..ArtControlValues::story_defaults()
        };
        let sequence = ArtControlValues {
            color_mood: "warm".into(),
            time_of_day: Some("dusk".into()),
            ..ArtControlValues::inherit_all()
        };
        let shot = ArtControlValues {
            camera_style: "handheld".into(),
            atmosphere: None,
            preferred_shot_types: vec!["close-up".into()],
            ..ArtControlValues::inherit_all()
        };
        vec![
            level(1, ScopeKind::Story, story),
            level(2, ScopeKind::Sequence, sequence),
            level(3, ScopeKind::Shot, shot),
        ]
    }

    #[test]
    fn narrower_scalar_wins_when_set() {
        let effective = resolve(&three_level_chain());
        assert_eq!(effective.values.color_mood, "warm");
        assert_eq!(effective.values.camera_style, "handheld");
    }

    #[test]
    fn empty_scalar_inherits() {
        let effective = resolve(&three_level_chain());
        // Neither sequence nor shot set art_style.
        assert_eq!(effective.values.art_style, DEFAULT_ART_STYLE);
        assert_eq!(effective.values.aspect_ratio, DEFAULT_ASPECT_RATIO);
    }

    #[test]
    fn restriction_null_removes_inherited_value() {
        let effective = resolve(&three_level_chain());
        // Story set "stormy", shot explicitly cleared it.
        assert_eq!(effective.values.atmosphere, None);
    }

    #[test]
    fn restriction_value_overrides_and_empty_inherits() {
        let effective = resolve(&three_level_chain());
        assert_eq!(effective.values.time_of_day.as_deref(), Some("dusk"));
        // shot_duration never set past the story default: inherits "".
        assert_eq!(effective.values.shot_duration.as_deref(), Some(""));
    }

    #[test]
    fn nonempty_list_replaces_wholesale() {
        let effective = resolve(&three_level_chain());
        assert_eq!(effective.values.preferred_shot_types, vec!["close-up"]);
        // Empty narrower lists keep the broader palette.
        assert_eq!(effective.values.color_palette.len(), 2);
    }

    #[test]
    fn booleans_always_taken_from_narrowest() {
        let effective = resolve(&three_level_chain());
        // Shot level defaults are false; they win over the story's true.
        assert!(!effective.values.allow_upscale);
        assert!(!effective.values.lock_continuity);
    }

    #[test]
    fn metadata_comes_from_narrowest_scope() {
        let effective = resolve(&three_level_chain());
        assert_eq!(effective.settings_id, 3);
        assert_eq!(effective.scope, ScopeKind::Shot);
        assert_eq!(effective.scope_id, 30);
    }

    #[test]
    fn resolve_is_idempotent_for_unchanged_chain() {
        let chain = three_level_chain();
        let first = resolve(&chain);
        let second = resolve(&chain);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn single_level_chain_returns_story_values() {
        let chain = vec![level(1, ScopeKind::Story, ArtControlValues::story_defaults())];
        let effective = resolve(&chain);
        assert_eq!(effective.scope, ScopeKind::Story);
        assert_eq!(effective.values.frame_rate, DEFAULT_FRAME_RATE);
    }
}
