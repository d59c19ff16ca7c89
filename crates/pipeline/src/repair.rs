//! Read-time self-heal of a story's `parsed_data` snapshot.
//!
//! The snapshot carries entity ids so frontends can address rows directly.
//! Direct entity edits and deletes can leave those ids stale; rather than
//! migrating on every write, the detail read path re-verifies the snapshot
//! against live rows and rewrites it only when drift is found.

use std::collections::HashSet;

use slate_core::matching::{match_asset, match_by_name, positional_fallback, Candidate};
use slate_core::types::DbId;
use slate_db::models::story::Story;
use slate_db::repositories::{
    CharacterRepo, LocationRepo, SequenceRepo, ShotRepo, StoryAssetRepo, StoryRepo,
};
use slate_db::DbPool;
use slate_parser::ParsedStory;

use crate::error::PipelineError;

/// Verify and, if needed, heal a story's parse snapshot. Returns the
/// snapshot to serve and whether a rewrite was persisted.
pub async fn repair_parsed_data(
    pool: &DbPool,
    story: &Story,
) -> Result<(serde_json::Value, bool), PipelineError> {
    let mut parsed: ParsedStory = match serde_json::from_value(story.parsed_data.clone()) {
        Ok(parsed) => parsed,
        Err(error) => {
            // An undecodable snapshot is served as stored rather than
            // destroyed; regeneration rewrites it wholesale.
            tracing::warn!(story_id = story.id, %error, "Parse snapshot is undecodable, serving as stored");
            return Ok((story.parsed_data.clone(), false));
        }
    };

    let mut changed = false;
    changed |= repair_characters(pool, story.id, &mut parsed).await?;
    changed |= repair_locations(pool, story.id, &mut parsed).await?;
    changed |= repair_assets(pool, story.id, &mut parsed).await?;
    changed |= repair_structure(pool, story.id, &mut parsed).await?;

    let value = serde_json::to_value(&parsed)?;
    if changed {
        tracing::info!(story_id = story.id, "Healed stale ids in parse snapshot");
        StoryRepo::store_parsed_data(pool, story.id, &value).await?;
    }
    Ok((value, changed))
}

/// Re-link snapshot entries to live rows.
///
/// Entries whose id still exists keep it; the rest are re-matched by name
/// against unclaimed rows, and finally paired positionally so a pure
/// rename drifts to the right row instead of dropping its id.
fn relink(
    entries: &mut [(Option<DbId>, String, String)],
    live: &[Candidate],
    by_kind: bool,
) -> bool {
    let live_ids: HashSet<DbId> = live.iter().map(|c| c.id).collect();
    let mut claimed: HashSet<DbId> = HashSet::new();
    let mut changed = false;

    for (id, _, _) in entries.iter_mut() {
        match id {
            Some(current) if live_ids.contains(current) && !claimed.contains(current) => {
                claimed.insert(*current);
            }
            Some(_) => {
                *id = None;
                changed = true;
            }
            None => {}
        }
    }

    let unclaimed: Vec<Candidate> = live
        .iter()
        .filter(|c| !claimed.contains(&c.id))
        .cloned()
        .collect();
    for (id, name, kind) in entries.iter_mut() {
        if id.is_some() {
            continue;
        }
        let available: Vec<Candidate> = unclaimed
            .iter()
            .filter(|c| !claimed.contains(&c.id))
            .cloned()
            .collect();
        let hit = if by_kind {
            match_asset(name, kind, &available)
        } else {
            match_by_name(name, &available)
        };
        if let Some(m) = hit {
            claimed.insert(m.id);
            *id = Some(m.id);
            changed = true;
        }
    }

    // Last resort: pair leftovers by position.
    let leftovers: Vec<Candidate> = unclaimed
        .into_iter()
        .filter(|c| !claimed.contains(&c.id))
        .collect();
    let mut index = 0;
    for (id, _, _) in entries.iter_mut() {
        if id.is_some() {
            continue;
        }
        if let Some(m) = positional_fallback(index, &leftovers) {
            *id = Some(m.id);
            changed = true;
        }
        index += 1;
    }

    changed
}

async fn repair_characters(
    pool: &DbPool,
    story_id: DbId,
    parsed: &mut ParsedStory,
) -> Result<bool, PipelineError> {
    let live: Vec<Candidate> = CharacterRepo::list_for_story(pool, story_id)
        .await?
        .into_iter()
        .map(|c| Candidate {
            id: c.id,
            name: c.name,
            kind: String::new(),
        })
        .collect();
    let mut entries: Vec<(Option<DbId>, String, String)> = parsed
        .characters
        .iter()
        .map(|c| (c.id, c.name.clone(), String::new()))
        .collect();
    let changed = relink(&mut entries, &live, false);
    for (entry, (id, _, _)) in parsed.characters.iter_mut().zip(entries) {
        entry.id = id;
    }
    Ok(changed)
}

async fn repair_locations(
    pool: &DbPool,
    story_id: DbId,
    parsed: &mut ParsedStory,
) -> Result<bool, PipelineError> {
    let live: Vec<Candidate> = LocationRepo::list_for_story(pool, story_id)
        .await?
        .into_iter()
        .map(|l| Candidate {
            id: l.id,
            name: l.name,
            kind: String::new(),
        })
        .collect();
    let mut entries: Vec<(Option<DbId>, String, String)> = parsed
        .locations
        .iter()
        .map(|l| (l.id, l.name.clone(), String::new()))
        .collect();
    let changed = relink(&mut entries, &live, false);
    for (entry, (id, _, _)) in parsed.locations.iter_mut().zip(entries) {
        entry.id = id;
    }
    Ok(changed)
}

async fn repair_assets(
    pool: &DbPool,
    story_id: DbId,
    parsed: &mut ParsedStory,
) -> Result<bool, PipelineError> {
    let live: Vec<Candidate> = StoryAssetRepo::list_for_story(pool, story_id)
        .await?
        .into_iter()
        .map(|a| Candidate {
            id: a.id,
            name: a.name,
            kind: a.asset_type,
        })
        .collect();
    let mut entries: Vec<(Option<DbId>, String, String)> = parsed
        .assets
        .iter()
        .map(|a| (a.id, a.name.clone(), a.asset_type.clone()))
        .collect();
    let changed = relink(&mut entries, &live, true);
    for (entry, (id, _, _)) in parsed.assets.iter_mut().zip(entries) {
        entry.id = id;
    }
    Ok(changed)
}

/// Sequences and shots are re-linked by their stable numbers; their rows
/// are rebuilt on every regeneration so name matching does not apply.
async fn repair_structure(
    pool: &DbPool,
    story_id: DbId,
    parsed: &mut ParsedStory,
) -> Result<bool, PipelineError> {
    let sequences = SequenceRepo::list_for_story(pool, story_id).await?;
    let shots = ShotRepo::list_for_story(pool, story_id).await?;
    let mut changed = false;

    for seq in &mut parsed.sequences {
        let live = sequences
            .iter()
            .find(|s| s.sequence_number == seq.sequence_number);
        let id = live.map(|s| s.id);
        if seq.id != id {
            seq.id = id;
            changed = true;
        }
    }

    for shot in &mut parsed.shots {
        let sequence_id = sequences
            .iter()
            .find(|s| s.sequence_number == shot.sequence_number)
            .map(|s| s.id);
        let live = shots.iter().find(|s| {
            s.shot_number == shot.shot_number && (sequence_id.is_none() || s.sequence_id == sequence_id)
        });
        let id = live.map(|s| s.id);
        if shot.id != id {
            shot.id = id;
            changed = true;
        }
    }

    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: DbId, name: &str, kind: &str) -> Candidate {
        Candidate {
            id,
            name: name.to_string(),
            kind: kind.to_string(),
        }
    }

    #[test]
    fn relink_keeps_valid_ids() {
        let live = vec![candidate(1, "Mara", ""), candidate(2, "Jax", "")];
        let mut entries = vec![
            (Some(1), "Mara".to_string(), String::new()),
            (Some(2), "Jax".to_string(), String::new()),
        ];
        assert!(!relink(&mut entries, &live, false));
    }

    #[test]
    fn relink_rebinds_stale_id_by_name() {
        let live = vec![candidate(7, "Mara", "")];
        let mut entries = vec![(Some(1), "Mara".to_string(), String::new())];
        assert!(relink(&mut entries, &live, false));
        assert_eq!(entries[0].0, Some(7));
    }

    #[test]
    fn relink_positional_last_resort() {
        let live = vec![candidate(5, "Renamed Entirely", "")];
        let mut entries = vec![(None, "Original Name X".to_string(), String::new())];
        assert!(relink(&mut entries, &live, false));
        assert_eq!(entries[0].0, Some(5));
    }

    #[test]
    fn relink_never_double_claims() {
        let live = vec![candidate(1, "Mara", "")];
        let mut entries = vec![
            (Some(1), "Mara".to_string(), String::new()),
            (None, "Mara".to_string(), String::new()),
        ];
        relink(&mut entries, &live, false);
        assert_eq!(entries[0].0, Some(1));
        assert_eq!(entries[1].0, None);
    }
}
