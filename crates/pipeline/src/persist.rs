//! Shared persistence pass turning a parse into entity rows with costs.
//!
//! Ingest and regeneration both funnel through [`apply_parse`]: ingest with
//! an empty set of existing entities (everything is created fresh) and
//! regeneration with the story's current rows (identities are preserved by
//! the match chain; rows the new parse does not mention are left in place,
//! keeping their talent and department bookings). Runs entirely inside the
//! caller's transaction.

use std::collections::HashMap;

use slate_core::costing::{
    asset_cost, budget_range, sequence_cost, shot_cost, story_total_cost, AssetType, Complexity,
};
use slate_core::matching::{is_matchable_name, match_asset, match_by_name, Candidate};
use slate_core::types::DbId;
use slate_db::models::character::{Character, CreateCharacter, UpdateCharacter};
use slate_db::models::location::{CreateLocation, Location, UpdateLocation};
use slate_db::models::sequence::CreateSequence;
use slate_db::models::shot::CreateShot;
use slate_db::models::story::{Story, StoryParseResults};
use slate_db::models::story_asset::{CreateStoryAsset, StoryAsset, UpdateStoryAsset};
use slate_db::repositories::{
    CharacterRepo, LocationRepo, SequenceRepo, ShotRepo, StoryAssetRepo, StoryRepo,
};
use slate_parser::ParsedStory;
use sqlx::{Postgres, Transaction};

use crate::error::PipelineError;

/// The story's current identity-bearing rows, as seen inside the
/// transaction that will rewrite them.
#[derive(Debug, Default)]
pub struct ExistingEntities {
    pub characters: Vec<Character>,
    pub locations: Vec<Location>,
    pub assets: Vec<StoryAsset>,
}

impl ExistingEntities {
    /// Load the identity-bearing rows for a story.
    pub async fn load(
        tx: &mut Transaction<'_, Postgres>,
        story_id: DbId,
    ) -> Result<Self, sqlx::Error> {
        Ok(Self {
            characters: CharacterRepo::list_for_story(&mut **tx, story_id).await?,
            locations: LocationRepo::list_for_story(&mut **tx, story_id).await?,
            assets: StoryAssetRepo::list_for_story(&mut **tx, story_id).await?,
        })
    }
}

/// Result of persisting a parse: the updated story row plus maps from the
/// parse's external sequence/shot numbers (stringified) to row ids, so
/// callers can address the structure they just created.
#[derive(Debug)]
pub struct IngestOutcome {
    pub story: Story,
    pub sequence_ids: HashMap<String, DbId>,
    pub shot_ids: HashMap<String, DbId>,
}

/// Persist a parse against a story, reconciling identity-bearing entities
/// and rebuilding the structural ones, then store the enriched snapshot
/// and aggregates on the story row.
pub async fn apply_parse(
    tx: &mut Transaction<'_, Postgres>,
    story_id: DbId,
    title: &str,
    mut parsed: ParsedStory,
    existing: ExistingEntities,
) -> Result<IngestOutcome, PipelineError> {
    let character_candidates = reconcile_characters(tx, story_id, &mut parsed, &existing).await?;
    let location_candidates = reconcile_locations(tx, story_id, &mut parsed, &existing).await?;
    let asset_costs = reconcile_assets(tx, story_id, &mut parsed, &existing).await?;

    // Structural entities never survive a parse; cascade drops shots,
    // shot/sequence character links and any narrower art controls.
    SequenceRepo::delete_for_story(&mut **tx, story_id).await?;
    ShotRepo::delete_for_story(&mut **tx, story_id).await?;

    let character_ids: HashMap<String, DbId> = character_candidates
        .iter()
        .map(|c| (c.name.clone(), c.id))
        .collect();

    let sequence_ids =
        create_sequences(tx, story_id, &mut parsed, &location_candidates, &character_ids).await?;
    let shot_costs_by_sequence = create_shots(
        tx,
        story_id,
        &mut parsed,
        &sequence_ids,
        &location_candidates,
        &character_ids,
    )
    .await?;

    // Roll shot costs up into their sequences.
    let mut all_shot_costs = Vec::new();
    for seq in &mut parsed.sequences {
        let Some(&sequence_id) = sequence_ids.get(&seq.sequence_number) else {
            continue;
        };
        let costs = shot_costs_by_sequence
            .get(&sequence_id)
            .cloned()
            .unwrap_or_default();
        let cost = sequence_cost(&costs);
        SequenceRepo::store_totals(&mut **tx, sequence_id, cost, costs.len() as i32).await?;
        seq.estimated_cost = Some(cost);
        seq.total_shots = costs.len() as i32;
        all_shot_costs.extend(costs);
    }
    // Shots the parse left outside any sequence still count.
    if let Some(orphans) = shot_costs_by_sequence.get(&0) {
        all_shot_costs.extend(orphans.iter().copied());
    }

    let total = story_total_cost(&asset_costs, &all_shot_costs);
    parsed.total_sequences = parsed.sequences.iter().filter(|s| s.id.is_some()).count() as i32;
    parsed.total_shots = parsed.shots.iter().filter(|s| s.id.is_some()).count() as i32;
    parsed.total_estimated_cost = Some(total);
    parsed.budget_range = Some(budget_range(total));

    let results = StoryParseResults {
        title: title.to_string(),
        parsed_data: serde_json::to_value(&parsed)?,
        summary: parsed.summary.clone(),
        total_shots: parsed.total_shots,
        estimated_total_time: parsed.estimated_total_time.clone(),
        total_estimated_cost: total,
        budget_range: budget_range(total),
    };
    let story = StoryRepo::store_parse_results(&mut **tx, story_id, &results)
        .await?
        .ok_or(PipelineError::StoryNotFound(story_id))?;

    Ok(IngestOutcome {
        story,
        sequence_ids: sequence_ids
            .iter()
            .map(|(number, id)| (number.to_string(), *id))
            .collect(),
        shot_ids: parsed
            .shots
            .iter()
            .filter_map(|s| s.id.map(|id| (s.shot_number.to_string(), id)))
            .collect(),
    })
}

// ---------------------------------------------------------------------------
// Identity-bearing entities
// ---------------------------------------------------------------------------

async fn reconcile_characters(
    tx: &mut Transaction<'_, Postgres>,
    story_id: DbId,
    parsed: &mut ParsedStory,
    existing: &ExistingEntities,
) -> Result<Vec<Candidate>, PipelineError> {
    let mut unclaimed: Vec<Candidate> = existing
        .characters
        .iter()
        .map(|c| Candidate {
            id: c.id,
            name: c.name.clone(),
            kind: String::new(),
        })
        .collect();
    let mut reconciled = Vec::new();

    for pc in &mut parsed.characters {
        if !is_matchable_name(&pc.name) {
            continue;
        }
        let id = match match_by_name(&pc.name, &unclaimed) {
            Some(m) => {
                if !m.confidence.is_strong() {
                    tracing::warn!(
                        story_id,
                        name = %pc.name,
                        confidence = m.confidence.label(),
                        "Weak character match accepted during regeneration"
                    );
                }
                unclaimed.retain(|c| c.id != m.id);
                CharacterRepo::update(
                    &mut **tx,
                    m.id,
                    &UpdateCharacter {
                        name: Some(pc.name.clone()),
                        description: Some(pc.description.clone()),
                        role: Some(pc.role.clone()),
                        appearances: Some(pc.appearances),
                    },
                )
                .await?;
                m.id
            }
            None => {
                CharacterRepo::create(
                    &mut **tx,
                    story_id,
                    &CreateCharacter {
                        name: pc.name.clone(),
                        description: pc.description.clone(),
                        role: pc.role.clone(),
                        appearances: pc.appearances,
                    },
                )
                .await?
                .id
            }
        };
        pc.id = Some(id);
        reconciled.push(Candidate {
            id,
            name: pc.name.clone(),
            kind: String::new(),
        });
    }

    Ok(reconciled)
}

async fn reconcile_locations(
    tx: &mut Transaction<'_, Postgres>,
    story_id: DbId,
    parsed: &mut ParsedStory,
    existing: &ExistingEntities,
) -> Result<Vec<Candidate>, PipelineError> {
    let mut unclaimed: Vec<Candidate> = existing
        .locations
        .iter()
        .map(|l| Candidate {
            id: l.id,
            name: l.name.clone(),
            kind: String::new(),
        })
        .collect();
    let mut reconciled = Vec::new();

    for pl in &mut parsed.locations {
        if !is_matchable_name(&pl.name) {
            continue;
        }
        let id = match match_by_name(&pl.name, &unclaimed) {
            Some(m) => {
                if !m.confidence.is_strong() {
                    tracing::warn!(
                        story_id,
                        name = %pl.name,
                        confidence = m.confidence.label(),
                        "Weak location match accepted during regeneration"
                    );
                }
                unclaimed.retain(|c| c.id != m.id);
                LocationRepo::update(
                    &mut **tx,
                    m.id,
                    &UpdateLocation {
                        name: Some(pl.name.clone()),
                        description: Some(pl.description.clone()),
                        location_type: Some(pl.location_type.clone()),
                        scenes: Some(pl.scenes),
                    },
                )
                .await?;
                m.id
            }
            None => {
                LocationRepo::create(
                    &mut **tx,
                    story_id,
                    &CreateLocation {
                        name: pl.name.clone(),
                        description: pl.description.clone(),
                        location_type: pl.location_type.clone(),
                        scenes: pl.scenes,
                    },
                )
                .await?
                .id
            }
        };
        pl.id = Some(id);
        reconciled.push(Candidate {
            id,
            name: pl.name.clone(),
            kind: String::new(),
        });
    }

    Ok(reconciled)
}

async fn reconcile_assets(
    tx: &mut Transaction<'_, Postgres>,
    story_id: DbId,
    parsed: &mut ParsedStory,
    existing: &ExistingEntities,
) -> Result<Vec<f64>, PipelineError> {
    let mut unclaimed: Vec<Candidate> = existing
        .assets
        .iter()
        .map(|a| Candidate {
            id: a.id,
            name: a.name.clone(),
            kind: a.asset_type.clone(),
        })
        .collect();
    let mut costs = Vec::new();

    for pa in &mut parsed.assets {
        if !is_matchable_name(&pa.name) {
            continue;
        }
        let cost = asset_cost(
            AssetType::from_label(&pa.asset_type),
            Complexity::from_label(&pa.complexity),
        );
        let id = match match_asset(&pa.name, &pa.asset_type, &unclaimed) {
            Some(m) => {
                if !m.confidence.is_strong() {
                    tracing::warn!(
                        story_id,
                        name = %pa.name,
                        confidence = m.confidence.label(),
                        "Weak asset match accepted during regeneration"
                    );
                }
                unclaimed.retain(|c| c.id != m.id);
                StoryAssetRepo::update(
                    &mut **tx,
                    m.id,
                    &UpdateStoryAsset {
                        name: Some(pa.name.clone()),
                        asset_type: Some(pa.asset_type.clone()),
                        description: Some(pa.description.clone()),
                        complexity: Some(pa.complexity.clone()),
                    },
                    cost,
                )
                .await?;
                m.id
            }
            None => {
                StoryAssetRepo::create(
                    &mut **tx,
                    story_id,
                    &CreateStoryAsset {
                        name: pa.name.clone(),
                        asset_type: pa.asset_type.clone(),
                        description: pa.description.clone(),
                        complexity: pa.complexity.clone(),
                        estimated_cost: cost,
                    },
                )
                .await?
                .id
            }
        };
        pa.id = Some(id);
        pa.estimated_cost = Some(cost);
        costs.push(cost);
    }

    Ok(costs)
}

// ---------------------------------------------------------------------------
// Structural entities
// ---------------------------------------------------------------------------

async fn create_sequences(
    tx: &mut Transaction<'_, Postgres>,
    story_id: DbId,
    parsed: &mut ParsedStory,
    locations: &[Candidate],
    character_ids: &HashMap<String, DbId>,
) -> Result<HashMap<i32, DbId>, PipelineError> {
    let mut sequence_ids = HashMap::new();

    for seq in &mut parsed.sequences {
        let location_id = match_by_name(&seq.location, locations).map(|m| m.id);
        let row = SequenceRepo::create(
            &mut **tx,
            story_id,
            &CreateSequence {
                sequence_number: seq.sequence_number,
                title: seq.title.clone(),
                description: seq.description.clone(),
                location_id,
                estimated_time: seq.estimated_time.clone(),
                total_shots: seq.total_shots,
            },
        )
        .await?;
        seq.id = Some(row.id);
        sequence_ids.insert(seq.sequence_number, row.id);

        for name in &seq.characters {
            if let Some(&character_id) = character_ids.get(name) {
                CharacterRepo::link_sequence(&mut **tx, row.id, character_id).await?;
            }
        }
    }

    Ok(sequence_ids)
}

/// Create shot rows and return their costs grouped by sequence id.
/// Shots whose sequence number is unknown land under key `0`.
async fn create_shots(
    tx: &mut Transaction<'_, Postgres>,
    story_id: DbId,
    parsed: &mut ParsedStory,
    sequence_ids: &HashMap<i32, DbId>,
    locations: &[Candidate],
    character_ids: &HashMap<String, DbId>,
) -> Result<HashMap<DbId, Vec<f64>>, PipelineError> {
    let mut by_sequence: HashMap<DbId, Vec<f64>> = HashMap::new();

    for shot in &mut parsed.shots {
        let cost = shot_cost(Complexity::from_label(&shot.complexity), &shot.estimated_time);
        let sequence_id = sequence_ids.get(&shot.sequence_number).copied();
        let location_id = match_by_name(&shot.location, locations).map(|m| m.id);
        let row = ShotRepo::create(
            &mut **tx,
            story_id,
            &CreateShot {
                sequence_id,
                shot_number: shot.shot_number,
                description: shot.description.clone(),
                location_id,
                camera_angle: shot.camera_angle.clone(),
                complexity: shot.complexity.clone(),
                estimated_time: shot.estimated_time.clone(),
                special_requirements: serde_json::json!(shot.special_requirements),
                estimated_cost: cost,
            },
        )
        .await?;
        shot.id = Some(row.id);
        shot.estimated_cost = Some(cost);
        by_sequence.entry(sequence_id.unwrap_or(0)).or_default().push(cost);

        for name in &shot.characters {
            if let Some(&character_id) = character_ids.get(name) {
                CharacterRepo::link_shot(&mut **tx, row.id, character_id).await?;
            }
        }
    }

    Ok(by_sequence)
}
