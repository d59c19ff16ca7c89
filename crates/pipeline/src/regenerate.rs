//! Identity-preserving story regeneration.

use slate_core::types::DbId;
use slate_db::repositories::{CharacterRepo, LocationRepo, StoryAssetRepo, StoryRepo};
use slate_db::DbPool;
use slate_parser::StoryParser;

use crate::digest::entity_digest;
use crate::error::PipelineError;
use crate::persist::{apply_parse, ExistingEntities, IngestOutcome};

/// Re-parse a story's raw text and reconcile the result against its
/// existing entities.
///
/// Characters, locations and assets keep their row ids wherever the match
/// chain finds them in the new parse; sequences and shots are rebuilt.
/// The completion call runs outside the transaction; the story row is then
/// locked FOR UPDATE so concurrent regenerations of the same story
/// serialize instead of interleaving their delete and recreate phases.
pub async fn regenerate_story(
    pool: &DbPool,
    parser: &StoryParser,
    story_id: DbId,
) -> Result<IngestOutcome, PipelineError> {
    let story = StoryRepo::find_by_id(pool, story_id)
        .await?
        .ok_or(PipelineError::StoryNotFound(story_id))?;

    // Digest snapshot for the prompt. Entities may shift before the lock
    // is taken; the authoritative set is re-read inside the transaction.
    let characters = CharacterRepo::list_for_story(pool, story_id).await?;
    let locations = LocationRepo::list_for_story(pool, story_id).await?;
    let assets = StoryAssetRepo::list_for_story(pool, story_id).await?;
    let digest = entity_digest(&characters, &locations, &assets);

    let parsed = if digest.is_empty() {
        parser.parse(&story.raw_text).await?
    } else {
        parser
            .parse_with_known_entities(&story.raw_text, &digest)
            .await?
    };

    let mut tx = pool.begin().await?;
    let locked = StoryRepo::lock_for_update(&mut *tx, story_id)
        .await?
        .ok_or(PipelineError::StoryNotFound(story_id))?;
    let existing = ExistingEntities::load(&mut tx, story_id).await?;
    let outcome = apply_parse(&mut tx, story_id, &locked.title, parsed, existing).await?;
    tx.commit().await?;

    tracing::info!(
        story_id,
        total_shots = outcome.story.total_shots,
        total_estimated_cost = outcome.story.total_estimated_cost,
        "Regenerated story"
    );
    Ok(outcome)
}
