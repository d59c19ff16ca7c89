//! First-time story ingest: parse, persist, cost.

use slate_db::models::story::CreateStory;
use slate_db::repositories::StoryRepo;
use slate_db::DbPool;
use slate_parser::StoryParser;

use crate::error::PipelineError;
use crate::persist::{apply_parse, ExistingEntities, IngestOutcome};

/// Parse raw story text and persist the full entity tree for a new story.
///
/// The completion call happens before the transaction opens, so a slow or
/// failing parse never holds database locks. A parse failure means no
/// story row is created at all.
pub async fn ingest_story(
    pool: &DbPool,
    parser: &StoryParser,
    input: CreateStory,
) -> Result<IngestOutcome, PipelineError> {
    let parsed = parser.parse(&input.raw_text).await?;

    let mut tx = pool.begin().await?;
    let story = StoryRepo::create(&mut *tx, &input).await?;
    let outcome = apply_parse(
        &mut tx,
        story.id,
        &story.title,
        parsed,
        ExistingEntities::default(),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(
        story_id = outcome.story.id,
        total_shots = outcome.story.total_shots,
        total_estimated_cost = outcome.story.total_estimated_cost,
        "Ingested story"
    );
    Ok(outcome)
}
