//! Repository for the `story_sequences` table.

use slate_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::sequence::{CreateSequence, Sequence, SequenceWithShotCount};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, story_id, sequence_number, title, description, location_id, \
     estimated_time, total_shots, estimated_cost";

/// Provides operations for sequences. Sequences are structural and are
/// deleted and recreated wholesale on every regeneration.
pub struct SequenceRepo;

impl SequenceRepo {
    /// Insert a new sequence, returning the created row.
    pub async fn create(
        db: impl PgExecutor<'_>,
        story_id: DbId,
        input: &CreateSequence,
    ) -> Result<Sequence, sqlx::Error> {
        let query = format!(
            "INSERT INTO story_sequences
                (story_id, sequence_number, title, description, location_id, estimated_time, total_shots)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Sequence>(&query)
            .bind(story_id)
            .bind(input.sequence_number)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.location_id)
            .bind(&input.estimated_time)
            .bind(input.total_shots)
            .fetch_one(db)
            .await
    }

    /// Find a sequence by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Sequence>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM story_sequences WHERE id = $1");
        sqlx::query_as::<_, Sequence>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all sequences for a story in narrative order.
    pub async fn list_for_story(
        db: impl PgExecutor<'_>,
        story_id: DbId,
    ) -> Result<Vec<Sequence>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM story_sequences
             WHERE story_id = $1
             ORDER BY sequence_number ASC, id ASC"
        );
        sqlx::query_as::<_, Sequence>(&query)
            .bind(story_id)
            .fetch_all(db)
            .await
    }

    /// List sequences with their live shot counts for breakdown reporting.
    pub async fn list_with_shot_counts(
        pool: &PgPool,
        story_id: DbId,
    ) -> Result<Vec<SequenceWithShotCount>, sqlx::Error> {
        sqlx::query_as::<_, SequenceWithShotCount>(
            "SELECT s.id, s.sequence_number, s.title, s.estimated_cost,
                    COUNT(sh.id) AS shot_count
             FROM story_sequences s
             LEFT JOIN story_shots sh ON sh.sequence_id = s.id
             WHERE s.story_id = $1
             GROUP BY s.id
             ORDER BY s.sequence_number ASC, s.id ASC",
        )
        .bind(story_id)
        .fetch_all(pool)
        .await
    }

    /// Rewrite the derived cost and shot count once the sequence's shots
    /// have been persisted.
    pub async fn store_totals(
        db: impl PgExecutor<'_>,
        id: DbId,
        estimated_cost: f64,
        total_shots: i32,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE story_sequences SET estimated_cost = $2, total_shots = $3 WHERE id = $1",
        )
        .bind(id)
        .bind(estimated_cost)
        .bind(total_shots)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every sequence of a story ahead of a regeneration. Shots
    /// cascade with their sequence.
    pub async fn delete_for_story(
        db: impl PgExecutor<'_>,
        story_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM story_sequences WHERE story_id = $1")
            .bind(story_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }
}
