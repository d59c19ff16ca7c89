//! Repository for the `stories` table.

use slate_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::story::{CreateStory, Story, StoryParseResults};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, title, raw_text, parsed_data, summary, total_shots, \
     estimated_total_time, total_estimated_cost, budget_range, created_at, updated_at";

/// Provides CRUD operations for stories plus parse-result persistence.
pub struct StoryRepo;

impl StoryRepo {
    /// Insert a new story shell before parsing fills in the aggregates.
    pub async fn create(
        db: impl PgExecutor<'_>,
        input: &CreateStory,
    ) -> Result<Story, sqlx::Error> {
        let query = format!(
            "INSERT INTO stories (owner_id, title, raw_text)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Story>(&query)
            .bind(input.owner_id)
            .bind(&input.title)
            .bind(&input.raw_text)
            .fetch_one(db)
            .await
    }

    /// Find a story by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Story>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stories WHERE id = $1");
        sqlx::query_as::<_, Story>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a story owned by a specific account. Returns `None` when the
    /// story exists but belongs to someone else.
    pub async fn find_for_owner(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Story>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stories WHERE id = $1 AND owner_id = $2");
        sqlx::query_as::<_, Story>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// List all stories for an owner, newest first.
    pub async fn list_for_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<Story>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM stories
             WHERE owner_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Story>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Lock the story row for the duration of the surrounding transaction.
    ///
    /// Serializes concurrent regenerations of the same story so two parses
    /// cannot interleave their delete-and-recreate phases.
    pub async fn lock_for_update(
        db: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Story>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stories WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Story>(&query)
            .bind(id)
            .fetch_optional(db)
            .await
    }

    /// Rewrite the aggregate columns after an ingest or regeneration.
    pub async fn store_parse_results(
        db: impl PgExecutor<'_>,
        id: DbId,
        results: &StoryParseResults,
    ) -> Result<Option<Story>, sqlx::Error> {
        let query = format!(
            "UPDATE stories SET
                title = $2,
                parsed_data = $3,
                summary = $4,
                total_shots = $5,
                estimated_total_time = $6,
                total_estimated_cost = $7,
                budget_range = $8,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Story>(&query)
            .bind(id)
            .bind(&results.title)
            .bind(&results.parsed_data)
            .bind(&results.summary)
            .bind(results.total_shots)
            .bind(&results.estimated_total_time)
            .bind(results.total_estimated_cost)
            .bind(&results.budget_range)
            .fetch_optional(db)
            .await
    }

    /// Replace just the `parsed_data` snapshot, used by the read-time
    /// repair pass.
    pub async fn store_parsed_data(
        db: impl PgExecutor<'_>,
        id: DbId,
        parsed_data: &serde_json::Value,
    ) -> Result<Option<Story>, sqlx::Error> {
        let query = format!(
            "UPDATE stories SET parsed_data = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Story>(&query)
            .bind(id)
            .bind(parsed_data)
            .fetch_optional(db)
            .await
    }

    /// Update the cost aggregates without touching the parse snapshot.
    pub async fn store_cost_totals(
        db: impl PgExecutor<'_>,
        id: DbId,
        total_estimated_cost: f64,
        budget_range: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE stories SET
                total_estimated_cost = $2,
                budget_range = $3,
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(total_estimated_cost)
        .bind(budget_range)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a story and, by cascade, all of its child entities. Returns
    /// `true` if a row was removed.
    pub async fn delete(db: impl PgExecutor<'_>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM stories WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
