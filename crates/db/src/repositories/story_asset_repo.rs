//! Repository for the `story_assets` table.

use slate_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::story_asset::{CreateStoryAsset, StoryAsset, UpdateStoryAsset};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, story_id, name, asset_type, description, complexity, estimated_cost";

/// Provides CRUD operations for production assets. Asset rows keep their
/// ids across regenerations.
pub struct StoryAssetRepo;

impl StoryAssetRepo {
    /// Insert a new asset, returning the created row.
    pub async fn create(
        db: impl PgExecutor<'_>,
        story_id: DbId,
        input: &CreateStoryAsset,
    ) -> Result<StoryAsset, sqlx::Error> {
        let query = format!(
            "INSERT INTO story_assets (story_id, name, asset_type, description, complexity, estimated_cost)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StoryAsset>(&query)
            .bind(story_id)
            .bind(&input.name)
            .bind(&input.asset_type)
            .bind(&input.description)
            .bind(&input.complexity)
            .bind(input.estimated_cost)
            .fetch_one(db)
            .await
    }

    /// Find an asset by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<StoryAsset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM story_assets WHERE id = $1");
        sqlx::query_as::<_, StoryAsset>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all assets for a story, ordered by id for stable output.
    pub async fn list_for_story(
        db: impl PgExecutor<'_>,
        story_id: DbId,
    ) -> Result<Vec<StoryAsset>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM story_assets WHERE story_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, StoryAsset>(&query)
            .bind(story_id)
            .fetch_all(db)
            .await
    }

    /// Update an asset's descriptive fields and rewrite its cost.
    ///
    /// The caller recomputes `estimated_cost` from the effective type and
    /// complexity so the stored cost never goes stale.
    pub async fn update(
        db: impl PgExecutor<'_>,
        id: DbId,
        input: &UpdateStoryAsset,
        estimated_cost: f64,
    ) -> Result<Option<StoryAsset>, sqlx::Error> {
        let query = format!(
            "UPDATE story_assets SET
                name = COALESCE($2, name),
                asset_type = COALESCE($3, asset_type),
                description = COALESCE($4, description),
                complexity = COALESCE($5, complexity),
                estimated_cost = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StoryAsset>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.asset_type)
            .bind(&input.description)
            .bind(&input.complexity)
            .bind(estimated_cost)
            .fetch_optional(db)
            .await
    }

    /// Delete an asset by ID. Returns `true` if a row was removed.
    pub async fn delete(db: impl PgExecutor<'_>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM story_assets WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
