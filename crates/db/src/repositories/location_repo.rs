//! Repository for the `story_locations` table.

use slate_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::location::{CreateLocation, Location, UpdateLocation};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, story_id, name, description, location_type, scenes";

/// Provides CRUD operations for locations. Like characters, location rows
/// keep their ids across regenerations.
pub struct LocationRepo;

impl LocationRepo {
    /// Insert a new location, returning the created row.
    pub async fn create(
        db: impl PgExecutor<'_>,
        story_id: DbId,
        input: &CreateLocation,
    ) -> Result<Location, sqlx::Error> {
        let query = format!(
            "INSERT INTO story_locations (story_id, name, description, location_type, scenes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(story_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.location_type)
            .bind(input.scenes)
            .fetch_one(db)
            .await
    }

    /// Find a location by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Location>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM story_locations WHERE id = $1");
        sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all locations for a story, ordered by id for stable output.
    pub async fn list_for_story(
        db: impl PgExecutor<'_>,
        story_id: DbId,
    ) -> Result<Vec<Location>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM story_locations WHERE story_id = $1 ORDER BY id ASC"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(story_id)
            .fetch_all(db)
            .await
    }

    /// Update a location. Only non-`None` fields in `input` are applied.
    pub async fn update(
        db: impl PgExecutor<'_>,
        id: DbId,
        input: &UpdateLocation,
    ) -> Result<Option<Location>, sqlx::Error> {
        let query = format!(
            "UPDATE story_locations SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                location_type = COALESCE($4, location_type),
                scenes = COALESCE($5, scenes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.location_type)
            .bind(input.scenes)
            .fetch_optional(db)
            .await
    }

    /// Delete a location by ID. Returns `true` if a row was removed.
    pub async fn delete(db: impl PgExecutor<'_>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM story_locations WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
