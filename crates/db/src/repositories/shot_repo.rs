//! Repository for the `story_shots` table.

use slate_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::shot::{CreateShot, Shot, UpdateShot};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, story_id, sequence_id, shot_number, description, location_id, \
     camera_angle, complexity, estimated_time, special_requirements, estimated_cost";

/// Provides operations for shots. Shots are structural and are deleted and
/// recreated wholesale on every regeneration.
pub struct ShotRepo;

impl ShotRepo {
    /// Insert a new shot, returning the created row.
    pub async fn create(
        db: impl PgExecutor<'_>,
        story_id: DbId,
        input: &CreateShot,
    ) -> Result<Shot, sqlx::Error> {
        let query = format!(
            "INSERT INTO story_shots
                (story_id, sequence_id, shot_number, description, location_id, camera_angle,
                 complexity, estimated_time, special_requirements, estimated_cost)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Shot>(&query)
            .bind(story_id)
            .bind(input.sequence_id)
            .bind(input.shot_number)
            .bind(&input.description)
            .bind(input.location_id)
            .bind(&input.camera_angle)
            .bind(&input.complexity)
            .bind(&input.estimated_time)
            .bind(&input.special_requirements)
            .bind(input.estimated_cost)
            .fetch_one(db)
            .await
    }

    /// Find a shot by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Shot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM story_shots WHERE id = $1");
        sqlx::query_as::<_, Shot>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all shots for a story in shot-number order.
    pub async fn list_for_story(
        db: impl PgExecutor<'_>,
        story_id: DbId,
    ) -> Result<Vec<Shot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM story_shots
             WHERE story_id = $1
             ORDER BY shot_number ASC, id ASC"
        );
        sqlx::query_as::<_, Shot>(&query)
            .bind(story_id)
            .fetch_all(db)
            .await
    }

    /// List the shots belonging to one sequence.
    pub async fn list_for_sequence(
        db: impl PgExecutor<'_>,
        sequence_id: DbId,
    ) -> Result<Vec<Shot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM story_shots
             WHERE sequence_id = $1
             ORDER BY shot_number ASC, id ASC"
        );
        sqlx::query_as::<_, Shot>(&query)
            .bind(sequence_id)
            .fetch_all(db)
            .await
    }

    /// Update a shot's fields and rewrite its cost.
    ///
    /// As with assets, the caller recomputes `estimated_cost` from the
    /// effective complexity and duration.
    pub async fn update(
        db: impl PgExecutor<'_>,
        id: DbId,
        input: &UpdateShot,
        estimated_cost: f64,
    ) -> Result<Option<Shot>, sqlx::Error> {
        let query = format!(
            "UPDATE story_shots SET
                description = COALESCE($2, description),
                camera_angle = COALESCE($3, camera_angle),
                complexity = COALESCE($4, complexity),
                estimated_time = COALESCE($5, estimated_time),
                special_requirements = COALESCE($6, special_requirements),
                estimated_cost = $7
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Shot>(&query)
            .bind(id)
            .bind(&input.description)
            .bind(&input.camera_angle)
            .bind(&input.complexity)
            .bind(&input.estimated_time)
            .bind(&input.special_requirements)
            .bind(estimated_cost)
            .fetch_optional(db)
            .await
    }

    /// Delete every shot of a story ahead of a regeneration, including any
    /// orphaned shots with no sequence.
    pub async fn delete_for_story(
        db: impl PgExecutor<'_>,
        story_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM story_shots WHERE story_id = $1")
            .bind(story_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }
}
