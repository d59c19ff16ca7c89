//! Repository for the `story_characters` table.

use slate_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::character::{Character, CreateCharacter, UpdateCharacter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, story_id, name, description, role, appearances";

/// Provides CRUD operations for characters. Characters keep their row ids
/// across story regenerations, so updates dominate over recreation here.
pub struct CharacterRepo;

impl CharacterRepo {
    /// Insert a new character, returning the created row.
    pub async fn create(
        db: impl PgExecutor<'_>,
        story_id: DbId,
        input: &CreateCharacter,
    ) -> Result<Character, sqlx::Error> {
        let query = format!(
            "INSERT INTO story_characters (story_id, name, description, role, appearances)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(story_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.role)
            .bind(input.appearances)
            .fetch_one(db)
            .await
    }

    /// Find a character by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Character>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM story_characters WHERE id = $1");
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all characters for a story, ordered by id for stable output.
    pub async fn list_for_story(
        db: impl PgExecutor<'_>,
        story_id: DbId,
    ) -> Result<Vec<Character>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM story_characters WHERE story_id = $1 ORDER BY id ASC"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(story_id)
            .fetch_all(db)
            .await
    }

    /// Update a character. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        db: impl PgExecutor<'_>,
        id: DbId,
        input: &UpdateCharacter,
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!(
            "UPDATE story_characters SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                role = COALESCE($4, role),
                appearances = COALESCE($5, appearances)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.role)
            .bind(input.appearances)
            .fetch_optional(db)
            .await
    }

    /// Delete a character by ID. Returns `true` if a row was removed.
    pub async fn delete(db: impl PgExecutor<'_>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM story_characters WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Link a character to a sequence, ignoring duplicates.
    pub async fn link_sequence(
        db: impl PgExecutor<'_>,
        sequence_id: DbId,
        character_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO sequence_characters (sequence_id, character_id)
             VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(sequence_id)
        .bind(character_id)
        .execute(db)
        .await?;
        Ok(())
    }

    /// Link a character to a shot, ignoring duplicates.
    pub async fn link_shot(
        db: impl PgExecutor<'_>,
        shot_id: DbId,
        character_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO shot_characters (shot_id, character_id)
             VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(shot_id)
        .bind(character_id)
        .execute(db)
        .await?;
        Ok(())
    }
}
