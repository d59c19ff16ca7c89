//! Repositories for the three talent assignment tables.
//!
//! Character assignments carry no hours; asset and shot assignments track
//! estimated and actual hours. Status changes go through the workflow in
//! `models::status` before reaching these queries.

use slate_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::talent_assignment::{
    AssetTalentAssignment, CharacterTalentAssignment, CreateCharacterAssignment,
    CreateWorkAssignment, ShotTalentAssignment, TalentCostLine, UpdateAssignment,
};

const CHARACTER_COLUMNS: &str = "id, character_id, talent_id, role_type, status, rate_agreed, \
     notes, assigned_at, updated_at";

const WORK_COLUMNS_ASSET: &str = "id, asset_id, talent_id, role_type, status, rate_agreed, \
     estimated_hours, actual_hours, notes, assigned_at, updated_at";

const WORK_COLUMNS_SHOT: &str = "id, shot_id, talent_id, role_type, status, rate_agreed, \
     estimated_hours, actual_hours, notes, assigned_at, updated_at";

/// Assignments of voice actors (and similar roles) to characters.
pub struct CharacterAssignmentRepo;

impl CharacterAssignmentRepo {
    /// Insert a new character assignment. Duplicate
    /// (character, talent, role) triples surface as a unique violation.
    pub async fn create(
        db: impl PgExecutor<'_>,
        input: &CreateCharacterAssignment,
    ) -> Result<CharacterTalentAssignment, sqlx::Error> {
        let query = format!(
            "INSERT INTO character_talent_assignments
                (character_id, talent_id, role_type, rate_agreed, notes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {CHARACTER_COLUMNS}"
        );
        sqlx::query_as::<_, CharacterTalentAssignment>(&query)
            .bind(input.character_id)
            .bind(input.talent_id)
            .bind(&input.role_type)
            .bind(input.rate_agreed)
            .bind(&input.notes)
            .fetch_one(db)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CharacterTalentAssignment>, sqlx::Error> {
        let query =
            format!("SELECT {CHARACTER_COLUMNS} FROM character_talent_assignments WHERE id = $1");
        sqlx::query_as::<_, CharacterTalentAssignment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all character assignments across one story.
    pub async fn list_for_story(
        pool: &PgPool,
        story_id: DbId,
    ) -> Result<Vec<CharacterTalentAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT a.id, a.character_id, a.talent_id, a.role_type, a.status, a.rate_agreed,
                    a.notes, a.assigned_at, a.updated_at
             FROM character_talent_assignments a
             JOIN story_characters c ON c.id = a.character_id
             WHERE c.story_id = $1
             ORDER BY a.id ASC"
        );
        sqlx::query_as::<_, CharacterTalentAssignment>(&query)
            .bind(story_id)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update, including a status already validated by the
    /// caller against the assignment workflow.
    pub async fn update(
        db: impl PgExecutor<'_>,
        id: DbId,
        input: &UpdateAssignment,
    ) -> Result<Option<CharacterTalentAssignment>, sqlx::Error> {
        let query = format!(
            "UPDATE character_talent_assignments SET
                status = COALESCE($2, status),
                rate_agreed = COALESCE($3, rate_agreed),
                notes = COALESCE($4, notes),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {CHARACTER_COLUMNS}"
        );
        sqlx::query_as::<_, CharacterTalentAssignment>(&query)
            .bind(id)
            .bind(&input.status)
            .bind(input.rate_agreed)
            .bind(&input.notes)
            .fetch_optional(db)
            .await
    }

    pub async fn delete(db: impl PgExecutor<'_>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM character_talent_assignments WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Assignments of artists to production assets.
pub struct AssetAssignmentRepo;

impl AssetAssignmentRepo {
    pub async fn create(
        db: impl PgExecutor<'_>,
        input: &CreateWorkAssignment,
    ) -> Result<AssetTalentAssignment, sqlx::Error> {
        let query = format!(
            "INSERT INTO asset_talent_assignments
                (asset_id, talent_id, role_type, rate_agreed, estimated_hours, notes)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {WORK_COLUMNS_ASSET}"
        );
        sqlx::query_as::<_, AssetTalentAssignment>(&query)
            .bind(input.target_id)
            .bind(input.talent_id)
            .bind(&input.role_type)
            .bind(input.rate_agreed)
            .bind(input.estimated_hours)
            .bind(&input.notes)
            .fetch_one(db)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AssetTalentAssignment>, sqlx::Error> {
        let query =
            format!("SELECT {WORK_COLUMNS_ASSET} FROM asset_talent_assignments WHERE id = $1");
        sqlx::query_as::<_, AssetTalentAssignment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_for_story(
        pool: &PgPool,
        story_id: DbId,
    ) -> Result<Vec<AssetTalentAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT a.id, a.asset_id, a.talent_id, a.role_type, a.status, a.rate_agreed,
                    a.estimated_hours, a.actual_hours, a.notes, a.assigned_at, a.updated_at
             FROM asset_talent_assignments a
             JOIN story_assets s ON s.id = a.asset_id
             WHERE s.story_id = $1
             ORDER BY a.id ASC"
        );
        sqlx::query_as::<_, AssetTalentAssignment>(&query)
            .bind(story_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        db: impl PgExecutor<'_>,
        id: DbId,
        input: &UpdateAssignment,
    ) -> Result<Option<AssetTalentAssignment>, sqlx::Error> {
        let query = format!(
            "UPDATE asset_talent_assignments SET
                status = COALESCE($2, status),
                rate_agreed = COALESCE($3, rate_agreed),
                estimated_hours = COALESCE($4, estimated_hours),
                actual_hours = COALESCE($5, actual_hours),
                notes = COALESCE($6, notes),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {WORK_COLUMNS_ASSET}"
        );
        sqlx::query_as::<_, AssetTalentAssignment>(&query)
            .bind(id)
            .bind(&input.status)
            .bind(input.rate_agreed)
            .bind(input.estimated_hours)
            .bind(input.actual_hours)
            .bind(&input.notes)
            .fetch_optional(db)
            .await
    }

    pub async fn delete(db: impl PgExecutor<'_>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM asset_talent_assignments WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Assignments of animators and similar roles to shots.
pub struct ShotAssignmentRepo;

impl ShotAssignmentRepo {
    pub async fn create(
        db: impl PgExecutor<'_>,
        input: &CreateWorkAssignment,
    ) -> Result<ShotTalentAssignment, sqlx::Error> {
        let query = format!(
            "INSERT INTO shot_talent_assignments
                (shot_id, talent_id, role_type, rate_agreed, estimated_hours, notes)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {WORK_COLUMNS_SHOT}"
        );
        sqlx::query_as::<_, ShotTalentAssignment>(&query)
            .bind(input.target_id)
            .bind(input.talent_id)
            .bind(&input.role_type)
            .bind(input.rate_agreed)
            .bind(input.estimated_hours)
            .bind(&input.notes)
            .fetch_one(db)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ShotTalentAssignment>, sqlx::Error> {
        let query =
            format!("SELECT {WORK_COLUMNS_SHOT} FROM shot_talent_assignments WHERE id = $1");
        sqlx::query_as::<_, ShotTalentAssignment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_for_story(
        pool: &PgPool,
        story_id: DbId,
    ) -> Result<Vec<ShotTalentAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT a.id, a.shot_id, a.talent_id, a.role_type, a.status, a.rate_agreed,
                    a.estimated_hours, a.actual_hours, a.notes, a.assigned_at, a.updated_at
             FROM shot_talent_assignments a
             JOIN story_shots s ON s.id = a.shot_id
             WHERE s.story_id = $1
             ORDER BY a.id ASC"
        );
        sqlx::query_as::<_, ShotTalentAssignment>(&query)
            .bind(story_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        db: impl PgExecutor<'_>,
        id: DbId,
        input: &UpdateAssignment,
    ) -> Result<Option<ShotTalentAssignment>, sqlx::Error> {
        let query = format!(
            "UPDATE shot_talent_assignments SET
                status = COALESCE($2, status),
                rate_agreed = COALESCE($3, rate_agreed),
                estimated_hours = COALESCE($4, estimated_hours),
                actual_hours = COALESCE($5, actual_hours),
                notes = COALESCE($6, notes),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {WORK_COLUMNS_SHOT}"
        );
        sqlx::query_as::<_, ShotTalentAssignment>(&query)
            .bind(id)
            .bind(&input.status)
            .bind(input.rate_agreed)
            .bind(input.estimated_hours)
            .bind(input.actual_hours)
            .bind(&input.notes)
            .fetch_optional(db)
            .await
    }

    pub async fn delete(db: impl PgExecutor<'_>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM shot_talent_assignments WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Pulls every non-cancelled talent assignment across a story's
/// characters, assets and shots as flat cost lines for the breakdown.
pub async fn talent_cost_lines_for_story(
    pool: &PgPool,
    story_id: DbId,
) -> Result<Vec<TalentCostLine>, sqlx::Error> {
    sqlx::query_as::<_, TalentCostLine>(
        "SELECT a.id AS assignment_id, t.id AS talent_id, t.name AS talent_name,
                t.talent_type, a.status, a.rate_agreed, t.hourly_rate, t.daily_rate,
                NULL::INTEGER AS estimated_hours
         FROM character_talent_assignments a
         JOIN talent_pool t ON t.id = a.talent_id
         JOIN story_characters c ON c.id = a.character_id
         WHERE c.story_id = $1 AND a.status <> 'cancelled'
         UNION ALL
         SELECT a.id, t.id, t.name, t.talent_type, a.status, a.rate_agreed,
                t.hourly_rate, t.daily_rate, a.estimated_hours
         FROM asset_talent_assignments a
         JOIN talent_pool t ON t.id = a.talent_id
         JOIN story_assets s ON s.id = a.asset_id
         WHERE s.story_id = $1 AND a.status <> 'cancelled'
         UNION ALL
         SELECT a.id, t.id, t.name, t.talent_type, a.status, a.rate_agreed,
                t.hourly_rate, t.daily_rate, a.estimated_hours
         FROM shot_talent_assignments a
         JOIN talent_pool t ON t.id = a.talent_id
         JOIN story_shots s ON s.id = a.shot_id
         WHERE s.story_id = $1 AND a.status <> 'cancelled'
         ORDER BY assignment_id ASC",
    )
    .bind(story_id)
    .fetch_all(pool)
    .await
}
