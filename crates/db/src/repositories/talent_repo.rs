//! Repository for the `talent_pool` table.

use slate_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::talent::{CreateTalent, Talent, UpdateTalent};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, phone, talent_type, hourly_rate, daily_rate, \
     availability_status, specializations, languages, portfolio_url, notes, \
     created_at, updated_at";

/// Provides CRUD operations for the studio-wide talent roster.
pub struct TalentRepo;

impl TalentRepo {
    /// Insert a new talent, returning the created row.
    pub async fn create(
        db: impl PgExecutor<'_>,
        input: &CreateTalent,
    ) -> Result<Talent, sqlx::Error> {
        let query = format!(
            "INSERT INTO talent_pool
                (name, email, phone, talent_type, hourly_rate, daily_rate, specializations,
                 languages, portfolio_url, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Talent>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.talent_type)
            .bind(input.hourly_rate)
            .bind(input.daily_rate)
            .bind(serde_json::json!(input.specializations))
            .bind(serde_json::json!(input.languages))
            .bind(&input.portfolio_url)
            .bind(&input.notes)
            .fetch_one(db)
            .await
    }

    /// Find a talent by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Talent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM talent_pool WHERE id = $1");
        sqlx::query_as::<_, Talent>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the roster, optionally filtered by type and availability,
    /// ordered by name.
    pub async fn list(
        pool: &PgPool,
        talent_type: Option<&str>,
        availability_status: Option<&str>,
    ) -> Result<Vec<Talent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM talent_pool
             WHERE ($1::VARCHAR IS NULL OR talent_type = $1)
               AND ($2::VARCHAR IS NULL OR availability_status = $2)
             ORDER BY name ASC"
        );
        sqlx::query_as::<_, Talent>(&query)
            .bind(talent_type)
            .bind(availability_status)
            .fetch_all(pool)
            .await
    }

    /// Update a talent. Only non-`None` fields in `input` are applied.
    pub async fn update(
        db: impl PgExecutor<'_>,
        id: DbId,
        input: &UpdateTalent,
    ) -> Result<Option<Talent>, sqlx::Error> {
        let query = format!(
            "UPDATE talent_pool SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                talent_type = COALESCE($5, talent_type),
                hourly_rate = COALESCE($6, hourly_rate),
                daily_rate = COALESCE($7, daily_rate),
                availability_status = COALESCE($8, availability_status),
                specializations = COALESCE($9, specializations),
                languages = COALESCE($10, languages),
                portfolio_url = COALESCE($11, portfolio_url),
                notes = COALESCE($12, notes),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Talent>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.talent_type)
            .bind(input.hourly_rate)
            .bind(input.daily_rate)
            .bind(&input.availability_status)
            .bind(input.specializations.as_ref().map(|v| serde_json::json!(v)))
            .bind(input.languages.as_ref().map(|v| serde_json::json!(v)))
            .bind(&input.portfolio_url)
            .bind(&input.notes)
            .fetch_optional(db)
            .await
    }

    /// Delete a talent by ID. Returns `true` if a row was removed.
    /// Assignments cascade with the talent.
    pub async fn delete(db: impl PgExecutor<'_>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM talent_pool WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
