//! Repositories for departments and department work assignments.

use slate_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::department::{
    AssetDepartmentAssignment, CreateDepartmentAssignment, Department, ShotDepartmentAssignment,
    StoryDepartment, UpdateDepartmentAssignment,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, department_type, description, icon, color, is_active, display_order";

const ASSET_COLUMNS: &str = "id, asset_id, department_id, status, priority, due_date, notes, \
     assigned_at, updated_at";

const SHOT_COLUMNS: &str = "id, shot_id, department_id, status, priority, due_date, notes, \
     assigned_at, updated_at";

/// Read access to the seeded department catalogue plus per-story
/// enablement.
pub struct DepartmentRepo;

impl DepartmentRepo {
    /// List active departments in display order.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Department>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM departments WHERE is_active ORDER BY display_order ASC"
        );
        sqlx::query_as::<_, Department>(&query).fetch_all(pool).await
    }

    /// Find a department by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Department>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM departments WHERE id = $1");
        sqlx::query_as::<_, Department>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a department by its type key, e.g. `modeling`.
    pub async fn find_by_type(
        pool: &PgPool,
        department_type: &str,
    ) -> Result<Option<Department>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM departments WHERE department_type = $1");
        sqlx::query_as::<_, Department>(&query)
            .bind(department_type)
            .fetch_optional(pool)
            .await
    }

    /// Enable a department for a story. Re-enabling flips the flag back
    /// on instead of inserting a second row.
    pub async fn enable_for_story(
        db: impl PgExecutor<'_>,
        story_id: DbId,
        department_id: DbId,
    ) -> Result<StoryDepartment, sqlx::Error> {
        sqlx::query_as::<_, StoryDepartment>(
            "INSERT INTO story_departments (story_id, department_id, is_active)
             VALUES ($1, $2, TRUE)
             ON CONFLICT (story_id, department_id)
             DO UPDATE SET is_active = TRUE
             RETURNING id, story_id, department_id, is_active, notes, assigned_at",
        )
        .bind(story_id)
        .bind(department_id)
        .fetch_one(db)
        .await
    }

    /// Disable a department for a story. Returns `true` if a row changed.
    pub async fn disable_for_story(
        db: impl PgExecutor<'_>,
        story_id: DbId,
        department_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE story_departments SET is_active = FALSE
             WHERE story_id = $1 AND department_id = $2",
        )
        .bind(story_id)
        .bind(department_id)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List the departments enabled for a story.
    pub async fn list_enabled_for_story(
        pool: &PgPool,
        story_id: DbId,
    ) -> Result<Vec<Department>, sqlx::Error> {
        sqlx::query_as::<_, Department>(
            "SELECT d.id, d.name, d.department_type, d.description, d.icon, d.color,
                    d.is_active, d.display_order
             FROM departments d
             JOIN story_departments sd ON sd.department_id = d.id
             WHERE sd.story_id = $1 AND sd.is_active AND d.is_active
             ORDER BY d.display_order ASC",
        )
        .bind(story_id)
        .fetch_all(pool)
        .await
    }
}

/// Department work assignments on assets.
pub struct AssetDepartmentRepo;

impl AssetDepartmentRepo {
    pub async fn create(
        db: impl PgExecutor<'_>,
        input: &CreateDepartmentAssignment,
    ) -> Result<AssetDepartmentAssignment, sqlx::Error> {
        let query = format!(
            "INSERT INTO asset_department_assignments
                (asset_id, department_id, priority, due_date, notes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {ASSET_COLUMNS}"
        );
        sqlx::query_as::<_, AssetDepartmentAssignment>(&query)
            .bind(input.target_id)
            .bind(input.department_id)
            .bind(&input.priority)
            .bind(input.due_date)
            .bind(&input.notes)
            .fetch_one(db)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AssetDepartmentAssignment>, sqlx::Error> {
        let query =
            format!("SELECT {ASSET_COLUMNS} FROM asset_department_assignments WHERE id = $1");
        sqlx::query_as::<_, AssetDepartmentAssignment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_for_story(
        pool: &PgPool,
        story_id: DbId,
    ) -> Result<Vec<AssetDepartmentAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT a.id, a.asset_id, a.department_id, a.status, a.priority, a.due_date,
                    a.notes, a.assigned_at, a.updated_at
             FROM asset_department_assignments a
             JOIN story_assets s ON s.id = a.asset_id
             WHERE s.story_id = $1
             ORDER BY a.id ASC"
        );
        sqlx::query_as::<_, AssetDepartmentAssignment>(&query)
            .bind(story_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        db: impl PgExecutor<'_>,
        id: DbId,
        input: &UpdateDepartmentAssignment,
    ) -> Result<Option<AssetDepartmentAssignment>, sqlx::Error> {
        let query = format!(
            "UPDATE asset_department_assignments SET
                status = COALESCE($2, status),
                priority = COALESCE($3, priority),
                due_date = COALESCE($4, due_date),
                notes = COALESCE($5, notes),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {ASSET_COLUMNS}"
        );
        sqlx::query_as::<_, AssetDepartmentAssignment>(&query)
            .bind(id)
            .bind(&input.status)
            .bind(&input.priority)
            .bind(input.due_date)
            .bind(&input.notes)
            .fetch_optional(db)
            .await
    }

    pub async fn delete(db: impl PgExecutor<'_>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM asset_department_assignments WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Department work assignments on shots.
pub struct ShotDepartmentRepo;

impl ShotDepartmentRepo {
    pub async fn create(
        db: impl PgExecutor<'_>,
        input: &CreateDepartmentAssignment,
    ) -> Result<ShotDepartmentAssignment, sqlx::Error> {
        let query = format!(
            "INSERT INTO shot_department_assignments
                (shot_id, department_id, priority, due_date, notes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {SHOT_COLUMNS}"
        );
        sqlx::query_as::<_, ShotDepartmentAssignment>(&query)
            .bind(input.target_id)
            .bind(input.department_id)
            .bind(&input.priority)
            .bind(input.due_date)
            .bind(&input.notes)
            .fetch_one(db)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ShotDepartmentAssignment>, sqlx::Error> {
        let query =
            format!("SELECT {SHOT_COLUMNS} FROM shot_department_assignments WHERE id = $1");
        sqlx::query_as::<_, ShotDepartmentAssignment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_for_story(
        pool: &PgPool,
        story_id: DbId,
    ) -> Result<Vec<ShotDepartmentAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT a.id, a.shot_id, a.department_id, a.status, a.priority, a.due_date,
                    a.notes, a.assigned_at, a.updated_at
             FROM shot_department_assignments a
             JOIN story_shots s ON s.id = a.shot_id
             WHERE s.story_id = $1
             ORDER BY a.id ASC"
        );
        sqlx::query_as::<_, ShotDepartmentAssignment>(&query)
            .bind(story_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        db: impl PgExecutor<'_>,
        id: DbId,
        input: &UpdateDepartmentAssignment,
    ) -> Result<Option<ShotDepartmentAssignment>, sqlx::Error> {
        let query = format!(
            "UPDATE shot_department_assignments SET
                status = COALESCE($2, status),
                priority = COALESCE($3, priority),
                due_date = COALESCE($4, due_date),
                notes = COALESCE($5, notes),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {SHOT_COLUMNS}"
        );
        sqlx::query_as::<_, ShotDepartmentAssignment>(&query)
            .bind(id)
            .bind(&input.status)
            .bind(&input.priority)
            .bind(input.due_date)
            .bind(&input.notes)
            .fetch_optional(db)
            .await
    }

    pub async fn delete(db: impl PgExecutor<'_>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM shot_department_assignments WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
