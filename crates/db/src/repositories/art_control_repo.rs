//! Repository for the `art_control_settings` table.
//!
//! Each row binds to exactly one scope (story, sequence or shot). Reads
//! walk the scope chain; writes go through a race-safe get-or-create so
//! concurrent first writes to the same scope converge on one row.

use slate_core::art_control::{ArtControlValues, ScopeKind};
use slate_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::art_control::{ArtControlSettings, UpdateArtControl};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, story_id, sequence_id, shot_id, art_style, color_mood, aspect_ratio, \
     frame_rate, rendering_style, lighting_style, camera_style, atmosphere, time_of_day, \
     shot_duration, color_palette, reference_images, preferred_shot_types, allow_upscale, \
     lock_continuity, created_at, updated_at";

fn scope_column(scope: ScopeKind) -> &'static str {
    match scope {
        ScopeKind::Story => "story_id",
        ScopeKind::Sequence => "sequence_id",
        ScopeKind::Shot => "shot_id",
    }
}

/// Provides scope-bound access to art control settings.
pub struct ArtControlRepo;

impl ArtControlRepo {
    /// Find the settings row for one scope, if any exists.
    pub async fn find_for_scope(
        db: impl PgExecutor<'_>,
        scope: ScopeKind,
        scope_id: DbId,
    ) -> Result<Option<ArtControlSettings>, sqlx::Error> {
        let column = scope_column(scope);
        let query = format!("SELECT {COLUMNS} FROM art_control_settings WHERE {column} = $1");
        sqlx::query_as::<_, ArtControlSettings>(&query)
            .bind(scope_id)
            .fetch_optional(db)
            .await
    }

    /// Fetch or create the settings row for one scope.
    ///
    /// Story-scope rows are seeded with the production defaults; narrower
    /// scopes start fully inheriting (empty markers everywhere). The
    /// insert races through ON CONFLICT DO NOTHING against the partial
    /// unique index, then re-selects, so both racers see the same row.
    pub async fn get_or_create(
        pool: &PgPool,
        scope: ScopeKind,
        scope_id: DbId,
    ) -> Result<ArtControlSettings, sqlx::Error> {
        let column = scope_column(scope);
        let insert = match scope {
            ScopeKind::Story => format!(
                "INSERT INTO art_control_settings
                    ({column}, art_style, color_mood, aspect_ratio, frame_rate, allow_upscale)
                 VALUES ($1, $2, $3, $4, $5, $6)
                 ON CONFLICT ({column}) WHERE {column} IS NOT NULL DO NOTHING"
            ),
            ScopeKind::Sequence | ScopeKind::Shot => format!(
                "INSERT INTO art_control_settings ({column})
                 VALUES ($1)
                 ON CONFLICT ({column}) WHERE {column} IS NOT NULL DO NOTHING"
            ),
        };
        let mut q = sqlx::query(&insert).bind(scope_id);
        if scope == ScopeKind::Story {
            let seed = ArtControlValues::story_defaults();
            q = q
                .bind(seed.art_style)
                .bind(seed.color_mood)
                .bind(seed.aspect_ratio)
                .bind(seed.frame_rate)
                .bind(seed.allow_upscale);
        }
        q.execute(pool).await?;

        let select = format!("SELECT {COLUMNS} FROM art_control_settings WHERE {column} = $1");
        sqlx::query_as::<_, ArtControlSettings>(&select)
            .bind(scope_id)
            .fetch_one(pool)
            .await
    }

    /// List the settings rows along a scope chain, widest first. Missing
    /// levels are simply absent from the result.
    pub async fn list_for_chain(
        pool: &PgPool,
        story_id: DbId,
        sequence_id: Option<DbId>,
        shot_id: Option<DbId>,
    ) -> Result<Vec<ArtControlSettings>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM art_control_settings
             WHERE story_id = $1
                OR ($2::BIGINT IS NOT NULL AND sequence_id = $2)
                OR ($3::BIGINT IS NOT NULL AND shot_id = $3)
             ORDER BY CASE
                WHEN story_id IS NOT NULL THEN 0
                WHEN sequence_id IS NOT NULL THEN 1
                ELSE 2
             END"
        );
        sqlx::query_as::<_, ArtControlSettings>(&query)
            .bind(story_id)
            .bind(sequence_id)
            .bind(shot_id)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update to one scope's settings row.
    ///
    /// Scalar and list fields use COALESCE semantics. The restriction
    /// fields are tri-state, so an explicit null must overwrite while an
    /// absent field must not; each binds a presence flag plus a value.
    pub async fn update(
        db: impl PgExecutor<'_>,
        id: DbId,
        input: &UpdateArtControl,
    ) -> Result<Option<ArtControlSettings>, sqlx::Error> {
        let query = format!(
            "UPDATE art_control_settings SET
                art_style = COALESCE($2, art_style),
                color_mood = COALESCE($3, color_mood),
                aspect_ratio = COALESCE($4, aspect_ratio),
                frame_rate = COALESCE($5, frame_rate),
                rendering_style = COALESCE($6, rendering_style),
                lighting_style = COALESCE($7, lighting_style),
                camera_style = COALESCE($8, camera_style),
                atmosphere = CASE WHEN $9 THEN $10 ELSE atmosphere END,
                time_of_day = CASE WHEN $11 THEN $12 ELSE time_of_day END,
                shot_duration = CASE WHEN $13 THEN $14 ELSE shot_duration END,
                color_palette = COALESCE($15, color_palette),
                reference_images = COALESCE($16, reference_images),
                preferred_shot_types = COALESCE($17, preferred_shot_types),
                allow_upscale = COALESCE($18, allow_upscale),
                lock_continuity = COALESCE($19, lock_continuity),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let color_palette = input.color_palette.as_ref().map(|v| serde_json::json!(v));
        let reference_images = input.reference_images.as_ref().map(|v| serde_json::json!(v));
        let preferred_shot_types = input
            .preferred_shot_types
            .as_ref()
            .map(|v| serde_json::json!(v));
        sqlx::query_as::<_, ArtControlSettings>(&query)
            .bind(id)
            .bind(&input.art_style)
            .bind(&input.color_mood)
            .bind(&input.aspect_ratio)
            .bind(&input.frame_rate)
            .bind(&input.rendering_style)
            .bind(&input.lighting_style)
            .bind(&input.camera_style)
            .bind(input.atmosphere.is_some())
            .bind(input.atmosphere.clone().flatten())
            .bind(input.time_of_day.is_some())
            .bind(input.time_of_day.clone().flatten())
            .bind(input.shot_duration.is_some())
            .bind(input.shot_duration.clone().flatten())
            .bind(color_palette)
            .bind(reference_images)
            .bind(preferred_shot_types)
            .bind(input.allow_upscale)
            .bind(input.lock_continuity)
            .fetch_optional(db)
            .await
    }

    /// Delete the settings row for one scope, reverting that level to full
    /// inheritance. Returns `true` if a row was removed.
    pub async fn delete_for_scope(
        db: impl PgExecutor<'_>,
        scope: ScopeKind,
        scope_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let column = scope_column(scope);
        let query = format!("DELETE FROM art_control_settings WHERE {column} = $1");
        let result = sqlx::query(&query).bind(scope_id).execute(db).await?;
        Ok(result.rows_affected() > 0)
    }
}
