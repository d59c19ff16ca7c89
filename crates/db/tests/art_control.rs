//! Integration tests for scope-bound art control settings.

use slate_core::art_control::{resolve, ScopeKind};
use slate_db::models::art_control::UpdateArtControl;
use slate_db::models::sequence::CreateSequence;
use slate_db::models::story::CreateStory;
use slate_db::repositories::{ArtControlRepo, SequenceRepo, StoryRepo};
use sqlx::PgPool;

async fn story_with_sequence(pool: &PgPool) -> (i64, i64) {
    let story = StoryRepo::create(
        pool,
        &CreateStory {
            owner_id: 1,
            title: "Dunes".to_string(),
            raw_text: "text".to_string(),
        },
    )
    .await
    .unwrap();
    let seq = SequenceRepo::create(
        pool,
        story.id,
        &CreateSequence {
            sequence_number: 1,
            title: "Opening".to_string(),
            description: "".to_string(),
            location_id: None,
            estimated_time: "1 day".to_string(),
            total_shots: 0,
        },
    )
    .await
    .unwrap();
    (story.id, seq.id)
}

#[sqlx::test(migrations = "./migrations")]
async fn get_or_create_is_idempotent(pool: PgPool) {
    let (story_id, _) = story_with_sequence(&pool).await;

    let first = ArtControlRepo::get_or_create(&pool, ScopeKind::Story, story_id)
        .await
        .unwrap();
    let second = ArtControlRepo::get_or_create(&pool, ScopeKind::Story, story_id)
        .await
        .unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(first.art_style, "realistic");
    assert_eq!(first.aspect_ratio, "16:9");
    // The persisted seed carries the full story defaults, booleans included.
    assert!(first.allow_upscale);
    assert!(!first.lock_continuity);
}

#[sqlx::test(migrations = "./migrations")]
async fn row_must_bind_exactly_one_scope(pool: PgPool) {
    let (story_id, sequence_id) = story_with_sequence(&pool).await;

    let two = sqlx::query(
        "INSERT INTO art_control_settings (story_id, sequence_id) VALUES ($1, $2)",
    )
    .bind(story_id)
    .bind(sequence_id)
    .execute(&pool)
    .await
    .unwrap_err();
    assert_eq!(
        two.as_database_error().and_then(|e| e.constraint()),
        Some("ck_art_control_exactly_one_scope")
    );

    let none = sqlx::query("INSERT INTO art_control_settings DEFAULT VALUES")
        .execute(&pool)
        .await
        .unwrap_err();
    assert_eq!(
        none.as_database_error().and_then(|e| e.constraint()),
        Some("ck_art_control_exactly_one_scope")
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn sequence_scope_starts_inheriting(pool: PgPool) {
    let (_, sequence_id) = story_with_sequence(&pool).await;
    let row = ArtControlRepo::get_or_create(&pool, ScopeKind::Sequence, sequence_id)
        .await
        .unwrap();
    assert_eq!(row.scope(), ScopeKind::Sequence);
    assert_eq!(row.art_style, "");
    assert_eq!(row.atmosphere.as_deref(), Some(""));
}

#[sqlx::test(migrations = "./migrations")]
async fn restriction_null_overwrites_but_absent_keeps(pool: PgPool) {
    let (story_id, _) = story_with_sequence(&pool).await;
    let row = ArtControlRepo::get_or_create(&pool, ScopeKind::Story, story_id)
        .await
        .unwrap();

    let set = UpdateArtControl {
        atmosphere: Some(Some("dusty haze".to_string())),
        ..Default::default()
    };
    let row = ArtControlRepo::update(&pool, row.id, &set)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.atmosphere.as_deref(), Some("dusty haze"));

    // An update not mentioning the field leaves it alone.
    let untouched = UpdateArtControl {
        art_style: Some("painterly".to_string()),
        ..Default::default()
    };
    let row = ArtControlRepo::update(&pool, row.id, &untouched)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.atmosphere.as_deref(), Some("dusty haze"));
    assert_eq!(row.art_style, "painterly");

    // An explicit null clears the restriction.
    let clear = UpdateArtControl {
        atmosphere: Some(None),
        ..Default::default()
    };
    let row = ArtControlRepo::update(&pool, row.id, &clear)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.atmosphere, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn chain_resolves_narrowest_scalar(pool: PgPool) {
    let (story_id, sequence_id) = story_with_sequence(&pool).await;
    ArtControlRepo::get_or_create(&pool, ScopeKind::Story, story_id)
        .await
        .unwrap();
    let seq_row = ArtControlRepo::get_or_create(&pool, ScopeKind::Sequence, sequence_id)
        .await
        .unwrap();
    ArtControlRepo::update(
        &pool,
        seq_row.id,
        &UpdateArtControl {
            color_mood: Some("ember orange".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let chain = ArtControlRepo::list_for_chain(&pool, story_id, Some(sequence_id), None)
        .await
        .unwrap();
    assert_eq!(chain.len(), 2);
    assert_eq!(chain[0].scope(), ScopeKind::Story);

    let scoped: Vec<_> = chain.into_iter().map(|r| r.into_scoped()).collect();
    let effective = resolve(&scoped);
    // The sequence override wins; untouched fields fall back to story defaults.
    assert_eq!(effective.values.color_mood, "ember orange");
    assert_eq!(effective.values.art_style, "realistic");
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_reverts_scope_to_inheritance(pool: PgPool) {
    let (story_id, sequence_id) = story_with_sequence(&pool).await;
    ArtControlRepo::get_or_create(&pool, ScopeKind::Sequence, sequence_id)
        .await
        .unwrap();
    assert!(
        ArtControlRepo::delete_for_scope(&pool, ScopeKind::Sequence, sequence_id)
            .await
            .unwrap()
    );
    let chain = ArtControlRepo::list_for_chain(&pool, story_id, Some(sequence_id), None)
        .await
        .unwrap();
    assert!(chain.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn sequence_delete_drops_its_settings(pool: PgPool) {
    let (story_id, sequence_id) = story_with_sequence(&pool).await;
    ArtControlRepo::get_or_create(&pool, ScopeKind::Sequence, sequence_id)
        .await
        .unwrap();
    SequenceRepo::delete_for_story(&pool, story_id).await.unwrap();
    let row = ArtControlRepo::find_for_scope(&pool, ScopeKind::Sequence, sequence_id)
        .await
        .unwrap();
    assert!(row.is_none());
}
