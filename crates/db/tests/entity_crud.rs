//! Integration tests for story entity CRUD operations.
//!
//! Exercises the repository layer against a real database:
//! - Story lifecycle and parse-result persistence
//! - Character and location CRUD
//! - Cascade delete of the whole story tree

use slate_db::models::character::{CreateCharacter, UpdateCharacter};
use slate_db::models::location::CreateLocation;
use slate_db::models::sequence::CreateSequence;
use slate_db::models::shot::CreateShot;
use slate_db::models::story::{CreateStory, StoryParseResults};
use slate_db::models::story_asset::CreateStoryAsset;
use slate_db::repositories::{
    CharacterRepo, LocationRepo, SequenceRepo, ShotRepo, StoryAssetRepo, StoryRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_story(title: &str) -> CreateStory {
    CreateStory {
        owner_id: 1,
        title: title.to_string(),
        raw_text: "A hero walks into the desert.".to_string(),
    }
}

fn new_character(name: &str) -> CreateCharacter {
    CreateCharacter {
        name: name.to_string(),
        description: "desc".to_string(),
        role: "protagonist".to_string(),
        appearances: 3,
    }
}

fn new_shot(sequence_id: Option<i64>, number: i32) -> CreateShot {
    CreateShot {
        sequence_id,
        shot_number: number,
        description: "wide on the dunes".to_string(),
        location_id: None,
        camera_angle: "wide".to_string(),
        complexity: "medium".to_string(),
        estimated_time: "2 days".to_string(),
        special_requirements: serde_json::json!([]),
        estimated_cost: 3000.0,
    }
}

// ---------------------------------------------------------------------------
// Stories
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn story_create_and_fetch(pool: PgPool) {
    let story = StoryRepo::create(&pool, &new_story("Dunes")).await.unwrap();
    assert_eq!(story.title, "Dunes");
    assert_eq!(story.total_shots, 0);
    assert_eq!(story.parsed_data, serde_json::json!({}));

    let found = StoryRepo::find_by_id(&pool, story.id).await.unwrap();
    assert!(found.is_some());

    let wrong_owner = StoryRepo::find_for_owner(&pool, story.id, 999).await.unwrap();
    assert!(wrong_owner.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn story_parse_results_rewrite_aggregates(pool: PgPool) {
    let story = StoryRepo::create(&pool, &new_story("Dunes")).await.unwrap();
    let results = StoryParseResults {
        title: "Dunes, Revised".to_string(),
        parsed_data: serde_json::json!({"characters": []}),
        summary: "A short trek.".to_string(),
        total_shots: 4,
        estimated_total_time: "6 days".to_string(),
        total_estimated_cost: 12_000.0,
        budget_range: "$10k-$20k".to_string(),
    };
    let updated = StoryRepo::store_parse_results(&pool, story.id, &results)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.title, "Dunes, Revised");
    assert_eq!(updated.total_shots, 4);
    assert_eq!(updated.budget_range, "$10k-$20k");
}

#[sqlx::test(migrations = "./migrations")]
async fn story_list_newest_first(pool: PgPool) {
    StoryRepo::create(&pool, &new_story("First")).await.unwrap();
    StoryRepo::create(&pool, &new_story("Second")).await.unwrap();
    let stories = StoryRepo::list_for_owner(&pool, 1).await.unwrap();
    assert_eq!(stories.len(), 2);

    let none = StoryRepo::list_for_owner(&pool, 2).await.unwrap();
    assert!(none.is_empty());
}

// ---------------------------------------------------------------------------
// Characters
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn character_crud(pool: PgPool) {
    let story = StoryRepo::create(&pool, &new_story("Dunes")).await.unwrap();
    let mara = CharacterRepo::create(&pool, story.id, &new_character("Mara"))
        .await
        .unwrap();
    assert_eq!(mara.name, "Mara");

    let update = UpdateCharacter {
        description: Some("weathered guide".to_string()),
        ..Default::default()
    };
    let updated = CharacterRepo::update(&pool, mara.id, &update)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "Mara");
    assert_eq!(updated.description, "weathered guide");

    assert!(CharacterRepo::delete(&pool, mara.id).await.unwrap());
    assert!(!CharacterRepo::delete(&pool, mara.id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Sequences, shots and cascade behaviour
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn sequence_delete_cascades_to_shots(pool: PgPool) {
    let story = StoryRepo::create(&pool, &new_story("Dunes")).await.unwrap();
    let seq = SequenceRepo::create(
        &pool,
        story.id,
        &CreateSequence {
            sequence_number: 1,
            title: "Opening".to_string(),
            description: "".to_string(),
            location_id: None,
            estimated_time: "2 days".to_string(),
            total_shots: 1,
        },
    )
    .await
    .unwrap();
    let shot = ShotRepo::create(&pool, story.id, &new_shot(Some(seq.id), 1))
        .await
        .unwrap();

    SequenceRepo::delete_for_story(&pool, story.id).await.unwrap();
    assert!(ShotRepo::find_by_id(&pool, shot.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn story_delete_cascades_everything(pool: PgPool) {
    let story = StoryRepo::create(&pool, &new_story("Dunes")).await.unwrap();
    let character = CharacterRepo::create(&pool, story.id, &new_character("Mara"))
        .await
        .unwrap();
    let location = LocationRepo::create(
        &pool,
        story.id,
        &CreateLocation {
            name: "Desert".to_string(),
            description: "".to_string(),
            location_type: "exterior".to_string(),
            scenes: 2,
        },
    )
    .await
    .unwrap();
    let asset = StoryAssetRepo::create(
        &pool,
        story.id,
        &CreateStoryAsset {
            name: "Compass".to_string(),
            asset_type: "prop".to_string(),
            description: "".to_string(),
            complexity: "low".to_string(),
            estimated_cost: 100.0,
        },
    )
    .await
    .unwrap();

    assert!(StoryRepo::delete(&pool, story.id).await.unwrap());
    assert!(CharacterRepo::find_by_id(&pool, character.id)
        .await
        .unwrap()
        .is_none());
    assert!(LocationRepo::find_by_id(&pool, location.id)
        .await
        .unwrap()
        .is_none());
    assert!(StoryAssetRepo::find_by_id(&pool, asset.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn sequence_shot_counts(pool: PgPool) {
    let story = StoryRepo::create(&pool, &new_story("Dunes")).await.unwrap();
    let seq = SequenceRepo::create(
        &pool,
        story.id,
        &CreateSequence {
            sequence_number: 1,
            title: "Opening".to_string(),
            description: "".to_string(),
            location_id: None,
            estimated_time: "1 day".to_string(),
            total_shots: 2,
        },
    )
    .await
    .unwrap();
    ShotRepo::create(&pool, story.id, &new_shot(Some(seq.id), 1))
        .await
        .unwrap();
    ShotRepo::create(&pool, story.id, &new_shot(Some(seq.id), 2))
        .await
        .unwrap();

    let counts = SequenceRepo::list_with_shot_counts(&pool, story.id)
        .await
        .unwrap();
    assert_eq!(counts.len(), 1);
    assert_eq!(counts[0].shot_count, 2);
}
