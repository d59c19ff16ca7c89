//! Integration tests for the talent roster, assignments and departments.

use slate_db::models::character::CreateCharacter;
use slate_db::models::story::CreateStory;
use slate_db::models::talent::{CreateTalent, UpdateTalent};
use slate_db::models::talent_assignment::{
    CreateCharacterAssignment, CreateWorkAssignment, UpdateAssignment,
};
use slate_db::repositories::{
    talent_cost_lines_for_story, AssetAssignmentRepo, CharacterAssignmentRepo, CharacterRepo,
    DepartmentRepo, StoryAssetRepo, StoryRepo, TalentRepo,
};
use sqlx::PgPool;

fn new_talent(name: &str, email: &str, talent_type: &str) -> CreateTalent {
    CreateTalent {
        name: name.to_string(),
        email: email.to_string(),
        phone: String::new(),
        talent_type: talent_type.to_string(),
        hourly_rate: Some(75.0),
        daily_rate: None,
        specializations: vec!["creature work".to_string()],
        languages: vec!["en".to_string()],
        portfolio_url: String::new(),
        notes: String::new(),
    }
}

async fn story_with_character(pool: &PgPool) -> (i64, i64) {
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
    let character = CharacterRepo::create(
        pool,
        story.id,
        &CreateCharacter {
            name: "Mara".to_string(),
            description: "".to_string(),
            role: "protagonist".to_string(),
            appearances: 1,
        },
    )
    .await
    .unwrap();
    (story.id, character.id)
}

#[sqlx::test(migrations = "./migrations")]
async fn talent_crud_and_filtering(pool: PgPool) {
    let anna = TalentRepo::create(&pool, &new_talent("Anna", "anna@studio.test", "voice_actor"))
        .await
        .unwrap();
    TalentRepo::create(&pool, &new_talent("Bram", "bram@studio.test", "animator"))
        .await
        .unwrap();

    let voice = TalentRepo::list(&pool, Some("voice_actor"), None).await.unwrap();
    assert_eq!(voice.len(), 1);
    assert_eq!(voice[0].name, "Anna");

    let busy = TalentRepo::update(
        &pool,
        anna.id,
        &UpdateTalent {
            availability_status: Some("busy".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(busy.availability_status, "busy");

    let available = TalentRepo::list(&pool, None, Some("available")).await.unwrap();
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].name, "Bram");
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_character_assignment_rejected(pool: PgPool) {
    let (_, character_id) = story_with_character(&pool).await;
    let talent = TalentRepo::create(&pool, &new_talent("Anna", "anna@studio.test", "voice_actor"))
        .await
        .unwrap();

    let input = CreateCharacterAssignment {
        character_id,
        talent_id: talent.id,
        role_type: "voice_actor".to_string(),
        rate_agreed: Some(300.0),
        notes: String::new(),
    };
    CharacterAssignmentRepo::create(&pool, &input).await.unwrap();

    let err = CharacterAssignmentRepo::create(&pool, &input)
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23505"));
}

#[sqlx::test(migrations = "./migrations")]
async fn assignment_status_update(pool: PgPool) {
    let (_, character_id) = story_with_character(&pool).await;
    let talent = TalentRepo::create(&pool, &new_talent("Anna", "anna@studio.test", "voice_actor"))
        .await
        .unwrap();
    let assignment = CharacterAssignmentRepo::create(
        &pool,
        &CreateCharacterAssignment {
            character_id,
            talent_id: talent.id,
            role_type: "voice_actor".to_string(),
            rate_agreed: None,
            notes: String::new(),
        },
    )
    .await
    .unwrap();
    assert_eq!(assignment.status, "proposed");

    let confirmed = CharacterAssignmentRepo::update(
        &pool,
        assignment.id,
        &UpdateAssignment {
            status: Some("confirmed".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(confirmed.status, "confirmed");
}

#[sqlx::test(migrations = "./migrations")]
async fn cost_lines_span_all_assignment_kinds(pool: PgPool) {
    let (story_id, character_id) = story_with_character(&pool).await;
    let voice = TalentRepo::create(&pool, &new_talent("Anna", "anna@studio.test", "voice_actor"))
        .await
        .unwrap();
    let artist = TalentRepo::create(&pool, &new_talent("Bram", "bram@studio.test", "3d_artist"))
        .await
        .unwrap();
    let asset = StoryAssetRepo::create(
        &pool,
        story_id,
        &slate_db::models::story_asset::CreateStoryAsset {
            name: "Compass".to_string(),
            asset_type: "prop".to_string(),
            description: "".to_string(),
            complexity: "low".to_string(),
            estimated_cost: 100.0,
        },
    )
    .await
    .unwrap();

    CharacterAssignmentRepo::create(
        &pool,
        &CreateCharacterAssignment {
            character_id,
            talent_id: voice.id,
            role_type: "voice_actor".to_string(),
            rate_agreed: Some(500.0),
            notes: String::new(),
        },
    )
    .await
    .unwrap();
    let cancelled = AssetAssignmentRepo::create(
        &pool,
        &CreateWorkAssignment {
            target_id: asset.id,
            talent_id: artist.id,
            role_type: "modeler".to_string(),
            rate_agreed: None,
            estimated_hours: Some(40),
            notes: String::new(),
        },
    )
    .await
    .unwrap();
    AssetAssignmentRepo::update(
        &pool,
        cancelled.id,
        &UpdateAssignment {
            status: Some("cancelled".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let lines = talent_cost_lines_for_story(&pool, story_id).await.unwrap();
    // Cancelled assignments stay out of the costing view.
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].talent_name, "Anna");
    assert_eq!(lines[0].rate_agreed, Some(500.0));
}

#[sqlx::test(migrations = "./migrations")]
async fn departments_are_seeded_and_toggle_per_story(pool: PgPool) {
    let (story_id, _) = story_with_character(&pool).await;
    let all = DepartmentRepo::list_active(&pool).await.unwrap();
    assert!(all.len() >= 10);

    let modeling = DepartmentRepo::find_by_type(&pool, "modeling")
        .await
        .unwrap()
        .expect("seeded department");
    DepartmentRepo::enable_for_story(&pool, story_id, modeling.id)
        .await
        .unwrap();
    let enabled = DepartmentRepo::list_enabled_for_story(&pool, story_id)
        .await
        .unwrap();
    assert_eq!(enabled.len(), 1);
    assert_eq!(enabled[0].department_type, "modeling");

    DepartmentRepo::disable_for_story(&pool, story_id, modeling.id)
        .await
        .unwrap();
    let enabled = DepartmentRepo::list_enabled_for_story(&pool, story_id)
        .await
        .unwrap();
    assert!(enabled.is_empty());
}
