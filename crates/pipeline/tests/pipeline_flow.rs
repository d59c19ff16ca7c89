//! End-to-end pipeline tests against a real database with a scripted
//! completion client.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use slate_db::models::story::CreateStory;
use slate_db::models::talent::CreateTalent;
use slate_db::models::talent_assignment::CreateCharacterAssignment;
use slate_db::repositories::{
    CharacterAssignmentRepo, CharacterRepo, SequenceRepo, ShotRepo, StoryAssetRepo, StoryRepo,
    TalentRepo,
};
use slate_parser::{CompletionClient, ParserError, StoryParser};
use slate_pipeline::{ingest_story, regenerate_story, repair_parsed_data};
use sqlx::PgPool;

/// Completion client replaying a scripted sequence of payloads.
struct ScriptedClient {
    payloads: Mutex<VecDeque<String>>,
}

impl ScriptedClient {
    fn new(payloads: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            payloads: Mutex::new(payloads.iter().map(|p| p.to_string()).collect()),
        })
    }
}

#[async_trait::async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(
        &self,
        _system: &str,
        _user: &str,
        _json_mode: bool,
    ) -> Result<String, ParserError> {
        self.payloads
            .lock()
            .expect("payload lock")
            .pop_front()
            .ok_or_else(|| ParserError::Service("script exhausted".to_string()))
    }
}

fn parser_with(payloads: &[&str]) -> StoryParser {
    StoryParser::new(ScriptedClient::new(payloads))
}

fn new_story() -> CreateStory {
    CreateStory {
        owner_id: 1,
        title: "Dunes".to_string(),
        raw_text: "Mara crosses the desert with her compass.".to_string(),
    }
}

const FIRST_PARSE: &str = r#"{
    "characters": [
        {"name": "Mara", "description": "a weathered guide", "role": "protagonist", "appearances": 2}
    ],
    "locations": [
        {"name": "Desert", "description": "endless dunes", "type": "outdoor", "scenes": 1}
    ],
    "assets": [
        {"name": "Compass", "type": "model", "description": "brass compass", "complexity": "high"}
    ],
    "sequences": [
        {"sequence_number": 1, "title": "Opening", "description": "the trek begins",
         "location": "Desert", "characters": ["Mara"], "estimated_time": "2 days", "total_shots": 1}
    ],
    "shots": [
        {"shot_number": 1, "sequence_number": 1, "description": "wide on the dunes",
         "characters": ["Mara"], "location": "Desert", "camera_angle": "wide",
         "complexity": "medium", "estimated_time": "2 days", "special_requirements": []}
    ],
    "summary": "A trek across the desert.",
    "total_sequences": 1,
    "total_shots": 1,
    "estimated_total_time": "3 days"
}"#;

#[sqlx::test(migrations = "../db/migrations")]
async fn ingest_persists_entities_and_costs(pool: PgPool) {
    let parser = parser_with(&[FIRST_PARSE]);
    let outcome = ingest_story(&pool, &parser, new_story()).await.unwrap();
    let story = outcome.story;

    // model x high = 2000, one medium 2-day shot = 3000.
    assert!((story.total_estimated_cost - 5000.0).abs() < f64::EPSILON);
    assert_eq!(story.budget_range, "$5.0k");
    assert_eq!(story.total_shots, 1);
    assert_eq!(story.summary, "A trek across the desert.");

    let characters = CharacterRepo::list_for_story(&pool, story.id).await.unwrap();
    assert_eq!(characters.len(), 1);
    assert_eq!(characters[0].name, "Mara");

    let sequences = SequenceRepo::list_for_story(&pool, story.id).await.unwrap();
    assert_eq!(sequences.len(), 1);
    assert!((sequences[0].estimated_cost - 3000.0).abs() < f64::EPSILON);
    assert_eq!(sequences[0].total_shots, 1);

    let shots = ShotRepo::list_for_story(&pool, story.id).await.unwrap();
    assert_eq!(shots.len(), 1);
    assert_eq!(shots[0].sequence_id, Some(sequences[0].id));
    assert!((shots[0].estimated_cost - 3000.0).abs() < f64::EPSILON);

    // Structure maps are keyed by the stringified external numbers.
    assert_eq!(outcome.sequence_ids.get("1"), Some(&sequences[0].id));
    assert_eq!(outcome.shot_ids.get("1"), Some(&shots[0].id));

    // The snapshot is enriched with row ids and costs.
    let parsed = story.parsed_data;
    assert_eq!(parsed["characters"][0]["id"], serde_json::json!(characters[0].id));
    assert_eq!(parsed["shots"][0]["estimated_cost"], serde_json::json!(3000.0));
    assert_eq!(parsed["budget_range"], serde_json::json!("$5.0k"));
}

const SECOND_PARSE: &str = r#"{
    "characters": [
        {"name": "mara", "description": "the guide, revised", "role": "protagonist", "appearances": 3},
        {"name": "Jax", "description": "a rival", "role": "antagonist", "appearances": 1}
    ],
    "locations": [
        {"name": "Desert", "description": "endless dunes", "type": "outdoor", "scenes": 2}
    ],
    "assets": [],
    "sequences": [
        {"sequence_number": 1, "title": "Opening, Revised", "description": "",
         "location": "Desert", "characters": ["mara", "Jax"], "estimated_time": "1 day", "total_shots": 1}
    ],
    "shots": [
        {"shot_number": 1, "sequence_number": 1, "description": "two figures on the ridge",
         "characters": ["mara", "Jax"], "location": "Desert", "camera_angle": "wide",
         "complexity": "high", "estimated_time": "1 day", "special_requirements": []}
    ],
    "summary": "A rivalry in the desert.",
    "total_sequences": 1,
    "total_shots": 1,
    "estimated_total_time": "2 days"
}"#;

#[sqlx::test(migrations = "../db/migrations")]
async fn regeneration_preserves_character_identity(pool: PgPool) {
    let parser = parser_with(&[FIRST_PARSE, SECOND_PARSE]);
    let story = ingest_story(&pool, &parser, new_story()).await.unwrap().story;

    let before = CharacterRepo::list_for_story(&pool, story.id).await.unwrap();
    let mara_id = before[0].id;
    let old_sequence_id = SequenceRepo::list_for_story(&pool, story.id).await.unwrap()[0].id;

    let story = regenerate_story(&pool, &parser, story.id).await.unwrap().story;

    // "mara" re-binds to the existing row case-insensitively; Jax is new.
    let after = CharacterRepo::list_for_story(&pool, story.id).await.unwrap();
    assert_eq!(after.len(), 2);
    let mara = after.iter().find(|c| c.name == "mara").unwrap();
    assert_eq!(mara.id, mara_id);
    assert_eq!(mara.description, "the guide, revised");
    assert!(after.iter().any(|c| c.name == "Jax" && c.id != mara_id));

    // The asset the new parse no longer mentions stays in place;
    // structure is rebuilt with fresh ids.
    let assets = StoryAssetRepo::list_for_story(&pool, story.id).await.unwrap();
    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0].name, "Compass");
    let sequences = SequenceRepo::list_for_story(&pool, story.id).await.unwrap();
    assert_eq!(sequences.len(), 1);
    assert_ne!(sequences[0].id, old_sequence_id);

    // One high-complexity 1-day shot; the aggregate tracks the new parse,
    // which priced no assets.
    assert!((story.total_estimated_cost - 4000.0).abs() < f64::EPSILON);
    assert_eq!(story.budget_range, "$4.0k");
}

const RECAST_PARSE: &str = r#"{
    "characters": [
        {"name": "Jax", "description": "a rival", "role": "protagonist", "appearances": 1}
    ],
    "locations": [
        {"name": "Desert", "description": "endless dunes", "type": "outdoor", "scenes": 1}
    ],
    "assets": [],
    "sequences": [],
    "shots": [],
    "summary": "A recast trek.",
    "total_sequences": 0,
    "total_shots": 0,
    "estimated_total_time": "1 day"
}"#;

#[sqlx::test(migrations = "../db/migrations")]
async fn regeneration_keeps_unmatched_entities_and_their_bookings(pool: PgPool) {
    let parser = parser_with(&[FIRST_PARSE, RECAST_PARSE]);
    let story = ingest_story(&pool, &parser, new_story()).await.unwrap().story;

    let mara_id = CharacterRepo::list_for_story(&pool, story.id).await.unwrap()[0].id;
    let talent = TalentRepo::create(
        &pool,
        &CreateTalent {
            name: "Iris Vale".to_string(),
            email: String::new(),
            phone: String::new(),
            talent_type: "voice_actor".to_string(),
            hourly_rate: None,
            daily_rate: Some(400.0),
            specializations: vec![],
            languages: vec![],
            portfolio_url: String::new(),
            notes: String::new(),
        },
    )
    .await
    .unwrap();
    let booking = CharacterAssignmentRepo::create(
        &pool,
        &CreateCharacterAssignment {
            character_id: mara_id,
            talent_id: talent.id,
            role_type: "voice_actor".to_string(),
            rate_agreed: Some(400.0),
            notes: String::new(),
        },
    )
    .await
    .unwrap();

    regenerate_story(&pool, &parser, story.id).await.unwrap();

    // The recast parse never mentions Mara; her row and the booking
    // against it survive the rewrite.
    let after = CharacterRepo::list_for_story(&pool, story.id).await.unwrap();
    assert_eq!(after.len(), 2);
    assert!(after.iter().any(|c| c.id == mara_id && c.name == "Mara"));
    assert!(after.iter().any(|c| c.name == "Jax"));
    let kept = CharacterAssignmentRepo::find_by_id(&pool, booking.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(kept.character_id, mara_id);
    assert_eq!(kept.talent_id, talent.id);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn regeneration_failure_leaves_story_untouched(pool: PgPool) {
    let parser = parser_with(&[FIRST_PARSE, "not json at all"]);
    let story = ingest_story(&pool, &parser, new_story()).await.unwrap().story;

    let result = regenerate_story(&pool, &parser, story.id).await;
    assert!(result.is_err());

    // The failed parse never opened a transaction; everything is intact.
    let reloaded = StoryRepo::find_by_id(&pool, story.id).await.unwrap().unwrap();
    assert!((reloaded.total_estimated_cost - 5000.0).abs() < f64::EPSILON);
    let characters = CharacterRepo::list_for_story(&pool, story.id).await.unwrap();
    assert_eq!(characters.len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn repair_heals_stale_snapshot_ids(pool: PgPool) {
    let parser = parser_with(&[FIRST_PARSE]);
    let story = ingest_story(&pool, &parser, new_story()).await.unwrap().story;
    let real_id = CharacterRepo::list_for_story(&pool, story.id).await.unwrap()[0].id;

    // Poison the snapshot with an id that no longer exists.
    let mut tampered = story.parsed_data.clone();
    tampered["characters"][0]["id"] = serde_json::json!(real_id + 9999);
    StoryRepo::store_parsed_data(&pool, story.id, &tampered)
        .await
        .unwrap();

    let story = StoryRepo::find_by_id(&pool, story.id).await.unwrap().unwrap();
    let (healed, changed) = repair_parsed_data(&pool, &story).await.unwrap();
    assert!(changed);
    assert_eq!(healed["characters"][0]["id"], serde_json::json!(real_id));

    // The healed snapshot is persisted, so the next read is clean.
    let story = StoryRepo::find_by_id(&pool, story.id).await.unwrap().unwrap();
    let (_, changed_again) = repair_parsed_data(&pool, &story).await.unwrap();
    assert!(!changed_again);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn ingest_with_empty_text_creates_nothing(pool: PgPool) {
    let parser = parser_with(&[]);
    let input = CreateStory {
        owner_id: 1,
        title: "Blank".to_string(),
        raw_text: "   ".to_string(),
    };
    let result = ingest_story(&pool, &parser, input).await;
    assert!(result.is_err());

    let stories = StoryRepo::list_for_owner(&pool, 1).await.unwrap();
    assert!(stories.is_empty());
}
