//! Story text -> [`ParsedStory`] via the completion service.

use std::sync::Arc;

use crate::client::CompletionClient;
use crate::error::ParserError;
use crate::prompt::{build_regeneration_prompt, build_user_prompt, SYSTEM_PROMPT};
use crate::schema::ParsedStory;

/// Parses free-text scripts into structured production data.
///
/// A single attempt per call: one completion request (with one in-client
/// fallback if the service rejects JSON-constrained mode), then decode.
/// No retry loop; callers treat the completion service as a slow,
/// synchronous dependency with an external timeout policy.
#[derive(Clone)]
pub struct StoryParser {
    client: Arc<dyn CompletionClient>,
}

impl StoryParser {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Parse story text into structured entities.
    ///
    /// Empty input fails fast without a network call. Malformed completion
    /// output surfaces as [`ParserError::Decode`] with the serde diagnostic.
    pub async fn parse(&self, story_text: &str) -> Result<ParsedStory, ParserError> {
        self.request(story_text, None).await
    }

    /// Re-parse story text, steering the completion towards entity names
    /// that already exist so their identities survive regeneration.
    pub async fn parse_with_known_entities(
        &self,
        story_text: &str,
        known_entities: &str,
    ) -> Result<ParsedStory, ParserError> {
        self.request(story_text, Some(known_entities)).await
    }

    async fn request(
        &self,
        story_text: &str,
        known_entities: Option<&str>,
    ) -> Result<ParsedStory, ParserError> {
        if story_text.trim().is_empty() {
            return Err(ParserError::EmptyInput);
        }

        let user_prompt = match known_entities {
            Some(digest) if !digest.trim().is_empty() => {
                build_regeneration_prompt(story_text, digest)
            }
            _ => build_user_prompt(story_text),
        };
        let raw = self
            .client
            .complete(SYSTEM_PROMPT, &user_prompt, true)
            .await?;

        let cleaned = strip_code_fences(&raw);
        let parsed: ParsedStory = serde_json::from_str(cleaned)
            .map_err(|e| ParserError::Decode(format!("{e}")))?;

        tracing::debug!(
            characters = parsed.characters.len(),
            locations = parsed.locations.len(),
            assets = parsed.assets.len(),
            sequences = parsed.sequences.len(),
            shots = parsed.shots.len(),
            "Parsed story structure"
        );

        Ok(parsed)
    }
}

/// Strip a markdown code-fence wrapper (```json ... ``` or ``` ... ```)
/// from a completion, if present.
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    /// Scripted completion client for tests; returns a fixed payload.
    struct FixedClient {
        payload: String,
    }

    #[async_trait::async_trait]
    impl CompletionClient for FixedClient {
        async fn complete(
            &self,
            _system: &str,
            _user: &str,
            _json_mode: bool,
        ) -> Result<String, ParserError> {
            Ok(self.payload.clone())
        }
    }

    fn parser_with(payload: &str) -> StoryParser {
        StoryParser::new(Arc::new(FixedClient {
            payload: payload.to_string(),
        }))
    }

    const MINIMAL_JSON: &str = r#"{
        "characters": [{"name": "Mara", "role": "protagonist"}],
        "locations": [],
        "assets": [],
        "sequences": [],
        "shots": [],
        "summary": "A story about Mara",
        "total_sequences": 0,
        "total_shots": 0,
        "estimated_total_time": "1 week"
    }"#;

    #[test]
    fn strips_json_fence() {
        let wrapped = format!("```json\n{MINIMAL_JSON}\n```");
        assert_eq!(strip_code_fences(&wrapped), MINIMAL_JSON.trim());
    }

    #[test]
    fn strips_bare_fence() {
        assert_eq!(strip_code_fences("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
    }

    #[test]
    fn unfenced_text_passes_through() {
        assert_eq!(strip_code_fences("  {\"a\": 1}  "), "{\"a\": 1}");
    }

    #[tokio::test]
    async fn empty_input_fails_without_completion_call() {
        let parser = parser_with("should never be requested");
        assert_matches!(parser.parse("").await, Err(ParserError::EmptyInput));
        assert_matches!(parser.parse("   \n  ").await, Err(ParserError::EmptyInput));
    }

    #[tokio::test]
    async fn decodes_minimal_completion() {
        let parser = parser_with(MINIMAL_JSON);
        let parsed = parser.parse("Mara enters the lab.").await.unwrap();
        assert_eq!(parsed.characters.len(), 1);
        assert_eq!(parsed.characters[0].name, "Mara");
        assert_eq!(parsed.summary, "A story about Mara");
    }

    #[tokio::test]
    async fn decodes_fenced_completion() {
        let parser = parser_with(&format!("```json\n{MINIMAL_JSON}\n```"));
        let parsed = parser.parse("Mara enters the lab.").await.unwrap();
        assert_eq!(parsed.characters[0].role, "protagonist");
    }

    #[tokio::test]
    async fn missing_fields_default_to_empty() {
        let parser = parser_with(r#"{"summary": "sparse"}"#);
        let parsed = parser.parse("text").await.unwrap();
        assert!(parsed.characters.is_empty());
        assert!(parsed.shots.is_empty());
        assert_eq!(parsed.total_shots, 0);
    }

    #[tokio::test]
    async fn malformed_json_surfaces_decode_error() {
        let parser = parser_with("this is not json");
        assert_matches!(parser.parse("text").await, Err(ParserError::Decode(_)));
    }

    #[tokio::test]
    async fn service_error_passes_through() {
        struct FailingClient;

        #[async_trait::async_trait]
        impl CompletionClient for FailingClient {
            async fn complete(
                &self,
                _system: &str,
                _user: &str,
                _json_mode: bool,
            ) -> Result<String, ParserError> {
                Err(ParserError::Service("boom".to_string()))
            }
        }

        let parser = StoryParser::new(Arc::new(FailingClient));
        assert_matches!(parser.parse("text").await, Err(ParserError::Service(_)));
    }

    #[test]
    fn empty_skeleton_has_all_lists() {
        let value = serde_json::to_value(ParsedStory::empty()).unwrap();
        for key in ["characters", "locations", "assets", "sequences", "shots"] {
            assert!(value[key].as_array().unwrap().is_empty());
        }
    }
}
