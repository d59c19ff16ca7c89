//! Completion-service transport.
//!
//! [`CompletionClient`] is the seam between the parsing pipeline and the
//! external text-completion service. [`OpenAiClient`] implements it against
//! any OpenAI-compatible `/chat/completions` endpoint.

use serde::Deserialize;
use serde_json::json;

use crate::error::ParserError;

/// Sampling temperature for schema extraction; low for determinism.
const TEMPERATURE: f64 = 0.3;
/// Response token budget.
const MAX_TOKENS: u32 = 4000;

/// Abstract text-completion transport.
///
/// `json_mode` asks the service for a JSON-object-constrained completion.
/// Implementations that cannot honor the constraint fall back to an
/// unconstrained request with the same prompt.
#[async_trait::async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        json_mode: bool,
    ) -> Result<String, ParserError>;
}

/// Client for an OpenAI-compatible chat-completions endpoint.
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(base_url: String, api_key: String, model: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
        }
    }

    /// Build a client from environment variables.
    ///
    /// | Env Var           | Required | Default                     |
    /// |-------------------|----------|-----------------------------|
    /// | `OPENAI_API_KEY`  | **yes**  | --                          |
    /// | `OPENAI_BASE_URL` | no       | `https://api.openai.com/v1` |
    /// | `OPENAI_MODEL`    | no       | `gpt-4o`                    |
    pub fn from_env() -> Result<Self, ParserError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                ParserError::Configuration(
                    "OPENAI_API_KEY environment variable is not set".to_string(),
                )
            })?;
        let base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o".to_string());
        Ok(Self::new(base_url, api_key, model))
    }

    async fn request(
        &self,
        system: &str,
        user: &str,
        json_mode: bool,
    ) -> Result<String, ParserError> {
        let mut body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS,
        });
        if json_mode {
            body["response_format"] = json!({ "type": "json_object" });
        }

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ParserError::Service(format!("Completion request failed: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ParserError::Service(format!("Failed to read completion body: {e}")))?;

        if !status.is_success() {
            return Err(ParserError::Service(format!(
                "Completion service returned {status}: {text}"
            )));
        }

        let completion: ChatCompletion = serde_json::from_str(&text)
            .map_err(|e| ParserError::Service(format!("Unexpected completion envelope: {e}")))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ParserError::Service("Completion contained no choices".to_string()))
    }
}

#[async_trait::async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        json_mode: bool,
    ) -> Result<String, ParserError> {
        match self.request(system, user, json_mode).await {
            Ok(content) => Ok(content),
            // Some models reject the response_format hint; retry once
            // unconstrained with the same prompt.
            Err(ParserError::Service(msg))
                if json_mode
                    && (msg.contains("response_format")
                        || msg.to_lowercase().contains("not supported")) =>
            {
                tracing::warn!(
                    model = %self.model,
                    "Completion service rejected response_format, retrying unconstrained"
                );
                self.request(system, user, false).await
            }
            Err(e) => Err(e),
        }
    }
}

/// Stand-in transport for deployments without completion credentials.
///
/// Every call fails with the stored [`ParserError::Configuration`] before
/// any network activity, so parse requests degrade to a structured error
/// instead of keeping the whole server from starting.
pub struct UnconfiguredClient {
    reason: String,
}

impl UnconfiguredClient {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait::async_trait]
impl CompletionClient for UnconfiguredClient {
    async fn complete(
        &self,
        _system: &str,
        _user: &str,
        _json_mode: bool,
    ) -> Result<String, ParserError> {
        Err(ParserError::Configuration(self.reason.clone()))
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}
