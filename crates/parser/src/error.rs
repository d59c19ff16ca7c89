/// Errors from the story-parsing path.
///
/// Every variant maps to an empty-but-valid [`crate::schema::ParsedStory`]
/// skeleton at the API boundary so downstream code never renders a null
/// entity list.
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    /// The input text was empty; no completion request was made.
    #[error("Story text is empty")]
    EmptyInput,

    /// Completion credentials are missing or unusable.
    #[error("Completion service not configured: {0}")]
    Configuration(String),

    /// The completion service returned something that is not valid JSON.
    #[error("Failed to parse completion response as JSON: {0}")]
    Decode(String),

    /// Any other failure talking to the completion service.
    #[error("Completion service error: {0}")]
    Service(String),
}
