use slate_core::types::DbId;
use slate_parser::ParserError;

/// Errors crossing the pipeline boundary.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Parser(#[from] ParserError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("failed to encode parse snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("story {0} not found")]
    StoryNotFound(DbId),
}
