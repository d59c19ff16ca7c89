//! Shared application state for handlers.

use std::sync::Arc;

use slate_db::DbPool;
use slate_parser::StoryParser;

use crate::config::ServerConfig;

/// Application state shared across all request handlers.
///
/// Cloned per request by axum; every field is cheaply cloneable.
#[derive(Clone)]
pub struct AppState {
    /// Postgres connection pool.
    pub pool: DbPool,
    /// Server configuration (cors, timeouts, jwt secret).
    pub config: Arc<ServerConfig>,
    /// Completion-backed story parser shared by ingest and regeneration.
    pub parser: StoryParser,
}

impl AppState {
    pub fn new(pool: DbPool, config: ServerConfig, parser: StoryParser) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            parser,
        }
    }
}
