//! Structured story parsing via an external text-completion service.
//!
//! [`StoryParser`] sends a fixed schema prompt to an OpenAI-compatible
//! chat-completions endpoint and decodes the response into a
//! [`schema::ParsedStory`]. The completion transport sits behind the
//! [`client::CompletionClient`] trait so the reconciliation pipeline can be
//! driven by a scripted mock in tests.

pub mod client;
pub mod error;
pub mod parse;
pub mod prompt;
pub mod schema;

pub use client::{CompletionClient, OpenAiClient, UnconfiguredClient};
pub use error::ParserError;
pub use parse::StoryParser;
pub use schema::ParsedStory;
