//! Story ingest, regeneration and repair pipeline.
//!
//! Sits between the completion-backed parser and the repository layer:
//! turns a [`slate_parser::ParsedStory`] into persisted entity rows with
//! costs, preserving the identities of characters, locations and assets
//! across regenerations.

pub mod costing;
pub mod digest;
pub mod error;
pub mod ingest;
pub mod persist;
pub mod regenerate;
pub mod repair;

pub use error::PipelineError;
pub use ingest::ingest_story;
pub use persist::IngestOutcome;
pub use regenerate::regenerate_story;
pub use repair::repair_parsed_data;
