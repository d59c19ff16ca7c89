//! Pure domain logic for the Slate production-management backend.
//!
//! Everything in this crate is synchronous and side-effect free: cost
//! tables, time-string parsing, identity matching, art-control settings
//! merging, and cost-breakdown aggregation. I/O lives in the `slate-db`,
//! `slate-parser`, and `slate-pipeline` crates.

pub mod art_control;
pub mod breakdown;
pub mod costing;
pub mod error;
pub mod matching;
pub mod types;
