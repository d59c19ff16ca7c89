//! HTTP request handlers, one module per resource family.

pub mod art_control;
pub mod assignments;
pub mod breakdown;
pub mod departments;
pub mod entities;
pub mod stories;
pub mod talent;
