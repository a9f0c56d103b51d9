//! Core domain types
//!
//! The values Herald builds in memory for each submission. Their backend-side
//! lifecycle (running, completing, failing) belongs to the pipeline backend.

pub mod coordinate;
pub mod resource;
pub mod run;
pub mod template;
