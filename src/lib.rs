//! Story Spoiler API contract runner
//!
//! This library drives an ordered sequence of HTTP contract checks against
//! the Story Spoiler CRUD API and reports each step's outcome.

pub mod api;
pub mod cli;
pub mod commands;
pub mod common;
pub mod contract;

// Re-export commonly used types for tests
pub use common::config::Config;
pub use common::{Error, Result};
pub use contract::{run_contract, RunReport};
