//! Ordered API contract runner
//!
//! Authenticates once, then runs a fixed sequence of steps against the
//! Story API. The id captured by the create step travels to later steps in
//! a [`RunContext`] rather than in any shared global.

mod assert;
mod context;
mod report;
mod runner;
mod steps;

pub use context::RunContext;
pub use report::{RunReport, StepReport};
pub use runner::{run_contract, run_steps};
pub use steps::{
    plan, Step, CREATED_MARKER, DELETED_MARKER, DELETE_REJECTED_MARKER, EDITED_MARKER,
    NOT_FOUND_MARKER,
};
