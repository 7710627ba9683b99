//! Core domain types
//!
//! Plain data and state - no I/O beyond path checks.

mod execution;
mod outcome;
mod plan;
pub mod result;
mod step;

pub use execution::ExecutionResult;
pub use outcome::{RunOutcome, RunReport, RunState, StepFailure};
pub use plan::{PlannedStep, SetupPlan};
pub use result::FailureKind;
pub use step::MigrationStep;
