//! Progress port - notifications emitted while a run advances

use uuid::Uuid;

use crate::domain::{ExecutionResult, MigrationStep, RunReport, StepFailure};

/// Receives run progress in order
///
/// `run_started` is only sent once the precondition holds, so a run that
/// fails for missing configuration produces just `run_failed`.
pub trait ProgressReporter {
    fn run_started(&mut self, _run_id: Uuid, _total_steps: usize) {}

    fn step_started(&mut self, _step: &MigrationStep) {}

    fn step_succeeded(&mut self, _step: &MigrationStep, _result: &ExecutionResult) {}

    fn run_failed(&mut self, _failure: &StepFailure) {}

    fn run_succeeded(&mut self, _report: &RunReport) {}
}

/// Reporter that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
