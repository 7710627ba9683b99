//! Run outcome, run state machine and run report

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::result::{Error, FailureKind, Result};
use super::step::MigrationStep;

/// Why a run stopped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepFailure {
    pub kind: FailureKind,
    /// Step that failed; absent when the run never started
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<MigrationStep>,
    /// Captured stderr for client errors, a description otherwise
    pub message: String,
}

impl StepFailure {
    pub fn from_error(step: Option<&MigrationStep>, error: &Error) -> Self {
        Self {
            kind: error.kind(),
            step: step.cloned(),
            message: error.detail(),
        }
    }

    pub fn path(&self) -> Option<&str> {
        self.step.as_ref().map(|s| s.path.as_str())
    }
}

/// Terminal status of a whole run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum RunOutcome {
    Succeeded,
    Failed(StepFailure),
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Succeeded)
    }

    pub fn failure(&self) -> Option<&StepFailure> {
        match self {
            RunOutcome::Succeeded => None,
            RunOutcome::Failed(failure) => Some(failure),
        }
    }

    pub fn kind(&self) -> Option<FailureKind> {
        self.failure().map(|f| f.kind)
    }
}

/// Lifecycle of a run
///
/// `NotStarted -> Running -> {Succeeded, Failed}`. A run that fails its
/// precondition goes straight from `NotStarted` to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    Running,
    Succeeded,
    Failed(FailureKind),
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Succeeded | RunState::Failed(_))
    }

    pub fn start(&mut self) -> Result<()> {
        match self {
            RunState::NotStarted => {
                *self = RunState::Running;
                Ok(())
            }
            other => Err(invalid_transition(*other, "start")),
        }
    }

    pub fn step_completed(&mut self) -> Result<()> {
        match self {
            RunState::Running => Ok(()),
            other => Err(invalid_transition(*other, "complete a step")),
        }
    }

    pub fn succeed(&mut self) -> Result<()> {
        match self {
            RunState::Running => {
                *self = RunState::Succeeded;
                Ok(())
            }
            other => Err(invalid_transition(*other, "succeed")),
        }
    }

    pub fn fail(&mut self, kind: FailureKind) -> Result<()> {
        if self.is_terminal() {
            return Err(invalid_transition(*self, "fail"));
        }
        *self = RunState::Failed(kind);
        Ok(())
    }
}

fn invalid_transition(state: RunState, action: &str) -> Error {
    Error::unexpected(format!("cannot {} a run in state {:?}", action, state))
}

/// Summary of a finished run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed_ms: i64,
    pub total_steps: usize,
    /// Paths of the steps that completed, in execution order
    pub completed: Vec<String>,
    pub outcome: RunOutcome,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    /// Last step that completed before the run stopped
    pub fn last_completed(&self) -> Option<&str> {
        self.completed.last().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_transitions() {
        let mut state = RunState::NotStarted;
        state.start().unwrap();
        state.step_completed().unwrap();
        state.step_completed().unwrap();
        assert_eq!(state, RunState::Running);
        state.succeed().unwrap();
        assert!(state.is_terminal());
    }

    #[test]
    fn test_precondition_failure_skips_running() {
        let mut state = RunState::NotStarted;
        state.fail(FailureKind::MissingConfig).unwrap();
        assert_eq!(state, RunState::Failed(FailureKind::MissingConfig));
    }

    #[test]
    fn test_terminal_states_reject_transitions() {
        let mut state = RunState::Failed(FailureKind::ClientError);
        assert!(state.start().is_err());
        assert!(state.step_completed().is_err());
        assert!(state.succeed().is_err());
        assert!(state.fail(FailureKind::MissingFile).is_err());
        assert_eq!(state, RunState::Failed(FailureKind::ClientError));

        let mut done = RunState::Succeeded;
        assert!(done.fail(FailureKind::UnexpectedError).is_err());
    }

    #[test]
    fn test_cannot_succeed_before_start() {
        let mut state = RunState::NotStarted;
        assert!(state.succeed().is_err());
        assert!(state.step_completed().is_err());
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let outcome = RunOutcome::Failed(StepFailure {
            kind: FailureKind::MissingFile,
            step: Some(MigrationStep::new(3, "scripts/003_create_currencies.sql")),
            message: "No such file or directory".to_string(),
        });
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["kind"], "missing-file");
        assert_eq!(json["step"]["ordinal"], 3);

        let ok = serde_json::to_value(RunOutcome::Succeeded).unwrap();
        assert_eq!(ok["status"], "succeeded");
    }
}
