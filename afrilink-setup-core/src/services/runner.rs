//! Migration runner - applies setup scripts in order, stopping at the first failure
//!
//! Each step reads its script, hands the full text to the SQL client as one
//! command and checks the exit status. Nothing is retried and nothing is
//! checkpointed: running again starts from the first step.

use chrono::Utc;
use uuid::Uuid;

use crate::config::CONNECTION_ENV_VAR;
use crate::domain::result::{Error, Result};
use crate::domain::{ExecutionResult, MigrationStep, RunOutcome, RunReport, RunState, StepFailure};
use crate::ports::{ProgressReporter, ScriptSource, SqlClient};

/// Error that halted a run, with the step it happened on
struct Halt<'a> {
    step: Option<&'a MigrationStep>,
    error: Error,
}

impl<'a> Halt<'a> {
    fn at(step: &'a MigrationStep, error: Error) -> Self {
        Self {
            step: Some(step),
            error,
        }
    }

    fn before_start(error: Error) -> Self {
        Self { step: None, error }
    }
}

/// Sequential, fail-fast migration runner
pub struct MigrationRunner<C, S> {
    client: C,
    source: S,
}

impl<C: SqlClient, S: ScriptSource> MigrationRunner<C, S> {
    pub fn new(client: C, source: S) -> Self {
        Self { client, source }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Run `steps` in order against `connection_string`
    ///
    /// An empty (or whitespace-only) connection string fails with
    /// `MissingConfig` before any script is read or any client is spawned.
    pub fn run(
        &self,
        steps: &[MigrationStep],
        connection_string: &str,
        reporter: &mut dyn ProgressReporter,
    ) -> RunReport {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let mut state = RunState::NotStarted;
        let mut completed = Vec::new();

        let driven = self.drive(run_id, &mut state, steps, connection_string, &mut completed, reporter);
        let outcome = match driven {
            Ok(()) => RunOutcome::Succeeded,
            Err(halt) => {
                let failure = StepFailure::from_error(halt.step, &halt.error);
                // drive() only returns Err from a non-terminal state
                let failed = state.fail(failure.kind);
                debug_assert!(failed.is_ok(), "run failed from state {:?}", state);
                RunOutcome::Failed(failure)
            }
        };

        let finished_at = Utc::now();
        let report = RunReport {
            run_id,
            started_at,
            finished_at,
            elapsed_ms: (finished_at - started_at).num_milliseconds(),
            total_steps: steps.len(),
            completed,
            outcome,
        };

        match report.outcome.failure() {
            Some(failure) => reporter.run_failed(failure),
            None => reporter.run_succeeded(&report),
        }

        report
    }

    fn drive<'a>(
        &self,
        run_id: Uuid,
        state: &mut RunState,
        steps: &'a [MigrationStep],
        connection_string: &str,
        completed: &mut Vec<String>,
        reporter: &mut dyn ProgressReporter,
    ) -> std::result::Result<(), Halt<'a>> {
        if connection_string.trim().is_empty() {
            return Err(Halt::before_start(Error::MissingConfig(
                CONNECTION_ENV_VAR.to_string(),
            )));
        }

        state.start().map_err(Halt::before_start)?;
        reporter.run_started(run_id, steps.len());

        for step in steps {
            reporter.step_started(step);

            let result = self
                .execute_step(step, connection_string)
                .map_err(|e| Halt::at(step, e))?;

            state.step_completed().map_err(|e| Halt::at(step, e))?;
            completed.push(step.path.clone());
            reporter.step_succeeded(step, &result);
        }

        state.succeed().map_err(Halt::before_start)
    }

    /// Apply one step: read, execute, check the exit status
    pub fn execute_step(&self, step: &MigrationStep, connection_string: &str) -> Result<ExecutionResult> {
        let sql = self.source.read(step)?;
        let result = self.client.execute(connection_string, &sql)?;

        if !result.success() {
            return Err(Error::Client {
                path: step.path.clone(),
                exit_code: result.exit_code,
                stderr: result.error_text(),
            });
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FailureKind;
    use crate::ports::SilentReporter;
    use std::cell::RefCell;

    struct MapSource(Vec<(&'static str, &'static str)>);

    impl ScriptSource for MapSource {
        fn read(&self, step: &MigrationStep) -> Result<String> {
            self.0
                .iter()
                .find(|(path, _)| *path == step.path)
                .map(|(_, sql)| sql.to_string())
                .ok_or_else(|| Error::MissingFile {
                    path: step.path.clone(),
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                })
        }
    }

    /// Fails any SQL containing "FAIL", records everything it sees
    #[derive(Default)]
    struct EchoClient {
        seen: RefCell<Vec<String>>,
    }

    impl SqlClient for EchoClient {
        fn execute(&self, _connection_string: &str, sql: &str) -> Result<ExecutionResult> {
            self.seen.borrow_mut().push(sql.to_string());
            if sql.contains("FAIL") {
                Ok(ExecutionResult::failed(1, "ERROR:  boom"))
            } else {
                Ok(ExecutionResult::ok("CREATE TABLE"))
            }
        }

        fn query_tables(&self, _connection_string: &str) -> Result<Vec<String>> {
            Ok(vec![])
        }
    }

    fn runner(files: Vec<(&'static str, &'static str)>) -> MigrationRunner<EchoClient, MapSource> {
        MigrationRunner::new(EchoClient::default(), MapSource(files))
    }

    #[test]
    fn test_runs_all_steps_in_order() {
        let runner = runner(vec![("a.sql", "A"), ("b.sql", "B"), ("c.sql", "C")]);
        let steps = MigrationStep::from_paths(["a.sql", "b.sql", "c.sql"]);

        let report = runner.run(&steps, "postgres://localhost/afrilink", &mut SilentReporter);

        assert!(report.is_success());
        assert_eq!(report.completed, vec!["a.sql", "b.sql", "c.sql"]);
        assert_eq!(*runner.client().seen.borrow(), vec!["A", "B", "C"]);
        assert_eq!(report.total_steps, 3);
    }

    #[test]
    fn test_whitespace_connection_string_is_missing_config() {
        let runner = runner(vec![("a.sql", "A")]);
        let steps = MigrationStep::from_paths(["a.sql"]);

        let report = runner.run(&steps, "   ", &mut SilentReporter);

        let failure = report.outcome.failure().unwrap();
        assert_eq!(failure.kind, FailureKind::MissingConfig);
        assert!(failure.step.is_none());
        assert!(runner.client().seen.borrow().is_empty());
    }

    #[test]
    fn test_client_error_carries_stderr_and_stops() {
        let runner = runner(vec![("a.sql", "A"), ("b.sql", "FAIL"), ("c.sql", "C")]);
        let steps = MigrationStep::from_paths(["a.sql", "b.sql", "c.sql"]);

        let report = runner.run(&steps, "postgres://localhost/afrilink", &mut SilentReporter);

        let failure = report.outcome.failure().unwrap();
        assert_eq!(failure.kind, FailureKind::ClientError);
        assert_eq!(failure.path(), Some("b.sql"));
        assert_eq!(failure.message, "ERROR:  boom");
        assert_eq!(report.last_completed(), Some("a.sql"));
        assert_eq!(*runner.client().seen.borrow(), vec!["A", "FAIL"]);
    }

    #[test]
    fn test_execute_step_reports_missing_file() {
        let runner = runner(vec![]);
        let err = runner
            .execute_step(&MigrationStep::new(1, "gone.sql"), "postgres://x")
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::MissingFile);
    }

    #[test]
    fn test_empty_step_list_succeeds() {
        let runner = runner(vec![]);
        let report = runner.run(&[], "postgres://localhost/afrilink", &mut SilentReporter);
        assert!(report.is_success());
        assert!(report.completed.is_empty());
    }
}
