//! Transcript reporter - renders run progress as text lines
//!
//! Lines carry a severity so a console front end can color them and route
//! errors to stderr. The text itself is fixed here.

use serde::Serialize;
use uuid::Uuid;

use crate::domain::{ExecutionResult, FailureKind, MigrationStep, RunReport, SetupPlan, StepFailure};
use crate::ports::ProgressReporter;

/// Width of the `=` rules around the run
pub const RULE_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Plain,
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    pub severity: Severity,
    pub text: String,
}

impl Line {
    fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
        }
    }

    fn blank() -> Self {
        Self::new(Severity::Plain, "")
    }
}

fn rule() -> Line {
    Line::new(Severity::Plain, "=".repeat(RULE_WIDTH))
}

/// Collects the text of a run
#[derive(Debug, Clone)]
pub struct TranscriptReporter {
    plan_name: String,
    expected_tables: Vec<String>,
    notes: Vec<String>,
    lines: Vec<Line>,
}

impl TranscriptReporter {
    pub fn for_plan(plan: &SetupPlan) -> Self {
        Self {
            plan_name: plan.name.clone(),
            expected_tables: plan.expected_tables.clone(),
            notes: plan.notes.clone(),
            lines: Vec::new(),
        }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Take the lines produced so far
    pub fn drain(&mut self) -> Vec<Line> {
        std::mem::take(&mut self.lines)
    }

    /// All text joined with newlines
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn push(&mut self, severity: Severity, text: impl Into<String>) {
        self.lines.push(Line::new(severity, text));
    }
}

impl ProgressReporter for TranscriptReporter {
    fn run_started(&mut self, _run_id: Uuid, _total_steps: usize) {
        let banner = format!("Starting database setup for {}...", self.plan_name);
        self.push(Severity::Plain, banner);
        self.lines.push(rule());
    }

    fn step_started(&mut self, step: &MigrationStep) {
        self.lines.push(Line::blank());
        self.push(Severity::Info, format!("Executing: {}", step.path));
    }

    fn step_succeeded(&mut self, step: &MigrationStep, _result: &ExecutionResult) {
        self.push(Severity::Success, format!("✓ Successfully executed {}", step.path));
    }

    fn run_failed(&mut self, failure: &StepFailure) {
        let path = failure.path().unwrap_or_default().to_string();
        match failure.kind {
            FailureKind::MissingConfig => {
                self.push(Severity::Error, format!("Error: {}", failure.message));
            }
            FailureKind::MissingFile => {
                self.push(Severity::Error, format!("✗ Script file not found: {}", path));
            }
            FailureKind::ClientError => {
                self.push(Severity::Error, format!("✗ Error executing {}", path));
                self.push(Severity::Error, format!("Error: {}", failure.message));
            }
            FailureKind::UnexpectedError => {
                self.push(Severity::Error, format!("✗ Unexpected error: {}", failure.message));
            }
        }
    }

    fn run_succeeded(&mut self, _report: &RunReport) {
        let mut lines = vec![
            Line::blank(),
            rule(),
            Line::new(Severity::Success, "✓ Database setup completed successfully!"),
            Line::blank(),
            Line::new(Severity::Plain, "Created tables:"),
        ];
        lines.extend(
            self.expected_tables
                .iter()
                .map(|t| Line::new(Severity::Plain, format!("  - {}", t))),
        );
        if !self.notes.is_empty() {
            lines.push(Line::blank());
            lines.extend(self.notes.iter().map(|n| Line::new(Severity::Plain, n.as_str())));
        }
        self.lines.extend(lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(kind: FailureKind, path: Option<&str>, message: &str) -> StepFailure {
        StepFailure {
            kind,
            step: path.map(|p| MigrationStep::new(1, p)),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_step_lines() {
        let mut reporter = TranscriptReporter::for_plan(&SetupPlan::afrilink());
        let step = MigrationStep::new(1, "scripts/001_create_users_and_profiles.sql");

        reporter.run_started(Uuid::new_v4(), 7);
        reporter.step_started(&step);
        reporter.step_succeeded(&step, &ExecutionResult::ok(""));

        let text = reporter.text();
        assert!(text.starts_with("Starting database setup for AfriLink platform...\n"));
        assert!(text.contains(&"=".repeat(60)));
        assert!(text.contains("Executing: scripts/001_create_users_and_profiles.sql"));
        assert!(text.ends_with("✓ Successfully executed scripts/001_create_users_and_profiles.sql"));
    }

    #[test]
    fn test_failure_lines_are_errors() {
        let mut reporter = TranscriptReporter::for_plan(&SetupPlan::afrilink());
        reporter.run_failed(&failure(
            FailureKind::ClientError,
            Some("scripts/002_create_wallets.sql"),
            "ERROR:  oops",
        ));

        let lines = reporter.drain();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.severity == Severity::Error));
        assert_eq!(lines[0].text, "✗ Error executing scripts/002_create_wallets.sql");
        assert_eq!(lines[1].text, "Error: ERROR:  oops");
        assert!(reporter.lines().is_empty());
    }

    #[test]
    fn test_missing_config_line() {
        let mut reporter = TranscriptReporter::for_plan(&SetupPlan::afrilink());
        reporter.run_failed(&failure(
            FailureKind::MissingConfig,
            None,
            "POSTGRES_URL environment variable not set",
        ));
        assert_eq!(reporter.text(), "Error: POSTGRES_URL environment variable not set");
    }

    #[test]
    fn test_unexpected_error_line() {
        let mut reporter = TranscriptReporter::for_plan(&SetupPlan::afrilink());
        reporter.run_failed(&failure(
            FailureKind::UnexpectedError,
            Some("scripts/001_create_users_and_profiles.sql"),
            "Failed to run psql: No such file or directory (os error 2)",
        ));
        assert_eq!(
            reporter.text(),
            "✗ Unexpected error: Failed to run psql: No such file or directory (os error 2)"
        );
    }
}
