//! Result of one external client invocation

use serde::{Deserialize, Serialize};

/// Captured exit status and output of the SQL client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Exit code; `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ExecutionResult {
    pub fn new(exit_code: Option<i32>, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Convenience for a clean exit with the given stdout
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self::new(Some(0), stdout, "")
    }

    /// Convenience for a failed exit with the given stderr
    pub fn failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self::new(Some(exit_code), "", stderr)
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Error text to report for a failed invocation
    ///
    /// Falls back to the exit status when the client wrote nothing to stderr.
    pub fn error_text(&self) -> String {
        let stderr = self.stderr.trim_end();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        match self.exit_code {
            Some(code) => format!("client exited with status {}", code),
            None => "client terminated by signal".to_string(),
        }
    }
}
