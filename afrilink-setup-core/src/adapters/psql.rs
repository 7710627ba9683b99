//! psql adapter for the SqlClient port
//!
//! Runs `psql --dbname=<connection_string> -c <sql>` and captures everything
//! the client writes. The connection string is bound to `--dbname` so a value
//! starting with `-` is never parsed as an option. Exit codes are passed through untouched; psql exits 1 for
//! SQL errors and 2 for connection failures, and both are client errors to
//! the runner.

use std::process::Command;

use crate::domain::result::{Error, Result};
use crate::domain::ExecutionResult;
use crate::ports::SqlClient;

/// Default client program, looked up on PATH
pub const DEFAULT_PROGRAM: &str = "psql";

const TABLES_QUERY: &str = "SELECT table_name FROM information_schema.tables \
     WHERE table_schema = 'public' ORDER BY table_name";

/// Command-line PostgreSQL client
#[derive(Debug, Clone)]
pub struct PsqlClient {
    program: String,
    /// Placed before the psql arguments (e.g. a wrapper script)
    launcher_args: Vec<String>,
}

impl Default for PsqlClient {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl PsqlClient {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            launcher_args: Vec::new(),
        }
    }

    /// Run `program` with `launcher_args` ahead of the psql arguments
    pub fn with_launcher(program: impl Into<String>, launcher_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            launcher_args,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn run(&self, args: &[&str]) -> Result<ExecutionResult> {
        let output = Command::new(&self.program)
            .args(&self.launcher_args)
            .args(args)
            .output()
            .map_err(|e| Error::unexpected(format!("Failed to run {}: {}", self.program, e)))?;

        Ok(ExecutionResult::new(
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        ))
    }
}

fn dbname_arg(connection_string: &str) -> String {
    format!("--dbname={}", connection_string)
}

impl SqlClient for PsqlClient {
    fn execute(&self, connection_string: &str, sql: &str) -> Result<ExecutionResult> {
        let dbname = dbname_arg(connection_string);
        self.run(&[dbname.as_str(), "-c", sql])
    }

    fn query_tables(&self, connection_string: &str) -> Result<Vec<String>> {
        // -A -t: unaligned, tuples only, so stdout is one name per line
        let dbname = dbname_arg(connection_string);
        let result = self.run(&[dbname.as_str(), "-At", "-c", TABLES_QUERY])?;
        if !result.success() {
            return Err(Error::Client {
                path: "information_schema.tables".to_string(),
                exit_code: result.exit_code,
                stderr: result.error_text(),
            });
        }

        Ok(result
            .stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }
}
