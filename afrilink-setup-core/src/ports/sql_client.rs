//! SQL client port - the external database client process

use crate::domain::result::Result;
use crate::domain::ExecutionResult;

/// External database client
///
/// Implementations run the client to completion and return its exit status
/// and captured output. An `Err` means the client could not be run at all
/// (e.g., the binary is missing); a non-zero exit is still `Ok`.
pub trait SqlClient {
    /// Execute `sql` as a single command against `connection_string`
    fn execute(&self, connection_string: &str, sql: &str) -> Result<ExecutionResult>;

    /// List tables in the public schema, sorted by name
    fn query_tables(&self, connection_string: &str) -> Result<Vec<String>>;
}
