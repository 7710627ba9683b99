//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - psql subprocess for SqlClient
//! - Local filesystem for ScriptSource

pub mod fs;
pub mod psql;
