//! Status service - compare the live schema against the expected tables

use serde::Serialize;

use crate::config::CONNECTION_ENV_VAR;
use crate::domain::result::{Error, Result};
use crate::ports::SqlClient;

/// Which expected tables exist in the public schema
#[derive(Debug, Clone, Serialize)]
pub struct SchemaStatus {
    /// Expected tables that exist, in expected order
    pub present: Vec<String>,
    /// Expected tables that do not exist, in expected order
    pub missing: Vec<String>,
    /// Public tables not created by setup
    pub other: Vec<String>,
}

impl SchemaStatus {
    /// True when every expected table exists
    pub fn is_initialized(&self) -> bool {
        self.missing.is_empty()
    }
}

pub struct StatusService<C> {
    client: C,
}

impl<C: SqlClient> StatusService<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn check(&self, connection_string: &str, expected_tables: &[String]) -> Result<SchemaStatus> {
        if connection_string.trim().is_empty() {
            return Err(Error::MissingConfig(CONNECTION_ENV_VAR.to_string()));
        }

        let existing = self.client.query_tables(connection_string)?;

        let (present, missing): (Vec<String>, Vec<String>) = expected_tables
            .iter()
            .cloned()
            .partition(|table| existing.contains(table));

        let other = existing
            .into_iter()
            .filter(|table| !expected_tables.contains(table))
            .collect();

        Ok(SchemaStatus {
            present,
            missing,
            other,
        })
    }
}
