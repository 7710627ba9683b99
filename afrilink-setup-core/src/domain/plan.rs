//! Setup plan - the steps of a run and what a finished run leaves behind

use std::path::Path;

use serde::Serialize;

use super::step::MigrationStep;
use crate::migrations::{EXPECTED_TABLES, SEEDED_CURRENCIES, SETUP_SCRIPTS};

/// Ordered steps plus the expected result summary
#[derive(Debug, Clone, Serialize)]
pub struct SetupPlan {
    /// Shown in the start banner (e.g., "AfriLink platform")
    pub name: String,
    pub steps: Vec<MigrationStep>,
    pub expected_tables: Vec<String>,
    /// Extra lines printed after the table list on success
    pub notes: Vec<String>,
}

/// One row of `plan` output
#[derive(Debug, Clone, Serialize)]
pub struct PlannedStep {
    pub ordinal: usize,
    pub path: String,
    pub present: bool,
}

impl SetupPlan {
    pub fn new(
        name: impl Into<String>,
        steps: Vec<MigrationStep>,
        expected_tables: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            steps,
            expected_tables,
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// The AfriLink platform setup: seven scripts, eight tables
    pub fn afrilink() -> Self {
        Self::new(
            "AfriLink platform",
            MigrationStep::from_paths(SETUP_SCRIPTS.iter().copied()),
            EXPECTED_TABLES.iter().map(|t| t.to_string()).collect(),
        )
        .with_note(format!(
            "Seeded {} currencies (African + international)",
            SEEDED_CURRENCIES
        ))
    }

    /// Check which step files exist under `base_dir` without reading them
    pub fn inspect(&self, base_dir: &Path) -> Vec<PlannedStep> {
        self.steps
            .iter()
            .map(|step| PlannedStep {
                ordinal: step.ordinal,
                path: step.path.clone(),
                present: step.resolve(base_dir).is_file(),
            })
            .collect()
    }
}
