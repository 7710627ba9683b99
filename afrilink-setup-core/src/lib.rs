//! AfriLink Setup Core - applies the platform's database setup scripts
//!
//! The crate follows a hexagonal layout:
//!
//! - **domain**: steps, execution results, run state and outcomes, the setup plan
//! - **ports**: traits for the SQL client, script source and progress reporting
//! - **services**: the migration runner, schema status and run log
//! - **adapters**: psql subprocess and filesystem implementations

pub mod adapters;
pub mod config;
pub mod domain;
pub mod log_migrations;
pub mod migrations;
pub mod ports;
pub mod services;

use std::path::{Path, PathBuf};

use adapters::fs::FsScriptSource;
use adapters::psql::PsqlClient;
use config::Config;
use services::{MigrationRunner, SchemaStatus, StatusService};

// Re-export commonly used types at crate root
pub use domain::result::{Error, FailureKind, Result};
pub use domain::{
    ExecutionResult, MigrationStep, PlannedStep, RunOutcome, RunReport, SetupPlan, StepFailure,
};
pub use ports::ProgressReporter;
pub use services::{LogEvent, RunLogService};

/// Main context for setup operations
///
/// Wires the psql client and filesystem script source into the runner and
/// status services for one configuration and plan.
pub struct SetupContext {
    pub config: Config,
    pub plan: SetupPlan,
    pub base_dir: PathBuf,
    pub runner: MigrationRunner<PsqlClient, FsScriptSource>,
    pub status_service: StatusService<PsqlClient>,
}

impl SetupContext {
    /// Create a context for the AfriLink plan
    pub fn new(config: Config, base_dir: &Path) -> Self {
        Self::with_plan(config, SetupPlan::afrilink(), base_dir)
    }

    pub fn with_plan(config: Config, plan: SetupPlan, base_dir: &Path) -> Self {
        let client = PsqlClient::new(config.client_program.clone());
        let runner = MigrationRunner::new(client.clone(), FsScriptSource::new(base_dir));
        let status_service = StatusService::new(client);

        Self {
            config,
            plan,
            base_dir: base_dir.to_path_buf(),
            runner,
            status_service,
        }
    }

    /// Apply every step of the plan
    pub fn run(&self, reporter: &mut dyn ProgressReporter) -> RunReport {
        self.runner
            .run(&self.plan.steps, self.config.connection_string(), reporter)
    }

    /// Compare the live schema with the plan's expected tables
    pub fn check_status(&self) -> Result<SchemaStatus> {
        self.status_service
            .check(self.config.connection_string(), &self.plan.expected_tables)
    }

    /// Step files and whether each is present
    pub fn inspect_plan(&self) -> Vec<PlannedStep> {
        self.plan.inspect(&self.base_dir)
    }
}
