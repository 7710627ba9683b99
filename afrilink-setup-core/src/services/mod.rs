//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions.

pub mod logging;
mod runner;
mod status;
pub mod transcript;

pub use logging::{events, LogEntry, LogEvent, RunLogService};
pub use runner::MigrationRunner;
pub use status::{SchemaStatus, StatusService};
pub use transcript::{Line, Severity, TranscriptReporter};
