//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The runner
//! depends only on these traits, not on concrete implementations.

mod progress;
mod script_source;
mod sql_client;

pub use progress::{ProgressReporter, SilentReporter};
pub use script_source::ScriptSource;
pub use sql_client::SqlClient;
