//! CLI command implementations

pub mod logs;
pub mod plan;
pub mod run;
pub mod status;

use std::path::PathBuf;

use anyhow::{Context, Result};
use afrilink_setup_core::config::{Config, STATE_DIR_ENV_VAR};
use afrilink_setup_core::{LogEvent, RunLogService, SetupContext};

const STATE_DIR_NAME: &str = ".afrilink-setup";

/// Flags shared by every command
#[derive(Debug, Default)]
pub struct GlobalOptions {
    pub base_dir: Option<PathBuf>,
    pub client: Option<String>,
}

/// Get the run log for CLI operations
///
/// Returns None if the log fails to open (shouldn't block a run)
pub fn get_logger() -> Option<RunLogService> {
    let state_dir = get_state_dir();
    std::fs::create_dir_all(&state_dir).ok()?;
    RunLogService::new(&state_dir, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break a run)
pub fn log_event(logger: &Option<RunLogService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Get the state directory from environment or default
pub fn get_state_dir() -> PathBuf {
    resolve_state_dir(std::env::var(STATE_DIR_ENV_VAR).ok(), dirs::home_dir())
}

/// An empty or whitespace override counts as unset
fn resolve_state_dir(env_dir: Option<String>, home: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = env_dir.filter(|d| !d.trim().is_empty()) {
        return PathBuf::from(dir);
    }
    home.map(|home| home.join(STATE_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(STATE_DIR_NAME))
}

/// Load config and apply command-line overrides
pub fn load_config(options: &GlobalOptions) -> Result<Config> {
    let state_dir = get_state_dir();
    let mut config = Config::load(&state_dir)
        .with_context(|| format!("Failed to load settings from {:?}", state_dir))?;

    if let Some(client) = &options.client {
        config.client_program = client.clone();
    }
    if let Some(base_dir) = &options.base_dir {
        config.base_dir = Some(base_dir.clone());
    }

    Ok(config)
}

/// Build the setup context for the AfriLink plan
pub fn get_context(options: &GlobalOptions) -> Result<SetupContext> {
    let config = load_config(options)?;
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let base_dir = config.base_dir_or(&cwd);
    Ok(SetupContext::new(config, &base_dir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_dir_override() {
        let dir = resolve_state_dir(Some("/var/lib/afrilink".into()), Some(PathBuf::from("/home/ada")));
        assert_eq!(dir, PathBuf::from("/var/lib/afrilink"));
    }

    #[test]
    fn test_empty_state_dir_override_is_unset() {
        let home = Some(PathBuf::from("/home/ada"));
        assert_eq!(
            resolve_state_dir(Some(String::new()), home.clone()),
            PathBuf::from("/home/ada/.afrilink-setup")
        );
        assert_eq!(
            resolve_state_dir(Some("  ".into()), home),
            PathBuf::from("/home/ada/.afrilink-setup")
        );
    }

    #[test]
    fn test_state_dir_without_home() {
        assert_eq!(resolve_state_dir(None, None), PathBuf::from(".afrilink-setup"));
    }
}
