//! Logs command - view and manage the setup run log

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use super::get_state_dir;
use crate::output::{create_table, format_timestamp};
use afrilink_setup_core::services::logging::now_ms;
use afrilink_setup_core::RunLogService;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

#[derive(Subcommand)]
pub enum LogsCommands {
    /// Show recent log entries
    List {
        /// Number of entries to show
        #[arg(short, long, default_value = "50")]
        limit: usize,
        /// Show only failures
        #[arg(long)]
        errors: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Clear old log entries
    Clear {
        /// Delete logs older than N days
        #[arg(long, default_value = "30")]
        older_than_days: u64,
        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show log statistics and database path
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn get_log_service() -> Result<RunLogService> {
    let state_dir = get_state_dir();
    std::fs::create_dir_all(&state_dir)?;
    RunLogService::new(&state_dir, env!("CARGO_PKG_VERSION"))
}

/// Shorten a run id to its first block for table display
fn short_run_id(run_id: Option<&str>) -> String {
    run_id
        .map(|id| id.split('-').next().unwrap_or(id).to_string())
        .unwrap_or_default()
}

/// Cutoff timestamp for `clear --older-than-days`
fn cutoff_ms(now_ms: i64, older_than_days: u64) -> i64 {
    let days = i64::try_from(older_than_days).unwrap_or(i64::MAX);
    now_ms.saturating_sub(days.saturating_mul(DAY_MS))
}

pub fn run(command: LogsCommands) -> Result<()> {
    match command {
        LogsCommands::List { limit, errors, json } => {
            let service = get_log_service()?;
            let entries = if errors {
                service.get_errors(limit)?
            } else {
                service.get_recent(limit)?
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
                return Ok(());
            }

            if entries.is_empty() {
                println!("No log entries found.");
                return Ok(());
            }

            let mut table = create_table();
            table.set_header(vec!["Time", "Event", "Run", "Step", "Error"]);

            for entry in &entries {
                let error_indicator = match entry.failure_kind.as_deref() {
                    Some(kind) => kind.red().to_string(),
                    None if entry.error_message.is_some() => "!".red().to_string(),
                    None => String::new(),
                };

                table.add_row(vec![
                    format_timestamp(entry.timestamp),
                    entry.event.clone(),
                    short_run_id(entry.run_id.as_deref()),
                    entry.step.clone().unwrap_or_default(),
                    error_indicator,
                ]);
            }

            println!("{}", table);

            if !errors {
                let recent_errors = service.get_errors(3)?;
                if !recent_errors.is_empty() {
                    println!();
                    println!("{}", "Recent Errors:".red().bold());
                    for err in &recent_errors {
                        println!(
                            "  {} [{}]: {}",
                            format_timestamp(err.timestamp).dimmed(),
                            err.event,
                            err.error_message.as_deref().unwrap_or("Unknown error")
                        );
                    }
                }
            }
        }
        LogsCommands::Clear {
            older_than_days,
            force,
            json,
        } => {
            let service = get_log_service()?;
            let cutoff = cutoff_ms(now_ms(), older_than_days);

            if !force && !json {
                use dialoguer::Confirm;
                if !Confirm::new()
                    .with_prompt(format!("Delete logs older than {} days?", older_than_days))
                    .default(false)
                    .interact()?
                {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            let deleted = service.delete_before(cutoff)?;

            if json {
                println!("{}", serde_json::json!({ "deleted": deleted }));
            } else {
                println!("Deleted {} log entries", deleted);
            }
        }
        LogsCommands::Stats { json } => {
            let service = get_log_service()?;
            let total = service.count()?;
            let errors = service.count_errors()?;
            let db_path = service.db_path().to_path_buf();
            let size_bytes = std::fs::metadata(&db_path).map(|m| m.len()).unwrap_or(0);

            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "total_entries": total,
                        "error_count": errors,
                        "database_path": db_path.to_string_lossy(),
                        "database_size_bytes": size_bytes
                    })
                );
            } else {
                println!("{}", "Log Statistics".bold());
                println!("  Total entries: {}", total);
                println!("  Errors: {}", errors);
                println!("  Database: {}", db_path.display());
                println!("  Size: {} bytes", size_bytes);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_run_id() {
        assert_eq!(
            short_run_id(Some("6f1c2a9e-0b7d-4c1e-9a55-3d2f8e41b7aa")),
            "6f1c2a9e"
        );
        assert_eq!(short_run_id(None), "");
    }

    #[test]
    fn test_cutoff_ms() {
        assert_eq!(cutoff_ms(10 * DAY_MS, 3), 7 * DAY_MS);
        assert_eq!(cutoff_ms(5, 0), 5);
        // absurd day counts saturate instead of overflowing
        assert_eq!(cutoff_ms(0, u64::MAX), -i64::MAX);
    }
}
