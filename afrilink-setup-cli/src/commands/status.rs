//! Status command - check whether the setup tables exist

use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;

use super::{get_context, get_logger, log_event, GlobalOptions};
use crate::output;
use afrilink_setup_core::config::redact_connection_string;
use afrilink_setup_core::services::events;
use afrilink_setup_core::LogEvent;

pub fn run(options: &GlobalOptions, json: bool) -> Result<ExitCode> {
    let ctx = get_context(options)?;
    let logger = get_logger();
    let target = redact_connection_string(ctx.config.connection_string());

    let status = match ctx.check_status() {
        Ok(status) => status,
        Err(e) => {
            let raw = ctx.config.connection_string();
            let message = if raw.is_empty() {
                e.to_string()
            } else {
                e.to_string().replace(raw, &target)
            };
            log_event(
                &logger,
                LogEvent::new(events::STATUS_CHECKED).with_error(message.clone()),
            );
            anyhow::bail!(message);
        }
    };

    log_event(&logger, LogEvent::new(events::STATUS_CHECKED));

    if json {
        let value = serde_json::json!({
            "target": target,
            "initialized": status.is_initialized(),
            "present": status.present,
            "missing": status.missing,
            "other": status.other,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", "Database Status".bold());
    println!("  Target: {}", target);
    println!();

    let mut table = output::create_table();
    table.set_header(vec!["Table", "State"]);
    for name in &ctx.plan.expected_tables {
        let state = if status.present.contains(name) {
            "present".green().to_string()
        } else {
            "missing".red().to_string()
        };
        table.add_row(vec![name.clone(), state]);
    }
    println!("{}", table);

    if !status.other.is_empty() {
        println!("  Other tables: {}", status.other.join(", "));
    }

    println!();
    if status.is_initialized() {
        output::success("✓ Database tables already exist!");
    } else {
        output::warning(&format!(
            "Database needs initialization ({} of {} tables missing). Run `afrilink-setup run`.",
            status.missing.len(),
            ctx.plan.expected_tables.len()
        ));
    }

    Ok(ExitCode::SUCCESS)
}
