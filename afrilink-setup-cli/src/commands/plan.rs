//! Plan command - list the setup scripts without running them

use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;

use super::{get_context, GlobalOptions};
use crate::output;

pub fn run(options: &GlobalOptions, json: bool) -> Result<ExitCode> {
    let ctx = get_context(options)?;
    let planned = ctx.inspect_plan();
    let all_present = planned.iter().all(|s| s.present);

    if json {
        let value = serde_json::json!({
            "name": ctx.plan.name,
            "base_dir": ctx.base_dir.to_string_lossy(),
            "steps": planned,
            "expected_tables": ctx.plan.expected_tables,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", format!("Setup plan for {}", ctx.plan.name).bold());
        println!("  Base directory: {}", ctx.base_dir.display());
        println!();

        let mut table = output::create_table();
        table.set_header(vec!["#", "Script", "Present"]);
        for step in &planned {
            let present = if step.present {
                "yes".green().to_string()
            } else {
                "missing".red().to_string()
            };
            table.add_row(vec![step.ordinal.to_string(), step.path.clone(), present]);
        }
        println!("{}", table);

        if !all_present {
            let missing = planned.iter().filter(|s| !s.present).count();
            println!();
            output::warning(&format!("{} script file(s) not found", missing));
        }
    }

    Ok(if all_present {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
