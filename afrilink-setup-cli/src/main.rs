//! AfriLink setup CLI - create the platform's database schema

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{logs, plan, run, status, GlobalOptions};

/// AfriLink setup - apply the platform's SQL setup scripts with psql
#[derive(Parser)]
#[command(name = "afrilink-setup", version, about, long_about = None)]
struct Cli {
    /// Directory the script paths are resolved against (default: current directory)
    #[arg(long, global = true)]
    base_dir: Option<PathBuf>,

    /// SQL client program (default: psql)
    #[arg(long, global = true)]
    client: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply every setup script in order, stopping at the first failure (default)
    Run {
        /// Output the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the setup scripts and whether each file is present
    Plan {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check which of the expected tables exist
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// View and manage the setup run log
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    output::init_colors();

    match dispatch(cli) {
        Ok(code) => code,
        Err(e) => {
            output::error(&format!("Error: {:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn dispatch(cli: Cli) -> Result<ExitCode> {
    let options = GlobalOptions {
        base_dir: cli.base_dir,
        client: cli.client,
    };

    match cli.command.unwrap_or(Commands::Run { json: false }) {
        Commands::Run { json } => run::run(&options, json),
        Commands::Plan { json } => plan::run(&options, json),
        Commands::Status { json } => status::run(&options, json),
        Commands::Logs { command } => logs::run(command).map(|()| ExitCode::SUCCESS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_run() {
        let cli = Cli::try_parse_from(["afrilink-setup"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "afrilink-setup",
            "run",
            "--json",
            "--base-dir",
            "/srv/afrilink",
            "--client",
            "psql16",
        ])
        .unwrap();
        assert!(matches!(cli.command, Some(Commands::Run { json: true })));
        assert_eq!(cli.base_dir, Some(PathBuf::from("/srv/afrilink")));
        assert_eq!(cli.client.as_deref(), Some("psql16"));
    }

    #[test]
    fn test_logs_list_limit() {
        let cli = Cli::try_parse_from(["afrilink-setup", "logs", "list", "--limit", "5", "--errors"]).unwrap();
        match cli.command {
            Some(Commands::Logs {
                command: logs::LogsCommands::List { limit, errors, json },
            }) => {
                assert_eq!(limit, 5);
                assert!(errors);
                assert!(!json);
            }
            _ => panic!("expected logs list"),
        }
    }
}
