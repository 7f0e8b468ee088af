use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod dispatch;
mod output;

use cli::Cli;
use commands::{CommandContext, CommandError};
use dispatch::{AsyncCommand, AsyncDispatch, SyncCommand, SyncDispatch};

#[tokio::main]
async fn main() -> ExitCode {
    // Values from .env fill in variables not already set, before clap reads them.
    dotenvy::dotenv().ok();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_logging(&cli);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                match serde_json::to_string_pretty(&error_json) {
                    Ok(text) => eprintln!("{text}"),
                    Err(_) => eprintln!("Error: {e}"),
                }
            } else {
                eprintln!("Error: {e}");
            }
            error_exit_code(&e)
        }
    }
}

/// Installs the logger. `RUST_LOG` overrides the default filter.
fn init_logging(cli: &Cli) {
    let default_filter = if cli.verbose { "salthaven=info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

async fn run(cli: &Cli) -> commands::Result<()> {
    let ctx = CommandContext::from_cli(cli);

    if let Some(dispatch) = SyncDispatch::try_from_cli(cli) {
        return dispatch.execute(&ctx);
    }

    match AsyncDispatch::from_cli(cli) {
        Some(dispatch) => dispatch.execute(&ctx).await,
        None => Err(CommandError::Usage(format!(
            "unhandled command: {:?}",
            cli.command
        ))),
    }
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Scan(_) => "SCAN_ERROR",
        CommandError::Import(_) => "IMPORT_ERROR",
        CommandError::Usage(_) => "USAGE_ERROR",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Server(_) => "SERVER_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> ExitCode {
    match e {
        CommandError::Usage(_) => ExitCode::from(1),
        CommandError::Json(_) => ExitCode::from(1),
        CommandError::Scan(_) => ExitCode::from(3),
        CommandError::Import(_) => ExitCode::from(3),
        CommandError::Server(_) => ExitCode::from(3),
        CommandError::Io(_) => ExitCode::from(3),
        CommandError::Config(_) => ExitCode::from(5),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_error_codes() {
        let scan = CommandError::Scan(salthaven_notes::ScanError::RootNotFound {
            path: PathBuf::from("/missing"),
        });
        assert_eq!(error_code(&scan), "SCAN_ERROR");
        assert_eq!(error_exit_code(&scan), ExitCode::from(3));

        let config = CommandError::Config("bad".to_string());
        assert_eq!(error_code(&config), "CONFIG_ERROR");
        assert_eq!(error_exit_code(&config), ExitCode::from(5));

        let usage = CommandError::Usage("no journal".to_string());
        assert_eq!(error_exit_code(&usage), ExitCode::from(1));
    }

    #[test]
    fn test_import_errors_exit_3() {
        let err = CommandError::Import(salthaven_dayone::ImportError::ExportNotFound {
            path: PathBuf::from("Journal.txt"),
        });
        assert_eq!(error_code(&err), "IMPORT_ERROR");
        assert_eq!(error_exit_code(&err), ExitCode::from(3));
    }
}
