//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for salthaven.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

/// Environment variable naming the default notes folder.
pub const FOLDER_ENV: &str = "SALTHAVEN_FOLDER";

/// salthaven - Find markdown notes written today or on this day in past years
#[derive(Parser, Debug)]
#[command(name = "salthaven")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (report skipped notes)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List notes dated today
    #[command(alias = "t")]
    Today {
        /// Notes folder (default: $SALTHAVEN_FOLDER, config, or current directory)
        #[arg(env = FOLDER_ENV)]
        folder: Option<PathBuf>,

        /// Use this date instead of today (YYYY-MM-DD)
        #[arg(long, value_parser = parse_reference_date)]
        date: Option<NaiveDate>,
    },

    /// List notes dated this month and day in any year
    #[command(alias = "otd")]
    Onthisday {
        /// Notes folder (default: $SALTHAVEN_FOLDER, config, or current directory)
        #[arg(env = FOLDER_ENV)]
        folder: Option<PathBuf>,

        /// Use this date instead of today (YYYY-MM-DD)
        #[arg(long, value_parser = parse_reference_date)]
        date: Option<NaiveDate>,
    },

    /// Import a Day One plain-text export as markdown notes
    #[command(name = "dayone-import", alias = "dayoneimport")]
    DayoneImport {
        /// Folder to write notes into (default: $SALTHAVEN_FOLDER, config, or current directory)
        #[arg(env = FOLDER_ENV)]
        folder: Option<PathBuf>,

        /// Path to the exported Journal.txt (default: dayone.journal from config)
        #[arg(long)]
        journal: Option<PathBuf>,

        /// Show what would be written without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Serve a web page listing notes from this day in past years
    Serve {
        /// Notes folder (default: $SALTHAVEN_FOLDER, config, or current directory)
        #[arg(env = FOLDER_ENV)]
        folder: Option<PathBuf>,

        /// Port to listen on (default: serve.port from config, or 8080)
        #[arg(short, long)]
        port: Option<u16>,

        /// Address to bind (default: serve.bind from config, or 127.0.0.1)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Open config in $EDITOR
    Edit,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,

        /// Configuration value
        value: String,
    },

    /// Print config file path
    Path,
}

/// Supported shells for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

fn parse_reference_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{s}', expected YYYY-MM-DD"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serial_test::serial;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    #[serial]
    fn test_global_flags() {
        let cli = Cli::parse_from(["salthaven", "--verbose", "today", "notes"]);
        assert!(cli.verbose);
        assert!(!cli.quiet);
        assert!(!cli.json);

        let cli = Cli::parse_from(["salthaven", "--quiet", "--json", "today", "notes"]);
        assert!(!cli.verbose);
        assert!(cli.quiet);
        assert!(cli.json);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["salthaven", "-q", "-v", "today", "notes"]).is_err());
    }

    #[test]
    #[serial]
    fn test_today_with_folder_and_date() {
        let cli = Cli::parse_from(["salthaven", "today", "vault", "--date", "2024-03-05"]);
        if let Some(Commands::Today { folder, date }) = cli.command {
            assert_eq!(folder, Some(PathBuf::from("vault")));
            assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 5));
        } else {
            panic!("Expected Today command");
        }
    }

    #[test]
    fn test_invalid_date_rejected() {
        assert!(Cli::try_parse_from(["salthaven", "today", "vault", "--date", "03/05/2024"]).is_err());
        assert!(Cli::try_parse_from(["salthaven", "onthisday", "vault", "--date", "2024-02-30"]).is_err());
    }

    #[test]
    #[serial]
    fn test_aliases() {
        let cli = Cli::parse_from(["salthaven", "t", "vault"]);
        assert!(matches!(cli.command, Some(Commands::Today { .. })));

        let cli = Cli::parse_from(["salthaven", "otd", "vault"]);
        assert!(matches!(cli.command, Some(Commands::Onthisday { .. })));

        let cli = Cli::parse_from(["salthaven", "dayoneimport", "vault", "--journal", "j.txt"]);
        assert!(matches!(cli.command, Some(Commands::DayoneImport { .. })));
    }

    #[test]
    #[serial]
    fn test_dayone_import_options() {
        let cli = Cli::parse_from([
            "salthaven",
            "dayone-import",
            "vault",
            "--journal",
            "Journal.txt",
            "--dry-run",
        ]);
        if let Some(Commands::DayoneImport {
            folder,
            journal,
            dry_run,
        }) = cli.command
        {
            assert_eq!(folder, Some(PathBuf::from("vault")));
            assert_eq!(journal, Some(PathBuf::from("Journal.txt")));
            assert!(dry_run);
        } else {
            panic!("Expected DayoneImport command");
        }
    }

    #[test]
    #[serial]
    fn test_serve_options() {
        let cli = Cli::parse_from(["salthaven", "serve", "vault", "-p", "9000", "--bind", "0.0.0.0"]);
        if let Some(Commands::Serve { folder, port, bind }) = cli.command {
            assert_eq!(folder, Some(PathBuf::from("vault")));
            assert_eq!(port, Some(9000));
            assert_eq!(bind.as_deref(), Some("0.0.0.0"));
        } else {
            panic!("Expected Serve command");
        }
    }

    #[test]
    #[serial]
    fn test_folder_from_env() {
        let original = std::env::var(FOLDER_ENV).ok();
        std::env::set_var(FOLDER_ENV, "/tmp/from-env");

        let cli = Cli::parse_from(["salthaven", "today"]);
        let explicit = Cli::parse_from(["salthaven", "today", "explicit"]);

        match original {
            Some(val) => std::env::set_var(FOLDER_ENV, val),
            None => std::env::remove_var(FOLDER_ENV),
        }

        if let Some(Commands::Today { folder, .. }) = cli.command {
            assert_eq!(folder, Some(PathBuf::from("/tmp/from-env")));
        } else {
            panic!("Expected Today command");
        }
        if let Some(Commands::Today { folder, .. }) = explicit.command {
            assert_eq!(folder, Some(PathBuf::from("explicit")));
        } else {
            panic!("Expected Today command");
        }
    }

    #[test]
    fn test_config_subcommands() {
        let cli = Cli::parse_from(["salthaven", "config", "set", "serve.port", "9000"]);
        if let Some(Commands::Config {
            command: Some(ConfigCommands::Set { key, value }),
        }) = cli.command
        {
            assert_eq!(key, "serve.port");
            assert_eq!(value, "9000");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn test_completions() {
        let cli = Cli::parse_from(["salthaven", "completions", "zsh"]);
        if let Some(Commands::Completions { shell }) = cli.command {
            assert!(matches!(shell, Shell::Zsh));
        } else {
            panic!("Expected Completions command");
        }
    }
}
