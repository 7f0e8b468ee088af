//! Command dispatch module for routing CLI commands to their handlers.
//!
//! Commands that only touch the filesystem run synchronously. The server and
//! the config editor need the async runtime.

use chrono::NaiveDate;
use salthaven_notes::DateMatcher;
use std::path::PathBuf;

use crate::cli::{Cli, Commands, ConfigCommands, Shell};
use crate::commands::{self, CommandContext, CommandError, Result};

/// Trait for commands that run to completion without awaiting.
pub trait SyncCommand {
    /// Execute the command.
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Trait for commands that need the async runtime.
#[allow(async_fn_in_trait)]
pub trait AsyncCommand {
    /// Execute the command.
    async fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Commands that run synchronously.
pub enum SyncDispatch<'a> {
    Scan {
        folder: &'a Option<PathBuf>,
        date: Option<NaiveDate>,
        matcher: DateMatcher,
    },
    DayoneImport {
        folder: &'a Option<PathBuf>,
        journal: &'a Option<PathBuf>,
        dry_run: bool,
    },
    Config(&'a Option<ConfigCommands>),
    Completions(&'a Shell),
    Help,
}

impl<'a> SyncDispatch<'a> {
    /// Try to create a sync dispatch from the CLI command.
    /// Returns None if the command needs the async runtime.
    pub fn try_from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Today { folder, date }) => Some(Self::Scan {
                folder,
                date: *date,
                matcher: DateMatcher::ExactDate,
            }),
            Some(Commands::Onthisday { folder, date }) => Some(Self::Scan {
                folder,
                date: *date,
                matcher: DateMatcher::SameMonthDay,
            }),
            Some(Commands::DayoneImport {
                folder,
                journal,
                dry_run,
            }) => Some(Self::DayoneImport {
                folder,
                journal,
                dry_run: *dry_run,
            }),
            Some(Commands::Config {
                command: Some(ConfigCommands::Edit),
            }) => None,
            Some(Commands::Config { command }) => Some(Self::Config(command)),
            Some(Commands::Completions { shell }) => Some(Self::Completions(shell)),
            Some(Commands::Serve { .. }) => None,
            None => Some(Self::Help),
        }
    }
}

impl SyncCommand for SyncDispatch<'_> {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Scan {
                folder,
                date,
                matcher,
            } => {
                let opts = commands::notes::NotesOptions {
                    folder: (*folder).clone(),
                    date: *date,
                    matcher: *matcher,
                };
                commands::notes::execute(ctx, &opts)
            }
            Self::DayoneImport {
                folder,
                journal,
                dry_run,
            } => {
                let opts = commands::dayone::DayOneImportOptions {
                    folder: (*folder).clone(),
                    journal: (*journal).clone(),
                    dry_run: *dry_run,
                };
                commands::dayone::execute(ctx, &opts)
            }
            Self::Config(command) => dispatch_config(ctx, command),
            Self::Completions(shell) => {
                commands::completions::execute(shell).map_err(CommandError::Io)
            }
            Self::Help => {
                if !ctx.quiet {
                    println!("salthaven - notes from today and this day in past years");
                    println!("Use --help for usage information");
                }
                Ok(())
            }
        }
    }
}

/// Dispatch config subcommands.
fn dispatch_config(ctx: &CommandContext, command: &Option<ConfigCommands>) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::execute_show(ctx),
        Some(ConfigCommands::Set { key, value }) => {
            let opts = commands::config::ConfigSetOptions {
                key: key.clone(),
                value: value.clone(),
            };
            commands::config::execute_set(ctx, &opts)
        }
        Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
        Some(ConfigCommands::Edit) => {
            Err(CommandError::Config("edit requires async context".into()))
        }
    }
}

/// Commands that need the async runtime.
pub enum AsyncDispatch<'a> {
    Serve {
        folder: &'a Option<PathBuf>,
        port: Option<u16>,
        bind: &'a Option<String>,
    },
    ConfigEdit,
}

impl<'a> AsyncDispatch<'a> {
    /// Create an async dispatch from the CLI command.
    /// Returns None for commands handled by [`SyncDispatch`].
    pub fn from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Serve { folder, port, bind }) => Some(Self::Serve {
                folder,
                port: *port,
                bind,
            }),
            Some(Commands::Config {
                command: Some(ConfigCommands::Edit),
            }) => Some(Self::ConfigEdit),
            _ => None,
        }
    }
}

impl AsyncCommand for AsyncDispatch<'_> {
    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Serve { folder, port, bind } => {
                let opts = commands::serve::ServeOptions {
                    folder: (*folder).clone(),
                    port: *port,
                    bind: (*bind).clone(),
                };
                commands::serve::execute(ctx, &opts).await
            }
            Self::ConfigEdit => commands::config::execute_edit(ctx).await,
        }
    }
}
