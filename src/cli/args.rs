//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `get`: Resolve one key, optionally substituting `{n}` arguments
//! - `keys`: List every resolvable key and the bundle that supplies it
//! - `check`: Check bundle files for structural problems
//! - `init`: Write a default `.restextrc.json`
//! - `serve`: Start the MCP server on stdio

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use super::commands::check::CheckRule;
use crate::config::ConfigOverrides;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Get(cmd)) => cmd.common.verbose,
            Some(Command::Keys(cmd)) => cmd.common.verbose,
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Init) | Some(Command::Serve) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project directory; the config file is searched from here upwards
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Locale to resolve for, e.g. ja_JP (overrides config file and environment)
    #[arg(long, env = "RESTEXT_LOCALE")]
    pub locale: Option<String>,

    /// Locale tried when the requested one only has root tables
    #[arg(long)]
    pub fallback_locale: Option<String>,

    /// Bundles directory (overrides config file)
    #[arg(long)]
    pub bundles_root: Option<String>,

    /// Bundle consulted last (overrides config file)
    #[arg(long)]
    pub common_bundle: Option<String>,

    /// Bundle consulted first (overrides config file)
    #[arg(long)]
    pub specific_bundle: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            bundles_root: self.bundles_root.clone(),
            common_bundle: self.common_bundle.clone(),
            specific_bundle: self.specific_bundle.clone(),
            locale: self.locale.clone(),
            fallback_locale: self.fallback_locale.clone(),
        }
    }
}

#[derive(Debug, Args)]
pub struct GetCommand {
    /// Key to resolve
    pub key: String,

    /// Values for {0}, {1}, ... (the message is formatted when any are given).
    /// Put values starting with '-' after `--`.
    pub args: Vec<String>,

    /// Print the bundle and locale the value came from
    #[arg(long)]
    pub show_source: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct KeysCommand {
    /// Only list keys starting with this prefix
    #[arg(long)]
    pub prefix: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Rules to run (default: all)
    #[arg(value_enum)]
    pub checks: Vec<CheckRule>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve a key through the specific and common bundles
    Get(GetCommand),
    /// List resolvable keys with the bundle that supplies each
    Keys(KeysCommand),
    /// Check bundle files (parse errors, missing root tables, orphan keys, broken patterns)
    Check(CheckCommand),
    /// Initialize a new .restextrc.json configuration file
    Init,
    /// Start MCP server for AI coding agents
    Serve,
}
