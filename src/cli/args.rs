//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Build translation payloads from markdown/MDX documents
//! - `apply`: Patch a document with a (translated) payload
//! - `init`: Initialize the mdloc configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

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
            Some(Command::Extract(cmd)) => cmd.common.verbose,
            Some(Command::Apply(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    /// Documents or directories to extract (default: scan the source root)
    pub paths: Vec<PathBuf>,

    /// Directory receiving one `<document>.json` payload per document
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Source root directory (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Locale path segment to replace with the placeholder (overrides config file)
    #[arg(long)]
    pub default_locale: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ApplyCommand {
    /// Original document the payload was extracted from
    pub document: PathBuf,

    /// Translation payload JSON
    pub payload: PathBuf,

    /// Write the patched document here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Uppercase and mark every replacement, for reviewing extraction coverage
    #[arg(long)]
    pub emphasize: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract translatable strings into translation payloads
    Extract(ExtractCommand),
    /// Apply a translation payload to its source document
    Apply(ApplyCommand),
    /// Initialize a new .mdlocrc.json configuration file
    Init,
}
