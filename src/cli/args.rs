//! CLI argument definitions using clap.
//!
//! This module defines the command-line interface structure for all xliffer
//! commands. It uses clap's derive API for declarative argument parsing.
//!
//! ## Commands
//!
//! - `check`: Report problems in the XLIFF files below a directory
//! - `show`: List the translation units of a file
//! - `translate`: Write the translation of one fragment
//! - `state`: Set the workflow state of a unit
//! - `lang`: Print or set the target language
//! - `align`: Carry translations from an old file into a fresh extraction
//! - `init`: Initialize the configuration file
//! - `serve`: Start MCP server for AI integration

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

use crate::align::StatePolicy;
use crate::model::State;

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
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Show(cmd)) => cmd.common.verbose,
            Some(Command::Translate(cmd)) => cmd.common.verbose,
            Some(Command::State(cmd)) => cmd.common.verbose,
            Some(Command::Lang(cmd)) => cmd.common.verbose,
            Some(Command::Align(cmd)) => cmd.common.verbose,
            Some(Command::Init) | Some(Command::Serve) | None => false,
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
pub struct CheckCommand {
    /// Directory (or single file) to check
    #[arg(default_value = ".")]
    pub path: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ShowCommand {
    /// XLIFF file to read
    pub file: PathBuf,

    /// Print the units as JSON
    #[arg(long)]
    pub json: bool,

    /// Only list units with fragments still in the initial state
    #[arg(long)]
    pub untranslated: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct TranslateCommand {
    /// XLIFF file to edit
    pub file: PathBuf,

    /// Id of the translation unit
    #[arg(long)]
    pub id: String,

    /// Index of the fragment to translate
    #[arg(long, default_value_t = 0)]
    pub fragment: usize,

    /// The translation
    pub text: String,

    /// Write the result here instead of overwriting FILE
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Workflow states accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StateArg {
    Initial,
    Translated,
    Reviewed,
    Final,
}

impl From<StateArg> for State {
    fn from(arg: StateArg) -> Self {
        match arg {
            StateArg::Initial => State::Initial,
            StateArg::Translated => State::Translated,
            StateArg::Reviewed => State::Reviewed,
            StateArg::Final => State::Final,
        }
    }
}

#[derive(Debug, Args)]
pub struct StateCommand {
    /// XLIFF file to edit
    pub file: PathBuf,

    /// Id of the translation unit
    #[arg(long)]
    pub id: String,

    /// New state for every fragment of the unit
    #[arg(value_enum)]
    pub state: StateArg,

    /// Write the result here instead of overwriting FILE
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct LangCommand {
    /// XLIFF file to read or edit
    pub file: PathBuf,

    /// New target language; prints the current languages when omitted
    pub lang: Option<String>,

    /// Write the result here instead of overwriting FILE
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct AlignCommand {
    /// Freshly extracted file (defines which units exist)
    pub latest: PathBuf,

    /// Previously translated file to take translations from
    pub align: PathBuf,

    /// Where to write the merged document (default: the ALIGN file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// State for units whose source is unchanged (overrides config file)
    #[arg(long, value_enum)]
    pub policy: Option<StatePolicy>,

    /// Actually write the merged document (default is dry-run)
    #[arg(long)]
    pub apply: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check XLIFF files for parse errors, duplicate ids and untranslated units
    Check(CheckCommand),
    /// List the translation units of an XLIFF file
    Show(ShowCommand),
    /// Translate one fragment of a translation unit
    Translate(TranslateCommand),
    /// Set the workflow state of a translation unit
    State(StateCommand),
    /// Print or set the target language of an XLIFF file
    Lang(LangCommand),
    /// Carry translations from a previous file into a fresh extraction
    Align(AlignCommand),
    /// Initialize a new .xlifferrc.json configuration file
    Init,
    /// Start MCP server for AI coding agents
    Serve,
}
