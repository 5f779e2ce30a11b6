use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult, align::align, check::check, edit, init::init, lang::lang, show::show,
    },
};

/// Runs the parsed command to completion.
///
/// Refused edits come back as `Ok` with an error count; `Err` means the
/// command could not run at all (unreadable file, invalid XLIFF, bad config).
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Show(cmd)) => show(cmd),
        Some(Command::Translate(cmd)) => edit::translate(cmd),
        Some(Command::State(cmd)) => edit::state(cmd),
        Some(Command::Lang(cmd)) => lang(cmd),
        Some(Command::Align(cmd)) => align(cmd),
        Some(Command::Init) => init(),
        Some(Command::Serve) => {
            anyhow::bail!("`serve` runs the MCP server and is started from main")
        }
        None => {
            anyhow::bail!("no command given, see `xliffer --help`")
        }
    }
}
