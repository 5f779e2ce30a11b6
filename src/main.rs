use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;
use xliffer::cli::{Arguments, Command, ExitStatus};

fn main() -> ExitCode {
    let args = Arguments::parse();

    // Logs go to stderr; stdout carries command output and the MCP stream.
    env_logger::Builder::new()
        .filter_level(if args.verbose() {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .parse_default_env()
        .format_timestamp(None)
        .init();

    if matches!(args.command, Some(Command::Serve)) {
        if let Err(err) = xliffer::mcp::run_server() {
            eprintln!("Error: {}", err);
            return ExitStatus::Error.into();
        }
        return ExitStatus::Success.into();
    }

    match xliffer::cli::run_cli(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}
