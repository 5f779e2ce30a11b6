use anyhow::Result;

use super::super::args::ShowCommand;
use super::{CommandKind, CommandResult, CommandSummary, ShowSummary, helper::finish};
use crate::{model::State, project::read_document};

pub fn show(cmd: ShowCommand) -> Result<CommandResult> {
    let document = read_document(&cmd.file)?;

    let units = document.translation_units();
    let total_units = units.len();
    let units = if cmd.untranslated {
        units
            .into_iter()
            .filter(|unit| {
                unit.fragments
                    .iter()
                    .any(|fragment| fragment.state.as_ref() == Some(&State::Initial))
            })
            .collect()
    } else {
        units
    };

    let summary = ShowSummary {
        file: cmd.file,
        version: document
            .version()
            .map(|version| version.to_string())
            .unwrap_or_default(),
        source_language: document.source_language(),
        target_language: document.target_language(),
        units,
        total_units,
        json: cmd.json,
    };

    Ok(finish(
        CommandKind::Show,
        CommandSummary::Show(summary),
        Vec::new(),
        1,
    ))
}
