//! `translate` and `state`: single-unit edits written back to disk.

use std::path::{Path, PathBuf};

use anyhow::Result;
use log::debug;

use super::super::args::{StateCommand, TranslateCommand};
use super::{CommandKind, CommandResult, CommandSummary, EditSummary, helper::finish};
use crate::{
    document::XliffDocument,
    model::State,
    project::{editable_unit, read_document, write_document},
};

pub fn translate(cmd: TranslateCommand) -> Result<CommandResult> {
    let mut document = read_document(&cmd.file)?;

    let summary = match editable_unit(&document, &cmd.id) {
        Err(err) => refused(&cmd.id, err.to_string()),
        Ok(unit) if cmd.fragment >= unit.fragments.len() => refused(
            &cmd.id,
            format!(
                "unit '{}' has {} fragment(s), no fragment #{}",
                cmd.id,
                unit.fragments.len(),
                cmd.fragment
            ),
        ),
        Ok(_) => {
            document.set_translation(&cmd.id, cmd.fragment, &cmd.text);
            let output = save(&mut document, &cmd.file, cmd.output.as_deref())?;
            EditSummary {
                unit_id: cmd.id,
                written_to: Some(output),
                message: format!("fragment #{} translated", cmd.fragment),
            }
        }
    };

    Ok(finish(
        CommandKind::Translate,
        CommandSummary::Edit(summary),
        Vec::new(),
        1,
    ))
}

pub fn state(cmd: StateCommand) -> Result<CommandResult> {
    let mut document = read_document(&cmd.file)?;
    let state = State::from(cmd.state);

    let summary = match editable_unit(&document, &cmd.id) {
        Err(err) => refused(&cmd.id, err.to_string()),
        Ok(_) => {
            document.set_state(&cmd.id, &state);
            let output = save(&mut document, &cmd.file, cmd.output.as_deref())?;
            EditSummary {
                unit_id: cmd.id,
                written_to: Some(output),
                message: format!("state set to {}", state),
            }
        }
    };

    Ok(finish(
        CommandKind::State,
        CommandSummary::Edit(summary),
        Vec::new(),
        1,
    ))
}

fn refused(id: &str, message: String) -> EditSummary {
    debug!("edit of '{}' refused: {}", id, message);
    EditSummary {
        unit_id: id.to_string(),
        written_to: None,
        message,
    }
}

fn save(document: &mut XliffDocument, file: &Path, output: Option<&Path>) -> Result<PathBuf> {
    let output = output.unwrap_or(file).to_path_buf();
    write_document(document, &output)?;
    Ok(output)
}
