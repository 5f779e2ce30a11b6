use anyhow::Result;

use super::super::args::LangCommand;
use super::{CommandKind, CommandResult, CommandSummary, LangSummary, helper::finish};
use crate::{
    locale::is_usual_locale_format,
    project::{read_document, write_document},
};

pub fn lang(cmd: LangCommand) -> Result<CommandResult> {
    let mut document = read_document(&cmd.file)?;

    let (written_to, unusual_format) = match cmd.lang.as_deref() {
        Some(lang) => {
            document.set_target_language(lang);
            let output = cmd.output.unwrap_or(cmd.file);
            write_document(&mut document, &output)?;
            (Some(output), !is_usual_locale_format(lang))
        }
        None => (None, false),
    };

    let summary = LangSummary {
        source_language: document.source_language(),
        target_language: document.target_language(),
        written_to,
        unusual_format,
    };

    Ok(finish(
        CommandKind::Lang,
        CommandSummary::Lang(summary),
        Vec::new(),
        1,
    ))
}
