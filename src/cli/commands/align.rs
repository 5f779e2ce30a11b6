use std::path::Path;

use anyhow::Result;
use log::{debug, info};

use super::super::args::AlignCommand;
use super::{AlignSummary, CommandKind, CommandResult, CommandSummary, helper::finish};
use crate::{
    align::align_documents,
    config::load_config,
    project::{read_document, write_document},
};

/// Merge the translations of `cmd.align` into `cmd.latest`.
///
/// Dry-run unless `--apply`; the merged document replaces the align file
/// unless `--output` is given.
pub fn align(cmd: AlignCommand) -> Result<CommandResult> {
    let config_result = load_config(Path::new("."))?;
    if !config_result.from_file {
        info!("no .xlifferrc.json found, using default configuration");
    }
    let mut options = config_result.config.align_options();
    if let Some(policy) = cmd.policy {
        options.policy = policy;
    }

    let mut latest = read_document(&cmd.latest)?;
    let previous = read_document(&cmd.align)?;

    let report = align_documents(&mut latest, &previous, &options);
    debug!(
        "aligned {} unit(s) against {}",
        latest.translation_units().len(),
        cmd.align.display()
    );

    let output = cmd.output.unwrap_or(cmd.align);
    if cmd.apply {
        write_document(&mut latest, &output)?;
    }

    let summary = AlignSummary {
        report,
        policy: options.policy,
        target_language: latest.target_language(),
        output,
        is_apply: cmd.apply,
    };

    Ok(finish(
        CommandKind::Align,
        CommandSummary::Align(summary),
        Vec::new(),
        2,
    ))
}
