use anyhow::Result;
use log::debug;

use super::super::args::CheckCommand;
use super::{CommandKind, CommandResult, CommandSummary, helper::finish};
use crate::{issues::Issue, project::CheckContext, rules::check_document};

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let ctx = CheckContext::new(&cmd.path)?;

    let mut all_issues: Vec<Issue> = Vec::new();
    for loaded in ctx.loaded_files() {
        let issues = check_document(&loaded.file_path, &loaded.document);
        debug!("{}: {} issue(s)", loaded.file_path, issues.len());
        all_issues.extend(issues);
    }

    all_issues.extend(ctx.parse_errors().iter().cloned().map(Issue::ParseError));

    Ok(finish(
        CommandKind::Check,
        CommandSummary::Check,
        all_issues,
        ctx.files.len(),
    ))
}
