use std::path::PathBuf;

use crate::align::{AlignmentReport, StatePolicy};
use crate::issues::Issue;
use crate::model::TranslationUnit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Check,
    Show,
    Translate,
    State,
    Lang,
    Align,
    Init,
}

#[derive(Debug)]
pub enum CommandSummary {
    Check,
    Show(ShowSummary),
    Edit(EditSummary),
    Lang(LangSummary),
    Align(AlignSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ShowSummary {
    pub file: PathBuf,
    /// "XLIFF 1.2" / "XLIFF 2.0".
    pub version: String,
    pub source_language: String,
    pub target_language: String,
    pub units: Vec<TranslationUnit>,
    /// Units before `--untranslated` filtering.
    pub total_units: usize,
    pub json: bool,
}

/// Outcome of `translate` or `state`.
#[derive(Debug)]
pub struct EditSummary {
    pub unit_id: String,
    /// Where the document was written; `None` when the edit was refused.
    pub written_to: Option<PathBuf>,
    /// What was changed, or why nothing was.
    pub message: String,
}

#[derive(Debug)]
pub struct LangSummary {
    pub source_language: String,
    pub target_language: String,
    /// Set when a new target language was written.
    pub written_to: Option<PathBuf>,
    /// True when the new tag looks like neither `xx` nor `xx-YY`.
    pub unusual_format: bool,
}

#[derive(Debug)]
pub struct AlignSummary {
    pub report: AlignmentReport,
    pub policy: StatePolicy,
    pub target_language: String,
    /// Where the merged document goes (or would go without `--apply`).
    pub output: PathBuf,
    pub is_apply: bool,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
    pub error: Option<String>,
}

/// Result of running xliffer commands
pub struct CommandResult {
    pub kind: CommandKind,
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// If true, exit code 1 should be returned when error_count > 0.
    pub exit_on_errors: bool,
    /// All issues found during the check.
    /// Empty for non-check commands.
    pub issues: Vec<Issue>,
    /// Number of files that failed to parse.
    pub parse_error_count: usize,
    /// Number of XLIFF files that were checked.
    pub files_checked: usize,
}
