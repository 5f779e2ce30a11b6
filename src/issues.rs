//! Issue types reported by `xliffer check`.
//!
//! Each issue is self-contained with everything a reporter needs: the CLI
//! prints them cargo-style, the MCP server returns them as JSON.

use enum_dispatch::enum_dispatch;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    ParseError,
    DuplicateId,
    MissingTargetLanguage,
    Unsupported,
    Untranslated,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::ParseError => write!(f, "parse-error"),
            Rule::DuplicateId => write!(f, "duplicate-id"),
            Rule::MissingTargetLanguage => write!(f, "missing-target-language"),
            Rule::Unsupported => write!(f, "unsupported"),
            Rule::Untranslated => write!(f, "untranslated"),
        }
    }
}

// ============================================================
// Location
// ============================================================

/// A translation unit inside an XLIFF file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitContext {
    pub file_path: String,
    pub unit_id: String,
    /// 1-based position of the unit in document order.
    pub position: usize,
}

impl UnitContext {
    pub fn new(file_path: impl Into<String>, unit_id: impl Into<String>, position: usize) -> Self {
        Self {
            file_path: file_path.into(),
            unit_id: unit_id.into(),
            position,
        }
    }
}

// ============================================================
// Issue Types - Documents
// ============================================================

/// File is not well-formed XML or not XLIFF 1.2/2.0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

/// Document declares no target language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingTargetLanguageIssue {
    pub file_path: String,
    pub source_language: String,
}

impl MissingTargetLanguageIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::MissingTargetLanguage
    }
}

// ============================================================
// Issue Types - Translation Units
// ============================================================

/// Unit id used more than once in the same file; edits hit the first one only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateIdIssue {
    /// The second (or later) unit carrying the id.
    pub context: UnitContext,
    /// Position of the first unit with this id.
    pub first_position: usize,
}

impl DuplicateIdIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::DuplicateId
    }
}

/// Unit holds inline markup that cannot be edited safely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedIssue {
    pub context: UnitContext,
    pub source: String,
}

impl UnsupportedIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::Unsupported
    }
}

/// Unit has fragments still in the initial state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UntranslatedIssue {
    pub context: UnitContext,
    pub source: String,
    /// Fragments in the initial state.
    pub pending: usize,
    pub total: usize,
}

impl UntranslatedIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::Untranslated
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// A problem found in an XLIFF file.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    ParseError(ParseErrorIssue),
    MissingTargetLanguage(MissingTargetLanguageIssue),
    DuplicateId(DuplicateIdIssue),
    Unsupported(UnsupportedIssue),
    Untranslated(UntranslatedIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::ParseError(_) => ParseErrorIssue::severity(),
            Issue::MissingTargetLanguage(_) => MissingTargetLanguageIssue::severity(),
            Issue::DuplicateId(_) => DuplicateIdIssue::severity(),
            Issue::Unsupported(_) => UnsupportedIssue::severity(),
            Issue::Untranslated(_) => UntranslatedIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::ParseError(_) => ParseErrorIssue::rule(),
            Issue::MissingTargetLanguage(_) => MissingTargetLanguageIssue::rule(),
            Issue::DuplicateId(_) => DuplicateIdIssue::rule(),
            Issue::Unsupported(_) => UnsupportedIssue::rule(),
            Issue::Untranslated(_) => UntranslatedIssue::rule(),
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// A unit inside a file.
    Unit(&'a UnitContext),
    /// File-level only.
    File { path: &'a str },
}

impl ReportLocation<'_> {
    pub fn file_path(&self) -> &str {
        match self {
            ReportLocation::Unit(ctx) => &ctx.file_path,
            ReportLocation::File { path } => path,
        }
    }

    /// Unit position, 0 for file-level issues.
    pub fn position(&self) -> usize {
        match self {
            ReportLocation::Unit(ctx) => ctx.position,
            ReportLocation::File { .. } => 0,
        }
    }
}

/// Trait for types that can be reported to CLI.
///
/// Implemented by all issue types; dispatched on [`Issue`] through
/// `enum_dispatch`.
#[enum_dispatch]
pub trait Report {
    /// Get the location for this issue.
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display (unit id, error, etc.).
    fn message(&self) -> String;

    /// Severity level.
    fn report_severity(&self) -> Severity;

    /// Rule identifier.
    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<&str> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for MissingTargetLanguageIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        "no target language".to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        (!self.source_language.is_empty())
            .then(|| format!("source language is {}", self.source_language))
    }

    fn hint(&self) -> Option<&str> {
        Some("set one with `xliffer lang <FILE> <LANG>`")
    }
}

impl Report for DuplicateIdIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Unit(&self.context)
    }

    fn message(&self) -> String {
        self.context.unit_id.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("first used by unit #{}", self.first_position))
    }
}

impl Report for UnsupportedIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Unit(&self.context)
    }

    fn message(&self) -> String {
        self.context.unit_id.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("(\"{}\")", self.source))
    }

    fn hint(&self) -> Option<&str> {
        Some("inline markup other than <x/> cannot be edited; translate it in a CAT tool")
    }
}

impl Report for UntranslatedIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Unit(&self.context)
    }

    fn message(&self) -> String {
        self.context.unit_id.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        if self.total > 1 {
            Some(format!(
                "(\"{}\") {} of {} fragments pending",
                self.source, self.pending, self.total
            ))
        } else {
            Some(format!("(\"{}\")", self.source))
        }
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        let (a, b) = (self.location(), other.location());
        a.file_path()
            .cmp(b.file_path())
            .then_with(|| a.position().cmp(&b.position()))
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================
