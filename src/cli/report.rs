//! Report formatting and printing utilities.
//!
//! This module provides functions to display issues in cargo-style format
//! and the output of the editing commands. Kept apart from the engine so
//! xliffer can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    AlignSummary, CommandResult, CommandSummary, EditSummary, InitSummary, LangSummary,
    ShowSummary,
};
use crate::config::CONFIG_FILE_NAME;
use crate::issues::{Issue, Report, ReportLocation, Severity};
use crate::model::TranslationUnit;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Maximum number of unit ids listed per alignment category.
const MAX_IDS_DISPLAY: usize = 5;

/// Print issues in cargo-style format to stdout.
///
/// Issues are sorted and displayed with severity, location, and details.
///
/// # Example
///
/// ```ignore
/// use xliffer::cli::report::report;
///
/// let issues = xliffer::rules::check_document("messages.xlf", &document);
/// report(&issues);
/// ```
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stdout().lock());
}

/// Print issues to a custom writer.
///
/// Useful for testing or redirecting output.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    for issue in &sorted {
        print_issue(issue, writer);
    }

    print_summary(&sorted, writer);
}

/// Print a success message when no issues are found.
pub fn print_success(files: usize) {
    print_success_to(files, &mut io::stdout().lock());
}

/// Print a success message to a custom writer.
pub fn print_success_to<W: Write>(files: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} XLIFF {} - no issues found",
            files,
            if files == 1 { "file" } else { "files" }
        )
        .green()
    );
}

/// Print a warning about files that could not be parsed.
pub fn print_parse_warning(count: usize, verbose: bool) {
    print_parse_warning_to(count, verbose, &mut io::stderr().lock());
}

/// Print a parse warning to a custom writer.
pub fn print_parse_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be parsed (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W) {
    let loc = issue.location();

    let severity_str = match issue.report_severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    match &loc {
        ReportLocation::Unit(ctx) => {
            let _ = writeln!(
                writer,
                "  {} {} (unit #{})",
                "-->".blue(),
                ctx.file_path,
                ctx.position
            );
        }
        ReportLocation::File { path } => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), path);
        }
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(writer, "   {} {} {}", "=".blue(), "note:".bold(), details);
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(writer, "   {} {} {}", "=".blue(), "hint:".bold().cyan(), hint);
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Warning)
        .count();
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "{} {} problems ({} {}, {} {})",
            FAILURE_MARK.red(),
            total_problems,
            total_errors,
            if total_errors == 1 { "error" } else { "errors" }.red(),
            total_warnings,
            if total_warnings == 1 {
                "warning"
            } else {
                "warnings"
            }
            .yellow()
        );
    }
}

pub fn print(result: &CommandResult, verbose: bool) {
    let mut out = io::stdout().lock();
    let mut err = io::stderr().lock();
    print_command_output(result, &mut out, &mut err);

    if matches!(result.summary, CommandSummary::Check) {
        if result.issues.is_empty() {
            print_success_to(result.files_checked, &mut out);
        }
        print_parse_warning_to(result.parse_error_count, verbose, &mut err);
    }
}

fn print_command_output<W: Write, E: Write>(result: &CommandResult, out: &mut W, err: &mut E) {
    match &result.summary {
        CommandSummary::Check => report_to(&result.issues, out),
        CommandSummary::Show(summary) => print_show(summary, out),
        CommandSummary::Edit(summary) => print_edit(summary, out, err),
        CommandSummary::Lang(summary) => print_lang(summary, out, err),
        CommandSummary::Align(summary) => print_align(summary, out),
        CommandSummary::Init(summary) => print_init(summary, out, err),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ShowJson<'a> {
    version: &'a str,
    source_language: &'a str,
    target_language: &'a str,
    units: &'a [TranslationUnit],
}

fn print_show<W: Write>(summary: &ShowSummary, writer: &mut W) {
    if summary.json {
        let view = ShowJson {
            version: &summary.version,
            source_language: &summary.source_language,
            target_language: &summary.target_language,
            units: &summary.units,
        };
        match serde_json::to_string_pretty(&view) {
            Ok(json) => {
                let _ = writeln!(writer, "{}", json);
            }
            Err(e) => {
                let _ = writeln!(writer, "{} {}", "error:".bold().red(), e);
            }
        }
        return;
    }

    let _ = writeln!(
        writer,
        "{} ({}, {} {} {})",
        summary.file.display().to_string().bold(),
        summary.version,
        language_or_dash(&summary.source_language),
        "->".dimmed(),
        language_or_dash(&summary.target_language)
    );

    let id_width = summary
        .units
        .iter()
        .map(|unit| UnicodeWidthStr::width(unit.id.as_str()))
        .max()
        .unwrap_or(0);

    for unit in &summary.units {
        let state = unit
            .state()
            .map(|state| state.to_string())
            .unwrap_or_default();
        let padding = id_width - UnicodeWidthStr::width(unit.id.as_str());
        let state_str = match state.as_str() {
            "initial" => format!("{:<10}", state).yellow(),
            "final" => format!("{:<10}", state).green(),
            _ => format!("{:<10}", state).normal(),
        };
        let _ = write!(
            writer,
            "  {}{:padding$}  {} {}",
            unit.id.cyan(),
            "",
            state_str,
            unit.source,
            padding = padding
        );
        if unit.target != unit.source {
            let _ = write!(writer, " {} {}", "->".dimmed(), unit.target);
        }
        if unit.unsupported {
            let _ = write!(writer, "  {}", "[markup]".dimmed());
        }
        let _ = writeln!(writer);
    }

    let _ = writeln!(
        writer,
        "{} of {} unit(s)",
        summary.units.len(),
        summary.total_units
    );
}

fn language_or_dash(language: &str) -> &str {
    if language.is_empty() { "-" } else { language }
}

fn print_edit<W: Write, E: Write>(summary: &EditSummary, out: &mut W, err: &mut E) {
    match &summary.written_to {
        Some(path) => {
            let _ = writeln!(
                out,
                "{} {}: {} ({})",
                SUCCESS_MARK.green(),
                summary.unit_id.cyan(),
                summary.message,
                format!("wrote {}", path.display()).dimmed()
            );
        }
        None => {
            let _ = writeln!(err, "{} {}", "error:".bold().red(), summary.message);
        }
    }
}

fn print_lang<W: Write, E: Write>(summary: &LangSummary, out: &mut W, err: &mut E) {
    match &summary.written_to {
        Some(path) => {
            if summary.unusual_format {
                let _ = writeln!(
                    err,
                    "{} '{}' does not look like a locale tag (expected e.g. {} or {})",
                    "warning:".bold().yellow(),
                    summary.target_language,
                    "de".cyan(),
                    "de-CH".cyan()
                );
            }
            let _ = writeln!(
                out,
                "{} {} ({})",
                SUCCESS_MARK.green(),
                format!("Target language set to {}", summary.target_language).green(),
                format!("wrote {}", path.display()).dimmed()
            );
        }
        None => {
            let _ = writeln!(
                out,
                "source: {}",
                language_or_dash(&summary.source_language)
            );
            let _ = writeln!(
                out,
                "target: {}",
                language_or_dash(&summary.target_language)
            );
        }
    }
}

fn print_align<W: Write>(summary: &AlignSummary, writer: &mut W) {
    let report = &summary.report;

    if summary.is_apply {
        let _ = writeln!(
            writer,
            "{} {}",
            "Aligned".green().bold(),
            summary.output.display()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {}",
            "Would align".yellow().bold(),
            summary.output.display()
        );
    }

    let _ = writeln!(
        writer,
        "  - carried: {} unit(s) (state policy: {})",
        report.carried.len(),
        summary.policy
    );
    print_id_list(writer, "reset", &report.reset);
    print_id_list(writer, "added", &report.added);
    print_id_list(writer, "removed", &report.removed);
    let _ = writeln!(
        writer,
        "  - target language: {}",
        language_or_dash(&summary.target_language)
    );

    if !summary.is_apply {
        let _ = writeln!(
            writer,
            "Run with {} to write the merged document.",
            "--apply".cyan()
        );
    }
}

fn print_id_list<W: Write>(writer: &mut W, label: &str, ids: &[String]) {
    if ids.is_empty() {
        let _ = writeln!(writer, "  - {}: 0 unit(s)", label);
        return;
    }

    let shown: Vec<&str> = ids.iter().take(MAX_IDS_DISPLAY).map(String::as_str).collect();
    let remaining = ids.len().saturating_sub(MAX_IDS_DISPLAY);
    let suffix = if remaining > 0 {
        format!(" (and {} more)", remaining)
    } else {
        String::new()
    };
    let _ = writeln!(
        writer,
        "  - {}: {} unit(s): {}{}",
        label,
        ids.len(),
        shown.join(", "),
        suffix
    );
}

fn print_init<W: Write, E: Write>(summary: &InitSummary, out: &mut W, err: &mut E) {
    if summary.created {
        let _ = writeln!(
            out,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
    if let Some(error) = &summary.error {
        let _ = writeln!(err, "{} {}", "error:".bold().red(), error);
    }
}

// ============================================================
// Tests
// ============================================================
