//! Report formatting and printing utilities.
//!
//! Issues are displayed in cargo-style format. Kept out of the library core
//! so restext can be embedded without pulling in terminal output.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    CheckSummary, CommandResult, CommandSummary, GetSummary, InitSummary, KeysSummary,
};
use crate::config::CONFIG_FILE_NAME;
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to stdout.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stdout().lock());
}

/// Print issues to a custom writer.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    let max_line_width = calculate_max_line_width(&sorted);
    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

/// Print a success message when no issues are found.
pub fn print_success_to<W: Write>(summary: &CheckSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} bundle {} in {} {} - no issues found",
            summary.file_count,
            if summary.file_count == 1 { "file" } else { "files" },
            summary.bundle_count,
            if summary.bundle_count == 1 { "bundle" } else { "bundles" }
        )
        .green()
    );
}

/// Print a parse warning to a custom writer.
pub fn print_parse_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} bundle file(s) could not be parsed (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let loc = issue.location();
    let (file_path, line, col) = extract_location_info(&loc);

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

    // Clickable location: --> path:line:col
    if line > 0 {
        let _ = writeln!(writer, "  {} {}:{}:{}", "-->".blue(), file_path, line, col);
    } else {
        let _ = writeln!(writer, "  {} {}", "-->".blue(), file_path);
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer);
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;

    let _ = writeln!(
        writer,
        "{} {} problems ({} {}, {} {})",
        FAILURE_MARK.red(),
        issues.len(),
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

fn extract_location_info<'a>(loc: &'a ReportLocation<'a>) -> (&'a str, usize, usize) {
    match loc {
        ReportLocation::Message(ctx) => (ctx.file_path(), ctx.line(), ctx.col()),
        ReportLocation::File { path } => (path, 0, 0),
    }
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Message(ctx) => Some(ctx.line()),
            ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

// ============================================================
// Command output
// ============================================================

pub fn print(result: &CommandResult, verbose: bool) {
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    print_to(result, verbose, &mut stdout, &mut stderr);
}

/// Print command output; results go to `out`, failures to `err`.
pub fn print_to<O: Write, E: Write>(result: &CommandResult, verbose: bool, out: &mut O, err: &mut E) {
    match &result.summary {
        CommandSummary::Get(summary) => print_get(summary, out, err),
        CommandSummary::Keys(summary) => print_keys(summary, out),
        CommandSummary::Check(summary) => {
            if result.issues.is_empty() {
                print_success_to(summary, out);
            } else {
                report_to(&result.issues, out);
            }
            print_parse_warning_to(result.parse_error_count, verbose, err);
        }
        CommandSummary::Init(summary) => print_init(summary, out, err),
    }
}

fn print_get<O: Write, E: Write>(summary: &GetSummary, out: &mut O, err: &mut E) {
    match (&summary.value, &summary.error) {
        (Some(value), _) => {
            let _ = writeln!(out, "{}", value);
            if summary.show_source
                && let Some(resolved) = &summary.resolved
            {
                let _ = writeln!(
                    err,
                    "  {} {}",
                    "=".blue(),
                    format!("from {} ({})", resolved.bundle, resolved.locale).dimmed()
                );
            }
        }
        (None, Some(message)) => {
            let _ = writeln!(err, "{} {}", "error:".bold().red(), message);
        }
        (None, None) => {}
    }
}

fn print_keys<O: Write>(summary: &KeysSummary, out: &mut O) {
    let key_width = summary
        .keys
        .iter()
        .map(|k| UnicodeWidthStr::width(k.key.as_str()))
        .max()
        .unwrap_or(0);

    for resolved in &summary.keys {
        let padding = key_width - UnicodeWidthStr::width(resolved.key.as_str());
        let source = if resolved.locale.is_root() {
            resolved.bundle.clone()
        } else {
            format!("{} {}", resolved.bundle, resolved.locale)
        };
        let _ = writeln!(
            out,
            "{}{:padding$}  {}  {}",
            resolved.key.bold(),
            "",
            resolved.value,
            format!("[{}]", source).dimmed(),
            padding = padding
        );
    }

    let _ = writeln!(
        out,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "{} {} from {} (locale {})",
            summary.keys.len(),
            if summary.keys.len() == 1 { "key" } else { "keys" },
            summary.tiers.join(", "),
            summary.locale
        )
        .green()
    );
}

fn print_init<O: Write, E: Write>(summary: &InitSummary, out: &mut O, err: &mut E) {
    if summary.created {
        let _ = writeln!(
            out,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else {
        let _ = writeln!(
            err,
            "{} {} already exists",
            "error:".bold().red(),
            CONFIG_FILE_NAME
        );
    }
}

// ============================================================
// Tests
// ============================================================
