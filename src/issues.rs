//! Issue types for bundle checks.
//!
//! Each issue is self-contained with everything the reporters (CLI and MCP)
//! need to display it.

use std::collections::BTreeSet;

use enum_dispatch::enum_dispatch;

use crate::core::{PatternError, data::MessageContext};

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
    MissingRoot,
    MalformedPattern,
    OrphanKey,
    PlaceholderMismatch,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::ParseError => write!(f, "parse-error"),
            Rule::MissingRoot => write!(f, "missing-root"),
            Rule::MalformedPattern => write!(f, "malformed-pattern"),
            Rule::OrphanKey => write!(f, "orphan-key"),
            Rule::PlaceholderMismatch => write!(f, "placeholder-mismatch"),
        }
    }
}

fn format_indices(indices: &BTreeSet<usize>) -> String {
    if indices.is_empty() {
        return "none".to_string();
    }
    indices
        .iter()
        .map(|i| format!("{{{}}}", i))
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================
// Issue Types - Bundle Files
// ============================================================

/// Bundle file could not be read or parsed.
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

/// Bundle has locale tables but no root table, so lookups outside those
/// locales fail with "bundle not found".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingRootIssue {
    pub bundle: String,
    /// Where the root table was expected.
    pub expected_path: String,
    /// Locale tags that do have a table.
    pub locales: Vec<String>,
}

impl MissingRootIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::MissingRoot
    }
}

// ============================================================
// Issue Types - Bundle Entries (MessageContext)
// ============================================================

/// Value cannot be parsed as a message pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedPatternIssue {
    pub context: MessageContext,
    pub bundle: String,
    /// Locale tag of the table holding the value ("" for root).
    pub locale: String,
    pub error: PatternError,
}

impl MalformedPatternIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::MalformedPattern
    }
}

/// Key exists in a locale table but not in the bundle's root table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrphanKeyIssue {
    pub context: MessageContext,
    pub bundle: String,
    /// The locale where this orphan key exists.
    pub locale: String,
}

impl OrphanKeyIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::OrphanKey
    }
}

/// Localized value uses different `{n}` arguments than the root value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderMismatchIssue {
    pub context: MessageContext,
    pub bundle: String,
    pub locale: String,
    /// Argument indices used by the root value.
    pub expected: BTreeSet<usize>,
    /// Argument indices used by the localized value.
    pub actual: BTreeSet<usize>,
}

impl PlaceholderMismatchIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::PlaceholderMismatch
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// A problem found while checking bundle files.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    ParseError(ParseErrorIssue),
    MissingRoot(MissingRootIssue),
    MalformedPattern(MalformedPatternIssue),
    OrphanKey(OrphanKeyIssue),
    PlaceholderMismatch(PlaceholderMismatchIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        self.report_severity()
    }

    pub fn rule(&self) -> Rule {
        self.report_rule()
    }
}

// ============================================================
// Report Trait (for CLI and MCP output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Entry in a bundle file (has key/value).
    Message(&'a MessageContext),
    /// File-level only (no line context).
    File { path: &'a str },
}

/// Trait for types that can be reported.
///
/// Implemented by all issue types to give reporters one interface. Uses
/// `enum_dispatch` for static dispatch on the `Issue` enum.
#[enum_dispatch]
pub trait Report {
    /// Get the location for this issue.
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display (key, bundle name, error).
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<String> {
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

impl Report for MissingRootIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.expected_path,
        }
    }

    fn message(&self) -> String {
        self.bundle.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<String> {
        Some(format!(
            "create {} so other locales have a fallback",
            self.expected_path
        ))
    }

    fn details(&self) -> Option<String> {
        Some(format!("only found: {}", self.locales.join(", ")))
    }
}

impl Report for MalformedPatternIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<String> {
        Some("quote literal braces with single quotes, e.g. '{'".to_string())
    }

    fn details(&self) -> Option<String> {
        Some(format!("{} (\"{}\")", self.error, self.context.value))
    }
}

impl Report for OrphanKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "in {} (\"{}\"), missing from root {}",
            self.locale, self.context.value, self.bundle
        ))
    }
}

impl Report for PlaceholderMismatchIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "root uses {}, {} uses {}",
            format_indices(&self.expected),
            self.locale,
            format_indices(&self.actual)
        ))
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Issue {
    fn sort_file_path(&self) -> &str {
        match self.location() {
            ReportLocation::Message(ctx) => &ctx.location.file_path,
            ReportLocation::File { path } => path,
        }
    }

    fn sort_line(&self) -> usize {
        match self.location() {
            ReportLocation::Message(ctx) => ctx.location.line,
            ReportLocation::File { .. } => 0,
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Sort by: file_path, line, rule, message
        self.sort_file_path()
            .cmp(other.sort_file_path())
            .then_with(|| self.sort_line().cmp(&other.sort_line()))
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
