use crate::{core::Resolved, issues::Issue, locale::Locale};

#[derive(Debug)]
pub enum CommandSummary {
    Get(GetSummary),
    Keys(KeysSummary),
    Check(CheckSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct GetSummary {
    pub key: String,
    /// Value after argument substitution; `None` when the key is missing.
    pub value: Option<String>,
    pub resolved: Option<Resolved>,
    /// "not found" message when the lookup failed.
    pub error: Option<String>,
    pub show_source: bool,
}

#[derive(Debug)]
pub struct KeysSummary {
    /// Locale the bundles were loaded for.
    pub locale: Locale,
    pub tiers: Vec<String>,
    pub keys: Vec<Resolved>,
}

#[derive(Debug)]
pub struct CheckSummary {
    pub bundle_count: usize,
    pub file_count: usize,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running a restext command.
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// Issues found by `check`; empty for other commands.
    pub issues: Vec<Issue>,
    /// Number of bundle files that failed to parse.
    pub parse_error_count: usize,
}
