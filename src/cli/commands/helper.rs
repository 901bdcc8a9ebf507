use super::{CommandResult, CommandSummary};
use crate::issues::{Issue, Severity};

pub fn finish(summary: CommandSummary, mut issues: Vec<Issue>) -> CommandResult {
    issues.sort();

    let parse_error_count = issues
        .iter()
        .filter(|i| matches!(i, Issue::ParseError(_)))
        .count();

    let mut error_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    let warning_count = issues.len() - error_count;

    match &summary {
        CommandSummary::Get(get) if get.error.is_some() => error_count += 1,
        CommandSummary::Init(init) if !init.created => error_count += 1,
        _ => {}
    }

    CommandResult {
        summary,
        error_count,
        warning_count,
        issues,
        parse_error_count,
    }
}
