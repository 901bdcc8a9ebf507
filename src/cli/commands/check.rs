use std::collections::BTreeSet;

use anyhow::Result;
use clap::ValueEnum;

use super::super::args::CheckCommand;
use super::{CheckSummary, CommandResult, CommandSummary, helper::finish};
use crate::{core::ProjectContext, issues::Rule};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum CheckRule {
    ParseError,
    MissingRoot,
    MalformedPattern,
    OrphanKey,
    PlaceholderMismatch,
}

impl CheckRule {
    pub fn rule(self) -> Rule {
        match self {
            CheckRule::ParseError => Rule::ParseError,
            CheckRule::MissingRoot => Rule::MissingRoot,
            CheckRule::MalformedPattern => Rule::MalformedPattern,
            CheckRule::OrphanKey => Rule::OrphanKey,
            CheckRule::PlaceholderMismatch => Rule::PlaceholderMismatch,
        }
    }
}

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.common.path, &cmd.common.overrides())?;

    let rules: Vec<Rule> = if cmd.checks.is_empty() {
        Rule::all()
    } else {
        cmd.checks.iter().map(|c| c.rule()).collect()
    };

    let issues = ctx.check(&rules)?;
    let scan = ctx.scan()?;
    let bundle_count = scan
        .tables
        .iter()
        .map(|t| t.bundle.as_str())
        .collect::<BTreeSet<_>>()
        .len();

    Ok(finish(
        CommandSummary::Check(CheckSummary {
            bundle_count,
            file_count: scan.tables.len() + scan.warnings.len(),
        }),
        issues,
    ))
}
