//! Malformed message pattern detection rule.
//!
//! Lookups never fail on a broken pattern: the formatter copies unreadable
//! elements through as text. This rule surfaces them before users see a raw
//! `{0` in a message.

use crate::{
    core::{
        MessagePattern,
        data::{BundleTable, ValueType},
    },
    issues::MalformedPatternIssue,
    rules::helpers::{BundleGroups, context_order},
};

pub fn check_malformed_patterns_issues(groups: &BundleGroups) -> Vec<MalformedPatternIssue> {
    let mut issues: Vec<MalformedPatternIssue> = groups
        .values()
        .flatten()
        .flat_map(|table| check_malformed_patterns(table))
        .collect();

    issues.sort_by(|a, b| context_order(&a.context, &b.context));
    issues
}

pub fn check_malformed_patterns(table: &BundleTable) -> Vec<MalformedPatternIssue> {
    table
        .entries
        .values()
        .filter(|entry| entry.value_type != ValueType::Scalar)
        .filter_map(|entry| {
            MessagePattern::parse(entry.value())
                .err()
                .map(|error| MalformedPatternIssue {
                    context: entry.context.clone(),
                    bundle: table.bundle.clone(),
                    locale: table.locale.tag(),
                    error,
                })
        })
        .collect()
}
