//! Placeholder mismatch detection rule.
//!
//! Compares the `{n}` arguments of each localized value with the root value
//! of the same key. A translation that drops `{1}` silently loses data at
//! format time; one that adds `{2}` prints a literal `{2}`.

use crate::{
    core::{MessagePattern, data::BundleTable},
    issues::PlaceholderMismatchIssue,
    rules::helpers::{BundleGroups, context_order, root_table},
};

pub fn check_placeholder_mismatch_issues(groups: &BundleGroups) -> Vec<PlaceholderMismatchIssue> {
    let mut issues: Vec<PlaceholderMismatchIssue> = groups
        .values()
        .filter_map(|tables| root_table(tables).map(|root| (tables, root)))
        .flat_map(|(tables, root)| {
            tables
                .iter()
                .filter(|t| !t.locale.is_root())
                .flat_map(move |table| check_placeholder_mismatch(root, table))
        })
        .collect();

    issues.sort_by(|a, b| context_order(&a.context, &b.context));
    issues
}

/// Entries of `table` whose arguments differ from `root`'s.
///
/// Values that fail to parse are left to the malformed-pattern rule.
pub fn check_placeholder_mismatch(
    root: &BundleTable,
    table: &BundleTable,
) -> Vec<PlaceholderMismatchIssue> {
    table
        .entries
        .iter()
        .filter_map(|(key, entry)| {
            let root_entry = root.get(key)?;
            let expected = MessagePattern::parse(root_entry.value()).ok()?.argument_indices();
            let actual = MessagePattern::parse(entry.value()).ok()?.argument_indices();
            (expected != actual).then(|| PlaceholderMismatchIssue {
                context: entry.context.clone(),
                bundle: table.bundle.clone(),
                locale: table.locale.tag(),
                expected,
                actual,
            })
        })
        .collect()
}
