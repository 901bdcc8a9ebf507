//! Orphan key detection rule.
//!
//! Detects keys that exist in a localized table but not in the bundle's root
//! table. Such keys usually belong to messages that were removed from root
//! but not from the translations.

use crate::{
    core::data::BundleTable,
    issues::OrphanKeyIssue,
    rules::helpers::{BundleGroups, context_order, root_table},
};

pub fn check_orphan_keys_issues(groups: &BundleGroups) -> Vec<OrphanKeyIssue> {
    let mut issues: Vec<OrphanKeyIssue> = groups
        .iter()
        .filter_map(|(bundle, tables)| root_table(tables).map(|root| (bundle, tables, root)))
        .flat_map(|(bundle, tables, root)| {
            tables
                .iter()
                .filter(|t| !t.locale.is_root())
                .flat_map(move |table| check_orphan_keys(bundle, root, table))
        })
        .collect();

    // Sort by file path, then line for deterministic output
    issues.sort_by(|a, b| context_order(&a.context, &b.context));
    issues
}

/// Keys of `table` that `root` does not define.
pub fn check_orphan_keys(bundle: &str, root: &BundleTable, table: &BundleTable) -> Vec<OrphanKeyIssue> {
    table
        .entries
        .iter()
        .filter(|(key, _)| !root.contains_key(key))
        .map(|(_, entry)| OrphanKeyIssue {
            context: entry.context.clone(),
            bundle: bundle.to_string(),
            locale: table.locale.tag(),
        })
        .collect()
}
