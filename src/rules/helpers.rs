//! Shared helpers for rule implementations.

use std::collections::BTreeMap;

use crate::core::data::{BundleTable, MessageContext};

/// Tables grouped by bundle name; each group keeps scan order (root first).
pub type BundleGroups<'a> = BTreeMap<&'a str, Vec<&'a BundleTable>>;

pub fn group_by_bundle(tables: &[BundleTable]) -> BundleGroups<'_> {
    let mut groups: BundleGroups = BTreeMap::new();
    for table in tables {
        groups.entry(table.bundle.as_str()).or_default().push(table);
    }
    groups
}

/// The root table of a group, if present.
pub fn root_table<'a>(tables: &[&'a BundleTable]) -> Option<&'a BundleTable> {
    tables.iter().copied().find(|t| t.locale.is_root())
}

/// Sort key for issues anchored to a bundle entry.
pub fn context_order(a: &MessageContext, b: &MessageContext) -> std::cmp::Ordering {
    a.location
        .file_path
        .cmp(&b.location.file_path)
        .then_with(|| a.location.line.cmp(&b.location.line))
        .then_with(|| a.key.cmp(&b.key))
}
