//! Missing root table detection rule.
//!
//! A bundle whose tables are all localized cannot serve any locale outside
//! those tables: the candidate chain ends at root, and root is absent.

use std::path::Path;

use crate::{
    core::loader::table_path,
    issues::MissingRootIssue,
    locale::Locale,
    rules::helpers::{BundleGroups, root_table},
};

pub fn check_missing_root(bundles_root: &Path, groups: &BundleGroups) -> Vec<MissingRootIssue> {
    groups
        .iter()
        .filter(|(_, tables)| root_table(tables).is_none())
        .map(|(bundle, tables)| MissingRootIssue {
            bundle: bundle.to_string(),
            expected_path: table_path(bundles_root, bundle, &Locale::root())
                .to_string_lossy()
                .into_owned(),
            locales: tables.iter().map(|t| t.locale.tag()).collect(),
        })
        .collect()
}
