//! Bundle check rules.
//!
//! Each rule is a pure function over the scanned tables, grouped by bundle,
//! returning its own issue type sorted for deterministic output.
//!
//! ## Module Structure
//!
//! - `helpers`: grouping tables by bundle, shared ordering
//! - `missing_root`: bundles without a root table
//! - `orphan`: localized keys absent from root
//! - `malformed`: values that are not valid message patterns
//! - `placeholder`: localized values whose `{n}` arguments differ from root

pub mod helpers;
pub mod malformed;
pub mod missing_root;
pub mod orphan;
pub mod placeholder;

use std::path::Path;

use crate::{
    core::parsers::json::ScanBundlesResult,
    issues::{Issue, ParseErrorIssue, Rule},
};

pub use helpers::group_by_bundle;

impl Rule {
    pub fn all() -> Vec<Rule> {
        vec![
            Rule::ParseError,
            Rule::MissingRoot,
            Rule::MalformedPattern,
            Rule::OrphanKey,
            Rule::PlaceholderMismatch,
        ]
    }
}

/// Run `rules` over a bundle scan. Issues come back sorted.
pub fn run_rules(bundles_root: &Path, scan: &ScanBundlesResult, rules: &[Rule]) -> Vec<Issue> {
    let groups = group_by_bundle(&scan.tables);
    let mut issues: Vec<Issue> = Vec::new();

    for rule in rules {
        match rule {
            Rule::ParseError => {
                issues.extend(scan.warnings.iter().map(|w| {
                    Issue::ParseError(ParseErrorIssue {
                        file_path: w.file_path.clone(),
                        error: w.error.clone(),
                    })
                }));
            }
            Rule::MissingRoot => {
                let found = missing_root::check_missing_root(bundles_root, &groups);
                issues.extend(found.into_iter().map(Issue::MissingRoot));
            }
            Rule::MalformedPattern => {
                let found = malformed::check_malformed_patterns_issues(&groups);
                issues.extend(found.into_iter().map(Issue::MalformedPattern));
            }
            Rule::OrphanKey => {
                let found = orphan::check_orphan_keys_issues(&groups);
                issues.extend(found.into_iter().map(Issue::OrphanKey));
            }
            Rule::PlaceholderMismatch => {
                let found = placeholder::check_placeholder_mismatch_issues(&groups);
                issues.extend(found.into_iter().map(Issue::PlaceholderMismatch));
            }
        }
    }

    issues.sort();
    issues
}
