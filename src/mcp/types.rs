use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    config::ConfigOverrides,
    core::Resolved,
    issues::{Issue, Report, ReportLocation},
};

// ============================================================
// Tool Parameters
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetConfigParams {
    /// Absolute path of the project (directory holding .restextrc.json or below it)
    pub project_root_path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolveMessageParams {
    pub project_root_path: String,
    /// Key to look up, e.g. "javac.err.file.not.found"
    pub key: String,
    /// Values substituted for {0}, {1}, ...; the raw template is returned when omitted
    #[serde(default)]
    pub args: Option<Vec<String>>,
    /// Locale such as "ja_JP"; defaults to the configured locale
    #[serde(default)]
    pub locale: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListKeysParams {
    pub project_root_path: String,
    #[serde(default)]
    pub locale: Option<String>,
    /// Only keys starting with this prefix
    #[serde(default)]
    pub prefix: Option<String>,
    /// Page size (default 50, max 200)
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckBundlesParams {
    pub project_root_path: String,
    /// Page size (default 20, max 100)
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
}

/// Config overrides carried by a tool call.
pub fn locale_overrides(locale: Option<&str>) -> ConfigOverrides {
    ConfigOverrides {
        locale: locale.map(str::to_string),
        ..Default::default()
    }
}

// ============================================================
// Config Types (get_config)
// ============================================================

/// Configuration DTO for MCP
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDto {
    /// True if config was loaded from a file, false if using defaults
    pub from_file: bool,
    /// Directory relative paths are resolved against
    pub project_root: String,
    /// Locale lookups use when none is given
    pub effective_locale: String,
    pub config: ConfigValues,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigValues {
    pub bundles_root: String,
    pub common_bundle: String,
    pub specific_bundle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_locale: Option<String>,
    pub ignores: Vec<String>,
}

impl From<crate::config::Config> for ConfigValues {
    fn from(c: crate::config::Config) -> Self {
        Self {
            bundles_root: c.bundles_root,
            common_bundle: c.common_bundle,
            specific_bundle: c.specific_bundle,
            locale: c.locale,
            fallback_locale: c.fallback_locale,
            ignores: c.ignores,
        }
    }
}

// ============================================================
// Resolve Types (resolve_message)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResult {
    pub key: String,
    pub found: bool,
    /// Formatted text (or the template when no args were given)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Raw template as stored in the bundle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// Bundle that supplied the value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle: Option<String>,
    /// Locale of the table that supplied the value ("root" for the base table)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Not-found message when found is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================
// Keys Types (list_keys)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KeysResult {
    pub locale: String,
    /// Bundles in lookup order
    pub tiers: Vec<String>,
    pub total_count: usize,
    pub items: Vec<KeyItem>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KeyItem {
    pub key: String,
    pub value: String,
    pub bundle: String,
    pub locale: String,
}

impl From<Resolved> for KeyItem {
    fn from(r: Resolved) -> Self {
        Self {
            key: r.key,
            value: r.value,
            bundle: r.bundle,
            locale: r.locale.to_string(),
        }
    }
}

// ============================================================
// Check Types (check_bundles)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub error_count: usize,
    pub warning_count: usize,
    pub total_count: usize,
    pub items: Vec<IssueItem>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssueItem {
    pub rule: String,
    pub severity: String,
    /// Key, bundle name or parse error, depending on the rule
    pub message: String,
    pub file_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl From<&Issue> for IssueItem {
    fn from(issue: &Issue) -> Self {
        let (file_path, line) = match issue.location() {
            ReportLocation::Message(ctx) => (ctx.file_path().to_string(), Some(ctx.line())),
            ReportLocation::File { path } => (path.to_string(), None),
        };
        Self {
            rule: issue.report_rule().to_string(),
            severity: issue.report_severity().to_string(),
            message: issue.message(),
            file_path,
            line,
            details: issue.details(),
            hint: issue.hint(),
        }
    }
}

// ============================================================
// Common Types
// ============================================================

/// Pagination information
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
    pub has_more: bool,
}

/// Take one page of `items`.
pub fn paginate<T>(items: Vec<T>, offset: usize, limit: usize) -> (Vec<T>, Pagination) {
    let total = items.len();
    let page: Vec<T> = items.into_iter().skip(offset).take(limit).collect();
    let has_more = offset + page.len() < total;
    (
        page,
        Pagination {
            offset,
            limit,
            has_more,
        },
    )
}
