//! Bundle table loaders.
//!
//! A loader answers one question: is there a table for bundle `name` in
//! exactly locale `locale`, and what does it contain? Walking the candidate
//! chain (`en_US -> en -> root`) is done by [`Bundle::load`](crate::core::Bundle::load),
//! not by loaders.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    core::{data::BundleTable, parsers::json::parse_json_file},
    error::ResourceError,
    locale::Locale,
};

/// Source of per-locale bundle tables.
pub trait BundleLoader {
    /// Load the table for `bundle` in exactly `locale`.
    ///
    /// Returns `Ok(None)` when no such table exists. Errors are reserved for
    /// tables that exist but cannot be read.
    fn load_table(&self, bundle: &str, locale: &Locale)
    -> Result<Option<BundleTable>, ResourceError>;
}

impl<T: BundleLoader + ?Sized> BundleLoader for &T {
    fn load_table(
        &self,
        bundle: &str,
        locale: &Locale,
    ) -> Result<Option<BundleTable>, ResourceError> {
        (**self).load_table(bundle, locale)
    }
}

impl<T: BundleLoader + ?Sized> BundleLoader for Arc<T> {
    fn load_table(
        &self,
        bundle: &str,
        locale: &Locale,
    ) -> Result<Option<BundleTable>, ResourceError> {
        (**self).load_table(bundle, locale)
    }
}

impl<T: BundleLoader + ?Sized> BundleLoader for Box<T> {
    fn load_table(
        &self,
        bundle: &str,
        locale: &Locale,
    ) -> Result<Option<BundleTable>, ResourceError> {
        (**self).load_table(bundle, locale)
    }
}

// ============================================================
// JSON files on disk
// ============================================================

/// Loads tables from JSON files below a bundles root.
///
/// Bundle `a.b.name` in locale `ja_JP` is read from `<root>/a/b/name_ja_JP.json`;
/// its root table from `<root>/a/b/name.json`.
#[derive(Debug, Clone)]
pub struct JsonBundleLoader {
    root: PathBuf,
}

impl JsonBundleLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn table_path(&self, bundle: &str, locale: &Locale) -> PathBuf {
        table_path(&self.root, bundle, locale)
    }
}

impl BundleLoader for JsonBundleLoader {
    fn load_table(
        &self,
        bundle: &str,
        locale: &Locale,
    ) -> Result<Option<BundleTable>, ResourceError> {
        let path = self.table_path(bundle, locale);
        if !path.is_file() {
            return Ok(None);
        }
        parse_json_file(&path, bundle, locale.clone()).map(Some)
    }
}

/// Path of the JSON file holding `bundle` for `locale` below `root`.
pub fn table_path(root: &Path, bundle: &str, locale: &Locale) -> PathBuf {
    let mut segments: Vec<&str> = bundle.split('.').collect();
    let base = segments.pop().unwrap_or_default();

    let mut path = root.to_path_buf();
    for segment in segments {
        path.push(segment);
    }

    let tag = locale.tag();
    let file_name = if tag.is_empty() {
        format!("{}.json", base)
    } else {
        format!("{}_{}.json", base, tag)
    };
    path.push(file_name);
    path
}

/// Inverse of [`table_path`]: the bundle name and locale a file below `root` holds.
///
/// The locale suffix is the shortest trailing `_`-separated part whose first
/// segment is a 2-3 letter language code. Returns `None` for non-JSON files
/// and paths outside `root`.
pub fn bundle_for_path(root: &Path, path: &Path) -> Option<(String, Locale)> {
    if path.extension().and_then(|e| e.to_str()) != Some("json") {
        return None;
    }
    let relative = path.strip_prefix(root).ok()?;
    let stem = relative.file_stem()?.to_str()?;

    let mut prefix: Vec<String> = Vec::new();
    if let Some(parent) = relative.parent() {
        for component in parent.components() {
            prefix.push(component.as_os_str().to_str()?.to_string());
        }
    }

    let (base, locale) = split_locale_suffix(stem);
    prefix.push(base.to_string());
    Some((prefix.join("."), locale))
}

fn split_locale_suffix(stem: &str) -> (&str, Locale) {
    for (index, _) in stem.match_indices('_') {
        let suffix = &stem[index + 1..];
        let language = suffix.split('_').next().unwrap_or_default();
        let looks_like_language =
            (2..=3).contains(&language.len()) && language.chars().all(|c| c.is_ascii_lowercase());
        if index > 0
            && looks_like_language
            && let Ok(locale) = suffix.parse::<Locale>()
        {
            return (&stem[..index], locale);
        }
    }
    (stem, Locale::root())
}

// ============================================================
// In-memory tables
// ============================================================

/// Loader over tables registered in memory, keyed by bundle and locale tag.
#[derive(Debug, Clone, Default)]
pub struct StaticBundleLoader {
    tables: HashMap<(String, String), BundleTable>,
}

impl StaticBundleLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table built from key/value pairs.
    pub fn with_table(mut self, bundle: &str, locale: Locale, pairs: &[(&str, &str)]) -> Self {
        self.insert(BundleTable::from_pairs(bundle, locale, pairs));
        self
    }

    pub fn insert(&mut self, table: BundleTable) {
        self.tables
            .insert((table.bundle.clone(), table.locale.tag()), table);
    }
}

impl BundleLoader for StaticBundleLoader {
    fn load_table(
        &self,
        bundle: &str,
        locale: &Locale,
    ) -> Result<Option<BundleTable>, ResourceError> {
        Ok(self
            .tables
            .get(&(bundle.to_string(), locale.tag()))
            .cloned())
    }
}
