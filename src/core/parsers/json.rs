use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Result, bail};
use glob::Pattern;
use rayon::prelude::*;
use serde::de::Error as _;
use serde_json::Value;
use walkdir::WalkDir;

use crate::{
    core::{
        data::{BundleTable, ValueType},
        loader::bundle_for_path,
    },
    error::ResourceError,
    locale::Locale,
};

/// A bundle file that could not be loaded during a scan.
#[derive(Debug, Clone)]
pub struct BundleScanWarning {
    pub file_path: String,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct ScanBundlesResult {
    /// Tables sorted by bundle name, then locale tag.
    pub tables: Vec<BundleTable>,
    pub warnings: Vec<BundleScanWarning>,
}

pub fn parse_json_file(
    path: &Path,
    bundle: &str,
    locale: Locale,
) -> Result<BundleTable, ResourceError> {
    let content = fs::read_to_string(path).map_err(|source| ResourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_json_str(&content, &path.to_string_lossy(), bundle, locale).map_err(|source| {
        ResourceError::Parse {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Parse bundle JSON text into a table. The top level must be an object.
///
/// Nested objects and dotted keys share one key space, so `{"a": {"b": ..}}`
/// and `{"a.b": ..}` in the same file are rejected as a duplicate key.
pub fn parse_json_str(
    content: &str,
    file_path: &str,
    bundle: &str,
    locale: Locale,
) -> Result<BundleTable, serde_json::Error> {
    let json: Value = serde_json::from_str(content)?;
    if !json.is_object() {
        return Err(serde_json::Error::custom(
            "bundle file must contain a JSON object at the top level",
        ));
    }

    // Pre-compute line index for O(log n) line lookups
    let line_index = build_line_index(content);
    let mut table = BundleTable::new(bundle, locale, file_path);
    let mut walker = Flattener {
        content,
        line_index: &line_index,
        table: &mut table,
        duplicate: None,
    };
    walker.flatten(&json, String::new(), &mut Vec::new());
    if let Some(duplicate) = walker.duplicate {
        return Err(serde_json::Error::custom(duplicate));
    }
    Ok(table)
}

/// Build an index of line start byte offsets for O(log n) line lookups.
///
/// The returned vector contains byte offsets where each line starts.
/// Line 1 starts at offset 0, line 2 starts after the first '\n', etc.
fn build_line_index(content: &str) -> Vec<usize> {
    let mut offsets = vec![0]; // Line 1 starts at offset 0
    for (i, c) in content.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// Find line number for a byte offset using binary search.
///
/// Returns 1-based line number.
fn offset_to_line(line_index: &[usize], offset: usize) -> usize {
    match line_index.binary_search(&offset) {
        Ok(line) => line + 1, // Exact match at line start
        Err(line) => line,    // Falls within this line
    }
}

/// Find the line where the object key path `segments` appears in the JSON content.
///
/// Searches for each object key in sequence, so `Common` then `submit` finds
/// the `"submit"` that comes after `"Common"`, and a flat key such as
/// `"javac.opt.X"` is matched as one segment. Only matches followed by `:`
/// count, which skips string values containing the same text.
fn find_key_line(content: &str, segments: &[String], line_index: &[usize]) -> usize {
    let mut search_start = 0;
    for segment in segments {
        let pattern = format!("\"{}\"", segment);
        let remaining = &content[search_start..];

        // Find all occurrences and pick the one that's a key (followed by :)
        let mut pos = 0;
        let mut found = false;
        while let Some(rel_pos) = remaining[pos..].find(&pattern) {
            let abs_pos = pos + rel_pos;
            let after_pattern = abs_pos + pattern.len();

            if after_pattern < remaining.len() {
                let is_key = remaining[after_pattern..].trim_start().starts_with(':');
                if is_key {
                    search_start += after_pattern;
                    found = true;
                    break;
                }
            }
            pos = abs_pos + 1;
        }

        if !found {
            break;
        }
    }

    if search_start > 0 {
        offset_to_line(line_index, search_start)
    } else {
        1
    }
}

struct Flattener<'a> {
    content: &'a str,
    line_index: &'a [usize],
    table: &'a mut BundleTable,
    /// First key that flattened onto an existing entry.
    duplicate: Option<String>,
}

impl Flattener<'_> {
    /// `segments` holds the object keys on the path (array indices are not keys).
    fn flatten(&mut self, value: &Value, prefix: String, segments: &mut Vec<String>) {
        match value {
            Value::Object(map) => {
                for (key, val) in map {
                    let new_prefix = join_key(&prefix, key);
                    segments.push(key.clone());
                    self.flatten(val, new_prefix, segments);
                    segments.pop();
                }
            }
            Value::String(s) => {
                self.insert(prefix, s.clone(), ValueType::String, segments);
            }
            Value::Number(_) | Value::Bool(_) => {
                self.insert(prefix, value.to_string(), ValueType::Scalar, segments);
            }
            Value::Array(arr) => {
                if arr.is_empty() {
                    return;
                }

                // A string-only array is one value; anything else expands by index
                let is_string_array = arr.iter().all(|v| matches!(v, Value::String(_)));
                if is_string_array && !prefix.is_empty() {
                    let values: Vec<&str> = arr.iter().filter_map(|v| v.as_str()).collect();
                    self.insert(prefix, values.join(", "), ValueType::StringArray, segments);
                } else {
                    for (index, val) in arr.iter().enumerate() {
                        self.flatten(val, join_key(&prefix, &index.to_string()), segments);
                    }
                }
            }
            Value::Null => {}
        }
    }

    fn insert(&mut self, key: String, value: String, value_type: ValueType, segments: &[String]) {
        let line = find_key_line(self.content, segments, self.line_index);
        if let Some(existing) = self.table.get(&key) {
            if self.duplicate.is_none() {
                self.duplicate = Some(format!(
                    "duplicate key \"{}\" (lines {} and {})",
                    key,
                    existing.context.line(),
                    line
                ));
            }
            return;
        }
        self.table.insert(key, value, value_type, line);
    }
}

fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

/// Load every bundle file below `bundles_root`, in parallel.
///
/// Files whose path relative to the root matches one of `ignores` are
/// skipped. Files that fail to load become warnings rather than errors so
/// one broken file does not hide problems in the rest.
pub fn scan_bundle_files(bundles_root: &Path, ignores: &[String]) -> Result<ScanBundlesResult> {
    if !bundles_root.exists() {
        bail!(
            "Bundles directory '{}' does not exist.\n\
             Hint: Check your .restextrc.json 'bundlesRoot' setting.",
            bundles_root.display()
        );
    }

    if !bundles_root.is_dir() {
        bail!("'{}' is not a directory.", bundles_root.display());
    }

    let patterns: Vec<Pattern> = ignores
        .iter()
        .filter_map(|pattern| Pattern::new(pattern).ok())
        .collect();

    let files: Vec<(PathBuf, String, Locale)> = WalkDir::new(bundles_root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable path");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            let relative = entry
                .path()
                .strip_prefix(bundles_root)
                .unwrap_or(entry.path());
            !patterns.iter().any(|p| p.matches_path(relative))
        })
        .filter_map(|entry| {
            let (bundle, locale) = bundle_for_path(bundles_root, entry.path())?;
            Some((entry.into_path(), bundle, locale))
        })
        .collect();

    let loaded: Vec<Result<BundleTable, BundleScanWarning>> = files
        .par_iter()
        .map(|(path, bundle, locale)| {
            parse_json_file(path, bundle, locale.clone()).map_err(|e| BundleScanWarning {
                file_path: path.to_string_lossy().to_string(),
                error: error_chain(&e),
            })
        })
        .collect();

    let mut result = ScanBundlesResult::default();
    for item in loaded {
        match item {
            Ok(table) => result.tables.push(table),
            Err(warning) => {
                tracing::warn!(file = %warning.file_path, error = %warning.error, "failed to load bundle file");
                result.warnings.push(warning);
            }
        }
    }
    result
        .tables
        .sort_by(|a, b| a.bundle.cmp(&b.bundle).then_with(|| a.locale.cmp(&b.locale)));

    Ok(result)
}

fn error_chain(err: &ResourceError) -> String {
    match std::error::Error::source(err) {
        Some(source) => format!("{}: {}", err, source),
        None => err.to_string(),
    }
}
