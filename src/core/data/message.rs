use std::{collections::HashMap, fmt};

use crate::locale::Locale;

/// Position information in bundle files (JSON).
///
/// Used for error reporting when a check finds a problem with a value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MessageLocation {
    /// Path to the bundle file (e.g., "./bundles/javac_ja.json").
    /// In-memory tables use a `static:<bundle>[_<locale>]` pseudo path.
    pub file_path: String,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub col: usize,
}

impl MessageLocation {
    pub fn new(file_path: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
        }
    }

    /// Create with default column (1).
    pub fn with_line(file_path: impl Into<String>, line: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col: 1,
        }
    }
}

/// Shape of a bundle value in the JSON source.
///
/// Both shapes resolve to a single string: arrays are joined with `", "`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValueType {
    /// `"key": "value"`
    String,
    /// `"key": ["one", "two"]`
    StringArray,
    /// `"key": 3` or `"key": true`, stored by its JSON text.
    Scalar,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::String => write!(f, "string"),
            ValueType::StringArray => write!(f, "array"),
            ValueType::Scalar => write!(f, "scalar"),
        }
    }
}

/// A key/value pair together with where it was defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContext {
    pub location: MessageLocation,
    /// The lookup key (e.g., "javac.err.file.not.found").
    pub key: String,
    /// The template text.
    pub value: String,
}

impl MessageContext {
    pub fn new(
        location: MessageLocation,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            location,
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn file_path(&self) -> &str {
        &self.location.file_path
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn col(&self) -> usize {
        self.location.col
    }
}

/// A single entry of a bundle table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEntry {
    pub context: MessageContext,
    pub value_type: ValueType,
}

impl MessageEntry {
    pub fn value(&self) -> &str {
        &self.context.value
    }
}

/// The key/value table of one bundle for exactly one locale.
///
/// A resolved [`Bundle`](crate::core::Bundle) chains several of these, from
/// the most specific candidate locale down to root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleTable {
    /// Bundle identifier (e.g., "doclets.common").
    pub bundle: String,
    /// Locale of this table; root for the base table.
    pub locale: Locale,
    /// File path (or pseudo path) the table was loaded from.
    pub file_path: String,
    pub entries: HashMap<String, MessageEntry>,
}

impl BundleTable {
    pub fn new(bundle: impl Into<String>, locale: Locale, file_path: impl Into<String>) -> Self {
        Self {
            bundle: bundle.into(),
            locale,
            file_path: file_path.into(),
            entries: HashMap::new(),
        }
    }

    /// Build an in-memory table from key/value pairs. Lines follow pair order.
    pub fn from_pairs(bundle: &str, locale: Locale, pairs: &[(&str, &str)]) -> Self {
        let file_path = if locale.is_root() {
            format!("static:{}", bundle)
        } else {
            format!("static:{}_{}", bundle, locale.tag())
        };
        let mut table = Self::new(bundle, locale, file_path);
        for (index, (key, value)) in pairs.iter().enumerate() {
            table.insert(*key, *value, ValueType::String, index + 1);
        }
        table
    }

    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
        value_type: ValueType,
        line: usize,
    ) {
        let key = key.into();
        let context = MessageContext::new(
            MessageLocation::with_line(self.file_path.clone(), line),
            key.clone(),
            value,
        );
        self.entries.insert(key, MessageEntry { context, value_type });
    }

    pub fn get(&self, key: &str) -> Option<&MessageEntry> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
