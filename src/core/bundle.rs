//! Locale-resolved bundles.
//!
//! A [`Bundle`] is what a lookup sees for one bundle name and one requested
//! locale: the tables found along the locale's candidate chain, most
//! specific first. A key missing from `javac_ja_JP` is looked up in
//! `javac_ja`, then in the root table `javac`.

use std::collections::BTreeSet;

use tracing::debug;

use crate::{
    core::{
        data::{BundleTable, MessageEntry},
        loader::BundleLoader,
    },
    error::ResourceError,
    locale::Locale,
};

#[derive(Debug, Clone)]
pub struct Bundle {
    name: String,
    requested: Locale,
    tables: Vec<BundleTable>,
}

impl Bundle {
    /// Load `name` for `locale` through `loader`.
    ///
    /// When the requested locale only yields the root table (or nothing) and
    /// a different `fallback` locale is given, the fallback's chain is tried
    /// and preferred if it contains a non-root table. Fails with
    /// [`ResourceError::BundleNotFound`] when no table exists at all.
    pub fn load<L: BundleLoader + ?Sized>(
        loader: &L,
        name: &str,
        locale: &Locale,
        fallback: Option<&Locale>,
    ) -> Result<Self, ResourceError> {
        let mut tables = load_chain(loader, name, locale)?;

        let only_root = tables.iter().all(|t| t.locale.is_root());
        if only_root
            && !locale.is_root()
            && let Some(fallback) = fallback.filter(|f| *f != locale)
        {
            let fallback_tables = load_chain(loader, name, fallback)?;
            if fallback_tables.iter().any(|t| !t.locale.is_root()) || tables.is_empty() {
                debug!(bundle = name, requested = %locale, fallback = %fallback, "using fallback locale");
                tables = fallback_tables;
            }
        }

        if tables.is_empty() {
            return Err(ResourceError::BundleNotFound {
                bundle: name.to_string(),
                locale: locale.to_string(),
            });
        }

        debug!(
            bundle = name,
            requested = %locale,
            tables = ?tables.iter().map(|t| t.locale.to_string()).collect::<Vec<_>>(),
            "loaded bundle"
        );

        Ok(Self {
            name: name.to_string(),
            requested: locale.clone(),
            tables,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The locale the bundle was requested for.
    pub fn requested_locale(&self) -> &Locale {
        &self.requested
    }

    /// Locale of the most specific table that was found.
    pub fn effective_locale(&self) -> &Locale {
        self.tables
            .first()
            .map(|t| &t.locale)
            .unwrap_or(&self.requested)
    }

    pub fn tables(&self) -> &[BundleTable] {
        &self.tables
    }

    /// The entry for `key` and the table that supplied it.
    pub fn entry(&self, key: &str) -> Option<(&BundleTable, &MessageEntry)> {
        self.tables
            .iter()
            .find_map(|table| table.get(key).map(|entry| (table, entry)))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entry(key).map(|(_, entry)| entry.value())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.tables.iter().any(|t| t.contains_key(key))
    }

    /// Every key visible through the chain.
    pub fn keys(&self) -> BTreeSet<&str> {
        self.tables
            .iter()
            .flat_map(|t| t.keys().map(String::as_str))
            .collect()
    }
}

fn load_chain<L: BundleLoader + ?Sized>(
    loader: &L,
    name: &str,
    locale: &Locale,
) -> Result<Vec<BundleTable>, ResourceError> {
    let mut tables = Vec::new();
    for candidate in locale.candidates() {
        if let Some(table) = loader.load_table(name, &candidate)? {
            tables.push(table);
        }
    }
    Ok(tables)
}
