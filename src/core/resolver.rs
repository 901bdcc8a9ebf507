//! Tiered resource resolution.
//!
//! [`TieredResolver`] answers lookups from an ordered list of bundles
//! ("tiers"). The usual setup has two: a specific bundle checked first and a
//! common bundle shared by every consumer. The first tier containing a key
//! wins.
//!
//! Bundles are loaded on the first lookup, not at construction, because the
//! locale is read from a [`LocaleSource`] that may not be settled yet when
//! the resolver is built. The transition from `Uninitialized` to
//! `Initialized` happens at most once and runs under a mutex, so concurrent
//! first lookups still load each bundle a single time. A failed load leaves
//! the resolver uninitialized and the error goes to the caller.

use std::{
    collections::BTreeMap,
    fmt::Display,
    sync::{Arc, Mutex, PoisonError},
};

use tracing::{debug, trace};

use crate::{
    core::{bundle::Bundle, format::format_message, loader::BundleLoader},
    error::ResourceError,
    locale::{Locale, LocaleSource},
};

/// A resolved value and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub key: String,
    pub value: String,
    /// Name of the tier (bundle) that supplied the value.
    pub bundle: String,
    /// Locale of the table that supplied the value.
    pub locale: Locale,
}

impl Resolved {
    /// The value with `args` substituted into its `{n}` placeholders.
    pub fn format(&self, args: &[&dyn Display]) -> String {
        format_message(&self.value, args)
    }
}

enum BundleState {
    Uninitialized,
    Initialized(Arc<LoadedTiers>),
}

struct LoadedTiers {
    locale: Locale,
    /// Same order as `TieredResolver::tiers`.
    bundles: Vec<Bundle>,
}

pub struct TieredResolver<S, L> {
    source: S,
    loader: L,
    tiers: Vec<String>,
    fallback_locale: Option<Locale>,
    state: Mutex<BundleState>,
}

impl<S: LocaleSource, L: BundleLoader> TieredResolver<S, L> {
    /// Resolver over a specific bundle backed by a common bundle.
    ///
    /// Performs no I/O.
    pub fn new(
        source: S,
        loader: L,
        common_bundle: impl Into<String>,
        specific_bundle: impl Into<String>,
    ) -> Self {
        Self {
            source,
            loader,
            tiers: vec![specific_bundle.into(), common_bundle.into()],
            fallback_locale: None,
            state: Mutex::new(BundleState::Uninitialized),
        }
    }

    /// Resolver over any number of bundles, highest priority first.
    pub fn layered<I, T>(source: S, loader: L, tiers: I) -> Result<Self, ResourceError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let tiers: Vec<String> = tiers.into_iter().map(Into::into).collect();
        if tiers.is_empty() {
            return Err(ResourceError::NoTiers);
        }
        Ok(Self {
            source,
            loader,
            tiers,
            fallback_locale: None,
            state: Mutex::new(BundleState::Uninitialized),
        })
    }

    /// Locale to try when the requested one only has root tables.
    pub fn with_fallback_locale(mut self, locale: Locale) -> Self {
        self.fallback_locale = Some(locale);
        self
    }

    /// Tier names, highest priority first.
    pub fn tiers(&self) -> &[String] {
        &self.tiers
    }

    pub fn is_initialized(&self) -> bool {
        matches!(*self.lock_state(), BundleState::Initialized(_))
    }

    /// The locale bundles were loaded for, once initialized.
    pub fn locale(&self) -> Option<Locale> {
        match &*self.lock_state() {
            BundleState::Initialized(loaded) => Some(loaded.locale.clone()),
            BundleState::Uninitialized => None,
        }
    }

    /// Value for `key` from the highest-priority tier that has it.
    pub fn resolve(&self, key: &str) -> Result<String, ResourceError> {
        self.lookup(key).map(|resolved| resolved.value)
    }

    /// Value for `key` with `args` substituted into its `{n}` placeholders.
    pub fn resolve_formatted(
        &self,
        key: &str,
        args: &[&dyn Display],
    ) -> Result<String, ResourceError> {
        Ok(self.lookup(key)?.format(args))
    }

    /// Like [`resolve`](Self::resolve), also reporting the supplying tier and locale.
    pub fn lookup(&self, key: &str) -> Result<Resolved, ResourceError> {
        if key.is_empty() {
            return Err(ResourceError::EmptyKey);
        }

        let loaded = self.loaded()?;
        for bundle in &loaded.bundles {
            if let Some((table, entry)) = bundle.entry(key) {
                trace!(key, bundle = bundle.name(), locale = %table.locale, "resolved key");
                return Ok(Resolved {
                    key: key.to_string(),
                    value: entry.value().to_string(),
                    bundle: bundle.name().to_string(),
                    locale: table.locale.clone(),
                });
            }
            trace!(key, bundle = bundle.name(), "key not in tier");
        }

        // Tiers are never empty, so the last one is the common bundle
        Err(ResourceError::NotFound {
            bundle: self.tiers.last().cloned().unwrap_or_default(),
            key: key.to_string(),
        })
    }

    pub fn contains_key(&self, key: &str) -> Result<bool, ResourceError> {
        if key.is_empty() {
            return Err(ResourceError::EmptyKey);
        }

        let loaded = self.loaded()?;
        Ok(loaded.bundles.iter().any(|b| b.contains_key(key)))
    }

    /// Every key visible through any tier, attributed to the tier that wins it.
    pub fn keys(&self) -> Result<Vec<Resolved>, ResourceError> {
        let loaded = self.loaded()?;
        let mut merged: BTreeMap<&str, Resolved> = BTreeMap::new();
        for bundle in &loaded.bundles {
            for key in bundle.keys() {
                if merged.contains_key(key) {
                    continue;
                }
                if let Some((table, entry)) = bundle.entry(key) {
                    merged.insert(
                        key,
                        Resolved {
                            key: key.to_string(),
                            value: entry.value().to_string(),
                            bundle: bundle.name().to_string(),
                            locale: table.locale.clone(),
                        },
                    );
                }
            }
        }
        Ok(merged.into_values().collect())
    }

    /// Load every tier on first use; later calls return the cached tiers.
    fn loaded(&self) -> Result<Arc<LoadedTiers>, ResourceError> {
        let mut state = self.lock_state();
        if let BundleState::Initialized(loaded) = &*state {
            return Ok(Arc::clone(loaded));
        }

        let locale = self.source.locale();
        let bundles = self
            .tiers
            .iter()
            .map(|name| Bundle::load(&self.loader, name, &locale, self.fallback_locale.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(locale = %locale, tiers = ?self.tiers, "initialized resource bundles");
        let loaded = Arc::new(LoadedTiers { locale, bundles });
        *state = BundleState::Initialized(Arc::clone(&loaded));
        Ok(loaded)
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, BundleState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
