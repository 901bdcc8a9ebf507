//! Locale identifiers and the collaborators that supply them.
//!
//! A [`Locale`] is a language/script/region/variant tuple written in the
//! underscore form used by bundle file names (`en`, `en_US`, `zh_Hant_TW`,
//! `en__POSIX`). The empty locale is the *root* locale: the table every
//! bundle falls back to last.
//!
//! Resolvers never capture a locale at construction. They ask a
//! [`LocaleSource`] when the first lookup happens, so a program can build its
//! resolver before option parsing has decided which locale is in effect.

use std::{
    fmt,
    str::FromStr,
    sync::{Arc, PoisonError, RwLock},
};

use thiserror::Error;

/// Error returned when a locale string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
    #[error("invalid language subtag '{0}'")]
    InvalidLanguage(String),
    #[error("invalid variant subtag '{0}'")]
    InvalidVariant(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locale {
    language: String,
    script: String,
    region: String,
    variant: String,
}

impl Locale {
    /// The root locale (no language, region or variant).
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.language.is_empty()
            && self.script.is_empty()
            && self.region.is_empty()
            && self.variant.is_empty()
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn script(&self) -> &str {
        &self.script
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn variant(&self) -> &str {
        &self.variant
    }

    /// Underscore form used as a bundle file suffix. Empty for root.
    ///
    /// The region slot is kept empty rather than dropped when a variant is
    /// present without a region, so `en__POSIX` round-trips.
    pub fn tag(&self) -> String {
        let mut tag = self.language.clone();
        if !self.script.is_empty() {
            tag.push('_');
            tag.push_str(&self.script);
        }
        if !self.region.is_empty() || !self.variant.is_empty() {
            tag.push('_');
            tag.push_str(&self.region);
        }
        if !self.variant.is_empty() {
            tag.push('_');
            tag.push_str(&self.variant);
        }
        tag
    }

    /// Locales to search for a bundle table, most specific first, ending at root.
    ///
    /// For `zh_Hant_TW` this is `[zh_Hant_TW, zh_Hant, zh_TW, zh, root]`.
    /// Multi-part variants are shortened one segment at a time.
    pub fn candidates(&self) -> Vec<Locale> {
        let variants: Vec<&str> = self
            .variant
            .split('_')
            .filter(|v| !v.is_empty())
            .collect();

        let mut out = Vec::new();
        self.push_chain(&mut out, &self.script, &variants);
        if !self.script.is_empty() {
            self.push_chain(&mut out, "", &variants);
        }
        if !self.language.is_empty() {
            out.push(Locale {
                language: self.language.clone(),
                ..Locale::default()
            });
        }
        out.push(Locale::root());

        let mut seen = Vec::with_capacity(out.len());
        out.retain(|locale| {
            if seen.contains(locale) {
                false
            } else {
                seen.push(locale.clone());
                true
            }
        });
        out
    }

    fn push_chain(&self, out: &mut Vec<Locale>, script: &str, variants: &[&str]) {
        let with = |region: &str, variant: String| Locale {
            language: self.language.clone(),
            script: script.to_string(),
            region: region.to_string(),
            variant,
        };
        for len in (1..=variants.len()).rev() {
            out.push(with(&self.region, variants[..len].join("_")));
        }
        if !self.region.is_empty() {
            out.push(with(&self.region, String::new()));
        }
        if !script.is_empty() {
            out.push(with("", String::new()));
        }
    }

    /// Locale from the POSIX environment (`LC_ALL`, then `LC_MESSAGES`, then `LANG`).
    pub fn from_env() -> Option<Locale> {
        Self::from_env_with(|name| std::env::var(name).ok())
    }

    /// Same as [`Locale::from_env`] with an injectable variable lookup.
    ///
    /// The first non-empty variable decides. If its value does not parse,
    /// the result is `None` (root) and the lower-priority variables are not
    /// consulted.
    pub fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Option<Locale> {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|name| lookup(name))
            .find(|value| !value.trim().is_empty())
            .and_then(|value| value.parse().ok())
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    /// Accepts `_` or `-` separators and ignores POSIX `.codeset` and
    /// `@modifier` suffixes. Empty, `root`, `C` and `POSIX` parse as root.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let base = trimmed
            .split(['.', '@'])
            .next()
            .unwrap_or_default();

        if base.is_empty()
            || base.eq_ignore_ascii_case("root")
            || base == "C"
            || base == "POSIX"
        {
            return Ok(Locale::root());
        }

        let mut parts = base.split(['_', '-']).peekable();
        let language = parts.next().unwrap_or_default();
        if !(2..=8).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(LocaleError::InvalidLanguage(language.to_string()));
        }

        let mut locale = Locale {
            language: language.to_ascii_lowercase(),
            ..Locale::default()
        };

        if let Some(part) = parts.peek()
            && part.len() == 4
            && part.chars().all(|c| c.is_ascii_alphabetic())
        {
            locale.script = titlecase(part);
            parts.next();
        }

        if let Some(part) = parts.peek() {
            let is_alpha_region = part.len() == 2 && part.chars().all(|c| c.is_ascii_alphabetic());
            let is_numeric_region = part.len() == 3 && part.chars().all(|c| c.is_ascii_digit());
            if is_alpha_region || is_numeric_region {
                locale.region = part.to_ascii_uppercase();
                parts.next();
            } else if part.is_empty() {
                parts.next();
            }
        }

        let variants: Vec<&str> = parts.collect();
        for variant in &variants {
            if variant.is_empty() || !variant.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(LocaleError::InvalidVariant(variant.to_string()));
            }
        }
        locale.variant = variants.join("_");

        Ok(locale)
    }
}

fn titlecase(s: &str) -> String {
    let lower = s.to_ascii_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            write!(f, "root")
        } else {
            write!(f, "{}", self.tag())
        }
    }
}

// ============================================================
// Locale sources
// ============================================================

/// Supplies the locale a resolver should use, read at first lookup.
pub trait LocaleSource {
    fn locale(&self) -> Locale;
}

impl LocaleSource for Locale {
    fn locale(&self) -> Locale {
        self.clone()
    }
}

impl<T: LocaleSource + ?Sized> LocaleSource for &T {
    fn locale(&self) -> Locale {
        (**self).locale()
    }
}

impl<T: LocaleSource + ?Sized> LocaleSource for Arc<T> {
    fn locale(&self) -> Locale {
        (**self).locale()
    }
}

/// A locale slot that can be filled in after the resolver holding it is built.
///
/// Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct SharedLocale(Arc<RwLock<Locale>>);

impl SharedLocale {
    pub fn new(locale: Locale) -> Self {
        Self(Arc::new(RwLock::new(locale)))
    }

    pub fn set(&self, locale: Locale) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = locale;
    }
}

impl LocaleSource for SharedLocale {
    fn locale(&self) -> Locale {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
