//! Error types for bundle loading and key resolution.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Failure raised while loading bundles or resolving a key.
///
/// `NotFound` and `BundleNotFound` together form the "resource not found"
/// family: callers that only care whether text was available should use
/// [`ResourceError::is_not_found`] rather than matching variants.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The key is absent from every tier of the resolver.
    #[error("Can't find resource for bundle {bundle}, key {key}")]
    NotFound { bundle: String, key: String },

    /// No table exists for any candidate of the requested locale, root included.
    #[error("Can't find bundle for base name {bundle}, locale {locale}")]
    BundleNotFound { bundle: String, locale: String },

    /// A bundle file exists but could not be read.
    #[error("Failed to read bundle file: {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A bundle file is not a valid JSON object.
    #[error("Failed to parse bundle file: {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Lookup keys must be non-empty.
    #[error("Lookup key must not be empty")]
    EmptyKey,

    /// A layered resolver needs at least one bundle.
    #[error("A resolver needs at least one bundle tier")]
    NoTiers,
}

impl ResourceError {
    /// True when the failure means "no text available" rather than a broken bundle file.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ResourceError::NotFound { .. } | ResourceError::BundleNotFound { .. }
        )
    }
}
