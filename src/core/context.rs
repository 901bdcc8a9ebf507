use std::{
    cell::OnceCell,
    path::{Path, PathBuf},
};

use anyhow::{Context as _, Result};

use crate::{
    config::{Config, ConfigOverrides, load_config},
    core::{
        loader::JsonBundleLoader,
        parsers::json::{ScanBundlesResult, scan_bundle_files},
        resolver::TieredResolver,
    },
    issues::{Issue, Rule},
    locale::Locale,
    rules::run_rules,
};

/// Resolver over the project's JSON bundles.
pub type ProjectResolver = TieredResolver<Locale, JsonBundleLoader>;

/// Everything a command needs to know about one project.
///
/// # Configuration Priority
///
/// 1. Overrides (CLI flags, MCP parameters)
/// 2. `.restextrc.json` found by walking up from the start path
/// 3. Built-in defaults
///
/// The bundle directory scan used by checks runs on first access and is
/// cached; lookups through [`ProjectContext::resolver`] only read the tables
/// they need.
pub struct ProjectContext {
    /// Merged configuration.
    pub config: Config,

    /// Directory relative paths in the config are resolved against.
    pub root_dir: PathBuf,

    /// True if a config file was found.
    pub from_file: bool,

    scan: OnceCell<ScanBundlesResult>,
}

impl ProjectContext {
    pub fn new(path: &Path, overrides: &ConfigOverrides) -> Result<Self> {
        let loaded = load_config(path)?;
        let mut config = loaded.config;
        config.apply(overrides);
        config.validate()?;

        Ok(Self {
            config,
            root_dir: loaded.project_root,
            from_file: loaded.from_file,
            scan: OnceCell::new(),
        })
    }

    pub fn bundles_dir(&self) -> PathBuf {
        self.config.bundles_dir(&self.root_dir)
    }

    /// Requested locale: configured, else from the environment, else root.
    pub fn locale(&self) -> Result<Locale> {
        self.config.effective_locale()
    }

    /// A fresh resolver over the configured specific and common bundles.
    ///
    /// Nothing is read until the first lookup.
    pub fn resolver(&self) -> Result<ProjectResolver> {
        let resolver = TieredResolver::new(
            self.locale()?,
            JsonBundleLoader::new(self.bundles_dir()),
            &self.config.common_bundle,
            &self.config.specific_bundle,
        );
        Ok(match self.config.fallback_locale()? {
            Some(fallback) => resolver.with_fallback_locale(fallback),
            None => resolver,
        })
    }

    /// All bundle tables below the bundles directory.
    pub fn scan(&self) -> Result<&ScanBundlesResult> {
        if let Some(scan) = self.scan.get() {
            return Ok(scan);
        }
        let scan = scan_bundle_files(&self.bundles_dir(), &self.config.ignores)
            .with_context(|| format!("Failed to scan bundles in {:?}", self.bundles_dir()))?;
        Ok(self.scan.get_or_init(|| scan))
    }

    /// Run `rules` against the scanned bundles.
    pub fn check(&self, rules: &[Rule]) -> Result<Vec<Issue>> {
        let scan = self.scan()?;
        Ok(run_rules(&self.bundles_dir(), scan, rules))
    }
}
