use std::{
    fs,
    path::{Component, Path, PathBuf},
    sync::LazyLock,
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::locale::Locale;

pub const CONFIG_FILE_NAME: &str = ".restextrc.json";

/// Dot-separated bundle identifier, e.g. `doclets.formats.html`.
static BUNDLE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9-]*(\.[A-Za-z][A-Za-z0-9-]*)*$").unwrap());

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_bundles_root")]
    pub bundles_root: String,
    #[serde(default = "default_common_bundle")]
    pub common_bundle: String,
    #[serde(default = "default_specific_bundle")]
    pub specific_bundle: String,
    /// Requested locale. Taken from the environment when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_locale: Option<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
}

fn default_bundles_root() -> String {
    "./bundles".to_string()
}

fn default_common_bundle() -> String {
    "common".to_string()
}

fn default_specific_bundle() -> String {
    "messages".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bundles_root: default_bundles_root(),
            common_bundle: default_common_bundle(),
            specific_bundle: default_specific_bundle(),
            locale: None,
            fallback_locale: None,
            ignores: Vec::new(),
        }
    }
}

/// Values that take precedence over the config file (CLI flags, MCP parameters).
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub bundles_root: Option<String>,
    pub common_bundle: Option<String>,
    pub specific_bundle: Option<String>,
    pub locale: Option<String>,
    pub fallback_locale: Option<String>,
}

impl Config {
    /// Replace every value the overrides set.
    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(root) = &overrides.bundles_root {
            self.bundles_root = root.clone();
        }
        if let Some(common) = &overrides.common_bundle {
            self.common_bundle = common.clone();
        }
        if let Some(specific) = &overrides.specific_bundle {
            self.specific_bundle = specific.clone();
        }
        if let Some(locale) = &overrides.locale {
            self.locale = Some(locale.clone());
        }
        if let Some(fallback) = &overrides.fallback_locale {
            self.fallback_locale = Some(fallback.clone());
        }
    }

    /// Validate configuration values.
    ///
    /// Returns an error for invalid glob patterns in `ignores`, unparsable
    /// locales and malformed bundle names.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        for (field, name) in [
            ("commonBundle", &self.common_bundle),
            ("specificBundle", &self.specific_bundle),
        ] {
            if !BUNDLE_NAME.is_match(name) {
                bail!(
                    "Invalid bundle name in '{}': \"{}\" (expected dot-separated identifiers like \"doclets.common\")",
                    field,
                    name
                );
            }
        }

        for (field, value) in [
            ("locale", &self.locale),
            ("fallbackLocale", &self.fallback_locale),
        ] {
            if let Some(value) = value {
                value
                    .parse::<Locale>()
                    .with_context(|| format!("Invalid locale in '{}': \"{}\"", field, value))?;
            }
        }

        Ok(())
    }

    /// The locale bundles should be loaded for.
    ///
    /// Uses `locale` when set, else the process environment, else root.
    pub fn effective_locale(&self) -> Result<Locale> {
        match &self.locale {
            Some(value) => value
                .parse::<Locale>()
                .with_context(|| format!("Invalid locale: \"{}\"", value)),
            None => Ok(Locale::from_env().unwrap_or_default()),
        }
    }

    pub fn fallback_locale(&self) -> Result<Option<Locale>> {
        self.fallback_locale
            .as_deref()
            .map(|value| {
                value
                    .parse::<Locale>()
                    .with_context(|| format!("Invalid fallback locale: \"{}\"", value))
            })
            .transpose()
    }

    /// `bundlesRoot` resolved against the project directory.
    pub fn bundles_dir(&self, project_root: &Path) -> PathBuf {
        let root = Path::new(&self.bundles_root);
        if root.is_absolute() {
            return root.to_path_buf();
        }
        let relative: PathBuf = root
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect();
        project_root.join(relative)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory holding the config file, or the start directory when using defaults.
    pub project_root: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let project_root = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            tracing::debug!(path = %path.display(), "loaded config file");
            Ok(ConfigLoadResult {
                config,
                project_root,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            project_root: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}
