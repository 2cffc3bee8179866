//! Configuration types and parsing.
//!
//! The Config type is a stable, serialization-friendly schema. Values derived
//! from it (preference store, OS query) are built on demand by helpers here.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use toml::Table;

use crate::error::{Error, Result};
use crate::storage::FileStore;
use crate::system::{ColorSchemeQuery, EnvColorSchemeQuery, FixedColorScheme};
use crate::theme::{ColorScheme, THEME_COLOR_META, THEME_STORAGE_KEY};

/// Known valid values for theme.system_scheme.
const VALID_SYSTEM_SCHEMES: &[&str] = &["auto", "light", "dark"];

/// Embedded default configuration TOML, compiled into the binary.
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../../config.toml");

/// Preferences file name inside the state directory.
const PREFERENCES_FILE: &str = "hueboard/preferences.json";

/// Result of loading a configuration file.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Path where config was found, if any.
    pub source: Option<PathBuf>,
    /// Whether defaults were used (no config file found).
    pub used_defaults: bool,
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Theme selection and application.
    pub theme: ThemeConfig,

    /// Preference persistence.
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from the embedded default TOML string.
    pub fn from_default_toml() -> Result<Self> {
        let config: Config = toml::from_str(DEFAULT_CONFIG_TOML)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, merging with embedded defaults.
    ///
    /// Returns an error if the file doesn't exist or can't be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        Self::load_with_defaults(&content)
    }

    /// Parse a TOML string, deep-merged over the embedded defaults (user
    /// values win).
    pub fn load_with_defaults(user_toml: &str) -> Result<Self> {
        let mut base: Table = toml::from_str(DEFAULT_CONFIG_TOML)?;
        let user: Table = toml::from_str(user_toml)?;

        deep_merge_toml(&mut base, user);

        let config: Config = base.try_into()?;
        Ok(config)
    }

    /// Find and load configuration using the XDG lookup chain.
    ///
    /// If `explicit_path` is `Some`, that path is used directly and an error
    /// is returned if it doesn't exist or can't be parsed (no fallback).
    ///
    /// Otherwise searches, in order:
    /// 1. `$XDG_CONFIG_HOME/hueboard/config.toml`
    /// 2. `~/.config/hueboard/config.toml`
    /// 3. `./config.toml` (current working directory)
    ///
    /// A config file that exists but fails to load is an error. Only when no
    /// file exists at all are the embedded defaults used.
    pub fn find_and_load(explicit_path: Option<&Path>) -> Result<ConfigLoadResult> {
        if let Some(path) = explicit_path {
            let config = Self::load(path)?;
            return Ok(ConfigLoadResult {
                config,
                source: Some(path.to_path_buf()),
                used_defaults: false,
            });
        }

        let search_paths = Self::config_search_paths();

        for path in &search_paths {
            if path.exists() {
                match Self::load(path) {
                    Ok(config) => {
                        return Ok(ConfigLoadResult {
                            config,
                            source: Some(path.clone()),
                            used_defaults: false,
                        });
                    }
                    Err(e) => {
                        tracing::error!("Config file {:?} exists but failed to load: {}", path, e);
                        return Err(e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using built-in default config");
        tracing::debug!(
            "Searched: {}",
            search_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(ConfigLoadResult {
            config: Self::from_default_toml()?,
            source: None,
            used_defaults: true,
        })
    }

    /// Get the list of paths to search for config files.
    pub fn config_search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg_config).join("hueboard/config.toml"));
        }

        if let Ok(home) = env::var("HOME") {
            paths.push(PathBuf::from(home).join(".config/hueboard/config.toml"));
        }

        paths.push(PathBuf::from("config.toml"));

        paths
    }

    /// Validate the configuration, collecting every invalid value.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.theme.storage_key.trim().is_empty() {
            errors.push("theme.storage_key: must not be empty".to_string());
        }

        if self.theme.meta_tag.trim().is_empty() {
            errors.push("theme.meta_tag: must not be empty".to_string());
        }

        if !VALID_SYSTEM_SCHEMES.contains(&self.theme.system_scheme.as_str()) {
            errors.push(format!(
                "theme.system_scheme: invalid value '{}', expected one of: {}",
                self.theme.system_scheme,
                VALID_SYSTEM_SCHEMES.join(", ")
            ));
        }

        if let Some(path) = &self.storage.path
            && path.as_os_str().is_empty()
        {
            errors.push("storage.path: must not be empty when set".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::ConfigValidation(errors))
        }
    }

    /// Human-readable summary of the configuration.
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();

        lines.push("Theme:".to_string());
        lines.push(format!("  storage_key: {}", self.theme.storage_key));
        lines.push(format!("  meta_tag: {}", self.theme.meta_tag));
        lines.push(format!("  system_scheme: {}", self.theme.system_scheme));

        lines.push("\nStorage:".to_string());
        match self.storage.resolved_path() {
            Some(path) => lines.push(format!("  path: {}", path.display())),
            None => lines.push("  path: (unavailable)".to_string()),
        }

        lines.join("\n")
    }
}

/// Deep merge two TOML tables, with `overlay` values taking precedence.
///
/// Nested tables merge recursively; any other value is replaced outright.
fn deep_merge_toml(base: &mut Table, overlay: Table) {
    for (key, overlay_value) in overlay {
        match (base.get_mut(&key), overlay_value) {
            (Some(toml::Value::Table(base_table)), toml::Value::Table(overlay_table)) => {
                deep_merge_toml(base_table, overlay_table);
            }
            (_, overlay_value) => {
                base.insert(key, overlay_value);
            }
        }
    }
}

/// Theme configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Preference key holding the selected theme name.
    pub storage_key: String,

    /// Meta tag mirroring the secondary surface color.
    pub meta_tag: String,

    /// OS preference source for the System theme: "auto", "light", "dark".
    pub system_scheme: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: THEME_STORAGE_KEY.to_string(),
            meta_tag: THEME_COLOR_META.to_string(),
            system_scheme: "auto".to_string(),
        }
    }
}

impl ThemeConfig {
    /// Build the OS color-scheme query this config asks for.
    pub fn system_query(&self) -> Box<dyn ColorSchemeQuery> {
        match self.system_scheme.as_str() {
            "light" => Box::new(FixedColorScheme(Some(ColorScheme::Light))),
            "dark" => Box::new(FixedColorScheme(Some(ColorScheme::Dark))),
            _ => Box::new(EnvColorSchemeQuery),
        }
    }
}

/// Preference storage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// Explicit preferences file. Defaults to the XDG state directory.
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    /// Effective preferences file path.
    ///
    /// `None` when no path is configured and neither `XDG_STATE_HOME` nor
    /// `HOME` is set, i.e. storage is unavailable.
    pub fn resolved_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.path {
            return Some(path.clone());
        }
        if let Ok(state) = env::var("XDG_STATE_HOME")
            && !state.is_empty()
        {
            return Some(PathBuf::from(state).join(PREFERENCES_FILE));
        }
        env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".local/state").join(PREFERENCES_FILE))
    }

    /// Open the configured store, if storage is available.
    pub fn open(&self) -> Option<FileStore> {
        self.resolved_path().map(FileStore::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme.storage_key, "colorTheme");
        assert_eq!(config.theme.meta_tag, "theme-color");
        assert_eq!(config.theme.system_scheme, "auto");
        assert!(config.storage.path.is_none());
    }

    #[test]
    fn test_embedded_default_config_parses_and_validates() {
        let config = Config::from_default_toml().expect("embedded config should parse");
        config.validate().expect("embedded config should validate");
    }

    #[test]
    fn test_embedded_default_matches_struct_defaults() {
        let embedded = Config::from_default_toml().unwrap();
        let defaults = Config::default();
        assert_eq!(embedded.theme.storage_key, defaults.theme.storage_key);
        assert_eq!(embedded.theme.meta_tag, defaults.theme.meta_tag);
        assert_eq!(embedded.theme.system_scheme, defaults.theme.system_scheme);
        assert_eq!(embedded.storage.path, defaults.storage.path);
    }

    #[test]
    fn test_load_with_defaults_partial_override() {
        let config = Config::load_with_defaults(
            r#"
[theme]
system_scheme = "light"
"#,
        )
        .unwrap();

        assert_eq!(config.theme.system_scheme, "light");
        assert_eq!(config.theme.storage_key, "colorTheme");
    }

    #[test]
    fn test_load_with_defaults_empty_config() {
        let config = Config::load_with_defaults("").unwrap();
        assert_eq!(config.theme.meta_tag, "theme-color");
    }

    #[test]
    fn test_load_with_defaults_storage_path() {
        let config = Config::load_with_defaults(
            r#"
[storage]
path = "/tmp/prefs.json"
"#,
        )
        .unwrap();
        assert_eq!(config.storage.resolved_path(), Some(PathBuf::from("/tmp/prefs.json")));
    }

    #[test]
    fn test_load_with_defaults_rejects_unknown_fields() {
        let result = Config::load_with_defaults(
            r#"
[theme]
colour = "dark"
"#,
        );
        assert!(matches!(result, Err(Error::TomlParse(_))));
    }

    #[test]
    fn test_load_with_defaults_rejects_unknown_section() {
        let result = Config::load_with_defaults("[bar]\nsize = 3\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_deep_merge_toml_tables() {
        let mut base: Table = toml::from_str(
            r#"
[theme]
storage_key = "a"
meta_tag = "b"
"#,
        )
        .unwrap();
        let overlay: Table = toml::from_str(
            r#"
[theme]
meta_tag = "c"
"#,
        )
        .unwrap();

        deep_merge_toml(&mut base, overlay);

        let theme = base["theme"].as_table().unwrap();
        assert_eq!(theme["storage_key"].as_str(), Some("a"));
        assert_eq!(theme["meta_tag"].as_str(), Some("c"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Path::new("/definitely/not/here/config.toml"));
        assert!(matches!(result, Err(Error::ConfigNotFound(_))));
    }

    #[test]
    fn test_validate_invalid_system_scheme() {
        let mut config = Config::default();
        config.theme.system_scheme = "sepia".to_string();

        match config.validate() {
            Err(Error::ConfigValidation(errors)) => {
                assert_eq!(errors.len(), 1);
                assert!(errors[0].contains("theme.system_scheme"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_multiple_errors() {
        let mut config = Config::default();
        config.theme.storage_key = " ".to_string();
        config.theme.meta_tag = String::new();
        config.storage.path = Some(PathBuf::new());

        match config.validate() {
            Err(Error::ConfigValidation(errors)) => assert_eq!(errors.len(), 3),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_config_search_paths_end_with_cwd() {
        let paths = Config::config_search_paths();
        assert_eq!(paths.last(), Some(&PathBuf::from("config.toml")));
    }

    #[test]
    fn test_system_query_fixed() {
        let mut config = ThemeConfig::default();
        config.system_scheme = "light".to_string();
        let query = config.system_query();
        assert!(query.supports_color_scheme_query());
        assert!(query.prefers_light());

        config.system_scheme = "dark".to_string();
        assert!(!config.system_query().prefers_light());
    }

    #[test]
    fn test_summary_sections() {
        let summary = Config::default().summary();
        assert!(summary.contains("Theme:"));
        assert!(summary.contains("storage_key: colorTheme"));
        assert!(summary.contains("Storage:"));
    }
}
