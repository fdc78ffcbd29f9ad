// SPDX-License-Identifier: MPL-2.0
//! This module handles the site configuration, loaded from a `settings.toml`
//! file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Fallback language and preloaded languages
//! - `[server]` - Listen host and port
//! - `[content]` - Optional on-disk overrides for translations and projects
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()` with an explicit path (`--config`)
//! 2. Set `VITRINE_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! A missing file means defaults. The `PORT` environment variable overrides
//! the configured port.
//!
//! # Examples
//!
//! ```no_run
//! use vitrine::config;
//!
//! let (mut config, _warning) = config::load();
//! config.server.port = 8080;
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::{ConfigurationError, Error, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use unic_langid::LanguageIdentifier;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// Language settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// Language substituted for unsupported requests and missing strings.
    #[serde(default = "default_fallback_language")]
    pub fallback_language: String,

    /// Languages loaded at startup, in switcher order.
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            fallback_language: default_fallback_language(),
            languages: default_languages(),
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: DEFAULT_PORT,
        }
    }
}

/// Content overrides. Embedded resources are used when unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContentConfig {
    /// Directory holding `<tag>.ftl` translation files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locales_dir: Option<PathBuf>,

    /// TOML document holding the `[[projects]]` list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects_file: Option<PathBuf>,
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub content: ContentConfig,
}

impl Config {
    /// Parsed fallback language.
    pub fn fallback_language(&self) -> std::result::Result<LanguageIdentifier, ConfigurationError> {
        parse_language(&self.general.fallback_language)
    }

    /// Parsed preload list. The fallback must be part of it.
    pub fn languages(&self) -> std::result::Result<Vec<LanguageIdentifier>, ConfigurationError> {
        let fallback = self.fallback_language()?;
        let languages = self
            .general
            .languages
            .iter()
            .map(|tag| parse_language(tag))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        if !languages.contains(&fallback) {
            return Err(ConfigurationError::FallbackNotSupported(fallback.to_string()));
        }
        Ok(languages)
    }

    /// Applies the `PORT` environment variable, ignoring unparseable values.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(raw) = std::env::var(ENV_PORT) {
            match raw.trim().parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!(value = %raw, "ignoring invalid {} value", ENV_PORT),
            }
        }
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_language(tag: &str) -> std::result::Result<LanguageIdentifier, ConfigurationError> {
    tag.parse()
        .map_err(|_| ConfigurationError::InvalidLanguageTag(tag.to_string()))
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_fallback_language() -> String {
    DEFAULT_FALLBACK_LANGUAGE.to_string()
}

fn default_languages() -> Vec<String> {
    DEFAULT_LANGUAGES.iter().map(|tag| tag.to_string()).collect()
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If the file exists but
/// cannot be loaded, returns the default config with a warning message.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    return (
                        Config::default(),
                        Some(format!("failed to load {}: {}", path.display(), err)),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves to `explicit` when given (the file settings were read from),
/// otherwise to the default path.
pub fn save_to(config: &Config, explicit: Option<&Path>) -> Result<()> {
    match explicit {
        Some(path) => save_to_path(config, path),
        None => save(config),
    }
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            general: GeneralConfig {
                fallback_language: "en".to_string(),
                languages: vec!["en".to_string(), "fr".to_string()],
            },
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            content: ContentConfig {
                locales_dir: Some(PathBuf::from("/srv/locales")),
                projects_file: None,
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn save_to_explicit_path_writes_that_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let explicit = temp_dir.path().join("site.toml");
        let mut config = Config::default();
        config.server.port = 9090;

        save_to(&config, Some(&explicit)).expect("failed to save config");

        let loaded = load_from_path(&explicit).expect("explicit file was written");
        assert_eq!(loaded.server.port, 9090);
        assert!(!temp_dir.path().join(CONFIG_FILE).exists());
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[server\nport = ").unwrap();

        let err = load_from_path(&config_path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[server]\nport = 4000\n").unwrap();

        let loaded = load_from_path(&config_path).unwrap();
        assert_eq!(loaded.server.port, 4000);
        assert_eq!(loaded.server.host, DEFAULT_HOST);
        assert_eq!(loaded.general, GeneralConfig::default());
    }

    #[test]
    fn load_with_override_missing_file_returns_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn load_with_override_broken_file_warns() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "general = 3 = 4").unwrap();

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_some());
    }

    #[test]
    fn default_languages_parse() {
        let config = Config::default();
        let languages = config.languages().unwrap();
        assert_eq!(languages.len(), 2);
        assert_eq!(config.fallback_language().unwrap().to_string(), "fr");
    }

    #[test]
    fn fallback_outside_languages_is_rejected() {
        let mut config = Config::default();
        config.general.languages = vec!["en".to_string()];
        assert_eq!(
            config.languages().unwrap_err(),
            ConfigurationError::FallbackNotSupported("fr".into())
        );
    }

    #[test]
    fn invalid_language_tag_is_rejected() {
        let mut config = Config::default();
        config.general.fallback_language = "??".to_string();
        assert_eq!(
            config.fallback_language().unwrap_err(),
            ConfigurationError::InvalidLanguageTag("??".into())
        );
    }

    #[test]
    fn port_env_var_overrides_config() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let mut config = Config::default();

        std::env::set_var(ENV_PORT, "8081");
        config.apply_env_overrides();
        assert_eq!(config.server.port, 8081);

        std::env::set_var(ENV_PORT, "not-a-port");
        config.apply_env_overrides();
        std::env::remove_var(ENV_PORT);
        assert_eq!(config.server.port, 8081);
    }

    #[test]
    fn listen_address_joins_host_and_port() {
        let config = Config::default();
        assert_eq!(config.listen_address(), "127.0.0.1:3000");
    }
}
