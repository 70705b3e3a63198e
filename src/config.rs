// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application configuration.
//!
//! Settings come from an optional YAML file (`MEMEFACTORY_CONFIG`, default
//! `memefactory.yaml`) and can be overridden from the environment. Without an
//! explicit language the system locale (`LC_ALL`, `LC_MESSAGES`, `LANG`) decides.

use crate::io::api::DEFAULT_DESCRIPTION;
use crate::session::TokenStore;
use crate::strings::Language;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_ENV: &str = "MEMEFACTORY_CONFIG";
const BASE_URL_ENV: &str = "MEMEFACTORY_API_BASE_URL";
const LANG_ENV: &str = "MEMEFACTORY_LANG";
const DEFAULT_CONFIG_FILE: &str = "memefactory.yaml";
const LOCALE_ENVS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    /// `None` until set by the file, `MEMEFACTORY_LANG` or the system locale.
    pub language: Option<Language>,
    pub default_description: String,
    /// Keep the login token on disk between runs.
    pub remember_session: bool,
    /// Where the token is kept; defaults to the user's config directory.
    pub session_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000".to_string(),
            language: None,
            default_description: DEFAULT_DESCRIPTION.to_string(),
            remember_session: true,
            session_file: None,
        }
    }
}

impl AppConfig {
    /// Load from the configured file (if any) and apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let mut config = if path.exists() {
            let config = Self::from_file(&path)?;
            log::info!("Loaded configuration from {}", path.display());
            config
        } else {
            log::debug!("No configuration file at {}, using defaults", path.display());
            Self::default()
        };

        config.apply_overrides(
            std::env::var(BASE_URL_ENV).ok(),
            std::env::var(LANG_ENV).ok(),
            system_locale(),
        );
        Ok(config)
    }

    pub fn language(&self) -> Language {
        self.language.unwrap_or_default()
    }

    pub fn token_store(&self) -> TokenStore {
        if !self.remember_session {
            return TokenStore::new(None);
        }
        TokenStore::new(self.session_file.clone().or_else(TokenStore::default_path))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_yaml(&yaml).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    fn apply_overrides(&mut self, base_url: Option<String>, language: Option<String>, system: Option<String>) {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.api_base_url = url;
        }
        if let Some(locale) = language.filter(|l| !l.trim().is_empty()) {
            self.language = Some(Language::from_locale(&locale));
        } else if self.language.is_none() {
            self.language = system.map(|locale| Language::from_locale(&locale));
        }
    }
}

/// First non-empty locale variable, in POSIX precedence order.
fn system_locale() -> Option<String> {
    LOCALE_ENVS
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = AppConfig::from_yaml("api_base_url: https://memes.example\n").unwrap();
        assert_eq!(
            config,
            AppConfig {
                api_base_url: "https://memes.example".to_string(),
                ..AppConfig::default()
            }
        );
    }

    #[test]
    fn test_full_yaml() {
        let yaml = "api_base_url: http://10.0.0.2:8080\nlanguage: fr\ndefault_description: Sans titre\n";
        let config = AppConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.language(), Language::Fr);
        assert_eq!(config.default_description, "Sans titre");
    }

    #[test]
    fn test_session_can_be_forgotten() {
        let config = AppConfig::from_yaml("remember_session: false\nsession_file: /tmp/memefactory\n").unwrap();
        assert_eq!(config.session_file, Some(PathBuf::from("/tmp/memefactory")));
        assert_eq!(config.token_store().load(), None);
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(AppConfig::from_yaml("language: klingon\n").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config.apply_overrides(
            Some("https://api.example".to_string()),
            Some("fr_CA".to_string()),
            Some("en_US.UTF-8".to_string()),
        );
        assert_eq!(config.api_base_url, "https://api.example");
        assert_eq!(config.language(), Language::Fr);

        config.apply_overrides(Some(" ".to_string()), None, None);
        assert_eq!(config.api_base_url, "https://api.example");
    }

    #[test]
    fn test_language_falls_back_to_system_locale() {
        let mut config = AppConfig::default();
        assert_eq!(config.language(), Language::En);

        config.apply_overrides(None, None, Some("fr_FR.UTF-8".to_string()));
        assert_eq!(config.language(), Language::Fr);
    }

    #[test]
    fn test_configured_language_beats_system_locale() {
        let mut config = AppConfig::from_yaml("language: en\n").unwrap();
        config.apply_overrides(None, None, Some("fr_FR.UTF-8".to_string()));
        assert_eq!(config.language(), Language::En);
    }
}
