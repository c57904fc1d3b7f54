#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Client configuration for the Locator and Calculation services.
//!
//! Defaults are embedded at compile time from `config/default.toml`.
//! [`ClientConfig::load`] applies the `LOCATOR_BASE_URL` and
//! `CALCULATOR_BASE_URL` environment overrides on top.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

const DEFAULT_TOML: &str = include_str!("../config/default.toml");

/// Environment variable overriding [`ClientConfig::locator`].
pub const LOCATOR_BASE_URL_ENV: &str = "LOCATOR_BASE_URL";

/// Environment variable overriding [`ClientConfig::calculator`].
pub const CALCULATOR_BASE_URL_ENV: &str = "CALCULATOR_BASE_URL";

/// Errors from loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document is malformed or missing required keys.
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// A base URL is not an HTTP(S) URL.
    #[error("Invalid base URL for {service}: {url}")]
    InvalidUrl {
        /// Which service section holds the URL.
        service: &'static str,
        /// The rejected value.
        url: String,
    },
}

/// Top-level client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Location search and detail service.
    pub locator: ServiceEndpoint,
    /// Financial calculation service.
    pub calculator: ServiceEndpoint,
    /// Typeahead timings.
    #[serde(default)]
    pub typeahead: TypeaheadSettings,
    /// HTTP client settings shared by both services.
    #[serde(default)]
    pub http: HttpSettings,
}

/// Where a remote service lives.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceEndpoint {
    /// Root URL; endpoint paths are appended to it.
    pub base_url: String,
}

/// Typeahead debounce and dismissal timings.
#[derive(Debug, Clone, Deserialize)]
pub struct TypeaheadSettings {
    /// Quiet period after the last keystroke before a search is issued.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Delay between input blur and dropdown dismissal.
    #[serde(default = "default_blur_grace_ms")]
    pub blur_grace_ms: u64,
    /// Shortest (trimmed) query that triggers a search.
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
}

impl Default for TypeaheadSettings {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            blur_grace_ms: default_blur_grace_ms(),
            min_query_len: default_min_query_len(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpSettings {
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl HttpSettings {
    /// Per-request timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

const fn default_debounce_ms() -> u64 {
    300
}

const fn default_blur_grace_ms() -> u64 {
    200
}

const fn default_min_query_len() -> usize {
    2
}

const fn default_timeout_secs() -> u64 {
    30
}

impl ClientConfig {
    /// Loads the embedded defaults and applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if an override is not an
    /// HTTP(S) URL.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_str(DEFAULT_TOML)
    }

    /// Parses a configuration document and applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the document does not parse or holds an
    /// invalid base URL.
    pub fn load_from_str(toml_str: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(toml_str)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parses a configuration document without consulting the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the document does not parse or holds an
    /// invalid base URL.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Replaces base URLs with values found by `lookup` for the override
    /// variable names.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(LOCATOR_BASE_URL_ENV) {
            log::debug!("{LOCATOR_BASE_URL_ENV} override: {url}");
            self.locator.base_url = url;
        }
        if let Some(url) = lookup(CALCULATOR_BASE_URL_ENV) {
            log::debug!("{CALCULATOR_BASE_URL_ENV} override: {url}");
            self.calculator.base_url = url;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (service, endpoint) in [("locator", &self.locator), ("calculator", &self.calculator)] {
            let url = endpoint.base_url.as_str();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidUrl {
                    service,
                    url: url.to_string(),
                });
            }
        }
        Ok(())
    }
}
