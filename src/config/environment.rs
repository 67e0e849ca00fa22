// ABOUTME: Environment configuration for the session engine and its collaborators
// ABOUTME: Parses debounce, selection limit, cache, and remote endpoint settings with defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Workout Session Engine Contributors

//! Environment-based configuration

use crate::cache::{CacheConfig, CacheTtlConfig};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use session_core::constants::cache::{
    DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_CLEANUP_INTERVAL_SECS, DEFAULT_SESSION_SCOPE,
    TTL_MUSCLE_SELECTION_SECS, TTL_SESSION_SNAPSHOT_SECS,
};
use session_core::constants::{env_config, http, limits, muscle_sync};
use std::env;
use std::error::Error as StdError;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if this is a testing environment
    #[must_use]
    pub const fn is_testing(&self) -> bool {
        matches!(self, Self::Testing)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Muscle selection synchronizer settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MuscleSyncConfig {
    /// Quiet period before a changed selection is saved
    pub debounce: Duration,
    /// Maximum simultaneously selected muscle groups
    pub max_groups: usize,
}

impl Default for MuscleSyncConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(muscle_sync::DEFAULT_DEBOUNCE_MS),
            max_groups: limits::DEFAULT_MAX_MUSCLE_GROUPS,
        }
    }
}

/// Remote muscle selection endpoint settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteStoreConfig {
    /// Endpoint URL; `None` selects the in-memory store
    pub api_url: Option<String>,
    /// Whole-request timeout
    pub timeout: Duration,
    /// Connection timeout
    pub connect_timeout: Duration,
}

impl Default for RemoteStoreConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            timeout: Duration::from_secs(http::DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(http::DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Cache scope (user or device identifier)
    pub session_scope: String,
    /// Synchronizer settings
    pub muscle_sync: MuscleSyncConfig,
    /// Local cache settings
    pub cache: CacheConfig,
    /// Remote endpoint settings
    pub remote: RemoteStoreConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            session_scope: DEFAULT_SESSION_SCOPE.to_owned(),
            muscle_sync: MuscleSyncConfig::default(),
            cache: CacheConfig::default(),
            remote: RemoteStoreConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed, or if the
    /// parsed configuration is invalid
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let environment = env::var(env_config::ENVIRONMENT)
            .map(|value| Environment::from_str_or_default(&value))
            .unwrap_or_default();

        let config = Self {
            environment,
            session_scope: env::var(env_config::SESSION_SCOPE)
                .ok()
                .filter(|scope| !scope.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SESSION_SCOPE.to_owned()),
            muscle_sync: MuscleSyncConfig {
                debounce: Duration::from_millis(env_parse(
                    env_config::MUSCLE_SYNC_DEBOUNCE_MS,
                    muscle_sync::DEFAULT_DEBOUNCE_MS,
                )?),
                max_groups: env_parse(
                    env_config::MAX_MUSCLE_GROUPS,
                    limits::DEFAULT_MAX_MUSCLE_GROUPS,
                )?,
            },
            cache: CacheConfig {
                max_entries: env_parse(env_config::CACHE_MAX_ENTRIES, DEFAULT_CACHE_MAX_ENTRIES)?,
                cleanup_interval: Duration::from_secs(env_parse(
                    env_config::CACHE_CLEANUP_INTERVAL_SECS,
                    DEFAULT_CLEANUP_INTERVAL_SECS,
                )?),
                // Background cleanup spawns onto the runtime; tests drive expiry explicitly
                enable_background_cleanup: !environment.is_testing(),
                ttl: CacheTtlConfig {
                    session_snapshot_secs: env_parse(
                        env_config::SESSION_CACHE_TTL_SECS,
                        TTL_SESSION_SNAPSHOT_SECS,
                    )?,
                    muscle_selection_secs: env_parse(
                        env_config::SESSION_CACHE_TTL_SECS,
                        TTL_MUSCLE_SELECTION_SECS,
                    )?,
                },
            },
            remote: RemoteStoreConfig {
                api_url: env::var(env_config::MUSCLE_SELECTION_API_URL)
                    .ok()
                    .filter(|url| !url.trim().is_empty()),
                timeout: Duration::from_secs(env_parse(
                    env_config::HTTP_TIMEOUT_SECS,
                    http::DEFAULT_TIMEOUT_SECS,
                )?),
                connect_timeout: Duration::from_secs(env_parse(
                    env_config::HTTP_CONNECT_TIMEOUT_SECS,
                    http::DEFAULT_CONNECT_TIMEOUT_SECS,
                )?),
            },
        };

        config.validate()?;
        info!("{}", config.summary());
        Ok(config)
    }

    /// Validate cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns an error if a limit is zero or the endpoint is not an HTTP URL
    pub fn validate(&self) -> Result<()> {
        if self.muscle_sync.max_groups == 0 {
            return Err(anyhow!("{} must be at least 1", env_config::MAX_MUSCLE_GROUPS));
        }
        if self.cache.max_entries == 0 {
            return Err(anyhow!("{} must be at least 1", env_config::CACHE_MAX_ENTRIES));
        }
        if self.cache.ttl.session_snapshot_secs == 0 {
            return Err(anyhow!(
                "{} must be at least 1",
                env_config::SESSION_CACHE_TTL_SECS
            ));
        }
        if let Some(url) = &self.remote.api_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(anyhow!(
                    "{} must be an http(s) URL, got '{url}'",
                    env_config::MUSCLE_SELECTION_API_URL
                ));
            }
        }
        Ok(())
    }

    /// Get a summary of the configuration for logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Session Engine Configuration:\n\
             - Environment: {}\n\
             - Session Scope: {}\n\
             - Debounce: {}ms\n\
             - Max Muscle Groups: {}\n\
             - Snapshot TTL: {}s\n\
             - Cache Capacity: {}\n\
             - Muscle Store: {}",
            self.environment,
            self.session_scope,
            self.muscle_sync.debounce.as_millis(),
            self.muscle_sync.max_groups,
            self.cache.ttl.session_snapshot_secs,
            self.cache.max_entries,
            self.remote.api_url.as_deref().unwrap_or("in-memory"),
        )
    }
}

/// Parse an environment variable, falling back to `default` when unset
fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: StdError + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key} value: '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing() {
        assert_eq!(
            Environment::from_str_or_default("PROD"),
            Environment::Production
        );
        assert_eq!(
            Environment::from_str_or_default("test"),
            Environment::Testing
        );
        assert_eq!(
            Environment::from_str_or_default("staging"),
            Environment::Development
        );
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.muscle_sync.debounce, Duration::from_millis(150));
        assert_eq!(config.muscle_sync.max_groups, 3);
        assert!(config.summary().contains("in-memory"));
    }

    #[test]
    fn test_validation_rejects_zero_limits_and_bad_urls() {
        let mut config = EngineConfig::default();
        config.muscle_sync.max_groups = 0;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.remote.api_url = Some("ftp://example.com".into());
        assert!(config.validate().is_err());
    }
}
