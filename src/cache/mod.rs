// ABOUTME: Cache abstraction for scoped, expiring local snapshots of session state
// ABOUTME: Pluggable backend trait with an LRU in-memory implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Workout Session Engine Contributors

/// In-memory cache implementation
pub mod memory;

pub use memory::InMemoryCache;

use crate::errors::AppResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use session_core::constants::cache::{
    CACHE_KEY_PREFIX, DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_CLEANUP_INTERVAL_SECS,
    TTL_MUSCLE_SELECTION_SECS, TTL_SESSION_SNAPSHOT_SECS,
};
use std::fmt;
use std::time::Duration;

/// Cache provider trait for pluggable backend implementations
///
/// Entries past their TTL are treated as absent by every read method.
///
/// # Examples
///
/// ```rust,no_run
/// use workout_session_engine::cache::{CacheConfig, CacheKey, CacheProvider, CacheResource};
/// use workout_session_engine::cache::memory::InMemoryCache;
/// use workout_session_engine::models::SessionInputs;
/// use std::time::Duration;
/// # async fn example() -> Result<(), workout_session_engine::errors::AppError> {
///
/// let config = CacheConfig {
///     enable_background_cleanup: false,
///     ..Default::default()
/// };
/// let cache: InMemoryCache = InMemoryCache::new(config).await?;
///
/// let key = CacheKey::new("device-42", CacheResource::SessionInputs);
/// let inputs = SessionInputs {
///     todays_focus: Some("strength".to_owned()),
///     ..Default::default()
/// };
/// cache.set(&key, &inputs, Duration::from_secs(3600)).await?;
///
/// let cached: Option<SessionInputs> = cache.get(&key).await?;
/// assert_eq!(cached, Some(inputs));
/// # Ok(())
/// # }
/// ```
#[async_trait::async_trait]
pub trait CacheProvider: Send + Sync + Clone {
    /// Create new cache instance with configuration
    ///
    /// # Errors
    ///
    /// Returns an error if cache initialization fails
    async fn new(config: CacheConfig) -> AppResult<Self>
    where
        Self: Sized;

    /// Store value in cache with TTL
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or storage fails
    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &CacheKey,
        value: &T,
        ttl: Duration,
    ) -> AppResult<()>;

    /// Retrieve value from cache, `None` when missing or expired
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails
    async fn get<T: DeserializeOwned + Send>(&self, key: &CacheKey) -> AppResult<Option<T>>;

    /// Remove single cache entry
    ///
    /// # Errors
    ///
    /// Returns an error if invalidation fails
    async fn invalidate(&self, key: &CacheKey) -> AppResult<()>;

    /// Check if a live entry exists for key
    ///
    /// # Errors
    ///
    /// Returns an error if existence check fails
    async fn exists(&self, key: &CacheKey) -> AppResult<bool>;

    /// Get remaining TTL for key
    ///
    /// # Errors
    ///
    /// Returns an error if TTL check fails
    async fn ttl(&self, key: &CacheKey) -> AppResult<Option<Duration>>;

    /// Clear all cache entries
    ///
    /// # Errors
    ///
    /// Returns an error if clear operation fails
    async fn clear_all(&self) -> AppResult<()>;
}

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries
    pub max_entries: usize,
    /// Cleanup interval for expired entries
    pub cleanup_interval: Duration,
    /// Enable background cleanup task (should be false in tests to avoid runtime conflicts)
    pub enable_background_cleanup: bool,
    /// Cache TTL configuration
    pub ttl: CacheTtlConfig,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_CACHE_MAX_ENTRIES,
            cleanup_interval: Duration::from_secs(DEFAULT_CLEANUP_INTERVAL_SECS),
            enable_background_cleanup: true,
            ttl: CacheTtlConfig::default(),
        }
    }
}

/// Cache TTL configuration per resource type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtlConfig {
    /// Session input snapshot TTL in seconds (default: 24 hours)
    pub session_snapshot_secs: u64,
    /// Muscle selection TTL in seconds (default: 24 hours)
    pub muscle_selection_secs: u64,
}

impl Default for CacheTtlConfig {
    fn default() -> Self {
        Self {
            session_snapshot_secs: TTL_SESSION_SNAPSHOT_SECS,
            muscle_selection_secs: TTL_MUSCLE_SELECTION_SECS,
        }
    }
}

impl CacheTtlConfig {
    /// Get TTL duration for a specific cache resource type
    #[must_use]
    pub const fn ttl_for_resource(&self, resource: CacheResource) -> Duration {
        match resource {
            CacheResource::SessionInputs => Duration::from_secs(self.session_snapshot_secs),
            CacheResource::MuscleSelection => Duration::from_secs(self.muscle_selection_secs),
        }
    }
}

/// Structured cache key scoped to one user or device
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// User or device scope
    pub scope: String,
    /// Specific resource being cached
    pub resource: CacheResource,
}

impl CacheKey {
    /// Create new cache key
    pub fn new(scope: impl Into<String>, resource: CacheResource) -> Self {
        Self {
            scope: scope.into(),
            resource,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{CACHE_KEY_PREFIX}{}:{}", self.scope, self.resource)
    }
}

/// Cached resource types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheResource {
    /// Full `SessionInputs` snapshot (24h TTL)
    SessionInputs,
    /// Local copy of the muscle selection (24h TTL)
    MuscleSelection,
}

impl fmt::Display for CacheResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SessionInputs => write!(f, "session_inputs"),
            Self::MuscleSelection => write!(f, "muscle_selection"),
        }
    }
}
