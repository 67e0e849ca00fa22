// ABOUTME: Cache-related constants for TTL, capacity, and cleanup intervals
// ABOUTME: Defaults for the scoped local cache that backs page-reload recovery
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Workout Session Engine Contributors

/// Default maximum cache entries for the in-memory cache
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 256;

/// Default cleanup interval in seconds for expired entries
pub const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 300; // 5 minutes

/// Session input snapshot TTL (24 hours) - older snapshots are treated as absent
pub const TTL_SESSION_SNAPSHOT_SECS: u64 = 86_400;

/// Cached muscle selection TTL (24 hours)
pub const TTL_MUSCLE_SELECTION_SECS: u64 = 86_400;

/// Cache scope used when no user or device identifier is configured
pub const DEFAULT_SESSION_SCOPE: &str = "local";

/// Cache key prefix for namespacing
pub const CACHE_KEY_PREFIX: &str = "workout:session:";
