// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Input limits, mapping defaults, sync timing, and environment variable names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Workout Session Engine Contributors

//! Constants module
//!
//! Constants are grouped by domain rather than kept in one flat list.

/// Cache-related constants (TTL, sizes, etc.)
pub mod cache;

/// Limits applied to raw session inputs
pub mod limits {
    /// Lowest value on every 1-6 panel scale
    pub const SCALE_MIN: u8 = 1;
    /// Highest value on every 1-6 panel scale
    pub const SCALE_MAX: u8 = 6;
    /// Shortest workout the generation service accepts, in minutes
    pub const MIN_DURATION_MINUTES: u32 = 5;
    /// Maximum length of the free-text customization panel, in characters
    pub const MAX_CUSTOMIZATION_LENGTH: usize = 500;
    /// Default cap on simultaneously selected muscle groups
    pub const DEFAULT_MAX_MUSCLE_GROUPS: usize = 3;
    /// Number of logical input panels tracked for completion
    pub const TOTAL_PANELS: usize = 11;
}

/// Defaults used when neither session nor profile supplies a value
pub mod defaults {
    /// Location sent when no panel or direct field names one
    pub const LOCATION: &str = "any";
    /// Goal tag used for unknown focus values
    pub const GOAL: &str = "general-fitness";
    /// Separator between custom note segments
    pub const NOTES_SEPARATOR: &str = "; ";
}

/// Weights for profile completeness scoring
pub mod profile_weights {
    /// Share of the score carried by the three required fields
    pub const REQUIRED_WEIGHT: f64 = 70.0;
    /// Share of the score carried by the five optional fields
    pub const OPTIONAL_WEIGHT: f64 = 30.0;
    /// Number of required profile fields
    pub const REQUIRED_FIELDS: usize = 3;
    /// Number of optional profile fields
    pub const OPTIONAL_FIELDS: usize = 5;
}

/// Muscle selection synchronization timing
pub mod muscle_sync {
    /// Debounce window before a changed selection is saved remotely
    pub const DEFAULT_DEBOUNCE_MS: u64 = 150;
    /// Service name used in remote error messages
    pub const REMOTE_SERVICE_NAME: &str = "muscle-selection";
}

/// HTTP client defaults for the remote persistence endpoint
pub mod http {
    /// Default request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
    /// Default connection timeout in seconds
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
}

/// Service identity used in structured logs
pub mod service_names {
    /// Engine service name
    pub const SESSION_ENGINE: &str = "workout-session-engine";
}

/// Environment variable names read by the configuration layer
pub mod env_config {
    /// Cache scope (user or device identifier)
    pub const SESSION_SCOPE: &str = "SESSION_SCOPE";
    /// Debounce window in milliseconds
    pub const MUSCLE_SYNC_DEBOUNCE_MS: &str = "MUSCLE_SYNC_DEBOUNCE_MS";
    /// Maximum selected muscle groups
    pub const MAX_MUSCLE_GROUPS: &str = "MAX_MUSCLE_GROUPS";
    /// Session snapshot TTL in seconds
    pub const SESSION_CACHE_TTL_SECS: &str = "SESSION_CACHE_TTL_SECS";
    /// In-memory cache capacity
    pub const CACHE_MAX_ENTRIES: &str = "CACHE_MAX_ENTRIES";
    /// Cache cleanup interval in seconds
    pub const CACHE_CLEANUP_INTERVAL_SECS: &str = "CACHE_CLEANUP_INTERVAL_SECS";
    /// Remote muscle selection endpoint
    pub const MUSCLE_SELECTION_API_URL: &str = "MUSCLE_SELECTION_API_URL";
    /// HTTP request timeout in seconds
    pub const HTTP_TIMEOUT_SECS: &str = "HTTP_TIMEOUT_SECS";
    /// HTTP connect timeout in seconds
    pub const HTTP_CONNECT_TIMEOUT_SECS: &str = "HTTP_CONNECT_TIMEOUT_SECS";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}
