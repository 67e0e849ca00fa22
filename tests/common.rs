// ABOUTME: Shared helpers for integration tests
// ABOUTME: Builds test configurations, caches, and sessions wired to an in-memory muscle store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Workout Session Engine Contributors

#![allow(dead_code)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::Arc;
use std::time::Duration;
use workout_session_engine::cache::{CacheConfig, InMemoryCache};
use workout_session_engine::config::{EngineConfig, Environment, MuscleSyncConfig};
use workout_session_engine::models::MuscleSelectionData;
use workout_session_engine::muscle_store::InMemoryMuscleStore;
use workout_session_engine::session::WorkoutSession;

pub const TEST_SCOPE: &str = "device-under-test";

/// Configuration with background cleanup off and the default 150ms debounce
pub fn test_config() -> EngineConfig {
    EngineConfig {
        environment: Environment::Testing,
        session_scope: TEST_SCOPE.to_owned(),
        muscle_sync: MuscleSyncConfig {
            debounce: Duration::from_millis(150),
            max_groups: 3,
        },
        cache: CacheConfig {
            enable_background_cleanup: false,
            ..CacheConfig::default()
        },
        ..EngineConfig::default()
    }
}

/// Cache without a background cleanup task
pub fn test_cache() -> InMemoryCache {
    InMemoryCache::with_config(&test_config().cache)
}

/// Session over `cache` persisting muscles through `remote`
pub fn session_with(cache: &InMemoryCache, remote: &InMemoryMuscleStore) -> WorkoutSession {
    WorkoutSession::new(cache.clone(), Arc::new(remote.clone()), &test_config())
}

/// Selection of the given groups with no specific muscles
pub fn groups(names: &[&str]) -> MuscleSelectionData {
    MuscleSelectionData {
        selected_groups: names.iter().map(|name| (*name).to_owned()).collect(),
        ..MuscleSelectionData::default()
    }
}
