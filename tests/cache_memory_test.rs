// ABOUTME: Integration tests for the in-memory session cache
// ABOUTME: Tests TTL expiration on a paused clock, capacity limits, and key scoping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Workout Session Engine Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use anyhow::Result;
use std::time::Duration;
use tokio::time;
use workout_session_engine::cache::{
    CacheConfig, CacheKey, CacheProvider, CacheResource, InMemoryCache,
};
use workout_session_engine::models::{MuscleSelectionData, SessionInputs};

fn create_test_cache(max_entries: usize) -> InMemoryCache {
    InMemoryCache::with_config(&CacheConfig {
        max_entries,
        enable_background_cleanup: false,
        ..CacheConfig::default()
    })
}

fn inputs_with_focus(focus: &str) -> SessionInputs {
    SessionInputs {
        todays_focus: Some(focus.to_owned()),
        ..SessionInputs::default()
    }
}

#[tokio::test]
async fn test_cache_set_and_get() -> Result<()> {
    let cache = create_test_cache(16);
    let key = CacheKey::new("device-1", CacheResource::SessionInputs);
    let inputs = inputs_with_focus("strength");

    cache.set(&key, &inputs, Duration::from_secs(60)).await?;

    let retrieved: Option<SessionInputs> = cache.get(&key).await?;
    assert_eq!(retrieved, Some(inputs));
    assert!(cache.exists(&key).await?);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_cache_expiration() -> Result<()> {
    let cache = create_test_cache(16);
    let key = CacheKey::new("device-1", CacheResource::SessionInputs);
    cache
        .set(&key, &inputs_with_focus("mobility"), Duration::from_secs(10))
        .await?;

    time::advance(Duration::from_secs(9)).await;
    assert!(cache.exists(&key).await?);
    let remaining = cache.ttl(&key).await?.unwrap();
    assert!(remaining <= Duration::from_secs(1));

    time::advance(Duration::from_secs(2)).await;
    let retrieved: Option<SessionInputs> = cache.get(&key).await?;
    assert_eq!(retrieved, None);
    assert!(!cache.exists(&key).await?);
    assert_eq!(cache.ttl(&key).await?, None);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_purge_expired_drops_only_stale_entries() -> Result<()> {
    let cache = create_test_cache(16);
    let short = CacheKey::new("device-1", CacheResource::SessionInputs);
    let long = CacheKey::new("device-1", CacheResource::MuscleSelection);
    cache
        .set(&short, &inputs_with_focus("strength"), Duration::from_secs(1))
        .await?;
    cache
        .set(&long, &MuscleSelectionData::default(), Duration::from_secs(100))
        .await?;

    time::advance(Duration::from_secs(5)).await;
    assert_eq!(cache.purge_expired().await, 1);
    assert_eq!(cache.len().await, 1);
    assert!(cache.exists(&long).await?);
    Ok(())
}

#[tokio::test]
async fn test_lru_eviction_at_capacity() -> Result<()> {
    let cache = create_test_cache(2);
    let ttl = Duration::from_secs(60);
    let first = CacheKey::new("device-1", CacheResource::SessionInputs);
    let second = CacheKey::new("device-2", CacheResource::SessionInputs);
    let third = CacheKey::new("device-3", CacheResource::SessionInputs);

    cache.set(&first, &inputs_with_focus("a"), ttl).await?;
    cache.set(&second, &inputs_with_focus("b"), ttl).await?;
    // Touch the first key so the second becomes least recently used
    let _: Option<SessionInputs> = cache.get(&first).await?;
    cache.set(&third, &inputs_with_focus("c"), ttl).await?;

    assert!(cache.exists(&first).await?);
    assert!(!cache.exists(&second).await?);
    assert!(cache.exists(&third).await?);
    Ok(())
}

#[tokio::test]
async fn test_keys_are_scoped_by_device_and_resource() -> Result<()> {
    let cache = create_test_cache(16);
    let ttl = Duration::from_secs(60);
    let mine = CacheKey::new("device-1", CacheResource::SessionInputs);
    let theirs = CacheKey::new("device-2", CacheResource::SessionInputs);
    let muscles = CacheKey::new("device-1", CacheResource::MuscleSelection);

    cache.set(&mine, &inputs_with_focus("strength"), ttl).await?;

    assert!(!cache.exists(&theirs).await?);
    assert!(!cache.exists(&muscles).await?);
    assert_eq!(mine.to_string(), "workout:session:device-1:session_inputs");
    Ok(())
}

#[tokio::test]
async fn test_invalidate_and_clear_all() -> Result<()> {
    let cache = create_test_cache(16);
    let ttl = Duration::from_secs(60);
    let inputs = CacheKey::new("device-1", CacheResource::SessionInputs);
    let muscles = CacheKey::new("device-1", CacheResource::MuscleSelection);
    cache.set(&inputs, &inputs_with_focus("strength"), ttl).await?;
    cache.set(&muscles, &MuscleSelectionData::default(), ttl).await?;

    cache.invalidate(&inputs).await?;
    assert!(!cache.exists(&inputs).await?);
    assert!(cache.exists(&muscles).await?);

    cache.clear_all().await?;
    assert!(cache.is_empty().await);
    Ok(())
}

#[tokio::test]
async fn test_clones_share_entries() -> Result<()> {
    let cache = create_test_cache(16);
    let clone = cache.clone();
    let key = CacheKey::new("device-1", CacheResource::SessionInputs);

    clone
        .set(&key, &inputs_with_focus("endurance"), Duration::from_secs(60))
        .await?;
    let retrieved: Option<SessionInputs> = cache.get(&key).await?;
    assert_eq!(retrieved, Some(inputs_with_focus("endurance")));
    Ok(())
}
