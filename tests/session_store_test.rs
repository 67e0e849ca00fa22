// ABOUTME: Integration tests for the session input store
// ABOUTME: Covers partial merges, rejected updates, snapshot restore across reloads, and reset
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Workout Session Engine Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use serde_json::json;
use std::time::Duration;
use tokio::time;
use workout_session_engine::cache::{CacheProvider, InMemoryCache};
use workout_session_engine::errors::ErrorCode;
use workout_session_engine::models::{SessionField, SessionInputs};
use workout_session_engine::store::{SessionCommand, SessionInputStore};

const SNAPSHOT_TTL: Duration = Duration::from_secs(86_400);

fn store_over(cache: &InMemoryCache) -> SessionInputStore {
    SessionInputStore::new(cache.clone(), common::TEST_SCOPE, SNAPSHOT_TTL)
}

#[tokio::test]
async fn test_update_preserves_unrelated_fields() -> Result<()> {
    let cache = common::test_cache();
    let mut store = store_over(&cache);

    store.set_focus("strength").await?;
    store.set_duration(30).await?;
    store.set_equipment(["dumbbells", "bench"]).await?;
    let inputs = store.set_energy(4).await?.clone();

    assert_eq!(inputs.todays_focus.as_deref(), Some("strength"));
    assert_eq!(inputs.time_constraints_today, Some(30));
    assert_eq!(inputs.equipment_available_today.len(), 2);
    assert_eq!(inputs.energy_level, Some(4));
    assert_eq!(inputs.mood_level, None);
    Ok(())
}

#[tokio::test]
async fn test_oversized_customization_is_rejected_without_change() -> Result<()> {
    let cache = common::test_cache();
    let mut store = store_over(&cache);
    store.set_customization("keep it short").await?;

    let error = store.set_customization("x".repeat(501)).await.unwrap_err();

    assert_eq!(error.code, ErrorCode::ValueOutOfRange);
    assert_eq!(
        store.inputs().workout_customization.as_deref(),
        Some("keep it short")
    );
    Ok(())
}

#[tokio::test]
async fn test_customization_at_limit_is_accepted() -> Result<()> {
    let cache = common::test_cache();
    let mut store = store_over(&cache);
    let text = "é".repeat(500);

    store.set_customization(text.clone()).await?;

    assert_eq!(store.inputs().workout_customization, Some(text));
    Ok(())
}

#[tokio::test]
async fn test_set_field_by_key() -> Result<()> {
    let cache = common::test_cache();
    let mut store = store_over(&cache);

    store.set_field("todaysFocus", json!("endurance")).await?;
    store.set_field("healthRestrictionsToday", json!(["knee"])).await?;
    store.set_field("todaysFocus", json!(null)).await?;

    assert_eq!(store.inputs().todays_focus, None);
    assert!(store.inputs().health_restrictions_today.contains("knee"));

    let unknown = store.set_field("favouriteColour", json!("blue")).await;
    assert!(unknown.is_err());
    let malformed = store.set_field("energyLevel", json!("lots")).await;
    assert!(malformed.is_err());
    Ok(())
}

#[tokio::test]
async fn test_snapshot_survives_reload() -> Result<()> {
    let cache = common::test_cache();
    {
        let mut store = store_over(&cache);
        store.set_focus("mobility").await?;
        store.set_sleep(2).await?;
    }

    let mut reloaded = store_over(&cache);
    assert!(reloaded.inputs().is_empty());
    assert!(reloaded.restore().await);
    assert_eq!(reloaded.inputs().todays_focus.as_deref(), Some("mobility"));
    assert_eq!(reloaded.inputs().sleep_quality, Some(2));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_expired_snapshot_is_not_restored() -> Result<()> {
    let cache = common::test_cache();
    let mut store = SessionInputStore::new(cache.clone(), common::TEST_SCOPE, Duration::from_secs(60));
    store.set_focus("mobility").await?;

    time::advance(Duration::from_secs(61)).await;

    let mut reloaded = store_over(&cache);
    assert!(!reloaded.restore().await);
    assert_eq!(reloaded.inputs(), &SessionInputs::default());
    Ok(())
}

#[tokio::test]
async fn test_reset_clears_inputs_and_snapshot() -> Result<()> {
    let cache = common::test_cache();
    let mut store = store_over(&cache);
    store.set_focus("strength").await?;
    store.set_mood(5).await?;

    store.reset().await;

    assert!(store.inputs().is_empty());
    assert!(!cache.exists(store.cache_key()).await?);
    let mut reloaded = store_over(&cache);
    assert!(!reloaded.restore().await);
    Ok(())
}

#[tokio::test]
async fn test_clear_single_field() -> Result<()> {
    let cache = common::test_cache();
    let mut store = store_over(&cache);
    store.set_location("gym").await?;
    store.set_intensity(3).await?;

    store.clear_field(SessionField::LocationToday).await?;

    assert_eq!(store.inputs().location_today, None);
    assert_eq!(store.inputs().daily_intensity_level, Some(3));
    Ok(())
}

#[tokio::test]
async fn test_muscle_projection_only_touches_muscle_fields() -> Result<()> {
    let cache = common::test_cache();
    let mut store = store_over(&cache);
    store.set_focus("strength").await?;

    let selection = common::groups(&["chest", "back"]);
    store.apply_muscle_projection(&selection).await?;

    let inputs = store.inputs();
    assert_eq!(inputs.todays_focus.as_deref(), Some("strength"));
    assert_eq!(inputs.focus_area, vec!["chest", "back"]);
    let targeting = inputs.muscle_targeting.as_ref().unwrap();
    assert_eq!(targeting.primary_focus.as_deref(), Some("chest"));

    store
        .dispatch(SessionCommand::project(&common::groups(&[])))
        .await?;
    assert!(!store.inputs().has_muscle_data());
    Ok(())
}
