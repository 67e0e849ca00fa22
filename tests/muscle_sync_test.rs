// ABOUTME: Integration tests for the debounced muscle selection synchronizer
// ABOUTME: Covers remote-wins initialization, cache adoption, debounce coalescing, cancellation, and failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Workout Session Engine Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use std::time::Duration;
use tokio::time;
use workout_session_engine::cache::{CacheKey, CacheProvider, CacheResource};
use workout_session_engine::errors::ErrorCode;
use workout_session_engine::models::{MuscleSelectionData, SessionInputs};
use workout_session_engine::muscle_store::InMemoryMuscleStore;
use workout_session_engine::muscle_sync::SyncState;

fn muscle_key() -> CacheKey {
    CacheKey::new(common::TEST_SCOPE, CacheResource::MuscleSelection)
}

fn session_key() -> CacheKey {
    CacheKey::new(common::TEST_SCOPE, CacheResource::SessionInputs)
}

const DAY: Duration = Duration::from_secs(86_400);

#[tokio::test(start_paused = true)]
async fn test_remote_selection_wins_over_cache() -> Result<()> {
    let cache = common::test_cache();
    cache.set(&muscle_key(), &common::groups(&["legs"]), DAY).await?;
    let remote = InMemoryMuscleStore::with_data(common::groups(&["chest", "back"]));
    let session = common::session_with(&cache, &remote);

    let state = session.initialize().await;

    assert_eq!(state, SyncState::Synced);
    let selection = session.muscle_sync().selection().await;
    assert_eq!(selection.selected_groups, vec!["chest", "back"]);
    assert_eq!(session.inputs().await.focus_area, vec!["chest", "back"]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_remote_selection_is_truncated_to_limit() -> Result<()> {
    let cache = common::test_cache();
    let remote =
        InMemoryMuscleStore::with_data(common::groups(&["chest", "back", "legs", "arms"]));
    let session = common::session_with(&cache, &remote);

    session.initialize().await;

    let selection = session.muscle_sync().selection().await;
    assert_eq!(selection.selected_groups, vec!["chest", "back", "legs"]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_cached_selection_adopted_when_session_has_no_muscle_data() -> Result<()> {
    let cache = common::test_cache();
    cache.set(&muscle_key(), &common::groups(&["legs"]), DAY).await?;
    let remote = InMemoryMuscleStore::default();
    let session = common::session_with(&cache, &remote);

    let state = session.initialize().await;

    assert_eq!(state, SyncState::Synced);
    assert_eq!(
        session.muscle_sync().selection().await.selected_groups,
        vec!["legs"]
    );
    assert_eq!(session.inputs().await.focus_area, vec!["legs"]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_cached_selection_ignored_when_session_has_muscle_data() -> Result<()> {
    let cache = common::test_cache();
    cache.set(&muscle_key(), &common::groups(&["legs"]), DAY).await?;
    let snapshot = SessionInputs {
        focus_area: vec!["core".to_owned()],
        ..SessionInputs::default()
    };
    cache.set(&session_key(), &snapshot, DAY).await?;
    let remote = InMemoryMuscleStore::default();
    let session = common::session_with(&cache, &remote);

    session.initialize().await;

    assert_eq!(session.inputs().await.focus_area, vec!["core"]);
    assert_eq!(
        session.muscle_sync().selection().await.selected_groups,
        vec!["core"]
    );
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_expired_cached_selection_is_ignored() -> Result<()> {
    let cache = common::test_cache();
    cache
        .set(&muscle_key(), &common::groups(&["legs"]), Duration::from_secs(10))
        .await?;
    time::advance(Duration::from_secs(11)).await;
    let remote = InMemoryMuscleStore::default();
    let session = common::session_with(&cache, &remote);

    let state = session.initialize().await;

    assert_eq!(state, SyncState::Empty);
    assert!(session.muscle_sync().selection().await.is_empty());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_rapid_toggles_coalesce_into_one_save() -> Result<()> {
    let cache = common::test_cache();
    let remote = InMemoryMuscleStore::default();
    let session = common::session_with(&cache, &remote);
    session.initialize().await;
    let sync = session.muscle_sync();

    assert!(sync.toggle_group("chest").await?);
    time::sleep(Duration::from_millis(50)).await;
    assert!(sync.toggle_group("back").await?);
    time::sleep(Duration::from_millis(50)).await;
    assert!(sync.toggle_muscle("legs", "quads").await?);

    // Nothing is saved or projected before the quiet period ends
    time::sleep(Duration::from_millis(100)).await;
    assert_eq!(remote.save_count().await, 0);
    assert!(session.inputs().await.focus_area.is_empty());

    sync.wait_idle().await;

    let saves = remote.saves().await;
    assert_eq!(saves.len(), 1);
    assert_eq!(saves[0].selected_groups, vec!["chest", "back", "legs"]);
    assert!(saves[0].selected_muscles["legs"].contains("quads"));
    assert_eq!(sync.state(), SyncState::Synced);

    let inputs = session.inputs().await;
    assert_eq!(inputs.focus_area, vec!["chest", "back", "legs"]);
    let targeting = inputs.muscle_targeting.unwrap();
    assert_eq!(targeting.primary_focus.as_deref(), Some("chest"));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_changes_are_cached_before_debounce_fires() -> Result<()> {
    let cache = common::test_cache();
    let remote = InMemoryMuscleStore::default();
    let session = common::session_with(&cache, &remote);
    session.initialize().await;

    session.muscle_sync().toggle_group("glutes").await?;

    let cached: Option<MuscleSelectionData> = cache.get(&muscle_key()).await?;
    assert_eq!(cached.unwrap().selected_groups, vec!["glutes"]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_fourth_group_is_rejected() -> Result<()> {
    let cache = common::test_cache();
    let remote = InMemoryMuscleStore::default();
    let session = common::session_with(&cache, &remote);
    session.initialize().await;
    let sync = session.muscle_sync();

    for group in ["chest", "back", "legs"] {
        sync.toggle_group(group).await?;
    }
    let error = sync.toggle_group("arms").await.unwrap_err();

    assert_eq!(error.code, ErrorCode::SelectionLimitExceeded);
    assert_eq!(sync.selection().await.selected_groups.len(), 3);

    // Deselecting frees a slot
    assert!(!sync.toggle_group("back").await?);
    assert!(sync.toggle_group("arms").await?);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_reset_cancels_pending_save() -> Result<()> {
    let cache = common::test_cache();
    let remote = InMemoryMuscleStore::default();
    let session = common::session_with(&cache, &remote);
    session.initialize().await;
    let sync = session.muscle_sync();

    sync.toggle_group("chest").await?;
    sync.reset().await;
    time::sleep(Duration::from_secs(1)).await;

    assert_eq!(remote.save_count().await, 0);
    assert_eq!(sync.state(), SyncState::Empty);
    assert!(sync.selection().await.is_empty());
    assert!(!session.inputs().await.has_muscle_data());
    assert!(!cache.exists(&muscle_key()).await?);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_reset_cancels_in_flight_save() -> Result<()> {
    let cache = common::test_cache();
    let remote = InMemoryMuscleStore::default();
    remote.set_save_delay(Some(Duration::from_millis(500))).await;
    let session = common::session_with(&cache, &remote);
    session.initialize().await;
    let sync = session.muscle_sync();

    sync.toggle_group("chest").await?;
    // Past the debounce, inside the slow save
    time::sleep(Duration::from_millis(200)).await;
    assert_eq!(sync.state(), SyncState::Saving);

    sync.reset().await;
    time::sleep(Duration::from_secs(1)).await;

    assert_eq!(remote.save_count().await, 0);
    assert_eq!(sync.state(), SyncState::Empty);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_new_change_does_not_cancel_in_flight_save() -> Result<()> {
    let cache = common::test_cache();
    let remote = InMemoryMuscleStore::default();
    remote.set_save_delay(Some(Duration::from_millis(500))).await;
    let session = common::session_with(&cache, &remote);
    session.initialize().await;
    let sync = session.muscle_sync();

    sync.toggle_group("chest").await?;
    time::sleep(Duration::from_millis(200)).await;
    sync.toggle_group("back").await?;
    time::sleep(Duration::from_secs(2)).await;

    let saves = remote.saves().await;
    assert_eq!(saves.len(), 2);
    assert_eq!(saves[0].selected_groups, vec!["chest"]);
    assert_eq!(saves[1].selected_groups, vec!["chest", "back"]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_reset_cancels_overlapping_saves() -> Result<()> {
    let cache = common::test_cache();
    let remote = InMemoryMuscleStore::default();
    remote.set_save_delay(Some(Duration::from_millis(500))).await;
    let session = common::session_with(&cache, &remote);
    session.initialize().await;
    let sync = session.muscle_sync();

    // Two saves in flight: chest from 150ms, chest and back from 350ms
    sync.toggle_group("chest").await?;
    time::sleep(Duration::from_millis(200)).await;
    sync.toggle_group("back").await?;
    time::sleep(Duration::from_millis(200)).await;
    assert_eq!(sync.state(), SyncState::Saving);

    sync.reset().await;
    time::sleep(Duration::from_secs(2)).await;

    assert_eq!(remote.save_count().await, 0);
    assert_eq!(remote.current().await, None);
    assert_eq!(sync.state(), SyncState::Empty);
    assert!(sync.selection().await.is_empty());

    // A fresh session on the same remote starts empty
    let reloaded = common::session_with(&common::test_cache(), &remote);
    assert_eq!(reloaded.initialize().await, SyncState::Empty);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_superseded_save_does_not_publish_state() -> Result<()> {
    let cache = common::test_cache();
    let remote = InMemoryMuscleStore::default();
    remote.set_save_delay(Some(Duration::from_millis(500))).await;
    let session = common::session_with(&cache, &remote);
    session.initialize().await;
    let sync = session.muscle_sync();

    sync.toggle_group("chest").await?;
    time::sleep(Duration::from_millis(200)).await;
    sync.toggle_group("back").await?;

    // The chest save lands at 650ms while the newer save runs until 850ms
    time::sleep(Duration::from_millis(500)).await;
    assert_eq!(remote.save_count().await, 1);
    assert_eq!(sync.state(), SyncState::Saving);

    time::sleep(Duration::from_millis(200)).await;
    assert_eq!(remote.save_count().await, 2);
    assert_eq!(sync.state(), SyncState::Synced);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_emptied_selection_ignores_earlier_save_outcome() -> Result<()> {
    let cache = common::test_cache();
    let remote = InMemoryMuscleStore::default();
    remote.set_save_delay(Some(Duration::from_millis(500))).await;
    let session = common::session_with(&cache, &remote);
    session.initialize().await;
    let sync = session.muscle_sync();

    sync.toggle_group("chest").await?;
    time::sleep(Duration::from_millis(200)).await;
    sync.toggle_group("chest").await?;
    time::sleep(Duration::from_secs(1)).await;

    assert_eq!(remote.save_count().await, 1);
    assert_eq!(sync.state(), SyncState::Empty);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_unchanged_selection_is_not_saved_again() -> Result<()> {
    let cache = common::test_cache();
    let remote = InMemoryMuscleStore::default();
    let session = common::session_with(&cache, &remote);
    session.initialize().await;
    let sync = session.muscle_sync();

    sync.toggle_group("arms").await?;
    sync.wait_idle().await;
    assert_eq!(remote.save_count().await, 1);

    sync.set_selection(common::groups(&["arms"])).await;
    assert!(sync.flush().await);
    sync.set_selection(common::groups(&["arms"])).await;
    sync.wait_idle().await;

    assert_eq!(remote.save_count().await, 1);
    assert_eq!(sync.state(), SyncState::Synced);
    assert_eq!(session.inputs().await.focus_area, vec!["arms"]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_save_failure_keeps_local_selection() -> Result<()> {
    let cache = common::test_cache();
    let remote = InMemoryMuscleStore::default();
    remote.fail_saves(true).await;
    let session = common::session_with(&cache, &remote);
    session.initialize().await;
    let sync = session.muscle_sync();

    sync.toggle_group("shoulders").await?;
    sync.wait_idle().await;

    assert_eq!(sync.state(), SyncState::Error);
    assert_eq!(sync.selection().await.selected_groups, vec!["shoulders"]);
    assert_eq!(session.inputs().await.focus_area, vec!["shoulders"]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_load_failure_falls_back_to_local_state() -> Result<()> {
    let cache = common::test_cache();
    cache.set(&muscle_key(), &common::groups(&["legs"]), DAY).await?;
    let remote = InMemoryMuscleStore::default();
    remote.fail_loads(true).await;
    let session = common::session_with(&cache, &remote);

    let state = session.initialize().await;

    assert_eq!(state, SyncState::Error);
    assert_eq!(
        session.muscle_sync().selection().await.selected_groups,
        vec!["legs"]
    );
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_emptied_selection_is_projected_but_not_saved() -> Result<()> {
    let cache = common::test_cache();
    let remote = InMemoryMuscleStore::default();
    let session = common::session_with(&cache, &remote);
    session.initialize().await;
    let sync = session.muscle_sync();

    sync.toggle_group("chest").await?;
    sync.wait_idle().await;
    assert_eq!(remote.save_count().await, 1);

    sync.toggle_group("chest").await?;
    sync.wait_idle().await;

    assert_eq!(remote.save_count().await, 1);
    assert_eq!(sync.state(), SyncState::Empty);
    assert!(!session.inputs().await.has_muscle_data());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_flush_runs_pending_action_immediately() -> Result<()> {
    let cache = common::test_cache();
    let remote = InMemoryMuscleStore::default();
    let session = common::session_with(&cache, &remote);
    session.initialize().await;
    let sync = session.muscle_sync();

    assert!(!sync.flush().await);
    sync.toggle_group("core").await?;
    assert!(sync.flush().await);

    assert_eq!(remote.save_count().await, 1);
    assert_eq!(session.inputs().await.focus_area, vec!["core"]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_state_changes_are_observable() -> Result<()> {
    let cache = common::test_cache();
    let remote = InMemoryMuscleStore::default();
    let session = common::session_with(&cache, &remote);
    session.initialize().await;
    let sync = session.muscle_sync();
    let mut states = sync.subscribe();

    sync.toggle_group("chest").await?;
    sync.wait_idle().await;

    assert!(states.has_changed()?);
    assert_eq!(*states.borrow_and_update(), SyncState::Synced);
    Ok(())
}
