// ABOUTME: Muscle selection synchronizer with debounced remote saves and remote-wins initialization
// ABOUTME: Projects every settled selection into the session inputs and publishes its state on a watch channel
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Workout Session Engine Contributors

//! # Muscle Selection Synchronizer
//!
//! Owns the muscle-targeting selection for one session.
//!
//! - **Initialization**: a non-empty remote selection always wins. Otherwise a
//!   cached copy is adopted only if the session carries no muscle data yet.
//! - **Changes**: each change refreshes the cached copy and (re)arms a debounce
//!   timer. When the timer fires, a non-empty selection is saved remotely
//!   (fire-and-forget) and the selection is projected into `SessionInputs`.
//! - **Cancellation**: a new change aborts only the pending timer; `reset`
//!   aborts the pending timer and every in-flight save.
//! - **Ordering**: each save carries a generation. Only the latest generation
//!   publishes `Synced` or `Error`; an unchanged selection is not saved twice.

use crate::cache::{CacheKey, CacheProvider, CacheResource, InMemoryCache};
use crate::config::MuscleSyncConfig;
use crate::errors::AppResult;
use crate::muscle_store::MuscleSelectionStore;
use crate::store::SessionInputStore;
use serde::{Deserialize, Serialize};
use session_core::models::{MuscleSelectionData, SessionInputs};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, info, warn};

/// Session store shared between the facade and the synchronizer
pub type SharedStore<C = InMemoryCache> = Arc<RwLock<SessionInputStore<C>>>;

/// Observable synchronizer state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    /// Nothing selected
    Empty,
    /// Initial remote load in progress
    Loading,
    /// Local selection matches what was last persisted or loaded
    Synced,
    /// A remote save is in flight
    Saving,
    /// The last remote load or save failed; local state is kept
    Error,
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Loading => write!(f, "loading"),
            Self::Synced => write!(f, "synced"),
            Self::Saving => write!(f, "saving"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// In-flight saves and the generation that may still publish their outcome
#[derive(Default)]
struct SaveTracker {
    generation: u64,
    last_scheduled: Option<MuscleSelectionData>,
    tasks: Vec<JoinHandle<()>>,
}

impl SaveTracker {
    /// Supersede every outstanding save
    fn advance(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    fn abort_all(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

struct SyncInner<C: CacheProvider> {
    selection: RwLock<MuscleSelectionData>,
    store: SharedStore<C>,
    remote: Arc<dyn MuscleSelectionStore>,
    cache: C,
    cache_key: CacheKey,
    cache_ttl: Duration,
    config: MuscleSyncConfig,
    state_tx: watch::Sender<SyncState>,
    pending: Mutex<Option<JoinHandle<()>>>,
    saves: Mutex<SaveTracker>,
}

impl<C: CacheProvider + 'static> SyncInner<C> {
    fn publish(&self, state: SyncState) {
        let previous = self.state_tx.send_replace(state);
        if previous != state {
            debug!(from = %previous, to = %state, "Muscle sync state changed");
        }
    }

    /// The debounced action: save a non-empty selection, then project it
    ///
    /// Runs under the save tracker lock so it cannot interleave with `reset`.
    async fn settle(inner: &Arc<Self>) {
        let mut saves = inner.saves.lock().await;
        let selection = inner.selection.read().await.clone();

        if selection.is_empty() {
            saves.advance();
            saves.last_scheduled = None;
            inner.publish(SyncState::Empty);
        } else if saves.last_scheduled.as_ref() == Some(&selection) {
            debug!("Muscle selection unchanged since last save");
        } else {
            let generation = saves.advance();
            saves.last_scheduled = Some(selection.clone());
            saves.tasks.retain(|task| !task.is_finished());
            inner.publish(SyncState::Saving);

            let task_inner = Arc::clone(inner);
            let to_save = selection.clone();
            saves.tasks.push(tokio::spawn(async move {
                let result = task_inner.remote.save(&to_save).await;
                let mut saves = task_inner.saves.lock().await;
                if saves.generation != generation {
                    debug!(generation, "Superseded muscle selection save finished");
                    return;
                }
                match result {
                    Ok(()) => task_inner.publish(SyncState::Synced),
                    Err(error) => {
                        warn!(error = %error, "Muscle selection save failed; keeping local selection");
                        saves.last_scheduled = None;
                        task_inner.publish(SyncState::Error);
                    }
                }
            }));
        }

        Self::project(inner, &selection).await;
    }

    async fn project(inner: &Arc<Self>, selection: &MuscleSelectionData) {
        let mut store = inner.store.write().await;
        if let Err(error) = store.apply_muscle_projection(selection).await {
            warn!(error = %error, "Failed to project muscle selection into session inputs");
        }
    }

    async fn write_cache(&self, selection: &MuscleSelectionData) {
        if let Err(error) = self
            .cache
            .set(&self.cache_key, selection, self.cache_ttl)
            .await
        {
            warn!(key = %self.cache_key, error = %error, "Failed to cache muscle selection");
        }
    }
}

/// Debounced synchronizer for the muscle selection
pub struct MuscleSelectionSync<C: CacheProvider + 'static = InMemoryCache> {
    inner: Arc<SyncInner<C>>,
}

impl<C: CacheProvider + 'static> Clone for MuscleSelectionSync<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: CacheProvider + 'static> MuscleSelectionSync<C> {
    /// Synchronizer projecting into `store` and persisting through `remote`
    ///
    /// The local copy is cached under `scope` for `cache_ttl`.
    pub fn new(
        store: SharedStore<C>,
        remote: Arc<dyn MuscleSelectionStore>,
        cache: C,
        scope: impl Into<String>,
        cache_ttl: Duration,
        config: MuscleSyncConfig,
    ) -> Self {
        let (state_tx, _) = watch::channel(SyncState::Empty);
        Self {
            inner: Arc::new(SyncInner {
                selection: RwLock::new(MuscleSelectionData::default()),
                store,
                remote,
                cache,
                cache_key: CacheKey::new(scope, CacheResource::MuscleSelection),
                cache_ttl,
                config,
                state_tx,
                pending: Mutex::new(None),
                saves: Mutex::new(SaveTracker::default()),
            }),
        }
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> SyncState {
        *self.inner.state_tx.borrow()
    }

    /// Receiver notified on every state change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SyncState> {
        self.inner.state_tx.subscribe()
    }

    /// Current selection
    pub async fn selection(&self) -> MuscleSelectionData {
        self.inner.selection.read().await.clone()
    }

    /// Maximum selectable groups
    #[must_use]
    pub fn max_groups(&self) -> usize {
        self.inner.config.max_groups
    }

    /// Load the selection at session start
    ///
    /// Remote data wins over the cached copy. The cached copy is adopted only
    /// when the session has no muscle data; otherwise the session's own
    /// targeting seeds the selection.
    pub async fn initialize(&self) -> SyncState {
        let inner = &self.inner;
        inner.publish(SyncState::Loading);
        let max_groups = inner.config.max_groups;

        let mut load_failed = false;
        match inner.remote.load().await {
            Ok(Some(remote)) if !remote.is_empty() => {
                let remote = remote.normalized(max_groups);
                info!(groups = remote.selected_groups.len(), "Adopted remote muscle selection");
                *inner.selection.write().await = remote.clone();
                inner.write_cache(&remote).await;
                SyncInner::project(inner, &remote).await;
                inner.publish(SyncState::Synced);
                return SyncState::Synced;
            }
            Ok(_) => debug!("No remote muscle selection"),
            Err(error) => {
                warn!(error = %error, "Muscle selection load failed; falling back to local state");
                load_failed = true;
            }
        }

        let session_has_muscles = inner.store.read().await.inputs().has_muscle_data();
        let adopted = if session_has_muscles {
            let inputs = inner.store.read().await.inputs().clone();
            selection_from_session(&inputs).normalized(max_groups)
        } else {
            match inner.cache.get::<MuscleSelectionData>(&inner.cache_key).await {
                Ok(Some(cached)) if !cached.is_empty() => {
                    let cached = cached.normalized(max_groups);
                    info!(groups = cached.selected_groups.len(), "Adopted cached muscle selection");
                    SyncInner::project(inner, &cached).await;
                    cached
                }
                Ok(_) => MuscleSelectionData::default(),
                Err(error) => {
                    warn!(error = %error, "Ignoring unreadable cached muscle selection");
                    MuscleSelectionData::default()
                }
            }
        };

        let state = if load_failed {
            SyncState::Error
        } else if adopted.is_empty() {
            SyncState::Empty
        } else {
            SyncState::Synced
        };
        *inner.selection.write().await = adopted;
        inner.publish(state);
        state
    }

    /// Toggle a muscle group, returning whether it is selected afterwards
    ///
    /// # Errors
    ///
    /// Returns `SelectionLimitExceeded` when selecting would exceed the maximum;
    /// nothing is scheduled in that case
    pub async fn toggle_group(&self, group: &str) -> AppResult<bool> {
        let (selected, snapshot) = {
            let mut selection = self.inner.selection.write().await;
            let selected = selection.toggle_group(group, self.inner.config.max_groups)?;
            (selected, selection.clone())
        };
        debug!(group, selected, "Toggled muscle group");
        self.changed(&snapshot).await;
        Ok(selected)
    }

    /// Toggle a specific muscle, returning whether it is selected afterwards
    ///
    /// # Errors
    ///
    /// Returns `SelectionLimitExceeded` when the implicit group selection would
    /// exceed the maximum
    pub async fn toggle_muscle(&self, group: &str, muscle: &str) -> AppResult<bool> {
        let (selected, snapshot) = {
            let mut selection = self.inner.selection.write().await;
            let selected =
                selection.toggle_muscle(group, muscle, self.inner.config.max_groups)?;
            (selected, selection.clone())
        };
        debug!(group, muscle, selected, "Toggled muscle");
        self.changed(&snapshot).await;
        Ok(selected)
    }

    /// Replace the whole selection, truncated to the maximum
    pub async fn set_selection(&self, data: MuscleSelectionData) {
        let data = data.normalized(self.inner.config.max_groups);
        *self.inner.selection.write().await = data.clone();
        self.changed(&data).await;
    }

    /// Clear the selection and its cached copy, cancelling pending and in-flight saves
    pub async fn reset(&self) {
        let inner = &self.inner;
        if let Some(handle) = inner.pending.lock().await.take() {
            handle.abort();
        }
        let mut saves = inner.saves.lock().await;
        saves.advance();
        saves.last_scheduled = None;
        saves.abort_all();

        *inner.selection.write().await = MuscleSelectionData::default();
        if let Err(error) = inner.cache.invalidate(&inner.cache_key).await {
            warn!(key = %inner.cache_key, error = %error, "Failed to drop cached muscle selection");
        }
        SyncInner::project(inner, &MuscleSelectionData::default()).await;
        inner.publish(SyncState::Empty);
        drop(saves);
        info!("Muscle selection reset");
    }

    /// Run a pending debounced action now and wait for its save
    ///
    /// A timer that already fired may be mid-save; the selection is then
    /// unchanged and not saved again. Returns `false` when nothing was pending.
    pub async fn flush(&self) -> bool {
        let Some(pending) = self.inner.pending.lock().await.take() else {
            return false;
        };
        if pending.is_finished() {
            return false;
        }
        pending.abort();
        SyncInner::settle(&self.inner).await;
        self.wait_for_save().await;
        true
    }

    /// Wait for the pending debounce and every in-flight save to complete
    pub async fn wait_idle(&self) {
        let pending = self.inner.pending.lock().await.take();
        if let Some(handle) = pending {
            if let Err(error) = handle.await {
                debug!(error = %error, "Pending muscle sync action did not complete");
            }
        }
        self.wait_for_save().await;
    }

    async fn wait_for_save(&self) {
        let tasks: Vec<_> = self.inner.saves.lock().await.tasks.drain(..).collect();
        for handle in tasks {
            if let Err(error) = handle.await {
                debug!(error = %error, "In-flight muscle selection save did not complete");
            }
        }
    }

    /// Refresh the cached copy and re-arm the debounce timer
    async fn changed(&self, snapshot: &MuscleSelectionData) {
        let inner = &self.inner;
        inner.write_cache(snapshot).await;

        let mut pending = inner.pending.lock().await;
        if let Some(previous) = pending.take() {
            previous.abort();
        }
        let task_inner = Arc::clone(inner);
        let debounce = inner.config.debounce;
        *pending = Some(tokio::spawn(async move {
            time::sleep(debounce).await;
            SyncInner::settle(&task_inner).await;
        }));
    }
}

/// Selection implied by muscle data already present on the session
fn selection_from_session(inputs: &SessionInputs) -> MuscleSelectionData {
    let targeting = inputs.muscle_targeting.clone().unwrap_or_default();
    let selected_groups = if targeting.target_groups.is_empty() {
        inputs.focus_area.clone()
    } else {
        targeting.target_groups
    };
    MuscleSelectionData {
        selected_groups,
        selected_muscles: targeting.specific_muscles,
    }
}
