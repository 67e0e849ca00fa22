// ABOUTME: In-memory muscle selection store used without a configured endpoint and in tests
// ABOUTME: Records every save and can inject failures or latency
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Workout Session Engine Contributors

use super::MuscleSelectionStore;
use crate::errors::{AppError, AppResult};
use session_core::constants::muscle_sync::REMOTE_SERVICE_NAME;
use session_core::models::MuscleSelectionData;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time;

#[derive(Debug, Default)]
struct MemoryState {
    data: Option<MuscleSelectionData>,
    saves: Vec<MuscleSelectionData>,
    fail_loads: bool,
    fail_saves: bool,
    save_delay: Option<Duration>,
}

/// Muscle selection store kept in process memory
///
/// Clones share state, so a test can hand one clone to the synchronizer and
/// inspect saves through another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMuscleStore {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryMuscleStore {
    /// Store pre-populated with a remote selection
    #[must_use]
    pub fn with_data(data: MuscleSelectionData) -> Self {
        Self {
            state: Arc::new(RwLock::new(MemoryState {
                data: Some(data),
                ..MemoryState::default()
            })),
        }
    }

    /// Number of completed saves
    pub async fn save_count(&self) -> usize {
        self.state.read().await.saves.len()
    }

    /// Every completed save in order
    pub async fn saves(&self) -> Vec<MuscleSelectionData> {
        self.state.read().await.saves.clone()
    }

    /// Currently persisted selection
    pub async fn current(&self) -> Option<MuscleSelectionData> {
        self.state.read().await.data.clone()
    }

    /// Make subsequent loads fail
    pub async fn fail_loads(&self, fail: bool) {
        self.state.write().await.fail_loads = fail;
    }

    /// Make subsequent saves fail
    pub async fn fail_saves(&self, fail: bool) {
        self.state.write().await.fail_saves = fail;
    }

    /// Delay every save by `delay` before it completes
    pub async fn set_save_delay(&self, delay: Option<Duration>) {
        self.state.write().await.save_delay = delay;
    }
}

#[async_trait::async_trait]
impl MuscleSelectionStore for InMemoryMuscleStore {
    async fn load(&self) -> AppResult<Option<MuscleSelectionData>> {
        let state = self.state.read().await;
        if state.fail_loads {
            return Err(AppError::external_service(REMOTE_SERVICE_NAME, "load failed"));
        }
        Ok(state.data.clone().filter(|data| !data.is_empty()))
    }

    async fn save(&self, data: &MuscleSelectionData) -> AppResult<()> {
        let (fail, delay) = {
            let state = self.state.read().await;
            (state.fail_saves, state.save_delay)
        };
        if let Some(delay) = delay {
            time::sleep(delay).await;
        }
        if fail {
            return Err(AppError::external_service(REMOTE_SERVICE_NAME, "save failed"));
        }
        let mut state = self.state.write().await;
        state.data = Some(data.clone());
        state.saves.push(data.clone());
        drop(state);
        Ok(())
    }
}
