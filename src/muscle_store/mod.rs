// ABOUTME: Remote persistence abstraction for the muscle-targeting selection
// ABOUTME: HTTP implementation for the real endpoint, in-memory implementation for local use and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Workout Session Engine Contributors

/// HTTP endpoint implementation
pub mod http;
/// In-memory implementation
pub mod memory;

pub use http::HttpMuscleStore;
pub use memory::InMemoryMuscleStore;

use crate::config::RemoteStoreConfig;
use crate::errors::AppResult;
use serde::{Deserialize, Serialize};
use session_core::models::MuscleSelectionData;
use std::sync::Arc;
use tracing::info;

/// Remote store for the muscle selection
///
/// `load` returning `Ok(None)` means "no remote data", which the synchronizer
/// treats the same as an empty selection.
#[async_trait::async_trait]
pub trait MuscleSelectionStore: Send + Sync {
    /// Fetch the persisted selection
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint cannot be reached or answers with a malformed body
    async fn load(&self) -> AppResult<Option<MuscleSelectionData>>;

    /// Persist the selection
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint cannot be reached or reports failure
    async fn save(&self, data: &MuscleSelectionData) -> AppResult<()>;
}

/// `{success, data}` envelope used by the persistence endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEnvelope<T> {
    /// Whether the endpoint handled the request
    #[serde(default)]
    pub success: bool,
    /// Payload on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Failure reason, when the endpoint gives one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Build the store selected by configuration
///
/// An endpoint URL selects the HTTP store; otherwise selections live in memory.
#[must_use]
pub fn from_config(config: &RemoteStoreConfig) -> Arc<dyn MuscleSelectionStore> {
    match &config.api_url {
        Some(url) => {
            info!(url = %url, "Using HTTP muscle selection store");
            Arc::new(HttpMuscleStore::new(
                url.clone(),
                config.timeout,
                config.connect_timeout,
            ))
        }
        None => {
            info!("Using in-memory muscle selection store");
            Arc::new(InMemoryMuscleStore::default())
        }
    }
}
