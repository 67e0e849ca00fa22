// ABOUTME: HTTP client for the muscle selection persistence endpoint
// ABOUTME: GET loads and POST saves the selection wrapped in a {success, data} envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Workout Session Engine Contributors

use super::{MuscleSelectionStore, RemoteEnvelope};
use crate::errors::{AppError, AppResult};
use reqwest::{Client, ClientBuilder};
use session_core::constants::muscle_sync::REMOTE_SERVICE_NAME;
use session_core::models::MuscleSelectionData;
use std::time::Duration;
use tracing::{debug, warn};

/// Muscle selection store backed by the remote endpoint
#[derive(Debug, Clone)]
pub struct HttpMuscleStore {
    client: Client,
    url: String,
}

impl HttpMuscleStore {
    /// Store talking to `url` with the given timeouts
    #[must_use]
    pub fn new(url: impl Into<String>, timeout: Duration, connect_timeout: Duration) -> Self {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self::with_client(client, url)
    }

    /// Store reusing an existing client
    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Endpoint URL
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Interpret a GET envelope; anything but a successful, non-empty payload is "no data"
fn loaded_selection(envelope: RemoteEnvelope<MuscleSelectionData>) -> Option<MuscleSelectionData> {
    if !envelope.success {
        debug!(error = ?envelope.error, "Muscle selection endpoint reported no data");
        return None;
    }
    envelope.data.filter(|data| !data.is_empty())
}

#[async_trait::async_trait]
impl MuscleSelectionStore for HttpMuscleStore {
    async fn load(&self) -> AppResult<Option<MuscleSelectionData>> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Muscle selection load returned non-success status");
            return Ok(None);
        }
        let envelope: RemoteEnvelope<MuscleSelectionData> = response.json().await?;
        Ok(loaded_selection(envelope))
    }

    async fn save(&self, data: &MuscleSelectionData) -> AppResult<()> {
        let response = self.client.post(&self.url).json(data).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::external_service(
                REMOTE_SERVICE_NAME,
                format!("save failed with HTTP {status}"),
            ));
        }
        let envelope: RemoteEnvelope<serde_json::Value> = response.json().await?;
        if envelope.success {
            debug!(groups = data.selected_groups.len(), "Saved muscle selection");
            Ok(())
        } else {
            Err(AppError::external_service(
                REMOTE_SERVICE_NAME,
                envelope
                    .error
                    .unwrap_or_else(|| "save was not acknowledged".to_owned()),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_successful_envelope_yields_selection() {
        let envelope = serde_json::from_value(json!({
            "success": true,
            "data": { "selectedGroups": ["chest", "back"], "selectedMuscles": {} }
        }))
        .unwrap();
        let selection = loaded_selection(envelope).unwrap();
        assert_eq!(selection.selected_groups, vec!["chest", "back"]);
    }

    #[test]
    fn test_failed_or_empty_envelope_is_no_data() {
        let failed = serde_json::from_value(json!({ "success": false, "error": "not found" })).unwrap();
        assert!(loaded_selection(failed).is_none());

        let empty = serde_json::from_value(json!({
            "success": true,
            "data": { "selectedGroups": [], "selectedMuscles": {} }
        }))
        .unwrap();
        assert!(loaded_selection(empty).is_none());

        let missing = serde_json::from_value(json!({ "success": true })).unwrap();
        assert!(loaded_selection(missing).is_none());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_surfaces_error() {
        let store = HttpMuscleStore::new(
            "http://127.0.0.1:9/muscle-selection",
            Duration::from_millis(200),
            Duration::from_millis(200),
        );
        assert!(store.load().await.is_err());
        assert!(store.save(&MuscleSelectionData::default()).await.is_err());
    }
}
