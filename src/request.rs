// ABOUTME: Offline resolution requests assembled from JSON files
// ABOUTME: Used by the session-resolve binary to resolve, validate, and score a session without a live store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Workout Session Engine Contributors

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use session_core::models::{
    DirectParameters, MuscleSelectionData, ProfileState, SessionInputs, UserProfile,
};
use session_intelligence::profile::create_profile_context;
use session_intelligence::validation::{completion, missing_required_fields};
use session_intelligence::{resolution, ResolvedParameters, SessionValidator, ValidationResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Everything needed to resolve one session
///
/// ```json
/// {
///   "session": { "todaysFocus": "strength", "timeConstraintsToday": 30 },
///   "direct": { "location": "gym" },
///   "profile": { "fitnessLevel": "intermediate", "goals": ["muscle-gain"] },
///   "muscles": { "selectedGroups": ["chest"], "selectedMuscles": {} }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveRequest {
    /// Panel inputs
    pub session: SessionInputs,
    /// Directly supplied parameters
    pub direct: DirectParameters,
    /// Loaded user profile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
    /// Muscle selection
    pub muscles: MuscleSelectionData,
}

/// Input files for a request
///
/// `request` holds a combined document; each other path replaces the matching
/// part of it.
#[derive(Debug, Clone, Default)]
pub struct RequestFiles {
    /// Combined request document
    pub request: Option<PathBuf>,
    /// `SessionInputs` document
    pub session: Option<PathBuf>,
    /// `DirectParameters` document
    pub direct: Option<PathBuf>,
    /// `UserProfile` document
    pub profile: Option<PathBuf>,
    /// `MuscleSelectionData` document
    pub muscles: Option<PathBuf>,
}

impl RequestFiles {
    /// Read and merge every configured file
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or is not valid JSON for its part
    pub async fn load(&self) -> Result<ResolveRequest> {
        let mut request = match &self.request {
            Some(path) => read_json::<ResolveRequest>(path).await?,
            None => ResolveRequest::default(),
        };
        if let Some(path) = &self.session {
            request.session = read_json(path).await?;
        }
        if let Some(path) = &self.direct {
            request.direct = read_json(path).await?;
        }
        if let Some(path) = &self.profile {
            request.profile = Some(read_json(path).await?);
        }
        if let Some(path) = &self.muscles {
            request.muscles = read_json(path).await?;
        }
        Ok(request)
    }
}

impl ResolveRequest {
    /// Load a combined request document
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        read_json(path.as_ref()).await
    }

    /// Resolve the canonical parameters
    #[must_use]
    pub fn resolve(&self) -> ResolvedParameters {
        let profile = self
            .profile
            .clone()
            .map(ProfileState::loaded)
            .and_then(|state| create_profile_context(&state));
        resolution::resolve(&self.session, &self.direct, profile.as_ref(), &self.muscles)
    }

    /// Validate the raw session inputs
    #[must_use]
    pub fn validate(&self, validator: &SessionValidator) -> ValidationResult {
        validator.validate(&self.session)
    }

    /// Percentage of panels with a value
    #[must_use]
    pub fn completion(&self) -> u8 {
        completion(&self.session, &self.direct)
    }

    /// Required fields still unset
    #[must_use]
    pub fn missing_required_fields(&self) -> Vec<String> {
        missing_required_fields(&self.session, &self.direct)
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    debug!(path = %path.display(), bytes = raw.len(), "Read request file");
    serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {}", path.display()))
}
