// ABOUTME: WorkoutSession facade combining the session store, muscle synchronizer, and profile state
// ABOUTME: Exposes resolution, validation, and completion over the live session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Workout Session Engine Contributors

use crate::cache::{CacheProvider, CacheResource, InMemoryCache};
use crate::config::EngineConfig;
use crate::errors::{AppError, AppResult};
use crate::muscle_store::{self, MuscleSelectionStore};
use crate::muscle_sync::{MuscleSelectionSync, SharedStore, SyncState};
use crate::store::{SessionCommand, SessionInputStore};
use serde_json::Value;
use session_core::models::{DirectParameters, ProfileState, SessionInputs};
use session_intelligence::profile::{
    create_profile_context, missing_profile_fields, profile_completeness,
};
use session_intelligence::validation::{completion, missing_required_fields};
use session_intelligence::{resolution, ResolvedParameters, SessionValidator, ValidationResult};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument};

/// One workout-building session
///
/// Panels write through [`WorkoutSession::dispatch`]; the muscle selector
/// writes through [`WorkoutSession::muscle_sync`]. Resolution reads a
/// consistent snapshot of everything at call time.
pub struct WorkoutSession<C: CacheProvider + 'static = InMemoryCache> {
    store: SharedStore<C>,
    sync: MuscleSelectionSync<C>,
    profile: RwLock<ProfileState>,
    direct: RwLock<DirectParameters>,
    validator: SessionValidator,
}

impl WorkoutSession<InMemoryCache> {
    /// Build a session with an in-memory cache and the configured remote store
    ///
    /// # Errors
    ///
    /// Returns an error if the cache cannot be created
    pub async fn from_config(config: &EngineConfig) -> AppResult<Self> {
        let cache = InMemoryCache::new(config.cache.clone()).await?;
        let remote = muscle_store::from_config(&config.remote);
        Ok(Self::new(cache, remote, config))
    }
}

impl<C: CacheProvider + 'static> WorkoutSession<C> {
    /// Build a session over an existing cache and remote store
    pub fn new(cache: C, remote: Arc<dyn MuscleSelectionStore>, config: &EngineConfig) -> Self {
        let ttl = &config.cache.ttl;
        let store = Arc::new(RwLock::new(SessionInputStore::new(
            cache.clone(),
            config.session_scope.clone(),
            ttl.ttl_for_resource(CacheResource::SessionInputs),
        )));
        let sync = MuscleSelectionSync::new(
            Arc::clone(&store),
            remote,
            cache,
            config.session_scope.clone(),
            ttl.ttl_for_resource(CacheResource::MuscleSelection),
            config.muscle_sync,
        );
        Self {
            store,
            sync,
            profile: RwLock::new(ProfileState::default()),
            direct: RwLock::new(DirectParameters::default()),
            validator: SessionValidator::new(config.muscle_sync.max_groups),
        }
    }

    /// Restore the cached snapshot, then load the muscle selection
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> SyncState {
        let restored = self.store.write().await.restore().await;
        let state = self.sync.initialize().await;
        info!(restored, muscle_sync = %state, "Workout session initialized");
        state
    }

    /// Apply one panel command
    ///
    /// # Errors
    ///
    /// Returns the reducer's error; the inputs are unchanged in that case
    pub async fn dispatch(&self, command: SessionCommand) -> AppResult<SessionInputs> {
        let mut store = self.store.write().await;
        store.dispatch(command).await.cloned()
    }

    /// Set a field from its camelCase key and raw JSON value
    ///
    /// # Errors
    ///
    /// Returns an error for unknown keys, malformed values, or rejected updates
    pub async fn set_field(&self, key: &str, value: Value) -> AppResult<SessionInputs> {
        let mut store = self.store.write().await;
        store.set_field(key, value).await.cloned()
    }

    /// Snapshot of the current inputs
    pub async fn inputs(&self) -> SessionInputs {
        self.store.read().await.inputs().clone()
    }

    /// Replace the profile state
    pub async fn set_profile(&self, state: ProfileState) {
        *self.profile.write().await = state;
    }

    /// Replace the directly supplied parameters
    pub async fn set_direct(&self, direct: DirectParameters) {
        *self.direct.write().await = direct;
    }

    /// Muscle selection synchronizer
    #[must_use]
    pub const fn muscle_sync(&self) -> &MuscleSelectionSync<C> {
        &self.sync
    }

    /// Resolve the canonical parameter set from the current state
    pub async fn resolve(&self) -> ResolvedParameters {
        let inputs = self.inputs().await;
        let direct = self.direct.read().await.clone();
        let profile = create_profile_context(&*self.profile.read().await);
        let muscles = self.sync.selection().await;
        resolution::resolve(&inputs, &direct, profile.as_ref(), &muscles)
    }

    /// Resolved payload as JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub async fn payload(&self) -> AppResult<Value> {
        self.resolve().await.to_payload()
    }

    /// Flush pending muscle saves, then resolve and validate for submission
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` carrying the per-field errors when the resolved
    /// parameters fail validation
    pub async fn submission_payload(&self) -> AppResult<Value> {
        self.sync.flush().await;
        let resolved = self.resolve().await;
        let result = self.validator.validate_resolved(&resolved);
        if !result.is_valid {
            return Err(AppError::invalid_input("Resolved parameters failed validation")
                .with_details(serde_json::to_value(&result.errors)?));
        }
        resolved.to_payload()
    }

    /// Validate the raw inputs
    pub async fn validate(&self) -> ValidationResult {
        self.validator.validate(self.store.read().await.inputs())
    }

    /// Validate the resolved parameters
    pub async fn validate_resolved(&self) -> ValidationResult {
        let resolved = self.resolve().await;
        self.validator.validate_resolved(&resolved)
    }

    /// Percentage of panels with a value
    pub async fn completion(&self) -> u8 {
        let direct = self.direct.read().await;
        completion(self.store.read().await.inputs(), &direct)
    }

    /// Human-readable names of required fields still unset
    pub async fn missing_required_fields(&self) -> Vec<String> {
        let direct = self.direct.read().await;
        missing_required_fields(self.store.read().await.inputs(), &direct)
    }

    /// Weighted profile completeness score
    pub async fn profile_completeness(&self) -> u8 {
        profile_completeness(self.profile.read().await.ready_profile())
    }

    /// Required profile fields still empty
    pub async fn missing_profile_fields(&self) -> Vec<&'static str> {
        missing_profile_fields(self.profile.read().await.ready_profile())
    }

    /// Clear the muscle selection and every session input
    pub async fn reset(&self) {
        self.sync.reset().await;
        self.store.write().await.reset().await;
    }
}
