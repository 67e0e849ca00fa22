// ABOUTME: Session input store holding the eleven panel values behind one typed command reducer
// ABOUTME: Every accepted update merges one field and persists the full snapshot to the local cache
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Workout Session Engine Contributors

//! # Session Input Store
//!
//! Panels never write `SessionInputs` directly. Each update is a
//! [`SessionCommand`] applied by [`reduce`], which copies the current state and
//! replaces exactly one field, so concurrent panels cannot clobber siblings.
//!
//! The only rule enforced here is the customization length limit; range and
//! vocabulary checks belong to validation.

use crate::cache::{CacheKey, CacheProvider, CacheResource, InMemoryCache};
use crate::errors::{AppError, AppResult};
use serde::de::DeserializeOwned;
use serde_json::Value;
use session_core::constants::limits::MAX_CUSTOMIZATION_LENGTH;
use session_core::models::{MuscleSelectionData, MuscleTargeting, SessionField, SessionInputs};
use std::collections::BTreeSet;
use std::time::Duration;
use tracing::{debug, info, warn};

/// One update to the session inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Set `todaysFocus`
    SetFocus(String),
    /// Set `dailyIntensityLevel`
    SetIntensity(u8),
    /// Set `timeConstraintsToday`
    SetDuration(u32),
    /// Replace `equipmentAvailableToday`
    SetEquipment(BTreeSet<String>),
    /// Replace `healthRestrictionsToday`
    SetHealthRestrictions(BTreeSet<String>),
    /// Set `locationToday`
    SetLocation(String),
    /// Set `environment`
    SetEnvironment(String),
    /// Set `energyLevel`
    SetEnergy(u8),
    /// Set `moodLevel`
    SetMood(u8),
    /// Set `sleepQuality`
    SetSleep(u8),
    /// Set `workoutCustomization` (rejected above 500 characters)
    SetCustomization(String),
    /// Replace `focusArea`
    SetFocusArea(Vec<String>),
    /// Replace `muscleTargeting`
    SetMuscleTargeting(MuscleTargeting),
    /// Write `focusArea` and `muscleTargeting` together from a muscle selection
    ProjectMuscles {
        /// Selected groups in pick order
        focus_area: Vec<String>,
        /// Structured targeting, `None` for an empty selection
        targeting: Option<MuscleTargeting>,
    },
    /// Clear one field
    Clear(SessionField),
}

impl SessionCommand {
    /// Build the projection command for a muscle selection
    #[must_use]
    pub fn project(selection: &MuscleSelectionData) -> Self {
        Self::ProjectMuscles {
            focus_area: selection.selected_groups.clone(),
            targeting: (!selection.is_empty()).then(|| selection.to_targeting()),
        }
    }

    /// Parse a raw panel value for the field named `key`
    ///
    /// `null` clears the field.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown key or a value of the wrong shape
    pub fn from_key_value(key: &str, value: Value) -> AppResult<Self> {
        let field = SessionField::from_key(key).ok_or_else(|| AppError::unknown_field(key))?;
        if value.is_null() {
            return Ok(Self::Clear(field));
        }
        Ok(match field {
            SessionField::TodaysFocus => Self::SetFocus(parse(field, value)?),
            SessionField::DailyIntensityLevel => Self::SetIntensity(parse(field, value)?),
            SessionField::TimeConstraintsToday => Self::SetDuration(parse(field, value)?),
            SessionField::EquipmentAvailableToday => Self::SetEquipment(parse(field, value)?),
            SessionField::HealthRestrictionsToday => {
                Self::SetHealthRestrictions(parse(field, value)?)
            }
            SessionField::LocationToday => Self::SetLocation(parse(field, value)?),
            SessionField::Environment => Self::SetEnvironment(parse(field, value)?),
            SessionField::EnergyLevel => Self::SetEnergy(parse(field, value)?),
            SessionField::MoodLevel => Self::SetMood(parse(field, value)?),
            SessionField::SleepQuality => Self::SetSleep(parse(field, value)?),
            SessionField::WorkoutCustomization => Self::SetCustomization(parse(field, value)?),
            SessionField::FocusArea => Self::SetFocusArea(parse(field, value)?),
            SessionField::MuscleTargeting => Self::SetMuscleTargeting(parse(field, value)?),
        })
    }

    /// Name used in logs
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::SetFocus(_) => "todaysFocus",
            Self::SetIntensity(_) => "dailyIntensityLevel",
            Self::SetDuration(_) => "timeConstraintsToday",
            Self::SetEquipment(_) => "equipmentAvailableToday",
            Self::SetHealthRestrictions(_) => "healthRestrictionsToday",
            Self::SetLocation(_) => "locationToday",
            Self::SetEnvironment(_) => "environment",
            Self::SetEnergy(_) => "energyLevel",
            Self::SetMood(_) => "moodLevel",
            Self::SetSleep(_) => "sleepQuality",
            Self::SetCustomization(_) => "workoutCustomization",
            Self::SetFocusArea(_) => "focusArea",
            Self::SetMuscleTargeting(_) => "muscleTargeting",
            Self::ProjectMuscles { .. } => "muscleProjection",
            Self::Clear(field) => field.key(),
        }
    }
}

fn parse<T: DeserializeOwned>(field: SessionField, value: Value) -> AppResult<T> {
    serde_json::from_value(value).map_err(|e| {
        AppError::invalid_input(format!("Invalid value for {field}: {e}")).with_source(e)
    })
}

/// Apply one command, returning the next state
///
/// The returned state equals `current` in every field the command does not name.
///
/// # Errors
///
/// Returns `ValueOutOfRange` when a customization exceeds the length limit
pub fn reduce(current: &SessionInputs, command: SessionCommand) -> AppResult<SessionInputs> {
    let mut next = current.clone();
    match command {
        SessionCommand::SetFocus(focus) => next.todays_focus = Some(focus),
        SessionCommand::SetIntensity(level) => next.daily_intensity_level = Some(level),
        SessionCommand::SetDuration(minutes) => next.time_constraints_today = Some(minutes),
        SessionCommand::SetEquipment(equipment) => next.equipment_available_today = equipment,
        SessionCommand::SetHealthRestrictions(restrictions) => {
            next.health_restrictions_today = restrictions;
        }
        SessionCommand::SetLocation(location) => next.location_today = Some(location),
        SessionCommand::SetEnvironment(environment) => next.environment = Some(environment),
        SessionCommand::SetEnergy(level) => next.energy_level = Some(level),
        SessionCommand::SetMood(level) => next.mood_level = Some(level),
        SessionCommand::SetSleep(level) => next.sleep_quality = Some(level),
        SessionCommand::SetCustomization(text) => {
            let length = text.chars().count();
            if length > MAX_CUSTOMIZATION_LENGTH {
                return Err(AppError::value_out_of_range(
                    SessionField::WorkoutCustomization.key(),
                    format!(
                        "Customization is {length} characters; the limit is {MAX_CUSTOMIZATION_LENGTH}"
                    ),
                ));
            }
            next.workout_customization = Some(text);
        }
        SessionCommand::SetFocusArea(groups) => next.focus_area = groups,
        SessionCommand::SetMuscleTargeting(targeting) => next.muscle_targeting = Some(targeting),
        SessionCommand::ProjectMuscles {
            focus_area,
            targeting,
        } => {
            next.focus_area = focus_area;
            next.muscle_targeting = targeting;
        }
        SessionCommand::Clear(field) => clear(&mut next, field),
    }
    Ok(next)
}

fn clear(inputs: &mut SessionInputs, field: SessionField) {
    match field {
        SessionField::TodaysFocus => inputs.todays_focus = None,
        SessionField::DailyIntensityLevel => inputs.daily_intensity_level = None,
        SessionField::TimeConstraintsToday => inputs.time_constraints_today = None,
        SessionField::EquipmentAvailableToday => inputs.equipment_available_today.clear(),
        SessionField::HealthRestrictionsToday => inputs.health_restrictions_today.clear(),
        SessionField::LocationToday => inputs.location_today = None,
        SessionField::Environment => inputs.environment = None,
        SessionField::EnergyLevel => inputs.energy_level = None,
        SessionField::MoodLevel => inputs.mood_level = None,
        SessionField::SleepQuality => inputs.sleep_quality = None,
        SessionField::WorkoutCustomization => inputs.workout_customization = None,
        SessionField::FocusArea => inputs.focus_area.clear(),
        SessionField::MuscleTargeting => inputs.muscle_targeting = None,
    }
}

/// Session input store with local snapshot persistence
pub struct SessionInputStore<C: CacheProvider = InMemoryCache> {
    inputs: SessionInputs,
    cache: C,
    key: CacheKey,
    ttl: Duration,
}

impl<C: CacheProvider> SessionInputStore<C> {
    /// Empty store persisting snapshots under `scope` for `ttl`
    pub fn new(cache: C, scope: impl Into<String>, ttl: Duration) -> Self {
        Self {
            inputs: SessionInputs::default(),
            cache,
            key: CacheKey::new(scope, CacheResource::SessionInputs),
            ttl,
        }
    }

    /// Current inputs
    #[must_use]
    pub const fn inputs(&self) -> &SessionInputs {
        &self.inputs
    }

    /// Cache key the snapshot is written under
    #[must_use]
    pub const fn cache_key(&self) -> &CacheKey {
        &self.key
    }

    /// Apply one command and persist the resulting snapshot
    ///
    /// # Errors
    ///
    /// Returns the reducer's error; the stored inputs are unchanged in that case.
    /// Cache failures are logged and never returned.
    pub async fn dispatch(&mut self, command: SessionCommand) -> AppResult<&SessionInputs> {
        let label = command.label();
        match reduce(&self.inputs, command) {
            Ok(next) => {
                debug!(field = label, "Merged session input");
                self.inputs = next;
                self.persist().await;
                Ok(&self.inputs)
            }
            Err(error) => {
                warn!(field = label, error = %error, "Rejected session input update");
                Err(error)
            }
        }
    }

    /// Set a field from its camelCase key and raw JSON value
    ///
    /// # Errors
    ///
    /// Returns an error for unknown keys, malformed values, or rejected updates
    pub async fn set_field(&mut self, key: &str, value: Value) -> AppResult<&SessionInputs> {
        let command = SessionCommand::from_key_value(key, value)?;
        self.dispatch(command).await
    }

    /// Clear one field
    ///
    /// # Errors
    ///
    /// Never fails in practice; returns the reducer's result for uniformity
    pub async fn clear_field(&mut self, field: SessionField) -> AppResult<&SessionInputs> {
        self.dispatch(SessionCommand::Clear(field)).await
    }

    /// Write the muscle selection's projection into `focusArea` and `muscleTargeting`
    ///
    /// # Errors
    ///
    /// Never fails in practice; returns the reducer's result for uniformity
    pub async fn apply_muscle_projection(
        &mut self,
        selection: &MuscleSelectionData,
    ) -> AppResult<&SessionInputs> {
        self.dispatch(SessionCommand::project(selection)).await
    }

    /// Clear every field and drop the cached snapshot
    pub async fn reset(&mut self) {
        self.inputs = SessionInputs::default();
        if let Err(error) = self.cache.invalidate(&self.key).await {
            warn!(key = %self.key, error = %error, "Failed to drop cached session snapshot");
        }
        info!(key = %self.key, "Session inputs reset");
    }

    /// Adopt a non-expired cached snapshot, returning whether one was found
    pub async fn restore(&mut self) -> bool {
        match self.cache.get::<SessionInputs>(&self.key).await {
            Ok(Some(snapshot)) => {
                info!(key = %self.key, "Restored cached session inputs");
                self.inputs = snapshot;
                true
            }
            Ok(None) => false,
            Err(error) => {
                warn!(key = %self.key, error = %error, "Ignoring unreadable session snapshot");
                false
            }
        }
    }

    async fn persist(&self) {
        if let Err(error) = self.cache.set(&self.key, &self.inputs, self.ttl).await {
            warn!(key = %self.key, error = %error, "Failed to persist session snapshot");
        }
    }

    /// Set `todaysFocus`
    ///
    /// # Errors
    ///
    /// Never fails in practice
    pub async fn set_focus(&mut self, focus: impl Into<String>) -> AppResult<&SessionInputs> {
        self.dispatch(SessionCommand::SetFocus(focus.into())).await
    }

    /// Set `dailyIntensityLevel`
    ///
    /// # Errors
    ///
    /// Never fails in practice
    pub async fn set_intensity(&mut self, level: u8) -> AppResult<&SessionInputs> {
        self.dispatch(SessionCommand::SetIntensity(level)).await
    }

    /// Set `timeConstraintsToday`
    ///
    /// # Errors
    ///
    /// Never fails in practice
    pub async fn set_duration(&mut self, minutes: u32) -> AppResult<&SessionInputs> {
        self.dispatch(SessionCommand::SetDuration(minutes)).await
    }

    /// Replace `equipmentAvailableToday`
    ///
    /// # Errors
    ///
    /// Never fails in practice
    pub async fn set_equipment<I, S>(&mut self, equipment: I) -> AppResult<&SessionInputs>
    where
        I: IntoIterator<Item = S> + Send,
        S: Into<String>,
    {
        let equipment = equipment.into_iter().map(Into::into).collect();
        self.dispatch(SessionCommand::SetEquipment(equipment)).await
    }

    /// Replace `healthRestrictionsToday`
    ///
    /// # Errors
    ///
    /// Never fails in practice
    pub async fn set_health_restrictions<I, S>(
        &mut self,
        restrictions: I,
    ) -> AppResult<&SessionInputs>
    where
        I: IntoIterator<Item = S> + Send,
        S: Into<String>,
    {
        let restrictions = restrictions.into_iter().map(Into::into).collect();
        self.dispatch(SessionCommand::SetHealthRestrictions(restrictions))
            .await
    }

    /// Set `locationToday`
    ///
    /// # Errors
    ///
    /// Never fails in practice
    pub async fn set_location(&mut self, location: impl Into<String>) -> AppResult<&SessionInputs> {
        self.dispatch(SessionCommand::SetLocation(location.into())).await
    }

    /// Set `environment`
    ///
    /// # Errors
    ///
    /// Never fails in practice
    pub async fn set_environment(
        &mut self,
        environment: impl Into<String>,
    ) -> AppResult<&SessionInputs> {
        self.dispatch(SessionCommand::SetEnvironment(environment.into()))
            .await
    }

    /// Set `energyLevel`
    ///
    /// # Errors
    ///
    /// Never fails in practice
    pub async fn set_energy(&mut self, level: u8) -> AppResult<&SessionInputs> {
        self.dispatch(SessionCommand::SetEnergy(level)).await
    }

    /// Set `moodLevel`
    ///
    /// # Errors
    ///
    /// Never fails in practice
    pub async fn set_mood(&mut self, level: u8) -> AppResult<&SessionInputs> {
        self.dispatch(SessionCommand::SetMood(level)).await
    }

    /// Set `sleepQuality`
    ///
    /// # Errors
    ///
    /// Never fails in practice
    pub async fn set_sleep(&mut self, level: u8) -> AppResult<&SessionInputs> {
        self.dispatch(SessionCommand::SetSleep(level)).await
    }

    /// Set `workoutCustomization`
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` above 500 characters; the previous text is kept
    pub async fn set_customization(
        &mut self,
        text: impl Into<String>,
    ) -> AppResult<&SessionInputs> {
        self.dispatch(SessionCommand::SetCustomization(text.into()))
            .await
    }
}
