// ABOUTME: User profile record, its loading state, and the read-only context derived from it
// ABOUTME: Profiles are owned by the profile collaborator; the engine only reads them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Workout Session Engine Contributors

use super::fitness::FitnessLevel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Long-lived profile preferences as exposed by the profile store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    /// Fitness level string (`beginner`, `intermediate`, `advanced`)
    pub fitness_level: Option<String>,
    /// Ordered goal tags
    pub goals: Vec<String>,
    /// Equipment the user owns
    pub available_equipment: Vec<String>,
    /// How often the user trains (`3x-week`, `daily`, ...)
    pub workout_frequency: Option<String>,
    /// Usual training location
    pub preferred_location: Option<String>,
    /// Usual session length in minutes
    pub preferred_duration: Option<u32>,
    /// Long-term limitations or injuries
    pub limitations: Vec<String>,
    /// Age in years
    pub age: Option<u8>,
}

/// Snapshot of the profile collaborator: the record plus its loading and error flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileState {
    /// Loaded profile, if any
    pub profile: Option<UserProfile>,
    /// Profile fetch still in progress
    pub is_loading: bool,
    /// Last profile fetch error
    pub error: Option<String>,
}

impl ProfileState {
    /// A successfully loaded profile
    #[must_use]
    pub const fn loaded(profile: UserProfile) -> Self {
        Self {
            profile: Some(profile),
            is_loading: false,
            error: None,
        }
    }

    /// Profile fetch in progress
    #[must_use]
    pub const fn loading() -> Self {
        Self {
            profile: None,
            is_loading: true,
            error: None,
        }
    }

    /// Profile fetch failed
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            profile: None,
            is_loading: false,
            error: Some(message.into()),
        }
    }

    /// The profile, only when it is loaded and not in an error state
    #[must_use]
    pub fn ready_profile(&self) -> Option<&UserProfile> {
        if self.is_loading || self.error.is_some() {
            return None;
        }
        self.profile.as_ref()
    }
}

/// Profile-derived context consumed by resolution
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileContext {
    /// Parsed fitness level
    pub fitness_level: FitnessLevel,
    /// Ordered goal tags
    pub goals: Vec<String>,
    /// Owned equipment
    pub available_equipment: BTreeSet<String>,
    /// Training frequency tag
    pub workout_frequency: Option<String>,
    /// Usual location tag
    pub preferred_location: Option<String>,
}

impl From<&UserProfile> for ProfileContext {
    fn from(profile: &UserProfile) -> Self {
        Self {
            fitness_level: profile
                .fitness_level
                .as_deref()
                .map(FitnessLevel::from_str_or_default)
                .unwrap_or_default(),
            goals: profile.goals.clone(),
            available_equipment: profile.available_equipment.iter().cloned().collect(),
            workout_frequency: profile.workout_frequency.clone(),
            preferred_location: profile.preferred_location.clone(),
        }
    }
}
