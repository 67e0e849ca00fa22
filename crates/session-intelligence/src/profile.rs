// ABOUTME: Profile integration: context derivation, intensity/complexity priority chains
// ABOUTME: Computes weighted profile completeness and reports missing required profile fields
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Workout Session Engine Contributors

//! Profile integration
//!
//! The profile is the only source of fitness level. When no profile is ready,
//! callers receive `None` and resolution proceeds with `FitnessLevel::Intermediate`.

use crate::mapping::{map_fitness_to_complexity, map_fitness_to_intensity};
use crate::resolution::ParameterSource;
use session_core::constants::profile_weights::{
    OPTIONAL_FIELDS, OPTIONAL_WEIGHT, REQUIRED_FIELDS, REQUIRED_WEIGHT,
};
use session_core::models::{
    DirectParameters, ExerciseComplexity, FitnessLevel, ProfileContext, ProfileState,
    SessionInputs, UserProfile,
};

/// Build the read-only profile context, or `None` while no profile is ready
#[must_use]
pub fn create_profile_context(state: &ProfileState) -> Option<ProfileContext> {
    state.ready_profile().map(ProfileContext::from)
}

/// Fitness level from the profile context, defaulting to intermediate
#[must_use]
pub fn fitness_level(profile: Option<&ProfileContext>) -> (FitnessLevel, ParameterSource) {
    profile.map_or(
        (FitnessLevel::default(), ParameterSource::Default),
        |context| (context.fitness_level, ParameterSource::Profile),
    )
}

/// Intensity priority chain: direct `intensity_level`, today's intensity panel,
/// legacy `intensity`, then the fitness-level default
#[must_use]
pub fn derive_intensity_level(
    direct: &DirectParameters,
    inputs: &SessionInputs,
    profile: Option<&ProfileContext>,
) -> (u8, ParameterSource) {
    if let Some(level) = direct.intensity_level {
        return (level, ParameterSource::Direct);
    }
    if let Some(level) = inputs.daily_intensity_level {
        return (level, ParameterSource::Session);
    }
    if let Some(level) = direct.intensity {
        return (level, ParameterSource::Direct);
    }
    let (level, source) = fitness_level(profile);
    (map_fitness_to_intensity(level), source)
}

/// Complexity priority chain: direct field, then the fitness-level default
#[must_use]
pub fn derive_exercise_complexity(
    direct: &DirectParameters,
    profile: Option<&ProfileContext>,
) -> (ExerciseComplexity, ParameterSource) {
    if let Some(complexity) = direct.exercise_complexity {
        return (complexity, ParameterSource::Direct);
    }
    let (level, source) = fitness_level(profile);
    (map_fitness_to_complexity(level), source)
}

fn required_flags(profile: &UserProfile) -> [(&'static str, bool); REQUIRED_FIELDS] {
    [
        ("fitnessLevel", profile.fitness_level.as_deref().is_some_and(|s| !s.trim().is_empty())),
        ("goals", !profile.goals.is_empty()),
        (
            "workoutFrequency",
            profile.workout_frequency.as_deref().is_some_and(|s| !s.trim().is_empty()),
        ),
    ]
}

fn optional_flags(profile: &UserProfile) -> [bool; OPTIONAL_FIELDS] {
    [
        !profile.available_equipment.is_empty(),
        profile.preferred_location.as_deref().is_some_and(|s| !s.trim().is_empty()),
        profile.preferred_duration.is_some(),
        !profile.limitations.is_empty(),
        profile.age.is_some(),
    ]
}

/// Weighted completeness score (0-100)
///
/// Required fields carry 70% of the score, optional fields the remaining 30%.
#[must_use]
pub fn profile_completeness(profile: Option<&UserProfile>) -> u8 {
    let Some(profile) = profile else {
        return 0;
    };
    let required = required_flags(profile).iter().filter(|(_, set)| *set).count();
    let optional = optional_flags(profile).iter().filter(|set| **set).count();

    let score = (required as f64 / REQUIRED_FIELDS as f64).mul_add(
        REQUIRED_WEIGHT,
        optional as f64 / OPTIONAL_FIELDS as f64 * OPTIONAL_WEIGHT,
    );
    score.round().clamp(0.0, 100.0) as u8
}

/// Names of required profile fields that are still empty
#[must_use]
pub fn missing_profile_fields(profile: Option<&UserProfile>) -> Vec<&'static str> {
    let empty = UserProfile::default();
    required_flags(profile.unwrap_or(&empty))
        .into_iter()
        .filter_map(|(name, set)| (!set).then_some(name))
        .collect()
}
