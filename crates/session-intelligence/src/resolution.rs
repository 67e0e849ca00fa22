// ABOUTME: Parameter resolution merging session inputs, profile context, and muscle selection
// ABOUTME: Produces the canonical flat fields, nested session_context, and a per-field source trace
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Workout Session Engine Contributors

//! # Parameter Resolution
//!
//! Resolution order per field:
//!
//! | Field | Priority |
//! |---|---|
//! | `duration` | time panel, direct `duration` |
//! | `goals` | focus panel (mapped), direct `goals` |
//! | `fitness_level` | profile only, default intermediate |
//! | `intensity_level` | direct `intensity_level`, intensity panel, legacy `intensity`, fitness default |
//! | `exercise_complexity` | direct, fitness default |
//! | `stress/energy/sleep` | panel (mapped), direct |
//! | `location` | `locationToday`, `environment`, direct, `"any"` |
//! | `custom_notes` | direct notes + customization panel + direct preferences |
//! | `primary_muscle_focus` | direct, targeting primary focus, first focus area |
//!
//! The time panel deliberately outranks an explicit `duration`.

use crate::mapping::{map_energy, map_focus_to_goal, map_mood, map_sleep};
use crate::profile::{derive_exercise_complexity, derive_intensity_level, fitness_level};
use serde::{Deserialize, Serialize};
use session_core::constants::defaults;
use session_core::errors::AppResult;
use session_core::models::{
    DirectParameters, EnergyLevel, ExerciseComplexity, FitnessLevel, MuscleSelectionData,
    MuscleTargeting, ProfileContext, SessionInputs, SleepQuality, StressLevel,
};
use std::collections::BTreeMap;
use tracing::debug;

/// Where a resolved value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterSource {
    /// A session panel value
    Session,
    /// A direct request field
    Direct,
    /// The user profile
    Profile,
    /// The injected muscle selection (not yet projected into the session)
    MuscleSelection,
    /// A static default
    Default,
    /// No source supplied a value
    Unset,
}

/// Canonical parameter set for the generation service
///
/// Flat fields are kept for older payload consumers; `session_context` is the
/// preferred structured form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedParameters {
    /// Workout length in minutes
    pub duration: Option<u32>,
    /// Goal tag
    pub goals: Option<String>,
    /// Fitness level from the profile
    pub fitness_level: FitnessLevel,
    /// Intensity on the 1-6 scale
    pub intensity_level: u8,
    /// Exercise complexity
    pub exercise_complexity: ExerciseComplexity,
    /// Stress derived from mood
    pub stress_level: Option<StressLevel>,
    /// Energy level
    pub energy_level: Option<EnergyLevel>,
    /// Sleep quality
    pub sleep_quality: Option<SleepQuality>,
    /// Location tag, `"any"` when unspecified
    pub location: String,
    /// Joined free-text notes
    pub custom_notes: Option<String>,
    /// Muscle group to emphasise
    pub primary_muscle_focus: Option<String>,
    /// Mirror of `fitness_level` for consumers that predate it
    pub difficulty: FitnessLevel,
    /// Structured context grouped by concern
    pub session_context: SessionContext,
    /// Muscle targeting projection
    #[serde(rename = "muscleTargeting")]
    pub muscle_targeting: Option<MuscleTargeting>,
    /// Source of every resolved field
    pub resolution_trace: BTreeMap<String, ParameterSource>,
}

impl ResolvedParameters {
    /// JSON payload for the generation service
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the payload cannot be encoded
    pub fn to_payload(&self) -> AppResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Source recorded for `field`
    #[must_use]
    pub fn source_of(&self, field: &str) -> ParameterSource {
        self.resolution_trace
            .get(field)
            .copied()
            .unwrap_or(ParameterSource::Unset)
    }
}

/// Structured form of the resolved parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    /// How the user feels today
    pub daily_state: DailyState,
    /// Where and with what the user trains
    pub environment: EnvironmentContext,
    /// What the session should achieve
    pub focus: FocusContext,
    /// Free text and restrictions
    pub customization: CustomizationContext,
}

/// Wellbeing group of the session context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyState {
    /// Mapped energy level
    pub energy_level: Option<EnergyLevel>,
    /// Mapped stress level
    pub stress_level: Option<StressLevel>,
    /// Mapped sleep quality
    pub sleep_quality: Option<SleepQuality>,
    /// Raw energy panel value
    pub energy_score: Option<u8>,
    /// Raw mood panel value
    pub mood_score: Option<u8>,
    /// Raw sleep panel value
    pub sleep_score: Option<u8>,
}

/// Environment group of the session context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentContext {
    /// Resolved location
    pub location: String,
    /// Today's equipment, or the profile's when today's list is empty
    pub available_equipment: Vec<String>,
    /// Resolved duration in minutes
    pub time_available: Option<u32>,
}

/// Focus group of the session context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusContext {
    /// Resolved goal tag
    pub goal: Option<String>,
    /// Raw focus panel tag
    pub todays_focus: Option<String>,
    /// Resolved intensity
    pub intensity_level: u8,
    /// Resolved complexity
    pub exercise_complexity: ExerciseComplexity,
    /// Muscle groups to target
    pub focus_areas: Vec<String>,
    /// Muscle group to emphasise
    pub primary_muscle_focus: Option<String>,
}

/// Customization group of the session context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomizationContext {
    /// Joined free-text notes
    pub custom_notes: Option<String>,
    /// Restrictions to respect today
    pub health_restrictions: Vec<String>,
    /// Fitness level the notes should be read against
    pub fitness_level: FitnessLevel,
}

/// Resolves one session into `ResolvedParameters`
///
/// Profile and muscle data are injected explicitly; nothing is read from
/// ambient state.
#[derive(Debug, Clone, Copy)]
pub struct ParameterResolver<'a> {
    inputs: &'a SessionInputs,
    direct: Option<&'a DirectParameters>,
    profile: Option<&'a ProfileContext>,
    muscles: Option<&'a MuscleSelectionData>,
}

impl<'a> ParameterResolver<'a> {
    /// Resolver over session inputs alone
    #[must_use]
    pub const fn new(inputs: &'a SessionInputs) -> Self {
        Self {
            inputs,
            direct: None,
            profile: None,
            muscles: None,
        }
    }

    /// Attach direct request fields
    #[must_use]
    pub const fn with_direct(mut self, direct: &'a DirectParameters) -> Self {
        self.direct = Some(direct);
        self
    }

    /// Attach the profile context (`None` when no profile is ready)
    #[must_use]
    pub const fn with_profile(mut self, profile: Option<&'a ProfileContext>) -> Self {
        self.profile = profile;
        self
    }

    /// Attach the current muscle selection
    #[must_use]
    pub const fn with_muscles(mut self, muscles: &'a MuscleSelectionData) -> Self {
        self.muscles = Some(muscles);
        self
    }

    /// Produce the resolved parameter set
    #[must_use]
    pub fn resolve(&self) -> ResolvedParameters {
        let empty_direct = DirectParameters::default();
        let direct = self.direct.unwrap_or(&empty_direct);
        let inputs = self.inputs;
        let mut trace = BTreeMap::new();

        let (duration, source) = first_present([
            (inputs.time_constraints_today, ParameterSource::Session),
            (direct.duration, ParameterSource::Direct),
        ]);
        trace.insert("duration".to_owned(), source);

        let (goals, source) = first_present([
            (
                non_blank(inputs.todays_focus.as_deref()).map(|focus| map_focus_to_goal(focus).to_owned()),
                ParameterSource::Session,
            ),
            (non_blank(direct.goals.as_deref()).map(str::to_owned), ParameterSource::Direct),
        ]);
        trace.insert("goals".to_owned(), source);

        let (fitness, source) = fitness_level(self.profile);
        trace.insert("fitness_level".to_owned(), source);

        let (intensity_level, source) = derive_intensity_level(direct, inputs, self.profile);
        trace.insert("intensity_level".to_owned(), source);

        let (exercise_complexity, source) = derive_exercise_complexity(direct, self.profile);
        trace.insert("exercise_complexity".to_owned(), source);

        let (stress_level, source) = first_present([
            (inputs.mood_level.map(map_mood), ParameterSource::Session),
            (direct.stress_level, ParameterSource::Direct),
        ]);
        trace.insert("stress_level".to_owned(), source);

        let (energy_level, source) = first_present([
            (inputs.energy_level.map(map_energy), ParameterSource::Session),
            (direct.energy_level, ParameterSource::Direct),
        ]);
        trace.insert("energy_level".to_owned(), source);

        let (sleep_quality, source) = first_present([
            (inputs.sleep_quality.map(map_sleep), ParameterSource::Session),
            (direct.sleep_quality, ParameterSource::Direct),
        ]);
        trace.insert("sleep_quality".to_owned(), source);

        let (location, source) = first_present([
            (non_blank(inputs.location_today.as_deref()), ParameterSource::Session),
            (non_blank(inputs.environment.as_deref()), ParameterSource::Session),
            (non_blank(direct.location.as_deref()), ParameterSource::Direct),
            (Some(defaults::LOCATION), ParameterSource::Default),
        ]);
        let location = location.unwrap_or(defaults::LOCATION).to_owned();
        trace.insert("location".to_owned(), source);

        let (custom_notes, source) = join_notes(direct, inputs);
        trace.insert("custom_notes".to_owned(), source);

        let (muscle_targeting, targeting_source) = self.muscle_targeting();
        trace.insert("muscle_targeting".to_owned(), targeting_source);

        let focus_areas = if inputs.focus_area.is_empty() {
            muscle_targeting
                .as_ref()
                .map(|targeting| targeting.target_groups.clone())
                .unwrap_or_default()
        } else {
            inputs.focus_area.clone()
        };

        let (primary_muscle_focus, source) = first_present([
            (non_blank(direct.primary_muscle_focus.as_deref()).map(str::to_owned), ParameterSource::Direct),
            (
                muscle_targeting.as_ref().and_then(|t| t.primary_focus.clone()),
                targeting_source,
            ),
            (focus_areas.first().cloned(), targeting_source),
        ]);
        trace.insert("primary_muscle_focus".to_owned(), source);

        let (available_equipment, source) = if !inputs.equipment_available_today.is_empty() {
            (
                inputs.equipment_available_today.iter().cloned().collect(),
                ParameterSource::Session,
            )
        } else if let Some(profile) = self.profile.filter(|p| !p.available_equipment.is_empty()) {
            (
                profile.available_equipment.iter().cloned().collect(),
                ParameterSource::Profile,
            )
        } else {
            (Vec::new(), ParameterSource::Unset)
        };
        trace.insert("available_equipment".to_owned(), source);

        debug!(
            duration = ?duration,
            goals = ?goals,
            intensity_level,
            location = %location,
            has_profile = self.profile.is_some(),
            "Resolved session parameters"
        );

        let session_context = SessionContext {
            daily_state: DailyState {
                energy_level,
                stress_level,
                sleep_quality,
                energy_score: inputs.energy_level,
                mood_score: inputs.mood_level,
                sleep_score: inputs.sleep_quality,
            },
            environment: EnvironmentContext {
                location: location.clone(),
                available_equipment,
                time_available: duration,
            },
            focus: FocusContext {
                goal: goals.clone(),
                todays_focus: inputs.todays_focus.clone(),
                intensity_level,
                exercise_complexity,
                focus_areas,
                primary_muscle_focus: primary_muscle_focus.clone(),
            },
            customization: CustomizationContext {
                custom_notes: custom_notes.clone(),
                health_restrictions: inputs.health_restrictions_today.iter().cloned().collect(),
                fitness_level: fitness,
            },
        };

        ResolvedParameters {
            duration,
            goals,
            fitness_level: fitness,
            intensity_level,
            exercise_complexity,
            stress_level,
            energy_level,
            sleep_quality,
            location,
            custom_notes,
            primary_muscle_focus,
            difficulty: fitness,
            session_context,
            muscle_targeting,
            resolution_trace: trace,
        }
    }

    /// Session targeting when present, else the injected selection's projection
    fn muscle_targeting(&self) -> (Option<MuscleTargeting>, ParameterSource) {
        let inputs = self.inputs;
        if let Some(targeting) = inputs.muscle_targeting.as_ref().filter(|t| !t.is_empty()) {
            return (Some(targeting.clone()), ParameterSource::Session);
        }
        if !inputs.focus_area.is_empty() {
            let targeting = MuscleTargeting {
                target_groups: inputs.focus_area.clone(),
                specific_muscles: BTreeMap::new(),
                primary_focus: inputs.focus_area.first().cloned(),
            };
            return (Some(targeting), ParameterSource::Session);
        }
        match self.muscles.filter(|m| !m.is_empty()) {
            Some(selection) => (Some(selection.to_targeting()), ParameterSource::MuscleSelection),
            None => (None, ParameterSource::Unset),
        }
    }
}

/// Resolve with every collaborator supplied at once
#[must_use]
pub fn resolve(
    inputs: &SessionInputs,
    direct: &DirectParameters,
    profile: Option<&ProfileContext>,
    muscles: &MuscleSelectionData,
) -> ResolvedParameters {
    ParameterResolver::new(inputs)
        .with_direct(direct)
        .with_profile(profile)
        .with_muscles(muscles)
        .resolve()
}

fn first_present<T, const N: usize>(
    candidates: [(Option<T>, ParameterSource); N],
) -> (Option<T>, ParameterSource) {
    candidates
        .into_iter()
        .find_map(|(value, source)| value.map(|v| (Some(v), source)))
        .unwrap_or((None, ParameterSource::Unset))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn join_notes(direct: &DirectParameters, inputs: &SessionInputs) -> (Option<String>, ParameterSource) {
    let session_note = non_blank(inputs.workout_customization.as_deref());
    let segments: Vec<&str> = [
        non_blank(direct.custom_notes.as_deref()),
        session_note,
        non_blank(direct.preferences.as_deref()),
    ]
    .into_iter()
    .flatten()
    .collect();

    if segments.is_empty() {
        return (None, ParameterSource::Unset);
    }
    let source = if session_note.is_some() {
        ParameterSource::Session
    } else {
        ParameterSource::Direct
    };
    (Some(segments.join(defaults::NOTES_SEPARATOR)), source)
}
