// ABOUTME: Range, vocabulary, and length checks over session inputs and resolved parameters
// ABOUTME: Reports field-keyed messages plus panel completion and missing required items
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Workout Session Engine Contributors

use crate::resolution::ResolvedParameters;
use serde::{Deserialize, Serialize};
use session_core::constants::limits::{
    DEFAULT_MAX_MUSCLE_GROUPS, MAX_CUSTOMIZATION_LENGTH, MIN_DURATION_MINUTES, SCALE_MAX,
    SCALE_MIN, TOTAL_PANELS,
};
use session_core::models::{
    DirectParameters, Panel, SessionField, SessionInputs, TrainingEnvironment, WorkoutFocus,
};
use std::collections::BTreeMap;

/// Outcome of one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// No errors were recorded
    pub is_valid: bool,
    /// Message per offending field
    pub errors: BTreeMap<String, String>,
}

impl ValidationResult {
    fn from_errors(errors: BTreeMap<String, String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Message recorded for `field`, if any
    #[must_use]
    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }
}

/// Session validator
#[derive(Debug, Clone, Copy)]
pub struct SessionValidator {
    max_muscle_groups: usize,
}

impl Default for SessionValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_MUSCLE_GROUPS)
    }
}

impl SessionValidator {
    /// Validator allowing at most `max_muscle_groups` focus areas
    #[must_use]
    pub const fn new(max_muscle_groups: usize) -> Self {
        Self { max_muscle_groups }
    }

    /// Validate raw panel inputs
    ///
    /// Never mutates the inputs; a fresh result is produced on each call.
    #[must_use]
    pub fn validate(&self, inputs: &SessionInputs) -> ValidationResult {
        let mut errors = BTreeMap::new();

        let scales = [
            (SessionField::DailyIntensityLevel, inputs.daily_intensity_level, "Intensity"),
            (SessionField::EnergyLevel, inputs.energy_level, "Energy level"),
            (SessionField::MoodLevel, inputs.mood_level, "Mood level"),
            (SessionField::SleepQuality, inputs.sleep_quality, "Sleep quality"),
        ];
        for (field, value, label) in scales {
            if let Some(value) = value {
                if !(SCALE_MIN..=SCALE_MAX).contains(&value) {
                    errors.insert(
                        field.key().to_owned(),
                        format!("{label} must be between {SCALE_MIN} and {SCALE_MAX}"),
                    );
                }
            }
        }

        if let Some(minutes) = inputs.time_constraints_today {
            if minutes < MIN_DURATION_MINUTES {
                errors.insert(
                    SessionField::TimeConstraintsToday.key().to_owned(),
                    format!("Workout duration must be at least {MIN_DURATION_MINUTES} minutes"),
                );
            }
        }

        if let Some(focus) = inputs.todays_focus.as_deref() {
            if WorkoutFocus::parse(focus).is_none() {
                errors.insert(
                    SessionField::TodaysFocus.key().to_owned(),
                    format!("Unknown workout focus: {focus}"),
                );
            }
        }

        let locations = [
            (SessionField::LocationToday, inputs.location_today.as_deref()),
            (SessionField::Environment, inputs.environment.as_deref()),
        ];
        for (field, value) in locations {
            if let Some(value) = value {
                if TrainingEnvironment::parse(value).is_none() {
                    errors.insert(field.key().to_owned(), format!("Unknown location: {value}"));
                }
            }
        }

        if let Some(text) = inputs.workout_customization.as_deref() {
            if text.chars().count() > MAX_CUSTOMIZATION_LENGTH {
                errors.insert(
                    SessionField::WorkoutCustomization.key().to_owned(),
                    format!("Customization must be at most {MAX_CUSTOMIZATION_LENGTH} characters"),
                );
            }
        }

        if inputs.focus_area.len() > self.max_muscle_groups {
            errors.insert(
                SessionField::FocusArea.key().to_owned(),
                format!("Select at most {} muscle groups", self.max_muscle_groups),
            );
        }

        ValidationResult::from_errors(errors)
    }

    /// Validate the resolved parameter set before submission
    #[must_use]
    pub fn validate_resolved(&self, resolved: &ResolvedParameters) -> ValidationResult {
        let mut errors = BTreeMap::new();

        match resolved.duration {
            None => {
                errors.insert("duration".to_owned(), "Workout duration is required".to_owned());
            }
            Some(minutes) if minutes < MIN_DURATION_MINUTES => {
                errors.insert(
                    "duration".to_owned(),
                    format!("Workout duration must be at least {MIN_DURATION_MINUTES} minutes"),
                );
            }
            Some(_) => {}
        }

        if !present(resolved.goals.as_deref()) {
            errors.insert("goals".to_owned(), "Workout focus is required".to_owned());
        }

        if !(SCALE_MIN..=SCALE_MAX).contains(&resolved.intensity_level) {
            errors.insert(
                "intensity_level".to_owned(),
                format!("Intensity must be between {SCALE_MIN} and {SCALE_MAX}"),
            );
        }

        ValidationResult::from_errors(errors)
    }
}

fn present(value: Option<&str>) -> bool {
    value.is_some_and(|s| !s.trim().is_empty())
}

fn panel_filled(panel: Panel, inputs: &SessionInputs, direct: &DirectParameters) -> bool {
    match panel {
        Panel::Focus => present(inputs.todays_focus.as_deref()) || present(direct.goals.as_deref()),
        Panel::Intensity => {
            inputs.daily_intensity_level.is_some()
                || direct.intensity_level.is_some()
                || direct.intensity.is_some()
        }
        Panel::Duration => inputs.time_constraints_today.is_some() || direct.duration.is_some(),
        Panel::Equipment => !inputs.equipment_available_today.is_empty(),
        Panel::Restrictions => !inputs.health_restrictions_today.is_empty(),
        Panel::Location => {
            present(inputs.location_today.as_deref())
                || present(inputs.environment.as_deref())
                || present(direct.location.as_deref())
        }
        Panel::Mood => inputs.mood_level.is_some() || direct.stress_level.is_some(),
        Panel::Energy => inputs.energy_level.is_some() || direct.energy_level.is_some(),
        Panel::Sleep => inputs.sleep_quality.is_some() || direct.sleep_quality.is_some(),
        Panel::Customization => {
            present(inputs.workout_customization.as_deref())
                || present(direct.custom_notes.as_deref())
        }
        Panel::MuscleTargeting => {
            inputs.has_muscle_data() || present(direct.primary_muscle_focus.as_deref())
        }
    }
}

/// Percentage (0-100) of the eleven panels holding a value
#[must_use]
pub fn completion(inputs: &SessionInputs, direct: &DirectParameters) -> u8 {
    let filled = Panel::ALL
        .into_iter()
        .filter(|panel| panel_filled(*panel, inputs, direct))
        .count();
    // filled <= TOTAL_PANELS, so the quotient always fits
    u8::try_from((filled * 100 + TOTAL_PANELS / 2) / TOTAL_PANELS).unwrap_or(100)
}

/// Human-readable names of required items still missing (duration and focus only)
#[must_use]
pub fn missing_required_fields(inputs: &SessionInputs, direct: &DirectParameters) -> Vec<String> {
    [
        (Panel::Duration, "Workout duration"),
        (Panel::Focus, "Workout focus"),
    ]
    .into_iter()
    .filter(|(panel, _)| !panel_filled(*panel, inputs, direct))
    .map(|(_, label)| label.to_owned())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolution::ParameterResolver;
    use session_core::models::MuscleTargeting;

    fn complete_inputs() -> SessionInputs {
        SessionInputs {
            todays_focus: Some("endurance".into()),
            daily_intensity_level: Some(4),
            time_constraints_today: Some(45),
            equipment_available_today: ["rower".to_owned()].into_iter().collect(),
            health_restrictions_today: ["lower-back".to_owned()].into_iter().collect(),
            location_today: Some("gym".into()),
            environment: None,
            energy_level: Some(5),
            mood_level: Some(4),
            sleep_quality: Some(3),
            workout_customization: Some("steady pace".into()),
            focus_area: vec!["legs".into()],
            muscle_targeting: Some(MuscleTargeting {
                target_groups: vec!["legs".into()],
                primary_focus: Some("legs".into()),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_complete_inputs_are_valid() {
        let result = SessionValidator::default().validate(&complete_inputs());
        assert!(result.is_valid, "unexpected errors: {:?}", result.errors);
    }

    #[test]
    fn test_scale_and_duration_ranges() {
        let inputs = SessionInputs {
            daily_intensity_level: Some(7),
            mood_level: Some(0),
            sleep_quality: Some(6),
            time_constraints_today: Some(4),
            ..Default::default()
        };
        let result = SessionValidator::default().validate(&inputs);
        assert!(!result.is_valid);
        assert!(result.error_for("dailyIntensityLevel").is_some());
        assert!(result.error_for("moodLevel").is_some());
        assert!(result.error_for("sleepQuality").is_none());
        assert!(result.error_for("timeConstraintsToday").is_some());
    }

    #[test]
    fn test_vocabulary_checks() {
        let inputs = SessionInputs {
            todays_focus: Some("yoga".into()),
            environment: Some("spaceship".into()),
            location_today: Some("limited-space".into()),
            ..Default::default()
        };
        let result = SessionValidator::default().validate(&inputs);
        assert_eq!(result.errors.len(), 2);
        assert!(result.error_for("todaysFocus").is_some());
        assert!(result.error_for("environment").is_some());
    }

    #[test]
    fn test_customization_length_and_group_limit() {
        let inputs = SessionInputs {
            workout_customization: Some("x".repeat(MAX_CUSTOMIZATION_LENGTH + 1)),
            focus_area: vec!["chest".into(), "back".into(), "legs".into()],
            ..Default::default()
        };
        let result = SessionValidator::new(2).validate(&inputs);
        assert!(result.error_for("workoutCustomization").is_some());
        assert!(result.error_for("focusArea").is_some());

        let result = SessionValidator::default().validate(&inputs);
        assert!(result.error_for("focusArea").is_none());
    }

    #[test]
    fn test_validate_resolved_requires_duration_and_goal() {
        let validator = SessionValidator::default();
        let empty = ParameterResolver::new(&SessionInputs::default()).resolve();
        let result = validator.validate_resolved(&empty);
        assert!(result.error_for("duration").is_some());
        assert!(result.error_for("goals").is_some());
        assert!(result.error_for("intensity_level").is_none());

        let resolved = ParameterResolver::new(&complete_inputs()).resolve();
        assert!(validator.validate_resolved(&resolved).is_valid);
    }

    #[test]
    fn test_completion_bounds() {
        let direct = DirectParameters::default();
        assert_eq!(completion(&SessionInputs::default(), &direct), 0);
        assert_eq!(completion(&complete_inputs(), &direct), 100);

        let partial = SessionInputs {
            todays_focus: Some("strength".into()),
            ..Default::default()
        };
        // 1 of 11 panels
        assert_eq!(completion(&partial, &direct), 9);
    }

    #[test]
    fn test_direct_fields_count_toward_completion() {
        let direct = DirectParameters {
            duration: Some(30),
            goals: Some("build-muscle".into()),
            ..Default::default()
        };
        assert_eq!(completion(&SessionInputs::default(), &direct), 18);
        assert!(missing_required_fields(&SessionInputs::default(), &direct).is_empty());
    }

    #[test]
    fn test_missing_required_fields() {
        let direct = DirectParameters::default();
        assert_eq!(
            missing_required_fields(&SessionInputs::default(), &direct),
            vec!["Workout duration", "Workout focus"]
        );
        let inputs = SessionInputs {
            time_constraints_today: Some(20),
            ..Default::default()
        };
        assert_eq!(missing_required_fields(&inputs, &direct), vec!["Workout focus"]);
    }
}
