// ABOUTME: Transient per-session panel inputs and the field/panel catalogues over them
// ABOUTME: SessionInputs is merged field-by-field so panels never clobber sibling fields
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Workout Session Engine Contributors

use super::muscle::MuscleTargeting;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Raw values written by the eleven input panels
///
/// Every field is optional or empty by default. Serialized with camelCase keys,
/// which is the shape panels and the local snapshot cache exchange.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionInputs {
    /// Focus tag (`fat-burning`, `strength`, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub todays_focus: Option<String>,
    /// Requested intensity on the 1-6 scale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_intensity_level: Option<u8>,
    /// Available time in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_constraints_today: Option<u32>,
    /// Equipment at hand today
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub equipment_available_today: BTreeSet<String>,
    /// Injuries or restrictions to respect today
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub health_restrictions_today: BTreeSet<String>,
    /// Location tag from the location panel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_today: Option<String>,
    /// Environment tag (older panel name for the same concept)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    /// Energy on the 1-6 scale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy_level: Option<u8>,
    /// Mood on the 1-6 scale (1 = very stressed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood_level: Option<u8>,
    /// Sleep quality on the 1-6 scale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_quality: Option<u8>,
    /// Free-text customization, at most 500 characters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout_customization: Option<String>,
    /// Muscle groups projected from the muscle selection
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub focus_area: Vec<String>,
    /// Structured muscle targeting projected from the muscle selection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muscle_targeting: Option<MuscleTargeting>,
}

impl SessionInputs {
    /// Whether any muscle data has been projected into the session yet
    #[must_use]
    pub fn has_muscle_data(&self) -> bool {
        !self.focus_area.is_empty()
            || self
                .muscle_targeting
                .as_ref()
                .is_some_and(|targeting| !targeting.is_empty())
    }

    /// Whether no panel has written anything
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Individual fields of `SessionInputs`, addressable by their camelCase key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SessionField {
    /// `todaysFocus`
    TodaysFocus,
    /// `dailyIntensityLevel`
    DailyIntensityLevel,
    /// `timeConstraintsToday`
    TimeConstraintsToday,
    /// `equipmentAvailableToday`
    EquipmentAvailableToday,
    /// `healthRestrictionsToday`
    HealthRestrictionsToday,
    /// `locationToday`
    LocationToday,
    /// `environment`
    Environment,
    /// `energyLevel`
    EnergyLevel,
    /// `moodLevel`
    MoodLevel,
    /// `sleepQuality`
    SleepQuality,
    /// `workoutCustomization`
    WorkoutCustomization,
    /// `focusArea`
    FocusArea,
    /// `muscleTargeting`
    MuscleTargeting,
}

impl SessionField {
    /// Every field in declaration order
    pub const ALL: [Self; 13] = [
        Self::TodaysFocus,
        Self::DailyIntensityLevel,
        Self::TimeConstraintsToday,
        Self::EquipmentAvailableToday,
        Self::HealthRestrictionsToday,
        Self::LocationToday,
        Self::Environment,
        Self::EnergyLevel,
        Self::MoodLevel,
        Self::SleepQuality,
        Self::WorkoutCustomization,
        Self::FocusArea,
        Self::MuscleTargeting,
    ];

    /// camelCase key used by panels and error maps
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::TodaysFocus => "todaysFocus",
            Self::DailyIntensityLevel => "dailyIntensityLevel",
            Self::TimeConstraintsToday => "timeConstraintsToday",
            Self::EquipmentAvailableToday => "equipmentAvailableToday",
            Self::HealthRestrictionsToday => "healthRestrictionsToday",
            Self::LocationToday => "locationToday",
            Self::Environment => "environment",
            Self::EnergyLevel => "energyLevel",
            Self::MoodLevel => "moodLevel",
            Self::SleepQuality => "sleepQuality",
            Self::WorkoutCustomization => "workoutCustomization",
            Self::FocusArea => "focusArea",
            Self::MuscleTargeting => "muscleTargeting",
        }
    }

    /// Look up a field by its camelCase key
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    /// Panel that owns this field
    #[must_use]
    pub const fn panel(&self) -> Panel {
        match self {
            Self::TodaysFocus => Panel::Focus,
            Self::DailyIntensityLevel => Panel::Intensity,
            Self::TimeConstraintsToday => Panel::Duration,
            Self::EquipmentAvailableToday => Panel::Equipment,
            Self::HealthRestrictionsToday => Panel::Restrictions,
            Self::LocationToday | Self::Environment => Panel::Location,
            Self::EnergyLevel => Panel::Energy,
            Self::MoodLevel => Panel::Mood,
            Self::SleepQuality => Panel::Sleep,
            Self::WorkoutCustomization => Panel::Customization,
            Self::FocusArea | Self::MuscleTargeting => Panel::MuscleTargeting,
        }
    }
}

impl fmt::Display for SessionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The eleven logical input panels tracked for completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    /// Today's focus
    Focus,
    /// Intensity slider
    Intensity,
    /// Time available
    Duration,
    /// Equipment checklist
    Equipment,
    /// Health restrictions checklist
    Restrictions,
    /// Location / environment picker
    Location,
    /// Mood scale
    Mood,
    /// Energy scale
    Energy,
    /// Sleep scale
    Sleep,
    /// Free-text customization
    Customization,
    /// Muscle targeting picker
    MuscleTargeting,
}

impl Panel {
    /// Every panel in display order
    pub const ALL: [Self; 11] = [
        Self::Focus,
        Self::Intensity,
        Self::Duration,
        Self::Equipment,
        Self::Restrictions,
        Self::Location,
        Self::Mood,
        Self::Energy,
        Self::Sleep,
        Self::Customization,
        Self::MuscleTargeting,
    ];
}
