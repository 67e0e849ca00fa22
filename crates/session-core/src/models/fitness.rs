// ABOUTME: Semantic enumerations for fitness level, wellbeing scales, focus, and environment
// ABOUTME: Wire names match the generation service vocabulary (snake_case or kebab-case)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Workout Session Engine Contributors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fitness level as recorded on the user profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitnessLevel {
    /// New to structured training
    Beginner,
    /// Trains regularly
    #[default]
    Intermediate,
    /// Experienced athlete
    Advanced,
}

impl FitnessLevel {
    /// Parse from a profile string, falling back to `Intermediate`
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Self::Beginner,
            "advanced" => Self::Advanced,
            _ => Self::Intermediate,
        }
    }

    /// Wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for FitnessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exercise complexity derived from fitness level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseComplexity {
    /// Simple movement patterns
    Basic,
    /// Compound movements with moderate coordination demand
    Moderate,
    /// Technical lifts and complex sequences
    Advanced,
}

/// Stress level derived from the mood panel (a good mood means low stress)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressLevel {
    /// Very stressed
    VeryHigh,
    /// Stressed
    High,
    /// Neutral
    Moderate,
    /// Relaxed
    Low,
}

/// Energy level derived from the energy panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyLevel {
    /// Exhausted
    VeryLow,
    /// Tired
    Low,
    /// Normal
    Moderate,
    /// Energetic
    High,
    /// Fully charged
    VeryHigh,
}

/// Sleep quality derived from the sleep panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepQuality {
    /// Poor sleep
    Poor,
    /// Fair sleep
    Fair,
    /// Good sleep
    Good,
    /// Excellent sleep
    Excellent,
}

/// Focus tag chosen on the focus panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkoutFocus {
    /// Fat loss oriented session
    FatBurning,
    /// Hypertrophy oriented session
    MuscleBuilding,
    /// Aerobic endurance
    Endurance,
    /// Maximal strength
    Strength,
    /// Mobility and flexibility
    Flexibility,
    /// Balanced general fitness
    GeneralFitness,
}

impl WorkoutFocus {
    /// Every focus tag in panel order
    pub const ALL: [Self; 6] = [
        Self::FatBurning,
        Self::MuscleBuilding,
        Self::Endurance,
        Self::Strength,
        Self::Flexibility,
        Self::GeneralFitness,
    ];

    /// Parse a raw panel tag
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|focus| focus.as_str() == tag)
    }

    /// Wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FatBurning => "fat-burning",
            Self::MuscleBuilding => "muscle-building",
            Self::Endurance => "endurance",
            Self::Strength => "strength",
            Self::Flexibility => "flexibility",
            Self::GeneralFitness => "general-fitness",
        }
    }
}

/// Training environment chosen on the location panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrainingEnvironment {
    /// At home
    Home,
    /// Commercial gym
    Gym,
    /// Outside
    Outdoors,
    /// Hotel room or away from usual setup
    Travel,
    /// Small room or office
    LimitedSpace,
}

impl TrainingEnvironment {
    /// Every environment tag in panel order
    pub const ALL: [Self; 5] = [
        Self::Home,
        Self::Gym,
        Self::Outdoors,
        Self::Travel,
        Self::LimitedSpace,
    ];

    /// Parse a raw panel tag
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|env| env.as_str() == tag)
    }

    /// Wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Gym => "gym",
            Self::Outdoors => "outdoors",
            Self::Travel => "travel",
            Self::LimitedSpace => "limited-space",
        }
    }
}
