// ABOUTME: Static lookup tables translating 1-6 panel scales and focus tags to semantic values
// ABOUTME: Every table is total: unknown input falls back to a defined default, never fails
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Workout Session Engine Contributors

use session_core::constants::defaults;
use session_core::models::{
    EnergyLevel, ExerciseComplexity, FitnessLevel, SleepQuality, StressLevel, WorkoutFocus,
};

/// Mood scale to stress level. A better mood is lower stress; 4 and up are all `Low`.
#[must_use]
pub const fn map_mood(level: u8) -> StressLevel {
    match level {
        1 => StressLevel::VeryHigh,
        2 => StressLevel::High,
        4..=u8::MAX => StressLevel::Low,
        _ => StressLevel::Moderate,
    }
}

/// Energy scale to energy level. 5 and above clamp to `VeryHigh`.
#[must_use]
pub const fn map_energy(level: u8) -> EnergyLevel {
    match level {
        1 => EnergyLevel::VeryLow,
        2 => EnergyLevel::Low,
        4 => EnergyLevel::High,
        5..=u8::MAX => EnergyLevel::VeryHigh,
        _ => EnergyLevel::Moderate,
    }
}

/// Sleep scale to sleep quality
#[must_use]
pub const fn map_sleep(level: u8) -> SleepQuality {
    match level {
        1 | 2 => SleepQuality::Poor,
        4 | 5 => SleepQuality::Good,
        6..=u8::MAX => SleepQuality::Excellent,
        _ => SleepQuality::Fair,
    }
}

/// Focus tag to goal tag; unknown focus maps to `general-fitness`
#[must_use]
pub fn map_focus_to_goal(focus: &str) -> &'static str {
    match WorkoutFocus::parse(focus) {
        Some(WorkoutFocus::FatBurning) => "lose-weight",
        Some(WorkoutFocus::MuscleBuilding) => "build-muscle",
        Some(WorkoutFocus::Endurance) => "improve-endurance",
        Some(WorkoutFocus::Strength) => "increase-strength",
        Some(WorkoutFocus::Flexibility) => "improve-flexibility",
        Some(WorkoutFocus::GeneralFitness) | None => defaults::GOAL,
    }
}

/// Default intensity for a fitness level
#[must_use]
pub const fn map_fitness_to_intensity(level: FitnessLevel) -> u8 {
    match level {
        FitnessLevel::Beginner => 2,
        FitnessLevel::Intermediate => 3,
        FitnessLevel::Advanced => 4,
    }
}

/// Default exercise complexity for a fitness level
#[must_use]
pub const fn map_fitness_to_complexity(level: FitnessLevel) -> ExerciseComplexity {
    match level {
        FitnessLevel::Beginner => ExerciseComplexity::Basic,
        FitnessLevel::Intermediate => ExerciseComplexity::Moderate,
        FitnessLevel::Advanced => ExerciseComplexity::Advanced,
    }
}
