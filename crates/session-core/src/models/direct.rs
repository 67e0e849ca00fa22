// ABOUTME: Explicit request fields a caller may pre-set alongside the panel inputs
// ABOUTME: Used as fallbacks (and for intensity/complexity as overrides) during resolution
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Workout Session Engine Contributors

use super::fitness::{EnergyLevel, ExerciseComplexity, SleepQuality, StressLevel};
use serde::{Deserialize, Serialize};

/// Direct request fields, keyed the way the generation payload names them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectParameters {
    /// Duration in minutes (the session's time panel wins over this)
    pub duration: Option<u32>,
    /// Goal tag
    pub goals: Option<String>,
    /// Intensity on the 1-6 scale; highest priority for intensity
    pub intensity_level: Option<u8>,
    /// Legacy intensity field kept for older callers
    pub intensity: Option<u8>,
    /// Exercise complexity override
    pub exercise_complexity: Option<ExerciseComplexity>,
    /// Stress level
    pub stress_level: Option<StressLevel>,
    /// Energy level
    pub energy_level: Option<EnergyLevel>,
    /// Sleep quality
    pub sleep_quality: Option<SleepQuality>,
    /// Location tag
    pub location: Option<String>,
    /// Notes prepended to the customization text
    pub custom_notes: Option<String>,
    /// Preferences appended to the customization text
    pub preferences: Option<String>,
    /// Muscle group to emphasise
    pub primary_muscle_focus: Option<String>,
}
