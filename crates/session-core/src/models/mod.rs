// ABOUTME: Core data models for the workout session parameter engine
// ABOUTME: Re-exports session inputs, profile records, muscle selections, and semantic enums
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Workout Session Engine Contributors

//! # Data Models
//!
//! - `SessionInputs`: raw per-panel values for the active editing session
//! - `UserProfile` / `ProfileContext`: long-lived preferences and their derived view
//! - `MuscleSelectionData`: the separately persisted muscle-targeting selection
//! - `DirectParameters`: fields a caller pre-sets outside the panels
//! - Semantic enums (`FitnessLevel`, `StressLevel`, ...) produced by the mapping tables
//!
//! Panel values that carry a tag vocabulary (focus, location) stay as raw
//! strings on `SessionInputs` so validation can report out-of-vocabulary input
//! and resolution can fall back to defaults.

mod direct;
mod fitness;
mod muscle;
mod profile;
mod session;

pub use direct::DirectParameters;
pub use fitness::{
    EnergyLevel, ExerciseComplexity, FitnessLevel, SleepQuality, StressLevel,
    TrainingEnvironment, WorkoutFocus,
};
pub use muscle::{MuscleSelectionData, MuscleTargeting};
pub use profile::{ProfileContext, ProfileState, UserProfile};
pub use session::{Panel, SessionField, SessionInputs};
