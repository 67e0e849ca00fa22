// ABOUTME: Session parameter resolution engine: mapping tables, profile integration, validation
// ABOUTME: Pure functions over session-core models, extracted for deterministic testing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Workout Session Engine Contributors

#![deny(unsafe_code)]

//! # Session Intelligence
//!
//! Everything in this crate is synchronous and referentially transparent:
//! profile and muscle data are passed in explicitly, so `resolve` called twice
//! with the same inputs returns the same payload.

/// Static lookup tables from panel scales and tags to semantic values
pub mod mapping;

/// Profile context derivation, intensity/complexity priority chains, completeness
pub mod profile;

/// Canonical resolved parameter set sent to the generation service
pub mod resolution;

/// Range, vocabulary, and length checks plus completion bookkeeping
pub mod validation;

pub use resolution::{ParameterResolver, ParameterSource, ResolvedParameters};
pub use validation::{SessionValidator, ValidationResult};
