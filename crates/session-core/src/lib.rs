// ABOUTME: Core types and constants for the workout session parameter engine
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Workout Session Engine Contributors

#![deny(unsafe_code)]

//! # Session Core
//!
//! Foundation crate providing the shared types and constants for the workout
//! session engine. This crate changes infrequently and has no async or I/O
//! dependencies, so the pure resolution crate and the application crate can
//! both build on it.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: Limits, defaults, cache TTLs, and environment variable names
//! - **models**: Session inputs, profile records, muscle selections, and semantic enums

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (session inputs, profile, muscle selection)
pub mod models;
