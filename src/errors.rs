// ABOUTME: Re-exports the unified error types from session-core
// ABOUTME: Keeps `crate::errors::AppError` paths stable across the application crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Workout Session Engine Contributors

pub use session_core::errors::{AppError, AppResult, ErrorCode};
