// ABOUTME: Configuration management module for the session engine
// ABOUTME: Environment-only configuration; no config files are read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Workout Session Engine Contributors

/// Engine configuration parsed from environment variables
pub mod environment;

pub use environment::{EngineConfig, Environment, MuscleSyncConfig, RemoteStoreConfig};
