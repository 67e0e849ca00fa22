// ABOUTME: Main library entry point for the workout session parameter engine
// ABOUTME: Wires the session store, muscle synchronizer, local cache, and resolution facade
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Workout Session Engine Contributors

#![deny(unsafe_code)]

//! # Workout Session Engine
//!
//! Reconciles three sources into one canonical request payload for a
//! downstream workout generation service:
//!
//! - transient per-session selections written by eleven independent panels
//! - the longer-lived user profile
//! - a separately persisted muscle-targeting selection
//!
//! ## Architecture
//!
//! - **`session_core`**: errors, constants, and models shared by every crate
//! - **`session_intelligence`**: pure mapping, resolution, and validation
//! - **store**: the session input reducer with local snapshot persistence
//! - **`muscle_sync`**: debounced remote persistence of the muscle selection
//! - **session**: the `WorkoutSession` facade tying everything together
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use workout_session_engine::config::environment::EngineConfig;
//! use workout_session_engine::session::WorkoutSession;
//! use workout_session_engine::store::SessionCommand;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = EngineConfig::from_env()?;
//!     let session = WorkoutSession::from_config(&config).await?;
//!     session.initialize().await;
//!
//!     session.dispatch(SessionCommand::SetFocus("strength".to_owned())).await?;
//!     session.dispatch(SessionCommand::SetDuration(20)).await?;
//!
//!     let resolved = session.resolve().await;
//!     println!("{}", resolved.to_payload()?);
//!     Ok(())
//! }
//! ```

/// TTL-bounded local cache used for page-reload recovery
pub mod cache;

/// Configuration loaded from environment variables
pub mod config;

/// Unified error handling re-exported from `session-core`
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Remote persistence of the muscle-targeting selection
pub mod muscle_store;

/// Debounced synchronization of the muscle selection with its remote store
pub mod muscle_sync;

/// JSON input files consumed by the command-line resolver
pub mod request;

/// Session facade combining store, synchronizer, and profile state
pub mod session;

/// Session input store and its command reducer
pub mod store;

pub use session_core::models;
pub use session_intelligence::{
    mapping, profile, resolution, validation, ParameterResolver, ParameterSource,
    ResolvedParameters, SessionValidator, ValidationResult,
};
