// ABOUTME: Command-line resolver turning session, profile, and muscle JSON files into a generation payload
// ABOUTME: Subcommands resolve, validate, completion, and submit print JSON on stdout and log on stderr
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Workout Session Engine Contributors

//! Usage:
//! ```bash
//! # Resolve a combined request document
//! session-resolve resolve --request request.json --pretty
//!
//! # Resolve from separate part files
//! session-resolve resolve --session session.json --profile profile.json --muscles muscles.json
//!
//! # Validate raw and resolved parameters (exit code 1 when invalid)
//! session-resolve validate --request request.json
//!
//! # Completion and profile completeness
//! session-resolve completion --request request.json
//!
//! # Drive a live session: restore, sync muscles with MUSCLE_SELECTION_API_URL, submit
//! session-resolve submit --request request.json
//! ```

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::{json, Value};
use session_core::constants::limits::DEFAULT_MAX_MUSCLE_GROUPS;
use session_core::models::ProfileState;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};
use workout_session_engine::config::EngineConfig;
use workout_session_engine::logging::LoggingConfig;
use workout_session_engine::profile::{missing_profile_fields, profile_completeness};
use workout_session_engine::request::{RequestFiles, ResolveRequest};
use workout_session_engine::session::WorkoutSession;
use workout_session_engine::{SessionValidator, ValidationResult};

#[derive(Parser)]
#[command(
    name = "session-resolve",
    about = "Workout session parameter resolution",
    long_about = "Resolve per-session panel inputs, the user profile, and the muscle selection into one canonical workout generation payload."
)]
struct ResolveArgs {
    #[command(subcommand)]
    command: ResolveCommand,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum ResolveCommand {
    /// Print the resolved generation payload
    Resolve(InputArgs),
    /// Validate raw inputs and the resolved parameters
    Validate(InputArgs),
    /// Report panel completion and profile completeness
    Completion(InputArgs),
    /// Run the request through a live session and print the submission payload
    Submit(InputArgs),
}

#[derive(Args)]
struct InputArgs {
    /// Combined request document
    #[arg(long)]
    request: Option<PathBuf>,

    /// Session inputs document
    #[arg(long)]
    session: Option<PathBuf>,

    /// Direct parameters document
    #[arg(long)]
    direct: Option<PathBuf>,

    /// User profile document
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Muscle selection document
    #[arg(long)]
    muscles: Option<PathBuf>,

    /// Maximum selectable muscle groups
    #[arg(long, default_value_t = DEFAULT_MAX_MUSCLE_GROUPS)]
    max_groups: usize,
}

impl InputArgs {
    async fn load(&self) -> Result<ResolveRequest> {
        RequestFiles {
            request: self.request.clone(),
            session: self.session.clone(),
            direct: self.direct.clone(),
            profile: self.profile.clone(),
            muscles: self.muscles.clone(),
        }
        .load()
        .await
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidationReport {
    is_valid: bool,
    inputs: ValidationResult,
    resolved: ValidationResult,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = ResolveArgs::parse();

    let mut logging = LoggingConfig::from_env();
    if args.verbose {
        logging.level = "debug".into();
    }
    logging.init()?;

    match args.command {
        ResolveCommand::Resolve(input) => {
            let request = input.load().await?;
            let payload = request.resolve().to_payload()?;
            print_json(&payload, args.pretty)?;
            Ok(ExitCode::SUCCESS)
        }
        ResolveCommand::Validate(input) => {
            let request = input.load().await?;
            let validator = SessionValidator::new(input.max_groups);
            let inputs = request.validate(&validator);
            let resolved = validator.validate_resolved(&request.resolve());
            let report = ValidationReport {
                is_valid: inputs.is_valid && resolved.is_valid,
                inputs,
                resolved,
            };
            print_json(&report, args.pretty)?;
            if report.is_valid {
                Ok(ExitCode::SUCCESS)
            } else {
                warn!("Session failed validation");
                Ok(ExitCode::FAILURE)
            }
        }
        ResolveCommand::Completion(input) => {
            let request = input.load().await?;
            let report = json!({
                "completion": request.completion(),
                "missingRequiredFields": request.missing_required_fields(),
                "profileCompleteness": profile_completeness(request.profile.as_ref()),
                "missingProfileFields": missing_profile_fields(request.profile.as_ref()),
            });
            print_json(&report, args.pretty)?;
            Ok(ExitCode::SUCCESS)
        }
        ResolveCommand::Submit(input) => {
            let request = input.load().await?;
            let payload = submit(request, input.max_groups).await?;
            print_json(&payload, args.pretty)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn submit(request: ResolveRequest, max_groups: usize) -> Result<Value> {
    let mut config = EngineConfig::from_env()?;
    config.muscle_sync.max_groups = max_groups;
    config.validate()?;
    info!("{}", config.summary());

    let session = WorkoutSession::from_config(&config).await?;
    session.initialize().await;

    let fields = serde_json::to_value(&request.session)?;
    if let Value::Object(fields) = fields {
        for (key, value) in fields {
            session
                .set_field(&key, value)
                .await
                .with_context(|| format!("Rejected session field {key}"))?;
        }
    }
    if let Some(profile) = request.profile {
        session.set_profile(ProfileState::loaded(profile)).await;
    }
    session.set_direct(request.direct).await;

    if !request.muscles.is_empty() {
        session.muscle_sync().set_selection(request.muscles).await;
    }
    session.muscle_sync().wait_idle().await;

    Ok(session.submission_payload().await?)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}
