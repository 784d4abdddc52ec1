//! Match runner for the Skirmish decision engine.
//!
//! Plays one full match on the reference arena with the decision engine
//! controlling both teams, then logs how it ended.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from the path given on the command line, or
//!    `skirmish-config.yaml` (defaults when the file is missing)
//! 2. Initialize structured logging (tracing)
//! 3. Build the arena and the decision engine
//! 4. Run the match
//! 5. Log the result

mod error;
mod turn_log;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use skirmish_arena::{Arena, log_match_end, run_match};
use skirmish_core::config::{LogFormat, LoggingConfig, UpgradeConfig};
use skirmish_core::{DecisionEngine, EngineConfig};
use skirmish_types::UpgradeTrack;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::turn_log::TurnLog;

/// Config file read when no path is given.
const DEFAULT_CONFIG_PATH: &str = "skirmish-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the arena cannot
/// be built from it.
fn main() -> Result<(), EngineError> {
    // 1. Load configuration.
    let config_path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let (config, found) = load_config(&config_path)?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    info!("skirmish-engine starting");
    if found {
        info!(
            path = %config_path.display(),
            seed = ?config.decision.seed,
            command = ?config.decision.command,
            combat = ?config.decision.combat,
            "Configuration loaded"
        );
    } else {
        info!(path = %config_path.display(), "Config file not found, using defaults");
    }

    // 3. Build the arena and the engine.
    let mut arena = Arena::new(&config.arena)?.with_research_rounds(research_rounds(&config.upgrades));
    let mut engine = DecisionEngine::from_config(&config)?;
    info!(
        width = config.arena.width,
        height = config.arena.height,
        max_rounds = config.arena.max_rounds,
        priorities = ?engine.selector().priorities(),
        "Arena ready"
    );

    // 4. Run the match.
    let mut turn_log = TurnLog::new();
    let result = run_match(&mut arena, &mut engine, config.arena.max_rounds, &mut turn_log);

    // 5. Log the result.
    log_match_end(&result);
    turn_log.log_tallies();

    Ok(())
}

/// Load configuration, falling back to defaults when the file is absent.
///
/// The flag in the result tells whether the file was found.
fn load_config(path: &Path) -> Result<(EngineConfig, bool), EngineError> {
    if path.exists() {
        Ok((EngineConfig::from_file(path)?, true))
    } else {
        let mut config = EngineConfig::default();
        config.decision.apply_env_overrides();
        Ok((config, false))
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the configured
/// level.
fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

/// Completion rounds per track as the selector sees them, so the arena
/// and the engine agree on when research is done.
fn research_rounds(upgrades: &UpgradeConfig) -> BTreeMap<UpgradeTrack, u32> {
    UpgradeTrack::ALL
        .into_iter()
        .map(|track| (track, upgrades.threshold(track)))
        .collect()
}
