//! Per-turn decision engine for units in a grid strategy game.
//!
//! A simulation host calls [`DecisionEngine::take_turn`] once for every
//! unit every round. The engine reads the unit's surroundings through the
//! [`Host`] trait, picks an action for its role, carries it out through
//! the same trait, and ends the turn.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `skirmish-config.yaml` into
//!   strongly-typed structs.
//! - [`host`] -- The [`Host`] trait a simulation implements.
//! - [`perception`] -- Sensor queries with failure fallbacks.
//! - [`direction`] -- Movement direction ordering and hazard filtering.
//! - [`upgrade`] -- Research target selection.
//! - [`executor`] -- Action attempts and rejection bookkeeping.
//! - [`policy`] -- One policy per unit role.
//! - [`engine`] -- The [`DecisionEngine`] and [`TurnObserver`] sink.
//!
//! [`DecisionEngine`]: engine::DecisionEngine
//! [`DecisionEngine::take_turn`]: engine::DecisionEngine::take_turn
//! [`TurnObserver`]: engine::TurnObserver
//! [`Host`]: host::Host

pub mod config;
pub mod direction;
pub mod engine;
pub mod executor;
pub mod host;
pub mod perception;
pub mod policy;
pub mod upgrade;

#[cfg(test)]
mod testing;

pub use config::{ConfigError, EngineConfig};
pub use engine::{DecisionEngine, NoOpObserver, TurnObserver};
pub use host::Host;
pub use upgrade::{SelectorError, UpgradeSelector};
