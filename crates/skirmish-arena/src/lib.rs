//! Reference arena host for the Skirmish decision engine.
//!
//! A small deterministic grid simulation that implements
//! [`Host`](skirmish_core::Host) so the engine can play full matches
//! without a real game server. Two teams start with a command unit each;
//! combat units are spawned for power, hazards destroy opposing units
//! that step on them, and the first team to finish its final research
//! wins.
//!
//! # Modules
//!
//! - [`arena`] -- Grid state and rules.
//! - [`controller`] -- Per-turn [`Host`](skirmish_core::Host) controller.
//! - [`play`] -- Round and match loop.
//! - [`error`] -- Setup errors.

pub mod arena;
pub mod controller;
pub mod error;
pub mod play;

pub use arena::{Arena, ArenaUnit};
pub use controller::UnitController;
pub use error::ArenaError;
pub use play::{MatchEnd, MatchResult, RoundSummary, log_match_end, run_match};
