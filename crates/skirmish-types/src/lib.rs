//! Shared type definitions for the Skirmish decision engine.
//!
//! These types describe the grid, the units on it, and the actions the
//! engine asks a simulation host to perform. Both the decision engine and
//! any host implementation depend on this crate.
//!
//! # Modules
//!
//! - [`geometry`] -- Grid [`Location`]s and compass [`Direction`]s
//! - [`enums`] -- Teams, unit roles, and upgrade tracks
//! - [`ids`] -- Type-safe unit identifiers
//! - [`actions`] -- Actions, rejections, and per-turn outcomes
//! - [`error`] -- The [`HostError`] reported by hosts
//! - [`unit`] -- The acting [`Unit`] snapshot

pub mod actions;
pub mod enums;
pub mod error;
pub mod geometry;
pub mod ids;
pub mod unit;

// Re-export all public types at crate root for convenience.
pub use actions::{Action, Rejection, RejectionReason, TurnOutcome, TurnReport};
pub use enums::{Role, Team, UpgradeTrack};
pub use error::HostError;
pub use geometry::{Direction, Location};
pub use ids::UnitId;
pub use unit::Unit;
