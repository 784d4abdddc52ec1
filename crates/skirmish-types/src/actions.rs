//! Action and turn-result types exchanged between the engine and its host.
//!
//! A unit chooses at most one [`Action`] per turn. Every attempt the host
//! turns down is recorded as a [`Rejection`], and the turn as a whole ends
//! in exactly one [`TurnOutcome`].

use serde::{Deserialize, Serialize};

use crate::enums::{Role, Team, UpgradeTrack};
use crate::geometry::{Direction, Location};
use crate::ids::UnitId;

/// A single action a unit can ask the host to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Create a new combat unit in the adjacent cell.
    Spawn(Direction),
    /// Step into the adjacent cell.
    Move(Direction),
    /// Place a hazard owned by the acting unit's team on its own cell.
    LayHazard,
    /// Remove the hazard at the given (adjacent or own) cell.
    ClearHazard(Location),
    /// Invest one round of research into an upgrade.
    Research(UpgradeTrack),
}

impl Action {
    /// Short lowercase label for logging.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Spawn(_) => "spawn",
            Self::Move(_) => "move",
            Self::LayHazard => "lay_hazard",
            Self::ClearHazard(_) => "clear_hazard",
            Self::Research(_) => "research",
        }
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spawn(dir) => write!(f, "spawn {dir}"),
            Self::Move(dir) => write!(f, "move {dir}"),
            Self::LayHazard => f.write_str("lay hazard"),
            Self::ClearHazard(loc) => write!(f, "clear hazard at {loc}"),
            Self::Research(track) => write!(f, "research {track}"),
        }
    }
}

/// Why the host refused an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// The target cell already holds a unit.
    Occupied,
    /// The target cell cannot be entered.
    Impassable,
    /// The target lies outside the map.
    OutOfBounds,
    /// A hazard already exists where one would be laid.
    HazardPresent,
    /// There is no hazard to clear.
    NoHazard,
    /// The upgrade is already fully researched.
    AlreadyComplete,
    /// The team cannot afford the action.
    InsufficientPower,
    /// The unit is not active this turn.
    Inactive,
    /// The unit's role may not perform this action.
    NotPermitted,
    /// The target could not be sensed.
    Unobservable,
}

impl core::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let text = match self {
            Self::Occupied => "target cell is occupied",
            Self::Impassable => "target cell is impassable",
            Self::OutOfBounds => "target is off the map",
            Self::HazardPresent => "a hazard is already there",
            Self::NoHazard => "no hazard to clear",
            Self::AlreadyComplete => "upgrade already complete",
            Self::InsufficientPower => "not enough team power",
            Self::Inactive => "unit is not active",
            Self::NotPermitted => "role cannot perform this action",
            Self::Unobservable => "target cannot be sensed",
        };
        f.write_str(text)
    }
}

/// An attempted action the host turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    /// The action that was attempted.
    pub action: Action,
    /// The host's reason for refusing it.
    pub reason: RejectionReason,
}

/// How a unit's turn ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnOutcome {
    /// The unit performed exactly this action.
    Acted(Action),
    /// Every candidate was declined or none applied; no action taken.
    Idle,
    /// The role has no policy yet; the turn is a deliberate no-op.
    NotImplemented(Role),
    /// An unanticipated host failure ended the turn early.
    Forfeited {
        /// Description of the failure.
        error: String,
    },
}

impl TurnOutcome {
    /// The action taken this turn, if any.
    pub const fn action(&self) -> Option<Action> {
        match self {
            Self::Acted(action) => Some(*action),
            Self::Idle | Self::NotImplemented(_) | Self::Forfeited { .. } => None,
        }
    }
}

/// Everything observable about one unit's turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    /// The acting unit.
    pub unit_id: UnitId,
    /// The unit's team.
    pub team: Team,
    /// The role whose policy ran.
    pub role: Role,
    /// Where the unit stood when the turn began.
    pub location: Location,
    /// How the turn ended.
    pub outcome: TurnOutcome,
    /// Attempts the host refused before the turn ended, in order.
    pub rejections: Vec<Rejection>,
}
