//! Enumeration types shared by the decision engine and its hosts.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Teams
// ---------------------------------------------------------------------------

/// One of the two opposing sides of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Team {
    /// The first team.
    A,
    /// The second team.
    B,
}

impl Team {
    /// The other team.
    pub const fn opponent(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

impl core::fmt::Display for Team {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::A => f.write_str("A"),
            Self::B => f.write_str("B"),
        }
    }
}

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

/// The behavioral category of a unit.
///
/// Each role maps to exactly one policy in the decision engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The team headquarters: spawns units and funds research.
    Command,
    /// Mobile soldier: moves, lays and clears hazards.
    Combat,
    /// Supply depot encampment.
    Supply,
    /// Artillery encampment.
    Artillery,
    /// Power generator encampment.
    Power,
    /// Medical bay encampment.
    Medical,
    /// Shield generator encampment.
    Shield,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Command,
        Self::Combat,
        Self::Supply,
        Self::Artillery,
        Self::Power,
        Self::Medical,
        Self::Shield,
    ];

    /// Short lowercase label for logging.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Command => "command",
            Self::Combat => "combat",
            Self::Supply => "supply",
            Self::Artillery => "artillery",
            Self::Power => "power",
            Self::Medical => "medical",
            Self::Shield => "shield",
        }
    }

    /// Whether the unit can change location.
    pub const fn is_mobile(self) -> bool {
        matches!(self, Self::Combat)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Upgrades
// ---------------------------------------------------------------------------

/// A researchable team-wide improvement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeTrack {
    /// Reduces power upkeep.
    Fusion,
    /// Extends sensing radius.
    Vision,
    /// Faster hazard laying.
    Pickaxe,
    /// Faster hazard clearing.
    Defusion,
    /// Wins the match outright once complete.
    Nuke,
}

impl UpgradeTrack {
    /// Every track, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Fusion,
        Self::Vision,
        Self::Pickaxe,
        Self::Defusion,
        Self::Nuke,
    ];

    /// Rounds of research needed to complete the track by default.
    pub const fn default_rounds(self) -> u32 {
        match self {
            Self::Fusion | Self::Vision | Self::Pickaxe | Self::Defusion => 25,
            Self::Nuke => 404,
        }
    }
}

impl core::fmt::Display for UpgradeTrack {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Fusion => "FUSION",
            Self::Vision => "VISION",
            Self::Pickaxe => "PICKAXE",
            Self::Defusion => "DEFUSION",
            Self::Nuke => "NUKE",
        };
        f.write_str(name)
    }
}
