//! Per-turn snapshot of the acting unit.

use serde::{Deserialize, Serialize};

use crate::enums::{Role, Team};
use crate::geometry::Location;
use crate::ids::UnitId;

/// What a unit knows about itself at the start of a turn.
///
/// Read fresh from the host every turn and never cached across turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Host-assigned identity.
    pub id: UnitId,
    /// Owning team.
    pub team: Team,
    /// Behavioral category.
    pub role: Role,
    /// Current cell.
    pub location: Location,
    /// Whether the unit may act this turn (no cooldown pending).
    pub active: bool,
}
