//! Roles with no decision logic yet.

use skirmish_types::{Role, TurnOutcome};

/// Outcome for a role that has no policy. The unit stays put.
pub const fn run(role: Role) -> TurnOutcome {
    TurnOutcome::NotImplemented(role)
}
