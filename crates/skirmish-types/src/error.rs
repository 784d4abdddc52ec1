//! Error type reported by simulation hosts.
//!
//! Hosts return [`HostError`] from every fallible sensor query and action
//! attempt. The decision engine treats all variants except
//! [`HostError::Unavailable`] as expected, recoverable outcomes.

use crate::actions::{Action, RejectionReason};
use crate::geometry::Location;
use crate::ids::UnitId;

/// Failures a host can report to the decision engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// The action is not legal in the current game state.
    #[error("illegal action ({action}): {reason}")]
    IllegalAction {
        /// The refused action.
        action: Action,
        /// Why it was refused.
        reason: RejectionReason,
    },

    /// A previously sensed unit can no longer be observed.
    #[error("stale reference to unit {0}")]
    StaleReference(UnitId),

    /// A sensor query targeted a location the unit cannot inspect.
    #[error("invalid query at {location}")]
    InvalidQuery {
        /// The queried location.
        location: Location,
    },

    /// The host failed in a way the engine cannot anticipate.
    #[error("host unavailable: {message}")]
    Unavailable {
        /// Description of the failure.
        message: String,
    },
}

impl HostError {
    /// Whether the engine may shrug this error off and try the next
    /// candidate instead of forfeiting the turn.
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Unavailable { .. })
    }

    /// The rejection reason to record when this error answers an action
    /// attempt.
    pub const fn rejection_reason(&self) -> RejectionReason {
        match self {
            Self::IllegalAction { reason, .. } => *reason,
            Self::StaleReference(_) | Self::InvalidQuery { .. } | Self::Unavailable { .. } => {
                RejectionReason::Unobservable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Direction;

    #[test]
    fn only_unavailable_is_fatal() {
        let illegal = HostError::IllegalAction {
            action: Action::Move(Direction::North),
            reason: RejectionReason::Impassable,
        };
        assert!(illegal.is_recoverable());
        assert!(HostError::StaleReference(UnitId::new(1)).is_recoverable());
        assert!(
            !HostError::Unavailable {
                message: String::from("engine crashed"),
            }
            .is_recoverable()
        );
    }

    #[test]
    fn illegal_action_message_names_the_action() {
        let err = HostError::IllegalAction {
            action: Action::Spawn(Direction::East),
            reason: RejectionReason::Occupied,
        };
        assert_eq!(err.to_string(), "illegal action (spawn EAST): target cell is occupied");
        assert_eq!(err.rejection_reason(), RejectionReason::Occupied);
    }
}
