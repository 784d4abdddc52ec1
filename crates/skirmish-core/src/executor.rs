//! Action execution against the host.
//!
//! [`attempt`] forwards an [`Action`] to the matching [`Host`] call and
//! folds the answer into a plain `bool`: `true` when the host carried it
//! out, `false` when it was refused for an expected reason. Refusals are
//! logged and recorded; only failures the engine cannot anticipate are
//! returned as errors.

use skirmish_types::{Action, HostError, Rejection};
use tracing::debug;

use crate::host::Host;

/// Diagnostic slot holding the unit's last successful action.
pub const LAST_ACTION_SLOT: usize = 0;

/// Forward `action` to the host call that performs it.
///
/// # Errors
///
/// Returns whatever the host reports.
pub fn dispatch<H: Host + ?Sized>(host: &mut H, action: Action) -> Result<(), HostError> {
    match action {
        Action::Spawn(direction) => host.attempt_spawn(direction),
        Action::Move(direction) => host.attempt_move(direction),
        Action::LayHazard => host.attempt_lay_hazard(),
        Action::ClearHazard(location) => host.attempt_clear_hazard(location),
        Action::Research(track) => host.request_research(track),
    }
}

/// Try `action`, recording a [`Rejection`] when the host refuses it.
///
/// On success the unit's diagnostic label is updated.
///
/// # Errors
///
/// Returns the host error when it is not recoverable
/// (see [`HostError::is_recoverable`]).
pub fn attempt<H: Host + ?Sized>(
    host: &mut H,
    action: Action,
    rejections: &mut Vec<Rejection>,
) -> Result<bool, HostError> {
    match dispatch(host, action) {
        Ok(()) => {
            host.set_diagnostic_label(LAST_ACTION_SLOT, &label_for(action));
            Ok(true)
        }
        Err(err) if err.is_recoverable() => {
            debug!(action = action.kind(), error = %err, "action refused");
            rejections.push(Rejection {
                action,
                reason: err.rejection_reason(),
            });
            Ok(false)
        }
        Err(err) => Err(err),
    }
}

fn label_for(action: Action) -> String {
    match action {
        Action::Move(direction) => format!("last move: {direction}"),
        Action::Spawn(direction) => format!("last spawn: {direction}"),
        Action::Research(track) => format!("researching: {track}"),
        Action::LayHazard => String::from("laid hazard"),
        Action::ClearHazard(location) => format!("cleared hazard at {location}"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use skirmish_types::{Direction, Location, RejectionReason, UpgradeTrack};

    use super::*;
    use crate::testing::{Call, ScriptedHost};

    #[test]
    fn success_sets_the_label() {
        let mut host = ScriptedHost::soldier(Location::new(2, 2));
        let mut rejections = Vec::new();

        let done = attempt(&mut host, Action::Move(Direction::East), &mut rejections).unwrap();

        assert!(done);
        assert!(rejections.is_empty());
        assert_eq!(host.location, Location::new(3, 2));
        assert_eq!(
            host.labels.get(&LAST_ACTION_SLOT).map(String::as_str),
            Some("last move: EAST")
        );
    }

    #[test]
    fn illegal_action_is_recorded_not_raised() {
        let mut host = ScriptedHost::command(Location::new(2, 2));
        host.reject_research = true;
        let mut rejections = Vec::new();

        let done = attempt(
            &mut host,
            Action::Research(UpgradeTrack::Nuke),
            &mut rejections,
        )
        .unwrap();

        assert!(!done);
        assert_eq!(
            rejections,
            vec![Rejection {
                action: Action::Research(UpgradeTrack::Nuke),
                reason: RejectionReason::AlreadyComplete,
            }]
        );
        assert!(host.labels.is_empty());
        assert_eq!(host.calls, vec![Call::Research(UpgradeTrack::Nuke)]);
    }

    #[test]
    fn unavailable_host_is_raised() {
        let mut host = ScriptedHost::soldier(Location::new(2, 2));
        host.unavailable = true;
        let mut rejections = Vec::new();

        let result = attempt(&mut host, Action::LayHazard, &mut rejections);

        assert!(matches!(result, Err(HostError::Unavailable { .. })));
        assert!(rejections.is_empty());
    }

    #[test]
    fn dispatch_routes_each_action() {
        let mut host = ScriptedHost::soldier(Location::new(2, 2));
        host.hazards.insert(Location::new(2, 3), skirmish_types::Team::B);

        dispatch(&mut host, Action::ClearHazard(Location::new(2, 3))).unwrap();
        dispatch(&mut host, Action::LayHazard).unwrap();

        assert_eq!(
            host.calls,
            vec![Call::ClearHazard(Location::new(2, 3)), Call::LayHazard]
        );
        assert!(!host.hazards.contains_key(&Location::new(2, 3)));
        assert_eq!(
            host.hazards.get(&Location::new(2, 2)),
            Some(&skirmish_types::Team::A)
        );
    }
}
