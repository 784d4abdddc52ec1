//! Side-effect free queries over the host's sensors.
//!
//! [`Perception`] wraps a borrowed [`Host`] and answers the questions the
//! policies ask: who is nearby, where are they, and who owns the hazard on
//! a given cell. Sensor failures never reach the caller: an invalid hazard
//! query reads as "no hazard", and a stale unit reference is dropped from
//! the answer.

use skirmish_types::{Location, Team, UnitId};
use tracing::debug;

use crate::host::Host;

/// Read-only view of one unit's surroundings for the current turn.
pub struct Perception<'a, H: Host + ?Sized> {
    host: &'a H,
    team: Team,
    enemy_radius: u32,
    friendly_radius: u32,
}

impl<'a, H: Host + ?Sized> Perception<'a, H> {
    /// Build a view for the unit controlled by `host`.
    ///
    /// Both radii are squared distances.
    pub fn new(host: &'a H, enemy_radius: u32, friendly_radius: u32) -> Self {
        Self {
            host,
            team: host.team(),
            enemy_radius,
            friendly_radius,
        }
    }

    /// Team of the observing unit.
    pub const fn team(&self) -> Team {
        self.team
    }

    /// Owner of the hazard at `location`, or `None` when there is no
    /// hazard or the cell cannot be sensed.
    pub fn hazard_at(&self, location: Location) -> Option<Team> {
        match self.host.sense_hazard(location) {
            Ok(owner) => owner,
            Err(err) => {
                debug!(%location, error = %err, "hazard query failed, treating cell as clear");
                None
            }
        }
    }

    /// Whether `location` holds a hazard owned by the opposing team.
    pub fn is_enemy_hazard(&self, location: Location) -> bool {
        self.hazard_at(location) == Some(self.team.opponent())
    }

    /// Units of `team` within `radius_squared`, in host order.
    pub fn nearby(&self, team: Team, radius_squared: u32) -> Vec<UnitId> {
        self.host.sense_nearby(team, radius_squared)
    }

    /// Opposing units within the enemy sensing radius.
    pub fn nearby_enemies(&self) -> Vec<UnitId> {
        self.nearby(self.team.opponent(), self.enemy_radius)
    }

    /// Own-team units within the friendly sensing radius.
    pub fn nearby_friendlies(&self) -> Vec<UnitId> {
        self.nearby(self.team, self.friendly_radius)
    }

    /// Current locations of `units`, skipping any that can no longer be
    /// observed.
    pub fn locate(&self, units: &[UnitId]) -> Vec<Location> {
        units
            .iter()
            .filter_map(|&unit| match self.host.sense_location_of(unit) {
                Ok(location) => Some(location),
                Err(err) => {
                    debug!(unit_id = %unit, error = %err, "dropping unobservable unit");
                    None
                }
            })
            .collect()
    }

    /// Whether no unit stands on `location`.
    ///
    /// A cell that cannot be sensed counts as occupied, so nothing is ever
    /// spawned into it.
    pub fn is_free(&self, location: Location) -> bool {
        match self.host.sense_occupant(location) {
            Ok(occupant) => occupant.is_none(),
            Err(err) => {
                debug!(%location, error = %err, "occupancy query failed, treating cell as taken");
                false
            }
        }
    }
}
