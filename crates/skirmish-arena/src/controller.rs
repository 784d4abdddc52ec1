//! [`Host`] implementation for one unit's turn.

use skirmish_core::Host;
use skirmish_types::{
    Action, Direction, HostError, Location, RejectionReason, Role, Team, UnitId, UpgradeTrack,
};

use crate::arena::{Arena, ArenaUnit};

/// Controller handed to the decision engine for a single unit turn.
///
/// Sensor answers are given from the unit's point of view. Self-state
/// reflects the unit after any action it took this turn.
pub struct UnitController<'a> {
    arena: &'a mut Arena,
    unit: ArenaUnit,
    turn_ended: bool,
}

impl<'a> UnitController<'a> {
    pub(crate) const fn new(arena: &'a mut Arena, unit: ArenaUnit) -> Self {
        Self {
            arena,
            unit,
            turn_ended: false,
        }
    }

    /// Whether the engine has ended this turn.
    pub const fn turn_ended(&self) -> bool {
        self.turn_ended
    }

    fn apply(
        &mut self,
        action: Action,
        result: Result<(), RejectionReason>,
    ) -> Result<(), HostError> {
        result.map_err(|reason| HostError::IllegalAction { action, reason })?;
        if let Some(unit) = self.arena.unit(self.unit.id) {
            self.unit = *unit;
        }
        Ok(())
    }

    fn on_map(&self, location: Location) -> Result<(), HostError> {
        if self.arena.config().contains(location) {
            Ok(())
        } else {
            Err(HostError::InvalidQuery { location })
        }
    }
}

impl Host for UnitController<'_> {
    fn unit_id(&self) -> UnitId {
        self.unit.id
    }

    fn role(&self) -> Role {
        self.unit.role
    }

    fn location(&self) -> Location {
        self.unit.location
    }

    fn is_active(&self) -> bool {
        self.unit.is_active()
    }

    fn team(&self) -> Team {
        self.unit.team
    }

    fn sense_hazard(&self, location: Location) -> Result<Option<Team>, HostError> {
        self.on_map(location)?;
        Ok(self.arena.hazard_at(location))
    }

    fn sense_nearby(&self, team: Team, radius_squared: u32) -> Vec<UnitId> {
        self.arena
            .nearby(self.unit.location, team, radius_squared, self.unit.id)
    }

    fn sense_location_of(&self, unit: UnitId) -> Result<Location, HostError> {
        self.arena
            .unit(unit)
            .map(|u| u.location)
            .ok_or(HostError::StaleReference(unit))
    }

    fn sense_occupant(&self, location: Location) -> Result<Option<UnitId>, HostError> {
        self.on_map(location)?;
        Ok(self.arena.occupant(location))
    }

    fn sense_enemy_base_location(&self) -> Location {
        self.arena.enemy_base(self.unit.team)
    }

    fn team_resources(&self, team: Team) -> f64 {
        self.arena.power(team)
    }

    fn research_progress(&self, track: UpgradeTrack) -> Result<u32, HostError> {
        Ok(self.arena.research_progress(self.unit.team, track))
    }

    fn can_move(&self, direction: Direction) -> bool {
        self.arena
            .destination(self.unit.location, direction)
            .is_ok()
    }

    fn request_research(&mut self, track: UpgradeTrack) -> Result<(), HostError> {
        let result = self.arena.research(self.unit.id, track);
        self.apply(Action::Research(track), result)
    }

    fn attempt_spawn(&mut self, direction: Direction) -> Result<(), HostError> {
        let result = self.arena.spawn(self.unit.id, direction);
        self.apply(Action::Spawn(direction), result)
    }

    fn attempt_move(&mut self, direction: Direction) -> Result<(), HostError> {
        let result = self.arena.move_unit(self.unit.id, direction);
        self.apply(Action::Move(direction), result)
    }

    fn attempt_lay_hazard(&mut self) -> Result<(), HostError> {
        let result = self.arena.lay_hazard(self.unit.id);
        self.apply(Action::LayHazard, result)
    }

    fn attempt_clear_hazard(&mut self, location: Location) -> Result<(), HostError> {
        let result = self.arena.clear_hazard(self.unit.id, location);
        self.apply(Action::ClearHazard(location), result)
    }

    fn end_turn(&mut self) {
        self.turn_ended = true;
    }

    fn set_diagnostic_label(&mut self, slot: usize, text: &str) {
        self.arena.set_label(self.unit.id, slot, text);
    }
}
