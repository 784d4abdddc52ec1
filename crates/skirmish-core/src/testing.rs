//! Scripted [`Host`] double for unit tests.
//!
//! Every knob is a public field so a test can stage exactly the situation
//! it needs, then inspect [`ScriptedHost::calls`] to see what was tried.

use std::collections::{BTreeMap, BTreeSet};

use rand::SeedableRng;
use rand::rngs::StdRng;
use skirmish_types::{
    Action, Direction, HostError, Location, RejectionReason, Role, Team, Unit, UnitId,
    UpgradeTrack,
};

use crate::config::DecisionConfig;
use crate::host::Host;
use crate::policy::TurnContext;
use crate::upgrade::UpgradeSelector;

/// An action attempt recorded by the scripted host, successful or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Spawn(Direction),
    Move(Direction),
    LayHazard,
    ClearHazard(Location),
    Research(UpgradeTrack),
}

#[derive(Debug, Clone)]
pub struct ScriptedHost {
    pub id: UnitId,
    pub team: Team,
    pub role: Role,
    pub location: Location,
    pub active: bool,
    pub resources: f64,
    pub enemy_base: Location,
    pub hazards: BTreeMap<Location, Team>,
    pub invalid_cells: BTreeSet<Location>,
    pub units: BTreeMap<UnitId, (Team, Location)>,
    pub stale: BTreeSet<UnitId>,
    pub progress: BTreeMap<UpgradeTrack, u32>,
    pub unreadable_progress: BTreeSet<UpgradeTrack>,
    pub blocked: BTreeSet<Direction>,
    pub refuse_moves: BTreeSet<Direction>,
    pub refuse_spawns: BTreeSet<Direction>,
    pub reject_research: bool,
    pub unavailable: bool,
    pub calls: Vec<Call>,
    pub end_turns: u32,
    pub labels: BTreeMap<usize, String>,
}

impl ScriptedHost {
    pub fn with_role(role: Role, location: Location) -> Self {
        Self {
            id: UnitId::new(1),
            team: Team::A,
            role,
            location,
            active: true,
            resources: 0.0,
            enemy_base: Location::new(20, 20),
            hazards: BTreeMap::new(),
            invalid_cells: BTreeSet::new(),
            units: BTreeMap::new(),
            stale: BTreeSet::new(),
            progress: BTreeMap::new(),
            unreadable_progress: BTreeSet::new(),
            blocked: BTreeSet::new(),
            refuse_moves: BTreeSet::new(),
            refuse_spawns: BTreeSet::new(),
            reject_research: false,
            unavailable: false,
            calls: Vec::new(),
            end_turns: 0,
            labels: BTreeMap::new(),
        }
    }

    pub fn command(location: Location) -> Self {
        Self::with_role(Role::Command, location)
    }

    pub fn soldier(location: Location) -> Self {
        Self::with_role(Role::Combat, location)
    }

    pub fn add_unit(&mut self, id: UnitId, team: Team, location: Location) {
        self.units.insert(id, (team, location));
    }

    /// Whether any recorded call was a spawn.
    pub fn spawned(&self) -> bool {
        self.calls.iter().any(|c| matches!(c, Call::Spawn(_)))
    }

    /// Whether any recorded call was research.
    pub fn researched(&self) -> bool {
        self.calls.iter().any(|c| matches!(c, Call::Research(_)))
    }

    /// Whether any recorded call was a move.
    pub fn moved(&self) -> bool {
        self.calls.iter().any(|c| matches!(c, Call::Move(_)))
    }

    fn occupant(&self, location: Location) -> Option<UnitId> {
        if location == self.location {
            return Some(self.id);
        }
        self.units
            .iter()
            .find(|(_, (_, loc))| *loc == location)
            .map(|(&id, _)| id)
    }

    fn check_available(&self) -> Result<(), HostError> {
        if self.unavailable {
            return Err(HostError::Unavailable {
                message: String::from("scripted outage"),
            });
        }
        Ok(())
    }
}

/// Run `f` with a turn context over `host`, seeded for repeatable shuffles.
pub fn with_context<T>(
    host: &mut ScriptedHost,
    decision: &DecisionConfig,
    selector: &UpgradeSelector,
    f: impl FnOnce(&mut TurnContext<'_, ScriptedHost, StdRng>) -> T,
) -> T {
    with_seeded_context(host, decision, selector, 7, f)
}

/// [`with_context`] with an explicit seed.
pub fn with_seeded_context<T>(
    host: &mut ScriptedHost,
    decision: &DecisionConfig,
    selector: &UpgradeSelector,
    seed: u64,
    f: impl FnOnce(&mut TurnContext<'_, ScriptedHost, StdRng>) -> T,
) -> T {
    let unit = Unit {
        id: host.id,
        team: host.team,
        role: host.role,
        location: host.location,
        active: host.active,
    };
    let mut rng = StdRng::seed_from_u64(seed);
    let mut ctx = TurnContext::new(host, unit, &mut rng, decision, selector);
    f(&mut ctx)
}

fn illegal(action: Action, reason: RejectionReason) -> HostError {
    HostError::IllegalAction { action, reason }
}

impl Host for ScriptedHost {
    fn unit_id(&self) -> UnitId {
        self.id
    }

    fn role(&self) -> Role {
        self.role
    }

    fn location(&self) -> Location {
        self.location
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn team(&self) -> Team {
        self.team
    }

    fn sense_hazard(&self, location: Location) -> Result<Option<Team>, HostError> {
        if self.invalid_cells.contains(&location) {
            return Err(HostError::InvalidQuery { location });
        }
        Ok(self.hazards.get(&location).copied())
    }

    fn sense_nearby(&self, team: Team, radius_squared: u32) -> Vec<UnitId> {
        self.units
            .iter()
            .filter(|(_, (t, loc))| {
                *t == team && self.location.distance_squared_to(*loc) <= radius_squared
            })
            .map(|(&id, _)| id)
            .collect()
    }

    fn sense_location_of(&self, unit: UnitId) -> Result<Location, HostError> {
        if self.stale.contains(&unit) {
            return Err(HostError::StaleReference(unit));
        }
        self.units
            .get(&unit)
            .map(|&(_, loc)| loc)
            .ok_or(HostError::StaleReference(unit))
    }

    fn sense_occupant(&self, location: Location) -> Result<Option<UnitId>, HostError> {
        if self.invalid_cells.contains(&location) {
            return Err(HostError::InvalidQuery { location });
        }
        Ok(self.occupant(location))
    }

    fn sense_enemy_base_location(&self) -> Location {
        self.enemy_base
    }

    fn team_resources(&self, _team: Team) -> f64 {
        self.resources
    }

    fn research_progress(&self, track: UpgradeTrack) -> Result<u32, HostError> {
        if self.unreadable_progress.contains(&track) {
            return Err(HostError::Unavailable {
                message: String::from("progress unreadable"),
            });
        }
        Ok(self.progress.get(&track).copied().unwrap_or(0))
    }

    fn can_move(&self, direction: Direction) -> bool {
        let target = self.location.add(direction);
        !self.blocked.contains(&direction)
            && !self.invalid_cells.contains(&target)
            && self.occupant(target).is_none()
    }

    fn request_research(&mut self, track: UpgradeTrack) -> Result<(), HostError> {
        self.calls.push(Call::Research(track));
        self.check_available()?;
        if self.reject_research {
            return Err(illegal(
                Action::Research(track),
                RejectionReason::AlreadyComplete,
            ));
        }
        let entry = self.progress.entry(track).or_insert(0);
        *entry = entry.saturating_add(1);
        Ok(())
    }

    fn attempt_spawn(&mut self, direction: Direction) -> Result<(), HostError> {
        self.calls.push(Call::Spawn(direction));
        self.check_available()?;
        if self.refuse_spawns.contains(&direction) {
            return Err(illegal(Action::Spawn(direction), RejectionReason::Occupied));
        }
        Ok(())
    }

    fn attempt_move(&mut self, direction: Direction) -> Result<(), HostError> {
        self.calls.push(Call::Move(direction));
        self.check_available()?;
        if self.refuse_moves.contains(&direction) {
            return Err(illegal(Action::Move(direction), RejectionReason::Impassable));
        }
        self.location = self.location.add(direction);
        Ok(())
    }

    fn attempt_lay_hazard(&mut self) -> Result<(), HostError> {
        self.calls.push(Call::LayHazard);
        self.check_available()?;
        if self.hazards.contains_key(&self.location) {
            return Err(illegal(Action::LayHazard, RejectionReason::HazardPresent));
        }
        self.hazards.insert(self.location, self.team);
        Ok(())
    }

    fn attempt_clear_hazard(&mut self, location: Location) -> Result<(), HostError> {
        self.calls.push(Call::ClearHazard(location));
        self.check_available()?;
        if self.hazards.remove(&location).is_none() {
            return Err(illegal(
                Action::ClearHazard(location),
                RejectionReason::NoHazard,
            ));
        }
        Ok(())
    }

    fn end_turn(&mut self) {
        self.end_turns = self.end_turns.saturating_add(1);
    }

    fn set_diagnostic_label(&mut self, slot: usize, text: &str) {
        self.labels.insert(slot, String::from(text));
    }
}
