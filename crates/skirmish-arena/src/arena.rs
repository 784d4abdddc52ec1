//! Arena state and the rules that change it.
//!
//! The [`Arena`] owns every unit, hazard, and team resource pool. Rule
//! checks live here as small `Result<(), RejectionReason>` functions; the
//! [`UnitController`] turns a refusal into the
//! [`HostError`](skirmish_types::HostError) the decision engine expects.

use std::collections::BTreeMap;

use skirmish_core::config::ArenaConfig;
use skirmish_types::{Direction, Location, RejectionReason, Role, Team, UnitId, UpgradeTrack};
use tracing::{debug, info};

use crate::controller::UnitController;
use crate::error::ArenaError;

/// Squared distance within which a unit can clear a hazard.
const CLEAR_REACH: u32 = 2;

/// A unit standing on the arena grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaUnit {
    /// Identity.
    pub id: UnitId,
    /// Owning team.
    pub team: Team,
    /// Behavioral role.
    pub role: Role,
    /// Current cell.
    pub location: Location,
    /// Rounds left before the unit may act again.
    pub cooldown: u32,
}

impl ArenaUnit {
    /// Whether the unit may act this round.
    pub const fn is_active(&self) -> bool {
        self.cooldown == 0
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct TeamState {
    power: f64,
    research: BTreeMap<UpgradeTrack, u32>,
}

impl TeamState {
    fn progress(&self, track: UpgradeTrack) -> u32 {
        self.research.get(&track).copied().unwrap_or(0)
    }
}

/// In-memory two-team match.
#[derive(Debug, Clone)]
pub struct Arena {
    config: ArenaConfig,
    research_rounds: BTreeMap<UpgradeTrack, u32>,
    units: BTreeMap<UnitId, ArenaUnit>,
    hazards: BTreeMap<Location, Team>,
    labels: BTreeMap<(UnitId, usize), String>,
    team_a: TeamState,
    team_b: TeamState,
    next_id: u32,
    round: u64,
    casualties: usize,
    winner: Option<Team>,
}

impl Arena {
    /// Build an arena with one command unit per team at its base.
    ///
    /// Research tracks complete after [`UpgradeTrack::default_rounds`]
    /// until [`with_research_rounds`](Self::with_research_rounds) says
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::Config`] if the configuration fails
    /// validation.
    pub fn new(config: &ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;
        let starting = TeamState {
            power: config.starting_power,
            research: BTreeMap::new(),
        };
        let mut arena = Self {
            config: config.clone(),
            research_rounds: BTreeMap::new(),
            units: BTreeMap::new(),
            hazards: BTreeMap::new(),
            labels: BTreeMap::new(),
            team_a: starting.clone(),
            team_b: starting,
            next_id: 1,
            round: 0,
            casualties: 0,
            winner: None,
        };
        arena.place_unit(Team::A, Role::Command, config.base_a)?;
        arena.place_unit(Team::B, Role::Command, config.base_b)?;
        info!(
            width = config.width,
            height = config.height,
            base_a = %config.base_a,
            base_b = %config.base_b,
            "arena created"
        );
        Ok(arena)
    }

    /// Override how many rounds of research complete each track.
    #[must_use]
    pub fn with_research_rounds(mut self, rounds: BTreeMap<UpgradeTrack, u32>) -> Self {
        self.research_rounds = rounds;
        self
    }

    // --- Setup ---

    /// Put a new unit on the map. Used to stage scenarios.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::OutOfBounds`] or [`ArenaError::Occupied`]
    /// when the cell cannot take a unit.
    pub fn place_unit(
        &mut self,
        team: Team,
        role: Role,
        location: Location,
    ) -> Result<UnitId, ArenaError> {
        if !self.config.contains(location) {
            return Err(ArenaError::OutOfBounds { location });
        }
        if self.occupant(location).is_some() {
            return Err(ArenaError::Occupied { location });
        }
        Ok(self.insert_unit(team, role, location))
    }

    /// Lay a hazard owned by `team`. Used to stage scenarios.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::OutOfBounds`] when the cell is off the map.
    pub fn place_hazard(&mut self, location: Location, team: Team) -> Result<(), ArenaError> {
        if !self.config.contains(location) {
            return Err(ArenaError::OutOfBounds { location });
        }
        self.hazards.insert(location, team);
        Ok(())
    }

    /// Controller for one turn of `unit`.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::UnknownUnit`] if no living unit has that id.
    pub fn controller(&mut self, unit: UnitId) -> Result<UnitController<'_>, ArenaError> {
        let snapshot = self
            .units
            .get(&unit)
            .copied()
            .ok_or(ArenaError::UnknownUnit(unit))?;
        Ok(UnitController::new(self, snapshot))
    }

    // --- Queries ---

    /// Rules this arena was built with.
    pub const fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Rounds played so far.
    pub const fn round(&self) -> u64 {
        self.round
    }

    /// The team that completed its final research, if any.
    pub const fn winner(&self) -> Option<Team> {
        self.winner
    }

    /// Living units in id order.
    pub fn units(&self) -> impl Iterator<Item = &ArenaUnit> {
        self.units.values()
    }

    /// A living unit by id.
    pub fn unit(&self, id: UnitId) -> Option<&ArenaUnit> {
        self.units.get(&id)
    }

    /// Number of living units on `team`.
    pub fn unit_count(&self, team: Team) -> usize {
        self.units.values().filter(|u| u.team == team).count()
    }

    /// The command unit of `team`.
    pub fn command_unit(&self, team: Team) -> Option<UnitId> {
        self.units
            .values()
            .find(|u| u.team == team && u.role == Role::Command)
            .map(|u| u.id)
    }

    /// Power pool of `team`.
    pub const fn power(&self, team: Team) -> f64 {
        self.team(team).power
    }

    /// Rounds `team` has put into `track`.
    pub fn research_progress(&self, team: Team, track: UpgradeTrack) -> u32 {
        self.team(team).progress(track)
    }

    /// Rounds needed to complete `track`.
    pub fn research_rounds(&self, track: UpgradeTrack) -> u32 {
        self.research_rounds
            .get(&track)
            .copied()
            .unwrap_or_else(|| track.default_rounds())
    }

    /// Owner of the hazard at `location`.
    pub fn hazard_at(&self, location: Location) -> Option<Team> {
        self.hazards.get(&location).copied()
    }

    /// Number of hazards on the map.
    pub fn hazard_count(&self) -> usize {
        self.hazards.len()
    }

    /// Diagnostic text a unit left in `slot`.
    pub fn label(&self, unit: UnitId, slot: usize) -> Option<&str> {
        self.labels.get(&(unit, slot)).map(String::as_str)
    }

    /// Base location of the team opposing `team`.
    pub const fn enemy_base(&self, team: Team) -> Location {
        match team {
            Team::A => self.config.base_b,
            Team::B => self.config.base_a,
        }
    }

    pub(crate) fn occupant(&self, location: Location) -> Option<UnitId> {
        self.units
            .values()
            .find(|u| u.location == location)
            .map(|u| u.id)
    }

    /// Units of `team` within `radius_squared` of `center`, other than
    /// `observer`.
    pub(crate) fn nearby(
        &self,
        center: Location,
        team: Team,
        radius_squared: u32,
        observer: UnitId,
    ) -> Vec<UnitId> {
        self.units
            .values()
            .filter(|u| {
                u.id != observer
                    && u.team == team
                    && center.distance_squared_to(u.location) <= radius_squared
            })
            .map(|u| u.id)
            .collect()
    }

    /// Cell one step from `from`, if a unit could stand there.
    pub(crate) fn destination(
        &self,
        from: Location,
        direction: Direction,
    ) -> Result<Location, RejectionReason> {
        if !direction.is_compass() {
            return Err(RejectionReason::NotPermitted);
        }
        let target = from.add(direction);
        if !self.config.contains(target) {
            return Err(RejectionReason::OutOfBounds);
        }
        if self.occupant(target).is_some() {
            return Err(RejectionReason::Occupied);
        }
        Ok(target)
    }

    // --- Rules ---

    pub(crate) fn spawn(&mut self, id: UnitId, direction: Direction) -> Result<(), RejectionReason> {
        let unit = self.acting(id)?;
        if unit.role != Role::Command {
            return Err(RejectionReason::NotPermitted);
        }
        let target = self.destination(unit.location, direction)?;
        let cost = self.config.spawn_cost;
        let pool = self.team_mut(unit.team);
        if pool.power < cost {
            return Err(RejectionReason::InsufficientPower);
        }
        pool.power -= cost;
        let child = self.insert_unit(unit.team, Role::Combat, target);
        self.set_cooldown(id, 1);
        debug!(unit_id = %id, child = %child, location = %target, "unit spawned");
        Ok(())
    }

    pub(crate) fn move_unit(
        &mut self,
        id: UnitId,
        direction: Direction,
    ) -> Result<(), RejectionReason> {
        let unit = self.acting(id)?;
        if !unit.role.is_mobile() {
            return Err(RejectionReason::NotPermitted);
        }
        let target = self.destination(unit.location, direction)?;
        if self.hazard_at(target) == Some(unit.team.opponent()) {
            self.hazards.remove(&target);
            self.units.remove(&id);
            self.casualties = self.casualties.saturating_add(1);
            info!(unit_id = %id, team = %unit.team, location = %target, "unit destroyed by hazard");
            return Ok(());
        }
        if let Some(moving) = self.units.get_mut(&id) {
            moving.location = target;
            moving.cooldown = 1;
        }
        Ok(())
    }

    pub(crate) fn lay_hazard(&mut self, id: UnitId) -> Result<(), RejectionReason> {
        let unit = self.acting(id)?;
        if !unit.role.is_mobile() {
            return Err(RejectionReason::NotPermitted);
        }
        if self.hazards.contains_key(&unit.location) {
            return Err(RejectionReason::HazardPresent);
        }
        self.hazards.insert(unit.location, unit.team);
        self.set_cooldown(id, self.config.lay_cooldown);
        Ok(())
    }

    pub(crate) fn clear_hazard(
        &mut self,
        id: UnitId,
        location: Location,
    ) -> Result<(), RejectionReason> {
        let unit = self.acting(id)?;
        if !unit.role.is_mobile() {
            return Err(RejectionReason::NotPermitted);
        }
        if !self.config.contains(location) {
            return Err(RejectionReason::OutOfBounds);
        }
        if unit.location.distance_squared_to(location) > CLEAR_REACH {
            return Err(RejectionReason::NotPermitted);
        }
        if self.hazards.remove(&location).is_none() {
            return Err(RejectionReason::NoHazard);
        }
        self.set_cooldown(id, self.config.clear_cooldown);
        Ok(())
    }

    pub(crate) fn research(&mut self, id: UnitId, track: UpgradeTrack) -> Result<(), RejectionReason> {
        let unit = self.acting(id)?;
        if unit.role != Role::Command {
            return Err(RejectionReason::NotPermitted);
        }
        let needed = self.research_rounds(track);
        let entry = self.team_mut(unit.team).research.entry(track).or_insert(0);
        if *entry >= needed {
            return Err(RejectionReason::AlreadyComplete);
        }
        *entry = entry.saturating_add(1);
        let progress = *entry;
        self.set_cooldown(id, 1);
        if progress >= needed {
            info!(team = %unit.team, %track, "research complete");
            if track == UpgradeTrack::Nuke && self.winner.is_none() {
                self.winner = Some(unit.team);
            }
        }
        Ok(())
    }

    pub(crate) fn set_label(&mut self, unit: UnitId, slot: usize, text: &str) {
        self.labels.insert((unit, slot), String::from(text));
    }

    // --- Round bookkeeping ---

    /// Advance the round counter, pay income, and tick cooldowns down.
    pub(crate) fn begin_round(&mut self) -> u64 {
        self.round = self.round.saturating_add(1);
        self.casualties = 0;
        let income = self.config.income;
        self.team_a.power += income;
        self.team_b.power += income;
        for unit in self.units.values_mut() {
            unit.cooldown = unit.cooldown.saturating_sub(1);
        }
        self.round
    }

    pub(crate) const fn casualties(&self) -> usize {
        self.casualties
    }

    // --- Internals ---

    fn acting(&self, id: UnitId) -> Result<ArenaUnit, RejectionReason> {
        let unit = self
            .units
            .get(&id)
            .copied()
            .ok_or(RejectionReason::Inactive)?;
        if unit.is_active() {
            Ok(unit)
        } else {
            Err(RejectionReason::Inactive)
        }
    }

    fn insert_unit(&mut self, team: Team, role: Role, location: Location) -> UnitId {
        let id = UnitId::new(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.units.insert(
            id,
            ArenaUnit {
                id,
                team,
                role,
                location,
                cooldown: 0,
            },
        );
        id
    }

    fn set_cooldown(&mut self, id: UnitId, rounds: u32) {
        if let Some(unit) = self.units.get_mut(&id) {
            unit.cooldown = rounds;
        }
    }

    const fn team(&self, team: Team) -> &TeamState {
        match team {
            Team::A => &self.team_a,
            Team::B => &self.team_b,
        }
    }

    const fn team_mut(&mut self, team: Team) -> &mut TeamState {
        match team {
            Team::A => &mut self.team_a,
            Team::B => &mut self.team_b,
        }
    }
}
