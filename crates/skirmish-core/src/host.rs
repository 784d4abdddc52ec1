//! The capability surface a simulation host offers the decision engine.
//!
//! A host hands the engine one [`Host`] controller per acting unit per
//! turn. The controller answers sensor queries from that unit's point of
//! view and carries out the actions the engine picks. Legality is the
//! host's business: every action attempt may come back as a
//! [`HostError`], which the engine treats as an ordinary outcome.

use skirmish_types::{Direction, HostError, Location, Role, Team, UnitId, UpgradeTrack};

/// Per-unit controller implemented by a simulation host.
pub trait Host {
    // --- Self state ---

    /// Identity of the acting unit.
    fn unit_id(&self) -> UnitId;

    /// Role of the acting unit.
    fn role(&self) -> Role;

    /// Current cell of the acting unit.
    fn location(&self) -> Location;

    /// Whether the acting unit may act this turn.
    fn is_active(&self) -> bool;

    /// Team of the acting unit.
    fn team(&self) -> Team;

    // --- Sensors ---

    /// The team owning the hazard at `location`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::InvalidQuery`] when the cell cannot be sensed.
    fn sense_hazard(&self, location: Location) -> Result<Option<Team>, HostError>;

    /// Units of `team` within `radius_squared` of the acting unit.
    ///
    /// Order is host-defined. The acting unit itself is never included.
    fn sense_nearby(&self, team: Team, radius_squared: u32) -> Vec<UnitId>;

    /// Current location of a previously sensed unit.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::StaleReference`] when the unit is gone.
    fn sense_location_of(&self, unit: UnitId) -> Result<Location, HostError>;

    /// The unit standing at `location`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::InvalidQuery`] when the cell cannot be sensed.
    fn sense_occupant(&self, location: Location) -> Result<Option<UnitId>, HostError>;

    /// Location of the opposing team's command unit.
    fn sense_enemy_base_location(&self) -> Location;

    /// Current resource pool of `team`.
    fn team_resources(&self, team: Team) -> f64;

    /// Rounds already invested into `track` by the acting unit's team.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] when progress cannot be read.
    fn research_progress(&self, track: UpgradeTrack) -> Result<u32, HostError>;

    /// Cheap pre-check for [`Host::attempt_move`].
    fn can_move(&self, direction: Direction) -> bool;

    // --- Actions ---

    /// Invest this turn into `track`.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::IllegalAction`] when research is not allowed.
    fn request_research(&mut self, track: UpgradeTrack) -> Result<(), HostError>;

    /// Spawn a combat unit in the adjacent cell.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::IllegalAction`] when the spawn is not allowed.
    fn attempt_spawn(&mut self, direction: Direction) -> Result<(), HostError>;

    /// Move one step.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::IllegalAction`] when the move is not allowed.
    fn attempt_move(&mut self, direction: Direction) -> Result<(), HostError>;

    /// Lay a hazard on the acting unit's own cell.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::IllegalAction`] when laying is not allowed.
    fn attempt_lay_hazard(&mut self) -> Result<(), HostError>;

    /// Clear the hazard at `location`.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::IllegalAction`] when clearing is not allowed.
    fn attempt_clear_hazard(&mut self, location: Location) -> Result<(), HostError>;

    // --- Turn control ---

    /// Hand control back to the host. Called exactly once per turn.
    fn end_turn(&mut self);

    /// Write a diagnostic label for external observers.
    ///
    /// Has no effect on the game.
    fn set_diagnostic_label(&mut self, slot: usize, text: &str);
}
