//! Role policies.
//!
//! Each [`Role`] maps to exactly one policy function. A policy inspects
//! the unit's surroundings through a [`TurnContext`], tries its candidate
//! actions in priority order, and stops at the first one the host accepts.
//!
//! - [`command`] -- spawn or research
//! - [`combat`] -- move, clear, or lay hazards
//! - [`support`] -- roles without a policy yet

pub mod combat;
pub mod command;
pub mod support;

use rand::Rng;
use skirmish_types::{Action, HostError, Rejection, Role, TurnOutcome, Unit};

use crate::config::DecisionConfig;
use crate::executor;
use crate::host::Host;
use crate::perception::Perception;
use crate::upgrade::UpgradeSelector;

/// Everything a policy may use during one unit's turn.
pub struct TurnContext<'a, H: Host + ?Sized, R: Rng + ?Sized> {
    /// The acting unit's controller.
    pub host: &'a mut H,
    /// Snapshot of the acting unit taken when the turn began.
    pub unit: Unit,
    /// Random source for shuffles and biased choices.
    pub rng: &'a mut R,
    /// Decision tuning.
    pub decision: &'a DecisionConfig,
    /// Research picker.
    pub selector: &'a UpgradeSelector,
    rejections: Vec<Rejection>,
}

impl<'a, H: Host + ?Sized, R: Rng + ?Sized> TurnContext<'a, H, R> {
    /// Assemble a context for one turn.
    pub fn new(
        host: &'a mut H,
        unit: Unit,
        rng: &'a mut R,
        decision: &'a DecisionConfig,
        selector: &'a UpgradeSelector,
    ) -> Self {
        Self {
            host,
            unit,
            rng,
            decision,
            selector,
            rejections: Vec::new(),
        }
    }

    /// Sensor view using the configured sensing radii.
    pub fn perception(&self) -> Perception<'_, H> {
        Perception::new(
            &*self.host,
            self.decision.enemy_sense_radius,
            self.decision.friendly_sense_radius,
        )
    }

    /// Try `action` against the host.
    ///
    /// Returns `Ok(true)` when it was carried out and `Ok(false)` when the
    /// host refused it for an expected reason.
    ///
    /// # Errors
    ///
    /// Propagates host failures the engine cannot anticipate.
    pub fn attempt(&mut self, action: Action) -> Result<bool, HostError> {
        executor::attempt(&mut *self.host, action, &mut self.rejections)
    }

    /// Attempt `action` and map the answer to a turn outcome: acted on
    /// success, idle on refusal.
    ///
    /// # Errors
    ///
    /// Propagates host failures the engine cannot anticipate.
    pub fn attempt_final(&mut self, action: Action) -> Result<TurnOutcome, HostError> {
        if self.attempt(action)? {
            Ok(TurnOutcome::Acted(action))
        } else {
            Ok(TurnOutcome::Idle)
        }
    }

    /// Refusals collected so far, in attempt order.
    pub fn rejections(&self) -> &[Rejection] {
        &self.rejections
    }

    /// Consume the context, keeping the refusals for the turn report.
    pub fn into_rejections(self) -> Vec<Rejection> {
        self.rejections
    }
}

/// Run the policy for the unit's role.
///
/// # Errors
///
/// Propagates host failures the engine cannot anticipate.
pub fn dispatch<H: Host + ?Sized, R: Rng + ?Sized>(
    ctx: &mut TurnContext<'_, H, R>,
) -> Result<TurnOutcome, HostError> {
    match ctx.unit.role {
        Role::Command => command::run(ctx),
        Role::Combat => combat::run(ctx),
        role @ (Role::Supply | Role::Artillery | Role::Power | Role::Medical | Role::Shield) => {
            Ok(support::run(role))
        }
    }
}
