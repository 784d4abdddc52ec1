//! The per-turn decision engine.
//!
//! [`DecisionEngine::take_turn`] is the single entry point a host calls
//! once per unit per round. It snapshots the unit, runs the policy for
//! its role, turns any failure into a forfeited turn, and always hands
//! control back through [`Host::end_turn`] exactly once.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use skirmish_types::{TurnOutcome, TurnReport, Unit};
use tracing::{debug, debug_span, warn};

use crate::config::{DecisionConfig, EngineConfig};
use crate::host::Host;
use crate::policy::{self, TurnContext};
use crate::upgrade::{SelectorError, UpgradeSelector};

/// Sink for per-turn reports.
///
/// Observers see every turn after it ends. They cannot influence
/// decisions.
pub trait TurnObserver {
    /// Called once per unit turn, after [`Host::end_turn`].
    fn on_turn(&mut self, report: &TurnReport);
}

/// An observer that discards every report.
pub struct NoOpObserver;

impl TurnObserver for NoOpObserver {
    fn on_turn(&mut self, _report: &TurnReport) {}
}

impl TurnObserver for Vec<TurnReport> {
    fn on_turn(&mut self, report: &TurnReport) {
        self.push(report.clone());
    }
}

/// Decides one turn at a time for any unit handed to it.
///
/// The engine holds no per-unit state between turns; the random source
/// is the only thing that changes.
pub struct DecisionEngine<R: Rng = StdRng> {
    decision: DecisionConfig,
    selector: UpgradeSelector,
    rng: R,
}

impl DecisionEngine<StdRng> {
    /// Build an engine from a loaded configuration.
    ///
    /// Seeds from `decision.seed` when set, otherwise from OS entropy.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError`] if the upgrade priorities are empty.
    pub fn from_config(config: &EngineConfig) -> Result<Self, SelectorError> {
        let selector = UpgradeSelector::from_config(&config.upgrades)?;
        let rng = config
            .decision
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Ok(Self::with_rng(config.decision.clone(), selector, rng))
    }
}

impl<R: Rng> DecisionEngine<R> {
    /// Build an engine around an explicit random source.
    pub const fn with_rng(decision: DecisionConfig, selector: UpgradeSelector, rng: R) -> Self {
        Self {
            decision,
            selector,
            rng,
        }
    }

    /// Decision tuning in use.
    pub const fn decision(&self) -> &DecisionConfig {
        &self.decision
    }

    /// Research picker in use.
    pub const fn selector(&self) -> &UpgradeSelector {
        &self.selector
    }

    /// Decide and act for the unit `host` controls, then end its turn.
    pub fn take_turn<H: Host + ?Sized>(&mut self, host: &mut H) -> TurnReport {
        let unit = Unit {
            id: host.unit_id(),
            team: host.team(),
            role: host.role(),
            location: host.location(),
            active: host.is_active(),
        };
        let span = debug_span!(
            "turn",
            unit_id = %unit.id,
            team = %unit.team,
            role = unit.role.as_str()
        );
        let _guard = span.enter();

        let mut ctx = TurnContext::new(
            &mut *host,
            unit,
            &mut self.rng,
            &self.decision,
            &self.selector,
        );
        let result = policy::dispatch(&mut ctx);
        let rejections = ctx.into_rejections();

        let outcome = match result {
            Ok(TurnOutcome::NotImplemented(role)) => {
                debug!(role = role.as_str(), "no policy for role, turn skipped");
                TurnOutcome::NotImplemented(role)
            }
            Ok(outcome) => {
                debug!(?outcome, rejected = rejections.len(), "turn decided");
                outcome
            }
            Err(err) => {
                warn!(error = %err, "host failure, turn forfeited");
                TurnOutcome::Forfeited {
                    error: err.to_string(),
                }
            }
        };

        host.end_turn();

        TurnReport {
            unit_id: unit.id,
            team: unit.team,
            role: unit.role,
            location: unit.location,
            outcome,
            rejections,
        }
    }

    /// [`take_turn`](Self::take_turn), then pass the report to `observer`.
    pub fn take_turn_observed<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        observer: &mut dyn TurnObserver,
    ) -> TurnReport {
        let report = self.take_turn(host);
        observer.on_turn(&report);
        report
    }
}
