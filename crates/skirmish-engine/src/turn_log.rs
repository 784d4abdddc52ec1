//! Turn observer that logs every decision and keeps per-team tallies.

use std::collections::BTreeMap;

use skirmish_core::TurnObserver;
use skirmish_types::{Team, TurnOutcome, TurnReport};
use tracing::{debug, info, trace};

/// Per-team counts gathered over a match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeamTally {
    /// Turns that ended with an action.
    pub acted: u64,
    /// Turns that ended without one.
    pub idle: u64,
    /// Turns skipped or forfeited.
    pub lost: u64,
    /// Action attempts the host refused.
    pub rejections: u64,
}

/// Logs each [`TurnReport`] and tallies outcomes by team.
#[derive(Debug, Default)]
pub struct TurnLog {
    tallies: BTreeMap<Team, TeamTally>,
}

impl TurnLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Log the tallies gathered so far.
    pub fn log_tallies(&self) {
        for (team, tally) in &self.tallies {
            info!(
                %team,
                acted = tally.acted,
                idle = tally.idle,
                lost = tally.lost,
                rejections = tally.rejections,
                "team turn totals"
            );
        }
    }
}

impl TurnObserver for TurnLog {
    fn on_turn(&mut self, report: &TurnReport) {
        match serde_json::to_string(report) {
            Ok(json) => trace!(report = %json, "turn report"),
            Err(e) => debug!(error = %e, "turn report not serializable"),
        }

        let tally = self.tallies.entry(report.team).or_default();
        match &report.outcome {
            TurnOutcome::Acted(action) => {
                tally.acted = tally.acted.saturating_add(1);
                debug!(unit_id = %report.unit_id, %action, "unit acted");
            }
            TurnOutcome::Idle => tally.idle = tally.idle.saturating_add(1),
            TurnOutcome::NotImplemented(_) | TurnOutcome::Forfeited { .. } => {
                tally.lost = tally.lost.saturating_add(1);
            }
        }
        let refused = u64::try_from(report.rejections.len()).unwrap_or(u64::MAX);
        tally.rejections = tally.rejections.saturating_add(refused);
    }
}
