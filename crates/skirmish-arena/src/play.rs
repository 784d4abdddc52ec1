//! Round and match loop.
//!
//! [`Arena::play_round`] gives every living unit one turn through the
//! decision engine. [`run_match`] repeats rounds until one team finishes
//! its final research or the round limit is hit.

use rand::Rng;
use skirmish_core::{DecisionEngine, TurnObserver};
use skirmish_types::{Team, TurnOutcome, UnitId};
use tracing::{debug, info};

use crate::arena::Arena;

/// What happened during one round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundSummary {
    /// Round number, starting at 1.
    pub round: u64,
    /// Unit turns taken.
    pub turns: usize,
    /// Turns that ended with a successful action.
    pub acted: usize,
    /// Turns that ended without an action.
    pub idle: usize,
    /// Turns skipped because the role has no policy.
    pub skipped: usize,
    /// Turns lost to a host failure.
    pub forfeited: usize,
    /// Action attempts the arena refused.
    pub rejections: usize,
    /// Units destroyed this round.
    pub casualties: usize,
    /// Living units once the round ended.
    pub units_alive: usize,
    /// Winner, if the round decided the match.
    pub winner: Option<Team>,
}

/// Why a match stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchEnd {
    /// A team completed its final research.
    Victory(Team),
    /// The round limit was reached without a winner.
    RoundLimit,
}

/// Result of a full match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Why the match stopped.
    pub end: MatchEnd,
    /// Rounds played.
    pub rounds: u64,
    /// Summary of the last round played, if any.
    pub final_summary: Option<RoundSummary>,
}

impl Arena {
    /// Play one round: every unit alive at the start of the round takes
    /// exactly one turn, in id order.
    ///
    /// Units spawned during the round act from the next round on. Units
    /// destroyed before their turn are skipped. Play stops early once a
    /// winner is decided.
    pub fn play_round<R: Rng>(
        &mut self,
        engine: &mut DecisionEngine<R>,
        observer: &mut dyn TurnObserver,
    ) -> RoundSummary {
        let round = self.begin_round();
        let order: Vec<UnitId> = self.units().map(|u| u.id).collect();
        let mut summary = RoundSummary {
            round,
            ..RoundSummary::default()
        };

        for id in order {
            if self.winner().is_some() {
                break;
            }
            let Ok(mut controller) = self.controller(id) else {
                continue;
            };
            let report = engine.take_turn_observed(&mut controller, observer);

            summary.turns = summary.turns.saturating_add(1);
            summary.rejections = summary.rejections.saturating_add(report.rejections.len());
            let tally = match report.outcome {
                TurnOutcome::Acted(_) => &mut summary.acted,
                TurnOutcome::Idle => &mut summary.idle,
                TurnOutcome::NotImplemented(_) => &mut summary.skipped,
                TurnOutcome::Forfeited { .. } => &mut summary.forfeited,
            };
            *tally = tally.saturating_add(1);
        }

        summary.casualties = self.casualties();
        summary.units_alive = self.units().count();
        summary.winner = self.winner();
        debug!(
            round,
            turns = summary.turns,
            acted = summary.acted,
            rejections = summary.rejections,
            casualties = summary.casualties,
            units_alive = summary.units_alive,
            "round complete"
        );
        summary
    }
}

/// Play rounds until a team wins or `max_rounds` have been played.
pub fn run_match<R: Rng>(
    arena: &mut Arena,
    engine: &mut DecisionEngine<R>,
    max_rounds: u64,
    observer: &mut dyn TurnObserver,
) -> MatchResult {
    let mut final_summary: Option<RoundSummary> = None;

    info!(max_rounds, "match starting");

    loop {
        if let Some(team) = arena.winner() {
            info!(round = arena.round(), %team, "match won");
            return MatchResult {
                end: MatchEnd::Victory(team),
                rounds: arena.round(),
                final_summary,
            };
        }
        if arena.round() >= max_rounds {
            info!(max_rounds, "round limit reached");
            return MatchResult {
                end: MatchEnd::RoundLimit,
                rounds: arena.round(),
                final_summary,
            };
        }
        final_summary = Some(arena.play_round(engine, observer));
    }
}

/// Log how a match ended.
pub fn log_match_end(result: &MatchResult) {
    info!(
        end = ?result.end,
        rounds = result.rounds,
        final_units_alive = result.final_summary.as_ref().map(|s| s.units_alive),
        "match ended"
    );
}
