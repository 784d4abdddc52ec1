//! Command unit policy: spawn while power allows, otherwise research.

use rand::Rng;
use skirmish_types::{Action, Direction, HostError, TurnOutcome, UpgradeTrack};
use tracing::debug;

use super::TurnContext;
use crate::config::CommandDoctrine;
use crate::host::Host;

/// Run the configured command doctrine.
///
/// Inactive command units do nothing: spawning and research both need an
/// active unit.
///
/// # Errors
///
/// Propagates host failures the engine cannot anticipate.
pub fn run<H: Host + ?Sized, R: Rng + ?Sized>(
    ctx: &mut TurnContext<'_, H, R>,
) -> Result<TurnOutcome, HostError> {
    if !ctx.unit.active {
        debug!("command unit inactive, skipping");
        return Ok(TurnOutcome::Idle);
    }
    match ctx.decision.command {
        CommandDoctrine::SpawnThenResearch => spawn_then_research(ctx),
        CommandDoctrine::SpawnTowardEnemy => spawn_toward_enemy(ctx),
        CommandDoctrine::ResearchOnly { track } => research(ctx, track),
    }
}

/// Spawn into the first free neighbouring cell when the team can afford
/// it, otherwise fund the next upgrade.
fn spawn_then_research<H: Host + ?Sized, R: Rng + ?Sized>(
    ctx: &mut TurnContext<'_, H, R>,
) -> Result<TurnOutcome, HostError> {
    let power = ctx.host.team_resources(ctx.unit.team);
    if power > ctx.decision.min_team_power {
        if let Some(direction) = first_free_direction(ctx) {
            let spawn = Action::Spawn(direction);
            if ctx.attempt(spawn)? {
                return Ok(TurnOutcome::Acted(spawn));
            }
        }
    } else {
        debug!(power, threshold = ctx.decision.min_team_power, "saving power, not spawning");
    }
    fund_next_upgrade(ctx)
}

/// Spawn along the heading to the enemy base, otherwise fund the next
/// upgrade.
fn spawn_toward_enemy<H: Host + ?Sized, R: Rng + ?Sized>(
    ctx: &mut TurnContext<'_, H, R>,
) -> Result<TurnOutcome, HostError> {
    let heading = ctx
        .unit
        .location
        .direction_to(ctx.host.sense_enemy_base_location());
    if heading.is_compass() && ctx.host.can_move(heading) {
        let spawn = Action::Spawn(heading);
        if ctx.attempt(spawn)? {
            return Ok(TurnOutcome::Acted(spawn));
        }
    }
    fund_next_upgrade(ctx)
}

/// First neighbouring cell in compass order with nobody standing on it.
fn first_free_direction<H: Host + ?Sized, R: Rng + ?Sized>(
    ctx: &TurnContext<'_, H, R>,
) -> Option<Direction> {
    let perception = ctx.perception();
    let origin = ctx.unit.location;
    Direction::COMPASS
        .into_iter()
        .find(|&dir| perception.is_free(origin.add(dir)))
}

fn fund_next_upgrade<H: Host + ?Sized, R: Rng + ?Sized>(
    ctx: &mut TurnContext<'_, H, R>,
) -> Result<TurnOutcome, HostError> {
    let host = &*ctx.host;
    let track = ctx.selector.select(|track| host.research_progress(track));
    research(ctx, track)
}

fn research<H: Host + ?Sized, R: Rng + ?Sized>(
    ctx: &mut TurnContext<'_, H, R>,
    track: UpgradeTrack,
) -> Result<TurnOutcome, HostError> {
    ctx.attempt_final(Action::Research(track))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use skirmish_types::{Location, Team, UnitId};

    use super::*;
    use crate::config::DecisionConfig;
    use crate::testing::{Call, ScriptedHost, with_context};
    use crate::upgrade::UpgradeSelector;

    fn run_default(host: &mut ScriptedHost) -> TurnOutcome {
        let decision = DecisionConfig::default();
        with_context(host, &decision, &UpgradeSelector::default(), |ctx| {
            run(ctx).unwrap()
        })
    }

    #[test]
    fn rich_team_spawns_north_and_skips_research() {
        let mut host = ScriptedHost::command(Location::new(5, 5));
        host.resources = 65.0;

        let outcome = run_default(&mut host);

        assert_eq!(outcome, TurnOutcome::Acted(Action::Spawn(Direction::North)));
        assert_eq!(host.calls, vec![Call::Spawn(Direction::North)]);
        assert!(!host.researched());
    }

    #[test]
    fn poor_team_researches_instead() {
        let mut host = ScriptedHost::command(Location::new(5, 5));
        host.resources = 40.0;

        let outcome = run_default(&mut host);

        assert!(!host.spawned());
        assert_eq!(
            outcome,
            TurnOutcome::Acted(Action::Research(UpgradeTrack::Fusion))
        );
    }

    #[test]
    fn threshold_itself_is_not_enough() {
        let mut host = ScriptedHost::command(Location::new(5, 5));
        host.resources = 60.0;

        run_default(&mut host);

        assert!(!host.spawned());
        assert!(host.researched());
    }

    #[test]
    fn occupied_cells_are_skipped_in_compass_order() {
        let mut host = ScriptedHost::command(Location::new(5, 5));
        host.resources = 100.0;
        host.add_unit(UnitId::new(2), Team::A, Location::new(5, 4));
        host.add_unit(UnitId::new(3), Team::B, Location::new(6, 4));

        let outcome = run_default(&mut host);

        assert_eq!(outcome, TurnOutcome::Acted(Action::Spawn(Direction::East)));
    }

    #[test]
    fn refused_spawn_falls_back_to_research() {
        let mut host = ScriptedHost::command(Location::new(5, 5));
        host.resources = 100.0;
        host.refuse_spawns.insert(Direction::North);

        let outcome = run_default(&mut host);

        assert_eq!(
            host.calls,
            vec![
                Call::Spawn(Direction::North),
                Call::Research(UpgradeTrack::Fusion)
            ]
        );
        assert_eq!(
            outcome,
            TurnOutcome::Acted(Action::Research(UpgradeTrack::Fusion))
        );
    }

    #[test]
    fn surrounded_unit_researches() {
        let mut host = ScriptedHost::command(Location::new(5, 5));
        host.resources = 100.0;
        for (raw, dir) in (10..).zip(Direction::COMPASS) {
            host.add_unit(UnitId::new(raw), Team::A, Location::new(5, 5).add(dir));
        }

        run_default(&mut host);

        assert!(!host.spawned());
        assert!(host.researched());
    }

    #[test]
    fn refused_research_ends_the_turn_idle() {
        let mut host = ScriptedHost::command(Location::new(5, 5));
        host.reject_research = true;

        let outcome = run_default(&mut host);

        assert_eq!(outcome, TurnOutcome::Idle);
        assert_eq!(host.calls.len(), 1);
    }

    #[test]
    fn inactive_unit_does_nothing() {
        let mut host = ScriptedHost::command(Location::new(5, 5));
        host.resources = 100.0;
        host.active = false;

        let outcome = run_default(&mut host);

        assert_eq!(outcome, TurnOutcome::Idle);
        assert!(host.calls.is_empty());
    }

    #[test]
    fn research_follows_progress() {
        let mut host = ScriptedHost::command(Location::new(5, 5));
        host.progress = BTreeMap::from([
            (UpgradeTrack::Fusion, 25),
            (UpgradeTrack::Vision, 25),
        ]);

        let outcome = run_default(&mut host);

        assert_eq!(
            outcome,
            TurnOutcome::Acted(Action::Research(UpgradeTrack::Pickaxe))
        );
    }

    #[test]
    fn research_only_never_spawns() {
        let mut host = ScriptedHost::command(Location::new(5, 5));
        host.resources = 1000.0;
        let decision = DecisionConfig {
            command: CommandDoctrine::ResearchOnly {
                track: UpgradeTrack::Nuke,
            },
            ..DecisionConfig::default()
        };

        let outcome = with_context(&mut host, &decision, &UpgradeSelector::default(), |ctx| {
            run(ctx).unwrap()
        });

        assert_eq!(host.calls, vec![Call::Research(UpgradeTrack::Nuke)]);
        assert_eq!(outcome, TurnOutcome::Acted(Action::Research(UpgradeTrack::Nuke)));
    }

    #[test]
    fn spawn_toward_enemy_uses_the_base_heading() {
        let mut host = ScriptedHost::command(Location::new(5, 5));
        host.enemy_base = Location::new(15, 5);
        let decision = DecisionConfig {
            command: CommandDoctrine::SpawnTowardEnemy,
            ..DecisionConfig::default()
        };

        let outcome = with_context(&mut host, &decision, &UpgradeSelector::default(), |ctx| {
            run(ctx).unwrap()
        });

        assert_eq!(outcome, TurnOutcome::Acted(Action::Spawn(Direction::East)));
    }

    #[test]
    fn spawn_toward_enemy_researches_when_blocked() {
        let mut host = ScriptedHost::command(Location::new(5, 5));
        host.enemy_base = Location::new(15, 5);
        host.blocked.insert(Direction::East);
        let decision = DecisionConfig {
            command: CommandDoctrine::SpawnTowardEnemy,
            ..DecisionConfig::default()
        };

        with_context(&mut host, &decision, &UpgradeSelector::default(), |ctx| {
            run(ctx).unwrap()
        });

        assert_eq!(host.calls, vec![Call::Research(UpgradeTrack::Fusion)]);
    }
}
