//! Combat unit policy.
//!
//! The default [`CombatDoctrine::Skirmish`] holds position and mines its
//! cell while the neighbourhood is quiet, and starts moving once the area
//! gets crowded with either side. The other doctrines head for the enemy
//! base, directly or on a biased random walk.

use rand::Rng;
use rand::seq::IndexedRandom;
use skirmish_types::{Action, Direction, HostError, TurnOutcome};
use tracing::debug;

use super::TurnContext;
use crate::config::CombatDoctrine;
use crate::direction::{filter_safe, prioritize, rotate_until_clear};
use crate::host::Host;

/// Run the configured combat doctrine.
///
/// # Errors
///
/// Propagates host failures the engine cannot anticipate.
pub fn run<H: Host + ?Sized, R: Rng + ?Sized>(
    ctx: &mut TurnContext<'_, H, R>,
) -> Result<TurnOutcome, HostError> {
    match ctx.decision.combat {
        CombatDoctrine::Skirmish => skirmish(ctx),
        CombatDoctrine::Assault if ctx.unit.active => assault(ctx),
        CombatDoctrine::Wander { base_bias } if ctx.unit.active => wander(ctx, base_bias),
        CombatDoctrine::Assault | CombatDoctrine::Wander { .. } => {
            debug!("combat unit inactive, skipping");
            Ok(TurnOutcome::Idle)
        }
    }
}

fn skirmish<H: Host + ?Sized, R: Rng + ?Sized>(
    ctx: &mut TurnContext<'_, H, R>,
) -> Result<TurnOutcome, HostError> {
    let origin = ctx.unit.location;
    let threshold = ctx.decision.crowd_threshold;

    let crowd = {
        let perception = ctx.perception();
        let enemies = perception.nearby_enemies();
        let friendlies = perception.nearby_friendlies();
        if enemies.len() > threshold || friendlies.len() > threshold {
            debug!(
                enemies = enemies.len(),
                friendlies = friendlies.len(),
                "crowded, looking for a move"
            );
            Some(perception.locate(&enemies))
        } else {
            None
        }
    };
    let Some(enemy_locations) = crowd else {
        return lay_if_clear(ctx);
    };

    let ordered = prioritize(origin, &enemy_locations, &mut *ctx.rng);
    let candidates = {
        let perception = ctx.perception();
        filter_safe(origin, &ordered, |loc| perception.is_enemy_hazard(loc))
    };

    for direction in candidates {
        if !ctx.host.can_move(direction) {
            continue;
        }
        let step = Action::Move(direction);
        if ctx.attempt(step)? {
            return Ok(TurnOutcome::Acted(step));
        }
    }

    lay_if_clear(ctx)
}

/// Charge the enemy base, defusing whatever lies on the next cell.
fn assault<H: Host + ?Sized, R: Rng + ?Sized>(
    ctx: &mut TurnContext<'_, H, R>,
) -> Result<TurnOutcome, HostError> {
    let origin = ctx.unit.location;
    let heading = origin.direction_to(ctx.host.sense_enemy_base_location());
    if !heading.is_compass() {
        return lay_if_clear(ctx);
    }
    let next = origin.add(heading);
    if ctx.perception().hazard_at(next).is_some() {
        return ctx.attempt_final(Action::ClearHazard(next));
    }
    if ctx.host.can_move(heading) {
        return ctx.attempt_final(Action::Move(heading));
    }
    Ok(TurnOutcome::Idle)
}

/// Random walk with a pull towards the enemy base. Steps around hazards
/// of either team.
fn wander<H: Host + ?Sized, R: Rng + ?Sized>(
    ctx: &mut TurnContext<'_, H, R>,
    base_bias: f64,
) -> Result<TurnOutcome, HostError> {
    let origin = ctx.unit.location;
    let mut direction = Direction::COMPASS
        .choose(&mut *ctx.rng)
        .copied()
        .unwrap_or(Direction::North);
    if ctx.rng.random::<f64>() < base_bias {
        let heading = origin.direction_to(ctx.host.sense_enemy_base_location());
        if heading.is_compass() {
            direction = heading;
        }
    }

    let direction = {
        let perception = ctx.perception();
        rotate_until_clear(origin, direction, |loc| perception.hazard_at(loc).is_some())
    };

    if ctx.host.can_move(direction) {
        return ctx.attempt_final(Action::Move(direction));
    }
    Ok(TurnOutcome::Idle)
}

fn lay_if_clear<H: Host + ?Sized, R: Rng + ?Sized>(
    ctx: &mut TurnContext<'_, H, R>,
) -> Result<TurnOutcome, HostError> {
    if ctx.perception().hazard_at(ctx.unit.location).is_some() {
        return Ok(TurnOutcome::Idle);
    }
    ctx.attempt_final(Action::LayHazard)
}
