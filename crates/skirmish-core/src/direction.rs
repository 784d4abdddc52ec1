//! Movement direction prioritization.
//!
//! [`prioritize`] orders the eight compass directions best-first: towards
//! the nearest enemy when any are sensed, otherwise in a shuffled order so
//! idle units wander unpredictably. [`filter_safe`] then drops directions
//! that lead onto an opposing hazard, unless that would drop all of them.

use rand::Rng;
use rand::seq::SliceRandom;
use skirmish_types::{Direction, Location};

/// Order the compass directions best-first for a unit at `origin`.
///
/// With no enemies the result is a random permutation drawn from `rng`.
/// Otherwise directions are sorted ascending by the squared distance from
/// the cell they lead to to the nearest enemy; the sort is stable, so ties
/// keep [`Direction::COMPASS`] order.
pub fn prioritize<R: Rng + ?Sized>(
    origin: Location,
    enemies: &[Location],
    rng: &mut R,
) -> [Direction; 8] {
    let mut directions = Direction::COMPASS;
    if enemies.is_empty() {
        directions.shuffle(rng);
    } else {
        directions.sort_by_key(|&dir| nearest_distance(origin.add(dir), enemies));
    }
    directions
}

/// Squared distance from `from` to the closest of `enemies`.
fn nearest_distance(from: Location, enemies: &[Location]) -> u32 {
    enemies
        .iter()
        .map(|&enemy| from.distance_squared_to(enemy))
        .min()
        .unwrap_or(u32::MAX)
}

/// Keep the directions whose destination is not hazardous, preserving
/// order.
///
/// Fails open: when every direction is hazardous the input order is
/// returned unchanged, since moving onto a hazard beats standing still.
pub fn filter_safe<F>(origin: Location, ordered: &[Direction], is_hazardous: F) -> Vec<Direction>
where
    F: Fn(Location) -> bool,
{
    let safe: Vec<Direction> = ordered
        .iter()
        .copied()
        .filter(|&dir| !is_hazardous(origin.add(dir)))
        .collect();
    if safe.is_empty() {
        ordered.to_vec()
    } else {
        safe
    }
}

/// Rotate `start` left until it points at a cell with no hazard at all.
///
/// Gives up after a full turn and returns `start`.
pub fn rotate_until_clear<F>(origin: Location, start: Direction, has_hazard: F) -> Direction
where
    F: Fn(Location) -> bool,
{
    let mut dir = start;
    for _ in 0..Direction::COMPASS.len() {
        if !has_hazard(origin.add(dir)) {
            return dir;
        }
        dir = dir.rotate_left();
    }
    start
}
