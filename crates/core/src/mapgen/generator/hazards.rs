//! Trap and bomb pickup placement for carved mazes.

use rand_chacha::ChaCha8Rng;

use crate::grid::manhattan;
use crate::state::Maze;
use crate::types::{CellKind, Pos};

use super::super::seed::shuffle;

/// Cells within this Manhattan distance of the start never hold hazards or pickups.
const START_CLEARANCE: u32 = 2;

pub(super) struct HazardContext<'a> {
    pub(super) maze: &'a mut Maze,
    /// One shortest start-to-exit route; kept trap-free so a collapse can never
    /// seal the exit off.
    pub(super) route: &'a [Pos],
}

pub(super) fn place_traps(
    context: &mut HazardContext<'_>,
    rng: &mut ChaCha8Rng,
    density_pct: u8,
) -> usize {
    let mut eligible = open_floor(context.maze, |pos| !context.route.contains(&pos));
    let count = eligible.len() * usize::from(density_pct) / 100;
    shuffle(rng, &mut eligible);
    for &pos in eligible.iter().take(count) {
        context.maze.set_kind(pos, CellKind::Trap);
    }
    count
}

pub(super) fn place_bombs(
    context: &mut HazardContext<'_>,
    rng: &mut ChaCha8Rng,
    pickups: u8,
) -> usize {
    let mut eligible = open_floor(context.maze, |_| true);
    let count = eligible.len().min(usize::from(pickups));
    shuffle(rng, &mut eligible);
    for &pos in eligible.iter().take(count) {
        context.maze.set_kind(pos, CellKind::Bomb);
    }
    count
}

fn open_floor(maze: &Maze, keep: impl Fn(Pos) -> bool) -> Vec<Pos> {
    maze.cells
        .iter()
        .filter(|cell| cell.kind == CellKind::Floor)
        .map(|cell| cell.pos)
        .filter(|&pos| manhattan(pos, maze.start) > START_CLEARANCE && keep(pos))
        .collect()
}
