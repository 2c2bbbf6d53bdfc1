//! Stalker spawn selection for generated mazes.

use rand_chacha::ChaCha8Rng;

use crate::config::StalkerProfile;
use crate::grid::{DistanceField, manhattan};
use crate::state::Maze;
use crate::types::{CellKind, Pos};

use super::seed::roll_below;

pub(super) struct SpawnContext<'a> {
    pub(super) maze: &'a Maze,
    pub(super) from_start: &'a DistanceField,
    pub(super) stalkers: &'a [StalkerProfile],
}

/// Picks one distinct floor cell per stalker, at least half the maximum path
/// distance away from the start and outside the stalker's own detection range
/// of it. Returns `None` when the maze is too small to honour that.
pub(super) fn choose_stalker_spawns(
    context: &SpawnContext<'_>,
    rng: &mut ChaCha8Rng,
) -> Option<Vec<Pos>> {
    let (_, max_dist) = context.from_start.farthest()?;
    let threshold = max_dist.div_ceil(2);
    let start = context.maze.start;

    let mut spawns: Vec<Pos> = Vec::with_capacity(context.stalkers.len());
    for profile in context.stalkers {
        let candidates: Vec<Pos> = context
            .maze
            .cells
            .iter()
            .filter(|cell| cell.kind == CellKind::Floor)
            .map(|cell| cell.pos)
            .filter(|&pos| {
                context.from_start.get(pos).is_some_and(|dist| dist >= threshold)
                    && manhattan(pos, start) > profile.detection_radius
                    && !spawns.contains(&pos)
            })
            .collect();
        if candidates.is_empty() {
            return None;
        }
        spawns.push(candidates[roll_below(rng, candidates.len())]);
    }
    Some(spawns)
}
