//! Single-attempt maze construction that composes carving, hazards and spawns.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use crate::config::LevelConfig;
use crate::grid::DistanceField;
use crate::state::Maze;
use crate::types::{CellKind, Pos};

use super::super::carve::{braid, carve_perfect_maze};
use super::super::seed::roll_below;
use super::super::spawns::{SpawnContext, choose_stalker_spawns};
use super::hazards::{HazardContext, place_bombs, place_traps};

/// Builds one candidate maze. `None` means the layout could not host every
/// stalker and the attempt should be retried with another seed.
pub(super) fn build_candidate(config: &LevelConfig, attempt_seed: u64) -> Option<Maze> {
    let mut rng = ChaCha8Rng::seed_from_u64(attempt_seed);
    let mut maze = carve_perfect_maze(&mut rng, config.width, config.height);
    braid(&mut maze, &mut rng, config.loop_pct);

    let start = pick_start_corner(&mut rng, config.width, config.height);
    let from_start = DistanceField::walkable_from(&maze, start);
    let (exit, _) = from_start.farthest()?;
    if exit == start {
        return None;
    }
    maze.start = start;
    maze.exit = exit;
    maze.set_kind(start, CellKind::Start);
    maze.set_kind(exit, CellKind::Exit);

    let route = from_start.route_to(exit)?;
    let mut hazards = HazardContext { maze: &mut maze, route: &route };
    place_traps(&mut hazards, &mut rng, config.trap_density_pct);
    place_bombs(&mut hazards, &mut rng, config.bomb_pickups);

    let spawns = choose_stalker_spawns(
        &SpawnContext { maze: &maze, from_start: &from_start, stalkers: &config.stalkers },
        &mut rng,
    )?;
    maze.stalker_spawns = spawns;
    Some(maze)
}

fn pick_start_corner(rng: &mut ChaCha8Rng, width: usize, height: usize) -> Pos {
    let far_x = (width - 2) as i32;
    let far_y = (height - 2) as i32;
    let corners = [
        Pos { y: 1, x: 1 },
        Pos { y: 1, x: far_x },
        Pos { y: far_y, x: 1 },
        Pos { y: far_y, x: far_x },
    ];
    corners[roll_below(rng, corners.len())]
}
