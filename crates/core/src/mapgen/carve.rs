//! Randomized depth-first carving over odd-coordinate rooms, plus braiding
//! that knocks through dead ends to open loops.

use rand_chacha::ChaCha8Rng;

use crate::grid::neighbors;
use crate::state::Maze;
use crate::types::{CellKind, Direction, Pos};

use super::seed::{roll_below, roll_percent, shuffle};

/// Carves a spanning tree: every odd-coordinate room is reachable from every
/// other through exactly one route. The outer ring stays wall.
pub(super) fn carve_perfect_maze(rng: &mut ChaCha8Rng, width: usize, height: usize) -> Maze {
    let mut maze = Maze::filled(width, height, CellKind::Wall);
    let origin = Pos { y: 1, x: 1 };
    maze.set_kind(origin, CellKind::Floor);

    let mut stack = vec![origin];
    while let Some(&current) = stack.last() {
        let unvisited: Vec<Direction> = Direction::PRIORITY
            .into_iter()
            .filter(|&direction| {
                let room = current.step(direction).step(direction);
                is_room(&maze, room) && maze.kind_at(room) == CellKind::Wall
            })
            .collect();
        if unvisited.is_empty() {
            stack.pop();
            continue;
        }
        let direction = unvisited[roll_below(rng, unvisited.len())];
        let passage = current.step(direction);
        let room = passage.step(direction);
        maze.set_kind(passage, CellKind::Floor);
        maze.set_kind(room, CellKind::Floor);
        stack.push(room);
    }
    maze
}

/// Opens a wall next to roughly `loop_pct` percent of dead ends. Only walls
/// with open floor on the far side are knocked out, so the ring stays intact.
pub(super) fn braid(maze: &mut Maze, rng: &mut ChaCha8Rng, loop_pct: u8) -> usize {
    let mut dead_ends = dead_ends(maze);
    shuffle(rng, &mut dead_ends);

    let mut opened = 0;
    for cell in dead_ends {
        if open_neighbor_count(maze, cell) != 1 || !roll_percent(rng, loop_pct) {
            continue;
        }
        let candidates: Vec<Pos> = Direction::PRIORITY
            .into_iter()
            .filter_map(|direction| {
                let wall = cell.step(direction);
                let beyond = wall.step(direction);
                (maze.kind_at(wall) == CellKind::Wall
                    && !maze.is_boundary(wall)
                    && maze.kind_at(beyond) == CellKind::Floor)
                    .then_some(wall)
            })
            .collect();
        if candidates.is_empty() {
            continue;
        }
        maze.set_kind(candidates[roll_below(rng, candidates.len())], CellKind::Floor);
        opened += 1;
    }
    opened
}

pub(super) fn dead_ends(maze: &Maze) -> Vec<Pos> {
    maze.cells
        .iter()
        .filter(|cell| cell.kind != CellKind::Wall && open_neighbor_count(maze, cell.pos) == 1)
        .map(|cell| cell.pos)
        .collect()
}

fn open_neighbor_count(maze: &Maze, pos: Pos) -> usize {
    neighbors(pos).into_iter().filter(|&next| maze.is_walkable(next)).count()
}

fn is_room(maze: &Maze, pos: Pos) -> bool {
    maze.in_bounds(pos) && !maze.is_boundary(pos) && pos.x % 2 == 1 && pos.y % 2 == 1
}
