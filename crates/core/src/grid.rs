//! Grid-space primitives shared by maze generation and the simulation:
//! breadth-first distance fields, direction-priority stepping and line of sight.

use std::collections::VecDeque;

use crate::state::Maze;
use crate::types::{Direction, Pos};

pub fn neighbors(pos: Pos) -> [Pos; 4] {
    Direction::PRIORITY.map(|direction| pos.step(direction))
}

pub fn manhattan(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

pub fn chebyshev(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x).max(a.y.abs_diff(b.y))
}

pub fn euclidean(a: Pos, b: Pos) -> f32 {
    let dx = (a.x - b.x) as f32;
    let dy = (a.y - b.y) as f32;
    (dx * dx + dy * dy).sqrt()
}

/// Breadth-first step counts from one origin cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistanceField {
    width: usize,
    height: usize,
    dist: Vec<u32>,
}

impl DistanceField {
    /// The origin is always reached; expansion only enters cells accepted by `passable`.
    pub fn from_origin(maze: &Maze, origin: Pos, passable: impl Fn(Pos) -> bool) -> Self {
        let mut field =
            Self { width: maze.width, height: maze.height, dist: vec![u32::MAX; maze.cells.len()] };
        if !maze.in_bounds(origin) {
            return field;
        }
        let mut queue = VecDeque::from([origin]);
        let origin_index = field.index(origin);
        field.dist[origin_index] = 0;
        while let Some(current) = queue.pop_front() {
            let next_dist = field.dist[field.index(current)] + 1;
            for next in neighbors(current) {
                if !maze.in_bounds(next) || !passable(next) {
                    continue;
                }
                let idx = field.index(next);
                if field.dist[idx] == u32::MAX {
                    field.dist[idx] = next_dist;
                    queue.push_back(next);
                }
            }
        }
        field
    }

    pub fn walkable_from(maze: &Maze, origin: Pos) -> Self {
        Self::from_origin(maze, origin, |pos| maze.is_walkable(pos))
    }

    pub fn get(&self, pos: Pos) -> Option<u32> {
        if pos.x < 0 || pos.y < 0 || pos.x as usize >= self.width || pos.y as usize >= self.height
        {
            return None;
        }
        let dist = self.dist[self.index(pos)];
        (dist != u32::MAX).then_some(dist)
    }

    pub fn reached_count(&self) -> usize {
        self.dist.iter().filter(|&&dist| dist != u32::MAX).count()
    }

    /// Farthest reached cell; ties go to the lowest `(y, x)`.
    pub fn farthest(&self) -> Option<(Pos, u32)> {
        let mut best: Option<(Pos, u32)> = None;
        for (idx, &dist) in self.dist.iter().enumerate() {
            if dist == u32::MAX {
                continue;
            }
            if best.is_none_or(|(_, best_dist)| dist > best_dist) {
                let pos = Pos { y: (idx / self.width) as i32, x: (idx % self.width) as i32 };
                best = Some((pos, dist));
            }
        }
        best
    }

    /// Cells of one shortest route from the origin to `goal`, both ends included.
    pub fn route_to(&self, goal: Pos) -> Option<Vec<Pos>> {
        let mut dist = self.get(goal)?;
        let mut route = vec![goal];
        let mut current = goal;
        while dist > 0 {
            current = neighbors(current)
                .into_iter()
                .find(|&prev| self.get(prev) == Some(dist - 1))?;
            dist -= 1;
            route.push(current);
        }
        route.reverse();
        Some(route)
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

/// First step of a shortest walkable path from `from` to `goal`. Among equally
/// short paths the first step follows `Direction::PRIORITY`.
pub fn next_step_toward(maze: &Maze, from: Pos, goal: Pos) -> Option<Direction> {
    if from == goal {
        return None;
    }
    let field = DistanceField::from_origin(maze, goal, |pos| maze.is_walkable(pos));
    let here = field.get(from)?;
    Direction::PRIORITY.into_iter().find(|&direction| {
        let next = from.step(direction);
        maze.is_walkable(next) && field.get(next) == Some(here.saturating_sub(1))
    })
}

pub fn path_length(maze: &Maze, from: Pos, goal: Pos) -> Option<u32> {
    DistanceField::from_origin(maze, from, |pos| maze.is_walkable(pos)).get(goal)
}

/// Walks the grid line between the two cells; any opaque cell strictly between
/// them blocks sight. Diagonal corner squeezes count as steps through both axes.
pub fn has_line_of_sight(maze: &Maze, origin: Pos, target: Pos) -> bool {
    let dx = target.x - origin.x;
    let dy = target.y - origin.y;
    let sx = dx.signum();
    let sy = dy.signum();
    let total_x = dx.abs();
    let total_y = dy.abs();

    let mut x = origin.x;
    let mut y = origin.y;
    let mut step_x = 0;
    let mut step_y = 0;

    while step_x < total_x || step_y < total_y {
        let lhs = (1 + 2 * step_x) * total_y;
        let rhs = (1 + 2 * step_y) * total_x;

        if lhs == rhs {
            if maze.is_opaque(Pos { y, x: x + sx }) && maze.is_opaque(Pos { y: y + sy, x }) {
                return false;
            }
            x += sx;
            y += sy;
            step_x += 1;
            step_y += 1;
        } else if lhs < rhs {
            x += sx;
            step_x += 1;
        } else {
            y += sy;
            step_y += 1;
        }

        if x == target.x && y == target.y {
            break;
        }
        if maze.is_opaque(Pos { y, x }) {
            return false;
        }
    }
    true
}
