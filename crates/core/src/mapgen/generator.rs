//! Retrying maze generation with post-generation connectivity validation.

use std::fmt;

use crate::config::{ConfigError, LevelConfig};
use crate::grid::DistanceField;
use crate::state::Maze;
use crate::types::CellKind;

use super::seed::mix_seed_stream;

mod hazards;
mod pipeline;

pub const MAX_GENERATION_ATTEMPTS: u32 = 8;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerationError {
    InvalidConfig(ConfigError),
    Exhausted { seed: u64, attempts: u32 },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(err) => write!(f, "invalid level config: {err}"),
            Self::Exhausted { seed, attempts } => {
                write!(f, "no valid maze for seed {seed} after {attempts} attempts")
            }
        }
    }
}

impl std::error::Error for GenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidConfig(err) => Some(err),
            Self::Exhausted { .. } => None,
        }
    }
}

pub struct MazeGenerator<'a> {
    config: &'a LevelConfig,
    level: usize,
}

impl<'a> MazeGenerator<'a> {
    pub fn new(config: &'a LevelConfig, level: usize) -> Self {
        Self { config, level }
    }

    pub fn generate(&self, seed: u64) -> Result<Maze, GenerationError> {
        self.config.validate(self.level).map_err(GenerationError::InvalidConfig)?;
        for attempt in 0..MAX_GENERATION_ATTEMPTS {
            let attempt_seed = mix_seed_stream(seed, u64::from(attempt));
            match pipeline::build_candidate(self.config, attempt_seed) {
                Some(maze) if is_playable(&maze, self.config) => return Ok(maze),
                _ => log::debug!("maze attempt {attempt} for seed {seed} rejected, retrying"),
            }
        }
        log::warn!(
            "maze generation exhausted {MAX_GENERATION_ATTEMPTS} attempts for level {} seed {seed}",
            self.level
        );
        Err(GenerationError::Exhausted { seed, attempts: MAX_GENERATION_ATTEMPTS })
    }
}

/// Every open cell is reachable from the start, and the exit stays reachable
/// even if every trap collapses.
pub fn is_playable(maze: &Maze, config: &LevelConfig) -> bool {
    if maze.start == maze.exit
        || maze.kind_at(maze.start) != CellKind::Start
        || maze.kind_at(maze.exit) != CellKind::Exit
        || maze.stalker_spawns.len() != config.stalkers.len()
    {
        return false;
    }
    let open = DistanceField::from_origin(maze, maze.start, |pos| {
        maze.kind_at(pos) != CellKind::Wall
    });
    let open_cells = maze.cells.len() - maze.count_kind(CellKind::Wall);
    if open.get(maze.exit).is_none() || open.reached_count() != open_cells {
        return false;
    }
    let trap_free = DistanceField::from_origin(maze, maze.start, |pos| {
        !matches!(maze.kind_at(pos), CellKind::Wall | CellKind::Trap)
    });
    trap_free.get(maze.exit).is_some()
        && maze.stalker_spawns.iter().all(|&spawn| {
            spawn != maze.start && spawn != maze.exit && open.get(spawn).is_some()
        })
}
