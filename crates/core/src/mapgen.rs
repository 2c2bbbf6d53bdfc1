//! Procedural maze generation split into carving, hazard and spawn submodules.

mod carve;
mod generator;
mod seed;
mod spawns;

pub use generator::{GenerationError, MAX_GENERATION_ATTEMPTS, MazeGenerator, is_playable};
pub use seed::{derive_level_seed, runtime_seed};
pub(crate) use seed::{roll_below, roll_percent};

use crate::config::LevelConfig;
use crate::state::Maze;

/// Deterministic for `Some(seed)`; draws a runtime seed otherwise.
pub fn generate_maze(
    config: &LevelConfig,
    level: usize,
    seed: Option<u64>,
) -> Result<Maze, GenerationError> {
    MazeGenerator::new(config, level).generate(seed.unwrap_or_else(runtime_seed))
}
