use std::sync::Arc;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use crate::config::*;
use crate::grid::*;
use crate::mapgen::{self, GenerationError, MazeGenerator, roll_below, roll_percent};
use crate::state::*;
use crate::types::*;

mod abilities;
mod engine;
mod hash;
mod hazards;
mod stalker;
mod tension;
mod visibility;

#[cfg(test)]
mod test_support;

pub use engine::MAX_CATCH_UP_TICKS;
pub use tension::{DangerBand, TENSION_FALLOFF_CELLS, tension_from_distance};
pub use visibility::compute_visibility;

use engine::PendingIntents;

/// Stream id separating stalker randomness from maze carving.
const STALKER_RNG_STREAM: u64 = 0x57A1_CE55;

/// Where the current level's layout came from, so restarts can rebuild it.
#[derive(Clone, Debug)]
enum LevelSource {
    Generated,
    Fixed(Arc<Maze>),
}

pub struct Game {
    levels: LevelTable,
    run_seed: u64,
    /// Bumped on every restart and level advance.
    generation: u64,
    level_seed: u64,
    config: LevelConfig,
    source: LevelSource,
    rng: ChaCha8Rng,
    state: GameState,
    pending: PendingIntents,
    accumulator_ms: u64,
    log: Vec<LogEvent>,
}

impl Game {
    pub fn new(levels: LevelTable, level: usize, run_seed: u64) -> Result<Self, GenerationError> {
        Self::with_generation(levels, level, run_seed, 0)
    }

    /// Rebuilds the layout a run reached after `generation` restarts or
    /// level advances. Used to replay journals recorded mid-run.
    pub fn with_generation(
        levels: LevelTable,
        level: usize,
        run_seed: u64,
        generation: u64,
    ) -> Result<Self, GenerationError> {
        let level = clamp_level(level);
        let config = levels.get(level).clone();
        let level_seed = mapgen::derive_level_seed(run_seed, level, generation);
        let maze = MazeGenerator::new(&config, level).generate(level_seed)?;
        let mut game = Self::assemble(levels, run_seed, level_seed, config, level, maze);
        game.source = LevelSource::Generated;
        game.generation = generation;
        Ok(game)
    }

    /// Plays a hand-built layout. Restarts reuse it; advancing the level
    /// switches to generated mazes from the standard table.
    pub fn from_maze(config: LevelConfig, level: usize, maze: Maze, seed: u64) -> Self {
        let shared = Arc::new(maze.clone());
        let mut game = Self::assemble(LevelTable::standard(), seed, seed, config, level, maze);
        game.source = LevelSource::Fixed(shared);
        game
    }

    fn assemble(
        levels: LevelTable,
        run_seed: u64,
        level_seed: u64,
        config: LevelConfig,
        level: usize,
        maze: Maze,
    ) -> Self {
        let state = initial_state(level, &config, maze);
        let mut game = Self {
            levels,
            run_seed,
            generation: 0,
            level_seed,
            rng: stalker_rng(level_seed),
            config,
            source: LevelSource::Generated,
            state,
            pending: PendingIntents::default(),
            accumulator_ms: 0,
            log: Vec::new(),
        };
        game.log.push(LogEvent::LevelStarted { level, seed: level_seed });
        log::info!("level {} started with seed {level_seed}", level + 1);
        game
    }

    /// Discards the current run of this level and starts it over.
    pub fn restart(&mut self) -> Result<(), GenerationError> {
        self.generation += 1;
        let level = self.state.level;
        match self.source.clone() {
            LevelSource::Fixed(maze) => {
                self.install(level, self.level_seed, Maze::clone(&maze));
                Ok(())
            }
            LevelSource::Generated => self.regenerate(level),
        }
    }

    /// Moves to the next tier; past the last tier the last one repeats.
    pub fn advance_level(&mut self) -> Result<(), GenerationError> {
        self.generation += 1;
        let next = clamp_level(self.state.level + 1);
        self.config = self.levels.get(next).clone();
        self.source = LevelSource::Generated;
        self.regenerate(next)
    }

    fn regenerate(&mut self, level: usize) -> Result<(), GenerationError> {
        let level_seed = mapgen::derive_level_seed(self.run_seed, level, self.generation);
        let maze = MazeGenerator::new(&self.config, level).generate(level_seed)?;
        self.install(level, level_seed, maze);
        Ok(())
    }

    fn install(&mut self, level: usize, level_seed: u64, maze: Maze) {
        self.level_seed = level_seed;
        self.rng = stalker_rng(level_seed);
        self.state = initial_state(level, &self.config, maze);
        self.pending = PendingIntents::default();
        self.accumulator_ms = 0;
        self.log.push(LogEvent::LevelStarted { level, seed: level_seed });
        log::info!("level {} started with seed {level_seed}", level + 1);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Owned copy of the current state; the maze and visibility map are shared.
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    pub fn levels(&self) -> &LevelTable {
        &self.levels
    }

    pub fn level(&self) -> usize {
        self.state.level
    }

    pub fn run_seed(&self) -> u64 {
        self.run_seed
    }

    pub fn level_seed(&self) -> u64 {
        self.level_seed
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn current_tick(&self) -> u64 {
        self.state.tick
    }

    /// Wall-clock time banked toward the next tick.
    pub fn pending_ms(&self) -> u64 {
        self.accumulator_ms
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }
}

fn stalker_rng(level_seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(level_seed ^ STALKER_RNG_STREAM.rotate_left(29))
}

fn initial_state(level: usize, config: &LevelConfig, maze: Maze) -> GameState {
    let player = Player::new(maze.start, config.starting_bombs);
    let stalkers: Vec<Stalker> = maze
        .stalker_spawns
        .iter()
        .zip(&config.stalkers)
        .map(|(&pos, &profile)| Stalker::new(pos, profile))
        .collect();
    let visibility = compute_visibility(&maze, player.pos, config.vision_radius, false);
    let stalker_distance = tension::nearest_stalker_distance(&maze, player.pos, &stalkers);
    GameState {
        level,
        maze: Arc::new(maze),
        player,
        stalkers,
        tick: 0,
        visibility: Arc::new(visibility),
        stalker_distance,
        tension: tension_from_distance(stalker_distance),
        is_victory: false,
        is_caught: false,
    }
}
