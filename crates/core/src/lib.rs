pub mod config;
pub mod game;
pub mod grid;
pub mod journal;
pub mod mapgen;
pub mod replay;
pub mod state;
pub mod types;

pub use config::{LEVEL_COUNT, LevelConfig, LevelTable, TICK_MS};
pub use game::{DangerBand, Game, compute_visibility, tension_from_distance};
pub use journal::{InputJournal, InputRecord};
pub use mapgen::{GenerationError, generate_maze};
pub use replay::*;
pub use state::{GamePhase, GameState, Maze, VisibilityMap};
pub use types::*;
