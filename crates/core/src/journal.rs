use serde::{Deserialize, Serialize};

use crate::game::Game;
use crate::types::Intent;

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputJournal {
    pub format_version: u16,
    pub seed: u64,
    pub level: usize,
    /// Restart/advance counter the level was generated under.
    #[serde(default)]
    pub generation: u64,
    pub inputs: Vec<InputRecord>,
}

/// `tick` is the game tick at submission time; the intent takes effect on
/// the following tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    pub tick: u64,
    pub intent: Intent,
}

impl InputJournal {
    pub fn new(seed: u64, level: usize) -> Self {
        Self {
            format_version: JOURNAL_FORMAT_VERSION,
            seed,
            level,
            generation: 0,
            inputs: Vec::new(),
        }
    }

    /// Empty journal for the level `game` is currently playing.
    pub fn for_game(game: &Game) -> Self {
        Self { generation: game.generation(), ..Self::new(game.run_seed(), game.level()) }
    }

    pub fn record(&mut self, tick: u64, intent: Intent) {
        self.inputs.push(InputRecord { tick, intent });
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
