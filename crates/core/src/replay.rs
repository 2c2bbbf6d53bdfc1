use std::fmt;

use crate::{
    RunOutcome,
    config::LevelTable,
    game::Game,
    journal::{InputJournal, JOURNAL_FORMAT_VERSION},
    mapgen::GenerationError,
};

#[derive(Debug, PartialEq)]
pub enum ReplayError {
    UnsupportedVersion { found: u16 },
    Generation(GenerationError),
    InputOutOfOrder { index: usize, tick: u64, previous: u64 },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedVersion { found } => write!(
                f,
                "journal format version {found} is not supported \
                 (expected {JOURNAL_FORMAT_VERSION})"
            ),
            Self::Generation(err) => write!(f, "could not rebuild level: {err}"),
            Self::InputOutOfOrder { index, tick, previous } => {
                write!(f, "input {index} at tick {tick} comes after tick {previous}")
            }
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Generation(err) => Some(err),
            Self::UnsupportedVersion { .. } | Self::InputOutOfOrder { .. } => None,
        }
    }
}

impl From<GenerationError> for ReplayError {
    fn from(err: GenerationError) -> Self {
        Self::Generation(err)
    }
}

#[derive(Debug, PartialEq)]
pub struct ReplayResult {
    /// `None` when `max_ticks` ran out before the level ended.
    pub outcome: Option<RunOutcome>,
    pub final_tick: u64,
    pub final_snapshot_hash: u64,
}

/// Rebuilds the recorded level and feeds each intent in just before the tick
/// it was recorded against, then runs on until the level ends or `max_ticks`.
pub fn replay_to_end(
    levels: &LevelTable,
    journal: &InputJournal,
    max_ticks: u64,
) -> Result<ReplayResult, ReplayError> {
    if journal.format_version != JOURNAL_FORMAT_VERSION {
        return Err(ReplayError::UnsupportedVersion { found: journal.format_version });
    }
    let mut game =
        Game::with_generation(levels.clone(), journal.level, journal.seed, journal.generation)?;

    let mut previous = 0;
    for (index, record) in journal.inputs.iter().enumerate() {
        if record.tick < previous {
            return Err(ReplayError::InputOutOfOrder { index, tick: record.tick, previous });
        }
        previous = record.tick;
        let target = record.tick.min(max_ticks);
        while game.current_tick() < target && game.tick() {}
        if game.current_tick() < record.tick || game.state().is_terminal() {
            break;
        }
        game.submit(record.intent);
    }
    while game.current_tick() < max_ticks && game.tick() {}

    Ok(ReplayResult {
        outcome: game.state().outcome(),
        final_tick: game.current_tick(),
        final_snapshot_hash: game.snapshot_hash(),
    })
}
