use macroquad::prelude::KeyCode;
use stalker_core::{
    AdvanceStopReason, Direction, Game, GenerationError, InputJournal, InputRecord, Intent,
    LEVEL_COUNT, RunOutcome,
};

use crate::best_times_file::BestTimesFile;

const UP_KEYS: [KeyCode; 2] = [KeyCode::Up, KeyCode::W];
const LEFT_KEYS: [KeyCode; 2] = [KeyCode::Left, KeyCode::A];
const DOWN_KEYS: [KeyCode; 2] = [KeyCode::Down, KeyCode::S];
const RIGHT_KEYS: [KeyCode; 2] = [KeyCode::Right, KeyCode::D];

/// Keys that went down this frame and keys currently held.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameKeys {
    pub pressed: Vec<KeyCode>,
    pub held: Vec<KeyCode>,
}

impl FrameKeys {
    fn pressed_any(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|key| self.pressed.contains(key))
    }

    fn held_any(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|key| self.held.contains(key))
    }

    fn direction(&self, test: impl Fn(&Self, &[KeyCode]) -> bool) -> Option<Direction> {
        Direction::PRIORITY.into_iter().find(|direction| {
            let keys: &[KeyCode] = match direction {
                Direction::Up => &UP_KEYS,
                Direction::Left => &LEFT_KEYS,
                Direction::Down => &DOWN_KEYS,
                Direction::Right => &RIGHT_KEYS,
            };
            test(self, keys)
        })
    }
}

/// Translates one frame of keys into engine intents.
///
/// Hide is level-triggered: an intent is only produced when the Space state
/// differs from `hiding`. A freshly pressed direction combines with B (bomb)
/// or Shift (dash); a held direction keeps walking.
pub fn frame_intents(keys: &FrameKeys, hiding: bool) -> Vec<Intent> {
    let mut intents = Vec::new();
    let hide_held = keys.held.contains(&KeyCode::Space);
    if hide_held && !hiding {
        intents.push(Intent::HideStart);
    } else if !hide_held && hiding {
        intents.push(Intent::HideEnd);
    }

    let shift = keys.held_any(&[KeyCode::LeftShift, KeyCode::RightShift]);
    let bomb = keys.held.contains(&KeyCode::B) || keys.pressed.contains(&KeyCode::B);
    if let Some(direction) = keys.direction(FrameKeys::pressed_any) {
        intents.push(if bomb {
            Intent::Bomb(direction)
        } else if shift {
            Intent::Dash(direction)
        } else {
            Intent::Move(direction)
        });
    } else if !bomb && !shift
        && let Some(direction) = keys.direction(FrameKeys::held_any)
    {
        intents.push(Intent::Move(direction));
    }
    intents
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AppMode {
    #[default]
    Playing,
    Finished(RunOutcome),
}

pub struct AppState {
    pub mode: AppMode,
    /// Inputs for the level currently being played.
    pub journal: InputJournal,
    pub best_times: BestTimesFile,
    /// Set when the last victory beat the stored record.
    pub new_best: bool,
    /// True only for the frame in which `best_times` changed.
    pub best_times_changed: bool,
    /// Journal of a level that ended this frame, for the caller to persist.
    pub finished_journal: Option<InputJournal>,
    hiding: bool,
    last_recorded: Option<InputRecord>,
}

impl AppState {
    pub fn new(game: &Game, best_times: BestTimesFile) -> Self {
        Self {
            mode: AppMode::Playing,
            journal: InputJournal::for_game(game),
            best_times,
            new_best: false,
            best_times_changed: false,
            finished_journal: None,
            hiding: false,
            last_recorded: None,
        }
    }

    /// Process input and simulation for a single rendered frame.
    pub fn tick(
        &mut self,
        game: &mut Game,
        keys: &FrameKeys,
        elapsed_ms: u64,
    ) -> Result<(), GenerationError> {
        self.best_times_changed = false;
        self.finished_journal = None;

        if keys.pressed.contains(&KeyCode::R) {
            game.restart()?;
            self.begin_level(game);
            return Ok(());
        }
        if keys.pressed.contains(&KeyCode::N) && self.can_advance(game) {
            game.advance_level()?;
            self.begin_level(game);
            return Ok(());
        }

        if let AppMode::Finished(_) = self.mode {
            return Ok(());
        }

        for intent in frame_intents(keys, self.hiding) {
            self.submit(game, intent);
        }

        let result = game.advance(elapsed_ms);
        if let AdvanceStopReason::Finished(outcome) = result.stop_reason {
            self.finish(game, outcome);
        }
        Ok(())
    }

    pub fn can_advance(&self, game: &Game) -> bool {
        self.mode == AppMode::Finished(RunOutcome::Victory) && game.level() + 1 < LEVEL_COUNT
    }

    fn submit(&mut self, game: &mut Game, intent: Intent) {
        match intent {
            Intent::HideStart => self.hiding = true,
            Intent::HideEnd => self.hiding = false,
            Intent::Move(_) | Intent::Dash(_) | Intent::Bomb(_) => {}
        }
        let record = InputRecord { tick: game.current_tick(), intent };
        game.submit(intent);
        // Held keys resubmit every frame; one record per tick is enough.
        if self.last_recorded != Some(record) {
            self.journal.record(record.tick, record.intent);
            self.last_recorded = Some(record);
        }
    }

    /// Runs once, on the frame the level flips to a terminal state.
    fn finish(&mut self, game: &Game, outcome: RunOutcome) {
        self.mode = AppMode::Finished(outcome);
        if outcome == RunOutcome::Victory {
            let elapsed_ms = game.state().elapsed_ms();
            self.new_best = self.best_times.record_if_better(game.level(), elapsed_ms);
            self.best_times_changed = self.new_best;
            log::info!(
                "level {} cleared in {elapsed_ms} ms{}",
                game.level() + 1,
                if self.new_best { " (new best)" } else { "" }
            );
        } else {
            log::info!("caught on level {} at tick {}", game.level() + 1, game.current_tick());
        }
        let fresh = InputJournal::for_game(game);
        self.finished_journal = Some(std::mem::replace(&mut self.journal, fresh));
    }

    fn begin_level(&mut self, game: &Game) {
        self.mode = AppMode::Playing;
        self.journal = InputJournal::for_game(game);
        self.new_best = false;
        self.hiding = false;
        self.last_recorded = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(pressed: &[KeyCode], held: &[KeyCode]) -> FrameKeys {
        FrameKeys { pressed: pressed.to_vec(), held: held.to_vec() }
    }

    #[test]
    fn arrow_and_wasd_keys_map_to_moves() {
        assert_eq!(
            frame_intents(&keys(&[KeyCode::Left], &[KeyCode::Left]), false),
            vec![Intent::Move(Direction::Left)]
        );
        assert_eq!(
            frame_intents(&keys(&[], &[KeyCode::S]), false),
            vec![Intent::Move(Direction::Down)]
        );
    }

    #[test]
    fn modifiers_turn_a_press_into_dash_or_bomb() {
        assert_eq!(
            frame_intents(&keys(&[KeyCode::D], &[KeyCode::LeftShift, KeyCode::D]), false),
            vec![Intent::Dash(Direction::Right)]
        );
        assert_eq!(
            frame_intents(&keys(&[KeyCode::Up], &[KeyCode::B, KeyCode::Up]), false),
            vec![Intent::Bomb(Direction::Up)]
        );
        assert!(
            frame_intents(&keys(&[], &[KeyCode::LeftShift, KeyCode::D]), false).is_empty(),
            "held direction with shift does not repeat the dash"
        );
    }

    #[test]
    fn hide_follows_the_space_key_level() {
        assert_eq!(frame_intents(&keys(&[], &[KeyCode::Space]), false), vec![Intent::HideStart]);
        assert!(frame_intents(&keys(&[], &[KeyCode::Space]), true).is_empty());
        assert_eq!(frame_intents(&keys(&[], &[]), true), vec![Intent::HideEnd]);
    }
}
