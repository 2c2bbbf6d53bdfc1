//! Input intents queued between ticks.

use super::*;

/// Independent channels; a later intent replaces an earlier one on the same channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(in crate::game) struct PendingIntents {
    pub(super) movement: Option<Direction>,
    pub(super) ability: Option<Intent>,
    pub(super) hide: Option<bool>,
}

impl PendingIntents {
    pub(super) fn push(&mut self, intent: Intent) {
        match intent {
            Intent::Move(direction) => self.movement = Some(direction),
            Intent::Dash(_) | Intent::Bomb(_) => self.ability = Some(intent),
            Intent::HideStart => self.hide = Some(true),
            Intent::HideEnd => self.hide = Some(false),
        }
    }

    pub(super) fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    pub(super) fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Game {
    /// Queues an intent for the next tick. Ignored once the level has ended.
    pub fn submit(&mut self, intent: Intent) {
        if self.state.is_terminal() {
            return;
        }
        self.pending.push(intent);
    }

    pub fn has_pending_intents(&self) -> bool {
        !self.pending.is_empty()
    }
}
